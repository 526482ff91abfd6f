//! Ready-made game content.

pub mod standard;
