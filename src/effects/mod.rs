//! Effect system for cards and cells.
//!
//! - `Effect`: closed, tagged set of declarative effects
//! - `Offer`: a pending accept/decline decision
//! - `EffectResolver`: applies effects and offers to a player
//!
//! ## Design Philosophy
//!
//! Cards and cells never carry code. They carry an `Effect`, and the
//! resolver is the only place that turns one into wallet or status changes.

mod effect;
mod resolver;

pub use effect::{Effect, Offer};
pub use resolver::{EffectOutcome, EffectResolver, OfferOutcome};
