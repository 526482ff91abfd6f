//! Card system: definitions, library, decks and interpretation.
//!
//! ## Key Types
//!
//! - `CardId`, `CardCategory`: identifiers for definitions and decks
//! - `CardDefinition`: static card data with a declarative effect
//! - `CardLibrary`: master card lists per category
//! - `DeckStore`: per-session shuffled queues with reshuffle-on-exhaustion
//! - `ClientCard`: a drawn card resolved against its drawer

pub mod deck;
pub mod definition;
pub mod interpret;
pub mod registry;

pub use deck::DeckStore;
pub use definition::{CardCategory, CardDefinition, CardId, Requirement};
pub use interpret::{apply_card_effect, ClientCard};
pub use registry::CardLibrary;
