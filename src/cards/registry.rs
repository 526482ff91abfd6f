//! Card library: master card lists per category.
//!
//! The `CardLibrary` stores every card definition for a session and keeps,
//! per category, the master list decks are shuffled from.

use rustc_hash::FxHashMap;

use super::definition::{CardCategory, CardDefinition, CardId};
use crate::core::{GameError, Result};

/// Library of card definitions.
///
/// ## Example
///
/// ```
/// use finboard::cards::{CardCategory, CardDefinition, CardId, CardLibrary};
///
/// let mut library = CardLibrary::new();
/// library
///     .register(CardDefinition::new(CardId::new(1), CardCategory::Chance, "Lucky find"))
///     .unwrap();
///
/// assert_eq!(library.master(CardCategory::Chance), &[CardId::new(1)]);
/// assert!(library.master(CardCategory::News).is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardLibrary {
    cards: FxHashMap<CardId, CardDefinition>,
    masters: FxHashMap<CardCategory, Vec<CardId>>,
    next_id: u32,
}

impl CardLibrary {
    /// Create a new empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition. Fails if the ID is taken.
    pub fn register(&mut self, card: CardDefinition) -> Result<CardId> {
        if self.cards.contains_key(&card.id) {
            return Err(GameError::InvalidConfig(format!(
                "{} is registered twice",
                card.id
            )));
        }
        let id = card.id;
        self.next_id = self.next_id.max(id.raw() + 1);
        self.masters.entry(card.category).or_default().push(id);
        self.cards.insert(id, card);
        Ok(id)
    }

    /// Register a card under the next free ID, ignoring `card.id`.
    pub fn register_auto(&mut self, mut card: CardDefinition) -> CardId {
        card.id = CardId::new(self.next_id);
        let id = card.id;
        self.next_id += 1;
        self.masters.entry(card.category).or_default().push(id);
        self.cards.insert(id, card);
        id
    }

    /// Parse a JSON list of card definitions.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cards: Vec<CardDefinition> =
            serde_json::from_str(json).map_err(|e| GameError::parse("card library", e))?;

        let mut library = Self::new();
        for card in cards {
            library.register(card)?;
        }
        Ok(library)
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Master list for a category, in registration order.
    #[must_use]
    pub fn master(&self, category: CardCategory) -> &[CardId] {
        self.masters.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Effect;

    #[test]
    fn test_register_and_get() {
        let mut library = CardLibrary::new();
        let card = CardDefinition::new(CardId::new(1), CardCategory::Expenses, "Rent")
            .with_effect(Effect::Pay { amount: 300 });
        library.register(card).unwrap();

        let found = library.get(CardId::new(1)).unwrap();
        assert_eq!(found.title, "Rent");
        assert!(library.get(CardId::new(99)).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut library = CardLibrary::new();
        library
            .register(CardDefinition::new(CardId::new(1), CardCategory::Chance, "A"))
            .unwrap();

        let err = library
            .register(CardDefinition::new(CardId::new(1), CardCategory::News, "B"))
            .unwrap_err();

        assert!(matches!(err, GameError::InvalidConfig(_)));
        assert_eq!(library.len(), 1);
        assert!(library.master(CardCategory::News).is_empty());
    }

    #[test]
    fn test_register_auto_after_explicit() {
        let mut library = CardLibrary::new();
        library
            .register(CardDefinition::new(CardId::new(5), CardCategory::Chance, "A"))
            .unwrap();

        let id = library.register_auto(CardDefinition::new(CardId::new(0), CardCategory::Chance, "B"));

        assert_eq!(id, CardId::new(6));
        assert_eq!(library.master(CardCategory::Chance), &[CardId::new(5), CardId::new(6)]);
    }

    #[test]
    fn test_from_json() {
        let library = CardLibrary::from_json_str(
            r#"[
                { "id": 1, "category": "chance", "title": "Bonus", "effect": { "type": "receive", "amount": 500 } },
                { "id": 2, "category": "business", "title": "Cafe",
                  "effect": { "type": "purchase_offer", "name": "Cafe", "price": 2000, "cashflow": 150 } }
            ]"#,
        )
        .unwrap();

        assert_eq!(library.len(), 2);
        assert_eq!(library.master(CardCategory::Business), &[CardId::new(2)]);
        assert!(library.contains(CardId::new(1)));
    }

    #[test]
    fn test_from_json_bad_input() {
        let err = CardLibrary::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, GameError::Parse { what: "card library", .. }));
    }
}
