//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: its deck,
//! its narrative text and the declarative effect it carries. Drawing a
//! card never changes its definition.

use serde::{Deserialize, Serialize};

use crate::core::Player;
use crate::effects::Effect;

/// Unique identifier for a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The deck a card belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardCategory {
    Chance,
    News,
    Expenses,
    Business,
}

impl CardCategory {
    pub const ALL: [CardCategory; 4] = [
        CardCategory::Chance,
        CardCategory::News,
        CardCategory::Expenses,
        CardCategory::Business,
    ];
}

impl std::fmt::Display for CardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardCategory::Chance => "chance",
            CardCategory::News => "news",
            CardCategory::Expenses => "expenses",
            CardCategory::Business => "business",
        };
        f.write_str(name)
    }
}

/// Something a player must hold for a card's economic effect to apply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Requirement {
    Skill { skill: String },
    Asset { name: String },
}

impl Requirement {
    #[must_use]
    pub fn is_met(&self, player: &Player) -> bool {
        match self {
            Requirement::Skill { skill } => player.has_skill(skill),
            Requirement::Asset { name } => player.assets.owns(name),
        }
    }
}

/// Static card definition.
///
/// Message templates may use `{player}`, `{amount}` and `{card}`.
///
/// ## Example
///
/// ```
/// use finboard::cards::{CardCategory, CardDefinition, CardId};
/// use finboard::effects::Effect;
///
/// let card = CardDefinition::new(CardId::new(1), CardCategory::Expenses, "Dentist")
///     .with_effect(Effect::Pay { amount: 150 })
///     .with_message_self("{player} pays {amount} at the dentist");
///
/// assert_eq!(card.title, "Dentist");
/// assert!(card.requirement.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub category: CardCategory,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub effect: Effect,
    #[serde(default)]
    pub requirement: Option<Requirement>,
    #[serde(default)]
    pub message_self: Option<String>,
    #[serde(default)]
    pub message_others: Option<String>,
    /// Shown instead of `message_self` when the requirement is not met.
    #[serde(default)]
    pub message_missing: Option<String>,
}

impl CardDefinition {
    /// Create a narrative-only card.
    #[must_use]
    pub fn new(id: CardId, category: CardCategory, title: impl Into<String>) -> Self {
        Self {
            id,
            category,
            title: title.into(),
            description: String::new(),
            effect: Effect::Nothing,
            requirement: None,
            message_self: None,
            message_others: None,
            message_missing: None,
        }
    }

    // === Builder methods ===

    #[must_use]
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    #[must_use]
    pub fn requires_skill(mut self, skill: impl Into<String>) -> Self {
        self.requirement = Some(Requirement::Skill { skill: skill.into() });
        self
    }

    #[must_use]
    pub fn requires_asset(mut self, name: impl Into<String>) -> Self {
        self.requirement = Some(Requirement::Asset { name: name.into() });
        self
    }

    #[must_use]
    pub fn with_message_self(mut self, template: impl Into<String>) -> Self {
        self.message_self = Some(template.into());
        self
    }

    #[must_use]
    pub fn with_message_others(mut self, template: impl Into<String>) -> Self {
        self.message_others = Some(template.into());
        self
    }

    #[must_use]
    pub fn with_message_missing(mut self, template: impl Into<String>) -> Self {
        self.message_missing = Some(template.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CellId;
    use crate::core::{Business, PlayerId};
    use crate::finance::Wallets;

    #[test]
    fn test_requirement_checks() {
        let mut p = Player::new(PlayerId::new(0), "Ada", "red", 0, CellId::new(0), Wallets::default());
        let skill = Requirement::Skill { skill: "accounting".into() };
        let asset = Requirement::Asset { name: "Cafe".into() };

        assert!(!skill.is_met(&p));
        assert!(!asset.is_met(&p));

        p.assets.skills.insert("accounting".into());
        p.assets.businesses.push(Business { name: "Cafe".into(), price: 100, cashflow: 10 });

        assert!(skill.is_met(&p));
        assert!(asset.is_met(&p));
    }

    #[test]
    fn test_deserialize_minimal_card() {
        let card: CardDefinition = serde_json::from_str(
            r#"{ "id": 3, "category": "news", "title": "Tax reform",
                 "effect": { "type": "pay_percent", "percent": 5 },
                 "requirement": { "type": "skill", "skill": "law" } }"#,
        )
        .unwrap();

        assert_eq!(card.category, CardCategory::News);
        assert_eq!(card.effect, Effect::PayPercent { percent: 5 });
        assert_eq!(card.requirement, Some(Requirement::Skill { skill: "law".into() }));
        assert!(card.description.is_empty());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(CardCategory::Expenses.to_string(), "expenses");
        assert_eq!(CardCategory::ALL.len(), 4);
    }
}
