//! Session configuration.
//!
//! Hosts configure a session at startup with a `SessionConfig`, either
//! built in code or deserialized from JSON. Every field has a default, so
//! a JSON document only needs the fields it changes.

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};
use crate::finance::Wallets;

/// Default cosmetic player colours, handed out in join order.
pub const DEFAULT_COLORS: [&str; 6] = ["red", "blue", "green", "yellow", "purple", "orange"];

/// Tunable session parameters.
///
/// ## Example
///
/// ```
/// use finboard::core::SessionConfig;
///
/// let config = SessionConfig::from_json_str(r#"{ "seed": 7, "max_players": 4 }"#).unwrap();
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.max_players, 4);
/// assert_eq!(config.double_dice_turns, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Maximum players allowed to join.
    pub max_players: usize,

    /// Double-dice turns granted by redeeming a charity credit.
    pub double_dice_turns: u32,

    /// Flat income added to business cashflow when collecting income.
    pub base_income: u64,

    /// Envelope balances for newly joined players.
    pub starting_wallets: Wallets,

    /// Cosmetic colours, assigned by join order (wrapping).
    pub colors: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_players: 6,
            double_dice_turns: 3,
            base_income: 0,
            starting_wallets: Wallets::default(),
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| GameError::parse("config", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the player limit.
    #[must_use]
    pub fn with_max_players(mut self, max: usize) -> Self {
        self.max_players = max;
        self
    }

    /// Set the flat income added on collection.
    #[must_use]
    pub fn with_base_income(mut self, amount: u64) -> Self {
        self.base_income = amount;
        self
    }

    /// Set starting balances.
    #[must_use]
    pub fn with_starting_wallets(mut self, wallets: Wallets) -> Self {
        self.starting_wallets = wallets;
        self
    }

    /// Check invariants the engine relies on.
    pub fn validate(&self) -> Result<()> {
        if self.max_players == 0 {
            return Err(GameError::InvalidConfig("max_players must be at least 1".into()));
        }
        if self.colors.is_empty() {
            return Err(GameError::InvalidConfig("colour palette is empty".into()));
        }
        Ok(())
    }

    /// Colour for the player with the given join order.
    #[must_use]
    pub fn color_for(&self, join_order: u32) -> &str {
        &self.colors[join_order as usize % self.colors.len()]
    }
}
