//! Players and the join-ordered player roster.
//!
//! ## PlayerId
//!
//! Type-safe player identifier, allocated by the session in join order.
//!
//! ## PlayerRoster
//!
//! Insertion-ordered player storage. Join order is turn order, so the roster
//! is a `Vec` rather than a map, with lookup by `PlayerId`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::board::{CellId, CellKind, DreamId};
use crate::finance::{Debt, Wallets};

/// Player identifier. Never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
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

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Outcome of a fork coin flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinSide {
    Heads,
    Tails,
}

impl CoinSide {
    /// Index into a fork cell's edge list.
    #[must_use]
    pub const fn edge_index(self) -> usize {
        match self {
            CoinSide::Heads => 0,
            CoinSide::Tails => 1,
        }
    }
}

/// Where a player stands on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub cell: CellId,
    pub kind: CellKind,
    /// Edge to take out of the current fork cell on the next move.
    /// Set only while standing on a fork, consumed by the next move.
    pub pending_fork: Option<usize>,
}

/// Per-player turn modifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub skipped_turns: u32,
    pub income_blocked_turns: u32,
    pub double_dice_turns: u32,
    /// First die of a double-dice roll, held until the second roll.
    pub pending_first_die: Option<u32>,
    pub charity_credits: u32,
    pub sleeping: bool,
}

/// An owned business with recurring cashflow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Business {
    pub name: String,
    pub price: u64,
    pub cashflow: u64,
}

/// A sellable item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub price: u64,
}

/// A player's chosen dream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DreamTarget {
    pub id: DreamId,
    pub name: String,
    pub price: u64,
    pub acquired: bool,
}

/// Everything a player owns besides cash.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assets {
    pub businesses: Vec<Business>,
    pub items: Vec<Item>,
    pub skills: BTreeSet<String>,
    pub dream: Option<DreamTarget>,
}

impl Assets {
    /// Sum of recurring cashflow over all businesses.
    #[must_use]
    pub fn business_cashflow(&self) -> u64 {
        self.businesses.iter().map(|b| b.cashflow).sum()
    }

    /// Whether the player owns a business or item with this name.
    #[must_use]
    pub fn owns(&self, name: &str) -> bool {
        self.businesses.iter().any(|b| b.name == name) || self.items.iter().any(|i| i.name == name)
    }
}

/// A player in the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    pub join_order: u32,
    pub is_host: bool,
    pub position: Position,
    pub status: PlayerStatus,
    pub wallets: Wallets,
    pub assets: Assets,
    pub debts: Vec<Debt>,
}

impl Player {
    /// Create a player standing on the given start cell.
    #[must_use]
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        color: impl Into<String>,
        join_order: u32,
        start: CellId,
        wallets: Wallets,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            join_order,
            is_host: false,
            position: Position {
                cell: start,
                kind: CellKind::Start,
                pending_fork: None,
            },
            status: PlayerStatus::default(),
            wallets,
            assets: Assets::default(),
            debts: Vec::new(),
        }
    }

    /// Whether the player holds a skill.
    #[must_use]
    pub fn has_skill(&self, skill: &str) -> bool {
        self.assets.skills.contains(skill)
    }

    /// Total outstanding debt.
    #[must_use]
    pub fn total_debt(&self) -> u64 {
        self.debts.iter().map(|d| d.amount).sum()
    }
}

/// Join-ordered player storage.
///
/// ```
/// use finboard::core::{Player, PlayerId, PlayerRoster};
/// use finboard::board::CellId;
/// use finboard::finance::Wallets;
///
/// let mut roster = PlayerRoster::default();
/// roster.push(Player::new(PlayerId::new(0), "Ada", "red", 0, CellId::new(0), Wallets::default()));
/// roster.push(Player::new(PlayerId::new(1), "Bo", "blue", 1, CellId::new(0), Wallets::default()));
///
/// assert_eq!(roster.index_of(PlayerId::new(1)), Some(1));
/// assert_eq!(roster.next_index(1), 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRoster {
    players: Vec<Player>,
}

impl PlayerRoster {
    /// Number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Append a player at the end of the turn order.
    pub fn push(&mut self, player: Player) {
        self.players.push(player);
    }

    /// Remove a player, returning it.
    pub fn remove(&mut self, id: PlayerId) -> Option<Player> {
        let idx = self.index_of(id)?;
        Some(self.players.remove(idx))
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }

    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Position of a player in turn order.
    #[must_use]
    pub fn index_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Turn-order successor of the given index, wrapping.
    #[must_use]
    pub fn next_index(&self, idx: usize) -> usize {
        (idx + 1) % self.players.len()
    }

    #[must_use]
    pub fn at(&self, idx: usize) -> Option<&Player> {
        self.players.get(idx)
    }

    pub fn at_mut(&mut self, idx: usize) -> Option<&mut Player> {
        self.players.get_mut(idx)
    }

    #[must_use]
    pub fn first(&self) -> Option<&Player> {
        self.players.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// All player IDs in turn order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(|p| p.id)
    }

    /// The player with the lowest join order.
    #[must_use]
    pub fn earliest_joined(&self) -> Option<PlayerId> {
        self.players.iter().min_by_key(|p| p.join_order).map(|p| p.id)
    }
}
