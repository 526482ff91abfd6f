//! The session: one authoritative game state.
//!
//! `Session` owns every piece of mutable state (players, decks, turn
//! pointer, history) and exposes the command surface. The command
//! handlers live in sibling modules, each an `impl Session` block for one
//! concern, and share the helpers defined here.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::{BoardGraph, CellId, CellRules, ChoiceOption};
use crate::cards::{CardCategory, CardLibrary, ClientCard, DeckStore};
use crate::core::{
    GameError, GameRng, History, HistoryAction, Notification, Player, PlayerId, PlayerRoster,
    Result, SessionConfig,
};
use crate::effects::Offer;

/// Session lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Waiting,
    InProgress,
    Finished,
}

/// A decision the current player owes before their turn can end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pending {
    /// Landed on a card cell; waiting for the draw request.
    Draw { category: CardCategory },
    /// Card shown; waiting for acknowledgement.
    Card { card: ClientCard },
    /// Purchase, sale or charity offer. `card` is applied on resolution.
    Offer {
        offer: Offer,
        source: String,
        card: Option<ClientCard>,
    },
    /// Landed on an income cell while income is blocked.
    IncomeBlocked { cell: CellId },
    /// Choice cell; waiting for an option.
    Choice {
        cell: CellId,
        prompt: String,
        options: Vec<ChoiceOption>,
    },
    /// Another player's dream is for sale.
    DreamAsset { cell: CellId, offer: Offer },
}

/// Client-facing summary of [`Pending`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Awaiting {
    Draw,
    Acknowledge,
    PurchaseChoice,
    SaleChoice,
    CharityChoice,
    Choice,
    DreamAssetChoice,
}

impl Pending {
    #[must_use]
    pub fn awaiting(&self) -> Awaiting {
        match self {
            Pending::Draw { .. } => Awaiting::Draw,
            Pending::Card { .. } | Pending::IncomeBlocked { .. } => Awaiting::Acknowledge,
            Pending::Offer { offer, .. } => match offer {
                Offer::Purchase { .. } => Awaiting::PurchaseChoice,
                Offer::Sale { .. } => Awaiting::SaleChoice,
                Offer::Charity { .. } => Awaiting::CharityChoice,
                Offer::DreamAsset { .. } => Awaiting::DreamAssetChoice,
            },
            Pending::Choice { .. } => Awaiting::Choice,
            Pending::DreamAsset { .. } => Awaiting::DreamAssetChoice,
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Pending::Draw { .. } => "card draw",
            Pending::Card { .. } => "card acknowledgement",
            Pending::Offer { offer, .. } => offer.kind_name(),
            Pending::IncomeBlocked { .. } => "income block acknowledgement",
            Pending::Choice { .. } => "cell choice",
            Pending::DreamAsset { .. } => "dream asset offer",
        }
    }
}

/// Per-turn scratch data, reset whenever the turn passes.
#[derive(Clone, Debug, Default)]
pub(crate) struct TurnScratch {
    pub last_roll: Option<u32>,
    pub pending: Option<Pending>,
}

/// Money and start cells a player passed on their latest move.
#[derive(Clone, Debug, Default)]
pub(crate) struct PassedCells {
    pub cells: Vec<CellId>,
    pub collected: Vec<CellId>,
}

/// A single game session.
///
/// Build one with [`SessionBuilder`](super::SessionBuilder). All commands
/// validate before they mutate, so a rejected command leaves the session
/// unchanged.
#[derive(Clone, Debug)]
pub struct Session {
    pub(crate) config: SessionConfig,
    pub(crate) board: BoardGraph,
    pub(crate) rules: CellRules,
    pub(crate) library: CardLibrary,

    pub(crate) status: SessionStatus,
    pub(crate) players: PlayerRoster,
    pub(crate) current_turn: Option<PlayerId>,
    pub(crate) turn_number: u32,
    pub(crate) decks: DeckStore,
    pub(crate) history: History,
    pub(crate) notifications: Vec<Notification>,
    pub(crate) scratch: TurnScratch,
    pub(crate) passed: FxHashMap<PlayerId, PassedCells>,

    root_rng: GameRng,
    epoch: u64,
    pub(crate) dice: GameRng,
    pub(crate) coin: GameRng,

    pub(crate) next_player_id: u32,
    pub(crate) next_join_order: u32,
    pub(crate) started_at: Option<DateTime<Utc>>,
    pub(crate) finished_at: Option<DateTime<Utc>>,
}

impl Session {
    pub(crate) fn new(
        config: SessionConfig,
        board: BoardGraph,
        rules: CellRules,
        library: CardLibrary,
    ) -> Self {
        let root_rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let decks = DeckStore::new(root_rng.for_context("decks/0"));
        let dice = root_rng.for_context("dice/0");
        let coin = root_rng.for_context("coin/0");

        Self {
            config,
            board,
            rules,
            library,
            status: SessionStatus::Waiting,
            players: PlayerRoster::default(),
            current_turn: None,
            turn_number: 0,
            decks,
            history: History::new(),
            notifications: Vec::new(),
            scratch: TurnScratch::default(),
            passed: FxHashMap::default(),
            root_rng,
            epoch: 0,
            dice,
            coin,
            next_player_id: 0,
            next_join_order: 0,
            started_at: None,
            finished_at: None,
        }
    }

    /// Return to `waiting` with no players, no decks and an empty history.
    ///
    /// Randomness continues on fresh streams, so a reset session does not
    /// replay the previous game's dice.
    pub fn reset(&mut self) {
        self.epoch += 1;
        let epoch = self.epoch;

        self.status = SessionStatus::Waiting;
        self.players.clear();
        self.current_turn = None;
        self.turn_number = 0;
        self.decks.clear();
        self.decks.reseed(self.root_rng.for_context(&format!("decks/{epoch}")));
        self.dice = self.root_rng.for_context(&format!("dice/{epoch}"));
        self.coin = self.root_rng.for_context(&format!("coin/{epoch}"));
        self.history = History::new();
        self.notifications.clear();
        self.scratch = TurnScratch::default();
        self.passed.clear();
        self.next_player_id = 0;
        self.next_join_order = 0;
        self.started_at = None;
        self.finished_at = None;

        info!(epoch, "session reset");
    }

    // === Accessors ===

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &BoardGraph {
        &self.board
    }

    #[must_use]
    pub fn rules(&self) -> &CellRules {
        &self.rules
    }

    #[must_use]
    pub fn library(&self) -> &CardLibrary {
        &self.library
    }

    #[must_use]
    pub fn players(&self) -> &PlayerRoster {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players.get(id).ok_or(GameError::PlayerNotFound(id))
    }

    #[must_use]
    pub fn current_turn(&self) -> Option<PlayerId> {
        self.current_turn
    }

    /// Turn counter, 1 for the first turn. Zero before the game starts.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The decision the current player owes, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&Pending> {
        self.scratch.pending.as_ref()
    }

    /// Result of the current turn's completed roll.
    #[must_use]
    pub fn last_roll(&self) -> Option<u32> {
        self.scratch.last_roll
    }

    /// Cards left in a category's queue before the next reshuffle.
    #[must_use]
    pub fn deck_remaining(&self, category: CardCategory) -> usize {
        self.decks.remaining(category)
    }

    /// Money and start cells passed on the player's latest move and not
    /// yet collected.
    #[must_use]
    pub fn collectible_cells(&self, id: PlayerId) -> Vec<CellId> {
        self.passed.get(&id).map_or_else(Vec::new, |p| {
            p.cells
                .iter()
                .copied()
                .filter(|c| !p.collected.contains(c))
                .collect()
        })
    }

    /// When the game started.
    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    // === Shared helpers ===

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players.get_mut(id).ok_or(GameError::PlayerNotFound(id))
    }

    pub(crate) fn require_in_progress(&self) -> Result<()> {
        match self.status {
            SessionStatus::InProgress => Ok(()),
            SessionStatus::Waiting => Err(GameError::NotInProgress),
            SessionStatus::Finished => Err(GameError::GameFinished),
        }
    }

    /// The game is running, the player exists and it is their turn.
    pub(crate) fn require_turn(&self, id: PlayerId) -> Result<()> {
        self.require_in_progress()?;
        self.player(id)?;
        if self.current_turn != Some(id) {
            return Err(GameError::NotYourTurn {
                player: id,
                current: self.current_turn,
            });
        }
        Ok(())
    }

    /// Like `require_turn`, and nothing is waiting on a decision.
    pub(crate) fn require_free_turn(&self, id: PlayerId) -> Result<()> {
        self.require_turn(id)?;
        match &self.scratch.pending {
            Some(pending) => Err(GameError::DecisionPending(pending.label())),
            None => Ok(()),
        }
    }

    /// Like `require_free_turn`, and no double-dice roll is half done.
    pub(crate) fn require_settled_turn(&self, id: PlayerId) -> Result<()> {
        self.require_free_turn(id)?;
        if self.player(id)?.status.pending_first_die.is_some() {
            return Err(GameError::DecisionPending("second die"));
        }
        Ok(())
    }

    /// Record a history entry attributed to a player (or the system when
    /// the player is gone).
    pub(crate) fn record(
        &mut self,
        actor: Option<PlayerId>,
        action: HistoryAction,
        message: impl Into<String>,
        extra: serde_json::Value,
    ) {
        let player = actor.and_then(|id| self.players.get(id));
        self.history.record(player, action, message, extra);
    }
}
