//! Joining, leaving, dreams and the idle flag.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use super::state::{Session, SessionStatus, TurnScratch};
use super::turn::TurnAdvance;
use crate::board::DreamId;
use crate::core::{DreamTarget, GameError, HistoryAction, Player, PlayerId, Result};

/// Result of removing a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Removal {
    pub player: Player,
    /// New host, if the departing player held the role.
    pub new_host: Option<PlayerId>,
    /// Set when the departing player held the turn.
    pub turn: Option<TurnAdvance>,
    /// The last player left and the session was reset.
    pub reset: bool,
}

impl Session {
    /// Add a player. Only possible before the game starts.
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<Player> {
        match self.status {
            SessionStatus::Waiting => {}
            SessionStatus::InProgress => return Err(GameError::AlreadyStarted),
            SessionStatus::Finished => return Err(GameError::GameFinished),
        }
        if self.players.len() >= self.config.max_players {
            return Err(GameError::SessionFull(self.config.max_players));
        }

        let start = self.board.start();
        let start_kind = self.board.cell(start)?.kind;
        let id = PlayerId::new(self.next_player_id);
        let join_order = self.next_join_order;
        self.next_player_id += 1;
        self.next_join_order += 1;

        let mut player = Player::new(
            id,
            name,
            self.config.color_for(join_order),
            join_order,
            start,
            self.config.starting_wallets,
        );
        player.position.kind = start_kind;
        player.is_host = self.players.is_empty();
        self.players.push(player.clone());

        self.record(
            Some(id),
            HistoryAction::PlayerJoined,
            format!("{} joined the game", player.name),
            json!({ "color": player.color, "host": player.is_host }),
        );
        info!(player = %id, name = %player.name, "player joined");
        Ok(player)
    }

    /// Remove a player.
    ///
    /// The host role passes to the earliest remaining joiner. If the player
    /// held the turn, it passes on. If nobody is left, the session resets.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<Removal> {
        let idx = self.players.index_of(id).ok_or(GameError::PlayerNotFound(id))?;
        let held_turn = self.current_turn == Some(id);

        let msg = format!("{} left the game", self.player(id)?.name);
        self.record(Some(id), HistoryAction::PlayerLeft, msg, serde_json::Value::Null);
        let player = self.players.remove(id).ok_or(GameError::PlayerNotFound(id))?;
        self.passed.remove(&id);
        info!(player = %id, name = %player.name, "player left");

        if self.players.is_empty() {
            self.reset();
            return Ok(Removal {
                player,
                new_host: None,
                turn: None,
                reset: true,
            });
        }

        let mut new_host = None;
        if player.is_host {
            if let Some(host_id) = self.players.earliest_joined() {
                let host = self.player_mut(host_id)?;
                host.is_host = true;
                let msg = format!("{} is now the host", host.name);
                self.record(Some(host_id), HistoryAction::HostChanged, msg, serde_json::Value::Null);
                new_host = Some(host_id);
            }
        }

        let turn = if held_turn && self.status == SessionStatus::InProgress {
            self.scratch = TurnScratch::default();
            let len = self.players.len();
            Some(self.advance_from((idx + len - 1) % len))
        } else {
            None
        };

        Ok(Removal {
            player,
            new_host,
            turn,
            reset: false,
        })
    }

    /// Pick the player's dream from the catalogue. A dream is chosen once.
    pub fn select_dream(&mut self, id: PlayerId, dream: DreamId) -> Result<DreamTarget> {
        if self.status == SessionStatus::Finished {
            return Err(GameError::GameFinished);
        }
        if self.player(id)?.assets.dream.is_some() {
            return Err(GameError::DreamAlreadySelected(id));
        }
        let definition = self.board.dream(dream).ok_or(GameError::UnknownDream(dream))?;
        let target = DreamTarget {
            id: definition.id,
            name: definition.name.clone(),
            price: definition.price,
            acquired: false,
        };

        let player = self.player_mut(id)?;
        player.assets.dream = Some(target.clone());
        let msg = format!("{} dreams of {}", player.name, target.name);
        self.record(
            Some(id),
            HistoryAction::DreamSelected,
            msg,
            json!({ "dream": target.id, "price": target.price }),
        );
        Ok(target)
    }

    /// Mark a player idle. Sleeping players are passed over without
    /// spending any skip.
    pub fn set_sleeping(&mut self, id: PlayerId, sleeping: bool) -> Result<()> {
        self.player_mut(id)?.status.sleeping = sleeping;
        debug!(player = %id, sleeping, "sleep flag changed");
        Ok(())
    }
}
