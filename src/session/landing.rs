//! Cell landing: deciding what happens where a move ends.
//!
//! Evaluated in priority order:
//!
//! 1. An income cell while income is blocked waits for acknowledgement.
//! 2. A cell rule (by id, then by kind) runs its declared action.
//! 3. Card cells wait for a draw, forks end the turn with `choose_path`,
//!    anything else is a plain landing that ends the turn.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::state::{Pending, Session};
use crate::board::{Cell, CellAction, CellId, CellKind, CellRule, ChoiceOption, DreamId};
use crate::cards::CardCategory;
use crate::core::{GameError, HistoryAction, Notification, PlayerId, Result};
use crate::effects::{Effect, EffectOutcome, EffectResolver, Offer};
use crate::finance::{self, IncomeOutcome, SpendPurpose, Wallets};

/// What a landing did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LandingAction {
    /// Acknowledge to end the turn; acknowledging spends one blocked turn.
    IncomeBlocked { remaining: u32 },
    IncomeCollected { amount: u64, split: Wallets },
    CharityBonus { granted: bool, turns: u32 },
    DreamFulfilled { dream: DreamId, name: String, price: u64 },
    /// Own dream, but the dream envelope cannot pay for it.
    DreamFail { needed: u64, available: u64 },
    DreamNotSelected,
    DreamAlreadyOwned,
    /// Another player's dream, affordable from investments.
    DreamAssetOffer { dream: DreamId, name: String, price: u64 },
    /// Another player's dream, not affordable.
    DreamCheckFail { needed: u64, available: u64 },
    Choice { prompt: String, options: Vec<ChoiceOption> },
    EffectApplied { effect: Effect, outcome: EffectOutcome },
    DrawCard { category: CardCategory },
    ChoosePath { edges: Vec<CellId> },
    Nothing,
}

/// Result of landing on a cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingOutcome {
    pub cell: CellId,
    pub kind: CellKind,
    pub action: LandingAction,
    pub message: String,
    /// The turn passes as soon as the landing resolves.
    pub ends_turn: bool,
}

impl Session {
    /// Resolve the landing for the player's current cell.
    pub(crate) fn land(&mut self, id: PlayerId) -> Result<LandingOutcome> {
        let player = self.player(id)?;
        let cell = self.board.cell(player.position.cell)?.clone();
        let name = player.name.clone();

        if cell.kind.is_income() && player.status.income_blocked_turns > 0 {
            let remaining = player.status.income_blocked_turns;
            self.scratch.pending = Some(Pending::IncomeBlocked { cell: cell.id });
            return Ok(outcome(
                &cell,
                LandingAction::IncomeBlocked { remaining },
                format!("{name}'s income is blocked ({remaining} turn(s) left)"),
                false,
            ));
        }

        if let Some(rule) = self.rules.lookup(&cell).cloned() {
            return self.apply_rule(id, &cell, rule);
        }

        if let Some(category) = cell.kind.card_category() {
            self.scratch.pending = Some(Pending::Draw { category });
            return Ok(outcome(
                &cell,
                LandingAction::DrawCard { category },
                format!("{name} draws a {category} card"),
                false,
            ));
        }

        if cell.is_fork() {
            return Ok(outcome(
                &cell,
                LandingAction::ChoosePath {
                    edges: cell.edges.to_vec(),
                },
                format!("{name} reached a fork and will flip a coin next turn"),
                true,
            ));
        }

        Ok(outcome(&cell, LandingAction::Nothing, format!("{name} rests"), true))
    }

    fn apply_rule(&mut self, id: PlayerId, cell: &Cell, rule: CellRule) -> Result<LandingOutcome> {
        let mut landing = match rule.action {
            CellAction::CollectIncome => self.land_income(id, cell)?,
            CellAction::CharityBonus => self.land_charity(id, cell)?,
            CellAction::DreamCheck => self.land_dream(id, cell)?,
            CellAction::Choice { prompt, options } => {
                self.scratch.pending = Some(Pending::Choice {
                    cell: cell.id,
                    prompt: prompt.clone(),
                    options: options.clone(),
                });
                outcome(cell, LandingAction::Choice { prompt: prompt.clone(), options }, prompt, false)
            }
            CellAction::Effect { effect } => self.land_effect(id, cell, effect)?,
        };
        if let Some(message) = rule.message {
            landing.message = message;
        }
        Ok(landing)
    }

    fn land_income(&mut self, id: PlayerId, cell: &Cell) -> Result<LandingOutcome> {
        let (income, amount) = self.collect_income(id, cell.id)?;
        let name = &self.player(id)?.name;
        let landing = match income {
            IncomeOutcome::Distributed { split } => outcome(
                cell,
                LandingAction::IncomeCollected { amount, split },
                format!("{name} collected {amount} income"),
                true,
            ),
            IncomeOutcome::Blocked { remaining } => outcome(
                cell,
                LandingAction::IncomeBlocked { remaining },
                format!("{name}'s income is blocked"),
                true,
            ),
        };
        Ok(landing)
    }

    fn land_charity(&mut self, id: PlayerId, cell: &Cell) -> Result<LandingOutcome> {
        let turns = self.config.double_dice_turns;
        let player = self.player_mut(id)?;
        let name = player.name.clone();

        if player.status.charity_credits == 0 {
            return Ok(outcome(
                cell,
                LandingAction::CharityBonus { granted: false, turns: 0 },
                format!("{name} has no charity to redeem"),
                true,
            ));
        }

        player.status.charity_credits -= 1;
        player.status.double_dice_turns = turns;
        player.status.pending_first_die = None;
        self.record(
            Some(id),
            HistoryAction::CharityBonus,
            format!("{name} rolls two dice for the next {turns} turns"),
            json!({ "turns": turns }),
        );
        self.notifications.push(Notification::CharityBonusGranted {
            player: id,
            name: name.clone(),
            turns,
        });
        Ok(outcome(
            cell,
            LandingAction::CharityBonus { granted: true, turns },
            format!("{name}'s generosity pays off: double dice for {turns} turns"),
            true,
        ))
    }

    fn land_dream(&mut self, id: PlayerId, cell: &Cell) -> Result<LandingOutcome> {
        let player = self.player(id)?;
        let name = player.name.clone();
        let Some(target) = player.assets.dream.clone() else {
            return Ok(outcome(
                cell,
                LandingAction::DreamNotSelected,
                format!("{name} has not chosen a dream yet"),
                true,
            ));
        };

        let own = cell.dream.map_or(true, |dream| dream == target.id);
        if own {
            if target.acquired {
                return Ok(outcome(
                    cell,
                    LandingAction::DreamAlreadyOwned,
                    format!("{name} already owns {}", target.name),
                    true,
                ));
            }

            let available = player.wallets.dream;
            if available < target.price {
                return Ok(outcome(
                    cell,
                    LandingAction::DreamFail { needed: target.price, available },
                    format!("{name} needs {} in the dream envelope for {}", target.price, target.name),
                    true,
                ));
            }

            let player = self.player_mut(id)?;
            finance::spend(player, target.price, SpendPurpose::Dream, &target.name)?;
            if let Some(dream) = player.assets.dream.as_mut() {
                dream.acquired = true;
            }
            self.record(
                Some(id),
                HistoryAction::DreamFulfilled,
                format!("{name} fulfilled the dream: {}", target.name),
                json!({ "dream": target.id, "price": target.price }),
            );
            self.notifications.push(Notification::DreamFulfilled {
                player: id,
                name: name.clone(),
                dream: target.id,
            });
            info!(player = %id, dream = %target.id, "dream fulfilled");
            return Ok(outcome(
                cell,
                LandingAction::DreamFulfilled {
                    dream: target.id,
                    name: target.name.clone(),
                    price: target.price,
                },
                format!("{name} fulfilled the dream: {}!", target.name),
                true,
            ));
        }

        let dream_id = cell.dream.ok_or(GameError::UnknownCell(cell.id))?;
        let dream = self
            .board
            .dream(dream_id)
            .ok_or(GameError::UnknownDream(dream_id))?
            .clone();

        if player.assets.owns(&dream.name) {
            return Ok(outcome(
                cell,
                LandingAction::DreamAlreadyOwned,
                format!("{name} already owns {}", dream.name),
                true,
            ));
        }

        let available = player.wallets.investments;
        if available < dream.price {
            return Ok(outcome(
                cell,
                LandingAction::DreamCheckFail { needed: dream.price, available },
                format!("{name} cannot afford {} ({} needed)", dream.name, dream.price),
                true,
            ));
        }

        self.scratch.pending = Some(Pending::DreamAsset {
            cell: cell.id,
            offer: Offer::DreamAsset {
                dream: dream.id,
                name: dream.name.clone(),
                price: dream.price,
            },
        });
        Ok(outcome(
            cell,
            LandingAction::DreamAssetOffer {
                dream: dream.id,
                name: dream.name.clone(),
                price: dream.price,
            },
            format!("{name} may buy {} as an asset for {}", dream.name, dream.price),
            false,
        ))
    }

    fn land_effect(&mut self, id: PlayerId, cell: &Cell, effect: Effect) -> Result<LandingOutcome> {
        let source = cell.label.clone().unwrap_or_else(|| cell.id.to_string());
        let player = self.players.get_mut(id).ok_or(GameError::PlayerNotFound(id))?;
        let name = player.name.clone();
        let applied = EffectResolver::apply(player, &effect, &source, &mut self.history)?;
        self.notifications.extend(applied.notifications.iter().cloned());

        let ends_turn = match &applied.offer {
            Some(offer) => {
                self.scratch.pending = Some(Pending::Offer {
                    offer: offer.clone(),
                    source: source.clone(),
                    card: None,
                });
                false
            }
            None => true,
        };
        Ok(outcome(
            cell,
            LandingAction::EffectApplied { effect, outcome: applied },
            format!("{name} landed on {source}"),
            ends_turn,
        ))
    }
}

fn outcome(cell: &Cell, action: LandingAction, message: impl Into<String>, ends_turn: bool) -> LandingOutcome {
    LandingOutcome {
        cell: cell.id,
        kind: cell.kind,
        action,
        message: message.into(),
        ends_turn,
    }
}
