//! Card draws and every decision that ends a waiting turn.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::state::{Pending, Session};
use super::turn::TurnAdvance;
use crate::cards::{apply_card_effect, CardCategory, ClientCard};
use crate::core::{GameError, HistoryAction, PlayerId, Result};
use crate::effects::{EffectOutcome, EffectResolver, Offer, OfferOutcome};

/// An effect applied to one player while resolving a decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedEffect {
    pub player: PlayerId,
    pub outcome: EffectOutcome,
}

/// Result of acknowledging, choosing or answering an offer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub applied: Vec<AppliedEffect>,
    pub offer: Option<OfferOutcome>,
    /// Income-block turns left after acknowledging a blocked landing.
    pub income_blocked_remaining: Option<u32>,
    /// Set when the decision ended the turn.
    pub turn: Option<TurnAdvance>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum OfferKind {
    Purchase,
    Sale,
    Charity,
}

impl OfferKind {
    fn matches(self, offer: &Offer) -> bool {
        matches!(
            (self, offer),
            (OfferKind::Purchase, Offer::Purchase { .. })
                | (OfferKind::Sale, Offer::Sale { .. })
                | (OfferKind::Charity, Offer::Charity { .. })
        )
    }

    fn label(self) -> &'static str {
        match self {
            OfferKind::Purchase => "purchase offer",
            OfferKind::Sale => "sale offer",
            OfferKind::Charity => "charity offer",
        }
    }
}

impl Session {
    /// Draw the card the current landing asked for.
    pub fn draw_card(&mut self, id: PlayerId, category: CardCategory) -> Result<ClientCard> {
        self.require_turn(id)?;
        if self.scratch.pending != Some(Pending::Draw { category }) {
            return Err(GameError::NoPendingDraw(category));
        }

        let card_id = self.decks.draw(&self.library, category)?;
        let definition = self.library.get(card_id).ok_or(GameError::EmptyDeck(category))?;
        let drawer = self.player(id)?;
        let card = apply_card_effect(definition, drawer, &self.players);
        debug!(player = %id, card = %card.id, %category, "card drawn");

        let name = drawer.name.clone();
        self.record(
            Some(id),
            HistoryAction::CardDrawn,
            format!("{name} drew \"{}\"", card.title),
            json!({
                "card": card.id,
                "category": category,
                "requirement_met": card.requirement_met,
                "message": card.message_self,
            }),
        );

        self.scratch.pending = Some(match &card.offer {
            Some(offer) => Pending::Offer {
                offer: offer.clone(),
                source: card.title.clone(),
                card: Some(card.clone()),
            },
            None => Pending::Card { card: card.clone() },
        });
        Ok(card)
    }

    /// Acknowledge the shown card (applying its effect) or a blocked
    /// income landing (spending one blocked turn), then end the turn.
    pub fn acknowledge(&mut self, id: PlayerId) -> Result<Resolution> {
        self.require_turn(id)?;

        match self.scratch.pending.take() {
            Some(Pending::Card { card }) => {
                let applied = self.apply_card(&card)?;
                Ok(Resolution {
                    applied,
                    turn: Some(self.end_turn()),
                    ..Resolution::default()
                })
            }
            Some(Pending::IncomeBlocked { cell }) => {
                let player = self.player_mut(id)?;
                player.status.income_blocked_turns = player.status.income_blocked_turns.saturating_sub(1);
                let remaining = player.status.income_blocked_turns;
                let name = player.name.clone();
                self.record(
                    Some(id),
                    HistoryAction::IncomeBlocked,
                    format!("{name} went without income"),
                    json!({ "cell": cell, "remaining": remaining }),
                );
                Ok(Resolution {
                    income_blocked_remaining: Some(remaining),
                    turn: Some(self.end_turn()),
                    ..Resolution::default()
                })
            }
            other => {
                self.scratch.pending = other;
                Err(GameError::NothingPending("acknowledgement"))
            }
        }
    }

    /// Accept or decline a purchase offer.
    pub fn resolve_purchase_choice(&mut self, id: PlayerId, accept: bool) -> Result<Resolution> {
        self.resolve_offer(id, OfferKind::Purchase, accept)
    }

    /// Accept or decline a sale offer.
    pub fn resolve_sale_choice(&mut self, id: PlayerId, accept: bool) -> Result<Resolution> {
        self.resolve_offer(id, OfferKind::Sale, accept)
    }

    /// Accept or decline a charity offer.
    pub fn resolve_charity_choice(&mut self, id: PlayerId, accept: bool) -> Result<Resolution> {
        self.resolve_offer(id, OfferKind::Charity, accept)
    }

    fn resolve_offer(&mut self, id: PlayerId, kind: OfferKind, accept: bool) -> Result<Resolution> {
        self.require_turn(id)?;
        let (offer, source, card) = match self.scratch.pending.take() {
            Some(Pending::Offer { offer, source, card }) if kind.matches(&offer) => (offer, source, card),
            other => {
                self.scratch.pending = other;
                return Err(GameError::NothingPending(kind.label()));
            }
        };

        let applied = match &card {
            Some(card) => self.apply_card(card)?,
            None => Vec::new(),
        };
        let offer_outcome = self.answer_offer(id, &offer, &source, accept)?;

        Ok(Resolution {
            applied,
            offer: Some(offer_outcome),
            turn: Some(self.end_turn()),
            ..Resolution::default()
        })
    }

    /// Buy or decline another player's dream offered on landing.
    pub fn resolve_dream_asset_choice(&mut self, id: PlayerId, buy: bool) -> Result<Resolution> {
        self.require_turn(id)?;
        let offer = match self.scratch.pending.take() {
            Some(Pending::DreamAsset { offer, .. }) => offer,
            other => {
                self.scratch.pending = other;
                return Err(GameError::NothingPending("dream asset offer"));
            }
        };

        let offer_outcome = self.answer_offer(id, &offer, "dream cell", buy)?;
        Ok(Resolution {
            offer: Some(offer_outcome),
            turn: Some(self.end_turn()),
            ..Resolution::default()
        })
    }

    /// Pick an option on a choice cell.
    ///
    /// The option's effect is applied. If it presents an offer, the turn
    /// keeps waiting for that; otherwise it ends.
    pub fn submit_choice(&mut self, id: PlayerId, option_id: &str) -> Result<Resolution> {
        self.require_turn(id)?;
        let (cell, option) = match &self.scratch.pending {
            Some(Pending::Choice { cell, options, .. }) => {
                let option = options
                    .iter()
                    .find(|o| o.id == option_id)
                    .cloned()
                    .ok_or_else(|| GameError::UnknownOption(option_id.to_string()))?;
                (*cell, option)
            }
            _ => return Err(GameError::NothingPending("cell choice")),
        };
        self.scratch.pending = None;

        let name = self.player(id)?.name.clone();
        self.record(
            Some(id),
            HistoryAction::ChoiceMade,
            format!("{name} chose \"{}\"", option.label),
            json!({ "cell": cell, "option": option.id }),
        );

        let player = self.players.get_mut(id).ok_or(GameError::PlayerNotFound(id))?;
        let outcome = EffectResolver::apply(player, &option.effect, &option.label, &mut self.history)?;
        self.notifications.extend(outcome.notifications.iter().cloned());

        let turn = match &outcome.offer {
            Some(offer) => {
                self.scratch.pending = Some(Pending::Offer {
                    offer: offer.clone(),
                    source: option.label.clone(),
                    card: None,
                });
                None
            }
            None => Some(self.end_turn()),
        };
        Ok(Resolution {
            applied: vec![AppliedEffect { player: id, outcome }],
            turn,
            ..Resolution::default()
        })
    }

    /// Apply a card's effect to every player it affects.
    fn apply_card(&mut self, card: &ClientCard) -> Result<Vec<AppliedEffect>> {
        let mut applied = Vec::with_capacity(card.affected_players.len());
        for &pid in &card.affected_players {
            // A player who left since the draw is passed over.
            let Some(player) = self.players.get_mut(pid) else {
                continue;
            };
            let outcome = EffectResolver::apply(player, &card.effect, &card.title, &mut self.history)?;
            self.notifications.extend(outcome.notifications.iter().cloned());
            applied.push(AppliedEffect { player: pid, outcome });
        }

        self.record(
            self.current_turn,
            HistoryAction::CardResolved,
            format!("\"{}\" resolved", card.title),
            json!({ "card": card.id, "affected": card.affected_players }),
        );
        Ok(applied)
    }

    fn answer_offer(&mut self, id: PlayerId, offer: &Offer, source: &str, accept: bool) -> Result<OfferOutcome> {
        let player = self.players.get_mut(id).ok_or(GameError::PlayerNotFound(id))?;
        let (outcome, notifications) = if accept {
            EffectResolver::accept_offer(player, offer, source, &mut self.history)?
        } else {
            EffectResolver::decline_offer(player, offer, source, &mut self.history)?
        };
        self.notifications.extend(notifications);
        Ok(outcome)
    }
}
