//! Turning a drawn card into client-facing effect data.
//!
//! Nothing here mutates players. The session shows the resulting
//! [`ClientCard`] to the drawer and applies its effect once the card is
//! acknowledged or its offer resolved.

use serde::{Deserialize, Serialize};

use super::definition::{CardCategory, CardDefinition, CardId, Requirement};
use crate::core::{Player, PlayerId, PlayerRoster};
use crate::effects::{Effect, Offer};
use crate::finance::Envelope;

/// A drawn card as shown to players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCard {
    pub id: CardId,
    pub category: CardCategory,
    pub title: String,
    pub description: String,
    pub effect: Effect,
    /// Money change for the drawer. Zero when the drawer is not affected.
    pub money_delta: i64,
    pub routing: Option<Envelope>,
    /// Decision the drawer has to make, if any.
    pub offer: Option<Offer>,
    pub grants_skill: Option<String>,
    pub requirement: Option<Requirement>,
    pub requirement_met: bool,
    pub message_self: String,
    pub message_others: String,
    /// Players the effect applies to, in turn order.
    pub affected_players: Vec<PlayerId>,
}

impl ClientCard {
    /// Whether the drawer's own state changes when the card resolves.
    #[must_use]
    pub fn affects(&self, player: PlayerId) -> bool {
        self.affected_players.contains(&player)
    }
}

fn fill(template: &str, player: &str, amount: u64, card: &str) -> String {
    template
        .replace("{player}", player)
        .replace("{amount}", &amount.to_string())
        .replace("{card}", card)
}

fn default_message(delta: i64) -> &'static str {
    match delta.signum() {
        1 => "{player} drew \"{card}\" and receives {amount}",
        -1 => "{player} drew \"{card}\" and pays {amount}",
        _ => "{player} drew \"{card}\"",
    }
}

const MISSING_MESSAGE: &str = "{player} drew \"{card}\" but lacks what it requires";

/// Interpret `card` drawn by `drawer`.
///
/// A requirement the drawer does not meet leaves the narrative in place
/// but removes every economic effect. A news card gated on a skill
/// applies to every player holding that skill instead of the drawer.
#[must_use]
pub fn apply_card_effect(card: &CardDefinition, drawer: &Player, roster: &PlayerRoster) -> ClientCard {
    let affected_players: Vec<PlayerId> = match (&card.requirement, card.category) {
        (Some(req @ Requirement::Skill { .. }), CardCategory::News) => roster
            .iter()
            .filter(|p| req.is_met(p))
            .map(|p| p.id)
            .collect(),
        (Some(req), _) if !req.is_met(drawer) => Vec::new(),
        _ => vec![drawer.id],
    };

    let requirement_met = match (&card.requirement, card.category) {
        (Some(Requirement::Skill { .. }), CardCategory::News) => !affected_players.is_empty(),
        (Some(req), _) => req.is_met(drawer),
        (None, _) => true,
    };

    let drawer_affected = affected_players.contains(&drawer.id);
    let nominal = card.effect.money_delta(drawer.wallets.total());
    let money_delta = if drawer_affected { nominal } else { 0 };
    let amount = nominal.unsigned_abs();

    let self_template = match (requirement_met, &card.message_missing, &card.message_self) {
        (false, Some(missing), _) => missing.as_str(),
        (false, None, _) => MISSING_MESSAGE,
        (true, _, Some(own)) => own.as_str(),
        (true, _, None) => default_message(nominal),
    };
    let others_template = card
        .message_others
        .as_deref()
        .unwrap_or_else(|| if requirement_met { default_message(nominal) } else { MISSING_MESSAGE });

    ClientCard {
        id: card.id,
        category: card.category,
        title: card.title.clone(),
        description: card.description.clone(),
        effect: card.effect.clone(),
        money_delta,
        routing: card.effect.routing(),
        offer: drawer_affected.then(|| card.effect.offer()).flatten(),
        grants_skill: card.effect.granted_skill().map(str::to_string),
        requirement: card.requirement.clone(),
        requirement_met,
        message_self: fill(self_template, &drawer.name, amount, &card.title),
        message_others: fill(others_template, &drawer.name, amount, &card.title),
        affected_players,
    }
}
