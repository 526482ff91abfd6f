//! Effect resolution - applying effects and offers to a player.
//!
//! Every applied effect appends a history entry. Money moves through the
//! finance ledger, so envelope ordering and debt recording live in one place.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::effect::{Effect, Offer};
use crate::core::{
    Business, GameError, History, HistoryAction, Item, Notification, Player, Result,
};
use crate::finance::{self, Envelope, IncomeOutcome, SpendPurpose, SpendReceipt};

/// Aggregate result of applying an effect.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectOutcome {
    /// Net change in the player's cash, before debt.
    pub money_delta: i64,
    /// New debt recorded while applying.
    pub debt: u64,
    /// True if income was blocked instead of credited.
    pub income_blocked: bool,
    /// Offer presented by the effect, waiting for a decision.
    pub offer: Option<Offer>,
    pub notifications: Vec<Notification>,
}

impl EffectOutcome {
    fn merge(&mut self, other: EffectOutcome) {
        self.money_delta += other.money_delta;
        self.debt += other.debt;
        self.income_blocked |= other.income_blocked;
        if self.offer.is_none() {
            self.offer = other.offer;
        }
        self.notifications.extend(other.notifications);
    }

    fn paid(receipt: &SpendReceipt) -> Self {
        Self {
            money_delta: -signed(receipt.amount - receipt.debt.as_ref().map_or(0, |d| d.amount)),
            debt: receipt.debt.as_ref().map_or(0, |d| d.amount),
            ..Self::default()
        }
    }
}

/// Result of accepting or declining an offer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OfferOutcome {
    Purchased { name: String, price: u64, debt: u64, business: bool },
    Sold { item: String, price: u64 },
    NothingToSell,
    Donated { amount: u64, credits: u32 },
    DonationFailed { needed: u64, available: u64 },
    DreamAssetBought { name: String, price: u64 },
    Declined,
}

fn signed(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

/// Applies effects and offers to players.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply an effect to a player. `source` names the card or cell that
    /// caused it, for debt reasons and log messages.
    pub fn apply(
        player: &mut Player,
        effect: &Effect,
        source: &str,
        history: &mut History,
    ) -> Result<EffectOutcome> {
        debug!(player = %player.id, ?effect, source, "applying effect");

        let outcome = match effect {
            Effect::Pay { amount } => {
                Self::pay(player, *amount, SpendPurpose::Expense, source, history)?
            }

            Effect::PayPercent { percent } => {
                let amount = finance::percent_of(player.wallets.total(), *percent);
                Self::pay(player, amount, SpendPurpose::Expense, source, history)?
            }

            Effect::PayFromSavings { amount } => {
                Self::pay(player, *amount, SpendPurpose::Savings, source, history)?
            }

            Effect::Receive { amount, envelope } => {
                Self::receive(player, *amount, *envelope, source, history)
            }

            Effect::SkipTurn { turns } => {
                player.status.skipped_turns += turns;
                let msg = format!("{} will skip {turns} turn(s) ({source})", player.name);
                history.record(Some(player), HistoryAction::EffectApplied, msg, json!({ "effect": effect }));
                EffectOutcome::default()
            }

            Effect::BlockIncome { turns } => {
                player.status.income_blocked_turns += turns;
                let msg = format!("{}'s income is blocked for {turns} turn(s) ({source})", player.name);
                history.record(Some(player), HistoryAction::EffectApplied, msg, json!({ "effect": effect }));
                EffectOutcome::default()
            }

            Effect::GrantSkill { skill } => {
                player.assets.skills.insert(skill.clone());
                let msg = format!("{} learned {skill} ({source})", player.name);
                history.record(Some(player), HistoryAction::EffectApplied, msg, json!({ "effect": effect }));
                EffectOutcome::default()
            }

            Effect::MultiEffect { effects } => {
                let mut total = EffectOutcome::default();
                for nested in effects {
                    total.merge(Self::apply(player, nested, source, history)?);
                }
                total
            }

            Effect::PurchaseOffer { .. } | Effect::SaleOffer { .. } | Effect::CharityOffer { .. } => {
                let offer = effect.offer();
                let msg = format!("{} is offered a deal ({source})", player.name);
                history.record(Some(player), HistoryAction::EffectApplied, msg, json!({ "offer": offer }));
                EffectOutcome {
                    offer,
                    ..EffectOutcome::default()
                }
            }

            Effect::BuyDreamAsset { dream, name, price } => {
                let receipt = finance::spend(player, *price, SpendPurpose::Business, name)?;
                player.assets.items.push(Item {
                    name: name.clone(),
                    price: *price,
                });
                let msg = format!("{} bought {name} as an asset for {price}", player.name);
                history.record(Some(player), HistoryAction::AssetPurchased, msg, json!({ "dream": dream, "price": price }));
                let mut outcome = EffectOutcome::paid(&receipt);
                outcome.notifications.push(Notification::DreamAssetBought {
                    player: player.id,
                    name: player.name.clone(),
                    dream: *dream,
                    price: *price,
                });
                outcome
            }

            Effect::DeclineDreamAsset { dream, name } => {
                let msg = format!("{} declined to buy {name}", player.name);
                history.record(Some(player), HistoryAction::OfferDeclined, msg, json!({ "dream": dream }));
                EffectOutcome {
                    notifications: vec![Notification::DreamAssetDeclined {
                        player: player.id,
                        name: player.name.clone(),
                        dream: *dream,
                    }],
                    ..EffectOutcome::default()
                }
            }

            Effect::Nothing => {
                let msg = format!("Nothing happens to {} ({source})", player.name);
                history.record(Some(player), HistoryAction::EffectApplied, msg, serde_json::Value::Null);
                EffectOutcome::default()
            }
        };

        Ok(outcome)
    }

    fn pay(
        player: &mut Player,
        amount: u64,
        purpose: SpendPurpose,
        source: &str,
        history: &mut History,
    ) -> Result<EffectOutcome> {
        let receipt = finance::spend(player, amount, purpose, source)?;
        let msg = match &receipt.debt {
            Some(debt) => format!("{} paid {amount} for {source}, {} went into debt", player.name, debt.amount),
            None => format!("{} paid {amount} for {source}", player.name),
        };
        history.record(
            Some(player),
            HistoryAction::EffectApplied,
            msg,
            json!({ "amount": amount, "purpose": purpose, "withdrawn": receipt.withdrawn }),
        );
        Ok(EffectOutcome::paid(&receipt))
    }

    fn receive(
        player: &mut Player,
        amount: u64,
        envelope: Option<Envelope>,
        source: &str,
        history: &mut History,
    ) -> EffectOutcome {
        if let Some(envelope) = envelope {
            player.wallets.credit(envelope, amount);
            let msg = format!("{} received {amount} into {envelope} ({source})", player.name);
            history.record(Some(player), HistoryAction::EffectApplied, msg, json!({ "amount": amount, "envelope": envelope }));
            return EffectOutcome {
                money_delta: signed(amount),
                ..EffectOutcome::default()
            };
        }

        match finance::distribute_income(player, amount) {
            IncomeOutcome::Blocked { remaining } => {
                let msg = format!("{}'s income of {amount} was blocked ({source})", player.name);
                history.record(Some(player), HistoryAction::IncomeBlocked, msg, json!({ "remaining": remaining }));
                EffectOutcome {
                    income_blocked: true,
                    ..EffectOutcome::default()
                }
            }
            IncomeOutcome::Distributed { split } => {
                let msg = format!("{} received {amount} ({source})", player.name);
                history.record(Some(player), HistoryAction::EffectApplied, msg, json!({ "amount": amount, "split": split }));
                EffectOutcome {
                    money_delta: signed(split.total()),
                    ..EffectOutcome::default()
                }
            }
        }
    }

    /// Accept an offer.
    pub fn accept_offer(
        player: &mut Player,
        offer: &Offer,
        source: &str,
        history: &mut History,
    ) -> Result<(OfferOutcome, Vec<Notification>)> {
        match offer {
            Offer::Purchase { name, price, cashflow } => {
                let receipt = finance::spend(player, *price, SpendPurpose::Business, name)?;
                let business = *cashflow > 0;
                if business {
                    player.assets.businesses.push(Business {
                        name: name.clone(),
                        price: *price,
                        cashflow: *cashflow,
                    });
                } else {
                    player.assets.items.push(Item {
                        name: name.clone(),
                        price: *price,
                    });
                }
                let debt = receipt.debt.as_ref().map_or(0, |d| d.amount);
                let msg = format!("{} bought {name} for {price}", player.name);
                history.record(
                    Some(player),
                    HistoryAction::AssetPurchased,
                    msg,
                    json!({ "price": price, "cashflow": cashflow, "debt": debt, "source": source }),
                );
                let note = Notification::AssetPurchased {
                    player: player.id,
                    name: player.name.clone(),
                    asset: name.clone(),
                    price: *price,
                };
                Ok((
                    OfferOutcome::Purchased {
                        name: name.clone(),
                        price: *price,
                        debt,
                        business,
                    },
                    vec![note],
                ))
            }

            Offer::Sale { item, price } => {
                let idx = match item {
                    Some(wanted) => player.assets.items.iter().position(|i| &i.name == wanted),
                    None => (!player.assets.items.is_empty()).then_some(0),
                };
                let Some(idx) = idx else {
                    let msg = format!("{} has nothing to sell", player.name);
                    history.record(Some(player), HistoryAction::OfferDeclined, msg, json!({ "source": source }));
                    return Ok((OfferOutcome::NothingToSell, Vec::new()));
                };
                let sold = player.assets.items.remove(idx);
                player.wallets.credit(Envelope::Investments, *price);
                let msg = format!("{} sold {} for {price}", player.name, sold.name);
                history.record(Some(player), HistoryAction::ItemSold, msg, json!({ "item": sold.name, "price": price }));
                Ok((
                    OfferOutcome::Sold {
                        item: sold.name,
                        price: *price,
                    },
                    Vec::new(),
                ))
            }

            Offer::Charity { amount } => {
                match finance::spend(player, *amount, SpendPurpose::Charity, source) {
                    Ok(_) => {}
                    Err(GameError::InsufficientFunds { needed, available, .. }) => {
                        let msg = format!("{} could not afford to donate {amount}", player.name);
                        history.record(Some(player), HistoryAction::OfferDeclined, msg, json!({ "needed": needed, "available": available }));
                        return Ok((OfferOutcome::DonationFailed { needed, available }, Vec::new()));
                    }
                    Err(other) => return Err(other),
                }
                player.status.charity_credits += 1;
                let credits = player.status.charity_credits;
                let msg = format!("{} donated {amount} to charity", player.name);
                history.record(Some(player), HistoryAction::CharityDonated, msg, json!({ "amount": amount, "credits": credits }));
                Ok((
                    OfferOutcome::Donated {
                        amount: *amount,
                        credits,
                    },
                    Vec::new(),
                ))
            }

            Offer::DreamAsset { dream, name, price } => {
                let effect = Effect::BuyDreamAsset {
                    dream: *dream,
                    name: name.clone(),
                    price: *price,
                };
                let outcome = Self::apply(player, &effect, source, history)?;
                Ok((
                    OfferOutcome::DreamAssetBought {
                        name: name.clone(),
                        price: *price,
                    },
                    outcome.notifications,
                ))
            }
        }
    }

    /// Decline an offer.
    pub fn decline_offer(
        player: &mut Player,
        offer: &Offer,
        source: &str,
        history: &mut History,
    ) -> Result<(OfferOutcome, Vec<Notification>)> {
        if let Offer::DreamAsset { dream, name, .. } = offer {
            let effect = Effect::DeclineDreamAsset {
                dream: *dream,
                name: name.clone(),
            };
            let outcome = Self::apply(player, &effect, source, history)?;
            return Ok((OfferOutcome::Declined, outcome.notifications));
        }

        let msg = format!("{} declined the {}", player.name, offer.kind_name());
        history.record(Some(player), HistoryAction::OfferDeclined, msg, json!({ "offer": offer, "source": source }));
        Ok((OfferOutcome::Declined, Vec::new()))
    }
}
