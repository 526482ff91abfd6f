//! Effect definitions.
//!
//! Effects are declarative data: cards and cells describe what happens with
//! an `Effect`, and one resolver applies them. The set is closed, so every
//! handler is checked for exhaustiveness.

use serde::{Deserialize, Serialize};

use crate::board::DreamId;
use crate::finance::Envelope;

fn one_turn() -> u32 {
    1
}

/// A declarative game effect.
///
/// ## Money
///
/// - `Pay`: generic expense (savings, then investments, then debt)
/// - `PayPercent`: expense sized as a percentage of the player's total cash
/// - `PayFromSavings`: expense taken from savings only
/// - `Receive`: income, either distributed or credited to one envelope
///
/// ## Status
///
/// - `SkipTurn`, `BlockIncome`, `GrantSkill`
///
/// ## Offers
///
/// `PurchaseOffer`, `SaleOffer` and `CharityOffer` change nothing when
/// applied. They become a pending decision the player resolves later.
///
/// ## Dream assets
///
/// - `BuyDreamAsset`: buy another player's dream as an item
/// - `DeclineDreamAsset`: pass on it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    Pay {
        amount: u64,
    },
    PayPercent {
        percent: u64,
    },
    PayFromSavings {
        amount: u64,
    },
    Receive {
        amount: u64,
        /// Credit one envelope directly instead of distributing.
        #[serde(default)]
        envelope: Option<Envelope>,
    },
    SkipTurn {
        #[serde(default = "one_turn")]
        turns: u32,
    },
    BlockIncome {
        #[serde(default = "one_turn")]
        turns: u32,
    },
    GrantSkill {
        skill: String,
    },
    MultiEffect {
        effects: Vec<Effect>,
    },
    PurchaseOffer {
        name: String,
        price: u64,
        /// Recurring cashflow. Zero makes the purchase an item, not a business.
        #[serde(default)]
        cashflow: u64,
    },
    SaleOffer {
        /// Item the buyer wants. `None` takes the first item owned.
        #[serde(default)]
        item: Option<String>,
        price: u64,
    },
    CharityOffer {
        amount: u64,
    },
    BuyDreamAsset {
        dream: DreamId,
        name: String,
        price: u64,
    },
    DeclineDreamAsset {
        dream: DreamId,
        name: String,
    },
    /// Narrative only.
    Nothing,
}

impl Effect {
    /// Create a multi-effect.
    pub fn multi(effects: impl IntoIterator<Item = Effect>) -> Self {
        Self::MultiEffect {
            effects: effects.into_iter().collect(),
        }
    }

    /// Create a distributed income effect.
    #[must_use]
    pub fn receive(amount: u64) -> Self {
        Self::Receive {
            amount,
            envelope: None,
        }
    }

    /// The offer this effect presents, if any. Searches multi-effects.
    #[must_use]
    pub fn offer(&self) -> Option<Offer> {
        match self {
            Effect::PurchaseOffer { name, price, cashflow } => Some(Offer::Purchase {
                name: name.clone(),
                price: *price,
                cashflow: *cashflow,
            }),
            Effect::SaleOffer { item, price } => Some(Offer::Sale {
                item: item.clone(),
                price: *price,
            }),
            Effect::CharityOffer { amount } => Some(Offer::Charity { amount: *amount }),
            Effect::MultiEffect { effects } => effects.iter().find_map(Effect::offer),
            _ => None,
        }
    }

    /// The envelope a `Receive` is routed to, if it names one.
    #[must_use]
    pub fn routing(&self) -> Option<Envelope> {
        match self {
            Effect::Receive { envelope, .. } => *envelope,
            Effect::MultiEffect { effects } => effects.iter().find_map(Effect::routing),
            _ => None,
        }
    }

    /// Skill granted by this effect, if any.
    #[must_use]
    pub fn granted_skill(&self) -> Option<&str> {
        match self {
            Effect::GrantSkill { skill } => Some(skill),
            Effect::MultiEffect { effects } => effects.iter().find_map(Effect::granted_skill),
            _ => None,
        }
    }

    /// Signed money change this effect would cause for a player holding
    /// `total_cash`. Offers and status effects count as zero.
    #[must_use]
    pub fn money_delta(&self, total_cash: u64) -> i64 {
        let signed = |v: u64| i64::try_from(v).unwrap_or(i64::MAX);
        match self {
            Effect::Pay { amount } | Effect::PayFromSavings { amount } => -signed(*amount),
            Effect::PayPercent { percent } => {
                -signed(crate::finance::percent_of(total_cash, *percent))
            }
            Effect::Receive { amount, .. } => signed(*amount),
            Effect::MultiEffect { effects } => {
                effects.iter().map(|e| e.money_delta(total_cash)).sum()
            }
            _ => 0,
        }
    }
}

/// A decision a player must accept or decline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Offer {
    Purchase { name: String, price: u64, cashflow: u64 },
    Sale { item: Option<String>, price: u64 },
    Charity { amount: u64 },
    DreamAsset { dream: DreamId, name: String, price: u64 },
}

impl Offer {
    /// Short label for error messages and logs.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Offer::Purchase { .. } => "purchase offer",
            Offer::Sale { .. } => "sale offer",
            Offer::Charity { .. } => "charity offer",
            Offer::DreamAsset { .. } => "dream asset offer",
        }
    }
}
