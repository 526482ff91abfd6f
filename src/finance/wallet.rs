//! The four money envelopes every player budgets with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the four named envelopes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Envelope {
    Charity,
    Dream,
    Savings,
    Investments,
}

impl Envelope {
    pub const ALL: [Envelope; 4] = [
        Envelope::Charity,
        Envelope::Dream,
        Envelope::Savings,
        Envelope::Investments,
    ];

    /// Share of distributed income, in percent.
    #[must_use]
    pub const fn income_percent(self) -> u64 {
        match self {
            Envelope::Charity => 10,
            Envelope::Dream => 20,
            Envelope::Savings => 10,
            Envelope::Investments => 60,
        }
    }
}

impl std::fmt::Display for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Envelope::Charity => "charity",
            Envelope::Dream => "dream",
            Envelope::Savings => "savings",
            Envelope::Investments => "investments",
        };
        f.write_str(name)
    }
}

/// Envelope balances. Unsigned: a shortfall becomes a [`Debt`], never a
/// negative balance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wallets {
    pub charity: u64,
    pub dream: u64,
    pub savings: u64,
    pub investments: u64,
}

impl Wallets {
    #[must_use]
    pub const fn new(charity: u64, dream: u64, savings: u64, investments: u64) -> Self {
        Self {
            charity,
            dream,
            savings,
            investments,
        }
    }

    #[must_use]
    pub fn get(&self, envelope: Envelope) -> u64 {
        match envelope {
            Envelope::Charity => self.charity,
            Envelope::Dream => self.dream,
            Envelope::Savings => self.savings,
            Envelope::Investments => self.investments,
        }
    }

    pub fn get_mut(&mut self, envelope: Envelope) -> &mut u64 {
        match envelope {
            Envelope::Charity => &mut self.charity,
            Envelope::Dream => &mut self.dream,
            Envelope::Savings => &mut self.savings,
            Envelope::Investments => &mut self.investments,
        }
    }

    /// Add money to one envelope.
    pub fn credit(&mut self, envelope: Envelope, amount: u64) {
        let slot = self.get_mut(envelope);
        *slot = slot.saturating_add(amount);
    }

    /// Sum of all four envelopes.
    #[must_use]
    pub fn total(&self) -> u64 {
        Envelope::ALL.iter().map(|&e| self.get(e)).sum()
    }
}

/// A recorded shortfall.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    pub amount: u64,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

impl Debt {
    #[must_use]
    pub fn new(amount: u64, reason: impl Into<String>) -> Self {
        Self {
            amount,
            reason: reason.into(),
            timestamp: Utc::now(),
        }
    }
}
