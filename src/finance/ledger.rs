//! Income distribution and purpose-ordered spending.
//!
//! The ledger works on a single [`Player`] and knows nothing about turns,
//! cards or the board. Callers record history for what it reports.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::wallet::{Debt, Envelope, Wallets};
use crate::core::{GameError, Player, Result};

/// Why money is leaving a player's envelopes. Decides withdrawal order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendPurpose {
    /// Generic expense: savings, then investments, then debt.
    #[default]
    Expense,
    /// Asset or business purchase: investments, then savings, then debt.
    Business,
    /// Savings only, then debt.
    Savings,
    /// Charity envelope only. Fails if it cannot cover the whole amount.
    Charity,
    /// Dream envelope only. Fails if it cannot cover the whole amount.
    Dream,
}

impl SpendPurpose {
    fn exclusive_envelope(self) -> Option<Envelope> {
        match self {
            SpendPurpose::Charity => Some(Envelope::Charity),
            SpendPurpose::Dream => Some(Envelope::Dream),
            _ => None,
        }
    }

    fn withdrawal_order(self) -> &'static [Envelope] {
        match self {
            SpendPurpose::Expense => &[Envelope::Savings, Envelope::Investments],
            SpendPurpose::Business => &[Envelope::Investments, Envelope::Savings],
            SpendPurpose::Savings => &[Envelope::Savings],
            SpendPurpose::Charity => &[Envelope::Charity],
            SpendPurpose::Dream => &[Envelope::Dream],
        }
    }
}

/// Per-envelope result of distributing income.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IncomeOutcome {
    /// Income was blocked; one blocked turn was consumed.
    Blocked { remaining: u32 },
    /// Income was split into the envelopes.
    Distributed { split: Wallets },
}

/// What a spend actually withdrew.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendReceipt {
    pub amount: u64,
    pub withdrawn: Wallets,
    /// Uncovered remainder, if the spend went into debt.
    pub debt: Option<Debt>,
}

/// Round `amount * percent / 100` half-up.
#[must_use]
pub fn percent_of(amount: u64, percent: u64) -> u64 {
    amount.saturating_mul(percent).saturating_add(50) / 100
}

/// Split income into the four envelopes.
///
/// Each share is rounded on its own and the shares are not reconciled
/// against `amount`, so the total may drift from it by a few units.
#[must_use]
pub fn split_income(amount: u64) -> Wallets {
    Wallets::new(
        percent_of(amount, Envelope::Charity.income_percent()),
        percent_of(amount, Envelope::Dream.income_percent()),
        percent_of(amount, Envelope::Savings.income_percent()),
        percent_of(amount, Envelope::Investments.income_percent()),
    )
}

/// Route income into a player's envelopes, unless their income is blocked.
pub fn distribute_income(player: &mut Player, amount: u64) -> IncomeOutcome {
    if player.status.income_blocked_turns > 0 {
        player.status.income_blocked_turns -= 1;
        debug!(player = %player.id, amount, remaining = player.status.income_blocked_turns, "income blocked");
        return IncomeOutcome::Blocked {
            remaining: player.status.income_blocked_turns,
        };
    }

    let split = split_income(amount);
    for envelope in Envelope::ALL {
        player.wallets.credit(envelope, split.get(envelope));
    }
    debug!(player = %player.id, amount, ?split, "income distributed");
    IncomeOutcome::Distributed { split }
}

/// Withdraw `amount` for `purpose`.
///
/// Charity and dream spends must be covered by their own envelope or the
/// call fails with no change. Every other purpose always succeeds, and any
/// part the envelopes cannot cover is recorded as a [`Debt`].
pub fn spend(
    player: &mut Player,
    amount: u64,
    purpose: SpendPurpose,
    reason: &str,
) -> Result<SpendReceipt> {
    if let Some(envelope) = purpose.exclusive_envelope() {
        let available = player.wallets.get(envelope);
        if available < amount {
            return Err(GameError::InsufficientFunds {
                envelope,
                needed: amount,
                available,
            });
        }
    }

    let mut remaining = amount;
    let mut withdrawn = Wallets::default();
    for &envelope in purpose.withdrawal_order() {
        if remaining == 0 {
            break;
        }
        let slot = player.wallets.get_mut(envelope);
        let take = remaining.min(*slot);
        *slot -= take;
        *withdrawn.get_mut(envelope) += take;
        remaining -= take;
    }

    let debt = (remaining > 0).then(|| {
        let debt = Debt::new(remaining, reason);
        player.debts.push(debt.clone());
        warn!(player = %player.id, shortfall = remaining, reason, "spend recorded as debt");
        debt
    });

    debug!(player = %player.id, amount, ?purpose, "spend");
    Ok(SpendReceipt {
        amount,
        withdrawn,
        debt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CellId;
    use crate::core::PlayerId;

    fn player_with(wallets: Wallets) -> Player {
        Player::new(PlayerId::new(0), "Ada", "red", 0, CellId::new(0), wallets)
    }

    #[test]
    fn test_split_exact() {
        assert_eq!(split_income(1000), Wallets::new(100, 200, 100, 600));
    }

    #[test]
    fn test_split_rounding_drift() {
        // 0.5 rounds up in every envelope: 1 + 1 + 1 + 3
        let split = split_income(5);
        assert_eq!(split, Wallets::new(1, 1, 1, 3));
        assert_eq!(split.total(), 6);
    }

    #[test]
    fn test_percent_of_saturates() {
        assert_eq!(percent_of(u64::MAX, 100), u64::MAX / 100);
        assert_eq!(percent_of(u64::MAX - 10, 1), u64::MAX / 100);
        assert_eq!(split_income(u64::MAX).investments, u64::MAX / 100);
    }

    #[test]
    fn test_distribute_blocked() {
        let mut p = player_with(Wallets::default());
        p.status.income_blocked_turns = 2;

        let outcome = distribute_income(&mut p, 1000);

        assert_eq!(outcome, IncomeOutcome::Blocked { remaining: 1 });
        assert_eq!(p.status.income_blocked_turns, 1);
        assert_eq!(p.wallets, Wallets::default());
    }

    #[test]
    fn test_distribute_credits_envelopes() {
        let mut p = player_with(Wallets::new(1, 1, 1, 1));
        distribute_income(&mut p, 100);
        assert_eq!(p.wallets, Wallets::new(11, 21, 11, 61));
    }

    #[test]
    fn test_expense_into_debt() {
        let mut p = player_with(Wallets::new(0, 0, 50, 0));

        let receipt = spend(&mut p, 70, SpendPurpose::Expense, "car repair").unwrap();

        assert_eq!(p.wallets, Wallets::new(0, 0, 0, 0));
        assert_eq!(receipt.withdrawn.savings, 50);
        assert_eq!(receipt.debt.as_ref().map(|d| d.amount), Some(20));
        assert_eq!(p.debts.len(), 1);
        assert_eq!(p.debts[0].reason, "car repair");
    }

    #[test]
    fn test_expense_order_savings_first() {
        let mut p = player_with(Wallets::new(5, 5, 30, 100));
        spend(&mut p, 50, SpendPurpose::Expense, "rent").unwrap();
        assert_eq!(p.wallets, Wallets::new(5, 5, 0, 80));
        assert!(p.debts.is_empty());
    }

    #[test]
    fn test_business_order_investments_first() {
        let mut p = player_with(Wallets::new(0, 0, 100, 30));
        let receipt = spend(&mut p, 50, SpendPurpose::Business, "cafe").unwrap();
        assert_eq!(p.wallets, Wallets::new(0, 0, 80, 0));
        assert_eq!(receipt.withdrawn, Wallets::new(0, 0, 20, 30));
        assert!(receipt.debt.is_none());
    }

    #[test]
    fn test_business_shortfall_allowed() {
        let mut p = player_with(Wallets::new(0, 0, 10, 10));
        let receipt = spend(&mut p, 50, SpendPurpose::Business, "shop").unwrap();
        assert_eq!(receipt.debt.map(|d| d.amount), Some(30));
        assert_eq!(p.wallets.total(), 0);
    }

    #[test]
    fn test_charity_all_or_nothing() {
        let mut p = player_with(Wallets::new(40, 0, 500, 500));

        let err = spend(&mut p, 50, SpendPurpose::Charity, "donation").unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientFunds {
                envelope: Envelope::Charity,
                needed: 50,
                available: 40
            }
        );
        assert_eq!(p.wallets, Wallets::new(40, 0, 500, 500));

        spend(&mut p, 40, SpendPurpose::Charity, "donation").unwrap();
        assert_eq!(p.wallets.charity, 0);
    }

    #[test]
    fn test_savings_only() {
        let mut p = player_with(Wallets::new(0, 0, 20, 1000));
        let receipt = spend(&mut p, 50, SpendPurpose::Savings, "fine").unwrap();
        assert_eq!(p.wallets.investments, 1000);
        assert_eq!(receipt.debt.map(|d| d.amount), Some(30));
    }

    #[test]
    fn test_zero_spend_is_noop() {
        let mut p = player_with(Wallets::new(1, 2, 3, 4));
        let receipt = spend(&mut p, 0, SpendPurpose::Expense, "nothing").unwrap();
        assert_eq!(receipt.withdrawn, Wallets::default());
        assert_eq!(p.wallets, Wallets::new(1, 2, 3, 4));
    }
}
