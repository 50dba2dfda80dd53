use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::penalty::PenaltyPolicy;

/// default loan term between disbursement and due date
pub const DEFAULT_LOAN_TERM_MONTHS: u32 = 10;

/// ledger configuration
///
/// The penalty policy is a required, explicit choice: historical ledgers
/// disagree on which formula is authoritative, so callers must pick one at
/// construction rather than rely on a hidden constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// which penalty formula applies to overdue loans
    pub penalty_policy: PenaltyPolicy,
    /// penalty rate per period or per calendar month
    pub penalty_rate: Rate,
    /// months between disbursement and due date
    pub loan_term_months: u32,
    /// whether imported rows may carry their own due date
    pub due_date_source: DueDateSource,
}

/// where a record's due date comes from
///
/// Later ledger variants always derive the due date from the disbursement
/// date, but older exports sometimes carry hand-edited due dates; honoring
/// them is an explicit opt-in for imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DueDateSource {
    /// due date is always disbursed_date + loan_term_months
    Derived,
    /// an imported row's own due date wins when present
    FromInput,
}

impl LedgerConfig {
    /// create configuration with the given policy and default terms
    pub fn new(penalty_policy: PenaltyPolicy) -> Self {
        Self {
            penalty_policy,
            penalty_rate: Rate::from_percentage(10),
            loan_term_months: DEFAULT_LOAN_TERM_MONTHS,
            due_date_source: DueDateSource::Derived,
        }
    }

    /// compounding-period policy with default terms
    pub fn compounding() -> Self {
        Self::new(PenaltyPolicy::Compounding)
    }

    /// flat calendar-month policy with default terms
    pub fn flat_calendar_month() -> Self {
        Self::new(PenaltyPolicy::FlatCalendarMonth)
    }

    /// override the loan term
    pub fn with_loan_term_months(mut self, months: u32) -> Self {
        self.loan_term_months = months;
        self
    }

    /// override the penalty rate
    pub fn with_penalty_rate(mut self, rate: Rate) -> Self {
        self.penalty_rate = rate;
        self
    }

    /// override the due date source
    pub fn with_due_date_source(mut self, source: DueDateSource) -> Self {
        self.due_date_source = source;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_terms() {
        let config = LedgerConfig::compounding();
        assert_eq!(config.penalty_policy, PenaltyPolicy::Compounding);
        assert_eq!(config.penalty_rate.as_decimal(), dec!(0.10));
        assert_eq!(config.loan_term_months, 10);
        assert_eq!(config.due_date_source, DueDateSource::Derived);
    }

    #[test]
    fn test_builder_overrides() {
        let config = LedgerConfig::flat_calendar_month()
            .with_loan_term_months(6)
            .with_penalty_rate(Rate::from_percentage(5))
            .with_due_date_source(DueDateSource::FromInput);

        assert_eq!(config.penalty_policy, PenaltyPolicy::FlatCalendarMonth);
        assert_eq!(config.loan_term_months, 6);
        assert_eq!(config.penalty_rate, Rate::from_percentage(5));
        assert_eq!(config.due_date_source, DueDateSource::FromInput);
    }
}
