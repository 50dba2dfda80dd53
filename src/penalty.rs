use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

/// days per compounding period
const PERIOD_DAYS: i64 = 30;

/// penalty formula applied to overdue loans
///
/// Both formulas exist in historical ledgers and produce different figures
/// for the same loan, so the choice is made by the caller at ledger
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyPolicy {
    /// penalty compounds on the running balance once per 30-day period late
    Compounding,
    /// flat penalty on principal per calendar-month boundary crossed
    FlatCalendarMonth,
}

/// engine for computing overdue penalties
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyEngine {
    pub policy: PenaltyPolicy,
    pub rate: Rate,
}

impl PenaltyEngine {
    pub fn new(policy: PenaltyPolicy, rate: Rate) -> Self {
        Self { policy, rate }
    }

    /// assess lateness and penalty for a loan as of the effective date
    ///
    /// The effective date is the return date for returned loans and the
    /// evaluation date otherwise. On or before the due date both policies
    /// report zero penalty and a total due equal to principal.
    pub fn assess(
        &self,
        principal: Money,
        due_date: NaiveDate,
        effective_date: NaiveDate,
    ) -> PenaltyAssessment {
        if effective_date <= due_date {
            return PenaltyAssessment::on_time(principal);
        }

        match self.policy {
            PenaltyPolicy::Compounding => {
                self.assess_compounding(principal, due_date, effective_date)
            }
            PenaltyPolicy::FlatCalendarMonth => {
                self.assess_flat(principal, due_date, effective_date)
            }
        }
    }

    /// one compounding step per elapsed 30-day period, taken on the balance
    /// including prior periods' penalties
    fn assess_compounding(
        &self,
        principal: Money,
        due_date: NaiveDate,
        effective_date: NaiveDate,
    ) -> PenaltyAssessment {
        let days_late = (effective_date - due_date).num_days();
        let periods_late = ((days_late + PERIOD_DAYS - 1) / PERIOD_DAYS) as u32;

        let mut running_total = principal;
        let mut penalty_amount = Money::ZERO;
        for _ in 0..periods_late {
            let increment = running_total.at_rate(self.rate);
            running_total += increment;
            penalty_amount += increment;
        }

        PenaltyAssessment {
            months_late: periods_late,
            penalty_amount,
            total_due: running_total,
        }
    }

    /// overdue duration measured in calendar-month boundaries crossed, so a
    /// payment one day into the next month already counts as one month late
    /// while 29 days late within the same month counts as zero
    fn assess_flat(
        &self,
        principal: Money,
        due_date: NaiveDate,
        effective_date: NaiveDate,
    ) -> PenaltyAssessment {
        let month_span = (effective_date.year() - due_date.year()) * 12
            + (effective_date.month() as i32 - due_date.month() as i32);
        let months_overdue = month_span.max(0) as u32;

        let penalty_amount = Money::from_decimal(
            principal.as_decimal() * self.rate.as_decimal() * Decimal::from(months_overdue),
        );

        PenaltyAssessment {
            months_late: months_overdue,
            penalty_amount,
            total_due: principal + penalty_amount,
        }
    }
}

/// penalty assessment result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyAssessment {
    pub months_late: u32,
    pub penalty_amount: Money,
    pub total_due: Money,
}

impl PenaltyAssessment {
    /// zero-penalty assessment for a loan at or before its due date
    pub fn on_time(principal: Money) -> Self {
        Self {
            months_late: 0,
            penalty_amount: Money::ZERO,
            total_due: principal,
        }
    }
}
