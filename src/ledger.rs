use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;

use crate::config::{DueDateSource, LedgerConfig};
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::penalty::PenaltyEngine;
use crate::record::{derive_due_date, LoanId, LoanRecord};
use crate::serialization::LoanRow;

/// the loan ledger
///
/// Owns the full set of loan records and enforces the ledger invariants:
/// at most one active loan per phone number, derived due dates, and
/// last-write-wins dedup on the natural key (borrower, phone, principal,
/// disbursed date). Callers construct it from a loaded snapshot and hand the
/// state back to their store after each mutation; the ledger itself performs
/// no I/O.
#[derive(Debug, Clone)]
pub struct LoanLedger {
    config: LedgerConfig,
    engine: PenaltyEngine,
    records: Vec<LoanRecord>,
    pub events: EventStore,
}

impl LoanLedger {
    /// create an empty ledger
    pub fn new(config: LedgerConfig) -> Self {
        let engine = PenaltyEngine::new(config.penalty_policy, config.penalty_rate);
        Self {
            config,
            engine,
            records: Vec::new(),
            events: EventStore::new(),
        }
    }

    /// construct from rows loaded out of an external source
    ///
    /// An unreachable source is the loader's concern; it hands over no rows
    /// and the ledger starts empty, keeping the add-loan workflow available.
    pub fn from_rows(config: LedgerConfig, rows: Vec<LoanRow>) -> Result<Self> {
        let mut ledger = Self::new(config);
        ledger.apply_rows(rows)?;
        ledger.events.clear();
        Ok(ledger)
    }

    /// restore a ledger from a persisted snapshot, records taken as-is
    pub fn from_view(view: crate::serialization::LedgerView) -> Self {
        let engine = PenaltyEngine::new(view.config.penalty_policy, view.config.penalty_rate);
        Self {
            config: view.config,
            engine,
            records: view.records,
            events: EventStore::new(),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// all records in ledger order
    pub fn records(&self) -> &[LoanRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// look up a record by id
    pub fn get(&self, id: LoanId) -> Option<&LoanRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// the unreturned loan for a phone number, if any
    pub fn active_loan_for(&self, phone_number: &str) -> Option<&LoanRecord> {
        self.records
            .iter()
            .find(|r| r.is_active() && r.phone_number == phone_number)
    }

    /// record a new loan
    ///
    /// Rejects a second simultaneous unreturned loan for the same phone
    /// number. A record sharing the exact natural key with a prior (returned)
    /// one replaces it in place, last write wins.
    pub fn add_loan(
        &mut self,
        borrower_name: &str,
        phone_number: &str,
        principal: Money,
        disbursed_date: NaiveDate,
    ) -> Result<&LoanRecord> {
        let borrower_name = required_field("borrower_name", borrower_name)?;
        let phone_number = required_field("phone_number", phone_number)?;
        if !principal.is_positive() {
            return Err(LedgerError::InvalidInput {
                message: format!("principal must be positive, got {principal}"),
            });
        }

        if self.active_loan_for(&phone_number).is_some() {
            return Err(LedgerError::DuplicateActiveLoan {
                phone_number,
            });
        }

        let due_date = derive_due_date(disbursed_date, self.config.loan_term_months)?;
        let record = LoanRecord::new(
            borrower_name,
            phone_number,
            principal,
            disbursed_date,
            due_date,
        );

        self.events.emit(Event::LoanRecorded {
            id: record.id,
            phone_number: record.phone_number.clone(),
            principal: record.principal,
            disbursed_date: record.disbursed_date,
            due_date: record.due_date,
        });

        let position = self.upsert(record);
        Ok(&self.records[position])
    }

    /// import a batch of rows from an external source
    ///
    /// Every row is validated up front and any failure rejects the whole
    /// batch with nothing applied. The one-active-loan-per-phone rule is not
    /// enforced across a batch; dedup by natural key runs across the merged
    /// set of existing and incoming records, last write wins. Returns the
    /// number of distinct incoming records that ended up in the ledger.
    pub fn import_batch(&mut self, rows: Vec<LoanRow>) -> Result<usize> {
        let inserted_count = self.apply_rows(rows)?;
        self.events.emit(Event::BatchImported { inserted_count });
        Ok(inserted_count)
    }

    /// recompute the cached penalty fields for every unreturned record
    ///
    /// Idempotent for a fixed `as_of` date: the derived fields are a pure
    /// function of principal, due date and the effective date. Returned
    /// records are never touched; their figures stay frozen as of the
    /// return date.
    pub fn evaluate(&mut self, as_of: NaiveDate) {
        for record in self.records.iter_mut().filter(|r| r.is_active()) {
            let assessment = self.engine.assess(record.principal, record.due_date, as_of);
            record.apply_assessment(assessment);
        }

        let overdue_count = self.records.iter().filter(|r| r.is_overdue(as_of)).count();
        self.events.emit(Event::LedgerEvaluated {
            as_of,
            overdue_count,
        });
    }

    /// evaluate as of the time provider's current date
    pub fn evaluate_now(&mut self, time_provider: &SafeTimeProvider) -> NaiveDate {
        let as_of = time_provider.now().date_naive();
        self.evaluate(as_of);
        as_of
    }

    /// mark a loan as returned, freezing its penalty figures
    pub fn mark_returned(&mut self, id: LoanId, return_date: NaiveDate) -> Result<()> {
        let engine = self.engine;
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(LedgerError::LoanNotFound { id })?;

        if record.returned {
            return Err(LedgerError::AlreadyReturned { id });
        }
        if return_date < record.disbursed_date {
            return Err(LedgerError::InvalidReturnDate {
                return_date,
                disbursed_date: record.disbursed_date,
            });
        }

        let assessment = engine.assess(record.principal, record.due_date, return_date);
        record.apply_assessment(assessment);
        record.returned = true;
        record.return_date = Some(return_date);

        let total_due = record.total_due;
        self.events.emit(Event::LoanReturned {
            id,
            return_date,
            total_due,
        });
        Ok(())
    }

    /// unreturned records past their due date as of the given date,
    /// in ledger order
    ///
    /// Call `evaluate` first so the penalty figures are current.
    pub fn overdue(&self, as_of: NaiveDate) -> Vec<&LoanRecord> {
        self.records.iter().filter(|r| r.is_overdue(as_of)).collect()
    }

    /// administrative reset: clears all records unconditionally
    pub fn reset(&mut self) {
        let cleared_count = self.records.len();
        self.records.clear();
        self.events.emit(Event::LedgerReset { cleared_count });
    }

    /// validate and apply rows, dedup across existing + incoming
    fn apply_rows(&mut self, rows: Vec<LoanRow>) -> Result<usize> {
        let mut incoming = Vec::with_capacity(rows.len());
        for row in &rows {
            incoming.push(self.record_from_row(row)?);
        }

        let mut inserted_count = 0;
        let mut batch_positions: Vec<usize> = Vec::new();
        for record in incoming {
            let position = self.upsert(record);
            if !batch_positions.contains(&position) {
                batch_positions.push(position);
                inserted_count += 1;
            }
        }
        Ok(inserted_count)
    }

    /// build a record from a loader row, validating required fields
    fn record_from_row(&self, row: &LoanRow) -> Result<LoanRecord> {
        let borrower_name = required_column("borrower_name", row.borrower_name.as_deref())?;
        let phone_number = required_column("phone_number", row.phone_number.as_deref())?;
        let principal = row.principal.ok_or(LedgerError::MissingRequiredColumns {
            column: "principal".to_string(),
        })?;
        let disbursed_date = row
            .disbursed_date
            .ok_or(LedgerError::MissingRequiredColumns {
                column: "disbursed_date".to_string(),
            })?;

        if !principal.is_positive() {
            return Err(LedgerError::InvalidInput {
                message: format!("principal must be positive, got {principal}"),
            });
        }

        let due_date = match (self.config.due_date_source, row.due_date) {
            (DueDateSource::FromInput, Some(due)) => due,
            _ => derive_due_date(disbursed_date, self.config.loan_term_months)?,
        };

        let mut record = LoanRecord::new(
            borrower_name,
            phone_number,
            principal,
            disbursed_date,
            due_date,
        );

        // a row is returned only when it also carries the return date
        if row.returned.unwrap_or(false) {
            if let Some(return_date) = row.return_date {
                if return_date < disbursed_date {
                    return Err(LedgerError::InvalidReturnDate {
                        return_date,
                        disbursed_date,
                    });
                }
                let assessment = self.engine.assess(principal, due_date, return_date);
                record.apply_assessment(assessment);
                record.returned = true;
                record.return_date = Some(return_date);
            }
        }

        Ok(record)
    }

    /// insert a record, replacing any prior one with the same natural key
    ///
    /// Replacement happens in place so ledger order is stable, and the
    /// replaced record's id is preserved: by natural key it is the same loan.
    fn upsert(&mut self, mut record: LoanRecord) -> usize {
        let existing = self
            .records
            .iter()
            .position(|r| r.natural_key() == record.natural_key());

        match existing {
            Some(position) => {
                record.id = self.records[position].id;
                self.records[position] = record;
                position
            }
            None => {
                self.records.push(record);
                self.records.len() - 1
            }
        }
    }
}

fn required_field(name: &str, value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(LedgerError::InvalidInput {
            message: format!("{name} must not be empty"),
        });
    }
    Ok(value.to_string())
}

fn required_column(name: &str, value: Option<&str>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(LedgerError::MissingRequiredColumns {
            column: name.to_string(),
        }),
    }
}
