use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::ledger::LoanLedger;
use crate::record::LoanRecord;

/// loader-facing row from an external tabular source
///
/// Every field is optional so a dynamically-shaped source can omit columns;
/// the ledger raises `MissingRequiredColumns` for the mandatory ones and
/// defaults `returned` to false and `return_date` to absent. Unknown source
/// columns are the loader's problem and never reach this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanRow {
    #[serde(default)]
    pub borrower_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub principal: Option<Money>,
    #[serde(default)]
    pub disbursed_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub returned: Option<bool>,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
}

impl LoanRow {
    /// persistence mirror of a record's base fields
    ///
    /// The derived penalty fields are recomputable caches and are not part
    /// of the row contract.
    pub fn from_record(record: &LoanRecord) -> Self {
        Self {
            borrower_name: Some(record.borrower_name.clone()),
            phone_number: Some(record.phone_number.clone()),
            principal: Some(record.principal),
            disbursed_date: Some(record.disbursed_date),
            due_date: Some(record.due_date),
            returned: Some(record.returned),
            return_date: record.return_date,
        }
    }
}

/// serializable snapshot of the full ledger for durable storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerView {
    pub config: LedgerConfig,
    pub records: Vec<LoanRecord>,
}

impl LedgerView {
    pub fn from_ledger(ledger: &LoanLedger) -> Self {
        Self {
            config: ledger.config().clone(),
            records: ledger.records().to_vec(),
        }
    }

    /// rows for a tabular persistence store, in ledger order
    pub fn to_rows(&self) -> Vec<LoanRow> {
        self.records.iter().map(LoanRow::from_record).collect()
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_json_round_trip_preserves_dates_exactly() {
        let mut ledger = LoanLedger::new(LedgerConfig::flat_calendar_month());
        let id = ledger
            .add_loan("Abdi", "0911000001", Money::from_major(1_000), date(2024, 1, 5))
            .unwrap()
            .id;
        ledger.mark_returned(id, date(2024, 12, 20)).unwrap();

        let view = LedgerView::from_ledger(&ledger);
        let json = view.to_json_pretty().unwrap();
        let restored_view = LedgerView::from_json(&json).unwrap();
        let restored = LoanLedger::from_view(restored_view);

        assert_eq!(restored.config(), ledger.config());
        assert_eq!(restored.records(), ledger.records());
        assert_eq!(restored.records()[0].disbursed_date, date(2024, 1, 5));
        assert_eq!(restored.records()[0].return_date, Some(date(2024, 12, 20)));
    }

    #[test]
    fn test_row_mirror_and_reimport() {
        let mut ledger = LoanLedger::new(LedgerConfig::compounding());
        ledger
            .add_loan("Abdi", "0911000001", Money::from_major(1_000), date(2024, 1, 5))
            .unwrap();

        let rows = LedgerView::from_ledger(&ledger).to_rows();
        assert_eq!(rows[0].phone_number.as_deref(), Some("0911000001"));
        assert_eq!(rows[0].returned, Some(false));
        assert_eq!(rows[0].return_date, None);

        let reloaded = LoanLedger::from_rows(ledger.config().clone(), rows).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.records()[0].due_date, date(2024, 11, 5));
    }

    #[test]
    fn test_row_deserializes_with_missing_columns() {
        let row: LoanRow =
            serde_json::from_str(r#"{"borrower_name":"Abdi","phone_number":"0911000001"}"#)
                .unwrap();
        assert_eq!(row.borrower_name.as_deref(), Some("Abdi"));
        assert_eq!(row.principal, None);
        assert_eq!(row.returned, None);
    }
}
