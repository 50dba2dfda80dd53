/// persisting and restoring the ledger as a json snapshot
use loan_ledger_rs::chrono::NaiveDate;
use loan_ledger_rs::{LedgerConfig, LedgerView, LoanLedger, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = LoanLedger::new(LedgerConfig::flat_calendar_month());

    ledger.add_loan(
        "Abdi Tesema",
        "0911000001",
        Money::from_major(2_000),
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
    )?;
    ledger.add_loan(
        "Chaltu Bekele",
        "0911000002",
        Money::from_major(750),
        NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
    )?;
    ledger.evaluate(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());

    // snapshot is what a persistence store would receive after each mutation
    let json = LedgerView::from_ledger(&ledger).to_json_pretty()?;
    println!("{json}");

    // and what it hands back on the next session
    let restored = LoanLedger::from_view(LedgerView::from_json(&json)?);
    println!(
        "restored {} records, first due {}",
        restored.len(),
        restored.records()[0].due_date
    );

    Ok(())
}
