/// quick start - minimal example to get started
use loan_ledger_rs::chrono::NaiveDate;
use loan_ledger_rs::{LedgerConfig, LoanLedger, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ledger with the compounding penalty policy (10% per 30-day period)
    let mut ledger = LoanLedger::new(LedgerConfig::compounding());

    // record a loan: due date is disbursement + 10 months
    let record = ledger.add_loan(
        "Abdi Tesema",
        "0911000001",
        Money::from_major(2_000),
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
    )?;
    let id = record.id;
    println!("loan due on {}", record.due_date);

    // refresh penalty figures, then list what is overdue
    let today = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
    ledger.evaluate(today);
    for loan in ledger.overdue(today) {
        println!(
            "{} is {} months late, owes {}",
            loan.borrower_name, loan.months_late, loan.total_due
        );
    }

    // settle the loan, freezing its figures as of the return date
    ledger.mark_returned(id, today)?;
    println!("settled at {}", ledger.get(id).unwrap().total_due);

    Ok(())
}
