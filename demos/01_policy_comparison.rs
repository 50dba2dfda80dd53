/// side-by-side comparison of the two penalty policies
use loan_ledger_rs::chrono::NaiveDate;
use loan_ledger_rs::{Money, PenaltyEngine, PenaltyPolicy, Rate};

fn main() {
    let principal = Money::from_major(1_000);
    let due = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let rate = Rate::from_percentage(10);

    let compounding = PenaltyEngine::new(PenaltyPolicy::Compounding, rate);
    let flat = PenaltyEngine::new(PenaltyPolicy::FlatCalendarMonth, rate);

    println!("principal {principal}, due {due}, rate {rate}\n");
    println!(
        "{:<12} {:>18} {:>18}",
        "paid on", "compounding", "flat calendar"
    );

    for effective in [
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
    ] {
        let a = compounding.assess(principal, due, effective);
        let b = flat.assess(principal, due, effective);
        println!(
            "{:<12} {:>8} ({} periods) {:>8} ({} months)",
            effective.to_string(),
            a.total_due.to_string(),
            a.months_late,
            b.total_due.to_string(),
            b.months_late,
        );
    }
}
