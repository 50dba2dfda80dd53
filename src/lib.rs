pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod penalty;
pub mod record;
pub mod serialization;

// re-export key types
pub use config::{DueDateSource, LedgerConfig, DEFAULT_LOAN_TERM_MONTHS};
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, Result};
pub use events::{Event, EventStore};
pub use ledger::LoanLedger;
pub use penalty::{PenaltyAssessment, PenaltyEngine, PenaltyPolicy};
pub use record::{derive_due_date, LoanId, LoanRecord};
pub use serialization::{LedgerView, LoanRow};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
