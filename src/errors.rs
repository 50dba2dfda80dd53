use chrono::NaiveDate;
use thiserror::Error;

use crate::record::LoanId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    #[error("duplicate active loan for phone number {phone_number}")]
    DuplicateActiveLoan {
        phone_number: String,
    },

    #[error("missing required column: {column}")]
    MissingRequiredColumns {
        column: String,
    },

    #[error("loan already returned: {id}")]
    AlreadyReturned {
        id: LoanId,
    },

    #[error("invalid return date: {return_date} precedes disbursement on {disbursed_date}")]
    InvalidReturnDate {
        return_date: NaiveDate,
        disbursed_date: NaiveDate,
    },

    #[error("loan not found: {id}")]
    LoanNotFound {
        id: LoanId,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
