use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::record::LoanId;

/// all events that can be emitted by the ledger
///
/// Events carry what a persistence or presentation collaborator needs to
/// react to a mutation; the ledger itself never logs or renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    LoanRecorded {
        id: LoanId,
        phone_number: String,
        principal: Money,
        disbursed_date: NaiveDate,
        due_date: NaiveDate,
    },
    BatchImported {
        inserted_count: usize,
    },
    LoanReturned {
        id: LoanId,
        return_date: NaiveDate,
        total_due: Money,
    },
    LedgerEvaluated {
        as_of: NaiveDate,
        overdue_count: usize,
    },
    LedgerReset {
        cleared_count: usize,
    },
}

/// in-memory store of ledger events
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_events_drains_store() {
        let mut store = EventStore::new();
        store.emit(Event::BatchImported { inserted_count: 3 });
        store.emit(Event::LedgerReset { cleared_count: 3 });

        assert_eq!(store.events().len(), 2);

        let taken = store.take_events();
        assert_eq!(taken.len(), 2);
        assert!(store.events().is_empty());
    }
}
