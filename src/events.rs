use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{DepositId, DepositStatus};

/// events emitted over a time deposit's life
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    DepositOpened {
        deposit_id: DepositId,
        member_id: String,
        principal: Money,
        term_months: u32,
        interest_rate: Rate,
        maturity_date: DateTime<Utc>,
        timestamp: DateTime<Utc>,
    },
    DepositMatured {
        deposit_id: DepositId,
        payout_amount: Money,
        timestamp: DateTime<Utc>,
    },
    EarlyWithdrawalProcessed {
        deposit_id: DepositId,
        amount_withdrawn: Money,
        interest_paid: Money,
        remaining_balance: Money,
        days_elapsed: u32,
        timestamp: DateTime<Utc>,
    },
    DepositRolledOver {
        deposit_id: DepositId,
        new_deposit_id: DepositId,
        total_amount: Money,
        new_interest_rate: Rate,
        new_maturity_date: DateTime<Utc>,
        timestamp: DateTime<Utc>,
    },
    StatusChanged {
        deposit_id: DepositId,
        old_status: DepositStatus,
        new_status: DepositStatus,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
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

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
