/// serialization support for deposit records
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::deposits::TimeDepositRecord;
use crate::types::{DepositId, DepositStatus};

/// serializable view of a time deposit, as handed to the persistence layer
#[derive(Debug, Serialize, Deserialize)]
pub struct DepositView {
    pub id: DepositId,
    pub member_id: String,
    pub status: DepositStatus,
    pub terms: TermsView,
    pub balances: BalanceView,
    pub pending_events: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TermsView {
    pub term_months: u32,
    pub interest_rate: Rate,
    /// `None` when neither stored nor derivable
    pub start_date: Option<DateTime<Utc>>,
    pub start_date_derived: bool,
    pub maturity_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BalanceView {
    pub principal: Money,
    pub interest_accrued: Money,
    pub payout_amount: Money,
}

impl DepositView {
    pub fn from_record(record: &TimeDepositRecord) -> Self {
        DepositView {
            id: record.id,
            member_id: record.member_id.clone(),
            status: record.status,
            terms: TermsView {
                term_months: record.term_months,
                interest_rate: record.interest_rate,
                start_date: record.effective_start_date().ok(),
                start_date_derived: record.start_date.is_none(),
                maturity_date: record.maturity_date,
            },
            balances: BalanceView {
                principal: record.principal,
                interest_accrued: record.interest_accrued,
                payout_amount: record.payout_amount,
            },
            pending_events: record.events().len(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl TimeDepositRecord {
    /// get json representation of current state
    pub fn json(&self) -> String {
        DepositView::from_record(self)
            .to_json_pretty()
            .unwrap_or_else(|e| format!("JSON error: {}", e))
    }
}
