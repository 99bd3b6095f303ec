//! Request and response bodies of the HTTP API.
//!
//! Amounts on the wire are signed integer cents (`*_minor` fields); dates are
//! ISO-8601 calendar dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod account {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountNew {
        pub name: String,
        #[serde(default)]
        pub opening_balance_minor: i64,
        /// Date of the opening transaction; defaults to today.
        pub opened_on: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountView {
        pub id: i64,
        pub code: String,
        pub name: String,
        pub balance_minor: i64,
    }
}

pub mod creditor {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum CreditorKind {
        #[default]
        Organization,
        Individual,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CreditorNew {
        pub name: String,
        #[serde(default)]
        pub kind: CreditorKind,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CreditorView {
        pub id: i64,
        pub code: String,
        pub name: String,
        pub kind: CreditorKind,
    }
}

pub mod obligation {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum ObligationKind {
        Payable,
        Receivable,
        Loan,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum ObligationStatus {
        Open,
        Settled,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ObligationNew {
        pub title: String,
        /// ISO-8601 calendar date.
        pub due_date: NaiveDate,
        /// Expected amount, must be > 0.
        pub amount_minor: i64,
        /// One of `PAYABLE`, `RECEIVABLE`, `LOAN`.
        ///
        /// Kept as free text so an unknown kind is reported as a validation
        /// error rather than a malformed body.
        pub kind: String,
        pub account_id: i64,
        pub creditor_id: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ObligationView {
        pub id: i64,
        pub code: String,
        pub kind: ObligationKind,
        pub status: ObligationStatus,
        pub title: String,
        pub due_date: NaiveDate,
        pub amount_minor: i64,
        pub account_id: i64,
        pub creditor_id: Option<i64>,
        /// Set once settled.
        pub paid_amount_minor: Option<i64>,
        /// `paid - expected`, set once settled.
        pub diff_minor: Option<i64>,
        pub settled_on: Option<NaiveDate>,
        pub transaction_id: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettleRequest {
        /// Amount actually paid, must be >= 0.
        pub paid_amount_minor: i64,
        /// Defaults to today.
        pub settled_on: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementView {
        pub transaction: super::transaction::TransactionView,
        pub account: super::account::AccountView,
        pub obligation: ObligationView,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: i64,
        pub code: String,
        pub account_id: i64,
        pub description: String,
        /// Signed movement on the account.
        pub amount_minor: i64,
        pub posted_on: NaiveDate,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionList {
        pub account_id: Option<i64>,
        pub limit: Option<u64>,
    }
}

pub mod stats {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SummaryQuery {
        /// Number of recent transactions to include.
        pub recent: Option<u64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Summary {
        pub total_balance_minor: i64,
        pub open_obligations: u64,
        pub creditors: u64,
        pub recent_transactions: Vec<super::transaction::TransactionView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountAudit {
        pub account_id: i64,
        pub code: String,
        pub balance_minor: i64,
        pub posted_total_minor: i64,
        pub transactions: u64,
        pub consistent: bool,
    }
}
