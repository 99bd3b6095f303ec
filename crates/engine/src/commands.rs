//! Command structs for engine write operations.
//!
//! These types group parameters for obligation creation and settlement,
//! keeping call sites readable and avoiding long argument lists.

use chrono::NaiveDate;

use crate::{MoneyCents, ObligationKind};

/// Create a pending obligation.
#[derive(Clone, Debug)]
pub struct NewObligationCmd {
    pub title: String,
    pub due_date: NaiveDate,
    /// Expected amount, must be > 0.
    pub amount: MoneyCents,
    pub kind: ObligationKind,
    pub account_id: i64,
    pub creditor_id: Option<i64>,
}

impl NewObligationCmd {
    #[must_use]
    pub fn new(
        kind: ObligationKind,
        title: impl Into<String>,
        due_date: NaiveDate,
        amount: MoneyCents,
        account_id: i64,
    ) -> Self {
        Self {
            title: title.into(),
            due_date,
            amount,
            kind,
            account_id,
            creditor_id: None,
        }
    }

    #[must_use]
    pub fn creditor_id(mut self, creditor_id: i64) -> Self {
        self.creditor_id = Some(creditor_id);
        self
    }
}

/// Settle an open obligation in full.
#[derive(Clone, Debug)]
pub struct SettleCmd {
    pub obligation_id: i64,
    /// Amount actually paid, must be >= 0.
    pub paid_amount: MoneyCents,
    /// Date recorded on the posted transaction.
    pub settled_on: NaiveDate,
}

impl SettleCmd {
    #[must_use]
    pub fn new(obligation_id: i64, paid_amount: MoneyCents, settled_on: NaiveDate) -> Self {
        Self {
            obligation_id,
            paid_amount,
            settled_on,
        }
    }
}
