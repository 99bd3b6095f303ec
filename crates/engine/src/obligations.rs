//! Pending obligations: bills to pay, receivables and loans.
//!
//! An obligation is created `Open` and moves to `Settled` exactly once, when
//! the settlement engine records the amount actually paid and posts the
//! resulting transaction. `Settled` is terminal.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{Account, EngineError, MoneyCents, ResultEngine, Transaction, util::ensure_non_negative};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObligationKind {
    /// A bill the account holder has to pay.
    Payable,
    /// Money the account holder expects to receive.
    Receivable,
    /// A loan taken by the account holder; settling it is a repayment.
    Loan,
}

impl ObligationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payable => "payable",
            Self::Receivable => "receivable",
            Self::Loan => "loan",
        }
    }

    /// Label used in posted transaction descriptions.
    pub fn label(self) -> &'static str {
        match self {
            Self::Payable => "PAYABLE",
            Self::Receivable => "RECEIVABLE",
            Self::Loan => "LOAN",
        }
    }

    /// Signed movement on the account when `paid` is settled.
    ///
    /// Payables and loans leave the account, receivables enter it.
    #[must_use]
    pub fn movement(self, paid: MoneyCents) -> MoneyCents {
        match self {
            Self::Payable | Self::Loan => -paid.abs(),
            Self::Receivable => paid.abs(),
        }
    }
}

impl TryFrom<&str> for ObligationKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "payable" => Ok(Self::Payable),
            "receivable" => Ok(Self::Receivable),
            "loan" => Ok(Self::Loan),
            other => Err(EngineError::Validation(format!(
                "invalid obligation kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObligationStatus {
    Open,
    Settled,
}

impl ObligationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Settled => "settled",
        }
    }
}

impl TryFrom<&str> for ObligationStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "open" => Ok(Self::Open),
            "settled" => Ok(Self::Settled),
            other => Err(EngineError::Inconsistent(format!(
                "invalid obligation status: {other}"
            ))),
        }
    }
}

/// Fields recorded when an obligation is settled. Present iff the status is
/// `Settled`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    pub paid_amount: MoneyCents,
    /// `paid_amount - expected amount`: positive is interest or a penalty,
    /// negative is a discount.
    pub diff: MoneyCents,
    pub settled_on: NaiveDate,
    pub transaction_id: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingObligation {
    pub id: i64,
    /// External reference code (`PEN-…`).
    pub code: String,
    pub kind: ObligationKind,
    pub status: ObligationStatus,
    pub title: String,
    pub due_date: NaiveDate,
    /// Expected amount, always > 0.
    pub amount: MoneyCents,
    pub account_id: i64,
    pub creditor_id: Option<i64>,
    pub settlement: Option<SettlementRecord>,
}

/// What settling an obligation will do, computed before anything is written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementPlan {
    pub paid_amount: MoneyCents,
    pub movement: MoneyCents,
    pub diff: MoneyCents,
    pub description: String,
}

impl PendingObligation {
    pub fn is_open(&self) -> bool {
        self.status == ObligationStatus::Open
    }

    pub fn paid_amount(&self) -> Option<MoneyCents> {
        self.settlement.as_ref().map(|s| s.paid_amount)
    }

    pub fn diff(&self) -> Option<MoneyCents> {
        self.settlement.as_ref().map(|s| s.diff)
    }

    /// Description of the transaction posted on settlement.
    pub fn posting_description(&self) -> String {
        format!("[{}] {}", self.kind.label(), self.title)
    }

    /// Validate a settlement of `paid` and compute its effects.
    pub fn plan_settlement(&self, paid: MoneyCents) -> ResultEngine<SettlementPlan> {
        if !self.is_open() {
            return Err(EngineError::AlreadySettled(self.code.clone()));
        }
        ensure_non_negative(paid, "paid amount")?;
        let diff = paid
            .checked_sub(self.amount)
            .ok_or_else(|| EngineError::Validation("paid amount too large".to_string()))?;

        Ok(SettlementPlan {
            paid_amount: paid,
            movement: self.kind.movement(paid),
            diff,
            description: self.posting_description(),
        })
    }
}

impl TryFrom<Model> for PendingObligation {
    type Error = EngineError;

    fn try_from(value: Model) -> ResultEngine<Self> {
        let kind = ObligationKind::try_from(value.kind.as_str()).map_err(|_| {
            EngineError::Inconsistent(format!("obligation {} kind: {}", value.id, value.kind))
        })?;
        let status = ObligationStatus::try_from(value.status.as_str())?;

        let settlement = match (
            status,
            value.paid_minor,
            value.diff_minor,
            value.settled_on,
            value.transaction_id,
        ) {
            (ObligationStatus::Open, None, None, None, None) => None,
            (
                ObligationStatus::Settled,
                Some(paid_minor),
                Some(diff_minor),
                Some(settled_on),
                Some(transaction_id),
            ) => Some(SettlementRecord {
                paid_amount: MoneyCents::new(paid_minor),
                diff: MoneyCents::new(diff_minor),
                settled_on,
                transaction_id,
            }),
            _ => {
                return Err(EngineError::Inconsistent(format!(
                    "obligation {} settlement fields do not match status {}",
                    value.id, value.status
                )));
            }
        };

        Ok(Self {
            id: value.id,
            code: value.code,
            kind,
            status,
            title: value.title,
            due_date: value.due_date,
            amount: MoneyCents::new(value.amount_minor),
            account_id: value.account_id,
            creditor_id: value.creditor_id,
            settlement,
        })
    }
}

/// Result of a successful settlement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub transaction: Transaction,
    pub account: Account,
    pub obligation: PendingObligation,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pending_obligations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub kind: String,
    pub status: String,
    pub title: String,
    pub due_date: Date,
    pub amount_minor: i64,
    pub account_id: i64,
    pub creditor_id: Option<i64>,
    pub paid_minor: Option<i64>,
    pub diff_minor: Option<i64>,
    pub settled_on: Option<Date>,
    pub transaction_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Accounts,
    #[sea_orm(
        belongs_to = "super::creditors::Entity",
        from = "Column::CreditorId",
        to = "super::creditors::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Creditors,
    #[sea_orm(
        belongs_to = "super::transactions::Entity",
        from = "Column::TransactionId",
        to = "super::transactions::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Transactions,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl Related<super::creditors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creditors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn new_row(
        code: String,
        kind: ObligationKind,
        title: String,
        due_date: NaiveDate,
        amount: MoneyCents,
        account_id: i64,
        creditor_id: Option<i64>,
    ) -> Self {
        Self {
            id: ActiveValue::NotSet,
            code: ActiveValue::Set(code),
            kind: ActiveValue::Set(kind.as_str().to_string()),
            status: ActiveValue::Set(ObligationStatus::Open.as_str().to_string()),
            title: ActiveValue::Set(title),
            due_date: ActiveValue::Set(due_date),
            amount_minor: ActiveValue::Set(amount.cents()),
            account_id: ActiveValue::Set(account_id),
            creditor_id: ActiveValue::Set(creditor_id),
            paid_minor: ActiveValue::Set(None),
            diff_minor: ActiveValue::Set(None),
            settled_on: ActiveValue::Set(None),
            transaction_id: ActiveValue::Set(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(kind: ObligationKind, amount: i64) -> PendingObligation {
        PendingObligation {
            id: 1,
            code: "PEN-0000000001".to_string(),
            kind,
            status: ObligationStatus::Open,
            title: "Electricity".to_string(),
            due_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            amount: MoneyCents::new(amount),
            account_id: 1,
            creditor_id: None,
            settlement: None,
        }
    }

    fn model(status: &str, paid: Option<i64>) -> Model {
        Model {
            id: 7,
            code: "PEN-0000000007".to_string(),
            kind: "loan".to_string(),
            status: status.to_string(),
            title: "Car".to_string(),
            due_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            amount_minor: 500_00,
            account_id: 1,
            creditor_id: Some(2),
            paid_minor: paid,
            diff_minor: paid.map(|p| p - 500_00),
            settled_on: paid.map(|_| NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()),
            transaction_id: paid.map(|_| 11),
        }
    }

    #[test]
    fn payable_and_loan_are_outflows() {
        for kind in [ObligationKind::Payable, ObligationKind::Loan] {
            let plan = open(kind, 100_00)
                .plan_settlement(MoneyCents::new(120_00))
                .unwrap();
            assert_eq!(plan.movement, MoneyCents::new(-120_00));
            assert_eq!(plan.diff, MoneyCents::new(20_00));
        }
    }

    #[test]
    fn receivable_is_an_inflow() {
        let plan = open(ObligationKind::Receivable, 50_00)
            .plan_settlement(MoneyCents::new(50_00))
            .unwrap();
        assert_eq!(plan.movement, MoneyCents::new(50_00));
        assert_eq!(plan.diff, MoneyCents::ZERO);
        assert_eq!(plan.description, "[RECEIVABLE] Electricity");
    }

    #[test]
    fn diff_keeps_literal_sign_for_receivables() {
        let plan = open(ObligationKind::Receivable, 50_00)
            .plan_settlement(MoneyCents::new(45_00))
            .unwrap();
        assert_eq!(plan.diff, MoneyCents::new(-5_00));
    }

    #[test]
    fn zero_payment_is_a_waiver() {
        let plan = open(ObligationKind::Payable, 80_00)
            .plan_settlement(MoneyCents::ZERO)
            .unwrap();
        assert_eq!(plan.movement, MoneyCents::ZERO);
        assert_eq!(plan.diff, MoneyCents::new(-80_00));
    }

    #[test]
    fn negative_payment_is_rejected() {
        let err = open(ObligationKind::Payable, 80_00)
            .plan_settlement(MoneyCents::new(-1))
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn settled_obligation_cannot_be_planned_again() {
        let mut obligation = open(ObligationKind::Payable, 10_00);
        obligation.status = ObligationStatus::Settled;
        let err = obligation.plan_settlement(MoneyCents::new(10_00)).unwrap_err();
        assert_eq!(err, EngineError::AlreadySettled("PEN-0000000001".to_string()));
    }

    #[test]
    fn kind_parses_uppercase_labels() {
        assert_eq!(
            ObligationKind::try_from("PAYABLE").unwrap(),
            ObligationKind::Payable
        );
        assert_eq!(
            ObligationKind::try_from("receivable").unwrap(),
            ObligationKind::Receivable
        );
        assert_eq!(ObligationKind::try_from("Loan").unwrap(), ObligationKind::Loan);
        assert!(matches!(
            ObligationKind::try_from("GIFT"),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn model_conversion_checks_settlement_fields() {
        let open = PendingObligation::try_from(model("open", None)).unwrap();
        assert!(open.is_open());
        assert_eq!(open.paid_amount(), None);

        let settled = PendingObligation::try_from(model("settled", Some(520_00))).unwrap();
        assert_eq!(settled.diff(), Some(MoneyCents::new(20_00)));

        assert!(matches!(
            PendingObligation::try_from(model("open", Some(1))),
            Err(EngineError::Inconsistent(_))
        ));
        assert!(matches!(
            PendingObligation::try_from(model("settled", None)),
            Err(EngineError::Inconsistent(_))
        ));
    }
}
