//! Transaction primitives.
//!
//! A `Transaction` is an immutable record of money moving in or out of one
//! account. Transactions are only ever appended; no code path updates or
//! deletes a row once it is written.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::MoneyCents;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// External reference code (`TRX-…`).
    pub code: String,
    pub account_id: i64,
    pub description: String,
    /// Signed movement applied to the account balance.
    pub amount: MoneyCents,
    pub posted_on: NaiveDate,
}

impl From<Model> for Transaction {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            code: value.code,
            account_id: value.account_id,
            description: value.description,
            amount: MoneyCents::new(value.amount_minor),
            posted_on: value.posted_on,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub account_id: i64,
    pub description: String,
    pub amount_minor: i64,
    pub posted_on: Date,
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
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn new_row(
        code: String,
        account_id: i64,
        description: String,
        amount: MoneyCents,
        posted_on: NaiveDate,
    ) -> Self {
        Self {
            id: ActiveValue::NotSet,
            code: ActiveValue::Set(code),
            account_id: ActiveValue::Set(account_id),
            description: ActiveValue::Set(description),
            amount_minor: ActiveValue::Set(amount.cents()),
            posted_on: ActiveValue::Set(posted_on),
        }
    }
}
