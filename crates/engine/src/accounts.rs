//! The module contains the `Account` struct and its storage model.

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};

use crate::MoneyCents;

/// An account.
///
/// An account is a bank account, a cash drawer or anything else where money
/// is kept. Its balance always equals the sum of the transactions posted
/// against it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    /// External reference code (`ACC-…`), safe to show to users.
    pub code: String,
    pub name: String,
    pub balance: MoneyCents,
}

impl From<Model> for Account {
    fn from(value: Model) -> Self {
        Self {
            id: value.id,
            code: value.code,
            name: value.name,
            balance: MoneyCents::new(value.balance),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub balance: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
    #[sea_orm(has_many = "super::obligations::Entity")]
    Obligations,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl Related<super::obligations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Obligations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// A fresh account row. The balance always starts at zero: an opening
    /// balance is posted as a transaction.
    pub(crate) fn new_row(code: String, name: String) -> Self {
        Self {
            id: ActiveValue::NotSet,
            code: ActiveValue::Set(code),
            name: ActiveValue::Set(name),
            balance: ActiveValue::Set(0),
        }
    }
}
