//! Creditors: named counterparties an obligation may reference.

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditorKind {
    #[default]
    Organization,
    Individual,
}

impl CreditorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Individual => "individual",
        }
    }
}

impl TryFrom<&str> for CreditorKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "organization" => Ok(Self::Organization),
            "individual" => Ok(Self::Individual),
            other => Err(EngineError::Validation(format!(
                "invalid creditor kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creditor {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub kind: CreditorKind,
}

impl TryFrom<Model> for Creditor {
    type Error = EngineError;

    fn try_from(value: Model) -> ResultEngine<Self> {
        let kind = CreditorKind::try_from(value.kind.as_str())
            .map_err(|_| EngineError::Inconsistent(format!("creditor {} kind", value.id)))?;
        Ok(Self {
            id: value.id,
            code: value.code,
            name: value.name,
            kind,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "creditors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub kind: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::obligations::Entity")]
    Obligations,
}

impl Related<super::obligations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Obligations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn new_row(code: String, name: String, kind: CreditorKind) -> Self {
        Self {
            id: ActiveValue::NotSet,
            code: ActiveValue::Set(code),
            name: ActiveValue::Set(name),
            kind: ActiveValue::Set(kind.as_str().to_string()),
        }
    }
}
