use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait};

use crate::{EngineError, ResultEngine};

mod accounts;
mod bootstrap;
mod creditors;
mod obligations;
mod reports;
mod settlement;

pub use accounts::TransactionQuery;
pub use reports::{AccountAudit, Summary};

/// Run a block inside a DB transaction, committing on success and rolling back on error.
///
/// On error the transaction is dropped without commit, which rolls it back.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result: $crate::ResultEngine<_> = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

const ACCOUNT_NAME_MAX: usize = 140;
const CREDITOR_NAME_MAX: usize = 160;
const OBLIGATION_TITLE_MAX: usize = 240;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub(crate) async fn require_account<C: ConnectionTrait>(
        &self,
        db: &C,
        account_id: i64,
    ) -> ResultEngine<crate::accounts::Model> {
        crate::accounts::Entity::find_by_id(account_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("account {account_id}")))
    }

    pub(crate) async fn require_creditor<C: ConnectionTrait>(
        &self,
        db: &C,
        creditor_id: i64,
    ) -> ResultEngine<crate::creditors::Model> {
        crate::creditors::Entity::find_by_id(creditor_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("creditor {creditor_id}")))
    }

    pub(crate) async fn require_obligation<C: ConnectionTrait>(
        &self,
        db: &C,
        obligation_id: i64,
    ) -> ResultEngine<crate::obligations::Model> {
        crate::obligations::Entity::find_by_id(obligation_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("obligation {obligation_id}")))
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
