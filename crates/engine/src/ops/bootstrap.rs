use sea_orm::{PaginatorTrait, TransactionTrait, prelude::*};

use crate::{
    ResultEngine, accounts,
    util::{normalize_required_text, reference_code},
};

use super::{ACCOUNT_NAME_MAX, Engine, with_tx};

impl Engine {
    /// Create the default account when the store has no account yet.
    ///
    /// Idempotent against the database: calling it again, from this process
    /// or another one, is a no-op once any account exists. Returns whether an
    /// account was created.
    pub async fn ensure_defaults(&self, default_account_name: &str) -> ResultEngine<bool> {
        let name = normalize_required_text(default_account_name, "account name", ACCOUNT_NAME_MAX)?;
        let created = with_tx!(self, |db_tx| {
            let existing = accounts::Entity::find().count(&db_tx).await?;
            if existing > 0 {
                Ok(false)
            } else {
                accounts::ActiveModel::new_row(reference_code("ACC"), name.clone())
                    .insert(&db_tx)
                    .await?;
                Ok(true)
            }
        })?;

        if created {
            tracing::info!(account = %name, "created default account");
        } else {
            tracing::debug!("defaults already present");
        }
        Ok(created)
    }
}
