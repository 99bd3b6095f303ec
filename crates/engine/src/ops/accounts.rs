use chrono::NaiveDate;
use sea_orm::{
    DatabaseTransaction, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*,
    sea_query::Expr,
};

use crate::{
    Account, EngineError, MoneyCents, ResultEngine, Transaction, accounts, transactions,
    util::{normalize_required_text, reference_code},
};

use super::{ACCOUNT_NAME_MAX, Engine, with_tx};

const OPENING_DESCRIPTION: &str = "Opening balance";

/// Which transactions to list, newest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransactionQuery {
    /// Restrict to one account; `None` lists across all accounts.
    pub account_id: Option<i64>,
    pub limit: u64,
}

impl TransactionQuery {
    pub const DEFAULT_LIMIT: u64 = 10;
    pub const MAX_LIMIT: u64 = 500;

    #[must_use]
    pub fn recent(limit: u64) -> Self {
        Self {
            account_id: None,
            limit,
        }
    }

    #[must_use]
    pub fn for_account(account_id: i64, limit: u64) -> Self {
        Self {
            account_id: Some(account_id),
            limit,
        }
    }

    fn effective_limit(self) -> u64 {
        self.limit.clamp(1, Self::MAX_LIMIT)
    }
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self::recent(Self::DEFAULT_LIMIT)
    }
}

impl Engine {
    /// Open a new account.
    ///
    /// A non-zero `opening_balance` is posted as an `Opening balance`
    /// transaction dated `opened_on`, in the same unit of work, so the balance
    /// is backed by the transaction log from the first moment.
    pub async fn new_account(
        &self,
        name: &str,
        opening_balance: MoneyCents,
        opened_on: NaiveDate,
    ) -> ResultEngine<Account> {
        let name = normalize_required_text(name, "account name", ACCOUNT_NAME_MAX)?;
        let account = with_tx!(self, |db_tx| {
            let model = accounts::ActiveModel::new_row(reference_code("ACC"), name)
                .insert(&db_tx)
                .await?;

            if !opening_balance.is_zero() {
                self.post_transaction(
                    &db_tx,
                    model.id,
                    OPENING_DESCRIPTION.to_string(),
                    opening_balance,
                    opened_on,
                )
                .await?;
            }

            let model = self.require_account(&db_tx, model.id).await?;
            Ok(Account::from(model))
        })?;

        tracing::info!(account = %account.code, balance = %account.balance, "account opened");
        Ok(account)
    }

    /// Return an account snapshot from DB.
    pub async fn account(&self, account_id: i64) -> ResultEngine<Account> {
        let model = self.require_account(&self.database, account_id).await?;
        Ok(Account::from(model))
    }

    /// All accounts ordered by name.
    pub async fn list_accounts(&self) -> ResultEngine<Vec<Account>> {
        let models = accounts::Entity::find()
            .order_by_asc(accounts::Column::Name)
            .order_by_asc(accounts::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Account::from).collect())
    }

    /// Transactions newest first, optionally for a single account.
    ///
    /// Recency is posting order, so two transactions dated the same day keep
    /// the order in which they were posted.
    pub async fn list_transactions(&self, query: TransactionQuery) -> ResultEngine<Vec<Transaction>> {
        let mut select = transactions::Entity::find();
        if let Some(account_id) = query.account_id {
            self.require_account(&self.database, account_id).await?;
            select = select.filter(transactions::Column::AccountId.eq(account_id));
        }

        let models = select
            .order_by_desc(transactions::Column::Id)
            .limit(query.effective_limit())
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Transaction::from).collect())
    }

    /// Append a transaction to an account and move its balance by `amount`.
    ///
    /// Must run inside the caller's DB transaction: the insert and the balance
    /// change commit or roll back together. The balance is updated with an
    /// in-place increment bounded in the same statement, so concurrent
    /// postings never lose an update nor push the balance out of range.
    pub(crate) async fn post_transaction(
        &self,
        db_tx: &DatabaseTransaction,
        account_id: i64,
        description: String,
        amount: MoneyCents,
        posted_on: NaiveDate,
    ) -> ResultEngine<Transaction> {
        let account = self.require_account(db_tx, account_id).await?;

        let model = transactions::ActiveModel::new_row(
            reference_code("TRX"),
            account_id,
            description,
            amount,
            posted_on,
        )
        .insert(db_tx)
        .await?;

        let mut update = accounts::Entity::update_many()
            .col_expr(
                accounts::Column::Balance,
                Expr::col(accounts::Column::Balance).add(amount.cents()),
            )
            .filter(accounts::Column::Id.eq(account_id));
        if amount.is_positive() {
            update = update.filter(accounts::Column::Balance.lte(i64::MAX - amount.cents()));
        } else if amount.is_negative() {
            update = update.filter(accounts::Column::Balance.gte(i64::MIN - amount.cents()));
        }

        let updated = update.exec(db_tx).await?;
        if updated.rows_affected != 1 {
            // The account exists in this unit of work, so only the range bound can miss.
            return Err(EngineError::Validation(format!(
                "balance overflow on account {}",
                account.code
            )));
        }

        tracing::debug!(
            account = %account.code,
            transaction = %model.code,
            amount = %amount,
            "transaction posted"
        );
        Ok(Transaction::from(model))
    }
}
