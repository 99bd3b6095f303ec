use std::collections::HashMap;

use sea_orm::{PaginatorTrait, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    EngineError, MoneyCents, ResultEngine, Transaction, accounts, creditors, transactions,
};

use super::{Engine, TransactionQuery, with_tx};

/// Dashboard figures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_balance: MoneyCents,
    pub open_obligations: u64,
    pub creditors: u64,
    pub recent_transactions: Vec<Transaction>,
}

/// Stored balance of an account against the sum of its posted transactions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAudit {
    pub account_id: i64,
    pub code: String,
    pub balance: MoneyCents,
    pub posted_total: MoneyCents,
    pub transactions: u64,
}

impl AccountAudit {
    pub fn is_consistent(&self) -> bool {
        self.balance == self.posted_total
    }
}

impl Engine {
    /// Sum of all account balances.
    ///
    /// Each balance fits in cents on its own; a total that does not is
    /// reported as [`EngineError::Inconsistent`].
    pub async fn total_balance(&self) -> ResultEngine<MoneyCents> {
        let models = accounts::Entity::find().all(&self.database).await?;
        MoneyCents::checked_sum(models.iter().map(|m| MoneyCents::new(m.balance))).ok_or_else(
            || EngineError::Inconsistent("total balance exceeds the money range".to_string()),
        )
    }

    pub async fn open_obligation_count(&self) -> ResultEngine<u64> {
        self.count_open_obligations().await
    }

    pub async fn creditor_count(&self) -> ResultEngine<u64> {
        let count = creditors::Entity::find().count(&self.database).await?;
        Ok(count)
    }

    /// Most recent transactions, system-wide or for one account.
    pub async fn recent_transactions(
        &self,
        limit: u64,
        account_id: Option<i64>,
    ) -> ResultEngine<Vec<Transaction>> {
        self.list_transactions(TransactionQuery { account_id, limit })
            .await
    }

    /// The dashboard: total balance, open obligations, creditor count and the
    /// last `recent_limit` transactions.
    pub async fn summary(&self, recent_limit: u64) -> ResultEngine<Summary> {
        Ok(Summary {
            total_balance: self.total_balance().await?,
            open_obligations: self.open_obligation_count().await?,
            creditors: self.creditor_count().await?,
            recent_transactions: self.recent_transactions(recent_limit, None).await?,
        })
    }

    /// Compare every account balance with the sum of its transaction log.
    ///
    /// Balances and transactions are read from the same snapshot; nothing is
    /// written.
    pub async fn audit_ledger(&self) -> ResultEngine<Vec<AccountAudit>> {
        with_tx!(self, |db_tx| {
            let account_models = accounts::Entity::find().all(&db_tx).await?;
            let transaction_models = transactions::Entity::find().all(&db_tx).await?;

            let mut posted: HashMap<i64, (i128, u64)> = HashMap::new();
            for tx in transaction_models {
                let entry = posted.entry(tx.account_id).or_insert((0, 0));
                entry.0 += i128::from(tx.amount_minor);
                entry.1 += 1;
            }

            let audits = account_models
                .into_iter()
                .map(|account| -> ResultEngine<AccountAudit> {
                    let (posted_total, transactions) =
                        posted.get(&account.id).copied().unwrap_or_default();
                    let posted_total = i64::try_from(posted_total).map_err(|_| {
                        EngineError::Inconsistent(format!(
                            "transactions of account {} exceed the money range",
                            account.code
                        ))
                    })?;
                    Ok(AccountAudit {
                        account_id: account.id,
                        code: account.code,
                        balance: MoneyCents::new(account.balance),
                        posted_total: MoneyCents::new(posted_total),
                        transactions,
                    })
                })
                .collect::<ResultEngine<Vec<_>>>()?;

            for audit in audits.iter().filter(|a| !a.is_consistent()) {
                tracing::error!(
                    account = %audit.code,
                    balance = %audit.balance,
                    posted = %audit.posted_total,
                    "account balance does not match its transactions"
                );
            }
            Ok(audits)
        })
    }
}
