use sea_orm::{QueryFilter, TransactionTrait, prelude::*, sea_query::Expr};

use crate::{
    Account, EngineError, ObligationStatus, PendingObligation, ResultEngine, SettleCmd, Settlement,
    obligations,
};

use super::{Engine, with_tx};

impl Engine {
    /// Settle an open obligation in full.
    ///
    /// In one unit of work this:
    /// - moves the obligation from `Open` to `Settled`, recording the paid
    ///   amount, the diff against the expected amount and the settlement date
    /// - posts a transaction on the obligation's account (outflow for payables
    ///   and loans, inflow for receivables) and moves the balance with it
    /// - links the obligation to the posted transaction
    ///
    /// The status change is a conditional update on `status = open` and is the
    /// first write of the unit of work: of several concurrent settlements of
    /// the same obligation exactly one succeeds and the others fail with
    /// [`EngineError::AlreadySettled`] without posting anything.
    pub async fn settle(&self, cmd: SettleCmd) -> ResultEngine<Settlement> {
        // Kind, amount, title and account never change after creation, so the
        // plan can be computed before the unit of work starts.
        let current = self.obligation(cmd.obligation_id).await?;
        let plan = match current.plan_settlement(cmd.paid_amount) {
            Ok(plan) => plan,
            Err(err) => {
                tracing::warn!(obligation = %current.code, "settlement rejected: {err}");
                return Err(err);
            }
        };

        let settlement = with_tx!(self, |db_tx| {
            let transitioned = obligations::Entity::update_many()
                .col_expr(
                    obligations::Column::Status,
                    Expr::value(ObligationStatus::Settled.as_str()),
                )
                .col_expr(
                    obligations::Column::PaidMinor,
                    Expr::value(plan.paid_amount.cents()),
                )
                .col_expr(obligations::Column::DiffMinor, Expr::value(plan.diff.cents()))
                .col_expr(obligations::Column::SettledOn, Expr::value(cmd.settled_on))
                .filter(obligations::Column::Id.eq(current.id))
                .filter(obligations::Column::Status.eq(ObligationStatus::Open.as_str()))
                .exec(&db_tx)
                .await?;
            if transitioned.rows_affected == 0 {
                Err(EngineError::AlreadySettled(current.code.clone()))
            } else {
                let transaction = self
                    .post_transaction(
                        &db_tx,
                        current.account_id,
                        plan.description.clone(),
                        plan.movement,
                        cmd.settled_on,
                    )
                    .await?;

                obligations::Entity::update_many()
                    .col_expr(
                        obligations::Column::TransactionId,
                        Expr::value(transaction.id),
                    )
                    .filter(obligations::Column::Id.eq(current.id))
                    .exec(&db_tx)
                    .await?;

                let account = self.require_account(&db_tx, current.account_id).await?;
                let obligation = self.require_obligation(&db_tx, current.id).await?;
                Ok(Settlement {
                    transaction,
                    account: Account::from(account),
                    obligation: PendingObligation::try_from(obligation)?,
                })
            }
        });

        match settlement {
            Ok(settlement) => {
                tracing::info!(
                    obligation = %current.code,
                    transaction = %settlement.transaction.code,
                    movement = %plan.movement,
                    diff = %plan.diff,
                    "obligation settled"
                );
                Ok(settlement)
            }
            Err(err) => {
                tracing::warn!(obligation = %current.code, "settlement rejected: {err}");
                Err(err)
            }
        }
    }
}
