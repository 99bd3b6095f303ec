use sea_orm::{PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    NewObligationCmd, ObligationStatus, PendingObligation, ResultEngine, obligations,
    util::{ensure_positive, normalize_required_text, reference_code},
};

use super::{Engine, OBLIGATION_TITLE_MAX, with_tx};

impl Engine {
    /// Record a new pending obligation in status `Open`.
    ///
    /// The account, and the creditor when one is given, must exist; nothing is
    /// written otherwise.
    pub async fn new_obligation(&self, cmd: NewObligationCmd) -> ResultEngine<PendingObligation> {
        let title = normalize_required_text(&cmd.title, "title", OBLIGATION_TITLE_MAX)?;
        ensure_positive(cmd.amount, "amount")?;

        let obligation = with_tx!(self, |db_tx| {
            self.require_account(&db_tx, cmd.account_id).await?;
            if let Some(creditor_id) = cmd.creditor_id {
                self.require_creditor(&db_tx, creditor_id).await?;
            }

            let model = obligations::ActiveModel::new_row(
                reference_code("PEN"),
                cmd.kind,
                title,
                cmd.due_date,
                cmd.amount,
                cmd.account_id,
                cmd.creditor_id,
            )
            .insert(&db_tx)
            .await?;
            PendingObligation::try_from(model)
        })?;

        tracing::info!(
            obligation = %obligation.code,
            kind = obligation.kind.as_str(),
            amount = %obligation.amount,
            due = %obligation.due_date,
            "obligation recorded"
        );
        Ok(obligation)
    }

    pub async fn obligation(&self, obligation_id: i64) -> ResultEngine<PendingObligation> {
        let model = self.require_obligation(&self.database, obligation_id).await?;
        PendingObligation::try_from(model)
    }

    /// All obligations, earliest due date first.
    pub async fn list_obligations(&self) -> ResultEngine<Vec<PendingObligation>> {
        obligations::Entity::find()
            .order_by_asc(obligations::Column::DueDate)
            .order_by_asc(obligations::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(PendingObligation::try_from)
            .collect()
    }

    /// Number of obligations that are not settled yet.
    pub async fn count_open_obligations(&self) -> ResultEngine<u64> {
        let count = obligations::Entity::find()
            .filter(obligations::Column::Status.ne(ObligationStatus::Settled.as_str()))
            .count(&self.database)
            .await?;
        Ok(count)
    }
}
