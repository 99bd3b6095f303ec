use sea_orm::{QueryOrder, prelude::*};

use crate::{
    Creditor, CreditorKind, ResultEngine, creditors,
    util::{normalize_required_text, reference_code},
};

use super::{CREDITOR_NAME_MAX, Engine};

impl Engine {
    /// Register a creditor. Creditors are immutable once created.
    pub async fn new_creditor(&self, name: &str, kind: CreditorKind) -> ResultEngine<Creditor> {
        let name = normalize_required_text(name, "creditor name", CREDITOR_NAME_MAX)?;
        let model = creditors::ActiveModel::new_row(reference_code("CRD"), name, kind)
            .insert(&self.database)
            .await?;
        tracing::info!(creditor = %model.code, kind = kind.as_str(), "creditor registered");
        Creditor::try_from(model)
    }

    pub async fn creditor(&self, creditor_id: i64) -> ResultEngine<Creditor> {
        let model = self.require_creditor(&self.database, creditor_id).await?;
        Creditor::try_from(model)
    }

    /// All creditors ordered by name.
    pub async fn list_creditors(&self) -> ResultEngine<Vec<Creditor>> {
        creditors::Entity::find()
            .order_by_asc(creditors::Column::Name)
            .order_by_asc(creditors::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Creditor::try_from)
            .collect()
    }
}
