//! Initial schema migration - creates all tables from scratch.
//!
//! - `accounts`: where money is kept, with a denormalized balance
//! - `creditors`: counterparties referenced by obligations
//! - `transactions`: append-only postings against an account
//! - `pending_obligations`: payables, receivables and loans awaiting settlement
//!
//! Every table carries a unique `code` used for display and audit, distinct
//! from the integer primary key.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    Code,
    Name,
    Balance,
}

#[derive(Iden)]
enum Creditors {
    Table,
    Id,
    Code,
    Name,
    Kind,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    Code,
    AccountId,
    Description,
    AmountMinor,
    PostedOn,
}

#[derive(Iden)]
enum PendingObligations {
    Table,
    Id,
    Code,
    Kind,
    Status,
    Title,
    DueDate,
    AmountMinor,
    AccountId,
    CreditorId,
    PaidMinor,
    DiffMinor,
    SettledOn,
    TransactionId,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Accounts
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Accounts::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Accounts::Name).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::Balance)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Creditors
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Creditors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Creditors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Creditors::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Creditors::Name).string().not_null())
                    .col(
                        ColumnDef::new(Creditors::Kind)
                            .string()
                            .not_null()
                            .default("organization"),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Transactions::AccountId).integer().not_null())
                    .col(ColumnDef::new(Transactions::Description).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::PostedOn).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-account_id")
                            .from(Transactions::Table, Transactions::AccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-account_id")
                    .table(Transactions::Table)
                    .col(Transactions::AccountId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Pending obligations
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(PendingObligations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PendingObligations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PendingObligations::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(PendingObligations::Kind).string().not_null())
                    .col(
                        ColumnDef::new(PendingObligations::Status)
                            .string()
                            .not_null()
                            .default("open"),
                    )
                    .col(ColumnDef::new(PendingObligations::Title).string().not_null())
                    .col(ColumnDef::new(PendingObligations::DueDate).date().not_null())
                    .col(
                        ColumnDef::new(PendingObligations::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PendingObligations::AccountId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PendingObligations::CreditorId).integer())
                    .col(ColumnDef::new(PendingObligations::PaidMinor).big_integer())
                    .col(ColumnDef::new(PendingObligations::DiffMinor).big_integer())
                    .col(ColumnDef::new(PendingObligations::SettledOn).date())
                    .col(ColumnDef::new(PendingObligations::TransactionId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-pending_obligations-account_id")
                            .from(PendingObligations::Table, PendingObligations::AccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-pending_obligations-creditor_id")
                            .from(PendingObligations::Table, PendingObligations::CreditorId)
                            .to(Creditors::Table, Creditors::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-pending_obligations-transaction_id")
                            .from(PendingObligations::Table, PendingObligations::TransactionId)
                            .to(Transactions::Table, Transactions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-pending_obligations-due_date")
                    .table(PendingObligations::Table)
                    .col(PendingObligations::DueDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-pending_obligations-status")
                    .table(PendingObligations::Table)
                    .col(PendingObligations::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(PendingObligations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Creditors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        Ok(())
    }
}
