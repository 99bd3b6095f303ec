//! Settlement and ledger-posting engine for household finances.
//!
//! The [`Engine`] owns the database connection and exposes:
//!
//! - the ledger store: accounts and their append-only transaction logs
//! - the creditor registry
//! - the pending obligation tracker (payables, receivables, loans)
//! - settlement, which turns an open obligation into a posted transaction
//! - read-only reports
//!
//! Every write runs in a single database transaction, so an account balance
//! always equals the sum of the transactions posted against it.

pub use accounts::Account;
pub use commands::{NewObligationCmd, SettleCmd};
pub use creditors::{Creditor, CreditorKind};
pub use error::EngineError;
pub use money::MoneyCents;
pub use obligations::{
    ObligationKind, ObligationStatus, PendingObligation, Settlement, SettlementPlan,
    SettlementRecord,
};
pub use ops::{AccountAudit, Engine, EngineBuilder, Summary, TransactionQuery};
pub use transactions::Transaction;

mod accounts;
mod commands;
mod creditors;
mod error;
mod money;
mod obligations;
mod ops;
mod transactions;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
