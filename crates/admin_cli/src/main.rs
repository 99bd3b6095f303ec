use std::error::Error;

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use engine::{CreditorKind, Engine, MoneyCents};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "billbook_admin")]
#[command(about = "Admin utilities for Billbook (bootstrap, accounts, creditors)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./billbook.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply migrations and create the default account on an empty ledger.
    Init(InitArgs),
    Account(Account),
    Creditor(Creditor),
    /// Compare every account balance with its transaction log.
    Audit,
}

#[derive(Args, Debug)]
struct InitArgs {
    #[arg(long, default_value = "Main")]
    default_account: String,
}

#[derive(Args, Debug)]
struct Account {
    #[command(subcommand)]
    command: AccountCommand,
}

#[derive(Subcommand, Debug)]
enum AccountCommand {
    Create(AccountCreateArgs),
    List,
}

#[derive(Args, Debug)]
struct AccountCreateArgs {
    #[arg(long)]
    name: String,
    /// Opening balance as a decimal amount, e.g. `12.50`.
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    opening: MoneyCents,
    /// Date of the opening transaction (YYYY-MM-DD), defaults to today.
    #[arg(long)]
    opened_on: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct Creditor {
    #[command(subcommand)]
    command: CreditorCommand,
}

#[derive(Subcommand, Debug)]
enum CreditorCommand {
    Create(CreditorCreateArgs),
    List,
}

#[derive(Args, Debug)]
struct CreditorCreateArgs {
    #[arg(long)]
    name: String,
    /// `organization` or `individual`.
    #[arg(long, default_value = "organization")]
    kind: String,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    run(cli.command, &engine).await
}

async fn run(command: Command, engine: &Engine) -> Result<(), Box<dyn Error + Send + Sync>> {
    match command {
        Command::Init(args) => {
            if engine.ensure_defaults(&args.default_account).await? {
                println!("created default account: {}", args.default_account);
            } else {
                println!("ledger already initialized");
            }
        }
        Command::Account(Account {
            command: AccountCommand::Create(args),
        }) => {
            let opened_on = args.opened_on.unwrap_or_else(|| Utc::now().date_naive());
            let account = engine
                .new_account(&args.name, args.opening, opened_on)
                .await?;
            println!(
                "created account: {} ({}, balance {})",
                account.name, account.code, account.balance
            );
        }
        Command::Account(Account {
            command: AccountCommand::List,
        }) => {
            for account in engine.list_accounts().await? {
                println!(
                    "{:>5}  {}  {:<30} {:>14}",
                    account.id, account.code, account.name, account.balance
                );
            }
        }
        Command::Creditor(Creditor {
            command: CreditorCommand::Create(args),
        }) => {
            let kind = CreditorKind::try_from(args.kind.as_str())?;
            let creditor = engine.new_creditor(&args.name, kind).await?;
            println!("created creditor: {} ({})", creditor.name, creditor.code);
        }
        Command::Creditor(Creditor {
            command: CreditorCommand::List,
        }) => {
            for creditor in engine.list_creditors().await? {
                println!(
                    "{:>5}  {}  {:<30} {}",
                    creditor.id,
                    creditor.code,
                    creditor.name,
                    creditor.kind.as_str()
                );
            }
        }
        Command::Audit => {
            let mut inconsistent = 0;
            for audit in engine.audit_ledger().await? {
                let mark = if audit.is_consistent() { "ok" } else { "MISMATCH" };
                if !audit.is_consistent() {
                    inconsistent += 1;
                }
                println!(
                    "{}  balance {:>14}  posted {:>14}  ({} transactions)  {mark}",
                    audit.code, audit.balance, audit.posted_total, audit.transactions
                );
            }
            if inconsistent > 0 {
                return Err(
                    format!("{inconsistent} account(s) do not match their transactions").into(),
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn engine() -> Engine {
        let db = connect_db("sqlite::memory:").await.unwrap();
        Engine::builder().database(db).build().await.unwrap()
    }

    fn parse(args: &[&str]) -> Command {
        let mut argv = vec!["billbook_admin"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[tokio::test]
    async fn account_create_parses_decimal_opening() {
        let engine = engine().await;
        let command = parse(&[
            "account", "create", "--name", "Checking", "--opening", "-12.50",
        ]);

        run(command, &engine).await.unwrap();

        let accounts = engine.list_accounts().await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].balance, MoneyCents::new(-1250));
    }

    #[tokio::test]
    async fn unknown_creditor_kind_is_returned_as_error() {
        let engine = engine().await;
        let command = parse(&["creditor", "create", "--name", "Bank", "--kind", "bank"]);

        let err = run(command, &engine).await.unwrap_err();
        assert!(err.to_string().contains("bank"), "{err}");
        assert!(engine.list_creditors().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn init_creates_the_default_account_once() {
        let engine = engine().await;

        run(parse(&["init"]), &engine).await.unwrap();
        run(parse(&["init", "--default-account", "Other"]), &engine)
            .await
            .unwrap();

        let accounts = engine.list_accounts().await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].name, "Main");
    }
}
