//! CertiChain client CLI.
//!
//! Presentation layer over the session core: drains status notices to
//! stdout and maps subcommands onto the library's operations.
//!
//! ```text
//! subcommand ──> session manager ──> network guard ──> wallet provider
//!                     │                                     │
//!                     ├──> capability resolver ──┐          │
//!                     │                          ▼          ▼
//!                     └──> tx orchestrator ──> ledger contract (RPC)
//!                                   │
//!              notices (mpsc) <─────┘
//! ```
//!
//! Signing uses a local private key from `CERTICHAIN_PRIVATE_KEY`; read-only
//! subcommands (`verify`, `dashboard`) need no key at all.

use std::path::PathBuf;

use alloy::primitives::U256;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use certichain_client::config::{loader, ClientConfig};
use certichain_client::error::ClientError;
use certichain_client::ledger::{dashboard, LedgerContract, VerificationReader};
use certichain_client::notify::{self, NoticeSender};
use certichain_client::session::{FileStore, SessionManager};
use certichain_client::tx::{Operation, TransactionOrchestrator};
use certichain_client::wallet::LocalWallet;

#[derive(Parser)]
#[command(name = "certichain-client", version, about = "CertiChain wallet session client")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Connect the wallet and print the session status.
    Session,
    /// Issue a certificate (requires admin privilege on the ledger).
    Issue {
        /// Student address (hex).
        #[arg(long)]
        student: String,
        /// Certificate identifier.
        #[arg(long)]
        id: String,
        /// Issuing institution label.
        #[arg(long)]
        institution: String,
    },
    /// Request issuance of a certificate.
    Request {
        /// Certificate identifier.
        #[arg(long)]
        id: String,
    },
    /// Verify a certificate identifier. Works without a wallet.
    Verify {
        /// Certificate identifier.
        id: String,
    },
    /// Print the certificate count and current fees.
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "certichain_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => loader::load_config(path)?,
        None => ClientConfig::default(),
    };

    tracing::info!(
        contract = %config.contract_address,
        chain_id = config.chain.chain_id,
        rpc_url = %config.chain.rpc_url,
        "Configuration loaded"
    );

    let (notices, mut notice_rx) = notify::channel();
    let printer = tokio::spawn(async move {
        while let Some(notice) = notice_rx.recv().await {
            println!("[{}] {}", notice.level, notice.text);
        }
    });

    let result = run(cli.command, &config, notices).await;
    let _ = printer.await;
    result
}

async fn run(
    command: Command,
    config: &ClientConfig,
    notices: NoticeSender,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Verify { id } => {
            let reader = VerificationReader::new(|| LedgerContract::from_config(config));
            let result = reader.verify(None, &id).await?;

            if result.exists {
                println!("Valid certificate");
                println!("  Student:       {}", result.student);
                println!("  Institution:   {}", result.institution);
                println!("  Issued (unix): {}", result.issued_at);
            } else {
                println!("Certificate not found");
            }
            Ok(())
        }

        Command::Dashboard => {
            let ledger = LedgerContract::from_config(config)?;
            let figures = dashboard::load_dashboard(&ledger).await?;

            println!("Certificates issued: {}", figures.certificate_count);
            println!("Issue fee:           {} ETH", format_ether(figures.issue_fee));
            println!("Request fee:         {} ETH", format_ether(figures.request_fee));
            Ok(())
        }

        Command::Session => {
            let (manager, _, _) = establish_session(config, notices).await?;
            let session = manager.session();

            // connect() guarantees an account while Connected
            if let Some(account) = session.account() {
                println!("Account: {}", short_address(&account.to_string()));
            }
            println!("Admin:   {}", session.is_admin());
            if let Some(figures) = manager.dashboard() {
                println!("Certificates issued: {}", figures.certificate_count);
            }
            Ok(())
        }

        Command::Issue { student, id, institution } => {
            let (manager, wallet, ledger) = establish_session(config, notices.clone()).await?;
            let orchestrator = TransactionOrchestrator::new(wallet, ledger, notices);
            orchestrator
                .submit(
                    manager.session(),
                    Operation::IssueCertificate {
                        student,
                        certificate_id: id,
                        institution,
                    },
                )
                .await?;
            Ok(())
        }

        Command::Request { id } => {
            let (manager, wallet, ledger) = establish_session(config, notices.clone()).await?;
            let orchestrator = TransactionOrchestrator::new(wallet, ledger, notices);
            orchestrator
                .submit(manager.session(), Operation::RequestCertificate { certificate_id: id })
                .await?;
            Ok(())
        }
    }
}

type CliSessionManager = SessionManager<LocalWallet, LedgerContract, FileStore>;

/// Build the session components and connect, restoring silently first.
async fn establish_session(
    config: &ClientConfig,
    notices: NoticeSender,
) -> Result<(CliSessionManager, LocalWallet, LedgerContract), Box<dyn std::error::Error>> {
    let wallet = match LocalWallet::from_env(config) {
        Ok(wallet) => Some(wallet),
        Err(e) => {
            tracing::warn!(error = %e, "No local signer available");
            None
        }
    };
    let ledger = LedgerContract::from_config(config)?;
    let store = FileStore::new(&config.persist_path);

    let mut manager = SessionManager::new(
        wallet.clone(),
        ledger.clone(),
        store,
        config.chain.clone(),
        notices,
    );

    manager.restore_if_requested().await;
    if !manager.session().is_connected() {
        manager.connect().await?;
    }

    let wallet = wallet.ok_or(ClientError::NoWalletProvider)?;
    Ok((manager, wallet, ledger))
}

/// Shortened `0x1234…cdef` display form.
fn short_address(address: &str) -> String {
    if address.len() < 10 {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

/// Render a wei amount as a decimal ether string.
fn format_ether(wei: U256) -> String {
    let divisor = U256::from(WEI_PER_ETH);
    let whole = wei / divisor;
    let frac: u128 = (wei % divisor).to::<u128>();

    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:018}", frac);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
