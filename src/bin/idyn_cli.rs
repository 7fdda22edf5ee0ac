use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use structopt::StructOpt;

use idyn::config::Config;
use idyn::directory::IdentityDirectory;
use idyn::flow::{ConfirmationChoice, LoginFlow, LoginOutcome, LoginProgress, LoginReceipt};
use idyn::ledger::LedgerVerifier;
use idyn::models::{EvidenceDocument, LoginCredentials, ProofStatus, RegistrationProfile};
use idyn::registration::Registrar;
use idyn::scoring::{
    FailingScoringClient, FixedScoringClient, GenAiScoringClient, RiskScoringClient,
};
use idyn::session::MemorySessionStore;
use idyn::telemetry::StaticTelemetry;

/// Decentralized identity demo command line interface
#[derive(StructOpt, Debug)]
#[structopt(name = "idyn", about = "Decentralized identity demo CLI")]
pub enum Cli {
    /// Generate a default configuration file
    Config {
        /// Output path for the configuration file
        #[structopt(short, long, default_value = "config.toml")]
        output: PathBuf,
    },
    /// Log in with a wallet address, running the AI risk check
    Login {
        /// Wallet address or email
        wallet: String,
        /// Path to configuration file
        #[structopt(short, long, default_value = "config.toml")]
        config: PathBuf,
        /// Skip the scoring service and use this fixed fraud risk score,
        /// between 0.0 and 1.0
        #[structopt(long, parse(try_from_str = parse_mock_score))]
        mock_score: Option<f64>,
    },
    /// Register a new decentralized identity
    Register {
        /// Full legal name
        #[structopt(short, long)]
        name: String,
        /// Email address
        #[structopt(short, long)]
        email: String,
        /// Wallet address
        #[structopt(short, long)]
        wallet: String,
        /// Path to the government-issued ID document
        #[structopt(long)]
        id_document: PathBuf,
        /// Path to the selfie image
        #[structopt(long)]
        selfie: PathBuf,
        /// Path to configuration file
        #[structopt(short, long, default_value = "config.toml")]
        config: PathBuf,
    },
    /// Validate the identity proof anchored for a wallet address
    Verify {
        /// Wallet address or token
        wallet: String,
        /// Path to configuration file
        #[structopt(short, long, default_value = "config.toml")]
        config: PathBuf,
    },
    /// Search the identity directory
    Lookup {
        /// Search term; empty lists every identity
        #[structopt(default_value = "")]
        term: String,
        /// Write results as CSV to this path instead of printing them
        #[structopt(long)]
        csv: Option<PathBuf>,
        /// Path to configuration file
        #[structopt(short, long, default_value = "config.toml")]
        config: PathBuf,
    },
    /// Show the verification history recorded for a wallet address
    History {
        /// Wallet address
        wallet: String,
        /// Path to configuration file
        #[structopt(short, long, default_value = "config.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::from_args();

    match cli {
        Cli::Config { output } => {
            let config = Config::default();
            config.to_file(&output)?;
            println!("Default configuration written to: {:?}", output);
        }
        Cli::Login {
            wallet,
            config,
            mock_score,
        } => {
            let config = load_config(&config)?;
            run_login(wallet, config, mock_score).await?;
        }
        Cli::Register {
            name,
            email,
            wallet,
            id_document,
            selfie,
            config,
        } => {
            let config = load_config(&config)?;
            run_register(name, email, wallet, id_document, selfie, config).await?;
        }
        Cli::Verify { wallet, config } => {
            let config = load_config(&config)?;
            let verifier =
                LedgerVerifier::with_lookup_delay(config.simulation.verification_latency());

            println!("Validating identity proof for '{}'...", wallet);
            match verifier.lookup(&wallet).await? {
                ProofStatus::Verified => println!(
                    "Identity Verified: this identity has been successfully verified on the ledger."
                ),
                ProofStatus::Pending => println!(
                    "Verification Pending: this identity is still in the verification process."
                ),
                ProofStatus::Invalid => println!(
                    "Identity Not Found: no valid identity proof is associated with this address."
                ),
            }
        }
        Cli::Lookup { term, csv, config } => {
            let config = load_config(&config)?;
            let directory =
                IdentityDirectory::with_search_delay(config.simulation.search_latency());
            let hits = directory.search(&term).await;

            if let Some(path) = csv {
                let file = std::fs::File::create(&path)?;
                directory.export_csv(&hits, file)?;
                println!("Exported {} record(s) to: {:?}", hits.len(), path);
            } else if hits.is_empty() {
                println!("No identities matched '{}'", term);
            } else {
                println!("Found {} record(s):\n", hits.len());
                for record in hits {
                    println!(
                        "  Name: {}, Wallet: {}, Status: {}",
                        record.name, record.wallet_address, record.status
                    );
                }
            }
        }
        Cli::History { wallet, config } => {
            let config = load_config(&config)?;
            let verifier =
                LedgerVerifier::with_lookup_delay(config.simulation.verification_latency());
            let history = verifier.history(&wallet).await?;

            println!("Verification history for '{}':\n", wallet);
            for event in history {
                println!(
                    "  Date: {}, Verifier: {}, Outcome: {}",
                    event.date, event.verifier, event.outcome
                );
            }
        }
    }

    Ok(())
}

fn load_config(path: &PathBuf) -> Result<Config, Box<dyn std::error::Error>> {
    if path.exists() {
        Config::from_file(path)
    } else {
        log::warn!("Config file not found, using defaults");
        Ok(Config::default())
    }
}

/// Parse --mock-score, holding it to the normalized range a real
/// assessment carries.
fn parse_mock_score(raw: &str) -> Result<f64, String> {
    let score: f64 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if !score.is_finite() || !(0.0..=1.0).contains(&score) {
        return Err(format!("score {} must be between 0.0 and 1.0", score));
    }
    Ok(score)
}

async fn run_login(
    wallet: String,
    config: Config,
    mock_score: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scoring: Arc<dyn RiskScoringClient> = match mock_score {
        Some(score) => Arc::new(FixedScoringClient::new(score, "fixed demo score")),
        None => match GenAiScoringClient::from_config(&config.scoring) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                log::warn!(
                    "Scoring client not configured ({}), evaluation will be skipped",
                    e
                );
                Arc::new(FailingScoringClient)
            }
        },
    };

    let session = Arc::new(MemorySessionStore::new());
    let flow = LoginFlow::with_timing(
        scoring,
        session,
        Arc::new(StaticTelemetry::default()),
        config.scoring.timeout(),
        config.simulation.login_latency(),
    );

    println!("Signing in '{}'...", wallet);
    match flow.submit(LoginCredentials::new(wallet)).await? {
        LoginProgress::LoggedIn(receipt) => print_receipt(&receipt),
        LoginProgress::ConfirmationRequired(pending) => {
            let assessment = pending.assessment();
            println!("\nUnusual Login Attempt");
            println!(
                "Our AI system has flagged this login as potentially suspicious (score {:.2}).",
                assessment.fraud_risk_score
            );
            println!("Recommendation: {}", assessment.recommendation);
            println!("Please verify that this is you.");
            print!("Proceed anyway? [y/N] ");
            io::stdout().flush()?;

            let mut answer = String::new();
            io::stdin().lock().read_line(&mut answer)?;
            let choice = if answer.trim().eq_ignore_ascii_case("y") {
                ConfirmationChoice::ProceedAnyway
            } else {
                ConfirmationChoice::Cancel
            };

            match flow.resolve(pending, choice).await? {
                LoginOutcome::Completed(receipt) => print_receipt(&receipt),
                LoginOutcome::Cancelled => println!("Login cancelled."),
            }
        }
    }

    Ok(())
}

async fn run_register(
    name: String,
    email: String,
    wallet: String,
    id_document: PathBuf,
    selfie: PathBuf,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let id_document = load_evidence(&id_document)?;
    let selfie = load_evidence(&selfie)?;

    let session = Arc::new(MemorySessionStore::new());
    let registrar =
        Registrar::with_anchoring_delay(session, config.simulation.registration_latency());

    println!("Securing identity: hashing data and generating proof on the ledger...");
    let record = registrar
        .register(RegistrationProfile {
            full_name: name,
            email,
            wallet_address: wallet,
            id_document,
            selfie,
        })
        .await?;

    println!("Registration successful. Your decentralized identity has been created.");
    println!("  Name:   {}", record.name);
    println!("  Wallet: {}", record.wallet_address);
    println!("  Proof:  {}", record.hashed_proof);
    println!("  Status: {}", record.status);

    Ok(())
}

fn load_evidence(path: &Path) -> Result<EvidenceDocument, Box<dyn std::error::Error>> {
    let content = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document")
        .to_string();
    Ok(EvidenceDocument::new(file_name, content))
}

fn print_receipt(receipt: &LoginReceipt) {
    println!("Logged in as '{}' ({})", receipt.user.name, receipt.user.wallet);
    match &receipt.assessment {
        Some(assessment) => println!(
            "  Fraud risk score: {:.2}, recommendation: {}",
            assessment.fraud_risk_score, assessment.recommendation
        ),
        None => println!("  Risk evaluation was unavailable for this login"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_score_accepts_normalized_values() {
        assert_eq!(parse_mock_score("0.0").unwrap(), 0.0);
        assert_eq!(parse_mock_score("0.7").unwrap(), 0.7);
        assert_eq!(parse_mock_score("1.0").unwrap(), 1.0);
    }

    #[test]
    fn test_mock_score_rejects_non_normalized_values() {
        for raw in ["7.3", "-0.1", "NaN", "inf", "not-a-number"] {
            assert!(parse_mock_score(raw).is_err(), "{}", raw);
        }
    }
}
