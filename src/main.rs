use anyhow::{Context, Result};
use clap::{ArgAction, Parser, builder::BoolishValueParser};
use escrow_client::{
    Config, EscrowClient,
    probe::{self, ProbeOptions},
    status::classify_value,
};

/// escrow-client - Escrow.com API client and probe
///
/// Credentials come from flags or the ESCROW_EMAIL / ESCROW_API_KEY
/// environment variables. Requests go to the sandbox unless
/// ESCROW_SANDBOX=false (or --sandbox false) is given.
///
/// Examples:
///   escrow-client probe            # Run the read-only smoke test
///   escrow-client show 29292       # Print a transaction and its status
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Account email (also via ESCROW_EMAIL)
    #[arg(long, env = "ESCROW_EMAIL", value_name = "EMAIL", global = true)]
    email: Option<String>,

    /// Account API key (also via ESCROW_API_KEY)
    #[arg(
        long = "api-key",
        env = "ESCROW_API_KEY",
        value_name = "KEY",
        hide_env_values = true,
        global = true
    )]
    api_key: Option<String>,

    /// Use the sandbox host (also via ESCROW_SANDBOX)
    #[arg(
        long,
        env = "ESCROW_SANDBOX",
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    sandbox: bool,

    /// Override the API host, e.g. a local mock server
    #[arg(long = "api-url", env = "ESCROW_API_URL", value_name = "URL", global = true)]
    api_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the probe sequence against the configured account
    Probe(ProbeArgs),

    /// Show the authenticated customer
    Me,

    /// Show a transaction and its derived status
    Show(ShowArgs),

    /// Cancel a transaction
    Cancel(CancelArgs),
}

#[derive(clap::Args, Debug)]
struct ProbeArgs {
    /// Buyer email for the write probes (also via ESCROW_TEST_BUYER_EMAIL)
    #[arg(long, env = "ESCROW_TEST_BUYER_EMAIL", value_name = "EMAIL")]
    buyer: Option<String>,

    /// Seller email for the write probes (also via ESCROW_TEST_SELLER_EMAIL)
    #[arg(long, env = "ESCROW_TEST_SELLER_EMAIL", value_name = "EMAIL")]
    seller: Option<String>,
}

#[derive(clap::Args, Debug)]
struct ShowArgs {
    #[arg(value_name = "TRANSACTION_ID")]
    id: String,
}

#[derive(clap::Args, Debug)]
struct CancelArgs {
    #[arg(value_name = "TRANSACTION_ID")]
    id: String,

    /// Reason recorded with the cancellation
    #[arg(long, default_value = "Cancelled via escrow-client")]
    reason: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = Config::from_parts(cli.email, cli.api_key, cli.sandbox, cli.api_url)
        .context("Failed to initialize Escrow client")?;
    let client = EscrowClient::new(&config).context("Failed to initialize Escrow client")?;

    match cli.command {
        Commands::Probe(args) => {
            println!(
                "Probing {} as {}",
                config.host(),
                config.credentials.email()
            );
            let options = ProbeOptions {
                buyer: args.buyer,
                seller: args.seller,
            };
            probe::run(&client, &options).await;
        }
        Commands::Me => {
            let me = client.customer.me().await?;
            println!("{}", serde_json::to_string_pretty(&me)?);
        }
        Commands::Show(args) => {
            let transaction = client.transaction.get(&args.id).await?;
            println!("{}", serde_json::to_string_pretty(&transaction)?);
            println!("Status: {}", classify_value(&transaction)?);
        }
        Commands::Cancel(args) => {
            client.cancel(&args.id, &args.reason).await?;
            println!("Cancelled transaction {}", args.id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_probe_parsing() {
        let cli = Cli::try_parse_from([
            "escrow-client",
            "probe",
            "--buyer",
            "b@x.com",
            "--seller",
            "s@x.com",
        ])
        .unwrap();
        match cli.command {
            Commands::Probe(args) => {
                assert_eq!(args.buyer.as_deref(), Some("b@x.com"));
                assert_eq!(args.seller.as_deref(), Some("s@x.com"));
            }
            _ => panic!("Expected Probe command"),
        }
    }

    #[test]
    fn test_cli_global_credentials() {
        let cli = Cli::try_parse_from([
            "escrow-client",
            "--email",
            "me@example.com",
            "--api-key",
            "k",
            "me",
        ])
        .unwrap();
        assert_eq!(cli.email.as_deref(), Some("me@example.com"));
        assert_eq!(cli.api_key.as_deref(), Some("k"));
        assert!(matches!(cli.command, Commands::Me));
    }

    #[test]
    fn test_cli_sandbox_flag() {
        let cli = Cli::try_parse_from(["escrow-client", "me", "--sandbox", "false"]).unwrap();
        assert!(!cli.sandbox);

        let cli = Cli::try_parse_from(["escrow-client", "me", "--sandbox", "no"]).unwrap();
        assert!(!cli.sandbox);
    }

    #[test]
    fn test_cli_show_parsing() {
        let cli = Cli::try_parse_from(["escrow-client", "show", "29292"]).unwrap();
        match cli.command {
            Commands::Show(args) => assert_eq!(args.id, "29292"),
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_cli_cancel_default_reason() {
        let cli = Cli::try_parse_from(["escrow-client", "cancel", "7"]).unwrap();
        match cli.command {
            Commands::Cancel(args) => {
                assert_eq!(args.id, "7");
                assert_eq!(args.reason, "Cancelled via escrow-client");
            }
            _ => panic!("Expected Cancel command"),
        }
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        assert!(Cli::try_parse_from(["escrow-client"]).is_err());
    }
}
