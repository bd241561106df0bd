//! MicroStellar command line.
//!
//! ```bash
//! microstellar keypair
//! microstellar --network test account GABC...
//! microstellar fund --source-seed S... --address GDEF... --amount 1.5
//! microstellar pay --source-address GABC... --signer S... --to GDEF... --amount 10 --asset USD:GISSUER...
//! ```
//!
//! Without `--network` the network is read from `STELLAR_NETWORK` and the related
//! variables, which may also come from a `.env` file.

use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use eyre::{eyre, Result, WrapErr};
use microstellar::{
    config::NetworkConfig,
    domain::MicroStellar,
    logging::setup_logging,
    models::{Asset, KeyPair, Payment, Seed, SourceAccount},
};

#[derive(Parser, Debug)]
#[command(name = "microstellar")]
#[command(about = "Create accounts and send payments on the Stellar network")]
#[command(version)]
struct Cli {
    /// Network: "public", "test" or "fake"
    #[arg(short, long, global = true)]
    network: Option<NetworkConfig>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new key pair
    Keypair,
    /// Print an account snapshot as JSON
    Account { address: String },
    /// Create and fund a new account
    Fund {
        #[command(flatten)]
        source: SourceArgs,
        /// Address of the account to create
        #[arg(long)]
        address: String,
        /// Starting balance in lumens
        #[arg(long)]
        amount: String,
    },
    /// Send a payment
    Pay {
        #[command(flatten)]
        source: SourceArgs,
        /// Destination address
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: String,
        /// "native" or "CODE:ISSUER"
        #[arg(long, default_value = "native")]
        asset: Asset,
        #[arg(long, conflicts_with = "memo_id")]
        memo_text: Option<String>,
        #[arg(long)]
        memo_id: Option<u64>,
    },
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Seed of the source account; it signs when no --signer is given
    #[arg(long, required_unless_present = "source_address", conflicts_with = "source_address")]
    source_seed: Option<String>,
    /// Address of the source account; requires at least one --signer
    #[arg(long)]
    source_address: Option<String>,
    /// Seed that signs instead of the source (repeatable, order preserved)
    #[arg(long = "signer")]
    signers: Vec<String>,
}

impl SourceArgs {
    fn source(&self) -> Result<SourceAccount> {
        match (&self.source_seed, &self.source_address) {
            (Some(seed), _) => Ok(SourceAccount::seed(seed.as_str())),
            (None, Some(address)) => Ok(SourceAccount::address(address.as_str())),
            (None, None) => Err(eyre!("either --source-seed or --source-address is required")),
        }
    }

    fn signer_seeds(&self) -> Vec<Seed> {
        self.signers.iter().map(|s| Seed::new(s.as_str())).collect()
    }
}

fn print_keypair(pair: &KeyPair) {
    println!("address: {}", pair.address);
    println!("seed:    {}", pair.seed.expose());
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();
    setup_logging().wrap_err("Failed to set up logging")?;

    let cli = Cli::parse();
    let config = match cli.network {
        Some(config) => config,
        None => NetworkConfig::from_env().wrap_err("Invalid network configuration")?,
    };

    let client = MicroStellar::new(config)?;
    match cli.command {
        Command::Keypair => print_keypair(&client.create_keypair()),
        Command::Account { address } => {
            let account = client.load_account(&address).await?;
            println!("{}", serde_json::to_string_pretty(&account)?);
        }
        Command::Fund {
            source,
            address,
            amount,
        } => {
            client
                .fund_account(&source.source()?, &address, &amount, &source.signer_seeds())
                .await?;
            println!("funded {address} with {amount}");
        }
        Command::Pay {
            source,
            to,
            amount,
            asset,
            memo_text,
            memo_id,
        } => {
            let mut payment = Payment::new(source.source()?, &to, &amount).with_asset(asset);
            if let Some(text) = memo_text {
                payment = payment.with_memo_text(text);
            }
            if let Some(id) = memo_id {
                payment = payment.with_memo_id(id);
            }
            for seed in source.signer_seeds() {
                payment = payment.with_signer(seed);
            }
            client.pay(payment).await?;
            println!("paid {amount} to {to}");
        }
    }

    Ok(())
}
