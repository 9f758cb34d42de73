//! Yo Node - send Yo's across an in-memory mock network

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use yo_mocknet::{MockNetwork, NetworkConfig};

#[derive(Parser)]
#[command(name = "yo-node")]
#[command(about = "Send Yo's across an in-memory mock network")]
struct Cli {
    /// Log at debug level regardless of the configured level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default network configuration
    Init {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Send a Yo and show the recipient's vault
    Send {
        /// Legal name of the sending node
        #[arg(long)]
        from: String,

        /// Legal name of the receiving node
        #[arg(long)]
        to: String,

        /// Payload to send instead of the configured default
        #[arg(long)]
        payload: Option<String>,

        /// Network configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_logging(config: &NetworkConfig, verbose: bool) -> anyhow::Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        config
            .log_level
            .parse::<Level>()
            .map_err(|e| anyhow!("Invalid log level {}: {}", config.log_level, e))?
    };

    tracing_subscriber::fmt().with_max_level(level).init();
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<NetworkConfig> {
    match path {
        Some(path) => NetworkConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(NetworkConfig::default()),
    }
}

fn send(config: NetworkConfig, from: &str, to: &str, payload: Option<&str>) -> anyhow::Result<()> {
    let mut network = MockNetwork::new(config)?;

    let sender = network
        .party(from)
        .ok_or_else(|| anyhow!("No node named {}", from))?;
    let recipient = network
        .party(to)
        .ok_or_else(|| anyhow!("No node named {}", to))?;

    let proposal = match payload {
        Some(payload) => network.start_yo_flow_with_payload(&sender, &recipient, payload)?,
        None => network.start_yo_flow(&sender, &recipient)?,
    };
    network.run_network();

    match network.outcome(proposal) {
        Some(Ok(tx_id)) => {
            println!("Committed transaction {}", tx_id);
        }
        Some(Err(e)) => bail!("Proposal {} rejected: {}", proposal, e),
        None => bail!("Proposal {} was not processed", proposal),
    }

    let node = network
        .node(&recipient)
        .ok_or_else(|| anyhow!("No node named {}", to))?;
    println!("Vault of {} ({} state(s)):", recipient, node.vault().len());
    for entry in node.vault().states() {
        println!("  {} -> {}", entry.reference, entry.state);
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { output } => {
            let config = NetworkConfig::default();
            match output {
                Some(path) => {
                    config.save(&path)?;
                    println!("Wrote default configuration to {}", path.display());
                }
                None => print!("{}", config.to_toml_string()?),
            }
        }
        Commands::Send {
            from,
            to,
            payload,
            config,
        } => {
            let config = load_config(config.as_ref())?;
            init_logging(&config, cli.verbose)?;
            info!("Sending from {} to {}", from, to);
            send(config, &from, &to, payload.as_deref())?;
        }
    }

    Ok(())
}
