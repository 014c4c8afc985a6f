//! Allowlist CLI Application

mod cli;

use allowlist_sdk::commands::{
    SchemaTarget, allowlist_schema, build_allowlist, generate_proof, print_root,
    verify_proofs,
};
use allowlist_sdk::common::TreeConfig;
use clap::Parser as _;
use cli::{Cli, Commands, ConfigCommands, ProofCommands};

fn init_tracing() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize tracing: {:?}", e))?;

    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> eyre::Result<()> {
    // Load .env file (fails silently if not found)
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let cli = Cli::parse();

    let res = match cli.command {
        Commands::Config { command } => match command {
            ConfigCommands::Build { args } => {
                build_allowlist(
                    args.input,
                    TreeConfig {
                        hash_function: args.hash,
                        leaf_order: args.leaf_order,
                    },
                    args.config_out,
                    args.proofs_out,
                    args.tree_out,
                )
                .await
            }
            ConfigCommands::Root { args } => print_root(args.config, args.encoding).await,
            ConfigCommands::Schema { proofs } => allowlist_schema(if proofs {
                SchemaTarget::Proofs
            } else {
                SchemaTarget::Configuration
            }),
        },
        Commands::Proof { command } => match command {
            ProofCommands::Generate { args } => {
                let source = args.source();
                generate_proof(args.address, source, args.config, args.proof_out).await
            }
            ProofCommands::Verify { args } => {
                verify_proofs(args.config, args.proofs, args.address).await
            }
        },
    };

    if let Err(e) = res {
        tracing::error!("Error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
