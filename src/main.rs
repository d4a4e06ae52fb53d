//! ogoctl - Main entry point

use clap::Parser;
use log::{debug, info};

use ogoctl::cli::{Cli, Command};
use ogoctl::provider::commands::{
    run_apply_command, run_delete_command, run_get_command, run_import_command,
    run_schema_command, ApplyMode,
};
use ogoctl::provider::OgoProvider;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting ogoctl v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Command::Schema(args) = &cli.command {
        return run_schema_command(args);
    }

    let mut provider = OgoProvider::new(env!("CARGO_PKG_VERSION"));
    provider.configure(&cli.credential_inputs())?;
    debug!("Provider {} v{} configured", provider.type_name(), provider.version());

    match &cli.command {
        Command::Get { resource } => run_get_command(&provider, cli, resource).await,
        Command::Create { resource } => {
            run_apply_command(&provider, cli, resource, ApplyMode::Create).await
        }
        Command::Update { resource } => {
            run_apply_command(&provider, cli, resource, ApplyMode::Update).await
        }
        Command::Delete { resource } => run_delete_command(&provider, cli, resource).await,
        Command::Import { resource } => run_import_command(&provider, cli, resource).await,
        Command::Schema(args) => run_schema_command(args),
    }
}
