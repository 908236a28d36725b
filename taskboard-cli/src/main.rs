use anyhow::Context;
use clap::Parser;

use taskboard_cli::commands::{self, board, cards, init, serve, watch};
use taskboard_cli::{logging, Cli, Commands, Config, Overrides};

/// Flags that feed the config layers
fn overrides(cli: &Cli) -> Overrides {
    let mut overrides = Overrides {
        data_file: cli.data_file.clone(),
        server_url: cli.server_url.clone(),
        local_store_dir: cli.local_store_dir.clone(),
        ..Overrides::default()
    };
    match &cli.command {
        Commands::Serve {
            host,
            port,
            static_dir,
        } => {
            overrides.host = host.clone();
            overrides.port = *port;
            overrides.static_dir = static_dir.clone();
        }
        Commands::Watch { interval } => overrides.poll_interval_secs = *interval,
        _ => {}
    }
    overrides
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { .. } => serve::run(&config).await,
        Commands::Init { columns, samples } => {
            println!("{}", init::run(&config, columns, samples).await?);
            Ok(())
        }
        Commands::Cards { command } => {
            let mut session = commands::open_session(&config).await;
            println!("{}", cards::run(&mut session, command).await?);
            Ok(())
        }
        Commands::Board { json } => {
            let mut session = commands::open_session(&config).await;
            println!("{}", board::run(&mut session, json).await?);
            Ok(())
        }
        Commands::Watch { .. } => {
            let session = commands::open_session(&config).await;
            watch::run(session, config.poll_interval()).await
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref(), &overrides(&cli))
        .context("failed to load configuration")
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    logging::init(cli.debug, cli.quiet, &config.log_level);
    tracing::debug!(?config, "configuration loaded");

    if let Err(e) = run(cli, config).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
