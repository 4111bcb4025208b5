//! CLI entry point.
//!
//! Parses arguments, sets up logging and hands the composed context to the
//! command handlers. The provider is always disposed before exiting so no
//! help server or temp directory outlives the process.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use rhelp_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli);

    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    // Paths only reports discovery; it never needs a provider.
    if matches!(command, Commands::Paths) {
        return handlers::paths::execute(&config.options).await;
    }

    let ctx = bootstrap(config).await?;
    let result = match command {
        Commands::Show {
            package,
            topic,
            output,
        } => handlers::show::execute(&ctx, &package, &topic, output).await,
        Commands::Doc { page, output } => handlers::doc::execute(&ctx, &page, output).await,
        Commands::Path {
            request_path,
            json,
            output,
        } => handlers::path::execute(&ctx, &request_path, json, output).await,
        Commands::Browse { output } => handlers::browse::execute(&ctx, output).await,
        Commands::Paths => Ok(()),
    };

    ctx.shutdown().await;
    result
}

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads RHELP_*
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        eprintln!("Error: {err:#}");
        std::process::exit(code);
    }
}
