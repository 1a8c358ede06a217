use crate::{
    env::EnvManager,
    error::CliError,
    output::{default_export_name, emit, render, render_table},
    shutdown::{ExitCode, ShutdownCoordinator},
};
use clap::Parser;
use commands::Commands;
use connectors::adapter::DataFormat;
use reports::{
    catalog::definitions,
    config::{ReportsConfig, parse_timeout},
    filter::FilterSpec,
    service::ReportService,
};
use std::{future::Future, path::PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod conn;
mod env;
mod error;
mod output;
mod shutdown;

/// Reports shown by `dashboard`, in display order.
const DASHBOARD_REPORTS: [&str; 4] = [
    definitions::TOP_CITIES_BY_PROVIDERS,
    definitions::CLAIMS_BY_STATUS,
    definitions::TOP_PROVIDERS_BY_QUANTITY,
    definitions::TOTAL_CLAIMS_PER_PROVIDER,
];

#[derive(Parser)]
#[command(
    name = "food-connect",
    version = "0.1.0",
    about = "Food donation reports"
)]
struct Cli {
    #[arg(long, global = true, help = "Env file to load (default: ~/.food-connect/.env)")]
    env_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Database format (mysql, postgres, sqlite); inferred from the URL when omitted"
    )]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout only carries report data
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let shutdown = ShutdownCoordinator::new(CancellationToken::new());
    shutdown.register_handlers();

    let code = match run(cli, &shutdown).await {
        Ok(()) => ExitCode::Success,
        Err(CliError::ShutdownRequested) => {
            info!("Interrupted");
            ExitCode::ShutdownRequested
        }
        Err(err) if shutdown.is_shutdown_requested() => {
            info!("Interrupted: {err}");
            ExitCode::ShutdownRequested
        }
        Err(err) => {
            error!("{err}");
            ExitCode::GeneralError
        }
    };

    std::process::exit(code.as_i32());
}

async fn run(cli: Cli, shutdown: &ShutdownCoordinator) -> Result<(), CliError> {
    let mut env = EnvManager::new();
    env.load(cli.env_file.as_deref())?;

    let format = cli
        .format
        .as_deref()
        .map(str::parse::<DataFormat>)
        .transpose()?;

    match cli.command {
        Commands::List => {
            let catalog = reports::catalog::ReportCatalog::global()?;
            for name in catalog.list_query_names() {
                println!("{name}");
            }
        }
        Commands::Run {
            report,
            filters,
            output_format,
            output,
            timeout,
        } => {
            let service = build_service(&env, format, timeout)?;
            let spec = FilterSpec::from_pairs(&filters)?;
            let table = cancellable(shutdown, service.run_query(&report, &spec)).await??;
            let content = render(&service, &table, output_format)?;
            emit(&content, output.as_deref()).await?;
        }
        Commands::Export {
            report,
            filters,
            output,
            timeout,
        } => {
            let service = build_service(&env, format, timeout)?;
            let spec = FilterSpec::from_pairs(&filters)?;
            let table = cancellable(shutdown, service.run_query(&report, &spec)).await??;

            let path = output.unwrap_or_else(|| PathBuf::from(default_export_name(&report)));
            tokio::fs::write(&path, service.export_csv(&table)?).await?;
            info!(
                "Exported {} rows of '{}' to {}",
                table.row_count(),
                report,
                path.display()
            );
        }
        Commands::Filters { key } => match key {
            Some(key) => {
                let service = build_service(&env, format, None)?;
                for option in cancellable(shutdown, service.filter_options(&key)).await?? {
                    println!("{option}");
                }
            }
            None => {
                for key in reports::filter::keys::keys() {
                    println!("{key}");
                }
            }
        },
        Commands::Dashboard => {
            let service = build_service(&env, format, None)?;
            for name in DASHBOARD_REPORTS {
                let table =
                    cancellable(shutdown, service.run_query(name, &FilterSpec::new())).await??;
                println!("== {name} ==");
                println!("{}", render_table(&table));
                println!();
            }
        }
        Commands::TestConn => {
            let config = ReportsConfig::from_vars(env.all(), format)?;
            cancellable(shutdown, conn::test_connection(&config)).await??;
        }
    }

    Ok(())
}

fn build_service(
    env: &EnvManager,
    format: Option<DataFormat>,
    timeout: Option<u64>,
) -> Result<ReportService, CliError> {
    let config = ReportsConfig::from_vars(env.all(), format)?;
    let timeout = match timeout {
        Some(secs) => Some(parse_timeout("--timeout", &secs.to_string())?),
        None => config.query_timeout,
    };
    info!("Using {:?}", config);

    Ok(ReportService::with_default_catalog(config.connector()?)?.with_timeout(timeout))
}

/// Races `work` against Ctrl+C. Dropping the losing future releases its
/// connection.
async fn cancellable<T>(
    shutdown: &ShutdownCoordinator,
    work: impl Future<Output = T>,
) -> Result<T, CliError> {
    let token = shutdown.cancel_token();
    tokio::select! {
        result = work => Ok(result),
        _ = token.cancelled() => Err(CliError::ShutdownRequested),
    }
}
