use crate::{env::EnvManager, error::CliError};
use clap::Parser;
use commands::Commands;
use engine_core::{EngineSettings, MapperStore, QueryResolver};
use std::path::PathBuf;
use tracing::{Level, info};

mod commands;
mod env;
mod error;
mod output;
mod params;

#[derive(Parser)]
#[command(name = "quarry", version = "0.1.0", about = "Dynamic SQL template renderer")]
struct Cli {
    #[arg(long, global = true, help = "Load environment variables from this .env file")]
    env_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut env = EnvManager::from_process();
    if let Some(path) = &cli.env_file {
        env.load_from_file(path)?;
    }

    let store = open_store(&cli.command, &env);

    match cli.command {
        Commands::Render {
            query,
            params: pairs,
            params_file,
            json,
            ..
        } => {
            let params = params::collect(&pairs, params_file.as_deref())?;
            let rendered = QueryResolver::new(&store).render_statement(&query, &params)?;

            if json {
                output::print_json(&rendered)?;
            } else {
                println!("{}", rendered.sql);
            }
        }
        Commands::List { file, .. } => {
            let document = QueryResolver::new(&store).document(&file)?;
            output::print_statements(&document);
        }
        Commands::Check { json, .. } => {
            let reports = output::check_files(&store)?;

            if json {
                output::print_json(&reports)?;
            } else {
                output::print_check_table(&reports);
            }

            let failed = reports.iter().filter(|r| !r.is_ok()).count();
            if failed > 0 {
                return Err(CliError::CheckFailed(failed));
            }
            info!(files = reports.len(), "All mapper files passed");
        }
        Commands::Ast { file, .. } => {
            let document = QueryResolver::new(&store).document(&file)?;
            output::print_json(&document)?;
        }
    }

    Ok(())
}

/// `--maps` wins over the (possibly .env extended) environment.
fn open_store(command: &Commands, env: &EnvManager) -> MapperStore {
    let explicit = match command.maps() {
        Some(path) => EngineSettings::default().with_map_path(path.clone()),
        None => EngineSettings::default(),
    };

    MapperStore::from_settings(&explicit.or(env.settings()))
}
