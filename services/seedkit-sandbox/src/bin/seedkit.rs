use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use seedkit_database::MongoDbEnv;
use seedkit_sandbox::connect_from_env;
use seedkit_seeder::SeedRequest;

#[derive(Parser)]
#[command(name = "seedkit", about = "Clear and seed MongoDB collections for development")]
struct Cli {
    /// Extra collection names to register, comma separated
    #[arg(long, global = true, default_value = "")]
    collections: String,

    /// Default log level, RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Delete every document in the named collections
    Clear {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Insert the documents of a JSON seed file
    Populate { file: PathBuf },
    /// Clear the collections a seed file names, then insert its documents
    Reset { file: PathBuf },
    /// Print the registered collection names
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    seedkit_common::setup_tracing(&cli.log_level)?;

    let seeder = connect_from_env(&MongoDbEnv::parse_collections(&cli.collections)).await?;

    let result = match cli.command {
        Command::Clear { names } => seeder.clear(names).await,
        Command::Populate { file } => match SeedRequest::from_json_file(&file) {
            Ok(request) => {
                tracing::info!(entries = request.len(), documents = request.document_count(), "Seeding from {}", file.display());
                seeder.populate(request).await
            }
            Err(e) => Err(e),
        },
        Command::Reset { file } => match SeedRequest::from_json_file(&file) {
            Ok(request) => seeder.reset(request).await,
            Err(e) => Err(e),
        },
        Command::List => {
            for name in seeder.registered_names() {
                println!("{}", name);
            }
            Ok(())
        }
    };

    seeder.disconnect().await;
    result?;
    tracing::info!("Done");
    Ok(())
}
