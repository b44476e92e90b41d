use anyhow::Context;
use approach_bot::{app, config::BotConfig, logging};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "approach-bot")]
#[command(about = "Telegram bot for browsing interview questions by topic")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot and its liveness endpoint
    Serve {
        /// Import this CSV file before serving
        #[arg(long, value_name = "CSV")]
        import: Option<PathBuf>,
    },
    /// Load a CSV file into the catalog and exit
    Import {
        /// CSV file with Topic, Question, Approach and Intuition columns
        file: PathBuf,
    },
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = BotConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging.level, cli.verbose)?;

    match cli.command {
        Commands::Serve { import } => app::serve(config, import.as_deref()).await,
        Commands::Import { file } => {
            let report = app::import_catalog(&config, &file).await?;
            info!(
                "Imported {} questions in {} new topics ({} duplicates, {} malformed, {} failed)",
                report.questions_inserted,
                report.topics_inserted,
                report.duplicates_skipped,
                report.malformed.len(),
                report.failed.len()
            );
            Ok(())
        }
    }
}
