mod opinion;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pov-cli")]
#[command(about = "POV opinion aggregator command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve an opinion for a term and print the result envelope as JSON
    Query {
        /// Entity to look up, e.g. a product or movie title
        term: String,

        /// product, movie, or social-topic (topic aliases such as `game` are accepted)
        #[arg(long, short)]
        category: String,

        /// Pretty-print the JSON envelope
        #[arg(long)]
        pretty: bool,

        /// Print each provider attempt to stderr
        #[arg(long)]
        explain: bool,
    },
    /// Normalize, score, and label a single text
    Classify {
        text: String,
    },
    /// List the configured provider chain
    Providers {
        /// Only show providers serving this category
        #[arg(long, short)]
        category: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pov_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Query {
            term,
            category,
            pretty,
            explain,
        }) => opinion::run_query(&config, &term, &category, pretty, explain).await?,
        Some(Commands::Classify { text }) => opinion::run_classify(&config, &text)?,
        Some(Commands::Providers { category }) => {
            opinion::run_providers(&config, category.as_deref())?;
        }
        None => println!("pov-cli ready; see --help for commands"),
    }

    Ok(())
}
