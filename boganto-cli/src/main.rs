//! # boganto CLI
//!
//! Command-line interface for the Boganto blog content pipeline.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "boganto")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (defaults to ./boganto.yml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the table of contents of an HTML document
    Toc {
        /// HTML file, or "-" for stdin
        input: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Suffix repeated heading ids with -1, -2, ...
        #[arg(long)]
        unique_ids: bool,
    },

    /// Inject anchor ids into the headings of an HTML document
    Annotate {
        /// HTML file, or "-" for stdin
        input: PathBuf,

        /// Suffix repeated heading ids with -1, -2, ...
        #[arg(long)]
        unique_ids: bool,
    },

    /// Estimate the reading time of an HTML document
    ReadTime {
        /// HTML file, or "-" for stdin
        input: PathBuf,

        /// Reading speed (defaults to the configured value)
        #[arg(long)]
        wpm: Option<u32>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Fetch a post and render its detail page
    Article {
        /// Post slug
        slug: String,

        /// Read posts from `{slug}.json` files in this directory
        #[arg(long)]
        from: Option<PathBuf>,

        /// Blog API origin (defaults to the configured value)
        #[arg(long, env = "BOGANTO_API_URL")]
        api: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = ArticleFormat::Html)]
        format: ArticleFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suffix repeated heading ids with -1, -2, ...
        #[arg(long)]
        unique_ids: bool,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ArticleFormat {
    Html,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Toc {
            input,
            json,
            unique_ids,
        } => {
            config.headings.unique_ids |= unique_ids;
            commands::print_toc(&config, &input, json)
        }
        Commands::Annotate { input, unique_ids } => {
            config.headings.unique_ids |= unique_ids;
            commands::print_annotated(&config, &input)
        }
        Commands::ReadTime { input, wpm, json } => {
            commands::print_read_time(&config, &input, wpm, json)
        }
        Commands::Article {
            slug,
            from,
            api,
            format,
            output,
            unique_ids,
        } => {
            config.headings.unique_ids |= unique_ids;
            let opts = commands::ArticleOptions {
                from,
                api,
                format,
                output,
            };
            commands::render_article(&config, &slug, opts).await
        }
    }
}
