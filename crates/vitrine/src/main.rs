//! Vitrine CLI - image gallery with LLM-generated titles and descriptions.
//!
//! Uploaded JPEGs go to an object store bucket; each one is annotated by a
//! multimodal LLM and the annotation is stored as a JSON sidecar.
//!
//! # Usage
//!
//! ```bash
//! # Run the web gallery
//! BUCKET_NAME=my-bucket GEMINI_API=... vitrine serve
//!
//! # Upload and annotate from the command line
//! vitrine upload ./cat.jpg
//!
//! # Try the model on a file without storing anything
//! vitrine annotate ./cat.jpg
//!
//! # View configuration
//! vitrine config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;
mod server;

/// Vitrine - image gallery with LLM-generated annotations.
#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Path to the config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "VITRINE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the web gallery
    Serve(cli::serve::ServeArgs),

    /// List images in the bucket
    List,

    /// Upload an image and annotate it
    Upload(cli::gallery::UploadArgs),

    /// Print the stored annotation of an image
    Show {
        /// Object name of the image
        name: String,
    },

    /// Annotate a local image without storing anything
    Annotate(cli::gallery::AnnotateArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = cli::load_config(cli.config.as_deref())?;
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Vitrine v{}", vitrine_core::VERSION);

    match cli.command {
        Commands::Serve(args) => cli::serve::execute(config, args).await,
        Commands::List => cli::gallery::list(config).await,
        Commands::Upload(args) => cli::gallery::upload(config, args).await,
        Commands::Show { name } => cli::gallery::show(config, &name).await,
        Commands::Annotate(args) => cli::gallery::annotate(config, args).await,
        Commands::Config(args) => cli::config::execute(args, cli.config.as_deref()).await,
    }
}
