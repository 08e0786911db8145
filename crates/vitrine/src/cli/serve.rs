//! The `vitrine serve` command.

use clap::Args;
use vitrine_core::{Config, Vitrine};

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Interface to bind (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Execute the serve command.
pub async fn execute(mut config: Config, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let vitrine = Vitrine::new(config)?;
    crate::server::start_server(vitrine.config().clone(), vitrine.gallery()).await
}
