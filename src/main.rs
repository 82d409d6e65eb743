use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::error;

use rfrenderd::{AppState, FetchEngine, Renderer, RendererConfig};

/// HTTP render-job service: POST {"URL": ...} and get the rendered page
/// back merged into the job payload.
#[derive(Parser, Debug)]
#[command(name = "rfrenderd", version, about)]
struct Args {
    /// Port to listen on
    port: u16,

    /// Deadline for a single page load, in milliseconds
    #[arg(long, default_value_t = 30_000)]
    timeout_ms: u64,

    /// User agent sent with outgoing page requests
    #[arg(long)]
    user_agent: Option<String>,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(args).await {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = RendererConfig {
        timeout_ms: args.timeout_ms,
        ..Default::default()
    };
    if let Some(agent) = args.user_agent {
        config.user_agent = agent;
    }

    let engine = FetchEngine::new(&config).context("failed to initialize the render engine")?;
    let state = AppState {
        renderer: Arc::new(Renderer::new(engine, &config)),
        max_body_bytes: config.max_body_bytes,
    };

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    rfrenderd::serve(listener, state)
        .await
        .context("server error")?;
    Ok(())
}
