use std::sync::Arc;

use clap::Parser;
use foodlens_api::application::http::server::http_server::{router, state};
use foodlens_api::args::{Args, LogArgs};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logger(args: &LogArgs) {
    let filter = EnvFilter::try_new(&args.filter).unwrap_or_else(|e| {
        eprintln!("invalid log filter {:?}: {e}, falling back to info", args.filter);
        EnvFilter::new("info")
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if args.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logger(&args.log);

    let app_state = state(args.clone()).await?;
    let router = router(app_state)?;

    let addr = format!("{}:{}", args.server.host, args.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "listening on {}{}",
        listener.local_addr()?,
        if args.server.root_path.is_empty() {
            "/".to_string()
        } else {
            args.server.root_path.clone()
        }
    );

    axum::serve(listener, router).await?;
    Ok(())
}
