use anyhow::{Context, Result};
use clap::Parser;
use profile_pdf::config::DEFAULT_DATE_FORMAT;
use profile_pdf::RenderConfig;
use profile_pdf_api::{app_with_state, AppState};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    name = "profile-pdf-api",
    about = "Serve the profile form, preview and PDF downloads",
    version
)]
struct ServerArgs {
    /// Address to listen on
    #[arg(long, env = "PROFILE_PDF_ADDR", default_value = "0.0.0.0:3000")]
    addr: SocketAddr,

    /// strftime pattern for the "Generated on" line
    #[arg(long, env = "PROFILE_PDF_DATE_FORMAT", default_value = DEFAULT_DATE_FORMAT)]
    date_format: String,

    /// Value written as the document creator
    #[arg(long, env = "PROFILE_PDF_CREATOR", default_value = "profile-pdf")]
    creator: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "profile_pdf=info,profile_pdf_api=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = ServerArgs::parse();

    let config = RenderConfig {
        date_format: args.date_format,
        creator: args.creator,
        ..RenderConfig::default()
    };
    config.check()?;

    let app = app_with_state(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("Failed to bind {}", args.addr))?;

    info!("profile-pdf API listening on http://{}", args.addr);

    axum::serve(listener, app).await?;
    Ok(())
}
