use clap::Parser;
use portfolio_client::cli::Cli;
use portfolio_client::error::ClientError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    // Command output owns stdout; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = portfolio_client::cli::run(cli).await {
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e}"),
        }
        if e
            .downcast_ref::<ClientError>()
            .map(ClientError::is_auth_failure)
            .unwrap_or(false)
        {
            eprintln!("Login with 'folio auth login <username>' and retry");
        }
        std::process::exit(1);
    }

    Ok(())
}
