//! Movies Server binary
//!
//! Binds the HTTP listener (all interfaces, port 8080 unless configured)
//! and serves the movie listing API.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
