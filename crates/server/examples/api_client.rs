//! Examples for using the Movies Server API
//!
//! Start the server first (`cargo run -p movies-server`), then run
//! `cargo run -p movies-server --example api_client`.

use reqwest::Client;
use serde_json::Value;

const SERVER_URL: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();

    // Example 1: Health check
    println!("1. Health Check:");
    let resp = client.get(format!("{SERVER_URL}/health")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 2: Readiness (loads the dataset)
    println!("2. Readiness:");
    let resp = client.get(format!("{SERVER_URL}/ready")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    // Example 3: All movies, most recent first
    println!("3. All Movies:");
    let movies: Vec<Value> = client
        .get(format!("{SERVER_URL}/movies"))
        .send()
        .await?
        .json()
        .await?;
    println!("Returned {} movies", movies.len());
    for movie in movies.iter().take(5) {
        println!("  {movie}");
    }
    println!();

    // Example 4: Title search
    println!("4. Movies matching \"star\":");
    let movies: Vec<Value> = client
        .get(format!("{SERVER_URL}/movies"))
        .query(&[("q", "star")])
        .send()
        .await?
        .json()
        .await?;
    for movie in &movies {
        println!("  {movie}");
    }

    Ok(())
}
