//! Lists the nodes known to a Headscale server.
//!
//! ```sh
//! HEADSCALE_URL=https://headscale.example.com \
//! HEADSCALE_API_KEY=... \
//! cargo run --example list_nodes
//! ```

use headscale_client::{ClientOptions, HeadscaleClient, SecretString};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "headscale_client=debug".into()),
        )
        .init();

    let base_url = std::env::var("HEADSCALE_URL")?;
    let api_key = SecretString::from(std::env::var("HEADSCALE_API_KEY")?);

    let client = HeadscaleClient::new(&base_url, api_key, ClientOptions::default())?;

    let nodes = client.nodes().list(Default::default()).await?;
    for node in &nodes.nodes {
        println!(
            "{:>4}  {:<24} user={:<12} online={} exit={}",
            node.id,
            node.given_name,
            node.user.name,
            node.online,
            node.is_exit_node(),
        );
    }

    if nodes.nodes.is_empty() {
        println!("no nodes registered");
    }

    Ok(())
}
