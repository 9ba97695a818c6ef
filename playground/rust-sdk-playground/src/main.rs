mod monitors;

use std::path::Path;

use anyhow::Result;
use trueblocks_core::{load_env_from_project_path, setup_info_logger};
use trueblocks_sdk::SDK;

/// Usage: `playground <chain> [address...]`
///
/// Talks to the daemon at `TB_API_URL` (default `http://localhost:8080`).
#[tokio::main]
async fn main() -> Result<()> {
    load_env_from_project_path(Path::new(env!("CARGO_MANIFEST_DIR")));
    setup_info_logger();

    let mut args = std::env::args().skip(1);
    let chain = args.next().unwrap_or_else(|| "mainnet".to_string());
    let addrs: Vec<String> = args.collect();

    let sdk = SDK::from_env()?;

    monitors::list::example(&sdk, &chain, &addrs).await?;
    if !addrs.is_empty() {
        monitors::clean::example(&sdk, &chain, &addrs).await?;
    }

    Ok(())
}
