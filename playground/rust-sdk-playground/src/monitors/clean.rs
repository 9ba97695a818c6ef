use anyhow::Result;
use tracing::{info, warn};
use trueblocks_sdk::{ApiSdkError, MonitorsOptions, MonitorsResult, SDK};

pub async fn example(sdk: &SDK, chain: &str, addrs: &[String]) -> Result<()> {
    let options = MonitorsOptions {
        clean: Some(true),
        ..MonitorsOptions::new(chain).with_addrs(addrs.iter().cloned())
    };

    match sdk.monitors.get_monitors(&options, None).await {
        Ok(response) => match response.data {
            MonitorsResult::Clean(cleaned) => {
                for entry in cleaned {
                    info!("{} removed {} duplicate(s)", entry.address, entry.dups);
                }
            }
            other => info!("daemon answered with {} other record(s)", other.len()),
        },
        Err(ApiSdkError::TransportError { status, body, message }) => {
            warn!("clean failed ({:?}): {} {}", status, message, body.unwrap_or_default());
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
