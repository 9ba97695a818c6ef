use anyhow::Result;
use tracing::info;
use trueblocks_sdk::{MonitorsOptions, SDK};

pub async fn example(sdk: &SDK, chain: &str, addrs: &[String]) -> Result<()> {
    let options = MonitorsOptions::new(chain).with_addrs(addrs.iter().cloned());

    let monitors = sdk.monitors.list(&options).await?;
    info!("{} monitor(s) on {}", monitors.len(), chain);
    for monitor in monitors {
        info!("{} records={} size={}", monitor.address, monitor.n_records, monitor.file_size);
    }

    Ok(())
}
