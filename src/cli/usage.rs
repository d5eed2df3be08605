use clap::Parser;

use crate::{
    cli::{DbArgs, DeviceArgs},
    prelude::*,
    tables,
};

#[derive(Parser)]
pub struct UsageArgs {
    #[clap(flatten)]
    device: DeviceArgs,

    #[clap(flatten)]
    db: DbArgs,

    /// Trailing window, in days.
    #[clap(long, default_value_t = 31)]
    days: u16,
}

impl UsageArgs {
    pub async fn run(self) -> Result {
        let summaries = self
            .db
            .connect()
            .await?
            .summaries()
            .trailing(&self.device.device_id, self.days)
            .await?;
        if summaries.is_empty() {
            info!(days = self.days, "no summaries in range");
            return Ok(());
        }
        println!("{}", tables::usage_table(&summaries));
        Ok(())
    }
}
