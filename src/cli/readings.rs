use chrono::DateTime;
use clap::Parser;

use crate::{
    cli::{DbArgs, DeviceArgs, RangeArgs},
    prelude::*,
    query::{Readings, ReadingsQuery},
};

#[derive(Parser)]
pub struct ReadingsArgs {
    #[clap(flatten)]
    device: DeviceArgs,

    #[clap(flatten)]
    db: DbArgs,

    /// Live-tail cursor, unix seconds (exclusive); otherwise a window.
    #[clap(long, conflicts_with_all = ["yesterday", "start", "end"])]
    since: Option<i64>,

    #[clap(flatten)]
    range: RangeArgs,
}

impl ReadingsArgs {
    pub async fn run(self) -> Result {
        let query = match self.since {
            Some(cursor) => ReadingsQuery::Since(
                DateTime::from_timestamp(cursor, 0).context("cursor is out of range")?,
            ),
            None => ReadingsQuery::Range(self.range.resolve()?),
        };
        let samples = Readings::new(self.db.connect().await?, self.device.device_id)
            .fetch(query)
            .await;
        serde_json::to_writer(std::io::stdout().lock(), &samples)?;
        println!();
        Ok(())
    }
}
