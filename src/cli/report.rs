use chrono::Local;
use clap::Parser;

use crate::{
    cli::{DbArgs, DeviceArgs, RangeArgs},
    core::timeline::SeriesStore,
    prelude::*,
    query::{Readings, ReadingsQuery},
    statistics::report::RangeReport,
    tables,
};

#[derive(Parser)]
pub struct ReportArgs {
    #[clap(flatten)]
    device: DeviceArgs,

    #[clap(flatten)]
    db: DbArgs,

    #[clap(flatten)]
    range: RangeArgs,

    /// Emit the report as JSON instead of a table.
    #[clap(long)]
    json: bool,
}

impl ReportArgs {
    pub async fn run(self) -> Result {
        let window = self.range.resolve()?;
        let db = self.db.connect().await?;
        let samples = Readings::new(db, self.device.device_id)
            .fetch(ReadingsQuery::Range(window))
            .await;

        // Switching to a historical range supersedes any previous timeline
        // wholesale; a malformed decode must not silently reorder it.
        let mut store = SeriesStore::new();
        store.replace(samples).context("the backing store returned a malformed series")?;

        let report = RangeReport::over(store.snapshot(), window, &Local);
        if self.json {
            serde_json::to_writer_pretty(std::io::stdout().lock(), &report)?;
            println!();
        } else {
            println!("{}", tables::report_table(&report));
        }
        Ok(())
    }
}
