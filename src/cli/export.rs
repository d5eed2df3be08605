use std::{io::Write, path::PathBuf};

use clap::Parser;

use crate::{
    cli::{DbArgs, DeviceArgs, RangeArgs},
    export::write_csv,
    prelude::*,
    query::{Readings, ReadingsQuery},
};

#[derive(Parser)]
pub struct ExportArgs {
    #[clap(flatten)]
    device: DeviceArgs,

    #[clap(flatten)]
    db: DbArgs,

    #[clap(flatten)]
    range: RangeArgs,

    /// Write to a file instead of stdout.
    #[clap(long)]
    output: Option<PathBuf>,

    /// Also store the CSV compressed in the archive under this name.
    #[clap(long)]
    archive: Option<String>,
}

impl ExportArgs {
    pub async fn run(self) -> Result {
        let window = self.range.resolve()?;
        let db = self.db.connect().await?;
        let samples = Readings::new(db.clone(), self.device.device_id)
            .fetch(ReadingsQuery::Range(window))
            .await;

        let mut csv = Vec::new();
        write_csv(&mut csv, &samples)?;

        if let Some(name) = &self.archive {
            db.archive().put(name, &csv).await?;
        }
        match &self.output {
            Some(path) => std::fs::write(path, &csv)
                .with_context(|| format!("failed to write `{}`", path.display()))?,
            None => std::io::stdout().lock().write_all(&csv)?,
        }
        Ok(())
    }
}
