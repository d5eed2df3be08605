mod export;
mod readings;
mod report;
mod usage;
mod watch;

use chrono::DateTime;
use clap::{Parser, Subcommand};
use reqwest::Url;

pub use self::{
    export::ExportArgs,
    readings::ReadingsArgs,
    report::ReportArgs,
    usage::UsageArgs,
    watch::WatchArgs,
};
use crate::{core::interval::Interval, db::Db, prelude::*};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Follow the live meter feed and keep the timeline current.
    Watch(Box<WatchArgs>),

    /// Energy report over a historical window.
    Report(Box<ReportArgs>),

    /// Dump decoded readings as JSON (the upward query protocol).
    Readings(Box<ReadingsArgs>),

    /// Daily day/night usage summaries.
    Usage(Box<UsageArgs>),

    /// Export a window as CSV, optionally into the compressed archive.
    Export(Box<ExportArgs>),
}

/// Connection to the backing store.
#[derive(Parser)]
pub struct DbArgs {
    #[clap(long = "mongodb-uri", env = "MONGODB_URI")]
    uri: Url,
}

impl DbArgs {
    pub async fn connect(&self) -> Result<Db> {
        Db::with_uri(&self.uri).await
    }
}

/// The meter whose readings we are working with.
#[derive(Parser)]
pub struct DeviceArgs {
    #[clap(long = "device-id", env = "DEVICE_ID")]
    pub device_id: String,
}

/// Window selection: relative or absolute. Defaults to today so far.
#[derive(Parser)]
pub struct RangeArgs {
    /// Yesterday's full local day.
    #[clap(long, conflicts_with_all = ["start", "end"])]
    yesterday: bool,

    /// Window start, unix seconds (inclusive).
    #[clap(long, requires = "end")]
    start: Option<i64>,

    /// Window end, unix seconds (exclusive).
    #[clap(long, requires = "start")]
    end: Option<i64>,
}

impl RangeArgs {
    pub fn resolve(&self) -> Result<Interval> {
        if self.yesterday {
            return Interval::yesterday();
        }
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                ensure!(start < end, "window start must precede its end");
                Ok(Interval::new(
                    DateTime::from_timestamp(start, 0).context("window start is out of range")?,
                    DateTime::from_timestamp(end, 0).context("window end is out of range")?,
                ))
            }
            _ => Interval::today_so_far(),
        }
    }
}
