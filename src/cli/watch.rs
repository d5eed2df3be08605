use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use bon::Builder;
use chrono::{TimeDelta, Utc};
use clap::Parser;
use reqwest::Url;
use tokio::time::{MissedTickBehavior, interval};

use crate::{
    cli::{DbArgs, DeviceArgs},
    core::timeline::SeriesStore,
    prelude::*,
    query::{Readings, ReadingsQuery},
    statistics::{energy, standby::StandbySplit},
};

/// Cold-start look-back: just under a day, so the first poll never pulls
/// full history.
const BOOTSTRAP_LOOK_BACK_MINUTES: i64 = 23 * 60 + 50;

#[derive(Parser)]
pub struct WatchArgs {
    #[clap(long, env = "POLLING_INTERVAL", default_value = "30s")]
    polling_interval: humantime::Duration,

    #[clap(flatten)]
    device: DeviceArgs,

    #[clap(flatten)]
    db: DbArgs,

    /// POSTed after every completed cycle, for liveness monitoring.
    #[clap(long = "heartbeat-url", env = "WATCH_HEARTBEAT_URL")]
    heartbeat_url: Option<Url>,
}

impl WatchArgs {
    pub async fn run(self) -> Result {
        let db = self.db.connect().await?;

        let should_terminate = Arc::new(AtomicBool::new(false));
        signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&should_terminate))?;

        Watcher::builder()
            .readings(Readings::new(db, self.device.device_id))
            .interval(self.polling_interval)
            .maybe_heartbeat_url(self.heartbeat_url)
            .should_terminate(should_terminate)
            .build()
            .run()
            .await
    }
}

/// The live ingestion loop.
///
/// One poll per tick, awaited to completion before the next tick may fire,
/// so merges always apply in fetch order and the store's cutoff rule keeps
/// the high-watermark moving forward only.
#[derive(Builder)]
struct Watcher {
    readings: Readings,

    #[builder(into)]
    interval: Duration,

    heartbeat_url: Option<Url>,
    should_terminate: Arc<AtomicBool>,

    #[builder(default)]
    store: SeriesStore,
}

impl Watcher {
    async fn run(mut self) -> Result {
        let mut ticks = interval(self.interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !self.should_terminate.load(Ordering::Relaxed) {
            ticks.tick().await;
            self.poll_once().await;
            self.send_heartbeat().await;
        }

        info!("terminating…");
        Ok(())
    }

    /// One polling cycle: fetch since the high-watermark (or the bootstrap
    /// look-back on a cold store) and merge. A failed fetch has already been
    /// logged by the façade and merges nothing; the loop just keeps ticking.
    async fn poll_once(&mut self) {
        let since = self
            .store
            .last_timestamp()
            .unwrap_or_else(|| Utc::now() - TimeDelta::minutes(BOOTSTRAP_LOOK_BACK_MINUTES));
        let accepted = self.store.append(self.readings.fetch(ReadingsQuery::Since(since)).await);
        if accepted == 0 {
            return;
        }

        let snapshot = self.store.snapshot();
        let total = energy::integrate(snapshot);
        let split = StandbySplit::estimate(snapshot, total);
        if let Some(latest) = snapshot.last() {
            info!(
                accepted,
                current = %latest.power,
                last_reading = %latest.timestamp,
                window_total = %total,
                standby_power = %split.standby_power,
                "merged",
            );
        }
    }

    async fn send_heartbeat(&self) {
        if let Some(url) = &self.heartbeat_url
            && let Err(error) = try_send_heartbeat(url.clone()).await
        {
            warn!("failed to send the heartbeat: {error:#}");
        }
    }
}

#[instrument(skip_all)]
async fn try_send_heartbeat(url: Url) -> Result {
    reqwest::Client::builder().timeout(Duration::from_secs(3)).build()?.post(url).send().await?;
    Ok(())
}
