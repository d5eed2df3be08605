#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod cli;
mod core;
mod db;
mod export;
mod prelude;
mod quantity;
mod query;
mod statistics;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command},
    prelude::*,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Watch(args) => args.run().await?,
        Command::Report(args) => args.run().await?,
        Command::Readings(args) => args.run().await?,
        Command::Usage(args) => args.run().await?,
        Command::Export(args) => args.run().await?,
    }

    info!("done!");
    Ok(())
}
