#![allow(clippy::doc_markdown)]

mod api;
mod cli;
mod core;
mod fmt;
mod prelude;
mod quantity;
mod tables;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command, forecast, interactive, series},
    prelude::*,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let api = args.service.new_api()?;

    match args.command {
        Command::Forecast(args) => forecast(&api, &args).await?,
        Command::Series(display) => series(&api, display).await?,
        Command::Interactive(display) => interactive(&api, display).await?,
    }

    info!("done!");
    Ok(())
}
