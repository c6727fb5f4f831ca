use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::debug;

mod client;
mod config;
mod error;
mod ip;
mod update;

use crate::client::*;
use crate::config::*;
use crate::ip::*;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let options = Options::load(&args.optfile)?;
    let params = Params::resolve(args, &options)?;

    // RUST_LOG still takes precedence over the quiet setting
    let default_level = if params.quiet { "error" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    debug!(
        "loaded {} string, {} bool and {} int options",
        options.strings.len(),
        options.bools.len(),
        options.ints.len()
    );

    let client = Client::new(&params)?;
    let ip_api = IpApi::new(params.ip_api.clone());

    update::run(&client, &ip_api, &params).await
}
