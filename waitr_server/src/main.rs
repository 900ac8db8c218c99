use warp::{Filter, Rejection, Reply};

use std::convert::Infallible;

use anyhow::Context;

use config::Config;
use log::start_logger;
use tracing::{error, info};

mod config;
mod duration;
mod error;
mod handler;
mod log;

type Result<T> = std::result::Result<T, Rejection>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  start_logger();
  info!("Starting server");

  let config = Config::from_env().map_err(|err| {
    error!("{:#}", err);
    err
  })?;
  if config.defaulted {
    info!("defaulting to port {}", config.port);
  }
  info!("listening on port {}", config.port);

  let (addr, server) = warp::serve(routes())
    .try_bind_ephemeral(config.addr())
    .map_err(|err| {
      error!("Unable to bind {}: {}", config.addr(), err);
      err
    })
    .with_context(|| format!("Unable to bind {}", config.addr()))?;

  info!("Serving on {}", addr);
  server.await;
  Ok(())
}

/// Built once at startup; any method is accepted on every path.
pub fn routes() -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
  warp::path::full()
    .and_then(handler::route_handler)
    .recover(handler::handle_rejection)
}
