use crate::duration::DurationRequest;
use crate::error::WaitError;
use crate::Result;
use std::convert::Infallible;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;
use warp::http::StatusCode;
use warp::path::FullPath;
use warp::reply::Response;
use warp::{Rejection, Reply};

pub const HELP: &str = "waitr
-----

A simple waiting service which responds in the time you specify.

Request option format:

/3m - Wait 3 minutes before returning OK
/10s - Wait 10 seconds before returning OK
/50ms - Wait 50 milliseconds before returning OK

Decimal counts such as /1.5s are accepted.

Code by @objectfox at https://github.com/objectfox/waitr
Inspired by @racheldne
";

/// Exact path match: `/favicon.ico/` is not the favicon.
pub async fn route_handler(path: FullPath) -> Result<Response> {
    match path.as_str() {
        "/favicon.ico" => favicon_handler().await,
        "/" => help_handler().await,
        _ => wait_handler(path).await,
    }
}

pub async fn favicon_handler() -> Result<Response> {
    info!("Returned 404 for favicon.ico");
    Err(warp::reject::custom(WaitError::NotFound))
}

pub async fn help_handler() -> Result<Response> {
    info!("Got / - Returning help");
    Ok(HELP.into_response())
}

pub async fn wait_handler(path: FullPath) -> Result<Response> {
    let id = Uuid::new_v4().as_simple().to_string();
    let span = info_span!("request", %id, path = path.as_str());

    async move {
        let request = match DurationRequest::from_path(path.as_str()) {
            Ok(request) => request,
            Err(err) => {
                warn!(status = %err.status(), "{}", err);
                return Err(warp::reject::custom(err));
            }
        };

        info!(
            "Waiting for {} {} ({} ms)",
            request.magnitude,
            request.unit.long_name(),
            request.milliseconds()
        );
        let mut pending = PendingWait::default();
        tokio::time::sleep(request.sleep_duration()).await;
        pending.done = true;
        info!("Finished");

        Ok(request.confirmation().into_response())
    }
    .instrument(span)
    .await
}

pub async fn handle_rejection(err: Rejection) -> std::result::Result<Response, Infallible> {
    if let Some(wait_err) = err.find::<WaitError>() {
        return Ok(wait_err.clone().into_response());
    }

    error!("Unhandled rejection: {:?}", err);
    Ok(warp::reply::with_status(
        "Internal Server Error\n".to_string(),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .into_response())
}

// Logs when hyper drops the request future mid-sleep, i.e. the client hung up.
#[derive(Default)]
struct PendingWait {
    done: bool,
}

impl Drop for PendingWait {
    fn drop(&mut self) {
        if !self.done {
            debug!("Client went away before the wait completed");
            #[cfg(test)]
            tests::ABANDONED_WAITS.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }
    }
}
