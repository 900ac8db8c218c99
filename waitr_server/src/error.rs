use warp::http::StatusCode;
use warp::reject::Reject;
use warp::reply::Response;
use warp::Reply;

/// Everything that can end a request without a wait.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WaitError {
  #[error("Not found")]
  NotFound,
  #[error("Invalid format: {input} (expected /<count><unit>, i.e. /15s)")]
  MalformedRequest { input: String },
  #[error("Unable to parse number: {number}")]
  UnparsableNumber { number: String },
  #[error("Unable to parse unit (supported are ms, s, m): {unit}")]
  UnrecognizedUnit { unit: String },
}

impl Reject for WaitError {}

impl WaitError {
  pub fn status(&self) -> StatusCode {
    match self {
      WaitError::NotFound => StatusCode::NOT_FOUND,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl Reply for WaitError {
  fn into_response(self) -> Response {
    let status = self.status();
    match self {
      // no body, no content type
      WaitError::NotFound => warp::reply::with_status(warp::reply(), status).into_response(),
      other => warp::reply::with_status(format!("{}\n", other), status).into_response(),
    }
  }
}
