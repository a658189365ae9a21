use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The IMDSv2 session token could not be obtained
  #[error("unable to get IMDS token: {0}")]
  TokenUnavailable(String),

  #[error("http client error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("invalid HTTP status code: {0}")]
  InvalidStatus(u16),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Body returned in place of the instance document when no token is available
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorDocument {
  pub error: &'static str,
  pub message: &'static str,
}

impl ErrorDocument {
  pub const fn token_unavailable() -> Self {
    Self {
      error: "Unable to get IMDS token",
      message: "EC2 metadata service unavailable",
    }
  }
}
