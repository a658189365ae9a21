use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Link-local address of the EC2 instance metadata service
pub const DEFAULT_ENDPOINT: &str = "http://169.254.169.254";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(21600);

pub const TOKEN_PATH: &str = "/latest/api/token";
pub const METADATA_PATH: &str = "/latest/meta-data/";
pub const TOKEN_HEADER: &str = "X-aws-ec2-metadata-token";
pub const TOKEN_TTL_HEADER: &str = "X-aws-ec2-metadata-token-ttl-seconds";

/// IMDSv2 client
///
/// A session token is requested for every collection and never reused
#[derive(Clone, Debug)]
pub struct Client {
  http: reqwest::Client,
  endpoint: String,
  token_ttl: Duration,
}

#[derive(Debug)]
pub struct Builder {
  endpoint: String,
  timeout: Duration,
  token_ttl: Duration,
}

impl Default for Builder {
  fn default() -> Self {
    Self {
      endpoint: DEFAULT_ENDPOINT.to_owned(),
      timeout: DEFAULT_TIMEOUT,
      token_ttl: DEFAULT_TOKEN_TTL,
    }
  }
}

impl Builder {
  /// Base URL of the metadata service, without the `/latest/...` suffix
  pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
    self.endpoint = endpoint.into();
    self
  }

  /// Upper bound for each individual call to the metadata service
  pub fn timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  pub fn token_ttl(mut self, token_ttl: Duration) -> Self {
    self.token_ttl = token_ttl;
    self
  }

  pub fn build(self) -> Result<Client> {
    // IMDS is only reachable from the instance itself, never through a proxy
    let http = reqwest::Client::builder().timeout(self.timeout).no_proxy().build()?;

    Ok(Client {
      http,
      endpoint: self.endpoint.trim_end_matches('/').to_owned(),
      token_ttl: self.token_ttl,
    })
  }
}

/// EC2 instance metadata as returned by IMDS
///
/// https://docs.aws.amazon.com/AWSEC2/latest/UserGuide/instancedata-data-categories.html
///
/// Values are passed through untouched. A field that could not be retrieved is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceMetadata {
  /// The ID of the instance
  pub instance_id: String,
  /// The public IPv4 address; empty when the instance has none
  pub public_ipv4: String,
  /// The private IPv4 address of the eth0 device
  pub private_ipv4: String,
  /// The Availability Zone in which the instance launched
  pub availability_zone: String,
  /// The AWS Region in which the instance launched
  pub region: String,
  /// The instance type of the instance
  pub instance_type: String,
}

impl Client {
  pub fn builder() -> Builder {
    Builder::default()
  }

  pub fn endpoint(&self) -> &str {
    &self.endpoint
  }

  /// Request a session token
  ///
  /// Any transport failure, non-success status or empty body means there is no token
  pub async fn get_token(&self) -> Result<String> {
    let url = format!("{}{TOKEN_PATH}", self.endpoint);
    let unavailable = |err: reqwest::Error| Error::TokenUnavailable(err.to_string());

    let token = self
      .http
      .put(url)
      .header(TOKEN_TTL_HEADER, self.token_ttl.as_secs())
      .send()
      .await
      .map_err(unavailable)?
      .error_for_status()
      .map_err(unavailable)?
      .text()
      .await
      .map_err(unavailable)?;

    if token.is_empty() {
      return Err(Error::TokenUnavailable("empty token returned".to_owned()));
    }

    Ok(token)
  }

  /// Get a single metadata value, relative to `/latest/meta-data/`
  pub async fn get(&self, path: &str, token: &str) -> reqwest::Result<String> {
    let url = format!("{}{METADATA_PATH}{path}", self.endpoint);

    self
      .http
      .get(url)
      .header(TOKEN_HEADER, token)
      .send()
      .await?
      .error_for_status()?
      .text()
      .await
  }

  /// Same as [`Client::get`] but a failure yields an empty value
  async fn get_or_empty(&self, path: &str, token: &str) -> String {
    match self.get(path, token).await {
      Ok(value) => value,
      Err(err) => {
        debug!("Failed to get {path} from IMDS: {err}");
        String::new()
      }
    }
  }

  /// Get data from the IMDS endpoint
  ///
  /// Fails only when the session token cannot be obtained, in which case no
  /// metadata paths are requested. Fields are fetched one after another.
  pub async fn get_imds_data(&self) -> Result<InstanceMetadata> {
    let token = self.get_token().await?;

    let metadata = InstanceMetadata {
      instance_id: self.get_or_empty("instance-id", &token).await,
      public_ipv4: self.get_or_empty("public-ipv4", &token).await,
      private_ipv4: self.get_or_empty("local-ipv4", &token).await,
      availability_zone: self.get_or_empty("placement/availability-zone", &token).await,
      region: self.get_or_empty("placement/region", &token).await,
      instance_type: self.get_or_empty("instance-type", &token).await,
    };

    Ok(metadata)
  }
}
