use std::net::SocketAddr;

use anyhow::Result;
use axum::http::StatusCode;
use clap::Args;

use crate::{error::Error, imds, server};

#[derive(Args, Debug)]
pub struct Serve {
  /// Address to listen on
  #[arg(long, env = "INSTANCE_INFO_BIND", default_value = "0.0.0.0:8080")]
  pub bind: SocketAddr,

  /// HTTP status returned with the error document when the metadata service is unavailable
  #[arg(long, env = "INSTANCE_INFO_UNAVAILABLE_STATUS", default_value_t = 200)]
  pub unavailable_status: u16,
}

impl Serve {
  pub fn status(&self) -> Result<StatusCode, Error> {
    StatusCode::from_u16(self.unavailable_status).map_err(|_| Error::InvalidStatus(self.unavailable_status))
  }

  pub async fn serve(&self, client: imds::Client) -> Result<()> {
    let state = server::AppState::new(client).with_unavailable_status(self.status()?);

    server::run(state, self.bind).await
  }
}
