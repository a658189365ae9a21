use anyhow::Result;
use clap::Args;

use crate::{error::ErrorDocument, imds, info};

#[derive(Args, Debug, Default)]
pub struct Get {
  /// Print the document on a single line
  #[arg(long)]
  pub compact: bool,
}

impl Get {
  fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
    let json = if self.compact {
      serde_json::to_string(value)?
    } else {
      serde_json::to_string_pretty(value)?
    };

    Ok(json)
  }

  /// Collect the instance document once and print it
  ///
  /// The error document is printed as well before returning the error
  pub async fn get(&self, client: imds::Client) -> Result<()> {
    match info::collect(&client).await {
      Ok(info) => {
        println!("{}", self.to_json(&info)?);
        Ok(())
      }
      Err(err) => {
        println!("{}", self.to_json(&ErrorDocument::token_unavailable())?);
        Err(err.into())
      }
    }
  }
}
