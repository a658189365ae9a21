use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::Verbosity;

use crate::{commands, error::Result, imds};

/// Styles for CLI
fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .literal(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::BrightCyan))),
    )
    .usage(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
}

/// Describe the EC2 instance this process runs on
#[derive(Debug, Parser)]
#[command(author, about, version)]
#[command(propagate_version = true)]
#[command(styles=get_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  #[clap(flatten)]
  pub imds: ImdsArgs,

  /// Disable colored log output
  #[arg(long, global = true)]
  pub no_color: bool,

  #[clap(flatten)]
  pub verbose: Verbosity,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
  /// Serve the instance document over HTTP
  Serve(commands::serve::Serve),

  /// Print the instance document to stdout
  ///
  /// Exits with a non-zero status when the metadata service is unavailable
  Get(commands::get::Get),
}

/// Settings for talking to the instance metadata service
#[derive(Args, Debug)]
pub struct ImdsArgs {
  /// Base URL of the instance metadata service
  #[arg(long, global = true, env = "IMDS_ENDPOINT", default_value = imds::DEFAULT_ENDPOINT)]
  pub imds_endpoint: String,

  /// Timeout in seconds for each call to the metadata service
  #[arg(long, global = true, env = "IMDS_TIMEOUT", default_value_t = 2)]
  pub timeout: u64,

  /// Lifetime in seconds requested for the IMDSv2 session token
  #[arg(
    long,
    global = true,
    env = "IMDS_TOKEN_TTL",
    default_value_t = 21600,
    value_parser = clap::value_parser!(u64).range(1..=21600),
  )]
  pub token_ttl: u64,
}

impl ImdsArgs {
  pub fn client(&self) -> Result<imds::Client> {
    imds::Client::builder()
      .endpoint(&self.imds_endpoint)
      .timeout(Duration::from_secs(self.timeout))
      .token_ttl(Duration::from_secs(self.token_ttl))
      .build()
  }
}
