//! Describe the EC2 instance the process runs on
//!
//! A session token is requested from the instance metadata service (IMDSv2), a fixed set
//! of metadata paths is read with it and the result is combined with the local hostname
//! into a flat [`InstanceInfo`] document.
pub mod cli;
pub mod commands;
pub mod error;
pub mod host;
pub mod imds;
pub mod info;
pub mod region;
pub mod server;

pub use cli::{Cli, Commands};
pub use error::{Error, ErrorDocument};
pub use info::InstanceInfo;
