pub mod get;
pub mod serve;
