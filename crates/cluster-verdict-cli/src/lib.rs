//! cluster-verdict CLI — compare screen captures from the command line.

pub mod compare;
pub mod config;

pub use compare::{run_compare, Backend, CompareOptions, CompareReport};
pub use config::{resolve_api_key, API_KEY_ENV};
