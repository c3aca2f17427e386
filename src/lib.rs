use std::fmt;

mod args;
mod checker;
mod config;
mod error;
mod eth;
mod partition;
mod rpc_client;
mod runner;

pub use args::Args;
pub use checker::{compare_all, DepositSource, Mismatch, NoopObserver, Observer, RunResult};
pub use config::{CheckConfig, Network, TailPolicy};
pub use error::{Error, Result};
pub use eth::DepositEndpoint;
pub use partition::partition;
pub use rpc_client::Endpoint;
pub use runner::Runner;

/// Half-open range of block numbers, `from..to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockRange(pub u64, pub u64);

impl fmt::Display for BlockRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}..{}", self.0, self.1)
    }
}
