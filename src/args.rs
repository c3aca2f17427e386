use clap::Parser;
use std::num::NonZeroU64;
use url::Url;

use crate::config::{Network, TailPolicy};

#[derive(Parser, Debug, Clone)]
#[command(name = "deposit-check")]
pub struct Args {
    /// Endpoint whose deposit logs are being validated
    pub to_check: Url,
    /// Endpoint treated as the source of truth
    pub trusted: Url,
    /// Network preset for deposit contract address and start block
    #[clap(long, value_enum, default_value_t = Network::Mainnet)]
    pub network: Network,
    /// Optional toml config file, replaces the network preset
    #[clap(long)]
    pub config_path: Option<String>,
    #[clap(long)]
    pub chunk_size: Option<NonZeroU64>,
    #[clap(long)]
    pub timeout_millis: Option<NonZeroU64>,
    #[clap(long, value_enum)]
    pub tail: Option<TailPolicy>,
}

impl Args {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
