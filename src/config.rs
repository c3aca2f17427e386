use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;

/// `keccak("DepositEvent(bytes,bytes,bytes,bytes,bytes)")`, same on every network.
pub const DEPOSIT_EVENT_TOPIC: &str =
    "0x649bbc62d0e31342afea4e5cd82d4049e7e1ee912fc0889aa790803be39038c5";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Address of the deposit contract on the target network
    pub deposit_contract: String,
    /// First block to check, normally the block the deposit contract was deployed in
    pub start_block: u64,
    #[serde(default = "default_deposit_event_topic")]
    pub deposit_event_topic: String,
    /// Width of each checked block range
    #[serde(default = "default_chunk_size")]
    pub chunk_size: NonZeroU64,
    #[serde(default = "default_req_timeout")]
    pub http_req_timeout_millis: NonZeroU64,
    /// What to do with the partial range between the last full chunk boundary
    /// and the chain tip
    #[serde(default)]
    pub tail: TailPolicy,
}

fn default_deposit_event_topic() -> String {
    DEPOSIT_EVENT_TOPIC.to_owned()
}

fn default_chunk_size() -> NonZeroU64 {
    NonZeroU64::new(1000).unwrap()
}

fn default_req_timeout() -> NonZeroU64 {
    NonZeroU64::new(60_000).unwrap()
}

impl CheckConfig {
    pub fn for_network(network: Network) -> Self {
        let (deposit_contract, start_block) = match network {
            Network::Mainnet => ("0x00000000219ab540356cBB839Cbe05303d7705Fa", 11_184_524),
            Network::Pyrmont => ("0x8c5fecdC472E27Bc447696F431E425D02dd46a8c", 3_743_587),
        };

        Self {
            deposit_contract: deposit_contract.to_owned(),
            start_block,
            deposit_event_topic: default_deposit_event_topic(),
            chunk_size: default_chunk_size(),
            http_req_timeout_millis: default_req_timeout(),
            tail: TailPolicy::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Pyrmont,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Pyrmont => write!(f, "pyrmont"),
        }
    }
}

/// The boundary construction truncates at the last full chunk, so blocks near
/// the tip are skipped by default. That also avoids querying blocks that can
/// still reorg.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TailPolicy {
    #[default]
    Drop,
    IncludePartial,
}
