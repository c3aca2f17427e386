//! Read operations against an eth1 endpoint, each a thin mapping over
//! [`Endpoint::call`]. No ABI parsing, the deposit event topic is matched as a
//! hard-coded constant.

use anyhow::{anyhow, Context};

use crate::checker::DepositSource;
use crate::error::{Error, Result};
use crate::rpc_client::Endpoint;
use crate::BlockRange;

/// Returns the current block number of the endpoint.
pub async fn get_block_number(endpoint: &Endpoint) -> Result<u64> {
    let envelope = endpoint.call("eth_blockNumber", serde_json::json!([])).await?;
    hex_to_u64(result_str(&envelope)?)
}

/// Returns the eth1 chain id. Diagnostic only, not part of the check.
pub async fn get_chain_id(endpoint: &Endpoint) -> Result<u64> {
    let envelope = endpoint.call("eth_chainId", serde_json::json!([])).await?;
    hex_to_u64(result_str(&envelope)?)
}

/// Returns the eth1 network id. Diagnostic only, not part of the check.
pub async fn get_network_id(endpoint: &Endpoint) -> Result<String> {
    let envelope = endpoint.call("net_version", serde_json::json!([])).await?;
    result_str(&envelope).map(str::to_owned)
}

/// Returns the number of logs emitted by `contract` with `topic` in the given
/// block range. Only the count is used, the log contents are dropped.
pub async fn get_deposit_logs_count(
    endpoint: &Endpoint,
    contract: &str,
    topic: &str,
    range: BlockRange,
) -> Result<usize> {
    let params = serde_json::json!([{
        "address": contract,
        "topics": [topic],
        "fromBlock": encode_block_number(range.0),
        "toBlock": encode_block_number(range.1),
    }]);

    let envelope = endpoint.call("eth_getLogs", params).await?;

    result_field(&envelope)?
        .as_array()
        .map(Vec::len)
        .ok_or_else(|| Error::Decoding(anyhow!("'result' value was not an array")))
}

/// An [`Endpoint`] together with the deposit contract it is queried about.
pub struct DepositEndpoint {
    endpoint: Endpoint,
    contract: String,
    topic: String,
}

impl DepositEndpoint {
    pub fn new(endpoint: Endpoint, contract: String, topic: String) -> Self {
        Self {
            endpoint,
            contract,
            topic,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

impl DepositSource for DepositEndpoint {
    async fn height(&self) -> Result<u64> {
        get_block_number(&self.endpoint).await
    }

    async fn deposit_logs_count(&self, range: BlockRange) -> Result<usize> {
        get_deposit_logs_count(&self.endpoint, &self.contract, &self.topic, range).await
    }
}

fn result_field(envelope: &serde_json::Value) -> Result<&serde_json::Value> {
    envelope
        .get("result")
        .ok_or_else(|| Error::Decoding(anyhow!("no 'result' field in response")))
}

fn result_str(envelope: &serde_json::Value) -> Result<&str> {
    result_field(envelope)?
        .as_str()
        .ok_or_else(|| Error::Decoding(anyhow!("'result' value was not a string")))
}

/// Encodes a block number the way the JSON-RPC expects it, `0x`-prefixed hex
/// with no leading zeros.
pub fn encode_block_number(n: u64) -> String {
    format!("0x{:x}", n)
}

/// Parses a `0x`-prefixed big-endian hex string as a u64.
pub fn hex_to_u64(hex: &str) -> Result<u64> {
    let digits = hex
        .strip_prefix("0x")
        .ok_or_else(|| Error::Decoding(anyhow!("hex string did not start with 0x: {}", hex)))?;

    u64::from_str_radix(digits, 16)
        .context("parse hex as u64")
        .map_err(Error::Decoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_number_round_trip() {
        for n in [0, 1, 15, 16, 1000, 11_184_524, u64::MAX] {
            assert_eq!(hex_to_u64(&encode_block_number(n)).unwrap(), n);
        }
    }

    #[test]
    fn test_encode_has_no_leading_zeros() {
        assert_eq!(encode_block_number(0), "0x0");
        assert_eq!(encode_block_number(255), "0xff");
        assert_eq!(encode_block_number(11_184_524), "0xaaa98c");
    }

    #[test]
    fn test_decode_requires_prefix() {
        assert!(matches!(hex_to_u64("aaa58c"), Err(Error::Decoding(_))));
        assert!(matches!(hex_to_u64("0xzz"), Err(Error::Decoding(_))));
        assert!(matches!(hex_to_u64("0x"), Err(Error::Decoding(_))));
    }

    #[test]
    fn test_result_field_missing() {
        let envelope = serde_json::json!({"jsonrpc": "2.0", "id": 1});
        assert!(matches!(result_str(&envelope), Err(Error::Decoding(_))));
    }
}
