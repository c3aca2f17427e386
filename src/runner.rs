use std::time::Duration;

use anyhow::Context;

use crate::args::Args;
use crate::checker::{self, Mismatch, Observer, RunResult};
use crate::config::CheckConfig;
use crate::eth::{self, DepositEndpoint};
use crate::rpc_client::Endpoint;
use crate::BlockRange;

pub struct Runner;

impl Runner {
    pub async fn run(args: Args) -> Result<RunResult, anyhow::Error> {
        let cfg = Self::load_config(&args).await?;

        let http_client = reqwest::Client::builder()
            .gzip(true)
            .http1_only()
            .timeout(Duration::from_millis(cfg.http_req_timeout_millis.get()))
            .build()
            .context("build http client")?;

        let to_check = Endpoint::new(
            http_client.clone(),
            args.to_check,
            Some("to_check".to_owned()),
        );
        let trusted = Endpoint::new(http_client, args.trusted, Some("trusted".to_owned()));

        log_endpoint_ids(&to_check).await;
        log_endpoint_ids(&trusted).await;

        let to_check = DepositEndpoint::new(
            to_check,
            cfg.deposit_contract.clone(),
            cfg.deposit_event_topic.clone(),
        );
        let trusted = DepositEndpoint::new(
            trusted,
            cfg.deposit_contract.clone(),
            cfg.deposit_event_topic.clone(),
        );

        checker::compare_all(&to_check, &trusted, &cfg, &mut ConsoleObserver)
            .await
            .context("run deposit log check")
    }

    async fn load_config(args: &Args) -> Result<CheckConfig, anyhow::Error> {
        let mut cfg = match &args.config_path {
            Some(path) => {
                let raw = tokio::fs::read_to_string(path)
                    .await
                    .context("read config file")?;
                toml::de::from_str(&raw).context("parse config")?
            }
            None => CheckConfig::for_network(args.network),
        };

        if let Some(chunk_size) = args.chunk_size {
            cfg.chunk_size = chunk_size;
        }
        if let Some(timeout) = args.timeout_millis {
            cfg.http_req_timeout_millis = timeout;
        }
        if let Some(tail) = args.tail {
            cfg.tail = tail;
        }

        Ok(cfg)
    }
}

/// Logs chain id and network id of the endpoint. The check itself only
/// compares log counts, so a failure here is not fatal.
async fn log_endpoint_ids(endpoint: &Endpoint) {
    match eth::get_chain_id(endpoint).await {
        Ok(chain_id) => log::info!("{} chain id: {}", endpoint.label(), chain_id),
        Err(e) => log::warn!("failed to get chain id of {}: {}", endpoint.label(), e),
    }

    match eth::get_network_id(endpoint).await {
        Ok(network_id) => log::info!("{} network id: {}", endpoint.label(), network_id),
        Err(e) => log::warn!("failed to get network id of {}: {}", endpoint.label(), e),
    }
}

struct ConsoleObserver;

impl Observer for ConsoleObserver {
    fn on_range_start(&mut self, range: BlockRange) {
        println!("Checking in range {} {}", range.0, range.1);
    }

    fn on_mismatch(&mut self, mismatch: &Mismatch) {
        println!(
            "Got differing counts for range {}. to_check: {}, trusted: {}",
            mismatch.range, mismatch.to_check, mismatch.trusted
        );
    }

    fn on_complete(&mut self, result: &RunResult) {
        if result.all_matched() {
            println!("All calls match");
        } else {
            println!("Faulty to_check endpoint");
        }
    }
}
