use crate::config::CheckConfig;
use crate::error::Result;
use crate::partition::partition;
use crate::BlockRange;

/// The two queries the comparator needs from an endpoint. Implemented by
/// [`crate::eth::DepositEndpoint`] over JSON-RPC.
#[allow(async_fn_in_trait)]
pub trait DepositSource {
    async fn height(&self) -> Result<u64>;
    async fn deposit_logs_count(&self, range: BlockRange) -> Result<usize>;
}

/// Gets notified as the check progresses. Reporting lives here so the
/// comparator itself never touches the console.
pub trait Observer {
    fn on_range_start(&mut self, _range: BlockRange) {}
    fn on_mismatch(&mut self, _mismatch: &Mismatch) {}
    fn on_complete(&mut self, _result: &RunResult) {}
}

pub struct NoopObserver;

impl Observer for NoopObserver {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mismatch {
    pub range: BlockRange,
    pub trusted: usize,
    pub to_check: usize,
}

#[derive(Debug, Default)]
pub struct RunResult {
    pub ranges_checked: usize,
    pub mismatches: Vec<Mismatch>,
}

impl RunResult {
    pub fn all_matched(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Checks every chunk of `[config.start_block, trusted height)` on both
/// endpoints, one query at a time.
///
/// A differing count is recorded and the loop moves on; a failed query aborts
/// the whole run. Ranges already checked are only available to the caller
/// through the observer in that case.
pub async fn compare_all<T, U, O>(
    to_check: &T,
    trusted: &U,
    config: &CheckConfig,
    observer: &mut O,
) -> Result<RunResult>
where
    T: DepositSource,
    U: DepositSource,
    O: Observer,
{
    let end = trusted.height().await?;
    let ranges = partition(config.start_block, end, config.chunk_size, config.tail);

    log::info!(
        "checking {} ranges of {} blocks starting at block {}",
        ranges.len(),
        config.chunk_size,
        config.start_block
    );

    let mut result = RunResult::default();

    for range in ranges {
        observer.on_range_start(range);

        let trusted_count = trusted.deposit_logs_count(range).await?;
        let to_check_count = to_check.deposit_logs_count(range).await?;

        if trusted_count != to_check_count {
            let mismatch = Mismatch {
                range,
                trusted: trusted_count,
                to_check: to_check_count,
            };
            observer.on_mismatch(&mismatch);
            result.mismatches.push(mismatch);
        }

        result.ranges_checked += 1;
    }

    observer.on_complete(&result);

    Ok(result)
}
