use std::num::NonZeroU64;

use crate::config::TailPolicy;
use crate::BlockRange;

/// Splits `start..end` into consecutive chunks of `chunk_size` blocks.
///
/// Boundary points are laid out at `start, start + c, start + 2c, ...` below
/// `end`, and one range is emitted per consecutive pair. With
/// `TailPolicy::Drop` the blocks between the last boundary and `end` are not
/// covered; `TailPolicy::IncludePartial` emits them as a final short range.
pub fn partition(start: u64, end: u64, chunk_size: NonZeroU64, tail: TailPolicy) -> Vec<BlockRange> {
    let chunk_size = chunk_size.get();

    if end <= start {
        return Vec::new();
    }

    let mut ranges = (start..end)
        .step_by(usize::try_from(chunk_size).unwrap())
        .map(|from| BlockRange(from, from + chunk_size))
        .filter(|range| range.1 < end)
        .collect::<Vec<_>>();

    if tail == TailPolicy::IncludePartial {
        let next = ranges.last().map_or(start, |range| range.1);
        if next < end {
            ranges.push(BlockRange(next, end));
        }
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(size: u64) -> NonZeroU64 {
        NonZeroU64::new(size).unwrap()
    }

    #[test]
    fn test_ranges_are_contiguous_and_full_width() {
        let ranges = partition(11_184_524, 11_204_524, chunk(1000), TailPolicy::Drop);

        assert_eq!(ranges.first().unwrap().0, 11_184_524);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        for range in &ranges {
            assert_eq!(range.1 - range.0, 1000);
        }
    }

    #[test]
    fn test_span_smaller_than_chunk_is_empty() {
        assert!(partition(100, 250, chunk(1000), TailPolicy::Drop).is_empty());
    }

    #[test]
    fn test_empty_and_inverted_spans() {
        assert!(partition(500, 500, chunk(1000), TailPolicy::Drop).is_empty());
        assert!(partition(500, 400, chunk(1000), TailPolicy::Drop).is_empty());
        assert!(partition(500, 400, chunk(1000), TailPolicy::IncludePartial).is_empty());
    }

    #[test]
    fn test_trailing_partial_chunk_is_dropped() {
        let ranges = partition(0, 2500, chunk(1000), TailPolicy::Drop);
        assert_eq!(ranges, vec![BlockRange(0, 1000), BlockRange(1000, 2000)]);
    }

    #[test]
    fn test_include_partial_covers_the_tail() {
        let ranges = partition(0, 2500, chunk(1000), TailPolicy::IncludePartial);
        assert_eq!(
            ranges,
            vec![
                BlockRange(0, 1000),
                BlockRange(1000, 2000),
                BlockRange(2000, 2500)
            ]
        );

        // short span still gets covered
        let ranges = partition(100, 250, chunk(1000), TailPolicy::IncludePartial);
        assert_eq!(ranges, vec![BlockRange(100, 250)]);
    }

    #[test]
    fn test_exact_multiple_has_no_tail() {
        let ranges = partition(0, 3000, chunk(1000), TailPolicy::IncludePartial);
        assert_eq!(
            ranges,
            vec![
                BlockRange(0, 1000),
                BlockRange(1000, 2000),
                BlockRange(2000, 3000)
            ]
        );
    }
}
