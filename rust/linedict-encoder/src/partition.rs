use std::ops::Range;

/// Splits `total_lines` into `worker_count` contiguous ranges of
/// `total_lines / worker_count` lines each, folding the remainder into the last range.
///
/// Leading ranges are empty when there are fewer lines than workers.
/// `worker_count` must be positive.
pub fn partition_lines(total_lines: usize, worker_count: usize) -> Vec<Range<usize>> {
    debug_assert!(worker_count > 0);
    let per_worker = total_lines / worker_count;
    (0..worker_count)
        .map(|i| {
            let start = i * per_worker;
            let end = if i + 1 == worker_count {
                total_lines
            } else {
                start + per_worker
            };
            start..end
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::partition_lines;

    #[test]
    fn test_even_split() {
        assert_eq!(partition_lines(8, 4), vec![0..2, 2..4, 4..6, 6..8]);
    }

    #[test]
    fn test_remainder_goes_to_last() {
        assert_eq!(partition_lines(10, 3), vec![0..3, 3..6, 6..10]);
        assert_eq!(partition_lines(4, 2), vec![0..2, 2..4]);
    }

    #[test]
    fn test_fewer_lines_than_workers() {
        assert_eq!(partition_lines(2, 4), vec![0..0, 0..0, 0..0, 0..2]);
        assert_eq!(partition_lines(0, 3), vec![0..0, 0..0, 0..0]);
    }

    #[test]
    fn test_ranges_cover_input() {
        for total in 0..50 {
            for workers in 1..10 {
                let ranges = partition_lines(total, workers);
                assert_eq!(ranges.len(), workers);
                assert_eq!(ranges[0].start, 0);
                assert_eq!(ranges[workers - 1].end, total);
                assert!(ranges.windows(2).all(|w| w[0].end == w[1].start));
            }
        }
    }
}
