/*!
 * Counts ranges enclosing given value.
 *
 * Input slice must be sorted ascending by `min` (as `RangePool` keeps it).
 * Scan goes from the beginning and stops at the first range starting above the value:
 * no later range can start at or below it, so none of them can enclose it.
 * Worst case (value above every `min`) is still O(N), typical case stops early.
 */

use crate::range_pool::Range;

/// Outcome of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Containment {
    /// Ranges enclosing the value.
    pub count: usize,
    /// Ranges inspected before scan stopped.
    #[allow(dead_code)]
    pub visited: usize,
}

/// Scans `sorted` and reports how many ranges enclose `value` and how far the scan went.
pub fn scan(value: u32, sorted: &[Range]) -> Containment {
    let mut count = 0;
    let mut visited = 0;
    for range in sorted {
        visited += 1;
        if value < range.min() {
            break;
        }
        if value < range.max() {
            count += 1;
        }
    }
    Containment { count, visited }
}

/// Number of ranges in `sorted` with `min <= value < max`.
#[inline]
pub fn count_enclosing(value: u32, sorted: &[Range]) -> usize {
    scan(value, sorted).count
}

///////////////////////////////////////////////////////////////////////////////////////////////////
/// Tests
///
