//! Work partitioning
//!
//! Every stage splits its outer loop the same way: task `index` of `total`
//! gets the contiguous range `[index * count / total, (index + 1) * count / total)`.
//! The ranges for one `(total, count)` pair tile `[0, count)` exactly, and
//! each has `count / total` or `count / total + 1` elements.

use std::ops::Range;

/// Range of `count` items assigned to task `index` out of `total`.
///
/// # Panics
///
/// Panics if `total == 0` or `index >= total`.
pub fn partition(index: usize, total: usize, count: usize) -> Range<usize> {
    assert!(total > 0 && index < total, "task {index} of {total}");
    let (index, total, count) = (index as u64, total as u64, count as u64);
    let start = index * count / total;
    let end = ((index + 1) * count / total).min(count);
    start as usize..end as usize
}
