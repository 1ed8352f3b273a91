//! Circular comic numbering.
//!
//! Comics are numbered `1..=total` and paging past either end wraps around.

use std::num::NonZeroU32;

use crate::models::PageSize;

/// Map `n` back into `1..=total`, treating the range as circular.
///
/// Values below 1 wrap from the top, values above `total` wrap from the
/// bottom. Any `n` is accepted, not just one page width out of range.
pub fn normalize(n: i64, total: NonZeroU32) -> u32 {
    let total = i128::from(total.get());
    // widened so n - 1 cannot overflow; rem_euclid keeps it non-negative
    ((i128::from(n) - 1).rem_euclid(total) + 1) as u32
}

/// Comic numbers shown in each slot of a page centred on `focus`.
pub fn slot_numbers(focus: u32, page_size: PageSize, total: NonZeroU32) -> Vec<u32> {
    let size = page_size.get() as i64;
    let first = i64::from(focus) - size / 2;
    (0..size).map(|i| normalize(first + i, total)).collect()
}
