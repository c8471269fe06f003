//! Deterministic azimuthal ordering of crosses.

use crate::cross::Cross;

/// Sorts crosses by decreasing azimuth, see [`Cross::azimuth_cmp`].
pub fn sort_by_azimuth(crosses: &mut [Cross]) {
    crosses.sort_by(Cross::azimuth_cmp);
}

/// True if the crosses are in azimuth order.
#[must_use]
pub fn is_azimuth_sorted(crosses: &[Cross]) -> bool {
    crosses
        .windows(2)
        .all(|pair| pair[0].azimuth_cmp(&pair[1]).is_le())
}
