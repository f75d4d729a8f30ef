/// Percentile by linear interpolation between bracketing order statistics.
///
/// For sorted values `v[0..n-1]` and percentile `p`, the rank is
/// `p / 100 * (n - 1)`; an integral rank selects that value, otherwise the
/// two neighbors are blended by the fractional part. An empty slice yields
/// zero; a single sample is every percentile.
pub(super) fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let Some(first) = sorted.first() else {
        return 0.0;
    };
    let Some(last) = sorted.last() else {
        return 0.0;
    };
    if sorted.len() == 1 {
        return *first;
    }

    let max_index = sorted.len().saturating_sub(1);
    let rank = pct / 100.0 * (max_index as f64);
    if rank <= 0.0 {
        return *first;
    }
    if rank >= max_index as f64 {
        return *last;
    }

    let lower_index = rank.floor() as usize;
    let upper_index = rank.ceil() as usize;
    let lower_value = sorted.get(lower_index).copied().unwrap_or(0.0);
    if lower_index == upper_index {
        return lower_value;
    }
    let upper_value = sorted.get(upper_index).copied().unwrap_or(0.0);
    let weight = rank - (lower_index as f64);

    lower_value + weight * (upper_value - lower_value)
}
