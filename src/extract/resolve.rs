/// Pick the single best price from one stage's candidate pool.
///
/// Non-finite and non-positive values are dropped first. A currency-aware
/// plausibility floor (50 for rupee-hinted pools, 0.5 otherwise) then weeds
/// out stray small numbers like ratings and counts; if that empties the pool
/// the smallest positive candidate wins instead. Among the survivors the most
/// frequent value wins, ties going to the smaller one.
pub fn resolve(pool: &[f64], inr_hint: bool) -> Option<f64> {
    let positive: Vec<f64> = pool
        .iter()
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .collect();
    if positive.is_empty() {
        return None;
    }

    let floor = if inr_hint { 50.0 } else { 0.5 };
    let mut plausible: Vec<f64> = positive.iter().copied().filter(|v| *v >= floor).collect();
    if plausible.is_empty() {
        return positive.into_iter().reduce(f64::min);
    }

    plausible.sort_by(f64::total_cmp);

    // ascending scan: on equal counts the smaller value is kept
    let mut best = plausible[0];
    let mut best_count = 0usize;
    let mut i = 0;
    while i < plausible.len() {
        let mut j = i;
        while j < plausible.len() && plausible[j] == plausible[i] {
            j += 1;
        }
        if j - i > best_count {
            best_count = j - i;
            best = plausible[i];
        }
        i = j;
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inr_floor_filters_small_values() {
        assert_eq!(resolve(&[2.0, 1500.0], true), Some(1500.0));
    }

    #[test]
    fn empty_after_floor_falls_back_to_minimum() {
        assert_eq!(resolve(&[2.0], true), Some(2.0));
        assert_eq!(resolve(&[0.2, 0.1], false), Some(0.1));
    }

    #[test]
    fn default_floor_is_half_unit() {
        assert_eq!(resolve(&[0.3, 12.5], false), Some(12.5));
    }

    #[test]
    fn most_frequent_wins() {
        assert_eq!(resolve(&[999.0, 999.0, 1200.0], true), Some(999.0));
        assert_eq!(resolve(&[1200.0, 999.0, 1200.0], true), Some(1200.0));
    }

    #[test]
    fn frequency_tie_goes_to_smaller() {
        assert_eq!(resolve(&[1200.0, 999.0], true), Some(999.0));
    }

    #[test]
    fn rejects_nonpositive_and_nonfinite() {
        assert_eq!(resolve(&[0.0, -5.0, f64::NAN], false), None);
        assert_eq!(resolve(&[], false), None);
    }
}
