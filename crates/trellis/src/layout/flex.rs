use super::{Align, Justify};

/// Split `remaining` pixels among weights using the largest-remainder method.
///
/// Shares always sum to exactly `remaining` when any weight is positive.
/// Leftover pixels go to the largest fractional remainders, ties to the lower
/// index.
pub fn allocate_flex_shares(remaining: u32, weights: &[f32]) -> Vec<u32> {
    let total: f64 = weights.iter().map(|w| f64::from(w.max(0.0))).sum();
    if remaining == 0 || weights.is_empty() || total <= 0.0 {
        return vec![0; weights.len()];
    }

    let mut base = Vec::with_capacity(weights.len());
    let mut rem = Vec::with_capacity(weights.len());
    for w in weights {
        let exact = f64::from(remaining) * f64::from(w.max(0.0)) / total;
        let floor = exact.floor();
        base.push(floor as u32);
        rem.push(exact - floor);
    }

    let used: u32 = base.iter().fold(0u32, |a, b| a.saturating_add(*b));
    let extra = remaining.saturating_sub(used);
    if extra == 0 {
        return base;
    }

    let mut idx: Vec<usize> = (0..weights.len()).filter(|i| weights[*i] > 0.0).collect();
    idx.sort_by(|a, b| rem[*b].total_cmp(&rem[*a]).then_with(|| a.cmp(b)));
    for i in 0..extra as usize {
        if let Some(target) = idx.get(i % idx.len().max(1)) {
            base[*target] = base[*target].saturating_add(1);
        }
    }

    base
}

/// Offset of a child of `child_size` within `available` space for a
/// cross-axis alignment. `Stretch` behaves as `Start`.
pub fn align_offset(child_size: u32, available: u32, align: Align) -> u32 {
    match align {
        Align::Start | Align::Stretch => 0,
        Align::Center => available.saturating_sub(child_size) / 2,
        Align::End => available.saturating_sub(child_size),
    }
}

/// Offset of a run of children of `used` length within `available` main-axis
/// space.
pub fn justify_offset(used: u32, available: u32, justify: Justify) -> u32 {
    match justify {
        Justify::Start => 0,
        Justify::Center => available.saturating_sub(used) / 2,
        Justify::End => available.saturating_sub(used),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn shares_proportional() {
        assert_eq!(allocate_flex_shares(300, &[1.0, 2.0]), vec![100, 200]);
        assert_eq!(allocate_flex_shares(400, &[1.0, 3.0]), vec![100, 300]);
        assert_eq!(allocate_flex_shares(0, &[1.0, 3.0]), vec![0, 0]);
        assert_eq!(allocate_flex_shares(10, &[]), Vec::<u32>::new());
    }

    #[test]
    fn remainder_goes_to_lower_index_on_tie() {
        assert_eq!(allocate_flex_shares(10, &[1.0, 1.0, 1.0]), vec![4, 3, 3]);
        assert_eq!(allocate_flex_shares(1, &[1.0, 1.0]), vec![1, 0]);
    }

    #[test]
    fn fractional_weights() {
        assert_eq!(allocate_flex_shares(100, &[0.5, 1.5]), vec![25, 75]);
    }

    #[test]
    fn offsets() {
        assert_eq!(align_offset(10, 30, Align::Center), 10);
        assert_eq!(align_offset(10, 30, Align::End), 20);
        assert_eq!(align_offset(40, 30, Align::End), 0);
        assert_eq!(justify_offset(10, 31, Justify::Center), 10);
    }

    proptest! {
        #[test]
        fn shares_sum_to_remaining(remaining in 0u32..10_000, weights in prop::collection::vec(0.1f32..10.0, 1..8)) {
            let shares = allocate_flex_shares(remaining, &weights);
            prop_assert_eq!(shares.iter().map(|s| u64::from(*s)).sum::<u64>(), u64::from(remaining));
        }

        #[test]
        fn one_to_three_split(extra in 0u32..100_000) {
            let shares = allocate_flex_shares(extra, &[1.0, 3.0]);
            let ideal = f64::from(extra) * 0.75;
            prop_assert!((f64::from(shares[1]) - ideal).abs() <= 1.0);
        }
    }
}
