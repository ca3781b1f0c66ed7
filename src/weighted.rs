//! Weighted random selection
//!
//! A single primitive shared by every weighted draw in the crate: template
//! selection, biome-by-depth transitions, monster picks, and name banks.

use rand::Rng;

/// Pick one item from a slice, with probability proportional to `weight_of`.
///
/// Items with zero weight are never selected. Returns `None` when the slice
/// is empty or every weight is zero.
pub fn pick_weighted<'a, T, R, F>(items: &'a [T], rng: &mut R, weight_of: F) -> Option<&'a T>
where
    R: Rng,
    F: Fn(&T) -> u32,
{
    let total: u32 = items.iter().map(&weight_of).sum();
    if total == 0 {
        return None;
    }

    let mut roll = rng.gen_range(0..total);
    for item in items {
        let weight = weight_of(item);
        if roll < weight {
            return Some(item);
        }
        roll -= weight;
    }

    // Unreachable with a correct total, but the last item is the safe answer.
    items.last()
}

/// Pick one item uniformly from a slice.
pub fn pick<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_empty_slice_yields_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let items: Vec<u32> = Vec::new();
        assert!(pick_weighted(&items, &mut rng, |w| *w).is_none());
    }

    #[test]
    fn test_zero_total_weight_yields_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let items = [0_u32, 0, 0];
        assert!(pick_weighted(&items, &mut rng, |w| *w).is_none());
    }

    #[test]
    fn test_zero_weight_item_never_selected() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let items = [("never", 0_u32), ("sometimes", 3), ("often", 9)];
        for _ in 0..500 {
            let picked = pick_weighted(&items, &mut rng, |(_, w)| *w).unwrap();
            assert_ne!(picked.0, "never");
        }
    }

    #[test]
    fn test_heavier_item_wins_more_often() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let items = [("light", 1_u32), ("heavy", 20)];
        let mut heavy = 0;
        for _ in 0..1000 {
            if pick_weighted(&items, &mut rng, |(_, w)| *w).unwrap().0 == "heavy" {
                heavy += 1;
            }
        }
        assert!(heavy > 800, "heavy picked only {} of 1000 draws", heavy);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let items = [("a", 2_u32), ("b", 5), ("c", 3)];
        let mut first = ChaCha8Rng::seed_from_u64(1234);
        let mut second = ChaCha8Rng::seed_from_u64(1234);
        for _ in 0..50 {
            let x = pick_weighted(&items, &mut first, |(_, w)| *w).unwrap();
            let y = pick_weighted(&items, &mut second, |(_, w)| *w).unwrap();
            assert_eq!(x.0, y.0);
        }
    }
}
