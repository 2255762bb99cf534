//! Selection policies shared by the aggregators
//!
//! - Best-N rounds, with optional mandatory final round
//! - Top-K with ties, used per hole for team scoring

use rustc_hash::{FxHashMap, FxHashSet};

/// Choose which rounds count toward a best-N total.
///
/// Only rounds with a recorded total are candidates. When `final_required`
/// is set and the final round has a total it takes one of the `n` slots;
/// otherwise all slots go to the best of the rest. Ties are broken by
/// position in `ordered_round_ids`. `n == 0` is treated as 1.
///
/// Returns exactly `min(n, rounds with a total)` ids.
pub fn pick_best_n<'a>(
    totals: &FxHashMap<&'a str, i32>,
    ordered_round_ids: &[&'a str],
    n: usize,
    final_round_id: Option<&'a str>,
    final_required: bool,
) -> FxHashSet<&'a str> {
    let mut slots = n.max(1);
    let mut selected: FxHashSet<&'a str> = FxHashSet::default();

    if final_required {
        if let Some(final_id) = final_round_id.filter(|id| totals.contains_key(id)) {
            selected.insert(final_id);
            slots -= 1;
        }
    }

    let mut seen: FxHashSet<&'a str> = FxHashSet::default();
    let mut candidates: Vec<(&'a str, i32)> = ordered_round_ids
        .iter()
        .filter(|id| !selected.contains(*id) && seen.insert(**id))
        .filter_map(|id| totals.get(id).map(|&total| (*id, total)))
        .collect();
    // Stable sort keeps round order for equal totals
    candidates.sort_by(|a, b| b.1.cmp(&a.1));

    selected.extend(candidates.into_iter().take(slots).map(|(id, _)| id));
    selected
}

/// Outcome of ranking one hole's positive scores
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoleSelection {
    /// Entries summed into the total (at most K)
    pub counted: Vec<usize>,
    /// Entries tied with the cutoff that did not fit in K
    pub qualifying: Vec<usize>,
}

/// Rank positive entries descending and keep the top `k`.
///
/// Equal values keep their input order. Entries beyond `k` whose value
/// equals the K-th value are reported as qualifying but not counted.
/// Indices refer to `points`; `None` and zero entries are never selected.
pub fn top_k_with_ties(points: &[Option<i32>], k: usize) -> HoleSelection {
    let k = k.max(1);
    let mut ranked: Vec<(usize, i32)> = points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.filter(|&v| v > 0).map(|v| (i, v)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    if ranked.len() <= k {
        return HoleSelection {
            counted: ranked.into_iter().map(|(i, _)| i).collect(),
            qualifying: Vec::new(),
        };
    }

    let cutoff = ranked[k - 1].1;
    let qualifying = ranked[k..]
        .iter()
        .take_while(|(_, v)| *v == cutoff)
        .map(|(i, _)| *i)
        .collect();
    let counted = ranked[..k].iter().map(|(i, _)| *i).collect();

    HoleSelection { counted, qualifying }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn totals<'a>(pairs: &[(&'a str, i32)]) -> FxHashMap<&'a str, i32> {
        pairs.iter().copied().collect()
    }

    fn sorted(set: FxHashSet<&str>) -> Vec<&str> {
        let mut v: Vec<&str> = set.into_iter().collect();
        v.sort();
        v
    }

    #[test]
    fn test_best_n_basic() {
        let t = totals(&[("r1", 30), ("r2", 25), ("r3", 35), ("r4", 20)]);
        let order = ["r1", "r2", "r3", "r4"];
        let picked = pick_best_n(&t, &order, 2, Some("r4"), false);
        assert_eq!(sorted(picked), vec!["r1", "r3"]);
    }

    #[test]
    fn test_best_n_final_required() {
        let t = totals(&[("r1", 30), ("r2", 25), ("r3", 35), ("r4", 20)]);
        let order = ["r1", "r2", "r3", "r4"];
        let picked = pick_best_n(&t, &order, 2, Some("r4"), true);
        assert_eq!(sorted(picked), vec!["r3", "r4"]);
    }

    #[test]
    fn test_best_n_final_without_total_falls_back() {
        let t = totals(&[("r1", 30), ("r2", 25), ("r3", 35)]);
        let order = ["r1", "r2", "r3", "r4"];
        let picked = pick_best_n(&t, &order, 2, Some("r4"), true);
        assert_eq!(sorted(picked), vec!["r1", "r3"]);
    }

    #[test]
    fn test_best_n_ties_prefer_earlier_rounds() {
        let t = totals(&[("b", 30), ("a", 30), ("c", 30)]);
        // Round order, not id order, decides
        let order = ["c", "b", "a"];
        let picked = pick_best_n(&t, &order, 2, None, false);
        assert_eq!(sorted(picked), vec!["b", "c"]);
    }

    #[test]
    fn test_best_n_zero_is_one() {
        let t = totals(&[("r1", 10), ("r2", 40)]);
        let picked = pick_best_n(&t, &["r1", "r2"], 0, None, false);
        assert_eq!(sorted(picked), vec!["r2"]);
    }

    #[test]
    fn test_best_n_cardinality_random() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let ids = ["r1", "r2", "r3", "r4", "r5", "r6"];
        for _ in 0..500 {
            let mut t: FxHashMap<&str, i32> = FxHashMap::default();
            for id in ids {
                if rng.gen_bool(0.7) {
                    t.insert(id, rng.gen_range(0..45));
                }
            }
            let n = rng.gen_range(0..8);
            let final_required = rng.gen_bool(0.5);
            let picked = pick_best_n(&t, &ids, n, Some("r6"), final_required);

            assert_eq!(picked.len(), n.max(1).min(t.len()));
            assert!(picked.iter().all(|id| t.contains_key(id)));
            if final_required && t.contains_key("r6") {
                assert!(picked.contains("r6"));
            }
        }
    }

    #[test]
    fn test_top_k_simple() {
        let sel = top_k_with_ties(&[Some(3), Some(1), Some(4), None], 2);
        assert_eq!(sel.counted, vec![2, 0]);
        assert!(sel.qualifying.is_empty());
    }

    #[test]
    fn test_top_k_excludes_zero_and_missing() {
        let sel = top_k_with_ties(&[Some(0), None, Some(2)], 2);
        assert_eq!(sel.counted, vec![2]);
    }

    #[test]
    fn test_top_k_ties_at_cutoff() {
        let sel = top_k_with_ties(&[Some(2), Some(3), Some(2), Some(2), Some(1)], 2);
        assert_eq!(sel.counted, vec![1, 0]);
        assert_eq!(sel.qualifying, vec![2, 3]);
    }

    #[test]
    fn test_top_k_ties_above_cutoff_all_counted() {
        let sel = top_k_with_ties(&[Some(3), Some(3), Some(2)], 2);
        assert_eq!(sel.counted, vec![0, 1]);
        assert!(sel.qualifying.is_empty());
    }
}
