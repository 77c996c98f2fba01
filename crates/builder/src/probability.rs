use crate::loot::LootPool;

/// Drop chance of each entry in percent: `weight / total * 100`.
///
/// A pool whose weights sum to zero (only reachable through hand-edited
/// trees) reports `0.0` for every entry.
pub fn entry_probabilities(pool: &LootPool) -> Vec<f64> {
    let total = pool.total_weight();
    pool.entries
        .iter()
        .map(|entry| {
            if total == 0 {
                0.0
            } else {
                f64::from(entry.weight) / total as f64 * 100.0
            }
        })
        .collect()
}
