// src/design/budget.rs — Hardware-cost budget arithmetic
//
// cost = cores * core_cost + small_kb / small_kb_per_unit + shared_kb / shared_kb_per_unit

use crate::infra::config::BudgetPolicy;

/// Cost of the cores and the small level, before any shared level.
pub fn base_cost(policy: &BudgetPolicy, cores: u32, small_kb: u64) -> f64 {
    cores as f64 * policy.core_cost as f64 + small_kb as f64 / policy.small_kb_per_unit as f64
}

/// Largest shared-level size the remaining budget can buy, in KB.
pub fn max_shared_kb(policy: &BudgetPolicy, cores: u32, small_kb: u64) -> f64 {
    (policy.total as f64 - base_cost(policy, cores, small_kb)) * policy.shared_kb_per_unit as f64
}

/// Total cost of a full configuration, truncated to whole units.
pub fn total_cost(policy: &BudgetPolicy, cores: u32, small_kb: u64, shared_kb: u64) -> u64 {
    let cost = base_cost(policy, cores, small_kb)
        + shared_kb as f64 / policy.shared_kb_per_unit as f64;
    cost as u64
}

/// Largest power of two not above `value` (`value` >= 1).
fn floor_power_of_two(value: u64) -> u64 {
    1u64 << (63 - value.leading_zeros())
}

/// Candidate shared-level sizes, ascending.
///
/// Every power of two from the floor up to the affordable maximum, plus the
/// largest power of two below a non-power-of-two maximum. That fallback is
/// only added when it is at or above the floor.
pub fn shared_size_candidates(policy: &BudgetPolicy, cores: u32, small_kb: u64) -> Vec<u64> {
    let max_kb = max_shared_kb(policy, cores, small_kb);
    let mut sizes = Vec::new();
    if max_kb <= 0.0 {
        return sizes;
    }

    let floor = policy.shared_floor_kb.max(1).next_power_of_two();
    let mut size = floor;
    while (size as f64) <= max_kb {
        sizes.push(size);
        size = match size.checked_mul(2) {
            Some(next) => next,
            None => break,
        };
    }

    let max_whole = max_kb as u64;
    if max_whole > 0 && !max_whole.is_power_of_two() {
        let fallback = floor_power_of_two(max_whole);
        if fallback >= policy.shared_floor_kb && !sizes.contains(&fallback) {
            sizes.push(fallback);
            sizes.sort_unstable();
        }
    }

    sizes
}
