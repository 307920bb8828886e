// src/design/filter.rs — Narrow a design space before scheduling

use super::DesignPoint;

/// Keep points whose core count and small-level size are both allowed.
/// An empty allow-list places no constraint on that field.
pub fn filter_points(points: &[DesignPoint], cores: &[u32], small_kb: &[u64]) -> Vec<DesignPoint> {
    points
        .iter()
        .filter(|p| cores.is_empty() || cores.contains(&p.cores))
        .filter(|p| small_kb.is_empty() || small_kb.contains(&p.small_kb))
        .cloned()
        .collect()
}
