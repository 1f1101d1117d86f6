//! Snap a continuous optimum to the best nearby integer build.

use tracing::debug;

use crate::optimizer::allocation::{Allocation, ContinuousPoint, ScenarioSource};

/// Half-width of the window searched around the continuous `x` and `y`.
pub const SEARCH_RADIUS: i64 = 2;

/// Integer window `[max(0, v - r), v + r]`, truncating toward zero.
fn window(v: f64) -> std::ops::Range<i64> {
    let radius = SEARCH_RADIUS as f64;
    let start = (v - radius).max(0.0) as i64;
    let end = (v + radius + 1.0) as i64;
    start..end
}

/// Best `(xi, yi, S - xi - yi)` with every component non-negative, searching
/// the window around `point.x` and `point.y`. `z` is never searched directly;
/// it absorbs whatever the budget leaves. Ties keep the first build found.
/// Returns None when nothing in the window fits the budget.
pub fn best_integer_allocation<F>(
    point: ContinuousPoint,
    budget: i64,
    damage_fn: F,
    source: ScenarioSource,
) -> Option<Allocation>
where
    F: Fn(i64, i64, i64) -> f64,
{
    let mut best: Option<Allocation> = None;

    for xi in window(point.x) {
        for yi in window(point.y) {
            let zi = budget - xi - yi;
            if zi < 0 {
                continue;
            }
            let damage = damage_fn(xi, yi, zi);
            if best.map_or(true, |b| damage > b.damage) {
                best = Some(Allocation {
                    x: xi,
                    y: yi,
                    z: zi,
                    damage,
                    source,
                });
            }
        }
    }

    match &best {
        Some(found) => debug!(
            source = %source,
            x = found.x,
            y = found.y,
            z = found.z,
            damage = found.damage,
            "refined continuous point"
        ),
        None => debug!(source = %source, x = point.x, y = point.y, "no integer build in window"),
    }
    best
}
