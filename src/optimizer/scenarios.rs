//! Candidate builds covering the interior optimum, the corners and edges of
//! the budget simplex, and the crit-rate-capped sub-problem.
//!
//! The enumerator never compares scenarios; ranking happens in the caller.

use tracing::debug;

use crate::optimizer::allocation::{Allocation, ContinuousPoint, ScenarioSource};
use crate::optimizer::coefficients::{Affine, PolynomialCoefficients, Quadratic};
use crate::optimizer::refine::best_integer_allocation;
use crate::stats::{StatParameters, ATTACK_PER_POINT, CRIT_DAMAGE_PER_POINT};

/// Every candidate worth evaluating, in generation order.
/// Empty for a negative budget.
pub fn scenario_solutions(params: &StatParameters) -> Vec<Allocation> {
    let mut solutions = Vec::new();
    if params.budget < 0 {
        return solutions;
    }
    let coeffs = PolynomialCoefficients::derive(params);

    solutions.extend(main_quadratic_solutions(params, &coeffs));
    solutions.extend(corner_solutions(params));
    solutions.extend(no_attack_solution(params, coeffs.crit_ratio_offset));
    solutions.extend(crit_rate_capped_solution(params));

    for candidate in &solutions {
        debug!(
            source = %candidate.source,
            x = candidate.x,
            y = candidate.y,
            z = candidate.z,
            damage = candidate.damage,
            "scenario candidate"
        );
    }
    solutions
}

/// Stationary points of `P(z)` on the balanced-ratio line, each refined to
/// integers. Roots that put any stat below zero are dropped.
pub fn main_quadratic_solutions(
    params: &StatParameters,
    coeffs: &PolynomialCoefficients,
) -> Vec<Allocation> {
    let s = params.budget as f64;
    let solved = coeffs.derivative.solve();
    // Damage is flat along the line; z = 0 stands in for all of it.
    let roots = if solved.is_infinite() {
        vec![0.0]
    } else {
        solved.roots()
    };

    roots
        .into_iter()
        .filter(|z| *z >= 0.0)
        .map(|z| ContinuousPoint {
            x: coeffs.x_at(s, z),
            y: coeffs.y_at(z),
            z,
        })
        .filter(ContinuousPoint::is_feasible)
        .filter_map(|point| {
            best_integer_allocation(
                point,
                params.budget,
                |x, y, z| params.damage_at(x, y, z),
                ScenarioSource::MainQuadratic,
            )
        })
        .collect()
}

/// All points in one stat: `(S,0,0)`, `(0,S,0)`, `(0,0,S)`.
pub fn corner_solutions(params: &StatParameters) -> [Allocation; 3] {
    let s = params.budget;
    let corner = |x, y, z, source| Allocation {
        x,
        y,
        z,
        damage: params.damage_at(x, y, z),
        source,
    };
    [
        corner(s, 0, 0, ScenarioSource::AllAttack),
        corner(0, s, 0, ScenarioSource::AllCritRate),
        corner(0, 0, s, ScenarioSource::AllCritDamage),
    ]
}

/// Optimum on the `x = 0` edge. The balanced ratio gives
/// `z = (S - C1) / 2`, `y = (S + C1) / 2`; only the two roundings that keep
/// `y + z = S` are compared.
pub fn no_attack_solution(params: &StatParameters, crit_ratio_offset: f64) -> Option<Allocation> {
    let s = params.budget as f64;
    if s <= crit_ratio_offset {
        return None;
    }
    let z = (s - crit_ratio_offset) / 2.0;
    let y = (s + crit_ratio_offset) / 2.0;
    if y <= 0.0 || z <= 0.0 {
        return None;
    }

    let (y_up, z_down) = (y.ceil() as i64, z.floor() as i64);
    let (y_down, z_up) = (y.floor() as i64, z.ceil() as i64);
    let more_crit_rate = params.damage_at(0, y_up, z_down);
    let more_crit_damage = params.damage_at(0, y_down, z_up);

    let (y, z, damage) = if more_crit_rate > more_crit_damage {
        (y_up, z_down, more_crit_rate)
    } else {
        (y_down, z_up, more_crit_damage)
    };
    Some(Allocation {
        x: 0,
        y,
        z,
        damage,
        source: ScenarioSource::NoAttack,
    })
}

/// Crit rate pinned at the minimum points that reach 100%, the remaining
/// `S' = S - y_cap` split between attack and crit damage.
///
/// With crit rate fixed at 1, `P(z) = A(S' - z) * (1 + CD(z))` is a concave
/// quadratic, so its vertex clamped to `[0, S']` and rounded both ways covers
/// the integer optimum. None when the budget cannot reach the cap.
pub fn crit_rate_capped_solution(params: &StatParameters) -> Option<Allocation> {
    let y_cap = params.crit_rate_cap_points();
    let remaining = params.budget - y_cap;
    if remaining < 0 {
        return None;
    }

    let damage = capped_damage_polynomial(params, remaining);
    let z_opt = if damage.a == 0.0 {
        if damage.b <= 0.0 {
            0.0
        } else {
            remaining as f64
        }
    } else {
        -damage.b / (2.0 * damage.a)
    };

    let clamp = |z: f64| (z as i64).clamp(0, remaining);
    let mut best: Option<Allocation> = None;
    for z in [clamp(z_opt.floor()), clamp(z_opt.ceil())] {
        let x = remaining - z;
        let candidate_damage = params.damage_at(x, y_cap, z);
        if best.map_or(true, |b| candidate_damage > b.damage) {
            best = Some(Allocation {
                x,
                y: y_cap,
                z,
                damage: candidate_damage,
                source: ScenarioSource::CritRateCapped,
            });
        }
    }
    best
}

/// `A(S' - z) * (1 + CD(z))` expanded in `z`.
fn capped_damage_polynomial(params: &StatParameters, remaining: i64) -> Quadratic {
    let attack = Affine {
        constant: params.attack(remaining as f64),
        slope: -params.base_attack * ATTACK_PER_POINT / 100.0,
    };
    let crit_damage = Affine {
        constant: 1.0 + params.crit_damage(0.0),
        slope: CRIT_DAMAGE_PER_POINT / 100.0,
    };
    attack.mul(crit_damage)
}
