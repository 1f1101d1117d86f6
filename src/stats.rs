//! Damage model for a three-stat build.
//!
//! Attack scales linearly with points in `x`, crit rate with points in `y`
//! (hard-capped at 100%), crit damage with points in `z` (uncapped). Total
//! damage is `Attack * (1 + CritRate * CritDamage)`.
use serde::Serialize;

/// Attack percentage gained per point in `x`.
pub const ATTACK_PER_POINT: f64 = 3.0;
/// Crit rate percentage gained per point in `y`.
pub const CRIT_RATE_PER_POINT: f64 = 2.4;
/// Crit damage percentage gained per point in `z`.
pub const CRIT_DAMAGE_PER_POINT: f64 = 4.8;
/// Crit rate every build starts with on top of `CR0`.
pub const BASE_CRIT_RATE: f64 = 5.0;
/// Crit damage every build starts with on top of `CD0`.
pub const BASE_CRIT_DAMAGE: f64 = 50.0;
/// Crit rate saturates here, as a fraction.
pub const CRIT_RATE_CAP: f64 = 1.0;

/// The six scalars a build is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatParameters {
    /// Base attack multiplier.
    #[serde(rename = "K")]
    pub base_attack: f64,
    /// Attack scaling from an investment stat, in percent.
    #[serde(rename = "I")]
    pub investment: f64,
    /// Flat attack bonus.
    #[serde(rename = "F")]
    pub flat_attack: f64,
    /// Total allocatable points.
    #[serde(rename = "S")]
    pub budget: i64,
    /// Initial crit rate, in percent.
    #[serde(rename = "CR0")]
    pub initial_crit_rate: f64,
    /// Initial crit damage, in percent.
    #[serde(rename = "CD0")]
    pub initial_crit_damage: f64,
}

impl StatParameters {
    pub fn new(k: f64, i: f64, f: f64, s: i64, cr0: f64, cd0: f64) -> Self {
        Self {
            base_attack: k,
            investment: i,
            flat_attack: f,
            budget: s,
            initial_crit_rate: cr0,
            initial_crit_damage: cd0,
        }
    }

    /// Same parameters with a different point budget.
    pub fn with_budget(self, budget: i64) -> Self {
        Self { budget, ..self }
    }

    /// Attack for `x` points: `K * (1 + (I + 3x) / 100) + F`.
    pub fn attack(&self, x: f64) -> f64 {
        self.base_attack * (1.0 + (self.investment + ATTACK_PER_POINT * x) / 100.0)
            + self.flat_attack
    }

    /// Crit rate fraction for `y` points, never above [CRIT_RATE_CAP].
    pub fn crit_rate(&self, y: f64) -> f64 {
        self.uncapped_crit_rate(y).min(CRIT_RATE_CAP)
    }

    pub fn uncapped_crit_rate(&self, y: f64) -> f64 {
        (self.initial_crit_rate + BASE_CRIT_RATE + CRIT_RATE_PER_POINT * y) / 100.0
    }

    /// Crit damage fraction for `z` points.
    pub fn crit_damage(&self, z: f64) -> f64 {
        (self.initial_crit_damage + BASE_CRIT_DAMAGE + CRIT_DAMAGE_PER_POINT * z) / 100.0
    }

    /// Total damage for an allocation. Any negative component yields 0.
    pub fn damage(&self, x: f64, y: f64, z: f64) -> f64 {
        if x < 0.0 || y < 0.0 || z < 0.0 {
            return 0.0;
        }
        self.attack(x) * (1.0 + self.crit_rate(y) * self.crit_damage(z))
    }

    /// [StatParameters::damage] on an integer allocation.
    pub fn damage_at(&self, x: i64, y: i64, z: i64) -> f64 {
        self.damage(x as f64, y as f64, z as f64)
    }

    /// Minimum points in `y` for crit rate to reach the cap. Zero when `CR0`
    /// already saturates it.
    pub fn crit_rate_cap_points(&self) -> i64 {
        let missing = 100.0 * CRIT_RATE_CAP - (self.initial_crit_rate + BASE_CRIT_RATE);
        ((missing / CRIT_RATE_PER_POINT).ceil() as i64).max(0)
    }
}
