//! Reduce damage to a polynomial in the crit damage points `z`.
//!
//! At an interior stationary point the marginal value of a crit rate point
//! and a crit damage point balance, which pins `y = z + C1`. With the budget
//! constraint that leaves `x = S - C1 - 2z`, so every stat becomes affine in
//! `z`, damage becomes a cubic, and its derivative a quadratic.

use crate::stats::{
    StatParameters, ATTACK_PER_POINT, BASE_CRIT_DAMAGE, BASE_CRIT_RATE, CRIT_DAMAGE_PER_POINT,
    CRIT_RATE_PER_POINT,
};

/// `constant + slope * t`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub constant: f64,
    pub slope: f64,
}

impl Affine {
    pub fn mul(self, other: Affine) -> Quadratic {
        Quadratic {
            a: self.slope * other.slope,
            b: self.constant * other.slope + self.slope * other.constant,
            c: self.constant * other.constant,
        }
    }

    pub fn mul_quadratic(self, q: Quadratic) -> Cubic {
        Cubic {
            d3: self.slope * q.a,
            d2: self.constant * q.a + self.slope * q.b,
            d1: self.constant * q.b + self.slope * q.c,
            d0: self.constant * q.c,
        }
    }
}

/// `a * t^2 + b * t + c`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Quadratic {
    pub fn plus_constant(self, k: f64) -> Self {
        Self { c: self.c + k, ..self }
    }
}

/// `d3 * t^3 + d2 * t^2 + d1 * t + d0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    pub d3: f64,
    pub d2: f64,
    pub d1: f64,
    pub d0: f64,
}

impl Cubic {
    pub fn eval(self, t: f64) -> f64 {
        ((self.d3 * t + self.d2) * t + self.d1) * t + self.d0
    }

    pub fn derivative(self) -> Quadratic {
        Quadratic {
            a: 3.0 * self.d3,
            b: 2.0 * self.d2,
            c: self.d1,
        }
    }
}

/// Each stat as an affine function of its own points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseCoefficients {
    pub attack: Affine,
    pub crit_rate: Affine,
    pub crit_damage: Affine,
}

impl BaseCoefficients {
    pub fn from_parameters(params: &StatParameters) -> Self {
        let k = params.base_attack;
        Self {
            attack: Affine {
                constant: k * (1.0 + params.investment / 100.0) + params.flat_attack,
                slope: k * ATTACK_PER_POINT / 100.0,
            },
            crit_rate: Affine {
                constant: (params.initial_crit_rate + BASE_CRIT_RATE) / 100.0,
                slope: CRIT_RATE_PER_POINT / 100.0,
            },
            crit_damage: Affine {
                constant: (params.initial_crit_damage + BASE_CRIT_DAMAGE) / 100.0,
                slope: CRIT_DAMAGE_PER_POINT / 100.0,
            },
        }
    }
}

/// Every stage of the reduction, kept for inspection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolynomialCoefficients {
    /// `C1`, the crit damage surplus over the 1:2 ratio, in points.
    pub crit_ratio_offset: f64,
    pub base: BaseCoefficients,
    /// `A(z)`
    pub attack: Affine,
    /// `CR(z)`
    pub crit_rate: Affine,
    /// `CD(z)`
    pub crit_damage: Affine,
    /// `CR(z) * CD(z)`
    pub crit_product: Quadratic,
    /// `P(z) = A(z) * (1 + CR(z) * CD(z))`
    pub damage: Cubic,
    /// `P'(z)`
    pub derivative: Quadratic,
}

/// `C1 = (CD0 - 2 * CR0 + 40) / 4.8`
pub fn crit_ratio_offset(initial_crit_rate: f64, initial_crit_damage: f64) -> f64 {
    (initial_crit_damage - 2.0 * initial_crit_rate + 40.0) / CRIT_DAMAGE_PER_POINT
}

/// `x = S - C1 - 2z`
pub fn attack_points_from_crit_damage(budget: f64, crit_ratio_offset: f64, z: f64) -> f64 {
    budget - crit_ratio_offset - 2.0 * z
}

/// `y = z + C1`
pub fn crit_rate_points_from_crit_damage(crit_ratio_offset: f64, z: f64) -> f64 {
    z + crit_ratio_offset
}

impl PolynomialCoefficients {
    pub fn derive(params: &StatParameters) -> Self {
        let c1 = crit_ratio_offset(params.initial_crit_rate, params.initial_crit_damage);
        let s = params.budget as f64;
        let base = BaseCoefficients::from_parameters(params);

        let attack = Affine {
            constant: base.attack.constant + base.attack.slope * (s - c1),
            slope: -2.0 * base.attack.slope,
        };
        let crit_rate = Affine {
            constant: base.crit_rate.constant + base.crit_rate.slope * c1,
            slope: base.crit_rate.slope,
        };
        let crit_damage = base.crit_damage;

        let crit_product = crit_rate.mul(crit_damage);
        let damage = attack.mul_quadratic(crit_product.plus_constant(1.0));

        Self {
            crit_ratio_offset: c1,
            base,
            attack,
            crit_rate,
            crit_damage,
            crit_product,
            damage,
            derivative: damage.derivative(),
        }
    }

    pub fn x_at(&self, budget: f64, z: f64) -> f64 {
        attack_points_from_crit_damage(budget, self.crit_ratio_offset, z)
    }

    pub fn y_at(&self, z: f64) -> f64 {
        crit_rate_points_from_crit_damage(self.crit_ratio_offset, z)
    }
}

/// Coefficients `(a, b, c)` of `P'(z) = a z^2 + b z + c`.
pub fn quadratic_coefficients(params: &StatParameters) -> Quadratic {
    PolynomialCoefficients::derive(params).derivative
}
