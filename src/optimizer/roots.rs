//! Real roots of `a t^2 + b t + c = 0`, degrading to the linear and constant
//! cases when leading coefficients vanish. Feasibility filtering is the
//! caller's job.

use crate::optimizer::coefficients::Quadratic;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadraticRoots {
    None,
    One(f64),
    Two(f64, f64),
    /// `a == b == c == 0`: every `t` is a root.
    Infinite,
}

impl QuadraticRoots {
    /// Finite roots in solver order. [QuadraticRoots::Infinite] yields none.
    pub fn roots(self) -> Vec<f64> {
        match self {
            Self::None | Self::Infinite => Vec::new(),
            Self::One(r) => vec![r],
            Self::Two(r1, r2) => vec![r1, r2],
        }
    }

    pub fn is_infinite(self) -> bool {
        matches!(self, Self::Infinite)
    }
}

pub fn solve_quadratic(a: f64, b: f64, c: f64) -> QuadraticRoots {
    if a == 0.0 {
        if b == 0.0 {
            return if c == 0.0 {
                QuadraticRoots::Infinite
            } else {
                QuadraticRoots::None
            };
        }
        return QuadraticRoots::One(-c / b);
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        QuadraticRoots::None
    } else if discriminant == 0.0 {
        QuadraticRoots::One(-b / (2.0 * a))
    } else {
        let sqrt_d = discriminant.sqrt();
        QuadraticRoots::Two((-b + sqrt_d) / (2.0 * a), (-b - sqrt_d) / (2.0 * a))
    }
}

impl Quadratic {
    pub fn solve(self) -> QuadraticRoots {
        solve_quadratic(self.a, self.b, self.c)
    }
}
