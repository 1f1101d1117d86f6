//! Request boundary: turn caller-supplied text into [StatParameters].
//!
//! The optimizer trusts its inputs, so everything non-numeric, missing or
//! out of contract is rejected here.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::stats::StatParameters;

/// Environment variable naming a default parameter file.
pub const PARAMS_PATH_ENV: &str = "CRITALLOC_PARAMS";

/// Largest `S` accepted. Every integer up to here is exact as an `f64`.
pub const MAX_BUDGET: f64 = 9_007_199_254_740_992.0;

/// Largest `S` a budget sweep will walk, one optimization per budget.
pub const MAX_SWEEP_BUDGET: i64 = 100_000;

/// Field names in the order positional arguments are given.
pub const FIELD_ORDER: [&str; 6] = ["K", "I", "F", "S", "CR0", "CD0"];

#[derive(Debug, Error)]
pub enum InputError {
    #[error("missing value for {0}")]
    Missing(&'static str),
    #[error("invalid {field} '{value}': expected a number")]
    NotNumeric { field: &'static str, value: String },
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("S must be a whole number of points, got {0}")]
    FractionalBudget(f64),
    #[error("S must not be negative, got {0}")]
    NegativeBudget(f64),
    #[error("S must be at most 2^53, got {0}")]
    BudgetOutOfRange(f64),
    #[error("sweep budget {budget} exceeds the maximum of {max}")]
    SweepTooLarge { budget: i64, max: i64 },
    #[error("failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid parameter file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parameters as they arrive, before the budget is checked for integrality.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawParameters {
    #[serde(rename = "K")]
    pub k: f64,
    #[serde(rename = "I")]
    pub i: f64,
    #[serde(rename = "F")]
    pub f: f64,
    #[serde(rename = "S")]
    pub s: f64,
    #[serde(rename = "CR0")]
    pub cr0: f64,
    #[serde(rename = "CD0")]
    pub cd0: f64,
}

impl RawParameters {
    pub fn validate(self) -> Result<StatParameters, InputError> {
        let fields = [self.k, self.i, self.f, self.s, self.cr0, self.cd0];
        for (field, value) in FIELD_ORDER.into_iter().zip(fields) {
            if !value.is_finite() {
                return Err(InputError::NotFinite { field, value });
            }
        }
        if self.s < 0.0 {
            return Err(InputError::NegativeBudget(self.s));
        }
        if self.s.fract() != 0.0 {
            return Err(InputError::FractionalBudget(self.s));
        }
        if self.s > MAX_BUDGET {
            return Err(InputError::BudgetOutOfRange(self.s));
        }
        Ok(StatParameters::new(
            self.k,
            self.i,
            self.f,
            self.s as i64,
            self.cr0,
            self.cd0,
        ))
    }
}

fn parse_field(field: &'static str, raw: Option<&str>) -> Result<f64, InputError> {
    let raw = raw.ok_or(InputError::Missing(field))?;
    raw.trim().parse::<f64>().map_err(|_| InputError::NotNumeric {
        field,
        value: raw.to_string(),
    })
}

fn arg<S: AsRef<str>>(args: &[S], idx: usize) -> Option<&str> {
    args.get(idx).map(|value| value.as_ref())
}

/// Parse `K I F S CR0 CD0` from positional arguments.
pub fn parameters_from_args<S: AsRef<str>>(args: &[S]) -> Result<StatParameters, InputError> {
    RawParameters {
        k: parse_field("K", arg(args, 0))?,
        i: parse_field("I", arg(args, 1))?,
        f: parse_field("F", arg(args, 2))?,
        s: parse_field("S", arg(args, 3))?,
        cr0: parse_field("CR0", arg(args, 4))?,
        cd0: parse_field("CD0", arg(args, 5))?,
    }
    .validate()
}

/// Parse a JSON object with fields `K, I, F, S, CR0, CD0`.
pub fn parameters_from_json(body: &str) -> Result<StatParameters, InputError> {
    let raw: RawParameters = serde_json::from_str(body)?;
    raw.validate()
}

/// Sweeps run one optimization per budget in `0..=budget`, so the range is
/// capped at [MAX_SWEEP_BUDGET].
pub fn check_sweep_budget(budget: i64) -> Result<(), InputError> {
    if budget > MAX_SWEEP_BUDGET {
        return Err(InputError::SweepTooLarge {
            budget,
            max: MAX_SWEEP_BUDGET,
        });
    }
    Ok(())
}

pub fn load_parameters(path: impl AsRef<Path>) -> Result<StatParameters, InputError> {
    let body = fs::read_to_string(path)?;
    parameters_from_json(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_arguments_parse_in_field_order() {
        let params = parameters_from_args(&["1000", "60", "100", "40", "5", "50"])
            .expect("valid arguments");
        assert_eq!(params, StatParameters::new(1000.0, 60.0, 100.0, 40, 5.0, 50.0));
    }

    #[test]
    fn missing_argument_names_the_field() {
        let err = parameters_from_args(&["1000", "60", "100", "40"]).unwrap_err();
        assert!(matches!(err, InputError::Missing("CR0")));
    }

    #[test]
    fn non_numeric_argument_is_rejected() {
        let err = parameters_from_args(&["1000", "lots", "100", "40", "5", "50"]).unwrap_err();
        assert_eq!(err.to_string(), "invalid I 'lots': expected a number");
    }

    #[test]
    fn budget_must_be_a_non_negative_integer() {
        let fractional = parameters_from_args(&["1", "0", "0", "2.5", "5", "50"]).unwrap_err();
        assert!(matches!(fractional, InputError::FractionalBudget(_)));
        let negative = parameters_from_args(&["1", "0", "0", "-3", "5", "50"]).unwrap_err();
        assert!(matches!(negative, InputError::NegativeBudget(_)));
        let whole = parameters_from_args(&["1", "0", "0", "40.0", "5", "50"]).expect("integral");
        assert_eq!(whole.budget, 40);
    }

    #[test]
    fn budget_beyond_exact_float_range_is_rejected() {
        let err = parameters_from_args(&["1000", "60", "100", "1e300", "5", "50"]).unwrap_err();
        assert!(matches!(err, InputError::BudgetOutOfRange(_)));
        let err = parameters_from_args(&["1000", "60", "100", "9007199254740994", "5", "50"])
            .unwrap_err();
        assert!(matches!(err, InputError::BudgetOutOfRange(_)));
        let edge = parameters_from_args(&["1000", "60", "100", "9007199254740992", "5", "50"])
            .expect("2^53 is exact");
        assert_eq!(edge.budget, 1_i64 << 53);
    }

    #[test]
    fn sweep_budget_is_capped() {
        assert!(check_sweep_budget(MAX_SWEEP_BUDGET).is_ok());
        let err = check_sweep_budget(MAX_SWEEP_BUDGET + 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "sweep budget 100001 exceeds the maximum of 100000"
        );
    }

    #[test]
    fn json_body_accepts_short_field_names() {
        let params = parameters_from_json(r#"{"K":1000,"I":60,"F":100,"S":40,"CR0":5,"CD0":50}"#)
            .expect("valid body");
        assert_eq!(params.budget, 40);
        assert_eq!(params.initial_crit_damage, 50.0);
    }

    #[test]
    fn json_body_rejects_non_numeric_fields() {
        let err = parameters_from_json(r#"{"K":"big","I":60,"F":100,"S":40,"CR0":5,"CD0":50}"#)
            .unwrap_err();
        assert!(matches!(err, InputError::Json(_)));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let err = parameters_from_args(&["inf", "0", "0", "4", "5", "50"]).unwrap_err();
        assert!(matches!(err, InputError::NotFinite { field: "K", .. }));
    }
}
