//! Optimal allocation of a fixed point budget across attack, crit rate and
//! crit damage.

pub mod cli;
pub mod input;
pub mod optimizer;
pub mod output;
pub mod parallel;
pub mod stats;
