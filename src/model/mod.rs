//! Pharmacodynamic building blocks of the statin/cLDL model
//!
//! The model has two pieces:
//! - a single drug compartment with first-order decay and a once-daily bolus
//! - a turnover model for circulating LDL cholesterol, with zero-order
//!   synthesis inhibited by the drug through an Emax function and
//!   first-order elimination
//!
//! [`SimulationConfig`] holds the user-facing options, and validates into the
//! immutable [`Parameters`] consumed by the simulator.

mod config;

pub use config::{Parameters, SimulationConfig, MAX_DAYS_LIMIT};

/// First-order rate constant for a given half-life, `ln(2) / t½`
pub fn decay_constant(half_life: f64) -> f64 {
    std::f64::consts::LN_2 / half_life
}

/// Fractional inhibition produced by the drug at concentration `c`
///
/// `emax * c / (ec50 + c)`. Zero at `c = 0`, approaching `emax` as `c` grows.
pub fn drug_effect(emax: f64, ec50: f64, c: f64) -> f64 {
    emax * c / (ec50 + c)
}

/// Synthesis rate of cLDL under inhibition by drug concentration `c`
pub fn effective_synthesis(kin: f64, emax: f64, ec50: f64, c: f64) -> f64 {
    kin * (1.0 - drug_effect(emax, ec50, c))
}

/// Signed fraction by which `current` has fallen below `initial`
pub fn percentage_reduction(initial: f64, current: f64) -> f64 {
    (initial - current) / initial
}
