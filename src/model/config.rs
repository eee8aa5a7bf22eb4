use std::path::Path;

use serde::{Deserialize, Serialize};

use super::decay_constant;
use crate::simulator::HOURS_PER_DAY;
use crate::StatinError;

/// Largest day cap whose hour count still fits the `u32` hour counter
pub const MAX_DAYS_LIMIT: u32 = u32::MAX / HOURS_PER_DAY;

/// User-facing configuration of a simulation run
///
/// Every field has a default, and the defaults reproduce the reference
/// scenario: simvastatin acid dosed once daily into a patient starting at
/// 200 mg/dL cLDL. Partial JSON objects are accepted; missing fields keep
/// their defaults.
///
/// ```rust,ignore
/// let config = SimulationConfig::default()
///     .with_daily_dose(8.8e-4)
///     .with_max_days(90);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Healthy cLDL concentration in mg/dL (default: 92.0)
    ///
    /// The run stops as soon as the treated cLDL falls below this level.
    pub baseline_cldl: f64,

    /// cLDL concentration at day 0 in mg/dL (default: 200.0)
    pub initial_cldl: f64,

    /// Zero-order cLDL synthesis per day in mg/dL (default: 1.14 * 24)
    pub synthesis_rate: f64,

    /// Maximal fractional inhibition of synthesis (default: 0.489)
    pub max_effect: f64,

    /// Drug concentration producing half the maximal effect, mg/dL (default: 0.0868e-4)
    pub half_effect_concentration: f64,

    /// First-order cLDL elimination constant
    ///
    /// When `None` it is derived as `synthesis_rate / baseline_cldl`.
    pub elimination_constant: Option<f64>,

    /// Factor applied to the elimination term of both the treated and the untreated arm (default: 0.4)
    pub elimination_scaling: f64,

    /// Drug concentration added at every day boundary, mg/dL (default: 4.4e-4)
    pub daily_dose: f64,

    /// Drug half-lives in hours (default: 2 and 5)
    ///
    /// The hourly decay constant is the mean of the two derived rate constants.
    pub half_lives: [f64; 2],

    /// Day at which the run is stopped regardless of cLDL (default: 360)
    ///
    /// Must lie in `1..=MAX_DAYS_LIMIT`.
    pub max_days: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            baseline_cldl: 92.0,
            initial_cldl: 200.0,
            synthesis_rate: 1.14 * 24.0,
            max_effect: 0.489,
            half_effect_concentration: 0.0868e-4,
            elimination_constant: None,
            elimination_scaling: 0.4,
            daily_dose: 4.4e-4,
            half_lives: [2.0, 5.0],
            max_days: 360,
        }
    }
}

impl SimulationConfig {
    /// Parse a configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, StatinError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StatinError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load the configuration for a run
    ///
    /// Reads `path` when given, otherwise starts from the reference scenario,
    /// then applies the dose and day-cap overrides that are set.
    pub fn load(
        path: Option<&Path>,
        daily_dose: Option<f64>,
        max_days: Option<u32>,
    ) -> Result<Self, StatinError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(dose) = daily_dose {
            config = config.with_daily_dose(dose);
        }
        if let Some(days) = max_days {
            config = config.with_max_days(days);
        }
        Ok(config)
    }

    pub fn with_baseline_cldl(mut self, baseline: f64) -> Self {
        self.baseline_cldl = baseline;
        self
    }

    pub fn with_initial_cldl(mut self, initial: f64) -> Self {
        self.initial_cldl = initial;
        self
    }

    pub fn with_synthesis_rate(mut self, kin: f64) -> Self {
        self.synthesis_rate = kin;
        self
    }

    pub fn with_max_effect(mut self, emax: f64) -> Self {
        self.max_effect = emax;
        self
    }

    pub fn with_half_effect_concentration(mut self, ec50: f64) -> Self {
        self.half_effect_concentration = ec50;
        self
    }

    /// Override the derived elimination constant
    pub fn with_elimination_constant(mut self, kout: f64) -> Self {
        self.elimination_constant = Some(kout);
        self
    }

    pub fn with_elimination_scaling(mut self, factor: f64) -> Self {
        self.elimination_scaling = factor;
        self
    }

    pub fn with_daily_dose(mut self, dose: f64) -> Self {
        self.daily_dose = dose;
        self
    }

    pub fn with_half_lives(mut self, first: f64, second: f64) -> Self {
        self.half_lives = [first, second];
        self
    }

    pub fn with_max_days(mut self, days: u32) -> Self {
        self.max_days = days;
        self
    }

    /// Check every option and derive the model [`Parameters`]
    pub fn validate(&self) -> Result<Parameters, StatinError> {
        positive("baseline_cldl", self.baseline_cldl)?;
        positive("initial_cldl", self.initial_cldl)?;
        non_negative("synthesis_rate", self.synthesis_rate)?;
        non_negative("max_effect", self.max_effect)?;
        if self.max_effect > 1.0 {
            return Err(StatinError::invalid("max_effect", self.max_effect));
        }
        positive("half_effect_concentration", self.half_effect_concentration)?;
        non_negative("elimination_scaling", self.elimination_scaling)?;
        non_negative("daily_dose", self.daily_dose)?;
        for half_life in self.half_lives {
            positive("half_lives", half_life)?;
        }
        if self.max_days == 0 || self.max_days > MAX_DAYS_LIMIT {
            return Err(StatinError::invalid("max_days", self.max_days));
        }

        let kout = match self.elimination_constant {
            Some(kout) => non_negative("elimination_constant", kout)?,
            None => self.synthesis_rate / self.baseline_cldl,
        };

        let decay_rate =
            (decay_constant(self.half_lives[0]) + decay_constant(self.half_lives[1])) / 2.0;
        // An hourly Euler step with k > 1 overshoots zero
        if decay_rate > 1.0 {
            return Err(StatinError::invalid(
                "half_lives",
                format!("{:?} (hourly decay constant {decay_rate:.4})", self.half_lives),
            ));
        }

        Ok(Parameters {
            baseline: self.baseline_cldl,
            initial: self.initial_cldl,
            kin: self.synthesis_rate,
            emax: self.max_effect,
            ec50: self.half_effect_concentration,
            kout,
            elimination_scaling: self.elimination_scaling,
            daily_dose: self.daily_dose,
            decay_rate,
            max_days: self.max_days,
        })
    }
}

fn positive(param: &str, value: f64) -> Result<f64, StatinError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(StatinError::invalid(param, value))
    }
}

fn non_negative(param: &str, value: f64) -> Result<f64, StatinError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(StatinError::invalid(param, value))
    }
}

/// Validated, immutable model parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Parameters {
    pub(crate) baseline: f64,
    pub(crate) initial: f64,
    pub(crate) kin: f64,
    pub(crate) emax: f64,
    pub(crate) ec50: f64,
    pub(crate) kout: f64,
    pub(crate) elimination_scaling: f64,
    pub(crate) daily_dose: f64,
    pub(crate) decay_rate: f64,
    pub(crate) max_days: u32,
}

impl Parameters {
    /// Healthy baseline cLDL (mg/dL)
    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    /// Initial cLDL (mg/dL)
    pub fn initial(&self) -> f64 {
        self.initial
    }

    /// Zero-order synthesis rate
    pub fn kin(&self) -> f64 {
        self.kin
    }

    pub fn emax(&self) -> f64 {
        self.emax
    }

    pub fn ec50(&self) -> f64 {
        self.ec50
    }

    /// First-order elimination constant
    pub fn kout(&self) -> f64 {
        self.kout
    }

    pub fn elimination_scaling(&self) -> f64 {
        self.elimination_scaling
    }

    pub fn daily_dose(&self) -> f64 {
        self.daily_dose
    }

    /// Hourly drug decay constant
    pub fn decay_rate(&self) -> f64 {
        self.decay_rate
    }

    pub fn max_days(&self) -> u32 {
        self.max_days
    }

    /// Level the untreated arm settles at, `kin / (kout * scaling)`
    ///
    /// Infinite when there is no elimination.
    pub fn untreated_steady_state(&self) -> f64 {
        self.kin / (self.kout * self.elimination_scaling)
    }
}
