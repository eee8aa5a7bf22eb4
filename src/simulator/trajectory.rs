use ndarray::Array1;
use serde::{Serialize, Serializer};

use super::HOURS_PER_DAY;

/// Time courses recorded during a simulation run
///
/// The hourly group shares the `hours` time index (in fractional days) and
/// the daily group shares the `days` index. Every sequence starts with the
/// initial sample at time zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectories {
    #[serde(serialize_with = "as_seq")]
    hours: Array1<f64>,
    #[serde(serialize_with = "as_seq")]
    drug: Array1<f64>,
    #[serde(serialize_with = "as_seq")]
    days: Array1<f64>,
    #[serde(serialize_with = "as_seq")]
    treated: Array1<f64>,
    #[serde(serialize_with = "as_seq")]
    untreated: Array1<f64>,
    #[serde(serialize_with = "as_seq")]
    healthy: Array1<f64>,
    #[serde(serialize_with = "as_seq")]
    reduction: Array1<f64>,
}

fn as_seq<S: Serializer>(array: &Array1<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(array.iter())
}

impl Trajectories {
    /// Hourly time index, in days (`hour / 24`)
    pub fn hours(&self) -> &Array1<f64> {
        &self.hours
    }

    /// Drug concentration at every hour (mg/dL)
    pub fn drug(&self) -> &Array1<f64> {
        &self.drug
    }

    /// Daily time index, in whole days
    pub fn days(&self) -> &Array1<f64> {
        &self.days
    }

    /// cLDL of the treated patient at every day (mg/dL)
    pub fn treated(&self) -> &Array1<f64> {
        &self.treated
    }

    /// cLDL of the same patient without drug (mg/dL)
    pub fn untreated(&self) -> &Array1<f64> {
        &self.untreated
    }

    /// Healthy baseline cLDL, repeated for every day (mg/dL)
    pub fn healthy(&self) -> &Array1<f64> {
        &self.healthy
    }

    /// Signed fractional reduction of treated cLDL relative to day 0
    pub fn reduction(&self) -> &Array1<f64> {
        &self.reduction
    }

    /// Number of daily samples, including day 0
    pub fn n_days(&self) -> usize {
        self.days.len()
    }

    /// Number of hourly samples, including hour 0
    pub fn n_hours(&self) -> usize {
        self.hours.len()
    }

    /// Highest drug concentration reached
    pub fn peak_drug(&self) -> f64 {
        self.drug.iter().copied().fold(0.0, f64::max)
    }

    /// First day on which treated cLDL is strictly below `threshold`
    pub fn day_below(&self, threshold: f64) -> Option<u32> {
        self.treated
            .iter()
            .zip(self.days.iter())
            .find(|(cldl, _)| **cldl < threshold)
            .map(|(_, day)| *day as u32)
    }
}

/// Upper bound on the days of storage reserved up front
const RESERVED_DAYS: u32 = 366;

/// Append-only accumulator used while the simulator is running
#[derive(Debug, Clone)]
pub(crate) struct Recorder {
    hours: Vec<f64>,
    drug: Vec<f64>,
    days: Vec<f64>,
    treated: Vec<f64>,
    untreated: Vec<f64>,
    healthy: Vec<f64>,
    reduction: Vec<f64>,
}

impl Recorder {
    /// Start a recording with the time-zero sample
    ///
    /// Capacity is reserved for at most [`RESERVED_DAYS`] days; longer runs
    /// grow the buffers as they go.
    pub(crate) fn new(max_days: u32, drug: f64, cldl: f64, healthy: f64) -> Self {
        let reserved = max_days.min(RESERVED_DAYS) as usize;
        let n_days = reserved + 1;
        let n_hours = reserved * HOURS_PER_DAY as usize + 1;

        let mut recorder = Self {
            hours: Vec::with_capacity(n_hours),
            drug: Vec::with_capacity(n_hours),
            days: Vec::with_capacity(n_days),
            treated: Vec::with_capacity(n_days),
            untreated: Vec::with_capacity(n_days),
            healthy: Vec::with_capacity(n_days),
            reduction: Vec::with_capacity(n_days),
        };
        recorder.hours.push(0.0);
        recorder.drug.push(drug);
        recorder.days.push(0.0);
        recorder.treated.push(cldl);
        recorder.untreated.push(cldl);
        recorder.healthy.push(healthy);
        recorder.reduction.push(0.0);
        recorder
    }

    pub(crate) fn record_hour(&mut self, hour: u32, drug: f64) {
        self.hours.push(f64::from(hour) / f64::from(HOURS_PER_DAY));
        self.drug.push(drug);
    }

    pub(crate) fn record_day(
        &mut self,
        day: u32,
        treated: f64,
        untreated: f64,
        healthy: f64,
        reduction: f64,
    ) {
        self.days.push(f64::from(day));
        self.treated.push(treated);
        self.untreated.push(untreated);
        self.healthy.push(healthy);
        self.reduction.push(reduction);
    }

    pub(crate) fn finish(self) -> Trajectories {
        Trajectories {
            hours: Array1::from_vec(self.hours),
            drug: Array1::from_vec(self.drug),
            days: Array1::from_vec(self.days),
            treated: Array1::from_vec(self.treated),
            untreated: Array1::from_vec(self.untreated),
            healthy: Array1::from_vec(self.healthy),
            reduction: Array1::from_vec(self.reduction),
        }
    }
}
