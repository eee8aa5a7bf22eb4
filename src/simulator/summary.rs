use std::fmt;

use serde::Serialize;

use super::{Simulation, Termination};

/// Headline numbers of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub days: u32,
    pub hours: u32,
    pub termination: Termination,
    pub final_treated: f64,
    pub final_untreated: f64,
    /// Signed fraction, see [`Trajectories::reduction`](super::Trajectories::reduction)
    pub final_reduction: f64,
    pub peak_drug: f64,
    /// First day with treated cLDL below the healthy baseline
    pub day_below_baseline: Option<u32>,
}

impl Summary {
    pub(crate) fn new(simulation: &Simulation) -> Self {
        let state = simulation.final_state();
        let trajectories = simulation.trajectories();
        Self {
            days: state.days,
            hours: state.hours,
            termination: simulation.termination(),
            final_treated: state.treated,
            final_untreated: state.untreated,
            final_reduction: trajectories.reduction().iter().last().copied().unwrap_or(0.0),
            peak_drug: trajectories.peak_drug(),
            day_below_baseline: trajectories.day_below(simulation.parameters().baseline()),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Stopped after {} days ({} hours): {}",
            self.days, self.hours, self.termination
        )?;
        writeln!(f, "  treated cLDL:   {:.2} mg/dL", self.final_treated)?;
        writeln!(f, "  untreated cLDL: {:.2} mg/dL", self.final_untreated)?;
        writeln!(f, "  reduction:      {:.1}%", self.final_reduction * 100.0)?;
        write!(f, "  peak drug:      {:.3e} mg/dL", self.peak_drug)?;
        if let Some(day) = self.day_below_baseline {
            write!(f, "\n  below baseline on day {day}")?;
        }
        Ok(())
    }
}
