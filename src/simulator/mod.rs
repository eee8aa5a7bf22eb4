//! Hour-by-hour simulation of drug and cLDL concentrations
//!
//! The drug compartment decays once per hour. Every 24 hours a dose is
//! added and both cLDL arms take a single explicit Euler step of one day:
//!
//! ```text
//! treated   += kin * (1 - E(c)) - kout * treated * scaling
//! untreated += kin              - kout * untreated * scaling
//! ```
//!
//! where `E(c)` is the Emax inhibition at the post-dose drug concentration.
//! The daily cadence is part of the model and must not be sub-stepped.
//!
//! ```rust,ignore
//! use statin_pd::prelude::*;
//!
//! let simulation = Simulator::new(&SimulationConfig::default())?.run();
//! println!("{}", simulation.summary());
//! ```
mod summary;
mod trajectory;

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::model::{effective_synthesis, percentage_reduction, Parameters, SimulationConfig};
use crate::StatinError;

pub use summary::Summary;
pub use trajectory::Trajectories;
use trajectory::Recorder;

/// Length of one dosing interval in simulation steps
pub const HOURS_PER_DAY: u32 = 24;

/// Instantaneous state of the simulated patient
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct State {
    /// Drug concentration (mg/dL)
    pub drug: f64,
    /// cLDL under treatment (mg/dL)
    pub treated: f64,
    /// cLDL without treatment (mg/dL)
    pub untreated: f64,
    /// Hours elapsed since the start of the run
    pub hours: u32,
    /// Day boundaries crossed since the start of the run
    pub days: u32,
}

/// Reason a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// Treated cLDL dropped below the healthy baseline
    BelowBaseline,
    /// The day cap was reached first
    HorizonReached,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::BelowBaseline => write!(f, "treated cLDL fell below baseline"),
            Termination::HorizonReached => write!(f, "simulation horizon reached"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Running,
    Terminated(Termination),
}

impl Status {
    pub fn is_running(&self) -> bool {
        matches!(self, Status::Running)
    }
}

/// Simulation engine owning the parameters, current state and recorded sequences
///
/// A simulator is created fresh for every run. Drive it one hour at a time
/// with [`Simulator::step`], or to completion with [`Simulator::run`].
#[derive(Debug, Clone)]
pub struct Simulator {
    params: Parameters,
    state: State,
    status: Status,
    recorder: Recorder,
}

impl Simulator {
    /// Validate `config` and set up the day-0 state
    pub fn new(config: &SimulationConfig) -> Result<Self, StatinError> {
        Ok(Self::from_parameters(config.validate()?))
    }

    pub fn from_parameters(params: Parameters) -> Self {
        let state = State {
            drug: 0.0,
            treated: params.initial,
            untreated: params.initial,
            hours: 0,
            days: 0,
        };
        let recorder = Recorder::new(params.max_days, state.drug, state.treated, params.baseline);
        Self {
            params,
            state,
            status: Status::Running,
            recorder,
        }
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Advance the simulation by one hour
    ///
    /// Once terminated, further calls leave the simulator untouched and
    /// return the same terminal status.
    pub fn step(&mut self) -> Status {
        if !self.status.is_running() {
            return self.status;
        }

        let p = &self.params;
        let state = &mut self.state;

        state.drug -= p.decay_rate * state.drug;
        state.hours += 1;

        if state.hours % HOURS_PER_DAY == 0 {
            state.days += 1;
            state.drug += p.daily_dose;

            let synthesis = effective_synthesis(p.kin, p.emax, p.ec50, state.drug);
            let treated_out = p.kout * state.treated * p.elimination_scaling;
            let untreated_out = p.kout * state.untreated * p.elimination_scaling;
            state.treated += synthesis - treated_out;
            state.untreated += p.kin - untreated_out;

            let reduction = percentage_reduction(p.initial, state.treated);
            self.recorder.record_day(
                state.days,
                state.treated,
                state.untreated,
                p.baseline,
                reduction,
            );
            debug!(
                day = state.days,
                drug = state.drug,
                treated = state.treated,
                untreated = state.untreated,
                reduction,
                "Dose administered"
            );
        }

        self.recorder.record_hour(state.hours, state.drug);

        self.status = self.check_termination();
        if let Status::Terminated(reason) = self.status {
            match reason {
                Termination::BelowBaseline => info!(
                    day = self.state.days,
                    treated = self.state.treated,
                    "Treated cLDL below baseline of {}",
                    self.params.baseline
                ),
                Termination::HorizonReached => warn!(
                    day = self.state.days,
                    treated = self.state.treated,
                    "Horizon reached before cLDL fell below baseline of {}",
                    self.params.baseline
                ),
            }
        }
        self.status
    }

    fn check_termination(&self) -> Status {
        if self.state.treated < self.params.baseline {
            Status::Terminated(Termination::BelowBaseline)
        } else if self.state.days >= self.params.max_days {
            Status::Terminated(Termination::HorizonReached)
        } else {
            Status::Running
        }
    }

    /// Step until a stopping condition fires and return the finished run
    pub fn run(mut self) -> Simulation {
        let termination = loop {
            if let Status::Terminated(reason) = self.step() {
                break reason;
            }
        };

        Simulation {
            parameters: self.params,
            final_state: self.state,
            termination,
            trajectories: self.recorder.finish(),
        }
    }
}

/// Immutable result of a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulation {
    parameters: Parameters,
    final_state: State,
    termination: Termination,
    trajectories: Trajectories,
}

impl Simulation {
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn final_state(&self) -> &State {
        &self.final_state
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn trajectories(&self) -> &Trajectories {
        &self.trajectories
    }

    pub fn summary(&self) -> Summary {
        Summary::new(self)
    }

    /// Serialize the whole run (parameters, final state and sequences) to JSON
    pub fn to_json(&self) -> Result<String, StatinError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run a simulation for `config` in one call
pub fn simulate(config: &SimulationConfig) -> Result<Simulation, StatinError> {
    Ok(Simulator::new(config)?.run())
}
