//! Simulation of statin pharmacodynamics on circulating LDL cholesterol
//!
//! A once-daily dose of simvastatin acid inhibits cLDL synthesis through an
//! Emax relationship. Drug concentration is advanced hour by hour, cLDL once
//! per day, and the run ends when treated cLDL drops below the healthy
//! baseline or the day cap is reached.
//!
//! ```rust,ignore
//! use statin_pd::prelude::*;
//!
//! let config = SimulationConfig::default().with_daily_dose(8.8e-4);
//! let simulation = Simulator::new(&config)?.run();
//!
//! println!("{}", simulation.summary());
//! let figure = simulation.figure().to_json()?;
//! ```
pub mod chart;
pub mod error;
pub mod logger;
pub mod model;
pub mod simulator;

pub use crate::chart::Figure;
pub use crate::model::{Parameters, SimulationConfig};
pub use crate::simulator::{
    simulate, Simulation, Simulator, State, Status, Summary, Termination, Trajectories,
};
pub use error::StatinError;

pub mod prelude {
    pub use crate::chart::{integer_ticks, Figure, LineStyle, Panel, Series};
    pub use crate::model::{
        decay_constant, drug_effect, effective_synthesis, percentage_reduction, Parameters,
        SimulationConfig, MAX_DAYS_LIMIT,
    };
    pub use crate::simulator::{
        simulate, Simulation, Simulator, State, Status, Summary, Termination, Trajectories,
        HOURS_PER_DAY,
    };
    pub use crate::StatinError;
}
