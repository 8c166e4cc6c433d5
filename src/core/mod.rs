pub mod calendar;
pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use calendar::Calendar;
pub use config::SimulationConfig;
pub use error::{CommandError, ConfigError, SectorLoadError, Service};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
