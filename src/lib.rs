// Library interface for liftrs modules
// This allows integration tests and benches to access the core functionality

pub mod alerts;
pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod generator;
pub mod logging;
pub mod models;
pub mod progression;
pub mod schedule;
pub mod session;
pub mod superset;
pub mod timer;

// Re-export commonly used types for convenience
pub use models::*;
pub use catalog::{ExerciseTemplate, ProgramCatalog};
pub use generator::{ProgramGenerator, ProgressionPoint, ValidationReport, WeekVolume};
pub use progression::compute_weight;
pub use schedule::{classify_week, RpeBand, Technique, WeekClassification};
pub use superset::{group, ExerciseGroup, GroupKind, Groupable};
pub use timer::{
    RestLabel, RestTimer, TickToken, TimerCommand, TimerListener, TimerPhase, TimerState,
};
pub use session::{RestRequest, SetCompletionRecord, WorkoutSession};
pub use error::{LiftRsError, ProgramError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
