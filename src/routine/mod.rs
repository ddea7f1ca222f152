//! Care routines — data model, rule-based generation, and the session
//! controller used while a routine is being worked through.

pub mod generator;
pub mod model;
pub mod session;
pub mod timer;

pub use generator::{MASK_TIMER_SECS, generate, generate_steps};
pub use model::{ProductType, Routine, RoutineStep, TimeOfDay, upsert_routine};
pub use session::RoutineSession;
pub use timer::{Countdown, TimerState, format_countdown};
