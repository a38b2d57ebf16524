//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks
//! - Input events
//! - Routing simulation events to audio and settings

pub mod clock;
pub mod input;
pub mod session;

pub use clock::{FixedStep, FpsCounter};
pub use input::{InputState, Key};
pub use session::{Session, route_events};
