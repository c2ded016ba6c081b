//! Hermes Clock Infrastructure
//!
//! Time sources behind the `Clock` port:
//! - [`SystemClock`] - wall-clock time for production
//! - [`FixedClock`] - settable/advanceable time for deterministic tests

mod fixed;
mod system;

pub use fixed::FixedClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use hermes_ports::Clock;
