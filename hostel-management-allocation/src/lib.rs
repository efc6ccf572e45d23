//! Room-assignment invariant enforcement.
//!
//! A student may only live in a room whose hostel's gender policy matches the
//! student's gender, and a room never holds more students than its declared
//! capacity. Both rules are re-checked from current store state at the moment
//! of every assignment write (creation and transfer).
//!
//! The store offers per-operation atomicity only, so resolve, count and write
//! are separate reads and writes: two concurrent assignments against the same
//! room can both pass the capacity check and oversubscribe it. That
//! check-then-act window is inherited from the store model and documented
//! rather than papered over; closing it takes a serializable transaction or an
//! atomically maintained occupancy counter on the room.

pub mod capacity;
pub mod error;
pub mod hierarchy;
pub mod service;

pub use capacity::Occupancy;
pub use error::AssignmentError;
pub use hierarchy::Hierarchy;
pub use service::{AssignmentService, StudentProfile};
