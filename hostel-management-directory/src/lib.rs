//! Directory operations for the hostel hierarchy: onboarding hostels, blocks
//! and rooms, registering management staff, and deleting hierarchy nodes with
//! an explicit children-first referential-integrity check.

pub mod error;
pub mod onboarding;
pub mod removal;
pub mod roles;
pub mod staff;

pub use error::DirectoryError;
pub use roles::{Permission, StaffRole};
