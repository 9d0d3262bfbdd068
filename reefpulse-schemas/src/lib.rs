//! Shared data types for the reef water-chemistry tracker.

pub mod coral;
pub mod diagnosis;
pub mod dosing;
pub mod file_formats;
pub mod parameter;
pub mod reading;
pub mod tank;
