//! Diagnosis and dosing engine for reef aquarium water chemistry.
//!
//! Every engine function is pure: inputs are passed in explicitly and a fresh result is
//! returned. Only [`import`] and [`export`] touch I/O.

pub mod diagnosis;
pub mod dosing;
pub mod error;
pub mod export;
pub mod history;
pub mod import;
pub mod reference;
pub mod severity;
pub mod units;
