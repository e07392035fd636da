//! # Domain Models
//!
//! Pure types shared by every page behavior, with minimal dependencies (`serde`, `bitflags`).
//! Keep it lean: no I/O, no document access, no timers. Just configuration,
//! marker names and simple helpers.

pub mod behaviors;
pub mod config;
pub mod constants;
