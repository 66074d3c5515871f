//! Clothing recommendation engine for RideKit
//!
//! Maps a worst-case weather summary for a ride window to a set of
//! clothing items. Pure and deterministic: no I/O, no state, safe to
//! call from any thread.

pub mod engine;
pub mod guide;
pub mod types;
pub mod units;

pub use engine::recommend;
pub use types::*;
