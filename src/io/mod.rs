//! Input/output helpers for simulation telemetry.

pub mod export;
