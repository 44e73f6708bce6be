//! Shared library modules providing error types, command execution, and telemetry initialization.

pub mod errors;
pub mod shell;
pub mod telemetry;
