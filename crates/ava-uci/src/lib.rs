//! UCI protocol handling for ava.

pub mod command;
pub mod engine;
pub mod error;

pub use command::{Command, GoParams, UciOption};
pub use engine::{EngineConfig, UciEngine};
pub use error::UciError;
