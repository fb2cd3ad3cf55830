//! Configuration for kada-codegen

pub mod defaults;
mod settings;

pub use settings::{KadaConfig, OutputFormat};
