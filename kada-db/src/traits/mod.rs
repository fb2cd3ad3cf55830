//! Core traits for kada-db

mod connection;

pub use connection::{ConnectionProvider, SchemaConnection};
