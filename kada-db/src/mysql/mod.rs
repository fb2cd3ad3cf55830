//! MySQL schema scanning

mod provider;

pub use provider::{MySqlConnection, MySqlProvider, MySqlProviderBuilder};
