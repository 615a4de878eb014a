//! Registration error types.

use thiserror::Error;

/// Errors that can occur at handler registration time.
///
/// Registration is all-or-nothing: any of these means the handler was not
/// added to the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A declared parameter is neither a known capability type nor named
    /// after one.
    #[error("parameter `{name}` is not a known capability and cannot be injected")]
    UnknownParameter {
        /// The offending parameter.
        name: String,
    },

    /// An endpoint route that does not start with a forward slash.
    #[error("endpoint route `{route}` must start with '/'")]
    InvalidRoute {
        /// The route as supplied.
        route: String,
    },

    /// The scheduled task's cron expression does not parse.
    #[error(transparent)]
    Cron(#[from] bazaar_cron::CronError),
}

/// Result type for registration operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
