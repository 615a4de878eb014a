//! Dispatch error types.

use thiserror::Error;

use bazaar_capabilities::CapabilityError;

/// Errors that can occur at dispatch time.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No execution context was supplied; fatal to this invocation and
    /// raised before any capability is constructed.
    #[error("an execution context is required to resolve capabilities")]
    MissingContext,

    /// No endpoint is registered under the requested route or name.
    #[error("no endpoint registered for `{route}`")]
    UnknownEndpoint {
        /// The route or handler name that was requested.
        route: String,
    },

    /// No widget is registered under the requested identifier.
    #[error("no widget registered for `{widget_id}`")]
    UnknownWidget {
        /// The widget identifier that was requested.
        widget_id: String,
    },

    /// A declared parameter no longer resolves against the catalog.
    #[error("parameter `{name}` does not resolve to a known capability")]
    UnknownCapability {
        /// The parameter that failed to resolve.
        name: String,
    },

    /// A capability constructor failed.
    #[error("capability for parameter `{name}` failed to initialize")]
    CapabilityInit {
        /// The parameter being resolved.
        name: String,
        /// The provider's error.
        #[source]
        source: CapabilityError,
    },

    /// The handler body failed; surfaced only on the paths without
    /// containment (endpoint, event listener).
    #[error("handler `{handler}` failed")]
    Handler {
        /// The failing handler's name.
        handler: String,
        /// The handler's error.
        #[source]
        source: anyhow::Error,
    },
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
