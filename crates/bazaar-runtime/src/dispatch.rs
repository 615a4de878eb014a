//! Endpoint, widget, and event dispatch paths.

use std::sync::Arc;

use tracing::{debug, info, warn};

use bazaar_core::{EventKind, ExecContext};
use bazaar_registry::{EndpointResponse, Payload, SealedRegistry};
use bazaar_widgets::{Component, WidgetBuilder};

use crate::error::{DispatchError, DispatchResult};
use crate::resolver::resolve;

/// Markup served in place of a widget whose build failed.
pub const WIDGET_ERROR_FRAGMENT: &str =
    "<b style='color: red;'>An error occurred while rendering the widget</b>";

/// Dispatches invocations against a sealed registry.
///
/// Cheap to clone; all clones share the same snapshot.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<SealedRegistry>,
}

impl Dispatcher {
    /// Create a dispatcher over a sealed registry.
    #[must_use]
    pub fn new(registry: Arc<SealedRegistry>) -> Self {
        Self { registry }
    }

    /// The registry snapshot this dispatcher reads.
    #[must_use]
    pub fn registry(&self) -> &SealedRegistry {
        &self.registry
    }

    /// Invoke an endpoint handler: single attempt, no timeout, no
    /// containment.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownEndpoint`] when nothing is registered
    /// under `route_or_name`, any resolution error from [`resolve`], and
    /// [`DispatchError::Handler`] wrapping whatever the handler body raised.
    pub async fn call_endpoint(
        &self,
        route_or_name: &str,
        payload: Payload,
        ctx: Option<&ExecContext>,
    ) -> DispatchResult<EndpointResponse> {
        let record = self.registry.find_endpoint(route_or_name).ok_or_else(|| {
            DispatchError::UnknownEndpoint {
                route: route_or_name.to_string(),
            }
        })?;

        info!(endpoint = record.name(), "Running API endpoint");
        let caps = resolve(record.params(), self.registry.catalog(), ctx)?;

        let callable = record.callable();
        callable(payload, caps)
            .await
            .map_err(|source| DispatchError::Handler {
                handler: record.name().to_string(),
                source,
            })
    }

    /// Build and render a widget.
    ///
    /// The handler gets a fresh builder for the widget's identifier plus its
    /// resolved capabilities. A failing handler never surfaces to the
    /// caller: the fixed [`WIDGET_ERROR_FRAGMENT`] is served instead.
    ///
    /// # Errors
    ///
    /// Precondition violations still propagate:
    /// [`DispatchError::UnknownWidget`] and resolution errors from
    /// [`resolve`]. Handler failures do not.
    pub fn render_widget(
        &self,
        widget_id: &str,
        ctx: Option<&ExecContext>,
    ) -> DispatchResult<String> {
        let record =
            self.registry
                .find_widget(widget_id)
                .ok_or_else(|| DispatchError::UnknownWidget {
                    widget_id: widget_id.to_string(),
                })?;

        info!(widget = record.name(), widget_id, "Running widget");
        let caps = resolve(record.params(), self.registry.catalog(), ctx)?;

        let builder = WidgetBuilder::new(record.widget_id());
        let callable = record.callable();
        match callable(builder, caps) {
            Ok(widget) => Ok(widget.render()),
            Err(error) => {
                warn!(
                    widget = record.name(),
                    %error,
                    "Widget build failed, serving error fragment"
                );
                Ok(WIDGET_ERROR_FRAGMENT.to_string())
            },
        }
    }

    /// Deliver an event to every listener registered for `event`, in
    /// registration order, with the raw payload.
    ///
    /// No injection and no containment: the first listener failure stops
    /// delivery and propagates.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Handler`] wrapping the first listener
    /// failure.
    pub fn emit_event(&self, event: EventKind, payload: &Payload) -> DispatchResult<usize> {
        let mut delivered = 0_usize;
        for record in self.registry.listeners_for(event) {
            debug!(listener = record.name(), %event, "Delivering event");
            let callable = record.callable();
            callable(payload).map_err(|source| DispatchError::Handler {
                handler: record.name().to_string(),
                source,
            })?;
            delivered = delivered.saturating_add(1);
        }
        Ok(delivered)
    }
}
