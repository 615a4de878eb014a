//! The handler registry and its sealed snapshot.

use std::sync::Arc;

use futures::FutureExt;
use tracing::debug;

use bazaar_capabilities::{CapabilityCatalog, Injected};
use bazaar_core::EventKind;
use bazaar_cron::CronExpr;
use bazaar_widgets::WidgetBuilder;

use crate::error::{RegistryError, RegistryResult};
use crate::params::{ParamSpec, validate};
use crate::record::{
    EndpointRecord, EndpointResponse, ListenerRecord, Payload, ScheduleOptions,
    ScheduledTaskRecord, WidgetRecord,
};

/// Process-wide store of declared handlers, partitioned by kind.
///
/// The registry is the single writer during the declaration phase. Every
/// registration validates the handler's declared parameters against the
/// capability catalog before the record is stored, so a record in any
/// partition implies its signature passed validation. [`seal`](Self::seal)
/// ends the declaration phase.
pub struct HandlerRegistry {
    catalog: CapabilityCatalog,
    endpoints: Vec<EndpointRecord>,
    schedules: Vec<ScheduledTaskRecord>,
    widgets: Vec<WidgetRecord>,
    listeners: Vec<ListenerRecord>,
}

impl HandlerRegistry {
    /// A registry validating against `catalog`.
    #[must_use]
    pub fn new(catalog: CapabilityCatalog) -> Self {
        Self {
            catalog,
            endpoints: Vec::new(),
            schedules: Vec::new(),
            widgets: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// A registry over the built-in capability catalog.
    #[must_use]
    pub fn with_builtin_catalog() -> Self {
        Self::new(CapabilityCatalog::builtin())
    }

    /// The catalog registrations validate against.
    #[must_use]
    pub fn catalog(&self) -> &CapabilityCatalog {
        &self.catalog
    }

    /// Register an endpoint handler.
    ///
    /// The handler receives the request payload plus its resolved
    /// capabilities and returns a `(body, status-code)` response.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidRoute`] if `route` does not start
    /// with `/`, or [`RegistryError::UnknownParameter`] if a declared
    /// parameter cannot be injected. On error nothing is registered.
    pub fn endpoint<F, Fut>(
        &mut self,
        name: impl Into<String>,
        route: Option<&str>,
        params: Vec<ParamSpec>,
        handler: F,
    ) -> RegistryResult<()>
    where
        F: Fn(Payload, Injected) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<EndpointResponse>> + Send + 'static,
    {
        // Route check precedes everything else so a bad route fails before
        // any wrapping occurs.
        if let Some(route) = route
            && !route.starts_with('/')
        {
            return Err(RegistryError::InvalidRoute {
                route: route.to_string(),
            });
        }
        validate(&params, &self.catalog)?;

        let name = name.into();
        debug!(handler = %name, route, "Registering endpoint");
        self.endpoints.push(EndpointRecord {
            name,
            route: route.map(str::to_owned),
            params,
            callable: Arc::new(move |payload, caps| handler(payload, caps).boxed()),
        });
        Ok(())
    }

    /// Register a scheduled task.
    ///
    /// The handler takes only capability parameters; there is no payload.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Cron`] if `cron_expr` does not parse, or
    /// [`RegistryError::UnknownParameter`] on signature validation failure.
    pub fn schedule<F, Fut>(
        &mut self,
        name: impl Into<String>,
        cron_expr: &str,
        options: ScheduleOptions,
        params: Vec<ParamSpec>,
        handler: F,
    ) -> RegistryResult<()>
    where
        F: Fn(Injected) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let cron: CronExpr = cron_expr.parse()?;
        validate(&params, &self.catalog)?;

        let name = name.into();
        debug!(handler = %name, cron = %cron, "Registering scheduled task");
        self.schedules.push(ScheduledTaskRecord {
            name,
            cron,
            options,
            params,
            callable: Arc::new(move |caps| handler(caps).boxed()),
        });
        Ok(())
    }

    /// Register a widget handler.
    ///
    /// The handler receives a fresh builder for `widget_id` plus its
    /// resolved capabilities and hands the built widget back.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownParameter`] on signature validation
    /// failure.
    pub fn widget<F>(
        &mut self,
        name: impl Into<String>,
        widget_id: impl Into<String>,
        params: Vec<ParamSpec>,
        handler: F,
    ) -> RegistryResult<()>
    where
        F: Fn(WidgetBuilder, Injected) -> anyhow::Result<WidgetBuilder> + Send + Sync + 'static,
    {
        validate(&params, &self.catalog)?;

        let name = name.into();
        let widget_id = widget_id.into();
        debug!(handler = %name, widget_id, "Registering widget");
        self.widgets.push(WidgetRecord {
            name,
            widget_id,
            params,
            callable: Arc::new(handler),
        });
        Ok(())
    }

    /// Register an event listener for `event`.
    ///
    /// Listeners receive the raw payload the emitter supplies; nothing is
    /// injected and nothing is validated beyond the kind itself.
    pub fn on_event<F>(&mut self, name: impl Into<String>, event: EventKind, handler: F)
    where
        F: Fn(&Payload) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(handler = %name, %event, "Registering event listener");
        self.listeners.push(ListenerRecord {
            name,
            event,
            callable: Arc::new(handler),
        });
    }

    /// End the declaration phase, freezing the registry into a read-only
    /// snapshot for the dispatch phase.
    #[must_use]
    pub fn seal(self) -> SealedRegistry {
        debug!(
            endpoints = self.endpoints.len(),
            schedules = self.schedules.len(),
            widgets = self.widgets.len(),
            listeners = self.listeners.len(),
            "Sealing handler registry"
        );
        SealedRegistry {
            catalog: self.catalog,
            endpoints: self.endpoints,
            schedules: self.schedules,
            widgets: self.widgets,
            listeners: self.listeners,
        }
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("endpoints", &self.endpoints.len())
            .field("schedules", &self.schedules.len())
            .field("widgets", &self.widgets.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

/// Immutable snapshot of a sealed [`HandlerRegistry`].
///
/// Shared freely across dispatch paths; there is no way back to a mutable
/// registry.
#[derive(Debug)]
pub struct SealedRegistry {
    catalog: CapabilityCatalog,
    endpoints: Vec<EndpointRecord>,
    schedules: Vec<ScheduledTaskRecord>,
    widgets: Vec<WidgetRecord>,
    listeners: Vec<ListenerRecord>,
}

impl SealedRegistry {
    /// The capability catalog resolution runs against.
    #[must_use]
    pub fn catalog(&self) -> &CapabilityCatalog {
        &self.catalog
    }

    /// All endpoint records, in registration order.
    #[must_use]
    pub fn endpoints(&self) -> &[EndpointRecord] {
        &self.endpoints
    }

    /// Find an endpoint by route, falling back to handler name for
    /// endpoints registered without one.
    #[must_use]
    pub fn find_endpoint(&self, route_or_name: &str) -> Option<&EndpointRecord> {
        self.endpoints
            .iter()
            .find(|r| r.route() == Some(route_or_name))
            .or_else(|| self.endpoints.iter().find(|r| r.name() == route_or_name))
    }

    /// All scheduled-task records, in registration order.
    #[must_use]
    pub fn schedules(&self) -> &[ScheduledTaskRecord] {
        &self.schedules
    }

    /// All widget records, in registration order.
    #[must_use]
    pub fn widgets(&self) -> &[WidgetRecord] {
        &self.widgets
    }

    /// Find a widget by its identifier.
    #[must_use]
    pub fn find_widget(&self, widget_id: &str) -> Option<&WidgetRecord> {
        self.widgets.iter().find(|r| r.widget_id() == widget_id)
    }

    /// Listeners registered for `event`, in registration order.
    pub fn listeners_for(&self, event: EventKind) -> impl Iterator<Item = &ListenerRecord> {
        self.listeners.iter().filter(move |r| r.event() == event)
    }

    /// All listener records, in registration order.
    #[must_use]
    pub fn listeners(&self) -> &[ListenerRecord] {
        &self.listeners
    }
}
