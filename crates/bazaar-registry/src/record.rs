//! Handler records, one shape per kind.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;

use bazaar_capabilities::Injected;
use bazaar_core::EventKind;
use bazaar_cron::CronExpr;
use bazaar_widgets::WidgetBuilder;

use crate::params::ParamSpec;

/// The in-band payload handed to endpoint handlers and event listeners.
pub type Payload = serde_json::Value;

/// Boxed endpoint handler: `(payload, capabilities) -> (body, status)`.
pub type EndpointFn =
    Arc<dyn Fn(Payload, Injected) -> BoxFuture<'static, anyhow::Result<EndpointResponse>> + Send + Sync>;

/// Boxed scheduled-task handler: capabilities only, no payload.
pub type TaskFn = Arc<dyn Fn(Injected) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// Boxed widget handler: builds into the supplied builder and hands it back.
pub type WidgetFn =
    Arc<dyn Fn(WidgetBuilder, Injected) -> anyhow::Result<WidgetBuilder> + Send + Sync>;

/// Boxed event listener: raw payload, no injection.
pub type ListenerFn = Arc<dyn Fn(&Payload) -> anyhow::Result<()> + Send + Sync>;

/// An endpoint handler's `(body, status-code)` result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointResponse {
    /// Response body.
    pub body: Payload,
    /// HTTP-style status code.
    pub status: u16,
}

impl EndpointResponse {
    /// A response with an explicit status code.
    #[must_use]
    pub fn new(body: Payload, status: u16) -> Self {
        Self { body, status }
    }

    /// A `200 OK` response.
    #[must_use]
    pub fn ok(body: Payload) -> Self {
        Self::new(body, 200)
    }
}

/// Scheduling options for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleOptions {
    /// Whether a failed run is treated as transient. This changes only what
    /// gets logged; rescheduling is identical on both paths.
    pub retry_on_failure: bool,
    /// Upper bound on a single run; an elapsed timeout counts as a failure
    /// of that run.
    pub timeout: Option<Duration>,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            retry_on_failure: true,
            timeout: None,
        }
    }
}

/// A registered endpoint handler.
#[derive(Clone)]
pub struct EndpointRecord {
    pub(crate) name: String,
    pub(crate) route: Option<String>,
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) callable: EndpointFn,
}

impl EndpointRecord {
    /// Handler name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Route path, when one was supplied.
    #[must_use]
    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    /// Declared injectable parameters (the leading payload is not one).
    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// The underlying callable.
    #[must_use]
    pub fn callable(&self) -> EndpointFn {
        Arc::clone(&self.callable)
    }
}

impl fmt::Debug for EndpointRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointRecord")
            .field("name", &self.name)
            .field("route", &self.route)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// A registered scheduled task.
#[derive(Clone)]
pub struct ScheduledTaskRecord {
    pub(crate) name: String,
    pub(crate) cron: CronExpr,
    pub(crate) options: ScheduleOptions,
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) callable: TaskFn,
}

impl ScheduledTaskRecord {
    /// Handler name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parsed cron expression.
    #[must_use]
    pub fn cron(&self) -> &CronExpr {
        &self.cron
    }

    /// Scheduling options.
    #[must_use]
    pub fn options(&self) -> ScheduleOptions {
        self.options
    }

    /// Declared injectable parameters.
    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// The underlying callable.
    #[must_use]
    pub fn callable(&self) -> TaskFn {
        Arc::clone(&self.callable)
    }
}

impl fmt::Debug for ScheduledTaskRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledTaskRecord")
            .field("name", &self.name)
            .field("cron", &self.cron)
            .field("options", &self.options)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// A registered widget handler.
#[derive(Clone)]
pub struct WidgetRecord {
    pub(crate) name: String,
    pub(crate) widget_id: String,
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) callable: WidgetFn,
}

impl WidgetRecord {
    /// Handler name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Widget identifier.
    #[must_use]
    pub fn widget_id(&self) -> &str {
        &self.widget_id
    }

    /// Declared injectable parameters (the leading builder is not one).
    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// The underlying callable.
    #[must_use]
    pub fn callable(&self) -> WidgetFn {
        Arc::clone(&self.callable)
    }
}

impl fmt::Debug for WidgetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetRecord")
            .field("name", &self.name)
            .field("widget_id", &self.widget_id)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// A registered event listener.
#[derive(Clone)]
pub struct ListenerRecord {
    pub(crate) name: String,
    pub(crate) event: EventKind,
    pub(crate) callable: ListenerFn,
}

impl ListenerRecord {
    /// Handler name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The event kind this listener fires on.
    #[must_use]
    pub fn event(&self) -> EventKind {
        self.event
    }

    /// The underlying callable.
    #[must_use]
    pub fn callable(&self) -> ListenerFn {
        Arc::clone(&self.callable)
    }
}

impl fmt::Debug for ListenerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRecord")
            .field("name", &self.name)
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}
