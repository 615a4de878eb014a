//! Bazaar Widgets - UI components for seller-app dashboard widgets.
//!
//! Widget handlers receive a fresh [`WidgetBuilder`], add components to it,
//! and hand it back; the runtime renders the result to markup. Templating
//! correctness is out of scope: components emit fixed fragments with
//! caller-supplied text interpolated as-is.
//!
//! # Example
//!
//! ```
//! use bazaar_widgets::{Component, Label, SubmitButton, WidgetBuilder};
//!
//! let mut widget = WidgetBuilder::new("daily-report");
//! widget.add(Label::new("Pick a slot"));
//! widget.add(SubmitButton::new("Save"));
//!
//! assert!(widget.render().starts_with("<div class=\"widget\">"));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod components;

pub use components::{Component, Form, Label, SelectBox, SubmitButton, TimePicker, WidgetBuilder};
