//! Prelude module - commonly used types for convenient import.
//!
//! Use `use bazaar_widgets::prelude::*;` to import all essential types.

pub use crate::{Component, Form, Label, SelectBox, SubmitButton, TimePicker, WidgetBuilder};
