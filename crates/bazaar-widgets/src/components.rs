//! The component set and its render trait.

use std::fmt::Write as _;

/// Anything that can render itself to markup text.
pub trait Component: Send + Sync {
    /// Produce the component's markup.
    fn render(&self) -> String;
}

/// A text label.
#[derive(Debug, Clone, Default)]
pub struct Label {
    text: String,
    css_class: String,
}

impl Label {
    /// Create a label with no extra CSS class.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            css_class: String::new(),
        }
    }

    /// Set the CSS class.
    #[must_use]
    pub fn with_class(mut self, css_class: impl Into<String>) -> Self {
        self.css_class = css_class.into();
        self
    }
}

impl Component for Label {
    fn render(&self) -> String {
        format!("<label class=\"{}\">{}</label>", self.css_class, self.text)
    }
}

/// A drop-down selection box.
#[derive(Debug, Clone, Default)]
pub struct SelectBox {
    options: Vec<String>,
    css_class: String,
}

impl SelectBox {
    /// Create a select box over `options`.
    #[must_use]
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            css_class: String::new(),
        }
    }

    /// Set an additional CSS class.
    #[must_use]
    pub fn with_class(mut self, css_class: impl Into<String>) -> Self {
        self.css_class = css_class.into();
        self
    }
}

impl Component for SelectBox {
    fn render(&self) -> String {
        let mut options_html = String::new();
        for opt in &self.options {
            // Writing to a String cannot fail.
            let _ = write!(options_html, "<option value=\"{opt}\">{opt}</option>");
        }
        format!(
            "<select class=\"form-select {}\">{options_html}</select>",
            self.css_class
        )
    }
}

/// A form submit button.
#[derive(Debug, Clone)]
pub struct SubmitButton {
    text: String,
    css_class: String,
}

impl SubmitButton {
    /// Create a button with the default primary styling.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            css_class: "btn btn-primary".to_string(),
        }
    }

    /// Override the CSS class.
    #[must_use]
    pub fn with_class(mut self, css_class: impl Into<String>) -> Self {
        self.css_class = css_class.into();
        self
    }
}

impl Component for SubmitButton {
    fn render(&self) -> String {
        format!(
            "<button type=\"submit\" class=\"{}\">{}</button>",
            self.css_class, self.text
        )
    }
}

/// A time-of-day input.
#[derive(Debug, Clone, Default)]
pub struct TimePicker {
    time: String,
    css_class: String,
}

impl TimePicker {
    /// Create a picker pre-filled with `time` (`HH:MM`, may be empty).
    #[must_use]
    pub fn new(time: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            css_class: String::new(),
        }
    }

    /// Set an additional CSS class.
    #[must_use]
    pub fn with_class(mut self, css_class: impl Into<String>) -> Self {
        self.css_class = css_class.into();
        self
    }
}

impl Component for TimePicker {
    fn render(&self) -> String {
        format!(
            "<input type=\"time\" class=\"form-control {}\" value=\"{}\">",
            self.css_class, self.time
        )
    }
}

/// A form grouping child components.
#[derive(Default)]
pub struct Form {
    components: Vec<Box<dyn Component>>,
}

impl Form {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child component.
    pub fn add(&mut self, component: impl Component + 'static) {
        self.components.push(Box::new(component));
    }
}

impl Component for Form {
    fn render(&self) -> String {
        let children: String = self.components.iter().map(|c| c.render()).collect();
        format!("<form class=\"form-group\">{children}</form>")
    }
}

/// The top-level widget container handed to widget handlers.
///
/// Carries the widget identifier it was built for; the runtime constructs a
/// fresh builder per render.
#[derive(Default)]
pub struct WidgetBuilder {
    widget_id: String,
    components: Vec<Box<dyn Component>>,
}

impl WidgetBuilder {
    /// Create an empty builder for `widget_id`.
    #[must_use]
    pub fn new(widget_id: impl Into<String>) -> Self {
        Self {
            widget_id: widget_id.into(),
            components: Vec::new(),
        }
    }

    /// The identifier this widget is being built for.
    #[must_use]
    pub fn widget_id(&self) -> &str {
        &self.widget_id
    }

    /// Append a component.
    pub fn add(&mut self, component: impl Component + 'static) {
        self.components.push(Box::new(component));
    }

    /// Number of components added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether no components have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl Component for WidgetBuilder {
    fn render(&self) -> String {
        let children: String = self.components.iter().map(|c| c.render()).collect();
        format!("<div class=\"widget\">{children}</div>")
    }
}
