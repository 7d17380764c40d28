use chrono::NaiveDateTime;

use crate::ConfigError;

/// Formats an event timestamp the way the time template shows it, e.g. `09:00`.
#[must_use]
pub fn format_time(time: &NaiveDateTime) -> String {
    time.format("%H:%M").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedEvent {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllDayEvent {
    pub title: String,
}

/// A fixed presentational style wrapped around template output.
///
/// The wrapped text is inserted verbatim. Titles containing markup end up as
/// markup in the rendered calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    color: String,
}

impl Template {
    pub fn new<S: Into<String>>(color: S) -> Result<Self, ConfigError> {
        let color = color.into();

        let allowed = |c: char| c.is_ascii_alphanumeric() || "#(),.% -".contains(c);
        if color.trim().is_empty() || !color.chars().all(allowed) {
            return Err(ConfigError::InvalidTemplateColor(color));
        }

        Ok(Self { color })
    }

    #[must_use]
    pub fn wrap(&self, inner: &str) -> String {
        format!(r#"<span style="color: {};">{inner}</span>"#, self.color)
    }

    /// The same markup as [`Template::wrap`], as a JavaScript template literal
    /// around `inner`, which may contain `${...}` interpolations.
    #[must_use]
    pub fn to_js_literal(&self, inner: &str) -> String {
        format!("`{}`", self.wrap(inner))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTemplates {
    pub time: Template,
    pub allday: Template,
}

impl EventTemplates {
    #[must_use]
    pub fn time(&self, event: &TimedEvent) -> String {
        self.time.wrap(&format!(
            "{}~{} {}",
            format_time(&event.start),
            format_time(&event.end),
            event.title
        ))
    }

    #[must_use]
    pub fn allday(&self, event: &AllDayEvent) -> String {
        self.allday.wrap(&event.title)
    }
}

impl Default for EventTemplates {
    fn default() -> Self {
        Self {
            time: Template {
                color: "white".into(),
            },
            allday: Template {
                color: "gray".into(),
            },
        }
    }
}
