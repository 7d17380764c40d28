use std::{collections::HashSet, str::FromStr};

use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};

use crate::EventTemplates;

static DEFAULT_CALENDARS: Lazy<Vec<CalendarCategory>> = Lazy::new(|| {
    vec![
        CalendarCategory::new("cal1", "Personal", "#03bd9e".parse().unwrap()),
        CalendarCategory::new("cal2", "Work", "#00a9ff".parse().unwrap()),
    ]
});

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("widget configuration declares no calendars")]
    NoCalendars,
    #[error("calendar category id must not be empty")]
    EmptyCategoryId,
    #[error("calendar category `{0}` has an empty name")]
    EmptyCategoryName(String),
    #[error("calendar category id `{0}` is declared more than once")]
    DuplicateCategoryId(String),
    #[error("`{0}` is not a hex color")]
    InvalidHexColor(String),
    #[error("`{0}` is not a usable template color")]
    InvalidTemplateColor(String),
    #[error("`{0}` is not a relative source glob")]
    InvalidSourceGlob(String),
    #[error("`{0}` is not a valid plugin binding")]
    InvalidPluginBinding(String),
    #[error("style build configuration scans no sources")]
    NoSources,
    #[error("plugin `{0}` is imported more than once")]
    DuplicatePlugin(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    #[default]
    Week,
    Month,
}

/// A `#rgb` or `#rrggbb` color, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for HexColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s
            .strip_prefix('#')
            .filter(|digits| matches!(digits.len(), 3 | 6))
            .is_some_and(|digits| digits.chars().all(|c| c.is_ascii_hexdigit()));

        if !valid {
            return Err(ConfigError::InvalidHexColor(s.to_string()));
        }

        Ok(Self(s.to_ascii_lowercase()))
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCategory {
    pub id: String,
    pub name: String,
    pub background_color: HexColor,
}

impl CalendarCategory {
    pub fn new<I, N>(id: I, name: N, background_color: HexColor) -> Self
    where
        I: Into<String>,
        N: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            background_color,
        }
    }
}

/// The option object handed to the calendar widget constructor.
///
/// Templates are functions on the widget side, so they are left out of the
/// JSON form and rendered into the bootstrap script instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    pub default_view: ViewMode,
    #[serde(skip)]
    pub template: EventTemplates,
    pub calendars: Vec<CalendarCategory>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            default_view: ViewMode::Week,
            template: EventTemplates::default(),
            calendars: DEFAULT_CALENDARS.clone(),
        }
    }
}

impl WidgetConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.calendars.is_empty() {
            return Err(ConfigError::NoCalendars);
        }

        let mut seen = HashSet::new();
        for category in &self.calendars {
            if category.id.trim().is_empty() {
                return Err(ConfigError::EmptyCategoryId);
            }
            if category.name.trim().is_empty() {
                return Err(ConfigError::EmptyCategoryName(category.id.clone()));
            }
            if !seen.insert(category.id.as_str()) {
                return Err(ConfigError::DuplicateCategoryId(category.id.clone()));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn category(&self, id: &str) -> Option<&CalendarCategory> {
        self.calendars.iter().find(|category| category.id == id)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
