mod bootstrap;
mod config;
mod script;
mod style;
mod template;

pub use bootstrap::{bootstrap, BootstrapError, WidgetHost, CONTAINER_ID};
pub use config::{CalendarCategory, ConfigError, HexColor, ViewMode, WidgetConfig};
pub use script::{BootstrapScript, ScriptHost, WIDGET_CONSTRUCTOR};
pub use style::{Plugin, SourceGlob, StyleBuildConfig, Theme};
pub use template::{format_time, AllDayEvent, EventTemplates, Template, TimedEvent};
