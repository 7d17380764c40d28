use crate::{WidgetConfig, WidgetHost};

/// Global constructor provided by the calendar widget library.
pub const WIDGET_CONSTRUCTOR: &str = "tui.Calendar";

/// A page as seen by the widget bootstrap: the element ids it declares.
///
/// Constructing a widget on this host produces the script that performs the
/// construction in the browser.
#[derive(Debug, Clone)]
pub struct ScriptHost {
    container_ids: Vec<String>,
}

impl ScriptHost {
    pub fn new<I, S>(container_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            container_ids: container_ids.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapScript(String);

impl BootstrapScript {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl WidgetHost for ScriptHost {
    type Container = String;
    type Handle = BootstrapScript;
    type Error = serde_json::Error;

    fn container(&self, id: &str) -> Option<String> {
        self.container_ids.iter().find(|candidate| *candidate == id).cloned()
    }

    fn constructor(&self) -> &str {
        WIDGET_CONSTRUCTOR
    }

    fn construct(
        &self,
        container: String,
        config: &WidgetConfig,
    ) -> Result<BootstrapScript, serde_json::Error> {
        let options = config.to_json()?;
        let container = serde_json::to_string(&container)?;
        let time = config
            .template
            .time
            .to_js_literal("${formatTime(start)}~${formatTime(end)} ${title}");
        let allday = config.template.allday.to_js_literal("${event.title}");

        Ok(BootstrapScript(format!(
            r#"(() => {{
  const formatTime = (date) => {{
    const value = typeof date.toDate === "function" ? date.toDate() : new Date(date);
    const pad = (n) => String(n).padStart(2, "0");
    return `${{pad(value.getHours())}}:${{pad(value.getMinutes())}}`;
  }};

  const options = {options};
  options.template = {{
    time(event) {{
      const {{ start, end, title }} = event;
      return {time};
    }},
    allday(event) {{
      return {allday};
    }},
  }};

  const container = document.getElementById({container});
  window.calendar = new {WIDGET_CONSTRUCTOR}(container, options);
}})();
"#
        )))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{bootstrap, BootstrapError, CONTAINER_ID};

    #[test]
    fn script_constructs_widget_with_config_and_templates() {
        let host = ScriptHost::new([CONTAINER_ID]);
        let script = bootstrap(&host, CONTAINER_ID, &WidgetConfig::default()).unwrap();
        let script = script.as_str();

        assert!(script.contains(r#"document.getElementById("calendar")"#));
        assert!(script.contains("new tui.Calendar(container, options)"));
        assert!(script.contains(&format!(
            "const options = {};",
            WidgetConfig::default().to_json().unwrap()
        )));
        assert!(script.contains(
            r#"return `<span style="color: white;">${formatTime(start)}~${formatTime(end)} ${title}</span>`;"#
        ));
        assert!(script.contains(r#"return `<span style="color: gray;">${event.title}</span>`;"#));
    }

    #[test]
    fn format_time_helper_is_emitted_unescaped() {
        let host = ScriptHost::new(["calendar"]);
        let script = host
            .construct("calendar".into(), &WidgetConfig::default())
            .unwrap();

        assert!(script
            .as_str()
            .contains("return `${pad(value.getHours())}:${pad(value.getMinutes())}`;"));
        assert!(script.as_str().starts_with("(() => {\n"));
        assert!(script.as_str().ends_with("})();\n"));
    }

    #[test]
    fn page_without_container_gets_no_script() {
        let host = ScriptHost::new(["sidebar"]);

        let err = bootstrap(&host, CONTAINER_ID, &WidgetConfig::default()).unwrap_err();

        assert!(matches!(err, BootstrapError::MissingContainer(_)));
    }

    #[test]
    fn container_id_is_quoted_as_json() {
        let host = ScriptHost::new([r#"odd"id"#]);
        let script = bootstrap(&host, r#"odd"id"#, &WidgetConfig::default()).unwrap();

        assert_eq!(
            script
                .as_str()
                .lines()
                .find(|line| line.contains("getElementById")),
            Some(r#"  const container = document.getElementById("odd\"id");"#)
        );
    }
}
