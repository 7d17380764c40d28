use std::{
    collections::{BTreeMap, HashSet},
    str::FromStr,
};

use serde::Serialize;
use serde_json::Value;

use crate::ConfigError;

/// A relative path pattern the CSS build tool scans for utility classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SourceGlob(String);

impl FromStr for SourceGlob {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.starts_with('/') || s.contains(char::is_whitespace) || s.contains('"')
        {
            return Err(ConfigError::InvalidSourceGlob(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

/// A plugin imported into the build configuration as `import {binding} from "{module}"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    binding: String,
    module: String,
}

impl Plugin {
    pub fn new<B, M>(binding: B, module: M) -> Result<Self, ConfigError>
    where
        B: Into<String>,
        M: Into<String>,
    {
        let binding = binding.into();
        let module = module.into();

        let mut chars = binding.chars();
        let identifier = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

        if !identifier || module.is_empty() || module.contains(['"', '\n']) {
            return Err(ConfigError::InvalidPluginBinding(binding));
        }

        Ok(Self { binding, module })
    }

    #[must_use]
    pub fn binding(&self) -> &str {
        &self.binding
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Theme {
    pub extend: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleBuildConfig {
    pub content: Vec<SourceGlob>,
    pub theme: Theme,
    pub plugins: Vec<Plugin>,
}

impl Default for StyleBuildConfig {
    fn default() -> Self {
        Self {
            content: vec![SourceGlob("./src/**/*.rs".into())],
            theme: Theme::default(),
            plugins: vec![Plugin {
                binding: "daisyui".into(),
                module: "daisyui".into(),
            }],
        }
    }
}

impl StyleBuildConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content.is_empty() {
            return Err(ConfigError::NoSources);
        }

        let mut seen = HashSet::new();
        for plugin in &self.plugins {
            if !seen.insert(plugin.binding()) {
                return Err(ConfigError::DuplicatePlugin(plugin.binding.clone()));
            }
        }

        Ok(())
    }

    /// Renders the `tailwind.config.js` module the build tool loads.
    pub fn to_module(&self) -> serde_json::Result<String> {
        let imports = self
            .plugins
            .iter()
            .map(|plugin| format!("import {} from \"{}\";\n", plugin.binding, plugin.module))
            .collect::<String>();

        let plugins = self
            .plugins
            .iter()
            .map(Plugin::binding)
            .collect::<Vec<_>>()
            .join(", ");

        Ok(format!(
            "{imports}/** @type {{import('tailwindcss').Config}} */
module.exports = {{
  content: {content},
  theme: {{
    extend: {extend},
  }},
  plugins: [{plugins}],
}};
",
            content = serde_json::to_string(&self.content)?,
            extend = serde_json::to_string(&self.theme.extend)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn default_module_matches_build_tool_convention() {
        assert_eq!(
            StyleBuildConfig::default().to_module().unwrap(),
            r#"import daisyui from "daisyui";
/** @type {import('tailwindcss').Config} */
module.exports = {
  content: ["./src/**/*.rs"],
  theme: {
    extend: {},
  },
  plugins: [daisyui],
};
"#
        );
    }

    #[test]
    fn committed_build_module_is_current() {
        assert_eq!(
            StyleBuildConfig::default().to_module().unwrap(),
            include_str!("../../tailwind.config.js")
        );
    }

    #[test]
    fn plugins_are_imported_in_order() {
        let mut config = StyleBuildConfig::default();
        config
            .plugins
            .push(Plugin::new("typography", "@tailwindcss/typography").unwrap());

        let module = config.to_module().unwrap();

        assert!(module.starts_with(concat!(
            "import daisyui from \"daisyui\";\n",
            "import typography from \"@tailwindcss/typography\";\n",
            "/** @type"
        )));
        assert!(module.contains("  plugins: [daisyui, typography],\n"));
    }

    #[test]
    fn default_scans_rust_sources_with_one_plugin() {
        let config = StyleBuildConfig::default();

        assert_eq!(
            config.content,
            vec!["./src/**/*.rs".parse::<SourceGlob>().unwrap()]
        );
        assert!(config.theme.extend.is_empty());
        assert_eq!(config.plugins.len(), 1);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn theme_extensions_are_rendered_as_json() {
        let mut config = StyleBuildConfig::default();
        config
            .theme
            .extend
            .insert("colors".into(), json!({ "brand": "#00a9ff" }));

        let module = config.to_module().unwrap();

        assert!(module.contains(r##"    extend: {"colors":{"brand":"#00a9ff"}},"##));
    }

    #[test]
    fn source_globs_must_be_relative_patterns() {
        assert!("./templates/**/*.html".parse::<SourceGlob>().is_ok());
        assert!("".parse::<SourceGlob>().is_err());
        assert!("/abs/**/*.rs".parse::<SourceGlob>().is_err());
        assert!("./src/my files/*.rs".parse::<SourceGlob>().is_err());
    }

    #[test]
    fn plugin_bindings_must_be_identifiers() {
        assert!(Plugin::new("typography", "@tailwindcss/typography").is_ok());
        assert!(Plugin::new("1st", "x").is_err());
        assert!(Plugin::new("daisy-ui", "daisyui").is_err());
        assert!(Plugin::new("daisyui", "").is_err());
    }

    #[test]
    fn duplicate_plugins_and_empty_content_are_rejected() {
        let mut config = StyleBuildConfig::default();
        config.plugins.push(Plugin::new("daisyui", "daisyui").unwrap());
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicatePlugin("daisyui".into()))
        );

        config.plugins.truncate(1);
        config.content.clear();
        assert_eq!(config.validate(), Err(ConfigError::NoSources));
    }
}
