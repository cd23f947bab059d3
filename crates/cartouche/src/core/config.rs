//! Render configuration
//!
//! The configuration is a tree of optional settings deserialized from
//! mermaid-style camelCase JSON. Every field is optional at every level; a
//! missing section or key means "no preference", never an error.
//!
//! ```rust
//! use cartouche::core::Config;
//!
//! let config = Config::from_json(r#"{ "flowchart": { "defaultRenderer": "elk" } }"#).unwrap();
//! assert_eq!(config.flowchart_renderer(), Some("elk"));
//! assert_eq!(config.state_renderer(), None);
//! ```

use serde::{Deserialize, Serialize};

use super::DiagramError;

/// Renderer identifier for the legacy dagre-d3 variants
pub const RENDERER_DAGRE_D3: &str = "dagre-d3";
/// Renderer identifier for the dagre-wrapper variants
pub const RENDERER_DAGRE_WRAPPER: &str = "dagre-wrapper";
/// Renderer identifier for the ELK flowchart variant
pub const RENDERER_ELK: &str = "elk";

/// Per-family settings shared by every diagram family
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FamilyConfig {
    /// Preferred renderer/variant for the family's generic tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_renderer: Option<String>,
    /// Family-specific copy of the global arrow marker setting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrow_marker_absolute: Option<bool>,
}

impl FamilyConfig {
    /// Family settings preferring the given renderer
    pub fn with_renderer(renderer: impl Into<String>) -> Self {
        Self {
            default_renderer: Some(renderer.into()),
            ..Self::default()
        }
    }

    fn merge(&self, overrides: &Self) -> Self {
        Self {
            default_renderer: overrides
                .default_renderer
                .clone()
                .or_else(|| self.default_renderer.clone()),
            arrow_marker_absolute: overrides.arrow_marker_absolute.or(self.arrow_marker_absolute),
        }
    }
}

/// Theme values consumed by the style generators
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeVariables {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl ThemeVariables {
    fn merge(&self, overrides: &Self) -> Self {
        fn pick(base: &Option<String>, over: &Option<String>) -> Option<String> {
            over.clone().or_else(|| base.clone())
        }

        Self {
            primary_color: pick(&self.primary_color, &overrides.primary_color),
            line_color: pick(&self.line_color, &overrides.line_color),
            text_color: pick(&self.text_color, &overrides.text_color),
            font_family: pick(&self.font_family, &overrides.font_family),
        }
    }

    /// Primary fill color, falling back to the default theme
    pub fn primary_color(&self) -> &str {
        self.primary_color.as_deref().unwrap_or("#ECECFF")
    }

    /// Line color, falling back to the default theme
    pub fn line_color(&self) -> &str {
        self.line_color.as_deref().unwrap_or("#333333")
    }

    /// Text color, falling back to the default theme
    pub fn text_color(&self) -> &str {
        self.text_color.as_deref().unwrap_or("#333")
    }

    /// Font family, falling back to the default theme
    pub fn font_family(&self) -> &str {
        self.font_family
            .as_deref()
            .unwrap_or("\"trebuchet ms\", verdana, arial, sans-serif")
    }
}

/// Fully merged configuration for one render
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrow_marker_absolute: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flowchart: Option<FamilyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<FamilyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<FamilyConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_variables: Option<ThemeVariables>,
}

fn merge_section<T: Clone>(
    base: &Option<T>,
    overrides: &Option<T>,
    merge: impl Fn(&T, &T) -> T,
) -> Option<T> {
    match (base, overrides) {
        (Some(base), Some(over)) => Some(merge(base, over)),
        (None, Some(over)) => Some(over.clone()),
        (base, None) => base.clone(),
    }
}

impl Config {
    /// The host defaults every render configuration is merged onto
    pub fn mermaid_defaults() -> Self {
        Self {
            arrow_marker_absolute: Some(false),
            flowchart: Some(FamilyConfig::with_renderer(RENDERER_DAGRE_WRAPPER)),
            state: Some(FamilyConfig::with_renderer(RENDERER_DAGRE_WRAPPER)),
            class: Some(FamilyConfig::with_renderer(RENDERER_DAGRE_WRAPPER)),
            theme_variables: Some(ThemeVariables::default()),
        }
    }

    /// Parse a configuration from JSON; unknown keys are ignored
    pub fn from_json(json: &str) -> Result<Self, DiagramError> {
        serde_json::from_str(json)
            .map_err(|e| DiagramError::config_error(format!("invalid configuration: {e}")))
    }

    /// Deep, right-biased merge: values present in `overrides` win
    ///
    /// Absent values never erase present ones, which keeps the merge
    /// associative.
    pub fn merge(&self, overrides: &Config) -> Config {
        Config {
            arrow_marker_absolute: overrides.arrow_marker_absolute.or(self.arrow_marker_absolute),
            flowchart: merge_section(&self.flowchart, &overrides.flowchart, FamilyConfig::merge),
            state: merge_section(&self.state, &overrides.state, FamilyConfig::merge),
            class: merge_section(&self.class, &overrides.class, FamilyConfig::merge),
            theme_variables: merge_section(
                &self.theme_variables,
                &overrides.theme_variables,
                ThemeVariables::merge,
            ),
        }
    }

    /// Preferred flowchart renderer, if configured
    pub fn flowchart_renderer(&self) -> Option<&str> {
        self.flowchart.as_ref()?.default_renderer.as_deref()
    }

    /// Preferred state diagram renderer, if configured
    pub fn state_renderer(&self) -> Option<&str> {
        self.state.as_ref()?.default_renderer.as_deref()
    }

    /// Preferred class diagram renderer, if configured
    pub fn class_renderer(&self) -> Option<&str> {
        self.class.as_ref()?.default_renderer.as_deref()
    }

    /// Global arrow marker setting, `false` when unset
    ///
    /// Init hooks copy this into their family's settings, overwriting any
    /// family-level value.
    pub fn global_arrow_marker_absolute(&self) -> bool {
        self.arrow_marker_absolute.unwrap_or(false)
    }

    /// Theme variables, or the default theme when none are configured
    pub fn theme(&self) -> ThemeVariables {
        self.theme_variables.clone().unwrap_or_default()
    }
}
