//! Storefront configuration (`config.toml`).
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by a single user config file placed in the source directory
//! (the `--source` flag, current directory by default).
//!
//! ## Configuration Options
//!
//! ```toml
//! # Every key is optional; the values below are the defaults
//!
//! site_name = "Print Perfect"
//! tagline = "Professional printing for books, cards and stationery"
//!
//! [faq]
//! endpoint = "http://print-perfect.local/wp-json/wp/v2/posts"
//! category = 5              # WordPress category holding the FAQ posts
//! timeout_secs = 30         # Whole-request timeout
//!
//! [calculator]
//! page_count_policy = "clamp"   # or "snap-to-minimum"
//!
//! [theme]
//! max_width = "72rem"       # Width of the main content column
//! grid_gap = "1.5rem"       # Gap between product cards
//!
//! [theme.page_padding]
//! size = "4vw"
//! min = "1rem"
//! max = "3rem"
//!
//! [colors.light]
//! background = "#f8fafc"
//! surface = "#ffffff"       # Product cards, quote box
//! text = "#0f172a"
//! text_muted = "#64748b"
//! border = "#e2e8f0"
//! accent = "#2563eb"        # Links, buttons, prices
//! on_accent = "#ffffff"     # Text drawn on accent
//!
//! [colors.dark]
//! background = "#0b1120"
//! surface = "#111827"
//! text = "#f1f5f9"
//! text_muted = "#94a3b8"
//! border = "#1f2937"
//! accent = "#60a5fa"
//! on_accent = "#0b1120"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse; override just the values you want:
//!
//! ```toml
//! [faq]
//! endpoint = "https://cms.example.com/wp-json/wp/v2/posts"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::pricing::PageCountPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Shop name, shown in the header and page titles.
    pub site_name: String,
    /// One-line description under the home page heading.
    pub tagline: String,
    /// Where the FAQ posts come from.
    pub faq: FaqConfig,
    /// Book calculator behavior.
    pub calculator: CalculatorConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Layout settings.
    pub theme: ThemeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Print Perfect".to_string(),
            tagline: "Professional printing for books, cards and stationery".to_string(),
            faq: FaqConfig::default(),
            calculator: CalculatorConfig::default(),
            colors: ColorConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_name must not be empty".into(),
            ));
        }
        if !(self.faq.endpoint.starts_with("http://") || self.faq.endpoint.starts_with("https://"))
        {
            return Err(ConfigError::Validation(format!(
                "faq.endpoint must be an http(s) URL, got '{}'",
                self.faq.endpoint
            )));
        }
        if self.faq.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "faq.timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// WordPress REST API settings for the FAQ page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaqConfig {
    /// Posts collection URL, without query string.
    pub endpoint: String,
    /// Category ID the FAQ posts are filed under.
    pub category: u32,
    /// Timeout for the whole request, in seconds.
    pub timeout_secs: u64,
}

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://print-perfect.local/wp-json/wp/v2/posts".to_string(),
            category: 5,
            timeout_secs: 30,
        }
    }
}

/// Book calculator settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    /// What happens to the page count when the binding changes.
    pub page_count_policy: PageCountPolicy,
}

/// A responsive CSS size expressed as `clamp(min, size, max)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClampSize {
    /// Preferred/fluid value, typically viewport-relative (e.g. `"4vw"`).
    pub size: String,
    /// Minimum bound (e.g. `"1rem"`).
    pub min: String,
    /// Maximum bound (e.g. `"3rem"`).
    pub max: String,
}

impl ClampSize {
    /// Render as a CSS `clamp()` expression.
    pub fn to_css(&self) -> String {
        format!("clamp({}, {}, {})", self.min, self.size, self.max)
    }
}

/// Theme/layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Width of the main content column (CSS value).
    pub max_width: String,
    /// Gap between product cards and option tiles (CSS value).
    pub grid_gap: String,
    /// Horizontal padding of the page body.
    pub page_padding: ClampSize,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            max_width: "72rem".to_string(),
            grid_gap: "1.5rem".to_string(),
            page_padding: ClampSize {
                size: "4vw".to_string(),
                min: "1rem".to_string(),
                max: "3rem".to_string(),
            },
        }
    }
}

/// Storefront palette, one per `prefers-color-scheme`.
///
/// Each scheme fills unset keys from its own defaults: a partial
/// `[colors.dark]` stays dark.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ColorOverrides")]
pub struct ColorConfig {
    pub light: Palette,
    pub dark: Palette,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: Palette::light(),
            dark: Palette::dark(),
        }
    }
}

/// Colors for one scheme. Each field becomes a `--color-*` CSS variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    /// Page background.
    pub background: String,
    /// Raised areas: product cards and the quote box.
    pub surface: String,
    pub text: String,
    pub text_muted: String,
    pub border: String,
    /// Links, buttons, selected options and prices.
    pub accent: String,
    /// Text drawn on an accent background.
    pub on_accent: String,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            background: "#f8fafc".into(),
            surface: "#ffffff".into(),
            text: "#0f172a".into(),
            text_muted: "#64748b".into(),
            border: "#e2e8f0".into(),
            accent: "#2563eb".into(),
            on_accent: "#ffffff".into(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: "#0b1120".into(),
            surface: "#111827".into(),
            text: "#f1f5f9".into(),
            text_muted: "#94a3b8".into(),
            border: "#1f2937".into(),
            accent: "#60a5fa".into(),
            on_accent: "#0b1120".into(),
        }
    }

    /// CSS variable name and value for every color, in declaration order.
    pub fn variables(&self) -> [(&'static str, &str); 7] {
        [
            ("--color-bg", &self.background),
            ("--color-surface", &self.surface),
            ("--color-text", &self.text),
            ("--color-text-muted", &self.text_muted),
            ("--color-border", &self.border),
            ("--color-accent", &self.accent),
            ("--color-on-accent", &self.on_accent),
        ]
    }
}

/// `[colors]` as written in `config.toml`.
#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct ColorOverrides {
    light: PaletteOverrides,
    dark: PaletteOverrides,
}

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct PaletteOverrides {
    background: Option<String>,
    surface: Option<String>,
    text: Option<String>,
    text_muted: Option<String>,
    border: Option<String>,
    accent: Option<String>,
    on_accent: Option<String>,
}

impl PaletteOverrides {
    fn apply(self, base: Palette) -> Palette {
        Palette {
            background: self.background.unwrap_or(base.background),
            surface: self.surface.unwrap_or(base.surface),
            text: self.text.unwrap_or(base.text),
            text_muted: self.text_muted.unwrap_or(base.text_muted),
            border: self.border.unwrap_or(base.border),
            accent: self.accent.unwrap_or(base.accent),
            on_accent: self.on_accent.unwrap_or(base.on_accent),
        }
    }
}

impl From<ColorOverrides> for ColorConfig {
    fn from(overrides: ColorOverrides) -> Self {
        Self {
            light: overrides.light.apply(Palette::light()),
            dark: overrides.dark.apply(Palette::dark()),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Print Perfect Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the directory passed as --source (default: current
# directory). Unknown keys will cause an error.

# Shop name, shown in the header and page titles.
site_name = "Print Perfect"

# One-line description under the home page heading.
tagline = "Professional printing for books, cards and stationery"

# ---------------------------------------------------------------------------
# FAQ content (WordPress REST API)
# ---------------------------------------------------------------------------
[faq]
# Posts collection URL. The query string is added by the build:
#   ?categories=<category>&orderby=date&order=asc
endpoint = "http://print-perfect.local/wp-json/wp/v2/posts"

# Category ID holding the FAQ posts.
category = 5

# Timeout for the whole request, in seconds. There is no retry: a failed
# fetch fails the build.
timeout_secs = 30

# ---------------------------------------------------------------------------
# Book calculator
# ---------------------------------------------------------------------------
[calculator]
# What happens to the page count when the binding type changes.
#   "clamp"           - keep it if the new binding allows it, otherwise
#                       move it to the nearest limit (perfect 200 -> saddle 48)
#   "snap-to-minimum" - always reset to the new binding's minimum
page_count_policy = "clamp"

# ---------------------------------------------------------------------------
# Theme / layout
# ---------------------------------------------------------------------------
[theme]
# Width of the main content column (CSS value).
max_width = "72rem"

# Gap between product cards and option tiles (CSS value).
grid_gap = "1.5rem"

# Horizontal page padding, as CSS clamp(min, size, max).
[theme.page_padding]
size = "4vw"
min = "1rem"
max = "3rem"

# ---------------------------------------------------------------------------
# Palette. Light applies by default, dark under prefers-color-scheme: dark.
# ---------------------------------------------------------------------------
[colors.light]
background = "#f8fafc"
surface = "#ffffff"       # Product cards, quote box
text = "#0f172a"
text_muted = "#64748b"    # Descriptions, table notes
border = "#e2e8f0"
accent = "#2563eb"        # Links, buttons, prices
on_accent = "#ffffff"     # Text drawn on accent

[colors.dark]
background = "#0b1120"
surface = "#111827"
text = "#f1f5f9"
text_muted = "#94a3b8"
border = "#1f2937"
accent = "#60a5fa"
on_accent = "#0b1120"
"##
}

/// `selector { name: value; ... }` with every line indented `depth` levels.
fn css_rule(selector: &str, declarations: &[(&str, &str)], depth: usize) -> String {
    let pad = "    ".repeat(depth);
    let mut css = format!("{pad}{selector} {{\n");
    for (name, value) in declarations {
        css.push_str(&format!("{pad}    {name}: {value};\n"));
    }
    css.push_str(&format!("{pad}}}"));
    css
}

/// CSS variables for both palettes; dark applies under
/// `prefers-color-scheme: dark`.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        "{}\n\n@media (prefers-color-scheme: dark) {{\n{}\n}}",
        css_rule(":root", &colors.light.variables(), 0),
        css_rule(":root", &colors.dark.variables(), 1),
    )
}

/// Layout variables from the theme.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    let padding = theme.page_padding.to_css();
    css_rule(
        ":root",
        &[
            ("--max-width", theme.max_width.as_str()),
            ("--grid-gap", theme.grid_gap.as_str()),
            ("--page-padding", padding.as_str()),
        ],
        0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_palettes_differ_by_scheme() {
        let colors = ColorConfig::default();
        assert_eq!(colors.light.surface, "#ffffff");
        assert_eq!(colors.dark.on_accent, colors.dark.background);
        assert_ne!(colors.light.accent, colors.dark.accent);
    }

    #[test]
    fn default_config_points_at_local_cms() {
        let config = SiteConfig::default();
        assert_eq!(
            config.faq.endpoint,
            "http://print-perfect.local/wp-json/wp/v2/posts"
        );
        assert_eq!(config.faq.category, 5);
        assert_eq!(config.faq.timeout_secs, 30);
    }

    #[test]
    fn default_page_count_policy_is_clamp() {
        let config = SiteConfig::default();
        assert_eq!(
            config.calculator.page_count_policy,
            PageCountPolicy::ClampIntoRange
        );
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors.dark]
accent = "#f59e0b"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.dark.accent, "#f59e0b");
        // Rest of the palette keeps its defaults
        assert_eq!(config.colors.dark.surface, "#111827");
        assert_eq!(config.colors.light.accent, "#2563eb");
        assert_eq!(config.faq.category, 5);
    }

    #[test]
    fn partial_light_palette_keeps_light_defaults() {
        let config: SiteConfig = toml::from_str("[colors.light]\ntext = \"#222222\"\n").unwrap();
        assert_eq!(config.colors.light.text, "#222222");
        assert_eq!(config.colors.light.surface, Palette::light().surface);
        assert_eq!(config.colors.dark, Palette::dark());
    }

    #[test]
    fn partial_dark_palette_same_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[colors.dark]\naccent = \"#f59e0b\"\n").unwrap();
        let loaded = load_config(tmp.path()).unwrap();
        let parsed: SiteConfig =
            toml::from_str(&fs::read_to_string(tmp.path().join("config.toml")).unwrap()).unwrap();
        assert_eq!(loaded.colors.dark, parsed.colors.dark);
    }

    #[test]
    fn unknown_palette_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[colors.dark]\nlink = \"#000\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn parse_snap_to_minimum_policy() {
        let toml = r#"
[calculator]
page_count_policy = "snap-to-minimum"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.calculator.page_count_policy,
            PageCountPolicy::SnapToMinimum
        );
    }

    #[test]
    fn unknown_policy_rejected() {
        let toml = r#"
[calculator]
page_count_policy = "keep"
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn css_rule_indents_declarations() {
        let css = css_rule(":root", &[("--a", "1"), ("--b", "2")], 1);
        assert_eq!(css, "    :root {\n        --a: 1;\n        --b: 2;\n    }");
    }

    #[test]
    fn color_css_declares_every_palette_color() {
        let mut colors = ColorConfig::default();
        colors.light.accent = "#ff6600".into();
        colors.dark.surface = "#1a1a1a".into();

        let css = generate_color_css(&colors);
        let (light, dark) = css.split_once("@media (prefers-color-scheme: dark)").unwrap();
        assert!(light.contains("--color-accent: #ff6600;"));
        assert!(dark.contains("--color-surface: #1a1a1a;"));
        for (name, _) in colors.light.variables() {
            assert_eq!(css.matches(&format!("{name}:")).count(), 2, "{name}");
        }
        assert!(css.ends_with("    }\n}"));
    }

    #[test]
    fn generate_theme_css_includes_layout_variables() {
        let css = generate_theme_css(&ThemeConfig::default());
        assert!(css.contains("--max-width: 72rem"));
        assert!(css.contains("--grid-gap: 1.5rem"));
        assert!(css.contains("--page-padding: clamp(1rem, 4vw, 3rem)"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site_name, "Print Perfect");
        assert_eq!(config.faq.timeout_secs, 30);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
site_name = "Print Perfect Dev"

[faq]
endpoint = "https://cms.example.com/wp-json/wp/v2/posts"
category = 9
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site_name, "Print Perfect Dev");
        assert_eq!(config.faq.endpoint, "https://cms.example.com/wp-json/wp/v2/posts");
        assert_eq!(config.faq.category, 9);
        // Unspecified values should be defaults
        assert_eq!(config.faq.timeout_secs, 30);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[faq]
endpont = "http://typo"
"#,
        )
        .unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_section_rejected() {
        let toml = r#"
[shipping]
free_over = 50
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    // =========================================================================
    // validate tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_endpoint_must_be_http() {
        let mut config = SiteConfig::default();
        config.faq.endpoint = "ftp://cms/posts".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.faq.endpoint = "https://cms/posts".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_zero_timeout() {
        let mut config = SiteConfig::default();
        config.faq.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("faq.timeout_secs"));
    }

    #[test]
    fn validate_blank_site_name() {
        let mut config = SiteConfig::default();
        config.site_name = "  ".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[faq]
timeout_secs = 0
"#,
        )
        .unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1").unwrap();
        let overlay: toml::Value = toml::from_str("a = 2").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(2));
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base: toml::Value = toml::from_str(
            r#"
[faq]
category = 5
timeout_secs = 30
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[faq]
category = 9
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let faq = merged.get("faq").unwrap();
        assert_eq!(faq.get("category").unwrap().as_integer(), Some(9));
        assert_eq!(faq.get("timeout_secs").unwrap().as_integer(), Some(30));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str(
            r#"
[theme.page_padding]
max = "4rem"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let padding = merged.get("theme").unwrap().get("page_padding").unwrap();
        assert_eq!(padding.get("max").unwrap().as_str(), Some("4rem"));
        assert_eq!(padding.get("min").unwrap().as_str(), Some("1rem"));
    }

    // =========================================================================
    // resolve_config / load_raw_config tests
    // =========================================================================

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        assert!(load_raw_config(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn resolve_config_with_no_overlay() {
        let config = resolve_config(stock_defaults_value(), None).unwrap();
        assert_eq!(config.site_name, "Print Perfect");
        assert_eq!(config.colors.light.background, "#f8fafc");
    }

    #[test]
    fn resolve_config_with_overlay() {
        let overlay: toml::Value = toml::from_str(
            r#"
[calculator]
page_count_policy = "snap-to-minimum"
"#,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(
            config.calculator.page_count_policy,
            PageCountPolicy::SnapToMinimum
        );
        // Other fields preserved from defaults
        assert_eq!(config.faq.category, 5);
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let _: toml::Value =
            toml::from_str(stock_config_toml()).expect("stock config must be valid TOML");
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.site_name, defaults.site_name);
        assert_eq!(config.tagline, defaults.tagline);
        assert_eq!(config.faq.endpoint, defaults.faq.endpoint);
        assert_eq!(config.faq.category, defaults.faq.category);
        assert_eq!(config.calculator.page_count_policy, defaults.calculator.page_count_policy);
        assert_eq!(config.theme.max_width, defaults.theme.max_width);
        assert_eq!(config.colors.light.accent, defaults.colors.light.accent);
        assert_eq!(config.colors.dark.on_accent, defaults.colors.dark.on_accent);
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in [
            "[faq]",
            "[calculator]",
            "[theme]",
            "[theme.page_padding]",
            "[colors.light]",
            "[colors.dark]",
        ] {
            assert!(content.contains(section), "missing {section}");
        }
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.is_table());
        for key in ["site_name", "faq", "calculator", "colors", "theme"] {
            assert!(val.get(key).is_some(), "missing {key}");
        }
    }
}
