use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("menu has no items")]
    NoItems,
    #[error("duplicate menu item key: {0}")]
    DuplicateKey(String),
    #[error("item {key}: invalid color {color:?} (expected #RRGGBB)")]
    InvalidColor { key: String, color: String },
    #[error("invalid section padding {0:?} (expected e.g. \"50px\")")]
    InvalidPadding(String),
}

/// One entry of the right-hand menu and its full-page section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub key: String,
    pub label: String,
    /// Background color shared by the menu entry and its section.
    pub color: String,
    /// Section heading, e.g. "what is your budget ?".
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    /// Whether the label animates onto the heading when the section opens.
    #[serde(default)]
    pub bind: bool,
}

impl MenuItem {
    /// Byte range of the label inside the heading, if the heading mentions it.
    pub fn label_span(&self) -> Option<(usize, usize)> {
        let heading = self.heading.as_deref()?;
        if self.label.is_empty() {
            return None;
        }
        heading
            .find(self.label.as_str())
            .map(|start| (start, start + self.label.len()))
    }

    /// Parse `#RRGGBB` into its components.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

/// Behavior of the full-page section container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullPageOptions {
    pub section_class_name: String,
    pub anchors: Vec<String>,
    pub scroll_bar: bool,
    pub navigation: bool,
    pub vertical_align: bool,
    pub section_padding_top: String,
    pub section_padding_bottom: String,
}

impl Default for FullPageOptions {
    fn default() -> Self {
        Self {
            section_class_name: "section".to_string(),
            anchors: vec![
                "sectionOne".to_string(),
                "sectionTwo".to_string(),
                "sectionThree".to_string(),
            ],
            scroll_bar: false,
            navigation: true,
            vertical_align: false,
            section_padding_top: "0px".to_string(),
            section_padding_bottom: "0px".to_string(),
        }
    }
}

impl FullPageOptions {
    /// Top and bottom section padding in pixels.
    pub fn padding_px(&self) -> Result<(f64, f64), ConfigError> {
        Ok((
            parse_px(&self.section_padding_top)?,
            parse_px(&self.section_padding_bottom)?,
        ))
    }

}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuConfig {
    pub items: Vec<MenuItem>,
    #[serde(default)]
    pub full_page: FullPageOptions,
}

impl Default for MenuConfig {
    fn default() -> Self {
        let item = |key: &str, label: &str, color: &str| MenuItem {
            key: key.to_string(),
            label: label.to_string(),
            color: color.to_string(),
            heading: None,
            answer: None,
            bind: false,
        };
        Self {
            items: vec![
                MenuItem {
                    heading: Some("what is your budget ?".to_string()),
                    answer: Some("400".to_string()),
                    bind: true,
                    ..item("budget", "budget", "#69D2E7")
                },
                MenuItem {
                    heading: Some("where are you leaving from ?".to_string()),
                    answer: Some("New York".to_string()),
                    ..item("leaving-from", "leaving from", "#A7DBD8")
                },
                item("third", "", "#E0E4CC"),
                item("fourth", "", "#69D2E7"),
            ],
            full_page: FullPageOptions::default(),
        }
    }
}

impl MenuConfig {
    pub fn item(&self, key: &str) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.key == key)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items.is_empty() {
            return Err(ConfigError::NoItems);
        }
        for (i, item) in self.items.iter().enumerate() {
            if self.items[..i].iter().any(|prev| prev.key == item.key) {
                return Err(ConfigError::DuplicateKey(item.key.clone()));
            }
            if item.rgb().is_none() {
                return Err(ConfigError::InvalidColor {
                    key: item.key.clone(),
                    color: item.color.clone(),
                });
            }
        }
        self.full_page.padding_px()?;
        Ok(())
    }
}

/// Parse and validate a JSON menu configuration.
pub fn parse_menu_config(data: &[u8]) -> Result<MenuConfig, ConfigError> {
    let config: MenuConfig = serde_json::from_slice(data)?;
    config.validate()?;
    Ok(config)
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn parse_px(s: &str) -> Result<f64, ConfigError> {
    s.trim()
        .strip_suffix("px")
        .and_then(|n| n.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite() && *n >= 0.0)
        .ok_or_else(|| ConfigError::InvalidPadding(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = MenuConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.items.len(), 4);
        assert!(config.item("budget").is_some_and(|i| i.bind));
        assert_eq!(config.full_page.padding_px().unwrap(), (0.0, 0.0));
    }

    #[test]
    fn parses_minimal_json_with_defaults() {
        let json = br##"{"items":[{"key":"a","label":"alpha","color":"#102030"}]}"##;
        let config = parse_menu_config(json).unwrap();
        assert_eq!(config.items[0].key, "a");
        assert!(!config.items[0].bind);
        assert!(config.full_page.navigation);
        assert!(!config.full_page.scroll_bar);
        assert_eq!(config.full_page.anchors[0], "sectionOne");
        assert_eq!(config.items[0].rgb(), Some((0x10, 0x20, 0x30)));
    }

    #[test]
    fn rejects_duplicate_keys() {
        let json = br##"{"items":[
            {"key":"a","label":"x","color":"#000000"},
            {"key":"a","label":"y","color":"#ffffff"}
        ]}"##;
        assert!(matches!(
            parse_menu_config(json),
            Err(ConfigError::DuplicateKey(k)) if k == "a"
        ));
    }

    #[test]
    fn rejects_bad_color() {
        for color in ["teal", "#12345", "#1234567", "#+1+2+3", "#-1-2-3", "#12 456"] {
            let json = format!(r#"{{"items":[{{"key":"a","label":"x","color":"{color}"}}]}}"#);
            match parse_menu_config(json.as_bytes()) {
                Err(ConfigError::InvalidColor { color: c, .. }) => assert_eq!(c, color),
                other => panic!("{color:?} accepted: {other:?}"),
            }
        }
    }

    #[test]
    fn accepts_mixed_case_hex() {
        let json = br##"{"items":[{"key":"a","label":"x","color":"#aBcDeF"}]}"##;
        let config = parse_menu_config(json).unwrap();
        assert_eq!(config.items[0].rgb(), Some((0xab, 0xcd, 0xef)));
    }

    #[test]
    fn rejects_empty_menu_and_bad_padding() {
        assert!(matches!(
            parse_menu_config(br#"{"items":[]}"#),
            Err(ConfigError::NoItems)
        ));
        let json = br##"{"items":[{"key":"a","label":"x","color":"#000000"}],
            "full_page":{"section_padding_top":"1em"}}"##;
        assert!(matches!(
            parse_menu_config(json),
            Err(ConfigError::InvalidPadding(p)) if p == "1em"
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_menu_config(b"{not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn label_span_locates_word_in_heading() {
        let config = MenuConfig::default();
        let budget = config.item("budget").map(MenuItem::label_span);
        assert_eq!(budget, Some(Some((13, 19))));
        let blank = config.item("third").map(MenuItem::label_span);
        assert_eq!(blank, Some(None));
    }
}
