use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::UserId;
use crate::domain::ReportingError;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color pattern"));

/// Named palette entries. `White` is only offered as a secondary color.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ThemeColor {
    Emerald,
    Purple,
    Chocolate,
    Blue,
    Red,
    Orange,
    Teal,
    Pink,
    White,
    Custom,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TextColor {
    #[default]
    Primary,
    Secondary,
    Light,
    White,
    Dark,
    Custom,
}

/// A `#rrggbb` color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(value: &str) -> Result<Self, ReportingError> {
        let value = value.trim();
        if !HEX_COLOR.is_match(value) {
            return Err(ReportingError::validation(format!(
                "invalid hex color: {value}"
            )));
        }

        Ok(Self(value.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub primary_color: ThemeColor,
    pub secondary_color: ThemeColor,
    pub text_color: TextColor,
    pub custom_primary_color: HexColor,
    pub custom_secondary_color: HexColor,
    pub custom_text_color: HexColor,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: ThemeColor::Emerald,
            secondary_color: ThemeColor::White,
            text_color: TextColor::Primary,
            custom_primary_color: HexColor("#10b981".to_string()),
            custom_secondary_color: HexColor("#ffffff".to_string()),
            custom_text_color: HexColor("#1f2937".to_string()),
        }
    }
}

impl Theme {
    pub fn validate(self) -> Result<Self, ReportingError> {
        if self.primary_color == ThemeColor::White {
            return Err(ReportingError::validation(
                "white is not available as a primary color",
            ));
        }

        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preference {
    pub user_id: UserId,
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn hex_colors_are_validated_and_normalized() {
        assert_eq!(HexColor::parse("#A1B2C3").unwrap().as_str(), "#a1b2c3");
        assert!(HexColor::parse("a1b2c3").is_err());
        assert!(HexColor::parse("#a1b2c").is_err());
        assert!(HexColor::parse("#zzzzzz").is_err());
    }

    #[test]
    fn defaults_match_the_stock_theme() {
        let theme = Theme::default();
        assert_eq!(theme.primary_color, ThemeColor::Emerald);
        assert_eq!(theme.secondary_color, ThemeColor::White);
        assert_eq!(theme.text_color, TextColor::Primary);
        assert_eq!(theme.custom_text_color.as_str(), "#1f2937");
    }

    #[test]
    fn white_primary_is_rejected() {
        let theme = Theme {
            primary_color: ThemeColor::White,
            ..Theme::default()
        };
        assert!(theme.validate().is_err());
    }

    #[test]
    fn color_names_parse_from_storage() {
        assert_eq!(ThemeColor::from_str("chocolate").unwrap(), ThemeColor::Chocolate);
        assert_eq!(TextColor::from_str("dark").unwrap(), TextColor::Dark);
        assert_eq!(ThemeColor::Teal.to_string(), "teal");
    }
}
