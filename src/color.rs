//! Gradient colors for the result card.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::types::BmiCategory;

/// An opaque RGB color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = String;

    /// Accepts `#rrggbb` and the short `#rgb` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|_| format!("Invalid color: {}", s))
        };
        match hex.len() {
            6 if hex.is_ascii() => Ok(Color::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 if hex.is_ascii() => {
                let short = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
                Ok(Color::rgb(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(format!("Invalid color: {}", s)),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Start and end colors of the result card gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorBand {
    pub start: Color,
    pub end: Color,
}

impl ColorBand {
    pub const fn new(start: Color, end: Color) -> Self {
        Self { start, end }
    }

    /// Neutral grey shown before any result exists.
    pub const UNSET: ColorBand = ColorBand::new(Color::rgb(0xdd, 0xdd, 0xdd), Color::rgb(0xcc, 0xcc, 0xcc));
    /// Light blue.
    pub const UNDERWEIGHT: ColorBand = ColorBand::new(Color::rgb(0xa8, 0xda, 0xdc), Color::rgb(0x45, 0x7b, 0x9d));
    /// Green.
    pub const NORMAL: ColorBand = ColorBand::new(Color::rgb(0x8b, 0xc3, 0x4a), Color::rgb(0x4c, 0xaf, 0x50));
    /// Orange.
    pub const OVERWEIGHT: ColorBand = ColorBand::new(Color::rgb(0xff, 0xb7, 0x4d), Color::rgb(0xff, 0x98, 0x00));
    /// Red.
    pub const OBESE: ColorBand = ColorBand::new(Color::rgb(0xe5, 0x73, 0x73), Color::rgb(0xf4, 0x43, 0x36));

    /// Looks a band up by name: `"unset"` or a category name (case-insensitive).
    pub fn for_name(name: &str) -> Option<ColorBand> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("unset") {
            return Some(ColorBand::UNSET);
        }
        BmiCategory::from_str(name).ok().map(|c| c.color_band())
    }
}

impl Default for ColorBand {
    fn default() -> Self {
        ColorBand::UNSET
    }
}

impl BmiCategory {
    pub fn color_band(&self) -> ColorBand {
        match self {
            BmiCategory::Underweight => ColorBand::UNDERWEIGHT,
            BmiCategory::Normal => ColorBand::NORMAL,
            BmiCategory::Overweight => ColorBand::OVERWEIGHT,
            BmiCategory::Obese => ColorBand::OBESE,
        }
    }
}

/// Band for a category, or the neutral band when there is no result yet.
pub fn color_band_for(category: Option<BmiCategory>) -> ColorBand {
    category.map(|c| c.color_band()).unwrap_or(ColorBand::UNSET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_unset_band_is_neutral() {
        assert_eq!(color_band_for(None), ColorBand::UNSET);
        assert_eq!(ColorBand::for_name("unset"), Some(ColorBand::UNSET));
        assert_eq!(ColorBand::UNSET.start.to_string(), "#dddddd");
        assert_eq!(ColorBand::UNSET.end.to_string(), "#cccccc");
    }

    #[test]
    fn test_obese_band_is_red() {
        let band = color_band_for(Some(BmiCategory::Obese));
        assert_eq!(band, ColorBand::OBESE);
        assert_eq!(ColorBand::for_name("Obese"), Some(band));
        assert_eq!(band.end.to_string(), "#f44336");
        assert!(band.end.r > band.end.g && band.end.r > band.end.b);
    }

    #[test]
    fn test_every_category_has_its_own_band() {
        let mut seen = vec![ColorBand::UNSET];
        for category in BmiCategory::iter() {
            let band = category.color_band();
            assert!(!seen.contains(&band), "{} shares a band", category);
            seen.push(band);
        }
        assert_eq!(ColorBand::for_name("purple"), None);
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!("#ff9800".parse::<Color>().unwrap(), Color::rgb(0xff, 0x98, 0x00));
        assert_eq!("#ddd".parse::<Color>().unwrap(), Color::rgb(0xdd, 0xdd, 0xdd));
        assert!("#12345".parse::<Color>().is_err());
        assert!("zzzzzz".parse::<Color>().is_err());
    }

    #[test]
    fn test_band_serialization() {
        let json = serde_json::to_string(&ColorBand::NORMAL).unwrap();
        assert_eq!(json, r##"{"start":"#8bc34a","end":"#4caf50"}"##);
        let back: ColorBand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ColorBand::NORMAL);
    }
}
