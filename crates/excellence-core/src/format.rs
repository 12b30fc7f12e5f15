use serde::{Deserialize, Serialize};

/// RGBA color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "default_alpha")]
    pub a: u8,
}

fn default_alpha() -> u8 {
    255
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Convert to CSS hex color string
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                self.r, self.g, self.b, self.a
            )
        }
    }

    /// Parse from CSS hex color string
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => None,
        }
    }
}

/// Formatting applied to a header row after it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderStyle {
    pub bold: bool,
    pub fill: Color,
    pub font_color: Color,
}

impl HeaderStyle {
    /// Green header used for downloaded data
    pub const DATA: HeaderStyle = HeaderStyle {
        bold: true,
        fill: Color::rgb(0x2E, 0x7D, 0x32),
        font_color: Color::WHITE,
    };

    /// Blue header used for upload templates
    pub const TEMPLATE: HeaderStyle = HeaderStyle {
        bold: true,
        fill: Color::rgb(0x44, 0x72, 0xC4),
        font_color: Color::WHITE,
    };
}

impl Default for HeaderStyle {
    fn default() -> Self {
        HeaderStyle::DATA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        assert_eq!(HeaderStyle::DATA.fill.to_hex(), "#2E7D32");
        assert_eq!(HeaderStyle::TEMPLATE.fill.to_hex(), "#4472C4");
        assert_eq!(Color::from_hex("#2e7d32"), Some(HeaderStyle::DATA.fill));
        assert_eq!(Color::from_hex("ffffff80").map(|c| c.a), Some(0x80));
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#zz0000"), None);
    }
}
