//! Symbolic and hex color resolution for page styling.

use core::fmt;

/// 8-bit RGB color used across documents and backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Resolve a symbolic name or canonical hex value.
    ///
    /// Named colors form a small closed table; anything starting with `#`
    /// passes through as `#RGB` or `#RRGGBB`.
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let trimmed = value.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return Self::parse_hex(hex).ok_or_else(|| ColorError::InvalidHex(trimmed.to_string()));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "black" => Ok(Self::new(0x00, 0x00, 0x00)),
            "white" => Ok(Self::new(0xFF, 0xFF, 0xFF)),
            "red" => Ok(Self::new(0xFF, 0x00, 0x00)),
            "green" => Ok(Self::new(0x00, 0x80, 0x00)),
            "blue" => Ok(Self::new(0x00, 0x00, 0xFF)),
            "lightgrey" | "lightgray" => Ok(Self::new(0xD3, 0xD3, 0xD3)),
            _ => Err(ColorError::UnknownName(trimmed.to_string())),
        }
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (slot, c) in channels.iter_mut().zip(hex.chars()) {
                    let nibble = c.to_digit(16)? as u8;
                    *slot = nibble << 4 | nibble;
                }
                Some(Self::new(channels[0], channels[1], channels[2]))
            }
            6 => {
                let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
                let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
                let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
                Some(Self::new(r, g, b))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Color value could not be resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorError {
    /// Name is outside the closed lookup table.
    UnknownName(String),
    /// Hex value is not `#RGB` or `#RRGGBB`.
    InvalidHex(String),
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownName(name) => write!(f, "unknown color name: {}", name),
            Self::InvalidHex(value) => write!(f, "invalid hex color: {}", value),
        }
    }
}

impl std::error::Error for ColorError {}
