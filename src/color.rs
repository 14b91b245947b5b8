//! ARGB color of the traffic indicator.

use crate::error::SettingsError;
use std::fmt;
use std::str::FromStr;

/// A 32-bit ARGB color.
///
/// # Example
///
/// ```
/// use trafficmeter_core::Argb;
///
/// let color: Argb = "#80FF0000".parse().unwrap();
/// assert_eq!(color.alpha(), 0x80);
/// assert_eq!(color.summary(), "#80ff0000");
/// assert_eq!(Argb::DEFAULT.summary(), "#ffffffff");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Argb(pub u32);

impl Argb {
    /// Opaque white.
    pub const DEFAULT: Argb = Argb(0xFFFF_FFFF);

    /// Build a color from its channels.
    pub const fn from_channels(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self(u32::from_be_bytes([alpha, red, green, blue]))
    }

    /// Reinterpret a value read from an integer settings slot.
    pub const fn from_stored(stored: i32) -> Self {
        Self(stored.cast_unsigned())
    }

    /// The value to write into an integer settings slot.
    pub const fn to_stored(self) -> i32 {
        self.0.cast_signed()
    }

    /// Alpha channel.
    pub const fn alpha(self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    /// Red channel.
    pub const fn red(self) -> u8 {
        self.0.to_be_bytes()[1]
    }

    /// Green channel.
    pub const fn green(self) -> u8 {
        self.0.to_be_bytes()[2]
    }

    /// Blue channel.
    pub const fn blue(self) -> u8 {
        self.0.to_be_bytes()[3]
    }

    /// `#` followed by eight lowercase hex digits.
    pub fn summary(self) -> String {
        self.to_string()
    }
}

impl Default for Argb {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

impl FromStr for Argb {
    type Err = SettingsError;

    /// Parse `#rrggbb` (opaque) or `#aarrggbb`, in either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SettingsError::InvalidColor(s.to_owned());

        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;

        match hex.len() {
            6 => Ok(Self(0xFF00_0000 | value)),
            8 => Ok(Self(value)),
            _ => Err(invalid()),
        }
    }
}
