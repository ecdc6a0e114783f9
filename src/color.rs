//! Contains the [`Color`] value type and its hex string encoding.

use crate::{Error, Result};
use palette::{white_point::D65, IntoColor, Lab, LinSrgb, Srgb};
use std::{fmt, str::FromStr};

/// The CIELAB representation used for color difference.
pub(crate) type LabColor = Lab<D65, f64>;

/// An sRGB color with each channel normalized to the range `0.0..=1.0`.
///
/// Colors are encoded as lowercase `#rrggbb` hex strings, and two colors are considered the same
/// for counting purposes if and only if their hex strings are identical.
///
/// # Examples
/// ```
/// # use colorsage::Color;
/// # fn main() -> Result<(), colorsage::Error> {
/// let color: Color = "#FF8000".parse()?;
/// assert_eq!(color.hex(), "#ff8000");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    /// The red channel.
    pub red: f64,
    /// The green channel.
    pub green: f64,
    /// The blue channel.
    pub blue: f64,
}

impl Color {
    /// Creates a new [`Color`] from normalized channel values.
    #[must_use]
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Creates a new [`Color`] from 8-bit channel values.
    #[must_use]
    pub fn from_rgb8([r, g, b]: [u8; 3]) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Returns the 8-bit channel values, clamping and rounding each channel.
    #[must_use]
    pub fn to_rgb8(self) -> [u8; 3] {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let quantize = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.red), quantize(self.green), quantize(self.blue)]
    }

    /// Decodes a hex color string.
    ///
    /// The string may have a leading `#` and must contain 6 or 8 hex digits (case-insensitive).
    /// For 8 digits, the last two (alpha) are discarded.
    ///
    /// # Errors
    /// Returns [`Error::InvalidColorFormat`] if the string is not a valid hex color.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);

        if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColorFormat(hex.to_owned()));
        }

        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| Error::InvalidColorFormat(hex.to_owned()))?;
        let value = if digits.len() == 8 { value >> 8 } else { value };

        let [_, r, g, b] = value.to_be_bytes();
        Ok(Self::from_rgb8([r, g, b]))
    }

    /// Encodes this color as a lowercase `#rrggbb` hex string.
    #[must_use]
    pub fn hex(self) -> String {
        hex_rgb8(self.to_rgb8())
    }

    /// Returns the perceptual distance between two colors.
    ///
    /// This is the euclidean distance in the CIELAB color space.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        lab_distance(self.to_lab(), other.to_lab())
    }

    /// Returns the component-wise mean of the given colors.
    ///
    /// # Errors
    /// Returns [`Error::EmptyInput`] if `colors` is empty.
    pub fn average(colors: &[Self]) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::EmptyInput);
        }

        let [r, g, b] = colors.iter().fold([0.0; 3], |[r, g, b], color| {
            [r + color.red, g + color.green, b + color.blue]
        });

        #[allow(clippy::cast_precision_loss)]
        let n = colors.len() as f64;
        Ok(Self::new(r / n, g / n, b / n))
    }

    /// Converts this color to CIELAB.
    pub(crate) fn to_lab(self) -> LabColor {
        let linear: LinSrgb<f64> = Srgb::new(self.red, self.green, self.blue).into_linear();
        linear.into_color()
    }
}

/// Euclidean distance between two CIELAB colors.
pub(crate) fn lab_distance(a: LabColor, b: LabColor) -> f64 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// Formats 8-bit channels as a `#rrggbb` string.
pub(crate) fn hex_rgb8([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Self::from_rgb8(rgb)
    }
}
