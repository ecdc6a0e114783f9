//! Contains various types needed across the crate.

use crate::DEFAULT_PALETTE_SIZE;
use std::fmt::Display;

/// This type is used to specify the (maximum) number of colors to include in a palette.
///
/// This is a simple new type wrapper around `u16`.
/// If a [`PaletteSize`] of `0` is provided to a quantization function,
/// an empty [`Palette`](crate::Palette) will be returned.
///
/// # Examples
/// Use `into` to create [`PaletteSize`]s from `u8`s or `u16`s.
/// ```
/// # use colorsage::PaletteSize;
/// let size = PaletteSize::from(16u8);
/// let size: PaletteSize = 300u16.into();
/// assert_eq!(PaletteSize::default().into_inner(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PaletteSize(u16);

impl PaletteSize {
    /// Creates a new [`PaletteSize`].
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Gets the inner `u16` value.
    #[must_use]
    pub const fn into_inner(self) -> u16 {
        self.0
    }

    /// Gets the inner value as a `usize` for slice lengths.
    #[must_use]
    pub(crate) fn as_usize(self) -> usize {
        usize::from(self.0)
    }
}

impl Default for PaletteSize {
    fn default() -> Self {
        Self(DEFAULT_PALETTE_SIZE)
    }
}

impl From<PaletteSize> for u16 {
    fn from(val: PaletteSize) -> Self {
        val.into_inner()
    }
}

impl From<u8> for PaletteSize {
    fn from(value: u8) -> Self {
        Self(value.into())
    }
}

impl From<u16> for PaletteSize {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl Display for PaletteSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.into_inner())
    }
}
