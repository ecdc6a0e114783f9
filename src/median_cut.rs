//! Median cut quantization.
//!
//! The distinct colors of the histogram start out in a single box. Boxes are repeatedly split
//! in two at the median of their widest channel until there are `k` boxes or no box can be split.
//! Each distinct color takes part in the split once regardless of its count,
//! so boxes partition the color space rather than the pixels.
//!
//! Each final box becomes one palette entry, keyed by the average of its colors and
//! counting the histogram occurrences of every color in the box.

use crate::{Color, Histogram, Palette, PaletteSize, Result};
use ordered_float::OrderedFloat;

/// A box of distinct colors and their histogram counts.
type ColorBox = Vec<(Color, u32)>;

/// The color channels in split priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    /// The red channel.
    Red,
    /// The green channel.
    Green,
    /// The blue channel.
    Blue,
}

impl Channel {
    /// All channels, highest priority first.
    const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Gets the value of this channel.
    fn of(self, color: Color) -> f64 {
        match self {
            Channel::Red => color.red,
            Channel::Green => color.green,
            Channel::Blue => color.blue,
        }
    }

    /// Returns the difference between the largest and smallest value of this channel in the box.
    fn range(self, colors: &[(Color, u32)]) -> f64 {
        let (min, max) = colors.iter().fold((1.0f64, 0.0f64), |(min, max), &(color, _)| {
            let v = self.of(color);
            (min.min(v), max.max(v))
        });
        (max - min).max(0.0)
    }
}

/// Returns the channel to split the box along, or `None` if all channels have zero range.
///
/// Ties go to the earlier channel: red, then green, then blue.
fn split_channel(colors: &[(Color, u32)]) -> Option<Channel> {
    let mut best = None;
    let mut best_range = 0.0;
    for channel in Channel::ALL {
        let range = channel.range(colors);
        if range > best_range {
            best = Some(channel);
            best_range = range;
        }
    }
    best
}

/// Splits the box at the median of its widest channel, or returns it back if it cannot be split.
fn split(mut colors: ColorBox) -> std::result::Result<(ColorBox, ColorBox), ColorBox> {
    if colors.len() <= 1 {
        return Err(colors);
    }

    let Some(channel) = split_channel(&colors) else {
        return Err(colors);
    };

    colors.sort_by_key(|&(color, _)| OrderedFloat(channel.of(color)));
    let upper = colors.split_off(colors.len() / 2);
    Ok((colors, upper))
}

/// Splits boxes in passes over the box list until there are `k` boxes or none can be split.
fn median_cut(colors: ColorBox, k: usize) -> Vec<ColorBox> {
    let mut boxes = vec![colors];

    while boxes.len() < k {
        let mut count = boxes.len();
        let mut next = Vec::with_capacity(k);
        let mut any_split = false;

        for colors in boxes {
            if count < k {
                match split(colors) {
                    Ok((lower, upper)) => {
                        next.push(lower);
                        next.push(upper);
                        count += 1;
                        any_split = true;
                    }
                    Err(colors) => next.push(colors),
                }
            } else {
                next.push(colors);
            }
        }

        boxes = next;
        if !any_split {
            break;
        }
    }

    boxes
}

/// Computes a median cut palette for the colors in `histogram`.
///
/// At most `k` colors are returned, fewer if the boxes run out of colors to split.
/// An empty histogram or a `k` of `0` gives an empty palette.
///
/// # Errors
/// Returns an error if a histogram key cannot be decoded.
pub fn palette(histogram: &Histogram, k: PaletteSize) -> Result<Palette> {
    let color_counts = histogram.color_counts()?;
    let k = k.as_usize();
    if color_counts.is_empty() || k == 0 {
        return Ok(Palette::new());
    }

    let mut palette = Palette::new();
    for colors in median_cut(color_counts, k) {
        let members = colors.iter().map(|&(color, _)| color).collect::<Vec<_>>();
        let count = colors
            .iter()
            .fold(0u32, |sum, &(_, count)| sum.saturating_add(count));
        palette.add(Color::average(&members)?, count);
    }

    Ok(palette)
}
