// Terminal colours for object sizes
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use std::fmt;

/// Objects at or below this size are printed in `WHITE` (1 MiB).
pub const MIN_COLOR_THRESHOLD: u64 = 1024 * 1024;

/// Objects at or above this size are printed in `DARK_RED` (400 MiB).
pub const MAX_COLOR_THRESHOLD: u64 = 400 * 1024 * 1024;

/// Colour used for small objects.
pub const WHITE: Color = Color::new(255, 255, 255);

/// Colour used for the largest objects.
pub const DARK_RED: Color = Color::new(220, 0, 0);

/// ANSI sequence resetting the terminal colour.
pub const COLOR_RESET: &str = "\x1b[0m";

/// An RGB colour.
///
/// Channels are nominally `0..=255`, but are kept as `i32` so that
/// interpolating outside of `0.0..=1.0` extrapolates instead of clamping.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: i32,
    /// Green channel.
    pub g: i32,
    /// Blue channel.
    pub b: i32,
}

impl Color {
    /// Return a new `Color` from its channels.
    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Self { r, g, b }
    }

    /// Linearly interpolate between `self` and `other`.
    ///
    /// A `factor` of `0.0` returns `self` and `1.0` returns `other`. Each
    /// channel is truncated toward zero. The factor is not clamped.
    pub fn interpolate(&self, other: &Self, factor: f64) -> Self {
        let channel = |a: i32, b: i32| {
            (f64::from(a) * (1.0 - factor) + f64::from(b) * factor) as i32
        };

        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }

    /// Return the colour an object of `size` bytes should be printed in.
    ///
    /// Sizes up to `MIN_COLOR_THRESHOLD` are `WHITE`, sizes from
    /// `MAX_COLOR_THRESHOLD` upward are `DARK_RED`. Anything in between is
    /// interpolated by `size / MAX_COLOR_THRESHOLD`.
    pub fn for_size(size: u64) -> Self {
        if size <= MIN_COLOR_THRESHOLD {
            WHITE
        }
        else if size >= MAX_COLOR_THRESHOLD {
            DARK_RED
        }
        else {
            let factor = size as f64 / MAX_COLOR_THRESHOLD as f64;

            WHITE.interpolate(&DARK_RED, factor)
        }
    }
}

/// Displays as a 24-bit ANSI foreground colour escape sequence.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }
}
