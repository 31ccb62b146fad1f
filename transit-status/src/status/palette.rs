//! Background colours for each status and WCAG contrast helpers.
//!
//! The page renders white text straight onto the status colour, so the
//! contrast ratios here decide which text sizes are legible.

use std::fmt;

use crate::domain::Status;

/// WCAG AA minimum contrast for normal-size text.
pub const AA_NORMAL_TEXT: f64 = 4.5;

/// An sRGB colour.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Relative luminance as defined by WCAG 2.x.
    pub fn relative_luminance(&self) -> f64 {
        fn linear(channel: u8) -> f64 {
            let c = f64::from(channel) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * linear(self.0) + 0.7152 * linear(self.1) + 0.0722 * linear(self.2)
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgb({self})")
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Contrast ratio between two colours, from 1.0 to 21.0.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let (la, lb) = (a.relative_luminance(), b.relative_luminance());
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Page background for a status.
pub const fn background(status: Status) -> Rgb {
    match status {
        Status::Fine => Rgb(0x27, 0xae, 0x60),
        Status::Degraded => Rgb(0xe6, 0x7e, 0x22),
        Status::Fucked => Rgb(0xc0, 0x39, 0x2b),
        Status::Unknown => Rgb(0x7f, 0x8c, 0x8d),
    }
}

/// Whether white text of normal size is legible on the status background.
pub fn white_text_passes_aa(status: Status) -> bool {
    contrast_ratio(Rgb::WHITE, background(status)) >= AA_NORMAL_TEXT
}
