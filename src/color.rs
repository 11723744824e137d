//! Color conversions for the pipette tool.
//!
//! Every component is computed in floating point from channels scaled to
//! 0.0-1.0 and rounded once at the end. Hue is reported in whole degrees in
//! `[0, 360)`, every other component as a whole percentage.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cmyk {
    pub c: u8,
    pub m: u8,
    pub y: u8,
    pub k: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hsv {
    pub h: u16,
    pub s: u8,
    pub v: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

/// Display strings for a sampled pixel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelReport {
    pub hex: String,
    pub rgb: String,
    pub cmyk: String,
    pub hsv: String,
    pub hsl: String,
}

impl ColorSample {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Takes an RGBA pixel as read from image data; alpha is dropped.
    pub fn from_rgba([r, g, b, _]: [u8; 4]) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb`, `rrggbb` or the `#rgb` shorthand, case-insensitively.
    pub fn from_hex(raw: &str) -> Option<Self> {
        let digits = raw.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            6 => Some(Self {
                r: channel(&digits[0..2])?,
                g: channel(&digits[2..4])?,
                b: channel(&digits[4..6])?,
            }),
            3 => {
                let short = |i: usize| channel(&digits[i..=i]).map(|v| v * 17);
                Some(Self {
                    r: short(0)?,
                    g: short(1)?,
                    b: short(2)?,
                })
            }
            _ => None,
        }
    }

    pub fn hex(self) -> String {
        to_hex(self.r, self.g, self.b)
    }

    pub fn report(self) -> PixelReport {
        let Self { r, g, b } = self;
        let cmyk = to_cmyk(r, g, b);
        let hsv = to_hsv(r, g, b);
        let hsl = to_hsl(r, g, b);
        PixelReport {
            hex: to_hex(r, g, b),
            rgb: format!("{r}, {g}, {b}"),
            cmyk: format!("{}%, {}%, {}%, {}%", cmyk.c, cmyk.m, cmyk.y, cmyk.k),
            hsv: format!("{}°, {}%, {}%", hsv.h, hsv.s, hsv.v),
            hsl: format!("{}°, {}%, {}%", hsl.h, hsl.s, hsl.l),
        }
    }
}

pub fn to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

pub fn to_cmyk(r: u8, g: u8, b: u8) -> Cmyk {
    // Pure black would divide by zero below.
    if r.max(g).max(b) == 0 {
        return Cmyk { c: 0, m: 0, y: 0, k: 100 };
    }
    let (r, g, b) = unit(r, g, b);
    let k = 1.0 - r.max(g).max(b);
    Cmyk {
        c: percent((1.0 - r - k) / (1.0 - k)),
        m: percent((1.0 - g - k) / (1.0 - k)),
        y: percent((1.0 - b - k) / (1.0 - k)),
        k: percent(k),
    }
}

pub fn to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let (r, g, b) = unit(r, g, b);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let s = if max == 0.0 { 0.0 } else { (max - min) / max };
    Hsv {
        h: degrees(hue(r, g, b, max, min)),
        s: percent(s),
        v: percent(max),
    }
}

pub fn to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let (r, g, b) = unit(r, g, b);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let d = max - min;
    let s = if d == 0.0 {
        0.0
    } else if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    Hsl {
        h: degrees(hue(r, g, b, max, min)),
        s: percent(s),
        l: percent(l),
    }
}

fn unit(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    (f64::from(r) / 255.0, f64::from(g) / 255.0, f64::from(b) / 255.0)
}

/// Hue as a fraction of a full turn; 0 for achromatic samples.
fn hue(r: f64, g: f64, b: f64, max: f64, min: f64) -> f64 {
    let d = max - min;
    if d == 0.0 {
        return 0.0;
    }
    let sector = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    sector / 6.0
}

// Hues just below a full turn round up to 360, which is 0.
fn degrees(turn: f64) -> u16 {
    ((turn * 360.0).round() as u16) % 360
}

fn percent(fraction: f64) -> u8 {
    (fraction * 100.0).round() as u8
}
