//! OKLCH colors for web palettes.
//!
//! Palette entries travel as `#RRGGBB` strings. Anything that changes a
//! color (saturation, brightness, blending) parses into OKLCH, works there,
//! gamut-maps back into sRGB, and formats as uppercase `#RRGGBB`.
//!
//! Conversion pipeline:
//!
//! ```text
//! #RRGGBB ↔ sRGB ↔ linear sRGB ↔ LMS ↔ Oklab ↔ OKLCH
//! ```
//!
//! The Oklab matrices are Björn Ottosson's
//! (<https://bottosson.github.io/posts/oklab/>).

use std::fmt;

// ─── Color ───────────────────────────────────────────────────────────────────

/// An opaque color in OKLCH space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Lightness, 0.0 (black) to 1.0 (white).
    pub l: f64,
    /// Chroma, 0.0 (gray) to about 0.37.
    pub c: f64,
    /// Hue angle in degrees, `[0, 360)`.
    pub h: f64,
}

impl Color {
    pub const BLACK: Self = Self::oklch(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::oklch(1.0, 0.0, 0.0);

    #[inline]
    #[must_use]
    pub const fn oklch(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// From 8-bit sRGB channels.
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        let lin = [r, g, b].map(|v| srgb_to_linear(f64::from(v) / 255.0));
        let [l, a, bb] = linear_srgb_to_oklab(lin);
        let (c, h) = ab_to_chroma_hue(a, bb);
        Self { l, c, h }
    }

    /// Parse a strict `#RRGGBB` string (either case).
    ///
    /// Returns `None` for anything else, including `#RGB` and alpha forms.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#')?.as_bytes();
        if digits.len() != 6 {
            return None;
        }
        let byte = |i: usize| Some(hex_digit(digits[i])? << 4 | hex_digit(digits[i + 1])?);
        Some(Self::rgb8(byte(0)?, byte(2)?, byte(4)?))
    }

    // ─── Adjustments ─────────────────────────────────────────────────────

    /// Raise lightness by `amount`, clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn lighten(self, amount: f64) -> Self {
        Self {
            l: (self.l + amount).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Lower lightness by `amount`, clamped to `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn darken(self, amount: f64) -> Self {
        self.lighten(-amount)
    }

    /// Multiply chroma by `factor` (never below zero).
    #[inline]
    #[must_use]
    pub fn scale_chroma(self, factor: f64) -> Self {
        Self {
            c: (self.c * factor).max(0.0),
            ..self
        }
    }

    /// Interpolate towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    ///
    /// Hue follows the shorter arc. A gray endpoint adopts the other
    /// endpoint's hue so grays do not drag the mix through unrelated hues.
    #[must_use]
    pub fn mix(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let h = if self.is_achromatic() {
            other.h
        } else if other.is_achromatic() {
            self.h
        } else {
            let mut delta = other.h - self.h;
            if delta > 180.0 {
                delta -= 360.0;
            } else if delta < -180.0 {
                delta += 360.0;
            }
            normalize_hue(delta.mul_add(t, self.h))
        };
        Self {
            l: (other.l - self.l).mul_add(t, self.l),
            c: (other.c - self.c).mul_add(t, self.c),
            h,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < 1e-6
    }

    // ─── Gamut ───────────────────────────────────────────────────────────

    /// Whether the color is representable in sRGB.
    #[must_use]
    pub fn in_gamut(self) -> bool {
        const EPS: f64 = 1e-4;
        self.unclamped_srgb()
            .iter()
            .all(|v| (-EPS..=1.0 + EPS).contains(v))
    }

    /// Reduce chroma until the color fits sRGB, keeping lightness and hue.
    #[must_use]
    pub fn to_gamut(self) -> Self {
        if self.in_gamut() {
            return self;
        }
        let (mut lo, mut hi) = (0.0, self.c);
        for _ in 0..24 {
            let mid = (lo + hi) * 0.5;
            if (Self { c: mid, ..self }).in_gamut() {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Self { c: lo, ..self }
    }

    // ─── Output ──────────────────────────────────────────────────────────

    /// 8-bit sRGB channels, gamut-mapped first.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let [r, g, b] = self.to_gamut().unclamped_srgb().map(to_u8);
        (r, g, b)
    }

    /// Uppercase `#RRGGBB`.
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    fn unclamped_srgb(self) -> [f64; 3] {
        let (a, b) = chroma_hue_to_ab(self.c, self.h);
        oklab_to_linear_srgb([self.l, a, b]).map(linear_to_srgb)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// `true` when `s` is exactly `#` followed by six hex digits.
#[must_use]
pub fn is_hex_color(s: &str) -> bool {
    s.strip_prefix('#')
        .is_some_and(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
}

// ─── Oklab math ──────────────────────────────────────────────────────────────

const LINEAR_TO_LMS: [[f64; 3]; 3] = [
    [0.412_221_470_8, 0.536_332_536_3, 0.051_445_992_9],
    [0.211_903_498_2, 0.680_699_545_1, 0.107_396_956_6],
    [0.088_302_461_9, 0.281_718_837_6, 0.629_978_700_5],
];

const LMS_TO_OKLAB: [[f64; 3]; 3] = [
    [0.210_454_255_3, 0.793_617_785_0, -0.004_072_046_8],
    [1.977_998_495_1, -2.428_592_205_0, 0.450_593_709_9],
    [0.025_904_037_1, 0.782_771_766_2, -0.808_675_766_0],
];

const OKLAB_TO_LMS: [[f64; 3]; 3] = [
    [1.0, 0.396_337_777_4, 0.215_803_757_3],
    [1.0, -0.105_561_345_8, -0.063_854_172_8],
    [1.0, -0.089_484_177_5, -1.291_485_548_0],
];

const LMS_TO_LINEAR: [[f64; 3]; 3] = [
    [4.076_741_662_1, -3.307_711_591_3, 0.230_969_929_2],
    [-1.268_438_004_6, 2.609_757_401_1, -0.341_319_396_5],
    [-0.004_196_086_3, -0.703_418_614_7, 1.707_614_701_0],
];

fn mat_mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    m.map(|row| row[2].mul_add(v[2], row[1].mul_add(v[1], row[0] * v[0])))
}

fn linear_srgb_to_oklab(rgb: [f64; 3]) -> [f64; 3] {
    let lms = mat_mul(&LINEAR_TO_LMS, rgb).map(f64::cbrt);
    mat_mul(&LMS_TO_OKLAB, lms)
}

fn oklab_to_linear_srgb(lab: [f64; 3]) -> [f64; 3] {
    let lms = mat_mul(&OKLAB_TO_LMS, lab).map(|v| v * v * v);
    mat_mul(&LMS_TO_LINEAR, lms)
}

fn chroma_hue_to_ab(c: f64, h: f64) -> (f64, f64) {
    let (sin, cos) = h.to_radians().sin_cos();
    (c * cos, c * sin)
}

fn ab_to_chroma_hue(a: f64, b: f64) -> (f64, f64) {
    let c = a.hypot(b);
    if c < 1e-9 {
        (0.0, 0.0)
    } else {
        (c, normalize_hue(b.atan2(a).to_degrees()))
    }
}

fn normalize_hue(h: f64) -> f64 {
    h.rem_euclid(360.0)
}

fn srgb_to_linear(v: f64) -> f64 {
    if v <= 0.040_45 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(v: f64) -> f64 {
    if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055f64.mul_add(v.powf(1.0 / 2.4), -0.055)
    }
}

const fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Clamped to [0, 255] before the cast.
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
