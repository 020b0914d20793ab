//! Color spaces, tagged colors and conversions between them.
//!
//! Channel structs (`Srgb`, `LinearRgb`, `Hsl`, `Hsv`, `OkLab`, `OkLch`) carry
//! the conversion math as pure functions. [`Color`] is the space-tagged value
//! the rest of the crate passes around; [`Color::convert`] never mutates, it
//! returns a new color in the target space.
//!
//! Conversions between RGB, HSL, HSV and OKLab are invertible for in-gamut
//! colors. Converting into a gamut-bounded space (sRGB, linear RGB, HSL, HSV)
//! clamps RGB to [0, 1] rather than failing. OKLab and OKLCh convert directly
//! into each other without passing through sRGB, so no clamping happens there.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SplineError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"` for human-readable formats.
/// The hex round-trip has 8-bit quantization (1/255 precision loss),
/// which is acceptable since hex colors are inherently 8-bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Linear RGB color (gamma-decoded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// HSL with hue in degrees and saturation/lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// HSV with hue in degrees and saturation/value in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// OKLab perceptual color space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// OKLCh (cylindrical form of OKLab).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Srgb {
    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `SplineError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(SplineError::InvalidColor(format!(
                "expected 6 hex digits, got {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| SplineError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Srgb::from_rgb8([
            channel(0..2, "red")?,
            channel(2..4, "green")?,
            channel(4..6, "blue")?,
        ]))
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Builds a color from 0–255 channel values.
    pub fn from_rgb8(rgb: [u8; 3]) -> Srgb {
        Srgb {
            r: rgb[0] as f64 / 255.0,
            g: rgb[1] as f64 / 255.0,
            b: rgb[2] as f64 / 255.0,
        }
    }

    /// Quantizes to 0–255 channel values, clamping out-of-range components.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Clamps every component to [0, 1].
    pub fn clamped(self) -> Srgb {
        Srgb {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Applies inverse sRGB gamma to convert a single sRGB component to linear.
fn srgb_component_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Applies sRGB gamma to convert a single linear component to sRGB.
fn linear_component_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Converts sRGB to linear RGB by applying inverse sRGB gamma.
pub fn srgb_to_linear(c: Srgb) -> LinearRgb {
    LinearRgb {
        r: srgb_component_to_linear(c.r),
        g: srgb_component_to_linear(c.g),
        b: srgb_component_to_linear(c.b),
    }
}

/// Converts linear RGB to sRGB by applying sRGB gamma.
pub fn linear_to_srgb(c: LinearRgb) -> Srgb {
    Srgb {
        r: linear_component_to_srgb(c.r),
        g: linear_component_to_srgb(c.g),
        b: linear_component_to_srgb(c.b),
    }
}

/// Converts linear RGB to OKLab via the OKLab matrix transform.
pub fn linear_to_oklab(c: LinearRgb) -> OkLab {
    let l_ = 0.4122214708 * c.r + 0.5363325363 * c.g + 0.0514459929 * c.b;
    let m_ = 0.2119034982 * c.r + 0.6806995451 * c.g + 0.1073969566 * c.b;
    let s_ = 0.0883024619 * c.r + 0.2817188376 * c.g + 0.6299787005 * c.b;

    let l_c = l_.cbrt();
    let m_c = m_.cbrt();
    let s_c = s_.cbrt();

    OkLab {
        l: 0.2104542553 * l_c + 0.7936177850 * m_c - 0.0040720468 * s_c,
        a: 1.9779984951 * l_c - 2.4285922050 * m_c + 0.4505937099 * s_c,
        b: 0.0259040371 * l_c + 0.7827717662 * m_c - 0.8086757660 * s_c,
    }
}

/// Converts OKLab to linear RGB via the inverse OKLab matrix transform.
pub fn oklab_to_linear(c: OkLab) -> LinearRgb {
    let l_ = c.l + 0.3963377774 * c.a + 0.2158037573 * c.b;
    let m_ = c.l - 0.1055613458 * c.a - 0.0638541728 * c.b;
    let s_ = c.l - 0.0894841775 * c.a - 1.2914855480 * c.b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    LinearRgb {
        r: 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
        g: -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
        b: -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
    }
}

/// Converts OKLab to OKLCh (cylindrical form).
///
/// NaN guard: if chroma is less than 1e-10, hue is set to 0.0 to avoid
/// indeterminate `atan2(0, 0)` results.
pub fn oklab_to_oklch(c: OkLab) -> OkLch {
    let ch = (c.a * c.a + c.b * c.b).sqrt();
    let h = if ch < 1e-10 {
        0.0
    } else {
        normalize_hue(c.b.atan2(c.a).to_degrees())
    };
    OkLch { l: c.l, c: ch, h }
}

/// Converts OKLCh to OKLab.
pub fn oklch_to_oklab(c: OkLch) -> OkLab {
    let h_rad = c.h.to_radians();
    OkLab {
        l: c.l,
        a: c.c * h_rad.cos(),
        b: c.c * h_rad.sin(),
    }
}

/// Convenience: sRGB to OKLCh via the chain sRGB -> linear -> OKLab -> OKLCh.
pub fn srgb_to_oklch(c: Srgb) -> OkLch {
    oklab_to_oklch(linear_to_oklab(srgb_to_linear(c)))
}

/// Convenience: OKLCh to sRGB via the chain OKLCh -> OKLab -> linear -> sRGB,
/// with output clamped to [0, 1].
pub fn oklch_to_srgb(c: OkLch) -> Srgb {
    linear_to_srgb(oklab_to_linear(oklch_to_oklab(c))).clamped()
}

/// Hue in degrees of an RGB triple, given its max component and chroma.
fn rgb_hue(c: Srgb, max: f64, delta: f64) -> f64 {
    if delta < 1e-12 {
        0.0
    } else if max == c.r {
        60.0 * ((c.g - c.b) / delta).rem_euclid(6.0)
    } else if max == c.g {
        60.0 * ((c.b - c.r) / delta + 2.0)
    } else {
        60.0 * ((c.r - c.g) / delta + 4.0)
    }
}

/// Builds sRGB from hue (degrees), chroma and the lightness offset `m`.
fn rgb_from_hue_chroma(h: f64, chroma: f64, m: f64) -> Srgb {
    let h = normalize_hue(h);
    let x = chroma * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let (r, g, b) = match (h / 60.0).floor() as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    Srgb {
        r: r + m,
        g: g + m,
        b: b + m,
    }
}

/// Converts sRGB to HSL. Achromatic colors get hue 0.
pub fn srgb_to_hsl(c: Srgb) -> Hsl {
    let max = c.r.max(c.g).max(c.b);
    let min = c.r.min(c.g).min(c.b);
    let delta = max - min;
    let l = (max + min) / 2.0;
    let denom = 1.0 - (2.0 * l - 1.0).abs();
    let s = if delta < 1e-12 || denom < 1e-12 {
        0.0
    } else {
        delta / denom
    };
    Hsl {
        h: rgb_hue(c, max, delta),
        s: s * 100.0,
        l: l * 100.0,
    }
}

/// Converts HSL to sRGB. Saturation and lightness are clamped to [0, 100].
pub fn hsl_to_srgb(c: Hsl) -> Srgb {
    let s = (c.s / 100.0).clamp(0.0, 1.0);
    let l = (c.l / 100.0).clamp(0.0, 1.0);
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    rgb_from_hue_chroma(c.h, chroma, l - chroma / 2.0)
}

/// Converts sRGB to HSV. Achromatic colors get hue 0.
pub fn srgb_to_hsv(c: Srgb) -> Hsv {
    let max = c.r.max(c.g).max(c.b);
    let min = c.r.min(c.g).min(c.b);
    let delta = max - min;
    let s = if max < 1e-12 { 0.0 } else { delta / max };
    Hsv {
        h: rgb_hue(c, max, delta),
        s: s * 100.0,
        v: max * 100.0,
    }
}

/// Converts HSV to sRGB. Saturation and value are clamped to [0, 100].
pub fn hsv_to_srgb(c: Hsv) -> Srgb {
    let s = (c.s / 100.0).clamp(0.0, 1.0);
    let v = (c.v / 100.0).clamp(0.0, 1.0);
    let chroma = v * s;
    rgb_from_hue_chroma(c.h, chroma, v - chroma)
}

/// Shortest signed arc from hue `from` to hue `to`, in (-180, 180].
pub fn hue_distance(from: f64, to: f64) -> f64 {
    let d = (to - from).rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Interpolates hue along the shorter arc, handling wraparound at 360.
pub fn interpolate_hue(h0: f64, h1: f64, t: f64) -> f64 {
    normalize_hue(h0 + t * hue_distance(h0, h1))
}

/// Normalizes a hue angle to [0, 360).
pub fn normalize_hue(h: f64) -> f64 {
    let n = h.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if n >= 360.0 {
        0.0
    } else {
        n
    }
}

/// OKLCh chroma below which hue is treated as undefined.
const POWERLESS_CHROMA: f64 = 1e-4;

/// HSL/HSV saturation (and HSL lightness margin, HSV value) in percent below
/// which hue is treated as undefined.
const POWERLESS_SATURATION: f64 = 1e-2;

/// Tag naming the coordinate system of a [`Color`].
///
/// Serialized as a lowercase string. Parsing accepts the aliases `rgb`,
/// `lab` and `lch`; anything else is `SplineError::UnsupportedSpace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ColorSpace {
    /// Gamma-encoded sRGB, channels in [0, 1].
    Srgb,
    /// Linear-light RGB, channels in [0, 1].
    LinearRgb,
    /// Hue (degrees), saturation and lightness (percent).
    Hsl,
    /// Hue (degrees), saturation and value (percent).
    Hsv,
    /// OKLab: L in [0, 1], unbounded a/b.
    OkLab,
    /// OKLCh: L in [0, 1], chroma, hue (degrees).
    OkLch,
}

impl ColorSpace {
    pub const ALL: [ColorSpace; 6] = [
        ColorSpace::Srgb,
        ColorSpace::LinearRgb,
        ColorSpace::Hsl,
        ColorSpace::Hsv,
        ColorSpace::OkLab,
        ColorSpace::OkLch,
    ];

    /// Canonical lowercase tag.
    pub fn name(self) -> &'static str {
        match self {
            ColorSpace::Srgb => "srgb",
            ColorSpace::LinearRgb => "linear_rgb",
            ColorSpace::Hsl => "hsl",
            ColorSpace::Hsv => "hsv",
            ColorSpace::OkLab => "oklab",
            ColorSpace::OkLch => "oklch",
        }
    }

    /// Index of the circular (hue) channel, if the space has one.
    pub fn hue_channel(self) -> Option<usize> {
        match self {
            ColorSpace::Hsl | ColorSpace::Hsv => Some(0),
            ColorSpace::OkLch => Some(2),
            _ => None,
        }
    }

    pub fn is_hue_bearing(self) -> bool {
        self.hue_channel().is_some()
    }

    /// Whether conversion into this space clamps to the sRGB gamut.
    pub fn is_bounded(self) -> bool {
        !matches!(self, ColorSpace::OkLab | ColorSpace::OkLch)
    }

    /// True when `coords` sit on the achromatic axis of a hue-bearing space,
    /// where the hue channel carries no color information (only rounding
    /// noise or an arbitrary 0).
    pub fn hue_is_powerless(self, coords: [f64; 3]) -> bool {
        match self {
            ColorSpace::Hsl => {
                let [_, s, l] = coords;
                s.abs() < POWERLESS_SATURATION
                    || l < POWERLESS_SATURATION
                    || l > 100.0 - POWERLESS_SATURATION
            }
            ColorSpace::Hsv => {
                let [_, s, v] = coords;
                s.abs() < POWERLESS_SATURATION || v < POWERLESS_SATURATION
            }
            ColorSpace::OkLch => coords[1].abs() < POWERLESS_CHROMA,
            _ => false,
        }
    }

    /// Maps coordinates to a Cartesian embedding: cylindrical spaces put the
    /// hue on the angle and saturation (or chroma) on the radius.
    ///
    /// The embedding is periodic in hue, so unwrapped hues (outside
    /// [0, 360)) land on the same point as their normalized form.
    pub fn embed(self, coords: [f64; 3]) -> [f64; 3] {
        match self {
            ColorSpace::Hsl | ColorSpace::Hsv => {
                let [h, s, x] = coords;
                let rad = h.to_radians();
                [s * rad.cos(), s * rad.sin(), x]
            }
            ColorSpace::OkLch => {
                let [l, c, h] = coords;
                let rad = h.to_radians();
                [c * rad.cos(), c * rad.sin(), l]
            }
            _ => coords,
        }
    }

    /// Euclidean distance between two coordinate triples of this space,
    /// measured in the Cartesian embedding.
    pub fn chord_distance(self, a: [f64; 3], b: [f64; 3]) -> f64 {
        let ea = self.embed(a);
        let eb = self.embed(b);
        ea.iter()
            .zip(eb.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt()
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpace {
    type Err = SplineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "srgb" | "rgb" => Ok(ColorSpace::Srgb),
            "linear_rgb" | "linear" => Ok(ColorSpace::LinearRgb),
            "hsl" => Ok(ColorSpace::Hsl),
            "hsv" => Ok(ColorSpace::Hsv),
            "oklab" | "lab" => Ok(ColorSpace::OkLab),
            "oklch" | "lch" => Ok(ColorSpace::OkLch),
            _ => Err(SplineError::UnsupportedSpace(s.to_string())),
        }
    }
}

impl TryFrom<String> for ColorSpace {
    type Error = SplineError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ColorSpace> for &'static str {
    fn from(space: ColorSpace) -> Self {
        space.name()
    }
}

/// An immutable coordinate triple tagged with its color space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    space: ColorSpace,
    coords: [f64; 3],
}

#[derive(Deserialize)]
struct ColorRecord {
    space: ColorSpace,
    coords: [f64; 3],
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = ColorRecord::deserialize(deserializer)?;
        Color::try_new(record.space, record.coords).map_err(serde::de::Error::custom)
    }
}

impl Color {
    /// Creates a color from raw coordinates. Hue channels are normalized to
    /// [0, 360).
    pub fn new(space: ColorSpace, coords: [f64; 3]) -> Self {
        let mut coords = coords;
        if let Some(i) = space.hue_channel() {
            coords[i] = normalize_hue(coords[i]);
        }
        Self { space, coords }
    }

    /// Like [`Color::new`], but rejects non-finite coordinates.
    pub fn try_new(space: ColorSpace, coords: [f64; 3]) -> Result<Self> {
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(SplineError::InvalidColor(format!(
                "non-finite coordinates {coords:?} in {space}"
            )));
        }
        Ok(Self::new(space, coords))
    }

    pub fn srgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(ColorSpace::Srgb, [r, g, b])
    }

    pub fn linear_rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(ColorSpace::LinearRgb, [r, g, b])
    }

    /// HSL color: hue in degrees, saturation and lightness in percent.
    pub fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self::new(ColorSpace::Hsl, [h, s, l])
    }

    /// HSV color: hue in degrees, saturation and value in percent.
    pub fn hsv(h: f64, s: f64, v: f64) -> Self {
        Self::new(ColorSpace::Hsv, [h, s, v])
    }

    pub fn oklab(l: f64, a: f64, b: f64) -> Self {
        Self::new(ColorSpace::OkLab, [l, a, b])
    }

    pub fn oklch(l: f64, c: f64, h: f64) -> Self {
        Self::new(ColorSpace::OkLch, [l, c, h])
    }

    /// Parses `"#rrggbb"` into an sRGB color.
    pub fn from_hex(hex: &str) -> Result<Self> {
        Srgb::from_hex(hex).map(Self::from)
    }

    /// Builds an sRGB color from 0–255 channel values.
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Srgb::from_rgb8(rgb).into()
    }

    pub fn space(&self) -> ColorSpace {
        self.space
    }

    pub fn coords(&self) -> [f64; 3] {
        self.coords
    }

    /// Hue in degrees when the color's space is hue-bearing.
    pub fn hue(&self) -> Option<f64> {
        self.space.hue_channel().map(|i| self.coords[i])
    }

    /// Returns this color expressed in `target`.
    pub fn convert(&self, target: ColorSpace) -> Color {
        if self.space == target {
            return *self;
        }
        let coords = match (self.space, target) {
            (ColorSpace::OkLab, ColorSpace::OkLch) => {
                let c = oklab_to_oklch(self.as_oklab());
                [c.l, c.c, c.h]
            }
            (ColorSpace::OkLch, ColorSpace::OkLab) => {
                let c = oklch_to_oklab(self.as_oklch());
                [c.l, c.a, c.b]
            }
            _ => from_srgb(self.to_srgb_unclamped(), target),
        };
        Color::new(target, coords)
    }

    /// Clamps channels into the valid range of a bounded space (RGB in
    /// [0, 1], saturation, lightness and value in [0, 100]). Colors in
    /// OKLab and OKLCh are returned unchanged.
    pub fn clamped(&self) -> Color {
        let [x, y, z] = self.coords;
        let coords = match self.space {
            ColorSpace::Srgb | ColorSpace::LinearRgb => {
                [x.clamp(0.0, 1.0), y.clamp(0.0, 1.0), z.clamp(0.0, 1.0)]
            }
            ColorSpace::Hsl | ColorSpace::Hsv => [x, y.clamp(0.0, 100.0), z.clamp(0.0, 100.0)],
            ColorSpace::OkLab | ColorSpace::OkLch => return *self,
        };
        Color::new(self.space, coords)
    }

    /// sRGB view of this color, clamped to the gamut.
    pub fn to_srgb(&self) -> Srgb {
        self.to_srgb_unclamped().clamped()
    }

    /// 0–255 RGB triple, as consumed by image tooling.
    pub fn to_rgb8(&self) -> [u8; 3] {
        self.to_srgb().to_rgb8()
    }

    pub fn to_hex(&self) -> String {
        self.to_srgb().to_hex()
    }

    /// Signed shortest hue arc from `self` to `other`, in (-180, 180].
    ///
    /// `other` is converted into `self`'s space first. Fails with
    /// `InvalidOperation` when that space has no hue channel.
    pub fn hue_distance(&self, other: &Color) -> Result<f64> {
        let i = self.space.hue_channel().ok_or_else(|| {
            SplineError::InvalidOperation(format!("{} has no hue channel", self.space))
        })?;
        let other = other.convert(self.space);
        Ok(hue_distance(self.coords[i], other.coords[i]))
    }

    /// Distance to `other` in this color's space (see [`ColorSpace::chord_distance`]).
    pub fn distance(&self, other: &Color) -> f64 {
        self.space
            .chord_distance(self.coords, other.convert(self.space).coords)
    }

    fn as_oklab(&self) -> OkLab {
        let [l, a, b] = self.coords;
        OkLab { l, a, b }
    }

    fn as_oklch(&self) -> OkLch {
        let [l, c, h] = self.coords;
        OkLch { l, c, h }
    }

    fn to_srgb_unclamped(&self) -> Srgb {
        let [x, y, z] = self.coords;
        match self.space {
            ColorSpace::Srgb => Srgb { r: x, g: y, b: z },
            ColorSpace::LinearRgb => linear_to_srgb(LinearRgb { r: x, g: y, b: z }),
            ColorSpace::Hsl => hsl_to_srgb(Hsl { h: x, s: y, l: z }),
            ColorSpace::Hsv => hsv_to_srgb(Hsv { h: x, s: y, v: z }),
            ColorSpace::OkLab => linear_to_srgb(oklab_to_linear(self.as_oklab())),
            ColorSpace::OkLch => {
                linear_to_srgb(oklab_to_linear(oklch_to_oklab(self.as_oklch())))
            }
        }
    }
}

/// Expresses an sRGB value in `target`, clamping first when `target` is
/// gamut-bounded.
fn from_srgb(c: Srgb, target: ColorSpace) -> [f64; 3] {
    let c = if target.is_bounded() { c.clamped() } else { c };
    match target {
        ColorSpace::Srgb => [c.r, c.g, c.b],
        ColorSpace::LinearRgb => {
            let lin = srgb_to_linear(c);
            [lin.r, lin.g, lin.b]
        }
        ColorSpace::Hsl => {
            let hsl = srgb_to_hsl(c);
            [hsl.h, hsl.s, hsl.l]
        }
        ColorSpace::Hsv => {
            let hsv = srgb_to_hsv(c);
            [hsv.h, hsv.s, hsv.v]
        }
        ColorSpace::OkLab => {
            let lab = linear_to_oklab(srgb_to_linear(c));
            [lab.l, lab.a, lab.b]
        }
        ColorSpace::OkLch => {
            let lch = srgb_to_oklch(c);
            [lch.l, lch.c, lch.h]
        }
    }
}

impl From<Srgb> for Color {
    fn from(c: Srgb) -> Self {
        Color::srgb(c.r, c.g, c.b)
    }
}

impl From<OkLch> for Color {
    fn from(c: OkLch) -> Self {
        Color::oklch(c.l, c.c, c.h)
    }
}

impl From<OkLab> for Color {
    fn from(c: OkLab) -> Self {
        Color::oklab(c.l, c.a, c.b)
    }
}

impl From<Hsl> for Color {
    fn from(c: Hsl) -> Self {
        Color::hsl(c.h, c.s, c.l)
    }
}
