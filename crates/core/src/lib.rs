#![deny(unsafe_code)]
//! Spline-based color palettes.
//!
//! A [`Palette`] holds named, weighted [`Path`]s of control colors. Each path
//! is fitted with a [`SplineCurve`] (linear, centripetal Catmull-Rom, cubic
//! Bezier or uniform B-spline) in a chosen working [`ColorSpace`], and the
//! palette samples those curves into an ordered [`PaletteSample`].
//!
//! ```
//! use splinker_core::{Color, ColorSpace, Palette, Path, SplineKind};
//!
//! let path = Path::from_colors(
//!     SplineKind::CatmullRom,
//!     ColorSpace::Hsl,
//!     [
//!         Color::hsl(0.0, 100.0, 50.0),
//!         Color::hsl(120.0, 100.0, 50.0),
//!         Color::hsl(240.0, 100.0, 50.0),
//!     ],
//! );
//! let mut palette = Palette::new();
//! palette.add_path("rgb", path).unwrap();
//! let sample = palette.sample(5, ColorSpace::Srgb).unwrap();
//! assert_eq!(sample.len(), 5);
//! assert_eq!(sample.to_hex()[0], "#ff0000");
//! ```

pub mod color;
pub mod config;
pub mod curve;
pub mod error;
pub mod palette;
pub mod params;
pub mod path;
pub mod sampler;

pub use color::{Color, ColorSpace, Hsl, Hsv, LinearRgb, OkLab, OkLch, Srgb};
pub use config::PaletteConfig;
pub use curve::SplineCurve;
pub use error::{Result, SplineError};
pub use palette::Palette;
pub use path::{ControlPoint, Path, PathId, SplineKind};
pub use sampler::{PaletteSample, SampledColor};
