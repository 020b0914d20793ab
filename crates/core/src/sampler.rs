//! Turning weighted curves into a flat, ordered list of colors.
//!
//! The sample count `n` is split across curves in proportion to their
//! weights ([`allocate`]), each curve is evaluated at evenly spaced
//! parameters ([`sample_parameters`]) and the results are concatenated in
//! palette order.

use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorSpace};
use crate::curve::SplineCurve;
use crate::error::{Result, SplineError};

/// Splits `n` samples across entries in proportion to `weights`.
///
/// Each entry first gets `round(n * w / sum)`. If rounding leaves the total
/// short, the highest weights receive one more each (ties go to the earlier
/// entry); if it overshoots, the lowest-weight non-empty entries give one
/// back. The result always sums to `n` and zero-weight entries get nothing.
pub fn allocate(weights: &[f64], n: usize) -> Result<Vec<usize>> {
    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(SplineError::InvalidOperation(format!(
            "weights must be finite and non-negative, got {bad}"
        )));
    }
    if n == 0 {
        return Ok(vec![0; weights.len()]);
    }
    let total: f64 = weights.iter().sum();
    if weights.is_empty() || total <= 0.0 {
        return Err(SplineError::InvalidOperation(format!(
            "cannot split {n} samples across zero total weight"
        )));
    }

    let mut counts: Vec<usize> = weights
        .iter()
        .map(|w| (n as f64 * w / total).round() as usize)
        .collect();
    let mut assigned: usize = counts.iter().sum();

    // Stable sort: equal weights keep insertion order.
    let mut by_weight: Vec<usize> = (0..weights.len()).collect();
    by_weight.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]));

    let positive: Vec<usize> = by_weight
        .iter()
        .copied()
        .filter(|&i| weights[i] > 0.0)
        .collect();
    let mut cursor = positive.iter().cycle();
    while assigned < n {
        if let Some(&i) = cursor.next() {
            counts[i] += 1;
            assigned += 1;
        }
    }

    let mut cursor = by_weight.iter().rev().cycle();
    while assigned > n {
        if let Some(&i) = cursor.next() {
            if counts[i] > 0 {
                counts[i] -= 1;
                assigned -= 1;
            }
        }
    }

    Ok(counts)
}

/// Evenly spaced curve parameters.
///
/// Open curves include both ends: `i / (k - 1)`, or `[0.0]` when `k == 1`.
/// Closed curves use `i / k` so the seam is not sampled twice.
pub fn sample_parameters(k: usize, closed: bool) -> Vec<f64> {
    match (k, closed) {
        (0, _) => Vec::new(),
        (1, false) => vec![0.0],
        (_, false) => (0..k).map(|i| i as f64 / (k - 1) as f64).collect(),
        (_, true) => (0..k).map(|i| i as f64 / k as f64).collect(),
    }
}

/// A curve taking part in a sampling pass.
#[derive(Debug, Clone, Copy)]
pub struct WeightedCurve<'a> {
    pub name: &'a str,
    pub curve: &'a SplineCurve,
    pub weight: f64,
}

/// One color of a [`PaletteSample`], tagged with the path it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledColor {
    pub color: Color,
    pub path: String,
}

/// The ordered output of a sampling pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteSample {
    space: ColorSpace,
    entries: Vec<SampledColor>,
}

impl PaletteSample {
    /// Space every color in the sample is expressed in.
    pub fn space(&self) -> ColorSpace {
        self.space
    }

    pub fn entries(&self) -> &[SampledColor] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SampledColor> {
        self.entries.iter()
    }

    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.entries.iter().map(|e| e.color)
    }

    /// Colors contributed by the path called `name`, in parameter order.
    pub fn colors_from<'a>(&'a self, name: &'a str) -> impl Iterator<Item = Color> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.path == name)
            .map(|e| e.color)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 0–255 RGB triples, clamped to the sRGB gamut.
    pub fn to_rgb8(&self) -> Vec<[u8; 3]> {
        self.colors().map(|c| c.to_rgb8()).collect()
    }

    /// Flat, opaque RGBA8 buffer, four bytes per color.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.len() * 4);
        for [r, g, b] in self.to_rgb8() {
            buf.extend_from_slice(&[r, g, b, 255]);
        }
        buf
    }

    /// `#rrggbb` strings.
    pub fn to_hex(&self) -> Vec<String> {
        self.colors().map(|c| c.to_hex()).collect()
    }
}

impl<'a> IntoIterator for &'a PaletteSample {
    type Item = &'a SampledColor;
    type IntoIter = std::slice::Iter<'a, SampledColor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A curve with its share of a sampling pass already decided.
#[derive(Debug, Clone, Copy)]
pub struct AllocatedCurve<'a> {
    pub name: &'a str,
    pub curve: &'a SplineCurve,
    pub count: usize,
}

/// Samples `n` colors from `entries`, converted to `output`.
///
/// Fails with `SplineError::EmptyPalette` when there are no entries. Any
/// evaluation error aborts the whole pass.
pub fn sample(entries: &[WeightedCurve<'_>], n: usize, output: ColorSpace) -> Result<PaletteSample> {
    if entries.is_empty() {
        return Err(SplineError::EmptyPalette);
    }
    let weights: Vec<f64> = entries.iter().map(|e| e.weight).collect();
    let counts = allocate(&weights, n)?;
    log::debug!("sampling {n} colors across {} curves: {counts:?}", entries.len());

    let allocated: Vec<AllocatedCurve<'_>> = entries
        .iter()
        .zip(counts)
        .map(|(e, count)| AllocatedCurve {
            name: e.name,
            curve: e.curve,
            count,
        })
        .collect();
    sample_allocated(&allocated, output)
}

/// Evaluates each curve at its allocated number of evenly spaced parameters
/// and concatenates the results in order.
pub fn sample_allocated(entries: &[AllocatedCurve<'_>], output: ColorSpace) -> Result<PaletteSample> {
    let mut out = Vec::with_capacity(entries.iter().map(|e| e.count).sum());
    for entry in entries {
        for u in sample_parameters(entry.count, entry.curve.is_closed()) {
            let color = entry.curve.evaluate(u)?.convert(output);
            out.push(SampledColor {
                color,
                path: entry.name.to_string(),
            });
        }
    }
    Ok(PaletteSample {
        space: output,
        entries: out,
    })
}
