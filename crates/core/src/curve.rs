//! Spline curves fitted through a path's control points.
//!
//! A [`SplineCurve`] is bound to one `(PathId, version)` snapshot of a
//! [`Path`]. Fitting converts the control points into a working color space,
//! unwraps hue channels along the shorter arc and assigns each control point a
//! chord-length parameter in [0, 1]. Evaluation dispatches once on
//! [`SplineKind`] and re-projects the result into the path's declared space.
//!
//! Hue unwrapping is what keeps every kind on the shorter arc: consecutive
//! control points are stored so that their hue difference is the signed
//! shortest arc, and the spline math runs on those continuous values. A
//! blend between 350° and 10° therefore passes 0°, never 180°.

use glam::DVec3;

use crate::color::{hue_distance, Color, ColorSpace};
use crate::error::{Result, SplineError};
use crate::path::{Path, PathId, SplineKind};
use crate::sampler::sample_parameters;

/// Length substituted for zero-length chords between coincident control points.
pub const MIN_CHORD: f64 = 1e-6;

/// Knot exponent of the centripetal Catmull-Rom parameterization.
const CENTRIPETAL_ALPHA: f64 = 0.5;

/// A continuous curve through one version of a path.
#[derive(Debug, Clone)]
pub struct SplineCurve {
    path_id: PathId,
    path_version: u64,
    kind: SplineKind,
    closed: bool,
    declared: ColorSpace,
    working: ColorSpace,
    /// Working-space control points with one neighbor on each side:
    /// `ext[i + 1]` is control point `i`. Open paths pad with linearly
    /// extrapolated phantoms; closed paths continue around the loop, so
    /// `ext` holds points `-1..=n + 1`.
    ext: Vec<DVec3>,
    /// Normalized chord-length parameter of each control point. Closed paths
    /// carry one more entry, `1.0`, for the seam back to the first point.
    knots: Vec<f64>,
    /// Segment boundaries in parameter space.
    breaks: Vec<f64>,
}

impl SplineCurve {
    /// Fits a curve through `path`, doing the interpolation math in `working`.
    ///
    /// Returns `SplineError::InvalidPathShape` if the path fails
    /// [`Path::validate`].
    pub fn fit(path: &Path, working: ColorSpace) -> Result<Self> {
        path.validate()?;
        let hue = working.hue_channel();
        let mut pts: Vec<DVec3> = path
            .colors()
            .map(|c| DVec3::from_array(c.convert(working).coords()))
            .collect();
        if let Some(h) = hue {
            borrow_powerless_hues(&mut pts, working, h, path.is_closed());
        }
        let ext = if path.is_closed() {
            closed_extension(&pts, hue)
        } else {
            open_extension(&pts, hue)
        };

        let chords = if path.is_closed() { pts.len() } else { pts.len() - 1 };
        let lengths: Vec<f64> = (0..chords)
            .map(|i| {
                working
                    .chord_distance(ext[i + 1].to_array(), ext[i + 2].to_array())
                    .max(MIN_CHORD)
            })
            .collect();
        let total: f64 = lengths.iter().sum();
        let mut knots = Vec::with_capacity(chords + 1);
        let mut acc = 0.0;
        knots.push(0.0);
        for len in &lengths {
            acc += len;
            knots.push(acc / total);
        }
        if let Some(last) = knots.last_mut() {
            *last = 1.0;
        }

        let breaks = match path.kind() {
            SplineKind::Bezier => knots.iter().copied().step_by(3).collect(),
            _ => knots.clone(),
        };

        log::debug!(
            "fitted {:?} curve for path {} v{} ({} points, working space {working})",
            path.kind(),
            path.id().get(),
            path.version(),
            pts.len(),
        );

        Ok(Self {
            path_id: path.id(),
            path_version: path.version(),
            kind: path.kind(),
            closed: path.is_closed(),
            declared: path.space(),
            working,
            ext,
            knots,
            breaks,
        })
    }

    pub fn path_id(&self) -> PathId {
        self.path_id
    }

    pub fn path_version(&self) -> u64 {
        self.path_version
    }

    /// True when `path` is the exact version this curve was fitted against.
    pub fn is_current_for(&self, path: &Path) -> bool {
        self.path_id == path.id() && self.path_version == path.version()
    }

    pub fn kind(&self) -> SplineKind {
        self.kind
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn working_space(&self) -> ColorSpace {
        self.working
    }

    /// Space every evaluated color is returned in.
    pub fn declared_space(&self) -> ColorSpace {
        self.declared
    }

    /// Number of control points the curve was fitted through.
    pub fn len(&self) -> usize {
        self.ext.len() - if self.closed { 3 } else { 2 }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Chord-length parameter of each control point, in [0, 1].
    pub fn knots(&self) -> &[f64] {
        &self.knots[..self.len()]
    }

    /// Evaluates the curve at `u`.
    ///
    /// Open paths accept `u` in [0, 1] and fail with
    /// `SplineError::OutOfRange` otherwise. Closed paths take `u` modulo 1.
    /// Overshoot past the range of a bounded declared space is clamped.
    pub fn evaluate(&self, u: f64) -> Result<Color> {
        let u = self.normalize_parameter(u)?;
        let seg = self.segment_at(u);
        let (b0, b1) = (self.breaks[seg], self.breaks[seg + 1]);
        let s = ((u - b0) / (b1 - b0)).clamp(0.0, 1.0);
        let p = match self.kind {
            SplineKind::Linear => self.point(seg).lerp(self.point(seg + 1), s),
            SplineKind::CatmullRom => self.catmull_rom(seg, s),
            SplineKind::Bezier => self.bezier(seg, s),
            SplineKind::BSpline => self.b_spline(seg, s),
        };
        Ok(Color::new(self.working, p.to_array())
            .convert(self.declared)
            .clamped())
    }

    /// Evaluates `k` evenly spaced parameters (see [`sample_parameters`]).
    pub fn sample(&self, k: usize) -> Result<Vec<Color>> {
        sample_parameters(k, self.closed)
            .into_iter()
            .map(|u| self.evaluate(u))
            .collect()
    }

    fn normalize_parameter(&self, u: f64) -> Result<f64> {
        if !u.is_finite() {
            return Err(SplineError::OutOfRange(u));
        }
        if self.closed {
            let wrapped = u.rem_euclid(1.0);
            return Ok(if wrapped >= 1.0 { 0.0 } else { wrapped });
        }
        if !(0.0..=1.0).contains(&u) {
            return Err(SplineError::OutOfRange(u));
        }
        Ok(u)
    }

    fn segment_at(&self, u: f64) -> usize {
        let segments = self.breaks.len() - 1;
        self.breaks
            .partition_point(|&b| b <= u)
            .saturating_sub(1)
            .min(segments - 1)
    }

    /// Working-space control point `i`, where `i` may be `-1` or run past
    /// the end by the padding `ext` carries.
    fn point(&self, i: usize) -> DVec3 {
        self.ext[i + 1]
    }

    /// The four control points around segment `seg`: `seg - 1 ..= seg + 2`.
    fn window(&self, seg: usize) -> [DVec3; 4] {
        [
            self.ext[seg],
            self.ext[seg + 1],
            self.ext[seg + 2],
            self.ext[seg + 3],
        ]
    }

    fn chord(&self, a: DVec3, b: DVec3) -> f64 {
        self.working
            .chord_distance(a.to_array(), b.to_array())
            .max(MIN_CHORD)
    }

    /// Centripetal Catmull-Rom (Barry-Goldman pyramid) between the middle two
    /// points of the window.
    ///
    /// `s` maps linearly onto the segment's centripetal knot interval. The
    /// curve is C¹ in the centripetal parameter, but segments are laid end to
    /// end on chord-length breaks, so in `u` only the tangent direction is
    /// continuous at interior control points (G¹); speed may jump.
    fn catmull_rom(&self, seg: usize, s: f64) -> DVec3 {
        let [p0, p1, p2, p3] = self.window(seg);
        let t0 = 0.0;
        let t1 = t0 + self.chord(p0, p1).powf(CENTRIPETAL_ALPHA);
        let t2 = t1 + self.chord(p1, p2).powf(CENTRIPETAL_ALPHA);
        let t3 = t2 + self.chord(p2, p3).powf(CENTRIPETAL_ALPHA);
        let t = t1 + s * (t2 - t1);

        let a1 = p0 * ((t1 - t) / (t1 - t0)) + p1 * ((t - t0) / (t1 - t0));
        let a2 = p1 * ((t2 - t) / (t2 - t1)) + p2 * ((t - t1) / (t2 - t1));
        let a3 = p2 * ((t3 - t) / (t3 - t2)) + p3 * ((t - t2) / (t3 - t2));
        let b1 = a1 * ((t2 - t) / (t2 - t0)) + a2 * ((t - t0) / (t2 - t0));
        let b2 = a2 * ((t3 - t) / (t3 - t1)) + a3 * ((t - t1) / (t3 - t1));
        b1 * ((t2 - t) / (t2 - t1)) + b2 * ((t - t1) / (t2 - t1))
    }

    /// Cubic Bezier over the group `[anchor, handle, handle, anchor]`.
    fn bezier(&self, seg: usize, s: f64) -> DVec3 {
        let base = 3 * seg;
        let (p0, c1, c2, p3) = (
            self.point(base),
            self.point(base + 1),
            self.point(base + 2),
            self.point(base + 3),
        );
        let r = 1.0 - s;
        p0 * (r * r * r) + c1 * (3.0 * r * r * s) + c2 * (3.0 * r * s * s) + p3 * (s * s * s)
    }

    /// Uniform cubic B-spline. Approximates its control points.
    fn b_spline(&self, seg: usize, s: f64) -> DVec3 {
        let [p0, p1, p2, p3] = self.window(seg);
        let s2 = s * s;
        let s3 = s2 * s;
        let w0 = (1.0 - s).powi(3);
        let w1 = 3.0 * s3 - 6.0 * s2 + 4.0;
        let w2 = -3.0 * s3 + 3.0 * s2 + 3.0 * s + 1.0;
        let w3 = s3;
        (p0 * w0 + p1 * w1 + p2 * w2 + p3 * w3) / 6.0
    }
}

/// Gives every achromatic point the hue of its nearest chromatic neighbor
/// (by index, wrapping on closed paths; ties go to the earlier one), so gray
/// or white anchors do not drag the curve through an arbitrary hue. Leaves
/// the points alone if none is chromatic.
fn borrow_powerless_hues(pts: &mut [DVec3], space: ColorSpace, hue: usize, closed: bool) {
    let n = pts.len();
    let chromatic: Vec<usize> = (0..n)
        .filter(|&i| !space.hue_is_powerless(pts[i].to_array()))
        .collect();
    if chromatic.is_empty() || chromatic.len() == n {
        return;
    }
    let gap = |a: usize, b: usize| {
        let d = a.abs_diff(b);
        if closed {
            d.min(n - d)
        } else {
            d
        }
    };
    for i in 0..n {
        if !space.hue_is_powerless(pts[i].to_array()) {
            continue;
        }
        if let Some(&j) = chromatic.iter().min_by_key(|&&j| gap(i, j)) {
            let borrowed = pts[j][hue];
            pts[i][hue] = borrowed;
        }
    }
}

/// Moves `next`'s hue so it sits on the shorter arc from `prev`.
fn unwrap_step(prev: DVec3, next: DVec3, hue: Option<usize>) -> DVec3 {
    let mut next = next;
    if let Some(i) = hue {
        next[i] = prev[i] + hue_distance(prev[i], next[i]);
    }
    next
}

fn open_extension(pts: &[DVec3], hue: Option<usize>) -> Vec<DVec3> {
    let n = pts.len();
    let mut chain = Vec::with_capacity(n + 2);
    chain.push(pts[0]);
    for p in &pts[1..] {
        let prev = chain[chain.len() - 1];
        chain.push(unwrap_step(prev, *p, hue));
    }
    let start = chain[0] * 2.0 - chain[1];
    let end = chain[n - 1] * 2.0 - chain[n - 2];
    let mut ext = Vec::with_capacity(n + 2);
    ext.push(start);
    ext.extend(chain);
    ext.push(end);
    ext
}

fn closed_extension(pts: &[DVec3], hue: Option<usize>) -> Vec<DVec3> {
    let n = pts.len();
    let before = unwrap_step(pts[0], pts[n - 1], hue);
    let mut ext = Vec::with_capacity(n + 3);
    ext.push(before);
    ext.push(pts[0]);
    for i in 1..n + 2 {
        let prev = ext[ext.len() - 1];
        ext.push(unwrap_step(prev, pts[i % n], hue));
    }
    ext
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_color_near(a: Color, b: Color, tol: f64) {
        assert_eq!(a.space(), b.space());
        for i in 0..3 {
            let (x, y) = (a.coords()[i], b.coords()[i]);
            let diff = if a.space().hue_channel() == Some(i) {
                hue_distance(x, y).abs()
            } else {
                (x - y).abs()
            };
            assert!(diff < tol, "channel {i}: {a:?} vs {b:?}");
        }
    }

    fn varied_colors() -> Vec<Color> {
        vec![
            Color::srgb(0.9, 0.2, 0.1),
            Color::srgb(0.95, 0.8, 0.2),
            Color::srgb(0.2, 0.7, 0.3),
            Color::srgb(0.1, 0.3, 0.8),
            Color::srgb(0.6, 0.2, 0.7),
        ]
    }

    fn hsl_path(kind: SplineKind, hues: &[f64]) -> Path {
        Path::from_colors(
            kind,
            ColorSpace::Hsl,
            hues.iter().map(|&h| Color::hsl(h, 100.0, 50.0)),
        )
    }

    #[test]
    fn fit_rejects_invalid_shape() {
        let p = Path::from_colors(SplineKind::Bezier, ColorSpace::Srgb, varied_colors());
        let err = SplineCurve::fit(&p, ColorSpace::OkLab).unwrap_err();
        assert!(matches!(
            err,
            SplineError::InvalidPathShape {
                kind: SplineKind::Bezier,
                count: 5,
                ..
            }
        ));
    }

    #[test]
    fn fit_rejects_single_point() {
        let p = Path::from_colors(SplineKind::Linear, ColorSpace::Srgb, [Color::srgb(0.0, 0.0, 0.0)]);
        assert!(SplineCurve::fit(&p, ColorSpace::Srgb).is_err());
    }

    #[test]
    fn curve_is_bound_to_path_version() {
        let p = Path::from_colors(SplineKind::Linear, ColorSpace::Srgb, varied_colors());
        let curve = SplineCurve::fit(&p, ColorSpace::OkLab).unwrap();
        assert!(curve.is_current_for(&p));
        let q = p.recolor(0, Color::srgb(0.0, 0.0, 0.0)).unwrap();
        assert!(!curve.is_current_for(&q));
        assert!(curve.is_current_for(&p));
        assert_eq!(curve.path_id(), q.id());
        assert_eq!(curve.path_version(), p.version());
    }

    #[test]
    fn chord_length_knots_follow_distances() {
        let p = Path::from_colors(
            SplineKind::Linear,
            ColorSpace::Srgb,
            [
                Color::srgb(0.0, 0.0, 0.0),
                Color::srgb(0.1, 0.1, 0.1),
                Color::srgb(1.0, 1.0, 1.0),
            ],
        );
        let curve = SplineCurve::fit(&p, ColorSpace::Srgb).unwrap();
        let knots = curve.knots();
        assert_eq!(knots.len(), 3);
        assert!(knots[0].abs() < 1e-12);
        assert!((knots[1] - 0.1).abs() < 1e-9, "knots: {knots:?}");
        assert!((knots[2] - 1.0).abs() < 1e-12);
        let gray = curve.evaluate(0.1).unwrap();
        assert_color_near(gray, Color::srgb(0.1, 0.1, 0.1), 1e-9);
    }

    #[test]
    fn coincident_points_use_epsilon_chord() {
        let red = Color::srgb(1.0, 0.0, 0.0);
        let p = Path::from_colors(
            SplineKind::CatmullRom,
            ColorSpace::Srgb,
            [red, red, Color::srgb(0.0, 0.0, 1.0)],
        );
        let curve = SplineCurve::fit(&p, ColorSpace::OkLab).unwrap();
        let knots = curve.knots();
        assert!(knots.windows(2).all(|w| w[1] > w[0]), "knots: {knots:?}");
        for c in curve.sample(20).unwrap() {
            assert!(c.coords().iter().all(|v| v.is_finite()), "{c:?}");
        }
    }

    #[test]
    fn linear_midpoint_in_working_space() {
        let p = Path::from_colors(
            SplineKind::Linear,
            ColorSpace::Srgb,
            [Color::srgb(0.0, 0.0, 0.0), Color::srgb(1.0, 0.5, 0.0)],
        );
        let curve = SplineCurve::fit(&p, ColorSpace::Srgb).unwrap();
        assert_color_near(curve.evaluate(0.5).unwrap(), Color::srgb(0.5, 0.25, 0.0), 1e-12);
    }

    #[test]
    fn hue_wraparound_midpoint_is_zero() {
        let p = hsl_path(SplineKind::Linear, &[350.0, 10.0]);
        let curve = SplineCurve::fit(&p, ColorSpace::Hsl).unwrap();
        let mid = curve.evaluate(0.5).unwrap();
        let h = mid.coords()[0];
        assert!(hue_distance(h, 0.0).abs() < 1e-9, "midpoint hue {h}");
    }

    #[test]
    fn every_kind_stays_on_short_arc_across_zero() {
        let cases = [
            (SplineKind::Linear, vec![340.0, 350.0, 10.0, 20.0]),
            (SplineKind::CatmullRom, vec![340.0, 350.0, 10.0, 20.0]),
            (SplineKind::BSpline, vec![340.0, 350.0, 10.0, 20.0]),
            (SplineKind::Bezier, vec![350.0, 357.0, 3.0, 10.0]),
        ];
        for (kind, hues) in cases {
            let curve = SplineCurve::fit(&hsl_path(kind, &hues), ColorSpace::Hsl).unwrap();
            for c in curve.sample(41).unwrap() {
                let h = c.coords()[0];
                assert!(
                    hue_distance(0.0, h).abs() <= 25.0,
                    "{kind:?} produced hue {h}, off the short arc"
                );
            }
        }
    }

    #[test]
    fn oklch_working_space_also_unwraps_hue() {
        let p = Path::from_colors(
            SplineKind::CatmullRom,
            ColorSpace::OkLch,
            [
                Color::oklch(0.6, 0.1, 340.0),
                Color::oklch(0.6, 0.1, 355.0),
                Color::oklch(0.6, 0.1, 15.0),
            ],
        );
        let curve = SplineCurve::fit(&p, ColorSpace::OkLch).unwrap();
        for c in curve.sample(30).unwrap() {
            let h = c.hue().unwrap();
            assert!(hue_distance(0.0, h).abs() <= 25.0, "hue {h}");
        }
    }

    #[test]
    fn catmull_rom_passes_through_every_control_point() {
        for closed in [false, true] {
            let p = Path::from_colors(SplineKind::CatmullRom, ColorSpace::Srgb, varied_colors())
                .with_closed(closed);
            let curve = SplineCurve::fit(&p, ColorSpace::OkLch).unwrap();
            for (cp, &t) in p.points().iter().zip(curve.knots()) {
                assert_color_near(curve.evaluate(t).unwrap(), cp.color(), 1e-6);
            }
        }
    }

    #[test]
    fn bezier_passes_through_anchors() {
        let mut colors = varied_colors();
        colors.extend([Color::srgb(0.3, 0.3, 0.3), Color::srgb(0.9, 0.9, 0.6)]);
        let open = Path::from_colors(SplineKind::Bezier, ColorSpace::Srgb, colors.clone());
        let curve = SplineCurve::fit(&open, ColorSpace::OkLab).unwrap();
        for i in [0, 3, 6] {
            let t = curve.knots()[i];
            assert_color_near(curve.evaluate(t).unwrap(), open.points()[i].color(), 1e-6);
        }

        let closed = Path::from_colors(SplineKind::Bezier, ColorSpace::Srgb, colors[..6].to_vec())
            .with_closed(true);
        let curve = SplineCurve::fit(&closed, ColorSpace::OkLab).unwrap();
        for i in [0, 3] {
            let t = curve.knots()[i];
            assert_color_near(curve.evaluate(t).unwrap(), closed.points()[i].color(), 1e-6);
        }
    }

    #[test]
    fn b_spline_hits_open_ends_but_approximates_interior() {
        let p = Path::from_colors(
            SplineKind::BSpline,
            ColorSpace::Srgb,
            [
                Color::srgb(0.0, 0.0, 0.0),
                Color::srgb(1.0, 1.0, 1.0),
                Color::srgb(0.0, 0.0, 0.0),
                Color::srgb(1.0, 1.0, 1.0),
            ],
        );
        let curve = SplineCurve::fit(&p, ColorSpace::Srgb).unwrap();
        assert_color_near(curve.evaluate(0.0).unwrap(), p.points()[0].color(), 1e-9);
        assert_color_near(curve.evaluate(1.0).unwrap(), p.points()[3].color(), 1e-9);
        let interior = curve.evaluate(curve.knots()[1]).unwrap();
        assert!(
            (interior.coords()[0] - 1.0).abs() > 0.1,
            "B-spline should not interpolate interior points: {interior:?}"
        );
    }

    #[test]
    fn catmull_rom_tangent_is_continuous_at_interior_points() {
        let p = Path::from_colors(
            SplineKind::CatmullRom,
            ColorSpace::Srgb,
            [
                Color::srgb(0.2, 0.3, 0.4),
                Color::srgb(0.5, 0.6, 0.3),
                Color::srgb(0.7, 0.2, 0.5),
                Color::srgb(0.3, 0.8, 0.6),
            ],
        );
        let curve = SplineCurve::fit(&p, ColorSpace::Srgb).unwrap();
        let at = |u: f64| DVec3::from_array(curve.evaluate(u).unwrap().coords());
        let h = 1e-6;
        for &k in &curve.knots()[1..3] {
            let left = (at(k) - at(k - h)).normalize();
            let right = (at(k + h) - at(k)).normalize();
            assert!(left.dot(right) > 0.999, "tangent break at {k}: {left:?} vs {right:?}");
        }
    }

    #[test]
    fn open_curve_rejects_out_of_range_parameters() {
        let p = Path::from_colors(SplineKind::Linear, ColorSpace::Srgb, varied_colors());
        let curve = SplineCurve::fit(&p, ColorSpace::Srgb).unwrap();
        assert_eq!(curve.evaluate(1.5).unwrap_err(), SplineError::OutOfRange(1.5));
        assert_eq!(curve.evaluate(-0.1).unwrap_err(), SplineError::OutOfRange(-0.1));
        assert!(matches!(curve.evaluate(f64::NAN), Err(SplineError::OutOfRange(_))));
        assert!(curve.evaluate(0.0).is_ok());
        assert!(curve.evaluate(1.0).is_ok());
    }

    #[test]
    fn closed_curve_wraps_parameters() {
        let p = Path::from_colors(SplineKind::CatmullRom, ColorSpace::Srgb, varied_colors())
            .with_closed(true);
        let curve = SplineCurve::fit(&p, ColorSpace::OkLab).unwrap();
        let base = curve.evaluate(0.25).unwrap();
        assert_color_near(curve.evaluate(1.25).unwrap(), base, 1e-9);
        assert_color_near(curve.evaluate(-0.75).unwrap(), base, 1e-9);
        assert_color_near(curve.evaluate(1.0).unwrap(), curve.evaluate(0.0).unwrap(), 1e-9);
        assert!(curve.evaluate(f64::INFINITY).is_err());
    }

    #[test]
    fn closed_curve_is_continuous_at_seam() {
        for kind in [SplineKind::Linear, SplineKind::CatmullRom, SplineKind::BSpline] {
            let p = Path::from_colors(kind, ColorSpace::Srgb, varied_colors()).with_closed(true);
            let curve = SplineCurve::fit(&p, ColorSpace::Srgb).unwrap();
            let before = curve.evaluate(1.0 - 1e-9).unwrap();
            let after = curve.evaluate(0.0).unwrap();
            assert_color_near(before, after, 1e-6);
        }
    }

    #[test]
    fn output_is_in_declared_space() {
        let p = Path::from_colors(SplineKind::CatmullRom, ColorSpace::Hsl, varied_colors());
        let curve = SplineCurve::fit(&p, ColorSpace::OkLab).unwrap();
        assert_eq!(curve.declared_space(), ColorSpace::Hsl);
        assert_eq!(curve.working_space(), ColorSpace::OkLab);
        assert!(curve
            .sample(7)
            .unwrap()
            .iter()
            .all(|c| c.space() == ColorSpace::Hsl));
    }

    #[test]
    fn sample_counts_and_endpoints() {
        let p = hsl_path(SplineKind::Linear, &[0.0, 120.0]);
        let curve = SplineCurve::fit(&p, ColorSpace::Hsl).unwrap();
        assert!(curve.sample(0).unwrap().is_empty());
        let one = curve.sample(1).unwrap();
        assert_eq!(one.len(), 1);
        assert!(one[0].coords()[0].abs() < 1e-9);
        let three = curve.sample(3).unwrap();
        let hues: Vec<f64> = three.iter().map(|c| c.coords()[0]).collect();
        assert!((hues[1] - 60.0).abs() < 1e-9 && (hues[2] - 120.0).abs() < 1e-9, "{hues:?}");
    }

    #[test]
    fn white_to_blue_stays_blue_in_oklch() {
        let p = Path::from_colors(
            SplineKind::Linear,
            ColorSpace::Srgb,
            [Color::srgb(1.0, 1.0, 1.0), Color::srgb(0.0, 0.0, 1.0)],
        );
        let curve = SplineCurve::fit(&p, ColorSpace::OkLch).unwrap();
        for u in [0.25, 0.5, 0.75] {
            let [r, g, b] = curve.evaluate(u).unwrap().coords();
            assert!(b > r && b > g, "u = {u}: ({r}, {g}, {b}) is not blue-dominant");
        }

        let lch = Path::from_colors(
            SplineKind::Linear,
            ColorSpace::OkLch,
            p.colors().map(|c| c.convert(ColorSpace::OkLch)),
        );
        let blue_hue = lch.points()[1].color().coords()[2];
        let curve = SplineCurve::fit(&lch, ColorSpace::OkLch).unwrap();
        let h = curve.evaluate(0.5).unwrap().coords()[2];
        assert!(hue_distance(h, blue_hue).abs() < 1e-9, "midpoint hue {h}");
    }

    #[test]
    fn gray_anchor_takes_its_neighbors_hue() {
        let p = Path::from_colors(
            SplineKind::Linear,
            ColorSpace::Hsl,
            [Color::hsl(0.0, 0.0, 50.0), Color::hsl(240.0, 100.0, 50.0)],
        );
        let curve = SplineCurve::fit(&p, ColorSpace::Hsl).unwrap();
        let mid = curve.evaluate(0.5).unwrap();
        let [h, s, l] = mid.coords();
        assert!(hue_distance(h, 240.0).abs() < 1e-9, "midpoint hue {h}");
        assert!((s - 50.0).abs() < 1e-9 && (l - 50.0).abs() < 1e-9, "{mid:?}");
    }

    #[test]
    fn gray_between_hues_borrows_the_nearer_one() {
        let p = Path::from_colors(
            SplineKind::Linear,
            ColorSpace::Hsl,
            [
                Color::hsl(30.0, 100.0, 50.0),
                Color::hsl(0.0, 0.0, 60.0),
                Color::hsl(200.0, 100.0, 50.0),
            ],
        );
        let curve = SplineCurve::fit(&p, ColorSpace::Hsl).unwrap();
        let first_half = curve.evaluate(curve.knots()[1] * 0.5).unwrap();
        assert!(hue_distance(first_half.coords()[0], 30.0).abs() < 1e-9, "{first_half:?}");
    }

    #[test]
    fn all_gray_path_keeps_its_hues() {
        let p = Path::from_colors(
            SplineKind::Linear,
            ColorSpace::Hsl,
            [Color::hsl(0.0, 0.0, 20.0), Color::hsl(0.0, 0.0, 80.0)],
        );
        let curve = SplineCurve::fit(&p, ColorSpace::Hsl).unwrap();
        assert_color_near(curve.evaluate(0.5).unwrap(), Color::hsl(0.0, 0.0, 50.0), 1e-9);
    }

    #[test]
    fn overshoot_is_clamped_in_bounded_declared_space() {
        let p = Path::from_colors(
            SplineKind::CatmullRom,
            ColorSpace::Hsl,
            [
                Color::hsl(0.0, 0.0, 2.0),
                Color::hsl(0.0, 100.0, 3.0),
                Color::hsl(0.0, 100.0, 97.0),
                Color::hsl(0.0, 0.0, 98.0),
            ],
        );
        let curve = SplineCurve::fit(&p, ColorSpace::Hsl).unwrap();
        for c in curve.sample(200).unwrap() {
            let [_, s, l] = c.coords();
            assert!((0.0..=100.0).contains(&s), "saturation {s} out of range");
            assert!((0.0..=100.0).contains(&l), "lightness {l} out of range");
        }
        let srgb = Path::from_colors(
            SplineKind::CatmullRom,
            ColorSpace::Srgb,
            [
                Color::srgb(0.0, 0.0, 0.0),
                Color::srgb(0.02, 0.0, 0.0),
                Color::srgb(0.98, 1.0, 1.0),
                Color::srgb(1.0, 1.0, 1.0),
            ],
        );
        let curve = SplineCurve::fit(&srgb, ColorSpace::Srgb).unwrap();
        for c in curve.sample(200).unwrap() {
            assert!(c.coords().iter().all(|v| (0.0..=1.0).contains(v)), "{c:?}");
        }
    }

    #[test]
    fn spline_curve_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SplineCurve>();
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn srgb_color() -> impl Strategy<Value = Color> {
            (0.0_f64..=1.0, 0.0_f64..=1.0, 0.0_f64..=1.0).prop_map(|(r, g, b)| Color::srgb(r, g, b))
        }

        proptest! {
            #[test]
            fn catmull_rom_interpolates_random_paths(
                colors in prop::collection::vec(srgb_color(), 2..7),
                closed in any::<bool>(),
            ) {
                let p = Path::from_colors(SplineKind::CatmullRom, ColorSpace::OkLab, colors)
                    .with_closed(closed);
                let curve = SplineCurve::fit(&p, ColorSpace::OkLab).unwrap();
                for (cp, &t) in p.points().iter().zip(curve.knots()) {
                    let got = curve.evaluate(t).unwrap();
                    for i in 0..3 {
                        prop_assert!(
                            (got.coords()[i] - cp.color().coords()[i]).abs() < 1e-6,
                            "{:?} vs {:?} at t={}", got, cp.color(), t
                        );
                    }
                }
            }

            #[test]
            fn evaluation_is_finite_everywhere(
                colors in prop::collection::vec(srgb_color(), 2..6),
                u in 0.0_f64..=1.0,
            ) {
                for kind in [SplineKind::Linear, SplineKind::CatmullRom, SplineKind::BSpline] {
                    let p = Path::from_colors(kind, ColorSpace::Srgb, colors.clone());
                    let c = SplineCurve::fit(&p, ColorSpace::OkLch).unwrap().evaluate(u).unwrap();
                    prop_assert!(c.coords().iter().all(|v| v.is_finite()), "{:?}", c);
                }
            }
        }
    }
}
