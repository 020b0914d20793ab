//! Control points and versioned paths.
//!
//! A [`Path`] is an ordered list of [`ControlPoint`]s plus the metadata a
//! curve needs: spline kind, closed flag and the color space every control
//! point is stored in. Paths are values: each edit returns a new version that
//! shares the path's identity, and the old version stays valid. Curves fitted
//! against an old version are therefore never invalidated behind their back.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use glam::DVec3;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::color::{Color, ColorSpace};
use crate::curve::SplineCurve;
use crate::error::{Result, SplineError};

/// Number of curve samples taken when refitting a path to another kind.
const REFIT_SAMPLES: usize = 100;

/// Control points kept after refitting to a non-Bezier kind.
const REFIT_POINTS: usize = 8;

static NEXT_PATH_ID: AtomicU64 = AtomicU64::new(1);

/// Identity shared by every version of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathId(u64);

impl PathId {
    fn next() -> Self {
        PathId(NEXT_PATH_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Curve family used to interpolate a path's control points.
///
/// `Linear`, `CatmullRom` and `Bezier` (at anchors) pass through their control
/// points. `BSpline` is an approximating curve: it is smoother, but only the
/// end points of an open path are hit exactly.
///
/// `CatmullRom` is centripetal. Its tangent direction is continuous at
/// interior control points, but its speed in the chord-length parameter may
/// jump there (G¹ rather than C¹).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplineKind {
    Linear,
    #[default]
    CatmullRom,
    Bezier,
    BSpline,
}

/// An anchor color at position `t` along its path.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint {
    color: Color,
    t: f64,
    label: Option<String>,
}

impl ControlPoint {
    pub fn color(&self) -> Color {
        self.color
    }

    /// Index position along the path (`0..n-1`).
    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// An ordered, versioned set of control points.
#[derive(Debug, Clone)]
pub struct Path {
    id: PathId,
    version: u64,
    kind: SplineKind,
    closed: bool,
    space: ColorSpace,
    points: Arc<[ControlPoint]>,
}

impl Path {
    /// Creates an empty open path storing its control points in `space`.
    pub fn new(kind: SplineKind, space: ColorSpace) -> Self {
        Self {
            id: PathId::next(),
            version: 0,
            kind,
            closed: false,
            space,
            points: Arc::from(Vec::new()),
        }
    }

    /// Creates an open path from colors, converting each into `space`.
    pub fn from_colors(
        kind: SplineKind,
        space: ColorSpace,
        colors: impl IntoIterator<Item = Color>,
    ) -> Self {
        let points = colors
            .into_iter()
            .map(|c| (c, None))
            .collect::<Vec<_>>();
        let mut path = Self::new(kind, space);
        path.points = build_points(space, points);
        path
    }

    pub fn id(&self) -> PathId {
        self.id
    }

    /// Edit counter; every returned edit increments it by one.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn kind(&self) -> SplineKind {
        self.kind
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Color space all control points are stored in.
    pub fn space(&self) -> ColorSpace {
        self.space
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.points.iter().map(|p| p.color)
    }

    /// Inserts `color` at `at_index`, or appends it when `None`.
    ///
    /// Returns `SplineError::InvalidOperation` if `at_index > len()`.
    pub fn add_control_point(&self, color: Color, at_index: Option<usize>) -> Result<Path> {
        self.insert(color, None, at_index)
    }

    /// Like [`Path::add_control_point`], attaching a user label.
    pub fn add_labeled_control_point(
        &self,
        color: Color,
        label: impl Into<String>,
        at_index: Option<usize>,
    ) -> Result<Path> {
        self.insert(color, Some(label.into()), at_index)
    }

    /// Inserts `color` on the edge of a closed path it lies closest to.
    ///
    /// Distances are measured in `working`'s Cartesian embedding, from the
    /// color to its projection onto each edge, the wrap edge included. The
    /// color goes in right after the start of the winning edge; ties go to
    /// the later edge. Open paths and paths with fewer than two points
    /// append instead.
    pub fn insert_nearest(&self, color: Color, working: ColorSpace) -> Result<Path> {
        let n = self.points.len();
        if !self.closed || n < 2 {
            return self.insert(color, None, None);
        }
        let embed = |c: Color| DVec3::from_array(working.embed(c.convert(working).coords()));
        let pts: Vec<DVec3> = self.colors().map(embed).collect();
        let q = embed(color);
        let mut best = (0, f64::INFINITY);
        for i in 0..n {
            let d2 = segment_distance_squared(q, pts[i], pts[(i + 1) % n]);
            if d2 <= best.1 {
                best = (i, d2);
            }
        }
        self.insert(color, None, Some(best.0 + 1))
    }

    /// Removes the control point at `index`.
    ///
    /// A path never drops below two control points through removal.
    pub fn remove_control_point(&self, index: usize) -> Result<Path> {
        self.check_index(index)?;
        if self.points.len() <= 2 {
            return Err(SplineError::InvalidOperation(format!(
                "cannot remove a control point from a path with {} points; at least 2 are required",
                self.points.len()
            )));
        }
        let mut entries = self.entries();
        entries.remove(index);
        Ok(self.next_version(entries))
    }

    /// Moves the control point at `from` to position `to`.
    ///
    /// If `to >= len()`, the point moves to the end.
    pub fn move_control_point(&self, from: usize, to: usize) -> Result<Path> {
        self.check_index(from)?;
        let mut entries = self.entries();
        let entry = entries.remove(from);
        let target = to.min(entries.len());
        entries.insert(target, entry);
        Ok(self.next_version(entries))
    }

    /// Replaces the color of the control point at `index`, keeping its label.
    pub fn recolor(&self, index: usize, color: Color) -> Result<Path> {
        self.check_index(index)?;
        let mut entries = self.entries();
        entries[index].0 = color;
        Ok(self.next_version(entries))
    }

    /// Sets or clears the label of the control point at `index`.
    pub fn relabel(&self, index: usize, label: Option<String>) -> Result<Path> {
        self.check_index(index)?;
        let mut entries = self.entries();
        entries[index].1 = label;
        Ok(self.next_version(entries))
    }

    /// Returns a new version with a different spline kind and the same points.
    pub fn with_kind(&self, kind: SplineKind) -> Path {
        let mut next = self.next_version(self.entries());
        next.kind = kind;
        next
    }

    /// Returns a new version with the closed flag set to `closed`.
    pub fn with_closed(&self, closed: bool) -> Path {
        let mut next = self.next_version(self.entries());
        next.closed = closed;
        next
    }

    /// An independent copy: same points, fresh id, version 0.
    pub fn duplicate(&self) -> Path {
        Path {
            id: PathId::next(),
            version: 0,
            ..self.clone()
        }
    }

    /// Checks that the path can be turned into a curve.
    ///
    /// Every kind needs at least two control points. Cubic Bezier paths are
    /// chains of `anchor, handle, handle, anchor` groups sharing anchors, so an
    /// open one needs `(n - 1) % 3 == 0` points and a closed one, whose last
    /// group ends on the first anchor, needs `n % 3 == 0`.
    pub fn validate(&self) -> Result<()> {
        let n = self.points.len();
        let shape_error = |reason: &str| SplineError::InvalidPathShape {
            kind: self.kind,
            count: n,
            reason: reason.to_string(),
        };
        if n < 2 {
            return Err(shape_error("at least 2 control points are required"));
        }
        if self.kind == SplineKind::Bezier {
            if self.closed && n % 3 != 0 {
                return Err(shape_error("a closed cubic Bezier path needs n % 3 == 0"));
            }
            if !self.closed && (n - 1) % 3 != 0 {
                return Err(shape_error("an open cubic Bezier path needs (n - 1) % 3 == 0"));
            }
        }
        Ok(())
    }

    /// Refits the path to another spline kind.
    ///
    /// The current curve is sampled densely in `working`, then control points
    /// for `kind` are picked from the samples by uniform downsampling (eight
    /// points, or the nearest count a Bezier path of this closure accepts).
    /// Labels do not survive the refit.
    pub fn convert_kind(&self, kind: SplineKind, working: ColorSpace) -> Result<Path> {
        let curve = SplineCurve::fit(self, working)?;
        let dense = curve.sample(REFIT_SAMPLES)?;
        let target = match (kind, self.closed) {
            (SplineKind::Bezier, false) => 7,
            (SplineKind::Bezier, true) => 6,
            _ => REFIT_POINTS,
        };
        let picked = downsample(&dense, target, self.closed)
            .into_iter()
            .map(|c| (c, None))
            .collect();
        let mut next = self.next_version(picked);
        next.kind = kind;
        Ok(next)
    }

    fn insert(&self, color: Color, label: Option<String>, at_index: Option<usize>) -> Result<Path> {
        let n = self.points.len();
        let index = at_index.unwrap_or(n);
        if index > n {
            return Err(SplineError::InvalidOperation(format!(
                "insert index {index} is past the end of a path with {n} points"
            )));
        }
        let mut entries = self.entries();
        entries.insert(index, (color, label));
        Ok(self.next_version(entries))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.points.len() {
            return Err(SplineError::InvalidOperation(format!(
                "control point index {index} out of bounds for a path with {} points",
                self.points.len()
            )));
        }
        Ok(())
    }

    fn entries(&self) -> Vec<(Color, Option<String>)> {
        self.points
            .iter()
            .map(|p| (p.color, p.label.clone()))
            .collect()
    }

    fn next_version(&self, entries: Vec<(Color, Option<String>)>) -> Path {
        Path {
            id: self.id,
            version: self.version + 1,
            kind: self.kind,
            closed: self.closed,
            space: self.space,
            points: build_points(self.space, entries),
        }
    }
}

/// Squared distance from `q` to the segment `a..b`.
fn segment_distance_squared(q: DVec3, a: DVec3, b: DVec3) -> f64 {
    let ab = b - a;
    let len2 = ab.length_squared();
    let t = if len2 > 0.0 {
        ((q - a).dot(ab) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    q.distance_squared(a + ab * t)
}

/// Converts colors into `space` and assigns `t = 0..n-1`.
fn build_points(space: ColorSpace, entries: Vec<(Color, Option<String>)>) -> Arc<[ControlPoint]> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, (color, label))| ControlPoint {
            color: color.convert(space),
            t: i as f64,
            label,
        })
        .collect()
}

/// Picks `k` evenly spread items. Open sequences keep both ends; closed ones
/// are treated as a loop and never pick the same spot twice.
fn downsample(items: &[Color], k: usize, closed: bool) -> Vec<Color> {
    let n = items.len();
    if n <= k {
        return items.to_vec();
    }
    (0..k)
        .map(|i| {
            let j = if closed {
                i * n / k
            } else {
                ((i * (n - 1)) as f64 / (k - 1) as f64).round() as usize
            };
            items[j]
        })
        .collect()
}

#[derive(Serialize, Deserialize)]
struct PointRecord {
    color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct PathRecord {
    #[serde(default)]
    kind: SplineKind,
    #[serde(default)]
    closed: bool,
    space: ColorSpace,
    points: Vec<PointRecord>,
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        PathRecord {
            kind: self.kind,
            closed: self.closed,
            space: self.space,
            points: self
                .points
                .iter()
                .map(|p| PointRecord {
                    color: p.color,
                    label: p.label.clone(),
                })
                .collect(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Path {
    /// A deserialized path gets a fresh identity at version 0.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = PathRecord::deserialize(deserializer)?;
        let mut path = Path::new(record.kind, record.space);
        path.closed = record.closed;
        path.points = build_points(
            record.space,
            record
                .points
                .into_iter()
                .map(|p| (p.color, p.label))
                .collect(),
        );
        Ok(path)
    }
}
