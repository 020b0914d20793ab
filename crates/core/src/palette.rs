//! A named, ordered collection of weighted paths.
//!
//! The palette owns its paths by name and remembers one fitted curve per
//! path. A cached curve belongs to the exact `(PathId, version)` it was fitted
//! from and to the palette's working space, so it is dropped whenever its
//! path is replaced or the working space changes. Sampling takes `&self` and
//! fills the cache lazily, so one palette can be sampled from several
//! threads at once.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::color::{Color, ColorSpace};
use crate::config::PaletteConfig;
use crate::curve::SplineCurve;
use crate::error::{Result, SplineError};
use crate::path::Path;
use crate::params::param_string;
use crate::sampler::{self, AllocatedCurve, PaletteSample};

const DEFAULT_NAME: &str = "Palette";
const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone)]
struct PathEntry {
    name: String,
    path: Path,
    weight: f64,
    curve: OnceLock<Result<Arc<SplineCurve>>>,
}

impl PathEntry {
    fn new(name: String, path: Path, weight: f64) -> Self {
        Self {
            name,
            path,
            weight,
            curve: OnceLock::new(),
        }
    }

    /// Returns the cached curve, fitting it on first use.
    fn curve(&self, working: ColorSpace) -> Result<Arc<SplineCurve>> {
        let mut fitted = false;
        let cached = self.curve.get_or_init(|| {
            fitted = true;
            log::debug!(
                "curve cache miss for {:?} (path {} v{})",
                self.name,
                self.path.id().get(),
                self.path.version()
            );
            SplineCurve::fit(&self.path, working).map(Arc::new)
        });
        if !fitted {
            log::trace!("curve cache hit for {:?}", self.name);
        }
        cached.clone()
    }

    fn set_path(&mut self, path: Path) -> Path {
        self.curve = OnceLock::new();
        std::mem::replace(&mut self.path, path)
    }
}

/// Weighted paths sampled together into one list of colors.
///
/// Path names are unique within a palette. Order matters: samples come out
/// grouped by path, in palette order.
#[derive(Debug, Clone)]
pub struct Palette {
    name: String,
    config: PaletteConfig,
    entries: Vec<PathEntry>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    /// An empty palette with the default config.
    pub fn new() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            config: PaletteConfig::default(),
            entries: Vec::new(),
        }
    }

    /// An empty palette with `config`.
    ///
    /// Returns `SplineError::InvalidOperation` if the config's size is 0.
    pub fn with_config(config: PaletteConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// An empty palette called `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new()
        }
    }

    /// An empty palette built from JSON params: `"name"` plus the keys
    /// [`PaletteConfig::from_params`] reads. Missing keys keep their defaults.
    pub fn from_params(params: &Value) -> Result<Self> {
        let config = PaletteConfig::from_params(params)?;
        Ok(Self {
            name: param_string(params, "name", DEFAULT_NAME),
            ..Self::with_config(config)?
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn config(&self) -> &PaletteConfig {
        &self.config
    }

    /// Replaces the config. Cached curves are dropped if the working space
    /// changes.
    pub fn set_config(&mut self, config: PaletteConfig) -> Result<()> {
        config.validate()?;
        let working_changed = config.working_space != self.config.working_space;
        self.config = config;
        if working_changed {
            self.invalidate_curves();
        }
        Ok(())
    }

    pub fn working_space(&self) -> ColorSpace {
        self.config.working_space
    }

    /// Switches the interpolation space, dropping every cached curve.
    pub fn set_working_space(&mut self, space: ColorSpace) {
        if space != self.config.working_space {
            self.config.working_space = space;
            self.invalidate_curves();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path names in palette order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// `(name, path)` pairs in palette order.
    pub fn paths(&self) -> impl Iterator<Item = (&str, &Path)> + '_ {
        self.entries.iter().map(|e| (e.name.as_str(), &e.path))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Position of the path called `name`.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| SplineError::PathNotFound(name.to_string()))
    }

    /// Appends `path` under `name` with weight 1.
    ///
    /// Returns `SplineError::DuplicatePathName` if the name is taken. The
    /// path's shape is checked when the palette is sampled.
    pub fn add_path(&mut self, name: impl Into<String>, path: Path) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(SplineError::DuplicatePathName(name));
        }
        log::debug!("adding path {name:?} ({} points, {:?})", path.len(), path.kind());
        self.entries.push(PathEntry::new(name, path, DEFAULT_WEIGHT));
        Ok(())
    }

    /// Builds a path of the configured kind, declared in the working space,
    /// from `colors` and appends it under `name`.
    pub fn add_colors(
        &mut self,
        name: impl Into<String>,
        colors: impl IntoIterator<Item = Color>,
    ) -> Result<()> {
        let path = Path::from_colors(self.config.kind, self.config.working_space, colors);
        self.add_path(name, path)
    }

    /// Removes the path called `name` and returns it.
    pub fn remove_path(&mut self, name: &str) -> Result<Path> {
        let idx = self.index_of(name)?;
        Ok(self.entries.remove(idx).path)
    }

    /// The current version of the path called `name`.
    pub fn path(&self, name: &str) -> Result<&Path> {
        Ok(&self.entry(name)?.path)
    }

    pub fn weight(&self, name: &str) -> Result<f64> {
        Ok(self.entry(name)?.weight)
    }

    /// Sets the sampling weight of `name`.
    ///
    /// Weights must be finite and non-negative; a zero weight keeps the path
    /// but gives it no samples.
    pub fn set_weight(&mut self, name: &str, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(SplineError::InvalidOperation(format!(
                "weight for {name:?} must be finite and non-negative, got {weight}"
            )));
        }
        self.entry_mut(name)?.weight = weight;
        Ok(())
    }

    /// Swaps in a new path under `name` and returns the previous one.
    pub fn replace_path(&mut self, name: &str, path: Path) -> Result<Path> {
        let entry = self.entry_mut(name)?;
        log::debug!(
            "replacing path {name:?}: v{} -> v{}",
            entry.path.version(),
            path.version()
        );
        Ok(entry.set_path(path))
    }

    /// Applies an edit to the path called `name`.
    ///
    /// `edit` receives the current version and returns the next one, usually
    /// through one of the versioned `Path` methods. On error the palette is
    /// unchanged.
    ///
    /// ```
    /// use splinker_core::{Color, ColorSpace, Palette, Path, SplineKind};
    ///
    /// let mut palette = Palette::new();
    /// let path = Path::from_colors(
    ///     SplineKind::Linear,
    ///     ColorSpace::Srgb,
    ///     [Color::srgb(0.0, 0.0, 0.0), Color::srgb(1.0, 1.0, 1.0)],
    /// );
    /// palette.add_path("grays", path).unwrap();
    /// palette
    ///     .update_path("grays", |p| p.add_control_point(Color::srgb(0.5, 0.0, 0.0), Some(1)))
    ///     .unwrap();
    /// assert_eq!(palette.path("grays").unwrap().len(), 3);
    /// ```
    pub fn update_path<F>(&mut self, name: &str, edit: F) -> Result<()>
    where
        F: FnOnce(&Path) -> Result<Path>,
    {
        let entry = self.entry_mut(name)?;
        let next = edit(&entry.path)?;
        entry.set_path(next);
        Ok(())
    }

    /// Renames a path, keeping its position, weight and cached curve.
    pub fn rename_path(&mut self, name: &str, new_name: impl Into<String>) -> Result<()> {
        let new_name = new_name.into();
        if new_name != name && self.contains(&new_name) {
            return Err(SplineError::DuplicatePathName(new_name));
        }
        self.entry_mut(name)?.name = new_name;
        Ok(())
    }

    /// Appends an independent copy of `name` called `"<name> Copy"` and
    /// returns the new name.
    pub fn duplicate_path(&mut self, name: &str) -> Result<String> {
        let source = self.entry(name)?;
        let copy_name = format!("{name} Copy");
        if self.contains(&copy_name) {
            return Err(SplineError::DuplicatePathName(copy_name));
        }
        let copy = PathEntry::new(copy_name.clone(), source.path.duplicate(), source.weight);
        self.entries.push(copy);
        Ok(copy_name)
    }

    /// Moves a path to `index`; an index past the end moves it last.
    pub fn move_path_to(&mut self, name: &str, index: usize) -> Result<()> {
        let idx = self.index_of(name)?;
        let entry = self.entries.remove(idx);
        let target = index.min(self.entries.len());
        self.entries.insert(target, entry);
        Ok(())
    }

    /// The fitted curve for `name` in the current working space.
    pub fn curve(&self, name: &str) -> Result<Arc<SplineCurve>> {
        self.entry(name)?.curve(self.config.working_space)
    }

    /// Samples `n` colors across all paths, returned in `output`.
    ///
    /// Each path gets a share of `n` proportional to its weight and is
    /// evaluated at evenly spaced parameters. Fails with
    /// `SplineError::EmptyPalette` when there are no paths and
    /// `SplineError::InvalidOperation` when `n` is 0. A path whose shape
    /// does not fit its kind fails the whole call if it is allocated any
    /// samples; paths allocated none are not fitted.
    pub fn sample(&self, n: usize, output: ColorSpace) -> Result<PaletteSample> {
        if self.entries.is_empty() {
            return Err(SplineError::EmptyPalette);
        }
        if n == 0 {
            return Err(SplineError::InvalidOperation(
                "sample count must be at least 1".to_string(),
            ));
        }
        let weights: Vec<f64> = self.entries.iter().map(|e| e.weight).collect();
        let counts = sampler::allocate(&weights, n)?;
        log::debug!(
            "sampling {n} colors across {} paths: {counts:?}",
            self.entries.len()
        );

        // Paths that receive no samples are never fitted, so a zero-weight
        // draft with an invalid shape does not block the rest.
        let working = self.config.working_space;
        let curves = self
            .entries
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(e, count)| e.curve(working).map(|curve| (e, curve, count)))
            .collect::<Result<Vec<_>>>()?;
        let allocated: Vec<AllocatedCurve<'_>> = curves
            .iter()
            .map(|(e, curve, count)| AllocatedCurve {
                name: &e.name,
                curve: curve.as_ref(),
                count: *count,
            })
            .collect();
        sampler::sample_allocated(&allocated, output)
    }

    /// Like [`Palette::sample`], with the output space given as a tag such as
    /// `"hsl"` or `"oklch"`.
    pub fn sample_named(&self, n: usize, output: &str) -> Result<PaletteSample> {
        self.sample(n, output.parse()?)
    }

    /// Samples the configured number of colors in the configured output space.
    pub fn sample_default(&self) -> Result<PaletteSample> {
        self.sample(self.config.size, self.config.output_space)
    }

    fn entry(&self, name: &str) -> Result<&PathEntry> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| SplineError::PathNotFound(name.to_string()))
    }

    fn entry_mut(&mut self, name: &str) -> Result<&mut PathEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| SplineError::PathNotFound(name.to_string()))
    }

    fn invalidate_curves(&mut self) {
        log::debug!("dropping {} cached curves", self.entries.len());
        for entry in &mut self.entries {
            entry.curve = OnceLock::new();
        }
    }
}

#[derive(Serialize, Deserialize)]
struct EntryRecord {
    name: String,
    #[serde(default = "default_weight")]
    weight: f64,
    path: Path,
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

#[derive(Serialize, Deserialize)]
struct PaletteRecord {
    #[serde(default = "default_name")]
    name: String,
    #[serde(default)]
    config: PaletteConfig,
    #[serde(default)]
    paths: Vec<EntryRecord>,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

impl Serialize for Palette {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        PaletteRecord {
            name: self.name.clone(),
            config: self.config,
            paths: self
                .entries
                .iter()
                .map(|e| EntryRecord {
                    name: e.name.clone(),
                    weight: e.weight,
                    path: e.path.clone(),
                })
                .collect(),
        }
        .serialize(serializer)
    }
}

/// Rebuilds the palette through its public API, so duplicate names, bad
/// weights and a zero size are rejected as they would be at runtime.
impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = PaletteRecord::deserialize(deserializer)?;
        let mut palette = Palette::with_config(record.config).map_err(serde::de::Error::custom)?;
        palette.name = record.name;
        for entry in record.paths {
            palette
                .add_path(entry.name.clone(), entry.path)
                .and_then(|()| palette.set_weight(&entry.name, entry.weight))
                .map_err(serde::de::Error::custom)?;
        }
        Ok(palette)
    }
}
