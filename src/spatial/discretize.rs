//! Discretization of input geometry into deduplicated slot centres
//!
//! Each shape is normalized into the unit grid frame, sampled, and every
//! sample is snapped to a [`GridCoordinate`]. Per-shape work is an
//! independent map; only the merge into the insertion-ordered cell set is
//! sequential. Unique cells are finally mapped back to world space.

use crate::io::configuration::{MODE_BOTH, MODE_SURFACE, MODE_VOLUME};
use crate::io::error::{Result, SlotwiseError, invalid_parameter};
use crate::spatial::coordinate::GridCoordinate;
use crate::spatial::plane::{GridFrame, Plane};
use crate::spatial::sampler::{LatticeSampler, SampleLimitExceeded, Sampler};
use crate::spatial::shape::Shape;
use crate::spatial::vector::{Point3, Vector3, describe, is_strictly_positive};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which parts of a shape are sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SamplingMode {
    /// Boundary only
    Surface,
    /// Interior only
    Volume,
    /// Boundary and interior
    Both,
}

impl SamplingMode {
    /// Parse a wire code: 0 surface, 1 volume, 2 both
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for any other code
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            MODE_SURFACE => Ok(Self::Surface),
            MODE_VOLUME => Ok(Self::Volume),
            MODE_BOTH => Ok(Self::Both),
            _ => Err(invalid_parameter(
                "mode",
                &code,
                &"expected 0 (surface), 1 (volume) or 2 (both)",
            )),
        }
    }

    /// Wire code of the mode
    pub const fn code(self) -> u8 {
        match self {
            Self::Surface => MODE_SURFACE,
            Self::Volume => MODE_VOLUME,
            Self::Both => MODE_BOTH,
        }
    }

    /// Check whether the boundary is sampled
    pub const fn includes_surface(self) -> bool {
        matches!(self, Self::Surface | Self::Both)
    }

    /// Check whether the interior is sampled
    pub const fn includes_volume(self) -> bool {
        matches!(self, Self::Volume | Self::Both)
    }
}

impl TryFrom<u8> for SamplingMode {
    type Error = SlotwiseError;

    fn try_from(code: u8) -> Result<Self> {
        Self::from_code(code)
    }
}

impl From<SamplingMode> for u8 {
    fn from(mode: SamplingMode) -> Self {
        mode.code()
    }
}

/// Grid parameters of one discretization pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Orientation and origin of the grid
    pub plane: Plane,
    /// Slot size along each base-plane axis
    pub slot_diagonal: Vector3<f64>,
    /// Which parts of each shape are sampled
    pub mode: SamplingMode,
    /// Sampling step in unit-cell units
    pub precision: f64,
}

impl GridSettings {
    /// Check the settings before any work is done
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a non-positive slot diagonal or
    /// precision
    pub fn validate(&self) -> Result<()> {
        if !is_strictly_positive(&self.slot_diagonal) {
            return Err(invalid_parameter(
                "slot diagonal",
                &describe(&self.slot_diagonal),
                &"every component must be finite and greater than zero",
            ));
        }
        if !(self.precision.is_finite() && self.precision > 0.0) {
            return Err(invalid_parameter(
                "precision",
                &self.precision,
                &"must be finite and greater than zero",
            ));
        }
        Ok(())
    }
}

/// Non-fatal outcome recorded for a single shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The shape could not be normalized and was skipped
    DegenerateGeometry {
        /// Why normalization failed
        reason: String,
    },
    /// Sampling produced no points
    EmptySamplingResult,
    /// The shape needs more samples than the sampler allows and was skipped
    SampleLimitExceeded {
        /// Per-shape sample limit of the sampler
        limit: usize,
    },
}

/// Diagnostic attached to the index of the input shape it concerns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeDiagnostic {
    /// Index of the shape in the input list
    pub shape_index: usize,
    /// What happened
    pub kind: DiagnosticKind,
}

/// Result of a discretization pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Discretization {
    /// World-space slot centres in first-seen order
    pub centers: Vec<Point3<f64>>,
    /// Integer cells matching `centers` one to one
    pub coordinates: Vec<GridCoordinate>,
    /// Per-shape non-fatal outcomes
    pub diagnostics: Vec<ShapeDiagnostic>,
}

/// Insertion-ordered set of occupied cells
#[derive(Debug, Clone, Default)]
pub struct CellSet {
    seen: HashSet<GridCoordinate>,
    ordered: Vec<GridCoordinate>,
}

impl CellSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell, returning whether it was new
    pub fn insert(&mut self, cell: GridCoordinate) -> bool {
        let inserted = self.seen.insert(cell);
        if inserted {
            self.ordered.push(cell);
        }
        inserted
    }

    /// Number of distinct cells
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Check whether no cell has been added
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Cells in first-seen order
    pub fn into_vec(self) -> Vec<GridCoordinate> {
        self.ordered
    }
}

impl Extend<GridCoordinate> for CellSet {
    fn extend<I: IntoIterator<Item = GridCoordinate>>(&mut self, cells: I) {
        for cell in cells {
            self.insert(cell);
        }
    }
}

/// Discretization engine over a pluggable sampler
#[derive(Debug, Clone, Default)]
pub struct Discretizer<S = LatticeSampler> {
    sampler: S,
}

impl Discretizer {
    /// Create an engine using the built-in lattice sampler
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Sampler> Discretizer<S> {
    /// Create an engine using a custom sampler
    pub const fn with_sampler(sampler: S) -> Self {
        Self { sampler }
    }

    /// Discretize shapes into slot centres
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the settings fail validation; no shape
    /// is processed in that case
    pub fn discretize(
        &self,
        shapes: &[Shape],
        settings: &GridSettings,
    ) -> Result<Discretization> {
        self.discretize_with_progress(shapes, settings, |_| {})
    }

    /// Discretize shapes, reporting each processed shape index
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the settings fail validation
    pub fn discretize_with_progress<F>(
        &self,
        shapes: &[Shape],
        settings: &GridSettings,
        mut on_shape: F,
    ) -> Result<Discretization>
    where
        F: FnMut(usize),
    {
        settings.validate()?;
        let frame = GridFrame::new(&settings.plane, settings.slot_diagonal)?;

        let mut cells = CellSet::new();
        let mut diagnostics = Vec::new();

        for (shape_index, shape) in shapes.iter().enumerate() {
            match self.shape_cells(shape, &frame, settings) {
                Ok(shape_cells) if shape_cells.is_empty() => {
                    tracing::debug!(
                        shape_index,
                        kind = shape.kind(),
                        "shape produced no samples"
                    );
                    diagnostics.push(ShapeDiagnostic {
                        shape_index,
                        kind: DiagnosticKind::EmptySamplingResult,
                    });
                }
                Ok(shape_cells) => cells.extend(shape_cells),
                Err(skipped) => {
                    tracing::warn!(
                        shape_index,
                        kind = shape.kind(),
                        reason = ?skipped,
                        "skipping shape"
                    );
                    diagnostics.push(ShapeDiagnostic {
                        shape_index,
                        kind: skipped,
                    });
                }
            }
            on_shape(shape_index);
        }

        let coordinates = cells.into_vec();
        let centers = coordinates
            .iter()
            .map(|cell| frame.to_world(&cell.to_point()))
            .collect();

        tracing::debug!(
            shapes = shapes.len(),
            cells = coordinates.len(),
            "discretization finished"
        );

        Ok(Discretization {
            centers,
            coordinates,
            diagnostics,
        })
    }

    /// Normalize, sample and snap a single shape
    fn shape_cells(
        &self,
        shape: &Shape,
        frame: &GridFrame,
        settings: &GridSettings,
    ) -> std::result::Result<Vec<GridCoordinate>, DiagnosticKind> {
        let normalized = shape
            .transformed(|point| frame.to_grid(point))
            .map_err(|reason| DiagnosticKind::DegenerateGeometry { reason })?;
        let too_many = |exceeded: SampleLimitExceeded| DiagnosticKind::SampleLimitExceeded {
            limit: exceeded.limit,
        };

        let mut samples = Vec::new();
        if settings.mode.includes_surface() {
            samples.extend(
                self.sampler
                    .sample_surface(&normalized, settings.precision)
                    .map_err(too_many)?,
            );
        }
        if settings.mode.includes_volume() {
            samples.extend(
                self.sampler
                    .sample_volume(&normalized, settings.precision)
                    .map_err(too_many)?,
            );
        }

        Ok(samples
            .iter()
            .filter_map(GridCoordinate::from_point)
            .collect())
    }
}

/// Discretize shapes with the built-in lattice sampler
///
/// # Errors
///
/// Returns `InvalidParameter` if the settings fail validation
pub fn discretize(shapes: &[Shape], settings: &GridSettings) -> Result<Discretization> {
    Discretizer::new().discretize(shapes, settings)
}
