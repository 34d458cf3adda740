//! Surface and volume point sampling of normalized shapes
//!
//! The discretization engine only depends on the [`Sampler`] trait. The
//! built-in [`LatticeSampler`] places samples on regular lattices:
//! boundary-inclusive grids for surfaces and cell-centred grids for volumes,
//! so a solid never leaks samples onto its own boundary. Mesh interiors are
//! found with parry ray casts. [`VoxelSampler`] hands closed shapes to
//! parry's voxelizer instead.
//!
//! Lattice spacing never exceeds the requested step. A shape that would need
//! more points than the sampler's limit fails with [`SampleLimitExceeded`]
//! instead of being sampled more coarsely.

use crate::io::configuration::MAX_SAMPLES_PER_SHAPE;
use crate::spatial::shape::Shape;
use crate::spatial::vector::{Point3, Vector3};
use num_traits::ToPrimitive;
use parry3d_f64::query::{Ray, RayCast};
use parry3d_f64::shape::Triangle;
use parry3d_f64::transformation::voxelization::{FillMode, VoxelSet};
use std::fmt;

/// A shape needs more sample points than the sampler allows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleLimitExceeded {
    /// Per-shape sample limit that was hit
    pub limit: usize,
}

impl fmt::Display for SampleLimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape needs more than {} samples", self.limit)
    }
}

impl std::error::Error for SampleLimitExceeded {}

/// Sample points of one shape, or the limit that stopped sampling
pub type Samples = Result<Vec<Point3<f64>>, SampleLimitExceeded>;

/// Geometry kernel producing candidate points for a shape
pub trait Sampler {
    /// Points covering the boundary of a shape at the given step
    ///
    /// # Errors
    ///
    /// Returns `SampleLimitExceeded` if the shape is too large for the step
    fn sample_surface(&self, shape: &Shape, step: f64) -> Samples;

    /// Points covering the interior of a shape at the given step
    ///
    /// Shapes without an interior yield no points.
    ///
    /// # Errors
    ///
    /// Returns `SampleLimitExceeded` if the shape is too large for the step
    fn sample_volume(&self, shape: &Shape, step: f64) -> Samples;
}

/// Running sample allowance for one shape
#[derive(Debug, Clone, Copy)]
struct Budget {
    limit: usize,
    used: usize,
}

impl Budget {
    const fn new(limit: usize) -> Self {
        Self { limit, used: 0 }
    }

    const fn exceeded(&self) -> SampleLimitExceeded {
        SampleLimitExceeded { limit: self.limit }
    }

    /// Number of equal parts needed so no part is longer than `step`
    fn divisions(&self, length: f64, step: f64) -> Result<usize, SampleLimitExceeded> {
        (length / step)
            .ceil()
            .to_usize()
            .filter(|&count| count <= self.limit)
            .map(|count| count.max(1))
            .ok_or(self.exceeded())
    }

    /// Account for `count` more points; `None` means the count overflowed
    fn reserve(&mut self, count: Option<usize>) -> Result<(), SampleLimitExceeded> {
        let exceeded = self.exceeded();
        self.used = count
            .and_then(|count| self.used.checked_add(count))
            .filter(|&used| used <= self.limit)
            .ok_or(exceeded)?;
        Ok(())
    }
}

fn product(counts: &[usize]) -> Option<usize> {
    counts
        .iter()
        .try_fold(1_usize, |total, &count| total.checked_mul(count))
}

fn is_valid_step(step: f64) -> bool {
    step.is_finite() && step > 0.0
}

fn fraction(index: usize, count: usize) -> f64 {
    index as f64 / count as f64
}

fn centred(index: usize, count: usize) -> f64 {
    (index as f64 + 0.5) / count as f64
}

/// Regular-lattice sampler for the built-in shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatticeSampler {
    limit: usize,
}

impl LatticeSampler {
    /// Sampler with the default per-shape limit
    pub const fn new() -> Self {
        Self::with_limit(MAX_SAMPLES_PER_SHAPE)
    }

    /// Sampler allowing at most `limit` points per shape
    pub const fn with_limit(limit: usize) -> Self {
        Self { limit }
    }

    /// Maximum number of points generated for one shape
    pub const fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for LatticeSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for LatticeSampler {
    fn sample_surface(&self, shape: &Shape, step: f64) -> Samples {
        if !is_valid_step(step) {
            return Ok(Vec::new());
        }
        let mut budget = Budget::new(self.limit);

        match shape {
            Shape::Point(point) => {
                budget.reserve(Some(1))?;
                Ok(vec![*point])
            }
            Shape::Polyline(vertices) => polyline_points(vertices, step, &mut budget),
            Shape::Cuboid { corner, edges } => cuboid_surface(*corner, *edges, step, &mut budget),
            Shape::Mesh { vertices, faces } => {
                let mut points = Vec::new();
                for triangle in mesh_triangles(vertices, faces) {
                    points.extend(triangle_grid(&triangle, step, &mut budget)?);
                }
                Ok(points)
            }
        }
    }

    fn sample_volume(&self, shape: &Shape, step: f64) -> Samples {
        if !is_valid_step(step) {
            return Ok(Vec::new());
        }
        let mut budget = Budget::new(self.limit);

        match shape {
            Shape::Point(_) | Shape::Polyline(_) => Ok(Vec::new()),
            Shape::Cuboid { corner, edges } => cuboid_volume(*corner, *edges, step, &mut budget),
            Shape::Mesh { vertices, faces } => mesh_volume(vertices, faces, step, &mut budget),
        }
    }
}

fn polyline_points(vertices: &[Point3<f64>], step: f64, budget: &mut Budget) -> Samples {
    let mut points: Vec<Point3<f64>> = vertices.first().copied().into_iter().collect();
    budget.reserve(Some(points.len()))?;

    for segment in vertices.windows(2) {
        let &[start, end] = segment else {
            continue;
        };
        let span = end - start;
        let count = budget.divisions(span.norm(), step)?;
        budget.reserve(Some(count))?;
        points.extend((1..=count).map(|index| start + span * fraction(index, count)));
    }

    Ok(points)
}

fn face_grid(
    origin: Point3<f64>,
    a: Vector3<f64>,
    b: Vector3<f64>,
    step: f64,
    budget: &mut Budget,
) -> Samples {
    let count_a = budget.divisions(a.norm(), step)?;
    let count_b = budget.divisions(b.norm(), step)?;
    budget.reserve(product(&[count_a + 1, count_b + 1]))?;

    Ok((0..=count_a)
        .flat_map(move |i| {
            (0..=count_b)
                .map(move |j| origin + a * fraction(i, count_a) + b * fraction(j, count_b))
        })
        .collect())
}

fn cuboid_surface(
    corner: Point3<f64>,
    edges: [Vector3<f64>; 3],
    step: f64,
    budget: &mut Budget,
) -> Samples {
    let [u, v, w] = edges;
    let faces = [
        (corner, u, v),
        (corner + w, u, v),
        (corner, u, w),
        (corner + v, u, w),
        (corner, v, w),
        (corner + u, v, w),
    ];

    let mut points = Vec::new();
    for (origin, a, b) in faces {
        points.extend(face_grid(origin, a, b, step, budget)?);
    }
    Ok(points)
}

fn is_flat(edges: &[Vector3<f64>; 3]) -> bool {
    let [u, v, w] = edges;
    u.cross(v).dot(w).abs() <= f64::EPSILON
}

fn cuboid_volume(
    corner: Point3<f64>,
    edges: [Vector3<f64>; 3],
    step: f64,
    budget: &mut Budget,
) -> Samples {
    // Flat or collinear edges enclose nothing
    if is_flat(&edges) {
        return Ok(Vec::new());
    }

    let [u, v, w] = edges;
    let count_u = budget.divisions(u.norm(), step)?;
    let count_v = budget.divisions(v.norm(), step)?;
    let count_w = budget.divisions(w.norm(), step)?;
    budget.reserve(product(&[count_u, count_v, count_w]))?;

    let mut points = Vec::with_capacity(count_u * count_v * count_w);
    for i in 0..count_u {
        for j in 0..count_v {
            for k in 0..count_w {
                points.push(
                    corner
                        + u * centred(i, count_u)
                        + v * centred(j, count_v)
                        + w * centred(k, count_w),
                );
            }
        }
    }
    Ok(points)
}

/// Triangles of a mesh, dropping faces that reference missing vertices
pub fn mesh_triangles(vertices: &[Point3<f64>], faces: &[[usize; 3]]) -> Vec<Triangle> {
    faces
        .iter()
        .filter_map(|&[a, b, c]| {
            Some(Triangle::new(
                *vertices.get(a)?,
                *vertices.get(b)?,
                *vertices.get(c)?,
            ))
        })
        .collect()
}

fn triangle_grid(triangle: &Triangle, step: f64, budget: &mut Budget) -> Samples {
    let ab = triangle.b - triangle.a;
    let ac = triangle.c - triangle.a;
    let longest = ab.norm().max(ac.norm()).max((triangle.c - triangle.b).norm());
    let count = budget.divisions(longest, step)?;
    budget.reserve((count + 1).checked_mul(count + 2).map(|points| points / 2))?;

    let origin = triangle.a;
    Ok((0..=count)
        .flat_map(move |i| {
            (0..=count - i)
                .map(move |j| origin + ab * fraction(i, count) + ac * fraction(j, count))
        })
        .collect())
}

fn bounds(points: &[Point3<f64>]) -> Option<(Point3<f64>, Point3<f64>)> {
    let first = points.first()?;
    Some(
        points
            .iter()
            .fold((*first, *first), |(low, high), point| {
                (low.inf(point), high.sup(point))
            }),
    )
}

fn mesh_volume(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
    step: f64,
    budget: &mut Budget,
) -> Samples {
    let Some((min, max)) = bounds(vertices) else {
        return Ok(Vec::new());
    };
    let extent = max - min;
    if extent.iter().any(|&length| length <= f64::EPSILON) {
        return Ok(Vec::new());
    }

    let count_x = budget.divisions(extent.x, step)?;
    let count_y = budget.divisions(extent.y, step)?;
    let count_z = budget.divisions(extent.z, step)?;
    // Candidates are counted, whether or not they land inside
    budget.reserve(product(&[count_x, count_y, count_z]))?;

    let mesh = mesh_triangles(vertices, faces);
    let mut points = Vec::new();
    for i in 0..count_x {
        for j in 0..count_y {
            for k in 0..count_z {
                let point = min
                    + Vector3::new(
                        extent.x * centred(i, count_x),
                        extent.y * centred(j, count_y),
                        extent.z * centred(k, count_z),
                    );
                if is_inside(&point, &mesh) {
                    points.push(point);
                }
            }
        }
    }
    Ok(points)
}

// Skewed off the axes so rays rarely graze shared edges of axis-aligned meshes
fn ray_direction() -> Vector3<f64> {
    Vector3::new(1.0, 0.000_173_205, 0.000_141_421)
}

/// Ray-parity inside test against a closed triangle mesh
pub fn is_inside(point: &Point3<f64>, mesh: &[Triangle]) -> bool {
    let ray = Ray::new(*point, ray_direction());
    let crossings = mesh
        .iter()
        .filter(|triangle| triangle.intersects_local_ray(&ray, f64::MAX))
        .count();
    crossings % 2 == 1
}

/// Vertex order of the twelve triangles bounding a parallelepiped
///
/// Corner `i` is offset by edge `u` when bit 0 is set, `v` for bit 1 and
/// `w` for bit 2.
const CUBOID_FACES: [[u32; 3]; 12] = [
    [0, 1, 3],
    [0, 3, 2],
    [4, 5, 7],
    [4, 7, 6],
    [0, 1, 5],
    [0, 5, 4],
    [2, 3, 7],
    [2, 7, 6],
    [0, 2, 6],
    [0, 6, 4],
    [1, 3, 7],
    [1, 7, 5],
];

/// Closed triangle surface in the index format parry voxelizes
struct SolidSurface {
    points: Vec<Point3<f64>>,
    indices: Vec<[u32; 3]>,
    extent: Vector3<f64>,
}

impl SolidSurface {
    /// Surface of a shape that encloses a volume, `None` for anything else
    fn of(shape: &Shape) -> Option<Self> {
        let (points, indices) = match shape {
            Shape::Point(_) | Shape::Polyline(_) => return None,
            Shape::Cuboid { corner, edges } => {
                if is_flat(edges) {
                    return None;
                }
                let [u, v, w] = *edges;
                let points = (0..8_u8)
                    .map(|bits| {
                        let along = |bit: u8, edge: Vector3<f64>| {
                            if bits & bit == 0 {
                                Vector3::zeros()
                            } else {
                                edge
                            }
                        };
                        *corner + along(1, u) + along(2, v) + along(4, w)
                    })
                    .collect();
                (points, CUBOID_FACES.to_vec())
            }
            Shape::Mesh { vertices, faces } => {
                let indices = faces
                    .iter()
                    .map(|&[a, b, c]| Some([a.to_u32()?, b.to_u32()?, c.to_u32()?]))
                    .collect::<Option<Vec<_>>>()?;
                (vertices.clone(), indices)
            }
        };

        let (min, max) = bounds(&points)?;
        let extent = max - min;
        extent
            .iter()
            .all(|&length| length > f64::EPSILON)
            .then_some(Self {
                points,
                indices,
                extent,
            })
    }
}

/// Sampler handing closed shapes to parry's voxelizer
///
/// Cuboids and meshes are voxelized with the step as voxel size and every
/// filled voxel contributes its point. Points, polylines and flat shapes
/// fall back to the lattice sampler for their surface and have no volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoxelSampler {
    lattice: LatticeSampler,
}

impl VoxelSampler {
    /// Sampler with the default per-shape limit
    pub const fn new() -> Self {
        Self::with_limit(MAX_SAMPLES_PER_SHAPE)
    }

    /// Sampler allowing at most `limit` voxels or points per shape
    pub const fn with_limit(limit: usize) -> Self {
        Self {
            lattice: LatticeSampler::with_limit(limit),
        }
    }

    fn voxelize(&self, surface: &SolidSurface, step: f64, fill_mode: FillMode) -> Samples {
        let mut budget = Budget::new(self.lattice.limit());
        let mut counts = [0; 3];
        for (count, &length) in counts.iter_mut().zip(surface.extent.iter()) {
            // One voxel of padding on each side
            *count = budget.divisions(length, step)? + 2;
        }
        budget.reserve(product(&counts))?;

        let voxels =
            VoxelSet::with_voxel_size(&surface.points, &surface.indices, step, fill_mode, false);
        Ok(voxels
            .voxels()
            .iter()
            .map(|voxel| voxels.get_voxel_point(voxel))
            .collect())
    }
}

impl Sampler for VoxelSampler {
    fn sample_surface(&self, shape: &Shape, step: f64) -> Samples {
        if !is_valid_step(step) {
            return Ok(Vec::new());
        }

        match SolidSurface::of(shape) {
            Some(surface) => self.voxelize(&surface, step, FillMode::SurfaceOnly),
            None => self.lattice.sample_surface(shape, step),
        }
    }

    fn sample_volume(&self, shape: &Shape, step: f64) -> Samples {
        if !is_valid_step(step) {
            return Ok(Vec::new());
        }

        SolidSurface::of(shape).map_or_else(
            || Ok(Vec::new()),
            |surface| {
                self.voxelize(
                    &surface,
                    step,
                    FillMode::FloodFill {
                        detect_cavities: false,
                    },
                )
            },
        )
    }
}
