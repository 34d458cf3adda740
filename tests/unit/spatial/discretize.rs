//! Tests for geometry discretization into slot centres

#[cfg(test)]
mod tests {
    use slotwise::SlotwiseError;
    use slotwise::spatial::coordinate::GridCoordinate;
    use slotwise::spatial::discretize::{
        CellSet, DiagnosticKind, Discretizer, GridSettings, SamplingMode, ShapeDiagnostic,
        discretize,
    };
    use slotwise::spatial::plane::Plane;
    use slotwise::spatial::sampler::{LatticeSampler, Sampler, Samples, VoxelSampler};
    use slotwise::spatial::shape::Shape;
    use slotwise::spatial::vector::{Point3, Vector3};
    use std::collections::HashSet;

    fn settings(mode: SamplingMode, precision: f64) -> GridSettings {
        GridSettings {
            plane: Plane::world_xy(),
            slot_diagonal: Vector3::repeat(1.0),
            mode,
            precision,
        }
    }

    fn assert_close(actual: Point3<f64>, expected: Point3<f64>) {
        assert!(
            (actual - expected).norm() < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }

    struct FixedSampler;

    impl Sampler for FixedSampler {
        fn sample_surface(&self, _shape: &Shape, _step: f64) -> Samples {
            Ok(vec![
                Point3::new(0.4, 0.0, 0.0),
                Point3::new(0.6, 0.0, 0.0),
                Point3::new(1.4, 0.0, 0.0),
            ])
        }

        fn sample_volume(&self, _shape: &Shape, _step: f64) -> Samples {
            Ok(Vec::new())
        }
    }

    // Tests that a unit cube centred on the origin fills exactly one slot
    // Verified by sampling volumes on cell boundaries
    #[test]
    fn test_unit_cube_volume_is_one_slot() {
        let cube = Shape::cube(Point3::origin(), 1.0);

        let result = discretize(&[cube], &settings(SamplingMode::Volume, 0.5)).unwrap();

        assert_eq!(result.centers, vec![Point3::origin()]);
        assert_eq!(result.coordinates, vec![GridCoordinate::new(0, 0, 0)]);
        assert!(result.diagnostics.is_empty());
    }

    // Tests that boundary samples on half-cell ties snap to the even cell
    // Verified by rounding ties away from zero
    #[test]
    fn test_unit_cube_surface_ties_snap_to_even() {
        let cube = Shape::cube(Point3::origin(), 1.0);

        let surface = discretize(&[cube.clone()], &settings(SamplingMode::Surface, 0.5)).unwrap();
        let both = discretize(&[cube], &settings(SamplingMode::Both, 0.5)).unwrap();

        assert_eq!(surface.centers, vec![Point3::origin()]);
        assert_eq!(both.centers, vec![Point3::origin()]);
    }

    // Tests a larger cube against the slot diagonal and plane origin
    // Verified by ignoring the plane origin when mapping back
    #[test]
    fn test_scaled_cube_slots() {
        let grid = GridSettings {
            plane: Plane::world_xy_at(Point3::new(10.0, 0.0, 0.0)),
            slot_diagonal: Vector3::repeat(2.0),
            mode: SamplingMode::Volume,
            precision: 0.5,
        };
        let cube = Shape::cube(Point3::new(10.0, 0.0, 0.0), 6.0);

        let result = discretize(&[cube], &grid).unwrap();

        assert_eq!(result.centers.len(), 27);
        assert!(result.centers.contains(&Point3::new(12.0, 2.0, -2.0)));
        assert!(result.centers.contains(&Point3::new(10.0, 0.0, 0.0)));
        assert!(result.centers.contains(&Point3::new(8.0, -2.0, 2.0)));
    }

    // Tests that slots follow a rotated base plane
    // Verified by applying the rotation in the wrong direction
    #[test]
    fn test_rotated_plane() {
        let grid = GridSettings {
            plane: Plane::new(Point3::origin(), Vector3::y(), -Vector3::x()).unwrap(),
            ..settings(SamplingMode::Surface, 0.5)
        };

        let result = discretize(&[Shape::Point(Point3::new(0.0, 2.0, 0.0))], &grid).unwrap();

        assert_eq!(result.coordinates, vec![GridCoordinate::new(2, 0, 0)]);
        assert_eq!(result.centers.len(), 1);
        assert_close(result.centers.first().copied().unwrap(), Point3::new(0.0, 2.0, 0.0));
    }

    // Tests validation before any shape is processed
    // Verified by validating lazily inside the shape loop
    #[test]
    fn test_invalid_settings_fail_fast() {
        let shapes = [Shape::Point(Point3::origin())];

        let zero_diagonal = GridSettings {
            slot_diagonal: Vector3::new(1.0, 0.0, 1.0),
            ..settings(SamplingMode::Surface, 0.5)
        };
        assert!(matches!(
            discretize(&shapes, &zero_diagonal),
            Err(SlotwiseError::InvalidParameter {
                parameter: "slot diagonal",
                ..
            })
        ));

        for precision in [0.0, -0.5, f64::NAN] {
            assert!(matches!(
                discretize(&shapes, &settings(SamplingMode::Surface, precision)),
                Err(SlotwiseError::InvalidParameter {
                    parameter: "precision",
                    ..
                })
            ));
        }
    }

    // Tests that a degenerate shape is skipped while the rest are processed
    // Verified by aborting the whole batch on the first bad shape
    #[test]
    fn test_degenerate_shape_is_skipped() {
        let broken = Shape::Mesh {
            vertices: vec![Point3::origin()],
            faces: vec![[0, 1, 2]],
        };
        let shapes = [broken, Shape::Point(Point3::new(3.0, 0.0, 0.0))];

        let result = discretize(&shapes, &settings(SamplingMode::Surface, 0.5)).unwrap();

        assert_eq!(result.centers, vec![Point3::new(3.0, 0.0, 0.0)]);
        assert_eq!(result.diagnostics.len(), 1);
        assert!(matches!(
            result.diagnostics.first(),
            Some(ShapeDiagnostic {
                shape_index: 0,
                kind: DiagnosticKind::DegenerateGeometry { .. },
            })
        ));
    }

    // Tests that shapes without an interior report an empty sampling result
    // Verified by sampling point surfaces in volume mode
    #[test]
    fn test_empty_sampling_diagnostic() {
        let shapes = [
            Shape::cube(Point3::origin(), 1.0),
            Shape::Point(Point3::new(5.0, 5.0, 5.0)),
        ];

        let result = discretize(&shapes, &settings(SamplingMode::Volume, 0.5)).unwrap();

        assert_eq!(result.centers, vec![Point3::origin()]);
        assert_eq!(
            result.diagnostics,
            vec![ShapeDiagnostic {
                shape_index: 1,
                kind: DiagnosticKind::EmptySamplingResult,
            }]
        );
    }

    // Tests that repeated shapes and repeated runs give the same slots
    // Verified by appending cells without deduplication
    #[test]
    fn test_discretization_is_idempotent() {
        let cube = Shape::cube(Point3::new(0.3, -1.2, 2.0), 3.0);
        let grid = settings(SamplingMode::Both, 0.5);

        let once = discretize(std::slice::from_ref(&cube), &grid).unwrap();
        let twice = discretize(&[cube.clone(), cube], &grid).unwrap();

        assert_eq!(once.centers, twice.centers);
        let unique: HashSet<GridCoordinate> = twice.coordinates.iter().copied().collect();
        assert_eq!(unique.len(), twice.coordinates.len());
    }

    // Tests that refining the sampling step never loses slots
    // Verified by using floor instead of ceil for division counts
    #[test]
    fn test_finer_precision_never_loses_slots() {
        let cube = Shape::cube(Point3::origin(), 3.0);
        let mut previous = 0;
        for precision in [1.0, 0.5, 0.25] {
            let result = discretize(
                std::slice::from_ref(&cube),
                &settings(SamplingMode::Volume, precision),
            )
            .unwrap();
            assert_eq!(result.centers.len(), 27);
            assert!(result.centers.len() >= previous);
            previous = result.centers.len();
        }

        let slab = Shape::axis_aligned_box(Point3::new(0.25, 0.25, 0.25), Point3::new(3.25, 2.25, 1.25));
        let coarse = discretize(
            std::slice::from_ref(&slab),
            &settings(SamplingMode::Surface, 1.0),
        )
        .unwrap();
        let fine = discretize(&[slab], &settings(SamplingMode::Surface, 0.25)).unwrap();

        let fine_cells: HashSet<GridCoordinate> = fine.coordinates.iter().copied().collect();
        assert!(coarse.coordinates.iter().all(|cell| fine_cells.contains(cell)));
        assert!(fine.centers.len() >= coarse.centers.len());
    }

    // Tests that the engine accepts a custom sampler
    // Verified by ignoring the injected sampler
    #[test]
    fn test_custom_sampler() {
        let engine = Discretizer::with_sampler(FixedSampler);

        let result = engine
            .discretize(
                &[Shape::Point(Point3::origin())],
                &settings(SamplingMode::Surface, 0.5),
            )
            .unwrap();

        assert_eq!(
            result.coordinates,
            vec![GridCoordinate::new(0, 0, 0), GridCoordinate::new(1, 0, 0)]
        );
    }

    // Tests that progress is reported once per shape, including skipped ones
    // Verified by reporting only successful shapes
    #[test]
    fn test_progress_reports_every_shape() {
        let shapes = [
            Shape::Polyline(Vec::new()),
            Shape::Point(Point3::origin()),
            Shape::cube(Point3::origin(), 1.0),
        ];
        let mut reported = Vec::new();

        let result = Discretizer::new()
            .discretize_with_progress(&shapes, &settings(SamplingMode::Surface, 0.5), |index| {
                reported.push(index);
            })
            .unwrap();

        assert_eq!(reported, vec![0, 1, 2]);
        assert_eq!(result.centers, vec![Point3::origin()]);
    }

    // Tests mode codes and their sampled parts
    // Verified by mapping code 2 to volume only
    #[test]
    fn test_sampling_mode_codes() {
        for mode in [SamplingMode::Surface, SamplingMode::Volume, SamplingMode::Both] {
            assert_eq!(SamplingMode::from_code(mode.code()).unwrap(), mode);
        }
        assert!(SamplingMode::Both.includes_surface() && SamplingMode::Both.includes_volume());
        assert!(!SamplingMode::Surface.includes_volume());
        assert!(!SamplingMode::Volume.includes_surface());

        assert!(matches!(
            SamplingMode::from_code(3),
            Err(SlotwiseError::InvalidParameter {
                parameter: "mode",
                ..
            })
        ));
        assert_eq!(serde_json::from_str::<SamplingMode>("1").unwrap(), SamplingMode::Volume);
        assert!(serde_json::from_str::<SamplingMode>("7").is_err());
    }

    // Tests insertion-ordered cell deduplication
    // Verified by pushing cells without checking membership
    #[test]
    fn test_cell_set_keeps_first_seen_order() {
        let mut cells = CellSet::new();
        assert!(cells.is_empty());

        assert!(cells.insert(GridCoordinate::new(2, 0, 0)));
        assert!(cells.insert(GridCoordinate::new(0, 0, 0)));
        assert!(!cells.insert(GridCoordinate::new(2, 0, 0)));
        cells.extend([GridCoordinate::new(0, 0, 0), GridCoordinate::new(1, 1, 1)]);

        assert_eq!(cells.len(), 3);
        assert_eq!(
            cells.into_vec(),
            vec![
                GridCoordinate::new(2, 0, 0),
                GridCoordinate::new(0, 0, 0),
                GridCoordinate::new(1, 1, 1),
            ]
        );
    }

    // Tests that shapes thousands of cells long keep every occupied cell
    // Verified by capping divisions along each edge at a fixed count
    #[test]
    fn test_long_shapes_keep_every_cell() {
        let line = Shape::Polyline(vec![Point3::origin(), Point3::new(3000.0, 0.0, 0.0)]);
        let surface = discretize(&[line], &settings(SamplingMode::Surface, 0.5)).unwrap();
        assert_eq!(surface.coordinates.len(), 3001);
        assert!(surface.centers.contains(&Point3::new(1500.0, 0.0, 0.0)));

        let bar = Shape::axis_aligned_box(
            Point3::new(-0.5, -0.5, -0.5),
            Point3::new(2999.5, 0.5, 0.5),
        );
        let volume = discretize(&[bar], &settings(SamplingMode::Volume, 0.5)).unwrap();
        assert_eq!(volume.coordinates.len(), 3000);
        assert!(volume.diagnostics.is_empty());
    }

    // Tests that a shape over the sample limit is skipped with a diagnostic
    // Verified by sampling the shape at a coarser step instead
    #[test]
    fn test_sample_limit_diagnostic() {
        let engine = Discretizer::with_sampler(LatticeSampler::with_limit(100));
        let shapes = [
            Shape::Polyline(vec![Point3::origin(), Point3::new(1000.0, 0.0, 0.0)]),
            Shape::Point(Point3::new(2.0, 0.0, 0.0)),
        ];

        let result = engine
            .discretize(&shapes, &settings(SamplingMode::Surface, 0.5))
            .unwrap();

        assert_eq!(result.centers, vec![Point3::new(2.0, 0.0, 0.0)]);
        assert_eq!(
            result.diagnostics,
            vec![ShapeDiagnostic {
                shape_index: 0,
                kind: DiagnosticKind::SampleLimitExceeded { limit: 100 },
            }]
        );
    }

    // Tests the voxelizing sampler through the engine
    // Verified by dropping filled voxels away from the surface
    #[test]
    fn test_voxel_sampler_engine() {
        let engine = Discretizer::with_sampler(VoxelSampler::new());
        let cube = Shape::cube(Point3::origin(), 4.0);

        let result = engine
            .discretize(&[cube], &settings(SamplingMode::Volume, 0.5))
            .unwrap();

        assert!(!result.coordinates.is_empty());
        assert!(result.coordinates.iter().all(|cell| {
            [cell.x, cell.y, cell.z]
                .iter()
                .all(|component| (-3..=3).contains(component))
        }));
        assert!(result.diagnostics.is_empty());
    }
}
