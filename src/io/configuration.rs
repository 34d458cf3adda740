//! Sentinel identifiers, sampling limits and output naming defaults

// Caller-authored rule sets reference these names verbatim
/// Module name representing the unbounded exterior
pub const OUT_MODULE_NAME: &str = "OUT";
/// Module name representing a deliberately vacant slot
pub const EMPTY_MODULE_NAME: &str = "EMPTY";
/// Connector type tag carried by every face of a boundary module
pub const INDIFFERENT_TAG: &str = "INDIFFERENT";

/// Number of connectors on a module, one per face of its cell
pub const CONNECTOR_COUNT: usize = 6;

/// Edge length of synthesized boundary modules
pub const BOUNDARY_MODULE_DIMENSION: f64 = 1.0;

// Shapes needing more samples are skipped with a diagnostic, never thinned
/// Maximum number of sample points generated for one shape
pub const MAX_SAMPLES_PER_SHAPE: usize = 1 << 24;

// Default values for configurable parameters
/// Sampling step in unit-cell units when none is given
pub const DEFAULT_PRECISION: f64 = 0.5;

/// Mode code for surface-only sampling
pub const MODE_SURFACE: u8 = 0;
/// Mode code for volume-only sampling
pub const MODE_VOLUME: u8 = 1;
/// Mode code for combined surface and volume sampling
pub const MODE_BOTH: u8 = 2;

// Output settings
/// Suffix added to resolved rule document filenames
pub const RESOLVED_SUFFIX: &str = "_resolved";
/// Suffix added to slot center document filenames
pub const SLOTS_SUFFIX: &str = "_slots";
/// Extension of every document read or written by the CLI
pub const DOCUMENT_EXTENSION: &str = "json";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Minimum shape count before a progress bar is shown
pub const PROGRESS_MIN_SHAPES: usize = 2;
