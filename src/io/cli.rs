//! Command-line interface for resolving rule documents and discretizing geometry

use crate::io::configuration::{DOCUMENT_EXTENSION, RESOLVED_SUFFIX, SLOTS_SUFFIX};
use crate::io::document::{
    GeometryDocument, ResolvedDocument, RulesDocument, SlotsDocument, read_document,
    write_document,
};
use crate::io::error::Result;
use crate::io::progress::ShapeProgress;
use crate::spatial::discretize::{
    DiagnosticKind, Discretization, Discretizer, GridSettings, SamplingMode,
};
use crate::spatial::sampler::{LatticeSampler, Sampler, VoxelSampler};
use crate::spatial::shape::Shape;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "slotwise")]
#[command(
    author,
    version,
    about = "Prepare adjacency rules and slot grids for 3D wave function collapse"
)]
/// Command-line arguments for the preprocessing tool
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output and warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Overwrite output files that already exist
    #[arg(short, long, global = true)]
    pub no_skip: bool,
}

/// Available operations
#[derive(Subcommand)]
pub enum Command {
    /// Resolve allowed and disallowed rules into a final rule list
    Resolve {
        /// Rules document to read
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output path (defaults to <FILE>_resolved.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Discretize geometry into slot centres
    Discretize {
        /// Geometry document to read
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output path (defaults to <FILE>_slots.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the document's sampling step
        #[arg(short, long)]
        precision: Option<f64>,

        /// Override the document's mode (0 surface, 1 volume, 2 both)
        #[arg(short, long)]
        mode: Option<u8>,

        /// Sample cuboids and meshes with the voxelizer instead of lattices
        #[arg(long)]
        voxelize: bool,
    },
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }
}

/// Runs one parsed command against the file system
pub struct CommandRunner {
    cli: Cli,
}

impl CommandRunner {
    /// Create a runner for parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Execute the command
    ///
    /// Returns the written output path, or `None` when an existing output
    /// was left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if a document cannot be read, parsed or written, or
    /// if its content is rejected by the engine
    pub fn run(&self) -> Result<Option<PathBuf>> {
        match &self.cli.command {
            Command::Resolve { input, output } => {
                let output = output
                    .clone()
                    .unwrap_or_else(|| Self::output_path(input, RESOLVED_SUFFIX));
                if !self.should_write(&output) {
                    return Ok(None);
                }
                self.resolve(input, &output)?;
                Ok(Some(output))
            }
            Command::Discretize {
                input,
                output,
                precision,
                mode,
                voxelize,
            } => {
                let output = output
                    .clone()
                    .unwrap_or_else(|| Self::output_path(input, SLOTS_SUFFIX));
                if !self.should_write(&output) {
                    return Ok(None);
                }
                self.discretize(input, &output, *precision, *mode, *voxelize)?;
                Ok(Some(output))
            }
        }
    }

    fn should_write(&self, output: &Path) -> bool {
        if !self.cli.skip_existing() || !output.exists() {
            return true;
        }

        // Allow print for user feedback for progress messages
        #[allow(clippy::print_stderr)]
        if !self.cli.quiet {
            eprintln!("Skipping: {} (output exists)", output.display());
        }
        false
    }

    // Allow print for user feedback about rules the solver will not understand
    #[allow(clippy::print_stderr)]
    fn resolve(&self, input: &Path, output: &Path) -> Result<()> {
        let document: RulesDocument = read_document(input)?;
        let resolution = document.into_resolver().resolve()?;

        if !self.cli.quiet {
            for rule in &resolution.rules {
                if let Err(error) = rule.validate(&resolution.modules) {
                    eprintln!("Warning: {error}");
                }
            }
        }

        write_document(output, &ResolvedDocument::from(resolution))
    }

    // Allow print for user feedback about skipped shapes
    #[allow(clippy::print_stderr)]
    fn discretize(
        &self,
        input: &Path,
        output: &Path,
        precision: Option<f64>,
        mode: Option<u8>,
        voxelize: bool,
    ) -> Result<()> {
        let document: GeometryDocument = read_document(input)?;
        let mut settings = document.settings()?;
        if let Some(precision) = precision {
            settings.precision = precision;
        }
        if let Some(code) = mode {
            settings.mode = SamplingMode::from_code(code)?;
        }

        let label = input
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let progress = ShapeProgress::for_batch(document.shapes.len(), &label, self.cli.quiet);

        let discretization = if voxelize {
            run_engine(
                &Discretizer::with_sampler(VoxelSampler::new()),
                &document.shapes,
                &settings,
                progress.as_ref(),
            )?
        } else {
            run_engine(
                &Discretizer::with_sampler(LatticeSampler::new()),
                &document.shapes,
                &settings,
                progress.as_ref(),
            )?
        };

        if let Some(ref bar) = progress {
            bar.finish(discretization.centers.len());
        }

        if !self.cli.quiet {
            for diagnostic in &discretization.diagnostics {
                match &diagnostic.kind {
                    DiagnosticKind::DegenerateGeometry { reason } => {
                        eprintln!("Skipped shape {}: {reason}", diagnostic.shape_index);
                    }
                    DiagnosticKind::SampleLimitExceeded { limit } => {
                        eprintln!(
                            "Skipped shape {}: needs more than {limit} samples at this precision",
                            diagnostic.shape_index
                        );
                    }
                    DiagnosticKind::EmptySamplingResult => {}
                }
            }
        }

        write_document(output, &SlotsDocument::from(discretization))
    }

    /// Default output path next to the input, with a suffix on the stem
    pub fn output_path(input_path: &Path, suffix: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!(
            "{}{suffix}.{DOCUMENT_EXTENSION}",
            stem.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

fn run_engine<S: Sampler>(
    engine: &Discretizer<S>,
    shapes: &[Shape],
    settings: &GridSettings,
    progress: Option<&ShapeProgress>,
) -> Result<Discretization> {
    engine.discretize_with_progress(shapes, settings, |_| {
        if let Some(bar) = progress {
            bar.advance();
        }
    })
}
