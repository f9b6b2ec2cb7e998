//! Core density retrieval functionality
//!
//! This module contains the track abstraction, the strand-aware density
//! sources, alignment normalization statistics and the region evaluator.

pub mod alignment;
pub mod density;
mod error;
pub mod evaluator;
pub mod io;
mod region;
pub mod track;

pub use alignment::{source_name, AlignmentHandle, RPM_SCALE};
pub use density::{zero_missing_values, DensitySource, StrandedDensity, UnstrandedDensity};
pub use error::{DensityError, DensityResult, TrackError, TrackResult};
pub use evaluator::{DensityMap, EvaluatorConfig, RegionEvaluator};
pub use io::{open_text, CompressionFormat, LineIterator, DEFAULT_BUFFER_SIZE};
pub use region::{Region, Strand};
pub use track::{CoverageTrack, DynTrack};
