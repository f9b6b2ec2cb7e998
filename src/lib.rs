//! bigwig-density - strand-aware per-base coverage retrieval
//!
//! Reads per-base signal density from strand-specific BigWig (or bedGraph)
//! coverage tracks for a list of genomic regions.
//!
//! # Features
//!
//! - Positive/negative strand track selection, minus strand reported 5'->3'
//! - Fixed-length results: a chromosome missing from a track yields NaN
//! - RPM normalization statistics from an indexed BAM file
//! - Ordered `name -> values` output for downstream plotting
//!
//! # Example
//!
//! ```ignore
//! use bigwig_density::{RegionEvaluator, StrandedDensity};
//! use bigwig_density::formats::{read_regions, NameStyle};
//!
//! let mut density = StrandedDensity::open("clip.pos.bw", "clip.neg.bw", None, None)?;
//! let regions = read_regions("peaks.bed", NameStyle::Coordinates)?;
//! let densities = RegionEvaluator::default().evaluate(&mut density, &regions)?;
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use core::{
    AlignmentHandle, CoverageTrack, DensityError, DensityMap, DensityResult, DensitySource,
    EvaluatorConfig, Region, RegionEvaluator, Strand, StrandedDensity, TrackError,
    UnstrandedDensity,
};
pub use formats::{open_track, BedGraphTrack, BigWigTrack};
