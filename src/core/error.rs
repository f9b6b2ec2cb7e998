//! Error types for bigwig-density
//!
//! Defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for density retrieval
#[derive(Debug, Error)]
pub enum DensityError {
    /// A track or alignment file could not be opened
    #[error("Failed to open {}: {message}", .path.display())]
    Open { path: PathBuf, message: String },

    /// Strand token outside of what the source can serve
    #[error("Invalid strand '{strand}' for this coverage source")]
    InvalidStrand { strand: String },

    /// Empty or inverted interval
    #[error("Invalid coordinate range: start ({start}) >= end ({end})")]
    InvalidRange { start: u64, end: u64 },

    /// Normalization requested but the alignment has no mapped reads
    #[error("Alignment has zero mapped reads, cannot normalize")]
    ZeroMappedReads,

    /// Normalization requested but no alignment file was supplied
    #[error("No alignment file attached to this coverage source")]
    MissingAlignment,

    /// Track query failed for a reason other than a missing chromosome
    #[error("Track error: {0}")]
    Track(#[from] TrackError),

    /// A region failed during evaluation
    #[error("Region {region}: {source}")]
    Region {
        region: String,
        #[source]
        source: Box<DensityError>,
    },
}

/// Errors raised by coverage track readers
#[derive(Debug, Error)]
pub enum TrackError {
    /// Chromosome is not present in the track
    #[error("Chromosome not found in track: {0}")]
    MissingChromosome(String),

    /// Underlying reader failed
    #[error("Failed to read track: {0}")]
    Read(String),

    /// Malformed text track (bedGraph)
    #[error("Invalid bedGraph line {line}: {message}")]
    Parse { line: usize, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for density operations
pub type DensityResult<T> = std::result::Result<T, DensityError>;

/// Result type alias for track operations
pub type TrackResult<T> = std::result::Result<T, TrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_names_path() {
        let err = DensityError::Open {
            path: PathBuf::from("sample.pos.bw"),
            message: "No such file".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to open sample.pos.bw: No such file");
    }

    #[test]
    fn test_region_error_wraps_source() {
        let err = DensityError::Region {
            region: "chr1:0-10:.".to_string(),
            source: Box::new(DensityError::InvalidStrand { strand: ".".to_string() }),
        };
        assert!(err.to_string().starts_with("Region chr1:0-10:.:"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
