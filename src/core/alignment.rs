//! Alignment statistics used for RPM normalization
//!
//! An [`AlignmentHandle`] carries the total mapped-read count of an indexed
//! alignment file. The count is read once when the handle is opened (see
//! [`crate::formats::bam::open_alignment`]) and never changes afterwards.

use crate::core::error::{DensityError, DensityResult};
use std::cell::OnceCell;
use std::path::Path;

/// Reads per million scale
pub const RPM_SCALE: f64 = 1_000_000.0;

/// Mapped-read statistics of one alignment file
#[derive(Debug, Clone)]
pub struct AlignmentHandle {
    name: String,
    mapped: u64,
    norm_constant: OnceCell<f64>,
}

impl AlignmentHandle {
    pub fn new(name: impl Into<String>, mapped: u64) -> Self {
        Self {
            name: name.into(),
            mapped,
            norm_constant: OnceCell::new(),
        }
    }

    /// Source identifier
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total mapped reads
    pub fn mapped_count(&self) -> u64 {
        self.mapped
    }

    /// `1e6 / mapped`, computed on first use and cached.
    pub fn norm_constant(&self) -> DensityResult<f64> {
        if self.mapped == 0 {
            return Err(DensityError::ZeroMappedReads);
        }
        Ok(*self
            .norm_constant
            .get_or_init(|| RPM_SCALE / self.mapped as f64))
    }

    /// `rpm * 1e6 / mapped`
    ///
    /// The denominator is the total mapped count, not a count re-derived from
    /// the track, so this is approximate when the track was built with a
    /// different scale factor.
    pub fn rpm_to_raw(&self, rpm: f64) -> DensityResult<f64> {
        if self.mapped == 0 {
            return Err(DensityError::ZeroMappedReads);
        }
        Ok(rpm * RPM_SCALE / self.mapped as f64)
    }
}

/// Default source name: the file name of `path`
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
