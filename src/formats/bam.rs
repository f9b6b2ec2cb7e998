//! BAM alignment statistics
//!
//! Reads the total mapped-read count of an indexed BAM/CRAM file from its
//! index through rust-htslib. A missing index is an open failure.

use crate::core::{source_name, AlignmentHandle, DensityError, DensityResult};
use std::path::Path;

/// Open `path` and read its mapped-read count.
///
/// `name` defaults to the file name of `path`.
#[cfg(feature = "bam")]
pub fn open_alignment(path: &Path, name: Option<&str>) -> DensityResult<AlignmentHandle> {
    use rust_htslib::bam::IndexedReader;

    let open_error = |e: rust_htslib::errors::Error| DensityError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut reader = IndexedReader::from_path(path).map_err(open_error)?;
    let mapped: u64 = reader
        .index_stats()
        .map_err(open_error)?
        .iter()
        .map(|&(_tid, _len, mapped, _unmapped)| mapped)
        .sum();

    let name = name.map(str::to_string).unwrap_or_else(|| source_name(path));
    Ok(AlignmentHandle::new(name, mapped))
}

#[cfg(not(feature = "bam"))]
pub fn open_alignment(path: &Path, _name: Option<&str>) -> DensityResult<AlignmentHandle> {
    Err(DensityError::Open {
        path: path.to_path_buf(),
        message: "built without BAM support (enable the `bam` feature)".to_string(),
    })
}
