//! File format adapters
//!
//! Track readers (BigWig, bedGraph), alignment statistics (BAM), region
//! input (BED) and density table output.

pub mod bam;
pub mod bed;
pub mod bedgraph;
pub mod bigwig;
pub mod output;

pub use bam::open_alignment;
pub use bed::{parse_region_line, read_regions, read_regions_from, BedParseError, BedRecordView, NameStyle, RegionFileError};
pub use bedgraph::{track_paths, BedGraphRecord, BedGraphTrack};
pub use bigwig::{BigWigTrack, BIGWIG_MAGIC};
pub use output::{write_densities, write_densities_to, NanFormat};

use crate::core::{DensityError, DensityResult, DynTrack, TrackError, TrackResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// On-disk track format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackFormat {
    BigWig,
    BedGraph,
}

impl TrackFormat {
    /// Detect by extension (ignoring a trailing `.gz`/`.bz2`), then by the BigWig magic number
    pub fn detect(path: &Path) -> TrackResult<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let name = name
            .strip_suffix(".gz")
            .or_else(|| name.strip_suffix(".bz2"))
            .unwrap_or(&name);

        if name.ends_with(".bw") || name.ends_with(".bigwig") {
            return Ok(TrackFormat::BigWig);
        }
        if name.ends_with(".bg") || name.ends_with(".bdg") || name.ends_with(".bedgraph") {
            return Ok(TrackFormat::BedGraph);
        }

        let mut magic = [0u8; 4];
        let bytes_read = File::open(path)?.read(&mut magic)?;
        if bytes_read == 4 && magic == BIGWIG_MAGIC {
            Ok(TrackFormat::BigWig)
        } else {
            Ok(TrackFormat::BedGraph)
        }
    }
}

/// Open a coverage track, choosing the reader by [`TrackFormat::detect`].
///
/// Any failure is reported as [`DensityError::Open`] naming `path`.
pub fn open_track(path: &Path) -> DensityResult<DynTrack> {
    let opened: Result<DynTrack, TrackError> = TrackFormat::detect(path).and_then(|format| match format {
        TrackFormat::BigWig => BigWigTrack::open(path).map(|t| Box::new(t) as DynTrack),
        TrackFormat::BedGraph => BedGraphTrack::from_file(path).map(|t| Box::new(t) as DynTrack),
    });

    opened.map_err(|e| DensityError::Open {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
