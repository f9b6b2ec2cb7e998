//! BigWig coverage tracks
//!
//! Range queries against BigWig files through bigtools.

use crate::core::track::{paint, CoverageTrack};
use crate::core::{TrackError, TrackResult};
use bigtools::utils::reopen::ReopenableFile;
use bigtools::BigWigRead;
use std::collections::HashMap;
use std::path::Path;

/// BigWig magic number, little endian on disk
pub const BIGWIG_MAGIC: [u8; 4] = [0x26, 0xFC, 0x8F, 0x88];

/// A BigWig file opened for range queries
pub struct BigWigTrack {
    reader: BigWigRead<ReopenableFile>,
    chrom_sizes: HashMap<String, u64>,
}

impl BigWigTrack {
    pub fn open<P: AsRef<Path>>(path: P) -> TrackResult<Self> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| TrackError::Read(format!("non UTF-8 path: {}", path.display())))?;

        let reader = BigWigRead::open_file(path_str).map_err(|e| TrackError::Read(e.to_string()))?;
        let chrom_sizes = reader
            .chroms()
            .iter()
            .map(|c| (c.name.clone(), c.length as u64))
            .collect();

        Ok(Self {
            reader,
            chrom_sizes,
        })
    }

    /// Chromosome length as declared in the file header
    pub fn chrom_size(&self, chrom: &str) -> Option<u64> {
        self.chrom_sizes.get(chrom).copied()
    }
}

impl CoverageTrack for BigWigTrack {
    /// Bases past the chromosome end are NaN.
    fn query(&mut self, chrom: &str, start: u64, end: u64) -> TrackResult<Vec<f64>> {
        let chrom_len = self
            .chrom_size(chrom)
            .ok_or_else(|| TrackError::MissingChromosome(chrom.to_string()))?;

        let mut values = vec![f64::NAN; end.saturating_sub(start) as usize];
        let query_end = end.min(chrom_len);
        if start >= query_end {
            return Ok(values);
        }

        // both bounds fit the header's u32 chromosome length
        let intervals = self
            .reader
            .get_interval(chrom, start as u32, query_end as u32)
            .map_err(|e| TrackError::Read(e.to_string()))?;

        for interval in intervals {
            let interval = interval.map_err(|e| TrackError::Read(e.to_string()))?;
            paint(
                &mut values,
                start,
                interval.start as u64,
                interval.end as u64,
                interval.value as f64,
            );
        }

        Ok(values)
    }

    fn has_chrom(&self, chrom: &str) -> bool {
        self.chrom_sizes.contains_key(chrom)
    }
}
