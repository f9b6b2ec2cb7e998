//! Strand-aware density retrieval
//!
//! [`StrandedDensity`] serves `+` regions from a positive-strand track and `-`
//! regions from a negative-strand track, reporting minus-strand values 5'->3'
//! (reversed relative to chromosome order). [`UnstrandedDensity`] serves every
//! region from one track without reorientation.
//!
//! Both variants guarantee that a successful query returns exactly
//! `end - start` values. A chromosome missing from the track yields an
//! all-NaN sequence instead of an error.

use crate::core::alignment::AlignmentHandle;
use crate::core::error::{DensityError, DensityResult, TrackError};
use crate::core::region::{Region, Strand};
use crate::core::track::{CoverageTrack, DynTrack};
use crate::formats;
use log::{debug, info};
use std::path::Path;

/// Common query surface of the stranded and unstranded sources
pub trait DensitySource {
    /// Density over `region`, oriented according to its strand.
    fn density(&mut self, region: &Region, zero_missing: bool) -> DensityResult<Vec<f64>>;

    /// Alignment attached at construction, if any
    fn alignment(&self) -> Option<&AlignmentHandle>;

    /// RPM value of a single read: `1e6 / total_mapped`
    fn pseudocount(&self) -> DensityResult<f64> {
        self.alignment()
            .ok_or(DensityError::MissingAlignment)?
            .norm_constant()
    }

    /// Total mapped reads of the attached alignment
    fn total_mapped(&self) -> DensityResult<u64> {
        Ok(self
            .alignment()
            .ok_or(DensityError::MissingAlignment)?
            .mapped_count())
    }

    /// Approximate raw read count for an RPM value: `rpm * 1e6 / total_mapped`
    fn rpm_to_raw(&self, rpm: f64) -> DensityResult<f64> {
        self.alignment()
            .ok_or(DensityError::MissingAlignment)?
            .rpm_to_raw(rpm)
    }
}

/// Replace every NaN with 0.0
pub fn zero_missing_values(values: &mut [f64]) {
    for v in values.iter_mut().filter(|v| v.is_nan()) {
        *v = 0.0;
    }
}

/// Query `track`, substituting an all-NaN sequence for a missing chromosome.
fn fetch<T: CoverageTrack + ?Sized>(
    track: &mut T,
    chrom: &str,
    start: u64,
    end: u64,
) -> DensityResult<Vec<f64>> {
    if end <= start {
        return Err(DensityError::InvalidRange { start, end });
    }
    let len = (end - start) as usize;
    if !track.has_chrom(chrom) {
        debug!("Chromosome {} not in track, returning {} NaN values", chrom, len);
        return Ok(vec![f64::NAN; len]);
    }

    match track.query(chrom, start, end) {
        Ok(mut values) => {
            if values.len() != len {
                debug!(
                    "Track returned {} values for {}:{}-{}, padding to {}",
                    values.len(), chrom, start, end, len
                );
                values.resize(len, f64::NAN);
            }
            Ok(values)
        }
        Err(TrackError::MissingChromosome(name)) => {
            debug!("Chromosome {} not in track, returning {} NaN values", name, len);
            Ok(vec![f64::NAN; len])
        }
        Err(e) => Err(e.into()),
    }
}

fn attach_alignment(alignment: Option<&Path>, name: Option<&str>) -> DensityResult<Option<AlignmentHandle>> {
    match alignment {
        Some(path) => {
            let handle = formats::bam::open_alignment(path, name)?;
            info!(
                "Opened alignment {} ({} mapped reads)",
                handle.name(),
                handle.mapped_count()
            );
            Ok(Some(handle))
        }
        None => Ok(None),
    }
}

/// Density from a pair of strand-specific tracks
pub struct StrandedDensity<T = DynTrack> {
    pos: T,
    neg: T,
    alignment: Option<AlignmentHandle>,
}

impl StrandedDensity<DynTrack> {
    /// Open both strand tracks and, optionally, an indexed alignment file.
    ///
    /// Fails on the first resource that cannot be opened; anything opened
    /// before it is dropped.
    pub fn open<P: AsRef<Path>>(
        pos: P,
        neg: P,
        alignment: Option<&Path>,
        name: Option<&str>,
    ) -> DensityResult<Self> {
        let pos_track = formats::open_track(pos.as_ref())?;
        let neg_track = formats::open_track(neg.as_ref())?;
        info!(
            "Opened stranded tracks {} / {}",
            pos.as_ref().display(),
            neg.as_ref().display()
        );
        let alignment = attach_alignment(alignment, name)?;
        Ok(Self::new(pos_track, neg_track, alignment))
    }
}

impl<T: CoverageTrack> StrandedDensity<T> {
    pub fn new(pos: T, neg: T, alignment: Option<AlignmentHandle>) -> Self {
        Self { pos, neg, alignment }
    }

    /// Per-base density over `[start, end)` on `strand`.
    ///
    /// `Plus` reads the positive track in chromosome order, `Minus` reads the
    /// negative track and reverses it. `Unstranded` is rejected with
    /// [`DensityError::InvalidStrand`]. With `zero_missing` every NaN becomes
    /// 0.0.
    pub fn values(
        &mut self,
        chrom: &str,
        start: u64,
        end: u64,
        strand: Strand,
        zero_missing: bool,
    ) -> DensityResult<Vec<f64>> {
        let mut values = match strand {
            Strand::Plus => fetch(&mut self.pos, chrom, start, end)?,
            Strand::Minus => {
                let mut v = fetch(&mut self.neg, chrom, start, end)?;
                v.reverse();
                v
            }
            Strand::Unstranded => {
                return Err(DensityError::InvalidStrand {
                    strand: strand.to_string(),
                })
            }
        };
        if zero_missing {
            zero_missing_values(&mut values);
        }
        Ok(values)
    }
}

impl<T: CoverageTrack> DensitySource for StrandedDensity<T> {
    fn density(&mut self, region: &Region, zero_missing: bool) -> DensityResult<Vec<f64>> {
        self.values(&region.chrom, region.start, region.end, region.strand, zero_missing)
    }

    fn alignment(&self) -> Option<&AlignmentHandle> {
        self.alignment.as_ref()
    }
}

/// Density from a single unstranded track
pub struct UnstrandedDensity<T = DynTrack> {
    track: T,
    alignment: Option<AlignmentHandle>,
}

impl UnstrandedDensity<DynTrack> {
    /// Open the track and, optionally, an indexed alignment file.
    pub fn open<P: AsRef<Path>>(
        track: P,
        alignment: Option<&Path>,
        name: Option<&str>,
    ) -> DensityResult<Self> {
        let opened = formats::open_track(track.as_ref())?;
        info!("Opened unstranded track {}", track.as_ref().display());
        let alignment = attach_alignment(alignment, name)?;
        Ok(Self::new(opened, alignment))
    }
}

impl<T: CoverageTrack> UnstrandedDensity<T> {
    pub fn new(track: T, alignment: Option<AlignmentHandle>) -> Self {
        Self { track, alignment }
    }

    /// Per-base density over `[start, end)` in chromosome order.
    pub fn values(
        &mut self,
        chrom: &str,
        start: u64,
        end: u64,
        zero_missing: bool,
    ) -> DensityResult<Vec<f64>> {
        let mut values = fetch(&mut self.track, chrom, start, end)?;
        if zero_missing {
            zero_missing_values(&mut values);
        }
        Ok(values)
    }
}

impl<T: CoverageTrack> DensitySource for UnstrandedDensity<T> {
    fn density(&mut self, region: &Region, zero_missing: bool) -> DensityResult<Vec<f64>> {
        self.values(&region.chrom, region.start, region.end, zero_missing)
    }

    fn alignment(&self) -> Option<&AlignmentHandle> {
        self.alignment.as_ref()
    }
}
