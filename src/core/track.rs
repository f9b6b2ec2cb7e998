//! Coverage track abstraction
//!
//! A coverage track answers per-base range queries over a chromosome. Readers
//! for concrete formats live in [`crate::formats`].

use crate::core::error::TrackResult;

/// A position-indexed numeric signal track.
///
/// `query` returns exactly `end - start` values, one per base, in forward
/// chromosome order. Bases without data on a known chromosome are NaN. A
/// chromosome absent from the track is reported as
/// [`TrackError::MissingChromosome`](crate::core::TrackError::MissingChromosome).
///
/// Queries take `&mut self`: readers hold seekable file handles and are not
/// safe to query concurrently.
pub trait CoverageTrack {
    fn query(&mut self, chrom: &str, start: u64, end: u64) -> TrackResult<Vec<f64>>;

    /// Whether the track knows about `chrom`
    fn has_chrom(&self, chrom: &str) -> bool;
}

impl<T: CoverageTrack + ?Sized> CoverageTrack for Box<T> {
    fn query(&mut self, chrom: &str, start: u64, end: u64) -> TrackResult<Vec<f64>> {
        (**self).query(chrom, start, end)
    }

    fn has_chrom(&self, chrom: &str) -> bool {
        (**self).has_chrom(chrom)
    }
}

/// Boxed track, as produced by [`crate::formats::open_track`]
pub type DynTrack = Box<dyn CoverageTrack>;

/// Paint `value` over `[iv_start, iv_end)` into a buffer covering `[start, start + buf.len())`.
///
/// Parts of the interval outside the buffer are ignored.
pub(crate) fn paint(buf: &mut [f64], start: u64, iv_start: u64, iv_end: u64, value: f64) {
    let end = start + buf.len() as u64;
    let from = iv_start.max(start);
    let to = iv_end.min(end);
    if from >= to {
        return;
    }
    let lo = (from - start) as usize;
    let hi = (to - start) as usize;
    buf[lo..hi].fill(value);
}
