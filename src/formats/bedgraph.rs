//! bedGraph coverage tracks
//!
//! An in-memory [`CoverageTrack`] built from bedGraph records (`chrom start
//! end value`, 0-based half-open), the intermediate format written by the
//! coverage pipeline before BigWig conversion. Intervals are indexed per
//! chromosome with rust-lapper.

use crate::core::io::{is_header_line, open_text, LineIterator};
use crate::core::track::{paint, CoverageTrack};
use crate::core::{TrackError, TrackResult};
use rust_lapper::{Interval, Lapper};
use std::collections::HashMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// One bedGraph line
#[derive(Debug, Clone, PartialEq)]
pub struct BedGraphRecord {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub value: f64,
}

impl BedGraphRecord {
    /// Parse a bedGraph data line
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let (chrom, start, end, value) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(c), Some(s), Some(e), Some(v)) => (c, s, e, v),
            _ => return Err(format!("expected 4 columns: {}", line)),
        };

        let start: u64 = start.parse().map_err(|_| format!("invalid start: {}", start))?;
        let end: u64 = end.parse().map_err(|_| format!("invalid end: {}", end))?;
        let value: f64 = value.parse().map_err(|_| format!("invalid value: {}", value))?;
        if end <= start {
            return Err(format!("end ({}) must be greater than start ({})", end, start));
        }

        Ok(Self {
            chrom: chrom.to_string(),
            start,
            end,
            value,
        })
    }

    /// Format as bedGraph line
    pub fn to_line(&self) -> String {
        format!("{}\t{}\t{}\t{}", self.chrom, self.start, self.end, self.value)
    }
}

/// Values are stored as their bit patterns so intervals satisfy `Eq`.
type ValueInterval = Interval<u64, u64>;

/// In-memory bedGraph track
#[derive(Default)]
pub struct BedGraphTrack {
    chroms: HashMap<String, Lapper<u64, u64>>,
}

impl BedGraphTrack {
    /// Build a track from records
    pub fn from_records<I: IntoIterator<Item = BedGraphRecord>>(records: I) -> Self {
        let mut by_chrom: HashMap<String, Vec<ValueInterval>> = HashMap::new();
        for rec in records {
            by_chrom.entry(rec.chrom).or_default().push(Interval {
                start: rec.start,
                stop: rec.end,
                val: rec.value.to_bits(),
            });
        }

        let chroms = by_chrom
            .into_iter()
            .map(|(chrom, intervals)| (chrom, Lapper::new(intervals)))
            .collect();
        Self { chroms }
    }

    /// Parse bedGraph text
    pub fn from_reader<R: BufRead>(reader: R) -> TrackResult<Self> {
        let mut lines = LineIterator::new(reader);
        let mut records = Vec::new();

        while let Some(line) = lines.next_line() {
            let line = line?;
            if is_header_line(line) {
                continue;
            }
            let rec = BedGraphRecord::parse(line).map_err(|message| TrackError::Parse {
                line: lines.line_number(),
                message,
            })?;
            records.push(rec);
        }

        Ok(Self::from_records(records))
    }

    /// Load a bedGraph file (plain, gzip or bzip2)
    pub fn from_file<P: AsRef<Path>>(path: P) -> TrackResult<Self> {
        Self::from_reader(open_text(path)?)
    }

    /// Add one interval after construction
    pub fn insert(&mut self, chrom: &str, start: u64, end: u64, value: f64) {
        let interval = Interval {
            start,
            stop: end,
            val: value.to_bits(),
        };
        match self.chroms.get_mut(chrom) {
            Some(lapper) => lapper.insert(interval),
            None => {
                self.chroms
                    .insert(chrom.to_string(), Lapper::new(vec![interval]));
            }
        }
    }
}

impl CoverageTrack for BedGraphTrack {
    fn query(&mut self, chrom: &str, start: u64, end: u64) -> TrackResult<Vec<f64>> {
        let lapper = self
            .chroms
            .get(chrom)
            .ok_or_else(|| TrackError::MissingChromosome(chrom.to_string()))?;

        let mut values = vec![f64::NAN; end.saturating_sub(start) as usize];
        for iv in lapper.find(start, end) {
            paint(&mut values, start, iv.start, iv.stop, f64::from_bits(iv.val));
        }
        Ok(values)
    }

    fn has_chrom(&self, chrom: &str) -> bool {
        self.chroms.contains_key(chrom)
    }
}

/// Positive and negative strand track paths derived from an alignment path.
///
/// `sample.bam` maps to `sample.pos.bw` / `sample.neg.bw`, or
/// `sample.norm.pos.bw` / `sample.norm.neg.bw` for RPM-scaled tracks.
pub fn track_paths<P: AsRef<Path>>(bam: P, rpm: bool) -> (PathBuf, PathBuf) {
    let (pos, neg) = if rpm {
        ("norm.pos.bw", "norm.neg.bw")
    } else {
        ("pos.bw", "neg.bw")
    };
    let bam = bam.as_ref();
    (bam.with_extension(pos), bam.with_extension(neg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_record() {
        let rec = BedGraphRecord::parse("chr1\t10\t16\t5.5").unwrap();
        assert_eq!(rec.chrom, "chr1");
        assert_eq!(rec.start, 10);
        assert_eq!(rec.end, 16);
        assert_eq!(rec.value, 5.5);
        assert_eq!(rec.to_line(), "chr1\t10\t16\t5.5");
    }

    #[test]
    fn test_parse_negative_value() {
        // negative-strand tracks are scaled by a negative constant
        let rec = BedGraphRecord::parse("chr1 0 5 -2").unwrap();
        assert_eq!(rec.value, -2.0);
    }

    #[test]
    fn test_parse_rejects_bad_lines() {
        assert!(BedGraphRecord::parse("chr1\t10\t16").is_err());
        assert!(BedGraphRecord::parse("chr1\tx\t16\t1").is_err());
        assert!(BedGraphRecord::parse("chr1\t16\t10\t1").is_err());
    }

    #[test]
    fn test_reader_skips_headers() {
        let content = "\
track type=bedGraph name=\"pos\"
# comment
chr1\t10\t12\t1.0
chr1\t12\t15\t5.0
";
        let mut track = BedGraphTrack::from_reader(Cursor::new(content)).unwrap();
        let values = track.query("chr1", 9, 16).unwrap();
        assert!(values[0].is_nan());
        assert_eq!(&values[1..6], &[1.0, 1.0, 5.0, 5.0, 5.0]);
        assert!(values[6].is_nan());
    }

    #[test]
    fn test_reader_reports_line_number() {
        let content = "chr1\t0\t5\t1\nchr1\t5\tten\t2\n";
        match BedGraphTrack::from_reader(Cursor::new(content)) {
            Err(TrackError::Parse { line, .. }) => assert_eq!(line, 2),
            _ => panic!("expected parse error"),
        }
    }

    #[test]
    fn test_missing_chromosome() {
        let mut track = BedGraphTrack::from_records(vec![BedGraphRecord {
            chrom: "chr1".to_string(),
            start: 0,
            end: 10,
            value: 1.0,
        }]);
        assert!(track.has_chrom("chr1"));
        assert!(!track.has_chrom("chr2"));
        assert!(matches!(track.query("chr2", 0, 4), Err(TrackError::MissingChromosome(c)) if c == "chr2"));
    }

    #[test]
    fn test_insert_extends_track() {
        let mut track = BedGraphTrack::default();
        track.insert("chr1", 0, 2, 3.0);
        track.insert("chr1", 2, 3, 4.0);
        track.insert("chr2", 0, 1, 1.0);
        assert_eq!(track.query("chr1", 0, 3).unwrap(), vec![3.0, 3.0, 4.0]);
        assert_eq!(track.query("chr2", 0, 1).unwrap(), vec![1.0]);
    }

    #[test]
    fn test_track_paths() {
        let (pos, neg) = track_paths("data/clip.bam", false);
        assert_eq!(pos, PathBuf::from("data/clip.pos.bw"));
        assert_eq!(neg, PathBuf::from("data/clip.neg.bw"));

        let (pos, neg) = track_paths("data/clip.bam", true);
        assert_eq!(pos, PathBuf::from("data/clip.norm.pos.bw"));
        assert_eq!(neg, PathBuf::from("data/clip.norm.neg.bw"));
    }
}
