//! BED region reader
//!
//! Reads BED3/BED6 region files into [`Region`]s. The strand column is
//! checked here, so an unknown strand token fails while the region list is
//! parsed rather than during a query.

use crate::core::io::{is_header_line, open_text, LineIterator};
use crate::core::{Region, Strand};
use memchr::memchr;
use std::io::BufRead;
use std::path::Path;

/// Zero-copy BED record view for parsing
/// Only parses coordinate fields immediately, other fields are kept as byte slices
pub struct BedRecordView<'a> {
    /// Original line bytes
    line: &'a [u8],
    /// Chromosome name
    pub chrom: &'a str,
    /// Start position (0-based)
    pub start: u64,
    /// End position
    pub end: u64,
    /// Field boundaries (start, end) for lazy access
    field_bounds: Vec<(usize, usize)>,
}

impl<'a> BedRecordView<'a> {
    /// Parse a BED line with minimal allocation
    pub fn parse(line: &'a [u8]) -> Result<Self, BedParseError> {
        if line.is_empty() {
            return Err(BedParseError::EmptyLine);
        }

        let mut field_bounds = Vec::with_capacity(6);
        let mut start_pos = 0;
        loop {
            match memchr(b'\t', &line[start_pos..]) {
                Some(tab_pos) => {
                    field_bounds.push((start_pos, start_pos + tab_pos));
                    start_pos += tab_pos + 1;
                }
                None => {
                    field_bounds.push((start_pos, line.len()));
                    break;
                }
            }
        }

        if field_bounds.len() < 3 {
            return Err(BedParseError::TooFewFields {
                expected: 3,
                found: field_bounds.len(),
            });
        }

        let chrom = field_str(line, field_bounds[0], "chrom")?;
        let start_str = field_str(line, field_bounds[1], "start")?;
        let start: u64 = start_str
            .parse()
            .map_err(|_| BedParseError::InvalidNumber("start", start_str.to_string()))?;
        let end_str = field_str(line, field_bounds[2], "end")?;
        let end: u64 = end_str
            .parse()
            .map_err(|_| BedParseError::InvalidNumber("end", end_str.to_string()))?;

        Ok(Self {
            line,
            chrom,
            start,
            end,
            field_bounds,
        })
    }

    /// Get the number of fields
    pub fn field_count(&self) -> usize {
        self.field_bounds.len()
    }

    /// Get field as string slice (lazy access)
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.field_bounds
            .get(index)
            .and_then(|(start, end)| std::str::from_utf8(&self.line[*start..*end]).ok())
    }

    /// Get name field (field 3) if present
    pub fn name(&self) -> Option<&'a str> {
        self.field(3)
    }

    /// Strand column (field 5); BED3/BED4/BED5 records are unstranded
    pub fn strand(&self) -> Result<Strand, BedParseError> {
        match self.field(5) {
            Some(token) => {
                let token = token.trim_end();
                token
                    .parse()
                    .map_err(|_| BedParseError::InvalidStrand(token.to_string()))
            }
            None => Ok(Strand::Unstranded),
        }
    }

    /// Check if this is a BED6 record
    pub fn is_bed6(&self) -> bool {
        self.field_count() >= 6
    }

    /// Convert to a region named according to `style`
    pub fn to_region(&self, style: NameStyle) -> Result<Region, BedParseError> {
        let strand = self.strand()?;
        if self.end <= self.start {
            return Err(BedParseError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }

        let region = match (style, self.name()) {
            (NameStyle::BedName, Some(name)) if !name.is_empty() && name != "." => {
                Region::with_name(self.chrom, self.start, self.end, strand, name)
            }
            _ => Region::new(self.chrom, self.start, self.end, strand),
        };
        region.map_err(|_| BedParseError::InvalidRange {
            start: self.start,
            end: self.end,
        })
    }
}

fn field_str<'a>(line: &'a [u8], (start, end): (usize, usize), what: &'static str) -> Result<&'a str, BedParseError> {
    std::str::from_utf8(&line[start..end]).map_err(|_| BedParseError::InvalidUtf8(what))
}

/// How regions read from BED are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameStyle {
    /// `chrom:start-end:strand`
    #[default]
    Coordinates,
    /// The BED name column, falling back to coordinates when absent
    BedName,
}

/// BED parsing error
#[derive(Debug, thiserror::Error)]
pub enum BedParseError {
    #[error("Empty line")]
    EmptyLine,

    #[error("Too few fields: expected at least {expected}, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("Invalid UTF-8 in field: {0}")]
    InvalidUtf8(&'static str),

    #[error("Invalid number in field {0}: {1}")]
    InvalidNumber(&'static str, String),

    #[error("Invalid strand '{0}': expected '+', '-' or '.'")]
    InvalidStrand(String),

    #[error("Invalid interval: end ({end}) must be greater than start ({start})")]
    InvalidRange { start: u64, end: u64 },
}

/// Error reading a region file
#[derive(Debug, thiserror::Error)]
pub enum RegionFileError {
    #[error("Line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: BedParseError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse one BED line into a region
pub fn parse_region_line(line: &str, style: NameStyle) -> Result<Region, BedParseError> {
    BedRecordView::parse(line.trim_end().as_bytes())?.to_region(style)
}

/// Read regions from BED text, in file order
pub fn read_regions_from<R: BufRead>(reader: R, style: NameStyle) -> Result<Vec<Region>, RegionFileError> {
    let mut lines = LineIterator::new(reader);
    let mut regions = Vec::new();

    while let Some(line) = lines.next_line() {
        let line = line?;
        if is_header_line(line) {
            continue;
        }
        let region = parse_region_line(line, style).map_err(|source| RegionFileError::Line {
            line: lines.line_number(),
            source,
        })?;
        regions.push(region);
    }

    Ok(regions)
}

/// Read regions from a BED file (plain, gzip or bzip2)
pub fn read_regions<P: AsRef<Path>>(path: P, style: NameStyle) -> Result<Vec<Region>, RegionFileError> {
    read_regions_from(open_text(path)?, style)
}
