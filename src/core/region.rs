//! Genomic regions and strands
//!
//! Regions are half-open `[start, end)` intervals on a chromosome, carrying a
//! display name and a strand that decides which coverage track serves them.

use crate::core::error::{DensityError, DensityResult};
use std::fmt;
use std::str::FromStr;

/// Strand of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strand {
    Plus,
    Minus,
    #[default]
    Unstranded,
}

impl Strand {
    /// Parse strand from char
    ///
    /// # Examples
    /// ```
    /// use bigwig_density::core::Strand;
    /// assert_eq!(Strand::from_char('+'), Some(Strand::Plus));
    /// assert_eq!(Strand::from_char('-'), Some(Strand::Minus));
    /// assert_eq!(Strand::from_char('.'), Some(Strand::Unstranded));
    /// assert_eq!(Strand::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Strand::Plus),
            '-' => Some(Strand::Minus),
            '.' => Some(Strand::Unstranded),
            _ => None,
        }
    }

    /// Convert to char
    pub fn to_char(&self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
            Strand::Unstranded => '.',
        }
    }
}

impl FromStr for Strand {
    type Err = DensityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let strand = match (chars.next(), chars.next()) {
            (Some(c), None) => Strand::from_char(c),
            _ => None,
        };
        strand.ok_or_else(|| DensityError::InvalidStrand { strand: s.to_string() })
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A named genomic interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub chrom: String,
    /// 0-based start
    pub start: u64,
    /// Exclusive end
    pub end: u64,
    pub strand: Strand,
    pub name: String,
}

impl Region {
    /// Create a region named `chrom:start-end:strand`.
    ///
    /// Fails with [`DensityError::InvalidRange`] unless `end > start`.
    pub fn new(chrom: impl Into<String>, start: u64, end: u64, strand: Strand) -> DensityResult<Self> {
        let chrom = chrom.into();
        let name = format!("{}:{}-{}:{}", chrom, start, end, strand);
        Self::with_name(chrom, start, end, strand, name)
    }

    /// Create a region with an explicit display name
    pub fn with_name(
        chrom: impl Into<String>,
        start: u64,
        end: u64,
        strand: Strand,
        name: impl Into<String>,
    ) -> DensityResult<Self> {
        if end <= start {
            return Err(DensityError::InvalidRange { start, end });
        }
        Ok(Self {
            chrom: chrom.into(),
            start,
            end,
            strand,
            name: name.into(),
        })
    }

    /// Number of bases covered
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    /// Always false for a constructed region
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}:{}", self.chrom, self.start, self.end, self.strand)
    }
}
