//! Density table output
//!
//! Writes a [`DensityMap`] as tab-separated text, one region per line:
//! the region name followed by its comma-separated values.

use crate::core::io::DEFAULT_BUFFER_SIZE;
use crate::core::DensityMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// How missing values are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NanFormat {
    #[default]
    Nan,
    Na,
    Empty,
}

impl NanFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            NanFormat::Nan => "nan",
            NanFormat::Na => "NA",
            NanFormat::Empty => "",
        }
    }
}

/// Write one line per region
pub fn write_densities<W: Write>(
    writer: &mut W,
    densities: &DensityMap,
    nan_format: NanFormat,
) -> io::Result<()> {
    for (name, values) in densities {
        write!(writer, "{}\t", name)?;
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                writer.write_all(b",")?;
            }
            if v.is_nan() {
                writer.write_all(nan_format.as_str().as_bytes())?;
            } else {
                write!(writer, "{}", v)?;
            }
        }
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Write densities to `path`, or to stdout when `path` is `None`
pub fn write_densities_to<P: AsRef<Path>>(
    path: Option<P>,
    densities: &DensityMap,
    nan_format: NanFormat,
) -> io::Result<()> {
    match path {
        Some(path) => {
            let mut out = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, File::create(path.as_ref())?);
            write_densities(&mut out, densities, nan_format)?;
            out.flush()
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_densities(&mut out, densities, nan_format)?;
            out.flush()
        }
    }
}
