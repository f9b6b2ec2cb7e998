//! bigwig-density CLI entry point
//!
//! Extracts per-base density for the regions of a BED file from stranded or
//! unstranded coverage tracks and writes one line per region.

use anyhow::{bail, Context};
use bigwig_density::core::{DensityError, DensitySource, EvaluatorConfig, RegionEvaluator, StrandedDensity, UnstrandedDensity};
use bigwig_density::formats::{self, NameStyle, NanFormat};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Missing-value spelling in the output (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum NanFormatArg {
    #[default]
    #[value(name = "nan")]
    Nan,
    #[value(name = "na")]
    Na,
    #[value(name = "empty")]
    Empty,
}

impl From<NanFormatArg> for NanFormat {
    fn from(arg: NanFormatArg) -> Self {
        match arg {
            NanFormatArg::Nan => NanFormat::Nan,
            NanFormatArg::Na => NanFormat::Na,
            NanFormatArg::Empty => NanFormat::Empty,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum NameStyleArg {
    /// chrom:start-end:strand
    #[default]
    #[value(name = "coords")]
    Coordinates,
    /// BED name column
    #[value(name = "bed")]
    BedName,
}

impl From<NameStyleArg> for NameStyle {
    fn from(arg: NameStyleArg) -> Self {
        match arg {
            NameStyleArg::Coordinates => NameStyle::Coordinates,
            NameStyleArg::BedName => NameStyle::BedName,
        }
    }
}

#[derive(Parser)]
#[command(name = "bigwig-density")]
#[command(about = "Per-base coverage density for genomic regions from BigWig tracks")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RegionArgs {
    /// BED3/BED6 file of regions, one output line per region
    #[arg(short = 'r', long = "regions-bed", alias = "regions_bed")]
    regions: PathBuf,
    /// Output file (optional, stdout if not specified)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    /// Keep NaN for positions without data instead of writing 0
    #[arg(long)]
    keep_nan: bool,
    /// How NaN values are written when --keep-nan is set
    #[arg(long = "nan-format", default_value = "nan")]
    nan_format: NanFormatArg,
    /// Region naming: coords (chrom:start-end:strand) or bed (name column)
    #[arg(long = "names", default_value = "coords")]
    names: NameStyleArg,
}

#[derive(Subcommand)]
enum Commands {
    /// Query positive/negative strand tracks
    Stranded {
        /// Positive strand track (.bw or .bg)
        #[arg(long)]
        pos: Option<PathBuf>,
        /// Negative strand track (.bw or .bg)
        #[arg(long)]
        neg: Option<PathBuf>,
        /// Indexed BAM file; locates <stem>.pos.bw / <stem>.neg.bw when tracks are not given
        #[arg(long)]
        bam: Option<PathBuf>,
        /// Look for RPM-normalized tracks (<stem>.norm.pos.bw) next to the BAM
        #[arg(long)]
        rpm: bool,
        /// Sample name (default: BAM file name)
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        regions: RegionArgs,
    },
    /// Query a single unstranded track
    Unstranded {
        /// Coverage track (.bw or .bg)
        #[arg(long)]
        track: PathBuf,
        /// Indexed BAM file for normalization statistics
        #[arg(long)]
        bam: Option<PathBuf>,
        /// Sample name (default: BAM file name)
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        regions: RegionArgs,
    },
    /// Print mapped reads and the RPM pseudocount of a BAM file
    Info {
        /// Indexed BAM file
        bam: PathBuf,
        /// Sample name (default: BAM file name)
        #[arg(long)]
        name: Option<String>,
    },
}

fn resolve_tracks(
    pos: Option<PathBuf>,
    neg: Option<PathBuf>,
    bam: Option<&Path>,
    rpm: bool,
) -> anyhow::Result<(PathBuf, PathBuf)> {
    match (pos, neg, bam) {
        (Some(pos), Some(neg), _) => Ok((pos, neg)),
        (None, None, Some(bam)) => Ok(formats::track_paths(bam, rpm)),
        _ => bail!("provide both --pos and --neg, or --bam to derive the track paths"),
    }
}

/// Log the RPM pseudocount, warning when the alignment cannot normalize
fn report_pseudocount<S: DensitySource + ?Sized>(source: &S) -> Option<f64> {
    match source.pseudocount() {
        Ok(pseudocount) => {
            info!("Pseudocount (1 read in RPM): {}", pseudocount);
            Some(pseudocount)
        }
        Err(DensityError::ZeroMappedReads) => {
            let name = source.alignment().map(|a| a.name()).unwrap_or("alignment");
            warn!("{} has zero mapped reads, RPM values cannot be converted", name);
            None
        }
        Err(_) => None,
    }
}

fn run_regions<S: DensitySource>(source: &mut S, args: &RegionArgs, start: Instant) -> anyhow::Result<()> {
    let regions = formats::read_regions(&args.regions, args.names.into())
        .with_context(|| format!("Failed to read regions from {}", args.regions.display()))?;
    info!("Loaded {} regions from {}", regions.len(), args.regions.display());

    report_pseudocount(&*source);

    let evaluator = RegionEvaluator::new(EvaluatorConfig {
        zero_missing: !args.keep_nan,
    });
    let densities = evaluator.evaluate(source, &regions)?;

    formats::write_densities_to(args.output.as_ref(), &densities, args.nan_format.into())
        .context("Failed to write densities")?;

    eprintln!("\n=== Density Statistics ===");
    eprintln!("Regions:         {}", densities.len());
    eprintln!("Bases:           {}", densities.values().map(Vec::len).sum::<usize>());
    eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    let start = Instant::now();

    match cli.command {
        Commands::Stranded { pos, neg, bam, rpm, name, regions } => {
            let (pos, neg) = resolve_tracks(pos, neg, bam.as_deref(), rpm)?;
            eprintln!("Opening stranded tracks: {:?} / {:?}", pos, neg);
            let mut density = StrandedDensity::open(&pos, &neg, bam.as_deref(), name.as_deref())?;
            run_regions(&mut density, &regions, start)?;
        }

        Commands::Unstranded { track, bam, name, regions } => {
            eprintln!("Opening unstranded track: {:?}", track);
            let mut density = UnstrandedDensity::open(&track, bam.as_deref(), name.as_deref())?;
            run_regions(&mut density, &regions, start)?;
        }

        Commands::Info { bam, name } => {
            let handle = formats::open_alignment(&bam, name.as_deref())?;
            println!("name\t{}", handle.name());
            println!("mapped\t{}", handle.mapped_count());
            match handle.norm_constant() {
                Ok(pseudocount) => println!("pseudocount\t{}", pseudocount),
                Err(e) => bail!("{}: {}", bam.display(), e),
            }
        }
    }

    Ok(())
}
