use crate::config::load_config;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::parser::read_genome;
use crate::render::{render_svg, write_output_png, write_output_svg};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "chromloc",
    version,
    about = "Draw the location of genes, SNPs or markers along chromosomes",
    long_about = "Draws the location of genomic features on each chromosome and integrates all \
chromosomes into a single figure. Inputs are a tab-delimited chromosome length file \
(name, length) and a tab-delimited feature file (chromosome, start, end, name, strand). \
Features should be sparse enough to be read clearly."
)]
pub struct Args {
    /// Chromosome length file
    #[arg(short = 'l', long = "length")]
    pub length: PathBuf,

    /// File containing feature position info
    #[arg(short = 'p', long = "position")]
    pub position: PathBuf,

    /// Prefix of the output filename
    #[arg(short = 'o', long = "outfile")]
    pub outfile: String,

    /// Zoom ratio (pixels per drawing unit) for the length scale
    #[arg(short = 'r', long = "rulerRatio")]
    pub ruler_ratio: f64,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, layout)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Chromosomes per row
    #[arg(short = 'n', long = "columns")]
    pub columns: Option<usize>,

    /// Also write the resolved layout as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose, args.quiet);
    run_with_args(&args)
}

pub fn run_with_args(args: &Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    config.layout.ruler_ratio = args.ruler_ratio;
    if let Some(columns) = args.columns {
        config.layout.columns_per_row = columns;
    }
    config.layout.validate()?;

    log::info!("Reading chromosome lengths and feature positions");
    let genome = read_genome(&args.length, &args.position)?;
    if genome.is_empty() {
        log::warn!("no chromosomes found in {}", args.length.display());
    } else if genome.feature_count() == 0 {
        log::warn!("no features found in {}", args.position.display());
    }

    log::info!("Drawing feature positions");
    let layout = compute_layout(&genome, &config.theme, &config.layout);
    let svg = render_svg(&layout, &config.theme);

    if let Some(dump_path) = &args.dump_layout {
        write_layout_dump(dump_path, &layout)
            .with_context(|| format!("failed to write layout dump {}", dump_path.display()))?;
        log::info!("Layout written to {}", dump_path.display());
    }

    let output = output_path(&args.outfile, args.output_format);
    match args.output_format {
        OutputFormat::Svg => write_output_svg(&svg, Some(&output))?,
        OutputFormat::Png => write_output_png(&svg, &output, &config.render)?,
    }
    log::info!("Result written to {}", output.display());
    Ok(())
}

fn output_path(prefix: &str, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!("{prefix}.{}", format.extension()))
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Error
    } else {
        match verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_secs()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn output_path_appends_extension_to_prefix() {
        assert_eq!(output_path("out/figure", OutputFormat::Svg), PathBuf::from("out/figure.svg"));
        assert_eq!(output_path("a.b", OutputFormat::Png), PathBuf::from("a.b.png"));
    }

    #[test]
    fn missing_required_arguments_are_a_usage_error() {
        let err = Args::try_parse_from(["chromloc", "-l", "len.txt", "-p", "pos.txt"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn parses_long_flag_names() {
        let args = Args::try_parse_from([
            "chromloc",
            "--length",
            "len.txt",
            "--position",
            "pos.txt",
            "--outfile",
            "fig",
            "--rulerRatio",
            "1.5",
            "--columns",
            "3",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.ruler_ratio, 1.5);
        assert_eq!(args.columns, Some(3));
        assert_eq!(args.verbose, 2);
        assert_eq!(args.output_format, OutputFormat::Svg);
    }

    #[test]
    fn end_to_end_writes_svg_and_dump() {
        let dir = tempfile::tempdir().unwrap();
        let length = write(dir.path(), "len.txt", "chr1\t12000000\nchr2\t3000000\n");
        let position = write(
            dir.path(),
            "pos.txt",
            "chr1\t1000000\t1002000\tGeneA\t+\nchr1\t1003000\t1004000\tGeneB\t-\n",
        );
        let prefix = dir.path().join("figure");
        let dump = dir.path().join("layout.json");
        let args = Args::try_parse_from([
            "chromloc".to_string(),
            "-l".to_string(),
            length.display().to_string(),
            "-p".to_string(),
            position.display().to_string(),
            "-o".to_string(),
            prefix.display().to_string(),
            "-r".to_string(),
            "2".to_string(),
            "--dumpLayout".to_string(),
            dump.display().to_string(),
        ])
        .unwrap();
        run_with_args(&args).unwrap();
        let svg = std::fs::read_to_string(dir.path().join("figure.svg")).unwrap();
        assert!(svg.contains("GeneA"));
        assert!(svg.contains("GeneB"));
        assert!(dump.exists());
    }

    #[test]
    fn unknown_chromosome_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let length = write(dir.path(), "len.txt", "chr1\t1000\n");
        let position = write(dir.path(), "pos.txt", "chrZ\t1\t2\tG\t+\n");
        let prefix = dir.path().join("figure");
        let args = Args::try_parse_from([
            "chromloc".to_string(),
            "-l".to_string(),
            length.display().to_string(),
            "-p".to_string(),
            position.display().to_string(),
            "-o".to_string(),
            prefix.display().to_string(),
            "-r".to_string(),
            "1".to_string(),
        ])
        .unwrap();
        let err = run_with_args(&args).unwrap_err();
        assert!(err.to_string().contains("unknown chromosome 'chrZ'"));
        assert!(!dir.path().join("figure.svg").exists());
    }

    #[test]
    fn non_positive_ruler_ratio_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let length = write(dir.path(), "len.txt", "chr1\t1000\n");
        let position = write(dir.path(), "pos.txt", "");
        let args = Args::try_parse_from([
            "chromloc".to_string(),
            "-l".to_string(),
            length.display().to_string(),
            "-p".to_string(),
            position.display().to_string(),
            "-o".to_string(),
            dir.path().join("fig").display().to_string(),
            "-r".to_string(),
            "0".to_string(),
        ])
        .unwrap();
        assert!(run_with_args(&args).is_err());
    }
}
