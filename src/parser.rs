use crate::error::{ChromLocError, Result};
use crate::ir::{Feature, Genome, Strand};
use std::path::Path;

const LENGTH_COLUMNS: usize = 2;
const FEATURE_COLUMNS: usize = 5;
/// Longest accepted chromosome, in base pairs. Well above any sequenced
/// chromosome while keeping the ruler to a drawable number of ticks.
pub const MAX_CHROMOSOME_LENGTH: u64 = 10_000_000_000;

/// Reads the chromosome length file and the feature position file into a
/// [`Genome`].
pub fn read_genome(length_path: &Path, position_path: &Path) -> Result<Genome> {
    let lengths = read_input(length_path)?;
    let positions = read_input(position_path)?;
    let mut genome = parse_lengths(&lengths, &length_path.display().to_string())?;
    log::info!(
        "Read {} chromosome lengths from {}",
        genome.chromosome_count(),
        length_path.display()
    );
    parse_features(&positions, &position_path.display().to_string(), &mut genome)?;
    log::info!(
        "Read {} features from {}",
        genome.feature_count(),
        position_path.display()
    );
    Ok(genome)
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ChromLocError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses `name<TAB>length` rows.
pub fn parse_lengths(input: &str, source_name: &str) -> Result<Genome> {
    let mut genome = Genome::new();
    for (line_no, fields) in data_rows(input) {
        if fields.len() < LENGTH_COLUMNS {
            return Err(ChromLocError::malformed(
                source_name,
                line_no,
                format!(
                    "expected {LENGTH_COLUMNS} tab-separated columns, found {}",
                    fields.len()
                ),
            ));
        }
        let name = fields[0].trim();
        if name.is_empty() {
            return Err(ChromLocError::malformed(source_name, line_no, "empty chromosome name"));
        }
        let length = parse_coordinate(fields[1], "length", source_name, line_no)?;
        if length == 0 {
            return Err(ChromLocError::malformed(
                source_name,
                line_no,
                format!("length of '{name}' must be positive"),
            ));
        }
        if length > MAX_CHROMOSOME_LENGTH {
            return Err(ChromLocError::malformed(
                source_name,
                line_no,
                format!("length of '{name}' exceeds {MAX_CHROMOSOME_LENGTH} bp"),
            ));
        }
        if let Some(previous) = genome.insert_chromosome(name, length) {
            log::warn!(
                "{source_name} line {line_no}: chromosome '{name}' listed again, replacing length {} with {length}",
                previous.length
            );
        }
    }
    Ok(genome)
}

/// Parses `chrom<TAB>start<TAB>end<TAB>name<TAB>strand` rows into `genome`.
/// Every referenced chromosome must already be present.
pub fn parse_features(input: &str, source_name: &str, genome: &mut Genome) -> Result<()> {
    for (line_no, fields) in data_rows(input) {
        if fields.len() < FEATURE_COLUMNS {
            return Err(ChromLocError::malformed(
                source_name,
                line_no,
                format!(
                    "expected {FEATURE_COLUMNS} tab-separated columns, found {}",
                    fields.len()
                ),
            ));
        }
        let chromosome = fields[0].trim();
        if genome.chromosome(chromosome).is_none() {
            return Err(ChromLocError::UnknownChromosome {
                name: chromosome.to_string(),
                source_name: source_name.to_string(),
                line: line_no,
            });
        }
        let start = parse_coordinate(fields[1], "start", source_name, line_no)?;
        let end = parse_coordinate(fields[2], "end", source_name, line_no)?;
        if start > end {
            return Err(ChromLocError::malformed(
                source_name,
                line_no,
                format!("start {start} is greater than end {end}"),
            ));
        }
        genome.push_feature(
            Feature {
                chromosome: chromosome.to_string(),
                start,
                end,
                name: fields[3].trim().to_string(),
                strand: Strand::from_token(fields[4]),
            },
            source_name,
            line_no,
        )?;
    }
    Ok(())
}

/// Non-empty, non-comment rows split on tabs, with 1-based line numbers.
fn data_rows(input: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    input.lines().enumerate().filter_map(|(idx, line)| {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            return None;
        }
        Some((idx + 1, line.split('\t').collect()))
    })
}

fn parse_coordinate(raw: &str, field: &str, source_name: &str, line_no: usize) -> Result<u64> {
    raw.trim().parse::<u64>().map_err(|_| {
        ChromLocError::malformed(
            source_name,
            line_no,
            format!("{field} '{}' is not a non-negative integer", raw.trim()),
        )
    })
}
