use crate::layout::{ConnectorKind, Layout};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f64,
    pub height: f64,
    pub rows: Vec<RowDump>,
    pub chromosomes: Vec<ChromosomeDump>,
}

#[derive(Debug, Serialize)]
pub struct RowDump {
    pub index: usize,
    pub top: f64,
    pub upper_range: u32,
    pub ticks: usize,
}

#[derive(Debug, Serialize)]
pub struct ChromosomeDump {
    pub name: String,
    pub row: usize,
    pub column: usize,
    pub x: f64,
    pub y: f64,
    pub height: f64,
    pub length_label: String,
    pub terminal_bent: bool,
    pub features: Vec<FeatureDump>,
}

#[derive(Debug, Serialize)]
pub struct FeatureDump {
    pub name: String,
    pub strand: &'static str,
    pub position: f64,
    pub position_label: String,
    pub true_y: f64,
    pub label_y: f64,
    pub bent: bool,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let rows = layout
            .rows
            .iter()
            .map(|row| RowDump {
                index: row.index,
                top: row.top,
                upper_range: row.upper_range,
                ticks: row.ruler.ticks.len(),
            })
            .collect();

        let chromosomes = layout
            .chromosomes
            .iter()
            .map(|chrom| ChromosomeDump {
                name: chrom.name.clone(),
                row: chrom.cell.row,
                column: chrom.cell.column,
                x: chrom.body.x,
                y: chrom.body.y,
                height: chrom.body.height,
                length_label: chrom.terminal.label.text.clone(),
                terminal_bent: chrom.terminal.connector.kind() == ConnectorKind::Bent,
                features: chrom
                    .features
                    .iter()
                    .map(|feature| FeatureDump {
                        name: feature.name.clone(),
                        strand: feature.strand.as_str(),
                        position: feature.position,
                        position_label: feature.position_label.text.clone(),
                        true_y: feature.true_y,
                        label_y: feature.label_y,
                        bent: feature.kind() == ConnectorKind::Bent,
                    })
                    .collect(),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            rows,
            chromosomes,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::{Feature, Genome, Strand};
    use crate::layout::compute_layout;
    use crate::theme::Theme;

    #[test]
    fn dump_round_trips_through_json() {
        let mut genome = Genome::new();
        genome.insert_chromosome("chr1", 8_000_000);
        let feature = Feature {
            chromosome: "chr1".to_string(),
            start: 10,
            end: 20,
            name: "tiny".to_string(),
            strand: Strand::Reverse,
        };
        genome.push_feature(feature, "test", 1).unwrap();
        let config = LayoutConfig {
            fast_text_metrics: true,
            ..LayoutConfig::default()
        };
        let layout = compute_layout(&genome, &Theme::classic(), &config);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        write_layout_dump(&path, &layout).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["rows"][0]["upper_range"], 10);
        assert_eq!(value["chromosomes"][0]["name"], "chr1");
        assert_eq!(value["chromosomes"][0]["length_label"], "8.0");
        assert_eq!(value["chromosomes"][0]["features"][0]["name"], "tiny");
        assert_eq!(value["chromosomes"][0]["features"][0]["strand"], "-");
        assert_eq!(value["chromosomes"][0]["features"][0]["bent"], true);
    }
}
