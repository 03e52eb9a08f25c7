mod grid;
pub(crate) mod placement;
mod ruler;
mod text;
pub(crate) mod types;
pub use placement::{LabelPlacement, PlacementState, place_label, place_labels};
pub use types::*;
use grid::*;
use placement::ConnectorColumns;
use ruler::layout_ruler;
use text::{label_width, title_case};

pub(crate) use text::format_decimal;

use crate::config::LayoutConfig;
use crate::ir::{Chromosome, Feature, Genome};
use crate::theme::Theme;

const TITLE_OFFSET: f64 = 3.0;
const ZERO_LABEL_DX: f64 = -14.0;

/// Converts source units (base pairs) to drawing units.
pub fn to_drawing_units(source: u64, config: &LayoutConfig) -> f64 {
    source as f64 / config.mb_scale * config.tick_granularity
}

/// Inverse of [`to_drawing_units`].
pub fn to_source_units(drawing: f64, config: &LayoutConfig) -> f64 {
    drawing / config.tick_granularity * config.mb_scale
}

/// Drawing position of a feature: its integer midpoint in drawing units.
pub fn feature_position(feature: &Feature, config: &LayoutConfig) -> f64 {
    to_drawing_units(feature.midpoint(), config)
}

pub fn compute_layout(genome: &Genome, theme: &Theme, config: &LayoutConfig) -> Layout {
    let chromosomes: Vec<&Chromosome> = genome.chromosomes().collect();
    let cells = assign_grid(chromosomes.len(), config.columns_per_row);
    let lengths: Vec<f64> = chromosomes
        .iter()
        .map(|chrom| to_drawing_units(chrom.length, config))
        .collect();
    let ranges = row_ranges(&lengths, config);
    let tops = row_tops(&ranges, config);
    debug_assert_eq!(ranges.len(), row_count(chromosomes.len(), config.columns_per_row));
    log::debug!("row ruler ranges: {ranges:?}");

    let rows: Vec<RowLayout> = ranges
        .iter()
        .zip(&tops)
        .enumerate()
        .map(|(index, (&upper_range, &top))| RowLayout {
            index,
            top,
            upper_range,
            ruler: layout_ruler(top, upper_range, config),
        })
        .collect();

    let chromosome_layouts: Vec<ChromosomeLayout> = chromosomes
        .iter()
        .zip(cells)
        .zip(&lengths)
        .map(|((chrom, cell), &length)| {
            layout_chromosome(
                chrom,
                genome.features(&chrom.name),
                cell,
                length,
                tops[cell.row],
                config,
            )
        })
        .collect();

    let (width, height) = canvas_extent(&rows, &chromosome_layouts, theme, config);
    Layout {
        width,
        height,
        rows,
        chromosomes: chromosome_layouts,
    }
}

fn layout_chromosome(
    chrom: &Chromosome,
    features: &[Feature],
    cell: GridCell,
    length: f64,
    top: f64,
    config: &LayoutConfig,
) -> ChromosomeLayout {
    let x = column_x(cell.column, config);
    let columns = ConnectorColumns::new(x, config);
    let y0 = top + config.top_margin;

    let mut positioned: Vec<(f64, &Feature)> = features
        .iter()
        .map(|feature| (feature_position(feature, config), feature))
        .collect();
    positioned.sort_by(|a, b| a.0.total_cmp(&b.0));

    let placements = place_labels(
        top,
        positioned.iter().map(|(position, _)| y0 + position * config.ruler_ratio),
        config,
    );
    let feature_layouts: Vec<FeaturePlacement> = positioned
        .iter()
        .zip(&placements)
        .map(|(&(position, feature), placement)| {
            place_feature(feature, position, placement, &columns, config)
        })
        .collect();

    let last_position = positioned.last().map(|(position, _)| *position);
    log::debug!(
        "{}: {} features, {} stacked",
        chrom.name,
        feature_layouts.len(),
        feature_layouts
            .iter()
            .filter(|f| f.kind() == ConnectorKind::Bent)
            .count()
    );

    ChromosomeLayout {
        name: chrom.name.clone(),
        cell,
        length,
        body: BodyRect {
            x,
            y: top,
            width: config.chromosome_width,
            height: length * config.ruler_ratio + config.top_margin + config.bottom_margin,
            rx: config.corner_rx,
            ry: config.corner_ry,
        },
        title: TextLabel {
            x: x - TITLE_OFFSET,
            y: top - TITLE_OFFSET,
            text: title_case(&chrom.name),
        },
        top_tick: Segment {
            from: (columns.lx1, y0),
            to: (columns.lx2, y0),
        },
        top_label: TextLabel {
            x: x + ZERO_LABEL_DX,
            y: y0 + config.label_height,
            text: "0".to_string(),
        },
        features: feature_layouts,
        terminal: place_terminal(top, length, last_position, &columns, config),
    }
}

fn place_feature(
    feature: &Feature,
    position: f64,
    placement: &LabelPlacement,
    columns: &ConnectorColumns,
    config: &LayoutConfig,
) -> FeaturePlacement {
    let label_y = placement.label_y;
    FeaturePlacement {
        name: feature.name.clone(),
        strand: feature.strand,
        position,
        true_y: placement.true_y,
        label_y,
        left: columns.left(placement.true_y, label_y, placement.kind, config),
        right: columns.right(placement.true_y, label_y, placement.kind, config),
        position_label: TextLabel {
            x: columns.lx1 + config.position_label_dx,
            y: label_y,
            text: format_decimal(position / config.tick_granularity, 2),
        },
        name_label: TextLabel {
            x: columns.rx2 + config.name_label_dx,
            y: label_y,
            text: feature.name.clone(),
        },
    }
}

/// Bottom tick and total-length label. The tick bends down when the last
/// feature sits within the collision threshold of the chromosome end.
fn place_terminal(
    top: f64,
    length: f64,
    last_position: Option<f64>,
    columns: &ConnectorColumns,
    config: &LayoutConfig,
) -> TerminalPlacement {
    let y_end = top + length * config.ruler_ratio + config.top_margin;
    let crowded =
        last_position.is_some_and(|position| length - position < config.collision_threshold);
    let (connector, label_y) = if crowded {
        let row = y_end + config.label_offset;
        (
            columns.left(y_end, row, ConnectorKind::Bent, config),
            y_end + config.terminal_bent_label_dy,
        )
    } else {
        (
            columns.left(y_end, y_end, ConnectorKind::Straight, config),
            y_end + config.label_height,
        )
    };
    TerminalPlacement {
        y: y_end,
        connector,
        label: TextLabel {
            x: columns.lx1 + config.position_label_dx,
            y: label_y,
            text: format_decimal(length / config.tick_granularity, 2),
        },
    }
}

fn canvas_extent(
    rows: &[RowLayout],
    chromosomes: &[ChromosomeLayout],
    theme: &Theme,
    config: &LayoutConfig,
) -> (f64, f64) {
    let font = theme.font_size as f64;
    let mut right = config.ruler.x;
    let mut bottom = config.origin_y;

    for row in rows {
        bottom = bottom.max(row.ruler.axis.to.1 + config.ruler.label_dy + font);
    }
    for chrom in chromosomes {
        right = right.max(chrom.title.x + label_width(&chrom.title.text, theme, config));
        right = right.max(chrom.body.x + chrom.body.width);
        bottom = bottom.max(chrom.body.y + chrom.body.height);
        bottom = bottom.max(chrom.terminal.label.y + font);
        for feature in &chrom.features {
            let label_right =
                feature.name_label.x + label_width(&feature.name_label.text, theme, config);
            right = right.max(label_right);
            bottom = bottom.max(feature.label_y + font);
        }
    }

    (
        (right + config.canvas_padding).ceil(),
        (bottom + config.canvas_padding).ceil(),
    )
}
