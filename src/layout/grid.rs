use crate::config::LayoutConfig;

use super::GridCell;

/// Row-major cells for `count` chromosomes, `columns` per row.
pub(super) fn assign_grid(count: usize, columns: usize) -> Vec<GridCell> {
    let columns = columns.max(1);
    (0..count)
        .map(|index| GridCell {
            index,
            row: index / columns,
            column: index % columns,
        })
        .collect()
}

pub(super) fn row_count(count: usize, columns: usize) -> usize {
    count.div_ceil(columns.max(1))
}

/// Rounds a length in displayed units up to whole units, then up to the next
/// multiple of five.
pub(super) fn ruler_ceiling(max_length_units: f64) -> u32 {
    let ticks = max_length_units.max(0.0).ceil() as u32;
    ticks.div_ceil(5) * 5
}

/// Ruler ceiling of every row, taken over all chromosomes in that row.
/// `lengths` are drawing-unit lengths in grid order.
pub(super) fn row_ranges(lengths: &[f64], config: &LayoutConfig) -> Vec<u32> {
    lengths
        .chunks(config.columns_per_row.max(1))
        .map(|row| {
            let tallest = row.iter().copied().fold(0.0_f64, f64::max);
            ruler_ceiling(tallest / config.tick_granularity)
        })
        .collect()
}

/// Top edge of each row. Each row starts below the previous ruler plus the
/// configured row spacing.
pub(super) fn row_tops(ranges: &[u32], config: &LayoutConfig) -> Vec<f64> {
    let mut tops = Vec::with_capacity(ranges.len());
    let mut top = config.origin_y;
    for (idx, _) in ranges.iter().enumerate() {
        if idx > 0 {
            let previous = ranges[idx - 1] as f64;
            top += config.top_margin
                + (previous + config.row_spacing) * config.tick_granularity * config.ruler_ratio;
        }
        tops.push(top);
    }
    tops
}

pub(super) fn column_x(column: usize, config: &LayoutConfig) -> f64 {
    config.first_column_x + column as f64 * config.column_spacing
}
