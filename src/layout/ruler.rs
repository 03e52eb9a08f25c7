use crate::config::LayoutConfig;

use super::text::format_decimal;
use super::{RulerLayout, RulerTick, Segment, TextLabel};

/// Vertical scale for one row. One tick per drawing unit, a labelled major
/// tick every `major_every` ticks, spanning `upper_range` displayed units.
pub(super) fn layout_ruler(row_top: f64, upper_range: u32, config: &LayoutConfig) -> RulerLayout {
    let ruler = &config.ruler;
    let y0 = row_top + config.top_margin;
    let tick_count = (upper_range as f64 * config.tick_granularity).round() as usize;
    let axis = Segment {
        from: (ruler.x, y0),
        to: (
            ruler.x,
            y0 + upper_range as f64 * config.tick_granularity * config.ruler_ratio,
        ),
    };

    let major_every = ruler.major_every.max(1);
    let ticks = (0..=tick_count)
        .map(|i| {
            let y = y0 + i as f64 * config.ruler_ratio;
            let major = i % major_every == 0;
            let start_x = if major { ruler.major_tick_x } else { ruler.minor_tick_x };
            RulerTick {
                line: Segment {
                    from: (start_x, y),
                    to: (ruler.x, y),
                },
                major,
                label: major.then(|| TextLabel {
                    x: ruler.label_x,
                    y: y + ruler.label_dy,
                    text: format_decimal(i as f64 / config.tick_granularity, 1),
                }),
            }
        })
        .collect();

    RulerLayout {
        axis,
        unit_label: TextLabel {
            x: ruler.unit_label_x,
            y: y0 + ruler.unit_label_dy,
            text: ruler.unit_label.clone(),
        },
        ticks,
    }
}
