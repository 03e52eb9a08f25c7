// Collision-avoiding label placement along one chromosome.
// Pure geometry: labels are pushed down, never up, so their rows are
// non-decreasing in processing order.

use crate::config::LayoutConfig;

use super::{Connector, ConnectorKind, Segment};

/// Running state of the placement fold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementState {
    /// Pixel row of the most recently placed label.
    pub last_placed_y: f64,
}

impl PlacementState {
    pub fn start(chromosome_top: f64, config: &LayoutConfig) -> Self {
        Self {
            last_placed_y: chromosome_top + config.top_margin + config.label_height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub true_y: f64,
    pub label_y: f64,
    pub kind: ConnectorKind,
}

/// One step of the fold. A feature whose true row lies below the last label
/// keeps its row and gets straight connectors; anything else is stacked one
/// `label_offset` under the last label and gets bent connectors.
pub fn place_label(
    state: PlacementState,
    true_y: f64,
    config: &LayoutConfig,
) -> (PlacementState, LabelPlacement) {
    let (label_y, kind) = if true_y > state.last_placed_y {
        (true_y + config.label_height, ConnectorKind::Straight)
    } else {
        (state.last_placed_y + config.label_offset, ConnectorKind::Bent)
    };
    (
        PlacementState {
            last_placed_y: label_y,
        },
        LabelPlacement {
            true_y,
            label_y,
            kind,
        },
    )
}

/// Folds [`place_label`] over true pixel rows given in ascending order.
pub fn place_labels<I>(
    chromosome_top: f64,
    true_ys: I,
    config: &LayoutConfig,
) -> Vec<LabelPlacement>
where
    I: IntoIterator<Item = f64>,
{
    true_ys
        .into_iter()
        .scan(PlacementState::start(chromosome_top, config), |state, y| {
            let (next, placement) = place_label(*state, y, config);
            *state = next;
            Some(placement)
        })
        .collect()
}

/// Horizontal extents of the connector stubs on either side of a body.
#[derive(Debug, Clone, Copy)]
pub(super) struct ConnectorColumns {
    pub lx1: f64,
    pub lx2: f64,
    pub rx1: f64,
    pub rx2: f64,
}

impl ConnectorColumns {
    pub(super) fn new(body_x: f64, config: &LayoutConfig) -> Self {
        let lx2 = body_x - config.connector_gap;
        let rx1 = body_x + config.chromosome_width + config.connector_gap;
        Self {
            lx1: lx2 - config.connector_length,
            lx2,
            rx1,
            rx2: rx1 + config.connector_length,
        }
    }

    /// Left stub: from the label row at `lx1` to the body at `lx2`.
    pub(super) fn left(
        &self,
        body_y: f64,
        label_row: f64,
        kind: ConnectorKind,
        config: &LayoutConfig,
    ) -> Connector {
        match kind {
            ConnectorKind::Straight => Connector::Straight(Segment {
                from: (self.lx1, body_y),
                to: (self.lx2, body_y),
            }),
            ConnectorKind::Bent => Connector::Bent([
                (self.lx1, label_row),
                (self.lx1 + config.connector_outer_bend, label_row),
                (self.lx2 - config.connector_inner_bend, body_y),
                (self.lx2, body_y),
            ]),
        }
    }

    /// Right stub: from the body at `rx1` to the label row at `rx2`.
    pub(super) fn right(
        &self,
        body_y: f64,
        label_row: f64,
        kind: ConnectorKind,
        config: &LayoutConfig,
    ) -> Connector {
        match kind {
            ConnectorKind::Straight => Connector::Straight(Segment {
                from: (self.rx1, body_y),
                to: (self.rx2, body_y),
            }),
            ConnectorKind::Bent => Connector::Bent([
                (self.rx1, body_y),
                (self.rx1 + config.connector_inner_bend, body_y),
                (self.rx2 - config.connector_outer_bend, label_row),
                (self.rx2, label_row),
            ]),
        }
    }
}
