use crate::ir::Strand;

pub type Point = (f64, f64);

/// Resolved drawing plan for a whole figure. Every coordinate is in pixels.
#[derive(Debug, Clone)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub rows: Vec<RowLayout>,
    pub chromosomes: Vec<ChromosomeLayout>,
}

impl Layout {
    /// Chromosomes that sit in `row`, left to right.
    pub fn chromosomes_in_row(&self, row: usize) -> impl Iterator<Item = &ChromosomeLayout> {
        self.chromosomes.iter().filter(move |c| c.cell.row == row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub index: usize,
    pub row: usize,
    pub column: usize,
}

#[derive(Debug, Clone)]
pub struct RowLayout {
    pub index: usize,
    /// Top edge of the chromosome bodies in this row.
    pub top: f64,
    /// Ruler ceiling in displayed units (a multiple of five).
    pub upper_range: u32,
    pub ruler: RulerLayout,
}

#[derive(Debug, Clone)]
pub struct RulerLayout {
    pub axis: Segment,
    pub unit_label: TextLabel,
    pub ticks: Vec<RulerTick>,
}

#[derive(Debug, Clone)]
pub struct RulerTick {
    pub line: Segment,
    pub major: bool,
    pub label: Option<TextLabel>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorKind {
    Straight,
    Bent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Connector {
    Straight(Segment),
    Bent([Point; 4]),
}

impl Connector {
    pub fn kind(&self) -> ConnectorKind {
        match self {
            Connector::Straight(_) => ConnectorKind::Straight,
            Connector::Bent(_) => ConnectorKind::Bent,
        }
    }

    pub fn points(&self) -> Vec<Point> {
        match self {
            Connector::Straight(seg) => vec![seg.from, seg.to],
            Connector::Bent(points) => points.to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BodyRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rx: f64,
    pub ry: f64,
}

#[derive(Debug, Clone)]
pub struct ChromosomeLayout {
    pub name: String,
    pub cell: GridCell,
    /// Length in drawing units.
    pub length: f64,
    pub body: BodyRect,
    pub title: TextLabel,
    pub top_tick: Segment,
    pub top_label: TextLabel,
    pub features: Vec<FeaturePlacement>,
    pub terminal: TerminalPlacement,
}

#[derive(Debug, Clone)]
pub struct FeaturePlacement {
    pub name: String,
    pub strand: Strand,
    /// Position in drawing units.
    pub position: f64,
    /// Pixel row of the feature on the chromosome body.
    pub true_y: f64,
    /// Pixel row the label was placed on after collision avoidance.
    pub label_y: f64,
    pub left: Connector,
    pub right: Connector,
    pub position_label: TextLabel,
    pub name_label: TextLabel,
}

impl FeaturePlacement {
    pub fn kind(&self) -> ConnectorKind {
        self.left.kind()
    }
}

#[derive(Debug, Clone)]
pub struct TerminalPlacement {
    pub y: f64,
    pub connector: Connector,
    pub label: TextLabel,
}
