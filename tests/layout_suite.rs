use std::path::{Path, PathBuf};

use chromloc::layout::ConnectorKind;
use chromloc::{Layout, LayoutConfig, Theme, compute_layout, read_genome, render_svg};

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
}

fn fixture_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn layout_fixture(name: &str, ruler_ratio: f64) -> Layout {
    let dir = fixture_dir(name);
    let genome = read_genome(&dir.join("lengths.txt"), &dir.join("positions.txt"))
        .expect("fixture read failed");
    let config = LayoutConfig {
        ruler_ratio,
        fast_text_metrics: true,
        ..LayoutConfig::default()
    };
    compute_layout(&genome, &Theme::classic(), &config)
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    for name in ["rice", "sparse"] {
        let layout = layout_fixture(name, 1.0);
        let svg = render_svg(&layout, &Theme::classic());
        assert_valid_svg(&svg, name);
    }
}

#[test]
fn rice_wraps_into_two_rows() {
    let layout = layout_fixture("rice", 1.0);
    assert_eq!(layout.chromosomes.len(), 10);
    assert_eq!(layout.rows.len(), 2);
    let chr08 = &layout.chromosomes[7];
    assert_eq!(chr08.name, "chr08");
    assert_eq!((chr08.cell.row, chr08.cell.column), (1, 0));
    // chr01 is 43.27 Mb, chr08 is 28.44 Mb.
    assert_eq!(layout.rows[0].upper_range, 45);
    assert_eq!(layout.rows[1].upper_range, 30);
}

#[test]
fn rice_stacks_clustered_labels() {
    let layout = layout_fixture("rice", 1.0);
    let chr03 = layout
        .chromosomes
        .iter()
        .find(|c| c.name == "chr03")
        .unwrap();
    let kinds: Vec<ConnectorKind> = chr03.features.iter().map(|f| f.kind()).collect();
    assert_eq!(
        kinds,
        vec![ConnectorKind::Straight, ConnectorKind::Bent, ConnectorKind::Bent]
    );
    let ys: Vec<f64> = chr03.features.iter().map(|f| f.label_y).collect();
    assert!((ys[1] - ys[0] - 7.0).abs() < 1e-9);
    assert!((ys[2] - ys[1] - 7.0).abs() < 1e-9);
}

#[test]
fn label_rows_are_monotonic_for_every_chromosome() {
    for ratio in [0.5, 1.0, 3.0] {
        let layout = layout_fixture("rice", ratio);
        for chrom in &layout.chromosomes {
            for pair in chrom.features.windows(2) {
                assert!(pair[0].position <= pair[1].position, "{}", chrom.name);
                assert!(pair[0].label_y <= pair[1].label_y, "{}", chrom.name);
            }
        }
    }
}

#[test]
fn feature_at_chromosome_end_bends_terminal() {
    let layout = layout_fixture("rice", 1.0);
    let chr10 = layout.chromosomes.last().unwrap();
    assert_eq!(chr10.name, "chr10");
    assert_eq!(chr10.terminal.connector.kind(), ConnectorKind::Bent);
    assert_eq!(chr10.terminal.label.text, "23.21");
}

#[test]
fn sparse_fixture_draws_featureless_chromosomes() {
    let layout = layout_fixture("sparse", 1.0);
    let chr_c = layout
        .chromosomes
        .iter()
        .find(|c| c.name == "chrC")
        .unwrap();
    assert!(chr_c.features.is_empty());
    assert_eq!(chr_c.terminal.label.text, "0.8");
    let svg = render_svg(&layout, &Theme::classic());
    assert!(svg.contains(">ChrC</text>"));
    assert!(svg.contains(">markerB2</text>"));
    assert!(svg.contains(">12.5</text>"));
}
