use crate::config::RenderConfig;
use crate::layout::{ChromosomeLayout, Connector, Layout, RulerLayout, Segment, TextLabel};
use crate::theme::Theme;
use anyhow::{Context, Result};
use std::path::Path;

pub fn render_svg(layout: &Layout, theme: &Theme) -> String {
    let mut svg = String::new();
    let width = layout.width;
    let height = layout.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    if let Some(background) = &theme.background {
        svg.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            escape_xml(background)
        ));
    }
    svg.push_str(&format!(
        "<g font-family=\"{}\" font-size=\"{}\" fill=\"{}\">",
        escape_xml(&theme.font_family),
        theme.font_size,
        escape_xml(&theme.text_color)
    ));

    for chrom in &layout.chromosomes {
        if chrom.cell.column == 0
            && let Some(row) = layout.rows.get(chrom.cell.row)
        {
            push_ruler(&mut svg, &row.ruler, theme);
        }
        push_chromosome(&mut svg, chrom, theme);
    }

    svg.push_str("</g></svg>");
    svg
}

fn push_ruler(svg: &mut String, ruler: &RulerLayout, theme: &Theme) {
    let stroke = (theme.ruler_color.as_str(), theme.ruler_width);
    push_line(svg, &ruler.axis, stroke);
    push_text(svg, &ruler.unit_label);
    for tick in &ruler.ticks {
        push_line(svg, &tick.line, stroke);
        if let Some(label) = &tick.label {
            push_text(svg, label);
        }
    }
}

fn push_chromosome(svg: &mut String, chrom: &ChromosomeLayout, theme: &Theme) {
    let body = &chrom.body;
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{}\" ry=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" opacity=\"{}\"/>",
        body.x,
        body.y,
        body.width,
        body.height,
        body.rx,
        body.ry,
        escape_xml(&theme.chromosome_fill),
        escape_xml(&theme.chromosome_border),
        theme.chromosome_border_width,
        theme.chromosome_opacity
    ));
    push_text(svg, &chrom.title);

    let stroke = (theme.connector_color.as_str(), theme.connector_width);
    push_line(svg, &chrom.top_tick, stroke);
    push_text(svg, &chrom.top_label);

    for feature in &chrom.features {
        push_connector(svg, &feature.left, stroke);
        push_text(svg, &feature.position_label);
        push_connector(svg, &feature.right, stroke);
        push_text(svg, &feature.name_label);
    }

    push_connector(svg, &chrom.terminal.connector, stroke);
    push_text(svg, &chrom.terminal.label);
}

fn push_connector(svg: &mut String, connector: &Connector, stroke: (&str, f32)) {
    match connector {
        Connector::Straight(segment) => push_line(svg, segment, stroke),
        Connector::Bent(points) => {
            svg.push_str(&format!(
                "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
                points_attr(points),
                escape_xml(stroke.0),
                stroke.1
            ));
        }
    }
}

fn push_line(svg: &mut String, segment: &Segment, (color, width): (&str, f32)) {
    svg.push_str(&format!(
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        segment.from.0,
        segment.from.1,
        segment.to.0,
        segment.to.1,
        escape_xml(color),
        width
    ));
}

fn push_text(svg: &mut String, label: &TextLabel) {
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\">{}</text>",
        label.x,
        label.y,
        escape_xml(&label.text)
    ));
}

fn points_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Arial".to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("invalid default render size"))?;
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap
        .save_png(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    anyhow::bail!("PNG output requires the 'png' feature")
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::ir::{Feature, Genome, Strand};
    use crate::layout::compute_layout;

    fn sample_genome() -> Genome {
        let mut genome = Genome::new();
        genome.insert_chromosome("chr1", 10_000_000);
        genome.insert_chromosome("chr2", 4_000_000);
        for (start, name) in [(1_000_000, "Alpha"), (1_010_000, "Beta<1>")] {
            let feature = Feature {
                chromosome: "chr1".to_string(),
                start,
                end: start + 100,
                name: name.to_string(),
                strand: Strand::Forward,
            };
            genome.push_feature(feature, "test", 1).unwrap();
        }
        genome
    }

    fn fast_config() -> LayoutConfig {
        LayoutConfig {
            fast_text_metrics: true,
            ..LayoutConfig::default()
        }
    }

    #[test]
    fn render_svg_basic() {
        let theme = Theme::classic();
        let layout = compute_layout(&sample_genome(), &theme, &fast_config());
        let svg = render_svg(&layout, &theme);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Alpha"));
        assert!(svg.contains(">Chr1</text>"));
        assert!(svg.contains(">Chr2</text>"));
        assert!(svg.contains(">Mb</text>"));
        assert_eq!(svg.matches("<rect").count(), 2);
        // The second feature collides with the first and is drawn bent on both sides.
        assert_eq!(svg.matches("<polyline").count(), 2);
    }

    #[test]
    fn escapes_feature_names() {
        let theme = Theme::classic();
        let layout = compute_layout(&sample_genome(), &theme, &fast_config());
        let svg = render_svg(&layout, &theme);
        assert!(svg.contains("Beta&lt;1&gt;"));
        assert!(!svg.contains("Beta<1>"));
    }

    #[test]
    fn one_ruler_per_row() {
        let theme = Theme::classic();
        let config = LayoutConfig {
            columns_per_row: 1,
            ..fast_config()
        };
        let layout = compute_layout(&sample_genome(), &theme, &config);
        let svg = render_svg(&layout, &theme);
        assert_eq!(svg.matches(">Mb</text>").count(), 2);
    }

    #[test]
    fn background_rect_only_when_themed() {
        let theme = Theme::modern();
        let layout = compute_layout(&sample_genome(), &theme, &fast_config());
        let svg = render_svg(&layout, &theme);
        assert!(svg.contains("width=\"100%\""));
        assert_eq!(svg.matches("<rect").count(), 3);
    }

    #[test]
    fn writes_svg_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.svg");
        write_output_svg("<svg></svg>", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<svg></svg>");
    }
}
