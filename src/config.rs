use crate::error::ChromLocError;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Pixels per drawing unit, applied to every vertical measurement.
    pub ruler_ratio: f64,
    /// Source units per displayed unit (base pairs per Mb).
    pub mb_scale: f64,
    /// Drawing units per displayed unit; also the major tick spacing.
    pub tick_granularity: f64,
    pub columns_per_row: usize,
    /// Gap between rows, in displayed units.
    pub row_spacing: f64,
    pub origin_y: f64,
    pub first_column_x: f64,
    pub column_spacing: f64,
    pub top_margin: f64,
    pub bottom_margin: f64,
    pub chromosome_width: f64,
    pub corner_rx: f64,
    pub corner_ry: f64,
    pub label_height: f64,
    pub label_offset: f64,
    pub collision_threshold: f64,
    pub connector_gap: f64,
    pub connector_length: f64,
    pub connector_outer_bend: f64,
    pub connector_inner_bend: f64,
    pub position_label_dx: f64,
    pub name_label_dx: f64,
    pub terminal_bent_label_dy: f64,
    pub ruler: RulerConfig,
    pub canvas_padding: f64,
    pub fast_text_metrics: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            ruler_ratio: 1.0,
            mb_scale: 1_000_000.0,
            tick_granularity: 5.0,
            columns_per_row: 7,
            row_spacing: 5.0,
            origin_y: 10.0,
            first_column_x: 55.0,
            column_spacing: 85.0,
            top_margin: 6.9,
            bottom_margin: 7.14,
            chromosome_width: 10.3,
            corner_rx: 5.15,
            corner_ry: 4.55,
            label_height: 3.0,
            label_offset: 7.0,
            collision_threshold: 1.0,
            connector_gap: 0.4,
            connector_length: 6.3,
            connector_outer_bend: 2.8,
            connector_inner_bend: 2.3,
            position_label_dx: -22.0,
            name_label_dx: 2.0,
            terminal_bent_label_dy: 10.0,
            ruler: RulerConfig::default(),
            canvas_padding: 10.0,
            fast_text_metrics: false,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), ChromLocError> {
        if !(self.ruler_ratio.is_finite() && self.ruler_ratio > 0.0) {
            return Err(ChromLocError::invalid_config(format!(
                "ruler ratio must be a positive number, got {}",
                self.ruler_ratio
            )));
        }
        if !(self.mb_scale > 0.0) {
            return Err(ChromLocError::invalid_config("mbScale must be positive"));
        }
        if !(self.tick_granularity > 0.0) {
            return Err(ChromLocError::invalid_config("tickGranularity must be positive"));
        }
        if self.columns_per_row == 0 {
            return Err(ChromLocError::invalid_config("columnsPerRow must be at least 1"));
        }
        // Stacked labels must move down, or label rows stop being monotonic.
        if !(self.label_offset.is_finite() && self.label_offset > 0.0) {
            return Err(ChromLocError::invalid_config(format!(
                "labelOffset must be a positive number, got {}",
                self.label_offset
            )));
        }
        if !(self.chromosome_width.is_finite() && self.chromosome_width > 0.0) {
            return Err(ChromLocError::invalid_config(format!(
                "chromosomeWidth must be a positive number, got {}",
                self.chromosome_width
            )));
        }
        let non_negative = [
            ("labelHeight", self.label_height),
            ("collisionThreshold", self.collision_threshold),
            ("rowSpacing", self.row_spacing),
            ("columnSpacing", self.column_spacing),
            ("topMargin", self.top_margin),
            ("bottomMargin", self.bottom_margin),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ChromLocError::invalid_config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Placement of the per-row ruler, in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulerConfig {
    pub x: f64,
    pub major_tick_x: f64,
    pub minor_tick_x: f64,
    pub label_x: f64,
    pub label_dy: f64,
    pub unit_label: String,
    pub unit_label_x: f64,
    pub unit_label_dy: f64,
    /// Every n-th tick is a labelled major tick.
    pub major_every: usize,
}

impl Default for RulerConfig {
    fn default() -> Self {
        Self {
            x: 20.0,
            major_tick_x: 15.7,
            minor_tick_x: 17.7,
            label_x: 2.7,
            label_dy: 2.5,
            unit_label: "Mb".to_string(),
            unit_label_x: 15.0,
            unit_label_dy: -3.0,
            major_every: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<NumberOrString>,
    text_color: Option<String>,
    ruler_color: Option<String>,
    ruler_width: Option<NumberOrString>,
    line_color: Option<String>,
    line_width: Option<NumberOrString>,
    chromosome_fill: Option<String>,
    chromosome_border: Option<String>,
    chromosome_border_width: Option<NumberOrString>,
    chromosome_opacity: Option<NumberOrString>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f32),
    String(String),
}

impl NumberOrString {
    fn as_f32(&self) -> Option<f32> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().trim_end_matches("px").parse::<f32>().ok(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    ruler_ratio: Option<f64>,
    mb_scale: Option<f64>,
    tick_granularity: Option<f64>,
    columns_per_row: Option<usize>,
    row_spacing: Option<f64>,
    origin_y: Option<f64>,
    first_column_x: Option<f64>,
    column_spacing: Option<f64>,
    top_margin: Option<f64>,
    bottom_margin: Option<f64>,
    chromosome_width: Option<f64>,
    corner_rx: Option<f64>,
    corner_ry: Option<f64>,
    label_height: Option<f64>,
    label_offset: Option<f64>,
    collision_threshold: Option<f64>,
    connector_length: Option<f64>,
    canvas_padding: Option<f64>,
    fast_text_metrics: Option<bool>,
    unit_label: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    log::info!("Loading configuration from {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|source| {
        ChromLocError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    apply_config_file(&mut config, parsed)?;
    config.layout.validate()?;
    Ok(config)
}

fn apply_config_file(config: &mut Config, parsed: ConfigFile) -> Result<(), ChromLocError> {
    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = Theme::from_name(theme_name)
            .ok_or_else(|| ChromLocError::invalid_config(format!("unknown theme '{theme_name}'")))?;
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size.as_ref().and_then(NumberOrString::as_f32) {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.ruler_color {
            config.theme.ruler_color = v;
        }
        if let Some(v) = vars.ruler_width.as_ref().and_then(NumberOrString::as_f32) {
            config.theme.ruler_width = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.connector_color = v;
        }
        if let Some(v) = vars.line_width.as_ref().and_then(NumberOrString::as_f32) {
            config.theme.connector_width = v;
        }
        if let Some(v) = vars.chromosome_fill {
            config.theme.chromosome_fill = v;
        }
        if let Some(v) = vars.chromosome_border {
            config.theme.chromosome_border = v;
        }
        if let Some(v) = vars
            .chromosome_border_width
            .as_ref()
            .and_then(NumberOrString::as_f32)
        {
            config.theme.chromosome_border_width = v;
        }
        if let Some(v) = vars.chromosome_opacity.as_ref().and_then(NumberOrString::as_f32) {
            config.theme.chromosome_opacity = v.clamp(0.0, 1.0);
        }
        if let Some(v) = vars.background {
            config.theme.background = Some(v);
        }
    }

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        if let Some(v) = layout.ruler_ratio {
            target.ruler_ratio = v;
        }
        if let Some(v) = layout.mb_scale {
            target.mb_scale = v;
        }
        if let Some(v) = layout.tick_granularity {
            target.tick_granularity = v;
        }
        if let Some(v) = layout.columns_per_row {
            target.columns_per_row = v;
        }
        if let Some(v) = layout.row_spacing {
            target.row_spacing = v;
        }
        if let Some(v) = layout.origin_y {
            target.origin_y = v;
        }
        if let Some(v) = layout.first_column_x {
            target.first_column_x = v;
        }
        if let Some(v) = layout.column_spacing {
            target.column_spacing = v;
        }
        if let Some(v) = layout.top_margin {
            target.top_margin = v;
        }
        if let Some(v) = layout.bottom_margin {
            target.bottom_margin = v;
        }
        if let Some(v) = layout.chromosome_width {
            target.chromosome_width = v;
        }
        if let Some(v) = layout.corner_rx {
            target.corner_rx = v;
        }
        if let Some(v) = layout.corner_ry {
            target.corner_ry = v;
        }
        if let Some(v) = layout.label_height {
            target.label_height = v;
        }
        if let Some(v) = layout.label_offset {
            target.label_offset = v;
        }
        if let Some(v) = layout.collision_threshold {
            target.collision_threshold = v;
        }
        if let Some(v) = layout.connector_length {
            target.connector_length = v;
        }
        if let Some(v) = layout.canvas_padding {
            target.canvas_padding = v;
        }
        if let Some(v) = layout.fast_text_metrics {
            target.fast_text_metrics = v;
        }
        if let Some(v) = layout.unit_label {
            target.ruler.unit_label = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
    }

    Ok(())
}
