use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub text_color: String,
    pub ruler_color: String,
    pub ruler_width: f32,
    pub connector_color: String,
    pub connector_width: f32,
    pub chromosome_fill: String,
    pub chromosome_border: String,
    pub chromosome_border_width: f32,
    pub chromosome_opacity: f32,
    pub background: Option<String>,
}

impl Theme {
    /// Grey rulers and connectors with translucent blue chromosome bodies.
    pub fn classic() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 5.0,
            text_color: "#000000".to_string(),
            ruler_color: "#808080".to_string(),
            ruler_width: 0.5,
            connector_color: "#808080".to_string(),
            connector_width: 0.5,
            chromosome_fill: "#4F81BD".to_string(),
            chromosome_border: "#000000".to_string(),
            chromosome_border_width: 0.5,
            chromosome_opacity: 0.5,
            background: None,
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 5.0,
            text_color: "#1C2430".to_string(),
            ruler_color: "#7A8AA6".to_string(),
            ruler_width: 0.4,
            connector_color: "#7A8AA6".to_string(),
            connector_width: 0.4,
            chromosome_fill: "#C7D2E5".to_string(),
            chromosome_border: "#7A8AA6".to_string(),
            chromosome_border_width: 0.5,
            chromosome_opacity: 0.8,
            background: Some("#FFFFFF".to_string()),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" | "default" => Some(Self::classic()),
            "modern" => Some(Self::modern()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
