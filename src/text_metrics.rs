use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Advance width of `text` in pixels using the first installed font matching
/// `font_family`. `None` when no matching font is available.
pub fn measure_text_width(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family)
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    fonts: HashMap<String, Option<FontData>>,
}

struct FontData {
    bytes: Vec<u8>,
    index: u32,
    ascii_advances: [u16; 128],
    units_per_em: u16,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            fonts: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        let key = font_family.trim().to_string();
        if !self.fonts.contains_key(&key) {
            let font = self.load(font_family);
            if font.is_none() {
                log::debug!("no installed font matches '{font_family}', using estimated widths");
            }
            self.fonts.insert(key.clone(), font);
        }
        let font = self.fonts.get(&key)?.as_ref()?;
        Some(font.width(text, font_size))
    }

    fn load(&mut self, font_family: &str) -> Option<FontData> {
        let names: Vec<&str> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\''))
            .filter(|part| !part.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = names
            .iter()
            .map(|name| match name.to_ascii_lowercase().as_str() {
                "serif" => Family::Serif,
                "sans-serif" | "system-ui" | "-apple-system" => Family::SansSerif,
                "monospace" => Family::Monospace,
                _ => Family::Name(*name),
            })
            .collect();
        families.push(Family::SansSerif);

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| FontData::new(data.to_vec(), index))
            .flatten()
    }
}

impl FontData {
    fn new(bytes: Vec<u8>, index: u32) -> Option<Self> {
        let face = Face::parse(&bytes, index).ok()?;
        let mut ascii_advances = [0u16; 128];
        for byte in 0u8..=127 {
            if let Some(glyph) = face.glyph_index(byte as char) {
                ascii_advances[byte as usize] = face.glyph_hor_advance(glyph).unwrap_or(0);
            }
        }
        let units_per_em = face.units_per_em().max(1);
        Some(Self {
            bytes,
            index,
            ascii_advances,
            units_per_em,
        })
    }

    fn width(&self, text: &str, font_size: f32) -> f32 {
        let scale = font_size / self.units_per_em as f32;
        let fallback = font_size * 0.56;
        let face = if text.is_ascii() {
            None
        } else {
            Face::parse(&self.bytes, self.index).ok()
        };

        let mut width = 0.0f32;
        for ch in text.chars() {
            let advance = if ch.is_ascii() {
                self.ascii_advances[ch as usize]
            } else {
                face.as_ref()
                    .and_then(|face| face.glyph_hor_advance(face.glyph_index(ch)?))
                    .unwrap_or(0)
            };
            if advance == 0 {
                width += fallback;
            } else {
                width += advance as f32 * scale;
            }
        }
        width.max(0.0)
    }
}
