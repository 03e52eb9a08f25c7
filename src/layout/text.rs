use crate::config::LayoutConfig;
use crate::text_metrics;
use crate::theme::Theme;

/// Rendered width of a single-line label in pixels.
pub(super) fn label_width(text: &str, theme: &Theme, config: &LayoutConfig) -> f64 {
    if !config.fast_text_metrics
        && let Some(width) =
            text_metrics::measure_text_width(text, theme.font_size, &theme.font_family)
    {
        return width as f64;
    }
    estimated_width(text, theme.font_size)
}

fn estimated_width(text: &str, font_size: f32) -> f64 {
    text.chars()
        .map(|ch| char_width_factor(ch) * font_size as f64)
        .sum()
}

fn char_width_factor(ch: char) -> f64 {
    match ch {
        'i' | 'j' | 'l' | 'I' | '|' | '.' | ',' | ':' | ';' | '!' | '\'' => 0.28,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | ' ' | '-' => 0.33,
        'm' | 'w' | 'M' | 'W' => 0.86,
        'A'..='Z' => 0.68,
        '0'..='9' => 0.56,
        _ if ch.is_ascii() => 0.55,
        _ => 1.0,
    }
}

/// Rounds to `decimals` places and prints the shortest form that still keeps
/// one fractional digit, so `3` becomes `3.0` and `12.50` becomes `12.5`.
pub(crate) fn format_decimal(value: f64, decimals: usize) -> String {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    let text = format!("{rounded:.decimals$}");
    if !text.contains('.') {
        return text;
    }
    let trimmed = text.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

/// Upper-cases the first character of a chromosome name for its title. The
/// rest is left as written, so `chrX` stays `ChrX` rather than `Chrx`.
pub(super) fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
