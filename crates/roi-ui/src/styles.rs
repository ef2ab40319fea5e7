//! Ayu color theme and styling functions for roi CLI output.
//!
//! Uses the Ayu Dark color palette. Savings are colored by sign: gains are
//! green, losses red, zero muted. Everything else uses standard text.

use owo_colors::OwoColorize;
use roi_core::report::format_percent;
use roi_core::step::StepRecord;

use crate::terminal::supports_color;

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 - bright yellow
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 - bright red
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 - muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue

pub const ICON_PASS: &str = "\u{2713}"; // ✓
pub const ICON_WARN: &str = "\u{26A0}"; // ⚠
pub const ICON_FAIL: &str = "\u{2716}"; // ✖
pub const ICON_INFO: &str = "\u{2139}"; // ℹ

const SEPARATOR_LIGHT: char = '\u{2500}'; // ─
const SEPARATOR_HEAVY: char = '\u{2550}'; // ═

// ---------------------------------------------------------------------------
// Helper: apply truecolor only when color is supported
// ---------------------------------------------------------------------------

fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

fn color_bold_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Core semantic render helpers
// ---------------------------------------------------------------------------

pub fn render_pass(s: &str) -> String {
    color_str(s, PASS)
}

pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

pub fn render_bold(s: &str) -> String {
    if supports_color() {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

/// Renders a section header in uppercase with accent color and bold.
pub fn render_category(s: &str) -> String {
    color_bold_str(&s.to_uppercase(), ACCENT)
}

/// Renders a light separator line of `width` columns in muted color.
pub fn render_separator(width: usize) -> String {
    render_muted(&SEPARATOR_LIGHT.to_string().repeat(width))
}

/// Renders a heavy separator line of `width` columns in muted color.
pub fn render_heavy_separator(width: usize) -> String {
    render_muted(&SEPARATOR_HEAVY.to_string().repeat(width))
}

pub fn render_pass_icon() -> String {
    color_str(ICON_PASS, PASS)
}

pub fn render_warn_icon() -> String {
    color_str(ICON_WARN, WARN)
}

pub fn render_fail_icon() -> String {
    color_str(ICON_FAIL, FAIL)
}

pub fn render_info_icon() -> String {
    color_str(ICON_INFO, ACCENT)
}

// ---------------------------------------------------------------------------
// Savings rendering
// ---------------------------------------------------------------------------

/// Colors an already-formatted value by the sign of `value`.
pub fn render_signed(text: &str, value: f64) -> String {
    if value > 0.0 {
        render_pass(text)
    } else if value < 0.0 {
        render_fail(text)
    } else {
        render_muted(text)
    }
}

/// Renders saved hours per year, e.g. `580.7 h`.
pub fn render_hours(hours: f64) -> String {
    render_signed(&format!("{:.1} h", hours), hours)
}

/// Renders freed FTE with the given number of decimals.
pub fn render_fte(fte: f64, decimals: usize) -> String {
    render_signed(&format!("{:.*}", decimals, fte), fte)
}

/// Renders an efficiency ratio as a percentage, e.g. `67.0%`.
pub fn render_efficiency(ratio: f64) -> String {
    render_signed(&format_percent(ratio), ratio)
}

/// Renders a compact one-line step summary.
/// Format: `#{seq} {name}: {hours}/yr, {fte} FTE, {efficiency}`
pub fn render_step_compact(seq: usize, record: &StepRecord) -> String {
    format!(
        "#{} {}: {}/yr, {} FTE, {}",
        seq,
        render_bold(record.name()),
        render_hours(record.saved_hours_per_year()),
        render_fte(record.freed_fte(), 3),
        render_efficiency(record.efficiency_ratio()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use roi_core::formula::compute_step;
    use roi_core::step::StepInput;

    #[test]
    fn render_hours_contains_value() {
        // In tests, NO_COLOR may or may not be set; just verify the text.
        assert!(render_hours(580.66).contains("580.7 h"));
        assert!(render_hours(-12.0).contains("-12.0 h"));
    }

    #[test]
    fn render_fte_respects_decimals() {
        assert!(render_fte(0.29, 3).contains("0.290"));
        assert!(render_fte(0.723, 2).contains("0.72"));
    }

    #[test]
    fn render_efficiency_formats_percent() {
        assert!(render_efficiency(0.67).contains("67.0%"));
    }

    #[test]
    fn render_step_compact_contains_fields() {
        let input = StepInput::new("发票处理", 100.0, 10.0).with_error_path(90.0, 2.0, 15.0);
        let record = compute_step(&input);
        let rendered = render_step_compact(1, &record);
        assert!(rendered.contains("#1"));
        assert!(rendered.contains("发票处理"));
        assert!(rendered.contains("580.7 h"));
        assert!(rendered.contains("0.290"));
        assert!(rendered.contains("67.0%"));
    }

    #[test]
    fn separators_have_requested_width() {
        assert!(render_separator(5).contains(&"\u{2500}".repeat(5)));
        assert!(!render_heavy_separator(3).contains(&"\u{2550}".repeat(4)));
    }

    #[test]
    fn render_category_uppercases() {
        assert!(render_category("summary").contains("SUMMARY"));
    }
}
