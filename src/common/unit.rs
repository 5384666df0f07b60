//! Unit conversion utilities.
//!
//! WordprocessingML mixes several linear units: twips for layout, half-points
//! for font sizes, EMUs for drawing extents. OpenDocument wants physical
//! lengths (`pt`, `cm`, `in`). All conversions used by the writers live here.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_PT: i64 = 12_700;
pub const EMUS_PER_PIXEL: i64 = 9_525;
pub const TWIPS_PER_INCH: i64 = 1_440;
pub const TWIPS_PER_PT: i64 = 20;

/// Twips of one line at single spacing.
pub const LINE_HEIGHT_TWIPS: f64 = 240.0;

/// Twips per indentation step (half an inch).
pub const INDENT_STEP_TWIPS: f64 = 720.0;

#[inline]
pub fn px_to_emu(px: u32, dpi: u32) -> i64 {
    ((px as f64) * EMUS_PER_INCH as f64 / dpi as f64) as i64
}

#[inline]
pub fn px_to_emu_96(px: u32) -> i64 {
    (px as i64).saturating_mul(EMUS_PER_PIXEL)
}

#[inline]
pub fn pt_to_emu_f64(pt: f64) -> i64 {
    (pt * EMUS_PER_PT as f64) as i64
}

/// Points to half-points, the unit of `w:sz`.
#[inline]
pub fn pt_to_half_points(pt: f64) -> u32 {
    (pt * 2.0).round().max(0.0) as u32
}

#[inline]
pub fn half_points_to_pt(half_points: u32) -> f64 {
    half_points as f64 / 2.0
}

#[inline]
pub fn inches_to_twips(inches: f64) -> i64 {
    (inches * TWIPS_PER_INCH as f64).round() as i64
}

#[inline]
pub fn twips_to_pt(twips: i64) -> f64 {
    twips as f64 / TWIPS_PER_PT as f64
}

#[inline]
pub fn twips_to_cm(twips: i64) -> f64 {
    twips as f64 * 2.54 / TWIPS_PER_INCH as f64
}

#[inline]
pub fn px_to_cm_96(px: u32) -> f64 {
    px as f64 * 2.54 / 96.0
}

/// Format a float for XML attributes without trailing zeros.
pub fn format_decimal(value: f64) -> String {
    let mut s = format!("{:.3}", value);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" { "0".to_string() } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_to_emu() {
        assert_eq!(px_to_emu_96(96), EMUS_PER_INCH);
        assert_eq!(px_to_emu(96, 96), EMUS_PER_INCH);
        assert_eq!(px_to_emu_96(1), 9_525);
    }

    #[test]
    fn test_half_points_round_trip() {
        assert_eq!(pt_to_half_points(12.0), 24);
        assert_eq!(pt_to_half_points(10.5), 21);
        assert_eq!(half_points_to_pt(24), 12.0);
    }

    #[test]
    fn test_twips() {
        assert_eq!(inches_to_twips(1.0), 1440);
        assert_eq!(twips_to_pt(240), 12.0);
        assert!((twips_to_cm(1440) - 2.54).abs() < 1e-9);
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(2.5), "2.5");
        assert_eq!(format_decimal(3.0), "3");
        assert_eq!(format_decimal(0.1234), "0.123");
        assert_eq!(format_decimal(-0.0001), "0");
    }
}
