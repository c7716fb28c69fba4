//! Packed ARGB8888 colors.

pub const BACKGROUND: u32 = 0xFF000000;
pub const GRID: u32 = 0xFF333333;
pub const WIREFRAME: u32 = 0xFFFFFFFF;
pub const VERTEX: u32 = 0xFFFF0000;
pub const WHITE: u32 = 0xFFFFFFFF;

pub const RED: u32 = 0xFFFF0000;
pub const GREEN: u32 = 0xFF00FF00;
pub const BLUE: u32 = 0xFF0000FF;
pub const YELLOW: u32 = 0xFFFFFF00;
pub const MAGENTA: u32 = 0xFFFF00FF;
pub const CYAN: u32 = 0xFF00FFFF;

/// Packs 8-bit channels into an ARGB word.
#[inline]
pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Splits an ARGB word into `(a, r, g, b)`.
#[inline]
pub const fn channels(color: u32) -> (u8, u8, u8, u8) {
    (
        (color >> 24) as u8,
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
    )
}

/// Scales the RGB channels of `color` by a light intensity factor.
///
/// The factor is clamped to `[0, 1]`, so a face lit from behind turns black
/// instead of wrapping around. Alpha is preserved.
pub fn apply_intensity(color: u32, factor: f32) -> u32 {
    let factor = if factor.is_nan() {
        0.0
    } else {
        factor.clamp(0.0, 1.0)
    };
    let (a, r, g, b) = channels(color);
    let scale = |c: u8| (c as f32 * factor) as u8;
    argb(a, scale(r), scale(g), scale(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_round_trips_through_channels() {
        let color = argb(0x12, 0x34, 0x56, 0x78);
        assert_eq!(color, 0x12345678);
        assert_eq!(channels(color), (0x12, 0x34, 0x56, 0x78));
    }

    #[test]
    fn full_intensity_keeps_color() {
        assert_eq!(apply_intensity(0xFF8040C0, 1.0), 0xFF8040C0);
    }

    #[test]
    fn half_intensity_halves_channels_and_keeps_alpha() {
        assert_eq!(apply_intensity(0xFFFF8040, 0.5), 0xFF7F4020);
    }

    #[test]
    fn intensity_is_clamped() {
        assert_eq!(apply_intensity(RED, -0.7), 0xFF000000);
        assert_eq!(apply_intensity(GREEN, 3.0), GREEN);
        assert_eq!(apply_intensity(BLUE, f32::NAN), 0xFF000000);
    }
}
