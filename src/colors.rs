//! Colors in ARGB8888 format and the helpers that blend them.
//!
//! Every color in the crate is a packed `u32` laid out as `0xAARRGGBB`, which
//! is also the byte order the SDL2 streaming texture expects.

pub const BACKGROUND: u32 = 0xFF1E1E1E;
pub const OUTLINE: u32 = 0xFF101010;
pub const SKY: u32 = 0xFF87A9C8;
pub const GRASS: u32 = 0xFF4E7A3A;
pub const STONE: u32 = 0xFF8A8A82;
pub const BRICK: u32 = 0xFF9C4A32;
pub const WOOD: u32 = 0xFF7A5230;
pub const SAND: u32 = 0xFFC9B27A;
pub const TEAL: u32 = 0xFF2F8C8C;
pub const CRIMSON: u32 = 0xFFB0263A;
pub const SKIN: u32 = 0xFFE0B48C;

/// Splits a packed color into normalized RGB components.
#[inline]
pub fn unpack_color(color: u32) -> (f32, f32, f32) {
    let r = ((color >> 16) & 0xFF) as f32 / 255.0;
    let g = ((color >> 8) & 0xFF) as f32 / 255.0;
    let b = (color & 0xFF) as f32 / 255.0;
    (r, g, b)
}

/// Packs normalized RGBA components (clamped to [0, 1]) into ARGB8888.
#[inline]
pub fn pack_color(r: f32, g: f32, b: f32, a: f32) -> u32 {
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
    (to_byte(a) << 24) | (to_byte(r) << 16) | (to_byte(g) << 8) | to_byte(b)
}

/// Linear interpolation between two unpacked colors.
#[inline]
pub fn lerp_color(a: (f32, f32, f32), b: (f32, f32, f32), t: f32) -> (f32, f32, f32) {
    (
        a.0 + (b.0 - a.0) * t,
        a.1 + (b.1 - a.1) * t,
        a.2 + (b.2 - a.2) * t,
    )
}

/// Blends `from` toward `to` by `t` in [0, 1]. The result is always opaque.
pub fn blend(from: u32, to: u32, t: f32) -> u32 {
    if t <= 0.0 {
        return from | 0xFF00_0000;
    }
    if t >= 1.0 {
        return to | 0xFF00_0000;
    }
    let (r, g, b) = lerp_color(unpack_color(from), unpack_color(to), t);
    pack_color(r, g, b, 1.0)
}

/// Scales the RGB channels of a color by `factor`.
pub fn scale(color: u32, factor: f32) -> u32 {
    let (r, g, b) = unpack_color(color);
    pack_color(r * factor, g * factor, b * factor, 1.0)
}
