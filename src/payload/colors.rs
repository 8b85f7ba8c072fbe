//! Embed colors.

pub const DEFAULT: u32 = 0x000000;

// Status
pub const SUCCESS: u32 = 0x57F287;
pub const ERROR: u32 = 0xED4245;
pub const WARNING: u32 = 0xFEE75C;
pub const INFO: u32 = 0x5865F2;

// Brand
pub const BLURPLE: u32 = 0x5865F2;
pub const FUCHSIA: u32 = 0xEB459E;
pub const GREEN: u32 = 0x57F287;
pub const YELLOW: u32 = 0xFEE75C;
pub const RED: u32 = 0xED4245;

// Palette
pub const AQUA: u32 = 0x1ABC9C;
pub const PURPLE: u32 = 0x9B59B6;
pub const GOLD: u32 = 0xF1C40F;
pub const ORANGE: u32 = 0xE67E22;
pub const BLUE: u32 = 0x3498DB;
pub const PINK: u32 = 0xE91E63;
pub const GREY: u32 = 0x95A5A6;

/// Look up a palette color by its lowercase name.
pub fn by_name(name: &str) -> Option<u32> {
    let color = match name {
        "red" => RED,
        "green" => GREEN,
        "blue" => BLUE,
        "purple" => PURPLE,
        "yellow" => YELLOW,
        "gold" => GOLD,
        "orange" => ORANGE,
        "pink" => PINK,
        "aqua" => AQUA,
        "grey" | "gray" => GREY,
        "blurple" => BLURPLE,
        "fuchsia" => FUCHSIA,
        _ => return None,
    };
    Some(color)
}
