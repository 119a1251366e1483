//! Colors used by the signup page, as `0xRRGGBB` values for [`gpui::rgb`].

pub const WHITE: u32 = 0xffffff;

pub const ZINC_300: u32 = 0xd4d4d8;
pub const ZINC_600: u32 = 0x52525b;
pub const ZINC_900: u32 = 0x18181b;
pub const ZINC_950: u32 = 0x09090b;

pub const EMERALD_500: u32 = 0x10b981;
pub const RED_500: u32 = 0xef4444;
