// type alias for frame colors (RGBA)
pub type Color = [u8; 4];

// type alias for card colors (RGB)
pub type Rgb = (u8, u8, u8);

/// One of the colors a card can carry.
///
/// The hex string is what gets printed on a face-up card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardColor {
    pub name: &'static str,
    pub rgb: Rgb,
    hex: &'static str,
}

impl CardColor {
    const fn new(name: &'static str, rgb: Rgb, hex: &'static str) -> Self {
        CardColor { name, rgb, hex }
    }

    pub fn hex(&self) -> &'static str {
        self.hex
    }

    pub fn rgba(&self) -> Color {
        let (r, g, b) = self.rgb;
        [r, g, b, 0xff]
    }
}

pub const NUM_COLORS: usize = 15;

// the VGA palette, minus yellow (reserved for the board)
pub const PALETTE: [CardColor; NUM_COLORS] = [
    CardColor::new("BLACK", (0x00, 0x00, 0x00), "000000"),
    CardColor::new("BLUE", (0x00, 0x00, 0xaa), "0000AA"),
    CardColor::new("GREEN", (0x00, 0xaa, 0x00), "00AA00"),
    CardColor::new("CYAN", (0x00, 0xaa, 0xaa), "00AAAA"),
    CardColor::new("RED", (0xaa, 0x00, 0x00), "AA0000"),
    CardColor::new("MAGENTA", (0xaa, 0x00, 0xaa), "AA00AA"),
    CardColor::new("BROWN", (0xaa, 0x55, 0x00), "AA5500"),
    CardColor::new("LIGHT GRAY", (0xaa, 0xaa, 0xaa), "AAAAAA"),
    CardColor::new("DARK GRAY", (0x55, 0x55, 0x55), "555555"),
    CardColor::new("LIGHT BLUE", (0x55, 0x55, 0xff), "5555FF"),
    CardColor::new("LIGHT GREEN", (0x55, 0xff, 0x55), "55FF55"),
    CardColor::new("LIGHT CYAN", (0x55, 0xff, 0xff), "55FFFF"),
    CardColor::new("LIGHT RED", (0xff, 0x55, 0x55), "FF5555"),
    CardColor::new("LIGHT MAGENTA", (0xff, 0x55, 0xff), "FF55FF"),
    CardColor::new("WHITE", (0xff, 0xff, 0xff), "FFFFFF"),
];

// consts for the board
pub const WHITE: Color = [0xff, 0xff, 0xff, 0xff]; // FFFFFF
pub const BLACK: Color = [0x00, 0x00, 0x00, 0xff]; // 000000
pub const YELLOW: Color = [0xff, 0xff, 0x00, 0xff]; // FFFF00
pub const GREEN: Color = [0x00, 0xff, 0x00, 0xff]; // 00FF00
pub const CYAN: Color = [0x00, 0xff, 0xff, 0xff]; // 00FFFF
pub const ORANGE: Color = [0xff, 0xa5, 0x00, 0xff]; // FFA500
pub const RED: Color = [0xff, 0x00, 0x00, 0xff]; // FF0000
pub const DARK_GRAY: Color = [0x28, 0x28, 0x28, 0xff]; // 282828
pub const GRAY: Color = [0xaa, 0xaa, 0xaa, 0xff]; // AAAAAA

pub const BACKGROUND: Color = DARK_GRAY;
pub const BOARD: Color = YELLOW;
pub const CARD_BACK: Color = GRAY;

/// Formats an RGB triple as `#RRGGBB`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.0, rgb.1, rgb.2)
}

/// Black or white, whichever reads better on top of `rgb`.
pub fn text_color_for(rgb: Rgb) -> Color {
    let (r, g, b) = rgb;
    let luminance = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    if luminance > 128.0 {
        BLACK
    } else {
        WHITE
    }
}
