use rand::Rng;
use rusttype::{point, Font, Scale};
use std::fs;
use std::iter::repeat;
use std::path::Path;
use std::time::Instant;

use crate::app::{App, Screen};
use crate::colors::*;
use crate::error::{Error, Result};
use crate::round::Phase;

// frame size consts
pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 600;
pub const CARD_WIDTH: usize = 120;
pub const CARD_HEIGHT: usize = 180;
const PANEL_HEIGHT: usize = 100;
const CARD_BORDER: usize = 5;

/// Face-down deck; clicking here draws the top card.
pub const DECK_RECT: Rect = Rect {
    x: WIDTH as usize / 2 - CARD_WIDTH - 20,
    y: HEIGHT as usize / 2 - CARD_HEIGHT / 2,
    w: CARD_WIDTH,
    h: CARD_HEIGHT,
};

pub const PILE_RECT: Rect = Rect {
    x: WIDTH as usize / 2 + 20,
    y: HEIGHT as usize / 2 - CARD_HEIGHT / 2,
    w: CARD_WIDTH,
    h: CARD_HEIGHT,
};

const NAME_BOX: Rect = Rect {
    x: WIDTH as usize / 2 - 150,
    y: HEIGHT as usize / 2,
    w: 300,
    h: 50,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Rect {
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    fn center_x(&self) -> f32 {
        (self.x + self.w / 2) as f32
    }

    fn center_y(&self) -> f32 {
        (self.y + self.h / 2) as f32
    }
}

/// Draws the app into a `WIDTH` x `HEIGHT` RGBA frame.
///
/// Without a font everything but the text is still drawn.
pub struct Painter<'a> {
    font: Option<Font<'a>>,
}

impl Painter<'static> {
    pub fn load(path: &Path) -> Result<Self> {
        let font_data = fs::read(path)?;
        let font = Font::try_from_vec(font_data).ok_or_else(|| Error::Font {
            path: path.display().to_string(),
        })?;
        Ok(Painter { font: Some(font) })
    }

    pub fn without_font() -> Self {
        Painter { font: None }
    }
}

impl Painter<'_> {
    pub fn draw<R: Rng>(&self, frame: &mut [u8], app: &App<R>, now: Instant) {
        clear(frame, BACKGROUND);
        let round = app.round();

        match app.screen() {
            Screen::Playing => match round.phase() {
                Phase::NotStarted => self.draw_start(frame, app),
                _ => self.draw_table(frame, app, now),
            },
            Screen::NameEntry(entry) => {
                self.draw_table(frame, app, now);
                shade(frame, BLACK, 200);
                self.draw_text_centered(frame, "Enter your name:", WHITE, 40.0, NAME_BOX.y as f32 - 60.0);
                outline_rect(frame, NAME_BOX, 2, WHITE);
                self.draw_text(
                    frame,
                    entry.text(),
                    WHITE,
                    40.0,
                    ((NAME_BOX.x + 5) as f32, (NAME_BOX.y + 5) as f32),
                );
            }
            Screen::Scoreboard { .. } => self.draw_scoreboard(frame, app),
        }
    }

    fn draw_start(&self, frame: &mut [u8], app: &App<impl Rng>) {
        let target = app.round().target();
        let mid = HEIGHT as f32 / 2.0;
        self.draw_text_centered(frame, "Hexsort: press SPACE to begin", GREEN, 36.0, mid - 100.0);
        let lines = [
            "Goal: collect 8 cards of the first card's color.".to_string(),
            format!("Target: {} ({})", target.name(), target.hex()),
            "Click the deck to turn the next card.".to_string(),
        ];
        for (i, line) in lines.iter().enumerate() {
            let color = if i == 1 { YELLOW } else { WHITE };
            self.draw_text_centered(frame, line, color, 24.0, mid + i as f32 * 40.0);
        }
    }

    fn draw_table<R: Rng>(&self, frame: &mut [u8], app: &App<R>, now: Instant) {
        let round = app.round();
        let target = round.target();

        //
        // info panel
        //
        fill_rect(
            frame,
            Rect { x: 0, y: 0, w: WIDTH as usize, h: PANEL_HEIGHT },
            BOARD,
        );
        let heading = format!("Target: {} ({})", target.name(), target.hex());
        self.draw_text_centered(frame, &heading, BLACK, 24.0, 20.0);
        let status = format!(
            "{:.2}s  |  {}/{}",
            round.elapsed(now).as_secs_f64(),
            round.cards_held(),
            crate::deck::CARDS_PER_COLOR
        );
        self.draw_text_centered(frame, &status, BLACK, 24.0, 55.0);

        //
        // deck
        //
        let below_card = (DECK_RECT.y + DECK_RECT.h + 20) as f32;
        if round.deck().is_empty() {
            self.draw_text_around(frame, "DECK EMPTY", RED, 24.0, DECK_RECT.center_x(), DECK_RECT.center_y());
            if round.is_stalled() {
                self.draw_text_centered(frame, "press ENTER to deal again", ORANGE, 24.0, below_card + 60.0);
            }
        } else {
            self.draw_card_back(frame, DECK_RECT);
            let left = format!("Cards left: {}", round.deck().len());
            self.draw_text_around(frame, &left, WHITE, 24.0, DECK_RECT.center_x(), below_card);
        }

        //
        // collected pile
        //
        self.draw_text_around(
            frame,
            "Collected",
            WHITE,
            24.0,
            PILE_RECT.center_x(),
            PILE_RECT.y as f32 - 30.0,
        );
        match round.collected().last() {
            Some(card) => {
                self.draw_card_face(frame, PILE_RECT, card.color(), card.hex());
                let total = format!("Total: {}", round.collected().len());
                self.draw_text_around(frame, &total, WHITE, 24.0, PILE_RECT.center_x(), below_card);
            }
            None => {
                // placeholder in the target color
                self.draw_card_face(frame, PILE_RECT, target.color(), "TARGET");
                self.draw_text_around(frame, "PILE EMPTY", WHITE, 24.0, PILE_RECT.center_x(), below_card);
            }
        }
    }

    fn draw_scoreboard<R: Rng>(&self, frame: &mut [u8], app: &App<R>) {
        shade(frame, BOARD, 200);
        self.draw_text_centered(frame, "COLOR COMPLETE!", GREEN, 40.0, 30.0);
        let time = format!("Your time: {:.2} seconds", app.round().total_time().as_secs_f64());
        self.draw_text_centered(frame, &time, WHITE, 36.0, 90.0);

        self.draw_text(frame, &format!("Scoreboard (Top {}):", app.top_scores().len()), CYAN, 24.0, (50.0, 160.0));
        for (i, score) in app.top_scores().iter().enumerate() {
            let row = format!("{}. {} - {:.2}s", i + 1, score.name, score.time_seconds);
            self.draw_text(frame, &row, WHITE, 20.0, (50.0, 195.0 + i as f32 * 25.0));
        }

        self.draw_text_centered(
            frame,
            "Press ESC to quit or ENTER to restart",
            ORANGE,
            24.0,
            HEIGHT as f32 - 50.0,
        );
    }

    fn draw_card_face(&self, frame: &mut [u8], rect: Rect, color: CardColor, label: &str) {
        fill_rect(frame, rect, color.rgba());
        self.draw_text_around(frame, label, text_color_for(color.rgb), 32.0, rect.center_x(), rect.center_y() - 16.0);
    }

    fn draw_card_back(&self, frame: &mut [u8], rect: Rect) {
        fill_rect(frame, rect, CARD_BACK);
        outline_rect(frame, rect, CARD_BORDER, BLACK);
        self.draw_text_around(frame, "HX", BLACK, 32.0, rect.center_x(), rect.center_y() - 16.0);
    }

    /// Width in pixels of `text` at `height`.
    pub fn text_width(&self, text: &str, height: f32) -> f32 {
        let font = match &self.font {
            Some(font) => font,
            None => return 0.0,
        };
        let scale = Scale::uniform(height);
        font.layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }

    fn draw_text_centered(&self, frame: &mut [u8], text: &str, color: Color, height: f32, y: f32) {
        self.draw_text_around(frame, text, color, height, WIDTH as f32 / 2.0, y);
    }

    // centered horizontally on `center_x`, top at `y`
    fn draw_text_around(&self, frame: &mut [u8], text: &str, color: Color, height: f32, center_x: f32, y: f32) {
        let x = center_x - self.text_width(text, height) / 2.0;
        self.draw_text(frame, text, color, height, (x.max(0.0), y));
    }

    fn draw_text(&self, frame: &mut [u8], text: &str, color: Color, height: f32, offset: (f32, f32)) {
        let font = match &self.font {
            Some(font) => font,
            None => return,
        };
        let scale = Scale {
            x: height,
            y: height,
        };

        let v_metrics = font.v_metrics(scale);
        let offset = point(offset.0, offset.1 + v_metrics.ascent);

        for glyph in font.layout(text, scale, offset) {
            if let Some(bounding_box) = glyph.pixel_bounding_box() {
                glyph.draw(|x, y, v| {
                    // Offset the position by the glyph bounding box
                    let x = x as i32 + bounding_box.min.x;
                    let y = y as i32 + bounding_box.min.y;
                    if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
                        return;
                    }
                    let index = (y as usize * WIDTH as usize + x as usize) * 4;
                    // blend with whatever is already there
                    let under = &mut frame[index..index + 4];
                    for c in 0..3 {
                        under[c] = (under[c] as f32 * (1.0 - v) + color[c] as f32 * v) as u8;
                    }
                    under[3] = 0xff;
                });
            }
        }
    }
}

pub fn clear(frame: &mut [u8], color: Color) {
    for pixel in frame.chunks_exact_mut(4) {
        pixel.copy_from_slice(&color);
    }
}

pub fn fill_rect(frame: &mut [u8], rect: Rect, color: Color) {
    let w = WIDTH as usize;
    let right = (rect.x + rect.w).min(w);
    if rect.x >= right {
        return;
    }
    // one line _across_ the rect
    let line: Vec<u8> = repeat(color).take(right - rect.x).flatten().collect();
    for y in rect.y..(rect.y + rect.h).min(HEIGHT as usize) {
        let start = (y * w + rect.x) * 4;
        frame[start..start + line.len()].copy_from_slice(&line);
    }
}

pub fn outline_rect(frame: &mut [u8], rect: Rect, thickness: usize, color: Color) {
    let t = thickness.min(rect.w / 2).min(rect.h / 2);
    fill_rect(frame, Rect { h: t, ..rect }, color);
    fill_rect(frame, Rect { y: rect.y + rect.h - t, h: t, ..rect }, color);
    fill_rect(frame, Rect { w: t, ..rect }, color);
    fill_rect(frame, Rect { x: rect.x + rect.w - t, w: t, ..rect }, color);
}

/// Blend `color` over the whole frame with the given alpha.
pub fn shade(frame: &mut [u8], color: Color, alpha: u8) {
    let a = alpha as u16;
    for pixel in frame.chunks_exact_mut(4) {
        for c in 0..3 {
            pixel[c] = ((pixel[c] as u16 * (255 - a) + color[c] as u16 * a) / 255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Vec<u8> {
        vec![0; (WIDTH * HEIGHT * 4) as usize]
    }

    fn pixel(frame: &[u8], x: usize, y: usize) -> &[u8] {
        let i = (y * WIDTH as usize + x) * 4;
        &frame[i..i + 4]
    }

    #[test]
    fn card_slots_fit_and_do_not_overlap() {
        for rect in [DECK_RECT, PILE_RECT].iter() {
            assert!(rect.x + rect.w <= WIDTH as usize);
            assert!(rect.y + rect.h <= HEIGHT as usize);
            assert!(rect.y > PANEL_HEIGHT);
        }
        assert!(DECK_RECT.x + DECK_RECT.w < PILE_RECT.x);
    }

    #[test]
    fn deck_hit_test() {
        assert!(DECK_RECT.contains(DECK_RECT.x, DECK_RECT.y));
        assert!(DECK_RECT.contains(DECK_RECT.x + CARD_WIDTH - 1, DECK_RECT.y + CARD_HEIGHT - 1));
        assert!(!DECK_RECT.contains(DECK_RECT.x + CARD_WIDTH, DECK_RECT.y));
        assert!(!DECK_RECT.contains(PILE_RECT.x + 1, PILE_RECT.y + 1));
    }

    #[test]
    fn fill_and_outline() {
        let mut frame = frame();
        fill_rect(&mut frame, DECK_RECT, CARD_BACK);
        outline_rect(&mut frame, DECK_RECT, CARD_BORDER, BLACK);
        assert_eq!(pixel(&frame, DECK_RECT.x + 60, DECK_RECT.y + 90), &CARD_BACK);
        assert_eq!(pixel(&frame, DECK_RECT.x, DECK_RECT.y + 90), &BLACK);
        assert_eq!(pixel(&frame, DECK_RECT.x - 1, DECK_RECT.y + 90), &[0, 0, 0, 0]);
    }

    #[test]
    fn shade_blends_toward_color() {
        let mut frame = frame();
        clear(&mut frame, BLACK);
        shade(&mut frame, WHITE, 255);
        assert_eq!(pixel(&frame, 0, 0), &WHITE);
        clear(&mut frame, BLACK);
        shade(&mut frame, WHITE, 0);
        assert_eq!(pixel(&frame, 10, 10), &BLACK);
    }

    #[test]
    fn card_face_uses_card_color() {
        let mut frame = frame();
        let painter = Painter::without_font();
        painter.draw_card_face(&mut frame, PILE_RECT, PALETTE[6], PALETTE[6].hex());
        assert_eq!(pixel(&frame, PILE_RECT.x + 1, PILE_RECT.y + 1), &[0xaa, 0x55, 0x00, 0xff]);
        assert_eq!(pixel(&frame, PILE_RECT.x - 1, PILE_RECT.y + 1), &[0, 0, 0, 0]);
    }

    #[test]
    fn no_font_means_no_text() {
        let painter = Painter::without_font();
        assert_eq!(painter.text_width("FFFFFF", 32.0), 0.0);
        assert!(Painter::load(Path::new("no/such/font.ttf")).is_err());
    }
}
