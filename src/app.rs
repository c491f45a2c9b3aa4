//! Screen flow around a round: play, type a name, look at the scoreboard.

use rand::rngs::ThreadRng;
use rand::{thread_rng, Rng};
use std::time::Instant;
use tracing::{debug, info};

use crate::config::Config;
use crate::deck::CARDS_PER_COLOR;
use crate::leaderboard::{top, Leaderboard, ScoreEntry};
use crate::name_entry::NameEntry;
use crate::render::DECK_RECT;
use crate::round::{Action, DrawOutcome, Flow, Phase, RoundState};

/// A typed character or a backspace from the name prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Typed {
    Char(char),
    Back,
}

/// What the player did since the last update, in frame coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Input {
    pub begin: bool,
    pub confirm: bool,
    pub quit: bool,
    pub click: Option<(usize, usize)>,
    pub typed: Vec<Typed>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Playing,
    NameEntry(NameEntry),
    Scoreboard { name: String, scores: Vec<ScoreEntry> },
}

pub struct App<R: Rng = ThreadRng> {
    round: RoundState,
    screen: Screen,
    leaderboard: Leaderboard,
    scoreboard_size: usize,
    rng: R,
}

impl App<ThreadRng> {
    pub fn new(config: &Config) -> Self {
        App::with_rng(config, thread_rng())
    }
}

impl<R: Rng> App<R> {
    pub fn with_rng(config: &Config, mut rng: R) -> Self {
        App {
            round: RoundState::new(&mut rng),
            screen: Screen::Playing,
            leaderboard: Leaderboard::new(config.leaderboard_path.clone()),
            scoreboard_size: config.scoreboard_size,
            rng,
        }
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The scoreboard rows to show.
    pub fn top_scores(&self) -> &[ScoreEntry] {
        match &self.screen {
            Screen::Scoreboard { scores, .. } => top(scores, self.scoreboard_size),
            _ => &[],
        }
    }

    pub fn title(&self, now: Instant) -> String {
        match self.round.phase() {
            Phase::NotStarted => "Hexsort | Press SPACE to begin".to_string(),
            _ => format!(
                "Hexsort | Time: {:.2}s | Collected: {}/{}",
                self.round.elapsed(now).as_secs_f64(),
                self.round.cards_held(),
                CARDS_PER_COLOR
            ),
        }
    }

    /// Update the `App` state from one frame of input.
    pub fn update(&mut self, input: &Input, now: Instant) -> Flow {
        if input.quit {
            return self.round.apply(Action::Quit, now, &mut self.rng);
        }

        match &mut self.screen {
            Screen::Playing => self.play(input, now),
            Screen::NameEntry(entry) => {
                for typed in &input.typed {
                    match typed {
                        Typed::Char(c) => {
                            entry.push(*c);
                        }
                        Typed::Back => entry.backspace(),
                    }
                }
                if input.confirm {
                    let name = entry.submit();
                    self.record(name);
                }
            }
            Screen::Scoreboard { .. } => {
                if input.confirm {
                    self.round.apply(Action::Reset, now, &mut self.rng);
                    self.screen = Screen::Playing;
                }
            }
        }
        Flow::Continue
    }

    fn play(&mut self, input: &Input, now: Instant) {
        if input.begin {
            self.round.apply(Action::Begin, now, &mut self.rng);
        }
        if input.confirm && self.round.is_stalled() {
            info!("deck ran out, dealing again");
            self.round.apply(Action::Reset, now, &mut self.rng);
            return;
        }
        let on_deck = input
            .click
            .map_or(false, |(x, y)| DECK_RECT.contains(x, y));
        if on_deck && !self.round.deck().is_empty() {
            let outcome = self.round.draw_top_card(now);
            debug!(?outcome, "draw");
            if let DrawOutcome::Completed(_) = outcome {
                self.screen = Screen::NameEntry(NameEntry::new());
            }
        }
    }

    // name entry always finishes before the board is touched
    fn record(&mut self, name: String) {
        let time = self.round.total_time().as_secs_f64();
        let scores = self.leaderboard.record_result(&name, time);
        self.screen = Screen::Scoreboard { name, scores };
    }
}
