//! The round state machine.
//!
//! Every transition takes the current time (and, where a new deck is dealt,
//! the random source) from the caller, so nothing in here touches the clock,
//! the window or the disk.

use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::deck::{deal, Card, Deck, CARDS_PER_COLOR};

/// Matching draws needed to finish a round. The target card is the first of
/// the `CARDS_PER_COLOR` cards, so it is not counted here.
pub const COMPLETION_THRESHOLD: usize = CARDS_PER_COLOR - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    GameOver,
}

/// Discrete user events fed in by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Begin,
    Draw,
    Reset,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Not in progress, or the deck is empty.
    Unavailable,
    Matched(Card),
    Discarded(Card),
    /// The matching card that finished the round.
    Completed(Card),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone)]
pub struct RoundState {
    phase: Phase,
    deck: Deck,
    collected: Vec<Card>,
    target: Card,
    collected_count: usize,
    started_at: Option<Instant>,
    total_time: Duration,
}

impl RoundState {
    /// Deal a fresh round, waiting for `start`.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let (target, deck) = deal(rng);
        RoundState::with_deck(target, deck)
    }

    /// A round over a prepared deck.
    pub fn with_deck(target: Card, deck: Deck) -> Self {
        info!(color = target.name(), deck = deck.len(), "round dealt");
        RoundState {
            phase: Phase::NotStarted,
            deck,
            collected: Vec::new(),
            target,
            collected_count: 0,
            started_at: None,
            total_time: Duration::ZERO,
        }
    }

    pub fn start(&mut self, now: Instant) {
        if self.phase != Phase::NotStarted {
            return;
        }
        self.phase = Phase::InProgress;
        self.started_at = Some(now);
        info!(color = self.target.name(), "round started");
    }

    /// Reveal the top card and sort it into the pile or the discard.
    pub fn draw_top_card(&mut self, now: Instant) -> DrawOutcome {
        if self.phase != Phase::InProgress {
            return DrawOutcome::Unavailable;
        }
        let card = match self.deck.pop_top() {
            Some(card) => card,
            None => return DrawOutcome::Unavailable,
        };

        if card.color() != self.target.color() {
            debug!(card = card.name(), left = self.deck.len(), "discarded");
            return DrawOutcome::Discarded(card);
        }

        self.collected.push(card);
        self.collected_count += 1;
        debug!(count = self.collected_count, left = self.deck.len(), "collected");

        if self.collected_count >= COMPLETION_THRESHOLD {
            self.total_time = self
                .started_at
                .map(|start| now.saturating_duration_since(start))
                .unwrap_or_default();
            self.phase = Phase::GameOver;
            info!(seconds = self.total_time.as_secs_f64(), "round complete");
            DrawOutcome::Completed(card)
        } else {
            DrawOutcome::Matched(card)
        }
    }

    /// Throw the round away and deal a new one.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = RoundState::new(rng);
    }

    /// Dispatch a user action.
    ///
    /// Reset is honoured from `GameOver` and from a stalled round; a round in
    /// play can't be thrown away by accident.
    pub fn apply<R: Rng + ?Sized>(&mut self, action: Action, now: Instant, rng: &mut R) -> Flow {
        use Action::*;
        match action {
            Begin => self.start(now),
            Draw => {
                self.draw_top_card(now);
            }
            Reset => {
                if self.phase == Phase::GameOver || self.is_stalled() {
                    self.reset(rng);
                }
            }
            Quit => return Flow::Exit,
        }
        Flow::Continue
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn collected(&self) -> &[Card] {
        &self.collected
    }

    pub fn target(&self) -> &Card {
        &self.target
    }

    pub fn collected_count(&self) -> usize {
        self.collected_count
    }

    /// Cards of the target color in hand, the target card included.
    pub fn cards_held(&self) -> usize {
        self.collected_count + 1
    }

    pub fn total_time(&self) -> Duration {
        self.total_time
    }

    /// Time on the clock: running while in progress, frozen once over.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match (self.phase, self.started_at) {
            (Phase::InProgress, Some(start)) => now.saturating_duration_since(start),
            (Phase::GameOver, _) => self.total_time,
            _ => Duration::ZERO,
        }
    }

    /// The deck ran out before the target color was complete.
    pub fn is_stalled(&self) -> bool {
        self.phase == Phase::InProgress && self.deck.is_empty()
    }
}
