use rand::seq::SliceRandom;
use rand::Rng;

use crate::colors::{CardColor, Rgb, NUM_COLORS, PALETTE};

pub const CARDS_PER_COLOR: usize = 8;
pub const TOTAL_CARDS: usize = NUM_COLORS * CARDS_PER_COLOR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    color: CardColor,
}

impl Card {
    pub fn new(color: CardColor) -> Self {
        Card { color }
    }

    pub fn color(&self) -> CardColor {
        self.color
    }

    pub fn name(&self) -> &'static str {
        self.color.name
    }

    pub fn rgb(&self) -> Rgb {
        self.color.rgb
    }

    pub fn hex(&self) -> &'static str {
        self.color.hex()
    }
}

/// Cards waiting to be revealed. The top of the deck is the end of the sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn pop_top(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// Builds all `TOTAL_CARDS` cards and shuffles them with `rng`.
pub fn new_deck<R: Rng + ?Sized>(rng: &mut R) -> Deck {
    let mut cards = Vec::with_capacity(TOTAL_CARDS);
    for color in PALETTE.iter() {
        for _ in 0..CARDS_PER_COLOR {
            cards.push(Card::new(*color));
        }
    }
    cards.shuffle(rng);
    Deck { cards }
}

/// Takes the first card of a freshly built deck as the round's target.
///
/// Returns `None` only for an empty deck, which `new_deck` never produces.
pub fn draw_target(mut deck: Deck) -> Option<(Card, Deck)> {
    if deck.is_empty() {
        return None;
    }
    let target = deck.cards.remove(0);
    Some((target, deck))
}

/// A fresh shuffle split into the target card and the play deck.
pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> (Card, Deck) {
    let mut deck = new_deck(rng);
    // always TOTAL_CARDS long here
    let target = deck.cards.remove(0);
    (target, deck)
}
