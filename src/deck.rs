/// In-memory deck state: current position, flip side, ordering

use crate::card::Flashcard;
use rand::Rng;
use rand::seq::SliceRandom;

/// What the card face should display right now
#[derive(Debug, PartialEq)]
pub enum CardView<'a> {
    Empty,
    Face { card: &'a Flashcard, flipped: bool },
}

/// The deck currently loaded in the popup. Navigation and shuffling never
/// touch persistent storage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Deck {
    cards: Vec<Flashcard>,
    index: usize,
    flipped: bool,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: Vec<Flashcard>) -> Self {
        let mut deck = Deck::new();
        deck.replace_all(cards);
        deck
    }

    /// Swap in a new card list, back at the first card, front side up.
    pub fn replace_all(&mut self, cards: Vec<Flashcard>) {
        self.cards = cards;
        self.index = 0;
        self.flipped = false;
    }

    pub fn clear(&mut self) {
        self.replace_all(Vec::new());
    }

    /// Advance with wrap-around, returning to the front face.
    pub fn next(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.cards.len();
        self.flipped = false;
    }

    /// Step back with wrap-around, returning to the front face.
    pub fn prev(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.index = (self.index + self.cards.len() - 1) % self.cards.len();
        self.flipped = false;
    }

    pub fn flip(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.flipped = !self.flipped;
    }

    /// Uniform in-place permutation (Fisher-Yates); position and flip reset.
    /// The new order is not persisted.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.index = 0;
        self.flipped = false;
    }

    pub fn view(&self) -> CardView<'_> {
        match self.cards.get(self.index) {
            Some(card) => CardView::Face {
                card,
                flipped: self.flipped,
            },
            None => CardView::Empty,
        }
    }

    pub fn progress_label(&self) -> String {
        if self.cards.is_empty() {
            "0 / 0".to_string()
        } else {
            format!("{} / {}", self.index + 1, self.cards.len())
        }
    }
}
