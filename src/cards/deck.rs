//! Per-session shuffled draw queues.
//!
//! Decks hold card IDs only. Master definitions live in the
//! [`CardLibrary`] and are never touched by drawing.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use tracing::debug;

use super::definition::{CardCategory, CardId};
use super::registry::CardLibrary;
use crate::core::{GameError, GameRng, Result};

/// Working decks, one queue per category.
#[derive(Clone, Debug)]
pub struct DeckStore {
    queues: FxHashMap<CardCategory, VecDeque<CardId>>,
    rng: GameRng,
    reshuffles: u32,
}

impl DeckStore {
    /// Create an empty store drawing randomness from `rng`.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self {
            queues: FxHashMap::default(),
            rng,
            reshuffles: 0,
        }
    }

    /// Shuffle every category's master list into a fresh queue.
    pub fn build(&mut self, library: &CardLibrary) {
        self.queues.clear();
        self.reshuffles = 0;
        for category in CardCategory::ALL {
            let queue = self.shuffled(library, category);
            self.queues.insert(category, queue);
        }
    }

    fn shuffled(&mut self, library: &CardLibrary, category: CardCategory) -> VecDeque<CardId> {
        let mut ids = library.master(category).to_vec();
        self.rng.shuffle(&mut ids);
        ids.into()
    }

    /// Pop the next card, reshuffling the master list first if the queue
    /// is empty.
    pub fn draw(&mut self, library: &CardLibrary, category: CardCategory) -> Result<CardId> {
        let empty = self.queues.get(&category).map_or(true, VecDeque::is_empty);
        if empty {
            if library.master(category).is_empty() {
                return Err(GameError::EmptyDeck(category));
            }
            let queue = self.shuffled(library, category);
            self.queues.insert(category, queue);
            self.reshuffles += 1;
            debug!(%category, "deck exhausted, reshuffled");
        }

        self.queues
            .get_mut(&category)
            .and_then(VecDeque::pop_front)
            .ok_or(GameError::EmptyDeck(category))
    }

    /// Cards left before the next reshuffle.
    #[must_use]
    pub fn remaining(&self, category: CardCategory) -> usize {
        self.queues.get(&category).map_or(0, VecDeque::len)
    }

    /// Reshuffles triggered by exhaustion since the last build.
    #[must_use]
    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }

    pub fn clear(&mut self) {
        self.queues.clear();
        self.reshuffles = 0;
    }

    /// Replace the randomness source, for a new session epoch.
    pub fn reseed(&mut self, rng: GameRng) {
        self.rng = rng;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardDefinition;

    fn library(n: u32) -> CardLibrary {
        let mut library = CardLibrary::new();
        for i in 0..n {
            library
                .register(CardDefinition::new(CardId::new(i), CardCategory::Chance, format!("C{i}")))
                .unwrap();
        }
        library
    }

    #[test]
    fn test_build_contains_every_card() {
        let lib = library(10);
        let mut decks = DeckStore::new(GameRng::new(1));
        decks.build(&lib);

        assert_eq!(decks.remaining(CardCategory::Chance), 10);
        assert_eq!(decks.remaining(CardCategory::News), 0);

        let mut drawn: Vec<_> = (0..10).map(|_| decks.draw(&lib, CardCategory::Chance).unwrap()).collect();
        drawn.sort();
        assert_eq!(drawn, lib.master(CardCategory::Chance).to_vec());
    }

    #[test]
    fn test_reshuffle_on_exhaustion() {
        let lib = library(3);
        let mut decks = DeckStore::new(GameRng::new(2));
        decks.build(&lib);

        for _ in 0..3 {
            decks.draw(&lib, CardCategory::Chance).unwrap();
        }
        assert_eq!(decks.remaining(CardCategory::Chance), 0);

        decks.draw(&lib, CardCategory::Chance).unwrap();
        assert_eq!(decks.reshuffles(), 1);
        assert_eq!(decks.remaining(CardCategory::Chance), 2);
        assert_eq!(lib.master(CardCategory::Chance).len(), 3);
    }

    #[test]
    fn test_draw_without_build_reshuffles() {
        let lib = library(2);
        let mut decks = DeckStore::new(GameRng::new(3));

        assert!(decks.draw(&lib, CardCategory::Chance).is_ok());
        assert_eq!(decks.remaining(CardCategory::Chance), 1);
    }

    #[test]
    fn test_empty_category_errors() {
        let lib = library(2);
        let mut decks = DeckStore::new(GameRng::new(4));
        decks.build(&lib);

        let err = decks.draw(&lib, CardCategory::News).unwrap_err();
        assert_eq!(err, GameError::EmptyDeck(CardCategory::News));
    }

    #[test]
    fn test_same_seed_same_order() {
        let lib = library(8);
        let mut a = DeckStore::new(GameRng::new(5));
        let mut b = DeckStore::new(GameRng::new(5));
        a.build(&lib);
        b.build(&lib);

        for _ in 0..8 {
            assert_eq!(
                a.draw(&lib, CardCategory::Chance).unwrap(),
                b.draw(&lib, CardCategory::Chance).unwrap()
            );
        }
    }
}
