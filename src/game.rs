//! Game state: phase, reveal resolution and guess history

use crate::types::{Artwork, SearchResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Loading,
    Playing,
    Won,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Guess {
    Wrong(SearchResult),
    Skipped,
    Correct(SearchResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Wrong,
    AlreadyGuessed,
    /// Not playing (loading, won or failed)
    Ignored,
}

pub struct Game {
    phase: Phase,
    artwork: Option<Artwork>,
    initial_resolution: u32,
    step: u32,
    resolution: u32,
    history: Vec<Guess>,
}

impl Game {
    pub fn new(initial_resolution: u32, step: u32) -> Self {
        let initial_resolution = initial_resolution.max(1);
        Self {
            phase: Phase::Loading,
            artwork: None,
            initial_resolution,
            step: step.max(1),
            resolution: initial_resolution,
            history: Vec::new(),
        }
    }

    /// Back to loading, e.g. before retrying the daily fetch
    pub fn reset(&mut self) {
        self.phase = Phase::Loading;
        self.artwork = None;
        self.resolution = self.initial_resolution;
        self.history.clear();
    }

    pub fn start(&mut self, artwork: Artwork) {
        self.artwork = Some(artwork);
        self.phase = Phase::Playing;
        self.resolution = self.initial_resolution;
        self.history.clear();
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = Phase::Failed(message.into());
    }

    pub fn guess(&mut self, result: &SearchResult) -> GuessOutcome {
        if self.phase != Phase::Playing {
            return GuessOutcome::Ignored;
        }
        let Some(artwork) = &self.artwork else {
            return GuessOutcome::Ignored;
        };

        if result.id == artwork.id {
            self.history.push(Guess::Correct(result.clone()));
            self.phase = Phase::Won;
            return GuessOutcome::Correct;
        }
        if self.was_guessed(result.id) {
            return GuessOutcome::AlreadyGuessed;
        }
        self.history.push(Guess::Wrong(result.clone()));
        self.advance();
        GuessOutcome::Wrong
    }

    /// Returns false when not playing
    pub fn skip(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.history.push(Guess::Skipped);
        self.advance();
        true
    }

    fn advance(&mut self) {
        self.resolution = self.resolution.saturating_add(self.step);
    }

    pub fn was_guessed(&self, id: u32) -> bool {
        self.history.iter().any(|g| match g {
            Guess::Wrong(r) | Guess::Correct(r) => r.id == id,
            Guess::Skipped => false,
        })
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn artwork(&self) -> Option<&Artwork> {
        self.artwork.as_ref()
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn history(&self) -> &[Guess] {
        &self.history
    }

    /// Guesses and skips so far, including the winning guess
    pub fn attempts(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artwork(id: u32) -> Artwork {
        Artwork {
            id,
            title: "The Harvesters".into(),
            artist: "Pieter Bruegel the Elder".into(),
            date: "1565".into(),
            image_url: "https://img/harvesters.jpg".into(),
            department: "European Paintings".into(),
            object_url: "https://museum.test/harvesters".into(),
        }
    }

    fn result(id: u32) -> SearchResult {
        SearchResult {
            id,
            title: format!("Candidate {}", id),
            artist: "Someone".into(),
            date: "1600".into(),
        }
    }

    fn playing() -> Game {
        let mut game = Game::new(8, 4);
        game.start(artwork(435809));
        game
    }

    #[test]
    fn starts_loading_and_ignores_input() {
        let mut game = Game::new(8, 4);
        assert_eq!(game.phase(), &Phase::Loading);
        assert_eq!(game.guess(&result(1)), GuessOutcome::Ignored);
        assert!(!game.skip());
        assert_eq!(game.resolution(), 8);
        assert_eq!(game.attempts(), 0);
    }

    #[test]
    fn wrong_guess_raises_resolution() {
        let mut game = playing();
        assert_eq!(game.guess(&result(1)), GuessOutcome::Wrong);
        assert_eq!(game.resolution(), 12);
        assert_eq!(game.phase(), &Phase::Playing);
        assert_eq!(game.history(), &[Guess::Wrong(result(1))]);
    }

    #[test]
    fn skip_raises_resolution_without_bound() {
        let mut game = playing();
        for _ in 0..100 {
            assert!(game.skip());
        }
        assert_eq!(game.resolution(), 8 + 100 * 4);
        assert_eq!(game.attempts(), 100);
    }

    #[test]
    fn repeated_wrong_guess_is_free() {
        let mut game = playing();
        game.guess(&result(1));
        assert_eq!(game.guess(&result(1)), GuessOutcome::AlreadyGuessed);
        assert_eq!(game.resolution(), 12);
        assert_eq!(game.attempts(), 1);
    }

    #[test]
    fn correct_guess_wins_and_freezes() {
        let mut game = playing();
        game.skip();
        assert_eq!(game.guess(&result(435809)), GuessOutcome::Correct);
        assert_eq!(game.phase(), &Phase::Won);
        assert_eq!(game.attempts(), 2);
        assert!(game.was_guessed(435809));

        let resolution = game.resolution();
        assert_eq!(game.guess(&result(2)), GuessOutcome::Ignored);
        assert!(!game.skip());
        assert_eq!(game.resolution(), resolution);
    }

    #[test]
    fn start_resets_progress() {
        let mut game = playing();
        game.skip();
        game.start(artwork(5));
        assert_eq!(game.resolution(), 8);
        assert!(game.history().is_empty());
        assert_eq!(game.artwork().map(|a| a.id), Some(5));
    }

    #[test]
    fn failure_and_reset() {
        let mut game = Game::new(0, 0);
        assert_eq!(game.resolution(), 1);
        game.fail("offline");
        assert_eq!(game.phase(), &Phase::Failed("offline".into()));
        assert!(!game.skip());
        game.reset();
        assert_eq!(game.phase(), &Phase::Loading);
    }
}
