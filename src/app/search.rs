//! Catalog search and guess handling

use super::App;
use crate::api::MuseumClient;
use crate::game::GuessOutcome;
use crate::types::*;
use eframe::egui;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

impl App {
    /// Start a search for the current query, cancelling any search in flight.
    pub fn start_search(&mut self, ctx: &egui::Context) {
        let term = self.search_query.trim().to_string();
        if term.is_empty() {
            return;
        }

        if let Some(token) = self.search_cancel.take() {
            token.cancel();
        }
        self.search_generation += 1;
        let generation = self.search_generation;
        let token = CancellationToken::new();
        self.search_cancel = Some(token.clone());
        self.search_in_flight = true;

        let client = self.client.clone();
        let limit = self.settings.search_limit();
        let slot = self.search_slot.clone();
        let ctx = ctx.clone();

        info!(term = %term, generation, "Searching catalog");

        self.runtime.spawn(async move {
            if run_search(&client, &term, limit, generation, &token, &slot).await {
                ctx.request_repaint();
            }
        });
    }

    pub fn poll_search(&mut self) {
        let Some(reply) = self.search_slot.take_current(self.search_generation) else {
            return;
        };

        self.search_in_flight = false;
        self.search_cancel = None;
        match reply.result {
            Ok(results) => {
                debug!(count = results.len(), "Search results received");
                if results.is_empty() {
                    self.show_toast("No matching artworks");
                }
                self.search_results = results;
            }
            Err(message) => self.show_toast(format!("Search failed: {}", message)),
        }
    }

    pub fn submit_guess(&mut self, result: &SearchResult) {
        match self.game.guess(result) {
            GuessOutcome::Correct => {
                info!(id = result.id, attempts = self.game.attempts(), "Correct guess");
                if let Some(token) = self.search_cancel.take() {
                    token.cancel();
                }
                self.search_in_flight = false;
            }
            GuessOutcome::Wrong => {
                info!(
                    id = result.id,
                    resolution = self.game.resolution(),
                    "Wrong guess"
                );
                self.show_toast(format!("Not \"{}\". More detail revealed", result.title));
            }
            GuessOutcome::AlreadyGuessed => self.show_toast("Already guessed"),
            GuessOutcome::Ignored => {}
        }
        self.ensure_mosaic();
    }

    pub fn skip(&mut self) {
        if self.game.skip() {
            info!(resolution = self.game.resolution(), "Skipped");
            self.ensure_mosaic();
        }
    }
}

/// Run one search and publish its reply, unless the search was cancelled first.
/// Returns whether a reply reached the slot.
async fn run_search(
    client: &MuseumClient,
    term: &str,
    limit: usize,
    generation: u64,
    token: &CancellationToken,
    slot: &SearchSlot,
) -> bool {
    let result = tokio::select! {
        _ = token.cancelled() => {
            debug!(generation, "Search cancelled");
            return false;
        }
        r = client.search(term, limit) => r,
    };
    if token.is_cancelled() {
        return false;
    }
    let result = result.map_err(|e| {
        warn!(error = %e, term = %term, "Search failed");
        e.to_string()
    });
    let published = slot.publish(SearchReply { generation, result });
    if !published {
        debug!(generation, "Newer search reply already waiting");
    }
    published
}
