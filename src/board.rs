// Board module: the card model and the seam cards are uploaded through.
// The only sink shipped is `SimulatedBoard`, which stands in for the board
// service by waiting a fixed delay per card. A real transport would
// implement `CardSink` and slot into the pipeline unchanged.

use crate::error::BoardError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Longest description the board service accepts, in characters.
pub const MAX_DESC_CHARS: usize = 16_384;

/// Default per-card delay of the simulated board.
pub const DEFAULT_UPLOAD_DELAY: Duration = Duration::from_millis(600);

/// One paragraph as it is presented to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub name: String,
    pub desc: String,
}

impl Card {
    /// Build the card for the paragraph at `index` (0-based). Cards are
    /// numbered from 1, so the first one is named `"{prefix} 1"`.
    pub fn from_paragraph(prefix: &str, index: usize, text: &str) -> Self {
        let desc = match text.char_indices().nth(MAX_DESC_CHARS) {
            Some((cut, _)) => text[..cut].to_string(),
            None => text.to_string(),
        };
        Card {
            name: format!("{} {}", prefix, index + 1),
            desc,
        }
    }
}

/// Destination for uploaded cards.
#[async_trait]
pub trait CardSink: Send + Sync {
    async fn add_card(&self, card: &Card) -> Result<(), BoardError>;
}

/// Fake board that accepts every card after `delay`.
#[derive(Debug)]
pub struct SimulatedBoard {
    board_name: String,
    list_name: String,
    delay: Duration,
    added: AtomicUsize,
}

impl SimulatedBoard {
    pub fn new(
        board_name: impl Into<String>,
        list_name: impl Into<String>,
        delay: Duration,
    ) -> Self {
        SimulatedBoard {
            board_name: board_name.into(),
            list_name: list_name.into(),
            delay,
            added: AtomicUsize::new(0),
        }
    }

    /// Number of cards accepted so far.
    pub fn cards_added(&self) -> usize {
        self.added.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CardSink for SimulatedBoard {
    async fn add_card(&self, card: &Card) -> Result<(), BoardError> {
        tokio::time::sleep(self.delay).await;
        self.added.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            board = %self.board_name,
            list = %self.list_name,
            card = %card.name,
            chars = card.desc.chars().count(),
            "card added"
        );
        Ok(())
    }
}
