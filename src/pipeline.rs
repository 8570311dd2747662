//! The import pipeline: file → paragraphs → cards, with progress reporting.
//!
//! A job runs linearly through `Reading → Splitting → (Empty | Simulating →
//! Done)`. Every update is mirrored to a [`StatusDisplay`] as it happens, and
//! the progress indicator is hidden again on every exit path.

use crate::board::{Card, CardSink};
use crate::error::ProcessingError;
use crate::paragraphs::split_paragraphs;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

pub const EMPTY_STATUS: &str = "File is empty.";
pub const FAILED_STATUS: &str = "Upload failed.";
pub const ALERT_TITLE: &str = "Success";
pub const ALERT_MESSAGE: &str = "Board created with cards.";

/// Where a job reports what it is doing.
pub trait StatusDisplay {
    fn set_status(&mut self, text: &str);
    fn set_progress_visible(&mut self, visible: bool);
    /// `fraction` is in `0.0..=1.0`.
    fn set_progress(&mut self, fraction: f64);
    /// Blocks until the user dismisses the dialog.
    fn show_alert(&mut self, title: &str, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    Idle,
    Reading,
    Splitting,
    Empty,
    Simulating,
    Done,
}

/// How a job that did not fail ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Empty,
    Uploaded { cards: usize },
}

/// State of the single in-flight import.
#[derive(Debug)]
pub struct ImportJob {
    pub source_path: PathBuf,
    pub paragraphs: Vec<String>,
    pub progress: f64,
    pub status: String,
    pub phase: JobPhase,
}

impl ImportJob {
    pub fn new(source_path: &Path) -> Self {
        ImportJob {
            source_path: source_path.to_path_buf(),
            paragraphs: Vec::new(),
            progress: 0.0,
            status: String::new(),
            phase: JobPhase::Idle,
        }
    }

    /// Base name of the source file, for status messages.
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source_path.display().to_string())
    }

    fn set_status<D: StatusDisplay + ?Sized>(&mut self, display: &mut D, text: String) {
        display.set_status(&text);
        self.status = text;
    }

    fn set_progress<D: StatusDisplay + ?Sized>(&mut self, display: &mut D, fraction: f64) {
        self.progress = fraction;
        display.set_progress(fraction);
    }
}

/// Hides the progress indicator when dropped, including while unwinding.
struct HideProgressOnDrop<'a, D: StatusDisplay + ?Sized>(&'a mut D);

impl<D: StatusDisplay + ?Sized> Deref for HideProgressOnDrop<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        &*self.0
    }
}

impl<D: StatusDisplay + ?Sized> DerefMut for HideProgressOnDrop<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        &mut *self.0
    }
}

impl<D: StatusDisplay + ?Sized> Drop for HideProgressOnDrop<'_, D> {
    fn drop(&mut self) {
        self.0.set_progress_visible(false);
    }
}

/// Runs import jobs against a card sink.
pub struct ImportPipeline<S> {
    sink: S,
    card_prefix: String,
}

impl<S: CardSink> ImportPipeline<S> {
    pub fn new(sink: S, card_prefix: impl Into<String>) -> Self {
        ImportPipeline {
            sink,
            card_prefix: card_prefix.into(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Import the file at `path`, one card per paragraph.
    ///
    /// Failures are logged, reported to `display` as [`FAILED_STATUS`] and
    /// returned; nothing here panics on bad input. No alert is shown unless
    /// every card was added.
    pub async fn import<D: StatusDisplay + ?Sized>(
        &self,
        path: &Path,
        display: &mut D,
    ) -> Result<ImportOutcome, ProcessingError> {
        let mut job = ImportJob::new(path);
        let mut display = HideProgressOnDrop(display);

        tracing::info!(path = %path.display(), "import started");
        let processing = format!("Processing {}...", job.file_name());
        job.set_status(&mut *display, processing);
        display.set_progress_visible(true);
        job.set_progress(&mut *display, 0.0);

        let result = self.run(&mut job, &mut *display).await;
        match &result {
            Ok(outcome) => {
                tracing::info!(path = %path.display(), ?outcome, "import finished");
            }
            Err(e) => {
                tracing::error!(path = %path.display(), phase = ?job.phase, "import failed: {}", e);
                job.set_status(&mut *display, FAILED_STATUS.to_string());
            }
        }
        job.phase = JobPhase::Idle;
        result
    }

    async fn run<D: StatusDisplay + ?Sized>(
        &self,
        job: &mut ImportJob,
        display: &mut D,
    ) -> Result<ImportOutcome, ProcessingError> {
        job.phase = JobPhase::Reading;
        let content = tokio::fs::read_to_string(&job.source_path)
            .await
            .map_err(|source| ProcessingError::Read {
                path: job.source_path.clone(),
                source,
            })?;

        job.phase = JobPhase::Splitting;
        job.paragraphs = split_paragraphs(&content);
        if job.paragraphs.is_empty() {
            job.phase = JobPhase::Empty;
            job.set_status(display, EMPTY_STATUS.to_string());
            return Ok(ImportOutcome::Empty);
        }

        job.phase = JobPhase::Simulating;
        let total = job.paragraphs.len();
        for index in 0..total {
            let card = Card::from_paragraph(&self.card_prefix, index, &job.paragraphs[index]);
            self.sink
                .add_card(&card)
                .await
                .map_err(|source| ProcessingError::Upload {
                    card: card.name.clone(),
                    source,
                })?;
            job.set_progress(display, (index + 1) as f64 / total as f64);
        }

        job.phase = JobPhase::Done;
        job.set_status(display, format!("Done! {} cards added.", total));
        display.show_alert(ALERT_TITLE, ALERT_MESSAGE);
        Ok(ImportOutcome::Uploaded { cards: total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SimulatedBoard;
    use crate::error::BoardError;
    use async_trait::async_trait;
    use std::time::Duration;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Status(String),
        Visible(bool),
        Progress(f64),
        Alert(String, String),
    }

    #[derive(Default)]
    struct RecordingDisplay {
        events: Vec<Event>,
    }

    impl RecordingDisplay {
        fn statuses(&self) -> Vec<&str> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Status(s) => Some(s.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn progress(&self) -> Vec<f64> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Progress(p) => Some(*p),
                    _ => None,
                })
                .collect()
        }

        fn alerts(&self) -> usize {
            self.events
                .iter()
                .filter(|e| matches!(e, Event::Alert(..)))
                .count()
        }
    }

    impl StatusDisplay for RecordingDisplay {
        fn set_status(&mut self, text: &str) {
            self.events.push(Event::Status(text.to_string()));
        }
        fn set_progress_visible(&mut self, visible: bool) {
            self.events.push(Event::Visible(visible));
        }
        fn set_progress(&mut self, fraction: f64) {
            self.events.push(Event::Progress(fraction));
        }
        fn show_alert(&mut self, title: &str, message: &str) {
            self.events
                .push(Event::Alert(title.to_string(), message.to_string()));
        }
    }

    struct RejectingSink {
        fail_at: usize,
        seen: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl CardSink for RejectingSink {
        async fn add_card(&self, card: &Card) -> Result<(), BoardError> {
            let n = self.seen.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if n == self.fail_at {
                return Err(BoardError::Rejected(card.name.clone()));
            }
            Ok(())
        }
    }

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn pipeline() -> ImportPipeline<SimulatedBoard> {
        let board = SimulatedBoard::new("Board", "List", Duration::from_millis(600));
        ImportPipeline::new(board, "Note")
    }

    #[tokio::test(start_paused = true)]
    async fn three_paragraphs_become_three_cards() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.md", "Hello world\n\nSecond para\n\nThird");
        let pipeline = pipeline();
        let mut display = RecordingDisplay::default();

        let outcome = pipeline.import(&path, &mut display).await.unwrap();

        assert_eq!(outcome, ImportOutcome::Uploaded { cards: 3 });
        assert_eq!(pipeline.sink().cards_added(), 3);
        assert_eq!(
            display.statuses(),
            vec!["Processing notes.md...", "Done! 3 cards added."]
        );
        assert_eq!(display.progress(), vec![0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]);
        assert_eq!(
            display.events.first(),
            Some(&Event::Status("Processing notes.md...".into()))
        );
        assert_eq!(display.events.last(), Some(&Event::Visible(false)));
        assert!(display.events.contains(&Event::Alert(
            ALERT_TITLE.into(),
            ALERT_MESSAGE.into()
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn progress_reaches_one_before_the_success_status() {
        let dir = TempDir::new().unwrap();
        let content = (1..=7)
            .map(|i| format!("paragraph {i}"))
            .collect::<Vec<_>>()
            .join("\n\n");
        let path = write_file(&dir, "seven.txt", &content);
        let mut display = RecordingDisplay::default();

        pipeline().import(&path, &mut display).await.unwrap();

        let progress = display.progress();
        let expected: Vec<f64> = std::iter::once(0.0)
            .chain((1..=7).map(|k| k as f64 / 7.0))
            .collect();
        assert_eq!(progress, expected);
        assert!(progress.windows(2).all(|w| w[0] < w[1]));

        let last_progress = display
            .events
            .iter()
            .rposition(|e| matches!(e, Event::Progress(_)))
            .unwrap();
        let done = display
            .events
            .iter()
            .position(|e| *e == Event::Status("Done! 7 cards added.".into()))
            .unwrap();
        assert!(last_progress < done);
    }

    #[tokio::test(start_paused = true)]
    async fn each_card_costs_one_delay() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.md", "a\n\nb\n\nc");
        let mut display = RecordingDisplay::default();

        let start = tokio::time::Instant::now();
        pipeline().import(&path, &mut display).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(1800));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_file_reports_empty_and_never_advances_progress() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty.txt", "");
        let pipeline = pipeline();
        let mut display = RecordingDisplay::default();

        let outcome = pipeline.import(&path, &mut display).await.unwrap();

        assert_eq!(outcome, ImportOutcome::Empty);
        assert_eq!(display.statuses().last(), Some(&EMPTY_STATUS));
        assert!(display.progress().iter().all(|p| *p == 0.0));
        assert_eq!(display.alerts(), 0);
        assert_eq!(pipeline.sink().cards_added(), 0);
        assert_eq!(display.events.last(), Some(&Event::Visible(false)));
    }

    #[tokio::test(start_paused = true)]
    async fn whitespace_only_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "blank.md", "\n\n   \n\n\t\n\n");
        let mut display = RecordingDisplay::default();

        let outcome = pipeline().import(&path, &mut display).await.unwrap();
        assert_eq!(outcome, ImportOutcome::Empty);
        assert_eq!(display.statuses().last(), Some(&EMPTY_STATUS));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_file_fails_without_alert() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("does-not-exist.md");
        let mut display = RecordingDisplay::default();

        let err = pipeline().import(&path, &mut display).await.unwrap_err();

        assert!(matches!(err, ProcessingError::Read { .. }));
        assert_eq!(display.statuses().last(), Some(&FAILED_STATUS));
        assert_eq!(display.alerts(), 0);
        assert_eq!(display.events.last(), Some(&Event::Visible(false)));
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_utf8_is_a_read_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("binary.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();
        let mut display = RecordingDisplay::default();

        let err = pipeline().import(&path, &mut display).await.unwrap_err();
        assert!(matches!(err, ProcessingError::Read { .. }));
        assert_eq!(display.statuses().last(), Some(&FAILED_STATUS));
    }

    #[tokio::test]
    async fn rejected_card_fails_the_whole_job() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "notes.md", "one\n\ntwo\n\nthree");
        let sink = RejectingSink {
            fail_at: 1,
            seen: Default::default(),
        };
        let pipeline = ImportPipeline::new(sink, "Note");
        let mut display = RecordingDisplay::default();

        let err = pipeline.import(&path, &mut display).await.unwrap_err();

        match err {
            ProcessingError::Upload { card, .. } => assert_eq!(card, "Note 2"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(display.progress(), vec![0.0, 1.0 / 3.0]);
        assert_eq!(display.statuses().last(), Some(&FAILED_STATUS));
        assert_eq!(display.alerts(), 0);
        assert_eq!(display.events.last(), Some(&Event::Visible(false)));
    }

    #[test]
    fn file_name_falls_back_to_the_whole_path() {
        assert_eq!(ImportJob::new(Path::new("/tmp/a/notes.md")).file_name(), "notes.md");
        assert_eq!(ImportJob::new(Path::new("/")).file_name(), "/");
    }
}
