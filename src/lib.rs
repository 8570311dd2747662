// Library root
// -----------
// This crate exposes the import pipeline and its collaborators. The binary
// (`main.rs`) wires them to the terminal.
//
// Module responsibilities:
// - `paragraphs`: splits file content into paragraph units.
// - `board`: the card model and the `CardSink` seam, with the simulated
//   board used in place of a real upload.
// - `pipeline`: runs one import job and reports it to a `StatusDisplay`.
// - `picker`: file selection through the desktop dialog or a typed path.
// - `settings`: read-only user settings from the home directory.
// - `error`: error types for selection and processing.
// - `ui`: the terminal display and the interactive menu.
pub mod board;
pub mod error;
pub mod paragraphs;
pub mod picker;
pub mod pipeline;
pub mod settings;
pub mod ui;
