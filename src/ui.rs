// UI layer: the terminal stand-in for the import screen.
// `TerminalDisplay` renders job updates with `indicatif` and `crossterm`,
// and `main_menu` is a small `dialoguer` select loop around the pipeline.

use crate::board::{CardSink, SimulatedBoard};
use crate::picker::{FileFilter, FileSelector, NativeSelector, PromptSelector};
use crate::pipeline::{ImportOutcome, ImportPipeline, StatusDisplay};
use crate::settings::Settings;
use anyhow::{Context, Result};
use crossterm::style::Stylize;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Resolution of the progress bar; fractions are scaled to this many steps.
const PROGRESS_STEPS: u64 = 1000;

const FEATURES: &[&str] = &[
    "Browse for a .txt/.md file with the desktop dialog or by typing a path",
    "Import a file passed on the command line",
    "Splits the file into paragraphs on blank lines",
    "Adds each paragraph as a card named 'Note N' (prefix configurable)",
    "Truncates long descriptions to fit the board's limits",
    "Live progress bar during upload",
    "Success dialog once every card is added",
    "Settings read from ~/.cushions_settings.json",
    "Logs to stderr, filtered with RUST_LOG",
];

/// Display collaborator for an interactive terminal.
#[derive(Default)]
pub struct TerminalDisplay {
    bar: Option<ProgressBar>,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn progress_style() -> ProgressStyle {
        ProgressStyle::with_template("{bar:40.cyan/blue} {percent:>3}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

impl StatusDisplay for TerminalDisplay {
    fn set_status(&mut self, text: &str) {
        let line = format!("{} {}", "»".dark_grey(), text.bold());
        match &self.bar {
            // printing above the bar keeps it from being torn
            Some(bar) => bar.println(line),
            None => println!("{}", line),
        }
    }

    fn set_progress_visible(&mut self, visible: bool) {
        if visible {
            if self.bar.is_none() {
                let bar = ProgressBar::new(PROGRESS_STEPS);
                bar.set_style(Self::progress_style());
                self.bar = Some(bar);
            }
        } else if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn set_progress(&mut self, fraction: f64) {
        if let Some(bar) = &self.bar {
            let steps = (fraction.clamp(0.0, 1.0) * PROGRESS_STEPS as f64).round() as u64;
            bar.set_position(steps);
        }
    }

    fn show_alert(&mut self, title: &str, message: &str) {
        let prompt = format!("{}: {}", title.green().bold(), message);
        let ask = || {
            Select::new()
                .with_prompt(prompt.as_str())
                .items(&["OK"])
                .default(0)
                .interact()
        };
        let answer = match &self.bar {
            Some(bar) => bar.suspend(ask),
            None => ask(),
        };
        if let Err(e) = answer {
            tracing::warn!("alert could not be shown: {}", e);
        }
    }
}

fn simulated_pipeline(settings: &Settings) -> ImportPipeline<SimulatedBoard> {
    let board = SimulatedBoard::new(
        settings.board_name.clone(),
        settings.list_name.clone(),
        settings.upload_delay(),
    );
    ImportPipeline::new(board, settings.card_prefix.clone())
}

fn selector(settings: &Settings) -> Box<dyn FileSelector> {
    if settings.native_picker {
        Box::new(NativeSelector::new(settings.start_directory()))
    } else {
        Box::new(PromptSelector)
    }
}

/// Main interactive menu. Runs until the user chooses "Exit".
pub async fn main_menu(settings: &Settings) -> Result<()> {
    let pipeline = simulated_pipeline(settings);
    let selector = selector(settings);
    let mut display = TerminalDisplay::new();

    loop {
        let items = ["Browse file", "Show features", "Show settings", "Exit"];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => handle_browse(selector.as_ref(), &pipeline, &mut display).await,
            1 => show_features(),
            2 => show_settings(settings)?,
            3 => break,
            _ => {}
        }
    }
    Ok(())
}

/// Import a single file without the menu, e.g. one given on the command line.
pub async fn import_path(settings: &Settings, path: &Path) -> Result<ImportOutcome> {
    let pipeline = simulated_pipeline(settings);
    let mut display = TerminalDisplay::new();
    let outcome = pipeline
        .import(path, &mut display)
        .await
        .with_context(|| format!("Importing {}", path.display()))?;
    Ok(outcome)
}

/// Pick a file and import it. Picker failures leave the screen untouched;
/// import failures are already on screen as a status line.
async fn handle_browse<S, D>(
    selector: &dyn FileSelector,
    pipeline: &ImportPipeline<S>,
    display: &mut D,
) where
    S: CardSink,
    D: StatusDisplay + ?Sized,
{
    match selector.pick_file(&FileFilter::TEXT_FILES) {
        Ok(Some(path)) => {
            if let Err(e) = pipeline.import(&path, display).await {
                tracing::debug!("import ended with an error: {}", e);
            }
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("file picking failed: {}", e),
    }
}

fn show_features() {
    println!("{}", "Features".bold());
    for feature in FEATURES {
        println!("  • {}", feature);
    }
}

fn show_settings(settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings).context("Serializing settings")?;
    println!("{} {}", "Settings from".bold(), Settings::path().display());
    println!("{}", json);
    Ok(())
}
