// File selection: the desktop dialog through `rfd`, or a typed path through
// `dialoguer` for terminals without a desktop session.

use crate::error::SelectionError;
use dialoguer::Input;
use std::path::{Path, PathBuf};

/// Named set of extensions a picker accepts.
#[derive(Debug, Clone, Copy)]
pub struct FileFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

impl FileFilter {
    pub const TEXT_FILES: FileFilter = FileFilter {
        name: "Text/Markdown Files",
        extensions: &["txt", "md"],
    };

    /// Whether `path` has one of the filter's extensions (case-insensitive).
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

/// Asks the user for one file. `Ok(None)` means the user cancelled.
pub trait FileSelector {
    fn pick_file(&self, filter: &FileFilter) -> Result<Option<PathBuf>, SelectionError>;
}

/// Native open-file dialog.
#[derive(Debug, Default)]
pub struct NativeSelector {
    start_dir: Option<PathBuf>,
}

impl NativeSelector {
    pub fn new(start_dir: Option<&Path>) -> Self {
        NativeSelector {
            start_dir: start_dir.map(Path::to_path_buf),
        }
    }
}

impl FileSelector for NativeSelector {
    fn pick_file(&self, filter: &FileFilter) -> Result<Option<PathBuf>, SelectionError> {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Select .md/.txt File")
            .add_filter(filter.name, filter.extensions);
        if let Some(dir) = &self.start_dir {
            dialog = dialog.set_directory(dir);
        }
        Ok(dialog.pick_file())
    }
}

/// Prompts for a path on the terminal.
#[derive(Debug, Default)]
pub struct PromptSelector;

impl FileSelector for PromptSelector {
    fn pick_file(&self, filter: &FileFilter) -> Result<Option<PathBuf>, SelectionError> {
        let answer: String = Input::new()
            .with_prompt("File path (.txt/.md, empty to cancel)")
            .allow_empty(true)
            .interact_text()?;
        parse_answer(&answer, filter)
    }
}

fn parse_answer(answer: &str, filter: &FileFilter) -> Result<Option<PathBuf>, SelectionError> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(None);
    }
    let path = PathBuf::from(answer);
    if !filter.matches(&path) {
        return Err(SelectionError::UnsupportedFile(path));
    }
    Ok(Some(path))
}
