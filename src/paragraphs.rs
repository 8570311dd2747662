//! Splitting file content into paragraph units.

/// Separator between paragraphs: one blank line.
pub const SEPARATOR: &str = "\n\n";

/// Split `content` on blank lines, trimming every segment and dropping the
/// ones that are empty after trimming. CRLF and lone CR endings are treated
/// as LF, so no `\r` ever reaches a paragraph.
pub fn split_paragraphs(content: &str) -> Vec<String> {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Rebuild text from paragraphs. `split_paragraphs(&join_paragraphs(p)) == p`
/// for any output of `split_paragraphs`.
pub fn join_paragraphs<S: AsRef<str>>(paragraphs: &[S]) -> String {
    paragraphs
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}
