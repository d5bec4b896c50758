// src/pipe/input.rs

/// Build the text fed to the child's stdin.
///
/// Non-empty selections are joined with a single space in document order.
/// When no selection has any text, the whole document is used instead.
pub fn aggregate_input<S: AsRef<str>>(selections: &[S], document: &str) -> String {
    let selected: Vec<&str> = selections
        .iter()
        .map(AsRef::as_ref)
        .filter(|text| !text.is_empty())
        .collect();

    if selected.is_empty() {
        document.to_string()
    } else {
        selected.join(" ")
    }
}
