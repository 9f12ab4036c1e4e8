//! Handle input gathering for the `analyze` command.

use std::path::Path;

use anyhow::Context;

/// Splits free-form input on commas and whitespace (including newlines).
///
/// `"@nasa, natgeo\ninstagram"` → `["@nasa", "natgeo", "instagram"]`. The
/// leading `@` and duplicates are left for `normalize_handles`.
pub(crate) fn split_handle_input(text: &str) -> Vec<String> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|piece| !piece.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Handles from positional arguments first, then from `file` if given.
pub(crate) fn collect_handles(args: &[String], file: Option<&Path>) -> anyhow::Result<Vec<String>> {
    let mut handles: Vec<String> = args.iter().flat_map(|a| split_handle_input(a)).collect();

    if let Some(path) = file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read handles from {}", path.display()))?;
        handles.extend(split_handle_input(&text));
    }

    Ok(handles)
}
