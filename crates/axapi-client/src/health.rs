//! Health monitor down-reason scraping
//!
//! `show health stat` has no usable structured endpoint, so down-reason codes
//! are pulled out of the CLI text. The rules are tied to the device's text
//! layout and are kept exactly as they are:
//!
//! - only lines containing `DOWN` are considered,
//! - the two characters right after the first `/` are taken (the first two
//!   characters of the line when there is no `/`),
//! - a candidate is kept only if it starts with an ASCII digit.

use std::collections::HashSet;

/// Marker of a line describing a down server
pub const DOWN_MARKER: &str = "DOWN";

/// CLI command whose output feeds [`parse_down_reasons`]
pub const HEALTH_STAT_COMMAND: &str = "show health stat";

/// Extract the set of down-reason codes from `show health stat` output
pub fn parse_down_reasons(text: &str) -> HashSet<String> {
    text.lines()
        .filter(|line| line.contains(DOWN_MARKER))
        .filter_map(down_reason_code)
        .collect()
}

fn down_reason_code(line: &str) -> Option<String> {
    // '/' is ASCII, so one past it is always a char boundary.
    let start = line.find('/').map_or(0, |slash| slash + 1);
    let candidate: String = line[start..].chars().take(2).collect();
    let code = candidate.trim_end();

    code.chars()
        .next()
        .filter(|c| c.is_ascii_digit())
        .map(|_| code.to_string())
}
