//! Text surfaced to the host and to the overlay files.
//!
//! The overlay tool reads these files verbatim, so the formats here are
//! part of the output contract: no trailing newline, no padding.

/// Format the counter file contents.
///
/// # Examples
/// ```
/// use streamlink_types::formatting::format_counter;
/// assert_eq!(format_counter(0), "0");
/// assert_eq!(format_counter(42), "42");
/// ```
pub fn format_counter(value: u32) -> String {
    value.to_string()
}

/// Format the grouped-status file contents.
///
/// # Examples
/// ```
/// use streamlink_types::formatting::format_grouped;
/// assert_eq!(format_grouped(true), "1");
/// assert_eq!(format_grouped(false), "0");
/// ```
pub fn format_grouped(grouped: bool) -> &'static str {
    if grouped { "1" } else { "0" }
}

/// Format a milestone alert for the host toast API.
///
/// # Examples
/// ```
/// use streamlink_types::formatting::format_milestone;
/// assert_eq!(format_milestone(5), "Killstreak: 5!");
/// ```
pub fn format_milestone(value: u32) -> String {
    format!("Killstreak: {}!", value)
}
