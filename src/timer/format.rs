//! Clock-face formatting

/// Render seconds as `MM:SS`.
///
/// Both fields are padded to width 2. Minutes are not capped, so anything
/// from 6000 seconds up renders with a wider minutes field.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
