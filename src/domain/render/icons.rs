//! Time-of-day icons.

/// Icon on the "now" line.
pub const NOW_ICON: &str = "💡";

/// Icon for hours before the first threshold and on day separators.
pub const NIGHT_ICON: &str = "🌃";

/// `(first hour, icon)`, ascending. An hour takes the icon of the greatest
/// threshold not above it.
pub const HOUR_ICONS: [(u32, &str); 4] = [
    (6, "🌅"),
    (12, "🏙\u{FE0F}"),
    (18, "🌆"),
    (23, NIGHT_ICON),
];

/// Icon for a civil hour (0..=23). Early hours wrap to the night icon.
pub fn icon_for_hour(hour: u32) -> &'static str {
    HOUR_ICONS
        .iter()
        .rev()
        .find(|(threshold, _)| *threshold <= hour)
        .map_or(NIGHT_ICON, |&(_, icon)| icon)
}
