//! Render domain — turn a curated series into the fixed-width notification
//! body.
//!
//! ```text
//! 💡 |  Now   -  €0.23 |🌱
//! 🏙️ | 14:00  -  €0.31 |
//! 🌆 | 19:00  -  €0.42 |‼️
//! 🌃   —— 17 Oct ——
//! 🌃 | 03:00  -  €0.18 |⭐
//! ```
//!
//! Lines are laid out in two passes: measure the widest `label  -  price`
//! column, then pad every line to it so the suffix column lines up whatever
//! the digit count of the price.

pub mod icons;

use crate::domain::curation::CuratedSeries;
use crate::network::DEFAULT_TIMEZONE;
use crate::shared::fmt::display_euro;
use crate::shared::{clock_label, in_civil, is_new_day, Tier};
use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use std::collections::BTreeMap;

pub use icons::{icon_for_hour, NIGHT_ICON, NOW_ICON};

/// Title of the regular price notification.
pub const NOTIFICATION_TITLE: &str = "⚡ Today's Energy Prices ⚡";

/// Title for the host's failure notification when prices are unavailable.
pub const UPDATE_FAILED_TITLE: &str = "⚠\u{FE0F} Price Update Failed ⚠\u{FE0F}";

/// Label of the first line, as wide as an `HH:MM` clock label plus padding.
pub const NOW_LABEL: &str = " Now ";

const SUFFIX_SEPARATOR: &str = " |";

/// Renders curated series in a fixed civil timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRenderer {
    tz: Tz,
}

impl Default for MessageRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

/// One price line before padding.
struct Row {
    icon: &'static str,
    base: String,
    suffix: &'static str,
    separator: Option<String>,
}

impl MessageRenderer {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Render `curated` with the given per-timestamp tiers.
    ///
    /// Points missing from `tiers` render without a suffix.
    pub fn render(&self, curated: &CuratedSeries, tiers: &BTreeMap<DateTime<Utc>, Tier>) -> String {
        let mut rows = Vec::with_capacity(curated.len());
        let mut prev: Option<DateTime<Utc>> = None;

        for (idx, point) in curated.points().iter().enumerate() {
            let (icon, label) = if idx == 0 {
                (NOW_ICON, NOW_LABEL.to_string())
            } else {
                let hour = in_civil(point.timestamp, self.tz).hour();
                (icon_for_hour(hour), clock_label(point.timestamp, self.tz))
            };
            let separator = prev
                .filter(|p| is_new_day(*p, point.timestamp, self.tz))
                .map(|_| self.day_separator(point.timestamp));
            rows.push(Row {
                icon,
                base: format!("{label}  -  {}", display_euro(&point.price)),
                suffix: tiers.get(&point.timestamp).map_or("", Tier::suffix),
                separator,
            });
            prev = Some(point.timestamp);
        }

        // Widths in chars: the base column is ASCII plus the euro sign.
        let width = rows
            .iter()
            .map(|r| r.base.chars().count())
            .max()
            .unwrap_or(0);

        let mut lines = Vec::with_capacity(rows.len() + 2);
        for row in rows {
            if let Some(separator) = row.separator {
                lines.push(separator);
            }
            let pad = width - row.base.chars().count();
            lines.push(format!(
                "{} | {}{}{}{}",
                row.icon,
                row.base,
                " ".repeat(pad),
                SUFFIX_SEPARATOR,
                row.suffix
            ));
        }

        lines.join("\n").trim_end().to_string()
    }

    fn day_separator(&self, ts: DateTime<Utc>) -> String {
        let day = in_civil(ts, self.tz).format("%-d %b");
        format!("{NIGHT_ICON}   —— {day} ——")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::curation::{curate, CurationConfig};
    use crate::domain::price::{PricePoint, PriceSeries};
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    // 10:00 in Amsterdam (CEST).
    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap()
    }

    fn series(points: &[(i64, &str)]) -> CuratedSeries {
        let series: PriceSeries = points
            .iter()
            .map(|(h, p)| PricePoint::new(start() + Duration::hours(*h), Decimal::from_str(p).unwrap()))
            .collect();
        curate(&series, &CurationConfig::default(), start()).unwrap()
    }

    fn render(curated: &CuratedSeries) -> String {
        MessageRenderer::default().render(curated, &curated.tiers())
    }

    #[test]
    fn test_first_line_is_now() {
        let text = render(&series(&[(0, "0.25"), (1, "0.30"), (2, "0.40")]));
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("💡 |  Now   -  €0.25"), "{first}");
    }

    #[test]
    fn test_clock_labels_in_civil_time() {
        let text = render(&series(&[(0, "0.25"), (4, "0.30")]));
        let second = text.lines().nth(1).unwrap();
        assert!(second.starts_with("🏙\u{FE0F} | 14:00  -  €0.30"), "{second}");
    }

    #[test]
    fn test_suffix_column_aligned() {
        let text = render(&series(&[(0, "0.25"), (1, "-0.05"), (2, "10.40"), (3, "0.30")]));
        let columns: Vec<usize> = text
            .lines()
            .map(|l| {
                let (_, rest) = l.split_once(" | ").unwrap();
                rest.rfind(" |").unwrap()
            })
            .collect();
        assert!(columns.windows(2).all(|w| w[0] == w[1]), "{text}");
    }

    #[test]
    fn test_suffixes_follow_tiers() {
        let text = render(&series(&[(0, "0.10"), (1, "0.50"), (2, "1.10"), (3, "0.90")]));
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].ends_with(" |⭐"));
        assert!(lines[1].ends_with(" |"));
        assert!(lines[2].ends_with(" |‼\u{FE0F}"));
        assert!(lines[3].ends_with(" |❗"));
    }

    #[test]
    fn test_now_at_trough_is_critical_low_even_when_flat() {
        // Range of two cents: too narrow for any other tier.
        let text = render(&series(&[(0, "0.20"), (1, "0.22"), (2, "0.21")]));
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].ends_with(" |⭐"));
        assert!(lines[1].ends_with(" |"));
        assert!(lines[2].ends_with(" |"));
    }

    #[test]
    fn test_day_separator_on_civil_midnight() {
        // 21:00 UTC is 23:00 in Amsterdam, 22:00 UTC is the next civil day.
        let text = render(&series(&[(0, "0.25"), (13, "0.30"), (14, "0.20")]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("🌃 | 23:00"));
        assert_eq!(lines[2], "🌃   —— 17 Oct ——");
        assert!(lines[3].starts_with("🌃 | 00:00"));
    }

    #[test]
    fn test_no_separator_within_day() {
        let text = render(&series(&[(0, "0.25"), (1, "0.30"), (2, "0.20")]));
        assert!(!text.contains("——"));
    }

    #[test]
    fn test_output_has_no_trailing_whitespace() {
        let text = render(&series(&[(0, "0.25"), (1, "0.30")]));
        assert_eq!(text, text.trim_end());
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_missing_tier_renders_bare_separator() {
        let curated = series(&[(0, "0.25"), (1, "0.90")]);
        let text = MessageRenderer::default().render(&curated, &BTreeMap::new());
        assert!(text.lines().all(|l| l.ends_with(" |")));
    }
}
