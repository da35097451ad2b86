//! Point selection helpers: extremum detection and power-law sampling.

use crate::domain::price::PricePoint;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Upper bound on the number of special points `special_points` returns.
pub const MAX_SPECIAL_POINTS: usize = 4;

/// Indices of the extremum points the curated series must keep.
///
/// The series is split at its temporal midpoint; the earliest max and earliest
/// min of each half are special. When a half is empty the whole series is
/// ranked instead, taking extremes at least a third of the total duration
/// apart so two neighbouring slots are never both reported as "the" peaks.
pub fn special_points(entries: &[PricePoint]) -> BTreeSet<usize> {
    let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
        return BTreeSet::new();
    };

    let midpoint = first.timestamp + (last.timestamp - first.timestamp) / 2;
    let split = entries.partition_point(|p| p.timestamp < midpoint);
    let (early, late) = entries.split_at(split);

    if early.is_empty() || late.is_empty() {
        return spaced_extremes(entries);
    }

    let mut special = BTreeSet::new();
    for (offset, half) in [(0, early), (split, late)] {
        special.insert(offset + earliest_by(half, Ordering::Greater));
        special.insert(offset + earliest_by(half, Ordering::Less));
    }
    special
}

/// Index of the earliest point whose price beats every other in `direction`
/// (`Greater` for the maximum, `Less` for the minimum). `half` is non-empty.
fn earliest_by(half: &[PricePoint], direction: Ordering) -> usize {
    let mut best = 0;
    for (i, point) in half.iter().enumerate().skip(1) {
        if point.price.cmp(&half[best].price) == direction {
            best = i;
        }
    }
    best
}

/// Two peaks and two troughs ranked over the whole series, each pair spaced
/// at least a third of the series duration apart.
fn spaced_extremes(entries: &[PricePoint]) -> BTreeSet<usize> {
    let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
        return BTreeSet::new();
    };
    let min_gap = (last.timestamp - first.timestamp) / 3;

    // Stable sorts keep chronological order among equal prices.
    let mut ascending: Vec<usize> = (0..entries.len()).collect();
    ascending.sort_by(|a, b| entries[*a].price.cmp(&entries[*b].price));
    let mut descending: Vec<usize> = (0..entries.len()).collect();
    descending.sort_by(|a, b| entries[*b].price.cmp(&entries[*a].price));

    let mut special = BTreeSet::new();
    special.extend(pick_spaced(entries, descending.into_iter(), min_gap));
    special.extend(pick_spaced(entries, ascending.into_iter(), min_gap));
    special
}

fn pick_spaced(
    entries: &[PricePoint],
    ranked: impl Iterator<Item = usize>,
    min_gap: chrono::TimeDelta,
) -> Vec<usize> {
    let mut picked: Vec<usize> = Vec::with_capacity(2);
    for idx in ranked {
        if picked.len() == 2 {
            break;
        }
        let far_enough = picked
            .iter()
            .all(|&p| (entries[idx].timestamp - entries[p].timestamp).abs() >= min_gap);
        if far_enough {
            picked.push(idx);
        }
    }
    picked
}

/// Power-law spread index: `floor((i / (need - 1))^power * (len - 1))`.
///
/// With `power > 1` the indices bunch toward the end of the list. `len` must
/// be non-zero.
pub fn power_law_index(i: usize, need: usize, len: usize, power: f64) -> usize {
    let fraction = if need <= 1 {
        0.0
    } else {
        i as f64 / (need - 1) as f64
    };
    let idx = (fraction.powf(power) * (len - 1) as f64).floor() as usize;
    idx.min(len - 1)
}

/// Nearest index not yet taken, probing forward before backward at equal
/// distance.
pub fn nearest_free(taken: &[bool], idx: usize) -> Option<usize> {
    let len = taken.len();
    for distance in 0..len {
        let forward = idx + distance;
        if forward < len && !taken[forward] {
            return Some(forward);
        }
        if distance > 0 && distance <= idx && !taken[idx - distance] {
            return Some(idx - distance);
        }
    }
    None
}
