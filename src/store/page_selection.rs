//! Copy targets: a single page (`"3"`) or an inclusive range (`"2-4"`).
//!
//! Anything unparseable, a reversed range, or page `0` yields an empty
//! selection instead of an error.

use crate::constants::MAX_COPY_TARGETS;
use crate::types::PageIndex;
use std::ops::RangeInclusive;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageSelection {
    Empty,
    Single(PageIndex),
    Range { start: PageIndex, end: PageIndex },
}

impl PageSelection {
    /// Parse user input such as `"5"`, `"2-4"` or `" 2 - 4 "`.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let selection = match input.split_once('-') {
            Some((start, end)) => match (parse_page(start), parse_page(end)) {
                (Some(start), Some(end)) => Self::range(start, end),
                _ => Self::Empty,
            },
            None => parse_page(input).map_or(Self::Empty, Self::Single),
        };

        if selection.len() > MAX_COPY_TARGETS {
            warn!(input, max = MAX_COPY_TARGETS, "Copy range too large, ignoring");
            return Self::Empty;
        }
        selection
    }

    /// Inclusive range; `end < start` is empty.
    pub fn range(start: PageIndex, end: PageIndex) -> Self {
        if start == 0 || end < start {
            Self::Empty
        } else {
            Self::Range { start, end }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Single(_) => 1,
            Self::Range { start, end } => (end - start) as usize + 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Selected pages in ascending order.
    pub fn pages(&self) -> RangeInclusive<PageIndex> {
        match *self {
            // An intentionally empty inclusive range.
            Self::Empty => 1..=0,
            Self::Single(page) => page..=page,
            Self::Range { start, end } => start..=end,
        }
    }
}

fn parse_page(token: &str) -> Option<PageIndex> {
    token.trim().parse::<PageIndex>().ok().filter(|page| *page >= 1)
}
