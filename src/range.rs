//! Page-range grammar.
//!
//! A range list is one or more `start-end` pairs separated by commas, with
//! optional whitespace after each comma:
//!
//! ```text
//! RangeList := Range ("," WS* Range)*
//! Range     := Digits "-" Digits
//! ```
//!
//! Validation runs in three steps: the whole string must match the grammar,
//! then each range (in order) must lie inside the document when its page count
//! is known, and must not run backwards.
//!
//! # Examples
//!
//! ```
//! use pdfsplice::range::{PageRange, validate_ranges};
//!
//! let ranges = validate_ranges("1-3, 4-6", Some(10)).unwrap();
//! assert_eq!(ranges, vec![PageRange::new(1, 3), PageRange::new(4, 6)]);
//!
//! assert!(validate_ranges("4-12", Some(10)).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PdfSpliceError, Result};

/// Example shown to users whose range text fails the grammar.
pub const FORMAT_EXAMPLE: &str = "1-3, 4-6, 7-10";

static RANGE_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+-[0-9]+)(,\s*[0-9]+-[0-9]+)*$").expect("range-list pattern compiles")
});

/// A 1-based, inclusive page range as entered by a user.
///
/// The bounds are kept exactly as entered; clamping to a document only
/// happens when pages are selected with [`PageRange::pages`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRange {
    /// First page (1-based).
    pub start: u32,
    /// Last page (1-based, inclusive).
    pub end: u32,
}

impl PageRange {
    /// Create a range from its bounds.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Pages of this range that exist in a document of `page_count` pages,
    /// in ascending order.
    ///
    /// Ordinals below 1 or above `page_count` are dropped. A range that
    /// falls entirely outside the document yields nothing.
    pub fn pages(&self, page_count: u32) -> RangeInclusive<u32> {
        self.start.max(1)..=self.end.min(page_count)
    }

    /// Check that the range lies inside `[1, page_count]`.
    pub fn check_bounds(&self, page_count: u32) -> Result<()> {
        if self.start < 1 || self.end > page_count {
            return Err(PdfSpliceError::RangeBounds {
                range: *self,
                page_count,
            });
        }
        Ok(())
    }

    /// Check that the range does not run backwards.
    pub fn check_order(&self) -> Result<()> {
        if self.start > self.end {
            return Err(PdfSpliceError::RangeOrder { range: *self });
        }
        Ok(())
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for PageRange {
    type Err = PdfSpliceError;

    /// Parse a single `start-end` token, ignoring surrounding whitespace.
    ///
    /// Only the shape is checked here; order and bounds are left to
    /// [`validate_ranges`].
    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let (start, end) = token
            .split_once('-')
            .ok_or_else(|| PdfSpliceError::format(s))?;

        Ok(Self {
            start: parse_page_number(start, s)?,
            end: parse_page_number(end, s)?,
        })
    }
}

fn parse_page_number(digits: &str, input: &str) -> Result<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PdfSpliceError::format(input));
    }
    // Digit runs too long for u32 cannot name a real page either.
    digits.parse().map_err(|_| PdfSpliceError::format(input))
}

/// Check `input` against the range-list grammar without interpreting it.
pub fn is_well_formed(input: &str) -> bool {
    RANGE_LIST.is_match(input)
}

/// Parse range text whose page count is not known yet.
///
/// Bounds are not checked; pages outside the document are dropped later when
/// the split clamps each range.
pub fn parse_ranges(input: &str) -> Result<Vec<PageRange>> {
    validate_ranges(input, None)
}

/// Validate and parse range text.
///
/// # Errors
///
/// - [`PdfSpliceError::Format`] if the text does not match the grammar
/// - [`PdfSpliceError::RangeBounds`] if `page_count` is known and a range
///   reaches outside `1..=page_count`
/// - [`PdfSpliceError::RangeOrder`] if a range starts after it ends
///
/// Ranges are checked in input order and the first failure wins.
pub fn validate_ranges(input: &str, page_count: Option<u32>) -> Result<Vec<PageRange>> {
    if !is_well_formed(input) {
        return Err(PdfSpliceError::format(input));
    }

    let mut ranges = Vec::new();
    for token in input.split(',') {
        let range: PageRange = token.parse()?;
        if let Some(page_count) = page_count {
            range.check_bounds(page_count)?;
        }
        range.check_order()?;
        ranges.push(range);
    }

    Ok(ranges)
}

/// Validation callback for interactive prompts: `None` when the text is
/// acceptable, otherwise the message to show next to the input.
pub fn validation_message(input: &str, page_count: Option<u32>) -> Option<String> {
    validate_ranges(input, page_count)
        .err()
        .map(|err| err.to_string())
}

/// Prompt text asking for ranges of a document with `page_count` pages.
pub fn prompt_for(page_count: u32) -> String {
    format!("Enter page ranges to split (e.g., \"1-3, 4-6\") - PDF has {page_count} pages")
}
