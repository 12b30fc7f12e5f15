use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::error::WriteError;

/// Last column of an Excel worksheet (XFD)
pub const MAX_COLUMNS: u32 = 16_384;
/// Last row of an Excel worksheet
pub const MAX_ROWS: u32 = 1_048_576;

fn address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([A-Za-z]+)([0-9]+)$").expect("static pattern"))
}

/// Top-left cell of a write. Both coordinates are 1-based.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub column: u32,
    pub row: u32,
}

impl Default for Anchor {
    fn default() -> Self {
        Anchor { column: 1, row: 1 }
    }
}

impl Anchor {
    pub const fn new(column: u32, row: u32) -> Self {
        Anchor { column, row }
    }

    /// Parse A1 notation (e.g., "C5" -> column 3, row 5).
    ///
    /// `$` markers are ignored so addresses copied from the host's selection
    /// (`$C$5`) are accepted.
    pub fn parse(address: &str) -> Result<Self, WriteError> {
        let invalid = || WriteError::InvalidAddress(address.to_string());
        let cleaned: String = address.trim().chars().filter(|c| *c != '$').collect();

        let caps = address_pattern().captures(&cleaned).ok_or_else(invalid)?;
        let column = column_index(&caps[1]).ok_or_else(invalid)?;
        let row: u32 = caps[2].parse().map_err(|_| invalid())?;

        if row == 0 || row > MAX_ROWS || column > MAX_COLUMNS {
            return Err(invalid());
        }

        Ok(Anchor { column, row })
    }

    /// Convert to A1 notation (e.g., (3, 5) -> "C5")
    pub fn to_a1(&self) -> String {
        format!("{}{}", label(self.column), self.row)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

/// Resolve the anchor of a write; no address means A1.
pub fn resolve_anchor(address: Option<&str>) -> Result<Anchor, WriteError> {
    match address {
        Some(addr) => Anchor::parse(addr),
        None => Ok(Anchor::default()),
    }
}

/// Convert a 1-based column index to its label (1 -> A, 26 -> Z, 27 -> AA).
pub fn column_label(index: u32) -> Result<String, WriteError> {
    if index == 0 {
        return Err(WriteError::InvalidColumn(index));
    }
    Ok(label(index))
}

// Bijective base-26: shift to 0-based before every digit.
fn label(index: u32) -> String {
    let mut label = String::new();
    let mut n = index;

    while n > 0 {
        n -= 1;
        label.insert(0, char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }

    label
}

/// Convert a column label to its 1-based index (A -> 1, ZZ -> 702).
///
/// Returns `None` for empty input, non-letters, or labels too long to fit.
pub fn column_index(label: &str) -> Option<u32> {
    if label.is_empty() {
        return None;
    }

    let mut col: u32 = 0;
    for c in label.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
    }

    Some(col)
}

/// A rectangle of cells, e.g. C5:D7. Corners are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub start: Anchor,
    pub end: Anchor,
}

impl Region {
    /// Region of `rows` x `cols` cells whose top-left corner is `start`.
    ///
    /// Both dimensions must be at least 1.
    pub fn spanning(start: Anchor, rows: u32, cols: u32) -> Self {
        debug_assert!(rows > 0 && cols > 0);
        Region {
            start,
            end: Anchor::new(
                start.column.saturating_add(cols.saturating_sub(1)),
                start.row.saturating_add(rows.saturating_sub(1)),
            ),
        }
    }

    /// Convert to A1:B1 notation
    pub fn to_a1(&self) -> String {
        if self.start == self.end {
            self.start.to_a1()
        } else {
            format!("{}:{}", self.start.to_a1(), self.end.to_a1())
        }
    }

    /// Check if a cell is within this region
    pub fn contains(&self, cell: Anchor) -> bool {
        cell.row >= self.start.row
            && cell.row <= self.end.row
            && cell.column >= self.start.column
            && cell.column <= self.end.column
    }

    /// Get the number of rows in the region
    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Get the number of columns in the region
    pub fn col_count(&self) -> u32 {
        self.end.column - self.start.column + 1
    }

    /// Get the total number of cells in the region
    pub fn cell_count(&self) -> u64 {
        self.row_count() as u64 * self.col_count() as u64
    }

    /// Iterate over all cells in the region (row by row)
    pub fn iter(&self) -> RegionIter {
        RegionIter {
            region: *self,
            row: self.start.row,
            column: self.start.column,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

impl IntoIterator for Region {
    type Item = Anchor;
    type IntoIter = RegionIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over cells in a region
pub struct RegionIter {
    region: Region,
    row: u32,
    column: u32,
}

impl Iterator for RegionIter {
    type Item = Anchor;

    fn next(&mut self) -> Option<Self::Item> {
        if self.row > self.region.end.row {
            return None;
        }

        let cell = Anchor::new(self.column, self.row);

        self.column += 1;
        if self.column > self.region.end.column {
            self.column = self.region.start.column;
            self.row += 1;
        }

        Some(cell)
    }
}
