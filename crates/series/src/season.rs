//! Meteorological seasons and month labels.

use crate::error::SeriesError;

/// Meteorological season (three-month block).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Season {
    /// December, January, February.
    Winter,
    /// March, April, May.
    Spring,
    /// June, July, August.
    Summer,
    /// September, October, November.
    Autumn,
}

impl Season {
    /// All seasons in calendar order, winter first.
    pub const ALL: [Season; 4] = [
        Season::Winter,
        Season::Spring,
        Season::Summer,
        Season::Autumn,
    ];

    /// Returns the season containing `month`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn from_month(month: u32) -> Result<Self, SeriesError> {
        match month {
            12 | 1 | 2 => Ok(Season::Winter),
            3..=5 => Ok(Season::Spring),
            6..=8 => Ok(Season::Summer),
            9..=11 => Ok(Season::Autumn),
            _ => Err(SeriesError::InvalidMonth { month }),
        }
    }

    /// Short label (`DJF`, `MAM`, `JJA`, `SON`).
    pub fn label(self) -> &'static str {
        match self {
            Season::Winter => "DJF",
            Season::Spring => "MAM",
            Season::Summer => "JJA",
            Season::Autumn => "SON",
        }
    }
}

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Three-letter English label for `month`.
///
/// # Errors
///
/// Returns [`SeriesError::InvalidMonth`] if `month` is outside 1..=12.
pub fn month_label(month: u32) -> Result<&'static str, SeriesError> {
    if !(1..=12).contains(&month) {
        return Err(SeriesError::InvalidMonth { month });
    }
    Ok(MONTH_LABELS[month as usize - 1])
}
