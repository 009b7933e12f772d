//! Basic data types shared by the solver, the table and the exporter.

use std::fmt::{self, Display, Formatter};

use shakmaty::Color;

/// The human readable name of a side, as it appears in exported rows.
pub fn side_name(side: Color) -> &'static str {
    match side {
        Color::White => "white",
        Color::Black => "black",
    }
}

/// Final verdict for a position: who wins and how many moves it takes,
/// under optimal play, to force the next zeroing move.
///
/// Once recorded in the table, an `Outcome` is never revised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// the side that wins with optimal play
    pub winner: Color,
    /// distance to the next forced zeroing move
    pub dtz: u32,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} wins with {} DTZ", side_name(self.winner), self.dtz)
    }
}
