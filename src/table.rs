//! The endgame table: canonical position to outcome.
//!
//! Strictly write-once: a key, once present, keeps its first outcome for
//! the rest of the run. The solver relies on this; revisiting entries would
//! invalidate distances that other entries were derived from.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::basic::Outcome;
use crate::canon::Canonical;

#[derive(Default)]
pub struct Table {
    entries: HashMap<Canonical, Outcome>,
}

impl Table {
    pub fn new() -> Table {
        Table { entries: HashMap::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, pos: &Canonical) -> bool {
        self.entries.contains_key(pos)
    }

    pub fn get(&self, pos: &Canonical) -> Option<Outcome> {
        self.entries.get(pos).copied()
    }

    /// Record an outcome for a position. Returns `true` if the position was
    /// new; an already resolved position is left untouched and `false`
    /// comes back, so callers can count genuine progress.
    pub fn record(&mut self, pos: Canonical, outcome: Outcome) -> bool {
        match self.entries.entry(pos) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(outcome);
                true
            }
        }
    }

    /// All resolved positions with their outcomes, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Canonical, Outcome)> {
        self.entries.iter().map(|(pos, outcome)| (pos, *outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::{Color, Piece, Role, Square};

    use crate::rules;

    fn lone_king(square: Square) -> Canonical {
        let board = rules::board_from(&[(
            square,
            Piece { color: Color::Black, role: Role::King },
        )]);
        Canonical::new(rules::validate(board, Color::White).unwrap())
    }

    #[test]
    fn first_record_wins() {
        let mut table = Table::new();
        let pos = lone_king(Square::E4);
        let first = Outcome { winner: Color::Black, dtz: 0 };
        let second = Outcome { winner: Color::White, dtz: 9 };
        assert!(table.record(pos.clone(), first));
        assert!(!table.record(pos.clone(), second));
        assert_eq!(table.get(&pos), Some(first));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn lookup_distinguishes_positions() {
        let mut table = Table::new();
        table.record(lone_king(Square::A1), Outcome { winner: Color::Black, dtz: 0 });
        assert!(table.contains(&lone_king(Square::A1)));
        assert!(!table.contains(&lone_king(Square::A2)));
        assert_eq!(table.iter().count(), 1);
    }
}
