//! History-free position identity.
//!
//! Two positions reached by different move sequences are the same table
//! entry as soon as their piece placement and side to move agree. The
//! canonical text form from the rules engine already pins the move counters,
//! so it doubles as the identity key and the hash source.

use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

use shakmaty::variant::Horde;

use crate::rules;

/// A position with its canonical identity.
///
/// Equality and hashing look at the key only; the wrapped position is kept
/// around so that the rules engine can be asked about moves and game state
/// without re-parsing the key.
#[derive(Clone, Debug)]
pub struct Canonical {
    pos: Horde,
    key: String,
}

impl Canonical {
    pub fn new(pos: Horde) -> Canonical {
        let key = rules::serialize(&pos);
        Canonical { pos, key }
    }

    /// The wrapped position, for rules engine queries.
    pub fn position(&self) -> &Horde {
        &self.pos
    }

    /// The canonical serialization, also used for export rows.
    pub fn fen(&self) -> &str {
        &self.key
    }
}

impl PartialEq for Canonical {
    fn eq(&self, other: &Canonical) -> bool {
        self.key == other.key
    }
}

impl Eq for Canonical {}

impl Hash for Canonical {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Display for Canonical {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::num::NonZeroU32;

    use shakmaty::{Board, CastlingMode, Color, FromSetup, Piece, Role, Setup, Square};

    fn kq_board() -> Board {
        let mut board = Board::empty();
        board.set_piece_at(Square::A8, Piece { color: Color::Black, role: Role::King });
        board.set_piece_at(Square::D4, Piece { color: Color::White, role: Role::Queen });
        board
    }

    fn with_counters(turn: Color, halfmoves: u32, fullmoves: u32) -> Horde {
        let mut setup = Setup::empty();
        setup.board = kq_board();
        setup.turn = turn;
        setup.halfmoves = halfmoves;
        setup.fullmoves = NonZeroU32::new(fullmoves).unwrap();
        Horde::from_setup(setup, CastlingMode::Standard).unwrap()
    }

    fn hash_of(c: &Canonical) -> u64 {
        let mut h = DefaultHasher::new();
        c.hash(&mut h);
        h.finish()
    }

    #[test]
    fn move_counters_do_not_matter() {
        let a = Canonical::new(with_counters(Color::Black, 0, 1));
        let b = Canonical::new(with_counters(Color::Black, 17, 42));
        assert_eq!(a, b);
        assert_eq!(a.fen(), b.fen());
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn side_to_move_matters() {
        let a = Canonical::new(with_counters(Color::Black, 0, 1));
        let b = Canonical::new(with_counters(Color::White, 0, 1));
        assert_ne!(a, b);
    }
}
