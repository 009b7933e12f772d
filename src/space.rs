//! The position space of a material signature.
//!
//! Raw placements become positions by picking a side to move and asking the
//! rules engine whether the result is legal. Every placement is tried with
//! both sides to move; illegal combinations (say, white to move while black
//! is already in check) are dropped silently. The stream is deterministic:
//! walking it twice yields the same positions in the same order.

use shakmaty::Color;

use crate::canon::Canonical;
use crate::material::Signature;
use crate::rules;

/// All legal canonical positions with this material, both sides to move.
pub fn positions(sig: Signature) -> impl Iterator<Item = Canonical> {
    sig.placements().flat_map(|placement| {
        let board = rules::board_from(&placement);
        [Color::White, Color::Black].into_iter().filter_map(move |turn| {
            rules::validate(board.clone(), turn).map(Canonical::new)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Signature::*;

    #[test]
    fn king_only_space_has_both_turns() {
        // a lone black king is a legal (ended) position for either side to move
        assert_eq!(positions(KingOnly).count(), 128);
    }

    #[test]
    fn restartable_and_deterministic() {
        let first: Vec<String> = positions(KingOnly).map(|c| c.fen().to_string()).collect();
        let second: Vec<String> = positions(KingOnly).map(|c| c.fen().to_string()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn illegal_sides_are_filtered() {
        use shakmaty::Role;
        // whenever the queen checks the king, white cannot be on the move,
        // so strictly fewer than two positions per placement survive
        let total = positions(KingVsPiece(Role::Queen)).count();
        assert!(total < 2 * 64 * 63, "checking placements must lose a turn");
        // and the checked arrangement itself only ever appears with black to move
        let fen_black = "k7/Q7/8/8/8/8/8/8 b - - 0 1";
        let fen_white = "k7/Q7/8/8/8/8/8/8 w - - 0 1";
        let all: Vec<String> = positions(KingVsPiece(Role::Queen))
            .map(|c| c.fen().to_string())
            .collect();
        assert!(all.iter().any(|f| f == fen_black));
        assert!(!all.iter().any(|f| f == fen_white));
    }
}
