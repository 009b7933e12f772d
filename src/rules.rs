//! The rules engine boundary.
//!
//! Everything the solver wants to know about chess itself is answered here,
//! by `shakmaty`'s Horde implementation: legality of a placement, move
//! generation, checkmate and variant-loss detection, the zeroing property of
//! a move, and the canonical text form of a position. The rest of the crate
//! never talks to `shakmaty` directly, so a mistake in the rules cannot hide
//! anywhere else.

use shakmaty::{
    variant::Horde, Board, CastlingMode, Color, EnPassantMode, FromSetup, Move, MoveList, Piece,
    Position, Setup, Square,
};

/// Build a board from a raw placement.
pub fn board_from(placement: &[(Square, Piece)]) -> Board {
    let mut board = Board::empty();
    for &(square, piece) in placement {
        board.set_piece_at(square, piece);
    }
    board
}

/// Validate a board with a given side to move.
///
/// `None` means the arrangement is not a legal Horde position, for example
/// because the side not to move is in check. Such placements are silently
/// discarded by the enumeration, they are not errors.
pub fn validate(board: Board, turn: Color) -> Option<Horde> {
    let mut setup = Setup::empty();
    setup.board = board;
    setup.turn = turn;
    Horde::from_setup(setup, CastlingMode::Standard).ok()
}

/// Is the side to move checkmated?
pub fn is_checkmate(pos: &Horde) -> bool {
    pos.is_checkmate()
}

/// Has `side` lost by the Horde special condition, i.e. has its army
/// been wiped off the board? Only meaningful for the kingless side.
pub fn is_variant_loss(pos: &Horde, side: Color) -> bool {
    matches!(
        pos.variant_outcome(),
        Some(shakmaty::Outcome::Decisive { winner }) if winner == !side
    )
}

/// Is the game over for any reason (mate, stalemate, variant end)?
///
/// The variant end is checked explicitly: after the horde is wiped out the
/// king may well still have moves, but the game is decided all the same.
pub fn is_game_over(pos: &Horde) -> bool {
    pos.is_variant_end() || pos.legal_moves().is_empty()
}

/// All legal moves in this position.
pub fn legal_moves(pos: &Horde) -> MoveList {
    pos.legal_moves()
}

/// Does this move reset the distance counter (capture or pawn move)?
pub fn is_zeroing(_pos: &Horde, m: &Move) -> bool {
    m.is_zeroing()
}

/// Pure move application: the successor position, the original untouched.
///
/// Must only be called with moves obtained from [`legal_moves`] on the same
/// position. The rules engine rejecting its own move would mean the
/// enumerator/validator contract is broken, so we let that surface loudly.
pub fn apply(pos: &Horde, m: &Move) -> Horde {
    match pos.clone().play(m) {
        Ok(successor) => successor,
        Err(e) => panic!("rules engine rejected its own legal move: {:?}", e),
    }
}

/// Canonical text form of a position: a FEN with the move counters pinned
/// to `0 1`, so that two positions that differ only in their history
/// serialize identically.
pub fn serialize(pos: &Horde) -> String {
    let setup = pos.clone().into_setup(EnPassantMode::Legal);
    let ep = match setup.ep_square {
        Some(square) => square.to_string(),
        None => String::from("-"),
    };
    format!(
        "{} {} - {} 0 1",
        setup.board.board_fen(setup.promoted),
        setup.turn.char(),
        ep
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Role;

    fn place(squares: &[(Square, Color, Role)]) -> Board {
        let placement: Vec<(Square, Piece)> =
            squares.iter().map(|&(s, c, r)| (s, r.of(c))).collect();
        board_from(&placement)
    }

    #[test]
    fn rejects_side_not_to_move_in_check() {
        // queen gives check to the black king; white cannot be the one to move
        let board = place(&[
            (Square::A8, Color::Black, Role::King),
            (Square::A6, Color::White, Role::Queen),
        ]);
        assert!(validate(board.clone(), Color::White).is_none());
        assert!(validate(board, Color::Black).is_some());
    }

    #[test]
    fn captures_and_pawn_moves_are_zeroing() {
        let board = place(&[
            (Square::D5, Color::Black, Role::King),
            (Square::D4, Color::White, Role::Pawn),
            (Square::H1, Color::White, Role::Rook),
        ]);
        let pos = validate(board, Color::Black).unwrap();
        for m in legal_moves(&pos) {
            let zeroing = is_zeroing(&pos, &m);
            assert_eq!(zeroing, m.is_capture(), "{:?}", m);
        }
        let white = validate(
            place(&[
                (Square::D5, Color::Black, Role::King),
                (Square::D3, Color::White, Role::Pawn),
                (Square::H1, Color::White, Role::Rook),
            ]),
            Color::White,
        )
        .unwrap();
        for m in legal_moves(&white) {
            let pawn_move = m.role() == Role::Pawn;
            assert_eq!(is_zeroing(&white, &m), pawn_move || m.is_capture(), "{:?}", m);
        }
    }

    #[test]
    fn serialization_is_history_free() {
        let board = place(&[
            (Square::A8, Color::Black, Role::King),
            (Square::D1, Color::White, Role::Queen),
        ]);
        let pos = validate(board, Color::Black).unwrap();
        assert_eq!(serialize(&pos), "k7/8/8/8/8/8/8/3Q4 b - - 0 1");
    }

    #[test]
    fn annihilated_horde_is_a_variant_loss() {
        let board = place(&[(Square::E5, Color::Black, Role::King)]);
        let pos = validate(board.clone(), Color::White).unwrap();
        assert!(is_variant_loss(&pos, Color::White));
        assert!(is_game_over(&pos));
        assert!(!is_checkmate(&pos));
        // the winner's king still has moves, yet the game is decided
        let won = validate(board, Color::Black).unwrap();
        assert!(is_game_over(&won));
        assert!(!is_variant_loss(&won, Color::Black));
    }
}
