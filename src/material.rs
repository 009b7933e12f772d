//! Material signatures and placement enumeration.
//!
//! A signature fixes the piece kinds on the board beyond the black king:
//! nothing (`K`), one white piece (`Q-K`) or two white pieces (`QP-K`).
//! For each signature we can enumerate every candidate placement; the
//! stream is lazy, finite and restartable, so the solver can walk it once
//! per round.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use shakmaty::{Color, Piece, Rank, Role, Square};

/// A raw piece arrangement, not yet validated or given a side to move.
pub type Placement = Vec<(Square, Piece)>;

/// The material subset of an endgame: which white pieces face the lone
/// black king.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signature {
    /// nothing left but the black king
    KingOnly,
    /// black king versus a single white piece
    KingVsPiece(Role),
    /// black king versus two white pieces
    KingVsTwoPieces(Role, Role),
}

use Signature::*;

/// The sweep the original tables were built from. Order matters: captures
/// and promotions lead into signatures with less material, so those must
/// already be solved when the bigger ones are processed.
pub fn default_sweep() -> Vec<Signature> {
    vec![
        KingOnly,
        KingVsPiece(Role::Queen),
        KingVsPiece(Role::Rook),
        KingVsPiece(Role::Bishop),
        KingVsPiece(Role::Knight),
        KingVsPiece(Role::Pawn),
        KingVsTwoPieces(Role::Queen, Role::Queen),
        KingVsTwoPieces(Role::Queen, Role::Pawn),
        KingVsTwoPieces(Role::Pawn, Role::Pawn),
    ]
}

/// A white pawn on the promotion rank would already be a different piece.
fn misplaced_pawn(role: Role, square: Square) -> bool {
    role == Role::Pawn && square.rank() == Rank::Eighth
}

impl Signature {
    /// All candidate placements for this material.
    ///
    /// Structurally impossible arrangements (two pieces on one square,
    /// pawns on the promotion rank) are skipped here; chess legality is
    /// the validator's business. When both white pieces are of the same
    /// kind, the pair of squares is emitted in ascending order only, so
    /// interchangeable placements appear once.
    pub fn placements(self) -> Box<dyn Iterator<Item = Placement>> {
        let black_king = Role::King.of(Color::Black);
        match self {
            KingOnly => Box::new(
                Square::ALL
                    .into_iter()
                    .map(move |k| vec![(k, black_king)]),
            ),
            KingVsPiece(role) => Box::new(Square::ALL.into_iter().flat_map(move |k| {
                Square::ALL.into_iter().filter_map(move |p| {
                    if p == k || misplaced_pawn(role, p) {
                        None
                    } else {
                        Some(vec![(k, black_king), (p, role.of(Color::White))])
                    }
                })
            })),
            KingVsTwoPieces(first, second) => {
                Box::new(Square::ALL.into_iter().flat_map(move |k| {
                    Square::ALL.into_iter().flat_map(move |p1| {
                        Square::ALL.into_iter().filter_map(move |p2| {
                            if p1 == k || p2 == k || p1 == p2 {
                                return None;
                            }
                            if misplaced_pawn(first, p1) || misplaced_pawn(second, p2) {
                                return None;
                            }
                            if first == second && p2 < p1 {
                                return None;
                            }
                            Some(vec![
                                (k, black_king),
                                (p1, first.of(Color::White)),
                                (p2, second.of(Color::White)),
                            ])
                        })
                    })
                }))
            }
        }
    }

    /// Upper bound on the number of placements, for progress output.
    pub fn upper_bound(self) -> usize {
        match self {
            KingOnly => 64,
            KingVsPiece(_) => 64 * 63,
            KingVsTwoPieces(a, b) if a == b => 64 * 63 * 62 / 2,
            KingVsTwoPieces(_, _) => 64 * 63 * 62,
        }
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            KingOnly => write!(f, "K"),
            KingVsPiece(role) => write!(f, "{}-K", role.upper_char()),
            KingVsTwoPieces(a, b) => write!(f, "{}{}-K", a.upper_char(), b.upper_char()),
        }
    }
}

fn attacker(c: char) -> Result<Role, String> {
    match c.to_ascii_uppercase() {
        'Q' => Ok(Role::Queen),
        'R' => Ok(Role::Rook),
        'B' => Ok(Role::Bishop),
        'N' => Ok(Role::Knight),
        'P' => Ok(Role::Pawn),
        other => Err(format!("'{}' is not a white piece letter (QRBNP)", other)),
    }
}

impl FromStr for Signature {
    type Err = String;

    /// Inverse of `Display`: `K`, `Q-K`, `QP-K` and so on.
    fn from_str(s: &str) -> Result<Signature, String> {
        if s.eq_ignore_ascii_case("K") {
            return Ok(KingOnly);
        }
        let white = s
            .strip_suffix("-K")
            .or_else(|| s.strip_suffix("-k"))
            .ok_or_else(|| format!("'{}' is not a signature like K, Q-K or QP-K", s))?;
        let mut roles = white.chars().map(attacker);
        match (roles.next(), roles.next(), roles.next()) {
            (Some(a), None, _) => Ok(KingVsPiece(a?)),
            (Some(a), Some(b), None) => Ok(KingVsTwoPieces(a?, b?)),
            _ => Err(format!("'{}' must name one or two white pieces", s)),
        }
    }
}
