//! Retrograde win/loss/DTZ tables for Horde chess endgames.
//!
//! A lone black king faces one or two white pieces. Starting from the
//! terminal positions (checkmates and annihilated hordes) the solver works
//! backwards through the whole position space of a material signature until
//! no new position can be decided. The measure is distance-to-zero: the
//! number of moves, under optimal play, until a zeroing move (capture or
//! pawn move) is forced.
//!
//! Chess legality itself is not implemented here; the `rules` module wraps
//! the `shakmaty` crate, which acts as the rules engine for the Horde
//! variant.

pub mod basic;
pub mod canon;
pub mod export;
pub mod material;
pub mod rules;
pub mod solver;
pub mod space;
pub mod table;
pub mod util;
