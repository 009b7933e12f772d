//! The retrograde fixed point solver.
//!
//! Two phases per material signature. Seeding walks the position space once
//! and records the positions that are already decided on the spot:
//! checkmates, and annihilated hordes with white to move. Backward
//! propagation then repeatedly rescans the unresolved part of the space and
//! classifies each position from the outcomes of its successors, until a
//! round resolves nothing new or the round cap is hit.
//!
//! Within a round every lookup sees the table as it stood when the round
//! began; newly found outcomes are collected aside and committed at the
//! round boundary. That makes the per-position work independent, so the
//! scan is fanned out over scoped worker threads.
//!
//! Positions the rules engine reports as game over without anyone winning
//! (stalemate, and the lone king with black to move) stay unresolved
//! forever, as do true draws: those simply never appear in the table, and
//! the round cap keeps us from scanning for them indefinitely.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crossbeam::thread::scope;
use shakmaty::variant::Horde;
use shakmaty::{Color, Position};

use crate::basic::Outcome;
use crate::canon::Canonical;
use crate::material::Signature;
use crate::rules;
use crate::space;
use crate::table::Table;
use crate::util::formatted_sz;

/// Bound on propagation rounds. Whatever is still open after this many
/// rounds is treated as not forcibly winnable under the DTZ metric.
pub const MAX_ROUNDS: usize = 50;

static STOP_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Ask the solver to stop at the next opportunity. Safe to call from a
/// signal handler; already resolved positions are kept.
pub fn request_stop() {
    STOP_REQUESTED.store(true, Ordering::SeqCst);
}

fn interrupted() -> bool {
    STOP_REQUESTED.load(Ordering::SeqCst)
}

/// What one `solve` run did, mostly for the driver's summary and for tests.
#[derive(Clone, Debug)]
pub struct Report {
    pub signature: Signature,
    /// positions recorded by the seeding phase
    pub seeded: usize,
    /// positions resolved per propagation round, in order
    pub rounds: Vec<usize>,
    /// a round resolved nothing new, the fixed point is reached
    pub converged: bool,
    /// the run was cut short by `request_stop`
    pub interrupted: bool,
}

impl Report {
    pub fn resolved(&self) -> usize {
        self.seeded + self.rounds.iter().sum::<usize>()
    }
}

/// The verdict a position carries on its own, without looking at any
/// successor: checkmate, or the horde wiped out with white to move.
fn terminal_verdict(pos: &Horde) -> Option<Outcome> {
    if rules::is_checkmate(pos) {
        Some(Outcome { winner: !pos.turn(), dtz: 0 })
    } else if pos.turn() == Color::White && rules::is_variant_loss(pos, Color::White) {
        Some(Outcome { winner: Color::Black, dtz: 0 })
    } else {
        None
    }
}

/// Classify a position from the consequences of its moves, each given as
/// (is the move zeroing, outcome of the successor if known).
///
/// One winning reply decides: the mover wins, one move deeper than the
/// cheapest reply, where a zeroing winning reply costs nothing further and
/// ends the scan early. With no winning reply the position is a loss only
/// if every consequence is known; the loser gets credit for stalling, so
/// the longest non-zeroing losing reply sets the distance. Anything else
/// stays open for a later round.
///
/// Callers must not pass terminal positions; an empty consequence list
/// would classify as an immediate loss.
fn classify<I>(mover: Color, consequences: I) -> Option<Outcome>
where
    I: IntoIterator<Item = (bool, Option<Outcome>)>,
{
    let mut can_win = false;
    let mut all_known = true;
    let mut quickest_win = u32::MAX;
    let mut longest_stall: Option<u32> = None;

    for (zeroing, known) in consequences {
        match known {
            None => all_known = false,
            Some(reply) if reply.winner == mover => {
                can_win = true;
                if zeroing {
                    quickest_win = 0;
                    break;
                }
                quickest_win = quickest_win.min(reply.dtz);
            }
            Some(reply) => {
                if !zeroing {
                    longest_stall = Some(longest_stall.map_or(reply.dtz, |d| d.max(reply.dtz)));
                }
            }
        }
    }

    if can_win {
        Some(Outcome { winner: mover, dtz: quickest_win + 1 })
    } else if all_known {
        Some(Outcome { winner: !mover, dtz: longest_stall.map_or(1, |d| d + 1) })
    } else {
        None
    }
}

/// Try to decide one unresolved position against the current table
/// snapshot. Game-over positions nobody won are skipped here.
fn evaluate(cp: &Canonical, table: &Table) -> Option<Outcome> {
    let pos = cp.position();
    if rules::is_game_over(pos) {
        return None;
    }
    let mover = pos.turn();
    classify(
        mover,
        rules::legal_moves(pos).into_iter().map(|m| {
            let zeroing = rules::is_zeroing(pos, &m);
            let successor = Canonical::new(rules::apply(pos, &m));
            (zeroing, table.get(&successor))
        }),
    )
}

/// Record every immediately decided position of the signature's space.
fn seed(sig: Signature, table: &mut Table) -> usize {
    let mut seeded = 0;
    for cp in space::positions(sig) {
        if let Some(outcome) = terminal_verdict(cp.position()) {
            if table.record(cp, outcome) {
                seeded += 1;
            }
        }
    }
    seeded
}

/// One propagation round: scan everything unresolved against a frozen view
/// of the table and return what could be decided. Nothing is written here;
/// the caller commits the batch, which keeps every lookup of the round on
/// the same snapshot.
fn propagate_round(sig: Signature, table: &Table, threads: usize) -> Vec<(Canonical, Outcome)> {
    let pending: Vec<Canonical> = space::positions(sig)
        .filter(|cp| !table.contains(cp))
        .collect();
    if pending.is_empty() {
        return Vec::new();
    }

    let workers = threads.clamp(1, pending.len());
    let chunk_size = (pending.len() + workers - 1) / workers;
    let mut resolved: Vec<(Canonical, Outcome)> = Vec::new();

    scope(|round| {
        let handles: Vec<_> = pending
            .chunks(chunk_size)
            .map(|part| {
                round.spawn(move |_| {
                    let mut found = Vec::new();
                    for (i, cp) in part.iter().enumerate() {
                        if i % 1024 == 0 && interrupted() {
                            break;
                        }
                        if let Some(outcome) = evaluate(cp, table) {
                            found.push((cp.clone(), outcome));
                        }
                    }
                    found
                })
            })
            .collect();
        for handle in handles {
            resolved.extend(handle.join().unwrap());
        }
    })
    .unwrap();

    resolved
}

/// Solve one material signature into the shared table.
///
/// The table usually already holds the outcomes of smaller signatures;
/// captures and promotions lead right into those entries. Stops at the
/// fixed point, at [`MAX_ROUNDS`], or at the round boundary following an
/// interruption; everything resolved so far stays in the table.
pub fn solve(sig: Signature, table: &mut Table, threads: usize) -> Report {
    let start = Instant::now();
    eprintln!(
        "{}  seeding, up to {} placements to scan",
        sig,
        formatted_sz(sig.upper_bound())
    );
    let seeded = seed(sig, table);
    eprintln!(
        "{}  seeded {} positions in {:.1}s, table holds {}",
        sig,
        formatted_sz(seeded),
        start.elapsed().as_secs_f64(),
        formatted_sz(table.len())
    );

    let mut rounds = Vec::new();
    let mut converged = false;
    while rounds.len() < MAX_ROUNDS && !interrupted() {
        let round_start = Instant::now();
        let batch = propagate_round(sig, table, threads);
        let mut changed = 0usize;
        for (cp, outcome) in batch {
            if table.record(cp, outcome) {
                changed += 1;
            }
        }
        rounds.push(changed);
        eprintln!(
            "{}  round {:2} resolved {} positions in {:.1}s, table holds {}",
            sig,
            rounds.len(),
            formatted_sz(changed),
            round_start.elapsed().as_secs_f64(),
            formatted_sz(table.len())
        );
        if changed == 0 {
            converged = true;
            break;
        }
    }

    if interrupted() {
        eprintln!("{}  interrupted, partial results kept", sig);
    }
    Report { signature: sig, seeded, rounds, converged, interrupted: interrupted() }
}
