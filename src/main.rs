use std::env;
use std::process::exit;

use hordebase::material::{default_sweep, Signature};
use hordebase::table::Table;
use hordebase::util::formatted_sz;
use hordebase::{export, solver};

fn main() {
    if let Err(msg) = run() {
        eprintln!("hordebase: {}", msg);
        exit(1);
    }
}

/// Solve the requested signatures (default: the full sweep) into one shared
/// table, print a sampled preview and write the CSV.
fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let sweep: Vec<Signature> = if args.is_empty() {
        default_sweep()
    } else {
        args.iter()
            .map(|arg| arg.parse::<Signature>())
            .collect::<Result<Vec<_>, String>>()?
    };

    ctrlc::set_handler(solver::request_stop)
        .map_err(|e| format!("cannot set CTRL-C handler ({})", e))?;

    let threads = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    let mut table = Table::new();
    for sig in sweep {
        let report = solver::solve(sig, &mut table, threads);
        if report.interrupted {
            eprintln!("interrupted, showing what was resolved so far");
            break;
        }
        if !report.converged {
            eprintln!(
                "{}  round cap of {} reached, the rest is treated as drawn",
                sig,
                solver::MAX_ROUNDS
            );
        }
    }

    for (fen, side, dtz) in export::sample(&table, 5000, 200) {
        println!("{}", fen);
        println!("{} wins with {} DTZ", side, dtz);
        println!();
    }

    let path = env::var("HORDEBASE_CSV").unwrap_or_else(|_| String::from("endgame_db.csv"));
    let rows = export::write_csv(&table, &path)?;
    eprintln!("{} rows written to {}", formatted_sz(rows), path);
    Ok(())
}
