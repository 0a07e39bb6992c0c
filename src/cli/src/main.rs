use std::io::Read;
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::eyre::eyre;
use cube_core::moves::format_sequence;
use itertools::Itertools;
use log::info;
use twophase::scramble::scramble_sequence;
use twophase::{SolveOptions, Tables, solve};

/// Two-phase solver for the 3x3x3 cube
#[derive(Parser)]
#[command(version, about)]
enum Commands {
    /// Solve a cube given as a 54-symbol facelet string
    Solve {
        /// Facelet string in U, R, F, D, L, B face order; read from stdin
        /// when omitted
        facelets: Option<String>,
        /// Give up beyond this total move count
        #[arg(long, default_value_t = 21)]
        max_depth: u8,
        /// Keep improving the solution until this many milliseconds passed
        #[arg(long)]
        time_budget_ms: Option<u64>,
        /// Abort after visiting this many search nodes
        #[arg(long)]
        node_budget: Option<u64>,
    },
    /// Print random-state scramble sequences
    Scramble {
        /// How many scrambles to print
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Build the move and pruning tables up front and report the timing
    Tables,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    match Commands::parse() {
        Commands::Solve {
            facelets,
            max_depth,
            time_budget_ms,
            node_budget,
        } => {
            let facelets = match facelets {
                Some(facelets) => facelets,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            let facelets = facelets.trim();
            if facelets.is_empty() {
                return Err(eyre!("no facelet string given"));
            }
            let options = SolveOptions {
                max_depth,
                time_budget: time_budget_ms.map(Duration::from_millis),
                node_budget,
            };
            let solution = solve(Tables::shared(), facelets, &options)?;
            info!("{} moves", solution.len());
            println!("{solution}");
        }
        Commands::Scramble { count } => {
            let tables = Tables::shared();
            for _ in 0..count {
                let scramble = scramble_sequence(tables)?;
                println!("{}", format_sequence(&scramble));
            }
        }
        Commands::Tables => {
            let begin = Instant::now();
            let tables = Tables::shared();
            let entry_counts = [
                &tables.pruning.slice_twist,
                &tables.pruning.slice_flip,
                &tables.pruning.slice_urf_to_dlf_parity,
                &tables.pruning.slice_ur_to_df_parity,
            ]
            .iter()
            .map(|table| table.entries())
            .join(" + ");
            println!(
                "tables ready in {:.2}s ({entry_counts} pruning entries)",
                begin.elapsed().as_secs_f64()
            );
        }
    }
    Ok(())
}
