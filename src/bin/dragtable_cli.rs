//! CLI tool for dragtable - replays header clicks and column drags on a CSV
//!
//! Usage:
//!   dragtable_cli <input.csv> [actions...] [--json] [--config opts.json] [-v]
//!
//! Actions run in the order given:
//!   --sort SLOT        click the header at SLOT
//!   --move FROM:TO     move a column without dragging
//!   --drag SLOT:X      press on header SLOT, drag to page x = X, release
//!   --reset            unsort and restore the original row order
//!
//! The resulting grid is printed as CSV (or JSON with `--json`).

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::path::PathBuf;
use std::process;

use dragtable::csv::{read_path, to_delimited, Delimiter};
#[cfg(not(target_arch = "wasm32"))]
use dragtable::logging::{init_stderr, verbosity};
use dragtable::{
    DragTableError, Interaction, MemoryGrid, Point, PointerEvent, Result, Table, TableConfig,
};

const USAGE: &str = "Usage: dragtable_cli <input.csv> [--sort SLOT] [--move FROM:TO] \
                     [--drag SLOT:X] [--reset] [--json] [--config opts.json] [-v]";

enum Action {
    Sort(usize),
    Move(usize, usize),
    Drag(usize, f64),
    Reset,
}

struct Options {
    input: PathBuf,
    actions: Vec<Action>,
    json: bool,
    config: Option<PathBuf>,
    verbose: usize,
}

fn pair<A: std::str::FromStr, B: std::str::FromStr>(flag: &str, value: &str) -> Result<(A, B)> {
    let bad = || DragTableError::Other(format!("{flag} expects A:B, got {value:?}"));
    let (a, b) = value.split_once(':').ok_or_else(bad)?;
    Ok((a.parse().map_err(|_| bad())?, b.parse().map_err(|_| bad())?))
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut input = None;
    let mut actions = Vec::new();
    let mut json = false;
    let mut config = None;
    let mut verbose = 0;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| DragTableError::Other(format!("{flag} needs a value")))
        };
        match arg.as_str() {
            "--sort" => {
                let v = value("--sort")?;
                let slot = v.parse().map_err(|_| {
                    DragTableError::Other(format!("--sort expects a slot, got {v:?}"))
                })?;
                actions.push(Action::Sort(slot));
            }
            "--move" => {
                let (from, to) = pair("--move", &value("--move")?)?;
                actions.push(Action::Move(from, to));
            }
            "--drag" => {
                let (slot, x) = pair("--drag", &value("--drag")?)?;
                actions.push(Action::Drag(slot, x));
            }
            "--reset" => actions.push(Action::Reset),
            "--json" => json = true,
            "--config" => config = Some(PathBuf::from(value("--config")?)),
            "-v" | "--verbose" => verbose += 1,
            "-vv" => verbose += 2,
            other if other.starts_with('-') => {
                return Err(DragTableError::Other(format!("unknown option {other}")));
            }
            other => input = Some(PathBuf::from(other)),
        }
    }

    Ok(Options {
        input: input.ok_or_else(|| DragTableError::Other(USAGE.to_string()))?,
        actions,
        json,
        config,
        verbose,
    })
}

/// Press at the middle of header `slot`, cross the threshold, move to `x`
/// and release
fn drag(table: &mut Table<MemoryGrid>, slot: usize, x: f64) -> Result<Interaction> {
    let start_x = table.view().header_center(slot).ok_or(DragTableError::ColumnOutOfRange {
        index: slot,
        count: table.model().column_count(),
    })?;
    let y = 1.0;
    let threshold = table.config().drag_threshold;
    table.pointer(PointerEvent::down(slot, Point::new(start_x, y)));
    table.pointer(PointerEvent::moved(Point::new(start_x, y + threshold + 1.0)));
    table.pointer(PointerEvent::moved(Point::new(x, y)));
    Ok(table.pointer(PointerEvent::up(Point::new(x, y))))
}

fn run(options: &Options) -> Result<String> {
    let config = match &options.config {
        Some(path) => TableConfig::load_from(path)?,
        None => TableConfig::default(),
    };
    let grid = read_path(&options.input)?;
    let view = MemoryGrid::new(grid.headers, grid.rows);
    let mut table = Table::new(view, config)?;

    for action in &options.actions {
        match *action {
            Action::Sort(slot) => {
                let state = table.click(slot)?;
                log::info!("sort {slot}: {state:?}");
            }
            Action::Move(from, to) => table.move_column(from, to)?,
            Action::Drag(slot, x) => {
                let outcome = drag(&mut table, slot, x)?;
                log::info!("drag {slot} to x={x}: {outcome:?}");
            }
            Action::Reset => table.reset()?,
        }
    }

    if options.json {
        Ok(serde_json::to_string_pretty(table.model())?)
    } else {
        Ok(to_delimited(table.model(), Delimiter::from_path(&options.input)))
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };
    #[cfg(not(target_arch = "wasm32"))]
    init_stderr(verbosity(options.verbose));

    match run(&options) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
