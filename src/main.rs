mod commands;
mod display;
#[cfg(feature = "line")]
mod line_mode;
#[cfg(feature = "tui")]
mod render_help;
#[cfg(feature = "tui")]
mod tui_mode;

use anyhow::{bail, Result};
use clap::Parser;
use exprcalc::{Calculator, CalculatorConfig, DEFAULT_HISTORY_CAPACITY};

use crate::display::format_result;

/// Terminal calculator for infix arithmetic: + - * / and parentheses.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Most calculations kept in the session history.
    #[arg(short = 'n', long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history_capacity: usize,

    /// Use the line-mode shell instead of the full-screen one.
    #[arg(short, long)]
    line: bool,

    /// Evaluate this expression, print the result and exit.
    #[arg(allow_hyphen_values = true)]
    expression: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let calculator = Calculator::with_config(CalculatorConfig {
        history_capacity: args.history_capacity,
    });

    if !args.expression.is_empty() {
        let expression = args.expression.join(" ");
        let result = calculator.calculate(&expression)?;
        println!("{}", format_result(result));
        return Ok(());
    }

    if args.line {
        run_line(calculator)
    } else {
        run_tui(calculator)
    }
}

#[cfg(feature = "line")]
fn run_line(calculator: Calculator) -> Result<()> {
    line_mode::run_line(calculator)
}

#[cfg(not(feature = "line"))]
fn run_line(_calculator: Calculator) -> Result<()> {
    bail!("line mode is not available; rebuild with `--features line`")
}

#[cfg(feature = "tui")]
fn run_tui(calculator: Calculator) -> Result<()> {
    tui_mode::run_tui(calculator)
}

#[cfg(not(feature = "tui"))]
fn run_tui(calculator: Calculator) -> Result<()> {
    if cfg!(feature = "line") {
        return run_line(calculator);
    }
    bail!("no interactive shell compiled in; pass an expression or rebuild with `--features tui`")
}
