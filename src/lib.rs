//! Infix arithmetic evaluator with a bounded calculation history.
//!
//! ```
//! use exprcalc::Calculator;
//!
//! let calc = Calculator::new();
//! assert_eq!(calc.calculate("(2 + 3) * 4").unwrap(), 20.0);
//! assert_eq!(calc.history().len(), 1);
//! ```

pub mod calculator;
pub mod error;
pub mod history;
pub mod lexer;
pub mod parser;

pub use calculator::{evaluate, Calculator, CalculatorConfig};
pub use error::{CalcError, LexError, ParseError, Phase};
pub use history::{History, HistoryEntry, DEFAULT_HISTORY_CAPACITY};
pub use lexer::{tokenize, Token};
pub use parser::{parse, MAX_NESTING_DEPTH};
