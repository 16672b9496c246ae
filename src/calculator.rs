use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, trace};

use crate::error::CalcError;
use crate::history::{History, HistoryEntry, DEFAULT_HISTORY_CAPACITY};
use crate::{lexer, parser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatorConfig {
    /// Most entries kept in the history log; zero is treated as one.
    pub history_capacity: usize,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        CalculatorConfig {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Evaluates expressions and records every success in its own history.
///
/// All methods take `&self`; the history sits behind a mutex so one
/// calculator can be shared between threads.
#[derive(Debug)]
pub struct Calculator {
    history: Mutex<History>,
}

impl Calculator {
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    pub fn with_config(config: CalculatorConfig) -> Self {
        Calculator {
            history: Mutex::new(History::new(config.history_capacity)),
        }
    }

    /// Evaluates one infix expression.
    ///
    /// Failed calculations leave the history untouched.
    pub fn calculate(&self, expression: &str) -> Result<f64, CalcError> {
        debug!("calculating {expression:?}");

        let result = evaluate(expression).map_err(|e| {
            match e.phase() {
                Some(phase) => debug!("{phase} failed for {expression:?}: {e}"),
                None => debug!("rejected {expression:?}: {e}"),
            }
            e
        })?;

        let mut history = self.lock_history();
        history.add(expression, result);
        trace!("recorded {expression:?} = {result} as entry #{}", history.last().map_or(0, |e| e.id));
        Ok(result)
    }

    /// Snapshot of the recorded calculations, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock_history().get_all()
    }

    pub fn clear_history(&self) {
        self.lock_history().clear();
    }

    pub fn history_len(&self) -> usize {
        self.lock_history().len()
    }

    /// Result of the most recent recorded calculation.
    pub fn last_result(&self) -> Option<f64> {
        self.lock_history().last().map(|e| e.result)
    }

    fn lock_history(&self) -> MutexGuard<'_, History> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokenizes and evaluates without touching any history.
pub fn evaluate(expression: &str) -> Result<f64, CalcError> {
    if expression.trim().is_empty() {
        return Err(CalcError::EmptyExpression);
    }
    let tokens = lexer::tokenize(expression)?;
    let result = parser::parse(&tokens)?;
    Ok(result)
}
