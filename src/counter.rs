//! Figure, equation, and table numbering.
//!
//! Numbers are per page: the caller owns a [`NumberingContext`], threads it through a
//! render, and resets it when navigating to another page.

use std::collections::HashMap;

/// What is being numbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CounterKind {
    Figure,
    Equation,
    Table,
}

/// Per-key running counts, 1-based.
#[derive(Clone, Debug, Default)]
pub struct FigureCounter {
    counts: HashMap<String, u32>,
}

impl FigureCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next number for `key` (typically a page path).
    pub fn next(&mut self, key: &str) -> u32 {
        let n = self.counts.entry(key.to_string()).or_insert(0);
        *n += 1;
        *n
    }

    /// The last number handed out for `key`, 0 if none.
    pub fn current(&self, key: &str) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn reset(&mut self, key: &str) {
        self.counts.insert(key.to_string(), 0);
    }
}

/// One counter per [`CounterKind`].
#[derive(Clone, Debug, Default)]
pub struct NumberingContext {
    figures: FigureCounter,
    equations: FigureCounter,
    tables: FigureCounter,
}

impl NumberingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, kind: CounterKind, page: &str) -> u32 {
        self.counter_mut(kind).next(page)
    }

    pub fn current(&self, kind: CounterKind, page: &str) -> u32 {
        match kind {
            CounterKind::Figure => self.figures.current(page),
            CounterKind::Equation => self.equations.current(page),
            CounterKind::Table => self.tables.current(page),
        }
    }

    /// Restart every kind of numbering for `page`.
    pub fn reset_page(&mut self, page: &str) {
        self.figures.reset(page);
        self.equations.reset(page);
        self.tables.reset(page);
    }

    fn counter_mut(&mut self, kind: CounterKind) -> &mut FigureCounter {
        match kind {
            CounterKind::Figure => &mut self.figures,
            CounterKind::Equation => &mut self.equations,
            CounterKind::Table => &mut self.tables,
        }
    }
}
