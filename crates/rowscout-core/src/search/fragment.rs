//! Parameterized SQL condition fragments
//!
//! The builder's output: a boolean expression with positional `?`
//! placeholders and the bound values in placeholder order. Execution binds
//! the values properly; `to_literal` renders a plain string for callers that
//! need to embed the condition in hand-written SQL.

use std::fmt;

/// A boolean SQL expression with positional placeholders and bound values
///
/// Safe to embed inside a `WHERE (...)` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlCondition {
    expr: String,
    binds: Vec<String>,
}

impl SqlCondition {
    /// The condition that matches no rows
    pub fn match_none() -> Self {
        Self {
            expr: "1 = 0".to_string(),
            binds: Vec::new(),
        }
    }

    // Invariant: `expr` contains `?` only where a placeholder was placed, one
    // per entry of `binds`, in order.
    pub(crate) fn new(expr: String, binds: Vec<String>) -> Self {
        Self { expr, binds }
    }

    /// The expression with `?` placeholders
    pub fn expr(&self) -> &str {
        &self.expr
    }

    /// Bound values in placeholder order
    pub fn binds(&self) -> &[String] {
        &self.binds
    }

    pub(crate) fn into_parts(self) -> (String, Vec<String>) {
        (self.expr, self.binds)
    }

    /// Merge an externally supplied condition in front of this one
    ///
    /// `Some(ext)` yields `(<ext>) AND (<self>)`; `None` leaves the condition
    /// unchanged. The external condition is raw SQL and is embedded verbatim;
    /// sanitizing it is the caller's responsibility.
    pub fn merge(self, external: Option<&str>) -> Self {
        match external {
            Some(ext) => Self {
                expr: format!("({ext}) AND ({})", self.expr),
                binds: self.binds,
            },
            None => self,
        }
    }

    /// Render to a literal SQL string, substituting bound values
    ///
    /// Single quotes inside bound values are doubled.
    pub fn to_literal(&self) -> String {
        let mut out = String::with_capacity(self.expr.len());
        let mut binds = self.binds.iter();
        for ch in self.expr.chars() {
            if ch == '?' {
                match binds.next() {
                    Some(bind) => {
                        out.push('\'');
                        out.push_str(&bind.replace('\'', "''"));
                        out.push('\'');
                    }
                    None => out.push(ch),
                }
            } else {
                out.push(ch);
            }
        }
        out
    }
}

impl fmt::Display for SqlCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}
