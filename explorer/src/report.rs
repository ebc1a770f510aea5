//! Console formatting for query results and failures.

use std::io::{self, Write};

use wordvec_model::{Neighbor, QueryError};

/// Line bracketing every result block
pub const RULE: &str = "===============================";

/// Print the query description and its result between two rules
pub fn print_query<W: Write>(out: &mut W, intro: &str, result: &str) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "{intro}")?;
    writeln!(out)?;
    writeln!(out, "{result}")?;
    writeln!(out, "{RULE}")?;
    writeln!(out)
}

/// `[('queen', 0.71), ('princess', 0.64)]`
pub fn format_neighbors(neighbors: &[Neighbor]) -> String {
    let items: Vec<String> = neighbors.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// Friendly text for a failed query.
///
/// `single_term` switches the not-found notice to name the term.
pub fn print_failure<W: Write>(
    out: &mut W,
    error: &QueryError,
    single_term: Option<&str>,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "---------")?;
    match (error, single_term) {
        (QueryError::TermNotFound { .. }, Some(term)) => writeln!(
            out,
            " -- {term} -- is not in the vectorized corpus. Please try again"
        ),
        (QueryError::TermNotFound { .. }, None) => writeln!(
            out,
            "One of the term entered is not in the vectorized corpus. Please try again"
        ),
        (QueryError::InsufficientInput { required, .. }, _) => writeln!(
            out,
            "Which doesn't belong needs at least {required} terms. Please try again"
        ),
    }
}
