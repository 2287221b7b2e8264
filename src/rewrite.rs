//! ANSI normalization of generated SQL.
//!
//! Models trained on mixed corpora emit vendor dialect fragments even when
//! asked for ANSI SQL. This pass rewrites the recurring offenders into
//! ANSI-compatible form:
//!
//! - `SELECT TOP n ...` (T-SQL) becomes `SELECT ...` with a `LIMIT n`
//!   appended when the query has none
//! - `DATE_SUB(CURRENT_DATE, INTERVAL n unit)` (MySQL) becomes
//!   `CURRENT_DATE - INTERVAL 'n unit'`
//! - `INTERVAL 'n' DAY` and friends become `INTERVAL 'n day'`
//! - trailing semicolons are stripped
//!
//! The pass records which rules fired, and [`parses_as_ansi`] checks the
//! result against a generic SQL grammar. A query that still fails to parse
//! is reported, never rejected; the tool makes no correctness guarantee on
//! model output.

use std::sync::LazyLock;

use regex::Regex;
use sqlparser::{dialect::GenericDialect, parser::Parser};

/// Regex for T-SQL row limiting.
/// Matches: `SELECT TOP 5`, `select top 10`
static SELECT_TOP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bSELECT\s+TOP\s+(\d+)\b").expect("valid regex"));

static LIMIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bLIMIT\b").expect("valid regex"));

/// Regex for MySQL date subtraction.
/// Matches: `DATE_SUB(CURRENT_DATE, INTERVAL 30 DAY)`
static DATE_SUB_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bDATE_SUB\s*\(\s*CURRENT_DATE\s*,\s*INTERVAL\s+(\d+)\s+(\w+)\s*\)")
        .expect("valid regex")
});

/// Regex for intervals quoting the count but not the unit.
/// Matches: `INTERVAL '7' DAY`, `INTERVAL '3' MONTH`, `INTERVAL '1' YEAR`
static QUOTED_INTERVAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bINTERVAL\s+'(\d+)'\s+(DAY|MONTH|YEAR)\b").expect("valid regex")
});

/// One normalization rule that fired during a rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewrite {
    /// `SELECT TOP n` replaced by a `LIMIT` clause
    TopToLimit,
    /// `DATE_SUB(CURRENT_DATE, ...)` replaced by interval arithmetic
    DateSubToIntervalArithmetic,
    /// Interval unit moved into the quoted literal
    IntervalUnitSpelling,
    /// Trailing semicolon stripped
    TrailingSemicolon
}

/// Result of SQL normalization.
#[derive(Debug)]
pub struct RewriteResult {
    /// Normalized SQL
    pub sql:     String,
    /// Rules that fired, in application order
    pub applied: Vec<Rewrite>
}

/// Rewrite vendor dialect fragments into ANSI-compatible form.
pub fn rewrite_to_ansi(sql: &str) -> RewriteResult {
    let mut applied = Vec::new();
    let mut out = sql.trim().to_string();

    let stripped = out.trim_end_matches(';').trim_end();
    if stripped != out {
        out = stripped.to_string();
        applied.push(Rewrite::TrailingSemicolon);
    }

    out = rewrite_top(&out, &mut applied);
    out = rewrite_date_sub(&out, &mut applied);
    out = rewrite_interval_units(&out, &mut applied);

    RewriteResult {
        sql: out,
        applied
    }
}

/// Check whether SQL parses under a generic ANSI grammar.
pub fn parses_as_ansi(sql: &str) -> bool {
    Parser::parse_sql(&GenericDialect {}, sql).is_ok()
}

fn rewrite_top(sql: &str, applied: &mut Vec<Rewrite>) -> String {
    let Some(caps) = SELECT_TOP_REGEX.captures(sql) else {
        return sql.to_string();
    };
    let limit = caps[1].to_string();
    let mut out = SELECT_TOP_REGEX.replace(sql, "SELECT").into_owned();
    if !LIMIT_REGEX.is_match(&out) {
        out.push_str(&format!(" LIMIT {}", limit));
    }
    applied.push(Rewrite::TopToLimit);
    out
}

fn rewrite_date_sub(sql: &str, applied: &mut Vec<Rewrite>) -> String {
    if !DATE_SUB_REGEX.is_match(sql) {
        return sql.to_string();
    }
    applied.push(Rewrite::DateSubToIntervalArithmetic);
    DATE_SUB_REGEX
        .replace_all(sql, |caps: &regex::Captures| {
            format!(
                "CURRENT_DATE - INTERVAL '{} {}'",
                &caps[1],
                caps[2].to_lowercase()
            )
        })
        .into_owned()
}

fn rewrite_interval_units(sql: &str, applied: &mut Vec<Rewrite>) -> String {
    if !QUOTED_INTERVAL_REGEX.is_match(sql) {
        return sql.to_string();
    }
    applied.push(Rewrite::IntervalUnitSpelling);
    QUOTED_INTERVAL_REGEX
        .replace_all(sql, |caps: &regex::Captures| {
            format!("INTERVAL '{} {}'", &caps[1], caps[2].to_lowercase())
        })
        .into_owned()
}
