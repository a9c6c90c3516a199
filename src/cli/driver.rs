//! Command execution for the sigcheck binary.

use anyhow::{Context, Result};
use rayon::prelude::*;
use sigcheck_parser::parse_type;
use sigcheck_solver::validate_signatures;
use sigcheck_types::TypeInterner;
use std::io::Write;
use tracing::debug;

use crate::cli::args::{CliArgs, Command, OutputFormat};
use crate::cli::config::{BatchCase, build_interner, load_batch, load_types};
use crate::cli::reporter::{CheckReport, Reporter, render_json};

/// Every check passed (or met its expectation).
pub const EXIT_SUCCESS: i32 = 0;
/// A substitute was rejected, or a batch case did not meet its expectation.
pub const EXIT_REJECTED: i32 = 1;
/// Bad arguments, unreadable files or unparsable signatures.
pub const EXIT_USAGE_ERROR: i32 = 2;

/// Check one pair of signatures given as type expressions.
pub fn check_one(
    db: &TypeInterner,
    name: Option<&str>,
    declared: &str,
    substitute: &str,
) -> Result<CheckReport> {
    let declared_id = parse_type(db, declared)
        .with_context(|| format!("invalid declared signature `{declared}`"))?;
    let substitute_id = parse_type(db, substitute)
        .with_context(|| format!("invalid substitute signature `{substitute}`"))?;

    let (failure, message) = match validate_signatures(db, declared_id, substitute_id) {
        Ok(()) => (None, None),
        Err(failure) => (Some(failure.kind()), Some(failure.render(db))),
    };

    Ok(CheckReport {
        name: name.map(str::to_string),
        declared: declared.to_string(),
        substitute: substitute.to_string(),
        compatible: failure.is_none(),
        failure,
        message,
        expect: None,
    })
}

/// Check every case in parallel against one shared interner. Reports come
/// back in case order.
pub fn run_batch(db: &TypeInterner, cases: &[BatchCase]) -> Result<Vec<CheckReport>> {
    cases
        .par_iter()
        .map(|case| {
            let mut report = check_one(db, Some(case.name.as_str()), &case.declared, &case.substitute)
                .with_context(|| format!("batch case `{}`", case.name))?;
            report.expect = Some(case.expect);
            Ok(report)
        })
        .collect()
}

/// Run the parsed command, writing reports to `out`. Returns the exit code.
pub fn run(args: &CliArgs, color: bool, out: &mut dyn Write) -> Result<i32> {
    let mut decls = match &args.types {
        Some(path) => load_types(path)?.types,
        None => Vec::new(),
    };

    let reports = match &args.command {
        Command::Check {
            declared,
            substitute,
        } => {
            let db = build_interner(&decls)?;
            vec![check_one(&db, None, declared, substitute)?]
        }
        Command::Batch { file } => {
            let batch = load_batch(file)?;
            decls.extend(batch.types);
            let db = build_interner(&decls)?;
            run_batch(&db, &batch.cases)?
        }
    };

    let is_batch = matches!(args.command, Command::Batch { .. });
    match args.format {
        OutputFormat::Json => {
            let json = render_json(&reports).context("failed to serialize reports")?;
            writeln!(out, "{json}")?;
        }
        OutputFormat::Text => {
            let reporter = Reporter::new(color);
            write!(out, "{}", reporter.render(&reports))?;
            if is_batch {
                writeln!(out, "{}", reporter.format_summary(&reports))?;
            }
        }
    }

    let unexpected = reports.iter().filter(|r| !r.is_expected()).count();
    debug!(reports = reports.len(), unexpected, "run finished");
    Ok(if unexpected == 0 {
        EXIT_SUCCESS
    } else {
        EXIT_REJECTED
    })
}
