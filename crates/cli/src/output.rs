// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::color;
use clap::ValueEnum;
use jd_core::JobId;
use jd_engine::{JobState, ReconcileReport};
use std::fmt::Write;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// The id of a freshly submitted job.
pub fn format_submitted(id: &JobId, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => id.to_string(),
        OutputFormat::Json => serde_json::to_string(&serde_json::json!({ "id": id }))?,
    })
}

pub fn format_state(state: &JobState, format: OutputFormat) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(state)?);
    }

    let mut out = String::new();
    writeln!(out, "{}  {}", color::header("id:    "), state.id)?;
    writeln!(out, "{}  {}", color::header("status:"), color::status(state.status))?;
    if let Some(code) = state.exit_code {
        writeln!(out, "{}  {code}", color::header("exit:  "))?;
    }
    if let Some(job) = &state.job {
        let params = &job.params;
        writeln!(out, "{}  {}", color::header("cmd:   "), params.command)?;
        if !params.options.is_empty() {
            writeln!(out, "{}  {}", color::header("opts:  "), params.options)?;
        }
        writeln!(out, "{}  {}", color::header("dir:   "), job.location.dir.display())?;
        if let Some(error) = &job.error {
            writeln!(out, "{}  {error}", color::header("error: "))?;
        }
    }
    for (label, captured) in [("stdout", &state.stdout), ("stderr", &state.stderr)] {
        let Some(text) = captured else { continue };
        writeln!(out, "{}", color::muted(&format!("── {label} ──")))?;
        out.push_str(text);
        if !text.is_empty() && !text.ends_with('\n') {
            out.push('\n');
        }
    }
    Ok(out.trim_end_matches('\n').to_string())
}

/// Running job ids, one per line.
pub fn format_running(ids: &[JobId], format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => ids.iter().map(JobId::to_string).collect::<Vec<_>>().join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(ids)?,
    })
}

pub fn format_report(report: &ReconcileReport, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => format!(
            "checked {}: {} finished, {} timed out, {} invalid, {} errors",
            report.checked, report.finished, report.timed_out, report.invalid, report.errors
        ),
        OutputFormat::Json => serde_json::to_string(report)?,
    })
}

/// Print `text` unless it is empty.
pub fn emit(text: &str) {
    if !text.is_empty() {
        println!("{text}");
    }
}
