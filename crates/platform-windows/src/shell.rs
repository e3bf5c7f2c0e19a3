//! PowerShell query seam.
//!
//! Every platform fact is read by running a short PowerShell script that ends in
//! `ConvertTo-Json -Compress`. The [`PowerShell`] trait is the only way the
//! collectors reach the host, so tests can script every outcome.

use std::path::{Path, PathBuf};
#[cfg(target_os = "windows")]
use std::process::Command;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::windows_cmd::POWERSHELL_EXE;

/// Failure of a single platform query.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("failed spawning {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("query exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },
    #[error("failed decoding query output: {0}")]
    Decode(String),
    #[error("platform queries are unsupported on {0}")]
    Unsupported(&'static str),
}

/// Runs one script and returns its trimmed stdout.
///
/// An empty string means the script produced no object. Any terminating error
/// inside the script must surface as `Err`.
pub trait PowerShell {
    fn run(&self, script: &str) -> Result<String, QueryError>;
}

/// Process-backed [`PowerShell`] that spawns one interpreter per query.
#[derive(Debug, Clone)]
pub struct PowerShellRunner {
    program: PathBuf,
}

impl PowerShellRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for PowerShellRunner {
    fn default() -> Self {
        Self::new(POWERSHELL_EXE)
    }
}

impl PowerShell for PowerShellRunner {
    fn run(&self, script: &str) -> Result<String, QueryError> {
        #[cfg(target_os = "windows")]
        {
            let output = Command::new(&self.program)
                .args([
                    "-NoProfile",
                    "-NonInteractive",
                    "-Command",
                    &guarded_script(script),
                ])
                .output()
                .map_err(|source| QueryError::Spawn {
                    program: self.program.display().to_string(),
                    source,
                })?;
            if !output.status.success() {
                return Err(QueryError::Exit {
                    status: output.status.to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        #[cfg(not(target_os = "windows"))]
        {
            tracing::warn!(
                program = %self.program.display(),
                "PowerShellRunner is a stub on non-Windows"
            );
            let _ = script;
            Err(QueryError::Unsupported(std::env::consts::OS))
        }
    }
}

/// Prefix that turns every non-terminating cmdlet error into a non-zero exit.
#[cfg(any(test, target_os = "windows"))]
pub(crate) fn guarded_script(script: &str) -> String {
    format!("$ErrorActionPreference = 'Stop'; {script}")
}

/// Quote a value as a PowerShell single-quoted literal.
pub(crate) fn ps_quote(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', "''"))
}

/// Normalized result of one platform query.
#[derive(Debug)]
pub enum QueryOutcome<T> {
    /// The query returned an object.
    Found(T),
    /// The query succeeded but produced nothing (`$null` or no output).
    Absent,
    /// The query raised, or its output could not be decoded.
    Failed(QueryError),
}

impl<T> QueryOutcome<T> {
    pub fn tier(&self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::Absent => "absent",
            Self::Failed(_) => "failed",
        }
    }
}

/// Run `script` and decode its JSON output into `T`.
pub fn query_json<S, T>(shell: &S, script: &str) -> QueryOutcome<T>
where
    S: PowerShell + ?Sized,
    T: DeserializeOwned,
{
    tracing::debug!(script, "running platform query");
    match shell.run(script) {
        Ok(raw) => decode_json(&raw),
        Err(err) => QueryOutcome::Failed(err),
    }
}

pub(crate) fn decode_json<T: DeserializeOwned>(raw: &str) -> QueryOutcome<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return QueryOutcome::Absent;
    }

    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => return QueryOutcome::Failed(QueryError::Decode(err.to_string())),
    };
    if value.is_null() {
        return QueryOutcome::Absent;
    }

    match serde_json::from_value(value) {
        Ok(parsed) => QueryOutcome::Found(parsed),
        Err(err) => QueryOutcome::Failed(QueryError::Decode(err.to_string())),
    }
}

/// A string list as Windows PowerShell serializes it.
///
/// `ConvertTo-Json` unrolls one-element pipelines to a bare scalar and, for
/// some ETS-decorated arrays, wraps the items as `{"value": [...], "Count": n}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum StringList {
    One(String),
    Many(Vec<String>),
    Wrapped {
        value: Vec<String>,
    },
}

impl StringList {
    pub(crate) fn into_vec(self) -> Vec<String> {
        let items = match self {
            Self::One(item) => vec![item],
            Self::Many(items) | Self::Wrapped { value: items } => items,
        };
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

/// PowerShell-style truthiness for a JSON scalar.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
        Value::Null => false,
    }
}
