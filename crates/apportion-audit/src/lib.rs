//! Durable audit records for solve attempts.
//!
//! Every solve attempt, successful or not, produces one plain-text record:
//! a header naming the operation and timestamp, an input snapshot (category
//! names, coefficient matrix, right-hand side), the ordered computation
//! steps, and either the resulting allocation or the error description.
//! Records are append-only: one new file per attempt, never rewritten.
//!
//! Writing a record is best-effort instrumentation. Failures are reported to
//! the caller but must not change the outcome of the solve they describe.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;

/// Errors raised while persisting an audit record.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The record could not be written to the log directory.
    #[error("failed to write audit record: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome section of an audit record.
#[derive(Debug, Clone)]
pub enum AuditOutcome {
    /// The attempt produced an allocation: category name to amount, in
    /// category order.
    Solved(Vec<(String, f64)>),
    /// The attempt failed with the given error description.
    Failed(String),
}

/// Immutable snapshot of one solve attempt.
///
/// The timestamp is taken at construction and also drives the on-disk
/// filename.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    operation: String,
    timestamp: DateTime<Local>,
    category_names: Vec<String>,
    matrix: Vec<Vec<f64>>,
    rhs: Vec<f64>,
    steps: Vec<String>,
    outcome: AuditOutcome,
}

impl AuditRecord {
    /// Creates a record for one attempt of `operation`, timestamped now.
    pub fn new(
        operation: impl Into<String>,
        category_names: Vec<String>,
        matrix: Vec<Vec<f64>>,
        rhs: Vec<f64>,
        steps: Vec<String>,
        outcome: AuditOutcome,
    ) -> Self {
        Self {
            operation: operation.into(),
            timestamp: Local::now(),
            category_names,
            matrix,
            rhs,
            steps,
            outcome,
        }
    }

    /// Operation name (e.g. `solve`).
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Whether the recorded attempt produced an allocation.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, AuditOutcome::Solved(_))
    }

    /// Renders the record in its on-disk layout.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== {} @ {} ===\n\n",
            self.operation,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
        ));

        out.push_str("Input:\n");
        out.push_str(&format!(
            "  Categories: {}\n",
            self.category_names.join(", "),
        ));
        out.push_str("  Matrix A:\n");
        for row in &self.matrix {
            out.push_str(&format!("    {}\n", fmt_vector(row)));
        }
        out.push_str(&format!("  Vector b: {}\n\n", fmt_vector(&self.rhs)));

        out.push_str("Steps:\n");
        for (i, step) in self.steps.iter().enumerate() {
            out.push_str(&format!("  {}. {step}\n", i + 1));
        }
        out.push('\n');

        match &self.outcome {
            AuditOutcome::Solved(amounts) => {
                out.push_str("Result:\n");
                let mut total = 0.0;
                for (name, value) in amounts {
                    out.push_str(&format!("  {name}: {value:.2}\n"));
                    total += value;
                }
                out.push_str(&format!("  Total: {total:.2}\n"));
            }
            AuditOutcome::Failed(description) => {
                out.push_str("Error:\n");
                out.push_str(&format!("  {description}\n"));
            }
        }

        out
    }

    /// Filename stem: operation plus second-resolution timestamp.
    fn filename_stem(&self) -> String {
        format!(
            "{}_{}",
            self.operation,
            self.timestamp.format("%Y%m%d-%H%M%S"),
        )
    }
}

/// Writes audit records under a fixed root directory.
#[derive(Debug, Clone)]
pub struct AuditLogger {
    root: PathBuf,
}

impl AuditLogger {
    /// Creates a logger rooted at `root`. The directory is created lazily on
    /// the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Log root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persists one record and returns the path it was written to.
    ///
    /// Filenames derive from the operation and a second-resolution
    /// timestamp. The file is opened with `create_new`, and on a collision
    /// (rapid repeats within the same second) the logger retries with a
    /// numeric suffix, so an existing record is never overwritten.
    ///
    /// # Errors
    ///
    /// [`AuditError::Io`] when the directory or file cannot be written.
    pub fn record(&self, record: &AuditRecord) -> Result<PathBuf, AuditError> {
        fs::create_dir_all(&self.root)?;
        let stem = record.filename_stem();
        let body = record.render();

        let mut attempt = 0usize;
        loop {
            let name = if attempt == 0 {
                format!("{stem}.log")
            } else {
                format!("{stem}_{attempt}.log")
            };
            let path = self.root.join(name);
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
            {
                Ok(mut file) => {
                    file.write_all(body.as_bytes())?;
                    return Ok(path);
                }
                Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

fn fmt_vector(v: &[f64]) -> String {
    let entries: Vec<String> = v.iter().map(|x| format!("{x:.4}")).collect();
    format!("[{}]", entries.join(", "))
}
