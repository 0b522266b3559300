use crate::error::{ChunkError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome category of a split, assemble or analysis call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Success,
    Error,
    NoContent,
    /// The validator ran to completion. Says nothing about validity;
    /// inspect the description for violations.
    AnalysisComplete,
}

impl OperationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
            Self::NoContent => "NO_CONTENT",
            Self::AnalysisComplete => "ANALYSIS_COMPLETE",
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result value returned by every public operation.
///
/// Built once and never mutated. An absent description is omitted from
/// the JSON form entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    status: OperationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl OperationResult {
    pub fn new(status: OperationStatus, description: Option<String>) -> Self {
        // Empty text and no text mean the same thing to callers
        let description = description.filter(|d| !d.is_empty());
        Self {
            status,
            description,
        }
    }

    pub fn success(description: Option<String>) -> Self {
        Self::new(OperationStatus::Success, description)
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self::new(OperationStatus::Error, Some(description.into()))
    }

    pub fn no_content(file_name: &str) -> Self {
        Self::new(
            OperationStatus::NoContent,
            Some(format!("File [{}] has no content.", file_name)),
        )
    }

    pub fn analysis_complete(report: String) -> Self {
        Self::new(OperationStatus::AnalysisComplete, Some(report))
    }

    pub fn status(&self) -> OperationStatus {
        self.status
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.status == OperationStatus::Error
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<ChunkError> for OperationResult {
    fn from(e: ChunkError) -> Self {
        Self::error(e.to_string())
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {}", self.status, description),
            None => write!(f, "{}", self.status),
        }
    }
}
