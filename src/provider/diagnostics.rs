//! Diagnostics reported by the provider, resources and data sources

use serde::Serialize;
use std::fmt;

use crate::error::OgoError;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

/// Single diagnostic, optionally attached to an attribute path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.summary)?;
        if let Some(attribute) = &self.attribute {
            write!(f, "\n\n  with attribute \"{}\"", attribute)?;
        }
        if !self.detail.is_empty() {
            write!(f, "\n\n{}", self.detail)?;
        }
        Ok(())
    }
}

/// Ordered collection of diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics holding a single error
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        let mut diags = Self::new();
        diags.add_error(summary, detail);
        diags
    }

    /// Error wrapping a client failure, with the error text appended to `detail`
    pub fn from_error(summary: &str, detail: &str, err: &OgoError) -> Self {
        Self::error(summary, format!("{}{}", detail, err))
    }

    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Severity::Error, None, summary.into(), detail.into());
    }

    pub fn add_attribute_error(
        &mut self,
        attribute: impl Into<String>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.push(
            Severity::Error,
            Some(attribute.into()),
            summary.into(),
            detail.into(),
        );
    }

    pub fn add_warning(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Severity::Warning, None, summary.into(), detail.into());
    }

    fn push(
        &mut self,
        severity: Severity,
        attribute: Option<String>,
        summary: String,
        detail: String,
    ) {
        self.0.push(Diagnostic {
            severity,
            summary,
            detail,
            attribute,
        });
    }

    /// Move every diagnostic of `other` into `self`
    pub fn append(&mut self, mut other: Diagnostics) {
        self.0.append(&mut other.0);
    }

    pub fn has_error(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    /// `Err(self)` when an error was recorded, `Ok(value)` otherwise
    pub fn into_result<T>(self, value: T) -> Result<T, Diagnostics> {
        if self.has_error() {
            Err(self)
        } else {
            Ok(value)
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diag) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            write!(f, "{}", diag)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_collects_and_fails() {
        let mut diags = Diagnostics::new();
        assert!(!diags.has_error());
        diags.add_warning("Deprecated", "use something else");
        assert!(!diags.has_error());
        diags.add_attribute_error("endpoint", "Missing Ogo API endpoint", "set it");
        assert!(diags.has_error());
        assert_eq!(diags.len(), 2);
        assert!(diags.into_result(()).is_err());
    }

    #[test]
    fn test_from_error_appends_error_text() {
        let err = OgoError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        let diags = Diagnostics::from_error(
            "Error creating site",
            "Could not create site, unexpected error: ",
            &err,
        );
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "Error creating site");
        assert_eq!(
            diag.detail,
            "Could not create site, unexpected error: status: 500, body: boom"
        );
    }

    #[test]
    fn test_display() {
        let mut diags = Diagnostics::new();
        diags.add_attribute_error("apikey", "Missing Ogo API apikey", "detail text");
        diags.add_error("Second", "");
        assert_eq!(
            diags.to_string(),
            "Error: Missing Ogo API apikey\n\n  with attribute \"apikey\"\n\ndetail text\n\nError: Second"
        );
    }

    #[test]
    fn test_serialize() {
        let diags = Diagnostics::error("Unable to read Ogo Clusters", "status: 403, body: ");
        let json = serde_json::to_value(&diags).unwrap();
        assert_eq!(json[0]["severity"], "error");
        assert_eq!(json[0]["summary"], "Unable to read Ogo Clusters");
        assert!(json[0].get("attribute").is_none());
    }
}
