//! Outcome reporting for the hosting workflow runner
//!
//! Under GitHub Actions a failure is surfaced as an `::error::` workflow
//! command so it shows up as an annotation on the run; elsewhere it is a plain
//! line on stderr. Either way the process exits non-zero.

use std::io::Write;

use crate::migration::MigrationOutcome;

pub const FAILURE_PREFIX: &str = "❌ Action failed: ";

/// Where and how the outcome is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTarget {
    GitHubActions,
    Terminal,
}

impl ReportTarget {
    pub fn detect() -> Self {
        match std::env::var("GITHUB_ACTIONS") {
            Ok(value) if value == "true" => ReportTarget::GitHubActions,
            _ => ReportTarget::Terminal,
        }
    }
}

/// Escape message data for a workflow command.
pub fn escape_command_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

pub struct OutcomeReporter {
    target: ReportTarget,
}

impl OutcomeReporter {
    pub fn new(target: ReportTarget) -> Self {
        Self { target }
    }

    /// Write the outcome and return the process exit code.
    pub fn report<O: Write, E: Write>(
        &self,
        outcome: &MigrationOutcome,
        stdout: &mut O,
        stderr: &mut E,
    ) -> std::io::Result<i32> {
        writeln!(stdout, "{}", outcome.message)?;
        if outcome.succeeded {
            return Ok(0);
        }

        let failure = format!("{FAILURE_PREFIX}{}", outcome.message);
        match self.target {
            ReportTarget::GitHubActions => writeln!(stdout, "::error::{}", escape_command_data(&failure))?,
            ReportTarget::Terminal => writeln!(stderr, "{failure}")?,
        }
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::{MigrationError, RequiredField, StepName};

    fn failed(message_field: RequiredField) -> MigrationOutcome {
        MigrationOutcome::failure(
            &MigrationError::Configuration { field: message_field },
            Vec::new(),
            "id".to_string(),
        )
    }

    #[test]
    fn test_escape_command_data() {
        assert_eq!(escape_command_data("50% done\r\nnext"), "50%25 done%0D%0Anext");
    }

    #[test]
    fn test_success_prints_confirmation_only() {
        let outcome = MigrationOutcome::success(
            "✅ Model 'm' moved to registry 'r'.".to_string(),
            vec![StepName::MoveModel],
            "id".to_string(),
        );
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let code = OutcomeReporter::new(ReportTarget::GitHubActions)
            .report(&outcome, &mut out, &mut err)
            .unwrap();

        assert_eq!(code, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "✅ Model 'm' moved to registry 'r'.\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_failure_under_actions_emits_error_command() {
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let code = OutcomeReporter::new(ReportTarget::GitHubActions)
            .report(&failed(RequiredField::ModelVersion), &mut out, &mut err)
            .unwrap();

        assert_eq!(code, 1);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("::error::❌ Action failed: Model version is required"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_failure_on_terminal_goes_to_stderr() {
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let code = OutcomeReporter::new(ReportTarget::Terminal)
            .report(&failed(RequiredField::ModelName), &mut out, &mut err)
            .unwrap();

        assert_eq!(code, 1);
        assert_eq!(String::from_utf8(err).unwrap(), "❌ Action failed: Model name is required\n");
    }
}
