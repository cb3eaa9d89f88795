mod config;
mod parser;
mod rules;

pub use config::ValidationRuleSet;
pub use parser::RecordParseError;

use super::domain::FileVerdict;

/// Stateless evaluator applying the rule set to a decoded payload.
pub struct FileValidator {
    rules: ValidationRuleSet,
}

impl FileValidator {
    pub fn new(rules: ValidationRuleSet) -> Self {
        Self { rules }
    }

    /// Produce the aggregate verdict for a payload already split into lines.
    ///
    /// Element 0 is the header and is always skipped, whatever it contains.
    /// Evaluation stops at the first record breaking a rule; records after it
    /// are never parsed, so a malformed row hiding behind an invalid one does
    /// not abort the invocation.
    pub fn evaluate(&self, lines: &[&str]) -> Result<FileVerdict, RecordParseError> {
        for line in lines.iter().skip(1) {
            if line.is_empty() {
                continue;
            }

            let record = parser::parse_record(line)?;
            if let Some(breach) = rules::check_record(&record, &self.rules) {
                return Ok(FileVerdict::Invalid {
                    record_id: record.id,
                    violation: breach.rule,
                    detail: breach.detail,
                });
            }
        }

        Ok(FileVerdict::Valid)
    }
}
