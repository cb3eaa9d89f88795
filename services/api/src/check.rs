use std::path::PathBuf;

use billing_gate::error::AppError;
use billing_gate::workflows::billing::{
    FileValidator, FileVerdict, PipelineError, ValidationRuleSet,
};
use clap::Args;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Path to the billing CSV file to validate
    #[arg(long)]
    pub(crate) file: PathBuf,
}

/// Run the file validator against a local CSV, printing the verdict the
/// pipeline would route on.
pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let text = std::fs::read_to_string(&args.file)?;
    let lines: Vec<&str> = text.lines().collect();

    if lines.is_empty() {
        println!("{}: empty file", args.file.display());
        return Ok(());
    }

    let validator = FileValidator::new(ValidationRuleSet::default());
    let verdict = validator
        .evaluate(&lines)
        .map_err(PipelineError::Record)?;

    match verdict {
        FileVerdict::Valid => {
            println!(
                "{}: valid ({} data line(s), would route to the processed bucket)",
                args.file.display(),
                lines.len() - 1
            );
        }
        FileVerdict::Invalid {
            record_id,
            violation,
            detail,
        } => {
            println!(
                "{}: invalid at record {} [{}]: {} (would route to the error bucket)",
                args.file.display(),
                record_id,
                violation.label(),
                detail
            );
        }
    }

    Ok(())
}
