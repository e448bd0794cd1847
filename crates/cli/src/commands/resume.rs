//! Resume step lookup.

use std::collections::BTreeSet;

use clarity_core::onboarding::resume_step;
use clarity_core::{Step, StepError};

/// Errors parsing the completed-step list.
#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
    #[error("not a step number: {0:?}")]
    NotANumber(String),

    #[error(transparent)]
    Step(#[from] StepError),
}

/// Parse `1,2` into a set of steps. Blank entries are ignored.
///
/// # Errors
///
/// Returns an error for entries that are not step numbers.
pub fn parse_completed(list: &str) -> Result<BTreeSet<Step>, ResumeError> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let n: u8 = entry
                .parse()
                .map_err(|_| ResumeError::NotANumber(entry.to_string()))?;
            Ok(Step::try_from(n)?)
        })
        .collect()
}

/// Print the resume step for a completed-step list.
///
/// # Errors
///
/// Returns an error if the list cannot be parsed.
#[allow(clippy::print_stdout)]
pub fn print(list: &str) -> Result<(), ResumeError> {
    let step = resume_step(&parse_completed(list)?);
    println!("{} {} ({})", step.number(), step.title(), step.path());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_completed() {
        let steps = parse_completed("1, 2").unwrap();
        assert_eq!(resume_step(&steps), Step::Payment);
        assert!(parse_completed("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_entries() {
        assert!(matches!(
            parse_completed("1,x"),
            Err(ResumeError::NotANumber(_))
        ));
        assert!(matches!(
            parse_completed("7"),
            Err(ResumeError::Step(StepError::OutOfRange(7)))
        ));
    }
}
