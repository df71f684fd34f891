//! Job scheduler errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("JobID[{0}] already exists")]
    DuplicateIdentifier(String),

    #[error("JobID[{0}] not found")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid schedule expression '{expression}': {message}")]
    InvalidSchedule { expression: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_error_display() {
        assert_eq!(
            SchedulerError::NotFound("unknown".to_string()).to_string(),
            "JobID[unknown] not found"
        );
        assert!(SchedulerError::InvalidConfiguration("routing api key is empty".to_string())
            .to_string()
            .contains("api key"));

        let err = SchedulerError::InvalidSchedule {
            expression: "every tuesday".to_string(),
            message: "Invalid expression".to_string(),
        };
        assert!(err.to_string().contains("every tuesday"));
    }
}
