// Request validation expressed as (field, constraint) checks. Each request type
// lists its rules and hands the outcomes to `check`, which folds any violations
// into a single AppError::Validation.
use crate::errors::{AppError, AppResult};

pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

pub fn length(field: &'static str, value: &str, min: usize, max: usize) -> Option<Violation> {
    let len = value.chars().count();
    if len < min || len > max {
        Some(Violation {
            field,
            message: format!("must be between {} and {} characters", min, max),
        })
    } else {
        None
    }
}

pub fn min_length(field: &'static str, value: &str, min: usize) -> Option<Violation> {
    if value.chars().count() < min {
        Some(Violation {
            field,
            message: format!("must be at least {} characters", min),
        })
    } else {
        None
    }
}

pub fn positive(field: &'static str, value: u32) -> Option<Violation> {
    if value == 0 {
        Some(Violation {
            field,
            message: "must be a positive integer".to_string(),
        })
    } else {
        None
    }
}

pub fn check(rules: Vec<Option<Violation>>) -> AppResult<()> {
    let violations: Vec<String> = rules
        .into_iter()
        .flatten()
        .map(|violation| format!("{} {}", violation.field, violation.message))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(violations.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_accepts_boundaries() {
        assert!(length("username", "ab", 2, 30).is_none());
        assert!(length("username", &"x".repeat(30), 2, 30).is_none());
        assert!(length("username", "a", 2, 30).is_some());
        assert!(length("username", &"x".repeat(31), 2, 30).is_some());
    }

    #[test]
    fn positive_rejects_zero() {
        assert!(positive("page", 0).is_some());
        assert!(positive("page", 1).is_none());
    }

    #[test]
    fn check_joins_all_violations() {
        let result = check(vec![
            length("username", "a", 2, 30),
            length("password", "short", 8, 128),
        ]);

        let err = result.unwrap_err().to_string();
        assert!(err.contains("username"));
        assert!(err.contains("password"));
    }

    #[test]
    fn check_passes_when_no_violations() {
        assert!(check(vec![None, None]).is_ok());
    }
}
