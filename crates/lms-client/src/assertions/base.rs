use super::{AssertionError, AssertionResult};
use reqwest::StatusCode;
use std::fmt::Debug;

pub fn assert_status_code(actual: StatusCode, expected: StatusCode) -> AssertionResult {
    if actual == expected {
        Ok(())
    } else {
        Err(AssertionError::new(
            "status code",
            expected.as_u16().to_string(),
            actual.as_u16().to_string(),
        ))
    }
}

pub fn assert_equal<A, E>(actual: &A, expected: &E, name: &str) -> AssertionResult
where
    A: PartialEq<E> + Debug + ?Sized,
    E: Debug + ?Sized,
{
    if actual == expected {
        Ok(())
    } else {
        Err(AssertionError::new(
            name,
            format!("{:?}", expected),
            format!("{:?}", actual),
        ))
    }
}

pub fn assert_is_true(condition: bool, name: &str) -> AssertionResult {
    if condition {
        Ok(())
    } else {
        Err(AssertionError::new(name, "true", "false"))
    }
}

/// Checks that two collections have the same number of elements.
pub fn assert_length<A, E>(actual: &[A], expected: &[E], name: &str) -> AssertionResult {
    if actual.len() == expected.len() {
        Ok(())
    } else {
        Err(AssertionError::new(
            format!("length of {}", name),
            expected.len().to_string(),
            actual.len().to_string(),
        ))
    }
}
