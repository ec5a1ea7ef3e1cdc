use super::AssertionResult;
use super::base::{assert_equal, assert_is_true};
use crate::schema::LoginResponse;
use tracing::info;

/// A successful login yields a non-empty bearer token pair.
pub fn assert_login_response(response: &LoginResponse) -> AssertionResult {
    info!("Check login response");
    assert_equal(response.token.token_type.as_str(), "bearer", "token_type")?;
    assert_is_true(!response.token.access_token.is_empty(), "access_token")?;
    assert_is_true(!response.token.refresh_token.is_empty(), "refresh_token")
}
