use super::AssertionResult;
use super::base::assert_equal;
use crate::schema::{
    CreateUserRequest, CreateUserResponse, GetUserResponse, UpdateUserRequest, UpdateUserResponse,
    User,
};

pub fn assert_user(actual: &User, expected: &User) -> AssertionResult {
    assert_equal(&actual.id, &expected.id, "id")?;
    assert_equal(&actual.email, &expected.email, "email")?;
    assert_equal(&actual.last_name, &expected.last_name, "last_name")?;
    assert_equal(&actual.first_name, &expected.first_name, "first_name")?;
    assert_equal(&actual.middle_name, &expected.middle_name, "middle_name")
}

pub fn assert_create_user_response(
    request: &CreateUserRequest,
    response: &CreateUserResponse,
) -> AssertionResult {
    assert_equal(&response.user.email, &request.email, "email")?;
    assert_equal(&response.user.last_name, &request.last_name, "last_name")?;
    assert_equal(&response.user.first_name, &request.first_name, "first_name")?;
    assert_equal(&response.user.middle_name, &request.middle_name, "middle_name")
}

pub fn assert_get_user_response(
    get_user_response: &GetUserResponse,
    create_user_response: &CreateUserResponse,
) -> AssertionResult {
    assert_user(&get_user_response.user, &create_user_response.user)
}

pub fn assert_update_user_response(
    request: &UpdateUserRequest,
    response: &UpdateUserResponse,
) -> AssertionResult {
    let user = &response.user;
    if let Some(email) = &request.email {
        assert_equal(&user.email, email, "email")?;
    }
    if let Some(last_name) = &request.last_name {
        assert_equal(&user.last_name, last_name, "last_name")?;
    }
    if let Some(first_name) = &request.first_name {
        assert_equal(&user.first_name, first_name, "first_name")?;
    }
    if let Some(middle_name) = &request.middle_name {
        assert_equal(&user.middle_name, middle_name, "middle_name")?;
    }
    Ok(())
}
