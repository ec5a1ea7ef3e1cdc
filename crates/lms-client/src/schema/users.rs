use crate::fakers;
use fake::{Dummy, Fake, Faker};
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "middleName")]
    pub middle_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "middleName")]
    pub middle_name: String,
}

impl CreateUserRequest {
    /// Random user whose email is on `domain`.
    pub fn with_email_domain(domain: &str) -> Self {
        Self {
            email: fakers::email_with_domain(domain),
            ..Faker.fake()
        }
    }
}

impl Dummy<Faker> for CreateUserRequest {
    fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        Self {
            email: fakers::email_with_rng(fakers::DEFAULT_EMAIL_DOMAIN, rng),
            password: fakers::password(rng),
            last_name: fakers::last_name(rng),
            first_name: fakers::first_name(rng),
            middle_name: fakers::middle_name(rng),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreateUserResponse {
    pub user: User,
}

/// Partial update; unset fields go out as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "middleName")]
    pub middle_name: Option<String>,
}

impl Dummy<Faker> for UpdateUserRequest {
    fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        Self {
            email: Some(fakers::email_with_rng(fakers::DEFAULT_EMAIL_DOMAIN, rng)),
            last_name: Some(fakers::last_name(rng)),
            first_name: Some(fakers::first_name(rng)),
            middle_name: Some(fakers::middle_name(rng)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateUserResponse {
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GetUserResponse {
    pub user: User,
}
