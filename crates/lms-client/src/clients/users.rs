use super::{parse_response, to_json};
use crate::error::Result;
use crate::schema::{
    CreateUserRequest, CreateUserResponse, GetUserResponse, UpdateUserRequest, UpdateUserResponse,
};
use crate::transport::{RawResponse, Transport};
use std::fmt;
use std::sync::Arc;

const USERS_PATH: &str = "/api/v1/users";

/// Unauthenticated client for user registration.
#[derive(Clone)]
pub struct PublicUsersClient {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for PublicUsersClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicUsersClient")
            .field("base_url", &self.transport.base_url())
            .finish()
    }
}

impl PublicUsersClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn create_user_api(&self, request: &CreateUserRequest) -> Result<RawResponse> {
        self.transport.post_json(USERS_PATH, to_json(request)?).await
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<CreateUserResponse> {
        parse_response(&self.create_user_api(request).await?)
    }
}

/// Client for `/api/v1/users` acting as a logged-in user.
#[derive(Clone)]
pub struct PrivateUsersClient {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for PrivateUsersClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateUsersClient")
            .field("base_url", &self.transport.base_url())
            .finish()
    }
}

impl PrivateUsersClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn get_user_me_api(&self) -> Result<RawResponse> {
        self.transport
            .get(&format!("{}/me", USERS_PATH), &[])
            .await
    }

    pub async fn get_user_api(&self, user_id: &str) -> Result<RawResponse> {
        self.transport
            .get(&format!("{}/{}", USERS_PATH, user_id), &[])
            .await
    }

    pub async fn update_user_api(
        &self,
        user_id: &str,
        request: &UpdateUserRequest,
    ) -> Result<RawResponse> {
        self.transport
            .patch(&format!("{}/{}", USERS_PATH, user_id), to_json(request)?)
            .await
    }

    pub async fn delete_user_api(&self, user_id: &str) -> Result<RawResponse> {
        self.transport
            .delete(&format!("{}/{}", USERS_PATH, user_id))
            .await
    }

    pub async fn get_user_me(&self) -> Result<GetUserResponse> {
        parse_response(&self.get_user_me_api().await?)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<GetUserResponse> {
        parse_response(&self.get_user_api(user_id).await?)
    }

    pub async fn update_user(
        &self,
        user_id: &str,
        request: &UpdateUserRequest,
    ) -> Result<UpdateUserResponse> {
        parse_response(&self.update_user_api(user_id, request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LmsError;
    use crate::testing::MockTransport;
    use crate::transport::RequestBody;
    use reqwest::{Method, StatusCode};
    use serde_json::json;

    fn user_body() -> serde_json::Value {
        json!({
            "user": {
                "id": "u-1",
                "email": "user@example.com",
                "lastName": "Ivanov",
                "firstName": "Ivan",
                "middleName": "Ivanovich"
            }
        })
    }

    #[tokio::test]
    async fn test_create_user_posts_wire_payload() {
        let mock = MockTransport::new();
        mock.push_json(StatusCode::OK, user_body());
        let client = PublicUsersClient::new(Arc::new(mock.clone()));
        let request = CreateUserRequest {
            email: "user@example.com".into(),
            password: "secret".into(),
            last_name: "Ivanov".into(),
            first_name: "Ivan".into(),
            middle_name: "Ivanovich".into(),
        };

        let response = client.create_user(&request).await.unwrap();

        assert_eq!(response.user.email, request.email);
        let sent = mock.last_request().unwrap();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.path, "/api/v1/users");
        match sent.body {
            RequestBody::Json(body) => assert_eq!(body["lastName"], "Ivanov"),
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_private_paths() {
        let mock = MockTransport::new();
        mock.push_json(StatusCode::OK, user_body())
            .push_json(StatusCode::OK, user_body())
            .push_json(StatusCode::OK, user_body())
            .push_text(StatusCode::OK, "");
        let client = PrivateUsersClient::new(Arc::new(mock.clone()));

        client.get_user_me().await.unwrap();
        client.get_user("u-1").await.unwrap();
        client
            .update_user("u-1", &UpdateUserRequest::default())
            .await
            .unwrap();
        client.delete_user_api("u-1").await.unwrap();

        let calls: Vec<(Method, String)> = mock
            .requests()
            .into_iter()
            .map(|request| (request.method, request.path))
            .collect();
        assert_eq!(
            calls,
            vec![
                (Method::GET, "/api/v1/users/me".to_string()),
                (Method::GET, "/api/v1/users/u-1".to_string()),
                (Method::PATCH, "/api/v1/users/u-1".to_string()),
                (Method::DELETE, "/api/v1/users/u-1".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_typed_get_rejects_unauthorized() {
        let mock = MockTransport::new();
        mock.push_json(StatusCode::UNAUTHORIZED, json!({"detail": "Not authenticated"}));
        let client = PrivateUsersClient::new(Arc::new(mock));

        let err = client.get_user_me().await.unwrap_err();
        assert!(matches!(err, LmsError::Api { status, .. } if status == StatusCode::UNAUTHORIZED));
    }
}
