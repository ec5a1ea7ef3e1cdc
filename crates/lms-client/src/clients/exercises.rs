use super::{parse_response, to_json, to_query};
use crate::error::Result;
use crate::schema::{
    CreateExerciseRequest, ExerciseResponse, GetExercisesQuery, GetExercisesResponse,
    UpdateExerciseRequest,
};
use crate::transport::{RawResponse, Transport};
use std::fmt;
use std::sync::Arc;

const EXERCISES_PATH: &str = "/api/v1/exercises";

/// Client for `/api/v1/exercises`.
#[derive(Clone)]
pub struct ExercisesClient {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for ExercisesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExercisesClient")
            .field("base_url", &self.transport.base_url())
            .finish()
    }
}

impl ExercisesClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn get_exercises_api(&self, query: &GetExercisesQuery) -> Result<RawResponse> {
        self.transport.get(EXERCISES_PATH, &to_query(query)?).await
    }

    pub async fn get_exercise_api(&self, exercise_id: &str) -> Result<RawResponse> {
        self.transport.get(&item_path(exercise_id), &[]).await
    }

    pub async fn create_exercise_api(&self, request: &CreateExerciseRequest) -> Result<RawResponse> {
        self.transport
            .post_json(EXERCISES_PATH, to_json(request)?)
            .await
    }

    pub async fn update_exercise_api(
        &self,
        exercise_id: &str,
        request: &UpdateExerciseRequest,
    ) -> Result<RawResponse> {
        self.transport
            .patch(&item_path(exercise_id), to_json(request)?)
            .await
    }

    pub async fn delete_exercise_api(&self, exercise_id: &str) -> Result<RawResponse> {
        self.transport.delete(&item_path(exercise_id)).await
    }

    pub async fn get_exercises(&self, query: &GetExercisesQuery) -> Result<GetExercisesResponse> {
        parse_response(&self.get_exercises_api(query).await?)
    }

    pub async fn get_exercise(&self, exercise_id: &str) -> Result<ExerciseResponse> {
        parse_response(&self.get_exercise_api(exercise_id).await?)
    }

    pub async fn create_exercise(&self, request: &CreateExerciseRequest) -> Result<ExerciseResponse> {
        parse_response(&self.create_exercise_api(request).await?)
    }

    pub async fn update_exercise(
        &self,
        exercise_id: &str,
        request: &UpdateExerciseRequest,
    ) -> Result<ExerciseResponse> {
        parse_response(&self.update_exercise_api(exercise_id, request).await?)
    }
}

fn item_path(exercise_id: &str) -> String {
    format!("{}/{}", EXERCISES_PATH, exercise_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LmsError;
    use crate::testing::MockTransport;
    use fake::{Fake, Faker};
    use reqwest::StatusCode;
    use serde_json::json;

    fn exercise_body(request: &CreateExerciseRequest) -> serde_json::Value {
        json!({
            "exercise": {
                "id": "e-1",
                "title": request.title,
                "courseId": request.course_id,
                "maxScore": request.max_score,
                "minScore": request.min_score,
                "orderIndex": request.order_index,
                "description": request.description,
                "estimatedTime": request.estimated_time
            }
        })
    }

    #[tokio::test]
    async fn test_create_exercise_parses_envelope() {
        let request: CreateExerciseRequest = Faker.fake();
        let mock = MockTransport::new();
        mock.push_json(StatusCode::OK, exercise_body(&request));
        let client = ExercisesClient::new(Arc::new(mock.clone()));

        let response = client.create_exercise(&request).await.unwrap();

        assert_eq!(response.exercise.course_id, request.course_id);
        assert_eq!(mock.last_request().unwrap().path, "/api/v1/exercises");
    }

    #[tokio::test]
    async fn test_get_exercises_filters_by_course() {
        let mock = MockTransport::new();
        mock.push_json(StatusCode::OK, json!({"exercises": []}));
        let client = ExercisesClient::new(Arc::new(mock.clone()));

        client
            .get_exercises(&GetExercisesQuery {
                course_id: "c-1".into(),
            })
            .await
            .unwrap();

        assert_eq!(
            mock.last_request().unwrap().query,
            vec![("courseId".into(), "c-1".into())]
        );
    }

    #[tokio::test]
    async fn test_get_missing_exercise() {
        let mock = MockTransport::new();
        mock.push_json(StatusCode::NOT_FOUND, json!({"detail": "Exercise not found"}))
            .push_json(StatusCode::NOT_FOUND, json!({"detail": "Exercise not found"}));
        let client = ExercisesClient::new(Arc::new(mock));

        let raw = client.get_exercise_api("e-1").await.unwrap();
        assert_eq!(raw.status(), StatusCode::NOT_FOUND);

        let typed = client.get_exercise("e-1").await.unwrap_err();
        assert!(matches!(typed, LmsError::Api { .. }));
    }
}
