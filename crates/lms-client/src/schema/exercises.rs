use crate::fakers;
use fake::{Dummy, Faker};
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Exercise {
    pub id: String,
    pub title: String,
    #[serde(rename = "courseId")]
    pub course_id: String,
    #[serde(rename = "maxScore")]
    pub max_score: i32,
    #[serde(rename = "minScore")]
    pub min_score: i32,
    #[serde(rename = "orderIndex")]
    pub order_index: i32,
    pub description: String,
    #[serde(rename = "estimatedTime")]
    pub estimated_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GetExercisesQuery {
    #[serde(rename = "courseId")]
    pub course_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GetExercisesResponse {
    pub exercises: Vec<Exercise>,
}

/// Envelope shared by get, create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExerciseResponse {
    pub exercise: Exercise,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreateExerciseRequest {
    pub title: String,
    #[serde(rename = "courseId")]
    pub course_id: String,
    #[serde(rename = "maxScore")]
    pub max_score: i32,
    #[serde(rename = "minScore")]
    pub min_score: i32,
    #[serde(rename = "orderIndex")]
    pub order_index: i32,
    pub description: String,
    #[serde(rename = "estimatedTime")]
    pub estimated_time: String,
}

impl Dummy<Faker> for CreateExerciseRequest {
    fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        Self {
            title: fakers::sentence(rng),
            course_id: fakers::uuid4(rng),
            max_score: fakers::max_score(rng),
            min_score: fakers::min_score(rng),
            order_index: fakers::order_index(rng),
            description: fakers::text(rng),
            estimated_time: fakers::estimated_time(rng),
        }
    }
}

/// Partial update; unset fields go out as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateExerciseRequest {
    pub title: Option<String>,
    #[serde(rename = "maxScore")]
    pub max_score: Option<i32>,
    #[serde(rename = "minScore")]
    pub min_score: Option<i32>,
    #[serde(rename = "orderIndex")]
    pub order_index: Option<i32>,
    pub description: Option<String>,
    #[serde(rename = "estimatedTime")]
    pub estimated_time: Option<String>,
}

impl Dummy<Faker> for UpdateExerciseRequest {
    fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        Self {
            title: Some(fakers::sentence(rng)),
            max_score: Some(fakers::max_score(rng)),
            min_score: Some(fakers::min_score(rng)),
            order_index: Some(fakers::order_index(rng)),
            description: Some(fakers::text(rng)),
            estimated_time: Some(fakers::estimated_time(rng)),
        }
    }
}
