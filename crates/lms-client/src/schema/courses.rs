use super::files::File;
use super::users::User;
use crate::fakers;
use fake::{Dummy, Faker};
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A course as the server returns it, with its preview file and author
/// expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(rename = "maxScore")]
    pub max_score: i32,
    #[serde(rename = "minScore")]
    pub min_score: i32,
    pub description: String,
    #[serde(rename = "previewFile")]
    pub preview_file: File,
    #[serde(rename = "estimatedTime")]
    pub estimated_time: String,
    #[serde(rename = "createdByUser")]
    pub created_by_user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GetCoursesQuery {
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GetCoursesResponse {
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GetCourseResponse {
    pub course: Course,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreateCourseRequest {
    pub title: String,
    #[serde(rename = "maxScore")]
    pub max_score: i32,
    #[serde(rename = "minScore")]
    pub min_score: i32,
    pub description: String,
    #[serde(rename = "estimatedTime")]
    pub estimated_time: String,
    #[serde(rename = "previewFileId")]
    pub preview_file_id: String,
    #[serde(rename = "createdByUserId")]
    pub created_by_user_id: String,
}

impl Dummy<Faker> for CreateCourseRequest {
    fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        Self {
            title: fakers::sentence(rng),
            max_score: fakers::max_score(rng),
            min_score: fakers::min_score(rng),
            description: fakers::text(rng),
            estimated_time: fakers::estimated_time(rng),
            preview_file_id: fakers::uuid4(rng),
            created_by_user_id: fakers::uuid4(rng),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreateCourseResponse {
    pub course: Course,
}

/// Partial update; unset fields go out as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    #[serde(rename = "maxScore")]
    pub max_score: Option<i32>,
    #[serde(rename = "minScore")]
    pub min_score: Option<i32>,
    pub description: Option<String>,
    #[serde(rename = "estimatedTime")]
    pub estimated_time: Option<String>,
}

impl Dummy<Faker> for UpdateCourseRequest {
    fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        Self {
            title: Some(fakers::sentence(rng)),
            max_score: Some(fakers::max_score(rng)),
            min_score: Some(fakers::min_score(rng)),
            description: Some(fakers::text(rng)),
            estimated_time: Some(fakers::estimated_time(rng)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateCourseResponse {
    pub course: Course,
}
