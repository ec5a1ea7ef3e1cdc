use super::{parse_response, to_json, to_query};
use crate::error::Result;
use crate::schema::{
    CreateCourseRequest, CreateCourseResponse, GetCourseResponse, GetCoursesQuery,
    GetCoursesResponse, UpdateCourseRequest, UpdateCourseResponse,
};
use crate::transport::{RawResponse, Transport};
use std::fmt;
use std::sync::Arc;

const COURSES_PATH: &str = "/api/v1/courses";

/// Client for `/api/v1/courses`.
#[derive(Clone)]
pub struct CoursesClient {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for CoursesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoursesClient")
            .field("base_url", &self.transport.base_url())
            .finish()
    }
}

impl CoursesClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn get_courses_api(&self, query: &GetCoursesQuery) -> Result<RawResponse> {
        self.transport.get(COURSES_PATH, &to_query(query)?).await
    }

    pub async fn get_course_api(&self, course_id: &str) -> Result<RawResponse> {
        self.transport.get(&item_path(course_id), &[]).await
    }

    pub async fn create_course_api(&self, request: &CreateCourseRequest) -> Result<RawResponse> {
        self.transport
            .post_json(COURSES_PATH, to_json(request)?)
            .await
    }

    pub async fn update_course_api(
        &self,
        course_id: &str,
        request: &UpdateCourseRequest,
    ) -> Result<RawResponse> {
        self.transport
            .patch(&item_path(course_id), to_json(request)?)
            .await
    }

    pub async fn delete_course_api(&self, course_id: &str) -> Result<RawResponse> {
        self.transport.delete(&item_path(course_id)).await
    }

    pub async fn get_courses(&self, query: &GetCoursesQuery) -> Result<GetCoursesResponse> {
        parse_response(&self.get_courses_api(query).await?)
    }

    pub async fn get_course(&self, course_id: &str) -> Result<GetCourseResponse> {
        parse_response(&self.get_course_api(course_id).await?)
    }

    pub async fn create_course(&self, request: &CreateCourseRequest) -> Result<CreateCourseResponse> {
        parse_response(&self.create_course_api(request).await?)
    }

    pub async fn update_course(
        &self,
        course_id: &str,
        request: &UpdateCourseRequest,
    ) -> Result<UpdateCourseResponse> {
        parse_response(&self.update_course_api(course_id, request).await?)
    }
}

fn item_path(course_id: &str) -> String {
    format!("{}/{}", COURSES_PATH, course_id)
}
