//! Test data created through the typed clients before a scenario's request
//! under test.
//!
//! Fixtures form a chain: a file belongs to a user, a course to a user and
//! its preview file, an exercise to a course. Each fixture keeps the request
//! it sent and the response the server returned so scenarios can compare
//! against both.

use crate::context::ScenarioContext;
use crate::scenarios::ScenarioError;
use fake::{Fake, Faker};
use lms_client::Credential;
use lms_client::schema::{
    CreateCourseRequest, CreateCourseResponse, CreateExerciseRequest, CreateFileRequest,
    CreateFileResponse, CreateUserRequest, CreateUserResponse, ExerciseResponse,
};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct UserFixture {
    pub request: CreateUserRequest,
    pub response: CreateUserResponse,
}

impl UserFixture {
    /// Registers a freshly generated user.
    pub async fn create(ctx: &ScenarioContext) -> Result<Self, ScenarioError> {
        let request: CreateUserRequest = Faker.fake();
        let response = ctx.clients.public_users().create_user(&request).await?;
        debug!(user_id = %response.user.id, "Created user fixture");
        Ok(Self { request, response })
    }

    pub fn id(&self) -> &str {
        &self.response.user.id
    }

    pub fn email(&self) -> &str {
        &self.request.email
    }

    pub fn password(&self) -> &str {
        &self.request.password
    }

    /// Login pair for the private clients of this user.
    pub fn credential(&self) -> Credential {
        Credential::from(&self.request)
    }
}

#[derive(Debug, Clone)]
pub struct FileFixture {
    pub request: CreateFileRequest,
    pub response: CreateFileResponse,
}

impl FileFixture {
    /// Uploads the configured test image on behalf of `user`.
    pub async fn create(ctx: &ScenarioContext, user: &UserFixture) -> Result<Self, ScenarioError> {
        let request = Faker
            .fake::<CreateFileRequest>()
            .with_upload_file(ctx.image_png_file());
        let response = ctx
            .clients
            .files(&user.credential())
            .await?
            .create_file(&request)
            .await?;
        debug!(file_id = %response.file.id, "Created file fixture");
        Ok(Self { request, response })
    }

    pub fn id(&self) -> &str {
        &self.response.file.id
    }
}

#[derive(Debug, Clone)]
pub struct CourseFixture {
    pub request: CreateCourseRequest,
    pub response: CreateCourseResponse,
}

impl CourseFixture {
    pub async fn create(
        ctx: &ScenarioContext,
        user: &UserFixture,
        file: &FileFixture,
    ) -> Result<Self, ScenarioError> {
        let request = CreateCourseRequest {
            preview_file_id: file.id().to_string(),
            created_by_user_id: user.id().to_string(),
            ..Faker.fake()
        };
        let response = ctx
            .clients
            .courses(&user.credential())
            .await?
            .create_course(&request)
            .await?;
        debug!(course_id = %response.course.id, "Created course fixture");
        Ok(Self { request, response })
    }

    pub fn id(&self) -> &str {
        &self.response.course.id
    }
}

#[derive(Debug, Clone)]
pub struct ExerciseFixture {
    pub request: CreateExerciseRequest,
    pub response: ExerciseResponse,
}

impl ExerciseFixture {
    pub async fn create(
        ctx: &ScenarioContext,
        user: &UserFixture,
        course: &CourseFixture,
    ) -> Result<Self, ScenarioError> {
        let request = CreateExerciseRequest {
            course_id: course.id().to_string(),
            ..Faker.fake()
        };
        let response = ctx
            .clients
            .exercises(&user.credential())
            .await?
            .create_exercise(&request)
            .await?;
        debug!(exercise_id = %response.exercise.id, "Created exercise fixture");
        Ok(Self { request, response })
    }

    pub fn id(&self) -> &str {
        &self.response.exercise.id
    }
}

/// A user with one course, as most course and exercise scenarios need.
#[derive(Debug, Clone)]
pub struct CourseSetup {
    pub user: UserFixture,
    pub file: FileFixture,
    pub course: CourseFixture,
}

impl CourseSetup {
    pub async fn create(ctx: &ScenarioContext) -> Result<Self, ScenarioError> {
        let user = UserFixture::create(ctx).await?;
        let file = FileFixture::create(ctx, &user).await?;
        let course = CourseFixture::create(ctx, &user, &file).await?;
        Ok(Self { user, file, course })
    }
}
