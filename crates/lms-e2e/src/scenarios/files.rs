//! File scenarios: upload, read back, delete, and the server's validation
//! and not-found payloads.

use super::{ScenarioError, TestScenario, check_schema, response_body};
use crate::context::ScenarioContext;
use crate::fixtures::{FileFixture, UserFixture};
use crate::models::Checks;
use async_trait::async_trait;
use fake::{Fake, Faker};
use lms_client::assertions::{
    assert_create_file_response, assert_create_file_with_empty_directory_response,
    assert_create_file_with_empty_filename_response, assert_file_not_found_response,
    assert_get_file_response, assert_get_file_with_incorrect_file_id_response,
    assert_status_code,
};
use lms_client::schema::{
    CreateFileRequest, CreateFileResponse, GetFileResponse, InternalErrorResponse,
    ValidationErrorResponse,
};
use reqwest::StatusCode;

/// Id that is not a UUID, rejected by the server's path validation.
const INCORRECT_FILE_ID: &str = "incorrect-file-id";

fn upload_request(ctx: &ScenarioContext) -> CreateFileRequest {
    Faker
        .fake::<CreateFileRequest>()
        .with_upload_file(ctx.image_png_file())
}

pub struct CreateFileScenario;

#[async_trait]
impl TestScenario for CreateFileScenario {
    fn id(&self) -> &str {
        "files-create"
    }

    fn description(&self) -> &str {
        "Upload a PNG and get its public URL back"
    }

    fn suite(&self) -> &str {
        "files"
    }

    async fn run(&self, ctx: &ScenarioContext, checks: &mut Checks) -> Result<(), ScenarioError> {
        let user = UserFixture::create(ctx).await?;
        let client = ctx.clients.files(&user.credential()).await?;
        let request = upload_request(ctx);

        let response = client.create_file_api(&request).await?;

        let (body, json) =
            response_body::<CreateFileResponse>(checks, &response, StatusCode::OK)?;
        checks.check(
            "Create file response",
            assert_create_file_response(&request, &body, ctx.base_url()),
        )?;
        check_schema::<CreateFileResponse>(checks, &json)
    }
}

pub struct GetFileScenario;

#[async_trait]
impl TestScenario for GetFileScenario {
    fn id(&self) -> &str {
        "files-get"
    }

    fn description(&self) -> &str {
        "Get an uploaded file by id"
    }

    fn suite(&self) -> &str {
        "files"
    }

    async fn run(&self, ctx: &ScenarioContext, checks: &mut Checks) -> Result<(), ScenarioError> {
        let user = UserFixture::create(ctx).await?;
        let file = FileFixture::create(ctx, &user).await?;
        let client = ctx.clients.files(&user.credential()).await?;

        let response = client.get_file_api(file.id()).await?;

        let (body, json) = response_body::<GetFileResponse>(checks, &response, StatusCode::OK)?;
        checks.check(
            "Get file response",
            assert_get_file_response(&body, &file.response),
        )?;
        check_schema::<GetFileResponse>(checks, &json)
    }
}

pub struct CreateFileWithEmptyFilenameScenario;

#[async_trait]
impl TestScenario for CreateFileWithEmptyFilenameScenario {
    fn id(&self) -> &str {
        "files-create-empty-filename"
    }

    fn description(&self) -> &str {
        "Upload with an empty filename is rejected with 422"
    }

    fn suite(&self) -> &str {
        "files"
    }

    async fn run(&self, ctx: &ScenarioContext, checks: &mut Checks) -> Result<(), ScenarioError> {
        let user = UserFixture::create(ctx).await?;
        let client = ctx.clients.files(&user.credential()).await?;
        let request = CreateFileRequest {
            filename: String::new(),
            ..upload_request(ctx)
        };

        let response = client.create_file_api(&request).await?;

        let (body, json) = response_body::<ValidationErrorResponse>(
            checks,
            &response,
            StatusCode::UNPROCESSABLE_ENTITY,
        )?;
        checks.check(
            "Validation error response",
            assert_create_file_with_empty_filename_response(&body),
        )?;
        check_schema::<ValidationErrorResponse>(checks, &json)
    }
}

pub struct CreateFileWithEmptyDirectoryScenario;

#[async_trait]
impl TestScenario for CreateFileWithEmptyDirectoryScenario {
    fn id(&self) -> &str {
        "files-create-empty-directory"
    }

    fn description(&self) -> &str {
        "Upload with an empty directory is rejected with 422"
    }

    fn suite(&self) -> &str {
        "files"
    }

    async fn run(&self, ctx: &ScenarioContext, checks: &mut Checks) -> Result<(), ScenarioError> {
        let user = UserFixture::create(ctx).await?;
        let client = ctx.clients.files(&user.credential()).await?;
        let request = CreateFileRequest {
            directory: String::new(),
            ..upload_request(ctx)
        };

        let response = client.create_file_api(&request).await?;

        let (body, json) = response_body::<ValidationErrorResponse>(
            checks,
            &response,
            StatusCode::UNPROCESSABLE_ENTITY,
        )?;
        checks.check(
            "Validation error response",
            assert_create_file_with_empty_directory_response(&body),
        )?;
        check_schema::<ValidationErrorResponse>(checks, &json)
    }
}

pub struct DeleteFileScenario;

#[async_trait]
impl TestScenario for DeleteFileScenario {
    fn id(&self) -> &str {
        "files-delete"
    }

    fn description(&self) -> &str {
        "Delete a file, then reading it back returns 404"
    }

    fn suite(&self) -> &str {
        "files"
    }

    async fn run(&self, ctx: &ScenarioContext, checks: &mut Checks) -> Result<(), ScenarioError> {
        let user = UserFixture::create(ctx).await?;
        let file = FileFixture::create(ctx, &user).await?;
        let client = ctx.clients.files(&user.credential()).await?;

        let delete_response = client.delete_file_api(file.id()).await?;
        checks.check(
            "Delete status code",
            assert_status_code(delete_response.status(), StatusCode::OK),
        )?;

        let get_response = client.get_file_api(file.id()).await?;
        let (body, json) = response_body::<InternalErrorResponse>(
            checks,
            &get_response,
            StatusCode::NOT_FOUND,
        )?;
        checks.check("Not found response", assert_file_not_found_response(&body))?;
        check_schema::<InternalErrorResponse>(checks, &json)
    }
}

pub struct GetFileWithIncorrectIdScenario;

#[async_trait]
impl TestScenario for GetFileWithIncorrectIdScenario {
    fn id(&self) -> &str {
        "files-get-incorrect-id"
    }

    fn description(&self) -> &str {
        "Get a file by a non-UUID id is rejected with 422"
    }

    fn suite(&self) -> &str {
        "files"
    }

    async fn run(&self, ctx: &ScenarioContext, checks: &mut Checks) -> Result<(), ScenarioError> {
        let user = UserFixture::create(ctx).await?;
        let client = ctx.clients.files(&user.credential()).await?;

        let response = client.get_file_api(INCORRECT_FILE_ID).await?;

        let (body, json) = response_body::<ValidationErrorResponse>(
            checks,
            &response,
            StatusCode::UNPROCESSABLE_ENTITY,
        )?;
        checks.check(
            "Validation error response",
            assert_get_file_with_incorrect_file_id_response(&body),
        )?;
        check_schema::<ValidationErrorResponse>(checks, &json)
    }
}
