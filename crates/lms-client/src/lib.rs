//! Typed client toolkit for the LMS REST API
//!
//! This crate wraps the LMS endpoints (authentication, users, files, courses,
//! exercises) in typed clients, keeps one authenticated session per test user,
//! and provides the assertion helpers the regression suite is written with.
//!
//! # Examples
//!
//! ```no_run
//! use fake::{Fake, Faker};
//! use lms_client::schema::{CreateCourseRequest, CreateFileRequest, CreateUserRequest};
//! use lms_client::{Credential, LmsClients, LmsConfig, assertions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LmsConfig::from_env()?;
//!     let clients = LmsClients::new(config.transport_config().with_logging())?;
//!
//!     // Register a throwaway user, then act as that user
//!     let user_request: CreateUserRequest = Faker.fake();
//!     let user = clients.public_users().create_user(&user_request).await?;
//!     let credential = Credential::from(&user_request);
//!
//!     let file_request = Faker
//!         .fake::<CreateFileRequest>()
//!         .with_upload_file(&config.image_png_file);
//!     let file = clients.files(&credential).await?.create_file(&file_request).await?;
//!
//!     let course_request = CreateCourseRequest {
//!         preview_file_id: file.file.id.clone(),
//!         created_by_user_id: user.user.id.clone(),
//!         ..Faker.fake()
//!     };
//!     let course = clients
//!         .courses(&credential)
//!         .await?
//!         .create_course(&course_request)
//!         .await?;
//!
//!     assertions::assert_create_course_response(&course_request, &course)?;
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod clients;
pub mod config;
pub mod coverage;
pub mod error;
pub mod fakers;
pub mod schema;
pub mod session;
pub mod testing;
pub mod transport;

// Re-export main types
pub use assertions::{AssertionError, AssertionResult};
pub use clients::{
    AuthenticationClient, Authenticator, CoursesClient, ExercisesClient, FilesClient, LmsClients,
    PrivateUsersClient, PublicUsersClient,
};
pub use config::LmsConfig;
pub use coverage::{CoverageTracker, EndpointHit};
pub use error::{LmsError, Result};
pub use session::{Credential, SessionCache};
pub use transport::{
    ApiRequest, CurlRecorder, HttpTransport, RawResponse, RequestRecord, Transport,
    TransportConfig,
};
