use crate::config::DEFAULT_IMAGE_PNG_FILE;
use crate::fakers;
use fake::{Dummy, Faker};
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct File {
    pub id: String,
    /// Absolute URL, `<base>/static/<directory>/<filename>`.
    pub url: String,
    pub filename: String,
    pub directory: String,
}

/// Multipart upload. `upload_file` is read locally and sent as the file
/// part; it is never serialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreateFileRequest {
    pub filename: String,
    pub directory: String,
    #[serde(skip)]
    pub upload_file: PathBuf,
}

impl CreateFileRequest {
    pub fn with_upload_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.upload_file = path.into();
        self
    }
}

impl Dummy<Faker> for CreateFileRequest {
    fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        Self {
            filename: fakers::png_filename(rng),
            directory: fakers::DEFAULT_FILE_DIRECTORY.to_string(),
            upload_file: PathBuf::from(DEFAULT_IMAGE_PNG_FILE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreateFileResponse {
    pub file: File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GetFileResponse {
    pub file: File,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::Fake;

    #[test]
    fn test_upload_file_never_reaches_the_wire() {
        let request = Faker.fake::<CreateFileRequest>().with_upload_file("/tmp/a.png");
        let wire = serde_json::to_value(&request).unwrap();

        assert!(wire.get("upload_file").is_none());
        assert_eq!(wire["directory"], "tests");
        assert!(wire["filename"].as_str().unwrap().ends_with(".png"));
    }
}
