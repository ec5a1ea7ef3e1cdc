//! Random test-data generators.
//!
//! The request models implement [`fake::Dummy<fake::Faker>`] in terms of the
//! functions here, so `Faker.fake::<CreateCourseRequest>()` yields a payload
//! the server accepts. Values are produced once, at construction time.

use fake::Fake;
use fake::faker::internet::raw::{Password, Username};
use fake::faker::lorem::raw::{Paragraph, Sentence};
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::Rng;
use uuid::Uuid;

/// Domain used when a caller does not ask for a specific one.
pub const DEFAULT_EMAIL_DOMAIN: &str = "example.com";

/// Directory new files are uploaded to unless a test says otherwise.
pub const DEFAULT_FILE_DIRECTORY: &str = "tests";

/// A fresh email address on `domain`.
///
/// A random suffix keeps addresses unique across runs against the same
/// server, which rejects duplicate users.
pub fn email_with_domain(domain: &str) -> String {
    email_with_rng(domain, &mut rand::rng())
}

pub(crate) fn email_with_rng<R: Rng + ?Sized>(domain: &str, rng: &mut R) -> String {
    let user: String = Username(EN).fake_with_rng(rng);
    let suffix = Uuid::from_u128(rng.random()).simple().to_string();
    format!("{}.{}@{}", user.to_lowercase(), &suffix[..8], domain)
}

pub(crate) fn password<R: Rng + ?Sized>(rng: &mut R) -> String {
    Password(EN, 8..16).fake_with_rng(rng)
}

pub(crate) fn last_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    LastName(EN).fake_with_rng(rng)
}

pub(crate) fn first_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    FirstName(EN).fake_with_rng(rng)
}

pub(crate) fn middle_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    FirstName(EN).fake_with_rng(rng)
}

pub(crate) fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    Sentence(EN, 3..6).fake_with_rng(rng)
}

pub(crate) fn text<R: Rng + ?Sized>(rng: &mut R) -> String {
    Paragraph(EN, 1..3).fake_with_rng(rng)
}

pub(crate) fn uuid4<R: Rng + ?Sized>(rng: &mut R) -> String {
    Uuid::from_u128(rng.random()).to_string()
}

pub(crate) fn max_score<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.random_range(50..=100)
}

pub(crate) fn min_score<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.random_range(1..=49)
}

pub(crate) fn order_index<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.random_range(0..=100)
}

/// Duration in the `"<n> weeks"` form the server stores verbatim.
pub(crate) fn estimated_time<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} weeks", rng.random_range(1..=100))
}

pub(crate) fn png_filename<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}.png", uuid4(rng))
}
