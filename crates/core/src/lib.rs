pub mod catalog;
pub mod grade;
pub mod intent;
pub mod models;
pub mod responder;

pub use catalog::{courses, eligible_courses, find_course};
pub use grade::extract_grade;
pub use intent::{classify, normalize_text, Classification};
pub use models::*;
pub use responder::respond;
