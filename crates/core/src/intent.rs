use crate::catalog::{course_mentioned_in, courses, eligible_courses, find_course, DIPLOMA_COURSE};
use crate::grade::extract_grade;
use crate::models::{Course, Grade, Intent};

const GREETINGS: &[&str] = &["hi", "hello", "hey", "start"];
const THANKS: &[&str] = &["thanks", "thank you", "asante"];
const POSTGRAD: &[&str] = &["degree", "bsc", "ba", "bcom", "undergraduate", "graduate"];
const DIPLOMA_KEYWORD: &str = "dip";
const LIST_ALL: &str = "1";

/// Outcome of classifying one message, carrying what the reply needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Greeting,
    Thanks,
    ListAll,
    PostgraduateInquiry,
    DiplomaInquiry(&'static Course),
    CourseInquiry(&'static Course),
    GradeSubmission {
        grade: Grade,
        eligible: Vec<&'static Course>,
    },
    Unrecognized,
}

impl Classification {
    pub fn intent(&self) -> Intent {
        match self {
            Self::Greeting => Intent::Greeting,
            Self::Thanks => Intent::Thanks,
            Self::ListAll => Intent::ListAll,
            Self::PostgraduateInquiry => Intent::PostgraduateInquiry,
            Self::DiplomaInquiry(_) => Intent::DiplomaInquiry,
            Self::CourseInquiry(_) => Intent::CourseInquiry,
            Self::GradeSubmission { .. } => Intent::GradeSubmission,
            Self::Unrecognized => Intent::Unrecognized,
        }
    }

    pub fn grade(&self) -> Option<Grade> {
        match self {
            Self::GradeSubmission { grade, .. } => Some(*grade),
            _ => None,
        }
    }
}

type Rule = fn(&str) -> Option<Classification>;

// First match wins; the order decides messages that match several rules.
const RULES: [Rule; 7] = [
    greeting,
    thanks,
    list_all,
    postgraduate,
    diploma,
    named_course,
    grade_submission,
];

pub fn normalize_text(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Classifies an already normalised message.
pub fn classify(normalized: &str) -> Classification {
    RULES
        .iter()
        .find_map(|rule| rule(normalized))
        .unwrap_or(Classification::Unrecognized)
}

fn greeting(text: &str) -> Option<Classification> {
    GREETINGS
        .contains(&text)
        .then_some(Classification::Greeting)
}

fn thanks(text: &str) -> Option<Classification> {
    contains_any(text, THANKS).then_some(Classification::Thanks)
}

fn list_all(text: &str) -> Option<Classification> {
    (text == LIST_ALL).then_some(Classification::ListAll)
}

fn postgraduate(text: &str) -> Option<Classification> {
    // Course names such as "Bachelor of Commerce" contain "ba"; they are
    // course inquiries, not degree holders.
    let remainder = courses().iter().fold(text.to_string(), |acc, course| {
        acc.replace(&course.name.to_lowercase(), " ")
    });

    contains_any(&remainder, POSTGRAD).then_some(Classification::PostgraduateInquiry)
}

fn diploma(text: &str) -> Option<Classification> {
    if !text.contains(DIPLOMA_KEYWORD) {
        return None;
    }
    find_course(DIPLOMA_COURSE).map(Classification::DiplomaInquiry)
}

fn named_course(text: &str) -> Option<Classification> {
    course_mentioned_in(text).map(Classification::CourseInquiry)
}

fn grade_submission(text: &str) -> Option<Classification> {
    let grade = extract_grade(text)?;
    let eligible = eligible_courses(grade);

    // A recognised grade that opens no course is treated as unrecognised input.
    if eligible.is_empty() {
        return None;
    }

    Some(Classification::GradeSubmission { grade, eligible })
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}
