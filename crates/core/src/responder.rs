use crate::catalog::courses;
use crate::intent::{classify, normalize_text, Classification};
use crate::models::{AdmissionsReply, Course};

pub const GREETING_REPLY: &str = "Hello! 👋 Welcome to Strathmore AI Assistant 🎓\n\n\
• Type your KCSE grade (e.g. A, B, C+)\n\
• Type Dip / Diploma in IT\n\
• Type a course name for more info\n\
• Type 1 to view all courses";

pub const THANKS_REPLY: &str = "You’re most welcome 😊 Happy to help!";

pub const POSTGRADUATE_REPLY: &str = "🎓 Based on a completed degree, you may qualify for:\n\n\
• Master of Business Administration (MBA)\n\
• Master of Science in IT (MSc IT)\n\n\
Type a programme name to get more details.";

pub const FALLBACK_REPLY: &str = "Sorry 😅, we couldn’t understand that.\n\
Please type your qualification (A, B, C+, Dip in IT),\n\
or type a course name to get more info.";

/// Classifies a raw message and renders the reply for it.
pub fn respond(message: &str) -> AdmissionsReply {
    let classification = classify(&normalize_text(message));

    AdmissionsReply {
        reply: render(&classification),
        intent: classification.intent(),
        grade: classification.grade(),
    }
}

pub fn render(classification: &Classification) -> String {
    match classification {
        Classification::Greeting => GREETING_REPLY.to_string(),
        Classification::Thanks => THANKS_REPLY.to_string(),
        Classification::ListAll => render_catalog(courses()),
        Classification::PostgraduateInquiry => POSTGRADUATE_REPLY.to_string(),
        Classification::DiplomaInquiry(course) | Classification::CourseInquiry(course) => {
            render_course(course)
        }
        Classification::GradeSubmission { eligible, .. } => render_eligible(eligible),
        Classification::Unrecognized => FALLBACK_REPLY.to_string(),
    }
}

fn render_catalog(catalog: &[Course]) -> String {
    let mut reply = String::from("📚 Available Courses:\n\n");
    for course in catalog {
        reply.push_str(&format!(
            "• {}\n  Faculty: {}\n  Department: {}\n  Minimum Grade: {}\n\n",
            course.name, course.faculty, course.department, course.min_grade
        ));
    }
    reply
}

fn render_course(course: &Course) -> String {
    format!(
        "Course: {}\nFaculty: {}\nDepartment: {}\nMinimum Grade Required: {}",
        course.name, course.faculty, course.department, course.min_grade
    )
}

fn render_eligible(eligible: &[&Course]) -> String {
    let items = eligible
        .iter()
        .map(|course| format!("• {}\n", course.name))
        .collect::<String>();

    format!(
        "✅ Based on your grade, you qualify for:\n\n{items}\nType a course name to see more details."
    )
}
