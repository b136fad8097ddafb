use crate::models::{Course, Grade};

pub const DIPLOMA_COURSE: &str = "Diploma in IT";

static COURSES: [Course; 7] = [
    Course {
        name: DIPLOMA_COURSE,
        min_grade: Grade::C,
        faculty: "School of Computing and Informatics",
        department: "Department of Information Technology",
    },
    Course {
        name: "Computer Science",
        min_grade: Grade::BPlus,
        faculty: "School of Computing and Informatics",
        department: "Department of Computer Science",
    },
    Course {
        name: "Business Information Technology",
        min_grade: Grade::B,
        faculty: "School of Computing and Informatics",
        department: "Department of Information Systems",
    },
    Course {
        name: "Bachelor of Commerce",
        min_grade: Grade::CPlus,
        faculty: "Strathmore Business School",
        department: "Department of Commerce",
    },
    Course {
        name: "Law",
        min_grade: Grade::BPlus,
        faculty: "Strathmore Law School",
        department: "Department of Law",
    },
    Course {
        name: "Actuarial Science",
        min_grade: Grade::AMinus,
        faculty: "School of Finance and Applied Economics",
        department: "Department of Actuarial Science",
    },
    Course {
        name: "Statistics",
        min_grade: Grade::BPlus,
        faculty: "School of Finance and Applied Economics",
        department: "Department of Statistics",
    },
];

/// All offered courses in catalog order.
pub fn courses() -> &'static [Course] {
    &COURSES
}

pub fn find_course(name: &str) -> Option<&'static Course> {
    let wanted = name.trim();
    COURSES
        .iter()
        .find(|course| course.name.eq_ignore_ascii_case(wanted))
}

/// First course (catalog order) whose lowercased name occurs in `lowered_text`.
pub fn course_mentioned_in(lowered_text: &str) -> Option<&'static Course> {
    COURSES
        .iter()
        .find(|course| lowered_text.contains(&course.name.to_lowercase()))
}

pub fn eligible_courses(grade: Grade) -> Vec<&'static Course> {
    COURSES
        .iter()
        .filter(|course| grade.meets(course.min_grade))
        .collect()
}
