use std::sync::Arc;
use std::time::Instant;

use admissions_core::{
    courses, eligible_courses, respond, AdmissionsReply, ChatInput, Course, Grade, Intent,
};
use admissions_observability::AppMetrics;
use serde::Serialize;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Serialize)]
pub struct EligibilityReport {
    pub grade: Grade,
    pub courses: Vec<&'static str>,
}

/// Front door shared by the HTTP service and the CLI.
#[derive(Debug, Clone)]
pub struct AdmissionsAssistant {
    metrics: Arc<AppMetrics>,
}

impl AdmissionsAssistant {
    pub fn new(metrics: Arc<AppMetrics>) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }

    #[instrument(skip(self, input))]
    pub fn handle_chat(&self, input: ChatInput) -> AdmissionsReply {
        let started = Instant::now();
        self.metrics.inc_request();

        let text = input.text();
        debug!(chars = text.chars().count(), "classifying message");
        let reply = respond(text);

        match reply.intent {
            Intent::Unrecognized => self.metrics.inc_fallback(),
            Intent::GradeSubmission => self.metrics.inc_grade_submission(),
            _ => {}
        }

        let elapsed = started.elapsed();
        self.metrics.observe_latency(elapsed);
        info!(
            intent = %reply.intent.as_code(),
            grade = ?reply.grade,
            latency_us = elapsed.as_micros() as u64,
            "chat handled"
        );

        reply
    }

    pub fn catalog(&self) -> &'static [Course] {
        courses()
    }

    pub fn eligibility(&self, grade: Grade) -> EligibilityReport {
        EligibilityReport {
            grade,
            courses: eligible_courses(grade)
                .into_iter()
                .map(|course| course.name)
                .collect(),
        }
    }
}

impl Default for AdmissionsAssistant {
    fn default() -> Self {
        Self::new(AppMetrics::shared())
    }
}
