use oshub_core::error::CoreError;
use oshub_core::submission::{parse_list_project_form, ParseOutcome, RawSubmission};
use oshub_core::types::Timestamp;

use crate::services::SubmissionParser;

/// The listing form's own validation rules.
pub struct ListProjectFormParser;

impl SubmissionParser for ListProjectFormParser {
    fn parse(
        &self,
        raw: &RawSubmission,
        maintainer: &str,
        now: Timestamp,
    ) -> Result<ParseOutcome, CoreError> {
        parse_list_project_form(raw, maintainer, now)
    }
}
