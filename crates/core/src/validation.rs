//! Per-step validation predicates for the mission wizard.
//!
//! Pure functions over a draft snapshot. They never touch the network and
//! only check presence: whether a required value has been filled in.
//! Chronological order of `start_date` / `end_date` is not checked.

use crate::mission::MissionDraft;
use crate::wizard::WizardStep;

/// A step whose required fields are not all filled in.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Step {} ({}) requires: {}", .step.to_number(), .step.label(), .missing.join(", "))]
pub struct StepIncomplete {
    pub step: WizardStep,
    /// Names of the missing fields, in form order.
    pub missing: Vec<&'static str>,
}

/// Returns `Some(trimmed)` when `value` has non-whitespace content.
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Names of the required fields of `step` that are missing from `draft`.
pub fn missing_fields(step: WizardStep, draft: &MissionDraft) -> Vec<&'static str> {
    let mut missing = Vec::new();
    match step {
        WizardStep::Profile => {
            if draft.mission_type.is_none() {
                missing.push("mission_type");
            }
        }
        WizardStep::Logistics => {
            if non_blank(&draft.title).is_none() {
                missing.push("title");
            }
            if non_blank(&draft.country).is_none() {
                missing.push("country");
            }
            if non_blank(&draft.city).is_none() {
                missing.push("city");
            }
            if draft.start_date.is_none() {
                missing.push("start_date");
            }
            if draft.end_date.is_none() {
                missing.push("end_date");
            }
        }
        WizardStep::Narrative => {
            if non_blank(&draft.description).is_none() {
                missing.push("description");
            }
        }
        // Review only.
        WizardStep::Review => {}
    }
    missing
}

/// Validate the required fields of a single step.
pub fn validate_step(step: WizardStep, draft: &MissionDraft) -> Result<(), StepIncomplete> {
    let missing = missing_fields(step, draft);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(StepIncomplete { step, missing })
    }
}

/// Whether the draft may leave `step`.
pub fn can_advance(step: WizardStep, draft: &MissionDraft) -> bool {
    validate_step(step, draft).is_ok()
}

/// Validate every step from the first up to and including `last`,
/// reporting the earliest incomplete one.
pub fn validate_through(last: WizardStep, draft: &MissionDraft) -> Result<(), StepIncomplete> {
    WizardStep::ALL
        .into_iter()
        .take_while(|step| step.to_number() <= last.to_number())
        .try_for_each(|step| validate_step(step, draft))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::MissionType;
    use crate::test_support::complete_draft;
    use crate::types::Date;

    #[test]
    fn profile_requires_mission_type() {
        let mut draft = MissionDraft::default();
        let err = validate_step(WizardStep::Profile, &draft).unwrap_err();
        assert_eq!(err.missing, vec!["mission_type"]);
        assert_eq!(err.to_string(), "Step 1 (Profile) requires: mission_type");

        draft.mission_type = Some(MissionType::Facilitator);
        assert!(validate_step(WizardStep::Profile, &draft).is_ok());
    }

    #[test]
    fn logistics_lists_every_missing_field() {
        let draft = MissionDraft::default();
        let err = validate_step(WizardStep::Logistics, &draft).unwrap_err();
        assert_eq!(
            err.missing,
            vec!["title", "country", "city", "start_date", "end_date"]
        );
    }

    #[test]
    fn logistics_treats_whitespace_as_missing() {
        let mut draft = complete_draft();
        draft.city = "   ".into();
        let err = validate_step(WizardStep::Logistics, &draft).unwrap_err();
        assert_eq!(err.missing, vec!["city"]);
    }

    #[test]
    fn logistics_does_not_order_dates() {
        let mut draft = complete_draft();
        draft.start_date = Date::from_ymd_opt(2026, 9, 30);
        draft.end_date = Date::from_ymd_opt(2026, 9, 1);
        assert!(can_advance(WizardStep::Logistics, &draft));
    }

    #[test]
    fn narrative_requires_description() {
        let mut draft = complete_draft();
        draft.description.clear();
        assert!(!can_advance(WizardStep::Narrative, &draft));
    }

    #[test]
    fn review_has_no_predicate() {
        assert!(can_advance(WizardStep::Review, &MissionDraft::default()));
    }

    #[test]
    fn validate_through_reports_earliest_gap() {
        let mut draft = complete_draft();
        draft.description.clear();
        draft.title.clear();
        let err = validate_through(WizardStep::Narrative, &draft).unwrap_err();
        assert_eq!(err.step, WizardStep::Logistics);

        assert!(validate_through(WizardStep::Profile, &draft).is_ok());
        assert!(validate_through(WizardStep::Review, &complete_draft()).is_ok());
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank("  Dakar "), Some("Dakar"));
        assert_eq!(non_blank(" \t"), None);
    }
}
