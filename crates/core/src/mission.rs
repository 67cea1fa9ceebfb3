//! Mission entity, the transient mission draft, and field editing.
//!
//! A [`Mission`] is the persisted record. A [`MissionDraft`] is the
//! in-progress state owned by one wizard; it is never written anywhere
//! until the wizard submits it as a single [`NewMission`] insert or
//! [`MissionChanges`] update.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Date, DbId, Timestamp};
use crate::validation::{self, StepIncomplete};
use crate::wizard::WizardStep;

/// Date format accepted for `start_date` / `end_date` field edits.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Mission type / status
// ---------------------------------------------------------------------------

/// Who leads the mission: a traveler carrying equipment abroad, or a
/// facilitator running it from a classroom or club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionType {
    Traveler,
    Facilitator,
}

impl MissionType {
    /// Parse a mission type string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "traveler" => Ok(Self::Traveler),
            "facilitator" => Ok(Self::Facilitator),
            _ => Err(CoreError::Validation(format!(
                "Invalid mission type '{s}'. Must be one of: traveler, facilitator"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Traveler => "traveler",
            Self::Facilitator => "facilitator",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    #[default]
    Active,
    Completed,
}

impl MissionStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid mission status '{s}'. Must be one of: active, completed"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

// ---------------------------------------------------------------------------
// Persisted mission
// ---------------------------------------------------------------------------

/// A persisted mission record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub country: String,
    pub city: String,
    pub start_date: Date,
    pub end_date: Date,
    pub mission_type: MissionType,
    pub image_url: Option<String>,
    pub fundraising_url: Option<String>,
    pub status: MissionStatus,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Mission {
    /// The fields a wizard submission may write.
    pub fn editable_fields(&self) -> MissionChanges {
        MissionChanges {
            title: self.title.clone(),
            description: self.description.clone(),
            country: self.country.clone(),
            city: self.city.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            mission_type: self.mission_type,
            image_url: self.image_url.clone(),
            fundraising_url: self.fundraising_url.clone(),
            status: self.status,
        }
    }
}

/// Full set of editable mission fields, written as one update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionChanges {
    pub title: String,
    pub description: String,
    pub country: String,
    pub city: String,
    pub start_date: Date,
    pub end_date: Date,
    pub mission_type: MissionType,
    pub image_url: Option<String>,
    pub fundraising_url: Option<String>,
    pub status: MissionStatus,
}

/// Insert payload: the editable fields plus the server-managed owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMission {
    pub created_by: DbId,
    #[serde(flatten)]
    pub fields: MissionChanges,
}

// ---------------------------------------------------------------------------
// Editable fields
// ---------------------------------------------------------------------------

/// Draft fields addressable by name from the caller.
///
/// `mission_type` is deliberately absent: it is set through profile
/// selection on step 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionField {
    Title,
    Description,
    Country,
    City,
    StartDate,
    EndDate,
    ImageUrl,
    FundraisingUrl,
    Status,
}

impl MissionField {
    pub const ALL: [MissionField; 9] = [
        Self::Title,
        Self::Description,
        Self::Country,
        Self::City,
        Self::StartDate,
        Self::EndDate,
        Self::ImageUrl,
        Self::FundraisingUrl,
        Self::Status,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Country => "country",
            Self::City => "city",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::ImageUrl => "image_url",
            Self::FundraisingUrl => "fundraising_url",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for MissionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MissionField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

/// A field edit that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Unknown mission field '{0}'")]
    UnknownField(String),

    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        field: MissionField,
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// In-progress mission state owned by a single wizard.
///
/// Empty strings mean "not filled in"; optional URLs become `None` when the
/// draft is turned into a write payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionDraft {
    pub title: String,
    pub description: String,
    pub country: String,
    pub city: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub mission_type: Option<MissionType>,
    pub image_url: String,
    pub fundraising_url: String,
    pub status: MissionStatus,
}

impl MissionDraft {
    /// Pre-populate a draft from an existing mission (edit mode).
    pub fn from_mission(mission: &Mission) -> Self {
        Self {
            title: mission.title.clone(),
            description: mission.description.clone(),
            country: mission.country.clone(),
            city: mission.city.clone(),
            start_date: Some(mission.start_date),
            end_date: Some(mission.end_date),
            mission_type: Some(mission.mission_type),
            image_url: mission.image_url.clone().unwrap_or_default(),
            fundraising_url: mission.fundraising_url.clone().unwrap_or_default(),
            status: mission.status,
        }
    }

    /// Apply a single named field edit.
    ///
    /// Dates use `YYYY-MM-DD`; an empty value clears the date.
    pub fn set_field(&mut self, field: MissionField, value: &str) -> Result<(), FieldError> {
        match field {
            MissionField::Title => self.title = value.to_string(),
            MissionField::Description => self.description = value.to_string(),
            MissionField::Country => self.country = value.to_string(),
            MissionField::City => self.city = value.to_string(),
            MissionField::StartDate => self.start_date = parse_date(field, value)?,
            MissionField::EndDate => self.end_date = parse_date(field, value)?,
            MissionField::ImageUrl => self.image_url = value.to_string(),
            MissionField::FundraisingUrl => self.fundraising_url = value.to_string(),
            MissionField::Status => {
                self.status = MissionStatus::from_str_db(value.trim()).map_err(|_| {
                    FieldError::InvalidValue {
                        field,
                        message: "must be 'active' or 'completed'".into(),
                    }
                })?
            }
        }
        Ok(())
    }

    /// Build the write payload. Fails if any gated step is incomplete.
    pub fn to_changes(&self) -> Result<MissionChanges, StepIncomplete> {
        validation::validate_through(WizardStep::Narrative, self)?;

        let (Some(mission_type), Some(start_date), Some(end_date)) =
            (self.mission_type, self.start_date, self.end_date)
        else {
            return Err(StepIncomplete {
                step: WizardStep::Logistics,
                missing: validation::missing_fields(WizardStep::Logistics, self),
            });
        };

        Ok(MissionChanges {
            title: self.title.clone(),
            description: self.description.clone(),
            country: self.country.clone(),
            city: self.city.clone(),
            start_date,
            end_date,
            mission_type,
            image_url: validation::non_blank(&self.image_url).map(str::to_string),
            fundraising_url: validation::non_blank(&self.fundraising_url).map(str::to_string),
            status: self.status,
        })
    }
}

fn parse_date(field: MissionField, value: &str) -> Result<Option<Date>, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    Date::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| FieldError::InvalidValue {
            field,
            message: format!("expected a date formatted as YYYY-MM-DD, got '{value}'"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_mission;

    #[test]
    fn mission_type_and_status_db_names_roundtrip() {
        for t in [MissionType::Traveler, MissionType::Facilitator] {
            assert_eq!(MissionType::from_str_db(t.as_str()).unwrap(), t);
        }
        for s in [MissionStatus::Active, MissionStatus::Completed] {
            assert_eq!(MissionStatus::from_str_db(s.as_str()).unwrap(), s);
        }
        assert!(MissionType::from_str_db("voyageur").is_err());
        assert!(MissionStatus::from_str_db("archived").is_err());
    }

    #[test]
    fn field_names_parse() {
        for field in MissionField::ALL {
            assert_eq!(field.name().parse::<MissionField>().unwrap(), field);
        }
        assert_eq!(
            "mission_type".parse::<MissionField>(),
            Err(FieldError::UnknownField("mission_type".into()))
        );
    }

    #[test]
    fn set_field_parses_dates() {
        let mut draft = MissionDraft::default();
        draft.set_field(MissionField::StartDate, "2026-05-02").unwrap();
        assert_eq!(draft.start_date, Date::from_ymd_opt(2026, 5, 2));

        draft.set_field(MissionField::StartDate, "").unwrap();
        assert_eq!(draft.start_date, None);

        let err = draft.set_field(MissionField::EndDate, "02/05/2026").unwrap_err();
        assert!(matches!(err, FieldError::InvalidValue { field: MissionField::EndDate, .. }));
        assert_eq!(draft.end_date, None);
    }

    #[test]
    fn set_field_rejects_unknown_status() {
        let mut draft = MissionDraft::default();
        assert!(draft.set_field(MissionField::Status, "paused").is_err());
        assert_eq!(draft.status, MissionStatus::Active);
        draft.set_field(MissionField::Status, "completed").unwrap();
        assert_eq!(draft.status, MissionStatus::Completed);
    }

    #[test]
    fn draft_from_mission_roundtrips_editable_fields() {
        let mission = sample_mission();
        let draft = MissionDraft::from_mission(&mission);
        assert_eq!(draft.to_changes().unwrap(), mission.editable_fields());
    }

    #[test]
    fn empty_draft_has_no_payload() {
        let err = MissionDraft::default().to_changes().unwrap_err();
        assert_eq!(err.step, WizardStep::Profile);
    }

    #[test]
    fn blank_optional_urls_become_none() {
        let mut draft = MissionDraft::from_mission(&sample_mission());
        draft.fundraising_url = "   ".into();
        let changes = draft.to_changes().unwrap();
        assert_eq!(changes.fundraising_url, None);
        assert_eq!(changes.image_url, None);
    }
}
