use crate::observatory::dataset::{AuditorRecord, RecordField};
use crate::observatory::dates::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The closed set of statuses the roster export uses. Matching is exact and
/// case-sensitive; anything else is treated as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditorStatus {
    InService,
    Appointed,
    Exonerated,
    Declined,
    FailedAdmission,
    Retired,
    PreRetirementLeave,
}

impl AuditorStatus {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::InService,
            Self::Appointed,
            Self::Exonerated,
            Self::Declined,
            Self::FailedAdmission,
            Self::Retired,
            Self::PreRetirementLeave,
        ]
    }

    pub fn classify(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|status| status.label() == raw)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::InService => "EM EXERCÍCIO",
            Self::Appointed => "NOMEADO",
            Self::Exonerated => "EXONERADO",
            Self::Declined => "DESISTENTE",
            Self::FailedAdmission => "INAPTO ADMISSIONAL",
            Self::Retired => "APOSENTADO",
            Self::PreRetirementLeave => "AFASTAMENTO PRELIMINAR À APOSENTADORIA",
        }
    }

    pub const fn category(self) -> Option<EventCategory> {
        match self {
            Self::Exonerated | Self::Declined => Some(EventCategory::Attrition),
            Self::Retired | Self::PreRetirementLeave => Some(EventCategory::Inactivity),
            Self::InService | Self::Appointed | Self::FailedAdmission => None,
        }
    }

    pub const fn is_attrition(self) -> bool {
        matches!(self.category(), Some(EventCategory::Attrition))
    }

    pub const fn is_inactivity(self) -> bool {
        matches!(self.category(), Some(EventCategory::Inactivity))
    }

    pub const fn is_relevant(self) -> bool {
        self.category().is_some()
    }

    /// Column holding the date the event took effect.
    pub const fn effective_date_field(self) -> Option<RecordField> {
        match self {
            Self::Exonerated => Some(RecordField::ExoneratedOn),
            Self::Declined => Some(RecordField::AppointmentVoidedOn),
            Self::Retired | Self::PreRetirementLeave => Some(RecordField::InactiveOn),
            Self::InService | Self::Appointed | Self::FailedAdmission => None,
        }
    }

    /// Column holding the date the act was published in the official gazette.
    pub const fn publication_date_field(self) -> Option<RecordField> {
        match self.category() {
            Some(EventCategory::Attrition) => Some(RecordField::ExonerationPublishedOn),
            Some(EventCategory::Inactivity) => Some(RecordField::InactivityPublishedOn),
            None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Attrition,
    Inactivity,
}

impl EventCategory {
    /// Column each category's monthly series is keyed on.
    pub const fn monthly_date_field(self) -> RecordField {
        match self {
            Self::Attrition => RecordField::ExoneratedOn,
            Self::Inactivity => RecordField::InactiveOn,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Attrition => "Evasões",
            Self::Inactivity => "Inatividade",
        }
    }
}

/// Status-driven view of a record. All date-field selection goes through
/// here so every aggregation reads the same columns.
pub trait Classified {
    fn classification(&self) -> Option<AuditorStatus>;
    fn category(&self) -> Option<EventCategory>;
    fn effective_date(&self) -> Option<&str>;
    fn publication_date(&self) -> Option<&str>;
}

impl Classified for AuditorRecord {
    fn classification(&self) -> Option<AuditorStatus> {
        self.status.as_deref().and_then(AuditorStatus::classify)
    }

    fn category(&self) -> Option<EventCategory> {
        self.classification().and_then(AuditorStatus::category)
    }

    fn effective_date(&self) -> Option<&str> {
        self.classification()
            .and_then(AuditorStatus::effective_date_field)
            .and_then(|field| self.field(field))
    }

    fn publication_date(&self) -> Option<&str> {
        self.classification()
            .and_then(AuditorStatus::publication_date_field)
            .and_then(|field| self.field(field))
    }
}

/// One drill-down line shown under a destination bucket or a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditDetail {
    pub kind: EventCategory,
    pub name: String,
    pub effective_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    pub status: String,
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl AuditDetail {
    /// `None` for records outside the attrition and inactivity categories.
    pub fn from_record(record: &AuditorRecord) -> Option<Self> {
        let kind = record.category()?;
        Some(Self {
            kind,
            name: record.name.clone(),
            effective_date: record.effective_date().map(str::to_string),
            publication_date: record.publication_date().map(str::to_string),
            status: record.status.clone().unwrap_or_default(),
            area: record.area.clone(),
            remark: record.remark.clone(),
        })
    }

    pub fn effective_on(&self) -> Option<NaiveDate> {
        parse_date(self.effective_date.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Chronology {
    NewestFirst,
    OldestFirst,
}

/// Undated entries lead, dated entries follow in the requested direction,
/// and names break any remaining tie.
pub(crate) fn compare_chronologically(
    (left_date, left_name): (Option<NaiveDate>, &str),
    (right_date, right_name): (Option<NaiveDate>, &str),
    chronology: Chronology,
) -> Ordering {
    let by_date = match (left_date, right_date) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => match chronology {
            Chronology::NewestFirst => right.cmp(&left),
            Chronology::OldestFirst => left.cmp(&right),
        },
    };
    by_date.then_with(|| left_name.cmp(right_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: &str) -> AuditorRecord {
        AuditorRecord {
            name: "Ana".to_string(),
            status: Some(status.to_string()),
            exonerated_on: Some("10/01/2024".to_string()),
            exoneration_published_on: Some("12/01/2024".to_string()),
            appointment_voided_on: Some("03/02/2024".to_string()),
            inactive_on: Some("01/03/2024".to_string()),
            inactivity_published_on: Some("05/03/2024".to_string()),
            ..AuditorRecord::default()
        }
    }

    #[test]
    fn classify_is_exact_and_case_sensitive() {
        assert_eq!(
            AuditorStatus::classify("EXONERADO"),
            Some(AuditorStatus::Exonerated)
        );
        assert_eq!(
            AuditorStatus::classify("AFASTAMENTO PRELIMINAR À APOSENTADORIA"),
            Some(AuditorStatus::PreRetirementLeave)
        );
        assert_eq!(AuditorStatus::classify("exonerado"), None);
        assert_eq!(AuditorStatus::classify("DEMITIDO"), None);
    }

    #[test]
    fn predicates_partition_the_statuses() {
        let attrition: Vec<_> = AuditorStatus::ordered()
            .into_iter()
            .filter(|status| status.is_attrition())
            .collect();
        let inactivity: Vec<_> = AuditorStatus::ordered()
            .into_iter()
            .filter(|status| status.is_inactivity())
            .collect();
        assert_eq!(
            attrition,
            vec![AuditorStatus::Exonerated, AuditorStatus::Declined]
        );
        assert_eq!(
            inactivity,
            vec![AuditorStatus::Retired, AuditorStatus::PreRetirementLeave]
        );
        assert!(!AuditorStatus::FailedAdmission.is_relevant());
        assert!(!AuditorStatus::InService.is_relevant());
    }

    #[test]
    fn effective_and_publication_dates_follow_status() {
        assert_eq!(record("EXONERADO").effective_date(), Some("10/01/2024"));
        assert_eq!(record("DESISTENTE").effective_date(), Some("03/02/2024"));
        assert_eq!(record("APOSENTADO").effective_date(), Some("01/03/2024"));
        assert_eq!(record("DESISTENTE").publication_date(), Some("12/01/2024"));
        assert_eq!(
            record("AFASTAMENTO PRELIMINAR À APOSENTADORIA").publication_date(),
            Some("05/03/2024")
        );
        assert_eq!(record("NOMEADO").effective_date(), None);
        assert_eq!(record("???").publication_date(), None);
    }

    #[test]
    fn details_exist_only_for_relevant_records() {
        let detail = AuditDetail::from_record(&record("APOSENTADO")).expect("inactivity detail");
        assert_eq!(detail.kind, EventCategory::Inactivity);
        assert_eq!(detail.effective_date.as_deref(), Some("01/03/2024"));
        assert!(AuditDetail::from_record(&record("EM EXERCÍCIO")).is_none());
    }

    #[test]
    fn chronological_comparison_puts_undated_first() {
        let early = NaiveDate::from_ymd_opt(2024, 1, 1);
        let late = NaiveDate::from_ymd_opt(2024, 6, 1);
        assert_eq!(
            compare_chronologically((None, "Zé"), (early, "Ana"), Chronology::NewestFirst),
            Ordering::Less
        );
        assert_eq!(
            compare_chronologically((late, "Ana"), (early, "Bia"), Chronology::NewestFirst),
            Ordering::Less
        );
        assert_eq!(
            compare_chronologically((late, "Ana"), (early, "Bia"), Chronology::OldestFirst),
            Ordering::Greater
        );
        assert_eq!(
            compare_chronologically((early, "Ana"), (early, "Bia"), Chronology::OldestFirst),
            Ordering::Less
        );
    }
}
