use super::mapping::{field_for_header, RecordField};
use super::parser::RawRow;
use serde::Serialize;

/// One roster line with its columns resolved to canonical fields.
///
/// Blank cells are `None`. Columns the export carries beyond the known set
/// are kept in `extra`, in their original order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditorRecord {
    pub name: String,
    pub area: Option<String>,
    pub status: Option<String>,
    pub destination: Option<String>,
    pub appointed_on: Option<String>,
    pub exonerated_on: Option<String>,
    pub exoneration_published_on: Option<String>,
    pub appointment_voided_on: Option<String>,
    pub inactive_on: Option<String>,
    pub inactivity_published_on: Option<String>,
    pub remark: Option<String>,
    pub contest_rank: Option<String>,
    pub disability: Option<String>,
    pub registration: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<(String, String)>,
}

impl AuditorRecord {
    pub fn from_row(row: &RawRow) -> Self {
        let mut record = Self::default();
        for (header, value) in row.fields() {
            match field_for_header(header) {
                Some(field) => record.assign(field, value),
                None => record.extra.push((header.to_string(), value.to_string())),
            }
        }
        record
    }

    pub fn field(&self, field: RecordField) -> Option<&str> {
        match field {
            RecordField::Name => Some(self.name.as_str()).filter(|name| !name.is_empty()),
            RecordField::Status => self.status.as_deref(),
            RecordField::Area => self.area.as_deref(),
            RecordField::Destination => self.destination.as_deref(),
            RecordField::AppointedOn => self.appointed_on.as_deref(),
            RecordField::ExoneratedOn => self.exonerated_on.as_deref(),
            RecordField::ExonerationPublishedOn => self.exoneration_published_on.as_deref(),
            RecordField::AppointmentVoidedOn => self.appointment_voided_on.as_deref(),
            RecordField::InactiveOn => self.inactive_on.as_deref(),
            RecordField::InactivityPublishedOn => self.inactivity_published_on.as_deref(),
            RecordField::Remark => self.remark.as_deref(),
            RecordField::ContestRank => self.contest_rank.as_deref(),
            RecordField::Disability => self.disability.as_deref(),
            RecordField::Registration => self.registration.as_deref(),
        }
    }

    pub fn extra_field(&self, header: &str) -> Option<&str> {
        self.extra
            .iter()
            .rev()
            .find(|(name, _)| name == header)
            .map(|(_, value)| value.as_str())
    }

    /// When two spellings of a field are both present, the first non-empty
    /// cell wins.
    fn assign(&mut self, field: RecordField, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }

        let slot = match field {
            RecordField::Name => {
                if self.name.is_empty() {
                    self.name = value.to_string();
                }
                return;
            }
            RecordField::Status => &mut self.status,
            RecordField::Area => &mut self.area,
            RecordField::Destination => &mut self.destination,
            RecordField::AppointedOn => &mut self.appointed_on,
            RecordField::ExoneratedOn => &mut self.exonerated_on,
            RecordField::ExonerationPublishedOn => &mut self.exoneration_published_on,
            RecordField::AppointmentVoidedOn => &mut self.appointment_voided_on,
            RecordField::InactiveOn => &mut self.inactive_on,
            RecordField::InactivityPublishedOn => &mut self.inactivity_published_on,
            RecordField::Remark => &mut self.remark,
            RecordField::ContestRank => &mut self.contest_rank,
            RecordField::Disability => &mut self.disability,
            RecordField::Registration => &mut self.registration,
        };
        slot.get_or_insert_with(|| value.to_string());
    }
}
