use super::domain::{
    compare_chronologically, AuditDetail, AuditorStatus, Chronology, Classified,
};
use crate::observatory::dataset::AuditorRecord;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const RETIRED_BUCKET: &str = "Aposentados";
pub const PRE_RETIREMENT_BUCKET: &str = "Afastados para aposentadoria";
pub const UNKNOWN_DESTINATION_BUCKET: &str = "Destino desconhecido";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationCount {
    pub bucket: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DestinationBreakdown {
    pub counts: Vec<DestinationCount>,
    pub details: BTreeMap<String, Vec<AuditDetail>>,
}

impl DestinationBreakdown {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|entry| entry.count).sum()
    }

    pub fn count_for(&self, bucket: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|entry| entry.bucket == bucket)
            .map(|entry| entry.count)
    }
}

/// Destination a relevant record is counted under.
///
/// The retirement buckets are reached only through their statuses. An
/// organisation whose name matches one of their labels stays an
/// organisation and is labelled apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DestinationBucket {
    PreRetirement,
    Retired,
    Unknown,
    Organisation(String),
}

impl DestinationBucket {
    pub fn label(&self) -> String {
        match self {
            Self::PreRetirement => PRE_RETIREMENT_BUCKET.to_string(),
            Self::Retired => RETIRED_BUCKET.to_string(),
            Self::Unknown => UNKNOWN_DESTINATION_BUCKET.to_string(),
            Self::Organisation(name) if is_reserved_label(name) => {
                format!("{name} {ORGANISATION_SUFFIX}")
            }
            Self::Organisation(name) => name.clone(),
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::PreRetirement => 0,
            Self::Retired => 1,
            Self::Unknown | Self::Organisation(_) => 2,
        }
    }
}

const ORGANISATION_SUFFIX: &str = "(órgão)";

fn is_reserved_label(name: &str) -> bool {
    name == RETIRED_BUCKET || name == PRE_RETIREMENT_BUCKET
}

/// Bucket a record is counted under, or `None` when its status is neither
/// attrition nor inactivity.
pub fn bucket_for(record: &AuditorRecord) -> Option<DestinationBucket> {
    match record.classification()? {
        AuditorStatus::Retired => Some(DestinationBucket::Retired),
        AuditorStatus::PreRetirementLeave => Some(DestinationBucket::PreRetirement),
        AuditorStatus::Exonerated | AuditorStatus::Declined => {
            let destination = record
                .destination
                .as_deref()
                .map(str::trim)
                .filter(|destination| !destination.is_empty());
            Some(match destination {
                None | Some(UNKNOWN_DESTINATION_BUCKET) => DestinationBucket::Unknown,
                Some(name) => DestinationBucket::Organisation(name.to_string()),
            })
        }
        AuditorStatus::InService | AuditorStatus::Appointed | AuditorStatus::FailedAdmission => {
            None
        }
    }
}

/// Groups relevant records by destination.
///
/// Reserved inactivity buckets lead; every other bucket follows by
/// descending count, keeping first-seen order on ties. Details within a
/// bucket run newest effective date first.
pub fn aggregate_destinations<'a, I>(records: I) -> DestinationBreakdown
where
    I: IntoIterator<Item = &'a AuditorRecord>,
{
    let mut grouped: Vec<(DestinationBucket, Vec<AuditDetail>)> = Vec::new();
    let mut positions: HashMap<DestinationBucket, usize> = HashMap::new();

    for record in records {
        let (Some(bucket), Some(detail)) = (bucket_for(record), AuditDetail::from_record(record))
        else {
            continue;
        };

        match positions.get(&bucket) {
            Some(&position) => grouped[position].1.push(detail),
            None => {
                positions.insert(bucket.clone(), grouped.len());
                grouped.push((bucket, vec![detail]));
            }
        }
    }

    grouped.sort_by(|(left, left_details), (right, right_details)| {
        left.rank()
            .cmp(&right.rank())
            .then_with(|| right_details.len().cmp(&left_details.len()))
    });

    let mut counts: Vec<DestinationCount> = Vec::with_capacity(grouped.len());
    let mut details: BTreeMap<String, Vec<AuditDetail>> = BTreeMap::new();
    for (bucket, mut entries) in grouped {
        entries.sort_by(|left, right| {
            compare_chronologically(
                (left.effective_on(), left.name.as_str()),
                (right.effective_on(), right.name.as_str()),
                Chronology::NewestFirst,
            )
        });
        let label = bucket.label();
        counts.push(DestinationCount {
            bucket: label.clone(),
            count: entries.len(),
        });
        details.insert(label, entries);
    }

    DestinationBreakdown { counts, details }
}
