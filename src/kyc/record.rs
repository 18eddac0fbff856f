//! # KYC Records
//!
//! The single persisted entity and the labels it carries.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Verification status label.
///
/// The known labels are enumerated; anything else is kept verbatim so the
/// label stays an open string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KycStatus {
    NotSubmitted,
    Pending,
    Approved,
    Rejected,
    Other(String),
}

impl KycStatus {
    pub fn as_str(&self) -> &str {
        match self {
            KycStatus::NotSubmitted => "NOT_SUBMITTED",
            KycStatus::Pending => "PENDING",
            KycStatus::Approved => "APPROVED",
            KycStatus::Rejected => "REJECTED",
            KycStatus::Other(label) => label,
        }
    }
}

impl From<&str> for KycStatus {
    fn from(label: &str) -> Self {
        match label {
            "NOT_SUBMITTED" => KycStatus::NotSubmitted,
            "PENDING" => KycStatus::Pending,
            "APPROVED" => KycStatus::Approved,
            "REJECTED" => KycStatus::Rejected,
            other => KycStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for KycStatus {
    fn from(label: String) -> Self {
        match KycStatus::from(label.as_str()) {
            KycStatus::Other(_) => KycStatus::Other(label),
            known => known,
        }
    }
}

impl From<KycStatus> for String {
    fn from(status: KycStatus) -> Self {
        match status {
            KycStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row per user address.
///
/// `updated_at` is only absent on the synthetic record returned for an
/// address that has never submitted anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycRecord {
    pub user_address: String,
    pub status: KycStatus,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "timestamp::deserialize_option"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl KycRecord {
    pub fn new(
        user_address: impl Into<String>,
        status: KycStatus,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_address: user_address.into(),
            status,
            updated_at: Some(updated_at),
        }
    }

    /// Placeholder for an address with no stored record
    pub fn not_submitted(user_address: impl Into<String>) -> Self {
        Self {
            user_address: user_address.into(),
            status: KycStatus::NotSubmitted,
            updated_at: None,
        }
    }
}

/// Body of a status submission.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusSubmission {
    pub user_address: String,
    pub status: String,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Status counts over all stored records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KycStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl KycStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a KycRecord>) -> Self {
        let mut stats = KycStats::default();
        for record in records {
            stats.total += 1;
            match record.status {
                KycStatus::Pending => stats.pending += 1,
                KycStatus::Approved => stats.approved += 1,
                KycStatus::Rejected => stats.rejected += 1,
                _ => {}
            }
        }
        stats
    }
}
