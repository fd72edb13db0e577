use chrono::{DateTime, Utc};

/// How sure we are that the officer record is genuine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerificationStatus {
    Confirmed,
    Suspected,
    #[default]
    Unverified,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Confirmed => "confirmed",
            VerificationStatus::Suspected => "suspected",
            VerificationStatus::Unverified => "unverified",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" => Some(VerificationStatus::Confirmed),
            "suspected" => Some(VerificationStatus::Suspected),
            "unverified" => Some(VerificationStatus::Unverified),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoliceOfficer {
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub badge_number: Option<String>,
    pub rank: Option<String>,
    pub organization_id: Option<i32>,
    pub verification_status: VerificationStatus,
    pub estimated_dob: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PoliceOfficer {
    /// "First Last", whichever halves are known.
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// Officer joined with the name of its organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoliceOfficerDetail {
    pub officer: PoliceOfficer,
    pub organization_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        for status in [
            VerificationStatus::Confirmed,
            VerificationStatus::Suspected,
            VerificationStatus::Unverified,
        ] {
            assert_eq!(VerificationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(
            VerificationStatus::parse(" Confirmed "),
            Some(VerificationStatus::Confirmed)
        );
        assert_eq!(VerificationStatus::parse("maybe"), None);
    }

    #[test]
    fn default_status_is_unverified() {
        assert_eq!(VerificationStatus::default(), VerificationStatus::Unverified);
    }

    #[test]
    fn display_name_joins_known_parts() {
        let mut officer = PoliceOfficer {
            id: 1,
            first_name: Some("Jane".into()),
            last_name: Some("Smith".into()),
            badge_number: None,
            rank: None,
            organization_id: None,
            verification_status: VerificationStatus::Unverified,
            estimated_dob: None,
            created_at: Utc::now(),
        };
        assert_eq!(officer.display_name().as_deref(), Some("Jane Smith"));

        officer.first_name = None;
        assert_eq!(officer.display_name().as_deref(), Some("Smith"));

        officer.last_name = None;
        assert!(officer.display_name().is_none());
    }
}
