use super::VerificationStatus;

#[derive(Debug, Clone, Default)]
pub struct CreatePoliceOfficerDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub badge_number: Option<String>,
    pub rank: Option<String>,
    pub organization_id: Option<i32>,
    pub verification_status: Option<VerificationStatus>,
    pub estimated_dob: Option<String>,
}

/// Partial update of an officer.
///
/// Outer `None` leaves a field unchanged; `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdatePoliceOfficerDto {
    pub first_name: Option<Option<String>>,
    pub last_name: Option<Option<String>>,
    pub badge_number: Option<Option<String>>,
    pub rank: Option<Option<String>>,
    pub organization_id: Option<Option<i32>>,
    pub verification_status: Option<VerificationStatus>,
    pub estimated_dob: Option<Option<String>>,
}
