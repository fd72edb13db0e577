use super::Coordinates;

/// Input for creating an organization
#[derive(Debug, Clone, Default)]
pub struct CreateOrganizationDto {
    pub name: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
}

/// Partial update of an organization.
///
/// Outer `None` leaves a field unchanged; `Some(None)` or a blank string
/// clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateOrganizationDto {
    pub name: Option<String>,
    pub address: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub contact_number: Option<Option<String>>,
}

/// Fully resolved row to insert (blanks removed, address geocoded)
#[derive(Debug, Clone)]
pub struct NewOrganization {
    pub name: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub coordinates: Option<Coordinates>,
}

/// Column changes computed by the service and applied by the repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationChanges {
    pub name: Option<String>,
    pub address: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub contact_number: Option<Option<String>>,
    pub coordinates: Option<Option<Coordinates>>,
}

impl OrganizationChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.email.is_none()
            && self.contact_number.is_none()
            && self.coordinates.is_none()
    }
}
