use chrono::{DateTime, Utc};

/// Geographic position as returned by the geocoder (decimal degrees, kept as text)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Organization {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (&self.latitude, &self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude: latitude.clone(),
                longitude: longitude.clone(),
            }),
            _ => None,
        }
    }
}
