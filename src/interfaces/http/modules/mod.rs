pub mod health;
pub mod organizations;
pub mod police_officers;
pub mod request_id;
pub mod users;
