pub mod paginate;
pub mod shutdown;
pub mod types;
pub mod validations;

pub use paginate::*;
pub use shutdown::*;
pub use types::*;
pub use validations::*;
