//! Data transfer objects for the HTTP API.

mod request;
mod response;
mod validation;

pub use request::{AuthRequest, NewCityRequest};
pub use response::{MeResponse, ShareResponse};
pub use validation::{country_code, non_negative, not_empty_trimmed, JsonBody, ValidatedJson};
