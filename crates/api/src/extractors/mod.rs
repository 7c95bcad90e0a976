//! Request extractors that reject with the API error body.

mod params;
mod validated_json;

pub use params::{ApiPath, ApiQuery};
pub use validated_json::ValidatedJson;
