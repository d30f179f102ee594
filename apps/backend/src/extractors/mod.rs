pub mod validated_json;
pub mod verified_identity;

pub use validated_json::ValidatedJson;
