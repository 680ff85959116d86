mod builder;
pub mod segments;

pub use builder::{EndpointBuilder, API_KEY_PARAM};
