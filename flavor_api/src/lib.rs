//! # Flavor API
//!
//! Environment "flavors" (development / staging / production) for a client
//! application, and helpers that build REST endpoint URLs against the
//! selected flavor's base URL. The library never performs a request; it
//! hands plain URL strings to whatever HTTP client the host uses.

pub mod api;
pub mod endpoint;
pub mod environment;
pub mod error;
pub mod util;

pub use api::movies::{ListOptions, MovieEndpoints, SearchOptions};
pub use endpoint::{segments, EndpointBuilder, API_KEY_PARAM};
pub use environment::{ActiveEnvironment, Environment, EnvironmentRegistry, EnvironmentSettings};
pub use error::{FlavorError, Result};
