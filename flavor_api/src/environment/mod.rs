mod environment;
mod registry;

pub use environment::{Environment, EnvironmentSettings};
pub use registry::{ActiveEnvironment, EnvironmentRegistry, ENV_VAR};
