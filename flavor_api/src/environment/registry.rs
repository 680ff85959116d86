use std::env;

use log::{debug, warn};

use super::environment::{Environment, EnvironmentSettings};
use crate::error::{FlavorError, Result};

/// Process variable consulted by [`EnvironmentRegistry::from_env`].
pub const ENV_VAR: &str = "APP_ENV";

/// Holds the environment the host selected at startup.
///
/// Constructed unset; every settings accessor fails with
/// [`FlavorError::Unconfigured`] until [`select`](Self::select) is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentRegistry {
    current: Option<Environment>,
}

impl EnvironmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_environment(env: Environment) -> Self {
        let mut registry = Self::new();
        registry.select(env);
        registry
    }

    /// Build a registry from `APP_ENV`. An absent variable leaves it unset.
    pub fn from_env() -> Result<Self> {
        Self::from_env_var(ENV_VAR)
    }

    pub fn from_env_var(name: &str) -> Result<Self> {
        match env::var(name) {
            Ok(raw) => Ok(Self::with_environment(raw.parse()?)),
            Err(env::VarError::NotPresent) => Ok(Self::new()),
            Err(env::VarError::NotUnicode(raw)) => Err(FlavorError::invalid(format!(
                "`{name}` is not valid UTF-8: {raw:?}"
            ))),
        }
    }

    /// Select `env`. Re-selecting overwrites the previous choice.
    pub fn select(&mut self, env: Environment) {
        match self.current.replace(env) {
            Some(previous) if previous != env => {
                warn!("environment re-selected: {previous} -> {env}");
            }
            Some(_) => debug!("environment {env} selected again"),
            None => debug!("environment selected: {env} ({})", env.settings().base_url),
        }
    }

    /// Typed view of the selection whose accessors cannot fail.
    pub fn active(&self) -> Result<ActiveEnvironment> {
        self.current
            .map(ActiveEnvironment)
            .ok_or(FlavorError::Unconfigured)
    }

    pub fn current_environment(&self) -> Result<Environment> {
        self.current.ok_or(FlavorError::Unconfigured)
    }

    pub fn settings(&self) -> Result<&'static EnvironmentSettings> {
        self.current_environment().map(Environment::settings)
    }

    pub fn base_url(&self) -> Result<&'static str> {
        Ok(self.settings()?.base_url)
    }

    pub fn display_name(&self) -> Result<&'static str> {
        Ok(self.settings()?.display_name)
    }

    pub fn is_logging_enabled(&self) -> Result<bool> {
        Ok(self.settings()?.logging_enabled)
    }

    pub fn is_debug_mode(&self) -> Result<bool> {
        Ok(self.settings()?.debug_mode)
    }

    /* ──────────── Predicates: `false` while nothing is selected ──────────── */

    pub fn is_development(&self) -> bool {
        self.current == Some(Environment::Development)
    }

    pub fn is_staging(&self) -> bool {
        self.current == Some(Environment::Staging)
    }

    pub fn is_production(&self) -> bool {
        self.current == Some(Environment::Production)
    }
}

/// An environment that is known to be selected.
///
/// Only obtainable through [`EnvironmentRegistry::active`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveEnvironment(Environment);

impl ActiveEnvironment {
    pub fn environment(self) -> Environment {
        self.0
    }

    pub fn settings(self) -> &'static EnvironmentSettings {
        self.0.settings()
    }

    pub fn base_url(self) -> &'static str {
        self.settings().base_url
    }

    pub fn display_name(self) -> &'static str {
        self.settings().display_name
    }

    pub fn is_logging_enabled(self) -> bool {
        self.settings().logging_enabled
    }

    pub fn is_debug_mode(self) -> bool {
        self.settings().debug_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn unset_registry_refuses_every_read() {
        let registry = EnvironmentRegistry::new();
        assert_eq!(registry.current_environment(), Err(FlavorError::Unconfigured));
        assert_eq!(registry.settings(), Err(FlavorError::Unconfigured));
        assert_eq!(registry.base_url(), Err(FlavorError::Unconfigured));
        assert_eq!(registry.display_name(), Err(FlavorError::Unconfigured));
        assert_eq!(registry.is_logging_enabled(), Err(FlavorError::Unconfigured));
        assert_eq!(registry.is_debug_mode(), Err(FlavorError::Unconfigured));
        assert_eq!(registry.active(), Err(FlavorError::Unconfigured));
    }

    #[test]
    fn unset_predicates_are_false() {
        let registry = EnvironmentRegistry::new();
        assert!(!registry.is_development());
        assert!(!registry.is_staging());
        assert!(!registry.is_production());
    }

    #[rstest]
    #[case(Environment::Development)]
    #[case(Environment::Staging)]
    #[case(Environment::Production)]
    fn select_exposes_table_values(#[case] env: Environment) {
        let mut registry = EnvironmentRegistry::new();
        registry.select(env);

        let expected = env.settings();
        assert_eq!(registry.current_environment(), Ok(env));
        assert_eq!(registry.base_url(), Ok(expected.base_url));
        assert_eq!(registry.display_name(), Ok(expected.display_name));
        assert_eq!(registry.is_logging_enabled(), Ok(expected.logging_enabled));
        assert_eq!(registry.is_debug_mode(), Ok(expected.debug_mode));

        assert_eq!(registry.is_development(), env == Environment::Development);
        assert_eq!(registry.is_staging(), env == Environment::Staging);
        assert_eq!(registry.is_production(), env == Environment::Production);
    }

    #[test]
    fn reselection_overwrites() {
        let mut registry = EnvironmentRegistry::with_environment(Environment::Development);
        registry.select(Environment::Production);
        assert_eq!(registry.current_environment(), Ok(Environment::Production));
        assert_eq!(registry.base_url(), Ok("https://api.example.com/api/"));
    }

    #[test]
    fn active_view_mirrors_registry() {
        let registry = EnvironmentRegistry::with_environment(Environment::Staging);
        let active = registry.active().unwrap();
        assert_eq!(active.environment(), Environment::Staging);
        assert_eq!(active.base_url(), registry.base_url().unwrap());
        assert_eq!(active.display_name(), "Staging");
        assert!(active.is_logging_enabled());
        assert!(!active.is_debug_mode());
    }

    #[test]
    fn from_env_var_reads_selection() {
        let name = "FLAVOR_API_TEST_REGISTRY_SET";
        env::set_var(name, "staging");
        let registry = EnvironmentRegistry::from_env_var(name).unwrap();
        env::remove_var(name);
        assert_eq!(registry.current_environment(), Ok(Environment::Staging));
    }

    #[test]
    fn from_env_var_missing_is_unset() {
        let registry = EnvironmentRegistry::from_env_var("FLAVOR_API_TEST_REGISTRY_MISSING").unwrap();
        assert_eq!(registry, EnvironmentRegistry::new());
    }

    #[test]
    fn from_env_var_rejects_garbage() {
        let name = "FLAVOR_API_TEST_REGISTRY_BAD";
        env::set_var(name, "sandbox");
        let result = EnvironmentRegistry::from_env_var(name);
        env::remove_var(name);
        assert!(matches!(result, Err(FlavorError::InvalidArgument(_))));
    }
}
