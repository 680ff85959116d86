//! URL construction against the selected environment's base URL.
//!
//! Nothing here performs I/O: every method returns a `String` the host
//! hands to its own HTTP client.

use log::trace;
use serde::Serialize;
use url::{form_urlencoded, Url};

use crate::environment::{ActiveEnvironment, EnvironmentRegistry};
use crate::error::{FlavorError, Result};
use crate::util::{build_url, encode_query};

/// Query parameter name used by [`EndpointBuilder::with_api_key`].
pub const API_KEY_PARAM: &str = "api_key";

/// Builds request URLs for one selected environment.
#[derive(Clone, PartialEq, Eq)]
pub struct EndpointBuilder {
    active: ActiveEnvironment,
    api_key: Option<String>,
}

impl std::fmt::Debug for EndpointBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointBuilder")
            .field("environment", &self.active.environment())
            .field("base_url", &self.active.base_url())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl EndpointBuilder {
    /// Builder for whatever `registry` currently has selected.
    ///
    /// Fails with [`FlavorError::Unconfigured`] if nothing is selected yet.
    pub fn new(registry: &EnvironmentRegistry) -> Result<Self> {
        Ok(Self::for_active(registry.active()?))
    }

    pub fn for_active(active: ActiveEnvironment) -> Self {
        Self {
            active,
            api_key: None,
        }
    }

    /// Attach the value sent as `api_key` by [`with_api_key`](Self::with_api_key).
    pub fn with_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn environment(&self) -> ActiveEnvironment {
        self.active
    }

    pub fn base_url(&self) -> &'static str {
        self.active.base_url()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /* ───────────────────────────── Paths ───────────────────────────── */

    /// `base_url` followed by `segments`, one `/` between each.
    ///
    /// An empty `segments` slice yields the base URL exactly.
    pub fn build_path<S: AsRef<str>>(&self, segments: &[S]) -> Result<String> {
        let url = build_url(self.base_url(), segments)?;
        trace!("built path {url}");
        Ok(url)
    }

    /// Like [`build_path`](Self::build_path) with `resource_id` as the last
    /// segment. Negative ids are rejected.
    pub fn build_resource_path<S: AsRef<str>>(
        &self,
        segments: &[S],
        resource_id: i64,
    ) -> Result<String> {
        if resource_id < 0 {
            return Err(FlavorError::invalid(format!(
                "resource id must be non-negative, got {resource_id}"
            )));
        }
        let mut all: Vec<&str> = segments.iter().map(|s| s.as_ref()).collect();
        let id = resource_id.to_string();
        all.push(&id);
        self.build_path(&all)
    }

    /* ───────────────────────────── Queries ──────────────────────────── */

    /// Merge `params` into the query string of `url`.
    ///
    /// A key already present keeps its position and takes the new value;
    /// duplicates of it are dropped. New keys are appended in iteration
    /// order. Applying the same `params` twice gives the same URL.
    pub fn with_query_params<I, K, V>(&self, url: &str, params: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        merge_query(url, params)
    }

    /// Serialize `query` with `serde_urlencoded` and merge it into `url`.
    /// `None` fields are left out.
    pub fn with_query<T: Serialize>(&self, url: &str, query: &T) -> Result<String> {
        let encoded = serde_urlencoded::to_string(query)?;
        merge_query(url, form_urlencoded::parse(encoded.as_bytes()))
    }

    /// Append `api_key=<key>`. Fails when the builder carries no key.
    pub fn with_api_key(&self, url: &str) -> Result<String> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| FlavorError::invalid("no API key configured"))?;
        self.with_query_params(url, [(API_KEY_PARAM, key)])
    }

    /// [`with_api_key`](Self::with_api_key) when a key is set, `url` unchanged otherwise.
    pub(crate) fn sign(&self, url: String) -> Result<String> {
        if self.has_api_key() {
            self.with_api_key(&url)
        } else {
            Ok(url)
        }
    }
}

fn merge_query<I, K, V>(url: &str, params: I) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut parsed = Url::parse(url)?;
    let mut merged: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();

    for (key, value) in params {
        let (key, value) = (key.as_ref(), value.as_ref());
        let mut found = false;
        merged.retain_mut(|(k, v)| {
            if k.as_str() != key {
                return true;
            }
            if found {
                return false;
            }
            found = true;
            *v = value.to_string();
            true
        });
        if !found {
            merged.push((key.to_string(), value.to_string()));
        }
    }

    if merged.is_empty() {
        parsed.set_query(None);
    } else {
        let query = encode_query(merged.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        parsed.set_query(Some(&query));
    }
    Ok(parsed.into())
}
