// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Client configuration for copy operations.

use crate::copy::DEFAULT_DEADLINE;
use crate::error::{Error, Result};
use google_cloud_auth::credentials::Credentials;
use google_cloud_storage::client::StorageControl;
use std::time::Duration;

/// Configures the client used by [copy_file_with_options][crate::copy_file_with_options].
///
/// The credentials are always explicit. Applications that want Application
/// Default Credentials resolve them once, at the process boundary, and pass
/// them here.
///
/// # Example
/// ```
/// # use storage_copy_object::ClientConfig;
/// use google_cloud_auth::credentials::anonymous::Builder as Anonymous;
/// use std::time::Duration;
/// let config = ClientConfig::new(Anonymous::new().build())
///     .with_endpoint("https://storage.googleapis.com")
///     .with_deadline(Duration::from_secs(30));
/// assert_eq!(config.deadline(), Duration::from_secs(30));
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    credentials: Credentials,
    endpoint: Option<String>,
    deadline: Duration,
    tracing: bool,
}

impl ClientConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: None,
            deadline: DEFAULT_DEADLINE,
            tracing: false,
        }
    }

    /// Overrides the default Cloud Storage endpoint.
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.endpoint = Some(v.into());
        self
    }

    /// Bounds the complete operation, including creating the client.
    pub fn with_deadline(mut self, v: Duration) -> Self {
        self.deadline = v;
        self
    }

    /// Enables the client library request tracing.
    pub fn with_tracing(mut self) -> Self {
        self.tracing = true;
        self
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Creates a new [StorageControl] client.
    pub async fn connect(&self) -> Result<StorageControl> {
        let mut builder = StorageControl::builder().with_credentials(self.credentials.clone());
        if let Some(endpoint) = &self.endpoint {
            builder = builder.with_endpoint(endpoint);
        }
        if self.tracing {
            builder = builder.with_tracing();
        }
        builder.build().await.map_err(Error::client_init)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use google_cloud_auth::credentials::anonymous::Builder as Anonymous;

    #[test]
    fn defaults() {
        let config = ClientConfig::new(Anonymous::new().build());
        assert_eq!(config.deadline(), Duration::from_secs(10));
        assert_eq!(config.endpoint(), None);
        assert!(!config.tracing, "{config:?}");
    }

    #[test]
    fn builder() {
        let config = ClientConfig::new(Anonymous::new().build())
            .with_endpoint("http://localhost:8080")
            .with_deadline(Duration::from_millis(500))
            .with_tracing();
        assert_eq!(config.deadline(), Duration::from_millis(500));
        assert_eq!(config.endpoint(), Some("http://localhost:8080"));
        assert!(config.tracing, "{config:?}");
    }
}
