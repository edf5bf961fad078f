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

//! Metadata applied to the destination object.

use google_cloud_storage::model::Object;
use std::collections::BTreeMap;

/// The default content type for copied objects.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// The default cache control directive for copied objects.
pub const DEFAULT_CACHE_CONTROL: &str = "public, max-age=3600";

/// Metadata for the destination object.
///
/// Cloud Storage copies the source metadata unless the request overrides it.
/// These values override the source content type and cache control, and are
/// merged with any custom metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct DestinationMetadata {
    /// The `Content-Type` of the destination object.
    pub content_type: String,
    /// The `Cache-Control` directive of the destination object.
    pub cache_control: String,
    /// Custom (user-defined) key/value metadata.
    pub custom: BTreeMap<String, String>,
}

impl Default for DestinationMetadata {
    fn default() -> Self {
        Self {
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            cache_control: DEFAULT_CACHE_CONTROL.to_string(),
            custom: BTreeMap::new(),
        }
    }
}

impl DestinationMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the [content_type][DestinationMetadata::content_type] field.
    pub fn set_content_type<T: Into<String>>(mut self, v: T) -> Self {
        self.content_type = v.into();
        self
    }

    /// Sets the [cache_control][DestinationMetadata::cache_control] field.
    pub fn set_cache_control<T: Into<String>>(mut self, v: T) -> Self {
        self.cache_control = v.into();
        self
    }

    /// Sets the [custom][DestinationMetadata::custom] field.
    pub fn set_custom<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.custom = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub(crate) fn to_object(&self) -> Object {
        Object::new()
            .set_content_type(&self.content_type)
            .set_cache_control(&self.cache_control)
            .set_metadata(self.custom.clone())
    }
}
