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

//! Names an object in a Cloud Storage bucket.

const BUCKET_PREFIX: &str = "projects/_/buckets/";

/// A bucket and object name pair.
///
/// The bucket may be given as a bare bucket id (`my-bucket`) or as the full
/// resource name (`projects/_/buckets/my-bucket`). Requests always use the
/// full resource name, messages always use the bare id.
///
/// # Example
/// ```
/// # use storage_copy_object::ObjectLocator;
/// let locator = ObjectLocator::new("my-bucket", "path/to/object");
/// assert_eq!(locator.bucket_name(), "projects/_/buckets/my-bucket");
/// assert_eq!(locator.bucket_id(), "my-bucket");
/// assert_eq!(locator.to_string(), "gs://my-bucket/path/to/object");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ObjectLocator {
    bucket: String,
    object: String,
}

impl ObjectLocator {
    pub fn new<B, O>(bucket: B, object: O) -> Self
    where
        B: Into<String>,
        O: Into<String>,
    {
        Self {
            bucket: bucket.into(),
            object: object.into(),
        }
    }

    /// The bucket id, without the `projects/_/buckets/` prefix.
    pub fn bucket_id(&self) -> &str {
        self.bucket
            .strip_prefix(BUCKET_PREFIX)
            .unwrap_or(self.bucket.as_str())
    }

    /// The bucket resource name, as used in Cloud Storage requests.
    pub fn bucket_name(&self) -> String {
        format!("{BUCKET_PREFIX}{}", self.bucket_id())
    }

    pub fn object(&self) -> &str {
        &self.object
    }
}

impl std::fmt::Display for ObjectLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gs://{}/{}", self.bucket_id(), self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("bucket-1", "bucket-1"; "bare id")]
    #[test_case("projects/_/buckets/bucket-1", "bucket-1"; "resource name")]
    fn bucket_forms(input: &str, want: &str) {
        let locator = ObjectLocator::new(input, "object");
        assert_eq!(locator.bucket_id(), want);
        assert_eq!(locator.bucket_name(), format!("projects/_/buckets/{want}"));
        assert_eq!(locator.object(), "object");
    }

    #[test]
    fn display() {
        let locator = ObjectLocator::new("projects/_/buckets/b", "a/b/c.txt");
        assert_eq!(locator.to_string(), "gs://b/a/b/c.txt");
    }
}
