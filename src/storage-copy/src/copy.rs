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

//! Server-side copies guarded by preconditions.
//!
//! Cloud Storage implements copies with the `RewriteObject` RPC. Small copies
//! and copies within the same location and storage class complete in a single
//! call. Larger copies return a rewrite token, and the client continues the
//! same copy until the service reports it is done.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::locator::ObjectLocator;
use crate::metadata::DestinationMetadata;
use crate::preconditions::CopyPreconditions;
use google_cloud_gax::options::RequestOptionsBuilder;
use google_cloud_gax::retry_policy::RetryPolicyExt;
use google_cloud_storage::builder::storage_control::RewriteObject;
use google_cloud_storage::client::StorageControl;
use google_cloud_storage::model::Object;
use google_cloud_storage::retry_policy::RetryableErrors;
use std::io::Write;
use std::time::Duration;
use tokio::time::Instant;

/// The default bound for a complete copy operation.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(10);

/// Describes a copy: what to copy, where, and under which conditions.
///
/// # Example
/// ```
/// # use storage_copy_object::{CopyPreconditions, CopyRequest, DestinationMetadata};
/// let request = CopyRequest::new("bucket-1", "object", "bucket-2", "destination-object")
///     .with_preconditions(CopyPreconditions::new().set_if_source_generation_match(1))
///     .with_metadata(DestinationMetadata::new().set_content_type("text/csv"));
/// assert_eq!(request.source().object(), "object");
/// assert_eq!(request.destination().bucket_id(), "bucket-2");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyRequest {
    source: ObjectLocator,
    destination: ObjectLocator,
    source_generation: Option<i64>,
    preconditions: CopyPreconditions,
    metadata: DestinationMetadata,
}

impl CopyRequest {
    /// Creates a request to copy `src_bucket/src_object` to `dst_bucket/dst_object`.
    ///
    /// The request uses the default preconditions, that is, the copy only
    /// succeeds if the destination does not exist.
    pub fn new<A, B, C, D>(src_bucket: A, src_object: B, dst_bucket: C, dst_object: D) -> Self
    where
        A: Into<String>,
        B: Into<String>,
        C: Into<String>,
        D: Into<String>,
    {
        Self::from_locators(
            ObjectLocator::new(src_bucket, src_object),
            ObjectLocator::new(dst_bucket, dst_object),
        )
    }

    pub fn from_locators(source: ObjectLocator, destination: ObjectLocator) -> Self {
        Self {
            source,
            destination,
            source_generation: None,
            preconditions: CopyPreconditions::default(),
            metadata: DestinationMetadata::default(),
        }
    }

    pub fn with_preconditions(mut self, v: CopyPreconditions) -> Self {
        self.preconditions = v;
        self
    }

    pub fn with_metadata(mut self, v: DestinationMetadata) -> Self {
        self.metadata = v;
        self
    }

    /// Copies a specific generation of the source, instead of the live object.
    ///
    /// Use this to restore a noncurrent (archived) version of an object.
    pub fn with_source_generation(mut self, v: i64) -> Self {
        self.source_generation = Some(v);
        self
    }

    pub fn source(&self) -> &ObjectLocator {
        &self.source
    }

    pub fn destination(&self) -> &ObjectLocator {
        &self.destination
    }

    pub fn source_generation(&self) -> Option<i64> {
        self.source_generation
    }

    pub fn preconditions(&self) -> &CopyPreconditions {
        &self.preconditions
    }

    pub fn metadata(&self) -> &DestinationMetadata {
        &self.metadata
    }

    fn builder(&self, client: &StorageControl) -> RewriteObject {
        let mut builder = client
            .rewrite_object()
            .set_source_bucket(self.source.bucket_name())
            .set_source_object(self.source.object())
            .set_destination_bucket(self.destination.bucket_name())
            .set_destination_name(self.destination.object())
            .set_destination(self.metadata.to_object())
            // Failures are reported to the caller, never retried.
            .with_retry_policy(RetryableErrors.with_attempt_limit(1));
        if let Some(generation) = self.source_generation {
            builder = builder.set_source_generation(generation);
        }
        self.preconditions.apply(builder)
    }

    fn report<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(
            writer,
            "Blob {} in bucket {} copied to blob {} in bucket {}",
            self.source.object(),
            self.source.bucket_id(),
            self.destination.object(),
            self.destination.bucket_id()
        )
        .map_err(|e| Error::output(&self.source, &self.destination, e))
    }
}

/// Copies objects using an existing client.
///
/// Each call to [copy][ObjectCopier::copy] is bounded by the copier deadline.
///
/// # Example
/// ```no_run
/// # use storage_copy_object::{CopyRequest, ObjectCopier};
/// # use google_cloud_storage::client::StorageControl;
/// # async fn sample(client: StorageControl) -> anyhow::Result<()> {
/// let copier = ObjectCopier::new(client);
/// let request = CopyRequest::new("bucket-1", "object", "bucket-2", "destination-object");
/// let object = copier.copy_and_report(&mut std::io::stdout(), &request).await?;
/// println!("{object:?}");
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct ObjectCopier {
    client: StorageControl,
    deadline: Duration,
}

impl ObjectCopier {
    pub fn new(client: StorageControl) -> Self {
        Self {
            client,
            deadline: DEFAULT_DEADLINE,
        }
    }

    pub fn with_deadline(mut self, v: Duration) -> Self {
        self.deadline = v;
        self
    }

    /// Copies the object and returns the new destination object.
    pub async fn copy(&self, request: &CopyRequest) -> Result<Object> {
        self.copy_until(Instant::now() + self.deadline, request).await
    }

    /// Copies the object and writes a confirmation line to `writer`.
    ///
    /// Nothing is written if the copy fails.
    pub async fn copy_and_report<W: Write>(
        &self,
        writer: &mut W,
        request: &CopyRequest,
    ) -> Result<Object> {
        let object = self.copy(request).await?;
        request.report(writer)?;
        Ok(object)
    }

    async fn copy_until(&self, deadline: Instant, request: &CopyRequest) -> Result<Object> {
        match tokio::time::timeout_at(deadline, rewrite(&self.client, request)).await {
            Ok(result) => result,
            Err(elapsed) => Err(Error::deadline(&request.source, &request.destination, elapsed)),
        }
    }
}

/// Copies an object and reports the outcome to `writer`.
///
/// Creates a client from `config`, issues the copy, and writes a single
/// confirmation line on success:
///
/// ```text
/// Blob <src-object> in bucket <src-bucket> copied to blob <dst-object> in bucket <dst-bucket>
/// ```
///
/// Creating the client and the copy itself share one deadline,
/// [ClientConfig::deadline]. The client is released before this function
/// returns, on every path.
pub async fn copy_file_with_options<W: Write>(
    writer: &mut W,
    config: &ClientConfig,
    request: &CopyRequest,
) -> Result<Object> {
    let deadline = Instant::now() + config.deadline();
    let client = match tokio::time::timeout_at(deadline, config.connect()).await {
        Ok(client) => client?,
        Err(elapsed) => {
            return Err(Error::deadline(&request.source, &request.destination, elapsed));
        }
    };
    let object = ObjectCopier::new(client).copy_until(deadline, request).await?;
    request.report(writer)?;
    Ok(object)
}

#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(source = %request.source, destination = %request.destination)
)]
async fn rewrite(client: &StorageControl, request: &CopyRequest) -> Result<Object> {
    let mut builder = request.builder(client);
    loop {
        let response = builder
            .clone()
            .send()
            .await
            .map_err(|e| Error::storage(&request.source, &request.destination, e))?;
        if response.done {
            let object = response.resource.ok_or_else(|| {
                Error::storage(
                    &request.source,
                    &request.destination,
                    google_cloud_storage::Error::deser("a completed rewrite must include an object"),
                )
            })?;
            tracing::info!(
                generation = object.generation,
                "copied {} to {}",
                request.source,
                request.destination
            );
            return Ok(object);
        }
        tracing::debug!(
            total_bytes_rewritten = response.total_bytes_rewritten,
            object_size = response.object_size,
            "rewrite in progress"
        );
        builder = builder.set_rewrite_token(response.rewrite_token);
    }
}
