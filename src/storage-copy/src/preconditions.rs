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

//! Preconditions for server-side copies.
//!
//! Cloud Storage evaluates these conditions atomically with the copy. If any
//! of them fails the service rejects the request with `FAILED_PRECONDITION`
//! (HTTP 412) and neither bucket changes.

use google_cloud_storage::builder::storage_control::RewriteObject;

/// The guard applied to the destination object's generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum DestinationPrecondition {
    /// Only create the destination, never overwrite it.
    ///
    /// Encoded as `ifGenerationMatch = 0`. Concurrent copies to the same
    /// destination cannot both succeed.
    #[default]
    DoesNotExist,
    /// Only overwrite the destination if its live generation matches.
    GenerationMatch(i64),
    /// No guard, the destination is overwritten unconditionally.
    Any,
}

impl DestinationPrecondition {
    /// The `ifGenerationMatch` value sent to the service, if any.
    pub fn if_generation_match(&self) -> Option<i64> {
        match self {
            Self::DoesNotExist => Some(0),
            Self::GenerationMatch(g) => Some(*g),
            Self::Any => None,
        }
    }
}

/// The full set of preconditions for a copy.
///
/// The default only requires the destination to be absent. All the other
/// values must come from the caller, typically from a previous read of the
/// object metadata.
///
/// # Example
/// ```
/// # use storage_copy_object::{CopyPreconditions, DestinationPrecondition};
/// let preconditions = CopyPreconditions::new()
///     .set_if_source_generation_match(1234)
///     .set_if_destination_metageneration_match(1);
/// assert_eq!(preconditions.destination, DestinationPrecondition::DoesNotExist);
/// assert_eq!(preconditions.if_source_generation_match, Some(1234));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct CopyPreconditions {
    /// The guard on the destination generation.
    pub destination: DestinationPrecondition,

    /// Requires the destination metageneration to match this value.
    ///
    /// Cloud Storage rejects this condition when the destination does not
    /// exist, so it is only useful together with
    /// [DestinationPrecondition::GenerationMatch] or
    /// [DestinationPrecondition::Any].
    pub if_destination_metageneration_match: Option<i64>,

    /// Requires the source generation to match this value.
    pub if_source_generation_match: Option<i64>,

    /// Requires the source metageneration to match this value.
    pub if_source_metageneration_match: Option<i64>,
}

impl CopyPreconditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the [destination][CopyPreconditions::destination] field.
    pub fn set_destination(mut self, v: DestinationPrecondition) -> Self {
        self.destination = v;
        self
    }

    /// Sets the [if_destination_metageneration_match][CopyPreconditions::if_destination_metageneration_match] field.
    pub fn set_if_destination_metageneration_match(mut self, v: i64) -> Self {
        self.if_destination_metageneration_match = Some(v);
        self
    }

    /// Sets or clears the [if_destination_metageneration_match][CopyPreconditions::if_destination_metageneration_match] field.
    pub fn set_or_clear_if_destination_metageneration_match(mut self, v: Option<i64>) -> Self {
        self.if_destination_metageneration_match = v;
        self
    }

    /// Sets the [if_source_generation_match][CopyPreconditions::if_source_generation_match] field.
    pub fn set_if_source_generation_match(mut self, v: i64) -> Self {
        self.if_source_generation_match = Some(v);
        self
    }

    /// Sets or clears the [if_source_generation_match][CopyPreconditions::if_source_generation_match] field.
    pub fn set_or_clear_if_source_generation_match(mut self, v: Option<i64>) -> Self {
        self.if_source_generation_match = v;
        self
    }

    /// Sets the [if_source_metageneration_match][CopyPreconditions::if_source_metageneration_match] field.
    pub fn set_if_source_metageneration_match(mut self, v: i64) -> Self {
        self.if_source_metageneration_match = Some(v);
        self
    }

    /// Sets or clears the [if_source_metageneration_match][CopyPreconditions::if_source_metageneration_match] field.
    pub fn set_or_clear_if_source_metageneration_match(mut self, v: Option<i64>) -> Self {
        self.if_source_metageneration_match = v;
        self
    }

    pub(crate) fn apply(&self, mut builder: RewriteObject) -> RewriteObject {
        if let Some(v) = self.destination.if_generation_match() {
            builder = builder.set_if_generation_match(v);
        }
        if let Some(v) = self.if_destination_metageneration_match {
            builder = builder.set_if_metageneration_match(v);
        }
        if let Some(v) = self.if_source_generation_match {
            builder = builder.set_if_source_generation_match(v);
        }
        if let Some(v) = self.if_source_metageneration_match {
            builder = builder.set_if_source_metageneration_match(v);
        }
        builder
    }
}
