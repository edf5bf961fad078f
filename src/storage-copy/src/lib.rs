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

//! Copy Google Cloud Storage objects between buckets.
//!
//! This crate performs a single server-side copy of an object, guarded by
//! generation and metageneration preconditions that Cloud Storage evaluates
//! atomically. By default the copy only succeeds if the destination object
//! does not exist, which makes the operation safe to call again after a
//! failure or a timeout.
//!
//! # Example
//!
//! ```no_run
//! # async fn sample() -> anyhow::Result<()> {
//! use google_cloud_auth::credentials::Builder as CredentialsBuilder;
//! use storage_copy_object::{ClientConfig, CopyPreconditions, CopyRequest};
//!
//! let config = ClientConfig::new(CredentialsBuilder::default().build()?);
//! let request = CopyRequest::new("bucket-1", "object", "bucket-2", "destination-object")
//!     .with_preconditions(CopyPreconditions::new().set_if_source_generation_match(1));
//! let object =
//!     storage_copy_object::copy_file_with_options(&mut std::io::stdout(), &config, &request)
//!         .await?;
//! println!("new generation is {}", object.generation);
//! # Ok(()) }
//! ```

pub mod config;
pub mod copy;
pub mod error;
pub mod locator;
pub mod metadata;
pub mod preconditions;

pub use config::ClientConfig;
pub use copy::{CopyRequest, DEFAULT_DEADLINE, ObjectCopier, copy_file_with_options};
pub use error::{Error, Result};
pub use locator::ObjectLocator;
pub use metadata::DestinationMetadata;
pub use preconditions::{CopyPreconditions, DestinationPrecondition};
