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

//! Errors returned by copy operations.

use crate::locator::ObjectLocator;
use google_cloud_gax::error::rpc::{Code, Status};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A specialized [Result][std::result::Result] for copy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for copy operations.
///
/// Each error falls in exactly one category, query it with the `is_*()`
/// functions. The underlying client library error, if any, is available via
/// [source()][std::error::Error::source].
///
/// # Example
/// ```no_run
/// # use storage_copy_object::{ClientConfig, CopyRequest, copy_file_with_options};
/// # async fn sample(config: &ClientConfig) {
/// let request = CopyRequest::new("bucket-1", "object", "bucket-2", "destination-object");
/// match copy_file_with_options(&mut std::io::stdout(), config, &request).await {
///     Ok(_) => {}
///     Err(e) if e.is_precondition_failed() => println!("destination already exists"),
///     Err(e) if e.is_deadline_exceeded() => println!("timeout, safe to try again"),
///     Err(e) => println!("copy failed: {e}"),
/// }
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// The storage client could not be created.
    ///
    /// This is typically a problem with the credentials or the endpoint
    /// configuration. No request was sent.
    pub fn is_client_init(&self) -> bool {
        matches!(self.0, ErrorKind::ClientInit(_))
    }

    /// The service rejected the copy because a precondition did not hold.
    ///
    /// Either the destination already exists (or changed), or the source
    /// changed since the caller last observed it. Neither bucket was modified.
    pub fn is_precondition_failed(&self) -> bool {
        matches!(self.0, ErrorKind::PreconditionFailed { .. })
    }

    /// The operation did not complete before its deadline.
    ///
    /// The service may or may not have committed the copy. Calling again with
    /// the same preconditions is safe, if the copy was committed the new call
    /// fails with a precondition error.
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self.0, ErrorKind::DeadlineExceeded { .. })
    }

    /// Any other error returned by the service or the network.
    pub fn is_transport(&self) -> bool {
        matches!(self.0, ErrorKind::Transport { .. })
    }

    /// The copy succeeded, but the confirmation could not be written.
    pub fn is_output(&self) -> bool {
        matches!(self.0, ErrorKind::Output { .. })
    }

    /// The status returned by the service, if any.
    pub fn status(&self) -> Option<&Status> {
        match &self.0 {
            ErrorKind::PreconditionFailed { error, .. } | ErrorKind::Transport { error, .. } => {
                error.status()
            }
            _ => None,
        }
    }

    pub(crate) fn client_init<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::ClientInit(source.into()))
    }

    pub(crate) fn deadline<T: Into<BoxError>>(
        from: &ObjectLocator,
        to: &ObjectLocator,
        source: T,
    ) -> Self {
        Self(ErrorKind::DeadlineExceeded {
            from: from.clone(),
            to: to.clone(),
            error: source.into(),
        })
    }

    pub(crate) fn output(from: &ObjectLocator, to: &ObjectLocator, error: std::io::Error) -> Self {
        Self(ErrorKind::Output {
            from: from.clone(),
            to: to.clone(),
            error,
        })
    }

    /// Classifies an error returned by the storage client.
    pub(crate) fn storage(
        from: &ObjectLocator,
        to: &ObjectLocator,
        error: google_cloud_storage::Error,
    ) -> Self {
        let (from, to) = (from.clone(), to.clone());
        if error.is_timeout() {
            return Self(ErrorKind::DeadlineExceeded {
                from,
                to,
                error: error.into(),
            });
        }
        match error.status().map(|s| s.code) {
            Some(Code::FailedPrecondition) => {
                return Self(ErrorKind::PreconditionFailed { from, to, error });
            }
            Some(Code::DeadlineExceeded) => {
                return Self(ErrorKind::DeadlineExceeded {
                    from,
                    to,
                    error: error.into(),
                });
            }
            _ => {}
        };
        // Some HTTP responses carry no status payload.
        if error.http_status_code() == Some(412) {
            return Self(ErrorKind::PreconditionFailed { from, to, error });
        }
        Self(ErrorKind::Transport { from, to, error })
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("cannot create the storage client: {0}")]
    ClientInit(#[source] BoxError),
    #[error("cannot copy {from} to {to}, a precondition failed: {error}")]
    PreconditionFailed {
        from: ObjectLocator,
        to: ObjectLocator,
        #[source]
        error: google_cloud_storage::Error,
    },
    #[error("cannot copy {from} to {to}, the deadline expired: {error}")]
    DeadlineExceeded {
        from: ObjectLocator,
        to: ObjectLocator,
        #[source]
        error: BoxError,
    },
    #[error("cannot copy {from} to {to}: {error}")]
    Transport {
        from: ObjectLocator,
        to: ObjectLocator,
        #[source]
        error: google_cloud_storage::Error,
    },
    #[error("copied {from} to {to}, but cannot write the confirmation: {error}")]
    Output {
        from: ObjectLocator,
        to: ObjectLocator,
        #[source]
        error: std::io::Error,
    },
}
