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

//! Copies a Cloud Storage object to another bucket.

const DESCRIPTION: &str = concat!(
    "Copies an object between Cloud Storage buckets with a single server-side",
    " copy. By default the copy only succeeds if the destination object does not",
    " exist, so the command is safe to run again after a failure. Additional",
    " generation and metageneration preconditions guard against concurrent",
    " changes to the source or destination objects."
);

use clap::Parser;
use google_cloud_auth::credentials::Builder as CredentialsBuilder;
use std::time::Duration;
use storage_copy_object::{
    ClientConfig, CopyPreconditions, CopyRequest, DestinationMetadata, DestinationPrecondition,
    copy_file_with_options,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = enable_tracing();

    let args = Args::parse();
    tracing::info!("{args:?}");

    let credentials = CredentialsBuilder::default().build()?;
    let config = args.config(credentials);
    let request = args.request();

    let object = copy_file_with_options(&mut std::io::stdout(), &config, &request).await?;
    tracing::info!("destination generation is {}", object.generation);
    Ok(())
}

fn enable_tracing() -> tracing::dispatcher::DefaultGuard {
    use tracing_subscriber::fmt::format::FmtSpan;
    let subscriber = tracing_subscriber::fmt()
        .with_level(true)
        .with_thread_ids(true)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_default(subscriber)
}

/// Copies a Cloud Storage object, guarded by preconditions.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = DESCRIPTION)]
struct Args {
    /// The bucket containing the source object.
    #[arg(long)]
    source_bucket: String,

    /// The name of the source object.
    #[arg(long)]
    source_object: String,

    /// The bucket receiving the copy.
    #[arg(long)]
    destination_bucket: String,

    /// The name of the destination object.
    #[arg(long)]
    destination_object: String,

    /// Copy this generation of the source object instead of the live version.
    #[arg(long)]
    source_generation: Option<i64>,

    /// Only copy if the source generation matches this value.
    #[arg(long)]
    if_source_generation_match: Option<i64>,

    /// Only copy if the source metageneration matches this value.
    #[arg(long)]
    if_source_metageneration_match: Option<i64>,

    /// Only overwrite the destination if its generation matches this value.
    ///
    /// Without this flag (or `--allow-overwrite`) the copy only succeeds if
    /// the destination object does not exist.
    #[arg(long, conflicts_with = "allow_overwrite")]
    if_destination_generation_match: Option<i64>,

    /// Only copy if the destination metageneration matches this value.
    ///
    /// The service rejects this condition if the destination does not exist.
    #[arg(long)]
    if_destination_metageneration_match: Option<i64>,

    /// Overwrite the destination unconditionally.
    #[arg(long, default_value_t = false)]
    allow_overwrite: bool,

    /// The content type of the destination object.
    #[arg(long, default_value = storage_copy_object::metadata::DEFAULT_CONTENT_TYPE)]
    content_type: String,

    /// The cache control directive of the destination object.
    #[arg(long, default_value = storage_copy_object::metadata::DEFAULT_CACHE_CONTROL)]
    cache_control: String,

    /// The deadline for the complete operation, for example `10s` or `1m`.
    #[arg(long, default_value = "10s", value_parser = humantime::parse_duration)]
    timeout: Duration,

    /// Override the Cloud Storage endpoint.
    #[arg(long)]
    endpoint: Option<String>,

    /// Enable the client library request tracing.
    #[arg(long, default_value_t = false)]
    tracing: bool,
}

impl Args {
    fn config(&self, credentials: google_cloud_auth::credentials::Credentials) -> ClientConfig {
        let mut config = ClientConfig::new(credentials).with_deadline(self.timeout);
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint);
        }
        if self.tracing {
            config = config.with_tracing();
        }
        config
    }

    fn request(&self) -> CopyRequest {
        let destination = match (self.allow_overwrite, self.if_destination_generation_match) {
            (true, _) => DestinationPrecondition::Any,
            (false, Some(g)) => DestinationPrecondition::GenerationMatch(g),
            (false, None) => DestinationPrecondition::DoesNotExist,
        };
        let preconditions = CopyPreconditions::new()
            .set_destination(destination)
            .set_or_clear_if_destination_metageneration_match(
                self.if_destination_metageneration_match,
            )
            .set_or_clear_if_source_generation_match(self.if_source_generation_match)
            .set_or_clear_if_source_metageneration_match(self.if_source_metageneration_match);
        let metadata = DestinationMetadata::new()
            .set_content_type(&self.content_type)
            .set_cache_control(&self.cache_control);
        let request = CopyRequest::new(
            &self.source_bucket,
            &self.source_object,
            &self.destination_bucket,
            &self.destination_object,
        )
        .with_preconditions(preconditions)
        .with_metadata(metadata);
        match self.source_generation {
            Some(g) => request.with_source_generation(g),
            None => request,
        }
    }
}
