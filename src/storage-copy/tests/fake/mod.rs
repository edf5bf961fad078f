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

//! An in-memory fake for the Cloud Storage rewrite RPC.
//!
//! The fake keeps only live objects and evaluates preconditions the same way
//! the service does: a generation match of `0` requires the object to be
//! absent, a metageneration match requires the object to exist.

use google_cloud_gax::error::rpc::{Code, Status};
use google_cloud_gax::options::RequestOptions;
use google_cloud_gax::response::Response;
use google_cloud_storage::model::{Object, RewriteObjectRequest, RewriteResponse};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Key = (String, String);

#[derive(Clone, Debug, Default)]
pub struct FakeStorage(Arc<Mutex<State>>);

#[derive(Debug, Default)]
struct State {
    objects: HashMap<Key, Object>,
    last_generation: i64,
    rewrite_calls: usize,
}

impl FakeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or replaces) a live object with the given generation.
    pub fn insert(&self, bucket_id: &str, name: &str, generation: i64) -> Object {
        let mut state = self.0.lock().expect("fake storage mutex is never poisoned");
        let object = Object::new()
            .set_bucket(format!("projects/_/buckets/{bucket_id}"))
            .set_name(name)
            .set_generation(generation)
            .set_metageneration(1)
            .set_size(1024)
            .set_content_type("application/octet-stream");
        state.last_generation = state.last_generation.max(generation);
        state
            .objects
            .insert(key(&object.bucket, name), object.clone());
        object
    }

    /// Bumps the metageneration, as a metadata update would.
    pub fn touch(&self, bucket_id: &str, name: &str) -> Option<Object> {
        let mut state = self.0.lock().expect("fake storage mutex is never poisoned");
        let object = state
            .objects
            .get_mut(&key(&format!("projects/_/buckets/{bucket_id}"), name))?;
        object.metageneration += 1;
        Some(object.clone())
    }

    pub fn get(&self, bucket_id: &str, name: &str) -> Option<Object> {
        let state = self.0.lock().expect("fake storage mutex is never poisoned");
        state
            .objects
            .get(&key(&format!("projects/_/buckets/{bucket_id}"), name))
            .cloned()
    }

    pub fn rewrite_calls(&self) -> usize {
        self.0
            .lock()
            .expect("fake storage mutex is never poisoned")
            .rewrite_calls
    }
}

impl google_cloud_storage::stub::StorageControl for FakeStorage {
    async fn rewrite_object(
        &self,
        req: RewriteObjectRequest,
        _options: RequestOptions,
    ) -> google_cloud_storage::Result<Response<RewriteResponse>> {
        let mut state = self.0.lock().expect("fake storage mutex is never poisoned");
        state.rewrite_calls += 1;

        let source = state
            .objects
            .get(&key(&req.source_bucket, &req.source_object))
            .filter(|o| req.source_generation == 0 || o.generation == req.source_generation)
            .cloned()
            .ok_or_else(|| error(Code::NotFound, "source object not found"))?;
        if req
            .if_source_generation_match
            .is_some_and(|g| g != source.generation)
        {
            return Err(precondition_failed());
        }
        if req
            .if_source_metageneration_match
            .is_some_and(|m| m != source.metageneration)
        {
            return Err(precondition_failed());
        }

        let dest_key = key(&req.destination_bucket, &req.destination_name);
        let existing = state.objects.get(&dest_key);
        if let Some(g) = req.if_generation_match {
            let holds = match existing {
                None => g == 0,
                Some(o) => o.generation == g,
            };
            if !holds {
                return Err(precondition_failed());
            }
        }
        if let Some(m) = req.if_metageneration_match {
            if !existing.is_some_and(|o| o.metageneration == m) {
                return Err(precondition_failed());
            }
        }

        state.last_generation += 1;
        let overrides = req.destination.unwrap_or_default();
        let mut object = source
            .set_bucket(req.destination_bucket)
            .set_name(req.destination_name)
            .set_generation(state.last_generation)
            .set_metageneration(1);
        if !overrides.content_type.is_empty() {
            object.content_type = overrides.content_type;
        }
        if !overrides.cache_control.is_empty() {
            object.cache_control = overrides.cache_control;
        }
        object.metadata.extend(overrides.metadata);
        state.objects.insert(dest_key, object.clone());

        Ok(Response::from(
            RewriteResponse::new()
                .set_done(true)
                .set_total_bytes_rewritten(object.size)
                .set_object_size(object.size)
                .set_resource(object),
        ))
    }
}

fn key(bucket: &str, name: &str) -> Key {
    (bucket.to_string(), name.to_string())
}

fn error(code: Code, message: &str) -> google_cloud_storage::Error {
    google_cloud_storage::Error::service(Status::default().set_code(code).set_message(message))
}

fn precondition_failed() -> google_cloud_storage::Error {
    error(
        Code::FailedPrecondition,
        "At least one of the pre-conditions you specified did not hold.",
    )
}
