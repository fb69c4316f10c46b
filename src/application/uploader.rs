// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Uploader
//!
//! Pushes extract files to the object store one at a time. A failed upload is
//! logged and reported but never stops the files after it.

use crate::domain::entities::{ExtractFile, UploadOutcome, UploadRequest};
use crate::ports::object_store_port::ObjectStore;
use log::{error, info};
use std::path::Path;

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `<prefix><basename>`, e.g. `s3_ADDRESS_output.csv`.
pub fn object_key_for(path: &Path, prefix: &str) -> String {
    format!("{}{}", prefix, base_name(path))
}

/// Uploads one file. With no `object_key` the file's base name is used.
///
/// Returns `false` on any store error; the error itself is only logged.
pub fn upload_file(
    store: &dyn ObjectStore,
    path: &Path,
    bucket: &str,
    object_key: Option<&str>,
) -> bool {
    let request = UploadRequest {
        local_path: path.to_path_buf(),
        bucket: bucket.to_string(),
        object_key: object_key
            .map(str::to_string)
            .unwrap_or_else(|| base_name(path)),
    };
    match store.put_file(&request) {
        Ok(()) => true,
        Err(e) => {
            error!("{}", e);
            false
        }
    }
}

/// Attempts every file exactly once, in order.
pub fn upload_files(
    store: &dyn ObjectStore,
    files: &[ExtractFile],
    bucket: &str,
    key_prefix: &str,
) -> Vec<UploadOutcome> {
    files
        .iter()
        .map(|file| {
            let object_key = object_key_for(&file.path, key_prefix);
            let success = upload_file(store, &file.path, bucket, Some(&object_key));
            if success {
                info!(
                    "CSV file uploaded to S3 bucket: {} with object key: {}",
                    bucket, object_key
                );
            }
            UploadOutcome {
                object_key,
                success,
            }
        })
        .collect()
}
