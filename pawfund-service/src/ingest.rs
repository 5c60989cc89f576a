/// Asynchronous file ingestion
///
/// This module turns user-selected binary files (photos, veterinary
/// certificates) into embedded base64 data URIs suitable for storage
/// inside the JSON documents.
///
/// # Barrier semantics
///
/// A profile save may carry several files. Each file is read
/// independently; the save suspends on an all-of barrier until every
/// pending read has resolved, so a partially ingested set of files can
/// never reach the store. Any single failure (unreadable file, size cap,
/// timeout) rejects the whole batch.
///
/// Each read is bounded by the configured timeout so a read that never
/// resolves cannot stall the save forever. There is no cancellation of
/// in-flight sibling reads; the batch simply reports the first error
/// once the barrier settles.
///
/// # Example
///
/// ```no_run
/// use pawfund_service::config::IngestConfig;
/// use pawfund_service::ingest::{read_all, FileUpload};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let ingest = IngestConfig {
///     read_timeout_secs: 30,
///     max_file_bytes: 10 * 1024 * 1024,
/// };
/// let uploads = vec![FileUpload::from_path("./rex-beach.jpg")];
/// let attachments = read_all(uploads, &ingest).await?;
/// assert!(attachments[0].data.starts_with("data:image/jpeg;base64,"));
/// # Ok(())
/// # }
/// ```

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use tokio::time::timeout;
use tracing::debug;

use crate::config::IngestConfig;
use crate::error::{ServiceError, ServiceResult};
use pawfund_shared::models::pet::Attachment;

/// A user-selected file awaiting ingestion
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Filename recorded alongside the embedded content
    pub filename: String,

    /// Location of the file on disk
    pub path: PathBuf,
}

impl FileUpload {
    /// Builds an upload from a path, taking the filename from its last component
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { filename, path }
    }
}

/// Encodes file content as a base64 data URI
///
/// The media type is guessed from the filename extension and falls back
/// to `application/octet-stream`.
pub fn encode_data_uri(filename: &str, bytes: &[u8]) -> String {
    let mime = mime_guess::from_path(filename).first_or_octet_stream();
    format!("data:{};base64,{}", mime.essence_str(), BASE64.encode(bytes))
}

/// Reads one upload into an embedded attachment
///
/// A timed-out read is reported immediately but not cancelled: the
/// underlying blocking read detaches and keeps running until it
/// resolves on its own (or the process exits). The caller only ever
/// sees the `FileReadTimeout` error.
///
/// # Errors
///
/// - `FileTooLarge` if the file exceeds the configured cap
/// - `FileReadTimeout` if the read does not resolve within the bound
/// - `FileRead` for any other I/O failure
pub async fn read_one(upload: &FileUpload, config: &IngestConfig) -> ServiceResult<Attachment> {
    let metadata =
        tokio::fs::metadata(&upload.path)
            .await
            .map_err(|source| ServiceError::FileRead {
                filename: upload.filename.clone(),
                source,
            })?;

    if metadata.len() > config.max_file_bytes {
        return Err(ServiceError::FileTooLarge {
            filename: upload.filename.clone(),
            limit: config.max_file_bytes,
        });
    }

    let bytes = timeout(config.read_timeout(), tokio::fs::read(&upload.path))
        .await
        .map_err(|_| ServiceError::FileReadTimeout {
            filename: upload.filename.clone(),
        })?
        .map_err(|source| ServiceError::FileRead {
            filename: upload.filename.clone(),
            source,
        })?;

    debug!(filename = %upload.filename, bytes = bytes.len(), "Ingested file");

    Ok(Attachment {
        filename: upload.filename.clone(),
        data: encode_data_uri(&upload.filename, &bytes),
    })
}

/// Reads a batch of uploads behind an all-of barrier
///
/// Reads run concurrently; the returned attachments preserve the order
/// of `uploads`. The first failure rejects the whole batch.
pub async fn read_all(
    uploads: Vec<FileUpload>,
    config: &IngestConfig,
) -> ServiceResult<Vec<Attachment>> {
    try_join_all(uploads.iter().map(|upload| read_one(upload, config))).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> IngestConfig {
        IngestConfig {
            read_timeout_secs: 5,
            max_file_bytes: 1024,
        }
    }

    fn write_upload(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> FileUpload {
        let path = dir.path().join(name);
        std::fs::write(&path, content).expect("write upload");
        FileUpload::from_path(path)
    }

    #[test]
    fn test_encode_data_uri_guesses_media_type() {
        let uri = encode_data_uri("rex.jpg", b"abc");
        assert!(uri.starts_with("data:image/jpeg;base64,"));

        let uri = encode_data_uri("certificate.pdf", b"abc");
        assert!(uri.starts_with("data:application/pdf;base64,"));

        let uri = encode_data_uri("no-extension", b"abc");
        assert!(uri.starts_with("data:application/octet-stream;base64,"));
    }

    #[test]
    fn test_filename_from_path() {
        let upload = FileUpload::from_path("/tmp/photos/rex.png");
        assert_eq!(upload.filename, "rex.png");
    }

    #[tokio::test]
    async fn test_read_one_embeds_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        let upload = write_upload(&dir, "rex.png", b"pixels");

        let attachment = read_one(&upload, &test_config()).await.expect("read");
        assert_eq!(attachment.filename, "rex.png");
        assert_eq!(
            attachment.data,
            format!("data:image/png;base64,{}", BASE64.encode(b"pixels"))
        );
    }

    #[tokio::test]
    async fn test_read_one_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let upload = FileUpload::from_path(dir.path().join("ghost.png"));

        let err = read_one(&upload, &test_config()).await.unwrap_err();
        assert!(matches!(err, ServiceError::FileRead { .. }));
    }

    #[tokio::test]
    async fn test_read_one_rejects_oversized_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let upload = write_upload(&dir, "huge.png", &[0u8; 2048]);

        let err = read_one(&upload, &test_config()).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::FileTooLarge { limit: 1024, .. }
        ));
    }

    #[tokio::test]
    async fn test_read_all_preserves_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let uploads = vec![
            write_upload(&dir, "a.png", b"first"),
            write_upload(&dir, "b.png", b"second"),
            write_upload(&dir, "c.png", b"third"),
        ];

        let attachments = read_all(uploads, &test_config()).await.expect("read all");
        let names: Vec<&str> = attachments.iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
    }

    #[tokio::test]
    async fn test_read_all_rejects_batch_on_single_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let uploads = vec![
            write_upload(&dir, "a.png", b"first"),
            FileUpload::from_path(dir.path().join("ghost.png")),
        ];

        let result = read_all(uploads, &test_config()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_read_all_of_empty_batch() {
        let attachments = read_all(Vec::new(), &test_config()).await.expect("read all");
        assert!(attachments.is_empty());
    }
}
