use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use axum::body::Bytes;
use futures::{pin_mut, Stream, StreamExt};
use tempfile::NamedTempFile;
use time::OffsetDateTime;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use crate::helpers::api_error::ApiError;

pub const PUBLIC_PREFIX: &str = "/uploads";

const MAX_NAME_ATTEMPTS: usize = 1000;

/// Local directory backing the `/uploads` static route.
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the upload directory if absent. Safe to race.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    /// Copies `source` into the upload directory under a time based name
    /// carrying the extension of `original_name`, returning its public path.
    pub async fn store_file(
        &self,
        source: &Path,
        original_name: &str,
    ) -> std::io::Result<String> {
        self.ensure_root().await?;

        let extension = extension_of(original_name);
        let stamp = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;

        let mut src = fs::File::open(source).await?;
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let file_name = if attempt == 0 {
                format!("{}.{}", stamp, extension)
            } else {
                format!("{}-{}.{}", stamp, attempt, extension)
            };
            let dest_path = self.root.join(&file_name);

            let mut dest = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&dest_path)
                .await
            {
                Ok(dest) => dest,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("Upload name {} taken, trying next", file_name);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let copied = match tokio::io::copy(&mut src, &mut dest).await {
                Ok(copied) => copied,
                Err(e) => {
                    drop(dest);
                    if let Err(remove_err) = fs::remove_file(&dest_path).await {
                        warn!("Failed to remove partial upload {} due to: {}", file_name, remove_err);
                    }
                    return Err(e);
                }
            };
            info!("Stored upload {} ({} bytes)", file_name, copied);
            return Ok(format!("{}/{}", PUBLIC_PREFIX, file_name));
        }

        Err(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("no free upload name for timestamp {}", stamp),
        ))
    }
}

/// Drains a byte stream into a temporary file that is removed on drop.
/// Stream failures go through `on_error`, file failures become upload errors.
pub async fn spool_stream<S, E, F>(
    stream: S,
    on_error: F,
) -> Result<NamedTempFile, ApiError>
where
    S: Stream<Item = Result<Bytes, E>>,
    F: Fn(E) -> ApiError,
{
    let temp = tokio::task::spawn_blocking(NamedTempFile::new)
        .await
        .map_err(|e| std::io::Error::new(ErrorKind::Other, e))??;
    let mut file = fs::File::from_std(temp.as_file().try_clone()?);

    pin_mut!(stream);
    let mut written = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(&on_error)?;
        file.write_all(&chunk).await?;
        written += chunk.len();
    }
    file.flush().await?;
    debug!("Spooled {} bytes to {:?}", written, temp.path());

    Ok(temp)
}

/// Text after the last `.` of the file name, or the whole name when it has
/// no dot. Directory components sent by the client are dropped.
fn extension_of(original_name: &str) -> String {
    let file_name = original_name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(original_name);

    match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_string(),
        None => file_name.to_string(),
    }
}
