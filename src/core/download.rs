use crate::error::DownloadError;
use crate::utils::fs as fs_utils;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

const USER_AGENT: &str = concat!("gooo-init/", env!("CARGO_PKG_VERSION"));

pub struct Downloader {
    timeout: Option<Duration>,
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader {
    /// A downloader with no request timeout.
    pub fn new() -> Self {
        Self { timeout: None }
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// GET `url` and stream the body into `destination`.
    ///
    /// The parent of `destination` must exist. On any failure no file is left
    /// at `destination`.
    pub fn fetch(&self, url: &str, destination: &Path) -> Result<(), DownloadError> {
        let transport = |source: reqwest::Error| DownloadError::Transport {
            url: url.to_string(),
            source: source.into(),
        };

        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()
            .map_err(transport)?;

        let mut response = client.get(url).send().map_err(transport)?;
        let status = response.status();
        tracing::debug!(%url, %status, "received response");

        if !status.is_success() {
            self.discard(destination);
            return Err(DownloadError::BadStatus {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let io_error = |source| DownloadError::Io {
            path: destination.to_path_buf(),
            source,
        };

        let file = File::create(destination).map_err(io_error)?;

        match stream_to_file(&mut response, file) {
            Ok(bytes) => {
                tracing::debug!(bytes, path = %destination.display(), "download complete");
                Ok(())
            }
            Err(err) => {
                self.discard(destination);
                Err(match err {
                    StreamError::Read(source) => DownloadError::Transport {
                        url: url.to_string(),
                        source: Box::new(source),
                    },
                    StreamError::Write(source) => io_error(source),
                })
            }
        }
    }

    fn discard(&self, destination: &Path) {
        if let Err(e) = fs_utils::remove_file_if_exists(destination) {
            tracing::warn!(path = %destination.display(), error = %e, "could not remove partial download");
        }
    }
}

const CHUNK_SIZE: usize = 64 * 1024;

enum StreamError {
    Read(std::io::Error),
    Write(std::io::Error),
}

// The file is closed when this returns, after every byte is flushed.
fn stream_to_file<R: Read>(reader: &mut R, file: File) -> Result<u64, StreamError> {
    let mut writer = BufWriter::new(file);
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(StreamError::Read(e)),
        };
        writer.write_all(&buf[..n]).map_err(StreamError::Write)?;
        total += n as u64;
    }

    writer.flush().map_err(StreamError::Write)?;
    writer.get_ref().sync_all().map_err(StreamError::Write)?;
    Ok(total)
}
