use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt};

pub const CIPHER_SUFFIX: &str = "Cip";
pub const DECIPHER_SUFFIX: &str = "Decip";

/// Inserts `suffix` before the extension: `notes.txt` -> `notesCip.txt`.
pub fn derive_output_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match path.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    path.with_file_name(file_name)
}

/// Reads up to `chunk_size` bytes; a shorter result means end of input.
pub fn read_chunk<R: Read>(reader: &mut R, chunk_size: usize) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(chunk_size);
    reader.take(chunk_size as u64).read_to_end(&mut buffer)?;
    Ok(buffer)
}

pub async fn read_chunk_async<R: AsyncRead + Unpin>(
    reader: &mut R,
    chunk_size: usize,
) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(chunk_size);
    reader.take(chunk_size as u64).read_to_end(&mut buffer).await?;
    Ok(buffer)
}
