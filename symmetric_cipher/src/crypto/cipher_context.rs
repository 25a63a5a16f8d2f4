use crate::crypto::cipher_io::{
    CIPHER_SUFFIX, DECIPHER_SUFFIX, derive_output_path, read_chunk, read_chunk_async,
};
use crate::crypto::cipher_traits::CipherAlgorithm;
use crate::crypto::cipher_types::{CipherInput, CipherMode, CipherOutput, PaddingMode};
use crate::crypto::error::{CipherError, CipherResult};
use log::{debug, info, trace, warn};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

pub const DEFAULT_CHUNK_BLOCKS: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// One algorithm bound to a mode, a padding scheme and a starting IV.
///
/// The context holds no state between calls; chaining state flows through
/// explicit IV arguments, so one context may serve any number of messages.
#[derive(Clone)]
pub struct CipherContext {
    algorithm: Arc<dyn CipherAlgorithm>,
    mode: CipherMode,
    padding: PaddingMode,
    iv: Vec<u8>,
    chunk_blocks: usize,
}

impl CipherContext {
    /// A missing IV becomes all zeros; an IV of the wrong length is truncated
    /// or zero-extended to the block size.
    pub fn new(
        algorithm: Arc<dyn CipherAlgorithm>,
        mode: CipherMode,
        padding: PaddingMode,
        iv: Option<Vec<u8>>,
    ) -> Self {
        let block_size = algorithm.block_size();
        let iv = match iv {
            None => vec![0u8; block_size],
            Some(mut iv) => {
                if iv.len() != block_size {
                    warn!(
                        "IV of {} bytes adjusted to the {block_size}-byte block size",
                        iv.len()
                    );
                    iv.resize(block_size, 0);
                }
                iv
            }
        };
        debug!("cipher context: block size {block_size}, mode {mode}, padding {padding}");

        Self {
            algorithm,
            mode,
            padding,
            iv,
            chunk_blocks: DEFAULT_CHUNK_BLOCKS,
        }
    }

    /// Sets the stream chunk to `blocks` cipher blocks.
    pub fn with_chunk_blocks(mut self, blocks: usize) -> CipherResult<Self> {
        if blocks == 0 {
            return Err(CipherError::invalid_argument("chunk must hold at least one block"));
        }
        self.chunk_blocks = blocks;
        Ok(self)
    }

    pub fn block_size(&self) -> usize {
        self.algorithm.block_size()
    }

    pub fn chunk_size(&self) -> usize {
        self.block_size() * self.chunk_blocks
    }

    pub fn mode(&self) -> CipherMode {
        self.mode
    }

    pub fn padding(&self) -> PaddingMode {
        self.padding
    }

    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    pub fn encrypt_chunk(&self, data: &[u8], iv: &[u8], is_final: bool) -> CipherResult<Vec<u8>> {
        self.mode
            .encrypt(self.algorithm.as_ref(), self.padding, data, iv, is_final)
    }

    pub fn decrypt_chunk(&self, data: &[u8], iv: &[u8], is_final: bool) -> CipherResult<Vec<u8>> {
        self.mode
            .decrypt(self.algorithm.as_ref(), self.padding, data, iv, is_final)
    }

    /// IV for the chunk that follows a non-final chunk.
    pub fn next_iv(&self, iv: &[u8], plain: &[u8], cipher: &[u8]) -> Vec<u8> {
        self.mode.next_iv(iv, plain, cipher)
    }

    pub fn cipher(&self, data: &[u8]) -> CipherResult<Vec<u8>> {
        self.encrypt_chunk(data, &self.iv, true)
    }

    pub fn decipher(&self, data: &[u8]) -> CipherResult<Vec<u8>> {
        self.decrypt_chunk(data, &self.iv, true)
    }

    fn process_chunk(
        &self,
        direction: Direction,
        data: &[u8],
        iv: &[u8],
        is_final: bool,
    ) -> CipherResult<Vec<u8>> {
        match direction {
            Direction::Encrypt => self.encrypt_chunk(data, iv, is_final),
            Direction::Decrypt => self.decrypt_chunk(data, iv, is_final),
        }
    }

    fn carry_iv(&self, direction: Direction, iv: &[u8], input: &[u8], output: &[u8]) -> Vec<u8> {
        match direction {
            Direction::Encrypt => self.next_iv(iv, input, output),
            Direction::Decrypt => self.next_iv(iv, output, input),
        }
    }

    /// Chunked loop shared by files and in-memory streams. One chunk of
    /// look-ahead decides which chunk is final.
    fn process_stream<R: Read, W: Write>(
        &self,
        mut reader: R,
        mut writer: W,
        direction: Direction,
    ) -> CipherResult<u64> {
        let chunk_size = self.chunk_size();
        let mut iv = self.iv.clone();
        let mut current = read_chunk(&mut reader, chunk_size)?;
        let mut written = 0u64;
        let mut index = 0usize;

        loop {
            let next = if current.len() == chunk_size {
                read_chunk(&mut reader, chunk_size)?
            } else {
                Vec::new()
            };
            let is_final = next.is_empty();

            let output = self.process_chunk(direction, &current, &iv, is_final)?;
            writer.write_all(&output)?;
            written += output.len() as u64;
            trace!("chunk {index}: {} -> {} bytes, final: {is_final}", current.len(), output.len());

            if is_final {
                break;
            }
            iv = self.carry_iv(direction, &iv, &current, &output);
            current = next;
            index += 1;
        }

        writer.flush()?;
        Ok(written)
    }

    pub fn cipher_stream<R: Read, W: Write>(&self, reader: R, writer: W) -> CipherResult<u64> {
        self.process_stream(reader, writer, Direction::Encrypt)
    }

    /// Padding is stripped from the final chunk only. With `Zeros`, trailing
    /// zero bytes of plaintext that sit in earlier chunks survive, whereas
    /// `decipher` strips them across the whole buffer.
    pub fn decipher_stream<R: Read, W: Write>(&self, reader: R, writer: W) -> CipherResult<u64> {
        self.process_stream(reader, writer, Direction::Decrypt)
    }

    fn process_file(&self, input: &Path, output: &Path, direction: Direction) -> CipherResult<u64> {
        info!("{direction:?} {} -> {}", input.display(), output.display());
        let reader = BufReader::new(File::open(input)?);
        let writer = BufWriter::new(File::create(output)?);
        let written = self.process_stream(reader, writer, direction)?;
        info!("{direction:?} finished: {written} bytes written to {}", output.display());
        Ok(written)
    }

    /// Writes next to `path` with `Cip` inserted before the extension.
    pub fn cipher_file(&self, path: impl AsRef<Path>) -> CipherResult<PathBuf> {
        let input = path.as_ref();
        let output = derive_output_path(input, CIPHER_SUFFIX);
        self.process_file(input, &output, Direction::Encrypt)?;
        Ok(output)
    }

    /// Writes next to `path` with `Decip` inserted before the extension.
    pub fn decipher_file(&self, path: impl AsRef<Path>) -> CipherResult<PathBuf> {
        let input = path.as_ref();
        let output = derive_output_path(input, DECIPHER_SUFFIX);
        self.process_file(input, &output, Direction::Decrypt)?;
        Ok(output)
    }

    pub fn cipher_file_to(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> CipherResult<u64> {
        self.process_file(input.as_ref(), output.as_ref(), Direction::Encrypt)
    }

    pub fn decipher_file_to(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> CipherResult<u64> {
        self.process_file(input.as_ref(), output.as_ref(), Direction::Decrypt)
    }

    async fn run_blocking<F, T>(task: F) -> CipherResult<T>
    where
        F: FnOnce() -> CipherResult<T> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(task)
            .await
            .map_err(|e| CipherError::Task(e.to_string()))?
    }

    async fn write_pending<W: AsyncWrite + Unpin>(
        writer: &mut W,
        pending: Option<Vec<u8>>,
    ) -> CipherResult<()> {
        if let Some(data) = pending {
            writer.write_all(&data).await?;
        }
        Ok(())
    }

    async fn read_ahead<R: AsyncRead + Unpin>(
        reader: &mut R,
        chunk_size: usize,
        current_len: usize,
    ) -> CipherResult<Vec<u8>> {
        if current_len < chunk_size {
            return Ok(Vec::new());
        }
        Ok(read_chunk_async(reader, chunk_size).await?)
    }

    /// Async counterpart of `process_stream`. Reading chunk `n + 1` overlaps
    /// writing the output of chunk `n - 1`; block work runs on the blocking
    /// pool. Chunks stay strictly ordered because each IV depends on the
    /// previous chunk.
    async fn process_stream_async<R, W>(
        &self,
        mut reader: R,
        mut writer: W,
        direction: Direction,
    ) -> CipherResult<u64>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let chunk_size = self.chunk_size();
        let mut iv = self.iv.clone();
        let mut current = read_chunk_async(&mut reader, chunk_size).await?;
        let mut pending: Option<Vec<u8>> = None;
        let mut written = 0u64;

        loop {
            let (next, ()) = futures::try_join!(
                Self::read_ahead(&mut reader, chunk_size, current.len()),
                Self::write_pending(&mut writer, pending.take()),
            )?;
            let is_final = next.is_empty();

            let this = self.clone();
            let chunk_iv = iv.clone();
            let (chunk, output) = Self::run_blocking(move || {
                let output = this.process_chunk(direction, &current, &chunk_iv, is_final)?;
                Ok((current, output))
            })
            .await?;

            written += output.len() as u64;
            if is_final {
                pending = Some(output);
                break;
            }
            iv = self.carry_iv(direction, &iv, &chunk, &output);
            pending = Some(output);
            current = next;
        }

        Self::write_pending(&mut writer, pending).await?;
        writer.flush().await?;
        Ok(written)
    }

    async fn process_file_async(
        &self,
        input: PathBuf,
        output: PathBuf,
        direction: Direction,
    ) -> CipherResult<u64> {
        info!("{direction:?} (async) {} -> {}", input.display(), output.display());
        let reader = tokio::fs::File::open(&input).await?;
        let writer = tokio::io::BufWriter::new(tokio::fs::File::create(&output).await?);
        let written = self.process_stream_async(reader, writer, direction).await?;
        info!("{direction:?} (async) finished: {written} bytes written to {}", output.display());
        Ok(written)
    }

    pub async fn cipher_file_async(&self, path: impl AsRef<Path>) -> CipherResult<PathBuf> {
        let input = path.as_ref().to_path_buf();
        let output = derive_output_path(&input, CIPHER_SUFFIX);
        self.process_file_async(input, output.clone(), Direction::Encrypt)
            .await?;
        Ok(output)
    }

    pub async fn decipher_file_async(&self, path: impl AsRef<Path>) -> CipherResult<PathBuf> {
        let input = path.as_ref().to_path_buf();
        let output = derive_output_path(&input, DECIPHER_SUFFIX);
        self.process_file_async(input, output.clone(), Direction::Decrypt)
            .await?;
        Ok(output)
    }

    pub async fn cipher_file_to_async(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> CipherResult<u64> {
        self.process_file_async(
            input.as_ref().to_path_buf(),
            output.as_ref().to_path_buf(),
            Direction::Encrypt,
        )
        .await
    }

    pub async fn decipher_file_to_async(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> CipherResult<u64> {
        self.process_file_async(
            input.as_ref().to_path_buf(),
            output.as_ref().to_path_buf(),
            Direction::Decrypt,
        )
        .await
    }

    async fn process(
        &self,
        input: CipherInput,
        output: &mut CipherOutput,
        direction: Direction,
    ) -> CipherResult<()> {
        match (input, output) {
            (CipherInput::File(input_path), CipherOutput::File(output_path)) => {
                self.process_file_async(input_path, output_path.clone(), direction)
                    .await?;
            }
            (CipherInput::File(input_path), CipherOutput::Buffer(buffer)) => {
                let reader = tokio::fs::File::open(&input_path).await?;
                let mut result = Vec::new();
                self.process_stream_async(reader, &mut result, direction)
                    .await?;
                *buffer = result;
            }
            (CipherInput::Bytes(data), output) => {
                let this = self.clone();
                let result = Self::run_blocking(move || {
                    this.process_chunk(direction, &data, &this.iv, true)
                })
                .await?;
                match output {
                    CipherOutput::Buffer(buffer) => *buffer = result,
                    CipherOutput::File(path) => tokio::fs::write(path, result).await?,
                }
            }
        }
        Ok(())
    }

    pub async fn encrypt(&self, input: CipherInput, output: &mut CipherOutput) -> CipherResult<()> {
        self.process(input, output, Direction::Encrypt).await
    }

    pub async fn decrypt(&self, input: CipherInput, output: &mut CipherOutput) -> CipherResult<()> {
        self.process(input, output, Direction::Decrypt).await
    }
}
