use log::{debug, info};
use std::io::{Read, Write};
use std::path::Path;
use symmetric_cipher::crypto::error::{CipherError, CipherResult};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const DEFAULT_BUFFER_SIZE: usize = 81920;

/// RC4 keystream generator. Encryption and decryption are the same XOR, and
/// the keystream position advances with every processed byte.
#[derive(Clone)]
pub struct Rc4 {
    state: [u8; 256],
    i: u8,
    j: u8,
}

impl Rc4 {
    /// Key scheduling. Keys of 1 to 256 bytes are accepted.
    pub fn new(key: &[u8]) -> CipherResult<Self> {
        if key.is_empty() || key.len() > 256 {
            return Err(CipherError::InvalidKeyLength {
                algorithm: "RC4",
                expected: "1 to 256",
                actual: key.len(),
            });
        }

        let mut state = [0u8; 256];
        for (k, s) in state.iter_mut().enumerate() {
            *s = k as u8;
        }
        let mut j = 0u8;
        for k in 0..256 {
            j = j.wrapping_add(state[k]).wrapping_add(key[k % key.len()]);
            state.swap(k, j as usize);
        }

        Ok(Rc4 { state, i: 0, j: 0 })
    }

    fn next_byte(&mut self) -> u8 {
        self.i = self.i.wrapping_add(1);
        self.j = self.j.wrapping_add(self.state[self.i as usize]);
        self.state.swap(self.i as usize, self.j as usize);
        let t = self.state[self.i as usize].wrapping_add(self.state[self.j as usize]);
        self.state[t as usize]
    }

    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            *byte ^= self.next_byte();
        }
    }

    pub fn process(&mut self, data: &[u8]) -> Vec<u8> {
        let mut output = data.to_vec();
        self.apply_keystream(&mut output);
        output
    }

    pub fn process_stream<R: Read, W: Write>(
        &mut self,
        mut reader: R,
        mut writer: W,
    ) -> CipherResult<u64> {
        let mut buffer = vec![0u8; DEFAULT_BUFFER_SIZE];
        let mut total = 0u64;
        loop {
            let read = reader.read(&mut buffer)?;
            if read == 0 {
                break;
            }
            self.apply_keystream(&mut buffer[..read]);
            writer.write_all(&buffer[..read])?;
            total += read as u64;
        }
        writer.flush()?;
        Ok(total)
    }

    /// Streams `input` into `output`, creating the output's parent
    /// directory when missing.
    pub async fn process_file_async(
        &mut self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        buffer_size: usize,
    ) -> CipherResult<u64> {
        let (input, output) = (input.as_ref(), output.as_ref());
        if buffer_size == 0 {
            return Err(CipherError::invalid_argument("buffer size must be positive"));
        }
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        info!("RC4 {} -> {}", input.display(), output.display());

        let mut reader = tokio::fs::File::open(input).await?;
        let mut writer = tokio::io::BufWriter::new(tokio::fs::File::create(output).await?);
        let mut buffer = vec![0u8; buffer_size];
        let mut total = 0u64;
        loop {
            let read = reader.read(&mut buffer).await?;
            if read == 0 {
                break;
            }
            self.apply_keystream(&mut buffer[..read]);
            writer.write_all(&buffer[..read]).await?;
            total += read as u64;
        }
        writer.flush().await?;
        debug!("RC4 processed {total} bytes");
        Ok(total)
    }
}

/// Known-answer check: `K = P = 0123456789ABCDEF -> 75B7878099E0C596`.
pub fn self_test() -> bool {
    const KEY: [u8; 8] = [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF];
    const EXPECTED: [u8; 8] = [0x75, 0xB7, 0x87, 0x80, 0x99, 0xE0, 0xC5, 0x96];

    let (Ok(mut encryptor), Ok(mut decryptor)) = (Rc4::new(&KEY), Rc4::new(&KEY)) else {
        return false;
    };
    encryptor.process(&KEY) == EXPECTED && decryptor.process(&EXPECTED) == KEY
}
