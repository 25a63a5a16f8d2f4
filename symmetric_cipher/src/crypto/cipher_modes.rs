use crate::crypto::cipher_traits::CipherAlgorithm;
use crate::crypto::cipher_types::{CipherMode, PaddingMode};
use crate::crypto::error::{CipherError, CipherResult};
use crate::crypto::utils::{xor_bytes, xor_in_place};
use rayon::prelude::*;
use std::borrow::Cow;

/// Adds `blocks` to a little-endian multi-byte counter, dropping the final
/// carry.
pub fn advance_counter(counter: &[u8], blocks: usize) -> Vec<u8> {
    let mut result = counter.to_vec();
    let mut carry = blocks as u128;
    for byte in result.iter_mut() {
        if carry == 0 {
            break;
        }
        let sum = *byte as u128 + (carry & 0xFF);
        *byte = sum as u8;
        carry = (carry >> 8) + (sum >> 8);
    }
    result
}

/// `target += addend`, both little-endian and of equal length.
pub fn add_little_endian(target: &mut [u8], addend: &[u8]) {
    let mut carry = 0u16;
    for (t, &a) in target.iter_mut().zip(addend) {
        let sum = *t as u16 + a as u16 + carry;
        *t = sum as u8;
        carry = sum >> 8;
    }
}

fn check_iv(iv: &[u8], block_size: usize) -> CipherResult<()> {
    if iv.len() != block_size {
        return Err(CipherError::invalid_argument(format!(
            "IV must be {block_size} bytes, got {}",
            iv.len()
        )));
    }
    Ok(())
}

fn aligned(data: &[u8], block_size: usize, is_final: bool) -> CipherResult<()> {
    if data.len() % block_size != 0 && !is_final {
        return Err(CipherError::invalid_argument(format!(
            "non-final chunk of {} bytes is not a multiple of the {block_size}-byte block",
            data.len()
        )));
    }
    Ok(())
}

fn padded<'a>(data: &'a [u8], block_size: usize, padding: PaddingMode) -> Cow<'a, [u8]> {
    if data.len() % block_size == 0 {
        Cow::Borrowed(data)
    } else {
        let needed = data.len() / block_size * block_size + block_size;
        Cow::Owned(padding.pack(data, needed))
    }
}

fn concat_blocks(blocks: Vec<Vec<u8>>, capacity: usize) -> Vec<u8> {
    let mut result = Vec::with_capacity(capacity);
    for block in blocks {
        result.extend_from_slice(&block);
    }
    result
}

impl CipherMode {
    /// Enciphers `data` chained from `iv`. Padding is applied only when
    /// `is_final` is set and the data is not block aligned.
    pub fn encrypt(
        self,
        algorithm: &dyn CipherAlgorithm,
        padding: PaddingMode,
        data: &[u8],
        iv: &[u8],
        is_final: bool,
    ) -> CipherResult<Vec<u8>> {
        let block_size = algorithm.block_size();
        check_iv(iv, block_size)?;
        aligned(data, block_size, is_final)?;
        let data = padded(data, block_size, padding);

        Ok(match self {
            CipherMode::ECB => ecb(algorithm, &data, true),
            CipherMode::CBC => cbc_encrypt(algorithm, &data, iv),
            CipherMode::PCBC => pcbc(algorithm, &data, iv, true),
            CipherMode::CFB => cfb_encrypt(algorithm, &data, iv),
            CipherMode::OFB => ofb(algorithm, &data, iv),
            CipherMode::CTR => ctr(algorithm, &data, iv),
            CipherMode::RandomDelta => random_delta(algorithm, &data, iv),
        })
    }

    /// Deciphers `data` chained from `iv`; when `is_final` is set the
    /// padding is stripped from the result.
    pub fn decrypt(
        self,
        algorithm: &dyn CipherAlgorithm,
        padding: PaddingMode,
        data: &[u8],
        iv: &[u8],
        is_final: bool,
    ) -> CipherResult<Vec<u8>> {
        let block_size = algorithm.block_size();
        check_iv(iv, block_size)?;
        aligned(data, block_size, is_final)?;

        let data = if self.is_keystream() {
            padded(data, block_size, padding)
        } else if data.len() % block_size != 0 {
            return Err(CipherError::invalid_argument(format!(
                "{self} ciphertext of {} bytes is not a multiple of the {block_size}-byte block",
                data.len()
            )));
        } else {
            Cow::Borrowed(data)
        };

        let result = match self {
            CipherMode::ECB => ecb(algorithm, &data, false),
            CipherMode::CBC => cbc_decrypt(algorithm, &data, iv),
            CipherMode::PCBC => pcbc(algorithm, &data, iv, false),
            CipherMode::CFB => cfb_decrypt(algorithm, &data, iv),
            CipherMode::OFB => ofb(algorithm, &data, iv),
            CipherMode::CTR => ctr(algorithm, &data, iv),
            CipherMode::RandomDelta => random_delta(algorithm, &data, iv),
        };

        if is_final {
            Ok(padding.unpack(&result, block_size))
        } else {
            Ok(result)
        }
    }

    /// Chaining state that continues a stream after a non-final chunk.
    ///
    /// `plain` and `cipher` are the chunk's plaintext and ciphertext; both
    /// are block aligned and of equal length. The result equals the state the
    /// mode's block loop would hold had the chunk boundary not existed.
    pub fn next_iv(self, iv: &[u8], plain: &[u8], cipher: &[u8]) -> Vec<u8> {
        let block_size = iv.len();
        if cipher.len() < block_size || plain.len() < block_size || block_size == 0 {
            return iv.to_vec();
        }
        let last_cipher = &cipher[cipher.len() - block_size..];
        let last_plain = &plain[plain.len() - block_size..];

        match self {
            CipherMode::ECB => iv.to_vec(),
            CipherMode::CBC | CipherMode::CFB => last_cipher.to_vec(),
            CipherMode::PCBC | CipherMode::OFB => xor_bytes(last_plain, last_cipher),
            CipherMode::CTR => advance_counter(iv, cipher.len() / block_size),
            CipherMode::RandomDelta => {
                // every block's keystream is recoverable as P ^ C
                let mut delta = iv.to_vec();
                for (p, c) in plain.chunks_exact(block_size).zip(cipher.chunks_exact(block_size)) {
                    add_little_endian(&mut delta, &xor_bytes(p, c));
                }
                delta
            }
        }
    }
}

fn ecb(algorithm: &dyn CipherAlgorithm, data: &[u8], encrypt: bool) -> Vec<u8> {
    let blocks = data
        .par_chunks(algorithm.block_size())
        .map(|block| {
            if encrypt {
                algorithm.encrypt_block(block)
            } else {
                algorithm.decrypt_block(block)
            }
        })
        .collect();
    concat_blocks(blocks, data.len())
}

fn cbc_encrypt(algorithm: &dyn CipherAlgorithm, data: &[u8], iv: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len());
    let mut previous = iv.to_vec();
    for block in data.chunks(algorithm.block_size()) {
        previous = algorithm.encrypt_block(&xor_bytes(block, &previous));
        result.extend_from_slice(&previous);
    }
    result
}

fn cbc_decrypt(algorithm: &dyn CipherAlgorithm, data: &[u8], iv: &[u8]) -> Vec<u8> {
    let block_size = algorithm.block_size();
    let blocks = data
        .par_chunks(block_size)
        .enumerate()
        .map(|(i, block)| {
            let previous = match i {
                0 => iv,
                _ => &data[(i - 1) * block_size..i * block_size],
            };
            xor_bytes(&algorithm.decrypt_block(block), previous)
        })
        .collect();
    concat_blocks(blocks, data.len())
}

fn pcbc(algorithm: &dyn CipherAlgorithm, data: &[u8], iv: &[u8], encrypt: bool) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len());
    let mut state = iv.to_vec();
    for block in data.chunks(algorithm.block_size()) {
        let (plain, cipher) = if encrypt {
            let cipher = algorithm.encrypt_block(&xor_bytes(block, &state));
            (block.to_vec(), cipher)
        } else {
            let plain = xor_bytes(&algorithm.decrypt_block(block), &state);
            (plain, block.to_vec())
        };
        state = xor_bytes(&plain, &cipher);
        result.extend_from_slice(if encrypt { &cipher } else { &plain });
    }
    result
}

fn cfb_encrypt(algorithm: &dyn CipherAlgorithm, data: &[u8], iv: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len());
    let mut previous = iv.to_vec();
    for block in data.chunks(algorithm.block_size()) {
        previous = xor_bytes(block, &algorithm.encrypt_block(&previous));
        result.extend_from_slice(&previous);
    }
    result
}

fn cfb_decrypt(algorithm: &dyn CipherAlgorithm, data: &[u8], iv: &[u8]) -> Vec<u8> {
    let block_size = algorithm.block_size();
    let blocks = data
        .par_chunks(block_size)
        .enumerate()
        .map(|(i, block)| {
            let previous = match i {
                0 => iv,
                _ => &data[(i - 1) * block_size..i * block_size],
            };
            xor_bytes(block, &algorithm.encrypt_block(previous))
        })
        .collect();
    concat_blocks(blocks, data.len())
}

fn ofb(algorithm: &dyn CipherAlgorithm, data: &[u8], iv: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len());
    let mut keystream = iv.to_vec();
    for block in data.chunks(algorithm.block_size()) {
        keystream = algorithm.encrypt_block(&keystream);
        result.extend(xor_bytes(block, &keystream));
    }
    result
}

fn ctr(algorithm: &dyn CipherAlgorithm, data: &[u8], iv: &[u8]) -> Vec<u8> {
    let blocks = data
        .par_chunks(algorithm.block_size())
        .enumerate()
        .map(|(i, block)| {
            let mut out = algorithm.encrypt_block(&advance_counter(iv, i));
            out.truncate(block.len());
            xor_in_place(&mut out, block);
            out
        })
        .collect();
    concat_blocks(blocks, data.len())
}

fn random_delta(algorithm: &dyn CipherAlgorithm, data: &[u8], iv: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len());
    let mut delta = iv.to_vec();
    for block in data.chunks(algorithm.block_size()) {
        let keystream = algorithm.encrypt_block(&delta);
        result.extend(xor_bytes(block, &keystream));
        add_little_endian(&mut delta, &keystream);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_carries_into_higher_bytes() {
        assert_eq!(advance_counter(&[0xFF, 0x00, 0x00], 1), vec![0x00, 0x01, 0x00]);
        assert_eq!(advance_counter(&[0xFF, 0xFF], 2), vec![0x01, 0x00]);
        assert_eq!(advance_counter(&[0x10, 0x00], 0x0101), vec![0x11, 0x01]);
    }

    #[test]
    fn little_endian_addition_drops_overflow() {
        let mut target = [0xFF, 0xFF];
        add_little_endian(&mut target, &[0x01, 0x00]);
        assert_eq!(target, [0x00, 0x00]);
    }
}
