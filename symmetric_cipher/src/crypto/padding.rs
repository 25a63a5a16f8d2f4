use crate::crypto::cipher_types::PaddingMode;
use log::debug;
use rand::RngCore;

impl PaddingMode {
    /// Extends `data` to `needed_length`; data already that long is returned
    /// as is.
    pub fn pack(self, data: &[u8], needed_length: usize) -> Vec<u8> {
        let mut result = data.to_vec();
        if data.len() >= needed_length {
            return result;
        }

        let pad_len = needed_length - data.len();
        match self {
            PaddingMode::Zeros => result.resize(needed_length, 0),
            PaddingMode::ANSI_X923 => {
                result.resize(needed_length - 1, 0);
                result.push(pad_len as u8);
            }
            PaddingMode::PKCS7 => result.resize(needed_length, pad_len as u8),
            PaddingMode::ISO10126 => {
                let mut filler = vec![0u8; pad_len - 1];
                rand::rng().fill_bytes(&mut filler);
                result.extend_from_slice(&filler);
                result.push(pad_len as u8);
            }
        }
        result
    }

    /// Strips padding from a deciphered buffer.
    ///
    /// Zeros removes every trailing zero byte, so plaintext that itself ends
    /// in zeros loses them. The length-tagged schemes accept a pad length in
    /// `1..=min(block_size, len)`; anything that fails validation is returned
    /// unchanged.
    pub fn unpack(self, data: &[u8], block_size: usize) -> Vec<u8> {
        if self == PaddingMode::Zeros {
            let end = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
            return data[..end].to_vec();
        }

        let Some(&last) = data.last() else {
            return Vec::new();
        };
        let pad_len = last as usize;
        if pad_len == 0 || pad_len > block_size || pad_len > data.len() {
            debug!("{self} unpack: length byte {pad_len} out of range, leaving data as is");
            return data.to_vec();
        }

        let body_len = data.len() - pad_len;
        let valid = match self {
            PaddingMode::ANSI_X923 => data[body_len..data.len() - 1].iter().all(|&b| b == 0),
            PaddingMode::PKCS7 => data[body_len..].iter().all(|&b| b == last),
            PaddingMode::ISO10126 | PaddingMode::Zeros => true,
        };

        if valid {
            data[..body_len].to_vec()
        } else {
            debug!("{self} unpack: malformed padding, leaving data as is");
            data.to_vec()
        }
    }
}
