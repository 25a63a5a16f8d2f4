use crate::rijndael::sbox::SBoxes;
use crate::rijndael::{KEY_SIZES, rounds_for};
use symmetric_cipher::crypto::error::{CipherError, CipherResult};
use symmetric_cipher::crypto::key_expansion::KeyExpansion;
use symmetric_cipher::gf::GaloisField;

type Word = [u8; 4];

/// Word-oriented Rijndael key expansion producing `Nr + 1` round keys of
/// `block_size` bytes each.
#[derive(Debug, Clone, Copy)]
pub struct RijndaelKeyExpansion {
    field: GaloisField,
    block_size: usize,
}

impl RijndaelKeyExpansion {
    pub fn new(field: GaloisField, block_size: usize) -> Self {
        RijndaelKeyExpansion { field, block_size }
    }

    fn sub_word(sbox: &SBoxes, word: Word) -> Word {
        word.map(|b| sbox.substitute(b))
    }

    fn rot_word(word: Word) -> Word {
        [word[1], word[2], word[3], word[0]]
    }
}

impl KeyExpansion for RijndaelKeyExpansion {
    fn generate_round_keys(&self, key: &[u8]) -> CipherResult<Vec<Vec<u8>>> {
        if !KEY_SIZES.contains(&key.len()) {
            return Err(CipherError::InvalidKeyLength {
                algorithm: "Rijndael",
                expected: "16, 24 or 32",
                actual: key.len(),
            });
        }

        let sbox = SBoxes::for_field(self.field);
        let nk = key.len() / 4;
        let nb = self.block_size / 4;
        let total_words = nb * (rounds_for(self.block_size, key.len()) + 1);

        let mut words: Vec<Word> = key
            .chunks_exact(4)
            .map(|chunk| [chunk[0], chunk[1], chunk[2], chunk[3]])
            .collect();
        let mut rcon = 1u8;

        for i in nk..total_words {
            let mut temp = words[i - 1];
            if i % nk == 0 {
                temp = Self::sub_word(sbox, Self::rot_word(temp));
                temp[0] ^= rcon;
                rcon = self.field.multiply(rcon, 2);
            } else if nk > 6 && i % nk == 4 {
                temp = Self::sub_word(sbox, temp);
            }
            let previous = words[i - nk];
            words.push([
                previous[0] ^ temp[0],
                previous[1] ^ temp[1],
                previous[2] ^ temp[2],
                previous[3] ^ temp[3],
            ]);
        }

        Ok(words
            .chunks_exact(nb)
            .map(|round| round.concat())
            .collect())
    }
}

/// Round keys for a 128-bit block under the field's modulus.
pub fn expand_key(key: &[u8], field: GaloisField) -> CipherResult<Vec<Vec<u8>>> {
    RijndaelKeyExpansion::new(field, 16).generate_round_keys(key)
}
