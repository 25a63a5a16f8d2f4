/// Round function of a Feistel cipher.
pub trait EncryptionTransformation: Send + Sync {
    fn rounds(&self) -> usize;

    /// Runs once per round key when the key is set. The driver hands the
    /// result to `transform` in place of the raw round key.
    fn prepare_round_key(&self, round_key: &[u8]) -> Vec<u8> {
        round_key.to_vec()
    }

    /// F-function: maps one half block and a round key to a value of the same
    /// length as the half block.
    fn transform(&self, input_block: &[u8], round_key: &[u8]) -> Vec<u8>;
}
