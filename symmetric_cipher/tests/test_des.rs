#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use symmetric_cipher::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
    use symmetric_cipher::crypto::des::DES;
    use symmetric_cipher::crypto::des_key_expansion::DesKeyExpansion;
    use symmetric_cipher::crypto::error::CipherError;
    use symmetric_cipher::crypto::key_expansion::KeyExpansion;
    use symmetric_cipher::crypto::triple_des::TripleDES;

    #[test]
    fn test_des_nist_vector() {
        let key = hex!("13 34 57 79 9B BC DF F1");
        let plaintext = hex!("01 23 45 67 89 AB CD EF");
        let expected_ciphertext = hex!("85 E8 13 54 0F 0A B4 05");

        let des = DES::new(&key).unwrap();

        let ciphertext = des.encrypt_block(&plaintext);
        assert_eq!(ciphertext, expected_ciphertext);

        let decrypted = des.decrypt_block(&ciphertext);
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_des_now_is_t() {
        let key = hex!("01 23 45 67 89 AB CD EF");
        let des = DES::new(&key).unwrap();

        assert_eq!(des.encrypt_block(b"Now is t"), hex!("3F A4 0E 8A 98 4D 48 15"));
    }

    #[test]
    fn test_des_first_and_last_subkeys() {
        let round_keys = DesKeyExpansion
            .generate_round_keys(&hex!("13 34 57 79 9B BC DF F1"))
            .unwrap();

        assert_eq!(round_keys.len(), 16);
        assert_eq!(round_keys[0], hex!("1B 02 EF FC 70 72"));
        assert_eq!(round_keys[15], hex!("CB 3D 8B 0E 17 F5"));
    }

    #[test]
    fn test_des_rejects_short_key() {
        let err = DES::new(&[1, 2, 3]).err().unwrap();
        assert!(matches!(
            err,
            CipherError::InvalidKeyLength { actual: 3, .. }
        ));
    }

    #[test]
    fn test_des_set_key_changes_output() {
        let mut des = DES::new(b"12345678").unwrap();
        let before = des.encrypt_block(b"ABCDEFGH");

        des.set_key(b"87654321").unwrap();
        let after = des.encrypt_block(b"ABCDEFGH");

        assert_ne!(before, after);
        assert_eq!(des.decrypt_block(&after), b"ABCDEFGH");
        assert!(des.set_key(b"short").is_err());
    }

    #[test]
    fn test_triple_des_with_equal_keys_is_des() {
        let key = hex!("13 34 57 79 9B BC DF F1");
        let triple = TripleDES::new(&key, &key, &key).unwrap();

        assert_eq!(triple.block_size(), 8);
        assert_eq!(
            triple.encrypt_block(&hex!("01 23 45 67 89 AB CD EF")),
            hex!("85 E8 13 54 0F 0A B4 05")
        );
    }

    #[test]
    fn test_triple_des_roundtrip() {
        let key = hex!(
            "01 23 45 67 89 AB CD EF
             FE DC BA 98 76 54 32 10
             89 AB CD EF 01 23 45 67"
        );
        let triple = TripleDES::from_key(&key).unwrap();
        let block = b"8 bytes!";

        let ciphertext = triple.encrypt_block(block);
        assert_ne!(ciphertext, block);
        assert_eq!(triple.decrypt_block(&ciphertext), block);
    }

    #[test]
    fn test_triple_des_rejects_16_byte_key() {
        assert!(matches!(
            TripleDES::from_key(&[0u8; 16]),
            Err(CipherError::InvalidKeyLength { actual: 16, .. })
        ));
    }
}
