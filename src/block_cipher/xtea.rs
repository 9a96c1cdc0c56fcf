//! XTEA加密<br>
//! [Tea extensions](https://www.cix.co.uk/~klockstone/xtea.pdf)<br>
//! 64位分组, 128位密钥的Feistel结构分组密码, 轮数可配置(推荐32轮). <br>

use crate::{BlockDecrypt, BlockEncrypt, CipherError};
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// XTEA分组密码<br>
///
/// 分组8字节, 密钥16字节, 轮数可在构造时指定. 分组和密钥都按大端字节序解释为32位字. <br>
#[derive(Clone)]
pub struct Xtea {
    key: [u32; 4],
    rounds: u32,
}

impl Xtea {
    pub const BLOCK_SIZE: usize = 8;
    pub const KEY_SIZE: usize = 16;
    /// 加解密操作的默认轮数
    pub const ROUNDS: u32 = 32;
    /// MAC计算的默认轮数
    pub const MAC_ROUNDS: u32 = 16;

    const DELTA: u32 = 0x9e3779b9;

    pub fn new(key: &[u8], rounds: u32) -> Result<Self, CipherError> {
        if key.len() != Self::KEY_SIZE {
            return Err(CipherError::InvalidKeySize {
                target: Self::KEY_SIZE,
                real: key.len(),
            });
        }

        let mut k = [0u32; 4];
        k.iter_mut().zip(key.chunks_exact(4)).for_each(|(a, b)| {
            *a = u32::from_be_bytes([b[0], b[1], b[2], b[3]]);
        });

        Ok(Self { key: k, rounds })
    }

    const fn load(block: &[u8; Self::BLOCK_SIZE]) -> (u32, u32) {
        (
            u32::from_be_bytes([block[0], block[1], block[2], block[3]]),
            u32::from_be_bytes([block[4], block[5], block[6], block[7]]),
        )
    }

    fn store(v0: u32, v1: u32) -> [u8; Self::BLOCK_SIZE] {
        let mut block = [0u8; Self::BLOCK_SIZE];
        block[..4].copy_from_slice(&v0.to_be_bytes());
        block[4..].copy_from_slice(&v1.to_be_bytes());
        block
    }

    fn encrypt_block_inner(&self, plaintext: &[u8; Self::BLOCK_SIZE]) -> [u8; Self::BLOCK_SIZE] {
        let (mut v0, mut v1) = Self::load(plaintext);
        let mut sum = 0u32;

        for _ in 0..self.rounds {
            v0 = v0.wrapping_add(
                (((v1 << 4) ^ (v1 >> 5)).wrapping_add(v1))
                    ^ sum.wrapping_add(self.key[(sum & 3) as usize]),
            );
            sum = sum.wrapping_add(Self::DELTA);
            v1 = v1.wrapping_add(
                (((v0 << 4) ^ (v0 >> 5)).wrapping_add(v0))
                    ^ sum.wrapping_add(self.key[((sum >> 11) & 3) as usize]),
            );
        }

        Self::store(v0, v1)
    }

    fn decrypt_block_inner(&self, ciphertext: &[u8; Self::BLOCK_SIZE]) -> [u8; Self::BLOCK_SIZE] {
        let (mut v0, mut v1) = Self::load(ciphertext);
        let mut sum = Self::DELTA.wrapping_mul(self.rounds);

        for _ in 0..self.rounds {
            v1 = v1.wrapping_sub(
                (((v0 << 4) ^ (v0 >> 5)).wrapping_add(v0))
                    ^ sum.wrapping_add(self.key[((sum >> 11) & 3) as usize]),
            );
            sum = sum.wrapping_sub(Self::DELTA);
            v0 = v0.wrapping_sub(
                (((v1 << 4) ^ (v1 >> 5)).wrapping_add(v1))
                    ^ sum.wrapping_add(self.key[(sum & 3) as usize]),
            );
        }

        Self::store(v0, v1)
    }
}

impl BlockEncrypt<8> for Xtea {
    fn encrypt_block(&self, plaintext: &[u8; 8]) -> [u8; 8] {
        self.encrypt_block_inner(plaintext)
    }
}

impl BlockDecrypt<8> for Xtea {
    fn decrypt_block(&self, ciphertext: &[u8; 8]) -> [u8; 8] {
        self.decrypt_block_inner(ciphertext)
    }
}

#[cfg(feature = "sec-zeroize")]
impl Zeroize for Xtea {
    fn zeroize(&mut self) {
        self.key.zeroize();
    }
}

#[cfg(feature = "sec-zeroize-drop")]
impl Drop for Xtea {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::Xtea;
    use crate::{BlockDecrypt, BlockEncrypt, CipherError};
    use rand::{thread_rng, Rng};

    #[test]
    fn xtea_round_trip() {
        let mut rng = thread_rng();
        for rounds in [16u32, 32, 48, 64] {
            for _ in 0..64 {
                let key: [u8; Xtea::KEY_SIZE] = rng.gen();
                let block: [u8; Xtea::BLOCK_SIZE] = rng.gen();
                let xtea = Xtea::new(key.as_slice(), rounds).unwrap();

                let ct = xtea.encrypt_block(&block);
                assert_eq!(
                    xtea.decrypt_block(&ct),
                    block,
                    "round trip failed, rounds: {rounds}"
                );
            }
        }
    }

    #[test]
    fn xtea_rounds_affect_output() {
        let key = [0u8; Xtea::KEY_SIZE];
        let block = [0x01u8, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef];

        let c32 = Xtea::new(key.as_slice(), 32).unwrap().encrypt_block(&block);
        let c16 = Xtea::new(key.as_slice(), 16).unwrap().encrypt_block(&block);
        assert_ne!(c32, c16);
        assert_ne!(c32, block);
    }

    #[test]
    fn xtea_key_size_check() {
        for len in [0usize, 8, 15, 17, 32] {
            let key = vec![0u8; len];
            assert!(matches!(
                Xtea::new(key.as_slice(), Xtea::ROUNDS),
                Err(CipherError::InvalidKeySize { target: 16, real }) if real == len
            ));
        }
    }
}
