//! ## The Electronic Codebook Mode(ECB)
//!
//! $$
//! C_j = Encrypt(P_j), j = 1...n
//!
//! P_j = Decrypt(C_j), j = 1...n
//! $$
//!
//! 给定的密钥, 每个明文块和密文块一一对应(如果不期待使用这一特性, 不应该使用ECB模式). <br>
//! <br>

use crate::block_cipher::Xtea;
use crate::cipher_mode::to_block;
use crate::{BlockDecrypt, BlockEncrypt, CipherError};
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// Electronic Codebook Mode <br>
///
/// 数据长度必须是分组大小的整数倍, 原地加解密, 不做填充. <br>
pub struct Ecb<E, const BLOCK_SIZE: usize> {
    cipher: E,
}

pub type XteaEcb = Ecb<Xtea, { Xtea::BLOCK_SIZE }>;

impl<E, const N: usize> Ecb<E, N> {
    pub fn new(cipher: E) -> Self {
        Self { cipher }
    }

    fn check_len(data: &[u8]) -> Result<(), CipherError> {
        if data.len() % N != 0 {
            Err(CipherError::InvalidBlockSize {
                target: N,
                real: data.len(),
            })
        } else {
            Ok(())
        }
    }
}

impl<E, const N: usize> Ecb<E, N>
where
    E: BlockEncrypt<N>,
{
    pub fn encrypt(&self, data: &mut [u8]) -> Result<(), CipherError> {
        Self::check_len(data)?;

        for chunk in data.chunks_exact_mut(N) {
            let block = self.cipher.encrypt_block(&to_block(chunk));
            chunk.copy_from_slice(&block);
        }

        Ok(())
    }
}

impl<E, const N: usize> Ecb<E, N>
where
    E: BlockDecrypt<N>,
{
    pub fn decrypt(&self, data: &mut [u8]) -> Result<(), CipherError> {
        Self::check_len(data)?;

        for chunk in data.chunks_exact_mut(N) {
            let block = self.cipher.decrypt_block(&to_block(chunk));
            chunk.copy_from_slice(&block);
        }

        Ok(())
    }
}

#[cfg(feature = "sec-zeroize")]
impl<E, const N: usize> Zeroize for Ecb<E, N>
where
    E: Zeroize,
{
    fn zeroize(&mut self) {
        self.cipher.zeroize();
    }
}
