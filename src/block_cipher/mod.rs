//! 分组密码的原语契约: 模式层只通过这组trait使用底层的分组置换,
//! 正向/逆向变换分别对应加密和解密方向.

pub trait BlockEncrypt<const BLOCK_SIZE: usize> {
    /// 对一个分组应用正向置换.
    fn encrypt_block(&self, plaintext: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE];
}

pub trait BlockDecrypt<const BLOCK_SIZE: usize> {
    /// 对一个分组应用逆向置换.
    fn decrypt_block(&self, ciphertext: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE];
}

pub trait BlockCipher<const N: usize>: BlockEncrypt<N> + BlockDecrypt<N> {
    const BLOCK_SIZE: usize = N;
}

impl<T, const N: usize> BlockCipher<N> for T where T: BlockDecrypt<N> + BlockEncrypt<N> {}

mod xtea;
pub use xtea::Xtea;
