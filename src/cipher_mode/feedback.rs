//! CFB与OFB共用同一个反馈引擎: 每个分组先由正向分组变换生成密钥流, 再与数据异或,
//! 两种模式只在反馈到寄存器中的值上有区别(CFB反馈密文, OFB反馈密钥流). <br>
//! 数据长度不需要是分组大小的整数倍, 末尾不足一个分组的数据只与密钥流的前缀异或. <br>

use crate::block_cipher::Xtea;
use crate::BlockEncrypt;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// 反馈到寄存器中的值
#[derive(Clone, Copy, PartialEq, Eq)]
enum FeedbackSource {
    /// CFB: 反馈密文
    Ciphertext,
    /// OFB: 反馈密钥流
    Keystream,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// CFB/OFB共用的反馈引擎. <br>
///
/// 寄存器由`iv`初始化, 每个分组: 密钥流`O_j = Encrypt(reg)`, 数据与密钥流原地异或.
/// CFB模式下反馈到寄存器中的始终是密文, 因此解密时需要在异或之前暂存输入的密文分组;
/// OFB模式下密钥流自反馈, 与数据方向无关. 末尾不足一个分组时流在此结束, 寄存器无需再推进.
fn feedback_transform<E, const N: usize>(
    cipher: &E,
    iv: &[u8; N],
    data: &mut [u8],
    direction: Direction,
    source: FeedbackSource,
) where
    E: BlockEncrypt<N>,
{
    let mut reg = *iv;

    for chunk in data.chunks_mut(N) {
        let keystream = cipher.encrypt_block(&reg);

        match source {
            FeedbackSource::Keystream => reg = keystream,
            FeedbackSource::Ciphertext => {
                // 解密时输入分组即密文, 须在异或前反馈
                if direction == Direction::Decrypt && chunk.len() == N {
                    reg.copy_from_slice(chunk);
                }
            }
        }

        chunk
            .iter_mut()
            .zip(keystream.iter())
            .for_each(|(a, &b)| *a ^= b);

        if source == FeedbackSource::Ciphertext
            && direction == Direction::Encrypt
            && chunk.len() == N
        {
            reg.copy_from_slice(chunk);
        }
    }
}

/// The Cipher Feedback Mode(CFB) <br>
///
/// 密钥流由正向分组变换生成, 密文反馈到寄存器. IV不需要保密, 但对同一密钥必须唯一. <br>
pub struct Cfb<E, const BLOCK_SIZE: usize> {
    cipher: E,
}

/// The Output Feedback Mode(OFB) <br>
///
/// 密钥流自反馈, 与数据无关, 加解密是同一个变换. IV对同一密钥必须唯一. <br>
pub struct Ofb<E, const BLOCK_SIZE: usize> {
    cipher: E,
}

pub type XteaCfb = Cfb<Xtea, { Xtea::BLOCK_SIZE }>;
pub type XteaOfb = Ofb<Xtea, { Xtea::BLOCK_SIZE }>;

impl<E, const N: usize> Cfb<E, N>
where
    E: BlockEncrypt<N>,
{
    pub fn new(cipher: E) -> Self {
        Self { cipher }
    }

    pub fn encrypt(&self, iv: &[u8; N], data: &mut [u8]) {
        feedback_transform(
            &self.cipher,
            iv,
            data,
            Direction::Encrypt,
            FeedbackSource::Ciphertext,
        );
    }

    pub fn decrypt(&self, iv: &[u8; N], data: &mut [u8]) {
        feedback_transform(
            &self.cipher,
            iv,
            data,
            Direction::Decrypt,
            FeedbackSource::Ciphertext,
        );
    }
}

impl<E, const N: usize> Ofb<E, N>
where
    E: BlockEncrypt<N>,
{
    pub fn new(cipher: E) -> Self {
        Self { cipher }
    }

    pub fn encrypt(&self, iv: &[u8; N], data: &mut [u8]) {
        feedback_transform(
            &self.cipher,
            iv,
            data,
            Direction::Encrypt,
            FeedbackSource::Keystream,
        );
    }

    pub fn decrypt(&self, iv: &[u8; N], data: &mut [u8]) {
        feedback_transform(
            &self.cipher,
            iv,
            data,
            Direction::Decrypt,
            FeedbackSource::Keystream,
        );
    }
}

/// MAC引擎复用的CFB链式单步: 密文`Encrypt(reg) ^ block`即新的寄存器值, 丢弃输出.
pub(crate) fn cfb_chain_block<E, const N: usize>(cipher: &E, reg: &mut [u8; N], block: &[u8; N])
where
    E: BlockEncrypt<N>,
{
    let keystream = cipher.encrypt_block(reg);
    reg.iter_mut()
        .zip(keystream.iter().zip(block.iter()))
        .for_each(|(a, (&b, &c))| {
            *a = b ^ c;
        });
}

#[cfg(feature = "sec-zeroize")]
impl<E, const N: usize> Zeroize for Cfb<E, N>
where
    E: Zeroize,
{
    fn zeroize(&mut self) {
        self.cipher.zeroize();
    }
}

#[cfg(feature = "sec-zeroize")]
impl<E, const N: usize> Zeroize for Ofb<E, N>
where
    E: Zeroize,
{
    fn zeroize(&mut self) {
        self.cipher.zeroize();
    }
}
