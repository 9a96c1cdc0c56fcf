//! 调用者持有的会话值, 取代原设计中进程级共享实例: 每个`XteaCipher`只保存轮数配置,
//! 每次操作都以参数传入密钥和数据缓冲, 无任何跨调用的隐式可变状态. <br>

use crate::block_cipher::Xtea;
use crate::cipher_mode::{XteaCfb, XteaEcb, XteaOfb};
use crate::mac::{derive_key_pair, XteaCfbMac};
use crate::CipherError;

/// 加解密与MAC计算各自独立的轮数配置.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundConfig {
    pub rounds: u32,
    pub mac_rounds: u32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            rounds: Xtea::ROUNDS,
            mac_rounds: Xtea::MAC_ROUNDS,
        }
    }
}

/// XTEA加解密与MAC计算的会话入口. <br>
///
/// 所有操作都是同步的原地变换, `&self`方法可以在多个会话中并发使用,
/// 增量MAC协议通过[`mac_init`](Self::mac_init)返回独立持有的会话值.
#[derive(Clone, Copy, Debug, Default)]
pub struct XteaCipher {
    config: RoundConfig,
}

impl XteaCipher {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_rounds(rounds: u32, mac_rounds: u32) -> Self {
        Self {
            config: RoundConfig { rounds, mac_rounds },
        }
    }

    /// 重设轮数, 可以在任意两次操作之间调用.
    pub fn configure(&mut self, rounds: u32, mac_rounds: u32) {
        self.config = RoundConfig { rounds, mac_rounds };
    }

    pub const fn round_config(&self) -> RoundConfig {
        self.config
    }

    fn cipher(&self, key: &[u8]) -> Result<Xtea, CipherError> {
        Xtea::new(key, self.config.rounds)
    }

    fn key_array(key: &[u8]) -> Result<[u8; Xtea::KEY_SIZE], CipherError> {
        key.try_into().map_err(|_| CipherError::InvalidKeySize {
            target: Xtea::KEY_SIZE,
            real: key.len(),
        })
    }

    /// ECB模式原地加密, 数据长度必须是8的整数倍, 否则不做任何修改并报错.
    pub fn ecb_encrypt(&self, key: &[u8], data: &mut [u8]) -> Result<(), CipherError> {
        XteaEcb::new(self.cipher(key)?).encrypt(data)
    }

    /// ECB模式原地解密, 数据长度必须是8的整数倍, 否则不做任何修改并报错.
    pub fn ecb_decrypt(&self, key: &[u8], data: &mut [u8]) -> Result<(), CipherError> {
        XteaEcb::new(self.cipher(key)?).decrypt(data)
    }

    /// CFB模式原地加密, 数据长度任意.
    pub fn cfb_encrypt(
        &self,
        key: &[u8],
        iv: &[u8; Xtea::BLOCK_SIZE],
        data: &mut [u8],
    ) -> Result<(), CipherError> {
        XteaCfb::new(self.cipher(key)?).encrypt(iv, data);
        Ok(())
    }

    /// CFB模式原地解密, 数据长度任意.
    pub fn cfb_decrypt(
        &self,
        key: &[u8],
        iv: &[u8; Xtea::BLOCK_SIZE],
        data: &mut [u8],
    ) -> Result<(), CipherError> {
        XteaCfb::new(self.cipher(key)?).decrypt(iv, data);
        Ok(())
    }

    /// OFB模式原地加密, 数据长度任意.
    pub fn ofb_encrypt(
        &self,
        key: &[u8],
        iv: &[u8; Xtea::BLOCK_SIZE],
        data: &mut [u8],
    ) -> Result<(), CipherError> {
        XteaOfb::new(self.cipher(key)?).encrypt(iv, data);
        Ok(())
    }

    /// OFB模式原地解密, 数据长度任意.
    pub fn ofb_decrypt(
        &self,
        key: &[u8],
        iv: &[u8; Xtea::BLOCK_SIZE],
        data: &mut [u8],
    ) -> Result<(), CipherError> {
        XteaOfb::new(self.cipher(key)?).decrypt(iv, data);
        Ok(())
    }

    /// 开始一个增量MAC会话. <br>
    ///
    /// 从`key`派生认证子密钥(见[`derive_key_pair`]), 同一个密钥可以同时用于加密和MAC计算.
    /// 返回的会话值由调用者独立持有, 互不干扰.
    pub fn mac_init(&self, key: &[u8]) -> Result<XteaCfbMac, CipherError> {
        let key = Self::key_array(key)?;
        let (_, mac_key) = derive_key_pair(&key);
        Ok(XteaCfbMac::new(Xtea::new(
            mac_key.as_slice(),
            self.config.mac_rounds,
        )?))
    }

    /// 一次性计算`data`的MAC标签.
    pub fn mac_compute(
        &self,
        key: &[u8],
        data: &[u8],
    ) -> Result<[u8; Xtea::BLOCK_SIZE], CipherError> {
        let mut mac = self.mac_init(key)?;
        mac.update(data)?;
        mac.finish()?;
        mac.tag()
    }

    /// 一次性校验`data`的MAC标签.
    pub fn mac_verify(
        &self,
        key: &[u8],
        tag: &[u8; Xtea::BLOCK_SIZE],
        data: &[u8],
    ) -> Result<bool, CipherError> {
        let mut mac = self.mac_init(key)?;
        mac.update(data)?;
        mac.finish()?;
        mac.verify(tag)
    }
}
