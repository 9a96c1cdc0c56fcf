//! Block Cipher-based Message Authentication Code <br>
//!
//! 基于CFB模式的MAC: 以全零分组为初始寄存器, 数据经链式CFB加密后丢弃密文,
//! 最终的寄存器值即为MAC标签. <br>
//!
//! - 流程:
//!   - subkey: 子密钥派生;
//!   - MAC生成;
//!   - MAC验证

mod cfb_mac;
pub use cfb_mac::{CfbMac, XteaCfbMac};

/// 认证子密钥的分离常量, 即HMAC的opad字节, 每个字节的汉明重量为4.
const KEY_SEPARATION: u8 = 0x5c;

/// 从一个密钥派生出(加密子密钥, 认证子密钥)对. <br>
///
/// 加密子密钥即原密钥, 认证子密钥为原密钥逐字节与`0x5c`异或,
/// 两者的汉明距离为密钥位数的一半. 派生是确定性的: 相同的输入密钥总是得到相同的密钥对.
pub fn derive_key_pair<const K: usize>(key: &[u8; K]) -> ([u8; K], [u8; K]) {
    let mut mac_key = *key;
    mac_key.iter_mut().for_each(|b| *b ^= KEY_SEPARATION);
    (*key, mac_key)
}
