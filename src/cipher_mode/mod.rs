//! # Recommendation for Block Cipher Mode of Operation: Method and Techniques
//!
//! [Block Cipher Techniques](https://csrc.nist.gov/Projects/block-cipher-techniques/BCM/current-modes)<br>
//! [NIST 800-38A, Recommendation for Block Cipher Modes of operation Methods and Techniques](https://nvlpubs.nist.gov/nistpubs/Legacy/SP/nistspecialpublication800-38a.pdf)<br>
//! <br>
//! ## The Electronic Codebook Mode(ECB)
//!
//! $$
//! C_j = Encrypt(P_j), j = 1...n
//!
//! P_j = Decrypt(C_j), j = 1...n
//! $$
//!
//! 给定的密钥, 每个明文块和密文块一一对应, 数据长度必须是分组大小的整数倍(本实现不做填充). <br>
//! <br>
//! ## The Cipher Feedback Mode(CFB)
//!
//! 这里`s`固定为分组大小`b`, 末尾不足一个分组的数据只与密钥流的前缀异或: <br>
//!
//! $$
//! I_1 = IV; I_j = C_{j-1}, j = 2...n; O_j = Encrypt(I_j), j = 1...n; C_j = P_j \xor O_j, j = 1...n;
//! $$
//!
//! 无论加密还是解密, 密钥流都由分组加密的正向变换生成, 反馈到寄存器中的始终是密文. <br>
//! <br>
//! ## The Output Feedback Mode(OFB)
//!
//! $$
//! I_1 = IV; I_j = O_{j-1}, j = 2...n; O_j = Encrypt(I_j), C_j = P_j \xor O_j, j = 1...n;
//! $$
//!
//! 密钥流只依赖密钥和IV, 与明文/密文无关, 加解密是同一个变换. <br>
//! <br>
//! 对于给定的密钥, CFB/OFB的IV每次加密时都需要是独一无二的(unique), 本层不做校验. <br>

mod ecb;
pub use ecb::{Ecb, XteaEcb};

mod feedback;
pub(crate) use feedback::cfb_chain_block;
pub use feedback::{Cfb, Ofb, XteaCfb, XteaOfb};

pub(crate) fn to_block<const N: usize>(chunk: &[u8]) -> [u8; N] {
    let mut block = [0u8; N];
    block.copy_from_slice(chunk);
    block
}
