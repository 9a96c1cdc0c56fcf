//! CFB链式MAC的增量协议: `new(Init) -> update* -> finish -> tag/verify`. <br>
//! `finish`之后`update/finish`不再合法, `tag/verify`只在`finish`之后合法,
//! 违反协议以[`CipherError`](crate::CipherError)报告而不是在过期状态上静默计算. <br>

use crate::block_cipher::Xtea;
use crate::cipher_mode::{cfb_chain_block, to_block};
use crate::{BlockEncrypt, CipherError};
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

pub struct CfbMac<E, const BLOCK_SIZE: usize> {
    cipher: E,
    // 链式CFB的寄存器, finish之后即标签值
    reg: [u8; BLOCK_SIZE],
    // 不足一个分组的数据缓存
    buf: [u8; BLOCK_SIZE],
    // 下一个可以存放数据的索引
    buf_idx: usize,
    is_finalize: bool,
}

pub type XteaCfbMac = CfbMac<Xtea, { Xtea::BLOCK_SIZE }>;

impl<E, const N: usize> CfbMac<E, N>
where
    E: BlockEncrypt<N>,
{
    /// 初始寄存器为全零分组, 与反馈模式的IV约定一致.
    pub fn new(cipher: E) -> Self {
        Self {
            cipher,
            reg: [0u8; N],
            buf: [0u8; N],
            buf_idx: 0,
            is_finalize: false,
        }
    }

    /// 追加数据. 数据可以任意切分, 任何切分方式下最终标签都与一次性传入等价.
    pub fn update(&mut self, mut data: &[u8]) -> Result<(), CipherError> {
        if self.is_finalize {
            return Err(CipherError::MacFinished);
        }

        if self.buf_idx != 0 {
            let l = (N - self.buf_idx).min(data.len());
            let bound = self.buf_idx + l;
            self.buf[self.buf_idx..bound].copy_from_slice(&data[..l]);
            self.buf_idx = bound;
            data = &data[l..];

            if self.buf_idx == N {
                let block = self.buf;
                cfb_chain_block(&self.cipher, &mut self.reg, &block);
                self.buf_idx = 0;
            }
        }

        let mut itr = data.chunks_exact(N);
        for chunk in &mut itr {
            cfb_chain_block(&self.cipher, &mut self.reg, &to_block(chunk));
        }

        let rem = itr.remainder();
        if !rem.is_empty() {
            self.buf[..rem.len()].copy_from_slice(rem);
            self.buf_idx = rem.len();
        }

        Ok(())
    }

    /// 固定标签值: 缓存的末尾数据补零后执行最后一次链式CFB单步.
    pub fn finish(&mut self) -> Result<(), CipherError> {
        if self.is_finalize {
            return Err(CipherError::MacFinished);
        }

        self.buf[self.buf_idx..].fill(0);
        let block = self.buf;
        cfb_chain_block(&self.cipher, &mut self.reg, &block);
        self.buf_idx = 0;
        self.is_finalize = true;

        Ok(())
    }

    /// 取出标签. 只在`finish`之后合法, 可重复调用.
    pub fn tag(&self) -> Result<[u8; N], CipherError> {
        if self.is_finalize {
            Ok(self.reg)
        } else {
            Err(CipherError::MacNotFinished)
        }
    }

    /// 逐字节比较标签. 只在`finish`之后合法, 非破坏性操作.
    pub fn verify(&self, tag: &[u8; N]) -> Result<bool, CipherError> {
        if self.is_finalize {
            Ok(&self.reg == tag)
        } else {
            Err(CipherError::MacNotFinished)
        }
    }

    /// 以同一密钥重新开始一个MAC会话.
    pub fn reset(&mut self) {
        self.reg = [0u8; N];
        self.buf = [0u8; N];
        self.buf_idx = 0;
        self.is_finalize = false;
    }
}

#[cfg(feature = "sec-zeroize")]
impl<E, const N: usize> Zeroize for CfbMac<E, N>
where
    E: Zeroize,
{
    fn zeroize(&mut self) {
        self.cipher.zeroize();
        self.reg.zeroize();
        self.buf.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::XteaCfbMac;
    use crate::block_cipher::Xtea;
    use crate::CipherError;
    use rand::{thread_rng, Rng};

    fn mac_session(key: &[u8; Xtea::KEY_SIZE]) -> XteaCfbMac {
        XteaCfbMac::new(Xtea::new(key.as_slice(), Xtea::MAC_ROUNDS).unwrap())
    }

    fn one_shot(key: &[u8; Xtea::KEY_SIZE], data: &[u8]) -> [u8; Xtea::BLOCK_SIZE] {
        let mut mac = mac_session(key);
        mac.update(data).unwrap();
        mac.finish().unwrap();
        mac.tag().unwrap()
    }

    #[test]
    fn mac_deterministic() {
        let mut rng = thread_rng();
        for len in [0usize, 1, 7, 8, 9, 24, 33] {
            let key: [u8; Xtea::KEY_SIZE] = rng.gen();
            let mut data = vec![0u8; len];
            rng.fill(data.as_mut_slice());

            assert_eq!(
                one_shot(&key, data.as_slice()),
                one_shot(&key, data.as_slice()),
                "length {len} not deterministic"
            );
        }
    }

    #[test]
    fn mac_streaming_equivalence() {
        let mut rng = thread_rng();
        let key: [u8; Xtea::KEY_SIZE] = rng.gen();
        let mut data = vec![0u8; 41];
        rng.fill(data.as_mut_slice());
        let tag = one_shot(&key, data.as_slice());

        // 任意切分方式: 逐字节, 跨分组边界, 以及随机切分
        for chunk_len in [1usize, 3, 5, 8, 13, 40] {
            let mut mac = mac_session(&key);
            for chunk in data.chunks(chunk_len) {
                mac.update(chunk).unwrap();
            }
            mac.finish().unwrap();
            assert_eq!(mac.tag().unwrap(), tag, "chunk length {chunk_len} diverged");
        }

        let mut mac = mac_session(&key);
        let mut rest = data.as_slice();
        while !rest.is_empty() {
            let l = rng.gen_range(0..=rest.len());
            mac.update(&rest[..l]).unwrap();
            rest = &rest[l..];
            mac.update(&[]).unwrap();
        }
        mac.finish().unwrap();
        assert_eq!(mac.tag().unwrap(), tag, "random splits diverged");
    }

    #[test]
    fn mac_verify_and_bit_flip() {
        let mut rng = thread_rng();
        let key: [u8; Xtea::KEY_SIZE] = rng.gen();
        let mut data = vec![0u8; 25];
        rng.fill(data.as_mut_slice());
        let tag = one_shot(&key, data.as_slice());

        let mut mac = mac_session(&key);
        mac.update(data.as_slice()).unwrap();
        mac.finish().unwrap();
        assert!(mac.verify(&tag).unwrap());

        for i in 0..data.len() {
            for bit in [0u8, 3, 7] {
                let mut tampered = data.clone();
                tampered[i] ^= 1 << bit;
                let mut mac = mac_session(&key);
                mac.update(tampered.as_slice()).unwrap();
                mac.finish().unwrap();
                assert!(
                    !mac.verify(&tag).unwrap(),
                    "flipping bit {bit} of byte {i} not detected"
                );
            }
        }
    }

    #[test]
    fn mac_protocol_misuse() {
        let key = [0u8; Xtea::KEY_SIZE];
        let mut mac = mac_session(&key);

        assert!(matches!(mac.tag(), Err(CipherError::MacNotFinished)));
        assert!(matches!(
            mac.verify(&[0u8; Xtea::BLOCK_SIZE]),
            Err(CipherError::MacNotFinished)
        ));

        mac.update(b"data").unwrap();
        mac.finish().unwrap();
        assert!(matches!(mac.update(b"more"), Err(CipherError::MacFinished)));
        assert!(matches!(mac.finish(), Err(CipherError::MacFinished)));

        // tag可以重复取出
        assert_eq!(mac.tag().unwrap(), mac.tag().unwrap());
    }

    #[test]
    fn mac_reset_starts_new_session() {
        let key = [0x77u8; Xtea::KEY_SIZE];
        let tag = one_shot(&key, b"hello world");

        let mut mac = mac_session(&key);
        mac.update(b"something else").unwrap();
        mac.finish().unwrap();
        mac.reset();
        mac.update(b"hello world").unwrap();
        mac.finish().unwrap();
        assert_eq!(mac.tag().unwrap(), tag);
    }

    #[test]
    fn mac_empty_messages_differ_by_key() {
        let a = one_shot(&[0u8; Xtea::KEY_SIZE], b"");
        let b = one_shot(&[1u8; Xtea::KEY_SIZE], b"");
        assert_ne!(a, b);
    }
}
