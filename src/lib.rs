mod error;
pub use error::CipherError;

pub mod block_cipher;
pub use block_cipher::{BlockCipher, BlockDecrypt, BlockEncrypt, Xtea};

pub mod cipher_mode;
pub use cipher_mode::{Cfb, Ecb, Ofb, XteaCfb, XteaEcb, XteaOfb};

pub mod mac;
pub use mac::{derive_key_pair, CfbMac, XteaCfbMac};

mod session;
pub use session::{RoundConfig, XteaCipher};
