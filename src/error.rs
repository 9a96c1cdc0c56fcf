use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CipherError {
    /// 不合法分组大小
    #[error("Invalid block data size `{real}` not match to target size `{target}`")]
    InvalidBlockSize { target: usize, real: usize },

    /// 不合法的密钥长度
    #[error("Invalid key size `{real}` not match to target size `{target}`")]
    InvalidKeySize { target: usize, real: usize },

    /// MAC会话已结束, 不能再调用`update/finish`
    #[error("MAC session is finished, `update/finish` is no longer valid")]
    MacFinished,

    /// MAC会话未结束, 标签值还未固定
    #[error("MAC session is not finished, the tag is not fixed yet")]
    MacNotFinished,
}
