#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Md5Error {
    #[error("hasher has already been finalized")]
    Finalized,
    #[error("hasher has not been finalized")]
    NotFinalized,
    #[error("message length exceeds 2^64 - 1 bits")]
    LengthOverflow,
    #[error("invalid hex digest: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
