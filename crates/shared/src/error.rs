use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid square key '{0}'")]
pub struct ParseSquareError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown piece symbol '{0}'")]
pub struct ParseRoleError(pub char);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFenError {
    #[error("placement has {0} ranks, expected 8")]
    RankCount(usize),
    #[error("rank {rank} overflows the board width")]
    RankOverflow { rank: u8 },
    #[error("rank {rank} covers only {files} files")]
    RankUnderflow { rank: u8, files: u8 },
    #[error("unexpected character '{0}' in placement")]
    UnexpectedChar(char),
}
