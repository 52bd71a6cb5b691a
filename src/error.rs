use crate::board::Position;

/// Errors from move application and the turn controller.
///
/// Both variants are recoverable: the game state is left exactly as it was,
/// and the caller re-prompts. A player with no legal moves is not an error at
/// all; selectors report it as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("illegal move at row {}, col {}", .0.row, .0.col)]
    IllegalMove(Position),

    #[error("game is already over")]
    GameOver,
}

/// Errors from decoding a completed-game history record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("record too short: expected at least {expected} bytes, got {got}")]
    TooShort { expected: usize, got: usize },

    #[error("invalid record magic (expected ORVH)")]
    BadMagic,

    #[error("unsupported record version: expected {expected}, got {got}")]
    UnsupportedVersion { expected: u32, got: u32 },

    #[error("CRC32 mismatch: expected {expected:#010x}, got {got:#010x}")]
    CrcMismatch { expected: u32, got: u32 },

    #[error("unexpected end of record while reading {0}")]
    Truncated(&'static str),

    #[error("record field {0} is not valid UTF-8")]
    InvalidUtf8(&'static str),

    #[error("invalid winner tag: {0}")]
    InvalidWinner(u8),

    #[error("record payload has trailing bytes")]
    TrailingBytes,
}
