use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TicTacToeError {
    #[error("cell ({row}, {col}) is not available for marking")]
    IllegalMove { row: usize, col: usize },

    #[error("no legal moves available")]
    NoLegalMoves,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("invalid character '{character}' at cell {index}")]
    InvalidCharacter { character: char, index: usize },

    #[error("expected 9 cells, got {got}")]
    WrongCellCount { got: usize },
}
