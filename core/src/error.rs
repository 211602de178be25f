use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Too few mines")]
    TooFewMines,
    #[error("Too few columns")]
    TooFewColumns,
    #[error("Too few rows")]
    TooFewRows,
    #[error("Too many rows")]
    TooManyRows,
    #[error("Too many columns")]
    TooManyColumns,
    #[error("Board generation needs at least one attempt")]
    ZeroAttempts,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Malformed board picture")]
    InvalidPicture,
    #[error("Could not generate a solvable board in {attempts} attempts")]
    NoSolvableBoard { attempts: u32 },
}

pub type Result<T> = core::result::Result<T, GameError>;
