use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum LightsOutError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must be rectangular with between 1 and 255 rows and columns")]
    InvalidBoardShape,
    #[error("Unexpected character {0:?} in board text, expected 'O' or '.'")]
    InvalidCharacter(char),
    #[error("Board already won, no new moves are accepted")]
    AlreadyWon,
}

pub type Result<T> = core::result::Result<T, LightsOutError>;
