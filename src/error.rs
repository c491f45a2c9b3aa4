use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("leaderboard CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("config error: {0}")]
    Config(#[from] ron::de::Error),

    #[error("could not load font {path}")]
    Font { path: String },
}

pub type Result<T> = std::result::Result<T, Error>;
