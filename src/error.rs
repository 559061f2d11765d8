use thiserror::Error;

/// Things that can go wrong when talking to a map. Looking up a key that
/// isn't there is not one of them; that's just `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// An argument was rejected before the map was touched: an absent key
    /// handed to one of the checked entry points, or nonsense construction
    /// options.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

pub type Result<T> = std::result::Result<T, MapError>;
