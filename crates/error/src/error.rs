pub type Result<T> = std::result::Result<T, Error>;
impl<T> From<Error> for Result<T> {
    fn from(e: Error) -> Self {
        Err(e)
    }
}

/// Every condition that aborts a simulation run. Segmentation and protection violations are
/// simulated outcomes and never show up here.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Malformed input data, e.g. an unparseable trace or random-number file.
    InvalidData(String),
    /// Well-formed but invalid input, e.g. a reference issued with no current process.
    InvalidInput(String),
    /// Invalid simulation parameters, such as an unknown policy or an empty frame pool.
    Config(String),
    /// The random-number source ran out after the given number of draws.
    RandomExhausted(usize),
    /// An IO error has occurred.
    IO(String),
}

impl std::error::Error for Error {}
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::RandomExhausted(draws) => {
                write!(f, "Random numbers exhausted after {} draws", draws)
            }
            Error::IO(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl serde::de::Error for Error {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Error::InvalidData(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IO(e.to_string())
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(e: std::num::ParseIntError) -> Self {
        Error::InvalidData(e.to_string())
    }
}
