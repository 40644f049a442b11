#[derive(Debug)]
pub enum CorpusError {
    IoError(std::io::Error),
    ImageError(image::ImageError),
    InvalidConfig(&'static str),
    NpyFormat {
        category: String,
        reason: &'static str,
    },
    ShapeMismatch {
        category: String,
        row: usize,
        expected: usize,
        actual: usize,
    },
    IndexOutOfRange {
        category: String,
        requested: usize,
        available: usize,
    },
}

impl std::fmt::Display for CorpusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:?}", self))
    }
}

impl std::error::Error for CorpusError {}

impl From<std::io::Error> for CorpusError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

impl From<image::ImageError> for CorpusError {
    fn from(e: image::ImageError) -> Self {
        Self::ImageError(e)
    }
}

#[derive(Debug)]
pub struct FetchError {
    pub category: String,
    pub kind: FetchErrorKind,
}

#[derive(Debug)]
pub enum FetchErrorKind {
    IoError(std::io::Error),
    #[cfg(feature = "download")]
    CurlError(curl::Error),
    HttpStatus(u32),
    Remote(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:?}", self))
    }
}

impl std::error::Error for FetchError {}

impl From<std::io::Error> for FetchErrorKind {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

#[cfg(feature = "download")]
impl From<curl::Error> for FetchErrorKind {
    fn from(e: curl::Error) -> Self {
        Self::CurlError(e)
    }
}
