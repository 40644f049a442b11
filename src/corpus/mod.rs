#[cfg(feature = "download")]
pub mod download;
pub mod errors;
pub mod npy;
pub mod pipeline;
pub mod rasterize;
pub mod split;
pub mod sync;

#[cfg(feature = "download")]
pub use download::{QuickDraw, QUICKDRAW_URL};
pub use errors::{CorpusError, FetchError, FetchErrorKind};
pub use npy::RawCategoryArray;
pub use pipeline::{ensure_dirs, CategoryStore, CorpusConfig, CorpusPipeline, RunReport};
pub use split::SplitBoundary;
