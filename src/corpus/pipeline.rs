use std::{
    fs::{self, File},
    io::{BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use super::errors::{CorpusError, FetchError, FetchErrorKind};
use super::npy::{RawCategoryArray, RAW_SUFFIX};
use super::rasterize;
use super::split::SplitBoundary;
use super::sync;

pub trait CategoryStore {
    fn fetch(&self, category: &str) -> Result<Vec<u8>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct CorpusConfig {
    pub data_root: PathBuf,
    pub training_root: PathBuf,
    pub testing_root: PathBuf,
    pub split: SplitBoundary,
    pub extension: String,
    pub img_width: u32,
    pub img_height: u32,
}

impl CorpusConfig {
    fn validate(&self) -> Result<(), CorpusError> {
        if self.img_width == 0 || self.img_height == 0 {
            return Err(CorpusError::InvalidConfig(
                "image dimensions must be non-zero",
            ));
        }
        if self.extension.is_empty() {
            return Err(CorpusError::InvalidConfig("file extension is empty"));
        }
        Ok(())
    }

    pub fn npy_path(&self, category: &str) -> PathBuf {
        self.data_root.join(format!("{category}{RAW_SUFFIX}"))
    }
}

pub fn ensure_dirs<P: AsRef<Path>>(paths: &[P]) -> Result<(), std::io::Error> {
    for path in paths {
        let path = path.as_ref();
        match fs::create_dir(path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub stale_removed: usize,
    pub out_of_range_removed: usize,
    pub fetched: usize,
    pub written: usize,
    pub fetch_failures: Vec<FetchError>,
}

impl RunReport {
    pub fn is_noop(&self) -> bool {
        self.stale_removed == 0
            && self.out_of_range_removed == 0
            && self.fetched == 0
            && self.written == 0
            && self.fetch_failures.is_empty()
    }
}

#[derive(Debug)]
pub struct CorpusPipeline {
    config: CorpusConfig,
    timings: bool,
}

impl CorpusPipeline {
    pub fn new(config: CorpusConfig) -> Result<Self, CorpusError> {
        config.validate()?;
        ensure_dirs(&[
            &config.data_root,
            &config.training_root,
            &config.testing_root,
        ])?;
        Ok(Self {
            config,
            timings: false,
        })
    }

    pub fn with_timings(mut self, timings: bool) -> Self {
        self.timings = timings;
        self
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    pub fn run(
        &self,
        store: &dyn CategoryStore,
        categories: &[String],
    ) -> Result<RunReport, CorpusError> {
        let stale_removed =
            self.timed("prune_categories", || self.prune_categories(categories))?;
        let out_of_range_removed =
            self.timed("prune_out_of_range", || self.prune_out_of_range(categories))?;
        let (fetched, fetch_failures) =
            self.timed("fetch_missing", || self.fetch_missing(store, categories));
        let written = self.timed("materialize", || self.materialize(categories))?;
        Ok(RunReport {
            stale_removed,
            out_of_range_removed,
            fetched,
            written,
            fetch_failures,
        })
    }

    pub fn prune_categories(&self, categories: &[String]) -> Result<usize, CorpusError> {
        sync::prune_categories(
            &self.config.data_root,
            &self.config.training_root,
            &self.config.testing_root,
            categories,
        )
    }

    pub fn prune_out_of_range(&self, categories: &[String]) -> Result<usize, CorpusError> {
        sync::prune_out_of_range(
            &self.config.training_root,
            &self.config.testing_root,
            categories,
            self.config.split,
        )
    }

    pub fn fetch_missing(
        &self,
        store: &dyn CategoryStore,
        categories: &[String],
    ) -> (usize, Vec<FetchError>) {
        let mut fetched = 0;
        let mut failures = Vec::new();
        for category in categories {
            let dest = self.config.npy_path(category);
            if dest.exists() {
                continue;
            }
            match store.fetch(category).and_then(|bytes| {
                persist(&dest, &bytes).map_err(|e| FetchError {
                    category: category.clone(),
                    kind: FetchErrorKind::IoError(e),
                })
            }) {
                Ok(()) => {
                    println!("Download complete: {}", dest.display());
                    fetched += 1;
                }
                Err(e) => failures.push(e),
            }
        }
        (fetched, failures)
    }

    pub fn materialize(&self, categories: &[String]) -> Result<usize, CorpusError> {
        let config = &self.config;
        let mut written = 0;
        for category in categories {
            let npy = config.npy_path(category);
            if !npy.exists() {
                // missing raw files were reported by the fetch stage
                continue;
            }
            let raw = RawCategoryArray::open(&npy, category)?;

            let training_dir = config.training_root.join(category);
            let testing_dir = config.testing_root.join(category);
            ensure_dirs(&[&training_dir, &testing_dir])?;

            let training = config.split.training_range();
            let testing = config.split.testing_range();
            written += rasterize::materialize(
                &raw,
                &training_dir,
                training.start,
                training.end,
                config.img_width,
                config.img_height,
                &config.extension,
            )?;
            written += rasterize::materialize(
                &raw,
                &testing_dir,
                testing.start,
                testing.end,
                config.img_width,
                config.img_height,
                &config.extension,
            )?;
        }
        Ok(written)
    }

    fn timed<T>(&self, label: &str, f: impl FnOnce() -> T) -> T {
        if !self.timings {
            return f();
        }
        let start = Instant::now();
        let out = f();
        println!("{label} took {:?}", start.elapsed());
        out
    }
}

fn persist(path: &Path, bytes: &[u8]) -> Result<(), std::io::Error> {
    let tmp = path.with_extension("part");
    {
        let mut w = BufWriter::new(File::create(&tmp)?);
        w.write_all(bytes)?;
        w.flush()?;
    }
    fs::rename(&tmp, path)
}
