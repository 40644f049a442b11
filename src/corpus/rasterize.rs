use std::path::Path;

use super::errors::CorpusError;
use super::npy::RawCategoryArray;

pub fn materialize(
    raw: &RawCategoryArray,
    dir: &Path,
    start: usize,
    stop: usize,
    width: u32,
    height: u32,
    extension: &str,
) -> Result<usize, CorpusError> {
    if stop > raw.len() {
        return Err(CorpusError::IndexOutOfRange {
            category: raw.category().to_owned(),
            requested: stop,
            available: raw.len(),
        });
    }

    let expected = width as usize * height as usize;
    let mut saved = 0;
    for idx in start..stop {
        let path = dir.join(format!("{}.{extension}", idx + 1));
        if path.exists() {
            continue;
        }

        let row = raw.row(idx);
        if row.len() != expected {
            return Err(CorpusError::ShapeMismatch {
                category: raw.category().to_owned(),
                row: idx,
                expected,
                actual: row.len(),
            });
        }
        image::save_buffer(&path, row, width, height, image::ColorType::L8)?;
        saved += 1;
    }

    println!("Saved {saved} images to {}", dir.display());
    Ok(saved)
}
