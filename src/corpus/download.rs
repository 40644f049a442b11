use curl::easy::Easy;

use super::errors::{FetchError, FetchErrorKind};
use super::pipeline::CategoryStore;

pub const QUICKDRAW_URL: &str =
    "https://storage.googleapis.com/quickdraw_dataset/full/numpy_bitmap";

pub struct QuickDraw {
    base_url: String,
}

impl QuickDraw {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for QuickDraw {
    fn default() -> Self {
        Self::new(QUICKDRAW_URL)
    }
}

impl CategoryStore for QuickDraw {
    fn fetch(&self, category: &str) -> Result<Vec<u8>, FetchError> {
        let url = format!("{}/{category}.npy", self.base_url);
        download(&url).map_err(|kind| FetchError {
            category: category.to_owned(),
            kind,
        })
    }
}

fn download(url: &str) -> Result<Vec<u8>, FetchErrorKind> {
    let mut bytes = Vec::new();
    let mut easy = Easy::new();
    easy.url(url)?;
    easy.progress(true)?;
    easy.follow_location(true)?;

    println!("Downloading {url}");
    {
        let mut dl = easy.transfer();
        let pb = indicatif::ProgressBar::new(1);
        dl.progress_function(move |total_dl, cur_dl, _, _| {
            pb.set_length(total_dl as u64);
            pb.set_position(cur_dl as u64);
            true
        })?;
        dl.write_function(|data| {
            bytes.extend_from_slice(data);
            Ok(data.len())
        })?;
        dl.perform()?;
    }

    let status = easy.response_code()?;
    if status != 200 {
        return Err(FetchErrorKind::HttpStatus(status));
    }
    Ok(bytes)
}
