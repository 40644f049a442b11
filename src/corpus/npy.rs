use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use super::errors::CorpusError;

pub const RAW_SUFFIX: &str = ".npy";

const MAGIC: &[u8; 6] = b"\x93NUMPY";

#[derive(Debug)]
pub struct RawCategoryArray {
    category: String,
    rows: usize,
    row_len: usize,
    data: Vec<u8>,
}

impl RawCategoryArray {
    pub fn open<P: AsRef<Path>>(path: P, category: &str) -> Result<Self, CorpusError> {
        let f = File::open(path)?;
        let mut r = BufReader::new(f);

        let mut magic = [0u8; 6];
        r.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(bad(category, "not an npy file"));
        }

        let mut version = [0u8; 2];
        r.read_exact(&mut version)?;
        let header_len = match version[0] {
            1 => read_u16(&mut r)? as usize,
            2 => read_u32(&mut r)? as usize,
            _ => return Err(bad(category, "unsupported npy version")),
        };

        let mut header = vec![0u8; header_len];
        r.read_exact(&mut header)?;
        let header =
            std::str::from_utf8(&header).map_err(|_| bad(category, "header is not utf-8"))?;

        if !header.contains("'descr': '|u1'") {
            return Err(bad(category, "dtype is not u8"));
        }
        if !header.contains("'fortran_order': False") {
            return Err(bad(category, "fortran order is unsupported"));
        }
        let (rows, row_len) = match parse_shape(header) {
            Some(shape) => shape,
            None => return Err(bad(category, "shape is not a 2-d tuple")),
        };
        if row_len == 0 {
            return Err(bad(category, "rows are empty"));
        }

        let mut data = Vec::with_capacity(rows * row_len);
        r.read_to_end(&mut data)?;
        if data.len() != rows * row_len {
            return Err(bad(category, "payload length does not match shape"));
        }

        Ok(Self {
            category: category.to_owned(),
            rows,
            row_len,
            data,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn row_len(&self) -> usize {
        self.row_len
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn row(&self, index: usize) -> &[u8] {
        &self.data[index * self.row_len..(index + 1) * self.row_len]
    }
}

fn bad(category: &str, reason: &'static str) -> CorpusError {
    CorpusError::NpyFormat {
        category: category.to_owned(),
        reason,
    }
}

// header tail looks like: 'shape': (126000, 784), }
fn parse_shape(header: &str) -> Option<(usize, usize)> {
    let rest = header.split("'shape': (").nth(1)?;
    let tuple = rest.split(')').next()?;
    let mut dims = tuple
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty());
    let rows = dims.next()?.parse().ok()?;
    let row_len = dims.next()?.parse().ok()?;
    if dims.next().is_some() {
        return None;
    }
    Some((rows, row_len))
}

fn read_u16<R: Read>(r: &mut R) -> Result<u16, std::io::Error> {
    let mut buf = [0; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_u32<R: Read>(r: &mut R) -> Result<u32, std::io::Error> {
    let mut buf = [0; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

#[cfg(test)]
pub(crate) fn npy_bytes(rows: usize, row_len: usize) -> Vec<u8> {
    let header =
        format!("{{'descr': '|u1', 'fortran_order': False, 'shape': ({rows}, {row_len}), }}\n");
    let mut out = Vec::new();
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&[1, 0]);
    out.extend_from_slice(&(header.len() as u16).to_le_bytes());
    out.extend_from_slice(header.as_bytes());
    for row in 0..rows {
        out.extend(std::iter::repeat((row % 256) as u8).take(row_len));
    }
    out
}
