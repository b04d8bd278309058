use std::{io::BufReader, path::Path};

use utf8_chars::BufReadCharsExt;

use super::error::Error;

/// Reads a whole input file as UTF-8, one character at a time.
pub fn load_source(path: &Path) -> Result<String, Error> {
    let file = std::fs::File::open(path)?;

    let file_size = file.metadata()?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut reader = BufReader::new(file);

    for ch in reader.chars() {
        src.push(ch?);
    }

    Ok(src)
}

/// Equations of a file, one per non-blank line; `#` starts a comment.
pub fn source_lines(src: &str) -> Vec<&str> {
    src.lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .collect()
}
