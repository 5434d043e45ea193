//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

pub const SCENARIO: &str = r#"[
    {"title": "Zoo", "vote_average": 5.0, "release_date": "2020-01-01"},
    {"title": "Apple", "vote_average": 7.0, "release_date": "2021-06-15"},
    {"title": "Banana", "vote_average": 3.0, "release_date": "not-a-date"}
]"#;

/// A single complete gzip member holding `contents`.
pub fn gzip_member(contents: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(contents).unwrap();
    encoder.finish().unwrap()
}

pub fn write_gz(path: &Path, contents: &[u8]) {
    let mut encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    encoder.write_all(contents).unwrap();
    encoder.finish().unwrap();
}

/// Gzip `contents` into a fresh temp dir; keep the dir alive while using the path.
pub fn dataset_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("movies.json.gz");
    write_gz(&path, contents.as_bytes());
    (dir, path)
}

pub fn titles<'a, I>(movies: I) -> Vec<Option<String>>
where
    I: IntoIterator<Item = &'a movies::Movie>,
{
    movies.into_iter().map(|m| m.title.clone()).collect()
}
