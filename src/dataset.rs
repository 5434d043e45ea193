//! Dataset loading and the process-lifetime dataset cache.

use std::fs::File;
use std::io::{BufReader, Read};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use flate2::read::MultiGzDecoder;
use once_cell::sync::OnceCell;
use serde_json::Value;

use crate::config::{CachePolicy, DatasetConfig};
use crate::error::DatasetLoadError;
use crate::record::{Movie, json_kind};
use crate::telemetry::Telemetry;

/// Ordered, read-only collection of movies in source-document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    movies: Vec<Movie>,
}

impl Dataset {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }
}

impl Deref for Dataset {
    type Target = [Movie];

    fn deref(&self) -> &[Movie] {
        &self.movies
    }
}

impl From<Vec<Movie>> for Dataset {
    fn from(movies: Vec<Movie>) -> Self {
        Self::new(movies)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Movie;
    type IntoIter = std::slice::Iter<'a, Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.iter()
    }
}

/// Read a gzip-compressed JSON array of objects into a [`Dataset`].
///
/// Every gzip member in the file is decoded and concatenated; bytes after the
/// last member that do not form another member are a decompression error.
/// Array order is preserved. The first malformed element aborts the load.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, DatasetLoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut json = Vec::new();
    MultiGzDecoder::new(BufReader::new(file))
        .read_to_end(&mut json)
        .map_err(|source| DatasetLoadError::Decompress {
            path: path.to_path_buf(),
            source,
        })?;

    let document: Value =
        serde_json::from_slice(&json).map_err(|source| DatasetLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let entries = match document {
        Value::Array(entries) => entries,
        other => {
            return Err(DatasetLoadError::NotAnArray {
                path: path.to_path_buf(),
                found: json_kind(&other),
            });
        }
    };

    let movies = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let raw = entry
                .as_object()
                .ok_or_else(|| DatasetLoadError::NotAnObject {
                    path: path.to_path_buf(),
                    index,
                    found: json_kind(entry),
                })?;
            Movie::from_raw(raw).map_err(|source| DatasetLoadError::Conversion {
                path: path.to_path_buf(),
                index,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset::new(movies))
}

/// Where the pipeline obtains its dataset from.
///
/// With [`CachePolicy::Process`] the first successful load is shared for the
/// rest of the process; concurrent first callers wait on the same load. A
/// failed load is not remembered, so a later call retries.
#[derive(Debug)]
pub struct DatasetSource {
    path: PathBuf,
    policy: CachePolicy,
    cached: OnceCell<Arc<Dataset>>,
}

impl DatasetSource {
    pub fn new(path: impl Into<PathBuf>, policy: CachePolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            cached: OnceCell::new(),
        }
    }

    /// Source for `config`, with relative paths resolved next to the executable.
    pub fn from_config(config: &DatasetConfig) -> Self {
        Self::new(config.resolved_path(), config.cache)
    }

    /// Source over an already materialized dataset.
    pub fn preloaded(dataset: Dataset) -> Self {
        Self {
            path: PathBuf::new(),
            policy: CachePolicy::Process,
            cached: OnceCell::with_value(Arc::new(dataset)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.get().is_some()
    }

    /// Return the dataset, loading it if the policy requires.
    pub fn get(&self, telemetry: &Telemetry) -> Result<Arc<Dataset>, DatasetLoadError> {
        match self.policy {
            CachePolicy::Process => self
                .cached
                .get_or_try_init(|| self.load(telemetry).map(Arc::new))
                .cloned(),
            CachePolicy::PerRequest => self.load(telemetry).map(Arc::new),
        }
    }

    fn load(&self, telemetry: &Telemetry) -> Result<Dataset, DatasetLoadError> {
        let _span = crate::operation_span!(telemetry, "load_movies").entered();
        let dataset = load_dataset(&self.path)?;
        tracing::info!(
            path = %self.path.display(),
            movies = dataset.len(),
            "Loaded movie dataset"
        );
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn gz_file(contents: &str) -> NamedTempFile {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(contents.as_bytes()).unwrap();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&encoder.finish().unwrap()).unwrap();
        file
    }

    #[test]
    fn loads_entries_in_order() {
        let file = gz_file(
            r#"[{"title":"B","vote_average":1.0},{"title":"A"},{"release_date":"2001-01-01"}]"#,
        );
        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset[0].title.as_deref(), Some("B"));
        assert_eq!(dataset[1].title.as_deref(), Some("A"));
        assert_eq!(dataset[2].title, None);
    }

    #[test]
    fn empty_array_is_empty_dataset() {
        let file = gz_file("[]");
        assert!(load_dataset(file.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(dir.path().join("nope.json.gz")).unwrap_err();
        assert!(matches!(err, DatasetLoadError::Open { .. }));
    }

    #[test]
    fn plain_json_is_decompress_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"[{"title":"x"}]"#).unwrap();
        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(err, DatasetLoadError::Decompress { .. }));
    }

    #[test]
    fn object_document_is_not_an_array() {
        let file = gz_file(r#"{"title":"x"}"#);
        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(
            err,
            DatasetLoadError::NotAnArray {
                found: "object",
                ..
            }
        ));
    }

    #[test]
    fn conversion_failure_reports_index() {
        let file = gz_file(r#"[{"title":"ok"},{"vote_average":"n/a"}]"#);
        let err = load_dataset(file.path()).unwrap_err();
        match err {
            DatasetLoadError::Conversion { index, source, .. } => {
                assert_eq!(index, 1);
                assert_eq!(source.field, "vote_average");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn process_policy_loads_once() {
        let file = gz_file(r#"[{"title":"Once"}]"#);
        let source = DatasetSource::new(file.path(), CachePolicy::Process);
        let telemetry = Telemetry::disabled();

        assert!(!source.is_loaded());
        let first = source.get(&telemetry).unwrap();
        let second = source.get(&telemetry).unwrap();
        assert!(source.is_loaded());
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn per_request_policy_reloads() {
        let file = gz_file(r#"[{"title":"Again"}]"#);
        let source = DatasetSource::new(file.path(), CachePolicy::PerRequest);
        let telemetry = Telemetry::disabled();

        let first = source.get(&telemetry).unwrap();
        let second = source.get(&telemetry).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
        assert!(!source.is_loaded());
    }

    #[test]
    fn failed_load_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.json.gz");
        let source = DatasetSource::new(&path, CachePolicy::Process);
        let telemetry = Telemetry::disabled();

        assert!(source.get(&telemetry).is_err());

        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(br#"[{"title":"Late"}]"#).unwrap();
        encoder.finish().unwrap();

        let dataset = source.get(&telemetry).unwrap();
        assert_eq!(dataset[0].title.as_deref(), Some("Late"));
    }

    #[test]
    fn preloaded_source_never_touches_disk() {
        let source = DatasetSource::preloaded(Dataset::new(vec![Movie::default()]));
        assert!(source.is_loaded());
        assert_eq!(source.get(&Telemetry::disabled()).unwrap().len(), 1);
    }
}
