//! Movie dataset pipeline.
//!
//! Loads a gzip-compressed JSON array of movies once, then answers listing
//! requests by sorting on release date (most recent first, unparsable dates
//! last, stable) and keeping titles that contain a case-insensitive query.
//!
//! ```rust,no_run
//! use movies::{CachePolicy, DatasetSource, MoviePipeline, Telemetry};
//!
//! let source = DatasetSource::new("movies5000.json.gz", CachePolicy::Process);
//! let pipeline = MoviePipeline::new(source, Telemetry::disabled());
//! for movie in pipeline.run(Some("star"))? {
//!     println!("{:?} ({:?})", movie.title, movie.release_date);
//! }
//! # Ok::<(), movies::DatasetLoadError>(())
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod synthetic;
pub mod telemetry;

pub use config::{CachePolicy, DatasetConfig, SyntheticLoadConfig, TelemetryConfig};
pub use dataset::{Dataset, DatasetSource, load_dataset};
pub use error::{ConfigError, ConversionError, DatasetLoadError};
pub use pipeline::{MoviePipeline, effective_date, filter_by_title, sort_desc_release_date};
pub use record::Movie;
pub use synthetic::{SyntheticLoad, fibonacci};
pub use telemetry::{ServiceResource, Telemetry};

#[doc(hidden)]
pub use tracing as __tracing;
