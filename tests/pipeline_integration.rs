//! End-to-end pipeline behaviour over gzip fixtures.

mod common;

use common::{SCENARIO, dataset_file, titles};
use movies::{CachePolicy, DatasetSource, MoviePipeline, SyntheticLoad, SyntheticLoadConfig, Telemetry};

fn pipeline_for(contents: &str) -> (tempfile::TempDir, MoviePipeline) {
    let (dir, path) = dataset_file(contents);
    let pipeline = MoviePipeline::new(
        DatasetSource::new(path, CachePolicy::Process),
        Telemetry::disabled(),
    );
    (dir, pipeline)
}

fn some(names: &[&str]) -> Vec<Option<String>> {
    names.iter().map(|n| Some(n.to_string())).collect()
}

#[test]
fn scenario_without_query_orders_by_date() {
    let (_dir, pipeline) = pipeline_for(SCENARIO);
    let movies = pipeline.run(None).unwrap();

    assert_eq!(titles(&movies), some(&["Apple", "Zoo", "Banana"]));
    assert_eq!(movies[0].rating, Some(7.0));
    assert_eq!(movies[2].release_date.as_deref(), Some("not-a-date"));
}

#[test]
fn scenario_with_query_keeps_sort_order() {
    let (_dir, pipeline) = pipeline_for(SCENARIO);
    let movies = pipeline.run(Some("a")).unwrap();
    assert_eq!(titles(&movies), some(&["Apple", "Banana"]));
}

#[test]
fn missing_title_is_excluded_for_any_query() {
    let (_dir, pipeline) = pipeline_for(
        r#"[{"vote_average": 8.0, "release_date": "2023-03-03"}, {"title": "Fox"}]"#,
    );
    assert_eq!(titles(&pipeline.run(Some("x")).unwrap()), some(&["Fox"]));
    assert_eq!(pipeline.run(None).unwrap().len(), 2);
}

#[test]
fn undated_movies_follow_dated_ones_in_input_order() {
    let (_dir, pipeline) = pipeline_for(
        r#"[
            {"title": "u1"},
            {"title": "old", "release_date": "1950-01-01"},
            {"title": "u2", "release_date": "1999-13-01"},
            {"title": "new", "release_date": "2010-10-10"},
            {"title": "u3", "release_date": null}
        ]"#,
    );
    let movies = pipeline.run(None).unwrap();
    assert_eq!(titles(&movies), some(&["new", "old", "u1", "u2", "u3"]));
}

#[test]
fn synthetic_load_does_not_change_output() {
    let (_dir, path) = dataset_file(SCENARIO);
    let plain = MoviePipeline::new(
        DatasetSource::new(&path, CachePolicy::PerRequest),
        Telemetry::disabled(),
    );
    let loaded = MoviePipeline::new(
        DatasetSource::new(&path, CachePolicy::PerRequest),
        Telemetry::disabled(),
    )
    .with_synthetic_load(SyntheticLoad::from_config(&SyntheticLoadConfig {
        fibonacci: vec![15],
    }));

    assert_eq!(plain.run(Some("an")).unwrap(), loaded.run(Some("an")).unwrap());
}

#[test]
fn enabled_telemetry_does_not_change_output() {
    let (_dir, path) = dataset_file(SCENARIO);
    let quiet = MoviePipeline::new(
        DatasetSource::new(&path, CachePolicy::Process),
        Telemetry::disabled(),
    );
    let traced = MoviePipeline::new(
        DatasetSource::new(&path, CachePolicy::Process),
        Telemetry::default(),
    );
    assert_eq!(quiet.run(None).unwrap(), traced.run(None).unwrap());
}
