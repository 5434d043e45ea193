//! Concurrency and thread safety tests for the dataset cache and pipeline

mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use common::{SCENARIO, dataset_file, titles};
use movies::{CachePolicy, DatasetSource, MoviePipeline, Telemetry};

#[test]
fn concurrent_first_access_shares_one_dataset() {
    let (_dir, path) = dataset_file(SCENARIO);
    let source = Arc::new(DatasetSource::new(path, CachePolicy::Process));
    let barrier = Arc::new(Barrier::new(16));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let source = Arc::clone(&source);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                source
                    .get(&Telemetry::disabled())
                    .expect("dataset should load")
            })
        })
        .collect();

    let datasets: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // Every caller observes the very same allocation: exactly one load won.
    let first = &datasets[0];
    for (i, dataset) in datasets.iter().enumerate().skip(1) {
        assert!(Arc::ptr_eq(first, dataset), "Thread {i} saw a different dataset");
    }
}

#[test]
fn concurrent_pipeline_runs_agree() {
    let (_dir, path) = dataset_file(SCENARIO);
    let pipeline = Arc::new(MoviePipeline::new(
        DatasetSource::new(path, CachePolicy::Process),
        Telemetry::default(),
    ));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let pipeline = Arc::clone(&pipeline);
            thread::spawn(move || {
                let query = if i % 2 == 0 { None } else { Some("a") };
                (i, pipeline.run(query).expect("pipeline should succeed"))
            })
        })
        .collect();

    for handle in handles {
        let (i, movies) = handle.join().unwrap();
        let expected: Vec<Option<String>> = if i % 2 == 0 {
            vec![Some("Apple".into()), Some("Zoo".into()), Some("Banana".into())]
        } else {
            vec![Some("Apple".into()), Some("Banana".into())]
        };
        assert_eq!(titles(&movies), expected, "Thread {i} produced a different listing");
    }
}
