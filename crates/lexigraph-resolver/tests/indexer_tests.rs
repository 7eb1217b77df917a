//! Index build behaviour: grouping across batches, markers, rebuilds.

mod common;

use common::{set, Fixture};
use lexigraph_core::Entry;
use lexigraph_resolver::{Indexer, IndexerConfig, Resolver, ResolverError};
use lexigraph_storage::{IndexKind, NodeSetIndex};

fn fixture() -> Fixture {
    Fixture::new()
        .label("dog", "<N1>")
        .label("dog", "<N2>")
        .label("dog", "<N3>")
        .label("house", "<N4>")
        .label("dog house", "<N5>")
        .label("cat", "<N6>")
}

#[test]
fn test_groups_never_split_across_batches() {
    for batch_size in [1, 2, 100_000] {
        let fixture = fixture();
        let reports = fixture.build_with(batch_size);
        let resolver = Resolver::open(fixture.db.clone()).unwrap();

        assert_eq!(
            resolver.resolve_lemma("dog").unwrap(),
            Some(set(&["<N1>", "<N2>", "<N3>"])),
            "batch_size={}",
            batch_size
        );
        assert_eq!(
            resolver.resolve_part("dog").unwrap(),
            Some(set(&["<N1>", "<N2>", "<N3>", "<N5>"])),
            "batch_size={}",
            batch_size
        );

        let label = &reports[0];
        assert_eq!(label.index, IndexKind::Label);
        assert_eq!(label.rows_read, 6);
        assert_eq!(label.records_written, 4);
        let expected_batches = (4 + batch_size as u64 - 1) / batch_size as u64;
        assert_eq!(label.batches_flushed, expected_batches);
    }
}

#[test]
fn test_part_report_counts() {
    let fixture = fixture();
    let reports = fixture.build_with(100);
    let part = &reports[1];
    assert_eq!(part.index, IndexKind::Part);
    // dog x3, house, dog+house, cat
    assert_eq!(part.rows_derived, 7);
    assert_eq!(part.rows_read, 7);
    // dog, house, cat
    assert_eq!(part.records_written, 3);
    assert!(part.to_string().contains("part index"));
}

#[test]
fn test_markers_set_after_build() {
    let fixture = fixture();
    assert_eq!(fixture.db.marker(IndexKind::Label.marker_key()).unwrap(), None);

    let indexer = Indexer::new(fixture.store.clone(), IndexerConfig::default()).unwrap();
    indexer.build_label_index().unwrap();
    assert_eq!(
        fixture.db.marker(IndexKind::Label.marker_key()).unwrap(),
        Some(4)
    );

    // Part index still missing
    let err = Resolver::open(fixture.db.clone()).unwrap_err();
    assert!(matches!(
        err,
        ResolverError::IndexNotBuilt {
            index: IndexKind::Part
        }
    ));

    indexer.build_part_index().unwrap();
    assert!(Resolver::open(fixture.db.clone()).is_ok());
}

#[test]
fn test_rebuild_is_idempotent_and_drops_stale_keys() {
    let fixture = fixture();
    fixture.build_with(2);

    let labels = NodeSetIndex::new(fixture.db.clone(), IndexKind::Label);
    labels.put("stale", &set(&["<Gone>"])).unwrap();
    fixture
        .store
        .insert_entry(&Entry::new("dog", "<N7>", "eng"))
        .unwrap();

    let reports = fixture.build_with(2);
    assert_eq!(reports[0].records_written, 4);
    assert_eq!(labels.get("stale").unwrap(), None);
    assert_eq!(
        labels.get("dog").unwrap(),
        Some(set(&["<N1>", "<N2>", "<N3>", "<N7>"]))
    );
    assert_eq!(labels.len().unwrap(), 4);
}

#[test]
fn test_empty_store_builds_empty_indexes() {
    let fixture = Fixture::new();
    let reports = fixture.build_with(10);
    assert!(reports.iter().all(|r| r.records_written == 0));
    assert!(reports.iter().all(|r| r.batches_flushed == 0));

    let resolver = Resolver::open(fixture.db.clone()).unwrap();
    assert_eq!(resolver.resolve_lemma("anything").unwrap(), None);
}

#[test]
fn test_zero_batch_size_rejected() {
    let fixture = Fixture::new();
    let result = Indexer::new(fixture.store.clone(), IndexerConfig { batch_size: 0 });
    assert!(matches!(result, Err(ResolverError::InvalidConfig(_))));
}
