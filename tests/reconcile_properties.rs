use std::collections::BTreeMap;

use chrono::{Local, TimeZone};
use proptest::prelude::*;

use dirpatch::format::patch_lines;
use dirpatch::reconcile::reconcile;
use dirpatch::{FileRecord, Operation, ScanResult};

/// Small pools keep collisions between the two sides likely.
fn tree() -> impl Strategy<Value = BTreeMap<String, (u8, u8, i64)>> {
    prop::collection::btree_map(
        "[a-c]{1,2}(/[a-c]{1,2})?",
        (0u8..3, 0u8..3, 0i64..4_000),
        0..12,
    )
}

fn scan(root: &str, entries: &BTreeMap<String, (u8, u8, i64)>) -> ScanResult {
    ScanResult::with_records(
        root,
        entries.iter().map(|(path, (checksum, size, millis))| FileRecord {
            path: path.clone(),
            checksum: format!("h{checksum}"),
            size: *size as u64,
            modified_at: Local
                .timestamp_millis_opt(1_700_000_000_000 + millis)
                .single()
                .unwrap(),
        }),
    )
}

proptest! {
    #[test]
    fn swapping_inputs_swaps_patches(a in tree(), b in tree()) {
        let (scan_a, scan_b) = (scan("a", &a), scan("b", &b));
        let forward = reconcile(&scan_a, &scan_b);
        let backward = reconcile(&scan_b, &scan_a);
        prop_assert_eq!(&forward.side_a, &backward.side_b);
        prop_assert_eq!(&forward.side_b, &backward.side_a);
    }

    #[test]
    fn reconcile_is_idempotent(a in tree(), b in tree()) {
        let (scan_a, scan_b) = (scan("a", &a), scan("b", &b));
        prop_assert_eq!(reconcile(&scan_a, &scan_b), reconcile(&scan_a, &scan_b));
    }

    #[test]
    fn every_path_is_classified_once(a in tree(), b in tree()) {
        let (scan_a, scan_b) = (scan("a", &a), scan("b", &b));
        let result = reconcile(&scan_a, &scan_b);

        for path in a.keys().chain(b.keys()) {
            let in_a = scan_a.get(path);
            let in_b = scan_b.get(path);
            let (op_a, op_b) = (result.side_a.operation_for(path), result.side_b.operation_for(path));

            match (in_a, in_b) {
                (Some(ra), Some(rb)) => {
                    let expected = if ra.content_equal(rb) {
                        Operation::Unchanged
                    } else {
                        Operation::Conflict
                    };
                    prop_assert_eq!(op_a, Some(expected));
                    prop_assert_eq!(op_b, Some(expected));
                }
                (None, Some(_)) => {
                    prop_assert_eq!(op_a, Some(Operation::Addition));
                    prop_assert_eq!(op_b, None);
                }
                (Some(_), None) => {
                    prop_assert_eq!(op_a, None);
                    prop_assert_eq!(op_b, Some(Operation::Addition));
                }
                (None, None) => unreachable!(),
            }

            let counted = Operation::ALL
                .into_iter()
                .map(|op| result.side_a.records(op).iter().filter(|r| &r.path == path).count())
                .sum::<usize>();
            prop_assert!(counted <= 1);
        }
    }

    #[test]
    fn records_describe_the_other_side(a in tree(), b in tree()) {
        let (scan_a, scan_b) = (scan("a", &a), scan("b", &b));
        let result = reconcile(&scan_a, &scan_b);

        for op in Operation::ALL {
            for record in result.side_a.records(op) {
                prop_assert_eq!(Some(record), scan_b.get(&record.path));
            }
            for record in result.side_b.records(op) {
                prop_assert_eq!(Some(record), scan_a.get(&record.path));
            }
        }
    }

    #[test]
    fn formatted_lines_are_ordered(a in tree(), b in tree(), suppress in any::<bool>()) {
        let result = reconcile(&scan("a", &a), &scan("b", &b));

        for patch in [&result.side_a, &result.side_b] {
            let lines = patch_lines(patch, suppress);
            prop_assert!(lines.windows(2).all(|w| w[0].record.path <= w[1].record.path));
            if suppress {
                prop_assert!(lines.iter().all(|l| l.operation != Operation::Unchanged));
            }
        }
    }
}
