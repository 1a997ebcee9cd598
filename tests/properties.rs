//! Property tests: order preservation and staging cleanup.

use edntree::read::{parse_reader, parse_string_in};
use edntree::settings::Settings;
use edntree::value::{int, keyword, Value};
use proptest::prelude::*;

fn read(s: &str) -> Vec<Value> {
    parse_reader(s.as_bytes(), &Settings::default())
}

proptest! {
    #[test]
    fn top_level_forms_keep_order(ns in prop::collection::vec(any::<i64>(), 0..40)) {
        let src = ns.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
        let expected: Vec<Value> = ns.iter().map(|n| int(&n.to_string())).collect();
        prop_assert_eq!(read(&src), expected);
    }

    #[test]
    fn vector_items_keep_order(ns in prop::collection::vec(any::<u32>(), 0..40)) {
        let src = format!("[{}]", ns.iter().map(|n| n.to_string())
                          .collect::<Vec<_>>().join(", "));
        let expected = Value::Vector(ns.iter().map(|n| int(&n.to_string())).collect());
        prop_assert_eq!(read(&src), vec![expected]);
    }

    #[test]
    fn map_entries_keep_order(
        entries in prop::collection::vec(("[a-z][a-z0-9-]{0,8}", any::<i32>()), 0..20)
    ) {
        let src = format!("{{{}}}", entries.iter()
                          .map(|(k, v)| format!(":{} {}", k, v))
                          .collect::<Vec<_>>().join(" "));
        let expected = Value::Dictionary(
            entries.iter().map(|(k, v)| (keyword(k), int(&v.to_string()))).collect());
        prop_assert_eq!(read(&src), vec![expected]);
    }

    #[test]
    fn result_is_values_or_a_single_error(src in "\\PC{0,60}") {
        let v = read(&src);
        prop_assert!(!v.iter().any(|x| *x == Value::End));
        if v.iter().any(|x| x.is_sentinel()) {
            prop_assert_eq!(v.len(), 1);
        }
    }

    #[test]
    fn staging_file_is_always_removed(src in "\\PC{0,40}") {
        let dir = tempfile::tempdir().map_err(|e| TestCaseError::fail(e.to_string()))?;
        let via_file = parse_string_in(dir.path(), &src);
        prop_assert_eq!(via_file, read(&src));
        let left = std::fs::read_dir(dir.path())
            .map_err(|e| TestCaseError::fail(e.to_string()))?
            .count();
        prop_assert_eq!(left, 0);
    }
}
