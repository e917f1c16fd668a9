use proptest::prelude::*;

use crate::helpers::fixture_tidemark;

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("runtime")
        .block_on(f)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn well_formed_input_always_resolves(
        symbol in prop_oneof![
            Just("^GSPC".to_string()),
            Just("^AXKO".to_string()),
            Just("^AXSO".to_string()),
            "[A-Z]{1,6}",
        ],
        max_hours in 1u32..=168,
    ) {
        let tm = fixture_tidemark();
        let res = block_on(tm.resolve(&symbol, max_hours)).unwrap();
        prop_assert!(!res.is_empty());
        prop_assert!(res.series.iter().all(|p| p.close.is_some()));
        prop_assert_eq!(res.warnings.is_empty(), res.source_kind == tidemark::SourceKind::Primary);
        prop_assert_eq!(res.synthetic.is_some(), !res.is_real());
        prop_assert!(!res.attempts.is_empty());
    }
}
