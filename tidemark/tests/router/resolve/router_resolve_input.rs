use crate::helpers::{GSPC, fixture_tidemark};
use tidemark::{SourceKind, TidemarkError};

#[tokio::test]
async fn percent_encoded_symbol_is_decoded() {
    let tm = fixture_tidemark();
    let res = tm.resolve("%5EGSPC", 24).await.unwrap();
    assert_eq!(res.requested_symbol, GSPC);
    assert_eq!(res.source_kind, SourceKind::Primary);

    let res = tm.resolve("  ^GSPC ", 24).await.unwrap();
    assert_eq!(res.requested_symbol, GSPC);
}

#[tokio::test]
async fn blank_symbol_is_rejected() {
    let tm = fixture_tidemark();
    for input in ["", "   ", "%20%20"] {
        let err = tm.resolve(input, 24).await.unwrap_err();
        assert!(matches!(err, TidemarkError::InvalidArg(_)), "{input:?}: {err:?}");
    }
}

#[tokio::test]
async fn zero_window_is_rejected() {
    let tm = fixture_tidemark();
    let err = tm.resolve(GSPC, 0).await.unwrap_err();
    assert!(matches!(err, TidemarkError::InvalidArg(_)));
}

#[tokio::test]
async fn narrow_window_still_returns_recent_rows() {
    let tm = fixture_tidemark();
    // One hour keeps all fifteen one-minute fixtures.
    let res = tm.resolve(GSPC, 1).await.unwrap();
    assert_eq!(res.len(), 15);
}

#[tokio::test]
async fn widest_window_keeps_all_rows() {
    let tm = fixture_tidemark();
    let res = tm.resolve(GSPC, u32::MAX).await.unwrap();
    assert_eq!(res.source_kind, SourceKind::Primary);
    assert_eq!(res.len(), 15);
}
