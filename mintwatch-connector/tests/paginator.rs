mod common;

use common::{history, sig, FakeLedger};
use mintwatch_connector::{config::PaginatorConfig, error::FetchError, workers::SignaturePaginator};
use solana_sdk::pubkey::Pubkey;
use std::{sync::Arc, time::Duration};

fn paginator(ledger: Arc<FakeLedger>, page_size: usize) -> SignaturePaginator<FakeLedger> {
    SignaturePaginator::new(
        ledger,
        PaginatorConfig {
            page_size,
            ..PaginatorConfig::default()
        },
    )
}

#[tokio::test(start_paused = true)]
async fn walks_history_backwards_until_an_empty_page() {
    let ledger = Arc::new(FakeLedger::with_history(history(5)));

    let signatures = paginator(ledger.clone(), 3)
        .paginate(&Pubkey::new_unique())
        .await
        .unwrap();

    assert_eq!(signatures, vec![sig(1), sig(2), sig(3), sig(4), sig(5)]);
    // [S1,S2,S3], [S4,S5], [] - each cursor is the oldest signature of the previous page.
    assert_eq!(ledger.page_calls(), vec![None, Some(sig(3)), Some(sig(5))]);
}

#[tokio::test(start_paused = true)]
async fn call_count_is_full_pages_plus_the_terminating_page() {
    for (len, page_size) in [(0u8, 10usize), (1, 10), (10, 10), (23, 10), (7, 2), (9, 1)] {
        let ledger = Arc::new(FakeLedger::with_history(history(len)));

        let signatures = paginator(ledger.clone(), page_size)
            .paginate(&Pubkey::new_unique())
            .await
            .unwrap();

        assert_eq!(signatures, history(len), "history {len}, page {page_size}");
        let expected_calls = (len as usize).div_ceil(page_size) + 1;
        assert_eq!(ledger.page_calls().len(), expected_calls, "history {len}, page {page_size}");
    }
}

#[tokio::test(start_paused = true)]
async fn empty_history_is_not_an_error() {
    let ledger = Arc::new(FakeLedger::with_history(Vec::new()));

    let signatures = paginator(ledger.clone(), 10)
        .paginate(&Pubkey::new_unique())
        .await
        .unwrap();

    assert!(signatures.is_empty());
    assert_eq!(ledger.page_calls(), vec![None]);
}

#[tokio::test(start_paused = true)]
async fn sleeps_the_throttle_after_each_non_empty_page() {
    let ledger = Arc::new(FakeLedger::with_history(history(5)));
    let start = tokio::time::Instant::now();

    paginator(ledger, 2)
        .paginate(&Pubkey::new_unique())
        .await
        .unwrap();

    // Three non-empty pages; the terminating empty page is not followed by a sleep.
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(1200), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(1600), "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn failed_page_aborts_and_carries_the_fetched_signatures() {
    let ledger = Arc::new(FakeLedger::with_history(history(9)).failing_page(2));

    let err = paginator(ledger.clone(), 3)
        .paginate(&Pubkey::new_unique())
        .await
        .unwrap_err();

    assert!(matches!(err.source, FetchError::Transport(_)));
    assert_eq!(err.fetched, history(6));
    assert_eq!(ledger.page_calls().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn first_page_failure_has_nothing_fetched() {
    let ledger = Arc::new(FakeLedger::with_history(history(4)).failing_page(0));

    let err = paginator(ledger, 3)
        .paginate(&Pubkey::new_unique())
        .await
        .unwrap_err();

    assert!(err.fetched.is_empty());
}

#[tokio::test(start_paused = true)]
async fn max_signatures_caps_the_walk() {
    let ledger = Arc::new(FakeLedger::with_history(history(20)));
    let paginator = SignaturePaginator::new(
        ledger.clone(),
        PaginatorConfig {
            page_size: 3,
            max_signatures: Some(7),
            ..PaginatorConfig::default()
        },
    );

    let signatures = paginator.paginate(&Pubkey::new_unique()).await.unwrap();

    assert_eq!(signatures, history(7));
    assert_eq!(ledger.page_calls().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn zero_max_signatures_sends_no_request() {
    let ledger = Arc::new(FakeLedger::with_history(history(4)));
    let paginator = SignaturePaginator::new(
        ledger.clone(),
        PaginatorConfig {
            max_signatures: Some(0),
            ..PaginatorConfig::default()
        },
    );

    let signatures = paginator.paginate(&Pubkey::new_unique()).await.unwrap();

    assert!(signatures.is_empty());
    assert!(ledger.page_calls().is_empty());
}
