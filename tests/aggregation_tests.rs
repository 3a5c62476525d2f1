mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tokio_test::{assert_err, assert_ok};

use common::StubCatalog;
use streamflix::{
    error::FailureKind,
    models::MediaType,
    services::{
        catalog::MovieList, CategorySet, Endpoint, FixedRandom, ListAggregator, PageController,
        PageState, SeededRandom,
    },
};

const HOME_SLUGS: [&str; 5] = ["originals", "trending", "topRated", "action", "comedy"];

fn aggregator(stub: StubCatalog, pick: usize) -> ListAggregator {
    ListAggregator::new(Arc::new(stub), Arc::new(FixedRandom(pick)), "originals")
}

#[tokio::test]
async fn test_lists_keep_declaration_order_whatever_the_completion_order() {
    let delay_orders: [[u64; 5]; 6] = [
        [0, 0, 0, 0, 0],
        [40, 30, 20, 10, 0],
        [0, 10, 20, 30, 40],
        [20, 0, 40, 10, 30],
        [30, 40, 0, 20, 10],
        [10, 30, 40, 0, 20],
    ];

    for delays in delay_orders {
        let stub = StubCatalog::home(3, &delays);
        let lists = assert_ok!(aggregator(stub, 0).load_lists(&CategorySet::home()).await);

        let slugs: Vec<&str> = lists.iter().map(|l| l.slug.as_str()).collect();
        assert_eq!(slugs, HOME_SLUGS, "delays {:?}", delays);

        for (index, list) in lists.iter().enumerate() {
            let ids: Vec<u64> = list.items.iter().map(|i| i.id).collect();
            let base = index as u64 * 100;
            assert_eq!(ids, vec![base + 1, base + 2, base + 3], "delays {:?}", delays);
        }
    }
}

#[tokio::test]
async fn test_one_failing_category_fails_the_whole_load() {
    let categories = CategorySet::home();
    let comedy = categories.get("comedy").unwrap().endpoint.clone();

    let mut stub = StubCatalog::new();
    for category in categories.iter().filter(|c| c.slug != "comedy") {
        stub = stub.list_after(
            category.endpoint.clone(),
            vec![common::item(1, category.endpoint.media_type())],
            Duration::from_millis(150),
        );
    }
    let stub = stub.failing_list(comedy, FailureKind::Network, Duration::from_millis(5));
    let completed = stub.completed_lists();

    let result = aggregator(stub, 0).load_home(&categories).await;
    let err = assert_err!(result);
    assert_eq!(err.kind(), FailureKind::Network);

    // Outstanding requests were abandoned rather than awaited
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(completed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_load_never_exposes_partial_lists() {
    let categories = CategorySet::home();
    // Every other category has already arrived when the last one fails
    let mut stub = StubCatalog::new().failing_list(
        categories.get("originals").unwrap().endpoint.clone(),
        FailureKind::Auth,
        Duration::from_millis(30),
    );
    for category in categories.iter().skip(1) {
        stub = stub.list(
            category.endpoint.clone(),
            vec![common::item(9, category.endpoint.media_type())],
        );
    }

    let aggregator = aggregator(stub, 0);
    let mut controller = PageController::new();
    let state = controller.load(&aggregator, &categories).await;

    assert_eq!(*state, PageState::Failed(FailureKind::Auth));
    assert!(controller.user_message().is_some());
}

#[tokio::test]
async fn test_featured_detail_failure_still_renders_lists() {
    let stub = StubCatalog::home(2, &[]).failing_details(FailureKind::Upstream);
    let detail_calls = stub.detail_calls();

    let home = assert_ok!(aggregator(stub, 1).load_home(&CategorySet::home()).await);

    assert_eq!(home.lists.len(), 5);
    assert!(home.featured.is_none());
    assert_eq!(detail_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_empty_featured_category_skips_detail_lookup() {
    let categories = CategorySet::home();
    let mut stub = StubCatalog::new();
    for category in categories.iter().filter(|c| c.slug != "originals") {
        stub = stub.list(
            category.endpoint.clone(),
            vec![common::item(5, category.endpoint.media_type())],
        );
    }
    let detail_calls = stub.detail_calls();

    let home = assert_ok!(aggregator(stub, 0).load_home(&categories).await);

    assert!(home.lists[0].is_empty());
    assert!(home.featured.is_none());
    assert_eq!(detail_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_home_page_end_to_end() {
    let categories = CategorySet::home();
    let stub = StubCatalog::home(8, &[25, 5, 15, 0, 10]);
    let aggregator = ListAggregator::new(Arc::new(stub), Arc::new(SeededRandom::new(7)), "originals");

    let mut controller = PageController::new();
    controller.load(&aggregator, &categories).await;

    let PageState::Ready { lists, featured } = controller.into_state() else {
        panic!("expected a ready page");
    };

    assert_eq!(lists.len(), 5);
    assert!(lists.iter().all(|l| l.items.len() == 8));
    let slugs: Vec<&str> = lists.iter().map(|l| l.slug.as_str()).collect();
    assert_eq!(slugs, HOME_SLUGS);

    let featured = featured.expect("featured title");
    assert_eq!(featured.category, "originals");
    assert!(lists[0].items.iter().any(|i| i.id == featured.detail.item.id));
    // Originals are a TV discover list
    assert_eq!(featured.detail.item.media_type, Some(MediaType::Tv));
}

#[tokio::test]
async fn test_seeded_selection_is_reproducible() {
    let categories = CategorySet::home();
    let mut picks = Vec::new();

    for _ in 0..2 {
        let aggregator = ListAggregator::new(
            Arc::new(StubCatalog::home(8, &[])),
            Arc::new(SeededRandom::new(99)),
            "originals",
        );
        let home = assert_ok!(aggregator.load_home(&categories).await);
        picks.push(home.featured.map(|f| f.detail.item.id));
    }

    assert!(picks[0].is_some());
    assert_eq!(picks[0], picks[1]);
}

#[tokio::test]
async fn test_retry_after_failure_reaches_ready() {
    let categories = CategorySet::home();
    let failing = aggregator(
        StubCatalog::new().failing_list(
            categories.get("trending").unwrap().endpoint.clone(),
            FailureKind::Network,
            Duration::ZERO,
        ),
        0,
    );
    let healthy = aggregator(StubCatalog::home(2, &[]), 0);

    let mut controller = PageController::new();
    controller.load(&failing, &categories).await;
    assert!(matches!(controller.state(), PageState::Failed(FailureKind::Network)));

    let state = controller.retry(&healthy, &categories).await;
    assert!(matches!(state, PageState::Ready { .. }));

    // Ready is terminal; retry does nothing more
    let state = controller.retry(&failing, &categories).await;
    assert!(matches!(state, PageState::Ready { .. }));
}

#[tokio::test]
async fn test_title_page_survives_similar_failure() {
    let stub = StubCatalog::new()
        .list(
            Endpoint::Movies(MovieList::Popular),
            vec![common::item(42, Some(MediaType::Movie))],
        )
        .failing_list(
            Endpoint::Similar {
                media_type: MediaType::Movie,
                id: 42,
            },
            FailureKind::Upstream,
            Duration::ZERO,
        );

    let page = assert_ok!(aggregator(stub, 0).load_title(MediaType::Movie, 42).await);
    assert_eq!(page.detail.item.id, 42);
    assert!(page.similar.is_empty());
    assert_eq!(page.similar.label, "More Like This");
}
