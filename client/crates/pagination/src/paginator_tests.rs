//! Tests for the generation-guarded paginator.

use rstest::{fixture, rstest};

use super::*;

type Feed = Paginator<&'static str, u32, &'static str>;

#[fixture]
fn feed() -> Feed {
    Paginator::new("", PageSize::default())
}

fn page_of(start: u32, len: u32) -> Vec<u32> {
    (start..start + len).collect()
}

fn load(feed: &mut Feed, wants_more: bool, items: Vec<u32>) -> Completion {
    let Some(ticket) = feed.begin_next(wants_more) else {
        panic!("a ticket should be issued");
    };
    feed.complete(ticket, Ok(items))
}

#[rstest]
fn first_page_is_issued_without_visibility_signal(mut feed: Feed) {
    let ticket = feed.begin_next(false);
    assert_eq!(
        ticket.map(|ticket| ticket.request().page()),
        Some(PageNumber::FIRST)
    );
    assert!(feed.is_loading_first());
    assert!(!feed.is_loading_more());
}

#[rstest]
#[case(10, true)]
#[case(7, false)]
#[case(12, true)]
fn has_more_follows_page_fill(mut feed: Feed, #[case] len: u32, #[case] expected: bool) {
    let completion = load(&mut feed, false, page_of(0, len));
    assert!(matches!(
        completion,
        Completion::Appended { has_more, .. } if has_more == expected
    ));
    assert_eq!(feed.has_more(), expected);
}

#[rstest]
fn empty_first_page_is_terminal_without_error(mut feed: Feed) {
    load(&mut feed, false, Vec::new());
    assert!(!feed.has_more());
    assert!(feed.error().is_none());
    assert!(feed.begin_next(true).is_none());
    let snapshot = feed.snapshot();
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.pages.len(), 1);
}

#[rstest]
fn later_pages_require_visibility_signal(mut feed: Feed) {
    load(&mut feed, false, page_of(0, 10));
    assert!(feed.begin_next(false).is_none());

    let ticket = feed.begin_next(true);
    assert_eq!(ticket.map(|ticket| ticket.request().page().get()), Some(2));
    assert!(feed.is_loading_more());
}

#[rstest]
fn only_one_fetch_is_in_flight(mut feed: Feed) {
    let first = feed.begin_next(true);
    assert!(first.is_some());
    assert!(feed.begin_next(true).is_none());
    assert!(feed.begin_next(true).is_none());
}

#[rstest]
fn pages_append_in_order_preserving_item_order(mut feed: Feed) {
    load(&mut feed, false, vec![9, 3, 5, 1, 8, 2, 7, 4, 6, 0]);
    load(&mut feed, true, vec![42, 17]);

    let numbers: Vec<u32> = feed.pages().iter().map(|page| page.number().get()).collect();
    assert_eq!(numbers, vec![1, 2]);
    let items: Vec<u32> = feed.items().copied().collect();
    assert_eq!(items, vec![9, 3, 5, 1, 8, 2, 7, 4, 6, 0, 42, 17]);
    assert!(!feed.has_more());
}

#[rstest]
fn failure_keeps_pages_and_waits_for_signal_to_retry(mut feed: Feed) {
    load(&mut feed, false, page_of(0, 10));
    let Some(ticket) = feed.begin_next(true) else {
        panic!("second page should be issued");
    };
    let completion = feed.complete(ticket, Err("offline"));

    assert_eq!(
        completion,
        Completion::Failed {
            page: PageNumber::FIRST.next()
        }
    );
    assert_eq!(feed.error(), Some(&"offline"));
    assert_eq!(feed.items().count(), 10);
    assert!(feed.begin_next(false).is_none(), "no automatic retry");

    let retry = feed.begin_next(true);
    assert_eq!(retry.map(|ticket| ticket.request().page().get()), Some(2));
    assert!(feed.error().is_none(), "retry clears the surfaced error");
}

#[rstest]
fn first_page_failure_is_not_retried_automatically(mut feed: Feed) {
    let Some(ticket) = feed.begin_next(false) else {
        panic!("first page should be issued");
    };
    feed.complete(ticket, Err("timeout"));

    assert!(feed.begin_next(false).is_none());
    assert!(feed.begin_next(true).is_some());
}

#[rstest]
fn reset_discards_pages_and_restarts_at_page_one(mut feed: Feed) {
    load(&mut feed, false, page_of(0, 10));
    load(&mut feed, true, page_of(10, 10));

    assert!(feed.reset("cat"));
    assert!(feed.pages().is_empty());
    assert!(feed.has_more());
    assert_eq!(feed.generation(), 1);

    let ticket = feed.begin_next(false);
    assert_eq!(
        ticket.map(|ticket| ticket.request().page()),
        Some(PageNumber::FIRST)
    );
}

#[rstest]
fn reset_to_same_key_is_a_no_op(mut feed: Feed) {
    load(&mut feed, false, page_of(0, 10));
    assert!(!feed.reset(""));
    assert_eq!(feed.items().count(), 10);
    assert_eq!(feed.generation(), 0);
}

#[rstest]
fn stale_ticket_is_discarded_after_reset(mut feed: Feed) {
    feed.reset("a");
    let Some(stale) = feed.begin_next(false) else {
        panic!("page 1 for 'a' should be issued");
    };

    feed.reset("b");
    let Some(current) = feed.begin_next(false) else {
        panic!("page 1 for 'b' should be issued despite the stale fetch");
    };
    feed.complete(current, Ok(vec![7, 8]));

    let completion = feed.complete(stale, Ok(page_of(100, 10)));
    assert_eq!(completion, Completion::Discarded(DiscardReason::Stale));
    assert_eq!(feed.items().copied().collect::<Vec<_>>(), vec![7, 8]);
    assert!(!feed.has_more());
}

#[rstest]
fn query_sequence_never_leaks_between_keys(mut feed: Feed) {
    load(&mut feed, false, page_of(0, 10));
    feed.reset("cat");
    load(&mut feed, false, vec![501, 502, 503]);

    assert_eq!(
        feed.items().copied().collect::<Vec<_>>(),
        vec![501, 502, 503]
    );

    feed.reset("");
    assert!(feed.pages().is_empty());
}

#[rstest]
fn completing_twice_is_ignored(mut feed: Feed) {
    let Some(ticket) = feed.begin_next(false) else {
        panic!("page 1 should be issued");
    };
    feed.complete(ticket, Ok(page_of(0, 10)));
    let again = feed.complete(ticket, Ok(page_of(0, 10)));

    assert_eq!(again, Completion::Discarded(DiscardReason::Duplicate));
    assert_eq!(feed.pages().len(), 1);
}

#[rstest]
fn disposed_feed_issues_nothing_and_ignores_results(mut feed: Feed) {
    let Some(ticket) = feed.begin_next(false) else {
        panic!("page 1 should be issued");
    };
    feed.dispose();

    assert!(feed.is_disposed());
    assert_eq!(
        feed.complete(ticket, Ok(page_of(0, 10))),
        Completion::Discarded(DiscardReason::Disposed)
    );
    assert!(feed.pages().is_empty());
    assert!(feed.begin_next(true).is_none());
    assert!(!feed.reset("dog"));
}
