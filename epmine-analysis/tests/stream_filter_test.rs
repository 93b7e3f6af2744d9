//! Full filtering scenario over a recorded multi-method event sequence.

use epmine_analysis::stream::filter_stream;
use epmine_core::{Event, EventStream, MethodId};

const FREQUENCY: u32 = 2;

fn m(i: u32) -> MethodId {
    if i == 0 {
        MethodId::unknown()
    } else {
        MethodId::new(format!("[T,P, 1.2.3.4] [T,P, 1.2.3.4].m{i}()"))
    }
}

fn inv(i: u32) -> Event {
    Event::invocation(m(i))
}

fn first_ctx(i: u32) -> Event {
    Event::first_context(m(i))
}

fn super_ctx(i: u32) -> Event {
    Event::super_context(m(i))
}

fn encl_ctx(i: u32) -> Event {
    Event::enclosing_context(m(i))
}

fn recorded_events() -> Vec<Event> {
    vec![
        first_ctx(1), encl_ctx(0), inv(2), inv(3),
        first_ctx(0), super_ctx(2), encl_ctx(7), inv(5), inv(0), inv(2),
        first_ctx(1), encl_ctx(6), inv(2), inv(3),
        first_ctx(1), encl_ctx(0), inv(2), inv(3),
        first_ctx(0), encl_ctx(8), inv(2),
        first_ctx(1), encl_ctx(6), inv(2), inv(3),
        first_ctx(3), super_ctx(4), encl_ctx(0), inv(3),
    ]
}

fn expected_stream() -> EventStream {
    let mut expected = EventStream::new();
    expected.add_event(first_ctx(1));
    expected.add_event(encl_ctx(0));
    expected.add_event(inv(2));
    expected.add_event(inv(3));
    expected.add_event(first_ctx(0));
    expected.add_event(encl_ctx(7));
    expected.add_event(inv(2));
    expected.add_event(first_ctx(1));
    expected.add_event(encl_ctx(6));
    expected.add_event(inv(2));
    expected.add_event(inv(3));
    expected.add_event(first_ctx(1));
    expected.add_event(encl_ctx(0));
    expected.add_event(inv(2));
    expected.add_event(inv(3));
    expected.add_event(first_ctx(0));
    expected.add_event(encl_ctx(8));
    expected.add_event(inv(2));
    expected.add_event(first_ctx(1));
    expected.add_event(encl_ctx(6));
    expected.add_event(inv(2));
    expected.add_event(inv(3));
    expected.increase_timeout();
    expected.add_event(encl_ctx(0));
    expected.add_event(inv(3));
    expected
}

#[test]
fn empty_input_produces_an_empty_stream() {
    let actual = filter_stream(&[], FREQUENCY).unwrap();
    assert_eq!(actual, EventStream::new());
}

#[test]
fn recorded_sequence_filters_to_the_expected_stream() {
    let actual = filter_stream(&recorded_events(), FREQUENCY).unwrap();
    let expected = expected_stream();

    assert_eq!(expected.stream_text(), actual.stream_text());
    assert_eq!(expected.mapping(), actual.mapping());
    assert_eq!(expected, actual);
}

#[test]
fn only_real_frequent_events_take_mapping_ids() {
    let actual = filter_stream(&recorded_events(), FREQUENCY).unwrap();

    assert_eq!(actual.mapping().len(), 4);
    assert_eq!(actual.id_for_event(&first_ctx(1)), Some(1));
    assert_eq!(actual.id_for_event(&inv(2)), Some(2));
    assert_eq!(actual.id_for_event(&inv(3)), Some(3));

    // Dropped by frequency or sentinel status.
    assert_eq!(actual.id_for_event(&super_ctx(2)), None);
    assert_eq!(actual.id_for_event(&inv(5)), None);
    assert_eq!(actual.id_for_event(&first_ctx(3)), None);
}

#[test]
fn failing_first_context_continues_the_last_window() {
    let actual = filter_stream(&recorded_events(), FREQUENCY).unwrap();

    // Six retained window boundaries; the dropped firstCtx(3) only raises a
    // timeout, so its trailing events stay in the sixth window.
    assert_eq!(actual.windows().len(), 6);
    assert_eq!(actual.timeouts(), 1);
    assert_eq!(actual.windows()[5].ids(), &[1, 2, 3, 3]);
    assert_eq!(actual.windows()[5].enclosing(), &encl_ctx(0));
}

#[test]
fn stream_text_encodes_boundaries_as_timeout_gaps() {
    let actual = filter_stream(&recorded_events(), FREQUENCY).unwrap();
    let text = actual.stream_text();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "1,0.500");
    assert_eq!(lines[1], "0,0.501");
    assert_eq!(lines[2], "2,0.502");
    assert_eq!(lines[3], "3,0.503");
    // New window: the gap to the previous line covers the full timeout.
    assert_eq!(lines[4], "0,1.004");
    // Trailing continuation after the suppressed first-context.
    assert_eq!(*lines.last().unwrap(), "3,3.523");
}
