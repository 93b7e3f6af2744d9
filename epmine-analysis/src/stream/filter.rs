//! Frequency filtering of raw event sequences.

use epmine_core::{Event, EventKind, EventStream, FxHashMap, InvalidInputError};

/// Convert a raw chronological event sequence into a deduplicated,
/// frequency-filtered [`EventStream`].
///
/// Counting and retention follow the recorded-stream conventions:
/// enclosing contexts are provenance and bypass the frequency filter;
/// unknown-method invocations are dropped; an unknown-method first-context
/// still opens a window (a generic boundary); a known first-context that
/// fails the threshold raises a timeout continuation instead of a window.
///
/// Pure function of its inputs; an empty input yields an empty stream.
pub fn filter_stream(
    events: &[Event],
    min_frequency: u32,
) -> Result<EventStream, InvalidInputError> {
    if min_frequency == 0 {
        return Err(InvalidInputError::NonPositiveThreshold);
    }

    let counts = count_events(events);
    let mut stream = EventStream::new();

    for event in events {
        match event.kind() {
            EventKind::FirstContext => {
                if event.is_sentinel() || is_frequent(&counts, event, min_frequency) {
                    stream.add_event(event.clone());
                } else {
                    stream.increase_timeout();
                }
            }
            EventKind::EnclosingContext => {
                stream.add_event(event.clone());
            }
            EventKind::Invocation | EventKind::SuperContext => {
                if !event.is_sentinel() && is_frequent(&counts, event, min_frequency) {
                    stream.add_event(event.clone());
                }
            }
            EventKind::Unknown | EventKind::Dummy => {}
        }
    }

    Ok(stream)
}

/// Occurrence counts per distinct countable event. Sentinels and enclosing
/// contexts carry no frequency signal.
fn count_events(events: &[Event]) -> FxHashMap<&Event, u32> {
    let mut counts: FxHashMap<&Event, u32> = FxHashMap::default();
    for event in events {
        if event.is_sentinel() || event.kind() == EventKind::EnclosingContext {
            continue;
        }
        *counts.entry(event).or_insert(0) += 1;
    }
    counts
}

fn is_frequent(counts: &FxHashMap<&Event, u32>, event: &Event, min_frequency: u32) -> bool {
    counts.get(event).copied().unwrap_or(0) >= min_frequency
}

#[cfg(test)]
mod tests {
    use super::*;
    use epmine_core::MethodId;

    fn m(i: u32) -> MethodId {
        if i == 0 {
            MethodId::unknown()
        } else {
            MethodId::new(format!("[T,P] [T,P].m{i}()"))
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

    #[test]
    fn empty_input_yields_an_empty_stream() {
        let stream = filter_stream(&[], 2).unwrap();
        assert!(stream.is_empty());
        assert_eq!(stream.mapping().len(), 1);
    }

    #[test]
    fn zero_threshold_is_rejected() {
        assert!(matches!(
            filter_stream(&[inv(1)], 0),
            Err(InvalidInputError::NonPositiveThreshold)
        ));
    }

    #[test]
    fn infrequent_events_are_dropped() {
        let events = vec![
            first_ctx(1), encl_ctx(0), inv(2), inv(3),
            first_ctx(1), encl_ctx(6), inv(2), inv(3), inv(5),
        ];

        let mut expected = EventStream::new();
        expected.add_event(first_ctx(1));
        expected.add_event(encl_ctx(0));
        expected.add_event(inv(2));
        expected.add_event(inv(3));
        expected.add_event(first_ctx(1));
        expected.add_event(encl_ctx(6));
        expected.add_event(inv(2));
        expected.add_event(inv(3));

        let actual = filter_stream(&events, 2).unwrap();
        assert_eq!(expected, actual);
    }

    #[test]
    fn failing_first_context_raises_a_timeout_continuation() {
        let events = vec![
            first_ctx(1), encl_ctx(6), inv(2),
            first_ctx(1), encl_ctx(7), inv(2),
            first_ctx(3), encl_ctx(8), inv(2),
        ];

        let mut expected = EventStream::new();
        expected.add_event(first_ctx(1));
        expected.add_event(encl_ctx(6));
        expected.add_event(inv(2));
        expected.add_event(first_ctx(1));
        expected.add_event(encl_ctx(7));
        expected.add_event(inv(2));
        expected.increase_timeout();
        expected.add_event(encl_ctx(8));
        expected.add_event(inv(2));

        let actual = filter_stream(&events, 2).unwrap();
        assert_eq!(expected, actual);
        assert_eq!(actual.windows().len(), 2);
        assert_eq!(actual.timeouts(), 1);
    }

    #[test]
    fn unknown_invocations_are_dropped_but_unknown_first_contexts_bound_windows() {
        let events = vec![
            first_ctx(1), encl_ctx(5), inv(2), inv(0),
            first_ctx(0), encl_ctx(6), inv(2),
            first_ctx(1), encl_ctx(7),
        ];

        let actual = filter_stream(&events, 2).unwrap();

        // inv(0) carries the sentinel method and never appears; the unknown
        // first-context still opens its window.
        assert_eq!(actual.windows().len(), 3);
        assert_eq!(actual.id_for_event(&inv(0)), None);
        assert_eq!(actual.windows()[1].ids(), &[2]);
        assert_eq!(actual.windows()[1].enclosing(), &encl_ctx(6));
    }

    #[test]
    fn enclosing_contexts_bypass_the_frequency_filter() {
        let events = vec![
            first_ctx(1), encl_ctx(7), inv(2),
            first_ctx(1), encl_ctx(8), inv(2),
        ];

        let actual = filter_stream(&events, 2).unwrap();

        assert_eq!(actual.windows()[0].enclosing(), &encl_ctx(7));
        assert_eq!(actual.windows()[1].enclosing(), &encl_ctx(8));
        // Contexts never occupy mapping slots.
        assert_eq!(actual.mapping().len(), 3);
    }

    #[test]
    fn super_contexts_are_frequency_filtered_like_invocations() {
        let events = vec![
            first_ctx(1), super_ctx(4), inv(2),
            first_ctx(1), super_ctx(9), inv(2),
        ];

        let actual = filter_stream(&events, 2).unwrap();
        assert_eq!(actual.id_for_event(&super_ctx(4)), None);
        assert_eq!(actual.id_for_event(&super_ctx(9)), None);
        assert_eq!(actual.windows()[0].ids(), &[1, 2]);
    }

    #[test]
    fn mapping_never_contains_an_event_below_threshold() {
        let events = vec![
            first_ctx(1), inv(2), inv(3), inv(2),
            first_ctx(1), inv(2), inv(4),
        ];

        let actual = filter_stream(&events, 3).unwrap();
        for event in actual.mapping().iter().skip(1) {
            assert!(events.iter().filter(|e| *e == event).count() >= 3, "{event} leaked");
        }
        assert_eq!(actual.id_for_event(&inv(2)), Some(1));
        assert_eq!(actual.id_for_event(&inv(3)), None);
    }
}
