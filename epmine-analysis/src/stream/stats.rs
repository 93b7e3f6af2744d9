//! Stream statistics for experiment logs.

use std::fmt;

use epmine_core::types::stream::DUMMY_ID;
use epmine_core::EventStream;

/// Counters describing one filtered stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamStats {
    pub windows: usize,
    pub written_events: usize,
    pub distinct_events: usize,
    pub auxiliary_events: usize,
    pub timeouts: u32,
}

impl StreamStats {
    pub fn of(stream: &EventStream) -> Self {
        Self {
            windows: stream.windows().len(),
            written_events: stream.lines().len(),
            // The dummy placeholder is not a distinct observed event.
            distinct_events: stream.mapping().len().saturating_sub(1),
            auxiliary_events: stream
                .lines()
                .iter()
                .filter(|(id, _)| *id == DUMMY_ID)
                .count(),
            timeouts: stream.timeouts(),
        }
    }
}

impl fmt::Display for StreamStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "windows: {}, events: {} ({} distinct, {} auxiliary), timeouts: {}",
            self.windows,
            self.written_events,
            self.distinct_events,
            self.auxiliary_events,
            self.timeouts
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epmine_core::{Event, MethodId};

    #[test]
    fn counters_reflect_the_stream() {
        let mut stream = EventStream::new();
        stream.add_event(Event::first_context(MethodId::new("f()")));
        stream.add_event(Event::enclosing_context(MethodId::new("e()")));
        stream.add_event(Event::invocation(MethodId::new("a()")));
        stream.increase_timeout();
        stream.add_event(Event::invocation(MethodId::new("b()")));

        let stats = StreamStats::of(&stream);
        assert_eq!(stats.windows, 1);
        assert_eq!(stats.written_events, 4);
        assert_eq!(stats.distinct_events, 3);
        assert_eq!(stats.auxiliary_events, 1);
        assert_eq!(stats.timeouts, 1);

        let text = stats.to_string();
        assert!(text.contains("windows: 1"));
        assert!(text.contains("3 distinct"));
    }

    #[test]
    fn empty_stream_has_zero_counters() {
        assert_eq!(StreamStats::of(&EventStream::new()), StreamStats::default());
    }
}
