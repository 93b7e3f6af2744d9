//! The filtered event stream: id mapping, windows, positional encoding.

use smallvec::SmallVec;

use crate::types::collections::FxHashMap;
use crate::types::events::{Event, EventKind};

/// Mapping id reserved for the dummy placeholder and all auxiliary events.
pub const DUMMY_ID: u32 = 0;

/// Time gap (in thousandths) written at every window boundary and timeout
/// continuation. A reader observing a gap of at least this size sees a
/// method break.
pub const TIMEOUT_GAP: u64 = 500;

/// Time step (in thousandths) between consecutive written events.
pub const EVENT_DELTA: u64 = 1;

/// One bounded span of the stream: the events recorded for a single
/// observed method occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamWindow {
    enclosing: Event,
    ids: SmallVec<[u32; 8]>,
}

impl StreamWindow {
    fn new() -> Self {
        Self { enclosing: Event::unknown(), ids: SmallVec::new() }
    }

    /// The enclosing-context event recorded inside this window, or the
    /// unknown sentinel if the window carries none.
    pub fn enclosing(&self) -> &Event {
        &self.enclosing
    }

    /// Mapped ids of the real events in stream order. Auxiliary events are
    /// not part of the mined window content.
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// Position of the first occurrence of `id` inside the window.
    pub fn first_position(&self, id: u32) -> Option<usize> {
        self.ids.iter().position(|&i| i == id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Deduplicated, frequency-filtered event stream with a stable id mapping.
///
/// Ids are assigned to retained distinct events in first-occurrence order,
/// starting at 1; id 0 belongs to the dummy placeholder and is shared by
/// auxiliary events (enclosing contexts and unknown-method markers), which
/// keep the stream structure without occupying mapping slots.
#[derive(Debug, Clone)]
pub struct EventStream {
    mapping: Vec<Event>,
    index: FxHashMap<Event, u32>,
    windows: Vec<StreamWindow>,
    lines: Vec<(u32, u64)>,
    time: u64,
    timeouts: u32,
}

impl EventStream {
    pub fn new() -> Self {
        let dummy = Event::dummy();
        let mut index = FxHashMap::default();
        index.insert(dummy.clone(), DUMMY_ID);
        Self {
            mapping: vec![dummy],
            index,
            windows: Vec::new(),
            lines: Vec::new(),
            time: 0,
            timeouts: 0,
        }
    }

    /// Append one retained event. First-context events open a new window
    /// after a timeout gap; enclosing contexts are recorded as the current
    /// window's provenance; everything else is written in place.
    pub fn add_event(&mut self, event: Event) {
        match event.kind() {
            EventKind::FirstContext => {
                self.time += TIMEOUT_GAP;
                self.windows.push(StreamWindow::new());
                self.write(event);
            }
            EventKind::EnclosingContext => {
                self.ensure_window();
                self.write_auxiliary();
                if let Some(window) = self.windows.last_mut() {
                    window.enclosing = event;
                }
            }
            _ => {
                self.ensure_window();
                self.write(event);
            }
        }
    }

    /// Raise a timeout continuation: the current window continues, but the
    /// positional encoding jumps by the timeout gap.
    pub fn increase_timeout(&mut self) {
        self.time += TIMEOUT_GAP;
        self.timeouts += 1;
    }

    /// Number of timeout continuations raised while building this stream.
    pub fn timeouts(&self) -> u32 {
        self.timeouts
    }

    fn ensure_window(&mut self) {
        if self.windows.is_empty() {
            self.windows.push(StreamWindow::new());
        }
    }

    fn write(&mut self, event: Event) {
        let id = self.ensure_id(event);
        self.lines.push((id, self.time));
        self.time += EVENT_DELTA;
        if id != DUMMY_ID {
            if let Some(window) = self.windows.last_mut() {
                window.ids.push(id);
            }
        }
    }

    fn write_auxiliary(&mut self) {
        self.lines.push((DUMMY_ID, self.time));
        self.time += EVENT_DELTA;
    }

    fn ensure_id(&mut self, event: Event) -> u32 {
        if event.is_sentinel() {
            return DUMMY_ID;
        }
        if let Some(&id) = self.index.get(&event) {
            return id;
        }
        let id = self.mapping.len() as u32;
        self.mapping.push(event.clone());
        self.index.insert(event, id);
        id
    }

    /// Ordered list of distinct retained events; index = mapping id.
    pub fn mapping(&self) -> &[Event] {
        &self.mapping
    }

    pub fn event_for_id(&self, id: u32) -> Option<&Event> {
        self.mapping.get(id as usize)
    }

    pub fn id_for_event(&self, event: &Event) -> Option<u32> {
        self.index.get(event).copied()
    }

    pub fn windows(&self) -> &[StreamWindow] {
        &self.windows
    }

    /// The written `(id, time)` pairs, time in thousandths.
    pub fn lines(&self) -> &[(u32, u64)] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty() && self.lines.is_empty() && self.mapping.len() == 1
    }

    /// Positional text encoding: one `"<id>,<time>"` line per written
    /// event, time rendered with three decimals.
    pub fn stream_text(&self) -> String {
        let mut text = String::new();
        for &(id, time) in &self.lines {
            text.push_str(&format!("{},{}.{:03}\n", id, time / 1000, time % 1000));
        }
        text
    }

    /// Mapping file encoding: one serialized event per line, line index =
    /// mapping id.
    pub fn mapping_text(&self) -> String {
        let mut text = String::new();
        for event in &self.mapping {
            text.push_str(&event.encode());
            text.push('\n');
        }
        text
    }
}

impl Default for EventStream {
    fn default() -> Self {
        Self::new()
    }
}

// The index is derived from the mapping; equality covers the observable
// parts only.
impl PartialEq for EventStream {
    fn eq(&self, other: &Self) -> bool {
        self.mapping == other.mapping
            && self.windows == other.windows
            && self.lines == other.lines
    }
}

impl Eq for EventStream {}
