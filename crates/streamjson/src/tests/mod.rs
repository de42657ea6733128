
use alloc::{string::String, vec::Vec};

use crate::{EventSink, SinkError};

/// One sink callback, owned.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Event {
    DocumentBegin,
    DocumentEnd,
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
    KeyPart(String),
    Key(String),
    StringPart(String),
    String(String),
    Int64(i64),
    UInt64(u64),
    Double(f64),
    Bool(bool),
    Null,
}

/// Sink that records every event, optionally refusing the first `null`.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub events: Vec<Event>,
    pub reject_null: bool,
}

impl Recorder {
    /// The recorded events with `*_part` fragments folded into the final
    /// fragment, so that differently chunked inputs compare equal.
    pub fn coalesced(&self) -> Vec<Event> {
        let mut out = Vec::with_capacity(self.events.len());
        let mut pending = String::new();
        for event in &self.events {
            match event {
                Event::KeyPart(s) | Event::StringPart(s) => pending.push_str(s),
                Event::Key(s) => {
                    pending.push_str(s);
                    out.push(Event::Key(core::mem::take(&mut pending)));
                }
                Event::String(s) => {
                    pending.push_str(s);
                    out.push(Event::String(core::mem::take(&mut pending)));
                }
                other => out.push(other.clone()),
            }
        }
        out
    }
}

impl EventSink for Recorder {
    fn on_document_begin(&mut self) -> Result<(), SinkError> {
        self.events.push(Event::DocumentBegin);
        Ok(())
    }
    fn on_document_end(&mut self) -> Result<(), SinkError> {
        self.events.push(Event::DocumentEnd);
        Ok(())
    }
    fn on_object_begin(&mut self) -> Result<(), SinkError> {
        self.events.push(Event::ObjectBegin);
        Ok(())
    }
    fn on_object_end(&mut self) -> Result<(), SinkError> {
        self.events.push(Event::ObjectEnd);
        Ok(())
    }
    fn on_array_begin(&mut self) -> Result<(), SinkError> {
        self.events.push(Event::ArrayBegin);
        Ok(())
    }
    fn on_array_end(&mut self) -> Result<(), SinkError> {
        self.events.push(Event::ArrayEnd);
        Ok(())
    }
    fn on_key_part(&mut self, fragment: &str) -> Result<(), SinkError> {
        self.events.push(Event::KeyPart(fragment.into()));
        Ok(())
    }
    fn on_key(&mut self, fragment: &str) -> Result<(), SinkError> {
        self.events.push(Event::Key(fragment.into()));
        Ok(())
    }
    fn on_string_part(&mut self, fragment: &str) -> Result<(), SinkError> {
        self.events.push(Event::StringPart(fragment.into()));
        Ok(())
    }
    fn on_string(&mut self, fragment: &str) -> Result<(), SinkError> {
        self.events.push(Event::String(fragment.into()));
        Ok(())
    }
    fn on_int64(&mut self, value: i64) -> Result<(), SinkError> {
        self.events.push(Event::Int64(value));
        Ok(())
    }
    fn on_uint64(&mut self, value: u64) -> Result<(), SinkError> {
        self.events.push(Event::UInt64(value));
        Ok(())
    }
    fn on_double(&mut self, value: f64) -> Result<(), SinkError> {
        self.events.push(Event::Double(value));
        Ok(())
    }
    fn on_bool(&mut self, value: bool) -> Result<(), SinkError> {
        self.events.push(Event::Bool(value));
        Ok(())
    }
    fn on_null(&mut self) -> Result<(), SinkError> {
        if self.reject_null {
            return Err(SinkError::Rejected("null"));
        }
        self.events.push(Event::Null);
        Ok(())
    }
}
