//! Decode-event observation.
//!
//! A sink receives a strict depth-first narration of a decode: element
//! boundaries in schema order and one value callback per primitive, in the
//! same order the bytes are consumed. Sinks are pure observers; nothing a
//! sink does can change decoded values or stream position.

use crate::per::types::ObjectId;

/// Observer interface called by the reader while decoding.
///
/// Every callback has an empty default body, so a sink implements only the
/// events it cares about. `index` is the element's position within a
/// SEQUENCE OF, or -1 for a named field.
pub trait EventSink {
    fn start_element(&mut self, _name: &str, _index: i64) {}
    fn end_element(&mut self, _name: &str, _index: i64) {}
    fn uint_value(&mut self, _value: u64) {}
    fn int_value(&mut self, _value: i64) {}
    fn bool_value(&mut self, _value: bool) {}
    fn oid_value(&mut self, _value: &ObjectId) {}
    fn octets_value(&mut self, _data: &[u8]) {}
    fn char_string_value(&mut self, _value: &str) {}
    fn bmp_string_value(&mut self, _value: &str) {}
    fn bit_string_value(&mut self, _data: &[u8], _length: usize) {}
    fn null_value(&mut self) {}
    fn open_type_value(&mut self, _data: &[u8]) {}
}

/// A sink that renders an indented decode trace through the `log` crate at
/// trace level.
#[derive(Default)]
pub struct TraceSink {
    depth: usize,
}

impl TraceSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&self, text: &str) {
        log::trace!("{:indent$}{}", "", text, indent = self.depth * 2);
    }
}

impl EventSink for TraceSink {
    fn start_element(&mut self, name: &str, index: i64) {
        if index >= 0 {
            self.line(&format!("{}[{}] {{", name, index));
        } else {
            self.line(&format!("{} {{", name));
        }
        self.depth += 1;
    }

    fn end_element(&mut self, _name: &str, _index: i64) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    fn uint_value(&mut self, value: u64) {
        self.line(&format!("{}", value));
    }

    fn int_value(&mut self, value: i64) {
        self.line(&format!("{}", value));
    }

    fn bool_value(&mut self, value: bool) {
        self.line(if value { "TRUE" } else { "FALSE" });
    }

    fn oid_value(&mut self, value: &ObjectId) {
        let arcs: Vec<String> = value.arcs.iter().map(|a| a.to_string()).collect();
        self.line(&format!("{{ {} }}", arcs.join(" ")));
    }

    fn octets_value(&mut self, data: &[u8]) {
        let hex: Vec<String> = data.iter().map(|b| format!("{:02x}", b)).collect();
        self.line(&format!("'{}'H", hex.concat()));
    }

    fn char_string_value(&mut self, value: &str) {
        self.line(&format!("\"{}\"", value));
    }

    fn bmp_string_value(&mut self, value: &str) {
        self.line(&format!("\"{}\"", value));
    }

    fn bit_string_value(&mut self, data: &[u8], length: usize) {
        let mut bits = String::with_capacity(length);
        for i in 0..length {
            let bit = (data[i / 8] >> (7 - i % 8)) & 1;
            bits.push(if bit == 1 { '1' } else { '0' });
        }
        self.line(&format!("'{}'B", bits));
    }

    fn null_value(&mut self) {
        self.line("NULL");
    }

    fn open_type_value(&mut self, data: &[u8]) {
        let hex: Vec<String> = data.iter().map(|b| format!("{:02x}", b)).collect();
        self.line(&format!("<open type, {} octets: {}>", data.len(), hex.concat()));
    }
}
