//! Internal reader for aligned-PER bitstreams.

use crate::error::{Error, ErrorKind, Result};
use crate::per::sink::EventSink;
use crate::per::types::{
    BitString, ChoiceTag, CodecOptions, ObjectId, OptionalBits, RawExtension, SizeConstraint,
};
use crate::traits::BitReadable;
use std::cmp::min;

/// A saved cursor position, restorable in O(1).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Position {
    byte: usize,
    bit: u8,
}

/// A reader that decodes an aligned-PER bitstream out of a borrowed byte
/// buffer.
///
/// The reader tracks a bit-level cursor, the transient size constraint
/// consumed by the next length determinant, the decode options, the open-type
/// nesting depth, and an optional event sink observing the decode. All
/// primitive and structural decode operations are methods on this type.
pub struct PerReader<'a, 's> {
    /// The backing buffer. The reader never allocates on behalf of the
    /// buffer; ownership stays with the caller.
    buf: &'a [u8],

    /// Index of the octet the cursor is in.
    byte: usize,

    /// Bit offset within the current octet, 0..=7. Bit 0 of the stream is
    /// the most significant bit of the octet.
    bit: u8,

    /// Constraint consumed by the next sized primitive.
    pending: Option<SizeConstraint>,

    options: CodecOptions,

    /// Open-type nesting depth of this reader, bounded by
    /// `options.max_recursion_depth`.
    depth: u32,

    sink: Option<&'s mut dyn EventSink>,
}

impl<'a, 's> PerReader<'a, 's> {
    /// Wrap a byte buffer in a reader with default options.
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_options(buf, CodecOptions::default())
    }

    pub fn with_options(buf: &'a [u8], options: CodecOptions) -> Self {
        Self {
            buf,
            byte: 0,
            bit: 0,
            pending: None,
            options,
            depth: 0,
            sink: None,
        }
    }

    /// Attach an event sink observing this decode. At most one sink is
    /// attached at a time; attaching replaces the previous sink.
    pub fn attach_event_sink(&mut self, sink: &'s mut dyn EventSink) {
        self.sink = Some(sink);
    }

    pub fn detach_event_sink(&mut self) {
        self.sink = None;
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Octet offset of the cursor, for error reporting.
    pub fn byte_offset(&self) -> usize {
        self.byte
    }

    /// Number of whole octets consumed so far; a partially-read octet
    /// counts as consumed.
    pub fn consumed_octets(&self) -> usize {
        self.byte + if self.bit != 0 { 1 } else { 0 }
    }

    fn fail(&self, kind: ErrorKind) -> Error {
        Error::new(kind, self.byte)
    }

    /// Build an error at the current offset. For decoders layered on top of
    /// this reader.
    pub fn error(&self, kind: ErrorKind) -> Error {
        self.fail(kind)
    }

    fn remaining_bits(&self) -> usize {
        (self.buf.len() - self.byte) * 8 - self.bit as usize
    }

    fn remaining_octets(&self) -> usize {
        self.buf.len() - self.byte
    }

    #[inline]
    fn event(&mut self, f: impl FnOnce(&mut dyn EventSink)) {
        if let Some(sink) = self.sink.as_mut() {
            f(&mut **sink);
        }
    }

    /// Run `f` bracketed by start/end element events carrying `name`.
    pub fn element<T>(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.event(|s| s.start_element(name, -1));
        let value = f(self)?;
        self.event(|s| s.end_element(name, -1));
        Ok(value)
    }

    /// Decode an optional field: run `f` when its presence bit was set.
    pub fn optional<T>(
        &mut self,
        present: bool,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<Option<T>> {
        if present {
            f(self).map(Some)
        } else {
            Ok(None)
        }
    }

    // --- bit-level cursor ------------------------------------------------

    /// Read a single bit, advancing the cursor.
    pub fn read_bit(&mut self) -> Result<u8> {
        let byte = *self
            .buf
            .get(self.byte)
            .ok_or_else(|| self.fail(ErrorKind::EndOfBuffer))?;
        let bit = (byte >> (7 - self.bit)) & 1;

        self.bit += 1;
        if self.bit == 8 {
            self.bit = 0;
            self.byte += 1;
        }

        Ok(bit)
    }

    /// Read an arbitrary number of bits out into a type.
    ///
    /// The bits will be returned such that the read-out bits start from the
    /// least significant bit of the returned type; reading two bits from the
    /// stream results in a zero-extended value.
    ///
    /// The `bits_needed` must not exceed the maximum width of the type. Any
    /// attempt to do so will result in an error.
    pub fn read_bits<T: BitReadable>(&mut self, mut bits_needed: u32) -> Result<T> {
        if T::zero().checked_shl(bits_needed.saturating_sub(1)).is_none() {
            return Err(self.fail(ErrorKind::ConstraintViolation));
        }

        if (bits_needed as usize) > self.remaining_bits() {
            return Err(self.fail(ErrorKind::EndOfBuffer));
        }

        let mut accum = T::zero();
        while bits_needed > 0 {
            let byte = self.buf[self.byte] << self.bit;
            let bits_in_byte = (8 as u32).saturating_sub(self.bit as u32);

            let bits_to_shift_in = min(bits_in_byte, bits_needed);

            if let Some(shifted) = accum.checked_shl(bits_to_shift_in) {
                accum = shifted | (byte >> (8 - bits_to_shift_in)).into();
            } else {
                accum = (byte >> (8 - bits_to_shift_in)).into();
            }

            self.bit += bits_to_shift_in as u8;
            if self.bit >= 8 {
                self.bit -= 8;
                self.byte += 1;
            }

            bits_needed -= bits_to_shift_in;
        }

        Ok(accum)
    }

    /// Advance the cursor without reading.
    pub fn skip_bits(&mut self, bits_to_skip: u32) -> Result<()> {
        if (bits_to_skip as usize) > self.remaining_bits() {
            return Err(self.fail(ErrorKind::EndOfBuffer));
        }

        let total = self.bit as usize + bits_to_skip as usize;
        self.byte += total / 8;
        self.bit = (total % 8) as u8;

        Ok(())
    }

    /// Advance the cursor to the next octet boundary. Idempotent at a
    /// boundary.
    pub fn align_to_byte(&mut self) {
        if self.bit != 0 {
            self.bit = 0;
            self.byte += 1;
        }
    }

    /// Borrow `count` whole octets out of the buffer. The cursor must be
    /// octet-aligned.
    pub fn read_octets(&mut self, count: usize) -> Result<&'a [u8]> {
        if self.bit != 0 {
            return Err(self.fail(ErrorKind::ConstraintViolation));
        }
        if count > self.remaining_octets() {
            return Err(self.fail(ErrorKind::EndOfBuffer));
        }

        let octets = &self.buf[self.byte..self.byte + count];
        self.byte += count;

        Ok(octets)
    }

    /// Yield a checkpoint of the cursor position.
    pub fn checkpoint(&self) -> Position {
        Position {
            byte: self.byte,
            bit: self.bit,
        }
    }

    /// Restore a previously-created checkpoint. Checkpoints are only valid
    /// on the reader that produced them.
    pub fn rollback(&mut self, position: Position) {
        debug_assert!(position.byte <= self.buf.len());
        self.byte = position.byte;
        self.bit = position.bit;
    }

    // --- primitives ------------------------------------------------------

    /// Attach a size constraint to be consumed by the next sized primitive.
    pub fn set_size_constraint(&mut self, constraint: SizeConstraint) {
        self.pending = Some(constraint);
    }

    /// Decode a BOOLEAN: one bit, never aligned.
    pub fn read_boolean(&mut self) -> Result<bool> {
        let value = self.read_bit()? == 1;
        self.event(|s| s.bool_value(value));
        Ok(value)
    }

    /// Decode a NULL: no bits.
    pub fn read_null(&mut self) -> Result<()> {
        self.event(|s| s.null_value());
        Ok(())
    }

    /// Core of the constrained-whole-number decoding, without event
    /// reporting. The field width is a function of the static range:
    /// nothing for a single-valued range, an unaligned bit field below 256
    /// values, an aligned 16-bit field up to 65536 values, and a
    /// length-prefixed aligned field beyond.
    fn constrained_uint_core(&mut self, lower: u64, upper: u64) -> Result<u64> {
        debug_assert!(lower <= upper);
        let range = upper - lower;

        let raw = if range == 0 {
            0
        } else if range < 256 {
            let width = 64 - range.leading_zeros();
            self.read_bits::<u8>(width)?.to_u64()
        } else if range <= 65535 {
            self.align_to_byte();
            self.read_bits::<u16>(16)?.to_u64()
        } else {
            let (len, _) = self.read_general_length()?;
            if len == 0 || len > 8 {
                return Err(self.fail(ErrorKind::LengthOverflow));
            }
            let mut value: u64 = 0;
            for octet in self.read_octets(len)? {
                value = value << 8 | u64::from(*octet);
            }
            value
        };

        let value = lower
            .checked_add(raw)
            .ok_or_else(|| self.fail(ErrorKind::ConstraintViolation))?;
        if value > upper {
            return Err(self.fail(ErrorKind::ConstraintViolation));
        }

        Ok(value)
    }

    /// Decode a constrained non-negative INTEGER with bounds `[lower, upper]`.
    pub fn read_constrained_uint(&mut self, lower: u64, upper: u64) -> Result<u64> {
        let value = self.constrained_uint_core(lower, upper)?;
        self.event(|s| s.uint_value(value));
        Ok(value)
    }

    /// Decode a constrained INTEGER whose range carries an extension marker:
    /// one bit selects the root range or the unconstrained form.
    pub fn read_constrained_uint_ext(&mut self, lower: u64, upper: u64) -> Result<u64> {
        if self.read_bit()? == 1 {
            let value = self.read_unconstrained_int()?;
            if value < 0 {
                return Err(self.fail(ErrorKind::ConstraintViolation));
            }
            return Ok(value as u64);
        }
        self.read_constrained_uint(lower, upper)
    }

    /// Decode an unconstrained INTEGER: a length determinant followed by
    /// that many octets of two's-complement value.
    pub fn read_unconstrained_int(&mut self) -> Result<i64> {
        let (len, _) = self.read_general_length()?;
        if len == 0 || len > 8 {
            return Err(self.fail(ErrorKind::LengthOverflow));
        }

        let octets = self.read_octets(len)?;
        let mut value: i64 = if octets[0] & 0x80 != 0 { -1 } else { 0 };
        for octet in octets {
            value = value << 8 | i64::from(*octet);
        }

        self.event(|s| s.int_value(value));
        Ok(value)
    }

    /// Decode a small non-negative whole number, used for extension indices:
    /// one bit selects a 6-bit field or the general length-prefixed form.
    pub fn read_small_nonneg(&mut self) -> Result<u64> {
        if self.read_bit()? == 0 {
            return Ok(self.read_bits::<u8>(6)?.to_u64());
        }

        let (len, _) = self.read_general_length()?;
        if len == 0 || len > 8 {
            return Err(self.fail(ErrorKind::LengthOverflow));
        }
        let mut value: u64 = 0;
        for octet in self.read_octets(len)? {
            value = value << 8 | u64::from(*octet);
        }
        Ok(value)
    }

    /// Decode a length determinant, honoring any pending size constraint.
    ///
    /// Returns the length plus a flag that is true when the length is a
    /// fragment and another determinant follows the fragment's content.
    pub fn read_length(&mut self) -> Result<(usize, bool)> {
        match self.pending.take() {
            Some(constraint) => {
                if constraint.extensible && self.read_bit()? == 1 {
                    return self.read_general_length();
                }
                if constraint.lower == constraint.upper {
                    return Ok((constraint.lower, false));
                }
                if constraint.upper > 65535 {
                    return self.read_general_length();
                }
                let len =
                    self.constrained_uint_core(constraint.lower as u64, constraint.upper as u64)?;
                Ok((len as usize, false))
            }
            None => self.read_general_length(),
        }
    }

    /// The general (unconstrained) length form: byte-aligned; one octet for
    /// lengths up to 127, two octets up to 16383, and a fragment marker
    /// covering a multiple of 16384 beyond that.
    fn read_general_length(&mut self) -> Result<(usize, bool)> {
        self.align_to_byte();

        if self.read_bit()? == 0 {
            return Ok((self.read_bits::<u8>(7)?.to_u64() as usize, false));
        }
        if self.read_bit()? == 0 {
            return Ok((self.read_bits::<u16>(14)?.to_u64() as usize, false));
        }

        let fragments = self.read_bits::<u8>(6)?.to_u64() as usize;
        if fragments == 0 || fragments > 4 {
            return Err(self.fail(ErrorKind::LengthOverflow));
        }
        Ok((fragments * 16384, true))
    }

    /// Reserve capacity for `additional` elements, surfacing allocator
    /// refusal as a decode error.
    fn reserve<T>(&self, vec: &mut Vec<T>, additional: usize) -> Result<()> {
        vec.try_reserve(additional)
            .map_err(|_| self.fail(ErrorKind::AllocationFailure))
    }

    /// Decode an OCTET STRING. Fixed-size strings of at most two octets are
    /// read as an unaligned bit field; anything longer is byte-aligned.
    pub fn read_octet_string(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();

        if let Some(constraint) = self.pending {
            if constraint.is_fixed() {
                self.pending = None;
                let len = constraint.lower;
                self.read_octet_string_body(&mut out, len)?;
                self.event(|s| s.octets_value(&out));
                return Ok(out);
            }
        }

        loop {
            let (len, more) = self.read_length()?;
            self.read_octet_string_body(&mut out, len)?;
            if !more {
                break;
            }
        }

        self.event(|s| s.octets_value(&out));
        Ok(out)
    }

    fn read_octet_string_body(&mut self, out: &mut Vec<u8>, len: usize) -> Result<()> {
        if len > self.remaining_octets() + 1 {
            return Err(self.fail(ErrorKind::LengthOverflow));
        }
        self.reserve(out, len)?;

        if len > 2 {
            self.align_to_byte();
            out.extend_from_slice(self.read_octets(len)?);
        } else {
            for _ in 0..len {
                out.push(self.read_bits::<u8>(8)?);
            }
        }
        Ok(())
    }

    /// Decode a BIT STRING. The length determinant counts bits; bodies of
    /// more than 16 bits are byte-aligned, shorter ones never are.
    pub fn read_bit_string(&mut self) -> Result<BitString> {
        let mut data = Vec::new();
        let mut total_bits = 0usize;

        match self.pending {
            Some(constraint) if constraint.is_fixed() => {
                self.pending = None;
                self.read_bit_string_body(&mut data, &mut total_bits, constraint.lower)?;
            }
            _ => loop {
                let (len, more) = self.read_length()?;
                self.read_bit_string_body(&mut data, &mut total_bits, len)?;
                if !more {
                    break;
                }
            },
        }

        let value = BitString::new(data, total_bits);
        self.event(|s| s.bit_string_value(&value.data, value.length));
        Ok(value)
    }

    fn read_bit_string_body(
        &mut self,
        data: &mut Vec<u8>,
        total_bits: &mut usize,
        len: usize,
    ) -> Result<()> {
        if len > self.remaining_bits() + 7 {
            return Err(self.fail(ErrorKind::LengthOverflow));
        }
        self.reserve(data, (len + 7) / 8)?;

        if len > 16 {
            self.align_to_byte();
        }

        // Repack bit-by-bit: fragments need not start at a bit offset that
        // matches the accumulated length.
        for i in 0..len {
            let bit = self.read_bit()?;
            let pos = *total_bits + i;
            if pos % 8 == 0 {
                data.push(0);
            }
            if bit == 1 {
                let last = data.len() - 1;
                data[last] |= 1 << (7 - pos % 8);
            }
        }
        *total_bits += len;
        Ok(())
    }

    /// Decode an OBJECT IDENTIFIER: a length determinant followed by the
    /// base-128 subidentifier contents, with the first octet carrying the
    /// merged first two arcs.
    pub fn read_object_id(&mut self) -> Result<ObjectId> {
        let (len, _) = self.read_length()?;
        if len == 0 {
            return Err(self.fail(ErrorKind::ConstraintViolation));
        }
        if len > self.remaining_octets() {
            return Err(self.fail(ErrorKind::LengthOverflow));
        }

        let contents = self.read_octets(len)?;
        let mut arcs = Vec::new();
        let mut subid: u32 = 0;
        let mut first = true;
        let mut continued = false;

        for octet in contents {
            subid = subid
                .checked_mul(128)
                .and_then(|v| v.checked_add(u32::from(octet & 0x7F)))
                .ok_or_else(|| self.fail(ErrorKind::ConstraintViolation))?;
            if octet & 0x80 != 0 {
                continued = true;
                continue;
            }
            continued = false;

            if first {
                first = false;
                let (a, b) = if subid < 40 {
                    (0, subid)
                } else if subid < 80 {
                    (1, subid - 40)
                } else {
                    (2, subid - 80)
                };
                arcs.push(a);
                arcs.push(b);
            } else {
                arcs.push(subid);
            }
            subid = 0;
        }

        if continued {
            // Trailing continuation octet without a final one.
            return Err(self.fail(ErrorKind::ConstraintViolation));
        }

        let value = ObjectId::new(arcs);
        self.event(|s| s.oid_value(&value));
        Ok(value)
    }

    /// Decode a known-multiplier character string with 8-bit units
    /// (IA5String, PrintableString, GeneralString).
    pub fn read_char_string(&mut self) -> Result<String> {
        let value = self.read_multiplier_string(8, |unit| {
            std::char::from_u32(unit).ok_or(ErrorKind::ConstraintViolation)
        })?;
        self.event(|s| s.char_string_value(&value));
        Ok(value)
    }

    /// Decode a NumericString: 4-bit units indexing the canonical
    /// space-and-digits alphabet.
    pub fn read_numeric_string(&mut self) -> Result<String> {
        let value = self.read_multiplier_string(4, |unit| {
            crate::per::NUMERIC_ALPHABET
                .chars()
                .nth(unit as usize)
                .ok_or(ErrorKind::ConstraintViolation)
        })?;
        self.event(|s| s.char_string_value(&value));
        Ok(value)
    }

    /// Decode a BMPString: 16-bit units holding Basic Multilingual Plane
    /// code points.
    pub fn read_bmp_string(&mut self) -> Result<String> {
        let value = self.read_multiplier_string(16, |unit| {
            std::char::from_u32(unit).ok_or(ErrorKind::ConstraintViolation)
        })?;
        self.event(|s| s.bmp_string_value(&value));
        Ok(value)
    }

    /// Shared body for the known-multiplier string family. The body is
    /// byte-aligned when it exceeds 16 bits.
    fn read_multiplier_string(
        &mut self,
        unit_bits: u32,
        to_char: impl Fn(u32) -> std::result::Result<char, ErrorKind>,
    ) -> Result<String> {
        let mut out = String::new();

        loop {
            let (len, more) = self.read_length()?;
            if len * unit_bits as usize > self.remaining_bits() + 7 {
                return Err(self.fail(ErrorKind::LengthOverflow));
            }
            if len * unit_bits as usize > 16 {
                self.align_to_byte();
            }

            for _ in 0..len {
                let unit = self.read_bits::<u32>(unit_bits)?;
                let c = to_char(unit).map_err(|kind| self.fail(kind))?;
                out.push(c);
            }
            if !more {
                break;
            }
        }

        Ok(out)
    }

    /// Decode an ENUMERATED header. Unknown root values fail under strict
    /// decoding and are surfaced as-is otherwise.
    pub fn read_enumerated(&mut self, num_root: u32, extensible: bool) -> Result<ChoiceTag> {
        if extensible && self.read_bit()? == 1 {
            let index = self.read_small_nonneg()? as u32;
            self.event(|s| s.uint_value(u64::from(index)));
            return Ok(ChoiceTag::Extension(index));
        }

        let range = u64::from(num_root - 1);
        let width = if range == 0 {
            0
        } else {
            64 - range.leading_zeros()
        };
        let raw = self.read_bits::<u64>(width)? as u32;
        if raw >= num_root && self.options.strict_enum() {
            return Err(self.fail(ErrorKind::InvalidEnumerationValue));
        }

        self.event(|s| s.uint_value(u64::from(raw)));
        Ok(ChoiceTag::Root(raw))
    }

    // --- structure -------------------------------------------------------

    /// Decode a SEQUENCE header: the extension-present bit (for extensible
    /// types) followed by the root optional-field bitmap.
    pub fn read_sequence_header(
        &mut self,
        extensible: bool,
        num_optionals: u32,
    ) -> Result<(bool, OptionalBits)> {
        debug_assert!(num_optionals <= 64);

        let ext_present = if extensible {
            self.read_bit()? == 1
        } else {
            false
        };

        let bits = if num_optionals > 0 {
            self.read_bits::<u64>(num_optionals)?
        } else {
            0
        };

        Ok((ext_present, OptionalBits::new(bits, num_optionals)))
    }

    /// Decode the extension-addition presence bitmap of a SEQUENCE: a small
    /// whole number carrying the bit count minus one, then the byte-aligned
    /// bitmap itself.
    pub fn read_extension_bitmap(&mut self) -> Result<Vec<bool>> {
        let count = self.read_small_nonneg()? as usize + 1;
        if count > self.remaining_bits() + 7 {
            return Err(self.fail(ErrorKind::LengthOverflow));
        }

        self.align_to_byte();

        let mut bitmap = Vec::new();
        self.reserve(&mut bitmap, count)?;
        for _ in 0..count {
            bitmap.push(self.read_bit()? == 1);
        }

        Ok(bitmap)
    }

    /// Decode a CHOICE header. Root alternatives arrive as a constrained
    /// index, extension additions as a small whole number after the
    /// extension bit.
    pub fn read_choice_header(&mut self, num_root: u32, extensible: bool) -> Result<ChoiceTag> {
        if extensible && self.read_bit()? == 1 {
            return Ok(ChoiceTag::Extension(self.read_small_nonneg()? as u32));
        }

        let index = if num_root == 1 {
            0
        } else {
            let range = u64::from(num_root - 1);
            let width = 64 - range.leading_zeros();
            self.read_bits::<u64>(width)? as u32
        };
        if index >= num_root {
            return Err(self.fail(ErrorKind::InvalidChoiceIndex));
        }

        Ok(ChoiceTag::Root(index))
    }

    /// Read an open-type container into an owned buffer, reassembling
    /// fragments. The cursor ends just past the container.
    pub fn read_open_type_bytes(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        loop {
            let (len, more) = self.read_general_length()?;
            if len > self.remaining_octets() {
                return Err(self.fail(ErrorKind::LengthOverflow));
            }
            self.reserve(&mut out, len)?;
            out.extend_from_slice(self.read_octets(len)?);
            if !more {
                break;
            }
        }
        Ok(out)
    }

    /// Decode an open type by running `f` over a scoped sub-reader of the
    /// container bytes. An over-read inside the container cannot disturb
    /// this reader's cursor.
    pub fn open_type<T>(
        &mut self,
        f: impl FnOnce(&mut PerReader<'_, '_>) -> Result<T>,
    ) -> Result<T> {
        let data = self.read_open_type_bytes()?;
        self.decode_nested(&data, f)
    }

    /// Decode a known extension addition: like `open_type`, but an empty
    /// container decodes as absent.
    pub fn open_type_optional<T>(
        &mut self,
        f: impl FnOnce(&mut PerReader<'_, '_>) -> Result<T>,
    ) -> Result<Option<T>> {
        let data = self.read_open_type_bytes()?;
        if data.is_empty() {
            return Ok(None);
        }
        self.decode_nested(&data, f).map(Some)
    }

    /// Consume an open-type container without decoding it, reporting it to
    /// the sink and returning its bytes.
    pub fn skip_open_type(&mut self) -> Result<Vec<u8>> {
        let data = self.read_open_type_bytes()?;
        self.event(|s| s.open_type_value(&data));
        Ok(data)
    }

    /// Consume an unknown extension addition, retaining its bytes on `out`
    /// when the options ask for preservation.
    pub fn read_unknown_extension(
        &mut self,
        index: u32,
        out: &mut Vec<RawExtension>,
    ) -> Result<()> {
        let data = self.skip_open_type()?;
        if self.options.preserve_unknown_extensions() {
            out.push(RawExtension { index, data });
        }
        Ok(())
    }

    /// Walk a SEQUENCE's extension-addition block when the schema in use
    /// knows none of the additions: every present container is consumed and
    /// preserved (or dropped) as unknown.
    pub fn read_remaining_extensions(&mut self, ext_present: bool) -> Result<Vec<RawExtension>> {
        let mut out = Vec::new();
        if ext_present {
            let bitmap = self.read_extension_bitmap()?;
            for (index, present) in bitmap.iter().enumerate() {
                if *present {
                    self.read_unknown_extension(index as u32, &mut out)?;
                }
            }
        }
        Ok(out)
    }

    /// Run `f` over a sub-reader rebased onto `data`, inheriting options and
    /// sink and charging one level of nesting depth.
    pub fn decode_nested<T>(
        &mut self,
        data: &[u8],
        f: impl FnOnce(&mut PerReader<'_, '_>) -> Result<T>,
    ) -> Result<T> {
        if self.depth >= self.options.max_recursion_depth {
            return Err(self.fail(ErrorKind::ConstraintViolation));
        }

        let mut sub = PerReader {
            buf: data,
            byte: 0,
            bit: 0,
            pending: None,
            options: self.options,
            depth: self.depth + 1,
            sink: self.sink.take(),
        };
        let result = f(&mut sub);
        self.sink = sub.sink;
        result
    }

    /// Charge a level of nesting depth for a directly recursive type.
    pub fn enter_nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.options.max_recursion_depth {
            return Err(self.fail(ErrorKind::ConstraintViolation));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Decode a SEQUENCE OF, honoring a pending size constraint and looping
    /// over fragmented length determinants.
    pub fn read_sequence_of<T>(
        &mut self,
        name: &str,
        mut f: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut out = Vec::new();
        let mut index: i64 = 0;

        loop {
            let (count, more) = self.read_length()?;
            self.reserve(&mut out, count)?;
            for _ in 0..count {
                self.event(|s| s.start_element(name, index));
                out.push(f(self)?);
                self.event(|s| s.end_element(name, index));
                index += 1;
            }
            if !more {
                break;
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::per::types::{CodecOption, SizeConstraint};

    #[test]
    fn read_unaligned_bits() {
        let data = [0xFF, 0x72, 0x1C, 0x1F];
        let mut reader = PerReader::new(&data[..]);

        assert_eq!(0x07, reader.read_bits::<u8>(3).unwrap());
        assert_eq!(0x3E, reader.read_bits::<u8>(6).unwrap());
        assert_eq!(0x721C1F, reader.read_bits::<u32>(23).unwrap());
        reader.read_bits::<u8>(1).unwrap_err();
    }

    #[test]
    fn align_and_read_octets() {
        let data = [0xA5, 0x01, 0x02, 0x03];
        let mut reader = PerReader::new(&data[..]);

        assert_eq!(1, reader.read_bit().unwrap());
        reader.align_to_byte();
        assert_eq!(&[0x01, 0x02], reader.read_octets(2).unwrap());
        reader.align_to_byte();
        assert_eq!(&[0x03], reader.read_octets(1).unwrap());
        reader.read_octets(1).unwrap_err();
    }

    #[test]
    fn checkpoint_rollback() {
        let data = [0xF0, 0x0F];
        let mut reader = PerReader::new(&data[..]);

        reader.skip_bits(3).unwrap();
        let mark = reader.checkpoint();
        assert_eq!(0b10000, reader.read_bits::<u8>(5).unwrap());
        reader.rollback(mark);
        assert_eq!(0b10000, reader.read_bits::<u8>(5).unwrap());
    }

    #[test]
    fn constrained_uint_widths() {
        // range 1: no bits; range 8: 3 bits; range 256: 8 bits.
        let data = [0b101_00000, 0x2A];
        let mut reader = PerReader::new(&data[..]);

        assert_eq!(7, reader.read_constrained_uint(7, 7).unwrap());
        assert_eq!(5, reader.read_constrained_uint(0, 7).unwrap());
        reader.align_to_byte();
        assert_eq!(0x2A, reader.read_constrained_uint(0, 255).unwrap());
    }

    #[test]
    fn constrained_uint_sixteen_bit_aligned() {
        let data = [0b1000_0000, 0x13, 0xC4];
        let mut reader = PerReader::new(&data[..]);

        assert_eq!(1, reader.read_bit().unwrap());
        // range 65536: aligned 16-bit field.
        assert_eq!(5060, reader.read_constrained_uint(0, 65535).unwrap());
    }

    #[test]
    fn constrained_uint_offset_by_lower_bound() {
        let data = [0x00, 0x00];
        let mut reader = PerReader::new(&data[..]);

        assert_eq!(1, reader.read_constrained_uint(1, 65535).unwrap());
    }

    #[test]
    fn general_length_forms() {
        let data = [0x2A, 0x96, 0x05, 0xC2];
        let mut reader = PerReader::new(&data[..]);

        assert_eq!((42, false), reader.read_length().unwrap());
        assert_eq!((5637, false), reader.read_length().unwrap());
        assert_eq!((32768, true), reader.read_length().unwrap());
    }

    #[test]
    fn length_with_constraint_consumes_no_bits_when_fixed() {
        let data = [0xFF];
        let mut reader = PerReader::new(&data[..]);

        reader.set_size_constraint(SizeConstraint::fixed(16));
        assert_eq!((16, false), reader.read_length().unwrap());
        assert_eq!(0xFF, reader.read_bits::<u8>(8).unwrap());
    }

    #[test]
    fn length_with_range_constraint() {
        // SIZE(1..128): 7-bit field holding length - 1.
        let data = [0b0000110_0];
        let mut reader = PerReader::new(&data[..]);

        reader.set_size_constraint(SizeConstraint::range(1, 128));
        assert_eq!((7, false), reader.read_length().unwrap());
    }

    #[test]
    fn small_nonneg_forms() {
        let data = [0b0_101010_1, 0x01, 0x48];
        let mut reader = PerReader::new(&data[..]);

        assert_eq!(42, reader.read_small_nonneg().unwrap());
        // Second form: flag bit 1, then a length-prefixed value.
        assert_eq!(0x48, reader.read_small_nonneg().unwrap());
    }

    #[test]
    fn unconstrained_int_two_complement() {
        let data = [0x02, 0xFF, 0x38];
        let mut reader = PerReader::new(&data[..]);

        assert_eq!(-200, reader.read_unconstrained_int().unwrap());
    }

    #[test]
    fn octet_string_variable_aligns_above_two() {
        let data = [0x03, 0xAA, 0xBB, 0xCC];
        let mut reader = PerReader::new(&data[..]);

        assert_eq!(vec![0xAA, 0xBB, 0xCC], reader.read_octet_string().unwrap());
    }

    #[test]
    fn octet_string_fixed_short_stays_unaligned() {
        // SIZE(2) fixed: no determinant, no alignment.
        let data = [0b1010_1010, 0b1111_0000, 0b1100_0000];
        let mut reader = PerReader::new(&data[..]);

        reader.skip_bits(4).unwrap();
        reader.set_size_constraint(SizeConstraint::fixed(2));
        assert_eq!(vec![0xAF, 0x0C], reader.read_octet_string().unwrap());
    }

    #[test]
    fn object_id_first_arc_merge() {
        // { 0 0 8 2250 0 4 }
        let data = [0x06, 0x00, 0x08, 0x91, 0x4A, 0x00, 0x04];
        let mut reader = PerReader::new(&data[..]);

        let oid = reader.read_object_id().unwrap();
        assert_eq!(vec![0, 0, 8, 2250, 0, 4], oid.arcs);
    }

    #[test]
    fn bmp_string_single_char_unaligned() {
        // One 16-bit unit: length 1, body not aligned.
        let data = [0x01, 0x00, 0x41];
        let mut reader = PerReader::new(&data[..]);

        assert_eq!("A", reader.read_bmp_string().unwrap());
    }

    #[test]
    fn choice_header_root_and_extension() {
        // ext=0, index 2 of 7 roots (3 bits); then ext=1, small index 4.
        let data = [0b0010_1000, 0b0100_0000];
        let mut reader = PerReader::new(&data[..]);

        assert_eq!(
            ChoiceTag::Root(2),
            reader.read_choice_header(7, true).unwrap()
        );
        assert_eq!(
            ChoiceTag::Extension(4),
            reader.read_choice_header(7, true).unwrap()
        );
    }

    #[test]
    fn choice_header_rejects_out_of_range_root() {
        // 5-bit index 27 with only 25 roots.
        let data = [0b0_11011_00];
        let mut reader = PerReader::new(&data[..]);

        let err = reader.read_choice_header(25, true).unwrap_err();
        assert_eq!(ErrorKind::InvalidChoiceIndex, err.kind);
    }

    #[test]
    fn sequence_header_bits() {
        let data = [0b1_1010_000];
        let mut reader = PerReader::new(&data[..]);

        let (ext, opts) = reader.read_sequence_header(true, 4).unwrap();
        assert!(ext);
        assert!(opts.get(0));
        assert!(!opts.get(1));
        assert!(opts.get(2));
        assert!(!opts.get(3));
    }

    #[test]
    fn extension_bitmap_is_aligned() {
        // count-1 = 2 (6 bits after the flag bit), align, 3 bits 101.
        let data = [0b0_000010_0, 0b101_00000];
        let mut reader = PerReader::new(&data[..]);

        assert_eq!(
            vec![true, false, true],
            reader.read_extension_bitmap().unwrap()
        );
    }

    #[test]
    fn open_type_scoping_protects_parent() {
        // Container of 2 octets; nested decode over-reads, parent cursor
        // still lands just past the container.
        let data = [0x02, 0xAA, 0xBB, 0x7F];
        let mut reader = PerReader::new(&data[..]);

        let result: crate::error::Result<u64> = reader.open_type(|r| r.read_bits::<u64>(24));
        assert_eq!(ErrorKind::EndOfBuffer, result.unwrap_err().kind);
        assert_eq!(0x7F, reader.read_bits::<u8>(8).unwrap());
    }

    #[test]
    fn unknown_extension_preserved_or_dropped() {
        let data = [0x03, 0xAA, 0xBB, 0xCC];
        let mut reader = PerReader::new(&data[..]);
        let mut kept = Vec::new();
        reader.read_unknown_extension(5, &mut kept).unwrap();
        assert_eq!(1, kept.len());
        assert_eq!(5, kept[0].index);
        assert_eq!(vec![0xAA, 0xBB, 0xCC], kept[0].data);

        let mut options = CodecOptions::default();
        options.flags.remove(CodecOption::PRESERVE_UNKNOWN_EXTENSIONS);
        let mut reader = PerReader::with_options(&data[..], options);
        let mut dropped = Vec::new();
        reader.read_unknown_extension(5, &mut dropped).unwrap();
        assert!(dropped.is_empty());
    }

    #[test]
    fn sequence_of_fragmented_length() {
        // 16384 + 3 booleans: fragment marker 0xC1, 2048 octets of bits,
        // then a final short determinant of 3.
        let mut data = vec![0xC1];
        data.extend(std::iter::repeat(0xFF).take(2048));
        data.push(0x03);
        data.push(0b111_00000);

        let mut reader = PerReader::new(&data[..]);
        let items = reader
            .read_sequence_of("element", |r| r.read_boolean())
            .unwrap();
        assert_eq!(16387, items.len());
        assert!(items.iter().all(|b| *b));
    }

    #[test]
    fn recursion_depth_is_bounded() {
        let options = CodecOptions {
            max_recursion_depth: 2,
            ..CodecOptions::default()
        };
        let data = [0x00];
        let mut reader = PerReader::with_options(&data[..], options);

        let result: Result<()> = reader.enter_nested(|r| {
            r.enter_nested(|r| r.enter_nested(|_| unreachable!("depth limit must trip first")))
        });
        assert_eq!(ErrorKind::ConstraintViolation, result.unwrap_err().kind);
    }

    #[test]
    fn cursor_advances_on_every_primitive() {
        let data = [0x80, 0x03, 0xAA, 0xBB, 0xCC];
        let mut reader = PerReader::new(&data[..]);

        let before = reader.checkpoint();
        reader.read_boolean().unwrap();
        assert_ne!(before, reader.checkpoint());

        let before = reader.checkpoint();
        reader.read_octet_string().unwrap();
        assert_ne!(before, reader.checkpoint());
        assert_eq!(5, reader.consumed_octets());
    }

    #[test]
    fn enumerated_strict_and_lenient() {
        // 3-valued enumeration read from 2 bits; raw value 3 is unnamed.
        let data = [0b11_000000];
        let mut reader = PerReader::new(&data[..]);
        let err = reader.read_enumerated(3, false).unwrap_err();
        assert_eq!(ErrorKind::InvalidEnumerationValue, err.kind);

        let mut options = CodecOptions::default();
        options.flags.remove(CodecOption::STRICT_ENUM);
        let mut reader = PerReader::with_options(&data[..], options);
        assert_eq!(ChoiceTag::Root(3), reader.read_enumerated(3, false).unwrap());
    }
}
