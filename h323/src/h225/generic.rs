//! Generic framework data: self-describing parameter trees attached to
//! H.225 messages. `Content` is recursive through its compound and nested
//! alternatives; decoding charges the shared nesting limit so a hostile
//! tree fails cleanly instead of exhausting the stack.

use crate::error::{ErrorKind, Result};
use crate::h225::types::{AliasAddress, TransportAddress};
use crate::per::{
    ChoiceTag, ObjectId, PerReader, PerWriter, RawExtension, SizeConstraint,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenericIdentifier {
    /// Standard identifier, extensible integer range.
    Standard(u32),
    Oid(ObjectId),
    /// 16-octet globally unique value.
    NonStandard(Vec<u8>),
    Unknown(RawExtension),
}

impl GenericIdentifier {
    const NUM_ROOT: u32 = 3;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::Standard(
                r.element("standard", |r| r.read_constrained_uint_ext(0, 16383))? as u32,
            )),
            ChoiceTag::Root(1) => Ok(Self::Oid(r.element("oid", |r| r.read_object_id())?)),
            ChoiceTag::Root(2) => Ok(Self::NonStandard(r.element("nonStandard", |r| {
                r.set_size_constraint(SizeConstraint::fixed(16));
                r.read_octet_string()
            })?)),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::Standard(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                w.write_constrained_uint_ext(u64::from(*v), 0, 16383)
            }
            Self::Oid(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                w.write_object_id(v)
            }
            Self::NonStandard(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                w.set_size_constraint(SizeConstraint::fixed(16));
                w.write_octet_string(v)
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    Raw(Vec<u8>),
    Text(String),
    Unicode(String),
    Bool(bool),
    Number8(u8),
    Number16(u16),
    Number32(u32),
    Id(GenericIdentifier),
    Alias(AliasAddress),
    Transport(TransportAddress),
    Compound(Vec<EnumeratedParameter>),
    Nested(Vec<GenericData>),
    Unknown(RawExtension),
}

impl Content {
    const NUM_ROOT: u32 = 12;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        r.enter_nested(|r| match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::Raw(r.element("raw", |r| r.read_octet_string())?)),
            ChoiceTag::Root(1) => Ok(Self::Text(r.element("text", |r| r.read_char_string())?)),
            ChoiceTag::Root(2) => Ok(Self::Unicode(
                r.element("unicode", |r| r.read_bmp_string())?,
            )),
            ChoiceTag::Root(3) => Ok(Self::Bool(r.element("bool", |r| r.read_boolean())?)),
            ChoiceTag::Root(4) => Ok(Self::Number8(
                r.element("number8", |r| r.read_constrained_uint(0, 255))? as u8,
            )),
            ChoiceTag::Root(5) => Ok(Self::Number16(
                r.element("number16", |r| r.read_constrained_uint(0, 65535))? as u16,
            )),
            ChoiceTag::Root(6) => Ok(Self::Number32(
                r.element("number32", |r| {
                    r.read_constrained_uint(0, u64::from(u32::MAX))
                })? as u32,
            )),
            ChoiceTag::Root(7) => Ok(Self::Id(r.element("id", GenericIdentifier::decode)?)),
            ChoiceTag::Root(8) => Ok(Self::Alias(r.element("alias", AliasAddress::decode)?)),
            ChoiceTag::Root(9) => Ok(Self::Transport(
                r.element("transport", TransportAddress::decode)?,
            )),
            ChoiceTag::Root(10) => Ok(Self::Compound(r.element("compound", |r| {
                r.set_size_constraint(SizeConstraint::range(1, 512));
                r.read_sequence_of("compound", EnumeratedParameter::decode)
            })?)),
            ChoiceTag::Root(11) => Ok(Self::Nested(r.element("nested", |r| {
                r.set_size_constraint(SizeConstraint::range(1, 16));
                r.read_sequence_of("nested", GenericData::decode)
            })?)),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::Raw(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                w.write_octet_string(v)
            }
            Self::Text(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                w.write_char_string(v)
            }
            Self::Unicode(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                w.write_bmp_string(v)
            }
            Self::Bool(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                w.write_boolean(*v)
            }
            Self::Number8(v) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
                w.write_constrained_uint(u64::from(*v), 0, 255)
            }
            Self::Number16(v) => {
                w.write_choice_root(5, Self::NUM_ROOT, true)?;
                w.write_constrained_uint(u64::from(*v), 0, 65535)
            }
            Self::Number32(v) => {
                w.write_choice_root(6, Self::NUM_ROOT, true)?;
                w.write_constrained_uint(u64::from(*v), 0, u64::from(u32::MAX))
            }
            Self::Id(v) => {
                w.write_choice_root(7, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Alias(v) => {
                w.write_choice_root(8, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Transport(v) => {
                w.write_choice_root(9, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Compound(v) => {
                w.write_choice_root(10, Self::NUM_ROOT, true)?;
                w.set_size_constraint(SizeConstraint::range(1, 512));
                w.write_sequence_of(v, |w, p| p.encode(w))
            }
            Self::Nested(v) => {
                w.write_choice_root(11, Self::NUM_ROOT, true)?;
                w.set_size_constraint(SizeConstraint::range(1, 16));
                w.write_sequence_of(v, |w, d| d.encode(w))
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumeratedParameter {
    pub id: GenericIdentifier,
    pub content: Option<Content>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl EnumeratedParameter {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let id = r.element("id", GenericIdentifier::decode)?;
        let content = if opt.get(0) {
            Some(r.element("content", Content::decode)?)
        } else {
            None
        };

        let mut unknown_extensions = Vec::new();
        if ext {
            let bitmap = r.read_extension_bitmap()?;
            for (index, present) in bitmap.iter().enumerate() {
                if *present {
                    r.read_unknown_extension(index as u32, &mut unknown_extensions)?;
                }
            }
        }

        Ok(Self {
            id,
            content,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = crate::per::ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.content.is_some()])?;
        self.id.encode(w)?;
        if let Some(v) = &self.content {
            v.encode(w)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericData {
    pub id: GenericIdentifier,
    pub parameters: Option<Vec<EnumeratedParameter>>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl GenericData {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let id = r.element("id", GenericIdentifier::decode)?;
        let parameters = if opt.get(0) {
            Some(r.element("parameters", |r| {
                r.set_size_constraint(SizeConstraint::range(1, 512));
                r.read_sequence_of("parameters", EnumeratedParameter::decode)
            })?)
        } else {
            None
        };

        let mut unknown_extensions = Vec::new();
        if ext {
            let bitmap = r.read_extension_bitmap()?;
            for (index, present) in bitmap.iter().enumerate() {
                if *present {
                    r.read_unknown_extension(index as u32, &mut unknown_extensions)?;
                }
            }
        }

        Ok(Self {
            id,
            parameters,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = crate::per::ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.parameters.is_some()])?;
        self.id.encode(w)?;
        if let Some(v) = &self.parameters {
            w.set_size_constraint(SizeConstraint::range(1, 512));
            w.write_sequence_of(v, |w, p| p.encode(w))?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::per::{CodecOptions, PerReader, PerWriter};

    fn nested_data(depth: usize) -> GenericData {
        let mut value = GenericData {
            id: GenericIdentifier::Standard(1),
            parameters: None,
            unknown_extensions: Vec::new(),
        };
        for _ in 0..depth {
            value = GenericData {
                id: GenericIdentifier::Standard(1),
                parameters: Some(vec![EnumeratedParameter {
                    id: GenericIdentifier::Standard(2),
                    content: Some(Content::Nested(vec![value])),
                    unknown_extensions: Vec::new(),
                }]),
                unknown_extensions: Vec::new(),
            };
        }
        value
    }

    #[test]
    fn generic_data_round_trip() {
        let value = GenericData {
            id: GenericIdentifier::Oid(crate::per::ObjectId::new(vec![0, 0, 8, 460, 2])),
            parameters: Some(vec![
                EnumeratedParameter {
                    id: GenericIdentifier::Standard(7),
                    content: Some(Content::Number16(300)),
                    unknown_extensions: Vec::new(),
                },
                EnumeratedParameter {
                    id: GenericIdentifier::Standard(8),
                    content: Some(Content::Text("feature".into())),
                    unknown_extensions: Vec::new(),
                },
            ]),
            unknown_extensions: Vec::new(),
        };

        let encoded = PerWriter::encode_to_bytes(|w| value.encode(w)).unwrap();
        let mut reader = PerReader::new(&encoded);
        assert_eq!(value, GenericData::decode(&mut reader).unwrap());
    }

    #[test]
    fn recursion_limit_trips_on_deep_nesting() {
        let value = nested_data(40);
        let encoded = PerWriter::encode_to_bytes(|w| value.encode(w)).unwrap();

        let mut reader = PerReader::new(&encoded);
        let err = GenericData::decode(&mut reader).unwrap_err();
        assert_eq!(ErrorKind::ConstraintViolation, err.kind);
    }

    #[test]
    fn recursion_within_limit_succeeds() {
        let value = nested_data(8);
        let encoded = PerWriter::encode_to_bytes(|w| value.encode(w)).unwrap();

        let mut reader = PerReader::with_options(&encoded, CodecOptions::default());
        assert_eq!(value, GenericData::decode(&mut reader).unwrap());
    }
}
