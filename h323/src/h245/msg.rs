//! H.245 PDU layer: the four message classes and their bodies.

use crate::error::{ErrorKind, Result};
use crate::h245::types::*;
use crate::per::null_choice;
use crate::per::{
    ChoiceTag, ExtensionAdditions, ObjectId, PerReader, PerWriter, RawExtension, SizeConstraint,
};

/// An extensible SEQUENCE with no root fields at all; several release and
/// off commands have this shape.
macro_rules! empty_sequence {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Default)]
        pub struct $name {
            pub unknown_extensions: Vec<RawExtension>,
        }

        impl $name {
            pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
                let (ext, _) = r.read_sequence_header(true, 0)?;
                let unknown_extensions = r.read_remaining_extensions(ext)?;
                Ok(Self { unknown_extensions })
            }

            pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
                let mut ext = ExtensionAdditions::new();
                for raw in &self.unknown_extensions {
                    ext.raw(raw);
                }
                w.write_sequence_header(true, !ext.is_empty(), &[])?;
                if !ext.is_empty() {
                    ext.write(w)?;
                }
                Ok(())
            }
        }
    };
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NonStandardMessage {
    pub non_standard_data: NonStandardParameter,
    pub unknown_extensions: Vec<RawExtension>,
}

impl NonStandardMessage {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let non_standard_data = NonStandardParameter::decode(r)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            non_standard_data,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        self.non_standard_data.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

// --- master/slave determination --------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MasterSlaveDetermination {
    pub terminal_type: u8,
    pub status_determination_number: u32,
    pub unknown_extensions: Vec<RawExtension>,
}

impl MasterSlaveDetermination {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let terminal_type = r.read_constrained_uint(0, 255)? as u8;
        let status_determination_number = r.read_constrained_uint(0, 16_777_215)? as u32;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            terminal_type,
            status_determination_number,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_constrained_uint(u64::from(self.terminal_type), 0, 255)?;
        w.write_constrained_uint(u64::from(self.status_determination_number), 0, 16_777_215)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

null_choice! {
    MsdDecision { Master, Slave }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MasterSlaveDeterminationAck {
    pub decision: MsdDecision,
    pub unknown_extensions: Vec<RawExtension>,
}

impl MasterSlaveDeterminationAck {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let decision = MsdDecision::decode(r)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;
        Ok(Self {
            decision,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        self.decision.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

null_choice! {
    MsdRejectCause { IdenticalNumbers }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MasterSlaveDeterminationReject {
    pub cause: MsdRejectCause,
    pub unknown_extensions: Vec<RawExtension>,
}

impl MasterSlaveDeterminationReject {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let cause = MsdRejectCause::decode(r)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;
        Ok(Self {
            cause,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        self.cause.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

empty_sequence! { MasterSlaveDeterminationRelease }

// --- capability exchange ---------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalCapabilitySet {
    pub sequence_number: u8,
    pub protocol_identifier: ObjectId,
    pub multiplex_capability: Option<MultiplexCapability>,
    pub capability_table: Option<Vec<CapabilityTableEntry>>,
    pub capability_descriptors: Option<Vec<CapabilityDescriptor>>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl TerminalCapabilitySet {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 3)?;
        let sequence_number = r.read_constrained_uint(0, 255)? as u8;
        let protocol_identifier = r.read_object_id()?;
        let multiplex_capability = r.optional(opt.get(0), MultiplexCapability::decode)?;
        let capability_table = r.optional(opt.get(1), |r| {
            r.set_size_constraint(SizeConstraint::range(1, 256));
            r.read_sequence_of("capabilityTable", CapabilityTableEntry::decode)
        })?;
        let capability_descriptors = r.optional(opt.get(2), |r| {
            r.set_size_constraint(SizeConstraint::range(1, 256));
            r.read_sequence_of("capabilityDescriptors", CapabilityDescriptor::decode)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            sequence_number,
            protocol_identifier,
            multiplex_capability,
            capability_table,
            capability_descriptors,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(
            true,
            !ext.is_empty(),
            &[
                self.multiplex_capability.is_some(),
                self.capability_table.is_some(),
                self.capability_descriptors.is_some(),
            ],
        )?;
        w.write_constrained_uint(u64::from(self.sequence_number), 0, 255)?;
        w.write_object_id(&self.protocol_identifier)?;
        if let Some(v) = &self.multiplex_capability {
            v.encode(w)?;
        }
        if let Some(v) = &self.capability_table {
            w.set_size_constraint(SizeConstraint::range(1, 256));
            w.write_sequence_of(v, |w, e| e.encode(w))?;
        }
        if let Some(v) = &self.capability_descriptors {
            w.set_size_constraint(SizeConstraint::range(1, 256));
            w.write_sequence_of(v, |w, d| d.encode(w))?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalCapabilitySetAck {
    pub sequence_number: u8,
    pub unknown_extensions: Vec<RawExtension>,
}

impl TerminalCapabilitySetAck {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let sequence_number = r.read_constrained_uint(0, 255)? as u8;
        let unknown_extensions = r.read_remaining_extensions(ext)?;
        Ok(Self {
            sequence_number,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_constrained_uint(u64::from(self.sequence_number), 0, 255)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableEntryCapacityExceeded {
    HighestEntryNumberProcessed(u16),
    NoneProcessed,
}

impl TableEntryCapacityExceeded {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(2, false)? {
            ChoiceTag::Root(0) => Ok(Self::HighestEntryNumberProcessed(
                r.read_constrained_uint(1, 65535)? as u16,
            )),
            ChoiceTag::Root(1) => {
                r.read_null()?;
                Ok(Self::NoneProcessed)
            }
            _ => Err(r.error(ErrorKind::InvalidChoiceIndex)),
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::HighestEntryNumberProcessed(v) => {
                w.write_choice_root(0, 2, false)?;
                w.write_constrained_uint(u64::from(*v), 1, 65535)
            }
            Self::NoneProcessed => {
                w.write_choice_root(1, 2, false)?;
                w.write_null()
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TcsRejectCause {
    Unspecified,
    UndefinedTableEntryUsed,
    DescriptorCapacityExceeded,
    TableEntryCapacityExceeded(TableEntryCapacityExceeded),
    Unknown(RawExtension),
}

impl TcsRejectCause {
    const NUM_ROOT: u32 = 4;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => {
                r.read_null()?;
                Ok(Self::Unspecified)
            }
            ChoiceTag::Root(1) => {
                r.read_null()?;
                Ok(Self::UndefinedTableEntryUsed)
            }
            ChoiceTag::Root(2) => {
                r.read_null()?;
                Ok(Self::DescriptorCapacityExceeded)
            }
            ChoiceTag::Root(3) => Ok(Self::TableEntryCapacityExceeded(
                TableEntryCapacityExceeded::decode(r)?,
            )),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let index = match self {
            Self::Unspecified => 0,
            Self::UndefinedTableEntryUsed => 1,
            Self::DescriptorCapacityExceeded => 2,
            Self::TableEntryCapacityExceeded(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                return v.encode(w);
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                return w.write_open_type(&ext.data);
            }
        };
        w.write_choice_root(index, Self::NUM_ROOT, true)?;
        w.write_null()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalCapabilitySetReject {
    pub sequence_number: u8,
    pub cause: TcsRejectCause,
    pub unknown_extensions: Vec<RawExtension>,
}

impl TerminalCapabilitySetReject {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let sequence_number = r.read_constrained_uint(0, 255)? as u8;
        let cause = TcsRejectCause::decode(r)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;
        Ok(Self {
            sequence_number,
            cause,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_constrained_uint(u64::from(self.sequence_number), 0, 255)?;
        self.cause.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

empty_sequence! { TerminalCapabilitySetRelease }

// --- logical channel signaling ---------------------------------------------

/// Multiplex parameters of the forward channel. H.323 endpoints reach the
/// H.225.0 parameters through the extension half of this CHOICE.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ForwardMultiplexParameters {
    H222LogicalChannelParameters(H222LogicalChannelParameters),
    H223LogicalChannelParameters(H223LogicalChannelParameters),
    V76LogicalChannelParameters(V76LogicalChannelParameters),
    H2250LogicalChannelParameters(H2250LogicalChannelParameters),
    Unknown(RawExtension),
}

impl ForwardMultiplexParameters {
    const NUM_ROOT: u32 = 3;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::H222LogicalChannelParameters(
                H222LogicalChannelParameters::decode(r)?,
            )),
            ChoiceTag::Root(1) => Ok(Self::H223LogicalChannelParameters(
                H223LogicalChannelParameters::decode(r)?,
            )),
            ChoiceTag::Root(2) => Ok(Self::V76LogicalChannelParameters(
                V76LogicalChannelParameters::decode(r)?,
            )),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(0) => Ok(Self::H2250LogicalChannelParameters(
                r.open_type(H2250LogicalChannelParameters::decode)?,
            )),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::H222LogicalChannelParameters(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::H223LogicalChannelParameters(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::V76LogicalChannelParameters(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::H2250LogicalChannelParameters(v) => {
                w.write_choice_extension(0)?;
                let payload = PerWriter::encode_to_bytes(|w| v.encode(w))?;
                w.write_open_type(&payload)
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReverseMultiplexParameters {
    H223LogicalChannelParameters(H223LogicalChannelParameters),
    V76LogicalChannelParameters(V76LogicalChannelParameters),
    H2250LogicalChannelParameters(H2250LogicalChannelParameters),
    Unknown(RawExtension),
}

impl ReverseMultiplexParameters {
    const NUM_ROOT: u32 = 2;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::H223LogicalChannelParameters(
                H223LogicalChannelParameters::decode(r)?,
            )),
            ChoiceTag::Root(1) => Ok(Self::V76LogicalChannelParameters(
                V76LogicalChannelParameters::decode(r)?,
            )),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(0) => Ok(Self::H2250LogicalChannelParameters(
                r.open_type(H2250LogicalChannelParameters::decode)?,
            )),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::H223LogicalChannelParameters(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::V76LogicalChannelParameters(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::H2250LogicalChannelParameters(v) => {
                w.write_choice_extension(0)?;
                let payload = PerWriter::encode_to_bytes(|w| v.encode(w))?;
                w.write_open_type(&payload)
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForwardLogicalChannelParameters {
    pub port_number: Option<u16>,
    pub data_type: DataType,
    pub multiplex_parameters: ForwardMultiplexParameters,
    pub unknown_extensions: Vec<RawExtension>,
}

impl ForwardLogicalChannelParameters {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let port_number =
            r.optional(opt.get(0), |r| Ok(r.read_constrained_uint(0, 65535)? as u16))?;
        let data_type = DataType::decode(r)?;
        let multiplex_parameters = ForwardMultiplexParameters::decode(r)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            port_number,
            data_type,
            multiplex_parameters,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.port_number.is_some()])?;
        if let Some(v) = &self.port_number {
            w.write_constrained_uint(u64::from(*v), 0, 65535)?;
        }
        self.data_type.encode(w)?;
        self.multiplex_parameters.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReverseLogicalChannelParameters {
    pub data_type: DataType,
    pub multiplex_parameters: Option<ReverseMultiplexParameters>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl ReverseLogicalChannelParameters {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let data_type = DataType::decode(r)?;
        let multiplex_parameters = r.optional(opt.get(0), ReverseMultiplexParameters::decode)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            data_type,
            multiplex_parameters,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.multiplex_parameters.is_some()])?;
        self.data_type.encode(w)?;
        if let Some(v) = &self.multiplex_parameters {
            v.encode(w)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenLogicalChannel {
    pub forward_logical_channel_number: LogicalChannelNumber,
    pub forward_logical_channel_parameters: ForwardLogicalChannelParameters,
    pub reverse_logical_channel_parameters: Option<ReverseLogicalChannelParameters>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl OpenLogicalChannel {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let forward_logical_channel_number = read_lcn(r)?;
        let forward_logical_channel_parameters = ForwardLogicalChannelParameters::decode(r)?;
        let reverse_logical_channel_parameters =
            r.optional(opt.get(0), ReverseLogicalChannelParameters::decode)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            forward_logical_channel_number,
            forward_logical_channel_parameters,
            reverse_logical_channel_parameters,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(
            true,
            !ext.is_empty(),
            &[self.reverse_logical_channel_parameters.is_some()],
        )?;
        write_lcn(w, self.forward_logical_channel_number)?;
        self.forward_logical_channel_parameters.encode(w)?;
        if let Some(v) = &self.reverse_logical_channel_parameters {
            v.encode(w)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ForwardMultiplexAckParameters {
    H2250LogicalChannelAckParameters(H2250LogicalChannelAckParameters),
    Unknown(RawExtension),
}

impl ForwardMultiplexAckParameters {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(1, true)? {
            ChoiceTag::Root(0) => Ok(Self::H2250LogicalChannelAckParameters(
                H2250LogicalChannelAckParameters::decode(r)?,
            )),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::H2250LogicalChannelAckParameters(v) => {
                w.write_choice_root(0, 1, true)?;
                v.encode(w)
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OlcAckReverseParameters {
    pub reverse_logical_channel_number: LogicalChannelNumber,
    pub port_number: Option<u16>,
    pub multiplex_parameters: Option<ForwardMultiplexAckParameters>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl OlcAckReverseParameters {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 2)?;
        let reverse_logical_channel_number = read_lcn(r)?;
        let port_number =
            r.optional(opt.get(0), |r| Ok(r.read_constrained_uint(0, 65535)? as u16))?;
        let multiplex_parameters = r.optional(opt.get(1), ForwardMultiplexAckParameters::decode)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            reverse_logical_channel_number,
            port_number,
            multiplex_parameters,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(
            true,
            !ext.is_empty(),
            &[
                self.port_number.is_some(),
                self.multiplex_parameters.is_some(),
            ],
        )?;
        write_lcn(w, self.reverse_logical_channel_number)?;
        if let Some(v) = &self.port_number {
            w.write_constrained_uint(u64::from(*v), 0, 65535)?;
        }
        if let Some(v) = &self.multiplex_parameters {
            v.encode(w)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenLogicalChannelAck {
    pub forward_logical_channel_number: LogicalChannelNumber,
    pub reverse_logical_channel_parameters: Option<OlcAckReverseParameters>,
    /// Extension addition: the forward channel's transport acknowledgment.
    pub forward_multiplex_ack_parameters: Option<ForwardMultiplexAckParameters>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl OpenLogicalChannelAck {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let forward_logical_channel_number = read_lcn(r)?;
        let reverse_logical_channel_parameters =
            r.optional(opt.get(0), OlcAckReverseParameters::decode)?;

        let mut forward_multiplex_ack_parameters = None;
        let mut unknown_extensions = Vec::new();
        if ext {
            let bitmap = r.read_extension_bitmap()?;
            for (index, present) in bitmap.iter().enumerate() {
                if !*present {
                    continue;
                }
                match index {
                    1 => {
                        forward_multiplex_ack_parameters =
                            r.open_type_optional(ForwardMultiplexAckParameters::decode)?;
                    }
                    _ => r.read_unknown_extension(index as u32, &mut unknown_extensions)?,
                }
            }
        }

        Ok(Self {
            forward_logical_channel_number,
            reverse_logical_channel_parameters,
            forward_multiplex_ack_parameters,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        if let Some(v) = &self.forward_multiplex_ack_parameters {
            ext.known(1, PerWriter::encode_to_bytes(|w| v.encode(w))?);
        }
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(
            true,
            !ext.is_empty(),
            &[self.reverse_logical_channel_parameters.is_some()],
        )?;
        write_lcn(w, self.forward_logical_channel_number)?;
        if let Some(v) = &self.reverse_logical_channel_parameters {
            v.encode(w)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

null_choice! {
    OlcRejectCause {
        Unspecified,
        UnsuitableReverseParameters,
        DataTypeNotSupported,
        DataTypeNotAvailable,
        UnknownDataType,
        DataTypeAlCombinationNotSupported,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenLogicalChannelReject {
    pub forward_logical_channel_number: LogicalChannelNumber,
    pub cause: OlcRejectCause,
    pub unknown_extensions: Vec<RawExtension>,
}

impl OpenLogicalChannelReject {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let forward_logical_channel_number = read_lcn(r)?;
        let cause = OlcRejectCause::decode(r)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;
        Ok(Self {
            forward_logical_channel_number,
            cause,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        write_lcn(w, self.forward_logical_channel_number)?;
        self.cause.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

macro_rules! lcn_only_sequence {
    ($(#[$meta:meta])* $name:ident, $field:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            pub $field: LogicalChannelNumber,
            pub unknown_extensions: Vec<RawExtension>,
        }

        impl $name {
            pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
                let (ext, _) = r.read_sequence_header(true, 0)?;
                let $field = read_lcn(r)?;
                let unknown_extensions = r.read_remaining_extensions(ext)?;
                Ok(Self {
                    $field,
                    unknown_extensions,
                })
            }

            pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
                let mut ext = ExtensionAdditions::new();
                for raw in &self.unknown_extensions {
                    ext.raw(raw);
                }
                w.write_sequence_header(true, !ext.is_empty(), &[])?;
                write_lcn(w, self.$field)?;
                if !ext.is_empty() {
                    ext.write(w)?;
                }
                Ok(())
            }
        }
    };
}

lcn_only_sequence! { OpenLogicalChannelConfirm, forward_logical_channel_number }
lcn_only_sequence! { CloseLogicalChannelAck, forward_logical_channel_number }
lcn_only_sequence! { RequestChannelClose, forward_logical_channel_number }
lcn_only_sequence! { RequestChannelCloseAck, forward_logical_channel_number }
lcn_only_sequence! { RequestChannelCloseRelease, forward_logical_channel_number }

null_choice! {
    CloseSource { User, Lcse }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloseLogicalChannel {
    pub forward_logical_channel_number: LogicalChannelNumber,
    pub source: CloseSource,
    pub unknown_extensions: Vec<RawExtension>,
}

impl CloseLogicalChannel {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let forward_logical_channel_number = read_lcn(r)?;
        let source = CloseSource::decode(r)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;
        Ok(Self {
            forward_logical_channel_number,
            source,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        write_lcn(w, self.forward_logical_channel_number)?;
        self.source.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

null_choice! {
    RccRejectCause { Unspecified }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestChannelCloseReject {
    pub forward_logical_channel_number: LogicalChannelNumber,
    pub cause: RccRejectCause,
    pub unknown_extensions: Vec<RawExtension>,
}

impl RequestChannelCloseReject {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let forward_logical_channel_number = read_lcn(r)?;
        let cause = RccRejectCause::decode(r)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;
        Ok(Self {
            forward_logical_channel_number,
            cause,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        write_lcn(w, self.forward_logical_channel_number)?;
        self.cause.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

// --- multiplex table exchange ----------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MultiplexElementType {
    LogicalChannelNumber(u16),
    SubElementList(Vec<MultiplexElement>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RepeatCount {
    Finite(u16),
    UntilClosingFlag,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiplexElement {
    pub element_type: MultiplexElementType,
    pub repeat_count: RepeatCount,
}

impl MultiplexElement {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        r.enter_nested(|r| {
            let element_type = match r.read_choice_header(2, false)? {
                ChoiceTag::Root(0) => MultiplexElementType::LogicalChannelNumber(
                    r.read_constrained_uint(0, 65535)? as u16,
                ),
                ChoiceTag::Root(1) => {
                    r.set_size_constraint(SizeConstraint::range(2, 255));
                    MultiplexElementType::SubElementList(
                        r.read_sequence_of("subElementList", MultiplexElement::decode)?,
                    )
                }
                _ => return Err(r.error(ErrorKind::InvalidChoiceIndex)),
            };
            let repeat_count = match r.read_choice_header(2, false)? {
                ChoiceTag::Root(0) => {
                    RepeatCount::Finite(r.read_constrained_uint(1, 65535)? as u16)
                }
                ChoiceTag::Root(1) => {
                    r.read_null()?;
                    RepeatCount::UntilClosingFlag
                }
                _ => return Err(r.error(ErrorKind::InvalidChoiceIndex)),
            };
            Ok(Self {
                element_type,
                repeat_count,
            })
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match &self.element_type {
            MultiplexElementType::LogicalChannelNumber(v) => {
                w.write_choice_root(0, 2, false)?;
                w.write_constrained_uint(u64::from(*v), 0, 65535)?;
            }
            MultiplexElementType::SubElementList(v) => {
                w.write_choice_root(1, 2, false)?;
                w.set_size_constraint(SizeConstraint::range(2, 255));
                w.write_sequence_of(v, |w, e| e.encode(w))?;
            }
        }
        match &self.repeat_count {
            RepeatCount::Finite(v) => {
                w.write_choice_root(0, 2, false)?;
                w.write_constrained_uint(u64::from(*v), 1, 65535)
            }
            RepeatCount::UntilClosingFlag => {
                w.write_choice_root(1, 2, false)?;
                w.write_null()
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiplexEntryDescriptor {
    pub multiplex_table_entry_number: u8,
    pub element_list: Option<Vec<MultiplexElement>>,
}

impl MultiplexEntryDescriptor {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (_, opt) = r.read_sequence_header(false, 1)?;
        let multiplex_table_entry_number = r.read_constrained_uint(1, 15)? as u8;
        let element_list = r.optional(opt.get(0), |r| {
            r.set_size_constraint(SizeConstraint::range(1, 256));
            r.read_sequence_of("elementList", MultiplexElement::decode)
        })?;
        Ok(Self {
            multiplex_table_entry_number,
            element_list,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_sequence_header(false, false, &[self.element_list.is_some()])?;
        w.write_constrained_uint(u64::from(self.multiplex_table_entry_number), 1, 15)?;
        if let Some(v) = &self.element_list {
            w.set_size_constraint(SizeConstraint::range(1, 256));
            w.write_sequence_of(v, |w, e| e.encode(w))?;
        }
        Ok(())
    }
}

fn read_entry_numbers(r: &mut PerReader<'_, '_>) -> Result<Vec<u8>> {
    r.set_size_constraint(SizeConstraint::range(1, 15));
    r.read_sequence_of("entryNumbers", |r| Ok(r.read_constrained_uint(1, 15)? as u8))
}

fn write_entry_numbers(w: &mut PerWriter, value: &[u8]) -> Result<()> {
    w.set_size_constraint(SizeConstraint::range(1, 15));
    w.write_sequence_of(value, |w, n| w.write_constrained_uint(u64::from(*n), 1, 15))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiplexEntrySend {
    pub sequence_number: u8,
    pub multiplex_entry_descriptors: Vec<MultiplexEntryDescriptor>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl MultiplexEntrySend {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let sequence_number = r.read_constrained_uint(0, 255)? as u8;
        r.set_size_constraint(SizeConstraint::range(1, 15));
        let multiplex_entry_descriptors =
            r.read_sequence_of("multiplexEntryDescriptors", MultiplexEntryDescriptor::decode)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            sequence_number,
            multiplex_entry_descriptors,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_constrained_uint(u64::from(self.sequence_number), 0, 255)?;
        w.set_size_constraint(SizeConstraint::range(1, 15));
        w.write_sequence_of(&self.multiplex_entry_descriptors, |w, d| d.encode(w))?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiplexEntrySendAck {
    pub sequence_number: u8,
    pub multiplex_table_entry_number: Vec<u8>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl MultiplexEntrySendAck {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let sequence_number = r.read_constrained_uint(0, 255)? as u8;
        let multiplex_table_entry_number = read_entry_numbers(r)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            sequence_number,
            multiplex_table_entry_number,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_constrained_uint(u64::from(self.sequence_number), 0, 255)?;
        write_entry_numbers(w, &self.multiplex_table_entry_number)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

null_choice! {
    MultiplexEntryRejectCause { UnspecifiedCause, DescriptorTooComplex }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiplexEntryRejectionDescription {
    pub multiplex_table_entry_number: u8,
    pub cause: MultiplexEntryRejectCause,
}

impl MultiplexEntryRejectionDescription {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            multiplex_table_entry_number: r.read_constrained_uint(1, 15)? as u8,
            cause: MultiplexEntryRejectCause::decode(r)?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_constrained_uint(u64::from(self.multiplex_table_entry_number), 1, 15)?;
        self.cause.encode(w)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiplexEntrySendReject {
    pub sequence_number: u8,
    pub rejection_descriptions: Vec<MultiplexEntryRejectionDescription>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl MultiplexEntrySendReject {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let sequence_number = r.read_constrained_uint(0, 255)? as u8;
        r.set_size_constraint(SizeConstraint::range(1, 15));
        let rejection_descriptions = r.read_sequence_of(
            "rejectionDescriptions",
            MultiplexEntryRejectionDescription::decode,
        )?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            sequence_number,
            rejection_descriptions,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_constrained_uint(u64::from(self.sequence_number), 0, 255)?;
        w.set_size_constraint(SizeConstraint::range(1, 15));
        w.write_sequence_of(&self.rejection_descriptions, |w, d| d.encode(w))?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

macro_rules! entry_numbers_sequence {
    ($(#[$meta:meta])* $name:ident, $field:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            pub $field: Vec<u8>,
            pub unknown_extensions: Vec<RawExtension>,
        }

        impl $name {
            pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
                let (ext, _) = r.read_sequence_header(true, 0)?;
                let $field = read_entry_numbers(r)?;
                let unknown_extensions = r.read_remaining_extensions(ext)?;
                Ok(Self {
                    $field,
                    unknown_extensions,
                })
            }

            pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
                let mut ext = ExtensionAdditions::new();
                for raw in &self.unknown_extensions {
                    ext.raw(raw);
                }
                w.write_sequence_header(true, !ext.is_empty(), &[])?;
                write_entry_numbers(w, &self.$field)?;
                if !ext.is_empty() {
                    ext.write(w)?;
                }
                Ok(())
            }
        }
    };
}

entry_numbers_sequence! { MultiplexEntrySendRelease, multiplex_table_entry_number }
entry_numbers_sequence! { RequestMultiplexEntry, entry_numbers }
entry_numbers_sequence! { RequestMultiplexEntryAck, entry_numbers }
entry_numbers_sequence! { RequestMultiplexEntryRelease, entry_numbers }

null_choice! {
    RequestMultiplexEntryRejectCause { UnspecifiedCause }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestMultiplexEntryRejectionDescription {
    pub multiplex_table_entry_number: u8,
    pub cause: RequestMultiplexEntryRejectCause,
}

impl RequestMultiplexEntryRejectionDescription {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            multiplex_table_entry_number: r.read_constrained_uint(1, 15)? as u8,
            cause: RequestMultiplexEntryRejectCause::decode(r)?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_constrained_uint(u64::from(self.multiplex_table_entry_number), 1, 15)?;
        self.cause.encode(w)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestMultiplexEntryReject {
    pub entry_numbers: Vec<u8>,
    pub rejection_descriptions: Vec<RequestMultiplexEntryRejectionDescription>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl RequestMultiplexEntryReject {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let entry_numbers = read_entry_numbers(r)?;
        r.set_size_constraint(SizeConstraint::range(1, 15));
        let rejection_descriptions = r.read_sequence_of(
            "rejectionDescriptions",
            RequestMultiplexEntryRejectionDescription::decode,
        )?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            entry_numbers,
            rejection_descriptions,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        write_entry_numbers(w, &self.entry_numbers)?;
        w.set_size_constraint(SizeConstraint::range(1, 15));
        w.write_sequence_of(&self.rejection_descriptions, |w, d| d.encode(w))?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

// --- mode request ----------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestMode {
    pub sequence_number: u8,
    pub requested_modes: Vec<ModeDescription>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl RequestMode {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let sequence_number = r.read_constrained_uint(0, 255)? as u8;
        r.set_size_constraint(SizeConstraint::range(1, 256));
        let requested_modes = r.read_sequence_of("requestedModes", read_mode_description)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            sequence_number,
            requested_modes,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_constrained_uint(u64::from(self.sequence_number), 0, 255)?;
        w.set_size_constraint(SizeConstraint::range(1, 256));
        w.write_sequence_of(&self.requested_modes, |w, d| write_mode_description(w, d))?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

null_choice! {
    RequestModeAckResponse { WillTransmitMostPreferredMode, WillTransmitLessPreferredMode }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestModeAck {
    pub sequence_number: u8,
    pub response: RequestModeAckResponse,
    pub unknown_extensions: Vec<RawExtension>,
}

impl RequestModeAck {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let sequence_number = r.read_constrained_uint(0, 255)? as u8;
        let response = RequestModeAckResponse::decode(r)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;
        Ok(Self {
            sequence_number,
            response,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_constrained_uint(u64::from(self.sequence_number), 0, 255)?;
        self.response.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

null_choice! {
    RequestModeRejectCause { ModeUnavailable, MultipointConstraint, RequestDenied }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestModeReject {
    pub sequence_number: u8,
    pub cause: RequestModeRejectCause,
    pub unknown_extensions: Vec<RawExtension>,
}

impl RequestModeReject {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let sequence_number = r.read_constrained_uint(0, 255)? as u8;
        let cause = RequestModeRejectCause::decode(r)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;
        Ok(Self {
            sequence_number,
            cause,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_constrained_uint(u64::from(self.sequence_number), 0, 255)?;
        self.cause.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

empty_sequence! { RequestModeRelease }

// --- round trip delay and maintenance loops --------------------------------

macro_rules! sequence_number_only {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            pub sequence_number: u8,
            pub unknown_extensions: Vec<RawExtension>,
        }

        impl $name {
            pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
                let (ext, _) = r.read_sequence_header(true, 0)?;
                let sequence_number = r.read_constrained_uint(0, 255)? as u8;
                let unknown_extensions = r.read_remaining_extensions(ext)?;
                Ok(Self {
                    sequence_number,
                    unknown_extensions,
                })
            }

            pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
                let mut ext = ExtensionAdditions::new();
                for raw in &self.unknown_extensions {
                    ext.raw(raw);
                }
                w.write_sequence_header(true, !ext.is_empty(), &[])?;
                w.write_constrained_uint(u64::from(self.sequence_number), 0, 255)?;
                if !ext.is_empty() {
                    ext.write(w)?;
                }
                Ok(())
            }
        }
    };
}

sequence_number_only! { RoundTripDelayRequest }
sequence_number_only! { RoundTripDelayResponse }

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaintenanceLoopType {
    SystemLoop,
    MediaLoop(LogicalChannelNumber),
    LogicalChannelLoop(LogicalChannelNumber),
    Unknown(RawExtension),
}

impl MaintenanceLoopType {
    const NUM_ROOT: u32 = 3;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => {
                r.read_null()?;
                Ok(Self::SystemLoop)
            }
            ChoiceTag::Root(1) => Ok(Self::MediaLoop(read_lcn(r)?)),
            ChoiceTag::Root(2) => Ok(Self::LogicalChannelLoop(read_lcn(r)?)),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::SystemLoop => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                w.write_null()
            }
            Self::MediaLoop(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                write_lcn(w, *v)
            }
            Self::LogicalChannelLoop(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                write_lcn(w, *v)
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
        }
    }
}

macro_rules! loop_type_sequence {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            pub loop_type: MaintenanceLoopType,
            pub unknown_extensions: Vec<RawExtension>,
        }

        impl $name {
            pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
                let (ext, _) = r.read_sequence_header(true, 0)?;
                let loop_type = MaintenanceLoopType::decode(r)?;
                let unknown_extensions = r.read_remaining_extensions(ext)?;
                Ok(Self {
                    loop_type,
                    unknown_extensions,
                })
            }

            pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
                let mut ext = ExtensionAdditions::new();
                for raw in &self.unknown_extensions {
                    ext.raw(raw);
                }
                w.write_sequence_header(true, !ext.is_empty(), &[])?;
                self.loop_type.encode(w)?;
                if !ext.is_empty() {
                    ext.write(w)?;
                }
                Ok(())
            }
        }
    };
}

loop_type_sequence! { MaintenanceLoopRequest }
loop_type_sequence! { MaintenanceLoopAck }

null_choice! {
    MaintenanceLoopRejectCause { CanNotPerformLoop }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaintenanceLoopReject {
    pub loop_type: MaintenanceLoopType,
    pub cause: MaintenanceLoopRejectCause,
    pub unknown_extensions: Vec<RawExtension>,
}

impl MaintenanceLoopReject {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let loop_type = MaintenanceLoopType::decode(r)?;
        let cause = MaintenanceLoopRejectCause::decode(r)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;
        Ok(Self {
            loop_type,
            cause,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        self.loop_type.encode(w)?;
        self.cause.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

empty_sequence! { MaintenanceLoopOffCommand }

// --- commands --------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecificCapabilityRequest {
    pub multiplex_capability: bool,
    pub capability_table_entry_numbers: Option<Vec<u16>>,
    pub capability_descriptor_numbers: Option<Vec<u8>>,
}

impl SpecificCapabilityRequest {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (_, opt) = r.read_sequence_header(false, 2)?;
        let multiplex_capability = r.read_boolean()?;
        let capability_table_entry_numbers = r.optional(opt.get(0), |r| {
            r.set_size_constraint(SizeConstraint::range(1, 65535));
            r.read_sequence_of("capabilityTableEntryNumbers", |r| {
                Ok(r.read_constrained_uint(1, 65535)? as u16)
            })
        })?;
        let capability_descriptor_numbers = r.optional(opt.get(1), |r| {
            r.set_size_constraint(SizeConstraint::range(1, 256));
            r.read_sequence_of("capabilityDescriptorNumbers", |r| {
                Ok(r.read_constrained_uint(0, 255)? as u8)
            })
        })?;
        Ok(Self {
            multiplex_capability,
            capability_table_entry_numbers,
            capability_descriptor_numbers,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_sequence_header(
            false,
            false,
            &[
                self.capability_table_entry_numbers.is_some(),
                self.capability_descriptor_numbers.is_some(),
            ],
        )?;
        w.write_boolean(self.multiplex_capability)?;
        if let Some(v) = &self.capability_table_entry_numbers {
            w.set_size_constraint(SizeConstraint::range(1, 65535));
            w.write_sequence_of(v, |w, n| w.write_constrained_uint(u64::from(*n), 1, 65535))?;
        }
        if let Some(v) = &self.capability_descriptor_numbers {
            w.set_size_constraint(SizeConstraint::range(1, 256));
            w.write_sequence_of(v, |w, n| w.write_constrained_uint(u64::from(*n), 0, 255))?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendTerminalCapabilitySet {
    GenericRequest,
    SpecificRequest(SpecificCapabilityRequest),
    Unknown(RawExtension),
}

impl SendTerminalCapabilitySet {
    const NUM_ROOT: u32 = 2;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => {
                r.read_null()?;
                Ok(Self::GenericRequest)
            }
            ChoiceTag::Root(1) => Ok(Self::SpecificRequest(SpecificCapabilityRequest::decode(r)?)),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::GenericRequest => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                w.write_null()
            }
            Self::SpecificRequest(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptionAlgorithmId {
    pub h233_algorithm_identifier: u8,
    pub associated_algorithm: NonStandardParameter,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncryptionCommand {
    EncryptionSe(Vec<u8>),
    EncryptionIvRequest,
    EncryptionAlgorithmId(EncryptionAlgorithmId),
    Unknown(RawExtension),
}

impl EncryptionCommand {
    const NUM_ROOT: u32 = 3;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::EncryptionSe(r.read_octet_string()?)),
            ChoiceTag::Root(1) => {
                r.read_null()?;
                Ok(Self::EncryptionIvRequest)
            }
            ChoiceTag::Root(2) => {
                let h233_algorithm_identifier = r.read_constrained_uint(0, 255)? as u8;
                let associated_algorithm = NonStandardParameter::decode(r)?;
                Ok(Self::EncryptionAlgorithmId(EncryptionAlgorithmId {
                    h233_algorithm_identifier,
                    associated_algorithm,
                }))
            }
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::EncryptionSe(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                w.write_octet_string(v)
            }
            Self::EncryptionIvRequest => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                w.write_null()
            }
            Self::EncryptionAlgorithmId(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                w.write_constrained_uint(u64::from(v.h233_algorithm_identifier), 0, 255)?;
                v.associated_algorithm.encode(w)
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowControlScope {
    LogicalChannelNumber(LogicalChannelNumber),
    ResourceId(u16),
    WholeMultiplex,
}

impl FlowControlScope {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(3, false)? {
            ChoiceTag::Root(0) => Ok(Self::LogicalChannelNumber(read_lcn(r)?)),
            ChoiceTag::Root(1) => Ok(Self::ResourceId(r.read_constrained_uint(0, 65535)? as u16)),
            ChoiceTag::Root(2) => {
                r.read_null()?;
                Ok(Self::WholeMultiplex)
            }
            _ => Err(r.error(ErrorKind::InvalidChoiceIndex)),
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::LogicalChannelNumber(v) => {
                w.write_choice_root(0, 3, false)?;
                write_lcn(w, *v)
            }
            Self::ResourceId(v) => {
                w.write_choice_root(1, 3, false)?;
                w.write_constrained_uint(u64::from(*v), 0, 65535)
            }
            Self::WholeMultiplex => {
                w.write_choice_root(2, 3, false)?;
                w.write_null()
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowControlRestriction {
    MaximumBitRate(u32),
    NoRestriction,
}

impl FlowControlRestriction {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(2, false)? {
            ChoiceTag::Root(0) => Ok(Self::MaximumBitRate(
                r.read_constrained_uint(0, 16_777_215)? as u32,
            )),
            ChoiceTag::Root(1) => {
                r.read_null()?;
                Ok(Self::NoRestriction)
            }
            _ => Err(r.error(ErrorKind::InvalidChoiceIndex)),
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::MaximumBitRate(v) => {
                w.write_choice_root(0, 2, false)?;
                w.write_constrained_uint(u64::from(*v), 0, 16_777_215)
            }
            Self::NoRestriction => {
                w.write_choice_root(1, 2, false)?;
                w.write_null()
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowControlCommand {
    pub scope: FlowControlScope,
    pub restriction: FlowControlRestriction,
    pub unknown_extensions: Vec<RawExtension>,
}

impl FlowControlCommand {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let scope = FlowControlScope::decode(r)?;
        let restriction = FlowControlRestriction::decode(r)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;
        Ok(Self {
            scope,
            restriction,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        self.scope.encode(w)?;
        self.restriction.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

null_choice! {
    GstnOptions { TelephonyMode, V8bis, V34Dsvd, V34DuplexFax, V34H324 }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EndSessionCommand {
    NonStandard(NonStandardParameter),
    Disconnect,
    GstnOptions(GstnOptions),
    Unknown(RawExtension),
}

impl EndSessionCommand {
    const NUM_ROOT: u32 = 3;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(NonStandardParameter::decode(r)?)),
            ChoiceTag::Root(1) => {
                r.read_null()?;
                Ok(Self::Disconnect)
            }
            ChoiceTag::Root(2) => Ok(Self::GstnOptions(GstnOptions::decode(r)?)),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::NonStandard(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Disconnect => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                w.write_null()
            }
            Self::GstnOptions(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoFastUpdateGob {
    pub first_gob: u8,
    pub number_of_gobs: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MiscellaneousCommandFunction {
    EqualiseDelay,
    ZeroDelay,
    MultipointModeCommand,
    CancelMultipointModeCommand,
    VideoFreezePicture,
    VideoFastUpdatePicture,
    VideoFastUpdateGob(VideoFastUpdateGob),
    VideoTemporalSpatialTradeOff(u8),
    VideoSendSyncEveryGob,
    VideoSendSyncEveryGobCancel,
    Unknown(RawExtension),
}

impl MiscellaneousCommandFunction {
    const NUM_ROOT: u32 = 10;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => {
                r.read_null()?;
                Ok(Self::EqualiseDelay)
            }
            ChoiceTag::Root(1) => {
                r.read_null()?;
                Ok(Self::ZeroDelay)
            }
            ChoiceTag::Root(2) => {
                r.read_null()?;
                Ok(Self::MultipointModeCommand)
            }
            ChoiceTag::Root(3) => {
                r.read_null()?;
                Ok(Self::CancelMultipointModeCommand)
            }
            ChoiceTag::Root(4) => {
                r.read_null()?;
                Ok(Self::VideoFreezePicture)
            }
            ChoiceTag::Root(5) => {
                r.read_null()?;
                Ok(Self::VideoFastUpdatePicture)
            }
            ChoiceTag::Root(6) => {
                let first_gob = r.read_constrained_uint(0, 17)? as u8;
                let number_of_gobs = r.read_constrained_uint(1, 18)? as u8;
                Ok(Self::VideoFastUpdateGob(VideoFastUpdateGob {
                    first_gob,
                    number_of_gobs,
                }))
            }
            ChoiceTag::Root(7) => Ok(Self::VideoTemporalSpatialTradeOff(
                r.read_constrained_uint(0, 31)? as u8,
            )),
            ChoiceTag::Root(8) => {
                r.read_null()?;
                Ok(Self::VideoSendSyncEveryGob)
            }
            ChoiceTag::Root(9) => {
                r.read_null()?;
                Ok(Self::VideoSendSyncEveryGobCancel)
            }
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let index = match self {
            Self::EqualiseDelay => 0,
            Self::ZeroDelay => 1,
            Self::MultipointModeCommand => 2,
            Self::CancelMultipointModeCommand => 3,
            Self::VideoFreezePicture => 4,
            Self::VideoFastUpdatePicture => 5,
            Self::VideoFastUpdateGob(v) => {
                w.write_choice_root(6, Self::NUM_ROOT, true)?;
                w.write_constrained_uint(u64::from(v.first_gob), 0, 17)?;
                return w.write_constrained_uint(u64::from(v.number_of_gobs), 1, 18);
            }
            Self::VideoTemporalSpatialTradeOff(v) => {
                w.write_choice_root(7, Self::NUM_ROOT, true)?;
                return w.write_constrained_uint(u64::from(*v), 0, 31);
            }
            Self::VideoSendSyncEveryGob => 8,
            Self::VideoSendSyncEveryGobCancel => 9,
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                return w.write_open_type(&ext.data);
            }
        };
        w.write_choice_root(index, Self::NUM_ROOT, true)?;
        w.write_null()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MiscellaneousCommand {
    pub logical_channel_number: LogicalChannelNumber,
    pub function: MiscellaneousCommandFunction,
    pub unknown_extensions: Vec<RawExtension>,
}

impl MiscellaneousCommand {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let logical_channel_number = read_lcn(r)?;
        let function = MiscellaneousCommandFunction::decode(r)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;
        Ok(Self {
            logical_channel_number,
            function,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        write_lcn(w, self.logical_channel_number)?;
        self.function.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

// --- indications -----------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MiscellaneousIndicationFunction {
    LogicalChannelActive,
    LogicalChannelInactive,
    MultipointConference,
    CancelMultipointConference,
    MultipointZeroComm,
    CancelMultipointZeroComm,
    MultipointSecondaryStatus,
    CancelMultipointSecondaryStatus,
    VideoIndicateReadyToActivate,
    VideoTemporalSpatialTradeOff(u8),
    Unknown(RawExtension),
}

impl MiscellaneousIndicationFunction {
    const NUM_ROOT: u32 = 10;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(index @ 0..=8) => {
                r.read_null()?;
                Ok(match index {
                    0 => Self::LogicalChannelActive,
                    1 => Self::LogicalChannelInactive,
                    2 => Self::MultipointConference,
                    3 => Self::CancelMultipointConference,
                    4 => Self::MultipointZeroComm,
                    5 => Self::CancelMultipointZeroComm,
                    6 => Self::MultipointSecondaryStatus,
                    7 => Self::CancelMultipointSecondaryStatus,
                    _ => Self::VideoIndicateReadyToActivate,
                })
            }
            ChoiceTag::Root(9) => Ok(Self::VideoTemporalSpatialTradeOff(
                r.read_constrained_uint(0, 31)? as u8,
            )),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let index = match self {
            Self::LogicalChannelActive => 0,
            Self::LogicalChannelInactive => 1,
            Self::MultipointConference => 2,
            Self::CancelMultipointConference => 3,
            Self::MultipointZeroComm => 4,
            Self::CancelMultipointZeroComm => 5,
            Self::MultipointSecondaryStatus => 6,
            Self::CancelMultipointSecondaryStatus => 7,
            Self::VideoIndicateReadyToActivate => 8,
            Self::VideoTemporalSpatialTradeOff(v) => {
                w.write_choice_root(9, Self::NUM_ROOT, true)?;
                return w.write_constrained_uint(u64::from(*v), 0, 31);
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                return w.write_open_type(&ext.data);
            }
        };
        w.write_choice_root(index, Self::NUM_ROOT, true)?;
        w.write_null()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MiscellaneousIndication {
    pub logical_channel_number: LogicalChannelNumber,
    pub function: MiscellaneousIndicationFunction,
    pub unknown_extensions: Vec<RawExtension>,
}

impl MiscellaneousIndication {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let logical_channel_number = read_lcn(r)?;
        let function = MiscellaneousIndicationFunction::decode(r)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;
        Ok(Self {
            logical_channel_number,
            function,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        write_lcn(w, self.logical_channel_number)?;
        self.function.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JitterIndication {
    pub scope: FlowControlScope,
    pub estimated_received_jitter_mantissa: u8,
    pub estimated_received_jitter_exponent: u8,
    pub skipped_frame_count: Option<u8>,
    pub additional_decoder_buffer: Option<u32>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl JitterIndication {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 2)?;
        let scope = FlowControlScope::decode(r)?;
        let estimated_received_jitter_mantissa = r.read_constrained_uint(0, 3)? as u8;
        let estimated_received_jitter_exponent = r.read_constrained_uint(0, 7)? as u8;
        let skipped_frame_count =
            r.optional(opt.get(0), |r| Ok(r.read_constrained_uint(0, 15)? as u8))?;
        let additional_decoder_buffer = r.optional(opt.get(1), |r| {
            Ok(r.read_constrained_uint(0, 262_143)? as u32)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            scope,
            estimated_received_jitter_mantissa,
            estimated_received_jitter_exponent,
            skipped_frame_count,
            additional_decoder_buffer,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(
            true,
            !ext.is_empty(),
            &[
                self.skipped_frame_count.is_some(),
                self.additional_decoder_buffer.is_some(),
            ],
        )?;
        self.scope.encode(w)?;
        w.write_constrained_uint(u64::from(self.estimated_received_jitter_mantissa), 0, 3)?;
        w.write_constrained_uint(u64::from(self.estimated_received_jitter_exponent), 0, 7)?;
        if let Some(v) = &self.skipped_frame_count {
            w.write_constrained_uint(u64::from(*v), 0, 15)?;
        }
        if let Some(v) = &self.additional_decoder_buffer {
            w.write_constrained_uint(u64::from(*v), 0, 262_143)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct H223SkewIndication {
    pub logical_channel_number1: LogicalChannelNumber,
    pub logical_channel_number2: LogicalChannelNumber,
    pub skew: u16,
    pub unknown_extensions: Vec<RawExtension>,
}

impl H223SkewIndication {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let logical_channel_number1 = read_lcn(r)?;
        let logical_channel_number2 = read_lcn(r)?;
        let skew = r.read_constrained_uint(0, 4095)? as u16;
        let unknown_extensions = r.read_remaining_extensions(ext)?;
        Ok(Self {
            logical_channel_number1,
            logical_channel_number2,
            skew,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        write_lcn(w, self.logical_channel_number1)?;
        write_lcn(w, self.logical_channel_number2)?;
        w.write_constrained_uint(u64::from(self.skew), 0, 4095)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAtmVcIndication {
    pub resource_id: u16,
    pub bit_rate: u16,
    pub bit_rate_locked_to_pcr_clock: bool,
    pub bit_rate_locked_to_network_clock: bool,
    pub unknown_extensions: Vec<RawExtension>,
}

impl NewAtmVcIndication {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let resource_id = r.read_constrained_uint(0, 65535)? as u16;
        let bit_rate = r.read_constrained_uint(1, 65535)? as u16;
        let bit_rate_locked_to_pcr_clock = r.read_boolean()?;
        let bit_rate_locked_to_network_clock = r.read_boolean()?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;
        Ok(Self {
            resource_id,
            bit_rate,
            bit_rate_locked_to_pcr_clock,
            bit_rate_locked_to_network_clock,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_constrained_uint(u64::from(self.resource_id), 0, 65535)?;
        w.write_constrained_uint(u64::from(self.bit_rate), 1, 65535)?;
        w.write_boolean(self.bit_rate_locked_to_pcr_clock)?;
        w.write_boolean(self.bit_rate_locked_to_network_clock)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

/// DTMF-style signal information, a later addition to the user-input
/// CHOICE.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserInputSignal {
    pub signal_type: String,
    pub duration: Option<u16>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl UserInputSignal {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        r.set_size_constraint(SizeConstraint::fixed(1));
        let signal_type = r.read_char_string()?;
        let duration = r.optional(opt.get(0), |r| Ok(r.read_constrained_uint(1, 65535)? as u16))?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            signal_type,
            duration,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.duration.is_some()])?;
        w.set_size_constraint(SizeConstraint::fixed(1));
        w.write_char_string(&self.signal_type)?;
        if let Some(v) = &self.duration {
            w.write_constrained_uint(u64::from(*v), 1, 65535)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserInputIndication {
    NonStandard(NonStandardParameter),
    Alphanumeric(String),
    Signal(UserInputSignal),
    Unknown(RawExtension),
}

impl UserInputIndication {
    const NUM_ROOT: u32 = 2;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(NonStandardParameter::decode(r)?)),
            ChoiceTag::Root(1) => Ok(Self::Alphanumeric(r.read_char_string()?)),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(1) => Ok(Self::Signal(r.open_type(UserInputSignal::decode)?)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::NonStandard(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Alphanumeric(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                w.write_char_string(v)
            }
            Self::Signal(v) => {
                w.write_choice_extension(1)?;
                let payload = PerWriter::encode_to_bytes(|w| v.encode(w))?;
                w.write_open_type(&payload)
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
        }
    }
}

// --- the four message classes ----------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestMessage {
    NonStandard(NonStandardMessage),
    MasterSlaveDetermination(MasterSlaveDetermination),
    TerminalCapabilitySet(TerminalCapabilitySet),
    OpenLogicalChannel(OpenLogicalChannel),
    CloseLogicalChannel(CloseLogicalChannel),
    RequestChannelClose(RequestChannelClose),
    MultiplexEntrySend(MultiplexEntrySend),
    RequestMultiplexEntry(RequestMultiplexEntry),
    RequestMode(RequestMode),
    RoundTripDelayRequest(RoundTripDelayRequest),
    MaintenanceLoopRequest(MaintenanceLoopRequest),
    Unknown(RawExtension),
}

impl RequestMessage {
    const NUM_ROOT: u32 = 11;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(NonStandardMessage::decode(r)?)),
            ChoiceTag::Root(1) => Ok(Self::MasterSlaveDetermination(
                MasterSlaveDetermination::decode(r)?,
            )),
            ChoiceTag::Root(2) => Ok(Self::TerminalCapabilitySet(TerminalCapabilitySet::decode(
                r,
            )?)),
            ChoiceTag::Root(3) => Ok(Self::OpenLogicalChannel(OpenLogicalChannel::decode(r)?)),
            ChoiceTag::Root(4) => Ok(Self::CloseLogicalChannel(CloseLogicalChannel::decode(r)?)),
            ChoiceTag::Root(5) => Ok(Self::RequestChannelClose(RequestChannelClose::decode(r)?)),
            ChoiceTag::Root(6) => Ok(Self::MultiplexEntrySend(MultiplexEntrySend::decode(r)?)),
            ChoiceTag::Root(7) => Ok(Self::RequestMultiplexEntry(RequestMultiplexEntry::decode(
                r,
            )?)),
            ChoiceTag::Root(8) => Ok(Self::RequestMode(RequestMode::decode(r)?)),
            ChoiceTag::Root(9) => Ok(Self::RoundTripDelayRequest(RoundTripDelayRequest::decode(
                r,
            )?)),
            ChoiceTag::Root(10) => Ok(Self::MaintenanceLoopRequest(
                MaintenanceLoopRequest::decode(r)?,
            )),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::NonStandard(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::MasterSlaveDetermination(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::TerminalCapabilitySet(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::OpenLogicalChannel(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::CloseLogicalChannel(v) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::RequestChannelClose(v) => {
                w.write_choice_root(5, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::MultiplexEntrySend(v) => {
                w.write_choice_root(6, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::RequestMultiplexEntry(v) => {
                w.write_choice_root(7, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::RequestMode(v) => {
                w.write_choice_root(8, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::RoundTripDelayRequest(v) => {
                w.write_choice_root(9, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::MaintenanceLoopRequest(v) => {
                w.write_choice_root(10, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResponseMessage {
    NonStandard(NonStandardMessage),
    MasterSlaveDeterminationAck(MasterSlaveDeterminationAck),
    MasterSlaveDeterminationReject(MasterSlaveDeterminationReject),
    TerminalCapabilitySetAck(TerminalCapabilitySetAck),
    TerminalCapabilitySetReject(TerminalCapabilitySetReject),
    OpenLogicalChannelAck(OpenLogicalChannelAck),
    OpenLogicalChannelReject(OpenLogicalChannelReject),
    CloseLogicalChannelAck(CloseLogicalChannelAck),
    RequestChannelCloseAck(RequestChannelCloseAck),
    RequestChannelCloseReject(RequestChannelCloseReject),
    MultiplexEntrySendAck(MultiplexEntrySendAck),
    MultiplexEntrySendReject(MultiplexEntrySendReject),
    RequestMultiplexEntryAck(RequestMultiplexEntryAck),
    RequestMultiplexEntryReject(RequestMultiplexEntryReject),
    RequestModeAck(RequestModeAck),
    RequestModeReject(RequestModeReject),
    RoundTripDelayResponse(RoundTripDelayResponse),
    MaintenanceLoopAck(MaintenanceLoopAck),
    MaintenanceLoopReject(MaintenanceLoopReject),
    Unknown(RawExtension),
}

impl ResponseMessage {
    const NUM_ROOT: u32 = 19;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(NonStandardMessage::decode(r)?)),
            ChoiceTag::Root(1) => Ok(Self::MasterSlaveDeterminationAck(
                MasterSlaveDeterminationAck::decode(r)?,
            )),
            ChoiceTag::Root(2) => Ok(Self::MasterSlaveDeterminationReject(
                MasterSlaveDeterminationReject::decode(r)?,
            )),
            ChoiceTag::Root(3) => Ok(Self::TerminalCapabilitySetAck(
                TerminalCapabilitySetAck::decode(r)?,
            )),
            ChoiceTag::Root(4) => Ok(Self::TerminalCapabilitySetReject(
                TerminalCapabilitySetReject::decode(r)?,
            )),
            ChoiceTag::Root(5) => Ok(Self::OpenLogicalChannelAck(OpenLogicalChannelAck::decode(
                r,
            )?)),
            ChoiceTag::Root(6) => Ok(Self::OpenLogicalChannelReject(
                OpenLogicalChannelReject::decode(r)?,
            )),
            ChoiceTag::Root(7) => Ok(Self::CloseLogicalChannelAck(CloseLogicalChannelAck::decode(
                r,
            )?)),
            ChoiceTag::Root(8) => Ok(Self::RequestChannelCloseAck(RequestChannelCloseAck::decode(
                r,
            )?)),
            ChoiceTag::Root(9) => Ok(Self::RequestChannelCloseReject(
                RequestChannelCloseReject::decode(r)?,
            )),
            ChoiceTag::Root(10) => Ok(Self::MultiplexEntrySendAck(MultiplexEntrySendAck::decode(
                r,
            )?)),
            ChoiceTag::Root(11) => Ok(Self::MultiplexEntrySendReject(
                MultiplexEntrySendReject::decode(r)?,
            )),
            ChoiceTag::Root(12) => Ok(Self::RequestMultiplexEntryAck(
                RequestMultiplexEntryAck::decode(r)?,
            )),
            ChoiceTag::Root(13) => Ok(Self::RequestMultiplexEntryReject(
                RequestMultiplexEntryReject::decode(r)?,
            )),
            ChoiceTag::Root(14) => Ok(Self::RequestModeAck(RequestModeAck::decode(r)?)),
            ChoiceTag::Root(15) => Ok(Self::RequestModeReject(RequestModeReject::decode(r)?)),
            ChoiceTag::Root(16) => Ok(Self::RoundTripDelayResponse(
                RoundTripDelayResponse::decode(r)?,
            )),
            ChoiceTag::Root(17) => Ok(Self::MaintenanceLoopAck(MaintenanceLoopAck::decode(r)?)),
            ChoiceTag::Root(18) => Ok(Self::MaintenanceLoopReject(MaintenanceLoopReject::decode(
                r,
            )?)),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
            Self::NonStandard(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::MasterSlaveDeterminationAck(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::MasterSlaveDeterminationReject(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::TerminalCapabilitySetAck(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::TerminalCapabilitySetReject(v) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::OpenLogicalChannelAck(v) => {
                w.write_choice_root(5, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::OpenLogicalChannelReject(v) => {
                w.write_choice_root(6, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::CloseLogicalChannelAck(v) => {
                w.write_choice_root(7, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::RequestChannelCloseAck(v) => {
                w.write_choice_root(8, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::RequestChannelCloseReject(v) => {
                w.write_choice_root(9, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::MultiplexEntrySendAck(v) => {
                w.write_choice_root(10, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::MultiplexEntrySendReject(v) => {
                w.write_choice_root(11, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::RequestMultiplexEntryAck(v) => {
                w.write_choice_root(12, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::RequestMultiplexEntryReject(v) => {
                w.write_choice_root(13, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::RequestModeAck(v) => {
                w.write_choice_root(14, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::RequestModeReject(v) => {
                w.write_choice_root(15, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::RoundTripDelayResponse(v) => {
                w.write_choice_root(16, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::MaintenanceLoopAck(v) => {
                w.write_choice_root(17, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::MaintenanceLoopReject(v) => {
                w.write_choice_root(18, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandMessage {
    NonStandard(NonStandardMessage),
    MaintenanceLoopOffCommand(MaintenanceLoopOffCommand),
    SendTerminalCapabilitySet(SendTerminalCapabilitySet),
    EncryptionCommand(EncryptionCommand),
    FlowControlCommand(FlowControlCommand),
    EndSessionCommand(EndSessionCommand),
    MiscellaneousCommand(MiscellaneousCommand),
    Unknown(RawExtension),
}

impl CommandMessage {
    const NUM_ROOT: u32 = 7;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(NonStandardMessage::decode(r)?)),
            ChoiceTag::Root(1) => Ok(Self::MaintenanceLoopOffCommand(
                MaintenanceLoopOffCommand::decode(r)?,
            )),
            ChoiceTag::Root(2) => Ok(Self::SendTerminalCapabilitySet(
                SendTerminalCapabilitySet::decode(r)?,
            )),
            ChoiceTag::Root(3) => Ok(Self::EncryptionCommand(EncryptionCommand::decode(r)?)),
            ChoiceTag::Root(4) => Ok(Self::FlowControlCommand(FlowControlCommand::decode(r)?)),
            ChoiceTag::Root(5) => Ok(Self::EndSessionCommand(EndSessionCommand::decode(r)?)),
            ChoiceTag::Root(6) => Ok(Self::MiscellaneousCommand(MiscellaneousCommand::decode(r)?)),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::NonStandard(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::MaintenanceLoopOffCommand(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::SendTerminalCapabilitySet(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::EncryptionCommand(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::FlowControlCommand(v) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::EndSessionCommand(v) => {
                w.write_choice_root(5, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::MiscellaneousCommand(v) => {
                w.write_choice_root(6, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FunctionNotUnderstood {
    Request(Box<RequestMessage>),
    Response(Box<ResponseMessage>),
    Command(Box<CommandMessage>),
}

impl FunctionNotUnderstood {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(3, false)? {
            ChoiceTag::Root(0) => Ok(Self::Request(Box::new(RequestMessage::decode(r)?))),
            ChoiceTag::Root(1) => Ok(Self::Response(Box::new(ResponseMessage::decode(r)?))),
            ChoiceTag::Root(2) => Ok(Self::Command(Box::new(CommandMessage::decode(r)?))),
            _ => Err(r.error(ErrorKind::InvalidChoiceIndex)),
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::Request(v) => {
                w.write_choice_root(0, 3, false)?;
                v.encode(w)
            }
            Self::Response(v) => {
                w.write_choice_root(1, 3, false)?;
                v.encode(w)
            }
            Self::Command(v) => {
                w.write_choice_root(2, 3, false)?;
                v.encode(w)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndicationMessage {
    NonStandard(NonStandardMessage),
    FunctionNotUnderstood(FunctionNotUnderstood),
    MasterSlaveDeterminationRelease(MasterSlaveDeterminationRelease),
    TerminalCapabilitySetRelease(TerminalCapabilitySetRelease),
    OpenLogicalChannelConfirm(OpenLogicalChannelConfirm),
    RequestChannelCloseRelease(RequestChannelCloseRelease),
    MultiplexEntrySendRelease(MultiplexEntrySendRelease),
    RequestMultiplexEntryRelease(RequestMultiplexEntryRelease),
    RequestModeRelease(RequestModeRelease),
    MiscellaneousIndication(MiscellaneousIndication),
    JitterIndication(JitterIndication),
    H223SkewIndication(H223SkewIndication),
    NewAtmVcIndication(NewAtmVcIndication),
    UserInput(UserInputIndication),
    Unknown(RawExtension),
}

impl IndicationMessage {
    const NUM_ROOT: u32 = 14;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(NonStandardMessage::decode(r)?)),
            ChoiceTag::Root(1) => Ok(Self::FunctionNotUnderstood(FunctionNotUnderstood::decode(
                r,
            )?)),
            ChoiceTag::Root(2) => Ok(Self::MasterSlaveDeterminationRelease(
                MasterSlaveDeterminationRelease::decode(r)?,
            )),
            ChoiceTag::Root(3) => Ok(Self::TerminalCapabilitySetRelease(
                TerminalCapabilitySetRelease::decode(r)?,
            )),
            ChoiceTag::Root(4) => Ok(Self::OpenLogicalChannelConfirm(
                OpenLogicalChannelConfirm::decode(r)?,
            )),
            ChoiceTag::Root(5) => Ok(Self::RequestChannelCloseRelease(
                RequestChannelCloseRelease::decode(r)?,
            )),
            ChoiceTag::Root(6) => Ok(Self::MultiplexEntrySendRelease(
                MultiplexEntrySendRelease::decode(r)?,
            )),
            ChoiceTag::Root(7) => Ok(Self::RequestMultiplexEntryRelease(
                RequestMultiplexEntryRelease::decode(r)?,
            )),
            ChoiceTag::Root(8) => Ok(Self::RequestModeRelease(RequestModeRelease::decode(r)?)),
            ChoiceTag::Root(9) => Ok(Self::MiscellaneousIndication(
                MiscellaneousIndication::decode(r)?,
            )),
            ChoiceTag::Root(10) => Ok(Self::JitterIndication(JitterIndication::decode(r)?)),
            ChoiceTag::Root(11) => Ok(Self::H223SkewIndication(H223SkewIndication::decode(r)?)),
            ChoiceTag::Root(12) => Ok(Self::NewAtmVcIndication(NewAtmVcIndication::decode(r)?)),
            ChoiceTag::Root(13) => Ok(Self::UserInput(UserInputIndication::decode(r)?)),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::NonStandard(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::FunctionNotUnderstood(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::MasterSlaveDeterminationRelease(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::TerminalCapabilitySetRelease(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::OpenLogicalChannelConfirm(v) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::RequestChannelCloseRelease(v) => {
                w.write_choice_root(5, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::MultiplexEntrySendRelease(v) => {
                w.write_choice_root(6, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::RequestMultiplexEntryRelease(v) => {
                w.write_choice_root(7, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::RequestModeRelease(v) => {
                w.write_choice_root(8, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::MiscellaneousIndication(v) => {
                w.write_choice_root(9, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::JitterIndication(v) => {
                w.write_choice_root(10, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::H223SkewIndication(v) => {
                w.write_choice_root(11, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::NewAtmVcIndication(v) => {
                w.write_choice_root(12, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::UserInput(v) => {
                w.write_choice_root(13, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
        }
    }
}

/// Top-level H.245 PDU.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MultimediaSystemControlMessage {
    Request(RequestMessage),
    Response(ResponseMessage),
    Command(CommandMessage),
    Indication(IndicationMessage),
    Unknown(RawExtension),
}

impl MultimediaSystemControlMessage {
    const NUM_ROOT: u32 = 4;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::Request(RequestMessage::decode(r)?)),
            ChoiceTag::Root(1) => Ok(Self::Response(ResponseMessage::decode(r)?)),
            ChoiceTag::Root(2) => Ok(Self::Command(CommandMessage::decode(r)?)),
            ChoiceTag::Root(3) => Ok(Self::Indication(IndicationMessage::decode(r)?)),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::Request(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Response(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Command(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Indication(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::per::{PerReader, PerWriter};

    fn round_trip(value: MultimediaSystemControlMessage) {
        let encoded = PerWriter::encode_to_bytes(|w| value.encode(w)).unwrap();
        let mut reader = PerReader::new(&encoded);
        assert_eq!(
            value,
            MultimediaSystemControlMessage::decode(&mut reader).unwrap()
        );
    }

    #[test]
    fn master_slave_determination_round_trip() {
        round_trip(MultimediaSystemControlMessage::Request(
            RequestMessage::MasterSlaveDetermination(MasterSlaveDetermination {
                terminal_type: 50,
                status_determination_number: 0x2A5E71,
                unknown_extensions: Vec::new(),
            }),
        ));
        round_trip(MultimediaSystemControlMessage::Response(
            ResponseMessage::MasterSlaveDeterminationAck(MasterSlaveDeterminationAck {
                decision: MsdDecision::Master,
                unknown_extensions: Vec::new(),
            }),
        ));
    }

    #[test]
    fn terminal_capability_set_round_trip() {
        let tcs = TerminalCapabilitySet {
            sequence_number: 1,
            protocol_identifier: crate::per::ObjectId::new(vec![0, 0, 8, 245, 0, 3]),
            multiplex_capability: Some(MultiplexCapability::H2250Capability(
                H2250Capability {
                    maximum_audio_delay_jitter: 60,
                    ..H2250Capability::default()
                },
            )),
            capability_table: Some(vec![
                CapabilityTableEntry {
                    capability_table_entry_number: 1,
                    capability: Some(Capability::ReceiveAudioCapability(
                        AudioCapability::G711Ulaw64k(20),
                    )),
                },
                CapabilityTableEntry {
                    capability_table_entry_number: 2,
                    capability: Some(Capability::ReceiveVideoCapability(
                        VideoCapability::H263VideoCapability(H263VideoCapability {
                            qcif_mpi: Some(2),
                            max_bit_rate: 1280,
                            ..H263VideoCapability::default()
                        }),
                    )),
                },
            ]),
            capability_descriptors: Some(vec![CapabilityDescriptor {
                capability_descriptor_number: 0,
                simultaneous_capabilities: Some(vec![vec![1, 2]]),
            }]),
            unknown_extensions: Vec::new(),
        };
        round_trip(MultimediaSystemControlMessage::Request(
            RequestMessage::TerminalCapabilitySet(tcs),
        ));
    }

    #[test]
    fn open_logical_channel_uses_extension_multiplex() {
        let olc = OpenLogicalChannel {
            forward_logical_channel_number: 101,
            forward_logical_channel_parameters: ForwardLogicalChannelParameters {
                port_number: None,
                data_type: DataType::AudioData(AudioCapability::G7231(G7231Capability {
                    max_al_sdu_audio_frames: 1,
                    silence_suppression: false,
                })),
                multiplex_parameters: ForwardMultiplexParameters::H2250LogicalChannelParameters(
                    H2250LogicalChannelParameters {
                        session_id: 1,
                        media_channel: Some(H245TransportAddress::UnicastAddress(
                            UnicastAddress::IpAddress(UnicastIpAddress {
                                network: vec![10, 1, 2, 3],
                                tsap_identifier: 6000,
                            }),
                        )),
                        dynamic_rtp_payload_type: Some(101),
                        ..H2250LogicalChannelParameters::default()
                    },
                ),
                unknown_extensions: Vec::new(),
            },
            reverse_logical_channel_parameters: None,
            unknown_extensions: Vec::new(),
        };
        round_trip(MultimediaSystemControlMessage::Request(
            RequestMessage::OpenLogicalChannel(olc),
        ));
    }

    #[test]
    fn multiplex_entry_send_with_nested_elements() {
        let mes = MultiplexEntrySend {
            sequence_number: 3,
            multiplex_entry_descriptors: vec![MultiplexEntryDescriptor {
                multiplex_table_entry_number: 1,
                element_list: Some(vec![MultiplexElement {
                    element_type: MultiplexElementType::SubElementList(vec![
                        MultiplexElement {
                            element_type: MultiplexElementType::LogicalChannelNumber(3),
                            repeat_count: RepeatCount::Finite(2),
                        },
                        MultiplexElement {
                            element_type: MultiplexElementType::LogicalChannelNumber(4),
                            repeat_count: RepeatCount::UntilClosingFlag,
                        },
                    ]),
                    repeat_count: RepeatCount::UntilClosingFlag,
                }]),
            }],
            unknown_extensions: Vec::new(),
        };
        round_trip(MultimediaSystemControlMessage::Request(
            RequestMessage::MultiplexEntrySend(mes),
        ));
    }

    #[test]
    fn request_mode_round_trip() {
        let rm = RequestMode {
            sequence_number: 9,
            requested_modes: vec![vec![ModeElement {
                mode_type: ModeElementType::AudioMode(AudioMode::G728),
                h223_mode_parameters: None,
                unknown_extensions: Vec::new(),
            }]],
            unknown_extensions: Vec::new(),
        };
        round_trip(MultimediaSystemControlMessage::Request(
            RequestMessage::RequestMode(rm),
        ));
    }

    #[test]
    fn user_input_signal_travels_as_extension() {
        round_trip(MultimediaSystemControlMessage::Indication(
            IndicationMessage::UserInput(UserInputIndication::Alphanumeric("42#".into())),
        ));
        round_trip(MultimediaSystemControlMessage::Indication(
            IndicationMessage::UserInput(UserInputIndication::Signal(UserInputSignal {
                signal_type: "5".into(),
                duration: Some(120),
                unknown_extensions: Vec::new(),
            })),
        ));
    }

    #[test]
    fn end_session_and_unknown_round_trip() {
        round_trip(MultimediaSystemControlMessage::Command(
            CommandMessage::EndSessionCommand(EndSessionCommand::Disconnect),
        ));
        round_trip(MultimediaSystemControlMessage::Indication(
            IndicationMessage::Unknown(RawExtension {
                index: 6,
                data: vec![0x10, 0x20, 0x30],
            }),
        ));
    }

    #[test]
    fn function_not_understood_wraps_request() {
        round_trip(MultimediaSystemControlMessage::Indication(
            IndicationMessage::FunctionNotUnderstood(FunctionNotUnderstood::Request(Box::new(
                RequestMessage::RoundTripDelayRequest(RoundTripDelayRequest {
                    sequence_number: 77,
                    unknown_extensions: Vec::new(),
                }),
            ))),
        ));
    }
}
