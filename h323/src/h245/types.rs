//! H.245 capability, mode, and logical-channel parameter types.

use crate::error::{ErrorKind, Result};
use crate::h225::types::H221NonStandard;
use crate::per::null_choice;
use crate::per::{
    ChoiceTag, ExtensionAdditions, ObjectId, PerReader, PerWriter, RawExtension, SizeConstraint,
};

pub type LogicalChannelNumber = u16;

pub(crate) fn read_lcn(r: &mut PerReader<'_, '_>) -> Result<LogicalChannelNumber> {
    Ok(r.read_constrained_uint(1, 65535)? as u16)
}

pub(crate) fn write_lcn(w: &mut PerWriter, value: LogicalChannelNumber) -> Result<()> {
    w.write_constrained_uint(u64::from(value), 1, 65535)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NonStandardIdentifier {
    Object(ObjectId),
    H221NonStandard(H221NonStandard),
}

impl NonStandardIdentifier {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(2, false)? {
            ChoiceTag::Root(0) => Ok(Self::Object(r.read_object_id()?)),
            ChoiceTag::Root(1) => Ok(Self::H221NonStandard(H221NonStandard::decode(r)?)),
            _ => Err(r.error(ErrorKind::InvalidChoiceIndex)),
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::Object(v) => {
                w.write_choice_root(0, 2, false)?;
                w.write_object_id(v)
            }
            Self::H221NonStandard(v) => {
                w.write_choice_root(1, 2, false)?;
                v.encode(w)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NonStandardParameter {
    pub non_standard_identifier: NonStandardIdentifier,
    pub data: Vec<u8>,
}

impl NonStandardParameter {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            non_standard_identifier: NonStandardIdentifier::decode(r)?,
            data: r.read_octet_string()?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        self.non_standard_identifier.encode(w)?;
        w.write_octet_string(&self.data)
    }
}

// --- transport addresses ---------------------------------------------------

null_choice! {
    UnicastRouting { Strict, Loose }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnicastIpAddress {
    pub network: Vec<u8>,
    pub tsap_identifier: u16,
}

impl UnicastIpAddress {
    fn decode_sized(r: &mut PerReader<'_, '_>, octets: usize) -> Result<Self> {
        r.set_size_constraint(SizeConstraint::fixed(octets));
        let network = r.read_octet_string()?;
        let tsap_identifier = r.read_constrained_uint(0, 65535)? as u16;
        Ok(Self {
            network,
            tsap_identifier,
        })
    }

    fn encode_sized(&self, w: &mut PerWriter, octets: usize) -> Result<()> {
        w.set_size_constraint(SizeConstraint::fixed(octets));
        w.write_octet_string(&self.network)?;
        w.write_constrained_uint(u64::from(self.tsap_identifier), 0, 65535)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnicastIpxAddress {
    pub node: Vec<u8>,
    pub netnum: Vec<u8>,
    pub tsap_identifier: Vec<u8>,
}

impl UnicastIpxAddress {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        r.set_size_constraint(SizeConstraint::fixed(6));
        let node = r.read_octet_string()?;
        r.set_size_constraint(SizeConstraint::fixed(4));
        let netnum = r.read_octet_string()?;
        r.set_size_constraint(SizeConstraint::fixed(2));
        let tsap_identifier = r.read_octet_string()?;
        Ok(Self {
            node,
            netnum,
            tsap_identifier,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.set_size_constraint(SizeConstraint::fixed(6));
        w.write_octet_string(&self.node)?;
        w.set_size_constraint(SizeConstraint::fixed(4));
        w.write_octet_string(&self.netnum)?;
        w.set_size_constraint(SizeConstraint::fixed(2));
        w.write_octet_string(&self.tsap_identifier)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnicastIpSourceRoute {
    pub routing: UnicastRouting,
    pub network: Vec<u8>,
    pub tsap_identifier: u16,
    pub route: Vec<Vec<u8>>,
}

impl UnicastIpSourceRoute {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let routing = UnicastRouting::decode(r)?;
        r.set_size_constraint(SizeConstraint::fixed(4));
        let network = r.read_octet_string()?;
        let tsap_identifier = r.read_constrained_uint(0, 65535)? as u16;
        let route = r.read_sequence_of("route", |r| {
            r.set_size_constraint(SizeConstraint::fixed(4));
            r.read_octet_string()
        })?;
        Ok(Self {
            routing,
            network,
            tsap_identifier,
            route,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        self.routing.encode(w)?;
        w.set_size_constraint(SizeConstraint::fixed(4));
        w.write_octet_string(&self.network)?;
        w.write_constrained_uint(u64::from(self.tsap_identifier), 0, 65535)?;
        w.write_sequence_of(&self.route, |w, hop| {
            w.set_size_constraint(SizeConstraint::fixed(4));
            w.write_octet_string(hop)
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnicastAddress {
    IpAddress(UnicastIpAddress),
    IpxAddress(UnicastIpxAddress),
    Ip6Address(UnicastIpAddress),
    NetBios(Vec<u8>),
    IpSourceRoute(UnicastIpSourceRoute),
    Unknown(RawExtension),
}

impl UnicastAddress {
    const NUM_ROOT: u32 = 5;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::IpAddress(UnicastIpAddress::decode_sized(r, 4)?)),
            ChoiceTag::Root(1) => Ok(Self::IpxAddress(UnicastIpxAddress::decode(r)?)),
            ChoiceTag::Root(2) => Ok(Self::Ip6Address(UnicastIpAddress::decode_sized(r, 16)?)),
            ChoiceTag::Root(3) => {
                r.set_size_constraint(SizeConstraint::fixed(16));
                Ok(Self::NetBios(r.read_octet_string()?))
            }
            ChoiceTag::Root(4) => Ok(Self::IpSourceRoute(UnicastIpSourceRoute::decode(r)?)),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::IpAddress(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode_sized(w, 4)
            }
            Self::IpxAddress(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Ip6Address(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode_sized(w, 16)
            }
            Self::NetBios(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                w.set_size_constraint(SizeConstraint::fixed(16));
                w.write_octet_string(v)
            }
            Self::IpSourceRoute(v) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
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
pub enum MulticastAddress {
    IpAddress(UnicastIpAddress),
    Ip6Address(UnicastIpAddress),
    Unknown(RawExtension),
}

impl MulticastAddress {
    const NUM_ROOT: u32 = 2;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::IpAddress(UnicastIpAddress::decode_sized(r, 4)?)),
            ChoiceTag::Root(1) => Ok(Self::Ip6Address(UnicastIpAddress::decode_sized(r, 16)?)),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::IpAddress(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode_sized(w, 4)
            }
            Self::Ip6Address(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode_sized(w, 16)
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
        }
    }
}

/// H.245's own transport address, distinct from the H.225 one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum H245TransportAddress {
    UnicastAddress(UnicastAddress),
    MulticastAddress(MulticastAddress),
    Unknown(RawExtension),
}

impl H245TransportAddress {
    const NUM_ROOT: u32 = 2;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::UnicastAddress(UnicastAddress::decode(r)?)),
            ChoiceTag::Root(1) => Ok(Self::MulticastAddress(MulticastAddress::decode(r)?)),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::UnicastAddress(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::MulticastAddress(v) => {
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

// --- capabilities ----------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct H261VideoCapability {
    pub qcif_mpi: Option<u8>,
    pub cif_mpi: Option<u8>,
    pub temporal_spatial_trade_off_capability: bool,
    pub max_bit_rate: u32,
    pub still_image_transmission: bool,
    pub unknown_extensions: Vec<RawExtension>,
}

impl H261VideoCapability {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 2)?;
        let qcif_mpi = r.optional(opt.get(0), |r| Ok(r.read_constrained_uint(1, 4)? as u8))?;
        let cif_mpi = r.optional(opt.get(1), |r| Ok(r.read_constrained_uint(1, 4)? as u8))?;
        let temporal_spatial_trade_off_capability = r.read_boolean()?;
        let max_bit_rate = r.read_constrained_uint(1, 19200)? as u32;
        let still_image_transmission = r.read_boolean()?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            qcif_mpi,
            cif_mpi,
            temporal_spatial_trade_off_capability,
            max_bit_rate,
            still_image_transmission,
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
            &[self.qcif_mpi.is_some(), self.cif_mpi.is_some()],
        )?;
        if let Some(v) = &self.qcif_mpi {
            w.write_constrained_uint(u64::from(*v), 1, 4)?;
        }
        if let Some(v) = &self.cif_mpi {
            w.write_constrained_uint(u64::from(*v), 1, 4)?;
        }
        w.write_boolean(self.temporal_spatial_trade_off_capability)?;
        w.write_constrained_uint(u64::from(self.max_bit_rate), 1, 19200)?;
        w.write_boolean(self.still_image_transmission)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct H262VideoCapability {
    pub profile_and_level_sp_at_ml: bool,
    pub profile_and_level_mp_at_ll: bool,
    pub profile_and_level_mp_at_ml: bool,
    pub profile_and_level_mp_at_h14: bool,
    pub profile_and_level_mp_at_hl: bool,
    pub profile_and_level_snr_at_ll: bool,
    pub profile_and_level_snr_at_ml: bool,
    pub profile_and_level_spatial_at_h14: bool,
    pub profile_and_level_hp_at_ml: bool,
    pub profile_and_level_hp_at_h14: bool,
    pub profile_and_level_hp_at_hl: bool,
    pub video_bit_rate: Option<u32>,
    pub vbv_buffer_size: Option<u32>,
    pub samples_per_line: Option<u16>,
    pub lines_per_frame: Option<u16>,
    pub frames_per_second: Option<u8>,
    pub luminance_sample_rate: Option<u32>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl H262VideoCapability {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 6)?;
        let profile_and_level_sp_at_ml = r.read_boolean()?;
        let profile_and_level_mp_at_ll = r.read_boolean()?;
        let profile_and_level_mp_at_ml = r.read_boolean()?;
        let profile_and_level_mp_at_h14 = r.read_boolean()?;
        let profile_and_level_mp_at_hl = r.read_boolean()?;
        let profile_and_level_snr_at_ll = r.read_boolean()?;
        let profile_and_level_snr_at_ml = r.read_boolean()?;
        let profile_and_level_spatial_at_h14 = r.read_boolean()?;
        let profile_and_level_hp_at_ml = r.read_boolean()?;
        let profile_and_level_hp_at_h14 = r.read_boolean()?;
        let profile_and_level_hp_at_hl = r.read_boolean()?;
        let video_bit_rate = r.optional(opt.get(0), |r| {
            Ok(r.read_constrained_uint(0, 1_073_741_823)? as u32)
        })?;
        let vbv_buffer_size = r.optional(opt.get(1), |r| {
            Ok(r.read_constrained_uint(0, 262_143)? as u32)
        })?;
        let samples_per_line =
            r.optional(opt.get(2), |r| Ok(r.read_constrained_uint(0, 16383)? as u16))?;
        let lines_per_frame =
            r.optional(opt.get(3), |r| Ok(r.read_constrained_uint(0, 16383)? as u16))?;
        let frames_per_second =
            r.optional(opt.get(4), |r| Ok(r.read_constrained_uint(0, 15)? as u8))?;
        let luminance_sample_rate = r.optional(opt.get(5), |r| {
            Ok(r.read_constrained_uint(0, u64::from(u32::MAX))? as u32)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            profile_and_level_sp_at_ml,
            profile_and_level_mp_at_ll,
            profile_and_level_mp_at_ml,
            profile_and_level_mp_at_h14,
            profile_and_level_mp_at_hl,
            profile_and_level_snr_at_ll,
            profile_and_level_snr_at_ml,
            profile_and_level_spatial_at_h14,
            profile_and_level_hp_at_ml,
            profile_and_level_hp_at_h14,
            profile_and_level_hp_at_hl,
            video_bit_rate,
            vbv_buffer_size,
            samples_per_line,
            lines_per_frame,
            frames_per_second,
            luminance_sample_rate,
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
                self.video_bit_rate.is_some(),
                self.vbv_buffer_size.is_some(),
                self.samples_per_line.is_some(),
                self.lines_per_frame.is_some(),
                self.frames_per_second.is_some(),
                self.luminance_sample_rate.is_some(),
            ],
        )?;
        w.write_boolean(self.profile_and_level_sp_at_ml)?;
        w.write_boolean(self.profile_and_level_mp_at_ll)?;
        w.write_boolean(self.profile_and_level_mp_at_ml)?;
        w.write_boolean(self.profile_and_level_mp_at_h14)?;
        w.write_boolean(self.profile_and_level_mp_at_hl)?;
        w.write_boolean(self.profile_and_level_snr_at_ll)?;
        w.write_boolean(self.profile_and_level_snr_at_ml)?;
        w.write_boolean(self.profile_and_level_spatial_at_h14)?;
        w.write_boolean(self.profile_and_level_hp_at_ml)?;
        w.write_boolean(self.profile_and_level_hp_at_h14)?;
        w.write_boolean(self.profile_and_level_hp_at_hl)?;
        if let Some(v) = &self.video_bit_rate {
            w.write_constrained_uint(u64::from(*v), 0, 1_073_741_823)?;
        }
        if let Some(v) = &self.vbv_buffer_size {
            w.write_constrained_uint(u64::from(*v), 0, 262_143)?;
        }
        if let Some(v) = &self.samples_per_line {
            w.write_constrained_uint(u64::from(*v), 0, 16383)?;
        }
        if let Some(v) = &self.lines_per_frame {
            w.write_constrained_uint(u64::from(*v), 0, 16383)?;
        }
        if let Some(v) = &self.frames_per_second {
            w.write_constrained_uint(u64::from(*v), 0, 15)?;
        }
        if let Some(v) = &self.luminance_sample_rate {
            w.write_constrained_uint(u64::from(*v), 0, u64::from(u32::MAX))?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct H263VideoCapability {
    pub sqcif_mpi: Option<u8>,
    pub qcif_mpi: Option<u8>,
    pub cif_mpi: Option<u8>,
    pub cif4_mpi: Option<u8>,
    pub cif16_mpi: Option<u8>,
    pub max_bit_rate: u32,
    pub unrestricted_vector: bool,
    pub arithmetic_coding: bool,
    pub advanced_prediction: bool,
    pub pb_frames: bool,
    pub temporal_spatial_trade_off_capability: bool,
    pub hrd_b: Option<u32>,
    pub bpp_max_kb: Option<u16>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl H263VideoCapability {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 7)?;
        let sqcif_mpi = r.optional(opt.get(0), |r| Ok(r.read_constrained_uint(1, 32)? as u8))?;
        let qcif_mpi = r.optional(opt.get(1), |r| Ok(r.read_constrained_uint(1, 32)? as u8))?;
        let cif_mpi = r.optional(opt.get(2), |r| Ok(r.read_constrained_uint(1, 32)? as u8))?;
        let cif4_mpi = r.optional(opt.get(3), |r| Ok(r.read_constrained_uint(1, 32)? as u8))?;
        let cif16_mpi = r.optional(opt.get(4), |r| Ok(r.read_constrained_uint(1, 32)? as u8))?;
        let max_bit_rate = r.read_constrained_uint(1, 192_400)? as u32;
        let unrestricted_vector = r.read_boolean()?;
        let arithmetic_coding = r.read_boolean()?;
        let advanced_prediction = r.read_boolean()?;
        let pb_frames = r.read_boolean()?;
        let temporal_spatial_trade_off_capability = r.read_boolean()?;
        let hrd_b = r.optional(opt.get(5), |r| {
            Ok(r.read_constrained_uint(0, 524_287)? as u32)
        })?;
        let bpp_max_kb =
            r.optional(opt.get(6), |r| Ok(r.read_constrained_uint(0, 65535)? as u16))?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            sqcif_mpi,
            qcif_mpi,
            cif_mpi,
            cif4_mpi,
            cif16_mpi,
            max_bit_rate,
            unrestricted_vector,
            arithmetic_coding,
            advanced_prediction,
            pb_frames,
            temporal_spatial_trade_off_capability,
            hrd_b,
            bpp_max_kb,
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
                self.sqcif_mpi.is_some(),
                self.qcif_mpi.is_some(),
                self.cif_mpi.is_some(),
                self.cif4_mpi.is_some(),
                self.cif16_mpi.is_some(),
                self.hrd_b.is_some(),
                self.bpp_max_kb.is_some(),
            ],
        )?;
        for mpi in [
            &self.sqcif_mpi,
            &self.qcif_mpi,
            &self.cif_mpi,
            &self.cif4_mpi,
            &self.cif16_mpi,
        ] {
            if let Some(v) = mpi {
                w.write_constrained_uint(u64::from(*v), 1, 32)?;
            }
        }
        w.write_constrained_uint(u64::from(self.max_bit_rate), 1, 192_400)?;
        w.write_boolean(self.unrestricted_vector)?;
        w.write_boolean(self.arithmetic_coding)?;
        w.write_boolean(self.advanced_prediction)?;
        w.write_boolean(self.pb_frames)?;
        w.write_boolean(self.temporal_spatial_trade_off_capability)?;
        if let Some(v) = &self.hrd_b {
            w.write_constrained_uint(u64::from(*v), 0, 524_287)?;
        }
        if let Some(v) = &self.bpp_max_kb {
            w.write_constrained_uint(u64::from(*v), 0, 65535)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Is11172VideoCapability {
    pub constrained_bitstream: bool,
    pub video_bit_rate: Option<u32>,
    pub vbv_buffer_size: Option<u32>,
    pub samples_per_line: Option<u16>,
    pub lines_per_frame: Option<u16>,
    pub picture_rate: Option<u8>,
    pub luminance_sample_rate: Option<u32>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl Is11172VideoCapability {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 6)?;
        let constrained_bitstream = r.read_boolean()?;
        let video_bit_rate = r.optional(opt.get(0), |r| {
            Ok(r.read_constrained_uint(0, 1_073_741_823)? as u32)
        })?;
        let vbv_buffer_size = r.optional(opt.get(1), |r| {
            Ok(r.read_constrained_uint(0, 262_143)? as u32)
        })?;
        let samples_per_line =
            r.optional(opt.get(2), |r| Ok(r.read_constrained_uint(0, 16383)? as u16))?;
        let lines_per_frame =
            r.optional(opt.get(3), |r| Ok(r.read_constrained_uint(0, 16383)? as u16))?;
        let picture_rate = r.optional(opt.get(4), |r| Ok(r.read_constrained_uint(0, 15)? as u8))?;
        let luminance_sample_rate = r.optional(opt.get(5), |r| {
            Ok(r.read_constrained_uint(0, u64::from(u32::MAX))? as u32)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            constrained_bitstream,
            video_bit_rate,
            vbv_buffer_size,
            samples_per_line,
            lines_per_frame,
            picture_rate,
            luminance_sample_rate,
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
                self.video_bit_rate.is_some(),
                self.vbv_buffer_size.is_some(),
                self.samples_per_line.is_some(),
                self.lines_per_frame.is_some(),
                self.picture_rate.is_some(),
                self.luminance_sample_rate.is_some(),
            ],
        )?;
        w.write_boolean(self.constrained_bitstream)?;
        if let Some(v) = &self.video_bit_rate {
            w.write_constrained_uint(u64::from(*v), 0, 1_073_741_823)?;
        }
        if let Some(v) = &self.vbv_buffer_size {
            w.write_constrained_uint(u64::from(*v), 0, 262_143)?;
        }
        if let Some(v) = &self.samples_per_line {
            w.write_constrained_uint(u64::from(*v), 0, 16383)?;
        }
        if let Some(v) = &self.lines_per_frame {
            w.write_constrained_uint(u64::from(*v), 0, 16383)?;
        }
        if let Some(v) = &self.picture_rate {
            w.write_constrained_uint(u64::from(*v), 0, 15)?;
        }
        if let Some(v) = &self.luminance_sample_rate {
            w.write_constrained_uint(u64::from(*v), 0, u64::from(u32::MAX))?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VideoCapability {
    NonStandard(NonStandardParameter),
    H261VideoCapability(H261VideoCapability),
    H262VideoCapability(H262VideoCapability),
    H263VideoCapability(H263VideoCapability),
    Is11172VideoCapability(Is11172VideoCapability),
    Unknown(RawExtension),
}

impl VideoCapability {
    const NUM_ROOT: u32 = 5;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(NonStandardParameter::decode(r)?)),
            ChoiceTag::Root(1) => Ok(Self::H261VideoCapability(H261VideoCapability::decode(r)?)),
            ChoiceTag::Root(2) => Ok(Self::H262VideoCapability(H262VideoCapability::decode(r)?)),
            ChoiceTag::Root(3) => Ok(Self::H263VideoCapability(H263VideoCapability::decode(r)?)),
            ChoiceTag::Root(4) => Ok(Self::Is11172VideoCapability(
                Is11172VideoCapability::decode(r)?,
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
            Self::H261VideoCapability(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::H262VideoCapability(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::H263VideoCapability(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Is11172VideoCapability(v) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
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
pub struct G7231Capability {
    pub max_al_sdu_audio_frames: u16,
    pub silence_suppression: bool,
}

impl G7231Capability {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            max_al_sdu_audio_frames: r.read_constrained_uint(1, 256)? as u16,
            silence_suppression: r.read_boolean()?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_constrained_uint(u64::from(self.max_al_sdu_audio_frames), 1, 256)?;
        w.write_boolean(self.silence_suppression)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Is11172AudioCapability {
    pub audio_layer1: bool,
    pub audio_layer2: bool,
    pub audio_layer3: bool,
    pub audio_sampling32k: bool,
    pub audio_sampling44k1: bool,
    pub audio_sampling48k: bool,
    pub single_channel: bool,
    pub two_channels: bool,
    pub bit_rate: u16,
}

impl Is11172AudioCapability {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            audio_layer1: r.read_boolean()?,
            audio_layer2: r.read_boolean()?,
            audio_layer3: r.read_boolean()?,
            audio_sampling32k: r.read_boolean()?,
            audio_sampling44k1: r.read_boolean()?,
            audio_sampling48k: r.read_boolean()?,
            single_channel: r.read_boolean()?,
            two_channels: r.read_boolean()?,
            bit_rate: r.read_constrained_uint(1, 448)? as u16,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_boolean(self.audio_layer1)?;
        w.write_boolean(self.audio_layer2)?;
        w.write_boolean(self.audio_layer3)?;
        w.write_boolean(self.audio_sampling32k)?;
        w.write_boolean(self.audio_sampling44k1)?;
        w.write_boolean(self.audio_sampling48k)?;
        w.write_boolean(self.single_channel)?;
        w.write_boolean(self.two_channels)?;
        w.write_constrained_uint(u64::from(self.bit_rate), 1, 448)
    }
}

/// Audio codecs. The G.711/G.722/G.728/G.729 family carries the number of
/// frames per AL-SDU; G.723.1 adds silence suppression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioCapability {
    NonStandard(NonStandardParameter),
    G711Alaw64k(u16),
    G711Alaw56k(u16),
    G711Ulaw64k(u16),
    G711Ulaw56k(u16),
    G722_64k(u16),
    G722_56k(u16),
    G722_48k(u16),
    G7231(G7231Capability),
    G728(u16),
    G729(u16),
    G729AnnexA(u16),
    Is11172AudioCapability(Is11172AudioCapability),
    Is13818AudioCapability(Is11172AudioCapability),
    Unknown(RawExtension),
}

impl AudioCapability {
    const NUM_ROOT: u32 = 14;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let frames = |r: &mut PerReader<'_, '_>| Ok(r.read_constrained_uint(1, 256)? as u16);
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(NonStandardParameter::decode(r)?)),
            ChoiceTag::Root(1) => Ok(Self::G711Alaw64k(frames(r)?)),
            ChoiceTag::Root(2) => Ok(Self::G711Alaw56k(frames(r)?)),
            ChoiceTag::Root(3) => Ok(Self::G711Ulaw64k(frames(r)?)),
            ChoiceTag::Root(4) => Ok(Self::G711Ulaw56k(frames(r)?)),
            ChoiceTag::Root(5) => Ok(Self::G722_64k(frames(r)?)),
            ChoiceTag::Root(6) => Ok(Self::G722_56k(frames(r)?)),
            ChoiceTag::Root(7) => Ok(Self::G722_48k(frames(r)?)),
            ChoiceTag::Root(8) => Ok(Self::G7231(G7231Capability::decode(r)?)),
            ChoiceTag::Root(9) => Ok(Self::G728(frames(r)?)),
            ChoiceTag::Root(10) => Ok(Self::G729(frames(r)?)),
            ChoiceTag::Root(11) => Ok(Self::G729AnnexA(frames(r)?)),
            ChoiceTag::Root(12) => Ok(Self::Is11172AudioCapability(
                Is11172AudioCapability::decode(r)?,
            )),
            ChoiceTag::Root(13) => Ok(Self::Is13818AudioCapability(
                Is11172AudioCapability::decode(r)?,
            )),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let frames = |w: &mut PerWriter, v: u16| w.write_constrained_uint(u64::from(v), 1, 256);
        match self {
            Self::NonStandard(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::G711Alaw64k(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                frames(w, *v)
            }
            Self::G711Alaw56k(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                frames(w, *v)
            }
            Self::G711Ulaw64k(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                frames(w, *v)
            }
            Self::G711Ulaw56k(v) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
                frames(w, *v)
            }
            Self::G722_64k(v) => {
                w.write_choice_root(5, Self::NUM_ROOT, true)?;
                frames(w, *v)
            }
            Self::G722_56k(v) => {
                w.write_choice_root(6, Self::NUM_ROOT, true)?;
                frames(w, *v)
            }
            Self::G722_48k(v) => {
                w.write_choice_root(7, Self::NUM_ROOT, true)?;
                frames(w, *v)
            }
            Self::G7231(v) => {
                w.write_choice_root(8, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::G728(v) => {
                w.write_choice_root(9, Self::NUM_ROOT, true)?;
                frames(w, *v)
            }
            Self::G729(v) => {
                w.write_choice_root(10, Self::NUM_ROOT, true)?;
                frames(w, *v)
            }
            Self::G729AnnexA(v) => {
                w.write_choice_root(11, Self::NUM_ROOT, true)?;
                frames(w, *v)
            }
            Self::Is11172AudioCapability(v) => {
                w.write_choice_root(12, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Is13818AudioCapability(v) => {
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

/// Lower-layer protocol under a data application. Root alternative 0 is the
/// non-standard escape; the rest are markers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataProtocolCapability {
    NonStandard(NonStandardParameter),
    V14Buffered,
    V42Lapm,
    HdlcFrameTunnelling,
    H310SeparateVcStack,
    H310SingleVcStack,
    Transparent,
    Unknown(RawExtension),
}

impl DataProtocolCapability {
    const NUM_ROOT: u32 = 7;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(NonStandardParameter::decode(r)?)),
            ChoiceTag::Root(1) => {
                r.read_null()?;
                Ok(Self::V14Buffered)
            }
            ChoiceTag::Root(2) => {
                r.read_null()?;
                Ok(Self::V42Lapm)
            }
            ChoiceTag::Root(3) => {
                r.read_null()?;
                Ok(Self::HdlcFrameTunnelling)
            }
            ChoiceTag::Root(4) => {
                r.read_null()?;
                Ok(Self::H310SeparateVcStack)
            }
            ChoiceTag::Root(5) => {
                r.read_null()?;
                Ok(Self::H310SingleVcStack)
            }
            ChoiceTag::Root(6) => {
                r.read_null()?;
                Ok(Self::Transparent)
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
            Self::NonStandard(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                return v.encode(w);
            }
            Self::V14Buffered => 1,
            Self::V42Lapm => 2,
            Self::HdlcFrameTunnelling => 3,
            Self::H310SeparateVcStack => 4,
            Self::H310SingleVcStack => 5,
            Self::Transparent => 6,
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
pub enum DataApplication {
    NonStandard(NonStandardParameter),
    T120(DataProtocolCapability),
    DsmCc(DataProtocolCapability),
    UserData(DataProtocolCapability),
    T434(DataProtocolCapability),
    H224(DataProtocolCapability),
    DsvdControl,
    H222DataPartitioning(DataProtocolCapability),
    Unknown(RawExtension),
}

impl DataApplication {
    const NUM_ROOT: u32 = 8;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(NonStandardParameter::decode(r)?)),
            ChoiceTag::Root(1) => Ok(Self::T120(DataProtocolCapability::decode(r)?)),
            ChoiceTag::Root(2) => Ok(Self::DsmCc(DataProtocolCapability::decode(r)?)),
            ChoiceTag::Root(3) => Ok(Self::UserData(DataProtocolCapability::decode(r)?)),
            ChoiceTag::Root(4) => Ok(Self::T434(DataProtocolCapability::decode(r)?)),
            ChoiceTag::Root(5) => Ok(Self::H224(DataProtocolCapability::decode(r)?)),
            ChoiceTag::Root(6) => {
                r.read_null()?;
                Ok(Self::DsvdControl)
            }
            ChoiceTag::Root(7) => Ok(Self::H222DataPartitioning(DataProtocolCapability::decode(
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
            Self::NonStandard(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::T120(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::DsmCc(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::UserData(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::T434(v) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::H224(v) => {
                w.write_choice_root(5, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::DsvdControl => {
                w.write_choice_root(6, Self::NUM_ROOT, true)?;
                w.write_null()
            }
            Self::H222DataPartitioning(v) => {
                w.write_choice_root(7, Self::NUM_ROOT, true)?;
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
pub struct DataApplicationCapability {
    pub application: DataApplication,
    pub max_bit_rate: u32,
}

impl DataApplicationCapability {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            application: DataApplication::decode(r)?,
            max_bit_rate: r.read_constrained_uint(0, u64::from(u32::MAX))? as u32,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        self.application.encode(w)?;
        w.write_constrained_uint(u64::from(self.max_bit_rate), 0, u64::from(u32::MAX))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct H233EncryptionReceiveCapability {
    pub h233_iv_response_time: u8,
    pub unknown_extensions: Vec<RawExtension>,
}

impl H233EncryptionReceiveCapability {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let h233_iv_response_time = r.read_constrained_uint(0, 255)? as u8;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            h233_iv_response_time,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_constrained_uint(u64::from(self.h233_iv_response_time), 0, 255)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

/// One entry of the capability table, by direction and medium.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Capability {
    NonStandard(NonStandardParameter),
    ReceiveVideoCapability(VideoCapability),
    TransmitVideoCapability(VideoCapability),
    ReceiveAndTransmitVideoCapability(VideoCapability),
    ReceiveAudioCapability(AudioCapability),
    TransmitAudioCapability(AudioCapability),
    ReceiveAndTransmitAudioCapability(AudioCapability),
    ReceiveDataApplicationCapability(DataApplicationCapability),
    TransmitDataApplicationCapability(DataApplicationCapability),
    ReceiveAndTransmitDataApplicationCapability(DataApplicationCapability),
    H233EncryptionTransmitCapability(bool),
    H233EncryptionReceiveCapability(H233EncryptionReceiveCapability),
    Unknown(RawExtension),
}

impl Capability {
    const NUM_ROOT: u32 = 12;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(NonStandardParameter::decode(r)?)),
            ChoiceTag::Root(1) => Ok(Self::ReceiveVideoCapability(VideoCapability::decode(r)?)),
            ChoiceTag::Root(2) => Ok(Self::TransmitVideoCapability(VideoCapability::decode(r)?)),
            ChoiceTag::Root(3) => Ok(Self::ReceiveAndTransmitVideoCapability(
                VideoCapability::decode(r)?,
            )),
            ChoiceTag::Root(4) => Ok(Self::ReceiveAudioCapability(AudioCapability::decode(r)?)),
            ChoiceTag::Root(5) => Ok(Self::TransmitAudioCapability(AudioCapability::decode(r)?)),
            ChoiceTag::Root(6) => Ok(Self::ReceiveAndTransmitAudioCapability(
                AudioCapability::decode(r)?,
            )),
            ChoiceTag::Root(7) => Ok(Self::ReceiveDataApplicationCapability(
                DataApplicationCapability::decode(r)?,
            )),
            ChoiceTag::Root(8) => Ok(Self::TransmitDataApplicationCapability(
                DataApplicationCapability::decode(r)?,
            )),
            ChoiceTag::Root(9) => Ok(Self::ReceiveAndTransmitDataApplicationCapability(
                DataApplicationCapability::decode(r)?,
            )),
            ChoiceTag::Root(10) => Ok(Self::H233EncryptionTransmitCapability(r.read_boolean()?)),
            ChoiceTag::Root(11) => Ok(Self::H233EncryptionReceiveCapability(
                H233EncryptionReceiveCapability::decode(r)?,
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
            Self::ReceiveVideoCapability(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::TransmitVideoCapability(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::ReceiveAndTransmitVideoCapability(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::ReceiveAudioCapability(v) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::TransmitAudioCapability(v) => {
                w.write_choice_root(5, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::ReceiveAndTransmitAudioCapability(v) => {
                w.write_choice_root(6, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::ReceiveDataApplicationCapability(v) => {
                w.write_choice_root(7, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::TransmitDataApplicationCapability(v) => {
                w.write_choice_root(8, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::ReceiveAndTransmitDataApplicationCapability(v) => {
                w.write_choice_root(9, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::H233EncryptionTransmitCapability(v) => {
                w.write_choice_root(10, Self::NUM_ROOT, true)?;
                w.write_boolean(*v)
            }
            Self::H233EncryptionReceiveCapability(v) => {
                w.write_choice_root(11, Self::NUM_ROOT, true)?;
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
pub struct CapabilityTableEntry {
    pub capability_table_entry_number: u16,
    pub capability: Option<Capability>,
}

impl CapabilityTableEntry {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (_, opt) = r.read_sequence_header(false, 1)?;
        let capability_table_entry_number = r.read_constrained_uint(1, 65535)? as u16;
        let capability = r.optional(opt.get(0), Capability::decode)?;
        Ok(Self {
            capability_table_entry_number,
            capability,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_sequence_header(false, false, &[self.capability.is_some()])?;
        w.write_constrained_uint(u64::from(self.capability_table_entry_number), 1, 65535)?;
        if let Some(v) = &self.capability {
            v.encode(w)?;
        }
        Ok(())
    }
}

/// Set of table entries usable at the same time.
pub type AlternativeCapabilitySet = Vec<u16>;

fn read_alternative_capability_set(r: &mut PerReader<'_, '_>) -> Result<AlternativeCapabilitySet> {
    r.set_size_constraint(SizeConstraint::range(1, 256));
    r.read_sequence_of("alternativeCapabilitySet", |r| {
        Ok(r.read_constrained_uint(1, 65535)? as u16)
    })
}

fn write_alternative_capability_set(w: &mut PerWriter, value: &[u16]) -> Result<()> {
    w.set_size_constraint(SizeConstraint::range(1, 256));
    w.write_sequence_of(value, |w, n| w.write_constrained_uint(u64::from(*n), 1, 65535))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapabilityDescriptor {
    pub capability_descriptor_number: u8,
    pub simultaneous_capabilities: Option<Vec<AlternativeCapabilitySet>>,
}

impl CapabilityDescriptor {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (_, opt) = r.read_sequence_header(false, 1)?;
        let capability_descriptor_number = r.read_constrained_uint(0, 255)? as u8;
        let simultaneous_capabilities = r.optional(opt.get(0), |r| {
            r.set_size_constraint(SizeConstraint::range(1, 256));
            r.read_sequence_of("simultaneousCapabilities", read_alternative_capability_set)
        })?;
        Ok(Self {
            capability_descriptor_number,
            simultaneous_capabilities,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_sequence_header(false, false, &[self.simultaneous_capabilities.is_some()])?;
        w.write_constrained_uint(u64::from(self.capability_descriptor_number), 0, 255)?;
        if let Some(v) = &self.simultaneous_capabilities {
            w.set_size_constraint(SizeConstraint::range(1, 256));
            w.write_sequence_of(v, |w, s| write_alternative_capability_set(w, s))?;
        }
        Ok(())
    }
}

// --- multiplex capability --------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct H222Capability {
    pub number_of_vcs: u16,
    pub unknown_extensions: Vec<RawExtension>,
}

impl H222Capability {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let number_of_vcs = r.read_constrained_uint(1, 256)? as u16;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            number_of_vcs,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_constrained_uint(u64::from(self.number_of_vcs), 1, 256)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct H223Capability {
    pub transport_with_i_frames: bool,
    pub maximum_al2_sdu_size: u16,
    pub maximum_al3_sdu_size: u16,
    pub maximum_delay_jitter: u16,
    pub unknown_extensions: Vec<RawExtension>,
}

impl H223Capability {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let transport_with_i_frames = r.read_boolean()?;
        let maximum_al2_sdu_size = r.read_constrained_uint(0, 65535)? as u16;
        let maximum_al3_sdu_size = r.read_constrained_uint(0, 65535)? as u16;
        let maximum_delay_jitter = r.read_constrained_uint(0, 1023)? as u16;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            transport_with_i_frames,
            maximum_al2_sdu_size,
            maximum_al3_sdu_size,
            maximum_delay_jitter,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_boolean(self.transport_with_i_frames)?;
        w.write_constrained_uint(u64::from(self.maximum_al2_sdu_size), 0, 65535)?;
        w.write_constrained_uint(u64::from(self.maximum_al3_sdu_size), 0, 65535)?;
        w.write_constrained_uint(u64::from(self.maximum_delay_jitter), 0, 1023)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct V76Capability {
    pub suspend_resume_capability_with_address: bool,
    pub suspend_resume_capability_without_address: bool,
    pub rej_capability: bool,
    pub srej_capability: bool,
    pub mrej_capability: bool,
    pub uih_capability: bool,
    pub num_of_dlcs: u16,
    pub two_octet_address_field_capability: bool,
    pub loop_back_test_capability: bool,
    pub unknown_extensions: Vec<RawExtension>,
}

impl V76Capability {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let suspend_resume_capability_with_address = r.read_boolean()?;
        let suspend_resume_capability_without_address = r.read_boolean()?;
        let rej_capability = r.read_boolean()?;
        let srej_capability = r.read_boolean()?;
        let mrej_capability = r.read_boolean()?;
        let uih_capability = r.read_boolean()?;
        let num_of_dlcs = r.read_constrained_uint(2, 8191)? as u16;
        let two_octet_address_field_capability = r.read_boolean()?;
        let loop_back_test_capability = r.read_boolean()?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            suspend_resume_capability_with_address,
            suspend_resume_capability_without_address,
            rej_capability,
            srej_capability,
            mrej_capability,
            uih_capability,
            num_of_dlcs,
            two_octet_address_field_capability,
            loop_back_test_capability,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_boolean(self.suspend_resume_capability_with_address)?;
        w.write_boolean(self.suspend_resume_capability_without_address)?;
        w.write_boolean(self.rej_capability)?;
        w.write_boolean(self.srej_capability)?;
        w.write_boolean(self.mrej_capability)?;
        w.write_boolean(self.uih_capability)?;
        w.write_constrained_uint(u64::from(self.num_of_dlcs), 2, 8191)?;
        w.write_boolean(self.two_octet_address_field_capability)?;
        w.write_boolean(self.loop_back_test_capability)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct MediaDistributionCapability {
    pub centralized_control: bool,
    pub distributed_control: bool,
    pub centralized_audio: bool,
    pub distributed_audio: bool,
    pub centralized_video: bool,
    pub distributed_video: bool,
    pub centralized_data: Option<Vec<DataApplicationCapability>>,
    pub distributed_data: Option<Vec<DataApplicationCapability>>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl MediaDistributionCapability {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 2)?;
        let centralized_control = r.read_boolean()?;
        let distributed_control = r.read_boolean()?;
        let centralized_audio = r.read_boolean()?;
        let distributed_audio = r.read_boolean()?;
        let centralized_video = r.read_boolean()?;
        let distributed_video = r.read_boolean()?;
        let centralized_data = r.optional(opt.get(0), |r| {
            r.read_sequence_of("centralizedData", DataApplicationCapability::decode)
        })?;
        let distributed_data = r.optional(opt.get(1), |r| {
            r.read_sequence_of("distributedData", DataApplicationCapability::decode)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            centralized_control,
            distributed_control,
            centralized_audio,
            distributed_audio,
            centralized_video,
            distributed_video,
            centralized_data,
            distributed_data,
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
            &[self.centralized_data.is_some(), self.distributed_data.is_some()],
        )?;
        w.write_boolean(self.centralized_control)?;
        w.write_boolean(self.distributed_control)?;
        w.write_boolean(self.centralized_audio)?;
        w.write_boolean(self.distributed_audio)?;
        w.write_boolean(self.centralized_video)?;
        w.write_boolean(self.distributed_video)?;
        if let Some(v) = &self.centralized_data {
            w.write_sequence_of(v, |w, d| d.encode(w))?;
        }
        if let Some(v) = &self.distributed_data {
            w.write_sequence_of(v, |w, d| d.encode(w))?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct MultipointCapability {
    pub multicast_capability: bool,
    pub multi_uni_cast_conference: bool,
    pub media_distribution_capability: Vec<MediaDistributionCapability>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl MultipointCapability {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let multicast_capability = r.read_boolean()?;
        let multi_uni_cast_conference = r.read_boolean()?;
        let media_distribution_capability = r.read_sequence_of(
            "mediaDistributionCapability",
            MediaDistributionCapability::decode,
        )?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            multicast_capability,
            multi_uni_cast_conference,
            media_distribution_capability,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_boolean(self.multicast_capability)?;
        w.write_boolean(self.multi_uni_cast_conference)?;
        w.write_sequence_of(&self.media_distribution_capability, |w, c| c.encode(w))?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct H2250Capability {
    pub maximum_audio_delay_jitter: u16,
    pub receive_multipoint_capability: MultipointCapability,
    pub transmit_multipoint_capability: MultipointCapability,
    pub receive_and_transmit_multipoint_capability: MultipointCapability,
    pub centralized_conference_mc: bool,
    pub decentralized_conference_mc: bool,
    pub rtcp_video_control_capability: bool,
    pub h261a_video_packetization: bool,
    pub unknown_extensions: Vec<RawExtension>,
}

impl H2250Capability {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let maximum_audio_delay_jitter = r.read_constrained_uint(0, 1023)? as u16;
        let receive_multipoint_capability = MultipointCapability::decode(r)?;
        let transmit_multipoint_capability = MultipointCapability::decode(r)?;
        let receive_and_transmit_multipoint_capability = MultipointCapability::decode(r)?;
        // mcCapability
        let centralized_conference_mc = r.read_boolean()?;
        let decentralized_conference_mc = r.read_boolean()?;
        let rtcp_video_control_capability = r.read_boolean()?;
        // mediaPacketizationCapability
        let h261a_video_packetization = r.read_boolean()?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            maximum_audio_delay_jitter,
            receive_multipoint_capability,
            transmit_multipoint_capability,
            receive_and_transmit_multipoint_capability,
            centralized_conference_mc,
            decentralized_conference_mc,
            rtcp_video_control_capability,
            h261a_video_packetization,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_constrained_uint(u64::from(self.maximum_audio_delay_jitter), 0, 1023)?;
        self.receive_multipoint_capability.encode(w)?;
        self.transmit_multipoint_capability.encode(w)?;
        self.receive_and_transmit_multipoint_capability.encode(w)?;
        w.write_boolean(self.centralized_conference_mc)?;
        w.write_boolean(self.decentralized_conference_mc)?;
        w.write_boolean(self.rtcp_video_control_capability)?;
        w.write_boolean(self.h261a_video_packetization)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MultiplexCapability {
    NonStandard(NonStandardParameter),
    H222Capability(H222Capability),
    H223Capability(H223Capability),
    V76Capability(V76Capability),
    H2250Capability(H2250Capability),
    Unknown(RawExtension),
}

impl MultiplexCapability {
    const NUM_ROOT: u32 = 5;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(NonStandardParameter::decode(r)?)),
            ChoiceTag::Root(1) => Ok(Self::H222Capability(H222Capability::decode(r)?)),
            ChoiceTag::Root(2) => Ok(Self::H223Capability(H223Capability::decode(r)?)),
            ChoiceTag::Root(3) => Ok(Self::V76Capability(V76Capability::decode(r)?)),
            ChoiceTag::Root(4) => Ok(Self::H2250Capability(H2250Capability::decode(r)?)),
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
            Self::H222Capability(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::H223Capability(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::V76Capability(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::H2250Capability(v) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
        }
    }
}

// --- logical channel parameters --------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncryptionMode {
    NonStandard(NonStandardParameter),
    H233Encryption,
    Unknown(RawExtension),
}

impl EncryptionMode {
    const NUM_ROOT: u32 = 2;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(NonStandardParameter::decode(r)?)),
            ChoiceTag::Root(1) => {
                r.read_null()?;
                Ok(Self::H233Encryption)
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
            Self::NonStandard(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::H233Encryption => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                w.write_null()
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataType {
    NonStandard(NonStandardParameter),
    NullData,
    VideoData(VideoCapability),
    AudioData(AudioCapability),
    Data(DataApplicationCapability),
    EncryptionData(EncryptionMode),
    Unknown(RawExtension),
}

impl DataType {
    const NUM_ROOT: u32 = 6;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(NonStandardParameter::decode(r)?)),
            ChoiceTag::Root(1) => {
                r.read_null()?;
                Ok(Self::NullData)
            }
            ChoiceTag::Root(2) => Ok(Self::VideoData(VideoCapability::decode(r)?)),
            ChoiceTag::Root(3) => Ok(Self::AudioData(AudioCapability::decode(r)?)),
            ChoiceTag::Root(4) => Ok(Self::Data(DataApplicationCapability::decode(r)?)),
            ChoiceTag::Root(5) => Ok(Self::EncryptionData(EncryptionMode::decode(r)?)),
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
            Self::NullData => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                w.write_null()
            }
            Self::VideoData(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::AudioData(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Data(v) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::EncryptionData(v) => {
                w.write_choice_root(5, Self::NUM_ROOT, true)?;
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
pub struct Al3 {
    pub control_field_octets: u8,
    pub send_buffer_size: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdaptationLayer {
    NonStandard(NonStandardParameter),
    Al1Framed,
    Al1NotFramed,
    Al2WithoutSequenceNumbers,
    Al2WithSequenceNumbers,
    Al3(Al3),
    Unknown(RawExtension),
}

impl AdaptationLayer {
    const NUM_ROOT: u32 = 6;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(NonStandardParameter::decode(r)?)),
            ChoiceTag::Root(1) => {
                r.read_null()?;
                Ok(Self::Al1Framed)
            }
            ChoiceTag::Root(2) => {
                r.read_null()?;
                Ok(Self::Al1NotFramed)
            }
            ChoiceTag::Root(3) => {
                r.read_null()?;
                Ok(Self::Al2WithoutSequenceNumbers)
            }
            ChoiceTag::Root(4) => {
                r.read_null()?;
                Ok(Self::Al2WithSequenceNumbers)
            }
            ChoiceTag::Root(5) => {
                let control_field_octets = r.read_constrained_uint(0, 2)? as u8;
                let send_buffer_size = r.read_constrained_uint(0, 16_777_215)? as u32;
                Ok(Self::Al3(Al3 {
                    control_field_octets,
                    send_buffer_size,
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
        let index = match self {
            Self::NonStandard(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                return v.encode(w);
            }
            Self::Al1Framed => 1,
            Self::Al1NotFramed => 2,
            Self::Al2WithoutSequenceNumbers => 3,
            Self::Al2WithSequenceNumbers => 4,
            Self::Al3(v) => {
                w.write_choice_root(5, Self::NUM_ROOT, true)?;
                w.write_constrained_uint(u64::from(v.control_field_octets), 0, 2)?;
                return w.write_constrained_uint(u64::from(v.send_buffer_size), 0, 16_777_215);
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
pub struct H223LogicalChannelParameters {
    pub adaptation_layer: AdaptationLayer,
    pub segmentable_flag: bool,
}

impl H223LogicalChannelParameters {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            adaptation_layer: AdaptationLayer::decode(r)?,
            segmentable_flag: r.read_boolean()?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        self.adaptation_layer.encode(w)?;
        w.write_boolean(self.segmentable_flag)
    }
}

null_choice! {
    CrcLength { Crc8bit, Crc16bit, Crc32bit }
}

null_choice! {
    V76SuspendResume { NoSuspendResume, SuspendResumeWithAddress, SuspendResumeWithoutAddress }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct V76LogicalChannelParameters {
    pub crc_length: CrcLength,
    pub n401: u16,
    pub loopback_test_procedure: bool,
    pub suspend_resume: V76SuspendResume,
    pub audio_header_present: bool,
}

impl V76LogicalChannelParameters {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            crc_length: CrcLength::decode(r)?,
            n401: r.read_constrained_uint(1, 4095)? as u16,
            loopback_test_procedure: r.read_boolean()?,
            suspend_resume: V76SuspendResume::decode(r)?,
            audio_header_present: r.read_boolean()?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        self.crc_length.encode(w)?;
        w.write_constrained_uint(u64::from(self.n401), 1, 4095)?;
        w.write_boolean(self.loopback_test_procedure)?;
        self.suspend_resume.encode(w)?;
        w.write_boolean(self.audio_header_present)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct H222LogicalChannelParameters {
    pub resource_id: u16,
    pub sub_channel_id: u16,
    pub pcr_pid: Option<u16>,
    pub program_descriptors: Option<Vec<u8>>,
    pub stream_descriptors: Option<Vec<u8>>,
}

impl H222LogicalChannelParameters {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (_, opt) = r.read_sequence_header(false, 3)?;
        let resource_id = r.read_constrained_uint(0, 65535)? as u16;
        let sub_channel_id = r.read_constrained_uint(0, 8191)? as u16;
        let pcr_pid = r.optional(opt.get(0), |r| Ok(r.read_constrained_uint(0, 8191)? as u16))?;
        let program_descriptors = r.optional(opt.get(1), |r| r.read_octet_string())?;
        let stream_descriptors = r.optional(opt.get(2), |r| r.read_octet_string())?;
        Ok(Self {
            resource_id,
            sub_channel_id,
            pcr_pid,
            program_descriptors,
            stream_descriptors,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_sequence_header(
            false,
            false,
            &[
                self.pcr_pid.is_some(),
                self.program_descriptors.is_some(),
                self.stream_descriptors.is_some(),
            ],
        )?;
        w.write_constrained_uint(u64::from(self.resource_id), 0, 65535)?;
        w.write_constrained_uint(u64::from(self.sub_channel_id), 0, 8191)?;
        if let Some(v) = &self.pcr_pid {
            w.write_constrained_uint(u64::from(*v), 0, 8191)?;
        }
        if let Some(v) = &self.program_descriptors {
            w.write_octet_string(v)?;
        }
        if let Some(v) = &self.stream_descriptors {
            w.write_octet_string(v)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalLabel {
    pub mcu_number: u8,
    pub terminal_number: u8,
}

impl TerminalLabel {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            mcu_number: r.read_constrained_uint(0, 192)? as u8,
            terminal_number: r.read_constrained_uint(0, 192)? as u8,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_constrained_uint(u64::from(self.mcu_number), 0, 192)?;
        w.write_constrained_uint(u64::from(self.terminal_number), 0, 192)
    }
}

/// Media transport parameters for an H.225.0 (RTP) logical channel. H.323
/// reaches this type through the extension half of the multiplex CHOICE.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct H2250LogicalChannelParameters {
    pub session_id: u8,
    pub associated_session_id: Option<u8>,
    pub media_channel: Option<H245TransportAddress>,
    pub media_guaranteed_delivery: Option<bool>,
    pub media_control_channel: Option<H245TransportAddress>,
    pub media_control_guaranteed_delivery: Option<bool>,
    pub silence_suppression: Option<bool>,
    pub destination: Option<TerminalLabel>,
    pub dynamic_rtp_payload_type: Option<u8>,
    pub h261a_video_packetization: Option<bool>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl H2250LogicalChannelParameters {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 9)?;
        let session_id = r.read_constrained_uint(0, 255)? as u8;
        let associated_session_id =
            r.optional(opt.get(0), |r| Ok(r.read_constrained_uint(1, 255)? as u8))?;
        let media_channel = r.optional(opt.get(1), H245TransportAddress::decode)?;
        let media_guaranteed_delivery = r.optional(opt.get(2), |r| r.read_boolean())?;
        let media_control_channel = r.optional(opt.get(3), H245TransportAddress::decode)?;
        let media_control_guaranteed_delivery = r.optional(opt.get(4), |r| r.read_boolean())?;
        let silence_suppression = r.optional(opt.get(5), |r| r.read_boolean())?;
        let destination = r.optional(opt.get(6), TerminalLabel::decode)?;
        let dynamic_rtp_payload_type =
            r.optional(opt.get(7), |r| Ok(r.read_constrained_uint(96, 127)? as u8))?;
        let h261a_video_packetization = r.optional(opt.get(8), |r| r.read_boolean())?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            session_id,
            associated_session_id,
            media_channel,
            media_guaranteed_delivery,
            media_control_channel,
            media_control_guaranteed_delivery,
            silence_suppression,
            destination,
            dynamic_rtp_payload_type,
            h261a_video_packetization,
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
                self.associated_session_id.is_some(),
                self.media_channel.is_some(),
                self.media_guaranteed_delivery.is_some(),
                self.media_control_channel.is_some(),
                self.media_control_guaranteed_delivery.is_some(),
                self.silence_suppression.is_some(),
                self.destination.is_some(),
                self.dynamic_rtp_payload_type.is_some(),
                self.h261a_video_packetization.is_some(),
            ],
        )?;
        w.write_constrained_uint(u64::from(self.session_id), 0, 255)?;
        if let Some(v) = &self.associated_session_id {
            w.write_constrained_uint(u64::from(*v), 1, 255)?;
        }
        if let Some(v) = &self.media_channel {
            v.encode(w)?;
        }
        if let Some(v) = &self.media_guaranteed_delivery {
            w.write_boolean(*v)?;
        }
        if let Some(v) = &self.media_control_channel {
            v.encode(w)?;
        }
        if let Some(v) = &self.media_control_guaranteed_delivery {
            w.write_boolean(*v)?;
        }
        if let Some(v) = &self.silence_suppression {
            w.write_boolean(*v)?;
        }
        if let Some(v) = &self.destination {
            v.encode(w)?;
        }
        if let Some(v) = &self.dynamic_rtp_payload_type {
            w.write_constrained_uint(u64::from(*v), 96, 127)?;
        }
        if let Some(v) = &self.h261a_video_packetization {
            w.write_boolean(*v)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct H2250LogicalChannelAckParameters {
    pub session_id: Option<u8>,
    pub media_channel: Option<H245TransportAddress>,
    pub media_control_channel: Option<H245TransportAddress>,
    pub dynamic_rtp_payload_type: Option<u8>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl H2250LogicalChannelAckParameters {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 4)?;
        let session_id = r.optional(opt.get(0), |r| Ok(r.read_constrained_uint(1, 255)? as u8))?;
        let media_channel = r.optional(opt.get(1), H245TransportAddress::decode)?;
        let media_control_channel = r.optional(opt.get(2), H245TransportAddress::decode)?;
        let dynamic_rtp_payload_type =
            r.optional(opt.get(3), |r| Ok(r.read_constrained_uint(96, 127)? as u8))?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            session_id,
            media_channel,
            media_control_channel,
            dynamic_rtp_payload_type,
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
                self.session_id.is_some(),
                self.media_channel.is_some(),
                self.media_control_channel.is_some(),
                self.dynamic_rtp_payload_type.is_some(),
            ],
        )?;
        if let Some(v) = &self.session_id {
            w.write_constrained_uint(u64::from(*v), 1, 255)?;
        }
        if let Some(v) = &self.media_channel {
            v.encode(w)?;
        }
        if let Some(v) = &self.media_control_channel {
            v.encode(w)?;
        }
        if let Some(v) = &self.dynamic_rtp_payload_type {
            w.write_constrained_uint(u64::from(*v), 96, 127)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

// --- modes -----------------------------------------------------------------

null_choice! {
    H261Resolution { Qcif, Cif }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct H261VideoMode {
    pub resolution: H261Resolution,
    pub bit_rate: u32,
    pub still_image_transmission: bool,
}

impl H261VideoMode {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            resolution: H261Resolution::decode(r)?,
            bit_rate: r.read_constrained_uint(1, 19200)? as u32,
            still_image_transmission: r.read_boolean()?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        self.resolution.encode(w)?;
        w.write_constrained_uint(u64::from(self.bit_rate), 1, 19200)?;
        w.write_boolean(self.still_image_transmission)
    }
}

null_choice! {
    H263Resolution { Sqcif, Qcif, Cif, Cif4, Cif16 }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct H263VideoMode {
    pub resolution: H263Resolution,
    pub bit_rate: u32,
    pub unrestricted_vector: bool,
    pub arithmetic_coding: bool,
    pub advanced_prediction: bool,
    pub pb_frames: bool,
    pub error_compensation: bool,
}

impl H263VideoMode {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            resolution: H263Resolution::decode(r)?,
            bit_rate: r.read_constrained_uint(1, 19200)? as u32,
            unrestricted_vector: r.read_boolean()?,
            arithmetic_coding: r.read_boolean()?,
            advanced_prediction: r.read_boolean()?,
            pb_frames: r.read_boolean()?,
            error_compensation: r.read_boolean()?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        self.resolution.encode(w)?;
        w.write_constrained_uint(u64::from(self.bit_rate), 1, 19200)?;
        w.write_boolean(self.unrestricted_vector)?;
        w.write_boolean(self.arithmetic_coding)?;
        w.write_boolean(self.advanced_prediction)?;
        w.write_boolean(self.pb_frames)?;
        w.write_boolean(self.error_compensation)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VideoMode {
    NonStandard(NonStandardParameter),
    H261VideoMode(H261VideoMode),
    H262VideoMode(H262VideoCapability),
    H263VideoMode(H263VideoMode),
    Is11172VideoMode(Is11172VideoCapability),
    Unknown(RawExtension),
}

impl VideoMode {
    const NUM_ROOT: u32 = 5;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(NonStandardParameter::decode(r)?)),
            ChoiceTag::Root(1) => Ok(Self::H261VideoMode(H261VideoMode::decode(r)?)),
            ChoiceTag::Root(2) => Ok(Self::H262VideoMode(H262VideoCapability::decode(r)?)),
            ChoiceTag::Root(3) => Ok(Self::H263VideoMode(H263VideoMode::decode(r)?)),
            ChoiceTag::Root(4) => Ok(Self::Is11172VideoMode(Is11172VideoCapability::decode(r)?)),
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
            Self::H261VideoMode(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::H262VideoMode(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::H263VideoMode(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Is11172VideoMode(v) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                w.write_open_type(&ext.data)
            }
        }
    }
}

null_choice! {
    G7231Mode {
        NoSilenceSuppressionLowRate,
        NoSilenceSuppressionHighRate,
        SilenceSuppressionLowRate,
        SilenceSuppressionHighRate,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioMode {
    NonStandard(NonStandardParameter),
    G711Alaw64k,
    G711Alaw56k,
    G711Ulaw64k,
    G711Ulaw56k,
    G722_64k,
    G722_56k,
    G722_48k,
    G728,
    G729,
    G729AnnexA,
    G7231(G7231Mode),
    Is11172AudioMode(Is11172AudioCapability),
    Is13818AudioMode(Is11172AudioCapability),
    Unknown(RawExtension),
}

impl AudioMode {
    const NUM_ROOT: u32 = 14;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(NonStandardParameter::decode(r)?)),
            ChoiceTag::Root(index @ 1..=10) => {
                r.read_null()?;
                Ok(match index {
                    1 => Self::G711Alaw64k,
                    2 => Self::G711Alaw56k,
                    3 => Self::G711Ulaw64k,
                    4 => Self::G711Ulaw56k,
                    5 => Self::G722_64k,
                    6 => Self::G722_56k,
                    7 => Self::G722_48k,
                    8 => Self::G728,
                    9 => Self::G729,
                    _ => Self::G729AnnexA,
                })
            }
            ChoiceTag::Root(11) => Ok(Self::G7231(G7231Mode::decode(r)?)),
            ChoiceTag::Root(12) => Ok(Self::Is11172AudioMode(Is11172AudioCapability::decode(r)?)),
            ChoiceTag::Root(13) => Ok(Self::Is13818AudioMode(Is11172AudioCapability::decode(r)?)),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let index = match self {
            Self::NonStandard(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                return v.encode(w);
            }
            Self::G711Alaw64k => 1,
            Self::G711Alaw56k => 2,
            Self::G711Ulaw64k => 3,
            Self::G711Ulaw56k => 4,
            Self::G722_64k => 5,
            Self::G722_56k => 6,
            Self::G722_48k => 7,
            Self::G728 => 8,
            Self::G729 => 9,
            Self::G729AnnexA => 10,
            Self::G7231(v) => {
                w.write_choice_root(11, Self::NUM_ROOT, true)?;
                return v.encode(w);
            }
            Self::Is11172AudioMode(v) => {
                w.write_choice_root(12, Self::NUM_ROOT, true)?;
                return v.encode(w);
            }
            Self::Is13818AudioMode(v) => {
                w.write_choice_root(13, Self::NUM_ROOT, true)?;
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
pub struct DataMode {
    pub application: DataApplication,
    pub bit_rate: u32,
}

impl DataMode {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            application: DataApplication::decode(r)?,
            bit_rate: r.read_constrained_uint(0, u64::from(u32::MAX))? as u32,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        self.application.encode(w)?;
        w.write_constrained_uint(u64::from(self.bit_rate), 0, u64::from(u32::MAX))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModeElementType {
    NonStandard(NonStandardParameter),
    VideoMode(VideoMode),
    AudioMode(AudioMode),
    DataMode(DataMode),
    EncryptionMode(EncryptionMode),
    Unknown(RawExtension),
}

impl ModeElementType {
    const NUM_ROOT: u32 = 5;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(NonStandardParameter::decode(r)?)),
            ChoiceTag::Root(1) => Ok(Self::VideoMode(VideoMode::decode(r)?)),
            ChoiceTag::Root(2) => Ok(Self::AudioMode(AudioMode::decode(r)?)),
            ChoiceTag::Root(3) => Ok(Self::DataMode(DataMode::decode(r)?)),
            ChoiceTag::Root(4) => Ok(Self::EncryptionMode(EncryptionMode::decode(r)?)),
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
            Self::VideoMode(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::AudioMode(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::DataMode(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::EncryptionMode(v) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
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
pub struct H223ModeParameters {
    pub adaptation_layer: AdaptationLayer,
    pub segmentable_flag: bool,
}

impl H223ModeParameters {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            adaptation_layer: AdaptationLayer::decode(r)?,
            segmentable_flag: r.read_boolean()?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        self.adaptation_layer.encode(w)?;
        w.write_boolean(self.segmentable_flag)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeElement {
    pub mode_type: ModeElementType,
    pub h223_mode_parameters: Option<H223ModeParameters>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl ModeElement {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let mode_type = ModeElementType::decode(r)?;
        let h223_mode_parameters = r.optional(opt.get(0), H223ModeParameters::decode)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            mode_type,
            h223_mode_parameters,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.h223_mode_parameters.is_some()])?;
        self.mode_type.encode(w)?;
        if let Some(v) = &self.h223_mode_parameters {
            v.encode(w)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

/// One preference level of a mode request.
pub type ModeDescription = Vec<ModeElement>;

pub(crate) fn read_mode_description(r: &mut PerReader<'_, '_>) -> Result<ModeDescription> {
    r.set_size_constraint(SizeConstraint::range(1, 256));
    r.read_sequence_of("modeDescription", ModeElement::decode)
}

pub(crate) fn write_mode_description(w: &mut PerWriter, value: &[ModeElement]) -> Result<()> {
    w.set_size_constraint(SizeConstraint::range(1, 256));
    w.write_sequence_of(value, |w, e| e.encode(w))
}
