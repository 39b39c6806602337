//! Shared H.225.0 helper types: addressing, aliases, endpoint descriptions
//! and the non-standard parameter carriers.

use crate::error::{ErrorKind, Result};
use crate::per::null_choice;
use crate::per::{
    ChoiceTag, ObjectId, PerReader, PerWriter, RawExtension, SizeConstraint,
};

pub type RequestSeqNum = u32;
pub type CallReferenceValue = u16;
pub type BandWidth = u32;
pub type TimeToLive = u32;
pub type ProtocolIdentifier = ObjectId;
/// BMPString, 1..128 characters.
pub type GatekeeperIdentifier = String;
pub type EndpointIdentifier = String;
/// Fixed 16-octet conference GUID.
pub type ConferenceIdentifier = Vec<u8>;

pub(crate) fn read_request_seq_num(r: &mut PerReader<'_, '_>) -> Result<RequestSeqNum> {
    Ok(r.read_constrained_uint(1, 65535)? as u32)
}

pub(crate) fn write_request_seq_num(w: &mut PerWriter, value: RequestSeqNum) -> Result<()> {
    w.write_constrained_uint(u64::from(value), 1, 65535)
}

pub(crate) fn read_call_reference_value(r: &mut PerReader<'_, '_>) -> Result<CallReferenceValue> {
    Ok(r.read_constrained_uint(0, 65535)? as u16)
}

pub(crate) fn write_call_reference_value(
    w: &mut PerWriter,
    value: CallReferenceValue,
) -> Result<()> {
    w.write_constrained_uint(u64::from(value), 0, 65535)
}

pub(crate) fn read_bandwidth(r: &mut PerReader<'_, '_>) -> Result<BandWidth> {
    Ok(r.read_constrained_uint(0, u64::from(u32::MAX))? as u32)
}

pub(crate) fn write_bandwidth(w: &mut PerWriter, value: BandWidth) -> Result<()> {
    w.write_constrained_uint(u64::from(value), 0, u64::from(u32::MAX))
}

pub(crate) fn read_time_to_live(r: &mut PerReader<'_, '_>) -> Result<TimeToLive> {
    Ok(r.read_constrained_uint(1, u64::from(u32::MAX))? as u32)
}

pub(crate) fn write_time_to_live(w: &mut PerWriter, value: TimeToLive) -> Result<()> {
    w.write_constrained_uint(u64::from(value), 1, u64::from(u32::MAX))
}

pub(crate) fn read_gatekeeper_identifier(r: &mut PerReader<'_, '_>) -> Result<String> {
    r.set_size_constraint(SizeConstraint::range(1, 128));
    r.read_bmp_string()
}

pub(crate) fn write_gatekeeper_identifier(w: &mut PerWriter, value: &str) -> Result<()> {
    w.set_size_constraint(SizeConstraint::range(1, 128));
    w.write_bmp_string(value)
}

pub(crate) fn read_endpoint_identifier(r: &mut PerReader<'_, '_>) -> Result<String> {
    r.set_size_constraint(SizeConstraint::range(1, 128));
    r.read_bmp_string()
}

pub(crate) fn write_endpoint_identifier(w: &mut PerWriter, value: &str) -> Result<()> {
    w.set_size_constraint(SizeConstraint::range(1, 128));
    w.write_bmp_string(value)
}

pub(crate) fn read_conference_identifier(r: &mut PerReader<'_, '_>) -> Result<Vec<u8>> {
    r.set_size_constraint(SizeConstraint::fixed(16));
    r.read_octet_string()
}

pub(crate) fn write_conference_identifier(w: &mut PerWriter, value: &[u8]) -> Result<()> {
    w.set_size_constraint(SizeConstraint::fixed(16));
    w.write_octet_string(value)
}

/// ITU-T T.35 vendor triple.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct H221NonStandard {
    pub t35_country_code: u8,
    pub t35_extension: u8,
    pub manufacturer_code: u16,
}

impl H221NonStandard {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            t35_country_code: r.element("t35CountryCode", |r| r.read_constrained_uint(0, 255))?
                as u8,
            t35_extension: r.element("t35Extension", |r| r.read_constrained_uint(0, 255))? as u8,
            manufacturer_code: r
                .element("manufacturerCode", |r| r.read_constrained_uint(0, 65535))?
                as u16,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_constrained_uint(u64::from(self.t35_country_code), 0, 255)?;
        w.write_constrained_uint(u64::from(self.t35_extension), 0, 255)?;
        w.write_constrained_uint(u64::from(self.manufacturer_code), 0, 65535)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NonStandardIdentifier {
    Object(ObjectId),
    H221NonStandard(H221NonStandard),
}

impl NonStandardIdentifier {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(2, false)? {
            ChoiceTag::Root(0) => Ok(Self::Object(r.element("object", |r| r.read_object_id())?)),
            ChoiceTag::Root(1) => Ok(Self::H221NonStandard(
                r.element("h221NonStandard", H221NonStandard::decode)?,
            )),
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

/// Carrier for vendor-specific data blobs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NonStandardParameter {
    pub non_standard_identifier: NonStandardIdentifier,
    pub data: Vec<u8>,
}

impl NonStandardParameter {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            non_standard_identifier: r
                .element("nonStandardIdentifier", NonStandardIdentifier::decode)?,
            data: r.element("data", |r| r.read_octet_string())?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        self.non_standard_identifier.encode(w)?;
        w.write_octet_string(&self.data)
    }
}

/// IPv4 signaling address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IpAddress {
    pub ip: Vec<u8>,
    pub port: u16,
}

impl IpAddress {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        r.set_size_constraint(SizeConstraint::fixed(4));
        let ip = r.element("ip", |r| r.read_octet_string())?;
        let port = r.element("port", |r| r.read_constrained_uint(0, 65535))? as u16;
        Ok(Self { ip, port })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.set_size_constraint(SizeConstraint::fixed(4));
        w.write_octet_string(&self.ip)?;
        w.write_constrained_uint(u64::from(self.port), 0, 65535)
    }
}

null_choice! {
    /// Source-routing discipline for `IpSourceRoute`.
    Routing { Strict, Loose }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IpSourceRoute {
    pub ip: Vec<u8>,
    pub port: u16,
    pub route: Vec<Vec<u8>>,
    pub routing: Routing,
}

impl IpSourceRoute {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        r.set_size_constraint(SizeConstraint::fixed(4));
        let ip = r.element("ip", |r| r.read_octet_string())?;
        let port = r.element("port", |r| r.read_constrained_uint(0, 65535))? as u16;
        let route = r.element("route", |r| {
            r.read_sequence_of("route", |r| {
                r.set_size_constraint(SizeConstraint::fixed(4));
                r.read_octet_string()
            })
        })?;
        let routing = r.element("routing", Routing::decode)?;
        Ok(Self {
            ip,
            port,
            route,
            routing,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.set_size_constraint(SizeConstraint::fixed(4));
        w.write_octet_string(&self.ip)?;
        w.write_constrained_uint(u64::from(self.port), 0, 65535)?;
        w.write_sequence_of(&self.route, |w, hop| {
            w.set_size_constraint(SizeConstraint::fixed(4));
            w.write_octet_string(hop)
        })?;
        self.routing.encode(w)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IpxAddress {
    pub node: Vec<u8>,
    pub netnum: Vec<u8>,
    pub port: Vec<u8>,
}

impl IpxAddress {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        r.set_size_constraint(SizeConstraint::fixed(6));
        let node = r.element("node", |r| r.read_octet_string())?;
        r.set_size_constraint(SizeConstraint::fixed(4));
        let netnum = r.element("netnum", |r| r.read_octet_string())?;
        r.set_size_constraint(SizeConstraint::fixed(2));
        let port = r.element("port", |r| r.read_octet_string())?;
        Ok(Self { node, netnum, port })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.set_size_constraint(SizeConstraint::fixed(6));
        w.write_octet_string(&self.node)?;
        w.set_size_constraint(SizeConstraint::fixed(4));
        w.write_octet_string(&self.netnum)?;
        w.set_size_constraint(SizeConstraint::fixed(2));
        w.write_octet_string(&self.port)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ip6Address {
    pub ip: Vec<u8>,
    pub port: u16,
}

impl Ip6Address {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        r.set_size_constraint(SizeConstraint::fixed(16));
        let ip = r.element("ip", |r| r.read_octet_string())?;
        let port = r.element("port", |r| r.read_constrained_uint(0, 65535))? as u16;
        Ok(Self { ip, port })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.set_size_constraint(SizeConstraint::fixed(16));
        w.write_octet_string(&self.ip)?;
        w.write_constrained_uint(u64::from(self.port), 0, 65535)
    }
}

/// Network address of a RAS or call-signaling endpoint. Newer transports
/// arrive as extension additions and are preserved undecoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportAddress {
    IpAddress(IpAddress),
    IpSourceRoute(IpSourceRoute),
    IpxAddress(IpxAddress),
    Ip6Address(Ip6Address),
    NetBios(Vec<u8>),
    NsapAddress(Vec<u8>),
    NonStandardAddress(NonStandardParameter),
    Unknown(RawExtension),
}

impl TransportAddress {
    const NUM_ROOT: u32 = 7;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::IpAddress(r.element("ipAddress", IpAddress::decode)?)),
            ChoiceTag::Root(1) => Ok(Self::IpSourceRoute(
                r.element("ipSourceRoute", IpSourceRoute::decode)?,
            )),
            ChoiceTag::Root(2) => Ok(Self::IpxAddress(
                r.element("ipxAddress", IpxAddress::decode)?,
            )),
            ChoiceTag::Root(3) => Ok(Self::Ip6Address(
                r.element("ip6Address", Ip6Address::decode)?,
            )),
            ChoiceTag::Root(4) => Ok(Self::NetBios(r.element("netBios", |r| {
                r.set_size_constraint(SizeConstraint::fixed(16));
                r.read_octet_string()
            })?)),
            ChoiceTag::Root(5) => Ok(Self::NsapAddress(r.element("nsap", |r| {
                r.set_size_constraint(SizeConstraint::range(1, 20));
                r.read_octet_string()
            })?)),
            ChoiceTag::Root(6) => Ok(Self::NonStandardAddress(
                r.element("nonStandardAddress", NonStandardParameter::decode)?,
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
            Self::IpAddress(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::IpSourceRoute(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::IpxAddress(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Ip6Address(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::NetBios(v) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
                w.set_size_constraint(SizeConstraint::fixed(16));
                w.write_octet_string(v)
            }
            Self::NsapAddress(v) => {
                w.write_choice_root(5, Self::NUM_ROOT, true)?;
                w.set_size_constraint(SizeConstraint::range(1, 20));
                w.write_octet_string(v)
            }
            Self::NonStandardAddress(v) => {
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

/// Name under which an endpoint registers or is called. The dialed-digit
/// and H.323-ID alternatives are the v1 roots; URL, transport and e-mail
/// IDs arrived with the first extension round and are decoded when
/// recognized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AliasAddress {
    DialedDigits(String),
    H323Id(String),
    UrlId(String),
    TransportId(TransportAddress),
    EmailId(String),
    Unknown(RawExtension),
}

impl AliasAddress {
    const NUM_ROOT: u32 = 2;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::DialedDigits(r.element("dialedDigits", |r| {
                r.set_size_constraint(SizeConstraint::range(1, 128));
                r.read_char_string()
            })?)),
            ChoiceTag::Root(1) => Ok(Self::H323Id(r.element("h323-ID", |r| {
                r.set_size_constraint(SizeConstraint::range(1, 256));
                r.read_bmp_string()
            })?)),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(0) => Ok(Self::UrlId(r.element("url-ID", |r| {
                r.open_type(|r| {
                    r.set_size_constraint(SizeConstraint::range(1, 512));
                    r.read_char_string()
                })
            })?)),
            ChoiceTag::Extension(1) => Ok(Self::TransportId(
                r.element("transportID", |r| r.open_type(TransportAddress::decode))?,
            )),
            ChoiceTag::Extension(2) => Ok(Self::EmailId(r.element("email-ID", |r| {
                r.open_type(|r| {
                    r.set_size_constraint(SizeConstraint::range(1, 512));
                    r.read_char_string()
                })
            })?)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::DialedDigits(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                w.set_size_constraint(SizeConstraint::range(1, 128));
                w.write_char_string(v)
            }
            Self::H323Id(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                w.set_size_constraint(SizeConstraint::range(1, 256));
                w.write_bmp_string(v)
            }
            Self::UrlId(v) => {
                w.write_choice_extension(0)?;
                let payload = PerWriter::encode_to_bytes(|w| {
                    w.set_size_constraint(SizeConstraint::range(1, 512));
                    w.write_char_string(v)
                })?;
                w.write_open_type(&payload)
            }
            Self::TransportId(v) => {
                w.write_choice_extension(1)?;
                let payload = PerWriter::encode_to_bytes(|w| v.encode(w))?;
                w.write_open_type(&payload)
            }
            Self::EmailId(v) => {
                w.write_choice_extension(2)?;
                let payload = PerWriter::encode_to_bytes(|w| {
                    w.set_size_constraint(SizeConstraint::range(1, 512));
                    w.write_char_string(v)
                })?;
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
pub struct VendorIdentifier {
    pub vendor: H221NonStandard,
    pub product_id: Option<Vec<u8>>,
    pub version_id: Option<Vec<u8>>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl VendorIdentifier {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 2)?;
        let vendor = r.element("vendor", H221NonStandard::decode)?;
        let product_id = if opt.get(0) {
            Some(r.element("productId", |r| {
                r.set_size_constraint(SizeConstraint::range(1, 256));
                r.read_octet_string()
            })?)
        } else {
            None
        };
        let version_id = if opt.get(1) {
            Some(r.element("versionId", |r| {
                r.set_size_constraint(SizeConstraint::range(1, 256));
                r.read_octet_string()
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
            vendor,
            product_id,
            version_id,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = crate::per::ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(
            true,
            !ext.is_empty(),
            &[self.product_id.is_some(), self.version_id.is_some()],
        )?;
        self.vendor.encode(w)?;
        if let Some(v) = &self.product_id {
            w.set_size_constraint(SizeConstraint::range(1, 256));
            w.write_octet_string(v)?;
        }
        if let Some(v) = &self.version_id {
            w.set_size_constraint(SizeConstraint::range(1, 256));
            w.write_octet_string(v)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct GatekeeperInfo {
    pub non_standard_data: Option<NonStandardParameter>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl GatekeeperInfo {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let non_standard_data = if opt.get(0) {
            Some(r.element("nonStandardData", NonStandardParameter::decode)?)
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
            non_standard_data,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = crate::per::ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.non_standard_data.is_some()])?;
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

/// Protocol stacks a gateway can interwork with. The per-protocol records
/// share one wire shape in the root schema.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ProtocolCaps {
    pub non_standard_data: Option<NonStandardParameter>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl ProtocolCaps {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let non_standard_data = if opt.get(0) {
            Some(r.element("nonStandardData", NonStandardParameter::decode)?)
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
            non_standard_data,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = crate::per::ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.non_standard_data.is_some()])?;
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SupportedProtocols {
    NonStandardData(NonStandardParameter),
    H310(ProtocolCaps),
    H320(ProtocolCaps),
    H321(ProtocolCaps),
    H322(ProtocolCaps),
    H323(ProtocolCaps),
    H324(ProtocolCaps),
    Voice(ProtocolCaps),
    T120Only(ProtocolCaps),
    Unknown(RawExtension),
}

impl SupportedProtocols {
    const NUM_ROOT: u32 = 9;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandardData(
                r.element("nonStandardData", NonStandardParameter::decode)?,
            )),
            ChoiceTag::Root(1) => Ok(Self::H310(r.element("h310", ProtocolCaps::decode)?)),
            ChoiceTag::Root(2) => Ok(Self::H320(r.element("h320", ProtocolCaps::decode)?)),
            ChoiceTag::Root(3) => Ok(Self::H321(r.element("h321", ProtocolCaps::decode)?)),
            ChoiceTag::Root(4) => Ok(Self::H322(r.element("h322", ProtocolCaps::decode)?)),
            ChoiceTag::Root(5) => Ok(Self::H323(r.element("h323", ProtocolCaps::decode)?)),
            ChoiceTag::Root(6) => Ok(Self::H324(r.element("h324", ProtocolCaps::decode)?)),
            ChoiceTag::Root(7) => Ok(Self::Voice(r.element("voice", ProtocolCaps::decode)?)),
            ChoiceTag::Root(8) => Ok(Self::T120Only(r.element("t120-only", ProtocolCaps::decode)?)),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let (index, caps) = match self {
            Self::NonStandardData(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                return v.encode(w);
            }
            Self::H310(v) => (1, v),
            Self::H320(v) => (2, v),
            Self::H321(v) => (3, v),
            Self::H322(v) => (4, v),
            Self::H323(v) => (5, v),
            Self::H324(v) => (6, v),
            Self::Voice(v) => (7, v),
            Self::T120Only(v) => (8, v),
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                return w.write_open_type(&ext.data);
            }
        };
        w.write_choice_root(index, Self::NUM_ROOT, true)?;
        caps.encode(w)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct GatewayInfo {
    pub protocol: Option<Vec<SupportedProtocols>>,
    pub non_standard_data: Option<NonStandardParameter>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl GatewayInfo {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 2)?;
        let protocol = if opt.get(0) {
            Some(r.element("protocol", |r| {
                r.read_sequence_of("protocol", SupportedProtocols::decode)
            })?)
        } else {
            None
        };
        let non_standard_data = if opt.get(1) {
            Some(r.element("nonStandardData", NonStandardParameter::decode)?)
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
            protocol,
            non_standard_data,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = crate::per::ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(
            true,
            !ext.is_empty(),
            &[self.protocol.is_some(), self.non_standard_data.is_some()],
        )?;
        if let Some(v) = &self.protocol {
            w.write_sequence_of(v, |w, p| p.encode(w))?;
        }
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

pub type McuInfo = GatekeeperInfo;
pub type TerminalInfo = GatekeeperInfo;

/// What kind of entity is speaking: terminal, gateway, MCU, gatekeeper, or
/// some mix of those roles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointType {
    pub non_standard_data: Option<NonStandardParameter>,
    pub vendor: Option<VendorIdentifier>,
    pub gatekeeper: Option<GatekeeperInfo>,
    pub gateway: Option<GatewayInfo>,
    pub mcu: Option<McuInfo>,
    pub terminal: Option<TerminalInfo>,
    pub mc: bool,
    pub undefined_node: bool,
    pub unknown_extensions: Vec<RawExtension>,
}

impl Default for EndpointType {
    fn default() -> Self {
        Self {
            non_standard_data: None,
            vendor: None,
            gatekeeper: None,
            gateway: None,
            mcu: None,
            terminal: None,
            mc: false,
            undefined_node: true,
            unknown_extensions: Vec::new(),
        }
    }
}

impl EndpointType {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 6)?;
        let non_standard_data = if opt.get(0) {
            Some(r.element("nonStandardData", NonStandardParameter::decode)?)
        } else {
            None
        };
        let vendor = if opt.get(1) {
            Some(r.element("vendor", VendorIdentifier::decode)?)
        } else {
            None
        };
        let gatekeeper = if opt.get(2) {
            Some(r.element("gatekeeper", GatekeeperInfo::decode)?)
        } else {
            None
        };
        let gateway = if opt.get(3) {
            Some(r.element("gateway", GatewayInfo::decode)?)
        } else {
            None
        };
        let mcu = if opt.get(4) {
            Some(r.element("mcu", McuInfo::decode)?)
        } else {
            None
        };
        let terminal = if opt.get(5) {
            Some(r.element("terminal", TerminalInfo::decode)?)
        } else {
            None
        };
        let mc = r.element("mc", |r| r.read_boolean())?;
        let undefined_node = r.element("undefinedNode", |r| r.read_boolean())?;

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
            non_standard_data,
            vendor,
            gatekeeper,
            gateway,
            mcu,
            terminal,
            mc,
            undefined_node,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = crate::per::ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(
            true,
            !ext.is_empty(),
            &[
                self.non_standard_data.is_some(),
                self.vendor.is_some(),
                self.gatekeeper.is_some(),
                self.gateway.is_some(),
                self.mcu.is_some(),
                self.terminal.is_some(),
            ],
        )?;
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        if let Some(v) = &self.vendor {
            v.encode(w)?;
        }
        if let Some(v) = &self.gatekeeper {
            v.encode(w)?;
        }
        if let Some(v) = &self.gateway {
            v.encode(w)?;
        }
        if let Some(v) = &self.mcu {
            v.encode(w)?;
        }
        if let Some(v) = &self.terminal {
            v.encode(w)?;
        }
        w.write_boolean(self.mc)?;
        w.write_boolean(self.undefined_node)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Q954Details {
    pub conference_calling: bool,
    pub three_party_service: bool,
    pub unknown_extensions: Vec<RawExtension>,
}

impl Q954Details {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let conference_calling = r.element("conferenceCalling", |r| r.read_boolean())?;
        let three_party_service = r.element("threePartyService", |r| r.read_boolean())?;

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
            conference_calling,
            three_party_service,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = crate::per::ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_boolean(self.conference_calling)?;
        w.write_boolean(self.three_party_service)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

/// Q-series supplementary services the endpoint supports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QseriesOptions {
    pub q932_full: bool,
    pub q951_full: bool,
    pub q952_full: bool,
    pub q953_full: bool,
    pub q955_full: bool,
    pub q956_full: bool,
    pub q957_full: bool,
    pub q954_info: Q954Details,
    pub unknown_extensions: Vec<RawExtension>,
}

impl QseriesOptions {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let q932_full = r.element("q932Full", |r| r.read_boolean())?;
        let q951_full = r.element("q951Full", |r| r.read_boolean())?;
        let q952_full = r.element("q952Full", |r| r.read_boolean())?;
        let q953_full = r.element("q953Full", |r| r.read_boolean())?;
        let q955_full = r.element("q955Full", |r| r.read_boolean())?;
        let q956_full = r.element("q956Full", |r| r.read_boolean())?;
        let q957_full = r.element("q957Full", |r| r.read_boolean())?;
        let q954_info = r.element("q954Info", Q954Details::decode)?;

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
            q932_full,
            q951_full,
            q952_full,
            q953_full,
            q955_full,
            q956_full,
            q957_full,
            q954_info,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = crate::per::ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_boolean(self.q932_full)?;
        w.write_boolean(self.q951_full)?;
        w.write_boolean(self.q952_full)?;
        w.write_boolean(self.q953_full)?;
        w.write_boolean(self.q955_full)?;
        w.write_boolean(self.q956_full)?;
        w.write_boolean(self.q957_full)?;
        self.q954_info.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

null_choice! {
    CallType { PointToPoint, OneToN, NToOne, NToN }
}

null_choice! {
    CallModel { Direct, GatekeeperRouted }
}

null_choice! {
    TransportQos { EndpointControlled, GatekeeperControlled, NoControl }
}

/// Globally unique call handle carried end-to-end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallIdentifier {
    /// Fixed 16-octet GUID.
    pub guid: Vec<u8>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl CallIdentifier {
    pub fn new(guid: Vec<u8>) -> Self {
        Self {
            guid,
            unknown_extensions: Vec::new(),
        }
    }

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let guid = r.element("guid", |r| {
            r.set_size_constraint(SizeConstraint::fixed(16));
            r.read_octet_string()
        })?;

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
            guid,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = crate::per::ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.set_size_constraint(SizeConstraint::fixed(16));
        w.write_octet_string(&self.guid)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

/// One-way RAS or media channel address pair.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TransportChannelInfo {
    pub send_address: Option<TransportAddress>,
    pub recv_address: Option<TransportAddress>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl TransportChannelInfo {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 2)?;
        let send_address = if opt.get(0) {
            Some(r.element("sendAddress", TransportAddress::decode)?)
        } else {
            None
        };
        let recv_address = if opt.get(1) {
            Some(r.element("recvAddress", TransportAddress::decode)?)
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
            send_address,
            recv_address,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = crate::per::ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(
            true,
            !ext.is_empty(),
            &[self.send_address.is_some(), self.recv_address.is_some()],
        )?;
        if let Some(v) = &self.send_address {
            v.encode(w)?;
        }
        if let Some(v) = &self.recv_address {
            v.encode(w)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

/// Which UUIE kinds the gatekeeper wants mirrored to it.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct UuiesRequested {
    pub setup: bool,
    pub call_proceeding: bool,
    pub connect: bool,
    pub alerting: bool,
    pub information: bool,
    pub release_complete: bool,
    pub facility: bool,
    pub progress: bool,
    pub empty: bool,
    pub unknown_extensions: Vec<RawExtension>,
}

impl UuiesRequested {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let setup = r.element("setup", |r| r.read_boolean())?;
        let call_proceeding = r.element("callProceeding", |r| r.read_boolean())?;
        let connect = r.element("connect", |r| r.read_boolean())?;
        let alerting = r.element("alerting", |r| r.read_boolean())?;
        let information = r.element("information", |r| r.read_boolean())?;
        let release_complete = r.element("relComp", |r| r.read_boolean())?;
        let facility = r.element("facility", |r| r.read_boolean())?;
        let progress = r.element("progress", |r| r.read_boolean())?;
        let empty = r.element("empty", |r| r.read_boolean())?;

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
            setup,
            call_proceeding,
            connect,
            alerting,
            information,
            release_complete,
            facility,
            progress,
            empty,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = crate::per::ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_boolean(self.setup)?;
        w.write_boolean(self.call_proceeding)?;
        w.write_boolean(self.connect)?;
        w.write_boolean(self.alerting)?;
        w.write_boolean(self.information)?;
        w.write_boolean(self.release_complete)?;
        w.write_boolean(self.facility)?;
        w.write_boolean(self.progress)?;
        w.write_boolean(self.empty)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

null_choice! {
    GatekeeperRejectReason { ResourceUnavailable, TerminalExcluded, InvalidRevision, UndefinedReason }
}

/// Why a registration was refused. `duplicateAlias` carries the offending
/// aliases; the rest are markers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationRejectReason {
    DiscoveryRequired,
    InvalidRevision,
    InvalidCallSignalAddress,
    InvalidRasAddress,
    DuplicateAlias(Vec<AliasAddress>),
    InvalidTerminalType,
    UndefinedReason,
    TransportNotSupported,
    Unknown(RawExtension),
}

impl RegistrationRejectReason {
    const NUM_ROOT: u32 = 8;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => {
                r.read_null()?;
                Ok(Self::DiscoveryRequired)
            }
            ChoiceTag::Root(1) => {
                r.read_null()?;
                Ok(Self::InvalidRevision)
            }
            ChoiceTag::Root(2) => {
                r.read_null()?;
                Ok(Self::InvalidCallSignalAddress)
            }
            ChoiceTag::Root(3) => {
                r.read_null()?;
                Ok(Self::InvalidRasAddress)
            }
            ChoiceTag::Root(4) => Ok(Self::DuplicateAlias(r.element("duplicateAlias", |r| {
                r.read_sequence_of("duplicateAlias", AliasAddress::decode)
            })?)),
            ChoiceTag::Root(5) => {
                r.read_null()?;
                Ok(Self::InvalidTerminalType)
            }
            ChoiceTag::Root(6) => {
                r.read_null()?;
                Ok(Self::UndefinedReason)
            }
            ChoiceTag::Root(7) => {
                r.read_null()?;
                Ok(Self::TransportNotSupported)
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
            Self::DiscoveryRequired => 0,
            Self::InvalidRevision => 1,
            Self::InvalidCallSignalAddress => 2,
            Self::InvalidRasAddress => 3,
            Self::DuplicateAlias(aliases) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
                return w.write_sequence_of(aliases, |w, a| a.encode(w));
            }
            Self::InvalidTerminalType => 5,
            Self::UndefinedReason => 6,
            Self::TransportNotSupported => 7,
            Self::Unknown(ext) => {
                w.write_choice_extension(ext.index)?;
                return w.write_open_type(&ext.data);
            }
        };
        w.write_choice_root(index, Self::NUM_ROOT, true)?;
        w.write_null()
    }
}

null_choice! {
    UnregRequestReason { ReregistrationRequired, TtlExpired, SecurityDenial, UndefinedReason }
}

null_choice! {
    UnregRejectReason { NotCurrentlyRegistered, CallInProgress, UndefinedReason }
}

null_choice! {
    AdmissionRejectReason {
        CalledPartyNotRegistered,
        InvalidPermission,
        RequestDenied,
        UndefinedReason,
        CallerNotRegistered,
        RouteCallToGatekeeper,
        InvalidEndpointIdentifier,
        ResourceUnavailable,
    }
}

null_choice! {
    BandRejectReason {
        NotBound,
        InvalidConferenceId,
        InvalidPermission,
        InsufficientResources,
        InvalidRevision,
        UndefinedReason,
    }
}

null_choice! {
    LocationRejectReason { NotRegistered, InvalidPermission, RequestDenied, UndefinedReason }
}

null_choice! {
    DisengageReason { ForcedDrop, NormalDrop, UndefinedReason }
}

null_choice! {
    DisengageRejectReason { NotRegistered, RequestToDropOther }
}

/// A standby gatekeeper the endpoint may fail over to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlternateGk {
    pub ras_address: TransportAddress,
    pub gatekeeper_identifier: Option<GatekeeperIdentifier>,
    pub need_to_register: bool,
    pub priority: u8,
    pub unknown_extensions: Vec<RawExtension>,
}

impl AlternateGk {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let ras_address = r.element("rasAddress", TransportAddress::decode)?;
        let gatekeeper_identifier = r.optional(opt.get(0), |r| {
            r.element("gatekeeperIdentifier", read_gatekeeper_identifier)
        })?;
        let need_to_register = r.element("needToRegister", |r| r.read_boolean())?;
        let priority = r.element("priority", |r| r.read_constrained_uint(0, 127))? as u8;

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
            ras_address,
            gatekeeper_identifier,
            need_to_register,
            priority,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = crate::per::ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.gatekeeper_identifier.is_some()])?;
        self.ras_address.encode(w)?;
        if let Some(v) = &self.gatekeeper_identifier {
            write_gatekeeper_identifier(w, v)?;
        }
        w.write_boolean(self.need_to_register)?;
        w.write_constrained_uint(u64::from(self.priority), 0, 127)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AltGkInfo {
    pub alternate_gatekeeper: Vec<AlternateGk>,
    pub alt_gk_is_permanent: bool,
    pub unknown_extensions: Vec<RawExtension>,
}

impl AltGkInfo {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let alternate_gatekeeper = r.element("alternateGatekeeper", |r| {
            r.read_sequence_of("alternateGatekeeper", AlternateGk::decode)
        })?;
        let alt_gk_is_permanent = r.element("altGKisPermanent", |r| r.read_boolean())?;

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
            alternate_gatekeeper,
            alt_gk_is_permanent,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = crate::per::ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_sequence_of(&self.alternate_gatekeeper, |w, gk| gk.encode(w))?;
        w.write_boolean(self.alt_gk_is_permanent)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

/// Media stream description reported in an IRR.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RtpSession {
    pub rtp_address: TransportChannelInfo,
    pub rtcp_address: TransportChannelInfo,
    pub cname: String,
    pub ssrc: u32,
    pub session_id: u8,
    pub associated_session_ids: Vec<u8>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl RtpSession {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let rtp_address = r.element("rtpAddress", TransportChannelInfo::decode)?;
        let rtcp_address = r.element("rtcpAddress", TransportChannelInfo::decode)?;
        let cname = r.element("cname", |r| r.read_char_string())?;
        let ssrc = r.element("ssrc", |r| r.read_constrained_uint(1, u64::from(u32::MAX)))? as u32;
        let session_id = r.element("sessionId", |r| r.read_constrained_uint(1, 255))? as u8;
        let associated_session_ids = r.element("associatedSessionIds", |r| {
            r.read_sequence_of("associatedSessionIds", |r| {
                Ok(r.read_constrained_uint(1, 255)? as u8)
            })
        })?;

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
            rtp_address,
            rtcp_address,
            cname,
            ssrc,
            session_id,
            associated_session_ids,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = crate::per::ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        self.rtp_address.encode(w)?;
        self.rtcp_address.encode(w)?;
        w.write_char_string(&self.cname)?;
        w.write_constrained_uint(u64::from(self.ssrc), 1, u64::from(u32::MAX))?;
        w.write_constrained_uint(u64::from(self.session_id), 1, 255)?;
        w.write_sequence_of(&self.associated_session_ids, |w, id| {
            w.write_constrained_uint(u64::from(*id), 1, 255)
        })?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

null_choice! {
    ServiceControlReason { Open, Refresh, Close }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServiceControlDescriptor {
    Url(String),
    Signal(Vec<u8>),
    NonStandard(NonStandardParameter),
    Unknown(RawExtension),
}

impl ServiceControlDescriptor {
    const NUM_ROOT: u32 = 3;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::Url(r.element("url", |r| {
                r.set_size_constraint(SizeConstraint::range(0, 512));
                r.read_char_string()
            })?)),
            ChoiceTag::Root(1) => Ok(Self::Signal(
                r.element("signal", |r| r.read_octet_string())?,
            )),
            ChoiceTag::Root(2) => Ok(Self::NonStandard(
                r.element("nonStandard", NonStandardParameter::decode)?,
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
            Self::Url(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                w.set_size_constraint(SizeConstraint::range(0, 512));
                w.write_char_string(v)
            }
            Self::Signal(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                w.write_octet_string(v)
            }
            Self::NonStandard(v) => {
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
pub struct ServiceControlSession {
    pub session_id: u8,
    pub contents: Option<ServiceControlDescriptor>,
    pub reason: Option<ServiceControlReason>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl ServiceControlSession {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 2)?;
        let session_id = r.element("sessionId", |r| r.read_constrained_uint(0, 255))? as u8;
        let contents = r.optional(opt.get(0), |r| {
            r.element("contents", ServiceControlDescriptor::decode)
        })?;
        let reason = r.optional(opt.get(1), |r| {
            r.element("reason", ServiceControlReason::decode)
        })?;

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
            session_id,
            contents,
            reason,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = crate::per::ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(
            true,
            !ext.is_empty(),
            &[self.contents.is_some(), self.reason.is_some()],
        )?;
        w.write_constrained_uint(u64::from(self.session_id), 0, 255)?;
        if let Some(v) = &self.contents {
            v.encode(w)?;
        }
        if let Some(v) = &self.reason {
            v.encode(w)?;
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
    use crate::per::{PerReader, PerWriter};

    #[test]
    fn transport_address_ip_exact_bytes() {
        // Extension flag plus 3-bit index, aligned 4-octet address, 16-bit
        // port: 192.168.1.1:5060.
        let data = [0x00, 0xC0, 0xA8, 0x01, 0x01, 0x13, 0xC4];
        let mut reader = PerReader::new(&data[..]);

        let decoded = TransportAddress::decode(&mut reader).unwrap();
        assert_eq!(
            TransportAddress::IpAddress(IpAddress {
                ip: vec![192, 168, 1, 1],
                port: 5060,
            }),
            decoded
        );
        assert_eq!(7, reader.consumed_octets());

        let encoded = PerWriter::encode_to_bytes(|w| decoded.encode(w)).unwrap();
        assert_eq!(&data[..], &encoded[..]);
    }

    #[test]
    fn call_identifier_guid_exact_bytes() {
        let mut data = vec![0x00];
        data.extend(1..=16u8);

        let mut reader = PerReader::new(&data[..]);
        let decoded = CallIdentifier::decode(&mut reader).unwrap();
        assert_eq!(16, decoded.guid.len());
        assert_eq!((1..=16u8).collect::<Vec<u8>>(), decoded.guid);

        let encoded = PerWriter::encode_to_bytes(|w| decoded.encode(w)).unwrap();
        assert_eq!(data, encoded);
    }

    #[test]
    fn alias_address_extension_alternatives_round_trip() {
        let aliases = vec![
            AliasAddress::DialedDigits("5551234".into()),
            AliasAddress::H323Id("conference room".into()),
            AliasAddress::UrlId("h323:gw.example.net".into()),
            AliasAddress::EmailId("ops@example.net".into()),
            AliasAddress::TransportId(TransportAddress::IpAddress(IpAddress {
                ip: vec![10, 0, 0, 1],
                port: 1720,
            })),
            AliasAddress::Unknown(crate::per::RawExtension {
                index: 9,
                data: vec![0xAA, 0xBB, 0xCC],
            }),
        ];

        for alias in aliases {
            let encoded = PerWriter::encode_to_bytes(|w| alias.encode(w)).unwrap();
            let mut reader = PerReader::new(&encoded);
            assert_eq!(alias, AliasAddress::decode(&mut reader).unwrap());
        }
    }

    #[test]
    fn alias_list_beyond_fragment_threshold_round_trip() {
        let aliases: Vec<AliasAddress> = (0..16387)
            .map(|_| AliasAddress::DialedDigits("1".into()))
            .collect();

        let mut writer = PerWriter::new();
        writer
            .write_sequence_of(&aliases, |w, a| a.encode(w))
            .unwrap();
        let data = writer.into_bytes();
        // The count does not fit the two-octet form, so the determinant
        // opens with a single-unit fragment marker.
        assert_eq!(0xC1, data[0]);

        let mut reader = PerReader::new(&data);
        let decoded = reader
            .read_sequence_of("aliases", AliasAddress::decode)
            .unwrap();
        assert_eq!(16387, decoded.len());
        assert_eq!(aliases, decoded);
    }

    #[test]
    fn endpoint_type_round_trip() {
        let value = EndpointType {
            vendor: Some(VendorIdentifier {
                vendor: H221NonStandard {
                    t35_country_code: 0xB5,
                    t35_extension: 0,
                    manufacturer_code: 0x0012,
                },
                product_id: Some(b"h323-rs".to_vec()),
                version_id: Some(b"0.1".to_vec()),
                unknown_extensions: Vec::new(),
            }),
            terminal: Some(TerminalInfo::default()),
            ..EndpointType::default()
        };

        let encoded = PerWriter::encode_to_bytes(|w| value.encode(w)).unwrap();
        let mut reader = PerReader::new(&encoded);
        assert_eq!(value, EndpointType::decode(&mut reader).unwrap());
    }

    #[test]
    fn gateway_info_with_protocols_round_trip() {
        let value = GatewayInfo {
            protocol: Some(vec![
                SupportedProtocols::Voice(ProtocolCaps::default()),
                SupportedProtocols::H323(ProtocolCaps {
                    non_standard_data: Some(NonStandardParameter {
                        non_standard_identifier: NonStandardIdentifier::H221NonStandard(
                            H221NonStandard {
                                t35_country_code: 0xB5,
                                t35_extension: 0,
                                manufacturer_code: 0x3D,
                            },
                        ),
                        data: vec![1, 2, 3],
                    }),
                    unknown_extensions: Vec::new(),
                }),
            ]),
            non_standard_data: None,
            unknown_extensions: Vec::new(),
        };

        let encoded = PerWriter::encode_to_bytes(|w| value.encode(w)).unwrap();
        let mut reader = PerReader::new(&encoded);
        assert_eq!(value, GatewayInfo::decode(&mut reader).unwrap());
    }
}
