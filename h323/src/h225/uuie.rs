//! H.225.0 call signaling: the user-user information elements carried in
//! Q.931 messages, and the PDU wrapper that tunnels H.245 control.

use crate::error::{ErrorKind, Result};
use crate::h225::types::*;
use crate::h235::{ClearToken, CryptoH323Token};
use crate::per::null_choice;
use crate::per::{
    ChoiceTag, ExtensionAdditions, PerReader, PerWriter, RawExtension, SizeConstraint,
};

/// Opaque H.245 PDUs piggybacked on a signaling message. The outer codec
/// treats each element as raw octets.
pub type FastStart = Vec<Vec<u8>>;

fn read_fast_start(r: &mut PerReader<'_, '_>) -> Result<FastStart> {
    r.read_sequence_of("fastStart", |r| r.read_octet_string())
}

fn write_fast_start(w: &mut PerWriter, value: &[Vec<u8>]) -> Result<()> {
    w.write_sequence_of(value, |w, e| w.write_octet_string(e))
}

/// Mode for one protection service. The non-standard alternative carries a
/// parameter instead of a marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SecurityServiceMode {
    NonStandard(NonStandardParameter),
    None,
    Default,
    Unknown(RawExtension),
}

impl SecurityServiceMode {
    const NUM_ROOT: u32 = 3;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(
                r.element("nonStandard", NonStandardParameter::decode)?,
            )),
            ChoiceTag::Root(1) => {
                r.read_null()?;
                Ok(Self::None)
            }
            ChoiceTag::Root(2) => {
                r.read_null()?;
                Ok(Self::Default)
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
            Self::None => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                w.write_null()
            }
            Self::Default => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
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
pub struct SecurityCapabilities {
    pub non_standard: Option<NonStandardParameter>,
    pub encryption: SecurityServiceMode,
    pub authenticaton: SecurityServiceMode,
    pub integrity: SecurityServiceMode,
    pub unknown_extensions: Vec<RawExtension>,
}

impl SecurityCapabilities {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let non_standard = r.optional(opt.get(0), |r| {
            r.element("nonStandard", NonStandardParameter::decode)
        })?;
        let encryption = r.element("encryption", SecurityServiceMode::decode)?;
        let authenticaton = r.element("authenticaton", SecurityServiceMode::decode)?;
        let integrity = r.element("integrity", SecurityServiceMode::decode)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            non_standard,
            encryption,
            authenticaton,
            integrity,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.non_standard.is_some()])?;
        if let Some(v) = &self.non_standard {
            v.encode(w)?;
        }
        self.encryption.encode(w)?;
        self.authenticaton.encode(w)?;
        self.integrity.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum H245Security {
    NonStandard(NonStandardParameter),
    NoSecurity,
    Tls(SecurityCapabilities),
    Ipsec(SecurityCapabilities),
    Unknown(RawExtension),
}

impl H245Security {
    const NUM_ROOT: u32 = 4;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::NonStandard(
                r.element("nonStandard", NonStandardParameter::decode)?,
            )),
            ChoiceTag::Root(1) => {
                r.read_null()?;
                Ok(Self::NoSecurity)
            }
            ChoiceTag::Root(2) => Ok(Self::Tls(r.element("tls", SecurityCapabilities::decode)?)),
            ChoiceTag::Root(3) => Ok(Self::Ipsec(
                r.element("ipsec", SecurityCapabilities::decode)?,
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
            Self::NoSecurity => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                w.write_null()
            }
            Self::Tls(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Ipsec(v) => {
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

null_choice! {
    ConferenceGoal { Create, Join, Invite }
}

/// Call setup. The fast-connect proposal, call identifier and security
/// tokens are extension additions and decoded when present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetupUuie {
    pub protocol_identifier: ProtocolIdentifier,
    pub h245_address: Option<TransportAddress>,
    pub source_address: Option<Vec<AliasAddress>>,
    pub source_info: EndpointType,
    pub destination_address: Option<Vec<AliasAddress>>,
    pub dest_call_signal_address: Option<TransportAddress>,
    pub dest_extra_call_info: Option<Vec<AliasAddress>>,
    pub dest_extra_crv: Option<Vec<CallReferenceValue>>,
    pub active_mc: bool,
    pub conference_id: ConferenceIdentifier,
    pub conference_goal: ConferenceGoal,
    pub call_services: Option<QseriesOptions>,
    pub call_type: CallType,
    // Extension additions.
    pub source_call_signal_address: Option<TransportAddress>,
    pub call_identifier: Option<CallIdentifier>,
    pub tokens: Option<Vec<ClearToken>>,
    pub crypto_tokens: Option<Vec<CryptoH323Token>>,
    pub fast_start: Option<FastStart>,
    pub media_wait_for_connect: Option<bool>,
    pub can_overlap_send: Option<bool>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl SetupUuie {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 7)?;
        let protocol_identifier = r.element("protocolIdentifier", |r| r.read_object_id())?;
        let h245_address = r.optional(opt.get(0), |r| {
            r.element("h245Address", TransportAddress::decode)
        })?;
        let source_address = r.optional(opt.get(1), |r| {
            r.element("sourceAddress", |r| {
                r.read_sequence_of("sourceAddress", AliasAddress::decode)
            })
        })?;
        let source_info = r.element("sourceInfo", EndpointType::decode)?;
        let destination_address = r.optional(opt.get(2), |r| {
            r.element("destinationAddress", |r| {
                r.read_sequence_of("destinationAddress", AliasAddress::decode)
            })
        })?;
        let dest_call_signal_address = r.optional(opt.get(3), |r| {
            r.element("destCallSignalAddress", TransportAddress::decode)
        })?;
        let dest_extra_call_info = r.optional(opt.get(4), |r| {
            r.element("destExtraCallInfo", |r| {
                r.read_sequence_of("destExtraCallInfo", AliasAddress::decode)
            })
        })?;
        let dest_extra_crv = r.optional(opt.get(5), |r| {
            r.element("destExtraCRV", |r| {
                r.read_sequence_of("destExtraCRV", read_call_reference_value)
            })
        })?;
        let active_mc = r.element("activeMC", |r| r.read_boolean())?;
        let conference_id = r.element("conferenceID", read_conference_identifier)?;
        let conference_goal = r.element("conferenceGoal", ConferenceGoal::decode)?;
        let call_services = r.optional(opt.get(6), |r| {
            r.element("callServices", QseriesOptions::decode)
        })?;
        let call_type = r.element("callType", CallType::decode)?;

        let mut source_call_signal_address = None;
        let mut call_identifier = None;
        let mut tokens = None;
        let mut crypto_tokens = None;
        let mut fast_start = None;
        let mut media_wait_for_connect = None;
        let mut can_overlap_send = None;
        let mut unknown_extensions = Vec::new();
        if ext {
            let bitmap = r.read_extension_bitmap()?;
            for (index, present) in bitmap.iter().enumerate() {
                if !*present {
                    continue;
                }
                match index {
                    0 => {
                        source_call_signal_address =
                            r.element("sourceCallSignalAddress", |r| {
                                r.open_type_optional(TransportAddress::decode)
                            })?;
                    }
                    2 => {
                        call_identifier = r.element("callIdentifier", |r| {
                            r.open_type_optional(CallIdentifier::decode)
                        })?;
                    }
                    4 => {
                        tokens = r.element("tokens", |r| {
                            r.open_type_optional(|r| {
                                r.read_sequence_of("tokens", ClearToken::decode)
                            })
                        })?;
                    }
                    5 => {
                        crypto_tokens = r.element("cryptoTokens", |r| {
                            r.open_type_optional(|r| {
                                r.read_sequence_of("cryptoTokens", CryptoH323Token::decode)
                            })
                        })?;
                    }
                    6 => {
                        fast_start = r.element("fastStart", |r| {
                            r.open_type_optional(read_fast_start)
                        })?;
                    }
                    7 => {
                        media_wait_for_connect = r.element("mediaWaitForConnect", |r| {
                            r.open_type_optional(|r| r.read_boolean())
                        })?;
                    }
                    8 => {
                        can_overlap_send = r.element("canOverlapSend", |r| {
                            r.open_type_optional(|r| r.read_boolean())
                        })?;
                    }
                    _ => r.read_unknown_extension(index as u32, &mut unknown_extensions)?,
                }
            }
        }

        Ok(Self {
            protocol_identifier,
            h245_address,
            source_address,
            source_info,
            destination_address,
            dest_call_signal_address,
            dest_extra_call_info,
            dest_extra_crv,
            active_mc,
            conference_id,
            conference_goal,
            call_services,
            call_type,
            source_call_signal_address,
            call_identifier,
            tokens,
            crypto_tokens,
            fast_start,
            media_wait_for_connect,
            can_overlap_send,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        if let Some(v) = &self.source_call_signal_address {
            ext.known(0, PerWriter::encode_to_bytes(|w| v.encode(w))?);
        }
        if let Some(v) = &self.call_identifier {
            ext.known(2, PerWriter::encode_to_bytes(|w| v.encode(w))?);
        }
        if let Some(v) = &self.tokens {
            ext.known(
                4,
                PerWriter::encode_to_bytes(|w| w.write_sequence_of(v, |w, t| t.encode(w)))?,
            );
        }
        if let Some(v) = &self.crypto_tokens {
            ext.known(
                5,
                PerWriter::encode_to_bytes(|w| w.write_sequence_of(v, |w, t| t.encode(w)))?,
            );
        }
        if let Some(v) = &self.fast_start {
            ext.known(6, PerWriter::encode_to_bytes(|w| write_fast_start(w, v))?);
        }
        if let Some(v) = &self.media_wait_for_connect {
            ext.known(7, PerWriter::encode_to_bytes(|w| w.write_boolean(*v))?);
        }
        if let Some(v) = &self.can_overlap_send {
            ext.known(8, PerWriter::encode_to_bytes(|w| w.write_boolean(*v))?);
        }
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(
            true,
            !ext.is_empty(),
            &[
                self.h245_address.is_some(),
                self.source_address.is_some(),
                self.destination_address.is_some(),
                self.dest_call_signal_address.is_some(),
                self.dest_extra_call_info.is_some(),
                self.dest_extra_crv.is_some(),
                self.call_services.is_some(),
            ],
        )?;
        w.write_object_id(&self.protocol_identifier)?;
        if let Some(v) = &self.h245_address {
            v.encode(w)?;
        }
        if let Some(v) = &self.source_address {
            w.write_sequence_of(v, |w, a| a.encode(w))?;
        }
        self.source_info.encode(w)?;
        if let Some(v) = &self.destination_address {
            w.write_sequence_of(v, |w, a| a.encode(w))?;
        }
        if let Some(v) = &self.dest_call_signal_address {
            v.encode(w)?;
        }
        if let Some(v) = &self.dest_extra_call_info {
            w.write_sequence_of(v, |w, a| a.encode(w))?;
        }
        if let Some(v) = &self.dest_extra_crv {
            w.write_sequence_of(v, |w, crv| write_call_reference_value(w, *crv))?;
        }
        w.write_boolean(self.active_mc)?;
        write_conference_identifier(w, &self.conference_id)?;
        self.conference_goal.encode(w)?;
        if let Some(v) = &self.call_services {
            v.encode(w)?;
        }
        self.call_type.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

macro_rules! signaling_uuie {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            pub protocol_identifier: ProtocolIdentifier,
            pub destination_info: EndpointType,
            pub h245_address: Option<TransportAddress>,
            // Extension additions.
            pub tokens: Option<Vec<ClearToken>>,
            pub crypto_tokens: Option<Vec<CryptoH323Token>>,
            pub fast_start: Option<FastStart>,
            pub unknown_extensions: Vec<RawExtension>,
        }

        impl $name {
            pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
                let (ext, opt) = r.read_sequence_header(true, 1)?;
                let protocol_identifier =
                    r.element("protocolIdentifier", |r| r.read_object_id())?;
                let destination_info = r.element("destinationInfo", EndpointType::decode)?;
                let h245_address = r.optional(opt.get(0), |r| {
                    r.element("h245Address", TransportAddress::decode)
                })?;

                let mut tokens = None;
                let mut crypto_tokens = None;
                let mut fast_start = None;
                let mut unknown_extensions = Vec::new();
                if ext {
                    let bitmap = r.read_extension_bitmap()?;
                    for (index, present) in bitmap.iter().enumerate() {
                        if !*present {
                            continue;
                        }
                        match index {
                            1 => {
                                tokens = r.element("tokens", |r| {
                                    r.open_type_optional(|r| {
                                        r.read_sequence_of("tokens", ClearToken::decode)
                                    })
                                })?;
                            }
                            2 => {
                                crypto_tokens = r.element("cryptoTokens", |r| {
                                    r.open_type_optional(|r| {
                                        r.read_sequence_of(
                                            "cryptoTokens",
                                            CryptoH323Token::decode,
                                        )
                                    })
                                })?;
                            }
                            3 => {
                                fast_start = r.element("fastStart", |r| {
                                    r.open_type_optional(read_fast_start)
                                })?;
                            }
                            _ => r.read_unknown_extension(
                                index as u32,
                                &mut unknown_extensions,
                            )?,
                        }
                    }
                }

                Ok(Self {
                    protocol_identifier,
                    destination_info,
                    h245_address,
                    tokens,
                    crypto_tokens,
                    fast_start,
                    unknown_extensions,
                })
            }

            pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
                let mut ext = ExtensionAdditions::new();
                if let Some(v) = &self.tokens {
                    ext.known(
                        1,
                        PerWriter::encode_to_bytes(|w| {
                            w.write_sequence_of(v, |w, t| t.encode(w))
                        })?,
                    );
                }
                if let Some(v) = &self.crypto_tokens {
                    ext.known(
                        2,
                        PerWriter::encode_to_bytes(|w| {
                            w.write_sequence_of(v, |w, t| t.encode(w))
                        })?,
                    );
                }
                if let Some(v) = &self.fast_start {
                    ext.known(3, PerWriter::encode_to_bytes(|w| write_fast_start(w, v))?);
                }
                for raw in &self.unknown_extensions {
                    ext.raw(raw);
                }
                w.write_sequence_header(true, !ext.is_empty(), &[self.h245_address.is_some()])?;
                w.write_object_id(&self.protocol_identifier)?;
                self.destination_info.encode(w)?;
                if let Some(v) = &self.h245_address {
                    v.encode(w)?;
                }
                if !ext.is_empty() {
                    ext.write(w)?;
                }
                Ok(())
            }
        }
    };
}

signaling_uuie! {
    /// First-response progress report on a new call.
    CallProceedingUuie
}

signaling_uuie! {
    AlertingUuie
}

/// Call accepted. Unlike the other mid-call UUIEs this one also pins the
/// conference the answering endpoint joined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectUuie {
    pub protocol_identifier: ProtocolIdentifier,
    pub h245_address: Option<TransportAddress>,
    pub destination_info: EndpointType,
    pub conference_id: ConferenceIdentifier,
    // Extension additions.
    pub tokens: Option<Vec<ClearToken>>,
    pub crypto_tokens: Option<Vec<CryptoH323Token>>,
    pub fast_start: Option<FastStart>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl ConnectUuie {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let protocol_identifier = r.element("protocolIdentifier", |r| r.read_object_id())?;
        let h245_address = r.optional(opt.get(0), |r| {
            r.element("h245Address", TransportAddress::decode)
        })?;
        let destination_info = r.element("destinationInfo", EndpointType::decode)?;
        let conference_id = r.element("conferenceID", read_conference_identifier)?;

        let mut tokens = None;
        let mut crypto_tokens = None;
        let mut fast_start = None;
        let mut unknown_extensions = Vec::new();
        if ext {
            let bitmap = r.read_extension_bitmap()?;
            for (index, present) in bitmap.iter().enumerate() {
                if !*present {
                    continue;
                }
                match index {
                    1 => {
                        tokens = r.element("tokens", |r| {
                            r.open_type_optional(|r| {
                                r.read_sequence_of("tokens", ClearToken::decode)
                            })
                        })?;
                    }
                    2 => {
                        crypto_tokens = r.element("cryptoTokens", |r| {
                            r.open_type_optional(|r| {
                                r.read_sequence_of("cryptoTokens", CryptoH323Token::decode)
                            })
                        })?;
                    }
                    3 => {
                        fast_start = r.element("fastStart", |r| {
                            r.open_type_optional(read_fast_start)
                        })?;
                    }
                    _ => r.read_unknown_extension(index as u32, &mut unknown_extensions)?,
                }
            }
        }

        Ok(Self {
            protocol_identifier,
            h245_address,
            destination_info,
            conference_id,
            tokens,
            crypto_tokens,
            fast_start,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        if let Some(v) = &self.tokens {
            ext.known(
                1,
                PerWriter::encode_to_bytes(|w| w.write_sequence_of(v, |w, t| t.encode(w)))?,
            );
        }
        if let Some(v) = &self.crypto_tokens {
            ext.known(
                2,
                PerWriter::encode_to_bytes(|w| w.write_sequence_of(v, |w, t| t.encode(w)))?,
            );
        }
        if let Some(v) = &self.fast_start {
            ext.known(3, PerWriter::encode_to_bytes(|w| write_fast_start(w, v))?);
        }
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.h245_address.is_some()])?;
        w.write_object_id(&self.protocol_identifier)?;
        if let Some(v) = &self.h245_address {
            v.encode(w)?;
        }
        self.destination_info.encode(w)?;
        write_conference_identifier(w, &self.conference_id)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InformationUuie {
    pub protocol_identifier: ProtocolIdentifier,
    pub unknown_extensions: Vec<RawExtension>,
}

impl InformationUuie {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let protocol_identifier = r.element("protocolIdentifier", |r| r.read_object_id())?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            protocol_identifier,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_object_id(&self.protocol_identifier)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

null_choice! {
    ReleaseCompleteReason {
        NoBandwidth,
        GatekeeperResources,
        UnreachableDestination,
        DestinationRejection,
        InvalidRevision,
        NoPermission,
        UnreachableGatekeeper,
        GatewayResources,
        BadFormatAddress,
        AdaptiveBusy,
        InConf,
        UndefinedReason,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleaseCompleteUuie {
    pub protocol_identifier: ProtocolIdentifier,
    pub reason: Option<ReleaseCompleteReason>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl ReleaseCompleteUuie {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let protocol_identifier = r.element("protocolIdentifier", |r| r.read_object_id())?;
        let reason = r.optional(opt.get(0), |r| {
            r.element("reason", ReleaseCompleteReason::decode)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            protocol_identifier,
            reason,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.reason.is_some()])?;
        w.write_object_id(&self.protocol_identifier)?;
        if let Some(v) = &self.reason {
            v.encode(w)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

null_choice! {
    FacilityReason { RouteCallToGatekeeper, CallForwarded, RouteCallToMc, UndefinedReason }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacilityUuie {
    pub protocol_identifier: ProtocolIdentifier,
    pub alternative_address: Option<TransportAddress>,
    pub alternative_alias_address: Option<Vec<AliasAddress>>,
    pub conference_id: Option<ConferenceIdentifier>,
    pub reason: FacilityReason,
    pub unknown_extensions: Vec<RawExtension>,
}

impl FacilityUuie {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 3)?;
        let protocol_identifier = r.element("protocolIdentifier", |r| r.read_object_id())?;
        let alternative_address = r.optional(opt.get(0), |r| {
            r.element("alternativeAddress", TransportAddress::decode)
        })?;
        let alternative_alias_address = r.optional(opt.get(1), |r| {
            r.element("alternativeAliasAddress", |r| {
                r.read_sequence_of("alternativeAliasAddress", AliasAddress::decode)
            })
        })?;
        let conference_id = r.optional(opt.get(2), |r| {
            r.element("conferenceID", read_conference_identifier)
        })?;
        let reason = r.element("reason", FacilityReason::decode)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            protocol_identifier,
            alternative_address,
            alternative_alias_address,
            conference_id,
            reason,
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
                self.alternative_address.is_some(),
                self.alternative_alias_address.is_some(),
                self.conference_id.is_some(),
            ],
        )?;
        w.write_object_id(&self.protocol_identifier)?;
        if let Some(v) = &self.alternative_address {
            v.encode(w)?;
        }
        if let Some(v) = &self.alternative_alias_address {
            w.write_sequence_of(v, |w, a| a.encode(w))?;
        }
        if let Some(v) = &self.conference_id {
            write_conference_identifier(w, v)?;
        }
        self.reason.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

/// In-band progress; a version-2 type whose root already carries the call
/// identifier, tokens and fast-connect fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressUuie {
    pub protocol_identifier: ProtocolIdentifier,
    pub destination_info: EndpointType,
    pub h245_address: Option<TransportAddress>,
    pub call_identifier: CallIdentifier,
    pub h245_security_mode: Option<H245Security>,
    pub tokens: Option<Vec<ClearToken>>,
    pub crypto_tokens: Option<Vec<CryptoH323Token>>,
    pub fast_start: Option<FastStart>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl ProgressUuie {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 5)?;
        let protocol_identifier = r.element("protocolIdentifier", |r| r.read_object_id())?;
        let destination_info = r.element("destinationInfo", EndpointType::decode)?;
        let h245_address = r.optional(opt.get(0), |r| {
            r.element("h245Address", TransportAddress::decode)
        })?;
        let call_identifier = r.element("callIdentifier", CallIdentifier::decode)?;
        let h245_security_mode = r.optional(opt.get(1), |r| {
            r.element("h245SecurityMode", H245Security::decode)
        })?;
        let tokens = r.optional(opt.get(2), |r| {
            r.element("tokens", |r| {
                r.read_sequence_of("tokens", ClearToken::decode)
            })
        })?;
        let crypto_tokens = r.optional(opt.get(3), |r| {
            r.element("cryptoTokens", |r| {
                r.read_sequence_of("cryptoTokens", CryptoH323Token::decode)
            })
        })?;
        let fast_start = r.optional(opt.get(4), |r| r.element("fastStart", read_fast_start))?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            protocol_identifier,
            destination_info,
            h245_address,
            call_identifier,
            h245_security_mode,
            tokens,
            crypto_tokens,
            fast_start,
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
                self.h245_address.is_some(),
                self.h245_security_mode.is_some(),
                self.tokens.is_some(),
                self.crypto_tokens.is_some(),
                self.fast_start.is_some(),
            ],
        )?;
        w.write_object_id(&self.protocol_identifier)?;
        self.destination_info.encode(w)?;
        if let Some(v) = &self.h245_address {
            v.encode(w)?;
        }
        self.call_identifier.encode(w)?;
        if let Some(v) = &self.h245_security_mode {
            v.encode(w)?;
        }
        if let Some(v) = &self.tokens {
            w.write_sequence_of(v, |w, t| t.encode(w))?;
        }
        if let Some(v) = &self.crypto_tokens {
            w.write_sequence_of(v, |w, t| t.encode(w))?;
        }
        if let Some(v) = &self.fast_start {
            write_fast_start(w, v)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

macro_rules! status_like_uuie {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            pub protocol_identifier: ProtocolIdentifier,
            pub call_identifier: CallIdentifier,
            pub unknown_extensions: Vec<RawExtension>,
        }

        impl $name {
            pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
                let (ext, _) = r.read_sequence_header(true, 0)?;
                let protocol_identifier =
                    r.element("protocolIdentifier", |r| r.read_object_id())?;
                let call_identifier = r.element("callIdentifier", CallIdentifier::decode)?;
                let unknown_extensions = r.read_remaining_extensions(ext)?;

                Ok(Self {
                    protocol_identifier,
                    call_identifier,
                    unknown_extensions,
                })
            }

            pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
                let mut ext = ExtensionAdditions::new();
                for raw in &self.unknown_extensions {
                    ext.raw(raw);
                }
                w.write_sequence_header(true, !ext.is_empty(), &[])?;
                w.write_object_id(&self.protocol_identifier)?;
                self.call_identifier.encode(w)?;
                if !ext.is_empty() {
                    ext.write(w)?;
                }
                Ok(())
            }
        }
    };
}

status_like_uuie! { StatusUuie }
status_like_uuie! { StatusInquiryUuie }
status_like_uuie! { SetupAcknowledgeUuie }
status_like_uuie! { NotifyUuie }

/// The signaling payload proper. Seven root alternatives from version 1;
/// the version-2 additions are decoded through the open-type path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum H323MessageBody {
    Setup(SetupUuie),
    CallProceeding(CallProceedingUuie),
    Connect(ConnectUuie),
    Alerting(AlertingUuie),
    Information(InformationUuie),
    ReleaseComplete(ReleaseCompleteUuie),
    Facility(FacilityUuie),
    // Extension additions.
    Progress(ProgressUuie),
    Empty,
    Status(StatusUuie),
    StatusInquiry(StatusInquiryUuie),
    SetupAcknowledge(SetupAcknowledgeUuie),
    Notify(NotifyUuie),
    Unknown(RawExtension),
}

impl H323MessageBody {
    const NUM_ROOT: u32 = 7;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::Setup(r.element("setup", SetupUuie::decode)?)),
            ChoiceTag::Root(1) => Ok(Self::CallProceeding(
                r.element("callProceeding", CallProceedingUuie::decode)?,
            )),
            ChoiceTag::Root(2) => Ok(Self::Connect(r.element("connect", ConnectUuie::decode)?)),
            ChoiceTag::Root(3) => Ok(Self::Alerting(r.element("alerting", AlertingUuie::decode)?)),
            ChoiceTag::Root(4) => Ok(Self::Information(
                r.element("information", InformationUuie::decode)?,
            )),
            ChoiceTag::Root(5) => Ok(Self::ReleaseComplete(
                r.element("releaseComplete", ReleaseCompleteUuie::decode)?,
            )),
            ChoiceTag::Root(6) => Ok(Self::Facility(r.element("facility", FacilityUuie::decode)?)),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(0) => Ok(Self::Progress(
                r.element("progress", |r| r.open_type(ProgressUuie::decode))?,
            )),
            ChoiceTag::Extension(1) => {
                r.element("empty", |r| {
                    let _ = r.read_open_type_bytes()?;
                    r.read_null()
                })?;
                Ok(Self::Empty)
            }
            ChoiceTag::Extension(2) => Ok(Self::Status(
                r.element("status", |r| r.open_type(StatusUuie::decode))?,
            )),
            ChoiceTag::Extension(3) => Ok(Self::StatusInquiry(
                r.element("statusInquiry", |r| r.open_type(StatusInquiryUuie::decode))?,
            )),
            ChoiceTag::Extension(4) => Ok(Self::SetupAcknowledge(
                r.element("setupAcknowledge", |r| {
                    r.open_type(SetupAcknowledgeUuie::decode)
                })?,
            )),
            ChoiceTag::Extension(5) => Ok(Self::Notify(
                r.element("notify", |r| r.open_type(NotifyUuie::decode))?,
            )),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::Setup(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::CallProceeding(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Connect(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Alerting(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Information(v) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::ReleaseComplete(v) => {
                w.write_choice_root(5, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Facility(v) => {
                w.write_choice_root(6, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::Progress(v) => {
                w.write_choice_extension(0)?;
                let payload = PerWriter::encode_to_bytes(|w| v.encode(w))?;
                w.write_open_type(&payload)
            }
            Self::Empty => {
                w.write_choice_extension(1)?;
                w.write_open_type(&[])
            }
            Self::Status(v) => {
                w.write_choice_extension(2)?;
                let payload = PerWriter::encode_to_bytes(|w| v.encode(w))?;
                w.write_open_type(&payload)
            }
            Self::StatusInquiry(v) => {
                w.write_choice_extension(3)?;
                let payload = PerWriter::encode_to_bytes(|w| v.encode(w))?;
                w.write_open_type(&payload)
            }
            Self::SetupAcknowledge(v) => {
                w.write_choice_extension(4)?;
                let payload = PerWriter::encode_to_bytes(|w| v.encode(w))?;
                w.write_open_type(&payload)
            }
            Self::Notify(v) => {
                w.write_choice_extension(5)?;
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

/// PDU wrapper: the message body plus the tunneling fields that arrived as
/// extension additions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct H323UuPdu {
    pub h323_message_body: H323MessageBody,
    pub non_standard_data: Option<NonStandardParameter>,
    // Extension additions.
    pub h4501_supplementary_service: Option<Vec<Vec<u8>>>,
    pub h245_tunneling: Option<bool>,
    pub h245_control: Option<Vec<Vec<u8>>>,
    pub non_standard_control: Option<Vec<NonStandardParameter>>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl H323UuPdu {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let h323_message_body = r.element("h323-message-body", H323MessageBody::decode)?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;

        let mut h4501_supplementary_service = None;
        let mut h245_tunneling = None;
        let mut h245_control = None;
        let mut non_standard_control = None;
        let mut unknown_extensions = Vec::new();
        if ext {
            let bitmap = r.read_extension_bitmap()?;
            for (index, present) in bitmap.iter().enumerate() {
                if !*present {
                    continue;
                }
                match index {
                    0 => {
                        h4501_supplementary_service =
                            r.element("h4501SupplementaryService", |r| {
                                r.open_type_optional(|r| {
                                    r.read_sequence_of("h4501SupplementaryService", |r| {
                                        r.read_octet_string()
                                    })
                                })
                            })?;
                    }
                    1 => {
                        h245_tunneling = r.element("h245Tunneling", |r| {
                            r.open_type_optional(|r| r.read_boolean())
                        })?;
                    }
                    2 => {
                        h245_control = r.element("h245Control", |r| {
                            r.open_type_optional(|r| {
                                r.read_sequence_of("h245Control", |r| r.read_octet_string())
                            })
                        })?;
                    }
                    3 => {
                        non_standard_control = r.element("nonStandardControl", |r| {
                            r.open_type_optional(|r| {
                                r.read_sequence_of(
                                    "nonStandardControl",
                                    NonStandardParameter::decode,
                                )
                            })
                        })?;
                    }
                    _ => r.read_unknown_extension(index as u32, &mut unknown_extensions)?,
                }
            }
        }

        Ok(Self {
            h323_message_body,
            non_standard_data,
            h4501_supplementary_service,
            h245_tunneling,
            h245_control,
            non_standard_control,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        if let Some(v) = &self.h4501_supplementary_service {
            ext.known(
                0,
                PerWriter::encode_to_bytes(|w| {
                    w.write_sequence_of(v, |w, e| w.write_octet_string(e))
                })?,
            );
        }
        if let Some(v) = &self.h245_tunneling {
            ext.known(1, PerWriter::encode_to_bytes(|w| w.write_boolean(*v))?);
        }
        if let Some(v) = &self.h245_control {
            ext.known(
                2,
                PerWriter::encode_to_bytes(|w| {
                    w.write_sequence_of(v, |w, e| w.write_octet_string(e))
                })?,
            );
        }
        if let Some(v) = &self.non_standard_control {
            ext.known(
                3,
                PerWriter::encode_to_bytes(|w| w.write_sequence_of(v, |w, p| p.encode(w)))?,
            );
        }
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.non_standard_data.is_some()])?;
        self.h323_message_body.encode(w)?;
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

/// Q.931 user-data tail: a protocol discriminator plus up to 131 octets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserData {
    pub protocol_discriminator: u8,
    pub user_information: Vec<u8>,
}

impl UserData {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let protocol_discriminator =
            r.element("protocol-discriminator", |r| r.read_constrained_uint(0, 255))? as u8;
        let user_information = r.element("user-information", |r| {
            r.set_size_constraint(SizeConstraint::range(1, 131));
            r.read_octet_string()
        })?;
        Ok(Self {
            protocol_discriminator,
            user_information,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_constrained_uint(u64::from(self.protocol_discriminator), 0, 255)?;
        w.set_size_constraint(SizeConstraint::range(1, 131));
        w.write_octet_string(&self.user_information)
    }
}

/// Top-level call-signaling value: the PDU plus optional raw user data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct H323UserInformation {
    pub h323_uu_pdu: H323UuPdu,
    pub user_data: Option<UserData>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl H323UserInformation {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let h323_uu_pdu = r.element("h323-uu-pdu", H323UuPdu::decode)?;
        let user_data = r.optional(opt.get(0), |r| r.element("user-data", UserData::decode))?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            h323_uu_pdu,
            user_data,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.user_data.is_some()])?;
        self.h323_uu_pdu.encode(w)?;
        if let Some(v) = &self.user_data {
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
    use crate::h225::types::{EndpointType, IpAddress};
    use crate::per::{PerReader, PerWriter};

    fn protocol_id() -> crate::per::ObjectId {
        crate::per::ObjectId::new(vec![0, 0, 8, 2250, 0, 4])
    }

    fn setup_body() -> SetupUuie {
        SetupUuie {
            protocol_identifier: protocol_id(),
            h245_address: None,
            source_address: Some(vec![AliasAddress::H323Id("caller".into())]),
            source_info: EndpointType::default(),
            destination_address: Some(vec![AliasAddress::DialedDigits("5551000".into())]),
            dest_call_signal_address: Some(TransportAddress::IpAddress(IpAddress {
                ip: vec![10, 0, 0, 20],
                port: 1720,
            })),
            dest_extra_call_info: None,
            dest_extra_crv: None,
            active_mc: false,
            conference_id: vec![7; 16],
            conference_goal: ConferenceGoal::Create,
            call_services: None,
            call_type: CallType::PointToPoint,
            source_call_signal_address: None,
            call_identifier: Some(CallIdentifier::new(vec![0xAB; 16])),
            tokens: None,
            crypto_tokens: None,
            fast_start: None,
            media_wait_for_connect: Some(false),
            can_overlap_send: None,
            unknown_extensions: Vec::new(),
        }
    }

    #[test]
    fn setup_with_fast_start_round_trip() {
        let proposal = vec![vec![0x01, 0x02, 0x03, 0x04], vec![0xAA; 9]];
        let mut setup = setup_body();
        setup.fast_start = Some(proposal.clone());

        let msg = H323UserInformation {
            h323_uu_pdu: H323UuPdu {
                h323_message_body: H323MessageBody::Setup(setup),
                non_standard_data: None,
                h4501_supplementary_service: None,
                h245_tunneling: Some(true),
                h245_control: None,
                non_standard_control: None,
                unknown_extensions: Vec::new(),
            },
            user_data: None,
            unknown_extensions: Vec::new(),
        };

        let encoded = crate::encode_h323_user_information(&msg).unwrap();
        let (decoded, consumed) = crate::decode_h323_user_information(&encoded).unwrap();
        assert_eq!(consumed, encoded.len());

        match &decoded.h323_uu_pdu.h323_message_body {
            H323MessageBody::Setup(s) => {
                let fast_start = s.fast_start.as_ref().unwrap();
                assert_eq!(2, fast_start.len());
                assert_eq!(proposal, *fast_start);
            }
            other => panic!("wrong body: {:?}", other),
        }
        assert_eq!(msg, decoded);
    }

    #[test]
    fn tunneled_h245_control_round_trip() {
        let msg = H323UserInformation {
            h323_uu_pdu: H323UuPdu {
                h323_message_body: H323MessageBody::Facility(FacilityUuie {
                    protocol_identifier: protocol_id(),
                    alternative_address: None,
                    alternative_alias_address: None,
                    conference_id: None,
                    reason: FacilityReason::RouteCallToGatekeeper,
                    unknown_extensions: Vec::new(),
                }),
                non_standard_data: None,
                h4501_supplementary_service: None,
                h245_tunneling: Some(true),
                h245_control: Some(vec![vec![0x20, 0x80, 0x01, 0x00]]),
                non_standard_control: None,
                unknown_extensions: Vec::new(),
            },
            user_data: Some(UserData {
                protocol_discriminator: 5,
                user_information: vec![0x11, 0x22],
            }),
            unknown_extensions: Vec::new(),
        };

        let encoded = crate::encode_h323_user_information(&msg).unwrap();
        let (decoded, _) = crate::decode_h323_user_information(&encoded).unwrap();
        assert_eq!(msg, decoded);
    }

    #[test]
    fn body_extension_alternatives_round_trip() {
        let bodies = vec![
            H323MessageBody::Empty,
            H323MessageBody::Status(StatusUuie {
                protocol_identifier: protocol_id(),
                call_identifier: CallIdentifier::new(vec![1; 16]),
                unknown_extensions: Vec::new(),
            }),
            H323MessageBody::Unknown(RawExtension {
                index: 9,
                data: vec![0xAA, 0xBB, 0xCC],
            }),
        ];

        for body in bodies {
            let encoded = PerWriter::encode_to_bytes(|w| body.encode(w)).unwrap();
            let mut reader = PerReader::new(&encoded);
            assert_eq!(body, H323MessageBody::decode(&mut reader).unwrap());
        }
    }

    #[test]
    fn release_complete_with_reason_round_trip() {
        let body = H323MessageBody::ReleaseComplete(ReleaseCompleteUuie {
            protocol_identifier: protocol_id(),
            reason: Some(ReleaseCompleteReason::UnreachableDestination),
            unknown_extensions: Vec::new(),
        });
        let encoded = PerWriter::encode_to_bytes(|w| body.encode(w)).unwrap();
        let mut reader = PerReader::new(&encoded);
        assert_eq!(body, H323MessageBody::decode(&mut reader).unwrap());
    }

    #[test]
    fn alerting_with_tokens_round_trip() {
        let body = H323MessageBody::Alerting(AlertingUuie {
            protocol_identifier: protocol_id(),
            destination_info: EndpointType::default(),
            h245_address: Some(TransportAddress::IpAddress(IpAddress {
                ip: vec![10, 0, 0, 21],
                port: 2045,
            })),
            tokens: Some(vec![crate::h235::ClearToken::new(
                crate::per::ObjectId::new(vec![0, 0, 8, 235, 0, 2, 5]),
            )]),
            crypto_tokens: None,
            fast_start: Some(vec![vec![0x55, 0x66]]),
            unknown_extensions: Vec::new(),
        });
        let encoded = PerWriter::encode_to_bytes(|w| body.encode(w)).unwrap();
        let mut reader = PerReader::new(&encoded);
        assert_eq!(body, H323MessageBody::decode(&mut reader).unwrap());
    }
}
