//! The H.225.0 RAS message set: gatekeeper discovery, registration,
//! admission, bandwidth, disengage, location, and status exchange.
//!
//! Root alternatives and root fields follow the version-2 schema; additions
//! from later revisions travel through the open-type path and are either
//! decoded (when listed here) or preserved as raw extensions.

use crate::error::{ErrorKind, Result};
use crate::h225::types::*;
use crate::h235::{ClearToken, CryptoH323Token};
use crate::per::null_choice;
use crate::per::{
    ChoiceTag, ExtensionAdditions, PerReader, PerWriter, RawExtension,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatekeeperRequest {
    pub request_seq_num: RequestSeqNum,
    pub protocol_identifier: ProtocolIdentifier,
    pub non_standard_data: Option<NonStandardParameter>,
    pub ras_address: TransportAddress,
    pub endpoint_type: EndpointType,
    pub gatekeeper_identifier: Option<GatekeeperIdentifier>,
    pub call_services: Option<QseriesOptions>,
    pub endpoint_alias: Option<Vec<AliasAddress>>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl GatekeeperRequest {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 4)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let protocol_identifier = r.element("protocolIdentifier", |r| r.read_object_id())?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let ras_address = r.element("rasAddress", TransportAddress::decode)?;
        let endpoint_type = r.element("endpointType", EndpointType::decode)?;
        let gatekeeper_identifier = r.optional(opt.get(1), |r| {
            r.element("gatekeeperIdentifier", read_gatekeeper_identifier)
        })?;
        let call_services = r.optional(opt.get(2), |r| {
            r.element("callServices", QseriesOptions::decode)
        })?;
        let endpoint_alias = r.optional(opt.get(3), |r| {
            r.element("endpointAlias", |r| {
                r.read_sequence_of("endpointAlias", AliasAddress::decode)
            })
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            protocol_identifier,
            non_standard_data,
            ras_address,
            endpoint_type,
            gatekeeper_identifier,
            call_services,
            endpoint_alias,
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
                self.non_standard_data.is_some(),
                self.gatekeeper_identifier.is_some(),
                self.call_services.is_some(),
                self.endpoint_alias.is_some(),
            ],
        )?;
        write_request_seq_num(w, self.request_seq_num)?;
        w.write_object_id(&self.protocol_identifier)?;
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        self.ras_address.encode(w)?;
        self.endpoint_type.encode(w)?;
        if let Some(v) = &self.gatekeeper_identifier {
            write_gatekeeper_identifier(w, v)?;
        }
        if let Some(v) = &self.call_services {
            v.encode(w)?;
        }
        if let Some(v) = &self.endpoint_alias {
            w.write_sequence_of(v, |w, a| a.encode(w))?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatekeeperConfirm {
    pub request_seq_num: RequestSeqNum,
    pub protocol_identifier: ProtocolIdentifier,
    pub non_standard_data: Option<NonStandardParameter>,
    pub gatekeeper_identifier: Option<GatekeeperIdentifier>,
    pub ras_address: TransportAddress,
    /// First extension addition.
    pub alternate_gatekeeper: Option<Vec<AlternateGk>>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl GatekeeperConfirm {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 2)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let protocol_identifier = r.element("protocolIdentifier", |r| r.read_object_id())?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let gatekeeper_identifier = r.optional(opt.get(1), |r| {
            r.element("gatekeeperIdentifier", read_gatekeeper_identifier)
        })?;
        let ras_address = r.element("rasAddress", TransportAddress::decode)?;

        let mut alternate_gatekeeper = None;
        let mut unknown_extensions = Vec::new();
        if ext {
            let bitmap = r.read_extension_bitmap()?;
            for (index, present) in bitmap.iter().enumerate() {
                if !*present {
                    continue;
                }
                match index {
                    0 => {
                        alternate_gatekeeper = r.element("alternateGatekeeper", |r| {
                            r.open_type_optional(|r| {
                                r.read_sequence_of("alternateGatekeeper", AlternateGk::decode)
                            })
                        })?;
                    }
                    _ => r.read_unknown_extension(index as u32, &mut unknown_extensions)?,
                }
            }
        }

        Ok(Self {
            request_seq_num,
            protocol_identifier,
            non_standard_data,
            gatekeeper_identifier,
            ras_address,
            alternate_gatekeeper,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        if let Some(v) = &self.alternate_gatekeeper {
            ext.known(
                0,
                PerWriter::encode_to_bytes(|w| w.write_sequence_of(v, |w, gk| gk.encode(w)))?,
            );
        }
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(
            true,
            !ext.is_empty(),
            &[
                self.non_standard_data.is_some(),
                self.gatekeeper_identifier.is_some(),
            ],
        )?;
        write_request_seq_num(w, self.request_seq_num)?;
        w.write_object_id(&self.protocol_identifier)?;
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        if let Some(v) = &self.gatekeeper_identifier {
            write_gatekeeper_identifier(w, v)?;
        }
        self.ras_address.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatekeeperReject {
    pub request_seq_num: RequestSeqNum,
    pub protocol_identifier: ProtocolIdentifier,
    pub non_standard_data: Option<NonStandardParameter>,
    pub gatekeeper_identifier: Option<GatekeeperIdentifier>,
    pub reject_reason: GatekeeperRejectReason,
    /// First extension addition.
    pub alt_gk_info: Option<AltGkInfo>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl GatekeeperReject {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 2)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let protocol_identifier = r.element("protocolIdentifier", |r| r.read_object_id())?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let gatekeeper_identifier = r.optional(opt.get(1), |r| {
            r.element("gatekeeperIdentifier", read_gatekeeper_identifier)
        })?;
        let reject_reason = r.element("rejectReason", GatekeeperRejectReason::decode)?;

        let mut alt_gk_info = None;
        let mut unknown_extensions = Vec::new();
        if ext {
            let bitmap = r.read_extension_bitmap()?;
            for (index, present) in bitmap.iter().enumerate() {
                if !*present {
                    continue;
                }
                match index {
                    0 => {
                        alt_gk_info = r.element("altGKInfo", |r| {
                            r.open_type_optional(AltGkInfo::decode)
                        })?;
                    }
                    _ => r.read_unknown_extension(index as u32, &mut unknown_extensions)?,
                }
            }
        }

        Ok(Self {
            request_seq_num,
            protocol_identifier,
            non_standard_data,
            gatekeeper_identifier,
            reject_reason,
            alt_gk_info,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        if let Some(v) = &self.alt_gk_info {
            ext.known(0, PerWriter::encode_to_bytes(|w| v.encode(w))?);
        }
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(
            true,
            !ext.is_empty(),
            &[
                self.non_standard_data.is_some(),
                self.gatekeeper_identifier.is_some(),
            ],
        )?;
        write_request_seq_num(w, self.request_seq_num)?;
        w.write_object_id(&self.protocol_identifier)?;
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        if let Some(v) = &self.gatekeeper_identifier {
            write_gatekeeper_identifier(w, v)?;
        }
        self.reject_reason.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

/// Endpoint registration. The keep-alive, time-to-live and security-token
/// additions are decoded; the rest of the later additions are preserved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub request_seq_num: RequestSeqNum,
    pub protocol_identifier: ProtocolIdentifier,
    pub non_standard_data: Option<NonStandardParameter>,
    pub discovery_complete: bool,
    pub call_signal_address: Vec<TransportAddress>,
    pub ras_address: Vec<TransportAddress>,
    pub terminal_type: EndpointType,
    pub terminal_alias: Option<Vec<AliasAddress>>,
    pub gatekeeper_identifier: Option<GatekeeperIdentifier>,
    pub endpoint_vendor: VendorIdentifier,
    // Extension additions.
    pub time_to_live: Option<TimeToLive>,
    pub tokens: Option<Vec<ClearToken>>,
    pub crypto_tokens: Option<Vec<CryptoH323Token>>,
    pub keep_alive: Option<bool>,
    pub endpoint_identifier: Option<EndpointIdentifier>,
    pub will_supply_uuies: Option<bool>,
    pub maintain_connection: Option<bool>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl RegistrationRequest {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 3)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let protocol_identifier = r.element("protocolIdentifier", |r| r.read_object_id())?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let discovery_complete = r.element("discoveryComplete", |r| r.read_boolean())?;
        let call_signal_address = r.element("callSignalAddress", |r| {
            r.read_sequence_of("callSignalAddress", TransportAddress::decode)
        })?;
        let ras_address = r.element("rasAddress", |r| {
            r.read_sequence_of("rasAddress", TransportAddress::decode)
        })?;
        let terminal_type = r.element("terminalType", EndpointType::decode)?;
        let terminal_alias = r.optional(opt.get(1), |r| {
            r.element("terminalAlias", |r| {
                r.read_sequence_of("terminalAlias", AliasAddress::decode)
            })
        })?;
        let gatekeeper_identifier = r.optional(opt.get(2), |r| {
            r.element("gatekeeperIdentifier", read_gatekeeper_identifier)
        })?;
        let endpoint_vendor = r.element("endpointVendor", VendorIdentifier::decode)?;

        let mut time_to_live = None;
        let mut tokens = None;
        let mut crypto_tokens = None;
        let mut keep_alive = None;
        let mut endpoint_identifier = None;
        let mut will_supply_uuies = None;
        let mut maintain_connection = None;
        let mut unknown_extensions = Vec::new();
        if ext {
            let bitmap = r.read_extension_bitmap()?;
            for (index, present) in bitmap.iter().enumerate() {
                if !*present {
                    continue;
                }
                match index {
                    1 => {
                        time_to_live = r.element("timeToLive", |r| {
                            r.open_type_optional(read_time_to_live)
                        })?;
                    }
                    2 => {
                        tokens = r.element("tokens", |r| {
                            r.open_type_optional(|r| {
                                r.read_sequence_of("tokens", ClearToken::decode)
                            })
                        })?;
                    }
                    3 => {
                        crypto_tokens = r.element("cryptoTokens", |r| {
                            r.open_type_optional(|r| {
                                r.read_sequence_of("cryptoTokens", CryptoH323Token::decode)
                            })
                        })?;
                    }
                    5 => {
                        keep_alive = r.element("keepAlive", |r| {
                            r.open_type_optional(|r| r.read_boolean())
                        })?;
                    }
                    6 => {
                        endpoint_identifier = r.element("endpointIdentifier", |r| {
                            r.open_type_optional(read_endpoint_identifier)
                        })?;
                    }
                    7 => {
                        will_supply_uuies = r.element("willSupplyUUIEs", |r| {
                            r.open_type_optional(|r| r.read_boolean())
                        })?;
                    }
                    8 => {
                        maintain_connection = r.element("maintainConnection", |r| {
                            r.open_type_optional(|r| r.read_boolean())
                        })?;
                    }
                    _ => r.read_unknown_extension(index as u32, &mut unknown_extensions)?,
                }
            }
        }

        Ok(Self {
            request_seq_num,
            protocol_identifier,
            non_standard_data,
            discovery_complete,
            call_signal_address,
            ras_address,
            terminal_type,
            terminal_alias,
            gatekeeper_identifier,
            endpoint_vendor,
            time_to_live,
            tokens,
            crypto_tokens,
            keep_alive,
            endpoint_identifier,
            will_supply_uuies,
            maintain_connection,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        if let Some(v) = &self.time_to_live {
            ext.known(1, PerWriter::encode_to_bytes(|w| write_time_to_live(w, *v))?);
        }
        if let Some(v) = &self.tokens {
            ext.known(
                2,
                PerWriter::encode_to_bytes(|w| w.write_sequence_of(v, |w, t| t.encode(w)))?,
            );
        }
        if let Some(v) = &self.crypto_tokens {
            ext.known(
                3,
                PerWriter::encode_to_bytes(|w| w.write_sequence_of(v, |w, t| t.encode(w)))?,
            );
        }
        if let Some(v) = &self.keep_alive {
            ext.known(5, PerWriter::encode_to_bytes(|w| w.write_boolean(*v))?);
        }
        if let Some(v) = &self.endpoint_identifier {
            ext.known(6, PerWriter::encode_to_bytes(|w| write_endpoint_identifier(w, v))?);
        }
        if let Some(v) = &self.will_supply_uuies {
            ext.known(7, PerWriter::encode_to_bytes(|w| w.write_boolean(*v))?);
        }
        if let Some(v) = &self.maintain_connection {
            ext.known(8, PerWriter::encode_to_bytes(|w| w.write_boolean(*v))?);
        }
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(
            true,
            !ext.is_empty(),
            &[
                self.non_standard_data.is_some(),
                self.terminal_alias.is_some(),
                self.gatekeeper_identifier.is_some(),
            ],
        )?;
        write_request_seq_num(w, self.request_seq_num)?;
        w.write_object_id(&self.protocol_identifier)?;
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        w.write_boolean(self.discovery_complete)?;
        w.write_sequence_of(&self.call_signal_address, |w, a| a.encode(w))?;
        w.write_sequence_of(&self.ras_address, |w, a| a.encode(w))?;
        self.terminal_type.encode(w)?;
        if let Some(v) = &self.terminal_alias {
            w.write_sequence_of(v, |w, a| a.encode(w))?;
        }
        if let Some(v) = &self.gatekeeper_identifier {
            write_gatekeeper_identifier(w, v)?;
        }
        self.endpoint_vendor.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationConfirm {
    pub request_seq_num: RequestSeqNum,
    pub protocol_identifier: ProtocolIdentifier,
    pub non_standard_data: Option<NonStandardParameter>,
    pub call_signal_address: Vec<TransportAddress>,
    pub terminal_alias: Option<Vec<AliasAddress>>,
    pub gatekeeper_identifier: Option<GatekeeperIdentifier>,
    pub endpoint_identifier: EndpointIdentifier,
    // Extension additions.
    pub alternate_gatekeeper: Option<Vec<AlternateGk>>,
    pub time_to_live: Option<TimeToLive>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl RegistrationConfirm {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 3)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let protocol_identifier = r.element("protocolIdentifier", |r| r.read_object_id())?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let call_signal_address = r.element("callSignalAddress", |r| {
            r.read_sequence_of("callSignalAddress", TransportAddress::decode)
        })?;
        let terminal_alias = r.optional(opt.get(1), |r| {
            r.element("terminalAlias", |r| {
                r.read_sequence_of("terminalAlias", AliasAddress::decode)
            })
        })?;
        let gatekeeper_identifier = r.optional(opt.get(2), |r| {
            r.element("gatekeeperIdentifier", read_gatekeeper_identifier)
        })?;
        let endpoint_identifier = r.element("endpointIdentifier", read_endpoint_identifier)?;

        let mut alternate_gatekeeper = None;
        let mut time_to_live = None;
        let mut unknown_extensions = Vec::new();
        if ext {
            let bitmap = r.read_extension_bitmap()?;
            for (index, present) in bitmap.iter().enumerate() {
                if !*present {
                    continue;
                }
                match index {
                    0 => {
                        alternate_gatekeeper = r.element("alternateGatekeeper", |r| {
                            r.open_type_optional(|r| {
                                r.read_sequence_of("alternateGatekeeper", AlternateGk::decode)
                            })
                        })?;
                    }
                    1 => {
                        time_to_live = r.element("timeToLive", |r| {
                            r.open_type_optional(read_time_to_live)
                        })?;
                    }
                    _ => r.read_unknown_extension(index as u32, &mut unknown_extensions)?,
                }
            }
        }

        Ok(Self {
            request_seq_num,
            protocol_identifier,
            non_standard_data,
            call_signal_address,
            terminal_alias,
            gatekeeper_identifier,
            endpoint_identifier,
            alternate_gatekeeper,
            time_to_live,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        if let Some(v) = &self.alternate_gatekeeper {
            ext.known(
                0,
                PerWriter::encode_to_bytes(|w| w.write_sequence_of(v, |w, gk| gk.encode(w)))?,
            );
        }
        if let Some(v) = &self.time_to_live {
            ext.known(1, PerWriter::encode_to_bytes(|w| write_time_to_live(w, *v))?);
        }
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(
            true,
            !ext.is_empty(),
            &[
                self.non_standard_data.is_some(),
                self.terminal_alias.is_some(),
                self.gatekeeper_identifier.is_some(),
            ],
        )?;
        write_request_seq_num(w, self.request_seq_num)?;
        w.write_object_id(&self.protocol_identifier)?;
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        w.write_sequence_of(&self.call_signal_address, |w, a| a.encode(w))?;
        if let Some(v) = &self.terminal_alias {
            w.write_sequence_of(v, |w, a| a.encode(w))?;
        }
        if let Some(v) = &self.gatekeeper_identifier {
            write_gatekeeper_identifier(w, v)?;
        }
        write_endpoint_identifier(w, &self.endpoint_identifier)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationReject {
    pub request_seq_num: RequestSeqNum,
    pub protocol_identifier: ProtocolIdentifier,
    pub non_standard_data: Option<NonStandardParameter>,
    pub reject_reason: RegistrationRejectReason,
    pub gatekeeper_identifier: Option<GatekeeperIdentifier>,
    /// First extension addition.
    pub alt_gk_info: Option<AltGkInfo>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl RegistrationReject {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 2)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let protocol_identifier = r.element("protocolIdentifier", |r| r.read_object_id())?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let reject_reason = r.element("rejectReason", RegistrationRejectReason::decode)?;
        let gatekeeper_identifier = r.optional(opt.get(1), |r| {
            r.element("gatekeeperIdentifier", read_gatekeeper_identifier)
        })?;

        let mut alt_gk_info = None;
        let mut unknown_extensions = Vec::new();
        if ext {
            let bitmap = r.read_extension_bitmap()?;
            for (index, present) in bitmap.iter().enumerate() {
                if !*present {
                    continue;
                }
                match index {
                    0 => {
                        alt_gk_info = r.element("altGKInfo", |r| {
                            r.open_type_optional(AltGkInfo::decode)
                        })?;
                    }
                    _ => r.read_unknown_extension(index as u32, &mut unknown_extensions)?,
                }
            }
        }

        Ok(Self {
            request_seq_num,
            protocol_identifier,
            non_standard_data,
            reject_reason,
            gatekeeper_identifier,
            alt_gk_info,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        if let Some(v) = &self.alt_gk_info {
            ext.known(0, PerWriter::encode_to_bytes(|w| v.encode(w))?);
        }
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(
            true,
            !ext.is_empty(),
            &[
                self.non_standard_data.is_some(),
                self.gatekeeper_identifier.is_some(),
            ],
        )?;
        write_request_seq_num(w, self.request_seq_num)?;
        w.write_object_id(&self.protocol_identifier)?;
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        self.reject_reason.encode(w)?;
        if let Some(v) = &self.gatekeeper_identifier {
            write_gatekeeper_identifier(w, v)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnregistrationRequest {
    pub request_seq_num: RequestSeqNum,
    pub call_signal_address: Vec<TransportAddress>,
    pub endpoint_alias: Option<Vec<AliasAddress>>,
    pub non_standard_data: Option<NonStandardParameter>,
    pub endpoint_identifier: Option<EndpointIdentifier>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl UnregistrationRequest {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 3)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let call_signal_address = r.element("callSignalAddress", |r| {
            r.read_sequence_of("callSignalAddress", TransportAddress::decode)
        })?;
        let endpoint_alias = r.optional(opt.get(0), |r| {
            r.element("endpointAlias", |r| {
                r.read_sequence_of("endpointAlias", AliasAddress::decode)
            })
        })?;
        let non_standard_data = r.optional(opt.get(1), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let endpoint_identifier = r.optional(opt.get(2), |r| {
            r.element("endpointIdentifier", read_endpoint_identifier)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            call_signal_address,
            endpoint_alias,
            non_standard_data,
            endpoint_identifier,
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
                self.endpoint_alias.is_some(),
                self.non_standard_data.is_some(),
                self.endpoint_identifier.is_some(),
            ],
        )?;
        write_request_seq_num(w, self.request_seq_num)?;
        w.write_sequence_of(&self.call_signal_address, |w, a| a.encode(w))?;
        if let Some(v) = &self.endpoint_alias {
            w.write_sequence_of(v, |w, a| a.encode(w))?;
        }
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        if let Some(v) = &self.endpoint_identifier {
            write_endpoint_identifier(w, v)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnregistrationConfirm {
    pub request_seq_num: RequestSeqNum,
    pub non_standard_data: Option<NonStandardParameter>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl UnregistrationConfirm {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            non_standard_data,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.non_standard_data.is_some()])?;
        write_request_seq_num(w, self.request_seq_num)?;
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
pub struct UnregistrationReject {
    pub request_seq_num: RequestSeqNum,
    pub reject_reason: UnregRejectReason,
    pub non_standard_data: Option<NonStandardParameter>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl UnregistrationReject {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let reject_reason = r.element("rejectReason", UnregRejectReason::decode)?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            reject_reason,
            non_standard_data,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.non_standard_data.is_some()])?;
        write_request_seq_num(w, self.request_seq_num)?;
        self.reject_reason.encode(w)?;
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

/// Call admission. The alias-mapping flag and the call identifier came with
/// the first extension round and are decoded when present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdmissionRequest {
    pub request_seq_num: RequestSeqNum,
    pub call_type: CallType,
    pub call_model: Option<CallModel>,
    pub endpoint_identifier: EndpointIdentifier,
    pub destination_info: Option<Vec<AliasAddress>>,
    pub dest_call_signal_address: Option<TransportAddress>,
    pub dest_extra_call_info: Option<Vec<AliasAddress>>,
    pub src_info: Vec<AliasAddress>,
    pub src_call_signal_address: Option<TransportAddress>,
    pub band_width: BandWidth,
    pub call_reference_value: CallReferenceValue,
    pub non_standard_data: Option<NonStandardParameter>,
    pub call_services: Option<QseriesOptions>,
    pub conference_id: ConferenceIdentifier,
    pub active_mc: bool,
    pub answer_call: bool,
    // Extension additions.
    pub can_map_alias: Option<bool>,
    pub call_identifier: Option<CallIdentifier>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl AdmissionRequest {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 7)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let call_type = r.element("callType", CallType::decode)?;
        let call_model = r.optional(opt.get(0), |r| r.element("callModel", CallModel::decode))?;
        let endpoint_identifier = r.element("endpointIdentifier", read_endpoint_identifier)?;
        let destination_info = r.optional(opt.get(1), |r| {
            r.element("destinationInfo", |r| {
                r.read_sequence_of("destinationInfo", AliasAddress::decode)
            })
        })?;
        let dest_call_signal_address = r.optional(opt.get(2), |r| {
            r.element("destCallSignalAddress", TransportAddress::decode)
        })?;
        let dest_extra_call_info = r.optional(opt.get(3), |r| {
            r.element("destExtraCallInfo", |r| {
                r.read_sequence_of("destExtraCallInfo", AliasAddress::decode)
            })
        })?;
        let src_info = r.element("srcInfo", |r| {
            r.read_sequence_of("srcInfo", AliasAddress::decode)
        })?;
        let src_call_signal_address = r.optional(opt.get(4), |r| {
            r.element("srcCallSignalAddress", TransportAddress::decode)
        })?;
        let band_width = r.element("bandWidth", read_bandwidth)?;
        let call_reference_value = r.element("callReferenceValue", read_call_reference_value)?;
        let non_standard_data = r.optional(opt.get(5), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let call_services = r.optional(opt.get(6), |r| {
            r.element("callServices", QseriesOptions::decode)
        })?;
        let conference_id = r.element("conferenceID", read_conference_identifier)?;
        let active_mc = r.element("activeMC", |r| r.read_boolean())?;
        let answer_call = r.element("answerCall", |r| r.read_boolean())?;

        let mut can_map_alias = None;
        let mut call_identifier = None;
        let mut unknown_extensions = Vec::new();
        if ext {
            let bitmap = r.read_extension_bitmap()?;
            for (index, present) in bitmap.iter().enumerate() {
                if !*present {
                    continue;
                }
                match index {
                    0 => {
                        can_map_alias = r.element("canMapAlias", |r| {
                            r.open_type_optional(|r| r.read_boolean())
                        })?;
                    }
                    1 => {
                        call_identifier = r.element("callIdentifier", |r| {
                            r.open_type_optional(CallIdentifier::decode)
                        })?;
                    }
                    _ => r.read_unknown_extension(index as u32, &mut unknown_extensions)?,
                }
            }
        }

        Ok(Self {
            request_seq_num,
            call_type,
            call_model,
            endpoint_identifier,
            destination_info,
            dest_call_signal_address,
            dest_extra_call_info,
            src_info,
            src_call_signal_address,
            band_width,
            call_reference_value,
            non_standard_data,
            call_services,
            conference_id,
            active_mc,
            answer_call,
            can_map_alias,
            call_identifier,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        if let Some(v) = &self.can_map_alias {
            ext.known(0, PerWriter::encode_to_bytes(|w| w.write_boolean(*v))?);
        }
        if let Some(v) = &self.call_identifier {
            ext.known(1, PerWriter::encode_to_bytes(|w| v.encode(w))?);
        }
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(
            true,
            !ext.is_empty(),
            &[
                self.call_model.is_some(),
                self.destination_info.is_some(),
                self.dest_call_signal_address.is_some(),
                self.dest_extra_call_info.is_some(),
                self.src_call_signal_address.is_some(),
                self.non_standard_data.is_some(),
                self.call_services.is_some(),
            ],
        )?;
        write_request_seq_num(w, self.request_seq_num)?;
        self.call_type.encode(w)?;
        if let Some(v) = &self.call_model {
            v.encode(w)?;
        }
        write_endpoint_identifier(w, &self.endpoint_identifier)?;
        if let Some(v) = &self.destination_info {
            w.write_sequence_of(v, |w, a| a.encode(w))?;
        }
        if let Some(v) = &self.dest_call_signal_address {
            v.encode(w)?;
        }
        if let Some(v) = &self.dest_extra_call_info {
            w.write_sequence_of(v, |w, a| a.encode(w))?;
        }
        w.write_sequence_of(&self.src_info, |w, a| a.encode(w))?;
        if let Some(v) = &self.src_call_signal_address {
            v.encode(w)?;
        }
        write_bandwidth(w, self.band_width)?;
        write_call_reference_value(w, self.call_reference_value)?;
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        if let Some(v) = &self.call_services {
            v.encode(w)?;
        }
        write_conference_identifier(w, &self.conference_id)?;
        w.write_boolean(self.active_mc)?;
        w.write_boolean(self.answer_call)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdmissionConfirm {
    pub request_seq_num: RequestSeqNum,
    pub band_width: BandWidth,
    pub call_model: CallModel,
    pub dest_call_signal_address: TransportAddress,
    pub irr_frequency: Option<u16>,
    pub non_standard_data: Option<NonStandardParameter>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl AdmissionConfirm {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 2)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let band_width = r.element("bandWidth", read_bandwidth)?;
        let call_model = r.element("callModel", CallModel::decode)?;
        let dest_call_signal_address =
            r.element("destCallSignalAddress", TransportAddress::decode)?;
        let irr_frequency = r.optional(opt.get(0), |r| {
            r.element("irrFrequency", |r| {
                Ok(r.read_constrained_uint(1, 65535)? as u16)
            })
        })?;
        let non_standard_data = r.optional(opt.get(1), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            band_width,
            call_model,
            dest_call_signal_address,
            irr_frequency,
            non_standard_data,
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
            &[self.irr_frequency.is_some(), self.non_standard_data.is_some()],
        )?;
        write_request_seq_num(w, self.request_seq_num)?;
        write_bandwidth(w, self.band_width)?;
        self.call_model.encode(w)?;
        self.dest_call_signal_address.encode(w)?;
        if let Some(v) = &self.irr_frequency {
            w.write_constrained_uint(u64::from(*v), 1, 65535)?;
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

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdmissionReject {
    pub request_seq_num: RequestSeqNum,
    pub reject_reason: AdmissionRejectReason,
    pub non_standard_data: Option<NonStandardParameter>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl AdmissionReject {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let reject_reason = r.element("rejectReason", AdmissionRejectReason::decode)?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            reject_reason,
            non_standard_data,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.non_standard_data.is_some()])?;
        write_request_seq_num(w, self.request_seq_num)?;
        self.reject_reason.encode(w)?;
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
pub struct BandwidthRequest {
    pub request_seq_num: RequestSeqNum,
    pub endpoint_identifier: EndpointIdentifier,
    pub conference_id: ConferenceIdentifier,
    pub call_reference_value: CallReferenceValue,
    pub call_type: Option<CallType>,
    pub band_width: BandWidth,
    pub non_standard_data: Option<NonStandardParameter>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl BandwidthRequest {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 2)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let endpoint_identifier = r.element("endpointIdentifier", read_endpoint_identifier)?;
        let conference_id = r.element("conferenceID", read_conference_identifier)?;
        let call_reference_value = r.element("callReferenceValue", read_call_reference_value)?;
        let call_type = r.optional(opt.get(0), |r| r.element("callType", CallType::decode))?;
        let band_width = r.element("bandWidth", read_bandwidth)?;
        let non_standard_data = r.optional(opt.get(1), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            endpoint_identifier,
            conference_id,
            call_reference_value,
            call_type,
            band_width,
            non_standard_data,
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
            &[self.call_type.is_some(), self.non_standard_data.is_some()],
        )?;
        write_request_seq_num(w, self.request_seq_num)?;
        write_endpoint_identifier(w, &self.endpoint_identifier)?;
        write_conference_identifier(w, &self.conference_id)?;
        write_call_reference_value(w, self.call_reference_value)?;
        if let Some(v) = &self.call_type {
            v.encode(w)?;
        }
        write_bandwidth(w, self.band_width)?;
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
pub struct BandwidthConfirm {
    pub request_seq_num: RequestSeqNum,
    pub band_width: BandWidth,
    pub non_standard_data: Option<NonStandardParameter>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl BandwidthConfirm {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let band_width = r.element("bandWidth", read_bandwidth)?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            band_width,
            non_standard_data,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.non_standard_data.is_some()])?;
        write_request_seq_num(w, self.request_seq_num)?;
        write_bandwidth(w, self.band_width)?;
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
pub struct BandwidthReject {
    pub request_seq_num: RequestSeqNum,
    pub reject_reason: BandRejectReason,
    pub allowed_band_width: BandWidth,
    pub non_standard_data: Option<NonStandardParameter>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl BandwidthReject {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let reject_reason = r.element("rejectReason", BandRejectReason::decode)?;
        let allowed_band_width = r.element("allowedBandWidth", read_bandwidth)?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            reject_reason,
            allowed_band_width,
            non_standard_data,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.non_standard_data.is_some()])?;
        write_request_seq_num(w, self.request_seq_num)?;
        self.reject_reason.encode(w)?;
        write_bandwidth(w, self.allowed_band_width)?;
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
pub struct DisengageRequest {
    pub request_seq_num: RequestSeqNum,
    pub endpoint_identifier: EndpointIdentifier,
    pub conference_id: ConferenceIdentifier,
    pub call_reference_value: CallReferenceValue,
    pub disengage_reason: DisengageReason,
    pub non_standard_data: Option<NonStandardParameter>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl DisengageRequest {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let endpoint_identifier = r.element("endpointIdentifier", read_endpoint_identifier)?;
        let conference_id = r.element("conferenceID", read_conference_identifier)?;
        let call_reference_value = r.element("callReferenceValue", read_call_reference_value)?;
        let disengage_reason = r.element("disengageReason", DisengageReason::decode)?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            endpoint_identifier,
            conference_id,
            call_reference_value,
            disengage_reason,
            non_standard_data,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.non_standard_data.is_some()])?;
        write_request_seq_num(w, self.request_seq_num)?;
        write_endpoint_identifier(w, &self.endpoint_identifier)?;
        write_conference_identifier(w, &self.conference_id)?;
        write_call_reference_value(w, self.call_reference_value)?;
        self.disengage_reason.encode(w)?;
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
pub struct DisengageConfirm {
    pub request_seq_num: RequestSeqNum,
    pub non_standard_data: Option<NonStandardParameter>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl DisengageConfirm {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            non_standard_data,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.non_standard_data.is_some()])?;
        write_request_seq_num(w, self.request_seq_num)?;
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
pub struct DisengageReject {
    pub request_seq_num: RequestSeqNum,
    pub reject_reason: DisengageRejectReason,
    pub non_standard_data: Option<NonStandardParameter>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl DisengageReject {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let reject_reason = r.element("rejectReason", DisengageRejectReason::decode)?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            reject_reason,
            non_standard_data,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.non_standard_data.is_some()])?;
        write_request_seq_num(w, self.request_seq_num)?;
        self.reject_reason.encode(w)?;
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
pub struct LocationRequest {
    pub request_seq_num: RequestSeqNum,
    pub endpoint_identifier: Option<EndpointIdentifier>,
    pub destination_info: Vec<AliasAddress>,
    pub non_standard_data: Option<NonStandardParameter>,
    pub reply_address: TransportAddress,
    pub unknown_extensions: Vec<RawExtension>,
}

impl LocationRequest {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 2)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let endpoint_identifier = r.optional(opt.get(0), |r| {
            r.element("endpointIdentifier", read_endpoint_identifier)
        })?;
        let destination_info = r.element("destinationInfo", |r| {
            r.read_sequence_of("destinationInfo", AliasAddress::decode)
        })?;
        let non_standard_data = r.optional(opt.get(1), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let reply_address = r.element("replyAddress", TransportAddress::decode)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            endpoint_identifier,
            destination_info,
            non_standard_data,
            reply_address,
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
                self.endpoint_identifier.is_some(),
                self.non_standard_data.is_some(),
            ],
        )?;
        write_request_seq_num(w, self.request_seq_num)?;
        if let Some(v) = &self.endpoint_identifier {
            write_endpoint_identifier(w, v)?;
        }
        w.write_sequence_of(&self.destination_info, |w, a| a.encode(w))?;
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        self.reply_address.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationConfirm {
    pub request_seq_num: RequestSeqNum,
    pub call_signal_address: TransportAddress,
    pub ras_address: TransportAddress,
    pub non_standard_data: Option<NonStandardParameter>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl LocationConfirm {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let call_signal_address = r.element("callSignalAddress", TransportAddress::decode)?;
        let ras_address = r.element("rasAddress", TransportAddress::decode)?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            call_signal_address,
            ras_address,
            non_standard_data,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.non_standard_data.is_some()])?;
        write_request_seq_num(w, self.request_seq_num)?;
        self.call_signal_address.encode(w)?;
        self.ras_address.encode(w)?;
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
pub struct LocationReject {
    pub request_seq_num: RequestSeqNum,
    pub reject_reason: LocationRejectReason,
    pub non_standard_data: Option<NonStandardParameter>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl LocationReject {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let reject_reason = r.element("rejectReason", LocationRejectReason::decode)?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            reject_reason,
            non_standard_data,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.non_standard_data.is_some()])?;
        write_request_seq_num(w, self.request_seq_num)?;
        self.reject_reason.encode(w)?;
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
pub struct InfoRequest {
    pub request_seq_num: RequestSeqNum,
    pub call_reference_value: CallReferenceValue,
    pub non_standard_data: Option<NonStandardParameter>,
    pub reply_address: Option<TransportAddress>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl InfoRequest {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 2)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let call_reference_value = r.element("callReferenceValue", read_call_reference_value)?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let reply_address = r.optional(opt.get(1), |r| {
            r.element("replyAddress", TransportAddress::decode)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            call_reference_value,
            non_standard_data,
            reply_address,
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
                self.non_standard_data.is_some(),
                self.reply_address.is_some(),
            ],
        )?;
        write_request_seq_num(w, self.request_seq_num)?;
        write_call_reference_value(w, self.call_reference_value)?;
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        if let Some(v) = &self.reply_address {
            v.encode(w)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

/// Per-call state reported inside an IRR.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IrrPerCallInfo {
    pub non_standard_data: Option<NonStandardParameter>,
    pub call_reference_value: CallReferenceValue,
    pub conference_id: ConferenceIdentifier,
    pub originator: Option<bool>,
    pub audio: Option<Vec<RtpSession>>,
    pub video: Option<Vec<RtpSession>>,
    pub data: Option<Vec<TransportChannelInfo>>,
    pub h245: TransportChannelInfo,
    pub call_signaling: TransportChannelInfo,
    pub call_type: CallType,
    pub band_width: BandWidth,
    pub call_model: CallModel,
    pub unknown_extensions: Vec<RawExtension>,
}

impl IrrPerCallInfo {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 5)?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let call_reference_value = r.element("callReferenceValue", read_call_reference_value)?;
        let conference_id = r.element("conferenceID", read_conference_identifier)?;
        let originator = r.optional(opt.get(1), |r| {
            r.element("originator", |r| r.read_boolean())
        })?;
        let audio = r.optional(opt.get(2), |r| {
            r.element("audio", |r| r.read_sequence_of("audio", RtpSession::decode))
        })?;
        let video = r.optional(opt.get(3), |r| {
            r.element("video", |r| r.read_sequence_of("video", RtpSession::decode))
        })?;
        let data = r.optional(opt.get(4), |r| {
            r.element("data", |r| {
                r.read_sequence_of("data", TransportChannelInfo::decode)
            })
        })?;
        let h245 = r.element("h245", TransportChannelInfo::decode)?;
        let call_signaling = r.element("callSignaling", TransportChannelInfo::decode)?;
        let call_type = r.element("callType", CallType::decode)?;
        let band_width = r.element("bandWidth", read_bandwidth)?;
        let call_model = r.element("callModel", CallModel::decode)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            non_standard_data,
            call_reference_value,
            conference_id,
            originator,
            audio,
            video,
            data,
            h245,
            call_signaling,
            call_type,
            band_width,
            call_model,
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
                self.non_standard_data.is_some(),
                self.originator.is_some(),
                self.audio.is_some(),
                self.video.is_some(),
                self.data.is_some(),
            ],
        )?;
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        write_call_reference_value(w, self.call_reference_value)?;
        write_conference_identifier(w, &self.conference_id)?;
        if let Some(v) = &self.originator {
            w.write_boolean(*v)?;
        }
        if let Some(v) = &self.audio {
            w.write_sequence_of(v, |w, s| s.encode(w))?;
        }
        if let Some(v) = &self.video {
            w.write_sequence_of(v, |w, s| s.encode(w))?;
        }
        if let Some(v) = &self.data {
            w.write_sequence_of(v, |w, c| c.encode(w))?;
        }
        self.h245.encode(w)?;
        self.call_signaling.encode(w)?;
        self.call_type.encode(w)?;
        write_bandwidth(w, self.band_width)?;
        self.call_model.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfoRequestResponse {
    pub non_standard_data: Option<NonStandardParameter>,
    pub request_seq_num: RequestSeqNum,
    pub endpoint_type: EndpointType,
    pub endpoint_identifier: EndpointIdentifier,
    pub ras_address: TransportAddress,
    pub call_signal_address: Vec<TransportAddress>,
    pub endpoint_alias: Option<Vec<AliasAddress>>,
    pub per_call_info: Option<Vec<IrrPerCallInfo>>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl InfoRequestResponse {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 3)?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let endpoint_type = r.element("endpointType", EndpointType::decode)?;
        let endpoint_identifier = r.element("endpointIdentifier", read_endpoint_identifier)?;
        let ras_address = r.element("rasAddress", TransportAddress::decode)?;
        let call_signal_address = r.element("callSignalAddress", |r| {
            r.read_sequence_of("callSignalAddress", TransportAddress::decode)
        })?;
        let endpoint_alias = r.optional(opt.get(1), |r| {
            r.element("endpointAlias", |r| {
                r.read_sequence_of("endpointAlias", AliasAddress::decode)
            })
        })?;
        let per_call_info = r.optional(opt.get(2), |r| {
            r.element("perCallInfo", |r| {
                r.read_sequence_of("perCallInfo", IrrPerCallInfo::decode)
            })
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            non_standard_data,
            request_seq_num,
            endpoint_type,
            endpoint_identifier,
            ras_address,
            call_signal_address,
            endpoint_alias,
            per_call_info,
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
                self.non_standard_data.is_some(),
                self.endpoint_alias.is_some(),
                self.per_call_info.is_some(),
            ],
        )?;
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        write_request_seq_num(w, self.request_seq_num)?;
        self.endpoint_type.encode(w)?;
        write_endpoint_identifier(w, &self.endpoint_identifier)?;
        self.ras_address.encode(w)?;
        w.write_sequence_of(&self.call_signal_address, |w, a| a.encode(w))?;
        if let Some(v) = &self.endpoint_alias {
            w.write_sequence_of(v, |w, a| a.encode(w))?;
        }
        if let Some(v) = &self.per_call_info {
            w.write_sequence_of(v, |w, c| c.encode(w))?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NonStandardMessage {
    pub request_seq_num: RequestSeqNum,
    pub non_standard_data: NonStandardParameter,
    pub unknown_extensions: Vec<RawExtension>,
}

impl NonStandardMessage {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let non_standard_data = r.element("nonStandardData", NonStandardParameter::decode)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
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
        write_request_seq_num(w, self.request_seq_num)?;
        self.non_standard_data.encode(w)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownMessageResponse {
    pub request_seq_num: RequestSeqNum,
    pub unknown_extensions: Vec<RawExtension>,
}

impl UnknownMessageResponse {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        write_request_seq_num(w, self.request_seq_num)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

/// The gatekeeper is still working on a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestInProgress {
    pub non_standard_data: Option<NonStandardParameter>,
    pub request_seq_num: RequestSeqNum,
    pub delay: u16,
    pub unknown_extensions: Vec<RawExtension>,
}

impl RequestInProgress {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 1)?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let delay = r.element("delay", |r| Ok(r.read_constrained_uint(1, 65535)? as u16))?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            non_standard_data,
            request_seq_num,
            delay,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[self.non_standard_data.is_some()])?;
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        write_request_seq_num(w, self.request_seq_num)?;
        w.write_constrained_uint(u64::from(self.delay), 1, 65535)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceControlIndication {
    pub request_seq_num: RequestSeqNum,
    pub non_standard_data: Option<NonStandardParameter>,
    pub service_control_sessions: Vec<ServiceControlSession>,
    pub endpoint_identifier: Option<EndpointIdentifier>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl ServiceControlIndication {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 2)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let non_standard_data = r.optional(opt.get(0), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let service_control_sessions = r.element("serviceControlSessions", |r| {
            r.read_sequence_of("serviceControlSessions", ServiceControlSession::decode)
        })?;
        let endpoint_identifier = r.optional(opt.get(1), |r| {
            r.element("endpointIdentifier", read_endpoint_identifier)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            non_standard_data,
            service_control_sessions,
            endpoint_identifier,
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
                self.non_standard_data.is_some(),
                self.endpoint_identifier.is_some(),
            ],
        )?;
        write_request_seq_num(w, self.request_seq_num)?;
        if let Some(v) = &self.non_standard_data {
            v.encode(w)?;
        }
        w.write_sequence_of(&self.service_control_sessions, |w, s| s.encode(w))?;
        if let Some(v) = &self.endpoint_identifier {
            write_endpoint_identifier(w, v)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

null_choice! {
    /// Outcome reported for a service-control session.
    ScrResult { Started, Failed, Stopped, NotAvailable, NeededFeatureNotSupported }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceControlResponse {
    pub request_seq_num: RequestSeqNum,
    pub result: Option<ScrResult>,
    pub non_standard_data: Option<NonStandardParameter>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl ServiceControlResponse {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 2)?;
        let request_seq_num = r.element("requestSeqNum", read_request_seq_num)?;
        let result = r.optional(opt.get(0), |r| r.element("result", ScrResult::decode))?;
        let non_standard_data = r.optional(opt.get(1), |r| {
            r.element("nonStandardData", NonStandardParameter::decode)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            request_seq_num,
            result,
            non_standard_data,
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
            &[self.result.is_some(), self.non_standard_data.is_some()],
        )?;
        write_request_seq_num(w, self.request_seq_num)?;
        if let Some(v) = &self.result {
            v.encode(w)?;
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

/// Top-level RAS PDU. The 25 root alternatives were fixed in version 2;
/// newer message kinds arrive through the extension path, three of which
/// are decoded here and the rest preserved as raw bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RasMessage {
    GatekeeperRequest(GatekeeperRequest),
    GatekeeperConfirm(GatekeeperConfirm),
    GatekeeperReject(GatekeeperReject),
    RegistrationRequest(RegistrationRequest),
    RegistrationConfirm(RegistrationConfirm),
    RegistrationReject(RegistrationReject),
    UnregistrationRequest(UnregistrationRequest),
    UnregistrationConfirm(UnregistrationConfirm),
    UnregistrationReject(UnregistrationReject),
    AdmissionRequest(AdmissionRequest),
    AdmissionConfirm(AdmissionConfirm),
    AdmissionReject(AdmissionReject),
    BandwidthRequest(BandwidthRequest),
    BandwidthConfirm(BandwidthConfirm),
    BandwidthReject(BandwidthReject),
    DisengageRequest(DisengageRequest),
    DisengageConfirm(DisengageConfirm),
    DisengageReject(DisengageReject),
    LocationRequest(LocationRequest),
    LocationConfirm(LocationConfirm),
    LocationReject(LocationReject),
    InfoRequest(InfoRequest),
    InfoRequestResponse(InfoRequestResponse),
    NonStandardMessage(NonStandardMessage),
    UnknownMessageResponse(UnknownMessageResponse),
    // Extension additions.
    RequestInProgress(RequestInProgress),
    ServiceControlIndication(ServiceControlIndication),
    ServiceControlResponse(ServiceControlResponse),
    AdmissionConfirmSequence(Vec<AdmissionConfirm>),
    Unknown(RawExtension),
}

impl RasMessage {
    const NUM_ROOT: u32 = 25;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::GatekeeperRequest(
                r.element("gatekeeperRequest", GatekeeperRequest::decode)?,
            )),
            ChoiceTag::Root(1) => Ok(Self::GatekeeperConfirm(
                r.element("gatekeeperConfirm", GatekeeperConfirm::decode)?,
            )),
            ChoiceTag::Root(2) => Ok(Self::GatekeeperReject(
                r.element("gatekeeperReject", GatekeeperReject::decode)?,
            )),
            ChoiceTag::Root(3) => Ok(Self::RegistrationRequest(
                r.element("registrationRequest", RegistrationRequest::decode)?,
            )),
            ChoiceTag::Root(4) => Ok(Self::RegistrationConfirm(
                r.element("registrationConfirm", RegistrationConfirm::decode)?,
            )),
            ChoiceTag::Root(5) => Ok(Self::RegistrationReject(
                r.element("registrationReject", RegistrationReject::decode)?,
            )),
            ChoiceTag::Root(6) => Ok(Self::UnregistrationRequest(
                r.element("unregistrationRequest", UnregistrationRequest::decode)?,
            )),
            ChoiceTag::Root(7) => Ok(Self::UnregistrationConfirm(
                r.element("unregistrationConfirm", UnregistrationConfirm::decode)?,
            )),
            ChoiceTag::Root(8) => Ok(Self::UnregistrationReject(
                r.element("unregistrationReject", UnregistrationReject::decode)?,
            )),
            ChoiceTag::Root(9) => Ok(Self::AdmissionRequest(
                r.element("admissionRequest", AdmissionRequest::decode)?,
            )),
            ChoiceTag::Root(10) => Ok(Self::AdmissionConfirm(
                r.element("admissionConfirm", AdmissionConfirm::decode)?,
            )),
            ChoiceTag::Root(11) => Ok(Self::AdmissionReject(
                r.element("admissionReject", AdmissionReject::decode)?,
            )),
            ChoiceTag::Root(12) => Ok(Self::BandwidthRequest(
                r.element("bandwidthRequest", BandwidthRequest::decode)?,
            )),
            ChoiceTag::Root(13) => Ok(Self::BandwidthConfirm(
                r.element("bandwidthConfirm", BandwidthConfirm::decode)?,
            )),
            ChoiceTag::Root(14) => Ok(Self::BandwidthReject(
                r.element("bandwidthReject", BandwidthReject::decode)?,
            )),
            ChoiceTag::Root(15) => Ok(Self::DisengageRequest(
                r.element("disengageRequest", DisengageRequest::decode)?,
            )),
            ChoiceTag::Root(16) => Ok(Self::DisengageConfirm(
                r.element("disengageConfirm", DisengageConfirm::decode)?,
            )),
            ChoiceTag::Root(17) => Ok(Self::DisengageReject(
                r.element("disengageReject", DisengageReject::decode)?,
            )),
            ChoiceTag::Root(18) => Ok(Self::LocationRequest(
                r.element("locationRequest", LocationRequest::decode)?,
            )),
            ChoiceTag::Root(19) => Ok(Self::LocationConfirm(
                r.element("locationConfirm", LocationConfirm::decode)?,
            )),
            ChoiceTag::Root(20) => Ok(Self::LocationReject(
                r.element("locationReject", LocationReject::decode)?,
            )),
            ChoiceTag::Root(21) => Ok(Self::InfoRequest(
                r.element("infoRequest", InfoRequest::decode)?,
            )),
            ChoiceTag::Root(22) => Ok(Self::InfoRequestResponse(
                r.element("infoRequestResponse", InfoRequestResponse::decode)?,
            )),
            ChoiceTag::Root(23) => Ok(Self::NonStandardMessage(
                r.element("nonStandardMessage", NonStandardMessage::decode)?,
            )),
            ChoiceTag::Root(24) => Ok(Self::UnknownMessageResponse(
                r.element("unknownMessageResponse", UnknownMessageResponse::decode)?,
            )),
            ChoiceTag::Root(_) => Err(r.error(ErrorKind::InvalidChoiceIndex)),
            ChoiceTag::Extension(0) => Ok(Self::RequestInProgress(
                r.element("requestInProgress", |r| {
                    r.open_type(RequestInProgress::decode)
                })?,
            )),
            ChoiceTag::Extension(5) => Ok(Self::ServiceControlIndication(
                r.element("serviceControlIndication", |r| {
                    r.open_type(ServiceControlIndication::decode)
                })?,
            )),
            ChoiceTag::Extension(6) => Ok(Self::ServiceControlResponse(
                r.element("serviceControlResponse", |r| {
                    r.open_type(ServiceControlResponse::decode)
                })?,
            )),
            ChoiceTag::Extension(7) => Ok(Self::AdmissionConfirmSequence(
                r.element("admissionConfirmSequence", |r| {
                    r.open_type(|r| {
                        r.read_sequence_of("admissionConfirmSequence", AdmissionConfirm::decode)
                    })
                })?,
            )),
            ChoiceTag::Extension(index) => {
                let data = r.skip_open_type()?;
                Ok(Self::Unknown(RawExtension { index, data }))
            }
        }
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        match self {
            Self::GatekeeperRequest(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::GatekeeperConfirm(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::GatekeeperReject(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::RegistrationRequest(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::RegistrationConfirm(v) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::RegistrationReject(v) => {
                w.write_choice_root(5, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::UnregistrationRequest(v) => {
                w.write_choice_root(6, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::UnregistrationConfirm(v) => {
                w.write_choice_root(7, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::UnregistrationReject(v) => {
                w.write_choice_root(8, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::AdmissionRequest(v) => {
                w.write_choice_root(9, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::AdmissionConfirm(v) => {
                w.write_choice_root(10, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::AdmissionReject(v) => {
                w.write_choice_root(11, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::BandwidthRequest(v) => {
                w.write_choice_root(12, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::BandwidthConfirm(v) => {
                w.write_choice_root(13, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::BandwidthReject(v) => {
                w.write_choice_root(14, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::DisengageRequest(v) => {
                w.write_choice_root(15, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::DisengageConfirm(v) => {
                w.write_choice_root(16, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::DisengageReject(v) => {
                w.write_choice_root(17, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::LocationRequest(v) => {
                w.write_choice_root(18, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::LocationConfirm(v) => {
                w.write_choice_root(19, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::LocationReject(v) => {
                w.write_choice_root(20, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::InfoRequest(v) => {
                w.write_choice_root(21, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::InfoRequestResponse(v) => {
                w.write_choice_root(22, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::NonStandardMessage(v) => {
                w.write_choice_root(23, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::UnknownMessageResponse(v) => {
                w.write_choice_root(24, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::RequestInProgress(v) => {
                w.write_choice_extension(0)?;
                let payload = PerWriter::encode_to_bytes(|w| v.encode(w))?;
                w.write_open_type(&payload)
            }
            Self::ServiceControlIndication(v) => {
                w.write_choice_extension(5)?;
                let payload = PerWriter::encode_to_bytes(|w| v.encode(w))?;
                w.write_open_type(&payload)
            }
            Self::ServiceControlResponse(v) => {
                w.write_choice_extension(6)?;
                let payload = PerWriter::encode_to_bytes(|w| v.encode(w))?;
                w.write_open_type(&payload)
            }
            Self::AdmissionConfirmSequence(v) => {
                w.write_choice_extension(7)?;
                let payload =
                    PerWriter::encode_to_bytes(|w| w.write_sequence_of(v, |w, m| m.encode(w)))?;
                w.write_open_type(&payload)
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
    use crate::h225::types::{EndpointType, IpAddress, TerminalInfo};
    use crate::per::{CodecOption, CodecOptions, ObjectId};

    fn protocol_id() -> ObjectId {
        ObjectId::new(vec![0, 0, 8, 2250, 0, 4])
    }

    fn ras_ip(ip: [u8; 4], port: u16) -> TransportAddress {
        TransportAddress::IpAddress(IpAddress {
            ip: ip.to_vec(),
            port,
        })
    }

    fn minimal_grq() -> GatekeeperRequest {
        GatekeeperRequest {
            request_seq_num: 1,
            protocol_identifier: protocol_id(),
            non_standard_data: None,
            ras_address: ras_ip([192, 168, 1, 1], 1719),
            endpoint_type: EndpointType {
                terminal: Some(TerminalInfo::default()),
                undefined_node: false,
                ..EndpointType::default()
            },
            gatekeeper_identifier: None,
            call_services: None,
            endpoint_alias: None,
            unknown_extensions: Vec::new(),
        }
    }

    #[test]
    fn minimal_gatekeeper_request_round_trip() {
        let msg = RasMessage::GatekeeperRequest(minimal_grq());
        let encoded = crate::encode_ras_message(&msg).unwrap();

        // gatekeeperRequest is root alternative 1: extension bit zero, a
        // zero 5-bit index, then the GRQ's own header bits.
        assert_eq!(0x00, encoded[0]);

        let (decoded, consumed) = crate::decode_ras_message(&encoded).unwrap();
        assert_eq!(consumed, encoded.len());
        match &decoded {
            RasMessage::GatekeeperRequest(grq) => {
                assert_eq!(1, grq.request_seq_num);
                assert_eq!(vec![0, 0, 8, 2250, 0, 4], grq.protocol_identifier.arcs);
                assert!(grq.non_standard_data.is_none());
            }
            other => panic!("wrong alternative: {:?}", other),
        }
        assert_eq!(msg, decoded);
    }

    #[test]
    fn unknown_ras_extension_preserves_bytes() {
        // Extension bit, small index 9, aligned container of three octets.
        let data = [0x89, 0x03, 0xAA, 0xBB, 0xCC];

        let (decoded, consumed) = crate::decode_ras_message(&data).unwrap();
        assert_eq!(5, consumed);
        assert_eq!(
            RasMessage::Unknown(RawExtension {
                index: 9,
                data: vec![0xAA, 0xBB, 0xCC],
            }),
            decoded
        );

        // Re-encoding restores the identical bytes.
        assert_eq!(data.to_vec(), crate::encode_ras_message(&decoded).unwrap());
    }

    #[test]
    fn unknown_ras_extension_discarded_when_configured() {
        let data = [0x89, 0x03, 0xAA, 0xBB, 0xCC];
        let mut options = CodecOptions::default();
        options.flags.remove(CodecOption::PRESERVE_UNKNOWN_EXTENSIONS);

        let (decoded, _) = crate::decode_ras_message_with(&data, options, None).unwrap();
        assert_eq!(
            RasMessage::Unknown(RawExtension {
                index: 9,
                data: Vec::new(),
            }),
            decoded
        );
    }

    #[test]
    fn registration_request_with_known_additions() {
        let rrq = RegistrationRequest {
            request_seq_num: 2,
            protocol_identifier: protocol_id(),
            non_standard_data: None,
            discovery_complete: true,
            call_signal_address: vec![ras_ip([10, 0, 0, 9], 1720)],
            ras_address: vec![ras_ip([10, 0, 0, 9], 1719)],
            terminal_type: EndpointType::default(),
            terminal_alias: Some(vec![AliasAddress::DialedDigits("5551000".into())]),
            gatekeeper_identifier: Some("GK".into()),
            endpoint_vendor: VendorIdentifier {
                vendor: H221NonStandard {
                    t35_country_code: 0xB5,
                    t35_extension: 0,
                    manufacturer_code: 0x0042,
                },
                product_id: None,
                version_id: None,
                unknown_extensions: Vec::new(),
            },
            time_to_live: Some(300),
            tokens: None,
            crypto_tokens: None,
            keep_alive: Some(false),
            endpoint_identifier: Some("ep-17".into()),
            will_supply_uuies: None,
            maintain_connection: Some(true),
            unknown_extensions: Vec::new(),
        };

        let msg = RasMessage::RegistrationRequest(rrq);
        let encoded = crate::encode_ras_message(&msg).unwrap();
        let (decoded, _) = crate::decode_ras_message(&encoded).unwrap();
        assert_eq!(msg, decoded);
    }

    #[test]
    fn sequence_extensions_survive_round_trip_untouched() {
        // A later-version addition this schema does not know, parked at a
        // high bitmap position, must re-encode byte-identically.
        let mut grq = minimal_grq();
        grq.unknown_extensions.push(RawExtension {
            index: 12,
            data: vec![0xDE, 0xAD, 0xBE],
        });

        let msg = RasMessage::GatekeeperRequest(grq);
        let encoded = crate::encode_ras_message(&msg).unwrap();
        let (decoded, _) = crate::decode_ras_message(&encoded).unwrap();
        assert_eq!(msg, decoded);
    }

    #[test]
    fn choice_extension_alternatives_keep_their_index() {
        let scr = RasMessage::ServiceControlResponse(ServiceControlResponse {
            request_seq_num: 7,
            result: Some(ScrResult::Started),
            non_standard_data: None,
            unknown_extensions: Vec::new(),
        });
        let encoded = crate::encode_ras_message(&scr).unwrap();
        let (decoded, _) = crate::decode_ras_message(&encoded).unwrap();
        assert_eq!(scr, decoded);

        let rip = RasMessage::RequestInProgress(RequestInProgress {
            non_standard_data: None,
            request_seq_num: 8,
            delay: 500,
            unknown_extensions: Vec::new(),
        });
        let encoded = crate::encode_ras_message(&rip).unwrap();
        let (decoded, _) = crate::decode_ras_message(&encoded).unwrap();
        assert_eq!(rip, decoded);
    }

    #[test]
    fn admission_exchange_round_trip() {
        let arq = RasMessage::AdmissionRequest(AdmissionRequest {
            request_seq_num: 11,
            call_type: CallType::PointToPoint,
            call_model: Some(CallModel::Direct),
            endpoint_identifier: "ep-1".into(),
            destination_info: Some(vec![AliasAddress::H323Id("callee".into())]),
            dest_call_signal_address: None,
            dest_extra_call_info: None,
            src_info: vec![AliasAddress::DialedDigits("5551000".into())],
            src_call_signal_address: Some(ras_ip([10, 0, 0, 9], 1720)),
            band_width: 640,
            call_reference_value: 17,
            non_standard_data: None,
            call_services: None,
            conference_id: vec![9; 16],
            active_mc: false,
            answer_call: false,
            can_map_alias: Some(true),
            call_identifier: Some(CallIdentifier::new(vec![3; 16])),
            unknown_extensions: Vec::new(),
        });
        let encoded = crate::encode_ras_message(&arq).unwrap();
        let (decoded, _) = crate::decode_ras_message(&encoded).unwrap();
        assert_eq!(arq, decoded);

        let acf = AdmissionConfirm {
            request_seq_num: 11,
            band_width: 640,
            call_model: CallModel::GatekeeperRouted,
            dest_call_signal_address: ras_ip([10, 0, 0, 20], 1720),
            irr_frequency: Some(120),
            non_standard_data: None,
            unknown_extensions: Vec::new(),
        };
        let seq = RasMessage::AdmissionConfirmSequence(vec![acf.clone(), acf]);
        let encoded = crate::encode_ras_message(&seq).unwrap();
        let (decoded, _) = crate::decode_ras_message(&encoded).unwrap();
        assert_eq!(seq, decoded);
    }

    #[test]
    fn reject_reason_with_payload_round_trip() {
        let rrj = RasMessage::RegistrationReject(RegistrationReject {
            request_seq_num: 3,
            protocol_identifier: protocol_id(),
            non_standard_data: None,
            reject_reason: RegistrationRejectReason::DuplicateAlias(vec![
                AliasAddress::DialedDigits("5551000".into()),
            ]),
            gatekeeper_identifier: None,
            alt_gk_info: Some(AltGkInfo {
                alternate_gatekeeper: vec![AlternateGk {
                    ras_address: ras_ip([10, 0, 0, 30], 1719),
                    gatekeeper_identifier: Some("GK-2".into()),
                    need_to_register: true,
                    priority: 1,
                    unknown_extensions: Vec::new(),
                }],
                alt_gk_is_permanent: false,
                unknown_extensions: Vec::new(),
            }),
            unknown_extensions: Vec::new(),
        });
        let encoded = crate::encode_ras_message(&rrj).unwrap();
        let (decoded, _) = crate::decode_ras_message(&encoded).unwrap();
        assert_eq!(rrj, decoded);
    }

    #[test]
    fn info_request_response_with_per_call_state() {
        let irr = RasMessage::InfoRequestResponse(InfoRequestResponse {
            non_standard_data: None,
            request_seq_num: 21,
            endpoint_type: EndpointType::default(),
            endpoint_identifier: "ep-9".into(),
            ras_address: ras_ip([172, 16, 0, 2], 1719),
            call_signal_address: vec![ras_ip([172, 16, 0, 2], 1720)],
            endpoint_alias: None,
            per_call_info: Some(vec![IrrPerCallInfo {
                non_standard_data: None,
                call_reference_value: 5,
                conference_id: vec![1; 16],
                originator: Some(true),
                audio: Some(vec![RtpSession {
                    rtp_address: TransportChannelInfo {
                        send_address: Some(ras_ip([172, 16, 0, 2], 7000)),
                        recv_address: None,
                        unknown_extensions: Vec::new(),
                    },
                    rtcp_address: TransportChannelInfo::default(),
                    cname: "ep-9".into(),
                    ssrc: 0x1234,
                    session_id: 1,
                    associated_session_ids: vec![],
                    unknown_extensions: Vec::new(),
                }]),
                video: None,
                data: None,
                h245: TransportChannelInfo::default(),
                call_signaling: TransportChannelInfo::default(),
                call_type: CallType::PointToPoint,
                band_width: 640,
                call_model: CallModel::Direct,
                unknown_extensions: Vec::new(),
            }]),
            unknown_extensions: Vec::new(),
        });
        let encoded = crate::encode_ras_message(&irr).unwrap();
        let (decoded, _) = crate::decode_ras_message(&encoded).unwrap();
        assert_eq!(irr, decoded);
    }
}
