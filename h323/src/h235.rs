//! H.235 security structures as they ride inside H.225 and H.245 messages:
//! clear tokens, the crypto-token carriers, and their hashed, encrypted and
//! signed payload records. Only the wire structures live here; the
//! cryptography itself is the caller's business.

use crate::error::{ErrorKind, Result};
use crate::h225::types::AliasAddress;
use crate::per::{
    BitString, ChoiceTag, ExtensionAdditions, ObjectId, PerReader, PerWriter, RawExtension,
    SizeConstraint,
};

/// Seconds since 1970, capped to 32 bits.
pub type TimeStamp = u32;
/// BMPString, 1..128 characters.
pub type Password = String;
pub type Identifier = String;

fn read_time_stamp(r: &mut PerReader<'_, '_>) -> Result<TimeStamp> {
    Ok(r.read_constrained_uint(1, u64::from(u32::MAX))? as u32)
}

fn write_time_stamp(w: &mut PerWriter, value: TimeStamp) -> Result<()> {
    w.write_constrained_uint(u64::from(value), 1, u64::from(u32::MAX))
}

fn read_bmp_128(r: &mut PerReader<'_, '_>) -> Result<String> {
    r.set_size_constraint(SizeConstraint::range(1, 128));
    r.read_bmp_string()
}

fn write_bmp_128(w: &mut PerWriter, value: &str) -> Result<()> {
    w.set_size_constraint(SizeConstraint::range(1, 128));
    w.write_bmp_string(value)
}

/// H.235's own non-standard carrier; unlike the H.225 variant it is always
/// identified by object identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct H235NonStandardParameter {
    pub non_standard_identifier: ObjectId,
    pub data: Vec<u8>,
}

impl H235NonStandardParameter {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            non_standard_identifier: r
                .element("nonStandardIdentifier", |r| r.read_object_id())?,
            data: r.element("data", |r| r.read_octet_string())?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_object_id(&self.non_standard_identifier)?;
        w.write_octet_string(&self.data)
    }
}

/// Diffie-Hellman exchange halves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DhSet {
    pub halfkey: BitString,
    pub mod_size: BitString,
    pub generator: BitString,
    pub unknown_extensions: Vec<RawExtension>,
}

impl DhSet {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        r.set_size_constraint(SizeConstraint::range(0, 2048));
        let halfkey = r.element("halfkey", |r| r.read_bit_string())?;
        r.set_size_constraint(SizeConstraint::range(0, 2048));
        let mod_size = r.element("modSize", |r| r.read_bit_string())?;
        r.set_size_constraint(SizeConstraint::range(0, 2048));
        let generator = r.element("generator", |r| r.read_bit_string())?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            halfkey,
            mod_size,
            generator,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.set_size_constraint(SizeConstraint::range(0, 2048));
        w.write_bit_string(&self.halfkey)?;
        w.set_size_constraint(SizeConstraint::range(0, 2048));
        w.write_bit_string(&self.mod_size)?;
        w.set_size_constraint(SizeConstraint::range(0, 2048));
        w.write_bit_string(&self.generator)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedCertificate {
    pub certificate_type: ObjectId,
    pub certificate: Vec<u8>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl TypedCertificate {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, _) = r.read_sequence_header(true, 0)?;
        let certificate_type = r.element("type", |r| r.read_object_id())?;
        let certificate = r.element("certificate", |r| r.read_octet_string())?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            certificate_type,
            certificate,
            unknown_extensions,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        let mut ext = ExtensionAdditions::new();
        for raw in &self.unknown_extensions {
            ext.raw(raw);
        }
        w.write_sequence_header(true, !ext.is_empty(), &[])?;
        w.write_object_id(&self.certificate_type)?;
        w.write_octet_string(&self.certificate)?;
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthenticationMechanism {
    DhExch,
    PwdSymEnc,
    PwdHash,
    CertSign,
    Ipsec,
    Tls,
    NonStandard(H235NonStandardParameter),
    Unknown(RawExtension),
}

impl AuthenticationMechanism {
    const NUM_ROOT: u32 = 7;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => {
                r.read_null()?;
                Ok(Self::DhExch)
            }
            ChoiceTag::Root(1) => {
                r.read_null()?;
                Ok(Self::PwdSymEnc)
            }
            ChoiceTag::Root(2) => {
                r.read_null()?;
                Ok(Self::PwdHash)
            }
            ChoiceTag::Root(3) => {
                r.read_null()?;
                Ok(Self::CertSign)
            }
            ChoiceTag::Root(4) => {
                r.read_null()?;
                Ok(Self::Ipsec)
            }
            ChoiceTag::Root(5) => {
                r.read_null()?;
                Ok(Self::Tls)
            }
            ChoiceTag::Root(6) => Ok(Self::NonStandard(
                r.element("nonStandard", H235NonStandardParameter::decode)?,
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
            Self::DhExch => 0,
            Self::PwdSymEnc => 1,
            Self::PwdHash => 2,
            Self::CertSign => 3,
            Self::Ipsec => 4,
            Self::Tls => 5,
            Self::NonStandard(v) => {
                w.write_choice_root(6, Self::NUM_ROOT, true)?;
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

/// Algorithm parameters shared by the hashed/encrypted/signed carriers.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Params {
    pub ran_int: Option<i64>,
    pub iv8: Option<Vec<u8>>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl Params {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 2)?;
        let ran_int = r.optional(opt.get(0), |r| {
            r.element("ranInt", |r| r.read_unconstrained_int())
        })?;
        let iv8 = r.optional(opt.get(1), |r| {
            r.element("iv8", |r| {
                r.set_size_constraint(SizeConstraint::fixed(8));
                r.read_octet_string()
            })
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            ran_int,
            iv8,
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
            &[self.ran_int.is_some(), self.iv8.is_some()],
        )?;
        if let Some(v) = &self.ran_int {
            w.write_unconstrained_int(*v)?;
        }
        if let Some(v) = &self.iv8 {
            w.set_size_constraint(SizeConstraint::fixed(8));
            w.write_octet_string(v)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedToken {
    pub algorithm_oid: ObjectId,
    pub param_s: Params,
    pub encrypted_data: Vec<u8>,
}

impl EncryptedToken {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            algorithm_oid: r.element("algorithmOID", |r| r.read_object_id())?,
            param_s: r.element("paramS", Params::decode)?,
            encrypted_data: r.element("encryptedData", |r| r.read_octet_string())?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_object_id(&self.algorithm_oid)?;
        self.param_s.encode(w)?;
        w.write_octet_string(&self.encrypted_data)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashedToken {
    pub algorithm_oid: ObjectId,
    pub param_s: Params,
    pub hash: BitString,
}

impl HashedToken {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            algorithm_oid: r.element("algorithmOID", |r| r.read_object_id())?,
            param_s: r.element("paramS", Params::decode)?,
            hash: r.element("hash", |r| r.read_bit_string())?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_object_id(&self.algorithm_oid)?;
        self.param_s.encode(w)?;
        w.write_bit_string(&self.hash)
    }
}

/// A signature over an independently encoded value. The signed bytes are
/// kept opaque, exactly as they appeared in the open-type container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedToken {
    pub to_be_signed: Vec<u8>,
    pub algorithm_oid: ObjectId,
    pub param_s: Params,
    pub signature: BitString,
}

impl SignedToken {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let to_be_signed = r.element("toBeSigned", |r| r.read_open_type_bytes())?;
        Ok(Self {
            to_be_signed,
            algorithm_oid: r.element("algorithmOID", |r| r.read_object_id())?,
            param_s: r.element("paramS", Params::decode)?,
            signature: r.element("signature", |r| r.read_bit_string())?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_open_type(&self.to_be_signed)?;
        w.write_object_id(&self.algorithm_oid)?;
        self.param_s.encode(w)?;
        w.write_bit_string(&self.signature)
    }
}

/// Plaintext token: everything either side may need to authenticate, all
/// fields optional beyond the identifying OID.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClearToken {
    pub token_oid: ObjectId,
    pub time_stamp: Option<TimeStamp>,
    pub password: Option<Password>,
    pub dhkey: Option<DhSet>,
    pub challenge: Option<Vec<u8>>,
    pub random: Option<i64>,
    pub certificate: Option<TypedCertificate>,
    pub general_id: Option<Identifier>,
    pub non_standard: Option<H235NonStandardParameter>,
    pub unknown_extensions: Vec<RawExtension>,
}

impl ClearToken {
    pub fn new(token_oid: ObjectId) -> Self {
        Self {
            token_oid,
            time_stamp: None,
            password: None,
            dhkey: None,
            challenge: None,
            random: None,
            certificate: None,
            general_id: None,
            non_standard: None,
            unknown_extensions: Vec::new(),
        }
    }

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        let (ext, opt) = r.read_sequence_header(true, 8)?;
        let token_oid = r.element("tokenOID", |r| r.read_object_id())?;
        let time_stamp = r.optional(opt.get(0), |r| r.element("timeStamp", read_time_stamp))?;
        let password = r.optional(opt.get(1), |r| r.element("password", read_bmp_128))?;
        let dhkey = r.optional(opt.get(2), |r| r.element("dhkey", DhSet::decode))?;
        let challenge = r.optional(opt.get(3), |r| {
            r.element("challenge", |r| {
                r.set_size_constraint(SizeConstraint::range(8, 128));
                r.read_octet_string()
            })
        })?;
        let random = r.optional(opt.get(4), |r| {
            r.element("random", |r| r.read_unconstrained_int())
        })?;
        let certificate = r.optional(opt.get(5), |r| {
            r.element("certificate", TypedCertificate::decode)
        })?;
        let general_id = r.optional(opt.get(6), |r| r.element("generalID", read_bmp_128))?;
        let non_standard = r.optional(opt.get(7), |r| {
            r.element("nonStandard", H235NonStandardParameter::decode)
        })?;
        let unknown_extensions = r.read_remaining_extensions(ext)?;

        Ok(Self {
            token_oid,
            time_stamp,
            password,
            dhkey,
            challenge,
            random,
            certificate,
            general_id,
            non_standard,
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
                self.time_stamp.is_some(),
                self.password.is_some(),
                self.dhkey.is_some(),
                self.challenge.is_some(),
                self.random.is_some(),
                self.certificate.is_some(),
                self.general_id.is_some(),
                self.non_standard.is_some(),
            ],
        )?;
        w.write_object_id(&self.token_oid)?;
        if let Some(v) = &self.time_stamp {
            write_time_stamp(w, *v)?;
        }
        if let Some(v) = &self.password {
            write_bmp_128(w, v)?;
        }
        if let Some(v) = &self.dhkey {
            v.encode(w)?;
        }
        if let Some(v) = &self.challenge {
            w.set_size_constraint(SizeConstraint::range(8, 128));
            w.write_octet_string(v)?;
        }
        if let Some(v) = &self.random {
            w.write_unconstrained_int(*v)?;
        }
        if let Some(v) = &self.certificate {
            v.encode(w)?;
        }
        if let Some(v) = &self.general_id {
            write_bmp_128(w, v)?;
        }
        if let Some(v) = &self.non_standard {
            v.encode(w)?;
        }
        if !ext.is_empty() {
            ext.write(w)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CryptoEncryptedToken {
    pub token_oid: ObjectId,
    pub token: EncryptedToken,
}

impl CryptoEncryptedToken {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            token_oid: r.element("tokenOID", |r| r.read_object_id())?,
            token: r.element("token", EncryptedToken::decode)?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_object_id(&self.token_oid)?;
        self.token.encode(w)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CryptoSignedToken {
    pub token_oid: ObjectId,
    pub token: SignedToken,
}

impl CryptoSignedToken {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            token_oid: r.element("tokenOID", |r| r.read_object_id())?,
            token: r.element("token", SignedToken::decode)?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_object_id(&self.token_oid)?;
        self.token.encode(w)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CryptoHashedToken {
    pub token_oid: ObjectId,
    pub hashed_vals: ClearToken,
    pub token: HashedToken,
}

impl CryptoHashedToken {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            token_oid: r.element("tokenOID", |r| r.read_object_id())?,
            hashed_vals: r.element("hashedVals", ClearToken::decode)?,
            token: r.element("token", HashedToken::decode)?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        w.write_object_id(&self.token_oid)?;
        self.hashed_vals.encode(w)?;
        self.token.encode(w)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CryptoToken {
    CryptoEncryptedToken(CryptoEncryptedToken),
    CryptoSignedToken(CryptoSignedToken),
    CryptoHashedToken(CryptoHashedToken),
    CryptoPwdEncr(EncryptedToken),
    Unknown(RawExtension),
}

impl CryptoToken {
    const NUM_ROOT: u32 = 4;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::CryptoEncryptedToken(
                r.element("cryptoEncryptedToken", CryptoEncryptedToken::decode)?,
            )),
            ChoiceTag::Root(1) => Ok(Self::CryptoSignedToken(
                r.element("cryptoSignedToken", CryptoSignedToken::decode)?,
            )),
            ChoiceTag::Root(2) => Ok(Self::CryptoHashedToken(
                r.element("cryptoHashedToken", CryptoHashedToken::decode)?,
            )),
            ChoiceTag::Root(3) => Ok(Self::CryptoPwdEncr(
                r.element("cryptoPwdEncr", EncryptedToken::decode)?,
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
            Self::CryptoEncryptedToken(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::CryptoSignedToken(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::CryptoHashedToken(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::CryptoPwdEncr(v) => {
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

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CryptoEpPwdHash {
    pub alias: AliasAddress,
    pub time_stamp: TimeStamp,
    pub token: HashedToken,
}

impl CryptoEpPwdHash {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            alias: r.element("alias", AliasAddress::decode)?,
            time_stamp: r.element("timeStamp", read_time_stamp)?,
            token: r.element("token", HashedToken::decode)?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        self.alias.encode(w)?;
        write_time_stamp(w, self.time_stamp)?;
        self.token.encode(w)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CryptoGkPwdHash {
    pub gatekeeper_id: Identifier,
    pub time_stamp: TimeStamp,
    pub token: HashedToken,
}

impl CryptoGkPwdHash {
    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        Ok(Self {
            gatekeeper_id: r.element("gatekeeperId", read_bmp_128)?,
            time_stamp: r.element("timeStamp", read_time_stamp)?,
            token: r.element("token", HashedToken::decode)?,
        })
    }

    pub fn encode(&self, w: &mut PerWriter) -> Result<()> {
        write_bmp_128(w, &self.gatekeeper_id)?;
        write_time_stamp(w, self.time_stamp)?;
        self.token.encode(w)
    }
}

/// The H.225-facing crypto token CHOICE. Real traffic exercises both the
/// root and extension halves; unknown alternatives keep their bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CryptoH323Token {
    CryptoEpPwdHash(CryptoEpPwdHash),
    CryptoGkPwdHash(CryptoGkPwdHash),
    CryptoEpPwdEncr(EncryptedToken),
    CryptoGkPwdEncr(EncryptedToken),
    CryptoEpCert(SignedToken),
    CryptoGkCert(SignedToken),
    CryptoFastStart(SignedToken),
    NestedCryptoToken(CryptoToken),
    Unknown(RawExtension),
}

impl CryptoH323Token {
    const NUM_ROOT: u32 = 8;

    pub fn decode(r: &mut PerReader<'_, '_>) -> Result<Self> {
        match r.read_choice_header(Self::NUM_ROOT, true)? {
            ChoiceTag::Root(0) => Ok(Self::CryptoEpPwdHash(
                r.element("cryptoEPPwdHash", CryptoEpPwdHash::decode)?,
            )),
            ChoiceTag::Root(1) => Ok(Self::CryptoGkPwdHash(
                r.element("cryptoGKPwdHash", CryptoGkPwdHash::decode)?,
            )),
            ChoiceTag::Root(2) => Ok(Self::CryptoEpPwdEncr(
                r.element("cryptoEPPwdEncr", EncryptedToken::decode)?,
            )),
            ChoiceTag::Root(3) => Ok(Self::CryptoGkPwdEncr(
                r.element("cryptoGKPwdEncr", EncryptedToken::decode)?,
            )),
            ChoiceTag::Root(4) => Ok(Self::CryptoEpCert(
                r.element("cryptoEPCert", SignedToken::decode)?,
            )),
            ChoiceTag::Root(5) => Ok(Self::CryptoGkCert(
                r.element("cryptoGKCert", SignedToken::decode)?,
            )),
            ChoiceTag::Root(6) => Ok(Self::CryptoFastStart(
                r.element("cryptoFastStart", SignedToken::decode)?,
            )),
            ChoiceTag::Root(7) => Ok(Self::NestedCryptoToken(
                r.element("nestedcryptoToken", CryptoToken::decode)?,
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
            Self::CryptoEpPwdHash(v) => {
                w.write_choice_root(0, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::CryptoGkPwdHash(v) => {
                w.write_choice_root(1, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::CryptoEpPwdEncr(v) => {
                w.write_choice_root(2, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::CryptoGkPwdEncr(v) => {
                w.write_choice_root(3, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::CryptoEpCert(v) => {
                w.write_choice_root(4, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::CryptoGkCert(v) => {
                w.write_choice_root(5, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::CryptoFastStart(v) => {
                w.write_choice_root(6, Self::NUM_ROOT, true)?;
                v.encode(w)
            }
            Self::NestedCryptoToken(v) => {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::per::{PerReader, PerWriter};

    fn md5_oid() -> ObjectId {
        ObjectId::new(vec![1, 2, 840, 113549, 2, 5])
    }

    #[test]
    fn clear_token_round_trip() {
        let value = ClearToken {
            time_stamp: Some(1_234_567_890),
            password: Some("secret".into()),
            random: Some(-42),
            general_id: Some("gk-1".into()),
            challenge: Some(vec![7; 16]),
            ..ClearToken::new(ObjectId::new(vec![0, 0, 8, 235, 0, 2, 1]))
        };

        let encoded = PerWriter::encode_to_bytes(|w| value.encode(w)).unwrap();
        let mut reader = PerReader::new(&encoded);
        assert_eq!(value, ClearToken::decode(&mut reader).unwrap());
    }

    #[test]
    fn crypto_h323_token_round_trip() {
        let value = CryptoH323Token::CryptoEpPwdHash(CryptoEpPwdHash {
            alias: AliasAddress::H323Id("ep-7".into()),
            time_stamp: 1_700_000_000,
            token: HashedToken {
                algorithm_oid: md5_oid(),
                param_s: Params::default(),
                hash: crate::per::BitString::new(vec![0xAB; 16], 128),
            },
        });

        let encoded = PerWriter::encode_to_bytes(|w| value.encode(w)).unwrap();
        let mut reader = PerReader::new(&encoded);
        assert_eq!(value, CryptoH323Token::decode(&mut reader).unwrap());
    }

    #[test]
    fn nested_and_unknown_tokens_round_trip() {
        let values = vec![
            CryptoH323Token::NestedCryptoToken(CryptoToken::CryptoPwdEncr(EncryptedToken {
                algorithm_oid: md5_oid(),
                param_s: Params {
                    ran_int: Some(99),
                    iv8: Some(vec![1, 2, 3, 4, 5, 6, 7, 8]),
                    unknown_extensions: Vec::new(),
                },
                encrypted_data: vec![0xDE, 0xAD],
            })),
            CryptoH323Token::Unknown(RawExtension {
                index: 4,
                data: vec![0x01, 0x02, 0x03],
            }),
        ];

        for value in values {
            let encoded = PerWriter::encode_to_bytes(|w| value.encode(w)).unwrap();
            let mut reader = PerReader::new(&encoded);
            assert_eq!(value, CryptoH323Token::decode(&mut reader).unwrap());
        }
    }

    #[test]
    fn signed_token_keeps_opaque_payload() {
        let value = CryptoSignedToken {
            token_oid: md5_oid(),
            token: SignedToken {
                to_be_signed: vec![0x55; 40],
                algorithm_oid: md5_oid(),
                param_s: Params::default(),
                signature: crate::per::BitString::new(vec![0xF0; 8], 64),
            },
        };

        let encoded = PerWriter::encode_to_bytes(|w| value.encode(w)).unwrap();
        let mut reader = PerReader::new(&encoded);
        assert_eq!(value, CryptoSignedToken::decode(&mut reader).unwrap());
    }
}
