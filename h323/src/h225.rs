//! H.225.0 message schema: the RAS protocol, the call-signaling UUIEs, and
//! the helper types both share.

pub mod generic;
pub mod ras;
pub mod types;
pub mod uuie;

pub use generic::{Content, EnumeratedParameter, GenericData, GenericIdentifier};
pub use ras::RasMessage;
pub use types::{AliasAddress, CallIdentifier, EndpointType, TransportAddress};
pub use uuie::{H323MessageBody, H323UserInformation, H323UuPdu, SetupUuie};
