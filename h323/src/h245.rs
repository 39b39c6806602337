//! H.245 multimedia system control schema: capability exchange, logical
//! channel signaling, master/slave determination, and the command and
//! indication sets.

pub mod msg;
pub mod types;

pub use msg::{
    CommandMessage, IndicationMessage, MultimediaSystemControlMessage, RequestMessage,
    ResponseMessage,
};
pub use types::{AudioCapability, Capability, DataType, H245TransportAddress, VideoCapability};
