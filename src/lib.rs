//! Typed decoding and encoding of Dark Sky forecast API responses.
//!
//! [`decode_response`] turns the JSON wire form into a [`Response`], converting every data point
//! timestamp from UNIX epoch seconds into an `OffsetDateTime`; [`encode_response`] does the
//! reverse. Unknown fields are ignored on decode, and absent optional fields are left out on encode.

#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

pub mod blob;
pub mod codec;
pub mod datapoint;
pub mod error;
pub mod response;

pub use crate::codec::{
    Record, RecordKind, decode, decode_response, decode_response_reader, decode_response_str,
    decode_response_value, decode_value, encode, encode_response, encode_response_pretty,
    encode_response_value, encode_response_writer, encode_value,
};
pub use crate::datapoint::DataPoint;
pub use crate::error::{BlobError, DecodeError, EncodeError, FieldPath};
pub use crate::response::{Alert, DataBlock, Flags, Response};
