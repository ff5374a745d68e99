//! Command protocol
//!
//! The text framing shared by both ingress paths and the outbound
//! controller wire. Everything in this module is pure: no I/O, no shared
//! state, total over well-formed input.
//!
//! ```text
//!   UDP datagram ──► decode_datagram ──┐
//!                                      ├──► Command ──► RelayDispatcher
//!   push event  ──► decode_push ───────┘
//! ```

pub mod codec;
pub mod command;

pub use codec::{decode_datagram, decode_push, encode_datagram, encode_wire};
pub use command::{split_target, Command};
