//! Command wire codec
//!
//! Pure encode/decode for the text protocol spoken on the command port and
//! toward the controllers:
//!
//! ```text
//! ingress datagram:   [<id>[.<zone...>]:]<color>
//!                      └── absent target = broadcast to all devices
//!
//! push event:         { device: "<id>[.<zone...>]", color: "<color>" }
//!
//! outbound to controller:  <color>\n
//! ```
//!
//! Colors are opaque tokens and must not contain the `:` field separator or
//! the `.` zone separator; the codec relies on these as delimiters and does
//! not defend against tokens that embed them.

use bytes::Bytes;

use crate::error::CommandError;
use crate::protocol::command::{split_target, Command};

/// Decode a raw UDP datagram payload into a command
///
/// The payload is split at the *last* `:`; the right side is the color and
/// everything before it is an optional `<id>.<zone...>` composite target.
/// A payload with no target field (or an empty one, as in `":fff"`) decodes
/// as a broadcast-all command.
pub fn decode_datagram(payload: &str) -> Result<Command, CommandError> {
    let text = payload.trim();
    if text.is_empty() {
        return Err(CommandError::EmptyDatagram);
    }

    let (target, color) = match text.rsplit_once(':') {
        Some((target, color)) => (target, color),
        None => ("", text),
    };

    if color.is_empty() {
        return Err(CommandError::MissingColor);
    }

    if target.is_empty() {
        return Ok(Command::broadcast(color));
    }

    let (id, zone) = split_target(target);
    Ok(Command::unicast(id, zone, color))
}

/// Decode a push-channel `{device, color}` event into a command
///
/// Push events always address a single device; there is no broadcast form.
pub fn decode_push(device: &str, color: &str) -> Result<Command, CommandError> {
    if device.is_empty() {
        return Err(CommandError::MissingDevice);
    }
    if color.is_empty() {
        return Err(CommandError::MissingColor);
    }

    let (id, zone) = split_target(device);
    Ok(Command::unicast(id, zone, color))
}

/// Encode a color for the outbound controller wire
///
/// Controllers receive one newline-terminated color token per datagram.
/// The zone is consumed during resolution and never re-encoded here.
pub fn encode_wire(color: &str) -> Bytes {
    Bytes::from(format!("{}\n", color))
}

/// Re-encode a command in the ingress datagram format
///
/// Inverse of [`decode_datagram`] for well-formed commands; used for
/// diagnostics and to forward commands between relays.
pub fn encode_datagram(command: &Command) -> String {
    command.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_color_is_broadcast() {
        // Exactly one ':'-delimited field: always broadcast-all
        let cmd = decode_datagram("fff").unwrap();
        assert_eq!(cmd, Command::broadcast("fff"));
    }

    #[test]
    fn test_empty_target_is_broadcast() {
        let cmd = decode_datagram(":fff").unwrap();
        assert_eq!(cmd, Command::broadcast("fff"));
    }

    #[test]
    fn test_id_and_zone() {
        let cmd = decode_datagram("dev1.zoneA:ff00ff").unwrap();
        assert_eq!(cmd, Command::unicast("dev1", "zoneA", "ff00ff"));
    }

    #[test]
    fn test_nested_zone_rejoins_segments() {
        let cmd = decode_datagram("dev1.sub.sub2:abc").unwrap();
        assert_eq!(cmd.target.as_deref(), Some("dev1"));
        assert_eq!(cmd.zone, "sub.sub2");
        assert_eq!(cmd.color, "abc");
    }

    #[test]
    fn test_id_without_zone() {
        let cmd = decode_datagram("dev1:00ff00").unwrap();
        assert_eq!(cmd, Command::unicast("dev1", "", "00ff00"));
    }

    #[test]
    fn test_trailing_newline_is_trimmed() {
        let cmd = decode_datagram("dev1:fff\n").unwrap();
        assert_eq!(cmd, Command::unicast("dev1", "", "fff"));
    }

    #[test]
    fn test_empty_datagram_is_malformed() {
        assert_eq!(decode_datagram(""), Err(CommandError::EmptyDatagram));
        assert_eq!(decode_datagram("  \n"), Err(CommandError::EmptyDatagram));
    }

    #[test]
    fn test_missing_color_is_malformed() {
        assert_eq!(decode_datagram("dev1:"), Err(CommandError::MissingColor));
    }

    #[test]
    fn test_push_decode() {
        let cmd = decode_push("dev1.zoneA", "ff00ff").unwrap();
        assert_eq!(cmd, Command::unicast("dev1", "zoneA", "ff00ff"));
    }

    #[test]
    fn test_push_decode_whole_device() {
        let cmd = decode_push("dev2", "123456").unwrap();
        assert_eq!(cmd, Command::unicast("dev2", "", "123456"));
    }

    #[test]
    fn test_push_rejects_empty_fields() {
        assert_eq!(decode_push("", "fff"), Err(CommandError::MissingDevice));
        assert_eq!(decode_push("dev1", ""), Err(CommandError::MissingColor));
    }

    #[test]
    fn test_wire_encoding_appends_newline() {
        assert_eq!(&encode_wire("ff00ff")[..], b"ff00ff\n");
    }

    #[test]
    fn test_reencode_preserves_all_fields() {
        // encode(decode(x)) keeps id, zone and color exactly
        for input in ["dev1.zoneA:ff00ff", "dev1.sub.sub2:abc", "dev1:fff", "fff"] {
            let cmd = decode_datagram(input).unwrap();
            let reencoded = encode_datagram(&cmd);
            assert_eq!(decode_datagram(&reencoded).unwrap(), cmd);
        }
    }
}
