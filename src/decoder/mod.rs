//! Code decoding for scanner input.
//!
//! Two sources feed the kiosk: keyboard-wedge scanners, which type the
//! decoded code followed by Enter, and image files dropped onto the terminal,
//! which are searched for QR codes. Linear item barcodes (Code 128) are only
//! read through wedge scanners; a dropped picture of one yields no payload.

mod error;
mod qr;
mod payload;

use std::path::PathBuf;

pub use error::DecodeError;
pub use payload::parse_volunteer_payload;

/// Raw input handed to a decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanInput {
    /// One line typed by a keyboard-wedge scanner.
    Text(String),
    /// Picture that may contain one or more QR codes.
    Image(PathBuf),
}

/// Turns scanner input into zero or more payload strings.
pub trait CodeDecoder: Send + Sync {
    fn decode(&self, input: &ScanInput) -> Result<Vec<String>, DecodeError>;
}

/// Default decoder: wedge text as-is, images through the QR detector.
#[derive(Debug, Clone, Copy, Default)]
pub struct WedgeAndImageDecoder;

impl CodeDecoder for WedgeAndImageDecoder {
    fn decode(&self, input: &ScanInput) -> Result<Vec<String>, DecodeError> {
        match input {
            ScanInput::Text(line) => Ok(decode_wedge_line(line)),
            ScanInput::Image(path) => qr::decode_image_file(path),
        }
    }
}

/// First payload of a decode, the one the workflow acts on.
pub fn first_payload(payloads: Vec<String>) -> Option<String> {
    payloads.into_iter().next()
}

fn decode_wedge_line(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Vec::new()
    } else {
        vec![trimmed.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedge_line_is_trimmed() {
        let decoder = WedgeAndImageDecoder;
        let payloads = decoder
            .decode(&ScanInput::Text("  I001\r\n".into()))
            .unwrap();
        assert_eq!(payloads, vec!["I001".to_string()]);
    }

    #[test]
    fn blank_wedge_line_yields_nothing() {
        let decoder = WedgeAndImageDecoder;
        assert!(decoder
            .decode(&ScanInput::Text(" \t".into()))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn first_payload_wins() {
        assert_eq!(
            first_payload(vec!["a".into(), "b".into()]),
            Some("a".to_string())
        );
        assert_eq!(first_payload(Vec::new()), None);
    }
}
