//! The parser works over complete strings, but payloads frequently arrive as raw bytes (or sit
//! in files). The [DecoderSelector] implemented within this module turns a stream of bytes into
//! a stream of `char`s, based on different encodings, which is then gathered up ahead of a
//! parse. (Currently only ASCII and UTF-8 are supported).
use chisel_decoders::{ascii::AsciiDecoder, utf8::Utf8Decoder};
use std::io::BufRead;

use crate::errors::{Details, ParserResult};
use crate::parser_error;

/// Enumeration of different supported encoding types
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Ascii,
}

impl Default for Encoding {
    #[cfg(feature = "default_utf8_encoding")]
    fn default() -> Self {
        Self::Utf8
    }

    #[cfg(not(feature = "default_utf8_encoding"))]
    fn default() -> Self {
        Self::Ascii
    }
}

/// A struct that is essentially a factory for creating new instances of [char] iterators,
/// based on a specified encoding type
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct DecoderSelector {}

impl DecoderSelector {
    /// Create and return an instance of a given byte decoder / char iterator based on a specific
    /// encoding
    pub fn new_decoder<'a, Buffer: BufRead>(
        &'a self,
        buffer: &'a mut Buffer,
        encoding: Encoding,
    ) -> Box<dyn Iterator<Item = char> + 'a> {
        match encoding {
            Encoding::Ascii => Box::new(AsciiDecoder::new(buffer)),
            Encoding::Utf8 => Box::new(Utf8Decoder::new(buffer)),
        }
    }

    /// Decode an entire buffer into a [String]. The decoders stop at the first byte sequence
    /// that isn't valid for the encoding, so anything short of the whole buffer is reported as
    /// [Details::InvalidEncoding] at the offset where decoding stopped
    pub fn decode_all<Buffer: BufRead>(
        &self,
        buffer: &mut Buffer,
        encoding: Encoding,
    ) -> ParserResult<String> {
        let mut bytes = vec![];
        if buffer.read_to_end(&mut bytes).is_err() {
            return parser_error!(Details::InvalidFile);
        }
        let mut input: &[u8] = &bytes;
        let decoded: String = self.new_decoder(&mut input, encoding).collect();
        if decoded.len() != bytes.len() {
            return parser_error!(Details::InvalidEncoding(decoded.len()));
        }
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::{DecoderSelector, Encoding};
    use crate::errors::Details;
    use crate::reader_from_bytes;
    use std::io::BufReader;

    #[test]
    fn should_decode_utf8_buffers() {
        let mut reader = reader_from_bytes!("{\"name\":\"Zoë\"}");
        let decoded = DecoderSelector::default().decode_all(&mut reader, Encoding::Utf8);
        assert_eq!(decoded.unwrap(), "{\"name\":\"Zoë\"}");
    }

    #[test]
    fn should_decode_ascii_buffers() {
        let mut reader = reader_from_bytes!("[1,2]");
        let decoded = DecoderSelector::default().decode_all(&mut reader, Encoding::Ascii);
        assert_eq!(decoded.unwrap(), "[1,2]");
    }

    #[test]
    fn invalid_bytes_should_be_reported() {
        let bytes: &[u8] = b"[1,2]\xff\xfe";
        let mut reader = BufReader::new(bytes);
        let err = DecoderSelector::default()
            .decode_all(&mut reader, Encoding::Utf8)
            .unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.details, Details::InvalidEncoding(5));
    }

    #[test]
    fn non_ascii_bytes_should_fail_ascii_decoding() {
        let mut reader = reader_from_bytes!("[\"Zoë\"]");
        let err = DecoderSelector::default()
            .decode_all(&mut reader, Encoding::Ascii)
            .unwrap_err();
        assert_eq!(err.details, Details::InvalidEncoding(4));
    }
}
