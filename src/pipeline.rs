use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::debug;

use crate::bitio::{BitReader, BitWriter};
use crate::codec;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::header;
use crate::tree::EncodingTree;

/// Sizes observed while compressing one input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressionReport {
    pub input_bytes: u64,
    pub header_bytes: u64,
    pub payload_bits: u64,
    pub payload_bytes: u64,
}

impl CompressionReport {
    pub fn output_bytes(&self) -> u64 {
        self.header_bytes + self.payload_bytes
    }

    /// Output size over input size; 0.0 for empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes() as f64 / self.input_bytes as f64
        }
    }
}

/// Compresses everything from the current position of `input` to its end.
///
/// The input is read twice: once to count frequencies, then again (after
/// seeking back to where it started) to encode.
pub fn compress<R: Read + Seek, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<CompressionReport> {
    let start = input.stream_position()?;
    let table = FrequencyTable::compute(input)?;
    let header_bytes = header::write(&table, output)?;
    let tree = EncodingTree::build(&table)?;

    input.seek(SeekFrom::Start(start))?;
    let mut sink = BitWriter::new(&mut *output);
    let input_bytes = codec::encode(input, &tree, &mut sink)?;
    let payload_bits = sink.bits_written();
    sink.finish()?;

    let report = CompressionReport {
        input_bytes,
        header_bytes,
        payload_bits,
        payload_bytes: payload_bits.div_ceil(8),
    };
    debug!("compressed {:?}", report);
    Ok(report)
}

/// Decompresses a header plus payload from `input` into `output`.
///
/// Returns the number of bytes written. `input` should be buffered; the
/// header is read a byte at a time.
pub fn decompress<R: Read, W: Write>(input: &mut R, output: &mut W) -> Result<u64> {
    let table = header::read(input)?;
    let tree = EncodingTree::build(&table)?;
    let mut source = BitReader::new(&mut *input);
    let written = codec::decode(&mut source, &tree, output)?;
    output.flush()?;
    debug!(
        "decompressed {} bytes from {} payload bits",
        written,
        source.bits_read()
    );
    Ok(written)
}

pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    compress(&mut Cursor::new(data), &mut output)?;
    Ok(output)
}

pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decompress(&mut Cursor::new(data), &mut output)?;
    Ok(output)
}

pub fn compress_file(src: &Path, dst: &Path) -> Result<CompressionReport> {
    let mut in_file = BufReader::new(File::open(src)?);
    let mut out_file = BufWriter::new(File::create(dst)?);
    let report = compress(&mut in_file, &mut out_file)?;
    out_file.flush()?;
    Ok(report)
}

pub fn decompress_file(src: &Path, dst: &Path) -> Result<u64> {
    let mut in_file = BufReader::new(File::open(src)?);
    let mut out_file = BufWriter::new(File::create(dst)?);
    let written = decompress(&mut in_file, &mut out_file)?;
    out_file.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HuffmanError;

    #[test]
    fn aaab_round_trip() {
        let compressed = compress_bytes(b"AAAB").unwrap();
        assert_eq!(compressed, b"2 A3 B1 \xE3".to_vec());
        assert_eq!(decompress_bytes(&compressed).unwrap(), b"AAAB");
    }

    #[test]
    fn empty_input_is_header_only() {
        let compressed = compress_bytes(b"").unwrap();
        assert_eq!(compressed, b"0 ".to_vec());
        assert!(decompress_bytes(&compressed).unwrap().is_empty());
    }

    #[test]
    fn single_repeated_byte() {
        let data = vec![b'z'; 1000];
        let compressed = compress_bytes(&data).unwrap();
        assert!(compressed.len() < 200);
        assert_eq!(decompress_bytes(&compressed).unwrap(), data);
    }

    #[test]
    fn compression_is_deterministic() {
        let data = b"she sells sea shells by the sea shore";
        assert_eq!(compress_bytes(data).unwrap(), compress_bytes(data).unwrap());
    }

    #[test]
    fn compresses_from_current_position() {
        let mut input = Cursor::new(b"skipABBA".to_vec());
        input.set_position(4);
        let mut output = Vec::new();
        let report = compress(&mut input, &mut output).unwrap();
        assert_eq!(report.input_bytes, 4);
        assert_eq!(decompress_bytes(&output).unwrap(), b"ABBA");
    }

    #[test]
    fn report_matches_output() {
        let data = b"abracadabra";
        let mut output = Vec::new();
        let report = compress(&mut Cursor::new(&data[..]), &mut output).unwrap();
        assert_eq!(report.input_bytes, 11);
        assert_eq!(report.payload_bits, 28);
        assert_eq!(report.payload_bytes, 4);
        assert_eq!(report.output_bytes(), output.len() as u64);
        assert!(report.ratio() > 0.0);
    }

    #[test]
    fn truncated_payload_is_not_a_header_error() {
        let mut compressed = compress_bytes(b"AAAB").unwrap();
        compressed.pop();
        let err = decompress_bytes(&compressed).unwrap_err();
        assert!(matches!(err, HuffmanError::TruncatedPayload { .. }));
    }

    #[test]
    fn truncated_header_is_not_a_payload_error() {
        let err = decompress_bytes(b"3 A3 B1 ").unwrap_err();
        assert!(matches!(err, HuffmanError::MalformedTable { .. }));
    }
}
