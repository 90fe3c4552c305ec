use std::io::{self, Read, Write};

use log::trace;

use crate::bitio::{BitReader, BitWriter};
use crate::error::{HuffmanError, Result};
use crate::symbol::Symbol;
use crate::tree::{EncodingTree, Node};

const CHUNK: usize = 8192;

/// Writes the code of every byte of `input`, then the end-of-stream code.
///
/// The sink's padding bit is set to the opposite of the end-of-stream
/// code's first bit, so padding can never spell that code.
///
/// Returns the number of input bytes encoded. Fails with
/// [`HuffmanError::SymbolNotFound`] if the tree lacks a leaf for some byte
/// or for the end-of-stream marker.
pub fn encode<R: Read, W: Write>(
    input: &mut R,
    tree: &EncodingTree,
    sink: &mut BitWriter<W>,
) -> Result<u64> {
    let book = tree.code_book();
    let eof = book.code(Symbol::EndOfStream)?;
    if let Some(&first) = eof.bits().first() {
        sink.set_padding(!first);
    }
    let mut buffer = [0u8; CHUNK];
    let mut encoded = 0u64;
    loop {
        let n = match input.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        for &byte in &buffer[..n] {
            sink.write_bits(book.code(Symbol::Literal(byte))?.bits())?;
        }
        encoded += n as u64;
    }
    sink.write_bits(eof.bits())?;
    trace!("encoded {} bytes into {} bits", encoded, sink.bits_written());
    Ok(encoded)
}

/// Walks the tree bit by bit, emitting a byte at every literal leaf and
/// stopping at the end-of-stream leaf.
///
/// Returns the number of bytes written. Running out of bits first is a
/// [`HuffmanError::TruncatedPayload`].
pub fn decode<R: Read, W: Write>(
    source: &mut BitReader<R>,
    tree: &EncodingTree,
    output: &mut W,
) -> Result<u64> {
    if !tree.contains(Symbol::EndOfStream) {
        return Err(HuffmanError::malformed("tree has no end-of-stream leaf"));
    }

    let mut pending = Vec::with_capacity(CHUNK);
    let mut decoded = 0u64;
    let mut cursor = tree.root();
    loop {
        match *tree.node(cursor) {
            Node::Leaf {
                symbol: Symbol::Literal(byte),
                ..
            } => {
                pending.push(byte);
                decoded += 1;
                if pending.len() == CHUNK {
                    output.write_all(&pending)?;
                    pending.clear();
                }
                cursor = tree.root();
            }
            Node::Leaf { symbol, .. } => {
                debug_assert!(symbol.is_end_of_stream());
                break;
            }
            Node::Internal { zero, one, .. } => {
                cursor = match source.read_bit()? {
                    Some(true) => one,
                    Some(false) => zero,
                    None => {
                        return Err(HuffmanError::TruncatedPayload {
                            bits_read: source.bits_read(),
                        })
                    }
                };
            }
        }
    }
    output.write_all(&pending)?;
    trace!("decoded {} bytes from {} bits", decoded, source.bits_read());
    Ok(decoded)
}
