//! # huff_compressor
//!
//! Lossless byte-stream compression with Huffman codes.
//!
//! A compressed file is a text header holding the frequency of every byte
//! value that occurs in the input, followed by the bit-packed codes of the
//! input bytes and a closing end-of-stream code.
//!
//! ```rust
//! use huff_compressor::{compress_bytes, decompress_bytes};
//!
//! let packed = compress_bytes(b"AAAB")?;
//! assert_eq!(decompress_bytes(&packed)?, b"AAAB");
//! # Ok::<(), huff_compressor::HuffmanError>(())
//! ```

pub mod bitio;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod header;
pub mod pipeline;
pub mod symbol;
pub mod tree;

pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use pipeline::{
    compress, compress_bytes, compress_file, decompress, decompress_bytes, decompress_file,
    CompressionReport,
};
pub use symbol::Symbol;
pub use tree::{Code, CodeBook, EncodingTree};
