//! Text preamble carrying the frequency table.
//!
//! Layout: `<N> ` followed by N entries of `<byte><frequency> `, where N is
//! the number of distinct literal bytes, each `<byte>` is one raw byte and
//! each number is ASCII decimal. The end-of-stream marker is never written;
//! reading always restores it with a count of 1.

use std::io::{self, Read, Write};

use log::debug;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;

const SEPARATOR: u8 = b' ';

/// Writes the header for `table`, returning the number of bytes written.
pub fn write<W: Write>(table: &FrequencyTable, output: &mut W) -> Result<u64> {
    if !table.has_end_of_stream() {
        return Err(HuffmanError::malformed("table has no end-of-stream entry"));
    }

    let mut header = Vec::new();
    write!(header, "{}", table.literal_count())?;
    header.push(SEPARATOR);
    for (byte, count) in table.literals() {
        header.push(byte);
        write!(header, "{}", count)?;
        header.push(SEPARATOR);
    }
    output.write_all(&header)?;
    debug!(
        "wrote header: {} literals, {} bytes",
        table.literal_count(),
        header.len()
    );
    Ok(header.len() as u64)
}

/// Reads a header, leaving `input` positioned at the first payload byte.
///
/// Reads one byte at a time so nothing past the header is consumed.
pub fn read<R: Read>(input: &mut R) -> Result<FrequencyTable> {
    let declared = read_number(input, "entry count")?;
    if declared > 256 {
        return Err(HuffmanError::malformed(format!(
            "header declares {} entries, at most 256 literals exist",
            declared
        )));
    }

    let mut table = FrequencyTable::new();
    for index in 0..declared {
        let byte = read_byte(input)?.ok_or_else(|| {
            HuffmanError::malformed(format!(
                "header ends after {} of {} entries",
                index, declared
            ))
        })?;
        let count = read_number(input, "frequency")?;
        if count == 0 {
            return Err(HuffmanError::malformed(format!(
                "byte 0x{:02x} has a zero frequency",
                byte
            )));
        }
        if table.insert(Symbol::Literal(byte), count).is_some() {
            return Err(HuffmanError::malformed(format!(
                "byte 0x{:02x} appears twice",
                byte
            )));
        }
    }
    table.insert(Symbol::EndOfStream, 1);
    debug!("read header: {} literals", table.literal_count());
    Ok(table)
}

fn read_byte<R: Read>(input: &mut R) -> Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match input.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

// Decimal digits terminated by exactly one whitespace byte.
fn read_number<R: Read>(input: &mut R, field: &str) -> Result<u64> {
    let mut value: u64 = 0;
    let mut digits = 0usize;
    loop {
        let byte = read_byte(input)?
            .ok_or_else(|| HuffmanError::malformed(format!("header truncated inside {}", field)))?;
        match byte {
            b'0'..=b'9' => {
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(u64::from(byte - b'0')))
                    .ok_or_else(|| HuffmanError::malformed(format!("{} overflows u64", field)))?;
                digits += 1;
            }
            b if b.is_ascii_whitespace() && digits > 0 => return Ok(value),
            b => {
                return Err(HuffmanError::malformed(format!(
                    "unexpected byte 0x{:02x} in {}",
                    b, field
                )))
            }
        }
    }
}
