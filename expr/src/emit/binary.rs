//! The binary expression cache.
//!
//! Little-endian throughout. One expression is a `u64` term count followed by
//! the terms in canonical order; each term is its `i16` degree, its `f64`
//! coefficient, an `i32` symbol count and that many NUL-terminated symbol
//! strings. A transfer function is two expressions back-to-back, numerator
//! first. Reading restores the exact in-memory term order, so a round-trip
//! through the cache is bitwise stable.

use std::io::{self, Read, Write};

use crate::poly::{Monomial, Polynomial, TransferFunction};

/// Writes one expression.
pub fn write_expr<W: Write>(writer: &mut W, poly: &Polynomial) -> io::Result<()> {
    writer.write_all(&(poly.len() as u64).to_le_bytes())?;
    for term in poly.terms() {
        writer.write_all(&term.degree.to_le_bytes())?;
        writer.write_all(&term.coeff.to_le_bytes())?;
        writer.write_all(&(term.symbols.len() as i32).to_le_bytes())?;
        for symbol in term.symbols.iter() {
            writer.write_all(symbol.as_bytes())?;
            writer.write_all(&[0])?;
        }
    }
    Ok(())
}

/// Reads one expression.
pub fn read_expr<R: Read>(reader: &mut R) -> io::Result<Polynomial> {
    let count = read_u64(reader)?;
    let mut terms = Vec::new();
    for _ in 0..count {
        let degree = read_i16(reader)?;
        let coeff = read_f64(reader)?;
        let symbol_count = read_i32(reader)?;
        if symbol_count < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "negative symbol count in expression cache",
            ));
        }
        let mut symbols = Vec::with_capacity(symbol_count as usize);
        for _ in 0..symbol_count {
            symbols.push(read_string(reader)?);
        }
        terms.push(Monomial { coeff, degree, symbols });
    }
    Ok(Polynomial::from_terms(terms))
}

/// Writes a transfer function: numerator, then denominator.
pub fn write_transfer<W: Write>(writer: &mut W, tf: &TransferFunction) -> io::Result<()> {
    write_expr(writer, &tf.numerator)?;
    write_expr(writer, &tf.denominator)
}

/// Reads a transfer function written by [write_transfer].
pub fn read_transfer<R: Read>(reader: &mut R) -> io::Result<TransferFunction> {
    let numerator = read_expr(reader)?;
    let denominator = read_expr(reader)?;
    Ok(TransferFunction { numerator, denominator })
}

fn read_u64<R: Read>(reader: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn read_i16<R: Read>(reader: &mut R) -> io::Result<i16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(i16::from_le_bytes(buf))
}

fn read_i32<R: Read>(reader: &mut R) -> io::Result<i32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

fn read_f64<R: Read>(reader: &mut R) -> io::Result<f64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

fn read_string<R: Read>(reader: &mut R) -> io::Result<String> {
    let mut bytes = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        reader.read_exact(&mut byte)?;
        if byte[0] == 0 {
            break;
        }
        bytes.push(byte[0]);
    }
    String::from_utf8(bytes)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "malformed symbol name"))
}
