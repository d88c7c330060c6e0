//! Serialization of expressions: the human-readable textual layout and the
//! binary cache format.

mod binary;
mod text;

pub use self::{
    binary::{read_expr, read_transfer, write_expr, write_transfer},
    text::{render, render_transfer},
};
