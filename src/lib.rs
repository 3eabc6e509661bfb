//! Table driven x86/x64 instruction decoder.
//!
//! Recovers one instruction at a time from a byte stream: its `Code`, operands, prefixes,
//! AVX-512/MVEX metadata and length. Handler tables for every encoding family are built once
//! from compact binary blobs and shared by all decoders.

extern crate byteorder;
extern crate num_traits;
#[macro_use]
extern crate num_derive;

mod common;
pub use common::{
    CodeSize, DecoderError, DecoderOptions, EncodingKind, Mode, MvexRegMemConv, OpKind,
    RoundingControl, TupleType, MAX_INSTRUCTION_LENGTH,
};

mod error;
pub use error::{DecoderCreateError, TableError};

mod register;
pub use register::Register;

mod code;
pub use code::Code;

mod instruction;
pub use instruction::Instruction;

mod reader;
pub use reader::{ByteSource, SliceReader};

mod handlers;
mod table_de;

mod tables;
pub use tables::DecoderTables;

mod decoder;
pub use decoder::{ConstantOffsets, Decoder, DecoderIter};
