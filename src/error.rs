use thiserror::Error;

/// Rejected `Decoder` construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecoderCreateError {
    #[error("unsupported bitness {0}, expected 16, 32 or 64")]
    UnsupportedBitness(u32),
    #[error("handler tables could not be built: {0}")]
    Tables(#[from] TableError),
}

/// Malformed handler table blob. Always a build defect, never caused by decoded input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("blob truncated at offset {0}")]
    Truncated(usize),
    #[error("{remaining} unread bytes after the last record at offset {offset}")]
    TrailingBytes { offset: usize, remaining: usize },
    #[error("unknown record tag {tag:#x} at offset {offset}")]
    UnknownRecord { offset: usize, tag: u8 },
    #[error("unknown handler kind {kind:#x} at offset {offset}")]
    UnknownKind { offset: usize, kind: u8 },
    #[error("handler kind {kind} is not valid in {family} tables")]
    KindNotInFamily { kind: String, family: &'static str },
    #[error("handler kind {kind:#x} at offset {offset} is not allowed here")]
    MisplacedKind { offset: usize, kind: u8 },
    #[error("expected array tag {expected:#x}, found {found:#x} at offset {offset}")]
    ArrayTagMismatch { offset: usize, expected: u8, found: u8 },
    #[error("reference to undefined id {0}")]
    UndefinedId(u32),
    #[error("id {id} does not name {expected}")]
    WrongIdType { id: u32, expected: &'static str },
    #[error("array {id} has {found} entries, expected {expected}")]
    BadArrayLength { id: u32, expected: usize, found: usize },
    #[error("array record at offset {offset} overfills {size} slots")]
    ArrayOverflow { offset: usize, size: u32 },
    #[error("null handler where a handler is required")]
    UnexpectedNull,
    #[error("unknown instruction code {0}")]
    UnknownCode(u32),
    #[error("unknown register {0}")]
    UnknownRegister(u32),
    #[error("unknown tuple type {0}")]
    UnknownTupleType(u32),
    #[error("unknown operand shape {tag:#x} at offset {offset}")]
    UnknownOperand { offset: usize, tag: u8 },
    #[error("{count} operands, at most {max} are supported")]
    TooManyOperands { count: usize, max: usize },
    #[error("unknown terminal flags {0:#x}")]
    UnknownFlags(u32),
    #[error("bad {what} value {value}")]
    BadEnum { what: &'static str, value: u32 },
    #[error("codes of a terminal starting at {0:?} are not consecutive")]
    NonContiguousCodes(String),
    #[error("terminal has {found} codes, its size selector needs {expected}")]
    BadCodeCount { expected: usize, found: usize },
    #[error("varint too long at offset {0}")]
    VarintOverflow(usize),
    #[error("{0} handler tables missing from blob")]
    MissingTables(&'static str),
}
