pub const FIN_MASK: u8 = 0b1000_0000;
pub const OPCODE_MASK: u8 = 0b0000_1111;
pub const LENGTH_MASK: u8 = 0b0111_1111;
pub const MASKED_MASK: u8 = 0b1000_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Continuation,
    Text,
    Binary,
    Close,
    Ping,
    Pong,
    Reserved(u8),
}

impl Opcode {
    // create a new opcode from unchanged input byte
    pub fn decode(byte: u8) -> Self {
        use Opcode::*;
        match byte & OPCODE_MASK {
            0x0 => Continuation,
            0x1 => Text,
            0x2 => Binary,
            0x8 => Close,
            0x9 => Ping,
            0xA => Pong,
            value => Reserved(value),
        }
    }

    pub fn encode(&self) -> u8 {
        use Opcode::*;
        match self {
            Continuation => 0x0,
            Text => 0x1,
            Binary => 0x2,
            Close => 0x8,
            Ping => 0x9,
            Pong => 0xA,
            Reserved(value) => *value,
        }
    }
}

#[derive(Debug)]
pub struct Headers {
    pub fin: bool,
    pub mask: bool,
}

impl Headers {
    /// Decodes the fin flag from the first header byte and the mask
    /// flag from the second.
    pub fn decode(first: u8, second: u8) -> Self {
        Headers {
            fin: (first & FIN_MASK) == FIN_MASK,
            mask: (second & MASKED_MASK) == MASKED_MASK,
        }
    }
}

#[derive(Debug)]
pub struct Frame {
    pub headers: Headers,
    pub opcode: Opcode,
    pub payload: Vec<u8>,
}
