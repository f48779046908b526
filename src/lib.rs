pub mod decoder;
pub mod fixed;
pub mod listing;
pub mod opcodes;
pub mod resolve;
pub mod tables;

pub use decoder::{decode, decode_program, Instruction};
pub use listing::{disassemble, DiagSink, Disassembly, PROGLEN};
pub use opcodes::Op;
pub use resolve::Options;
