pub mod assembler;
pub mod merger;
