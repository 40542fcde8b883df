pub mod assemble;
pub mod execute;
