//! Command builders for the two binaries.

use clap::Command;

use super::args::*;

/// `tasm`: assemble a source file into a binary.
pub fn assembler_command() -> Command {
    Command::new("tasm")
        .about("Assemble TASM source into a binary")
        .arg(infile_arg("Assembly source to read"))
        .arg(outfile_arg())
        .arg(log_file_arg())
        .arg(log_level_arg())
        .after_help(
            r#"EXAMPLES:
  tasm --infile prog.asm --outfile prog.bin
  tasm --infile prog.asm --outfile prog.bin --log-level info"#,
        )
}

/// `tasm-exec`: run a binary.
pub fn executor_command() -> Command {
    Command::new("tasm-exec")
        .about("Execute a TASM binary")
        .arg(infile_arg("Binary to execute"))
        .arg(trace_arg())
        .arg(log_file_arg())
        .arg(log_level_arg())
        .after_help(
            r#"EXAMPLES:
  tasm-exec --infile prog.bin
  tasm-exec --infile prog.bin --trace --log-file trace.log"#,
        )
}
