use std::fs;
use std::path::PathBuf;

use tracing::info;

use tasm_compiler::{assemble, render};

use crate::error::CliError;

pub struct AssembleArgs {
    pub infile: PathBuf,
    pub outfile: PathBuf,
}

/// Assemble `infile` and write the binary to `outfile`.
///
/// The image is built in memory, so a failed run never creates `outfile`.
/// Source diagnostics go to stderr.
pub fn run(args: &AssembleArgs) -> Result<(), CliError> {
    let source = fs::read_to_string(&args.infile).map_err(|source| CliError::Open {
        path: args.infile.clone(),
        source,
    })?;
    info!(infile = %args.infile.display(), bytes = source.len(), "assembling");

    let image = match assemble(&source) {
        Ok(image) => image,
        Err(err) => {
            let path = args.infile.to_string_lossy();
            let report = render(&err, &source, Some(&path));
            eprintln!("{report}");
            return Err(err.into());
        }
    };

    fs::write(&args.outfile, &image).map_err(|source| CliError::Write {
        path: args.outfile.clone(),
        source,
    })?;
    info!(outfile = %args.outfile.display(), bytes = image.len(), "binary written");
    Ok(())
}

#[cfg(test)]
#[path = "assemble_tests.rs"]
mod assemble_tests;
