//! xml2csv: read an XML document on stdin, write it as CSV to stdout.
//!
//! Set `RUST_LOG=debug` (or `trace` for a tree dump) for diagnostics.

use std::io::{self, BufWriter};
use std::process::ExitCode;
use xml2csv::{convert_reader, ConvertOptions};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn run() -> xml2csv::Result<()> {
    let options = ConvertOptions::default();
    let table = convert_reader(io::stdin().lock(), &options)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    table.write_to(&mut out)
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("conversion failed: {}", e);
            eprintln!("xml2csv: {}", e);
            ExitCode::FAILURE
        }
    }
}
