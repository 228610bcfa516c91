//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
    time::Instant,
};

use log::{info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

use symhuff::tools::cli::{hcopts_init, HcOpts, Mode};
use symhuff::{compress, decompress, HcError, Result};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> Result<()> {
    // Available log levels are Error, Warn, Info, Debug, Trace
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stdout,
        simplelog::ColorChoice::AlwaysAnsi,
    ) {
        eprintln!("Logging is unavailable: {}", e);
    }

    let options = hcopts_init();

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Zip => zip(&options),
        Mode::Unzip => unzip(&options),
    };

    info!("Done.\n");
    result
}

/// Compress the input file, reporting time and ratio.
fn zip(opts: &HcOpts) -> Result<()> {
    let start = Instant::now();
    let mut fin = BufReader::new(File::open(&opts.input)?);
    let mut fout = BufWriter::new(create_output(&opts.output, opts.force_overwrite)?);

    let stats = compress(&mut fin, &mut fout, &opts.codec)?;

    println!(
        "{}: {} -> {} bytes, ratio {:.4} ({} byte symbols, {} codes, longest {} bits) in {:?}",
        opts.input.display(),
        stats.original_bytes,
        stats.compressed_bytes,
        stats.ratio(),
        stats.width,
        stats.distinct_symbols,
        stats.longest_code,
        start.elapsed()
    );
    Ok(())
}

/// Decompress the input file, reporting time.
fn unzip(opts: &HcOpts) -> Result<()> {
    let start = Instant::now();
    let mut fin = BufReader::new(File::open(&opts.input)?);
    let mut fout = BufWriter::new(create_output(&opts.output, opts.force_overwrite)?);

    let stats = decompress(&mut fin, &mut fout)?;

    println!(
        "{}: {} bytes restored from {} blocks of {} byte symbols in {:?}",
        opts.output.display(),
        stats.decoded_bytes,
        stats.blocks,
        stats.width,
        start.elapsed()
    );
    Ok(())
}

/// Create the output file, refusing to clobber an existing one unless forced.
fn create_output(path: &Path, force: bool) -> Result<File> {
    if path.exists() && !force {
        return Err(HcError::Config(format!(
            "{} already exists, use -f to overwrite",
            path.display()
        )));
    }
    info!("Writing to {}", path.display());
    Ok(File::create(path)?)
}
