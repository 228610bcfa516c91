use std::path::{Path, PathBuf};
use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, warn};

use super::options::{Backend, CodecOpts, DEFAULT_CHUNK_SIZE};

/// Extension given to compressed files.
pub const EXTENSION: &str = "hc";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Zip, Unzip
pub enum Mode {
    Zip,
    Unzip,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Huffman compression over fixed-width symbols",
    long_about = "
    Counts every N byte symbol in the input, builds one huffman table for the whole file, and
    writes the table followed by the coded input in blocks. Decompression needs only the
    compressed file; the symbol width is stored in it."
)]
pub struct Args {
    /// Filename of file to process
    #[clap()]
    filename: String,

    /// Perform compression on the input file
    #[clap(short = 'z', long = "compress", conflicts_with = "decompress")]
    compress: bool,

    /// Perform decompression on the input file
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Symbol width in bytes
    #[clap(short = 'n', long = "width", default_value_t = 1)]
    width: usize,

    /// Input bytes per block
    #[clap(short = 'b', long = "chunk-size", default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Symbol map backend
    #[clap(long, arg_enum, default_value_t = Backend::Auto)]
    backend: Backend,

    /// Write to this file instead of the default name
    #[clap(short = 'o', long = "output")]
    output: Option<PathBuf>,

    ///Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Sets verbosity. -v shows errors, -vvvvv is chatty
    #[clap(short = 'v', parse(from_occurrences))]
    v: usize,
}

/// Everything the hc binary needs to run.
#[derive(Debug)]
pub struct HcOpts {
    /// Compress/Decompress
    pub op_mode: Mode,
    /// File to read
    pub input: PathBuf,
    /// File to write
    pub output: PathBuf,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Width, chunk size and backend
    pub codec: CodecOpts,
}

/// Put command line information from CLAP into our internal structure.
pub fn hcopts_init() -> HcOpts {
    let args = Args::parse();

    // Set the log level
    match args.v {
        0 => log::set_max_level(log::LevelFilter::Off),
        1 => log::set_max_level(log::LevelFilter::Error),
        2 => log::set_max_level(log::LevelFilter::Warn),
        3 => log::set_max_level(log::LevelFilter::Info),
        4 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    };

    let input = PathBuf::from(&args.filename);
    // Without -z or -d, guess from the extension.
    let op_mode = if args.decompress {
        Mode::Unzip
    } else if args.compress {
        Mode::Zip
    } else if input.extension().map_or(false, |e| e == EXTENSION) {
        Mode::Unzip
    } else {
        Mode::Zip
    };
    let output = match (&args.output, op_mode) {
        (Some(path), _) => path.clone(),
        (None, Mode::Zip) => compressed_name(&input, args.width),
        (None, Mode::Unzip) => extracted_name(&input),
    };

    let opts = HcOpts {
        op_mode,
        input,
        output,
        force_overwrite: args.force,
        codec: CodecOpts::new(args.width)
            .with_chunk_size(args.chunk_size)
            .with_backend(args.backend),
    };

    // Below we report initialization status to the user
    info!("---- hc Initialization Start ----",);
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Getting input from the file {}", opts.input.display());
    info!("Sending output to the file {}", opts.output.display());
    if opts.op_mode == Mode::Zip {
        info!("Symbol width set to {}", opts.codec.width);
        info!("Chunk size set to {}", opts.codec.chunk_size);
        info!("Backend set to {}", opts.codec.backend);
    } else if args.width != 1 {
        warn!("Symbol width is read from the compressed file; -n is ignored");
    }
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    info!("---- hc Initialization End ----\n");
    opts
}

/// `dir/name` -> `dir/name.<width>.hc`
pub fn compressed_name(input: &Path, width: usize) -> PathBuf {
    let mut name = input.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".{}.{}", width, EXTENSION));
    input.with_file_name(name)
}

/// `dir/name.hc` -> `dir/extracted.name`
pub fn extracted_name(input: &Path) -> PathBuf {
    let name = input.file_name().unwrap_or_default().to_string_lossy();
    let stem = name
        .strip_suffix(&format!(".{}", EXTENSION))
        .unwrap_or(&name);
    input.with_file_name(format!("extracted.{}", stem))
}
