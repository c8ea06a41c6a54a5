//! This is the command line tool that loads (or generates) a string, picks the
//! most compact encoding for it, and writes the flag byte followed by the
//! encoded bytes into a file.

extern crate clap;
extern crate env_logger;
extern crate log;

use clap::{value_parser, Arg, ArgAction, Command};
use rand::thread_rng;
use strcompress::detect::select_encoding;
use strcompress::utils::signatures::FILE_EXTENSION;
use strcompress::utils::text;
use strcompress::{compress_direct, Encoding, MemoryBuffer, StringCompressor};

use std::time::Instant;
use std::{fs::File, io::Write};

/// Write 'data' to the file at 'path'.
fn save_file(data: &[u8], path: &str) -> std::io::Result<()> {
    let mut f = File::create(path)?;
    f.write_all(data)?;
    log::info!("Wrote {} bytes to {}.", data.len(), path);
    Ok(())
}

/// Reports the time that passed between its creation and the end of scope.
struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        log::info!("{} took {:.6} seconds", self.label, elapsed.as_secs_f64());
    }
}

/// The way the encoded bytes are moved into the buffer.
#[derive(Copy, Clone, Debug)]
enum WritePath {
    Staged,
    Direct,
}

/// Encode 'chars' into a fresh buffer that holds exactly the flag byte and
/// the payload. If 'off_heap' is set the buffer writes into memory that it
/// borrows, otherwise it allocates its own.
fn encode_buffer(
    chars: &[u16],
    path: WritePath,
    off_heap: bool,
) -> strcompress::Result<(Encoding, Vec<u8>)> {
    let encoding = select_encoding(chars);
    let len = 1 + encoding.encoded_len(chars.len());

    let mut memory = vec![0u8; if off_heap { len } else { 0 }];
    let mut dest = if off_heap {
        MemoryBuffer::from_slice(&mut memory)?
    } else {
        MemoryBuffer::new(len)?
    };

    dest.write_bytes(&[encoding.flag()])?;
    match path {
        WritePath::Staged => {
            let mut compressor = StringCompressor::with_capacity(chars.len());
            let written = compressor.compress(chars, &mut dest, encoding)?;
            debug_assert_eq!(written, encoding.encoded_len(chars.len()));
        }
        WritePath::Direct => {
            let base = dest.writer_index();
            let written = compress_direct(chars, &mut dest, base, encoding)?;
            dest.set_writer_index(base + written);
        }
    }

    log::debug!("Encoded with the {:?} path into {:?}", path, dest);
    Ok((encoding, dest.written().to_vec()))
}

/// Encode through every combination of path and backing and check that all
/// of them agree with 'expected'.
fn check_all_paths(chars: &[u16], expected: &[u8]) -> bool {
    for path in [WritePath::Staged, WritePath::Direct] {
        for off_heap in [false, true] {
            match encode_buffer(chars, path, off_heap) {
                Ok((_, bytes)) if bytes == expected => {}
                Ok(_) => {
                    log::info!(
                        "Mismatch: {:?} path, off-heap = {}",
                        path,
                        off_heap
                    );
                    return false;
                }
                Err(err) => {
                    log::info!("Encoding failed: {}", err);
                    return false;
                }
            }
        }
    }
    true
}

fn main() {
    let matches = Command::new("CLI")
        .version("1.x")
        .arg(
            Arg::new("checked")
                .long("check")
                .help("Encode through every path and compare the results")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path of the output file")
                .num_args(1),
        )
        .arg(
            Arg::new("random")
                .long("random")
                .value_name("N")
                .help("Generate N random code units instead of reading INPUT")
                .value_parser(value_parser!(usize))
                .conflicts_with("INPUT")
                .num_args(1),
        )
        .arg(
            Arg::new("latin")
                .long("latin")
                .help("Generate random code units in the Latin-1 range only")
                .requires("random")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("path")
                .long("path")
                .value_name("path")
                .help("How the encoded bytes are written into the buffer.")
                .value_parser(["staged", "direct"])
                .num_args(1),
        )
        .arg(
            Arg::new("backing")
                .long("backing")
                .value_name("backing")
                .help("The memory that backs the buffer.")
                .value_parser(["heap", "off-heap"])
                .num_args(1),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required_unless_present("random")
                .index(1),
        )
        .get_matches();

    env_logger::builder().format_timestamp(None).init();

    let cli_checked_mode = matches.get_flag("checked");
    let cli_latin = matches.get_flag("latin");
    let cli_random = matches.get_one::<usize>("random").copied();
    let mut cli_output_path = matches.get_one::<String>("output").cloned();
    let path = match matches.get_one::<String>("path").map(String::as_str) {
        Some("direct") => WritePath::Direct,
        _ => WritePath::Staged,
    };
    let backing = matches.get_one::<String>("backing").map(String::as_str);
    let off_heap = backing == Some("off-heap");

    let chars = if let Some(len) = cli_random {
        let mut rng = thread_rng();
        if cli_output_path.is_none() {
            cli_output_path = Some(String::from("random") + FILE_EXTENSION);
        }
        if cli_latin {
            text::random_latin1(len, &mut rng)
        } else {
            text::random_utf16(len, &mut rng)
        }
    } else {
        let input_path = matches.get_one::<String>("INPUT").unwrap();
        // Come up with a file name.
        if cli_output_path.is_none() {
            cli_output_path = Some(input_path.clone() + FILE_EXTENSION);
        }
        match text::read_code_units(input_path) {
            Ok(chars) => chars,
            Err(err) => {
                log::info!("Can't read {}: {}", input_path, err);
                return;
            }
        }
    };

    let out = &cli_output_path.unwrap();
    let timer = Timer::new("Encoding");

    let (encoding, dest) = match encode_buffer(&chars, path, off_heap) {
        Ok(res) => res,
        Err(err) => {
            log::info!("Encoding failed: {}", err);
            return;
        }
    };

    let utf16_len = Encoding::Utf16.encoded_len(chars.len());
    log::info!(
        "Encoded {} code units as {:?} into {} bytes.",
        chars.len(),
        encoding,
        dest.len()
    );
    if !chars.is_empty() {
        log::info!(
            "Compression ratio is {:.4}x.",
            utf16_len as f64 / (dest.len() - 1) as f64
        );
    }
    if let Err(err) = save_file(&dest, out) {
        log::info!("Can't write {}: {}", out, err);
        return;
    }

    if cli_checked_mode {
        if check_all_paths(&chars, &dest) {
            log::info!("Correct!");
        } else {
            log::info!("Incorrect!");
        }
    }

    drop(timer);
}
