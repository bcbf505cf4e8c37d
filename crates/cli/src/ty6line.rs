//! ty6line - Decode a single TY6 scanline
//!
//! A command line tool that decodes one TY6-compressed line from a file and
//! prints its pixel values as plain text or JSON.
//!
//! The file is not parsed: the caller supplies the byte offset where the line
//! starts (for ROD images, the line-offset table gives it) and the width.

use clap::{ArgAction, Parser, ValueEnum};
use memmap2::Mmap;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use ty6_core::error::{Result, Ty6Error};
use ty6_core::ty6::{LineDecode, try_decode_line};

/// Output type for the decoded line.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum OutputType {
    /// One pixel value per line (default)
    #[default]
    Text,
    /// JSON object with status and pixel array
    Json,
}

/// A command line tool for decoding one TY6-compressed scanline.
#[derive(Parser, Debug)]
#[command(name = "ty6line")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File holding the compressed line data
    #[arg(required = true)]
    file: PathBuf,

    /// Number of pixels in the line
    #[arg(short = 'w', long)]
    width: usize,

    /// Byte offset of the line within the file
    #[arg(short = 's', long, default_value = "0")]
    offset: usize,

    /// Maximum number of bytes to read (default: to end of file)
    #[arg(short = 'n', long)]
    length: Option<usize>,

    /// Output type
    #[arg(short = 't', long = "output-type", value_enum, default_value = "text")]
    output_type: OutputType,

    /// Output file name, `-` for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Report truncation and byte counts on stderr
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

/// JSON shape of a decoded line.
#[derive(Serialize)]
struct LineReport<'a> {
    width: usize,
    produced: usize,
    consumed: usize,
    truncated: bool,
    pixels: &'a [i32],
}

impl<'a> From<&'a LineDecode> for LineReport<'a> {
    fn from(line: &'a LineDecode) -> Self {
        Self {
            width: line.width(),
            produced: line.produced,
            consumed: line.consumed,
            truncated: line.is_truncated(),
            pixels: &line.pixels,
        }
    }
}

/// Select the bytes of one line: from `offset`, at most `length` bytes.
///
/// A length running past the end is clamped; the decoder treats the shortfall
/// as truncation.
fn select_line(data: &[u8], offset: usize, length: Option<usize>) -> Result<&[u8]> {
    if offset > data.len() {
        return Err(Ty6Error::OffsetOutOfRange {
            offset,
            len: data.len(),
        });
    }
    let rest = &data[offset..];
    Ok(match length {
        Some(n) if n < rest.len() => &rest[..n],
        _ => rest,
    })
}

fn write_line<W: Write>(out: &mut W, line: &LineDecode, output_type: OutputType) -> Result<()> {
    match output_type {
        OutputType::Text => {
            for value in &line.pixels {
                writeln!(out, "{value}")?;
            }
        }
        OutputType::Json => {
            serde_json::to_writer(&mut *out, &LineReport::from(line)).map_err(io::Error::from)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn process_file<W: Write>(path: &Path, out: &mut W, args: &Args) -> Result<LineDecode> {
    let file = File::open(path)?;
    let line = if file.metadata()?.len() == 0 {
        // Zero-length files cannot be mapped.
        try_decode_line(select_line(&[], args.offset, args.length)?, args.width)?
    } else {
        // SAFETY: the mapping is read-only and dropped before returning.
        let mmap = unsafe { Mmap::map(&file)? };
        try_decode_line(select_line(&mmap, args.offset, args.length)?, args.width)?
    };
    write_line(out, &line, args.output_type)?;
    Ok(line)
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if !args.file.exists() {
        eprintln!("Error: File not found: {}", args.file.display());
        std::process::exit(1);
    }

    // Open output file or use stdout
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .map_err(|e| format!("Failed to create output file {}: {}", args.outfile, e))?;
        Box::new(BufWriter::new(file))
    };

    match process_file(&args.file, &mut output, &args) {
        Ok(line) => {
            if args.debug {
                eprintln!(
                    "decoded {}/{} pixels from {} bytes{}",
                    line.produced,
                    line.width(),
                    line.consumed,
                    if line.is_truncated() { " (truncated)" } else { "" }
                );
            }
        }
        Err(e) => {
            eprintln!("Error processing {}: {}", args.file.display(), e);
            std::process::exit(1);
        }
    }

    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_line_clamps_length() {
        let data = [1u8, 2, 3, 4, 5];
        assert_eq!(select_line(&data, 1, None).unwrap(), &[2, 3, 4, 5]);
        assert_eq!(select_line(&data, 1, Some(2)).unwrap(), &[2, 3]);
        assert_eq!(select_line(&data, 3, Some(10)).unwrap(), &[4, 5]);
        assert_eq!(select_line(&data, 5, None).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn select_line_rejects_offset_past_end() {
        let err = select_line(&[1, 2], 3, None).unwrap_err();
        assert!(matches!(
            err,
            Ty6Error::OffsetOutOfRange { offset: 3, len: 2 }
        ));
    }

    #[test]
    fn parses_arguments() {
        let args = Args::try_parse_from([
            "ty6line", "line.bin", "-w", "17", "-s", "8", "-t", "json",
        ])
        .unwrap();
        assert_eq!(args.width, 17);
        assert_eq!(args.offset, 8);
        assert_eq!(args.length, None);
        assert_eq!(args.output_type, OutputType::Json);
        assert_eq!(args.outfile, "-");
        assert!(!args.debug);
    }

    #[test]
    fn width_is_required() {
        assert!(Args::try_parse_from(["ty6line", "line.bin"]).is_err());
    }

    #[test]
    fn writes_text_and_json() {
        let line = try_decode_line(&[137, 128], 3).unwrap();

        let mut text = Vec::new();
        write_line(&mut text, &line, OutputType::Text).unwrap();
        assert_eq!(String::from_utf8(text).unwrap(), "10\n11\n0\n");

        let mut json = Vec::new();
        write_line(&mut json, &line, OutputType::Json).unwrap();
        assert_eq!(
            String::from_utf8(json).unwrap(),
            "{\"width\":3,\"produced\":2,\"consumed\":2,\"truncated\":true,\"pixels\":[10,11,0]}\n"
        );
    }
}
