//! # labelc
//!
//! Command line front end of the label codec.
//!
//! ```bash
//! # ZPL and PGL for a design document
//! labelc export design.json
//!
//! # ZPL only, printer font text, compressed graphics
//! labelc export --format zpl --text-mode font --z64 design.json
//!
//! # Elements recognized in a ZPL file, as JSON
//! labelc parse --dpi 203 --paper 45x70 label.zpl
//!
//! # The record the label store keeps
//! labelc record design.json
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use label::{
    CodecError, Dpi, FootprintSource, GraphicEncoding, LabelCodec, Oversample, PaperSize,
    ParseOptions, TextMode, WriterOptions, design_from_json,
};

/// Label codec for ZPL and PGL thermal printers
#[derive(Parser, Debug)]
#[command(name = "labelc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the command streams of a design document
    Export {
        /// Design document (JSON)
        design: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Both)]
        format: Format,

        #[arg(long, value_enum, default_value_t = Text::Bitmap)]
        text_mode: Text,

        /// Compress embedded graphics (Z64)
        #[arg(long)]
        z64: bool,

        /// Render text at twice the resolution and downsample
        #[arg(long)]
        hq: bool,
    },
    /// Print the elements recognized in a ZPL file as JSON
    Parse {
        /// ZPL file
        zpl: PathBuf,

        /// Resolution the file was written for
        #[arg(long, value_parser = parse_dpi)]
        dpi: Dpi,

        #[arg(long, value_enum, default_value_t = Footprint::Reference)]
        footprint: Footprint,

        /// Clamp elements onto paper of this size in mm, e.g. 45x70
        #[arg(long, value_parser = parse_paper)]
        paper: Option<PaperSize>,
    },
    /// Print the stored record of a design document as JSON
    Record {
        /// Design document (JSON)
        design: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Zpl,
    Pgl,
    Both,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Text {
    Bitmap,
    Font,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Footprint {
    Reference,
    Stream,
}

fn parse_dpi(value: &str) -> Result<Dpi, String> {
    let dpi: i64 = value.parse().map_err(|_| format!("not a number: {value}"))?;
    Dpi::try_from(dpi).map_err(|e| e.to_string())
}

fn parse_paper(value: &str) -> Result<PaperSize, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {value}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|mm| *mm > 0.)
            .ok_or_else(|| format!("not a positive size: {v}"))
    };
    Ok(PaperSize::new(parse(width)?, parse(height)?))
}

fn init_logger(verbose: bool) {
    let level = match verbose {
        true => LevelFilter::Debug,
        false => LevelFilter::Warn,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn read(path: &Path) -> Result<String, CodecError> {
    Ok(std::fs::read_to_string(path)?)
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CodecError> {
    match command {
        Commands::Export {
            design,
            format,
            text_mode,
            z64,
            hq,
        } => {
            let design = design_from_json(&read(&design)?)?;
            let options = WriterOptions {
                text_mode: match text_mode {
                    Text::Bitmap => TextMode::Bitmap,
                    Text::Font => TextMode::ScalableFont,
                },
                graphic_encoding: match z64 {
                    true => GraphicEncoding::Z64,
                    false => GraphicEncoding::Hex,
                },
                oversample: match hq {
                    true => Oversample::Double,
                    false => Oversample::Single,
                },
            };
            let codec = LabelCodec::new()?.writer_options(options);
            match format {
                Format::Zpl => println!("{}", codec.zpl(&design)?),
                Format::Pgl => println!("{}", codec.pgl(&design)?),
                Format::Both => {
                    let (zpl, pgl) = codec.serialize(&design)?;
                    println!("{zpl}\n\n{pgl}");
                }
            }
        }
        Commands::Parse {
            zpl,
            dpi,
            footprint,
            paper,
        } => {
            let options = ParseOptions {
                footprint: match footprint {
                    Footprint::Reference => FootprintSource::Reference,
                    Footprint::Stream => FootprintSource::Stream,
                },
                bounds: paper,
                ..Default::default()
            };
            let codec = LabelCodec::new()?.parse_options(options);
            let elements = codec.parse(&read(&zpl)?, dpi);
            println!("{}", serde_json::to_string_pretty(&elements)?);
        }
        Commands::Record { design } => {
            let design = design_from_json(&read(&design)?)?;
            let record = LabelCodec::new()?.record(&design)?;
            println!("{}", record.to_json()?);
        }
    }
    Ok(())
}
