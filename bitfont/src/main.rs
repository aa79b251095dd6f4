//! binary font compiler
//!
//! Reads a C source holding an 8x16 bitmap font as hex byte literals and
//! writes a TrueType font, plus an SVG of every glyph along the way.

use std::path::PathBuf;

use clap::Parser;

use bitfont::{compile_font, write_font, BitmapSource, BuildOptions, FontInfo, TrueTypeEngine};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The bitmap font source.
    #[arg(default_value = "iso_font.c")]
    input: PathBuf,

    /// The output font file
    #[arg(short, long, default_value = "darwinbitmap8x16.ttf")]
    output: PathBuf,

    /// Directory for the per-glyph SVG files
    #[arg(long, default_value = "glyph_svgs", conflicts_with = "no_svg")]
    svg_dir: PathBuf,

    /// Don't write SVG files
    #[arg(long)]
    no_svg: bool,

    /// Font units per pixel
    #[arg(long, default_value_t = bitfont::DEFAULT_PIXEL_SIZE)]
    scale: u16,

    /// Override the family name
    #[arg(long)]
    family: Option<String>,

    /// Override the full font name
    #[arg(long)]
    full_name: Option<String>,

    /// Override the PostScript name
    #[arg(long)]
    postscript_name: Option<String>,

    /// Override the copyright notice
    #[arg(long)]
    copyright: Option<String>,

    /// Skip glyphs missing from a short source instead of failing
    #[arg(long)]
    allow_truncated: bool,
}

impl Args {
    fn build_options(&self) -> BuildOptions {
        BuildOptions {
            scale: self.scale,
            svg_dir: (!self.no_svg).then(|| self.svg_dir.clone()),
            allow_truncated: self.allow_truncated,
        }
    }

    fn font_info(&self) -> FontInfo {
        let mut info = FontInfo::for_scale(self.scale);
        let overrides = [
            (&mut info.family_name, &self.family),
            (&mut info.full_name, &self.full_name),
            (&mut info.postscript_name, &self.postscript_name),
            (&mut info.copyright, &self.copyright),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                field.clone_from(value);
            }
        }
        info
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), bitfont::Error> {
    let source = BitmapSource::load(&args.input)?;
    let mut engine = TrueTypeEngine::new(args.font_info());
    let summary = compile_font(&source, &args.build_options(), &mut engine)?;
    if !summary.svg_files.is_empty() {
        log::info!("wrote {} SVG files", summary.svg_files.len());
    }
    write_font(&engine, &args.output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["bitfont"]);
        assert_eq!(args.input, PathBuf::from("iso_font.c"));
        assert_eq!(args.output, PathBuf::from("darwinbitmap8x16.ttf"));
        assert_eq!(args.build_options(), BuildOptions::default());
        assert_eq!(args.font_info(), FontInfo::default());
    }

    #[test]
    fn overrides() {
        let args = Args::parse_from([
            "bitfont",
            "font.c",
            "-o",
            "out.ttf",
            "--no-svg",
            "--scale",
            "32",
            "--family",
            "Tiny",
            "--allow-truncated",
        ]);
        let options = args.build_options();
        assert_eq!(options.svg_dir, None);
        assert_eq!(options.scale, 32);
        assert!(options.allow_truncated);
        let info = args.font_info();
        assert_eq!(info.family_name, "Tiny");
        assert_eq!(info.units_per_em, 512);
        assert_eq!(info.postscript_name, "DarwinBitmap8x16");
    }

    #[test]
    fn svg_dir_conflicts_with_no_svg() {
        let result = Args::try_parse_from(["bitfont", "--svg-dir", "out", "--no-svg"]);
        assert!(result.is_err());
    }
}
