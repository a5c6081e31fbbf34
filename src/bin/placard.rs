use std::path::PathBuf;

use clap::{Parser, Subcommand};

use placard::{PosterConfig, Variant, render_both, render_variant, write_png};

#[derive(Parser, Debug)]
#[command(name = "placard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the print poster as a PNG.
    Poster(RenderArgs),
    /// Render the social banner as a PNG.
    Banner(RenderArgs),
    /// Render both variants.
    All(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input event config JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path. Derived from the input name when omitted
    /// (banner output gets a `-fb` suffix).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory asset paths are resolved against.
    #[arg(long, default_value = ".")]
    assets_root: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Poster(args) => cmd_variant(args, Variant::Poster),
        Command::Banner(args) => cmd_variant(args, Variant::Banner),
        Command::All(args) => cmd_all(args),
    }
}

fn cmd_variant(args: RenderArgs, variant: Variant) -> anyhow::Result<()> {
    let config = PosterConfig::from_path(&args.in_path)?;
    let frame = render_variant(&config, variant, &args.assets_root)?;

    let out = args
        .out
        .unwrap_or_else(|| variant.output_path(&args.in_path));
    write_png(&frame, &out)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_all(args: RenderArgs) -> anyhow::Result<()> {
    let config = PosterConfig::from_path(&args.in_path)?;
    let (poster, banner) = render_both(&config, &args.assets_root)?;

    for (frame, variant) in [(poster, Variant::Poster), (banner, Variant::Banner)] {
        let out = match (&args.out, variant) {
            // An explicit --out names the poster; the banner derives from it.
            (Some(path), Variant::Poster) => path.clone(),
            (Some(path), Variant::Banner) => Variant::Banner.output_path(path),
            (None, v) => v.output_path(&args.in_path),
        };
        write_png(&frame, &out)?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}
