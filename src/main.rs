use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context as _};
use directories as dirs;

use colorbook::gfx::pixels::MAX_DIMENSION;
use colorbook::gfx::prelude::*;
use colorbook::session::Target;
use colorbook::{png, settings, InputEvent, Palette, Session, Settings};

const HELP: &str = r#"
Usage:

    colorbook fill <image.png> --at <x,y> [--at <x,y>...] --color <color> --output <out.png> [--tolerance <n>]
    colorbook sketch <strokes.txt> [--output <out.png>] [--data-url] [--size <w>x<h>]
    colorbook palette

Options:

    --config <path>    Settings file to use instead of the default
    --log <level>      Log level (error, warn, info, debug, trace)
    -h, --help         Print this help

Colors are given as `#RGB`, `#RRGGBB` or as a palette color name.
Stroke files have one stroke per line, with points given as `x,y`
and separated by whitespace.
"#;

enum Command {
    Fill {
        image: PathBuf,
        points: Vec<Point>,
        color: String,
        output: PathBuf,
        tolerance: Option<u8>,
    },
    Sketch {
        strokes: PathBuf,
        output: Option<PathBuf>,
        size: Option<Size<u32>>,
        data_url: bool,
    },
    Palette,
    Help,
}

struct Options {
    config: Option<PathBuf>,
    log: Option<log::LevelFilter>,
    command: Command,
}

impl Options {
    fn parse() -> anyhow::Result<Self> {
        use lexopt::prelude::*;

        let mut parser = lexopt::Parser::from_env();
        let mut config = None;
        let mut log = None;
        let mut command: Option<String> = None;
        let mut input: Option<PathBuf> = None;
        let mut output = None;
        let mut points = Vec::new();
        let mut color = None;
        let mut tolerance = None;
        let mut size = None;
        let mut data_url = false;

        while let Some(arg) = parser.next()? {
            match arg {
                Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Long("log") => {
                    log = Some(parser.value()?.parse()?);
                }
                Long("at") => {
                    points.push(parse_point(&parser.value()?.parse::<String>()?)?);
                }
                Long("color") | Short('c') => {
                    color = Some(parser.value()?.parse::<String>()?);
                }
                Long("output") | Short('o') => {
                    output = Some(PathBuf::from(parser.value()?));
                }
                Long("tolerance") => {
                    tolerance = Some(parser.value()?.parse()?);
                }
                Long("size") => {
                    size = Some(parse_size(&parser.value()?.parse::<String>()?)?);
                }
                Long("data-url") => {
                    data_url = true;
                }
                Long("help") | Short('h') => {
                    command = Some(String::from("help"));
                }
                Value(val) if command.is_none() => {
                    command = Some(val.parse::<String>()?);
                }
                Value(val) if input.is_none() => {
                    input = Some(PathBuf::from(val));
                }
                _ => return Err(anyhow!(arg.unexpected())),
            }
        }

        let command = match command.as_deref() {
            Some("fill") => {
                if points.is_empty() {
                    bail!("`fill` requires at least one `--at <x,y>` point");
                }
                Command::Fill {
                    image: input.context("`fill` requires an input image")?,
                    points,
                    color: color.context("`fill` requires a `--color`")?,
                    output: output.context("`fill` requires an `--output` path")?,
                    tolerance,
                }
            }
            Some("sketch") => {
                if output.is_none() && !data_url {
                    bail!("`sketch` requires an `--output` path or `--data-url`");
                }
                Command::Sketch {
                    strokes: input.context("`sketch` requires a strokes file")?,
                    output,
                    size,
                    data_url,
                }
            }
            Some("palette") => Command::Palette,
            Some("help") | None => Command::Help,
            Some(other) => bail!("unknown command `{}`", other),
        };

        Ok(Self {
            config,
            log,
            command,
        })
    }
}

fn parse_point(input: &str) -> anyhow::Result<Point> {
    let (x, y) = input
        .split_once(',')
        .with_context(|| format!("invalid point `{}`, expected `x,y`", input))?;
    let x: f32 = x.trim().parse().with_context(|| format!("invalid point `{}`", input))?;
    let y: f32 = y.trim().parse().with_context(|| format!("invalid point `{}`", input))?;

    Ok(Point::new(x, y))
}

fn parse_size(input: &str) -> anyhow::Result<Size<u32>> {
    let (w, h) = input
        .split_once('x')
        .with_context(|| format!("invalid size `{}`, expected `<w>x<h>`", input))?;
    let w: u32 = w.parse().with_context(|| format!("invalid size `{}`", input))?;
    let h: u32 = h.parse().with_context(|| format!("invalid size `{}`", input))?;

    if !(1..=MAX_DIMENSION).contains(&w) || !(1..=MAX_DIMENSION).contains(&h) {
        bail!(
            "invalid size `{}`, dimensions must be between 1 and {}",
            input,
            MAX_DIMENSION
        );
    }
    Ok(Size::new(w, h))
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    if let Some(path) = path {
        return Settings::load(path).map_err(Into::into);
    }
    let proj_dirs = dirs::ProjectDirs::from("org", "colorbook", "colorbook")
        .context("config directory not found")?;
    let path = proj_dirs.config_dir().join(settings::FILE_NAME);

    Settings::load_or_default(path).map_err(Into::into)
}

fn fill(
    settings: Settings,
    image: &Path,
    points: &[Point],
    color: &str,
    output: &Path,
    tolerance: Option<u8>,
) -> anyhow::Result<()> {
    let art = png::open(image).with_context(|| format!("loading {}", image.display()))?;
    let size = art.size();
    let settings = Settings {
        surface_width: size.w,
        surface_height: size.h,
        tolerance: tolerance.unwrap_or(settings.tolerance),
        ..settings
    };
    let mut session = Session::new(&settings)?;

    session.select_color(color)?;
    session.load_line_art(&art);

    for p in points {
        let written = session.tap(*p)?;
        log::info!("fill: {} pixel(s) written at {}", written, p);
    }
    png::encode(session.coloring.pixels())?
        .save(output)
        .with_context(|| format!("writing {}", output.display()))?;

    Ok(())
}

fn sketch(
    settings: Settings,
    strokes: &Path,
    output: Option<&Path>,
    size: Option<Size<u32>>,
    data_url: bool,
) -> anyhow::Result<()> {
    let text = fs::read_to_string(strokes)
        .with_context(|| format!("reading {}", strokes.display()))?;
    let size = size.unwrap_or_else(|| settings.surface_size());
    let settings = Settings {
        surface_width: size.w,
        surface_height: size.h,
        ..settings
    };
    let mut session = Session::new(&settings)?;

    for (i, line) in text.lines().enumerate() {
        let points = line
            .split_whitespace()
            .map(parse_point)
            .collect::<anyhow::Result<Vec<_>>>()
            .with_context(|| format!("{}:{}", strokes.display(), i + 1))?;
        let mut points = points.into_iter();

        if let Some(first) = points.next() {
            session.handle_input(Target::Sketch, &InputEvent::PointerDown(first))?;
            for p in points {
                session.handle_input(Target::Sketch, &InputEvent::PointerMove(p))?;
            }
            session.handle_input(Target::Sketch, &InputEvent::PointerUp)?;
        }
    }
    let image = session.submit_sketch()?;

    if let Some(output) = output {
        image
            .save(output)
            .with_context(|| format!("writing {}", output.display()))?;
    }
    if data_url {
        println!("{}", image.to_data_url());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let options = Options::parse()?;
    let settings = load_settings(options.config.as_deref())?;

    colorbook::framework::logger::init(options.log.unwrap_or_else(|| settings.log_level()))?;

    match options.command {
        Command::Fill {
            image,
            points,
            color,
            output,
            tolerance,
        } => fill(settings, &image, &points, &color, &output, tolerance),
        Command::Sketch {
            strokes,
            output,
            size,
            data_url,
        } => sketch(settings, &strokes, output.as_deref(), size, data_url),
        Command::Palette => {
            for (name, color) in Palette::default().iter() {
                println!("{:<8} {}", name, color.hex());
            }
            Ok(())
        }
        Command::Help => {
            print!("{}", HELP);
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("12,7.5").unwrap(), Point::new(12., 7.5));
        assert_eq!(parse_point("-3, 4").unwrap(), Point::new(-3., 4.));

        assert!(parse_point("12").is_err());
        assert!(parse_point("12,").is_err());
        assert!(parse_point("x,y").is_err());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("640x480").unwrap(), Size::new(640, 480));

        assert!(parse_size("640").is_err());
        assert!(parse_size("0x480").is_err());
        assert!(parse_size("-1x480").is_err());
        assert!(parse_size("65536x65537").is_err());
    }
}
