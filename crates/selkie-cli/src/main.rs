use std::io::Read;

use selkie::export::{ExportFormat, ExportRequest, export};
use selkie::render::RenderedDocument;
use selkie::style::clamp;
use selkie::theme::{Direction, build_engine_config};
use selkie::{
    DiagramType, StyleConfiguration, SvgDocument, apply_style, assistant, detect_diagram_type,
    preset_names, resolve_style, template,
};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Svg(selkie::ParseError),
    Export(selkie::ExportError),
    UnknownType(String),
    UnknownTheme(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Svg(err) => write!(f, "{err}; check the diagram source"),
            CliError::Export(err) => write!(f, "{err}"),
            CliError::UnknownType(name) => write!(f, "unknown diagram type: {name}"),
            CliError::UnknownTheme(name) => write!(f, "unknown theme: {name}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<selkie::ParseError> for CliError {
    fn from(value: selkie::ParseError) -> Self {
        Self::Svg(value)
    }
}

impl From<selkie::ExportError> for CliError {
    fn from(value: selkie::ExportError) -> Self {
        Self::Export(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Detect,
    Template,
    Config,
    Style,
    Export,
    Generate,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    theme: Option<String>,
    direction: Direction,
    diagram_type: Option<DiagramType>,
    styles: Option<String>,
    svg: Option<String>,
    out: Option<String>,
    format: Option<ExportFormat>,
    scale: u32,
    transparent: bool,
    basename: Option<String>,
    width: u32,
    height: u32,
}

fn usage() -> &'static str {
    "selkie-cli\n\
\n\
USAGE:\n\
  selkie-cli detect [<path>|-]\n\
  selkie-cli template <type>\n\
  selkie-cli config [--theme <name>] [--direction TD|LR|RL|BT] [--styles <json-path>] [--pretty]\n\
  selkie-cli style --svg <path> [--styles <json-path>] [--theme <name>] [--type <type>] [--out <path>]\n\
  selkie-cli export --svg <path> [--format svg|png|png-hires|pdf] [--scale <1-8>] [--transparent] [--basename <name>] [--width <px>] [--height <px>] [--out <dir>]\n\
  selkie-cli generate [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - <type> is one of: flowchart sequence gantt class state pie er journey requirement git c4.\n\
  - --styles points at a StyleConfiguration JSON document; numeric fields are\n\
    clamped to the editor ranges (font 10-24, thickness 1-8, radius 0-20, size 50-200).\n\
  - config prints the engine configuration document for the given theme and styles.\n\
  - style applies the post-render styling passes to an already-rendered SVG.\n\
  - export writes the artifact into --out (default '.') and prints its filename.\n\
"
}

fn parse_type(name: &str) -> Result<DiagramType, CliError> {
    let lowered = name.trim().to_ascii_lowercase();
    DiagramType::ALL
        .into_iter()
        .find(|ty| ty.as_str() == lowered)
        .ok_or_else(|| CliError::UnknownType(name.to_string()))
}

fn parse_format(name: &str) -> Result<ExportFormat, CliError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "svg" => Ok(ExportFormat::Vector),
        "png" => Ok(ExportFormat::Raster),
        "png-hires" => Ok(ExportFormat::RasterHighRes),
        "pdf" => Ok(ExportFormat::Document),
        _ => Err(CliError::Usage(usage())),
    }
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut it = argv.iter().skip(1).peekable();
    let mut args = Args {
        command: match it.next().map(String::as_str) {
            Some("detect") => Command::Detect,
            Some("template") => Command::Template,
            Some("config") => Command::Config,
            Some("style") => Command::Style,
            Some("export") => Command::Export,
            Some("generate") => Command::Generate,
            Some("--help" | "-h") | None => return Err(CliError::Usage(usage())),
            Some(_) => return Err(CliError::Usage(usage())),
        },
        scale: 2,
        width: 1920,
        height: 1080,
        ..Default::default()
    };

    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--pretty" => args.pretty = true,
            "--transparent" => args.transparent = true,
            "--theme" => {
                let Some(theme) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !preset_names().any(|name| name == theme.as_str()) {
                    return Err(CliError::UnknownTheme(theme.clone()));
                }
                args.theme = Some(theme.clone());
            }
            "--direction" => {
                let Some(token) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.direction =
                    Direction::parse(token).ok_or(CliError::Usage(usage()))?;
            }
            "--type" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_type = Some(parse_type(name)?);
            }
            "--styles" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.styles = Some(path.clone());
            }
            "--svg" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.svg = Some(path.clone());
            }
            "--out" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(path.clone());
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = Some(parse_format(fmt)?);
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.scale = scale.parse::<u32>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--basename" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.basename = Some(name.clone());
            }
            "--width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.width = w.parse::<u32>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.height = h.parse::<u32>().map_err(|_| CliError::Usage(usage()))?;
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            value => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(value.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn clamp_field(field: &mut Option<u32>, (min, max): (u32, u32)) {
    if let Some(value) = field {
        *value = (*value).clamp(min, max);
    }
}

/// Loads a style configuration and enforces the editor's numeric ranges.
fn load_styles(path: Option<&str>) -> Result<StyleConfiguration, CliError> {
    let mut config = match path {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => StyleConfiguration::default(),
    };
    clamp_field(&mut config.font_size, clamp::FONT_SIZE);
    clamp_field(&mut config.line_thickness, clamp::LINE_THICKNESS);
    clamp_field(&mut config.corner_radius, clamp::CORNER_RADIUS);
    clamp_field(&mut config.node_size, clamp::NODE_SIZE);
    Ok(config)
}

fn run(args: Args) -> Result<(), CliError> {
    let theme = args.theme.as_deref().unwrap_or("pastel");

    match args.command {
        Command::Detect => {
            let source = read_input(args.input.as_deref())?;
            println!("{}", detect_diagram_type(&source));
            Ok(())
        }
        Command::Template => {
            let Some(name) = args.input.as_deref() else {
                return Err(CliError::Usage(usage()));
            };
            println!("{}", template::default_source(parse_type(name)?));
            Ok(())
        }
        Command::Config => {
            let config = load_styles(args.styles.as_deref())?;
            let style = resolve_style(&config, theme);
            let engine_config = build_engine_config(&style, args.direction);
            let out = std::io::stdout().lock();
            if args.pretty {
                serde_json::to_writer_pretty(out, engine_config.as_value())?;
            } else {
                serde_json::to_writer(out, engine_config.as_value())?;
            }
            println!();
            Ok(())
        }
        Command::Style => {
            let Some(svg_path) = args.svg.as_deref() else {
                return Err(CliError::Usage(usage()));
            };
            let svg_text = std::fs::read_to_string(svg_path)?;
            let diagram_type = args
                .diagram_type
                .unwrap_or(DiagramType::Flowchart);
            let config = load_styles(args.styles.as_deref())?;
            let style = resolve_style(&config, theme);

            let mut doc = SvgDocument::parse(&svg_text)?;
            apply_style(&mut doc, &style, diagram_type);
            let styled = doc.serialize();
            match args.out.as_deref() {
                None => print!("{styled}"),
                Some(path) => std::fs::write(path, styled)?,
            }
            Ok(())
        }
        Command::Export => {
            let Some(svg_path) = args.svg.as_deref() else {
                return Err(CliError::Usage(usage()));
            };
            let svg_text = std::fs::read_to_string(svg_path)?;
            let diagram_type = args.diagram_type.unwrap_or(DiagramType::Flowchart);
            let config = load_styles(args.styles.as_deref())?;
            let style = resolve_style(&config, theme);

            let document = RenderedDocument {
                svg: svg_text.clone(),
                raw_svg: svg_text,
                diagram_type,
                session_id: "selkie-cli".to_string(),
            };
            let request = ExportRequest {
                format: args.format.unwrap_or(ExportFormat::Vector),
                scale: args.scale,
                transparent: args.transparent,
                basename: args
                    .basename
                    .unwrap_or_else(|| "flowchart".to_string()),
                width: args.width,
                height: args.height,
            };
            let artifact = export(&document, &style, &request)?;

            let dir = std::path::Path::new(args.out.as_deref().unwrap_or("."));
            std::fs::create_dir_all(dir)?;
            std::fs::write(dir.join(&artifact.filename), &artifact.bytes)?;
            println!("{}", artifact.filename);
            Ok(())
        }
        Command::Generate => {
            let description = read_input(args.input.as_deref())?;
            let generated = assistant::generate(description.trim());
            if args.pretty {
                serde_json::to_writer_pretty(
                    std::io::stdout().lock(),
                    &serde_json::json!({
                        "diagram_type": generated.diagram_type.as_str(),
                        "source": generated.source,
                    }),
                )?;
                println!();
            } else {
                println!("{}", generated.source);
            }
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(args) => args,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
