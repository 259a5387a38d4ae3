use anyhow::anyhow;
use clap::{Parser, Subcommand};
use derive_more::Display;
use glyphmap::config::settings::Setting;
use glyphmap::config::storage::*;
use glyphmap::config::{config, config_store, config_store_write, StorageAdapter};
use glyphmap::prelude::*;
use glyphmap::types::Error;
use log::{info, warn, LevelFilter};
use simple_logger::SimpleLogger;
use std::str::FromStr;

#[derive(Debug, Parser)]
#[clap(name = "glyphmap", version = "0.1.0", author = "Glyphmap")]
struct Cli {
    #[clap(flatten)]
    global_opts: GlobalOpts,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[clap(arg_required_else_help = true, about = "Check whether a text can be rendered")]
    Check {
        #[clap(required = true, short = 't', long = "text")]
        text: String,
    },
    #[clap(arg_required_else_help = true, about = "Measure the width of a text in pixels")]
    Measure {
        #[clap(required = true, short = 't', long = "text")]
        text: String,
    },
    #[clap(arg_required_else_help = true, about = "Render a text as ascii art")]
    Render {
        #[clap(required = true, short = 't', long = "text")]
        text: String,
        #[clap(long = "width")]
        width: Option<u32>,
        #[clap(long = "height")]
        height: Option<u32>,
    },
    #[clap(about = "List all glyphs of the built-in font")]
    Glyphs,
    /// View or change settings
    #[clap(subcommand)]
    Config(ConfigCommands),
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    #[clap(about = "List all settings")]
    List,
    #[clap(arg_required_else_help = true, about = "View a setting")]
    View {
        #[clap(required = true, short = 'k', long = "key")]
        key: String,
    },
    #[clap(arg_required_else_help = true, about = "Set a setting")]
    Set {
        #[clap(required = true, short = 'k', long = "key")]
        key: String,
        #[clap(required = true, short = 'v', long = "value")]
        value: String,
    },
}

#[derive(Clone, Copy, Debug, Display, clap::ValueEnum)]
enum Engine {
    Memory,
    Json,
}

impl std::str::FromStr for Engine {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(Engine::Memory),
            "json" => Ok(Engine::Json),
            _ => Err(anyhow!("unknown storage engine: {s}")),
        }
    }
}

#[derive(Debug, Parser)]
struct GlobalOpts {
    #[clap(short = 'e', long = "engine", global = true, default_value = "memory")]
    engine: Engine,
    #[clap(
        short = 'p',
        long = "path",
        global = true,
        default_value = "glyphmap.json"
    )]
    path: String,
    #[clap(long = "verbose", global = true)]
    verbose: bool,
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        let configured = config!(string "log.level");
        LevelFilter::from_str(&configured).unwrap_or_else(|_| {
            eprintln!("unknown log level {configured}, using info");
            LevelFilter::Info
        })
    };

    SimpleLogger::new().with_level(level).init()?;
    Ok(())
}

/// Reads an unsigned setting that has to fit a `u32`. Larger values are clamped.
fn config_u32(key: &str) -> u32 {
    let value = config!(uint key);
    u32::try_from(value).unwrap_or_else(|_| {
        warn!("setting {key} ({value}) is too large, using {}", u32::MAX);
        u32::MAX
    })
}

/// First character of a string setting, or `default` when the setting is empty
fn config_char(key: &str, default: char) -> char {
    config!(string key).chars().next().unwrap_or(default)
}

/// Fails with `UnrenderableText` when the default font has no glyph for a character of `text`
fn check(text: &str) -> anyhow::Result<()> {
    if let Some((index, ch)) = default_font().first_unrenderable(text) {
        return Err(FontError::UnrenderableText { ch, index }.into());
    }

    println!("renderable");
    Ok(())
}

fn render(text: &str, width: Option<u32>, height: Option<u32>) -> anyhow::Result<String> {
    let font = default_font();
    let line_spacing = config_u32("canvas.line_spacing");

    let text = if font.is_renderable(text) {
        text.to_string()
    } else {
        let placeholder = config_char("render.placeholder", '?');
        warn!("text contains characters without a glyph, replacing them with {placeholder:?}");
        replace_unrenderable(font, text, placeholder)
    };

    let size = text_size(font, &text, line_spacing)?;
    let max_width = config_u32("canvas.width");
    let max_height = config_u32("canvas.height");

    let mut canvas = Canvas::new(
        width.unwrap_or(size.width.min(max_width)),
        height.unwrap_or(size.height.min(max_height)),
    );
    info!("rendering onto a {}x{} canvas", canvas.width(), canvas.height());
    canvas.draw_text(0, 0, font, &text, line_spacing)?;

    Ok(canvas.to_ascii(
        config_char("render.solid", '#'),
        config_char("render.transparent", '.'),
    ))
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let storage: Box<dyn StorageAdapter> = match args.global_opts.engine {
        Engine::Memory => Box::new(MemoryStorageAdapter::new()),
        Engine::Json => Box::new(JsonStorageAdapter::try_from(args.global_opts.path.as_str())?),
    };
    config_store_write().set_storage(storage);

    init_logging(args.global_opts.verbose)?;
    info!("using {} settings storage", args.global_opts.engine);

    match args.command {
        Commands::Check { text } => check(&text)?,
        Commands::Measure { text } => {
            let width = default_font().measure_width(&text)?;
            println!("{width}");
        }
        Commands::Render {
            text,
            width,
            height,
        } => {
            println!("{}", render(&text, width, height)?);
        }
        Commands::Glyphs => {
            let font = default_font();
            println!("line height: {}", font.line_height());
            for ch in font.chars() {
                if let Some(sprite) = font.glyph_for(ch) {
                    println!("{ch:?}: {}x{}", sprite.width(), sprite.height());
                }
            }
        }
        Commands::Config(ConfigCommands::List) => {
            let store = config_store();
            for key in store.find("*") {
                if let Some(value) = store.get(&key) {
                    println!("{key:40}: {value}");
                }
            }
        }
        Commands::Config(ConfigCommands::View { key }) => {
            let store = config_store();
            let (Some(info), Some(value)) = (store.get_info(&key), store.get(&key)) else {
                println!("Key not found");
                return Ok(());
            };

            println!("Key            : {key}");
            println!("Current Value  : {value}");
            println!("Default Value  : {}", info.default);
            println!("Description    : {}", info.description);
        }
        Commands::Config(ConfigCommands::Set { key, value }) => {
            if !config_store().has(&key) {
                return Err(Error::Generic(format!("unknown setting {key}")).into());
            }
            config_store().set(&key, Setting::from_str(&value)?);
        }
    }

    Ok(())
}
