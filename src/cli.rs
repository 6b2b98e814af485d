//! CLI definition and dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::config_file::ConfigFile;
use crate::domain::error::{ConfigError, NumericKind};
use crate::ports::config_port::ConfigPort;

#[derive(Parser, Debug)]
#[command(name = "tunables", about = "Inspect and edit parameter files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every key and value
    Dump {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Print one value
    Get {
        #[arg(short, long)]
        file: PathBuf,
        key: String,
        #[arg(long = "as", value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,
    },
    /// Assign a value and save the file
    Set {
        #[arg(short, long)]
        file: PathBuf,
        key: String,
        value: String,
        #[arg(long = "as", value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,
    },
    /// Load the file and report whether every line parses
    Check {
        #[arg(short, long)]
        file: PathBuf,
    },
}

/// Typed view used to read or write a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    String,
    Int,
    Long,
    Hex,
    Float,
    Double,
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Dump { file } => run_dump(&file),
        Command::Get { file, key, kind } => run_get(&file, &key, kind),
        Command::Set {
            file,
            key,
            value,
            kind,
        } => run_set(&file, &key, &value, kind),
        Command::Check { file } => run_check(&file),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let mut config = ConfigFile::new(path);
    config.load()?;
    Ok(config)
}

fn run_dump(path: &Path) -> Result<(), ConfigError> {
    let config = load_config(path)?;
    if config.is_empty() {
        tracing::info!(path = %config.path().display(), "no entries");
    }
    config
        .dump(&mut io::stdout().lock())
        .map_err(|source| ConfigError::Io {
            path: PathBuf::from("<stdout>"),
            source,
        })
}

fn run_get(path: &Path, key: &str, kind: ValueKind) -> Result<(), ConfigError> {
    let config = load_config(path)?;
    println!("{}", read_value(&config, key, kind)?);
    Ok(())
}

fn run_set(path: &Path, key: &str, raw: &str, kind: ValueKind) -> Result<(), ConfigError> {
    let mut config = ConfigFile::new(path);
    if path.exists() {
        config.load()?;
    }
    write_value(&mut config, key, raw, kind)?;
    config.save()
}

fn run_check(path: &Path) -> Result<(), ConfigError> {
    let config = load_config(path)?;
    println!("{}: ok, {} keys", config.path().display(), config.len());
    Ok(())
}

/// Read `key` through the accessor for `kind` and render it as text.
pub fn read_value(config: &dyn ConfigPort, key: &str, kind: ValueKind) -> Result<String, ConfigError> {
    let text = match kind {
        ValueKind::String => config.get_string(key)?,
        ValueKind::Int => config.get_int(key)?.to_string(),
        ValueKind::Long => config.get_long(key)?.to_string(),
        ValueKind::Hex => format!("{:#x}", config.get_hex(key)?),
        ValueKind::Float => config.get_float(key)?.to_string(),
        ValueKind::Double => config.get_double(key)?.to_string(),
    };
    Ok(text)
}

/// Parse operator input strictly for `kind` and assign it.
pub fn write_value(
    config: &mut dyn ConfigPort,
    key: &str,
    raw: &str,
    kind: ValueKind,
) -> Result<(), ConfigError> {
    let invalid = |kind: NumericKind| ConfigError::InvalidValue {
        key: key.to_string(),
        kind,
        value: raw.to_string(),
    };
    let out_of_range = |kind: NumericKind| ConfigError::OutOfRange {
        key: key.to_string(),
        kind,
        value: raw.to_string(),
    };
    match kind {
        ValueKind::String => config.set_string(key, raw),
        ValueKind::Int => {
            let v = raw.parse::<i32>().map_err(|_| invalid(NumericKind::Int))?;
            config.set_int(key, v);
        }
        ValueKind::Long => {
            let v = raw.parse::<i64>().map_err(|_| invalid(NumericKind::Long))?;
            config.set_long(key, v);
        }
        ValueKind::Hex => {
            let (negative, unsigned) = match raw.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, raw.strip_prefix('+').unwrap_or(raw)),
            };
            let digits = unsigned
                .strip_prefix("0x")
                .or_else(|| unsigned.strip_prefix("0X"))
                .unwrap_or(unsigned);
            // from_str_radix would accept a second sign after the prefix
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid(NumericKind::Hex));
            }
            let magnitude =
                i64::from_str_radix(digits, 16).map_err(|_| out_of_range(NumericKind::Hex))?;
            let signed = if negative { -magnitude } else { magnitude };
            if i32::try_from(signed).is_err() {
                return Err(out_of_range(NumericKind::Hex));
            }
            config.set_string(key, raw);
        }
        ValueKind::Float | ValueKind::Double => {
            let numeric = if kind == ValueKind::Float {
                NumericKind::Float
            } else {
                NumericKind::Double
            };
            let v = raw.parse::<f64>().map_err(|_| invalid(numeric))?;
            config.set_double(key, v);
        }
    }
    Ok(())
}
