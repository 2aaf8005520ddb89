//! pdf-flags – print the renderer command line for a set of options.
//!
//! Usage:
//!   pdf-flags <options.json> [--base base.json] [--tokens] [--check]
//!
//! With `--base`, the options start as a copy of the base configuration
//! (margins are never inherited) and the keys of `options.json` are applied
//! on top. Without an options file, `--base` alone prints the copy.

use std::{env, fs, path::PathBuf, process};

use pdf_flags::options::ConvertOptions;
use pdf_flags::serializer::{to_args, to_tokens};
use pdf_flags::OptionsError;

fn main() {
    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("pdf-flags");

    let mut options_path: Option<PathBuf> = None;
    let mut base_path: Option<PathBuf> = None;
    let mut print_tokens = false;
    let mut check = false;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--tokens" | "-t" => print_tokens = true,
            "--check" | "-c" => check = true,
            "--base" | "-b" => match iter.next() {
                Some(v) => base_path = Some(PathBuf::from(v)),
                None => {
                    eprintln!("Error: --base needs a file argument.");
                    print_usage(prog);
                    process::exit(1);
                }
            },
            "--help" | "-h" => {
                print_usage(prog);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(prog);
                process::exit(1);
            }
            path => {
                if options_path.is_some() {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(prog);
                    process::exit(1);
                }
                options_path = Some(PathBuf::from(path));
            }
        }
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter(check)))
        .init();

    if options_path.is_none() && base_path.is_none() {
        eprintln!("Error: no options file specified.");
        print_usage(prog);
        process::exit(1);
    }

    let options = match load_options(options_path.as_ref(), base_path.as_ref()) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if check {
        // Each finding is reported through the `warn` log.
        options.validate();
    }

    if print_tokens {
        for token in to_tokens(&options) {
            println!("{token}");
        }
    } else {
        println!("{}", to_args(&options));
    }
}

/// Default log filter when `RUST_LOG` is unset; `--check` needs `warn` so
/// validation findings are shown.
fn log_filter(check: bool) -> &'static str {
    if check {
        "warn"
    } else {
        "error"
    }
}

fn load_options(
    options_path: Option<&PathBuf>,
    base_path: Option<&PathBuf>,
) -> Result<ConvertOptions, OptionsError> {
    let Some(base_path) = base_path else {
        // Checked by the caller: at least one of the two paths is present.
        return match options_path {
            Some(p) => ConvertOptions::from_json_file(p),
            None => Ok(ConvertOptions::new()),
        };
    };

    let base = ConvertOptions::from_json_file(base_path)?;
    let mut options = ConvertOptions::from_base(&base);
    if let Some(p) = options_path {
        let overrides = fs::read_to_string(p).map_err(|source| OptionsError::Io {
            path: p.clone(),
            source,
        })?;
        options.apply_json_overrides(&overrides)?;
    }
    Ok(options)
}

fn print_usage(prog: &str) {
    eprintln!("pdf-flags – renderer command line from JSON options");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <options.json> [--base base.json] [--tokens] [--check]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <options.json>   Conversion options (keys not given keep their defaults)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --base, -b       Start from this base configuration (margins are not inherited)");
    eprintln!("  --tokens, -t     Print one argument token per line");
    eprintln!("  --check, -c      Report suspicious settings on stderr");
    eprintln!("  --help           Print this message");
}
