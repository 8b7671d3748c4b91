use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use flowfmt_lang::log;
use flowfmt_lang::utils::error::{ReportableError, report};
use flowfmt_lang::{Config, format_source};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// File to format (if not specified, reads from stdin)
    #[clap(value_parser)]
    file: Option<PathBuf>,
    /// Width of the editor
    #[arg(long, default_value = "80")]
    width: usize,
    /// Indentation size
    #[arg(long, default_value = "2")]
    indent_size: usize,
    /// Exit with an error instead of printing when the input is not formatted
    #[arg(long)]
    check: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            max_width: self.width,
            indent_size: self.indent_size,
        }
    }
}

/// Format a whole source file. `file_path` is only used for diagnostics.
pub fn pretty_print(
    src: &str,
    file_path: &Option<PathBuf>,
    config: &Config,
) -> Result<String, Vec<Box<dyn ReportableError>>> {
    let res = format_source(src, config);
    if let Err(errs) = &res {
        log::debug!(
            "{} errors while formatting {}",
            errs.len(),
            file_path
                .as_ref()
                .map_or("<stdin>".to_string(), |p| p.display().to_string())
        );
    }
    res
}

/// Whether `src` is already in the form [`pretty_print`] would produce.
pub fn is_formatted(
    src: &str,
    file_path: &Option<PathBuf>,
    config: &Config,
) -> Result<bool, Vec<Box<dyn ReportableError>>> {
    pretty_print(src, file_path, config).map(|rendered| rendered == src)
}

fn read_input(file: &Option<PathBuf>) -> std::io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            log::info!("No file specified. Reading from stdin...");
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

pub fn lib_main() -> ExitCode {
    if cfg!(debug_assertions) {
        colog::default_builder()
            .filter_level(log::LevelFilter::Trace)
            .init();
    } else {
        colog::default_builder().init();
    }

    let args = Args::parse();
    let code = match read_input(&args.file) {
        Ok(code) => code.replace("\r\n", "\n"),
        Err(e) => {
            log::error!("Unable to read input: {e}");
            return ExitCode::FAILURE;
        }
    };

    let res = if args.check {
        is_formatted(&code, &args.file, &args.config()).map(|formatted| {
            if !formatted {
                log::warn!(
                    "{} is not formatted",
                    args.file
                        .as_ref()
                        .map_or("<stdin>".to_string(), |p| p.display().to_string())
                );
            }
            formatted
        })
    } else {
        pretty_print(&code, &args.file, &args.config()).map(|rendered| {
            print!("{rendered}");
            true
        })
    };
    match res {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(errs) => {
            report(&code, &args.file.unwrap_or_default(), &errs);
            ExitCode::FAILURE
        }
    }
}
