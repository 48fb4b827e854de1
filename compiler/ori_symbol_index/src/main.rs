//! `ori-symdump` - print the declared symbols stored in a symbol batch file.

use std::path::PathBuf;
use std::process::ExitCode;

use ori_symbol_index::batch::decode_batch;
use ori_symbol_index::tracing_setup::init_tracing;
use ori_symbol_index::ReaderLimits;

struct Options {
    path: PathBuf,
    limits: ReaderLimits,
}

fn print_usage() {
    eprintln!("Usage: ori-symdump <file.sym> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --max-string-len=<N>   Reject strings longer than N bytes (default: 1048576)");
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut path = None;
    let mut limits = ReaderLimits::default();

    for arg in args {
        if let Some(value) = arg.strip_prefix("--max-string-len=") {
            let len = value
                .parse::<u32>()
                .map_err(|e| format!("invalid --max-string-len '{value}': {e}"))?;
            limits = limits.with_max_string_len(len);
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else if path.is_none() {
            path = Some(PathBuf::from(arg));
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
    }

    let path = path.ok_or_else(|| "missing file path".to_string())?;
    Ok(Options { path, limits })
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {message}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let data = match std::fs::read(&options.path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("error: failed to read '{}': {e}", options.path.display());
            return ExitCode::FAILURE;
        }
    };

    let load = match decode_batch(&data, options.limits) {
        Ok(load) => load,
        Err(e) => {
            eprintln!("error: {}: {e}", options.path.display());
            return ExitCode::FAILURE;
        }
    };

    for (index, record) in load.records.iter().enumerate() {
        println!("{index:>6}  {record}");
    }
    println!();
    println!(
        "{} records, {} unreadable",
        load.records.len(),
        load.corrupt
    );

    if load.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_path_only() {
        let options = parse_args(&args(&["index.sym"])).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(options.path, PathBuf::from("index.sym"));
        assert_eq!(options.limits, ReaderLimits::default());
    }

    #[test]
    fn test_parse_max_string_len() {
        let options = parse_args(&args(&["--max-string-len=64", "index.sym"]))
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(options.limits.max_string_len, 64);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["--verbose", "a.sym"])).is_err());
        assert!(parse_args(&args(&["a.sym", "b.sym"])).is_err());
        assert!(parse_args(&args(&["--max-string-len=lots", "a.sym"])).is_err());
    }
}
