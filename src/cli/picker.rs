//! Choosing the daily report CSV.
//!
//! Resolution order:
//! - `--data <file>` (or `EPICURVE_DATA`) is validated and used as-is
//! - otherwise `data.csv` in the working directory, if present
//! - otherwise an interactive prompt over the `*.csv` files found below the
//!   working directory

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::AppError;

/// File used when nothing is passed on the command line.
pub const DEFAULT_DATA_FILE: &str = "data.csv";

/// How deep the prompt looks for candidate files.
const SEARCH_DEPTH: usize = 3;

/// Resolve the dataset path, prompting on stdin only when nothing else works.
pub fn resolve_data_path(explicit: Option<&Path>) -> Result<PathBuf, AppError> {
    if let Some(path) = explicit {
        return validate_csv_path(path);
    }
    let default = Path::new(DEFAULT_DATA_FILE);
    if default.is_file() {
        return Ok(default.to_path_buf());
    }
    debug!("{DEFAULT_DATA_FILE} not found, prompting");
    let stdin = io::stdin();
    prompt_for_csv_path(&discover_csv_files(Path::new(".")), &mut stdin.lock(), &mut io::stdout())
}

/// Ask for one of `files` (by number) or an explicit path.
///
/// An empty list, end of input, or `q` all end in an error naming `--data`.
pub fn prompt_for_csv_path(
    files: &[PathBuf],
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<PathBuf, AppError> {
    if files.is_empty() {
        return Err(AppError::new(
            2,
            "No daily report CSV found. Pass one with `epicurve --data <file.csv>` or run `epicurve demo`.",
        ));
    }

    let io_err = |e: io::Error| AppError::new(2, format!("Prompt failed: {e}"));

    writeln!(out, "Daily report files:").map_err(io_err)?;
    for (idx, path) in files.iter().enumerate() {
        writeln!(out, "{:>3}) {}", idx + 1, pretty_path(path)).map_err(io_err)?;
    }

    loop {
        write!(out, "Pick 1-{} or type a path (q to quit): ", files.len()).map_err(io_err)?;
        out.flush().map_err(io_err)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            return Err(AppError::new(2, "No dataset chosen. Pass one with `--data <file.csv>`."));
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }

        if let Ok(choice) = line.parse::<usize>() {
            if (1..=files.len()).contains(&choice) {
                return validate_csv_path(&files[choice - 1]);
            }
            writeln!(out, "No file numbered {choice}.").map_err(io_err)?;
            continue;
        }

        match validate_csv_path(Path::new(line)) {
            Ok(path) => return Ok(path),
            Err(err) => writeln!(out, "{err}").map_err(io_err)?,
        }
    }
}

/// The path must be an existing file with a `.csv` extension.
pub fn validate_csv_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.exists() {
        return Err(AppError::new(2, format!("Data file not found: {}", path.display())));
    }
    if path.is_dir() {
        return Err(AppError::new(
            2,
            format!("Expected a file, got a directory: {}", path.display()),
        ));
    }
    if !has_csv_extension(path) {
        return Err(AppError::new(
            2,
            format!("Expected a .csv file, got: {}", path.display()),
        ));
    }
    Ok(path.to_path_buf())
}

/// `*.csv` files under `root`, sorted by display path.
pub fn discover_csv_files(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    walk(root, 0, &mut out);
    out.sort_by_key(|p| pretty_path(p));
    out
}

fn walk(dir: &Path, depth: usize, out: &mut Vec<PathBuf>) {
    if depth > SEARCH_DEPTH {
        return;
    }
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
            if !matches!(name, ".git" | "target" | "node_modules") {
                walk(&path, depth + 1, out);
            }
        } else if file_type.is_file() && has_csv_extension(&path) {
            out.push(path);
        }
    }
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn pretty_path(path: &Path) -> String {
    path.strip_prefix("./").unwrap_or(path).display().to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn fixture() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let nested = dir.path().join("reports");
        fs::create_dir(&nested).unwrap();
        let b = nested.join("b.CSV");
        fs::write(&a, "x\n").unwrap();
        fs::write(&b, "x\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "x\n").unwrap();
        (dir, a, b)
    }

    #[test]
    fn discovers_csv_files_only() {
        let (dir, a, b) = fixture();
        let found = discover_csv_files(dir.path());
        assert_eq!(found, vec![a, b]);
    }

    #[test]
    fn validate_rejects_missing_dirs_and_other_extensions() {
        let (dir, a, _) = fixture();
        assert!(validate_csv_path(&a).is_ok());
        assert_eq!(validate_csv_path(&dir.path().join("nope.csv")).unwrap_err().exit_code(), 2);
        assert!(validate_csv_path(dir.path()).is_err());
        assert!(validate_csv_path(&dir.path().join("notes.txt")).is_err());
    }

    #[test]
    fn prompt_retries_then_accepts_a_number() {
        let (_dir, a, b) = fixture();
        let files = vec![a, b.clone()];
        let mut input = Cursor::new("7\n2\n");
        let mut out = Vec::new();
        let picked = prompt_for_csv_path(&files, &mut input, &mut out).unwrap();
        assert_eq!(picked, b);
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("No file numbered 7."));
    }

    #[test]
    fn prompt_quits_and_handles_eof() {
        let files = vec![PathBuf::from("x.csv")];
        let mut out = Vec::new();
        let err = prompt_for_csv_path(&files, &mut Cursor::new("q\n"), &mut out).unwrap_err();
        assert_eq!(err.message(), "Canceled.");
        assert!(prompt_for_csv_path(&files, &mut Cursor::new(""), &mut out).is_err());
        assert!(prompt_for_csv_path(&[], &mut Cursor::new("1\n"), &mut out).is_err());
    }
}
