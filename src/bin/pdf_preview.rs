//! Preview the form fields of a fillable PDF.
//!
//! Writes a copy of INPUT_FILE in which every text widget shows its own name
//! and every checkbox is checked, so the widget identifiers can be read off the
//! page. With `--schema`, prints the widget schema as JSON instead.
//!
//! Usage:
//!   pdf_preview INPUT_FILE OUTPUT_FILE
//!   pdf_preview --schema INPUT_FILE
//!
//! Set `RUST_LOG=debug` for backend logging.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pdf_formfill::preview::{generate_preview, generate_schema};

#[derive(Parser)]
#[command(name = "pdf_preview")]
#[command(version, about = "Preview the form fields of a fillable PDF", long_about = None)]
struct Cli {
    /// Blank PDF form to inspect
    #[arg(value_parser = existing_file)]
    input_file: PathBuf,

    /// Where to write the preview PDF
    #[arg(value_parser = writable_path, required_unless_present = "schema")]
    output_file: Option<PathBuf>,

    /// Print the widget schema as JSON instead of writing a preview
    #[arg(long)]
    schema: bool,
}

fn existing_file(arg: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(arg);
    if !path.exists() {
        return Err(format!("'{}' does not exist", arg));
    }
    if !path.is_file() {
        return Err(format!("'{}' is not a file", arg));
    }
    std::fs::File::open(&path).map_err(|e| format!("'{}' is not readable: {}", arg, e))?;
    Ok(path)
}

fn writable_path(arg: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(arg);
    if path.is_dir() {
        return Err(format!("'{}' is a directory", arg));
    }
    Ok(path)
}

fn run(cli: Cli) -> pdf_formfill::Result<()> {
    if cli.schema {
        let schema = generate_schema(&cli.input_file)?;
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    if let Some(output_file) = cli.output_file {
        generate_preview(&cli.input_file, &output_file)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::tempdir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_existing_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("form.pdf");
        std::fs::write(&file, b"%PDF-1.7").unwrap();

        assert_eq!(existing_file(file.to_str().unwrap()).unwrap(), file);
        assert!(existing_file(dir.path().to_str().unwrap())
            .unwrap_err()
            .contains("is not a file"));
        let missing = dir.path().join("missing.pdf");
        assert!(existing_file(missing.to_str().unwrap())
            .unwrap_err()
            .contains("does not exist"));
    }

    #[test]
    fn test_writable_path() {
        let dir = tempdir().unwrap();
        assert!(writable_path(dir.path().to_str().unwrap()).is_err());
        let out = dir.path().join("preview.pdf");
        assert_eq!(writable_path(out.to_str().unwrap()).unwrap(), out);
    }

    #[test]
    fn test_output_required_without_schema() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("form.pdf");
        std::fs::write(&file, b"%PDF-1.7").unwrap();
        let input = file.to_str().unwrap();

        assert!(Cli::try_parse_from(["pdf_preview", input]).is_err());

        let cli = Cli::try_parse_from(["pdf_preview", "--schema", input]).unwrap();
        assert!(cli.schema);
        assert!(cli.output_file.is_none());
    }

    #[test]
    fn test_run_reports_unparsable_input() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("form.pdf");
        std::fs::write(&file, b"not a pdf").unwrap();
        let output = dir.path().join("preview.pdf");

        let cli = Cli {
            input_file: file,
            output_file: Some(output.clone()),
            schema: false,
        };
        assert!(run(cli).is_err());
        assert!(!output.exists());
    }
}
