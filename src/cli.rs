//! Command-line interface module for samplesort.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Prompting for folders that were not given on the command line
//! - The source folder precondition check
//! - Running the organizer and printing the outcome

use crate::error::CliError;
use crate::output::OutputFormatter;
use crate::sample_organizer::{OrganizeReport, SampleOrganizer};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Command-line arguments.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    author,
    version,
    about = "Copy audio samples into Drums/ and Other/ category folders based on their names"
)]
pub struct Args {
    /// Folder to scan recursively for .wav and .mp3 samples
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub source: Option<PathBuf>,

    /// Folder that receives the categorized copies (created if missing)
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub destination: Option<PathBuf>,

    /// Print the source and destination of every copied file
    #[arg(short, long)]
    pub verbose: bool,
}

/// Runs the organizer with the given arguments.
///
/// Folders missing from `args` are asked for on stdin. The run aborts with
/// [`CliError::SourceMissing`] before anything is created if the source
/// folder does not exist. Everything after that check is best effort:
/// failures are reported and the walk continues.
///
/// # Examples
///
/// ```no_run
/// use samplesort::cli::{run, Args};
/// use std::path::PathBuf;
///
/// let args = Args {
///     source: Some(PathBuf::from("Splice/Samples")),
///     destination: Some(PathBuf::from("Sorted")),
///     verbose: false,
/// };
/// match run(&args) {
///     Ok(report) => println!("{} samples placed", report.total_placed()),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run(args: &Args) -> Result<OrganizeReport, CliError> {
    let source = match &args.source {
        Some(path) => path.clone(),
        None => prompt_stdin("Enter samples folder")?,
    };
    check_source(&source)?;

    let destination = match &args.destination {
        Some(path) => path.clone(),
        None => prompt_stdin("Enter destination folder")?,
    };

    Ok(organize_folders(&source, &destination, args.verbose))
}

/// Aborts unless `source` exists.
pub fn check_source(source: &Path) -> Result<(), CliError> {
    if source.exists() {
        Ok(())
    } else {
        warn!(path = %source.display(), "source folder does not exist");
        Err(CliError::SourceMissing(source.to_path_buf()))
    }
}

/// Organizes `source` into `destination` and prints the outcome.
///
/// The source folder must already have been checked with [`check_source`].
/// The destination is created by the organizer.
pub fn organize_folders(source: &Path, destination: &Path, verbose: bool) -> OrganizeReport {
    OutputFormatter::info(&format!(
        "Organizing samples from {} into {}",
        source.display(),
        destination.display()
    ));

    let mut organizer = SampleOrganizer::new(destination, verbose);
    organizer.organize(source);
    let report = organizer.into_report();

    if verbose {
        OutputFormatter::summary_table(&report);
    }

    if report.has_failures() {
        OutputFormatter::warning(&format!(
            "{} item(s) could not be organized. Please review errors above.",
            report.failures.len()
        ));
    }
    OutputFormatter::success(&format!(
        "Samples organized: {} placed in {}",
        report.total_placed(),
        destination.display()
    ));

    report
}

fn prompt_stdin(label: &str) -> Result<PathBuf, CliError> {
    let stdin = io::stdin();
    prompt_path(&mut stdin.lock(), &mut io::stdout(), label)
}

/// Asks for a folder path until a non-empty answer is given.
///
/// Surrounding whitespace is trimmed. Reaching the end of input is an error.
pub fn prompt_path<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<PathBuf, CliError> {
    loop {
        write!(output, "{}: ", label).map_err(CliError::Prompt)?;
        output.flush().map_err(CliError::Prompt)?;

        let mut line = String::new();
        let read = input.read_line(&mut line).map_err(CliError::Prompt)?;
        if read == 0 {
            return Err(CliError::Prompt(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no folder given",
            )));
        }

        let answer = line.trim();
        if !answer.is_empty() {
            return Ok(PathBuf::from(answer));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_args_parse_positional_and_verbose() {
        let args = Args::try_parse_from(["samplesort", "in", "out", "--verbose"])
            .expect("Failed to parse args");
        assert_eq!(args.source, Some(PathBuf::from("in")));
        assert_eq!(args.destination, Some(PathBuf::from("out")));
        assert!(args.verbose);
    }

    #[test]
    fn test_args_folders_optional() {
        let args = Args::try_parse_from(["samplesort", "-v"]).expect("Failed to parse args");
        assert_eq!(args.source, None);
        assert_eq!(args.destination, None);
        assert!(args.verbose);
    }

    #[test]
    fn test_prompt_path_trims_answer() {
        let mut input = Cursor::new("  My Samples/Splice \n");
        let mut output = Vec::new();

        let path = prompt_path(&mut input, &mut output, "Enter samples folder").unwrap();

        assert_eq!(path, PathBuf::from("My Samples/Splice"));
        assert_eq!(String::from_utf8(output).unwrap(), "Enter samples folder: ");
    }

    #[test]
    fn test_prompt_path_reprompts_on_empty_line() {
        let mut input = Cursor::new("\n   \nout\n");
        let mut output = Vec::new();

        let path = prompt_path(&mut input, &mut output, "Folder").unwrap();

        assert_eq!(path, PathBuf::from("out"));
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Folder: Folder: Folder: "
        );
    }

    #[test]
    fn test_prompt_path_eof_is_error() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();

        let result = prompt_path(&mut input, &mut output, "Folder");
        assert!(matches!(result, Err(CliError::Prompt(_))));
    }

    #[test]
    fn test_check_source_missing() {
        let result = check_source(Path::new("/definitely/not/a/samples/folder"));
        assert!(matches!(result, Err(CliError::SourceMissing(_))));
    }
}
