//! Read command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_inputs, InputSource};
use crate::output::{JsonFormatter, LineRecord, OutputFormat, OutputFormatter, TextFormatter};
use anyhow::{Context, Result};
use clap::Args;
use nextline_core::{Descriptor, LineReader, SourceTable};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the read command
#[derive(Debug, Default, Args)]
pub struct ReadArgs {
    /// Input files or patterns (supports glob, `-` for stdin)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Bytes requested per read call (zero or negative disables reading)
    #[arg(long, value_name = "BYTES", allow_negative_numbers = true)]
    pub chunk_size: Option<i64>,

    /// Ignore descriptors at or above this number
    #[arg(long, value_name = "COUNT")]
    pub max_descriptors: Option<usize>,

    /// Take one line from each input in turn instead of reading them one after another
    #[arg(long)]
    pub interleave: bool,

    /// Prefix each line with its source and line number
    #[arg(short, long)]
    pub number: bool,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// An input registered in the descriptor table
#[derive(Debug)]
struct OpenInput {
    name: String,
    fd: Descriptor,
    lines_read: usize,
}

/// What a single read did to an input
enum Step {
    Line,
    Exhausted,
    Failed,
}

impl ReadArgs {
    /// Execute the read command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting line reading");
        log::debug!("Arguments: {:?}", self);

        let config = self.effective_config()?;
        let inputs = resolve_inputs(&self.input)?;

        let mut reader = LineReader::with_config(config.reader.clone(), SourceTable::new());
        let mut formatter = self.formatter(&config)?;

        let failures = if self.interleave {
            let open = open_inputs(&mut reader, &inputs)?;
            read_interleaved(&mut reader, open, formatter.as_mut())?
        } else {
            read_sequential(&mut reader, &inputs, formatter.as_mut())?
        };
        formatter.finish()?;

        if failures > 0 {
            return Err(CliError::ReadFailed(failures).into());
        }
        Ok(())
    }

    /// Config file (or defaults) with command-line overrides applied
    pub fn effective_config(&self) -> Result<CliConfig> {
        let mut config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        if let Some(chunk_size) = self.chunk_size {
            config.reader.chunk_size = chunk_size;
        }
        if self.max_descriptors.is_some() {
            config.reader.max_descriptors = self.max_descriptors;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.number {
            config.output.number_lines = true;
        }

        config
            .reader
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        log::debug!("Effective configuration: {:?}", config);
        Ok(config)
    }

    fn formatter(&self, config: &CliConfig) -> Result<Box<dyn OutputFormatter>> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(BufWriter::new(io::stdout())),
        };

        Ok(match config.output.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer, config.output.number_lines)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        })
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        // A logger may already be installed when running in-process
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(log_level),
        )
        .try_init();
    }
}

fn open_input(reader: &mut LineReader<SourceTable>, input: &InputSource) -> Result<OpenInput> {
    let fd = match input {
        InputSource::Stdin => {
            reader
                .source_mut()
                .insert_at(Descriptor::STDIN, io::stdin());
            Descriptor::STDIN
        }
        InputSource::File(path) => reader
            .open(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?,
    };

    if !reader.config().admits(fd) {
        log::warn!("{input}: opened as {fd}, beyond max_descriptors; it will read as empty");
    }
    log::debug!("{input}: opened as {fd}");

    Ok(OpenInput {
        name: input.to_string(),
        fd,
        lines_read: 0,
    })
}

/// Open every input up front, for round-robin reading
fn open_inputs(
    reader: &mut LineReader<SourceTable>,
    inputs: &[InputSource],
) -> Result<Vec<OpenInput>> {
    inputs
        .iter()
        .map(|input| open_input(reader, input))
        .collect()
}

fn step(
    reader: &mut LineReader<SourceTable>,
    input: &mut OpenInput,
    formatter: &mut dyn OutputFormatter,
) -> Result<Step> {
    match reader.read_line(input.fd) {
        Ok(Some(line)) => {
            input.lines_read += 1;
            formatter.format_line(&LineRecord {
                source: &input.name,
                descriptor: input.fd,
                number: input.lines_read,
                line: &line,
            })?;
            Ok(Step::Line)
        }
        Ok(None) => {
            log::debug!("{}: {} lines", input.name, input.lines_read);
            Ok(Step::Exhausted)
        }
        Err(err) => {
            log::error!(
                "{}: {err} (after {} lines)",
                input.name,
                input.lines_read
            );
            Ok(Step::Failed)
        }
    }
}

/// Drain each input completely before moving to the next
///
/// Inputs are opened one at a time, so the closed descriptor is reused and
/// only one file is held open however many inputs there are.
fn read_sequential(
    reader: &mut LineReader<SourceTable>,
    inputs: &[InputSource],
    formatter: &mut dyn OutputFormatter,
) -> Result<usize> {
    let mut failures = 0;

    for source in inputs {
        let mut input = open_input(reader, source)?;
        loop {
            match step(reader, &mut input, formatter)? {
                Step::Line => continue,
                Step::Exhausted => break,
                Step::Failed => {
                    failures += 1;
                    break;
                }
            }
        }
        reader.close(input.fd);
    }

    Ok(failures)
}

/// Round-robin one line at a time over every input still producing lines
fn read_interleaved(
    reader: &mut LineReader<SourceTable>,
    open: Vec<OpenInput>,
    formatter: &mut dyn OutputFormatter,
) -> Result<usize> {
    let mut failures = 0;
    let mut active = VecDeque::from(open);

    while let Some(mut input) = active.pop_front() {
        match step(reader, &mut input, formatter)? {
            Step::Line => active.push_back(input),
            Step::Exhausted => {
                reader.close(input.fd);
            }
            Step::Failed => {
                failures += 1;
                reader.close(input.fd);
            }
        }
    }

    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nextline_core::ReaderConfig;
    use std::io::Write as _;
    use tempfile::{NamedTempFile, TempDir};

    /// Collects formatted lines as strings
    #[derive(Default)]
    struct Collect(Vec<String>);

    impl OutputFormatter for Collect {
        fn format_line(&mut self, record: &LineRecord<'_>) -> Result<()> {
            self.0.push(record.line.to_string_lossy().into_owned());
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            Ok(())
        }
    }

    fn write_files(dir: &TempDir, files: &[(&str, &str)]) -> Vec<InputSource> {
        files
            .iter()
            .map(|(name, content)| {
                let path = dir.path().join(name);
                std::fs::write(&path, content).unwrap();
                InputSource::File(path)
            })
            .collect()
    }

    fn open_files(
        reader: &mut LineReader<SourceTable>,
        dir: &TempDir,
        files: &[(&str, &str)],
    ) -> Vec<OpenInput> {
        open_inputs(reader, &write_files(dir, files)).unwrap()
    }

    #[test]
    fn test_sequential_order() {
        let dir = TempDir::new().unwrap();
        let inputs = write_files(&dir, &[("a", "a1\na2\n"), ("b", "b1\n")]);
        let mut reader = LineReader::new(SourceTable::new());

        let mut out = Collect::default();
        let failures = read_sequential(&mut reader, &inputs, &mut out).unwrap();

        assert_eq!(failures, 0);
        assert_eq!(out.0, ["a1\n", "a2\n", "b1\n"]);
        assert!(reader.source().is_empty());
    }

    #[test]
    fn test_sequential_reuses_one_descriptor() {
        let dir = TempDir::new().unwrap();
        let names: Vec<String> = (0..20).map(|i| format!("f{i:02}")).collect();
        let contents: Vec<String> = names.iter().map(|name| format!("{name}\n")).collect();
        let files: Vec<(&str, &str)> = names
            .iter()
            .zip(&contents)
            .map(|(name, content)| (name.as_str(), content.as_str()))
            .collect();
        let inputs = write_files(&dir, &files);

        // Only descriptor 3 is admitted; every file must land on it
        let config = ReaderConfig::builder().max_descriptors(4).build().unwrap();
        let mut reader = LineReader::with_config(config, SourceTable::new());

        let mut out = Collect::default();
        let failures = read_sequential(&mut reader, &inputs, &mut out).unwrap();

        assert_eq!(failures, 0);
        assert_eq!(out.0, contents);
        assert!(reader.source().is_empty());
    }

    #[test]
    fn test_interleaved_holds_every_input_open() {
        let dir = TempDir::new().unwrap();
        let mut reader = LineReader::new(SourceTable::new());
        let open = open_files(&mut reader, &dir, &[("a", "a\n"), ("b", "b\n")]);

        assert_eq!(reader.source().len(), 2);
        let fds: Vec<i32> = open.iter().map(|input| input.fd.as_raw()).collect();
        assert_eq!(fds, [3, 4]);
    }

    #[test]
    fn test_interleaved_order() {
        let dir = TempDir::new().unwrap();
        let mut reader = LineReader::new(SourceTable::new());
        let open = open_files(
            &mut reader,
            &dir,
            &[("a", "a1\na2\na3"), ("b", "b1\n"), ("c", "c1\nc2\n")],
        );

        let mut out = Collect::default();
        read_interleaved(&mut reader, open, &mut out).unwrap();

        assert_eq!(out.0, ["a1\n", "b1\n", "c1\n", "a2\n", "c2\n", "a3"]);
        assert!(reader.source().is_empty());
        assert_eq!(reader.tracked(), 0);
    }

    #[test]
    fn test_overrides_apply_over_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[reader]\nchunk_size = 7\n\n[output]\nformat = \"json\"\n").unwrap();

        let args = ReadArgs {
            input: vec!["x".to_string()],
            config: Some(file.path().to_path_buf()),
            max_descriptors: Some(8),
            number: true,
            ..ReadArgs::default()
        };
        let config = args.effective_config().unwrap();
        assert_eq!(config.reader.chunk_size, 7);
        assert_eq!(config.reader.max_descriptors, Some(8));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.number_lines);

        let args = ReadArgs {
            chunk_size: Some(-3),
            format: Some(OutputFormat::Text),
            ..args
        };
        let config = args.effective_config().unwrap();
        assert_eq!(config.reader.chunk_size, -3);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = ReadArgs {
            max_descriptors: Some(0),
            ..ReadArgs::default()
        };
        let err = args.effective_config().unwrap_err();
        assert!(err.to_string().contains("max_descriptors"));
    }
}
