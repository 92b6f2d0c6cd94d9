use std::{
    fmt,
    fs::{self, File},
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};

/// Where a command writes its result: a text table on stdout, or JSON in a file.
#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::create(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn create(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn destination(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_owned(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    /// Writes `value` in the form that suits the destination: its `Display`
    /// table on stdout, pretty JSON in a file.
    pub fn emit<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize + fmt::Display,
    {
        let written = match self {
            Output::Stdout { writer } => writeln!(writer, "{value}").map_err(anyhow::Error::from),
            Output::File { writer, .. } => serde_json::to_writer_pretty(&mut *writer, value)
                .map_err(anyhow::Error::from)
                .and_then(|()| writeln!(writer).map_err(anyhow::Error::from)),
        };
        written.with_context(|| format!("Failed to write to {}", self.destination()))?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.destination()))
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Prints `value` as a text table, or saves it as JSON when `output_path` is given.
pub fn print_or_save<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
where
    T: serde::Serialize + fmt::Display,
{
    let mut output = Output::from_output_path(output_path)?;
    output.emit(value)?;
    if let Output::File { path, .. } = &output {
        eprintln!("Saved to {}", path.display());
    }
    Ok(())
}

/// Reads whitespace-separated integers from a file.
pub fn read_samples<P>(path: P) -> anyhow::Result<Vec<i64>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to open sample file: {}", path.display()))?;
    let samples = parse_samples(&content)
        .with_context(|| format!("Failed to parse sample file: {}", path.display()))?;
    log::debug!("read {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

fn parse_samples(content: &str) -> anyhow::Result<Vec<i64>> {
    let samples = content
        .split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            token
                .parse::<i64>()
                .with_context(|| format!("Invalid integer `{token}` at position {i}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    if samples.is_empty() {
        bail!("No samples found");
    }
    Ok(samples)
}
