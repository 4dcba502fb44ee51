use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "imgkeys")]
#[command(version)]
#[command(about = "Cross-tabulate CMS image keys from zipped JSON exports", long_about = None)]
#[command(after_help = "Examples:\n  \
  imgkeys export.zip                      write report.xlsx in the current directory\n  \
  imgkeys export.zip -x \"draft, tmp\"      skip draft.json and tmp.json\n  \
  cat export.zip | imgkeys - -p > out.xlsx  read the archive from stdin, write to stdout")]
pub struct Cli {
    /// ZIP archive path, or '-' to read the archive from stdin
    #[arg(value_name = "ARCHIVE")]
    pub archive: String,

    /// Output spreadsheet path
    #[arg(short = 'o', long = "output", value_name = "FILE", default_value = "report.xlsx")]
    pub output: PathBuf,

    /// Comma-separated file base names to exclude
    #[arg(short = 'x', long = "exclude", value_name = "NAMES")]
    pub exclude: Option<String>,

    /// Write the spreadsheet to stdout, no messages
    #[arg(short = 'p')]
    pub pipe: bool,

    /// Quiet mode
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn reads_stdin(&self) -> bool {
        self.archive == "-"
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet > 0 || self.pipe
    }
}
