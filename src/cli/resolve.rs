use std::path::PathBuf;

use catalog::{resolve, SubjectDirectory, UNKNOWN_SUBJECT};
use clap::Parser;
use tracing::instrument;

use super::terminal::{Paint, Tone};

#[derive(Debug, Parser)]
#[command(about = "Look up the code for a subject name")]
pub struct Resolve {
    /// The full subject name, e.g. "Computer Science"
    name: String,

    /// A JSON or YAML list of subjects, each with a `code` and a `name`
    #[arg(long, short)]
    subjects: PathBuf,
}

impl Resolve {
    #[instrument(level = "debug")]
    pub fn run(self) -> anyhow::Result<()> {
        let directory = SubjectDirectory::load(&self.subjects)?;
        let code = resolve(&self.name, &directory);

        if code == UNKNOWN_SUBJECT {
            println!("{}", code.paint(Tone::Warning));
        } else {
            println!("{code}");
        }
        Ok(())
    }
}
