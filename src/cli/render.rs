use std::path::PathBuf;

use catalog::{project, render, scrape::Format, Config, CourseRequisites};
use clap::Parser;
use tracing::instrument;

use super::terminal::{Paint, Tone};

#[derive(Debug, Parser)]
#[command(about = "Render stored requisites as text or markdown")]
pub struct Render {
    /// A JSON or YAML list of parsed course requisites, as written by `parse`
    input: PathBuf,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    format: RenderFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum RenderFormat {
    #[default]
    Text,
    Markdown,
}

impl Render {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let courses: Vec<CourseRequisites> = Format::from_path(&self.input)?.read(&self.input)?;

        for course in &courses {
            match self.format {
                RenderFormat::Text => {
                    let heading = format!(
                        "{} {} ({})",
                        course.subject, course.course_number, course.term
                    );
                    println!("{}", heading.paint(Tone::Heading));
                    println!(
                        "  Prereqs: {}",
                        render::text(&project(&course.prereqs), config)
                    );
                    println!(
                        "  Coreqs:  {}",
                        render::text(&project(&course.coreqs), config)
                    );
                }
                RenderFormat::Markdown => {
                    println!("## {} {}\n", course.subject, course.course_number);
                    println!(
                        "- Prereqs: {}",
                        render::markdown(&project(&course.prereqs), &course.term, config)
                    );
                    println!(
                        "- Coreqs: {}\n",
                        render::markdown(&project(&course.coreqs), &course.term, config)
                    );
                }
            }
        }

        Ok(())
    }
}
