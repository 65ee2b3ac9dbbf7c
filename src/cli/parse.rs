use std::path::PathBuf;

use catalog::{
    load_courses, parse_all, project, render, Config, CourseRequisites, Grouping, Requisite,
    Segment, SubjectDirectory,
};
use clap::Parser;
use tracing::instrument;

use super::terminal::{Paint, Tone};

#[derive(Debug, Parser)]
#[command(about = "Parse scraped requisite tables into normalized requisites")]
pub struct Parse {
    /// A course document, or a directory of them (.json, .yaml, .yml)
    input: PathBuf,

    /// A JSON or YAML list of subjects, each with a `code` and a `name`
    #[arg(long, short)]
    subjects: PathBuf,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,

    /// Reject unbalanced group markers in prerequisite tables
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
    Yaml,
}

impl Parse {
    #[instrument(level = "debug", skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let directory = SubjectDirectory::load(&self.subjects)?;
        let courses = load_courses(&self.input)?;
        let grouping = if self.strict {
            Grouping::Strict
        } else {
            config.grouping()
        };

        tracing::info!(
            "Parsing {} courses against {} subjects",
            courses.len(),
            directory.len()
        );

        let mut parsed = Vec::with_capacity(courses.len());
        let mut failed = Vec::new();
        for result in parse_all(&courses, &directory, grouping) {
            match result {
                Ok(requisites) => parsed.push(requisites),
                Err(error) => failed.push(error),
            }
        }

        match self.output {
            OutputFormat::Pretty => print_pretty(&parsed, config),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&parsed)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&parsed)?),
        }

        for error in &failed {
            eprintln!("{} {error}", "error:".paint(Tone::Warning));
        }
        if !failed.is_empty() {
            anyhow::bail!("{} of {} courses failed to parse", failed.len(), courses.len());
        }

        eprintln!(
            "{}",
            format!("Parsed {} courses", parsed.len()).paint(Tone::Done)
        );
        Ok(())
    }
}

fn print_pretty(courses: &[CourseRequisites], config: &Config) {
    for course in courses {
        let heading = format!(
            "{} {} ({})",
            course.subject, course.course_number, course.term
        );
        println!("{}", heading.paint(Tone::Heading));
        println!("  Prereqs: {}", describe(&course.prereqs, config));
        println!("  Coreqs:  {}", describe(&course.coreqs, config));
        if course.has_unresolved_subjects() {
            println!(
                "  {}",
                "some subject names could not be resolved (??)".paint(Tone::Warning)
            );
        }
    }
}

/// Renders a requisite as text, highlighting unresolved courses.
fn describe(requisite: &Requisite, config: &Config) -> String {
    project(requisite)
        .iter()
        .map(|segment| {
            let text = render::text(std::slice::from_ref(segment), config);
            match segment {
                Segment::CourseLink(course) if course.is_unresolved() => text.paint(Tone::Warning),
                Segment::Operator(_) | Segment::NoRequirement => text.paint(Tone::Muted),
                _ => text,
            }
        })
        .collect()
}
