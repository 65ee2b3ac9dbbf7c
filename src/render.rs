//! Text renderings of projected requisites.

use crate::{
    domain::{Config, Course},
    projection::Segment,
};

/// Renders segments as plain text, e.g. `CS 2500 and (CS 2501 or MATH 1341)`.
#[must_use]
pub fn text(segments: &[Segment<'_>], config: &Config) -> String {
    render(segments, config, ToString::to_string)
}

/// Renders segments as markdown, linking every course to its catalog page.
#[must_use]
pub fn markdown(segments: &[Segment<'_>], term: &str, config: &Config) -> String {
    render(segments, config, |course| {
        format!("[{course}]({})", course_href(course, term, config))
    })
}

/// The catalog page for a course in the given term.
#[must_use]
pub fn course_href(course: &Course, term: &str, config: &Config) -> String {
    format!(
        "{}/{term}/{}%20{}",
        config.catalog_path(),
        course.subject(),
        course.course_number()
    )
}

fn render(segments: &[Segment<'_>], config: &Config, course: impl Fn(&Course) -> String) -> String {
    let mut out = String::new();
    for &segment in segments {
        match segment {
            Segment::CourseLink(link) => out.push_str(&course(link)),
            Segment::TestLabel(test) => out.push_str(&test.to_string()),
            Segment::Operator(operator) => {
                out.push(' ');
                out.push_str(operator.as_str());
                out.push(' ');
            }
            Segment::GroupOpen => out.push('('),
            Segment::GroupClose => out.push(')'),
            Segment::NoRequirement => out.push_str(config.none_label()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::Requisite, project};

    fn tree() -> Requisite {
        Requisite::and(vec![
            Requisite::course("CS", "2500"),
            Requisite::or(vec![
                Requisite::course("CS", "2501"),
                Requisite::test("AP Computer Science A", 4),
            ]),
        ])
    }

    #[test]
    fn text_joins_with_operators_and_parentheses() {
        let tree = tree();
        assert_eq!(
            text(&project(&tree), &Config::default()),
            "CS 2500 and (CS 2501 or AP Computer Science A: 4)"
        );
    }

    #[test]
    fn empty_uses_configured_label() {
        let config: Config = toml::from_str("_version = \"1\"\nnone_label = \"No requirements\"\n")
            .unwrap();
        assert_eq!(
            text(&project(&Requisite::Empty), &config),
            "No requirements"
        );
    }

    #[test]
    fn markdown_links_courses_to_catalog() {
        let tree = tree();
        assert_eq!(
            markdown(&project(&tree), "202610", &Config::default()),
            "[CS 2500](/catalog/202610/CS%202500) and ([CS 2501](/catalog/202610/CS%202501) or AP Computer Science A: 4)"
        );
    }

    #[test]
    fn href_uses_catalog_path() {
        let config: Config =
            toml::from_str("_version = \"1\"\ncatalog_path = \"https://example.edu/catalog/\"\n")
                .unwrap();
        let course = Course::new("MATH", "1341");

        assert_eq!(
            course_href(&course, "202530", &config),
            "https://example.edu/catalog/202530/MATH%201341"
        );
    }
}
