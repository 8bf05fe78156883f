//! Parser for the XML report written by `lint --xml`.
//!
//! ```xml
//! <issues format="5" by="lint 8.1.0">
//!     <issue id="HardcodedText" severity="Warning" message="..." category="Internationalization"
//!            priority="5" summary="Hardcoded text">
//!         <location file="/p/res/layout/main.xml" line="12" column="9"/>
//!     </issue>
//! </issues>
//! ```

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::types::{Issue, IssueLocation, LintSeverity};

/// Errors reading a lint XML report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Malformed XML.
    #[error("XML parse error at byte {position}: {source}")]
    Xml {
        /// Byte offset where parsing failed.
        position: u64,
        /// Underlying parser error.
        source: quick_xml::Error,
    },

    /// An `<issue>` element without `id`.
    #[error("issue #{index} has no id attribute")]
    MissingId {
        /// 1-indexed position of the issue in the report.
        index: usize,
    },

    /// A severity name lint does not define.
    #[error("issue {id} has unknown severity {severity:?}")]
    UnknownSeverity {
        /// Rule id of the issue.
        id: String,
        /// Severity as written in the report.
        severity: String,
    },
}

#[derive(Default)]
struct Attributes {
    id: Option<String>,
    severity: Option<String>,
    message: Option<String>,
    category: Option<String>,
    priority: Option<String>,
    summary: Option<String>,
    file: Option<String>,
    line: Option<String>,
    column: Option<String>,
}

/// Parses the issues of a report, in document order.
///
/// # Errors
///
/// Returns an error on malformed XML, or on an issue lacking an id or
/// carrying an unknown severity.
pub fn parse_report(xml: &str) -> Result<Vec<Issue>, ReportError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut issues = Vec::new();
    let mut current: Option<Issue> = None;

    loop {
        let event = reader.read_event().map_err(|source| ReportError::Xml {
            position: reader.buffer_position(),
            source,
        })?;

        match event {
            Event::Start(ref e) if e.local_name().as_ref() == b"issue" => {
                current = Some(read_issue(&reader, e, issues.len() + 1)?);
            }
            Event::Empty(ref e) if e.local_name().as_ref() == b"issue" => {
                issues.push(read_issue(&reader, e, issues.len() + 1)?);
            }
            Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"location" => {
                // Only the first location is the primary one.
                if let Some(issue) = current.as_mut().filter(|i| i.location.is_none()) {
                    issue.location = read_location(&reader, e)?;
                }
            }
            Event::End(ref e) if e.local_name().as_ref() == b"issue" => {
                if let Some(issue) = current.take() {
                    issues.push(issue);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(issues)
}

fn read_issue(
    reader: &Reader<&[u8]>,
    element: &BytesStart<'_>,
    index: usize,
) -> Result<Issue, ReportError> {
    let attrs = read_attributes(reader, element)?;

    let id = attrs.id.ok_or(ReportError::MissingId { index })?;
    let severity_name = attrs.severity.unwrap_or_else(|| "Warning".to_string());
    let severity =
        LintSeverity::parse(&severity_name).ok_or_else(|| ReportError::UnknownSeverity {
            id: id.clone(),
            severity: severity_name,
        })?;

    let mut issue = Issue::new(id, severity, attrs.message.unwrap_or_default());
    issue.category = attrs.category;
    issue.priority = attrs.priority.and_then(|p| p.parse().ok());
    issue.summary = attrs.summary;
    Ok(issue)
}

fn read_location(
    reader: &Reader<&[u8]>,
    element: &BytesStart<'_>,
) -> Result<Option<IssueLocation>, ReportError> {
    let attrs = read_attributes(reader, element)?;
    Ok(attrs.file.map(|file| IssueLocation {
        file: file.into(),
        line: attrs.line.and_then(|l| l.parse().ok()),
        column: attrs.column.and_then(|c| c.parse().ok()),
    }))
}

fn read_attributes(
    reader: &Reader<&[u8]>,
    element: &BytesStart<'_>,
) -> Result<Attributes, ReportError> {
    let xml_error = |source: quick_xml::Error| ReportError::Xml {
        position: reader.buffer_position(),
        source,
    };

    let mut attrs = Attributes::default();
    for attr in element.attributes() {
        let attr = attr.map_err(|e| xml_error(e.into()))?;
        let value = attr.unescape_value().map_err(xml_error)?.into_owned();
        let slot = match attr.key.as_ref() {
            b"id" => &mut attrs.id,
            b"severity" => &mut attrs.severity,
            b"message" => &mut attrs.message,
            b"category" => &mut attrs.category,
            b"priority" => &mut attrs.priority,
            b"summary" => &mut attrs.summary,
            b"file" => &mut attrs.file,
            b"line" => &mut attrs.line,
            b"column" => &mut attrs.column,
            _ => continue,
        };
        *slot = Some(value);
    }
    Ok(attrs)
}
