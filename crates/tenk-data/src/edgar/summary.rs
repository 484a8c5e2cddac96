//! FilingSummary.xml manifest parsing.
//!
//! The manifest divides a filing into named sub-reports. Each `<Report>`
//! element carries a short name, long name, position, menu category, and the
//! filename of its rendered HTML page. Statement extraction only cares about
//! reports in the `Statements` category; a manifest without any is the
//! signal to fall back to the next-older filing.

use crate::edgar::client::EdgarClient;
use crate::error::{DataError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Menu category of the financial statement reports.
pub const STATEMENTS_CATEGORY: &str = "Statements";

/// One sub-report of a filing, as listed by the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    /// Short display name, e.g. "CONSOLIDATED BALANCE SHEETS"
    pub short_name: String,
    /// Long (role) name
    pub long_name: String,
    /// Position in the filing's menu, when reported
    pub position: Option<u32>,
    /// Menu category, e.g. "Statements", "Cover", "Notes"
    pub category: String,
    /// Absolute URL of the rendered HTML page
    pub url: String,
}

/// Parsed FilingSummary.xml manifest.
#[derive(Debug, Clone)]
pub struct FilingSummary {
    /// Sub-reports in document order
    pub reports: Vec<ReportRecord>,
}

/// Accumulates one `<Report>` element's children during the event scan.
#[derive(Debug, Default)]
struct ReportBuilder {
    short_name: String,
    long_name: String,
    position: Option<u32>,
    category: String,
    html_file_name: String,
}

impl ReportBuilder {
    fn build(self, folder_url: &str) -> ReportRecord {
        ReportRecord {
            short_name: self.short_name,
            long_name: self.long_name,
            position: self.position,
            category: self.category,
            url: format!("{}/{}", folder_url, self.html_file_name),
        }
    }
}

impl FilingSummary {
    /// Fetch and parse a filing's manifest.
    ///
    /// `summary_url` is the absolute URL of `FilingSummary.xml` as resolved
    /// by [`crate::edgar::FilingIndex::filing_summary_url`].
    pub async fn fetch(client: &EdgarClient, summary_url: &str) -> Result<Self> {
        let xml = client.get_text(summary_url).await?;
        let folder_url = summary_url
            .rsplit_once('/')
            .map(|(folder, _)| folder)
            .unwrap_or(summary_url);
        Self::parse(&xml, folder_url)
    }

    /// Parse manifest XML.
    ///
    /// Report page URLs are built against `folder_url` (the filing folder,
    /// no trailing slash). The last `<Report>` element is a generated
    /// book-keeping entry without a rendered page and is skipped.
    pub fn parse(xml: &str, folder_url: &str) -> Result<Self> {
        let mut reader = Reader::from_reader(xml.as_bytes());
        reader.config_mut().trim_text(true);

        let mut reports = Vec::new();
        let mut current: Option<ReportBuilder> = None;
        let mut field: Option<Field> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"Report" => current = Some(ReportBuilder::default()),
                    b"ShortName" => field = Some(Field::ShortName),
                    b"LongName" => field = Some(Field::LongName),
                    b"Position" => field = Some(Field::Position),
                    b"MenuCategory" => field = Some(Field::MenuCategory),
                    b"HtmlFileName" => field = Some(Field::HtmlFileName),
                    _ => field = None,
                },
                Ok(Event::Text(t)) => {
                    if let (Some(report), Some(field)) = (current.as_mut(), field) {
                        let text = t
                            .unescape()
                            .map_err(|e| DataError::XmlParse(format!("Bad text node: {}", e)))?;
                        report.set(field, text.as_ref());
                    }
                }
                Ok(Event::End(e)) => {
                    field = None;
                    if e.name().as_ref() == b"Report"
                        && let Some(report) = current.take()
                    {
                        reports.push(report.build(folder_url));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(DataError::XmlParse(format!(
                        "FilingSummary parse error at byte {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
            }
            buf.clear();
        }

        // The final Report is EDGAR's "all reports" book entry
        reports.pop();

        Ok(Self { reports })
    }

    /// Whether any report carries the `Statements` menu category.
    ///
    /// A manifest without statements (a 10-K/A amendment, typically) makes
    /// the caller fall back to the next-older filing.
    pub fn has_statements(&self) -> bool {
        self.reports
            .iter()
            .any(|r| r.category == STATEMENTS_CATEGORY)
    }

    /// Reports in the `Statements` category, in document order.
    pub fn statement_reports(&self) -> Vec<&ReportRecord> {
        self.reports
            .iter()
            .filter(|r| r.category == STATEMENTS_CATEGORY)
            .collect()
    }
}

/// Child elements of `<Report>` that the manifest parser collects.
#[derive(Debug, Clone, Copy)]
enum Field {
    ShortName,
    LongName,
    Position,
    MenuCategory,
    HtmlFileName,
}

impl ReportBuilder {
    fn set(&mut self, field: Field, text: &str) {
        match field {
            Field::ShortName => self.short_name = text.to_string(),
            Field::LongName => self.long_name = text.to_string(),
            Field::Position => self.position = text.parse().ok(),
            Field::MenuCategory => self.category = text.to_string(),
            Field::HtmlFileName => self.html_file_name = text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOLDER: &str = "https://www.sec.gov/Archives/edgar/data/320193/000032019323000077";

    const SAMPLE_SUMMARY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<FilingSummary>
  <Version>22.4</Version>
  <MyReports>
    <Report instance="aapl-20230930.htm">
      <IsDefault>false</IsDefault>
      <HasEmbeddedReports>false</HasEmbeddedReports>
      <HtmlFileName>R1.htm</HtmlFileName>
      <LongName>0000001 - Document - Cover Page</LongName>
      <ReportType>Sheet</ReportType>
      <Role>http://www.apple.com/role/CoverPage</Role>
      <ShortName>Cover Page</ShortName>
      <MenuCategory>Cover</MenuCategory>
      <Position>1</Position>
    </Report>
    <Report instance="aapl-20230930.htm">
      <IsDefault>false</IsDefault>
      <HasEmbeddedReports>false</HasEmbeddedReports>
      <HtmlFileName>R2.htm</HtmlFileName>
      <LongName>0000002 - Statement - CONSOLIDATED BALANCE SHEETS</LongName>
      <ReportType>Sheet</ReportType>
      <Role>http://www.apple.com/role/CONSOLIDATEDBALANCESHEETS</Role>
      <ShortName>CONSOLIDATED BALANCE SHEETS</ShortName>
      <MenuCategory>Statements</MenuCategory>
      <Position>2</Position>
    </Report>
    <Report instance="aapl-20230930.htm">
      <HtmlFileName>R3.htm</HtmlFileName>
      <LongName>0000003 - Statement - CONSOLIDATED STATEMENTS OF OPERATIONS</LongName>
      <ShortName>CONSOLIDATED STATEMENTS OF OPERATIONS</ShortName>
      <MenuCategory>Statements</MenuCategory>
      <Position>3</Position>
    </Report>
    <Report>
      <LongName>All Reports Book</LongName>
      <ShortName>All Reports</ShortName>
    </Report>
  </MyReports>
</FilingSummary>"#;

    #[test]
    fn test_parses_reports_in_order() {
        let summary = FilingSummary::parse(SAMPLE_SUMMARY, FOLDER).unwrap();
        assert_eq!(summary.reports.len(), 3);
        assert_eq!(summary.reports[0].short_name, "Cover Page");
        assert_eq!(summary.reports[0].category, "Cover");
        assert_eq!(summary.reports[0].position, Some(1));
        assert_eq!(summary.reports[1].short_name, "CONSOLIDATED BALANCE SHEETS");
        assert_eq!(summary.reports[1].url, format!("{}/R2.htm", FOLDER));
    }

    #[test]
    fn test_skips_trailing_book_entry() {
        let summary = FilingSummary::parse(SAMPLE_SUMMARY, FOLDER).unwrap();
        assert!(
            summary
                .reports
                .iter()
                .all(|r| r.short_name != "All Reports")
        );
    }

    #[test]
    fn test_has_statements() {
        let summary = FilingSummary::parse(SAMPLE_SUMMARY, FOLDER).unwrap();
        assert!(summary.has_statements());
        assert_eq!(summary.statement_reports().len(), 2);
    }

    #[test]
    fn test_manifest_without_statements() {
        let xml = r#"<FilingSummary><MyReports>
            <Report><ShortName>Cover</ShortName><MenuCategory>Cover</MenuCategory><HtmlFileName>R1.htm</HtmlFileName></Report>
            <Report><ShortName>All Reports</ShortName></Report>
        </MyReports></FilingSummary>"#;
        let summary = FilingSummary::parse(xml, FOLDER).unwrap();
        assert!(!summary.has_statements());
        assert!(summary.statement_reports().is_empty());
    }
}
