use std::fs::read;
use std::io::Write;

use unicode_width::UnicodeWidthChar;

use crate::helpers::TooltipHashMap;
use crate::report::output_style::{OutputStyle, Styled};
use crate::report::{LogReport, PointedMessage, Severity};
use crate::textfile::decode_bytes;
use crate::token::Loc;

/// Prints reports in the human-readable format.
///
/// Note that this format is not stable across versions. Use the JSON output for tooling.
#[derive(Debug)]
pub struct ReportWriter<'a> {
    styles: &'a OutputStyle,
    /// Files that have been read in to get the lines where errors occurred.
    filecache: TooltipHashMap<Loc, Option<String>>,
}

impl<'a> ReportWriter<'a> {
    pub fn new(styles: &'a OutputStyle) -> Self {
        ReportWriter { styles, filecache: TooltipHashMap::default() }
    }

    /// Log the report.
    pub fn log_report(&mut self, out: &mut dyn Write, report: &LogReport) -> std::io::Result<()> {
        self.log_line_title(out, report)?;
        let indentation = report.indentation();
        let mut previous: Option<&PointedMessage> = None;
        for pointer in &report.pointers {
            self.log_pointer(out, previous, pointer, indentation, report.severity)?;
            previous = Some(pointer);
        }
        if let Some(info) = &report.info {
            self.log_line_info(out, indentation, info)?;
        }
        // Write a blank line to visually separate reports:
        writeln!(out)
    }

    /// Fetch the contents of a single line from a file.
    fn get_line(&mut self, loc: &Loc) -> Option<String> {
        if loc.line == 0 {
            return None;
        }
        let file_loc = Loc::for_file(loc.pathname());
        let contents = self
            .filecache
            .entry(file_loc)
            .or_insert_with(|| read(loc.pathname()).ok().map(|bytes| decode_bytes(&bytes).0));
        contents.as_ref()?.lines().nth(loc.line as usize - 1).map(str::to_string)
    }

    fn log_pointer(
        &mut self,
        out: &mut dyn Write,
        previous: Option<&PointedMessage>,
        pointer: &PointedMessage,
        indentation: usize,
        severity: Severity,
    ) -> std::io::Result<()> {
        if previous.is_none_or(|previous| previous.loc.pathname() != pointer.loc.pathname()) {
            // This pointer is not in the same file as the previous pointer. Print file location as well:
            self.log_line_file_location(out, pointer, indentation)?;
        }
        if pointer.loc.line == 0 {
            // Zero-length line means the location is an entire file,
            // not any particular location within the file.
            return Ok(());
        }
        if let Some(line) = self.get_line(&pointer.loc) {
            self.log_line_from_source(out, pointer, indentation, &line)?;
            self.log_line_carets(out, pointer, &line, indentation, severity)?;
        }
        Ok(())
    }

    /// Log the first line of a report, containing the severity level and the error message.
    fn log_line_title(&self, out: &mut dyn Write, report: &LogReport) -> std::io::Result<()> {
        let tag = self.styles.style(Styled::Tag(report.severity, true));
        let key = self.styles.style(Styled::Tag(report.severity, false));
        writeln!(
            out,
            "{}{}{}{}: {}",
            tag.paint(report.severity.to_string()),
            key.paint("("),
            key.paint(report.key.to_string()),
            key.paint(")"),
            self.styles.style(Styled::ErrorMessage).paint(report.msg.as_str()),
        )
    }

    /// Log the optional info line that is part of the overall report.
    fn log_line_info(
        &self,
        out: &mut dyn Write,
        indentation: usize,
        info: &str,
    ) -> std::io::Result<()> {
        writeln!(
            out,
            "{:indentation$} {} {} {}",
            "",
            self.styles.style(Styled::Location).paint("="),
            self.styles.style(Styled::InfoTag).paint("Info:"),
            self.styles.style(Styled::Info).paint(info),
        )
    }

    /// Log the line containing the filename and position.
    fn log_line_file_location(
        &self,
        out: &mut dyn Write,
        pointer: &PointedMessage,
        indentation: usize,
    ) -> std::io::Result<()> {
        let location = self.styles.style(Styled::Location);
        writeln!(
            out,
            "{:indentation$}{} {}",
            "",
            location.paint("-->"),
            location.paint(pointer.loc.to_string()),
        )
    }

    /// Print a line from the source file.
    fn log_line_from_source(
        &self,
        out: &mut dyn Write,
        pointer: &PointedMessage,
        indentation: usize,
        line: &str,
    ) -> std::io::Result<()> {
        let location = self.styles.style(Styled::Location);
        writeln!(
            out,
            "{} {} {}",
            location.paint(format!("{:indentation$}", pointer.loc.line)),
            location.paint("|"),
            self.styles.style(Styled::SourceText).paint(line),
        )
    }

    fn log_line_carets(
        &self,
        out: &mut dyn Write,
        pointer: &PointedMessage,
        line: &str,
        indentation: usize,
        severity: Severity,
    ) -> std::io::Result<()> {
        let mut spacing = String::new();
        for c in line.chars().take((pointer.loc.column as usize).saturating_sub(1)) {
            if c == '\t' {
                spacing.push('\t');
            } else {
                for _ in 0..c.width().unwrap_or(0) {
                    spacing.push(' ');
                }
            }
        }
        let tag = self.styles.style(Styled::Tag(severity, true));
        let arrow = if pointer.msg.is_some() { " <-- " } else { "" };
        writeln!(
            out,
            "{:indentation$} {} {spacing}{}{}",
            "",
            self.styles.style(Styled::Location).paint("|"),
            tag.paint(format!("{:^^width$}", "", width = pointer.length)),
            tag.paint(format!("{arrow}{}", pointer.msg.as_deref().unwrap_or(""))),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::report::{warn, ErrorKey};

    #[test]
    fn test_plain_report() {
        let styles = OutputStyle::no_color();
        let mut writer = ReportWriter::new(&styles);
        let loc = Loc::for_file(Path::new("resource/addon_english.txt"));
        let report = warn(ErrorKey::Localization)
            .msg("no `Tokens` block found")
            .info("every key will be listed as missing")
            .loc(&loc)
            .build();
        let mut out = Vec::new();
        writer.log_report(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();
        let expected = [
            "warning(localization): no `Tokens` block found",
            " --> resource/addon_english.txt",
            "  = Info: every key will be listed as missing",
            "",
            "",
        ];
        assert_eq!(text, expected.join("\n"));
    }
}
