use std::io::Write;

use serde_json::{json, Value};

use crate::report::LogReport;

/// Convert the report to its JSON representation.
pub fn report_json(report: &LogReport) -> Value {
    let pointers: Vec<_> = report
        .pointers
        .iter()
        .map(|pointer| {
            json!({
                "path": pointer.loc.pathname(),
                "linenr": if pointer.loc.line == 0 { None } else { Some(pointer.loc.line) },
                "column": if pointer.loc.column == 0 { None } else { Some(pointer.loc.column) },
                "length": pointer.length,
                "tag": pointer.msg,
            })
        })
        .collect();
    json!({
        "severity": report.severity,
        "key": report.key,
        "message": &report.msg,
        "info": &report.info,
        "locations": pointers,
    })
}

/// Write all the reports as one JSON array.
pub fn log_reports_json(out: &mut dyn Write, reports: &[LogReport]) -> std::io::Result<()> {
    let reports: Vec<Value> = reports.iter().map(report_json).collect();
    serde_json::to_writer_pretty(&mut *out, &reports)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::report::{err, ErrorKey};
    use crate::token::Loc;

    #[test]
    fn test_json_fields() {
        let loc = Loc::for_file(Path::new("npc_units_custom.txt"));
        let report = err(ErrorKey::ParseError).msg("unexpected }").loc(&loc).build();
        let value = report_json(&report);
        assert_eq!(value["severity"], "error");
        assert_eq!(value["key"], "parse-error");
        assert_eq!(value["message"], "unexpected }");
        assert_eq!(value["locations"][0]["path"], "npc_units_custom.txt");
        assert!(value["locations"][0]["linenr"].is_null());
    }
}
