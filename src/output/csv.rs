//! CSV output of the public IP report.

use crate::models::{ReportRow, CSV_HEADER};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Record terminator; spreadsheet tools expect CRLF.
const LINE_END: &str = "\r\n";

/// Write the header and all rows to `path`, replacing any existing file.
///
/// The parent directory is created if it does not exist.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> io::Result<()> {
    log::info!("#Start write_report() rows={} path={}", rows.len(), path.display());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    write_rows(&mut writer, rows)?;
    writer.flush()?;

    log::info!("CSV written to {}", path.display());
    Ok(())
}

/// Write the header and rows to any writer.
pub fn write_rows<W: Write>(writer: &mut W, rows: &[ReportRow]) -> io::Result<()> {
    write_record(writer, &CSV_HEADER)?;
    for row in rows {
        write_record(writer, &row.fields())?;
    }
    Ok(())
}

fn write_record<W: Write>(writer: &mut W, fields: &[&str]) -> io::Result<()> {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            writer.write_all(b",")?;
        }
        writer.write_all(escape_csv_field(field).as_bytes())?;
    }
    writer.write_all(LINE_END.as_bytes())
}

/// Quote a field when it contains a comma, a double quote or a line break.
pub fn escape_csv_field(input: &str) -> String {
    if input.contains(&[',', '"', '\r', '\n'][..]) {
        // Enclose in double quotes and double any quotes inside.
        let escaped = input.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        input.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RowType;

    fn row(name: &str, row_type: RowType, public_ip: &str) -> ReportRow {
        ReportRow {
            network_name: name.to_string(),
            network_id: "L_1".to_string(),
            tags: "hq, production".to_string(),
            dashboard_url: "https://n1.meraki.com/hq".to_string(),
            serial: String::new(),
            model: String::new(),
            interface: "internet1".to_string(),
            row_type,
            public_ip: public_ip.to_string(),
            private_ip: "10.0.0.1".to_string(),
            rule_name: "web".to_string(),
            status: String::new(),
        }
    }

    #[test]
    fn test_escape_plain() {
        assert_eq!(escape_csv_field("203.0.113.10"), "203.0.113.10");
        assert_eq!(escape_csv_field(""), "");
    }

    #[test]
    fn test_escape_comma_and_quotes() {
        assert_eq!(escape_csv_field("HQ, Auckland"), "\"HQ, Auckland\"");
        assert_eq!(escape_csv_field("Lab \"A\""), "\"Lab \"\"A\"\"\"");
        assert_eq!(escape_csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_header_only_when_no_rows() {
        let mut out = Vec::new();
        write_rows(&mut out, &[]).expect("write failed");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Network Name,Network ID,Tags,Dashboard URL,Serial,Model,Interface/Uplink,Type,Public IP,Private IP,Rule Name,Status\r\n"
        );
    }

    #[test]
    fn test_rows_are_quoted_and_ordered() {
        let rows = vec![
            row("HQ", RowType::OneToManyNat, "1.2.3.4"),
            row("HQ", RowType::OneToOneNat, "5.6.7.8"),
        ];
        let mut out = Vec::new();
        write_rows(&mut out, &rows).expect("write failed");
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.split("\r\n").collect();

        assert_eq!(lines.len(), 4, "header, two rows and a trailing empty split");
        assert_eq!(
            lines[1],
            "HQ,L_1,\"hq, production\",https://n1.meraki.com/hq,,,internet1,one-to-many NAT,1.2.3.4,10.0.0.1,web,"
        );
        assert!(lines[2].contains(",one-to-one NAT,5.6.7.8,"));
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_write_report_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("reports").join("public_ips_report.csv");

        write_report(&path, &[row("A", RowType::Uplink, "1.1.1.1")]).expect("first write");
        write_report(&path, &[]).expect("second write");

        let text = fs::read_to_string(&path).expect("read back");
        assert_eq!(text.lines().count(), 1, "second run replaces the first");
        assert!(text.starts_with("Network Name,"));
    }

    #[test]
    fn test_write_report_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("reports");
        fs::write(&blocker, "not a directory").expect("create blocker");

        let result = write_report(&blocker.join("public_ips_report.csv"), &[]);
        assert!(result.is_err());
    }
}
