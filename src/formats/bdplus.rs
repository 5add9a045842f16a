//! BD+ security virtual machine payload.

use crate::formats::ParsedFile;
use crate::report::Report;
use serde::Serialize;

/// Parsed BD+ SVM payload. The raw data block is carried but never printed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Svm {
    pub signature: Option<String>,
    pub unknown_1: Option<Vec<u8>>,
    pub year: Option<u16>,
    pub month: Option<u8>,
    pub day: Option<u8>,
    pub unknown_2: Option<Vec<u8>>,
    pub length: Option<u32>,
    pub data: Option<Vec<u8>>,
}

pub(crate) fn render_entry(file: &ParsedFile, report: &mut Report) -> bool {
    match file {
        ParsedFile::BdPlus(model) => {
            print(report, model);
            true
        }
        _ => false,
    }
}

pub(crate) fn export_entry(file: &ParsedFile) -> Option<String> {
    match file {
        ParsedFile::BdPlus(model) => serde_json::to_string_pretty(model).ok(),
        _ => None,
    }
}

/// Render a BD+ SVM report.
pub fn print(report: &mut Report, svm: &Svm) {
    report.title("BD+ SVM Information:");
    report.field_str("Signature", svm.signature.as_deref());
    report.field_bytes("Unknown 1", svm.unknown_1.as_deref());
    report.field_num("Year", svm.year);
    report.field_num("Month", svm.month);
    report.field_num("Day", svm.day);
    report.field_bytes("Unknown 2", svm.unknown_2.as_deref());
    report.field_num("Length", svm.length);
    report.blank();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_absent_renders_defaults() {
        let mut report = Report::new();
        print(&mut report, &Svm::default());
        let text = report.as_str();
        assert!(text.starts_with("BD+ SVM Information:\n"));
        assert!(text.contains("Signature: \n"));
        assert!(text.contains("Unknown 1: [NULL]"));
        assert!(text.contains("Year: 0 (0x0)"));
    }

    #[test]
    fn test_date_fields() {
        let svm = Svm {
            signature: Some(String::from("BDSVM_CC")),
            year: Some(2007),
            month: Some(12),
            day: Some(31),
            length: Some(65536),
            ..Svm::default()
        };
        let mut report = Report::new();
        print(&mut report, &svm);
        let text = report.as_str();
        assert!(text.contains("Signature: BDSVM_CC"));
        assert!(text.contains("Year: 2007 (0x7D7)"));
        assert!(text.contains("Length: 65536 (0x10000)"));
        // The raw payload block never appears in the report.
        assert!(!text.contains("Data:"));
    }
}
