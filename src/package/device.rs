//! Limits of the on-device updater.
//!
//! The format allows names of 0 to 65535 bytes and files up to 4 GiB, but the
//! updater that consumes the package aborts the update on any record outside
//! the limits below.
use crate::error::FormatError;
use crate::types::FileRecord;

pub const DEVICE_MIN_NAME_LEN: usize = 1;
/// Names are stored below `/web/` in a 300-byte path buffer.
pub const DEVICE_MAX_NAME_LEN: usize = 250;
pub const DEVICE_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Returns one error per limit the device would reject, in record order.
pub fn device_limit_violations(records: &[FileRecord]) -> Vec<FormatError> {
    let mut violations = Vec::new();
    for r in records {
        if !(DEVICE_MIN_NAME_LEN..=DEVICE_MAX_NAME_LEN).contains(&r.name.len()) {
            violations.push(FormatError::DeviceNameLimit {
                name: r.name.clone(),
                len: r.name.len(),
                min: DEVICE_MIN_NAME_LEN,
                max: DEVICE_MAX_NAME_LEN,
            });
        }
        let size = r.content.len() as u64;
        if size > DEVICE_MAX_FILE_SIZE {
            violations.push(FormatError::DeviceFileSize {
                name: r.name.clone(),
                len: size,
                max: DEVICE_MAX_FILE_SIZE,
            });
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_limits() {
        let records = vec![
            FileRecord::new("index.html", Vec::new()),
            FileRecord::new("", Vec::new()),
            FileRecord::new("d".repeat(250), Vec::new()),
            FileRecord::new("d".repeat(251), Vec::new()),
            FileRecord::new("d".repeat(252), Vec::new()),
        ];
        let violations = device_limit_violations(&records);
        assert_eq!(violations.len(), 3);
        assert!(matches!(
            &violations[0],
            FormatError::DeviceNameLimit { len: 0, .. }
        ));
        assert!(matches!(
            &violations[1],
            FormatError::DeviceNameLimit { len: 251, max: 250, .. }
        ));
        assert!(matches!(
            &violations[2],
            FormatError::DeviceNameLimit { len: 252, .. }
        ));
    }

    #[test]
    fn test_file_size_limit() {
        let records = vec![
            FileRecord::new("fits.bin", vec![0; 1024 * 1024]),
            FileRecord::new("big.bin", vec![0; 1024 * 1024 + 1]),
        ];
        let violations = device_limit_violations(&records);
        assert_eq!(
            violations,
            vec![FormatError::DeviceFileSize {
                name: "big.bin".to_string(),
                len: 1024 * 1024 + 1,
                max: 1024 * 1024,
            }]
        );
    }

    #[test]
    fn test_one_violation_per_limit() {
        let records = vec![FileRecord::new("n".repeat(252), vec![0; 2 * 1024 * 1024])];
        let violations = device_limit_violations(&records);
        assert_eq!(violations.len(), 2);
        assert!(matches!(&violations[0], FormatError::DeviceNameLimit { .. }));
        assert!(matches!(&violations[1], FormatError::DeviceFileSize { .. }));
    }
}
