use super::FORMAT;
use crate::error::FormatError;
use crate::ext::io::*;
use crate::types::FileRecord;
use anyhow::Result;
use std::io::Write;

/// Checks that a record fits in its length prefixes and returns them.
fn record_lengths(name: &str, content_len: usize) -> Result<(u16, u32)> {
    let name_len = u16::try_from(name.len()).map_err(|_| FormatError::NameTooLong {
        name: name.to_string(),
        len: name.len(),
        max: FORMAT.max_name_len,
    })?;
    let content_len = u32::try_from(content_len).map_err(|_| FormatError::ContentTooLarge {
        name: name.to_string(),
        len: content_len as u64,
        max: FORMAT.max_content_len,
    })?;
    Ok((name_len, content_len))
}

/// Encoded size of one record, prefix included.
pub fn encoded_len(record: &FileRecord) -> u64 {
    (FORMAT.record_prefix_len + record.name.len() + record.content.len()) as u64
}

/// Serializes `records` into a filesystem region, in the given order.
///
/// Each record is `name_len u16, content_len u32, name, content`, with nothing
/// between records.
pub fn encode_fs_region(records: &[FileRecord]) -> Result<Vec<u8>> {
    let mut lengths = Vec::with_capacity(records.len());
    let mut total = 0u64;
    for record in records {
        lengths.push(record_lengths(&record.name, record.content.len())?);
        total += encoded_len(record);
    }
    if total > u32::MAX as u64 {
        return Err(FormatError::RegionTooLarge(total).into());
    }
    let mut data = Vec::with_capacity(total as usize);
    for (record, (name_len, content_len)) in records.iter().zip(lengths) {
        data.write_u16(name_len)?;
        data.write_u32(content_len)?;
        data.write_all(record.name.as_bytes())?;
        data.write_all(&record.content)?;
    }
    Ok(data)
}

/// Parses a filesystem region back into records.
///
/// The region must be consumed exactly; a record running past the end is an error.
pub fn decode_fs_region(data: &[u8]) -> Result<Vec<FileRecord>> {
    let mut reader = MemReaderRef::new(data);
    let mut records = Vec::new();
    while !reader.is_eof() {
        let index = records.len();
        if reader.remaining() < FORMAT.record_prefix_len {
            return Err(FormatError::RecordOverrun {
                index,
                need: FORMAT.record_prefix_len as u64,
                have: reader.remaining() as u64,
            }
            .into());
        }
        let name_len = reader.read_u16()? as usize;
        let content_len = reader.read_u32()? as usize;
        if reader.remaining() < name_len + content_len {
            return Err(FormatError::RecordOverrun {
                index,
                need: (name_len + content_len) as u64,
                have: reader.remaining() as u64,
            }
            .into());
        }
        let name = reader.take_slice(name_len)?;
        let name = std::str::from_utf8(name).map_err(|_| FormatError::InvalidName(index))?;
        let content = reader.take_slice(content_len)?;
        records.push(FileRecord::new(name, content.to_vec()));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_single_record() {
        let records = vec![FileRecord::new("a.txt", b"hello".to_vec())];
        let data = encode_fs_region(&records).unwrap();
        assert_eq!(data.len(), 16);
        assert_eq!(data, b"\x05\x00\x05\x00\x00\x00a.txthello");
    }

    #[test]
    fn test_encode_empty() {
        assert!(encode_fs_region(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_encode_keeps_order() {
        let records = vec![
            FileRecord::new("z", b"1".to_vec()),
            FileRecord::new("a", Vec::new()),
            FileRecord::new("", b"xy".to_vec()),
        ];
        let data = encode_fs_region(&records).unwrap();
        assert_eq!(
            data,
            b"\x01\x00\x01\x00\x00\x00z1\x01\x00\x00\x00\x00\x00a\x00\x00\x02\x00\x00\x00xy"
        );
    }

    #[test]
    fn test_length_prefix_law() {
        let records = vec![
            FileRecord::new("index.html", vec![0x3C; 300]),
            FileRecord::new("css/style.css", vec![0x20; 70000]),
            FileRecord::new("favicon.ico", Vec::new()),
        ];
        let data = encode_fs_region(&records).unwrap();
        let expected: u64 = records.iter().map(encoded_len).sum();
        assert_eq!(data.len() as u64, expected);

        let mut reader = MemReaderRef::new(&data);
        for record in &records {
            let name_len = reader.read_u16().unwrap() as usize;
            let content_len = reader.read_u32().unwrap() as usize;
            assert_eq!(name_len, record.name.len());
            assert_eq!(content_len, record.content.len());
            assert_eq!(reader.take_slice(name_len).unwrap(), record.name.as_bytes());
            assert_eq!(reader.take_slice(content_len).unwrap(), &record.content[..]);
        }
        assert!(reader.is_eof());
    }

    #[test]
    fn test_longest_name() {
        let name = "n".repeat(65535);
        let records = vec![FileRecord::new(name.clone(), b"x".to_vec())];
        let data = encode_fs_region(&records).unwrap();
        assert_eq!(&data[..2], &[0xFF, 0xFF]);
        assert_eq!(data.len(), 6 + 65535 + 1);
        assert_eq!(decode_fs_region(&data).unwrap()[0].name, name);
    }

    #[test]
    fn test_name_too_long() {
        // Multi-byte characters count in bytes: 21846 * 3 = 65538.
        for name in ["n".repeat(65536), "\u{20AC}".repeat(21846)] {
            let records = vec![FileRecord::new(name.clone(), Vec::new())];
            let err = encode_fs_region(&records).unwrap_err();
            assert_eq!(
                err.downcast_ref::<FormatError>(),
                Some(&FormatError::NameTooLong {
                    len: name.len(),
                    name,
                    max: 65535,
                })
            );
        }
    }

    #[test]
    fn test_content_length_limit() {
        assert_eq!(record_lengths("a", u32::MAX as usize).unwrap(), (1, u32::MAX));
        #[cfg(target_pointer_width = "64")]
        {
            let err = record_lengths("a", u32::MAX as usize + 1).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<FormatError>(),
                Some(FormatError::ContentTooLarge { .. })
            ));
        }
    }

    #[test]
    fn test_decode_region() {
        let records = vec![
            FileRecord::new("web/index.html", b"<html></html>".to_vec()),
            FileRecord::new("config.json", b"{}".to_vec()),
            FileRecord::new("empty", Vec::new()),
        ];
        let data = encode_fs_region(&records).unwrap();
        assert_eq!(decode_fs_region(&data).unwrap(), records);
    }

    #[test]
    fn test_decode_overrun() {
        let data = encode_fs_region(&[FileRecord::new("a.txt", b"hello".to_vec())]).unwrap();
        let err = decode_fs_region(&data[..data.len() - 1]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<FormatError>(),
            Some(&FormatError::RecordOverrun {
                index: 0,
                need: 10,
                have: 9
            })
        );
        let err = decode_fs_region(&data[..4]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FormatError>(),
            Some(FormatError::RecordOverrun { index: 0, need: 6, have: 4 })
        ));
    }

    #[test]
    fn test_decode_invalid_name() {
        let data = b"\x01\x00\x00\x00\x00\x00\xFF";
        let err = decode_fs_region(data).unwrap_err();
        assert_eq!(
            err.downcast_ref::<FormatError>(),
            Some(&FormatError::InvalidName(0))
        );
    }
}
