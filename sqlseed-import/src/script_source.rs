//! Reads SQL script files into script-batch operations.

use std::path::Path;

use sqlseed_core::{Operation, Origin, split_script};

use crate::error::SourceError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decode script bytes. Accepts UTF-8 with or without a BOM, and UTF-16 in
/// either byte order (with a BOM, or little-endian without one, which is
/// what some database tools write). `None` when nothing fits.
pub fn decode_script(bytes: &[u8]) -> Option<String> {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return String::from_utf8(rest.to_vec()).ok();
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        return decode_utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        return decode_utf16(rest, u16::from_be_bytes);
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => Some(text.to_string()),
        Err(_) if bytes.len() % 2 == 0 => decode_utf16(bytes, u16::from_le_bytes),
        Err(_) => None,
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}

pub fn read_script_file(path: &Path) -> Result<String, SourceError> {
    let bytes = std::fs::read(path).map_err(|e| SourceError::io(path, e))?;
    decode_script(&bytes).ok_or_else(|| SourceError::Encoding {
        path: path.to_path_buf(),
    })
}

/// Split a script file into batches, each tagged with the file name and its
/// 1-based batch number.
pub fn script_operations(path: &Path) -> Result<Vec<Operation>, SourceError> {
    let text = read_script_file(path)?;
    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let operations = split_script(&text)
        .into_iter()
        .enumerate()
        .map(|(i, batch)| Operation::script(batch).with_origin(Origin::new(source.clone(), i + 1)))
        .collect();
    Ok(operations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16le(text: &str, bom: bool) -> Vec<u8> {
        let mut bytes = if bom { vec![0xFF, 0xFE] } else { Vec::new() };
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn strips_utf8_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"CREATE TABLE A (x INT);\n");
        assert_eq!(decode_script(&bytes).as_deref(), Some("CREATE TABLE A (x INT);\n"));
    }

    #[test]
    fn falls_back_to_utf16() {
        let text = "SELECT 'é';\nGO\n";
        assert_eq!(decode_script(&utf16le(text, true)).as_deref(), Some(text));
        assert_eq!(decode_script(&utf16le(text, false)).as_deref(), Some(text));

        let mut be = vec![0xFE, 0xFF];
        for unit in text.encode_utf16() {
            be.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode_script(&be).as_deref(), Some(text));
    }

    #[test]
    fn rejects_odd_length_garbage() {
        assert_eq!(decode_script(&[0xC3, 0x28, 0xFF]), None);
    }

    #[test]
    fn batches_carry_file_and_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Tables.sql");
        std::fs::write(
            &path,
            "CREATE TABLE A (x INT);\nGO\n\nGO\nCREATE TABLE B (y INT);\n",
        )
        .unwrap();

        let operations = script_operations(&path).unwrap();
        assert_eq!(operations.len(), 2);
        assert_eq!(operations[0].origin(), Some(&Origin::new("Tables.sql", 1)));
        assert_eq!(operations[1].origin(), Some(&Origin::new("Tables.sql", 2)));
        match &operations[1] {
            Operation::ScriptBatch { text, .. } => assert_eq!(text, "CREATE TABLE B (y INT);\n"),
            other => panic!("unexpected operation: {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_script_file(Path::new("/nonexistent/none.sql")).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
