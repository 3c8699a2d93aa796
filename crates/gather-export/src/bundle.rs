//! Zip bundle of all export formats

use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gather_wiki::Collection;

use crate::context::ExportContext;
use crate::format::render_all;

/// Default archive file name
pub const ARCHIVE_NAME: &str = "collections.zip";

/// Pack `file name → content` into an in-memory deflate zip.
pub fn package(outputs: &BTreeMap<String, String>) -> Result<Vec<u8>> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, content) in outputs {
        writer
            .start_file(name.as_str(), options)
            .with_context(|| format!("Cannot add {name} to archive"))?;
        writer
            .write_all(content.as_bytes())
            .with_context(|| format!("Cannot write {name} to archive"))?;
    }

    let bytes = writer
        .finish()
        .context("Cannot finalize archive")?
        .into_inner();
    log::debug!("archive: {} entries, {} bytes", outputs.len(), bytes.len());
    Ok(bytes)
}

/// Render all four formats and pack them.
pub fn build_bundle(collections: &[Collection], ctx: &ExportContext) -> Result<Vec<u8>> {
    package(&render_all(collections, ctx))
}

/// Write archive bytes to `dir/name` via a temp file and rename.
pub fn save(bytes: &[u8], dir: &Path, name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create output directory {}", dir.display()))?;
    let path = dir.join(name);
    let tmp = dir.join(format!("{name}.tmp"));
    std::fs::write(&tmp, bytes).with_context(|| format!("Cannot write {}", tmp.display()))?;
    std::fs::rename(&tmp, &path)
        .with_context(|| format!("Cannot move archive to {}", path.display()))?;
    log::info!("Saved {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn package_round_trips_entries() {
        let mut outputs = BTreeMap::new();
        outputs.insert("a.txt".to_string(), "alpha".to_string());
        outputs.insert("b.txt".to_string(), String::new());

        let bytes = package(&outputs).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut content = String::new();
        archive
            .by_name("a.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "alpha");
    }

    #[test]
    fn save_writes_file_and_leaves_no_tmp() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = dir.path().join("nested");
        let path = save(b"PK", &out, ARCHIVE_NAME).unwrap();
        assert_eq!(path, out.join("collections.zip"));
        assert_eq!(std::fs::read(&path).unwrap(), b"PK");
        assert!(!out.join("collections.zip.tmp").exists());
    }
}
