#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;

use tempfile::TempDir;
use zip::{
    unstable::write::FileOptionsExt, write::SimpleFileOptions, CompressionMethod, ZipWriter,
};

/// Scratch directory holding zip archives built for a single test
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Fixture {
        Fixture {
            dir: tempfile::tempdir().expect("create scratch directory"),
        }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `name` inside the fixture, as the string handed to the library
    pub fn path(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().into_owned()
    }

    /// Write a deflated archive
    pub fn zip(&self, name: &str, files: &[(&str, &[u8])]) -> String {
        self.write(name, build(files, SimpleFileOptions::default()))
    }

    /// Write an archive whose entries are all encrypted with `password`
    pub fn encrypted_zip(
        &self,
        name: &str,
        files: &[(&str, &[u8])],
        password: &'static str,
    ) -> String {
        let options = SimpleFileOptions::default().with_deprecated_encryption(password.as_bytes());
        self.write(name, build(files, options))
    }

    /// Write a stored archive whose entry names are the given bytes, without the UTF-8 flag
    pub fn zip_with_raw_names(&self, name: &str, files: &[(&[u8], &[u8])]) -> String {
        let placeholders = files
            .iter()
            .map(|(raw, _)| placeholder(raw))
            .collect::<Vec<_>>();

        let named = placeholders
            .iter()
            .zip(files)
            .map(|(placeholder, (_, data))| (placeholder.as_str(), *data))
            .collect::<Vec<_>>();

        let mut bytes = build(
            &named,
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
        );
        for (placeholder, (raw, _)) in placeholders.iter().zip(files) {
            replace_all(&mut bytes, placeholder.as_bytes(), raw);
        }

        self.write(name, bytes)
    }

    /// Write a stored archive after letting `patch` damage its bytes
    pub fn patched_zip(
        &self,
        name: &str,
        files: &[(&str, &[u8])],
        patch: impl FnOnce(&mut Vec<u8>),
    ) -> String {
        let mut bytes = build(
            files,
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
        );
        patch(&mut bytes);
        self.write(name, bytes)
    }

    fn write(&self, name: &str, bytes: Vec<u8>) -> String {
        let path = self.path(name);
        std::fs::write(&path, bytes).expect("write fixture archive");
        path
    }
}

fn build(files: &[(&str, &[u8])], options: SimpleFileOptions) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in files {
        zip.start_file(*name, options.clone()).expect("start entry");
        zip.write_all(data).expect("write entry");
    }
    zip.finish().expect("finish archive").into_inner()
}

/// Same length as `raw` with every non ASCII byte swapped for `_`
fn placeholder(raw: &[u8]) -> String {
    raw.iter()
        .map(|b| if b.is_ascii() { *b as char } else { '_' })
        .collect()
}

/// Offset of the first occurrence of `needle`
pub fn find(haystack: &[u8], needle: &[u8]) -> usize {
    haystack
        .windows(needle.len())
        .position(|w| w == needle)
        .expect("needle is present")
}

fn replace_all(haystack: &mut [u8], needle: &[u8], with: &[u8]) {
    assert_eq!(needle.len(), with.len());
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if &haystack[i..i + needle.len()] == needle {
            haystack[i..i + needle.len()].copy_from_slice(with);
            i += needle.len();
        } else {
            i += 1;
        }
    }
}
