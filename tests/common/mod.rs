//! Helpers shared by the integration tests: archive readback and XML checks.
#![allow(dead_code)]

use image::{ImageFormat, RgbaImage};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

pub type Archive = zip::ZipArchive<Cursor<Vec<u8>>>;

pub fn open(bytes: Vec<u8>) -> Archive {
    zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip")
}

pub fn open_file(path: &Path) -> Archive {
    open(std::fs::read(path).expect("readable package"))
}

pub fn names(archive: &Archive) -> Vec<String> {
    archive.file_names().map(str::to_string).collect()
}

pub fn read(archive: &mut Archive, name: &str) -> String {
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing entry {name}"))
        .read_to_string(&mut content)
        .unwrap();
    content
}

/// Parse `xml` completely, failing the test on the first error.
pub fn assert_well_formed(name: &str, xml: &str) {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(_) => {},
            Err(e) => panic!("{name} is not well-formed: {e}"),
        }
    }
}

/// Values of attributes named `attribute` on every element.
pub fn attribute_values(xml: &str, attribute: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut values = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == attribute.as_bytes() {
                        values.push(String::from_utf8_lossy(&attr.value).into_owned());
                    }
                }
            },
            Ok(Event::Eof) => break,
            Ok(_) => {},
            Err(e) => panic!("malformed XML: {e}"),
        }
    }
    values
}

/// Relationship table: id to (target, external).
pub fn relationships(xml: &str) -> HashMap<String, (String, bool)> {
    let mut reader = Reader::from_str(xml);
    let mut table = HashMap::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"Relationship" => {
                let mut id = String::new();
                let mut target = String::new();
                let mut external = false;
                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).into_owned();
                    match attr.key.as_ref() {
                        b"Id" => id = value,
                        b"Target" => target = value,
                        b"TargetMode" => external = value == "External",
                        _ => {},
                    }
                }
                table.insert(id, (target, external));
            },
            Ok(Event::Eof) => break,
            Ok(_) => {},
            Err(e) => panic!("malformed relationships: {e}"),
        }
    }
    table
}

/// Write a small PNG into `dir` and return its path.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::new(width, height)
        .save_with_format(&path, ImageFormat::Png)
        .expect("png written");
    path
}
