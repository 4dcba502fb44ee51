//! Hand-built ZIP fixtures for integration tests.
#![allow(dead_code)] // each test binary uses its own subset of helpers
//!
//! Writing the fixture bytes directly keeps the tests independent of
//! the parser under test: local headers, central directory, and EOCD
//! are laid out field by field per the PKZIP APPNOTE.

use byteorder::{LittleEndian, WriteBytesExt};
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::Write;

struct CentralRecord {
    name: String,
    method: u16,
    crc: u32,
    compressed: u32,
    uncompressed: u32,
    lfh_offset: u32,
}

#[derive(Default)]
pub struct ZipFixture {
    data: Vec<u8>,
    central: Vec<CentralRecord>,
}

impl ZipFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stored(&mut self, name: &str, contents: &[u8]) -> &mut Self {
        self.add_member(name, 0, contents, contents.to_vec())
    }

    pub fn add_deflated(&mut self, name: &str, contents: &[u8]) -> &mut Self {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(contents).unwrap();
        let compressed = encoder.finish().unwrap();
        self.add_member(name, 8, contents, compressed)
    }

    /// Add a member with an arbitrary method byte, for negative tests.
    pub fn add_with_method(&mut self, name: &str, method: u16, raw: Vec<u8>) -> &mut Self {
        let contents = raw.clone();
        self.add_member(name, method, &contents, raw)
    }

    fn add_member(&mut self, name: &str, method: u16, contents: &[u8], raw: Vec<u8>) -> &mut Self {
        let lfh_offset = self.data.len() as u32;
        let crc = crc32(contents);

        // Local File Header
        self.data.extend_from_slice(b"PK\x03\x04");
        self.data.write_u16::<LittleEndian>(20).unwrap(); // version needed
        self.data.write_u16::<LittleEndian>(0).unwrap(); // flags
        self.data.write_u16::<LittleEndian>(method).unwrap();
        self.data.write_u16::<LittleEndian>(0).unwrap(); // mod time
        self.data.write_u16::<LittleEndian>(0x21).unwrap(); // mod date
        self.data.write_u32::<LittleEndian>(crc).unwrap();
        self.data.write_u32::<LittleEndian>(raw.len() as u32).unwrap();
        self.data
            .write_u32::<LittleEndian>(contents.len() as u32)
            .unwrap();
        self.data.write_u16::<LittleEndian>(name.len() as u16).unwrap();
        self.data.write_u16::<LittleEndian>(0).unwrap(); // extra len
        self.data.extend_from_slice(name.as_bytes());
        self.data.extend_from_slice(&raw);

        self.central.push(CentralRecord {
            name: name.to_string(),
            method,
            crc,
            compressed: raw.len() as u32,
            uncompressed: contents.len() as u32,
            lfh_offset,
        });
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.finish_with_comment("")
    }

    pub fn finish_with_comment(mut self, comment: &str) -> Vec<u8> {
        let cd_offset = self.data.len() as u32;

        for record in &self.central {
            // Central Directory File Header
            self.data.extend_from_slice(b"PK\x01\x02");
            self.data.write_u16::<LittleEndian>(20).unwrap(); // version made by
            self.data.write_u16::<LittleEndian>(20).unwrap(); // version needed
            self.data.write_u16::<LittleEndian>(0).unwrap(); // flags
            self.data.write_u16::<LittleEndian>(record.method).unwrap();
            self.data.write_u16::<LittleEndian>(0).unwrap(); // mod time
            self.data.write_u16::<LittleEndian>(0x21).unwrap(); // mod date
            self.data.write_u32::<LittleEndian>(record.crc).unwrap();
            self.data
                .write_u32::<LittleEndian>(record.compressed)
                .unwrap();
            self.data
                .write_u32::<LittleEndian>(record.uncompressed)
                .unwrap();
            self.data
                .write_u16::<LittleEndian>(record.name.len() as u16)
                .unwrap();
            self.data.write_u16::<LittleEndian>(0).unwrap(); // extra len
            self.data.write_u16::<LittleEndian>(0).unwrap(); // comment len
            self.data.write_u16::<LittleEndian>(0).unwrap(); // disk number
            self.data.write_u16::<LittleEndian>(0).unwrap(); // internal attrs
            self.data.write_u32::<LittleEndian>(0).unwrap(); // external attrs
            self.data
                .write_u32::<LittleEndian>(record.lfh_offset)
                .unwrap();
            self.data.extend_from_slice(record.name.as_bytes());
        }

        let cd_size = self.data.len() as u32 - cd_offset;
        let entries = self.central.len() as u16;

        // End of Central Directory
        self.data.extend_from_slice(b"PK\x05\x06");
        self.data.write_u16::<LittleEndian>(0).unwrap(); // disk number
        self.data.write_u16::<LittleEndian>(0).unwrap(); // disk with CD
        self.data.write_u16::<LittleEndian>(entries).unwrap();
        self.data.write_u16::<LittleEndian>(entries).unwrap();
        self.data.write_u32::<LittleEndian>(cd_size).unwrap();
        self.data.write_u32::<LittleEndian>(cd_offset).unwrap();
        self.data
            .write_u16::<LittleEndian>(comment.len() as u16)
            .unwrap();
        self.data.extend_from_slice(comment.as_bytes());

        self.data
    }
}

fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}
