//! Envelope codec
//!
//! A stored value travels as a ZIP archive with three members, written
//! in this order:
//!
//! ```text
//! value  raw bytes of the stored string
//! name   raw bytes of the value's name
//! time   "YYYY-MM-DD HH:MM:SS.mmm"
//! ```
//!
//! The archive bytes are what gets signed. Member timestamps and the
//! compression method are fixed so the same envelope always encodes to
//! the same bytes.

mod frame;

use std::io::{Cursor, Read, Write};

use chrono::{DateTime, NaiveDateTime, SubsecRound, TimeZone};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::crypto::KeyError;

pub use frame::{Frame, FRAME_HEADER_SIZE};

pub const VALUE_MEMBER: &str = "value";
pub const NAME_MEMBER: &str = "name";
pub const TIME_MEMBER: &str = "time";

/// Largest decompressed member accepted on decode
pub const MAX_MEMBER_SIZE: u64 = 4 * 1024 * 1024;

/// Wire layout of the `time` member
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("member {0} exceeds {} bytes", MAX_MEMBER_SIZE)]
    MemberTooLarge(&'static str),
    #[error("member {0} is not valid utf-8")]
    Utf8(&'static str),
    #[error("invalid time member: {0}")]
    Time(#[from] chrono::ParseError),
    #[error("frame too short: {0} bytes")]
    FrameTooShort(usize),
    #[error("frame key error: {0}")]
    Key(#[from] KeyError),
    #[error("frame signature does not verify")]
    BadSignature,
}

/// A named, timestamped value ready to be archived and signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    name: String,
    value: String,
    time: NaiveDateTime,
}

/// Render a timestamp in the `time` member layout, in the timestamp's own zone.
pub fn format_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String {
    time.naive_local().format(TIME_FORMAT).to_string()
}

impl Envelope {
    /// The timestamp is kept as wall-clock time in its own zone, truncated
    /// to milliseconds since that is all the wire format carries.
    pub fn new<Tz: TimeZone>(
        name: impl Into<String>,
        time: &DateTime<Tz>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            time: time.naive_local().trunc_subsecs(3),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    pub fn time_text(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }

    /// Serialize into the archive payload.
    pub fn encode(&self) -> Result<Vec<u8>, EnvelopeError> {
        let time = self.time_text();

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (member, contents) in [
            (VALUE_MEMBER, self.value.as_bytes()),
            (NAME_MEMBER, self.name.as_bytes()),
            (TIME_MEMBER, time.as_bytes()),
        ] {
            writer.start_file(member, member_options())?;
            writer.write_all(contents)?;
        }
        Ok(writer.finish()?.into_inner())
    }

    /// Parse an archive payload. All three members must be present.
    pub fn decode(payload: &[u8]) -> Result<Self, EnvelopeError> {
        let mut archive = ZipArchive::new(Cursor::new(payload))?;

        let value = read_text(&mut archive, VALUE_MEMBER)?;
        let name = read_text(&mut archive, NAME_MEMBER)?;
        let time = read_text(&mut archive, TIME_MEMBER)?;
        let time = NaiveDateTime::parse_from_str(&time, TIME_FORMAT)?;

        Ok(Self { name, value, time })
    }
}

// Fixed member timestamps keep the archive bytes a pure function of the envelope.
fn member_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
}

fn read_text(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    member: &'static str,
) -> Result<String, EnvelopeError> {
    let mut contents = Vec::new();
    archive
        .by_name(member)?
        .take(MAX_MEMBER_SIZE + 1)
        .read_to_end(&mut contents)?;
    if contents.len() as u64 > MAX_MEMBER_SIZE {
        return Err(EnvelopeError::MemberTooLarge(member));
    }
    String::from_utf8(contents).map_err(|_| EnvelopeError::Utf8(member))
}
