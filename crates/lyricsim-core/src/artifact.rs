//! The persisted model artifact shared by the builder and the recommender.
//!
//! On disk an artifact is a single gzip stream:
//!
//! ```text
//! b"LYRSIM"            magic
//! u32 (LE)             format version
//! u64 (LE)             header length in bytes
//! [u8; header length]  JSON header: version, dimension, records, vocabulary
//! [f32 (LE); N(N+1)/2] packed upper triangle of the similarity matrix
//! ```
//!
//! Record order in the header is the row/column order of the matrix. That
//! correspondence is validated whenever an artifact is constructed or read.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::matrix::{packed_len, SimilarityMatrix};
use crate::model::SongRecord;

/// Magic bytes at the start of every artifact stream.
pub const MAGIC: &[u8; 6] = b"LYRSIM";

/// Artifact format version written by this build.
pub const FORMAT_VERSION: u32 = 1;

/// Upper bound on the JSON header size accepted when reading.
const MAX_HEADER_BYTES: u64 = 1 << 32;

#[derive(Serialize)]
struct HeaderRef<'a> {
    version: u32,
    dimension: usize,
    records: &'a [SongRecord],
    vocabulary: &'a [String],
}

#[derive(Deserialize)]
struct Header {
    version: u32,
    dimension: usize,
    records: Vec<SongRecord>,
    #[serde(default)]
    vocabulary: Vec<String>,
}

/// Cleaned records, the feature vocabulary, and the similarity matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    records: Vec<SongRecord>,
    vocabulary: Vec<String>,
    matrix: SimilarityMatrix,
}

impl Artifact {
    /// Bundle records with their similarity matrix.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the record count differs from the
    /// matrix dimension.
    pub fn new(
        records: Vec<SongRecord>,
        vocabulary: Vec<String>,
        matrix: SimilarityMatrix,
    ) -> Result<Self> {
        if records.len() != matrix.dimension() {
            return Err(Error::DimensionMismatch {
                records: records.len(),
                dimension: matrix.dimension(),
            });
        }
        Ok(Self {
            records,
            vocabulary,
            matrix,
        })
    }

    #[must_use]
    pub fn records(&self) -> &[SongRecord] {
        &self.records
    }

    /// Vocabulary terms in feature-index order.
    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    #[must_use]
    pub const fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize the artifact as a gzip stream into `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let header = HeaderRef {
            version: FORMAT_VERSION,
            dimension: self.matrix.dimension(),
            records: &self.records,
            vocabulary: &self.vocabulary,
        };
        let header_bytes = serde_json::to_vec(&header)?;

        let mut encoder = GzEncoder::new(writer, Compression::default());
        encoder.write_all(MAGIC)?;
        encoder.write_all(&FORMAT_VERSION.to_le_bytes())?;
        encoder.write_all(&(header_bytes.len() as u64).to_le_bytes())?;
        encoder.write_all(&header_bytes)?;
        for value in self.matrix.packed() {
            encoder.write_all(&value.to_le_bytes())?;
        }
        encoder.finish()?.flush()?;
        Ok(())
    }

    /// Deserialize an artifact from a gzip stream.
    ///
    /// # Errors
    /// Fails on a foreign or truncated stream, an unsupported version, or a
    /// header whose record count does not match the matrix dimension.
    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        let mut reader = BufReader::new(GzDecoder::new(reader));

        let mut magic = [0u8; 6];
        reader.read_exact(&mut magic).map_err(truncated)?;
        if &magic != MAGIC {
            return Err(Error::BadMagic);
        }

        let mut word = [0u8; 4];
        reader.read_exact(&mut word).map_err(truncated)?;
        let version = u32::from_le_bytes(word);
        if version != FORMAT_VERSION {
            return Err(Error::UnsupportedVersion {
                found: version,
                expected: FORMAT_VERSION,
            });
        }

        let mut len = [0u8; 8];
        reader.read_exact(&mut len).map_err(truncated)?;
        let header_len = u64::from_le_bytes(len);
        if header_len > MAX_HEADER_BYTES {
            return Err(Error::InvalidData(format!(
                "artifact header of {header_len} bytes exceeds limit"
            )));
        }
        // Grow with the bytes actually present, not the claimed length.
        let mut header_bytes = Vec::new();
        (&mut reader)
            .take(header_len)
            .read_to_end(&mut header_bytes)?;
        if header_bytes.len() as u64 != header_len {
            return Err(truncated(io::ErrorKind::UnexpectedEof.into()));
        }
        let header: Header = serde_json::from_slice(&header_bytes)?;

        if header.version != version {
            return Err(Error::InvalidData(format!(
                "header version {} disagrees with stream version {version}",
                header.version
            )));
        }
        if header.records.len() != header.dimension {
            return Err(Error::DimensionMismatch {
                records: header.records.len(),
                dimension: header.dimension,
            });
        }

        let cells = packed_len(header.dimension);
        let mut packed = Vec::with_capacity(cells);
        for _ in 0..cells {
            reader.read_exact(&mut word).map_err(truncated)?;
            packed.push(f32::from_le_bytes(word));
        }
        let matrix = SimilarityMatrix::from_packed(header.dimension, packed)?;

        Self::new(header.records, header.vocabulary, matrix)
    }

    /// Write the artifact to `path`.
    ///
    /// The stream goes to a temporary file in the destination directory,
    /// which is renamed over `path` only after a complete write. A failed
    /// save leaves any previous artifact untouched.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        self.write_to(BufWriter::new(tmp.as_file_mut()))?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| Error::Io(e.error))?;

        log::info!(
            "Saved artifact with {} records to {}",
            self.records.len(),
            path.display()
        );
        Ok(())
    }

    /// Read an artifact from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let artifact = Self::read_from(file)?;
        log::info!(
            "Loaded artifact with {} records from {}",
            artifact.len(),
            path.display()
        );
        Ok(artifact)
    }
}

fn truncated(e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        Error::InvalidData("artifact stream is truncated".to_string())
    } else {
        Error::Io(e)
    }
}
