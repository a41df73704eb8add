//! The JPEG EXIF block, loaded through `little_exif`.
//!
//! Only the GPS IFD is inspected or changed here; every other tag is carried
//! through untouched.

use std::fs;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use little_exif::exif_tag::ExifTag;
use little_exif::filetype::FileExtension;
use little_exif::ifd::ExifTagGroup;
use little_exif::metadata::Metadata as ExifMetadata;
use little_exif::rational::uR64;
use log::debug;
use tempfile::Builder;

use crate::core::formats;
use crate::core::metadata::{GeotagError, Result};
use crate::models::{DmsTriple, GpsBlock, Hemisphere, Rational};

/// The EXIF block of one JPEG together with the file bytes it was parsed
/// from. Persisting writes the block back into those same bytes.
pub struct ExifContainer {
    exif: ExifMetadata,
    source: Vec<u8>,
}

impl ExifContainer {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = read_jpeg(path)?;
        Self::parse(path, bytes)
    }

    /// A JPEG without any EXIF segment starts from an empty container. A
    /// segment that is present but unreadable is still an error, so a broken
    /// block is never silently replaced.
    pub fn load_or_empty(path: &Path) -> Result<Self> {
        let bytes = read_jpeg(path)?;

        if !formats::has_exif_segment(&bytes) {
            debug!("{} has no EXIF segment yet", path.display());
            return Ok(Self {
                exif: ExifMetadata::new(),
                source: bytes,
            });
        }

        Self::parse(path, bytes)
    }

    pub fn gps_block(&self) -> GpsBlock {
        let mut block = GpsBlock::default();

        for tag in (&self.exif).into_iter() {
            match tag {
                ExifTag::GPSLatitudeRef(value) => block.latitude_ref = Hemisphere::parse(value),
                ExifTag::GPSLatitude(rationals) => {
                    block.latitude = DmsTriple::from_rationals(rationals.iter().map(to_rational))
                }
                ExifTag::GPSLongitudeRef(value) => {
                    block.longitude_ref = Hemisphere::parse(value)
                }
                ExifTag::GPSLongitude(rationals) => {
                    block.longitude = DmsTriple::from_rationals(rationals.iter().map(to_rational))
                }
                _ => {}
            }
        }

        block
    }

    /// Drops every existing GPS IFD field, then stores the fields of `block`.
    pub fn replace_gps_block(&mut self, block: &GpsBlock) {
        let stale: Vec<ExifTag> = (&self.exif)
            .into_iter()
            .filter(|tag| matches!(tag.get_group(), ExifTagGroup::GPS))
            .cloned()
            .collect();

        for tag in stale {
            self.exif.remove_tag(tag);
        }

        if let Some(reference) = block.latitude_ref {
            self.exif
                .set_tag(ExifTag::GPSLatitudeRef(reference.as_str().to_string()));
        }
        if let Some(triple) = block.latitude {
            self.exif.set_tag(ExifTag::GPSLatitude(to_ur64_vec(triple)));
        }
        if let Some(reference) = block.longitude_ref {
            self.exif
                .set_tag(ExifTag::GPSLongitudeRef(reference.as_str().to_string()));
        }
        if let Some(triple) = block.longitude {
            self.exif.set_tag(ExifTag::GPSLongitude(to_ur64_vec(triple)));
        }
    }

    /// Writes the container into `path` without touching the original until
    /// the new file is complete. The EXIF block is spliced into the bytes the
    /// container was loaded from, those go into a staging file next to
    /// `path`, and the staging file is renamed over the original.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let permissions = fs::metadata(path)
            .map_err(|err| GeotagError::persist(path, err))?
            .permissions();
        if permissions.readonly() {
            return Err(GeotagError::persist(path, "file is read-only"));
        }

        let mut updated = self.source.clone();
        let written = panic::catch_unwind(AssertUnwindSafe(|| {
            self.exif.write_to_vec(&mut updated, FileExtension::JPEG)
        }));
        match written {
            Ok(Ok(())) => {}
            Ok(Err(err)) => return Err(GeotagError::persist(path, err)),
            Err(_) => return Err(GeotagError::persist(path, "EXIF writer panicked")),
        }

        let mut staging = Builder::new()
            .prefix(".geotag-")
            .suffix(".jpg")
            .tempfile_in(parent_dir(path))
            .map_err(|err| GeotagError::persist(path, err))?;
        staging
            .write_all(&updated)
            .map_err(|err| GeotagError::persist(path, err))?;
        staging
            .flush()
            .map_err(|err| GeotagError::persist(path, err))?;

        fs::set_permissions(staging.path(), permissions)
            .map_err(|err| GeotagError::persist(path, err))?;
        staging
            .persist(path)
            .map_err(|err| GeotagError::persist(path, err.error))?;

        Ok(())
    }

    fn parse(path: &Path, source: Vec<u8>) -> Result<Self> {
        let parsed = panic::catch_unwind(AssertUnwindSafe(|| {
            ExifMetadata::new_from_vec(&source, FileExtension::JPEG)
        }));

        match parsed {
            Ok(Ok(exif)) => Ok(Self { exif, source }),
            Ok(Err(err)) => Err(GeotagError::container_load(path, err)),
            Err(_) => Err(GeotagError::container_load(path, "EXIF parser panicked")),
        }
    }
}

/// Reads the whole file after checking it is a JPEG by both name and magic
/// bytes.
fn read_jpeg(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(GeotagError::FileNotFound(path.to_path_buf()));
    }
    if !formats::is_jpeg_path(path) {
        return Err(GeotagError::container_load(path, "not a .jpg/.jpeg file"));
    }

    let bytes = fs::read(path).map_err(|err| GeotagError::container_load(path, err))?;
    if !formats::is_jpeg_data(&bytes) {
        return Err(GeotagError::container_load(path, "missing JPEG start marker"));
    }

    Ok(bytes)
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn to_rational(value: &uR64) -> Rational {
    Rational::new(value.nominator, value.denominator)
}

fn to_ur64_vec(triple: DmsTriple) -> Vec<uR64> {
    triple
        .to_array()
        .into_iter()
        .map(|rational| uR64 {
            nominator: rational.numerator,
            denominator: rational.denominator,
        })
        .collect()
}
