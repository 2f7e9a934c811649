//! Reading and writing of the JSON record files.

use std::{fs::File, io::BufReader, io::Write, path::Path};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::{Serialize, de::DeserializeOwned};

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("opening {:?}", path))?;
    serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing {:?}", path))
}

/// Writes `value` as indented JSON. The file at `path` is replaced only once
/// writing has succeeded.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("opening {:?} for writing", path))?;
    serde_json::to_writer_pretty(&mut file, value)
        .with_context(|| format!("writing JSON to {:?}", path))?;
    file.write_all(b"\n")?;
    file.commit()
        .with_context(|| format!("committing {:?}", path))?;
    log::info!("Wrote {:?}.", path);
    Ok(())
}
