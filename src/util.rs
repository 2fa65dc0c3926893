use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write `value` to `path` as pretty-printed JSON.
pub fn write_serialized<T: Serialize + ?Sized>(path: &Path, value: &T) -> serde_json::Result<()> {
    let file = File::create(path).map_err(serde_json::Error::io)?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
}
