use crate::error::FilterError;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::debug;

/// First-column values that mark a header row rather than a key.
pub const DEFAULT_HEADER_LABELS: [&str; 2] = ["Email", "E-mail"];

/// Reads the first column of every record in a delimited file.
///
/// Records whose first field equals one of `header_labels` are skipped, as are records
/// without any field. Later columns are ignored and records may differ in width.
/// Keys are returned in file order, duplicates included.
pub fn read_keys<P: AsRef<Path>, S: AsRef<str>>(
    path: P,
    header_labels: &[S],
) -> Result<Vec<String>, FilterError> {
    let file = File::open(path.as_ref())?;
    let keys = read_keys_from(file, header_labels)?;
    debug!(path = %path.as_ref().display(), count = keys.len(), "read keys");
    Ok(keys)
}

pub fn read_keys_from<R: io::Read, S: AsRef<str>>(
    reader: R,
    header_labels: &[S],
) -> Result<Vec<String>, FilterError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut keys = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let key = match record.get(0) {
            Some(key) => key,
            None => continue,
        };
        if header_labels.iter().any(|label| label.as_ref() == key) {
            continue;
        }
        keys.push(key.to_string());
    }

    Ok(keys)
}
