use base64_image::convenience::check_size;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Reads a file, or stdin when no file is given, enforcing the size limit.
pub fn read_input(
    file: Option<&PathBuf>,
    max_size: u64,
    force: bool,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if let Some(path) = file {
        check_size(fs::metadata(path)?.len(), max_size, force)?;
        return Ok(fs::read(path)?);
    }

    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;
    // stdin has no size up front, so the check happens after reading
    check_size(buffer.len() as u64, max_size, force)?;
    Ok(buffer)
}

/// Writes to a file, or to stdout when no file is given.
pub fn write_output(output: Option<&Path>, data: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => fs::write(path, data)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
