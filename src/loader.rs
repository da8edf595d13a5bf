// Object-image loading. Per spec.md §4.3/§9: big-endian on disk, native in
// memory, swapped at load time rather than at every access. The origin word
// and every payload word get the same treatment, so there is one small
// "read a big-endian word, or tell me you couldn't" helper underneath both.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::conversions::swap16;
use crate::error::LoadError;
use crate::memory::{Memory, MEMORY_SIZE};

pub struct LoadStats {
    pub origin: u16,
    pub words_loaded: usize,
}

pub fn load_image(path: &Path, memory: &mut Memory) -> Result<LoadStats, LoadError> {
    let file = File::open(path).map_err(LoadError::Open)?;
    load_from_reader(BufReader::new(file), memory)
}

fn load_from_reader<R: Read>(mut reader: R, memory: &mut Memory) -> Result<LoadStats, LoadError> {
    let origin = match read_word(&mut reader).map_err(LoadError::Open)? {
        Some(word) => word,
        None => return Err(LoadError::Truncated),
    };

    let max_words = MEMORY_SIZE - origin as usize;
    let mut address = origin;
    let mut words_loaded = 0usize;

    while words_loaded < max_words {
        match read_word(&mut reader).map_err(LoadError::Open)? {
            Some(word) => {
                memory.write(address, word);
                address = address.wrapping_add(1);
                words_loaded += 1;
            }
            // Clean end of stream, or a lone trailing byte — both just stop
            // the load silently (spec.md §4.3).
            None => break,
        }
    }

    Ok(LoadStats { origin, words_loaded })
}

// Ok(None) on a clean EOF or on a lone leftover byte with no partner.
fn read_word<R: Read>(reader: &mut R) -> io::Result<Option<u16>> {
    let mut buf = [0u8; 2];
    let mut filled = 0;
    while filled < 2 {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            return Ok(None);
        }
        filled += n;
    }
    Ok(Some(swap16(u16::from_ne_bytes(buf))))
}
