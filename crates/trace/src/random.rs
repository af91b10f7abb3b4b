use crate::Result;
use log::debug;
use mmusim_error::{errdata, errinput, Error};
use std::path::Path;

/// A finite, pre-generated sequence of random numbers, consumed strictly in order.
///
/// The file format is a count `N` followed by at least `N` whitespace-separated non-negative
/// integers. Only the first `N` values are used; drawing more than `N` times is an error rather
/// than a silent wrap-around, since it means the random file does not match the trace.
#[derive(Debug, Clone)]
pub struct RandomSource {
    values: Vec<u64>,
    cursor: usize,
}

impl RandomSource {
    /// Creates a source over the given values.
    pub fn from_values(values: Vec<u64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Loads a random-number file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::IO(format!("Unable to read random file {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parses the contents of a random-number file.
    pub fn parse(content: &str) -> Result<Self> {
        let mut tokens = content.split_whitespace();
        let count: usize = match tokens.next() {
            Some(token) => token
                .parse()
                .map_err(|_| Error::InvalidData(format!("invalid random count '{}'", token)))?,
            None => return errdata!("random file is empty"),
        };

        // The count comes from the file, so it does not size the allocation.
        let mut values = Vec::new();
        for token in tokens.take(count) {
            let value = token
                .parse::<u64>()
                .map_err(|_| Error::InvalidData(format!("invalid random number '{}'", token)))?;
            values.push(value);
        }
        if values.len() < count {
            return errdata!(
                "random file announces {} numbers but holds only {}",
                count,
                values.len()
            );
        }

        debug!("loaded {} random numbers", values.len());
        Ok(Self::from_values(values))
    }

    /// Draws the next value reduced modulo `n`, i.e. a value in `0..n`.
    pub fn next(&mut self, n: usize) -> Result<usize> {
        if n == 0 {
            return errinput!("cannot draw a random number modulo 0");
        }
        let value = *self
            .values
            .get(self.cursor)
            .ok_or(Error::RandomExhausted(self.cursor))?;
        self.cursor += 1;
        Ok((value % n as u64) as usize)
    }

    /// The number of values drawn so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    /// The number of values that can still be drawn.
    pub fn remaining(&self) -> usize {
        self.values.len() - self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmusim_error::assert_errors;
    use serial_test::serial;
    use std::path::PathBuf;

    fn fixture_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("mmusim-fixtures");
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_random_draws_in_order_modulo_n() {
        let mut rand = RandomSource::parse("4\n 10\n 7\n 32\n 5\n").unwrap();
        assert_eq!(rand.remaining(), 4);
        assert_eq!(rand.next(4).unwrap(), 2);
        assert_eq!(rand.next(4).unwrap(), 3);
        assert_eq!(rand.next(16).unwrap(), 0);
        assert_eq!(rand.next(100).unwrap(), 5);
        assert_eq!(rand.consumed(), 4);
        assert_eq!(rand.remaining(), 0);
    }

    #[test]
    fn test_random_exhaustion_is_an_error() {
        let mut rand = RandomSource::from_values(vec![1, 2]);
        rand.next(3).unwrap();
        rand.next(3).unwrap();
        assert_eq!(rand.next(3), Err(Error::RandomExhausted(2)));
        // A failed draw does not move the cursor.
        assert_eq!(rand.consumed(), 2);
    }

    #[test]
    fn test_random_ignores_values_past_count() {
        let mut rand = RandomSource::parse("1 9 8 7").unwrap();
        assert_eq!(rand.next(10).unwrap(), 9);
        assert_errors!(rand.next(10));
    }

    #[test]
    fn test_random_malformed_files() {
        assert_errors!(RandomSource::parse(""));
        assert_errors!(RandomSource::parse("three 1 2 3"));
        assert_errors!(RandomSource::parse("3 1 2"));
        assert_errors!(RandomSource::parse("2 1 -4"));
        assert_errors!(RandomSource::from_values(vec![1]).next(0));
    }

    #[test]
    fn test_random_huge_count_is_invalid_data() {
        assert!(matches!(
            RandomSource::parse("4611686018427387904 1 2"),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            RandomSource::parse("18446744073709551615\n7\n"),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    #[serial]
    fn test_random_from_file() {
        let path = fixture_path("rfile");
        std::fs::write(&path, "3\n12\n1\n40\n").unwrap();

        let mut rand = RandomSource::from_file(&path).unwrap();
        assert_eq!(rand.next(8).unwrap(), 4);
        assert_eq!(rand.remaining(), 2);

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            RandomSource::from_file(&path),
            Err(Error::IO(_))
        ));
    }
}
