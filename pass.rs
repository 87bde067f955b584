//! A single overwrite pass.
//!
//! A pass walks `[0, total_size)` in strides of the buffer size, fills one
//! reusable buffer with random bytes per stride and writes it at the
//! stride's absolute offset. Writes never touch a shared file cursor, so
//! any number of passes may run over the same handle at once.

use crate::error::ShredError;
use rand_core::RngCore;
use std::fs::File;
use std::io;
use tracing::trace;

/// Random-access writes at an absolute offset.
pub trait PositionedWrite: Send + Sync {
    /// Write all of `buf` starting at `offset`.
    ///
    /// A write that cannot complete fails with `io::ErrorKind::WriteZero`.
    fn write_all_at(&self, buf: &[u8], offset: u64) -> io::Result<()>;
}

impl PositionedWrite for File {
    #[cfg(unix)]
    fn write_all_at(&self, buf: &[u8], offset: u64) -> io::Result<()> {
        std::os::unix::fs::FileExt::write_all_at(self, buf, offset)
    }

    #[cfg(windows)]
    fn write_all_at(&self, mut buf: &[u8], mut offset: u64) -> io::Result<()> {
        use std::os::windows::fs::FileExt;

        while !buf.is_empty() {
            match self.seek_write(buf, offset) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "failed to write whole buffer",
                    ))
                }
                Ok(n) => {
                    buf = &buf[n..];
                    offset += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

/// Overwrite `total_size` bytes of `file` once with data from `rng`.
///
/// `None` stands for a missing handle and fails with
/// [`ShredError::InvalidHandle`]. The final stride is shortened to the
/// remainder when `total_size` is not a multiple of `buffer_size`.
pub fn run_pass<W, R>(
    file: Option<&W>,
    total_size: u64,
    buffer_size: usize,
    rng: &mut R,
) -> Result<(), ShredError>
where
    W: PositionedWrite + ?Sized,
    R: RngCore + ?Sized,
{
    let file = file.ok_or(ShredError::InvalidHandle)?;
    if buffer_size == 0 {
        return Err(ShredError::InvalidBufferSize(buffer_size));
    }
    if total_size == 0 {
        return Ok(());
    }

    let stride = buffer_size as u64;
    let mut buf = vec![0u8; stride.min(total_size) as usize];
    let mut offset = 0u64;

    while offset < total_size {
        let len = stride.min(total_size - offset) as usize;
        let chunk = &mut buf[..len];

        rng.try_fill_bytes(chunk).map_err(ShredError::RandomSource)?;
        file.write_all_at(chunk, offset)
            .map_err(|source| ShredError::Write {
                offset,
                len,
                source,
            })?;

        trace!(offset, len, "stride written");
        offset += len as u64;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::sync::Mutex;

    /// Records every positioned write instead of touching storage.
    #[derive(Default)]
    struct Recorder {
        writes: Mutex<Vec<(u64, usize)>>,
    }

    impl Recorder {
        fn writes(&self) -> Vec<(u64, usize)> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl PositionedWrite for Recorder {
        fn write_all_at(&self, buf: &[u8], offset: u64) -> io::Result<()> {
            self.writes.lock().unwrap().push((offset, buf.len()));
            Ok(())
        }
    }

    /// Accepts a fixed number of writes, then reports a short write.
    struct ShortWriter {
        accepted: Mutex<usize>,
        limit: usize,
    }

    impl PositionedWrite for ShortWriter {
        fn write_all_at(&self, _buf: &[u8], _offset: u64) -> io::Result<()> {
            let mut accepted = self.accepted.lock().unwrap();
            if *accepted == self.limit {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "failed to write whole buffer",
                ));
            }
            *accepted += 1;
            Ok(())
        }
    }

    /// Deterministic filler.
    struct FixedRng(u8);

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            u32::from_ne_bytes([self.0; 4])
        }

        fn next_u64(&mut self) -> u64 {
            u64::from_ne_bytes([self.0; 8])
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(self.0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {}

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand_core::Error> {
            Err(rand_core::Error::new("entropy exhausted"))
        }
    }

    #[test]
    fn test_strides_cover_exact_length() {
        let rec = Recorder::default();
        run_pass(Some(&rec), 10_000, 4096, &mut FixedRng(0xAA)).expect("pass");

        let writes = rec.writes();
        assert_eq!(writes, vec![(0, 4096), (4096, 4096), (8192, 10_000 % 4096)]);
        assert_eq!(writes.iter().map(|(_, len)| len).sum::<usize>(), 10_000);
    }

    #[test]
    fn test_exact_multiple_has_full_final_stride() {
        let rec = Recorder::default();
        run_pass(Some(&rec), 3 * 512, 512, &mut FixedRng(0)).expect("pass");

        let writes = rec.writes();
        assert_eq!(writes.len(), 3);
        assert!(writes.iter().all(|(_, len)| *len == 512));
        assert!(writes.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_file_smaller_than_buffer_is_one_write() {
        let rec = Recorder::default();
        run_pass(Some(&rec), 17, 4096, &mut FixedRng(1)).expect("pass");
        assert_eq!(rec.writes(), vec![(0, 17)]);
    }

    #[test]
    fn test_zero_length_writes_nothing() {
        let rec = Recorder::default();
        run_pass(Some(&rec), 0, 4096, &mut BrokenRng).expect("empty pass");
        assert!(rec.writes().is_empty());
    }

    #[test]
    fn test_missing_handle() {
        let err = run_pass::<Recorder, _>(None, 10, 10, &mut FixedRng(0)).unwrap_err();
        assert!(matches!(err, ShredError::InvalidHandle));
    }

    #[test]
    fn test_zero_buffer_size() {
        let rec = Recorder::default();
        let err = run_pass(Some(&rec), 100, 0, &mut FixedRng(0)).unwrap_err();
        assert!(matches!(err, ShredError::InvalidBufferSize(0)));
        assert!(rec.writes().is_empty());
    }

    #[test]
    fn test_random_source_failure_stops_before_writing() {
        let rec = Recorder::default();
        let err = run_pass(Some(&rec), 10, 10, &mut BrokenRng).unwrap_err();
        assert!(matches!(err, ShredError::RandomSource(_)));
        assert!(rec.writes().is_empty());
    }

    #[test]
    fn test_short_write_is_reported_with_offset() {
        let writer = ShortWriter {
            accepted: Mutex::new(0),
            limit: 2,
        };
        let err = run_pass(Some(&writer), 1000, 100, &mut FixedRng(0)).unwrap_err();

        match err {
            ShredError::Write { offset, len, source } => {
                assert_eq!(offset, 200);
                assert_eq!(len, 100);
                assert_eq!(source.kind(), io::ErrorKind::WriteZero);
            }
            other => panic!("expected write error, got {other:?}"),
        }
    }

    #[test]
    fn test_pass_overwrites_real_file() {
        let mut tmp = tempfile::NamedTempFile::new().expect("tempfile");
        std::io::Write::write_all(&mut tmp, &[0x11u8; 9000]).expect("seed");

        let file = tmp.reopen().expect("reopen");
        run_pass(Some(&file), 9000, 4096, &mut FixedRng(0x5A)).expect("pass");

        let mut content = Vec::new();
        tmp.reopen()
            .expect("reopen")
            .read_to_end(&mut content)
            .expect("read back");
        assert_eq!(content.len(), 9000);
        assert!(content.iter().all(|b| *b == 0x5A));
    }

    #[test]
    fn test_read_only_handle_fails_to_write() {
        let tmp = tempfile::NamedTempFile::new().expect("tempfile");
        std::fs::write(tmp.path(), b"0123456789").expect("seed");
        let read_only = File::open(tmp.path()).expect("open read-only");

        let err = run_pass(Some(&read_only), 10, 10, &mut FixedRng(0)).unwrap_err();
        assert!(matches!(err, ShredError::Write { offset: 0, .. }));
    }
}
