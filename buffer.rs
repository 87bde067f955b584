//! Write-buffer sizing.
//!
//! The buffer grows with the file so that a typical file is overwritten in
//! about [`DISK_WRITES`] write calls. Small files are dominated by
//! [`MIN_BUFFER_SIZE`]; files larger than `DISK_WRITES * MAX_BUFFER_SIZE`
//! are capped at [`MAX_BUFFER_SIZE`] and need more writes.
//!
//! Peak memory of a shred operation is roughly `buffer size * passes`.

/// Smallest buffer ever handed to a pass (4 KiB)
pub const MIN_BUFFER_SIZE: usize = 4096;

/// Largest buffer ever handed to a pass (64 MiB)
pub const MAX_BUFFER_SIZE: usize = 64 * 1024 * 1024;

/// Target number of write calls per pass for mid-sized files
pub const DISK_WRITES: i64 = 64;

/// Buffer size for a file of `file_size` bytes.
///
/// Zero and negative sizes get the minimum. The result always lies in
/// `[MIN_BUFFER_SIZE, MAX_BUFFER_SIZE]`.
pub fn calc_buf(file_size: i64) -> usize {
    let min = MIN_BUFFER_SIZE as i64;
    let size = if file_size > 0 {
        min + file_size / DISK_WRITES
    } else {
        min
    };
    size.min(MAX_BUFFER_SIZE as i64) as usize
}
