//! Chunked byte-for-byte stream comparison.
//!
//! Reads two streams in lockstep, 8 KiB at a time, and collects every
//! position at which they disagree. Comparison never stops at the first
//! mismatch: the diagnostic value is in seeing whether a divergence is an
//! isolated flipped byte or a systematic trailing-bytes problem such as
//! truncation.
//!
//! Length disagreements are not content mismatches. If one stream ends
//! while the other still has data, or the two fill a chunk to different
//! depths, the comparison itself is unreliable and a [`CompareError`] is
//! returned instead of a truncated result.

use std::io::Read;
use thiserror::Error;

/// Chunk size used for lockstep reads.
const CHUNK_SIZE: usize = 8192;

/// One byte position at which the two compared streams disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifferingByte {
    /// Absolute offset from the start of both streams.
    pub position: u64,
    /// The byte observed on the first stream.
    pub first: u8,
    /// The byte observed on the second stream.
    pub second: u8,
}

impl std::fmt::Display for DifferingByte {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "position {}: {:#04x} vs {:#04x}",
            self.position, self.first, self.second
        )
    }
}

/// A half-open byte range captured verbatim from both streams for the
/// mismatch report.
///
/// The window is diagnostic only; it never influences the pass/fail
/// outcome of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticWindow {
    /// First byte offset included in the capture.
    pub start: u64,
    /// First byte offset past the capture.
    pub end: u64,
}

impl DiagnosticWindow {
    /// Create a window covering `[start, start + len)`.
    #[must_use]
    pub const fn new(start: u64, len: u64) -> Self {
        Self {
            start,
            end: start + len,
        }
    }

    const fn contains(&self, position: u64) -> bool {
        position >= self.start && position < self.end
    }
}

/// The outcome of comparing two streams of equal length.
#[derive(Debug, Default)]
pub struct Comparison {
    /// Every position at which the two streams disagreed, in order.
    pub differing: Vec<DifferingByte>,
    /// Bytes from the first stream inside the diagnostic window.
    pub first_window: Vec<u8>,
    /// Bytes from the second stream inside the diagnostic window.
    pub second_window: Vec<u8>,
    /// Total number of byte positions compared.
    pub bytes_compared: u64,
}

impl Comparison {
    /// Whether the two streams were byte-for-byte identical.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.differing.is_empty()
    }
}

/// Errors arising from stream comparison.
#[derive(Debug, Error)]
pub enum CompareError {
    /// Reading one of the streams failed.
    #[error("read failed during comparison: {0}")]
    Io(#[from] std::io::Error),

    /// The first stream ended while the second still had data.
    #[error("first stream ended at byte {position} while second still had data")]
    EofOnFirst {
        /// Offset at which the first stream ended.
        position: u64,
    },

    /// The second stream ended while the first still had data.
    #[error("second stream ended at byte {position} while first still had data")]
    EofOnSecond {
        /// Offset at which the second stream ended.
        position: u64,
    },

    /// The streams filled the same chunk request to different depths.
    #[error("read size differs at byte {position}: {first} vs {second}")]
    ReadSizeMismatch {
        /// Bytes read from the first stream for this chunk.
        first: usize,
        /// Bytes read from the second stream for this chunk.
        second: usize,
        /// Offset of the start of the chunk.
        position: u64,
    },
}

/// Fill `buf` from `reader`, retrying short reads until the buffer is full
/// or the stream reports end-of-stream.
///
/// Underlying readers may legitimately return fewer bytes than requested
/// without being at end-of-stream; comparing raw short-read results would
/// produce false mismatches.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let count = reader.read(&mut buf[filled..])?;
        if count == 0 {
            break;
        }
        filled += count;
    }
    Ok(filled)
}

/// Compare two streams chunk-by-chunk, collecting every differing byte.
///
/// When `window` is given, the bytes of both streams falling inside it are
/// captured into the returned [`Comparison`] for diagnostic reporting.
///
/// # Errors
///
/// Returns [`CompareError::Io`] if either stream fails to read, and a
/// protocol-violation variant if the streams disagree in length or
/// short-read behaviour at a point where both should still have data.
pub fn compare<A: Read, B: Read>(
    mut first: A,
    mut second: B,
    window: Option<DiagnosticWindow>,
) -> Result<Comparison, CompareError> {
    let mut buf_first = [0u8; CHUNK_SIZE];
    let mut buf_second = [0u8; CHUNK_SIZE];
    let mut result = Comparison::default();
    let mut offset: u64 = 0;

    loop {
        let read_first = read_full(&mut first, &mut buf_first)?;
        let read_second = read_full(&mut second, &mut buf_second)?;

        if read_first == 0 {
            if read_second > 0 {
                return Err(CompareError::EofOnFirst { position: offset });
            }
            result.bytes_compared = offset;
            return Ok(result);
        }
        if read_second == 0 {
            return Err(CompareError::EofOnSecond { position: offset });
        }
        if read_first != read_second {
            return Err(CompareError::ReadSizeMismatch {
                first: read_first,
                second: read_second,
                position: offset,
            });
        }

        // Only the prefix both streams actually filled is meaningful; a
        // short final chunk must not be compared past its read length.
        for index in 0..read_first {
            let position = offset + index as u64;
            let byte_first = buf_first[index];
            let byte_second = buf_second[index];
            if byte_first != byte_second {
                result.differing.push(DifferingByte {
                    position,
                    first: byte_first,
                    second: byte_second,
                });
            }
            if let Some(w) = window {
                if w.contains(position) {
                    result.first_window.push(byte_first);
                    result.second_window.push(byte_second);
                }
            }
        }

        offset += read_first as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    /// A reader that trickles bytes out in deliberately small increments.
    struct ShortReader {
        data: Vec<u8>,
        cursor: usize,
        step: usize,
    }

    impl Read for ShortReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let remaining = self.data.len() - self.cursor;
            let count = remaining.min(self.step).min(buf.len());
            buf[..count].copy_from_slice(&self.data[self.cursor..self.cursor + count]);
            self.cursor += count;
            Ok(count)
        }
    }

    #[test]
    fn identical_streams_match() {
        let data = vec![0xabu8; 20_000];
        let result = compare(Cursor::new(data.clone()), Cursor::new(data), None)
            .expect("comparison succeeds");
        assert!(result.is_match());
        assert_eq!(result.bytes_compared, 20_000);
    }

    #[test]
    fn collects_every_differing_position() {
        let first = vec![0u8; 16 * 1024];
        let mut second = first.clone();
        second[10] = 0x5f;
        second[8300] = 0x01;
        second[16_000] = 0xff;

        let result = compare(Cursor::new(first), Cursor::new(second), None)
            .expect("comparison succeeds");

        assert_eq!(result.differing.len(), 3);
        assert_eq!(
            result.differing[0],
            DifferingByte {
                position: 10,
                first: 0x00,
                second: 0x5f,
            }
        );
        assert_eq!(result.differing[1].position, 8300);
        assert_eq!(result.differing[1].second, 0x01);
        assert_eq!(result.differing[2].position, 16_000);
        assert_eq!(result.differing[2].second, 0xff);
    }

    #[rstest]
    #[case::first_shorter(100, 200)]
    #[case::second_shorter(200, 100)]
    #[case::one_past_chunk_boundary(16_384, 16_385)]
    fn different_lengths_are_protocol_violations(#[case] len_first: usize, #[case] len_second: usize) {
        let first = vec![0u8; len_first];
        let second = vec![0u8; len_second];
        let result = compare(Cursor::new(first), Cursor::new(second), None);
        assert!(
            matches!(
                result,
                Err(CompareError::EofOnFirst { .. }
                    | CompareError::EofOnSecond { .. }
                    | CompareError::ReadSizeMismatch { .. })
            ),
            "expected protocol violation for {len_first} vs {len_second}"
        );
    }

    #[test]
    fn short_reads_do_not_produce_false_mismatches() {
        let data: Vec<u8> = (0..20_000u32).map(|v| (v % 251) as u8).collect();
        let trickle = ShortReader {
            data: data.clone(),
            cursor: 0,
            step: 7,
        };
        let result =
            compare(trickle, Cursor::new(data), None).expect("comparison succeeds");
        assert!(result.is_match());
    }

    #[test]
    fn short_final_chunk_on_both_sides_compares_cleanly() {
        // Total length deliberately not a multiple of the chunk size.
        let data = vec![0x42u8; 8192 + 100];
        let result = compare(Cursor::new(data.clone()), Cursor::new(data), None)
            .expect("comparison succeeds");
        assert!(result.is_match());
        assert_eq!(result.bytes_compared, 8292);
    }

    #[test]
    fn window_captures_bytes_from_both_streams() {
        let first: Vec<u8> = (0..=255u8).collect();
        let mut second = first.clone();
        second[100] = 0;

        let window = DiagnosticWindow::new(98, 4);
        let result = compare(Cursor::new(first), Cursor::new(second), Some(window))
            .expect("comparison succeeds");

        assert_eq!(result.first_window, vec![98, 99, 100, 101]);
        assert_eq!(result.second_window, vec![98, 99, 0, 101]);
        assert_eq!(result.differing.len(), 1);
    }

    #[test]
    fn window_spanning_chunk_boundary_is_contiguous() {
        let data: Vec<u8> = (0..16_384u32).map(|v| (v % 251) as u8).collect();
        let window = DiagnosticWindow::new(8190, 4);
        let result = compare(Cursor::new(data.clone()), Cursor::new(data), Some(window))
            .expect("comparison succeeds");
        assert_eq!(result.first_window.len(), 4);
        assert_eq!(result.first_window, result.second_window);
    }

    #[test]
    fn differing_byte_display_shows_position_and_values() {
        let byte = DifferingByte {
            position: 19,
            first: 0x00,
            second: 0xff,
        };
        assert_eq!(byte.to_string(), "position 19: 0x00 vs 0xff");
    }
}
