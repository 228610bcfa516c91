use std::io::{self, Read};

/// Read until `buf` is full or the source is exhausted. Returns the bytes read.
///
/// A plain read() may come back short at any time. Both compression passes read through here,
/// so every chunk but the last is exactly `buf.len()` bytes in both passes.
pub fn read_chunk<R: Read + ?Sized>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod test {
    use super::read_chunk;
    use std::io::{self, Read};

    /// Hands out at most three bytes per read.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = buf.len().min(3).min(self.0.len());
            buf[..n].copy_from_slice(&self.0[..n]);
            self.0 = &self.0[n..];
            Ok(n)
        }
    }

    #[test]
    fn short_reads_test() {
        let mut src = Trickle(b"0123456789");
        let mut buf = [0_u8; 8];
        assert_eq!(read_chunk(&mut src, &mut buf).unwrap(), 8);
        assert_eq!(&buf, b"01234567");
        assert_eq!(read_chunk(&mut src, &mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"89");
        assert_eq!(read_chunk(&mut src, &mut buf).unwrap(), 0);
    }
}
