use crate::utils::struct_pack::StructUnpack;
use std::io::*;

pub trait ReadExt {
    fn read_u8(&mut self) -> Result<u8>;
    fn read_u16(&mut self) -> Result<u16>;
    fn read_u32(&mut self) -> Result<u32>;

    fn read_struct<T: StructUnpack>(&mut self) -> Result<T>;
}

impl<T: Read> ReadExt for T {
    fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }
    fn read_u16(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_exact(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }
    fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_struct<S: StructUnpack>(&mut self) -> Result<S> {
        S::unpack(self).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

pub trait WriteExt {
    fn write_u8(&mut self, value: u8) -> Result<()>;
    fn write_u16(&mut self, value: u16) -> Result<()>;
    fn write_u32(&mut self, value: u32) -> Result<()>;
}

impl<T: Write> WriteExt for T {
    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_all(&value.to_le_bytes())
    }
    fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_all(&value.to_le_bytes())
    }
    fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_all(&value.to_le_bytes())
    }
}

/// A cursor over a borrowed byte slice which knows how much is left.
pub struct MemReaderRef<'a> {
    data: &'a [u8],
    pos: usize,
}

impl std::fmt::Debug for MemReaderRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemReaderRef")
            .field("pos", &self.pos)
            .field("data_length", &self.data.len())
            .finish_non_exhaustive()
    }
}

impl<'a> MemReaderRef<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        MemReaderRef { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Borrows the next `len` bytes without copying them.
    pub fn take_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!(
                    "Requested {} bytes at offset {}, only {} available",
                    len,
                    self.pos,
                    self.remaining()
                ),
            ));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }
}

impl Read for MemReaderRef<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.pos >= self.data.len() {
            return Ok(0);
        }
        let bytes_to_read = buf.len().min(self.data.len() - self.pos);
        buf[..bytes_to_read].copy_from_slice(&self.data[self.pos..self.pos + bytes_to_read]);
        self.pos += bytes_to_read;
        Ok(bytes_to_read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_little_endian() {
        let mut buf = Vec::new();
        buf.write_u16(0x0102).unwrap();
        buf.write_u32(0x03040506).unwrap();
        buf.write_u8(7).unwrap();
        assert_eq!(buf, [0x02, 0x01, 0x06, 0x05, 0x04, 0x03, 0x07]);
    }

    #[test]
    fn test_mem_reader_ref() {
        let data = [0x05, 0x00, 0x2A, 0x00, 0x00, 0x00, b'a', b'b'];
        let mut reader = MemReaderRef::new(&data);
        assert_eq!(reader.read_u16().unwrap(), 5);
        assert_eq!(reader.read_u32().unwrap(), 42);
        assert_eq!(reader.remaining(), 2);
        assert_eq!(reader.take_slice(2).unwrap(), b"ab");
        assert!(reader.is_eof());
        assert!(reader.take_slice(1).is_err());
        assert!(reader.read_u8().is_err());
    }
}
