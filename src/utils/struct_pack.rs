//! Little-endian binary packing for fixed-layout structures.
//!
//! Use `#[derive(StructPack, StructUnpack)]` from `fwpkg_tool_macro` to pack
//! every field of a struct in declaration order.
use anyhow::Result;
use fwpkg_tool_macro::struct_pack_impl_for_num;
use std::io::{Read, Write};

pub trait StructUnpack: Sized {
    fn unpack<R: Read>(reader: R) -> Result<Self>;
}

pub trait StructPack: Sized {
    fn pack<W: Write>(&self, writer: &mut W) -> Result<()>;
}

impl<T: StructPack> StructPack for Vec<T> {
    fn pack<W: Write>(&self, writer: &mut W) -> Result<()> {
        for item in self {
            item.pack(writer)?;
        }
        Ok(())
    }
}

struct_pack_impl_for_num!(u8);
struct_pack_impl_for_num!(u16);
struct_pack_impl_for_num!(u32);
struct_pack_impl_for_num!(u64);

impl<const N: usize> StructPack for [u8; N] {
    fn pack<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(self)?;
        Ok(())
    }
}

impl<const N: usize> StructUnpack for [u8; N] {
    fn unpack<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = [0u8; N];
        reader.read_exact(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fwpkg_tool_macro::{StructPack, StructUnpack};

    #[derive(Debug, PartialEq, StructPack, StructUnpack)]
    struct Sample {
        tag: [u8; 3],
        len: u16,
        size: u32,
        #[skip_pack]
        #[skip_unpack]
        note: u8,
    }

    #[test]
    fn test_pack_declaration_order() {
        let sample = Sample {
            tag: *b"ABC",
            len: 0x0201,
            size: 0x06050403,
            note: 9,
        };
        let mut buf = Vec::new();
        sample.pack(&mut buf).unwrap();
        assert_eq!(buf, b"ABC\x01\x02\x03\x04\x05\x06");
    }

    #[test]
    fn test_unpack_skipped_field_defaults() {
        let data = b"XYZ\x10\x00\x20\x00\x00\x00";
        let sample = Sample::unpack(&data[..]).unwrap();
        assert_eq!(
            sample,
            Sample {
                tag: *b"XYZ",
                len: 0x10,
                size: 0x20,
                note: 0,
            }
        );
    }

    #[test]
    fn test_unpack_short_input() {
        assert!(u32::unpack(&[1u8, 2, 3][..]).is_err());
    }
}
