use std::io;

use byteorder::{ByteOrder, ReadBytesExt, WriteBytesExt};

/// Trait for write content to W in the byte order B.
pub trait WriteTo<W: io::Write> {
    type Error;

    /// Write `self` and return the number of bytes written.
    fn write_to<B: ByteOrder>(&self, w: &mut W) -> Result<u64, Self::Error>;
}

/// Trait for read content from R in the byte order B.
pub trait ReadFrom<R: io::Read> {
    type Error;

    fn read_from<B: ByteOrder>(&mut self, r: &mut R) -> Result<(), Self::Error>;
}

pub fn read_from<B, R, T>(r: &mut R) -> Result<T, T::Error>
where
    B: ByteOrder,
    R: io::Read,
    T: Default + ReadFrom<R>,
{
    let mut data = <T as Default>::default();
    data.read_from::<B>(r)?;
    Ok(data)
}

macro_rules! impl_word_WriteTo {
    ( $( ( $typ:ty, $method:ident ) ),* ) => ($(
        impl<W: io::Write> WriteTo<W> for $typ {
            type Error = io::Error;

            fn write_to<B: ByteOrder>(&self, w: &mut W) -> io::Result<u64> {
                w.$method::<B>(*self)?;
                Ok(std::mem::size_of::<$typ>() as u64)
            }
        }
    )*)
}

macro_rules! impl_word_ReadFrom {
    ( $( ( $typ:ty, $method:ident ) ),* ) => ($(
        impl<R: io::Read> ReadFrom<R> for $typ {
            type Error = io::Error;

            fn read_from<B: ByteOrder>(&mut self, r: &mut R) -> io::Result<()> {
                *self = r.$method::<B>()?;
                Ok(())
            }
        }
    )*)
}

impl_word_WriteTo!((u32, write_u32), (u64, write_u64));
impl_word_ReadFrom!((u32, read_u32), (u64, read_u64));
