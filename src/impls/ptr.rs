//! Owning pointers to streamables.
//!
//! Writing goes through dynamic dispatch and emits the same framed form
//! as the pointee written by value. Decoding goes through the base type's
//! [`FindDerived`] factory, so a `Box<dyn Base>` comes back as the
//! concrete type the stream describes; `Rc`/`Arc` take ownership of the
//! same freshly built allocation.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;

use crate::{count, FindDerived, FromStream, Result, StreamReader, StreamWriter, Streamable, ToStream};

macro_rules! impl_ptr_to_stream {
    ($($ptr:ident),+ $(,)?) => { $(
        impl<T: Streamable + ?Sized> ToStream for $ptr<T> {
            fn parse_size(&self) -> usize {
                let body = (**self).find_parse_size();
                count::encoded_size(body as u64) + body
            }

            fn to_stream(&self, w: &mut StreamWriter<'_>) -> Result<()> {
                w.write_streamable(&**self)?;
                Ok(())
            }
        }
    )+ };
}

impl_ptr_to_stream!(Box, Rc, Arc);

impl<T: FindDerived + ?Sized> FromStream for Box<T> {
    fn from_stream(r: &mut StreamReader<'_>) -> Result<Self> {
        r.read_streamable_ptr()
    }
}

impl<T: FindDerived + ?Sized> FromStream for Rc<T> {
    fn from_stream(r: &mut StreamReader<'_>) -> Result<Self> {
        Ok(Rc::from(r.read_streamable_ptr::<T>()?))
    }
}

impl<T: FindDerived + ?Sized> FromStream for Arc<T> {
    fn from_stream(r: &mut StreamReader<'_>) -> Result<Self> {
        Ok(Arc::from(r.read_streamable_ptr::<T>()?))
    }
}
