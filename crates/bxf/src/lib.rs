#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use bxf_image as image;

#[doc(inline)]
pub use bxf_imgproc as imgproc;

#[doc(inline)]
pub use bxf_io as io;

#[doc(inline)]
pub use bxf_args as args;
