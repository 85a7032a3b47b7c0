/// Image decoding into RGBA8 rasters.
pub mod decode;
