//! PNG encoding and decoding of pixel buffers.
use std::fs::File;
use std::io;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::Error;
use crate::gfx::pixels::PixelBuffer;
use crate::gfx::prelude::Size;

/// MIME type of encoded images.
pub const MEDIA_TYPE: &str = "image/png";

/// A PNG-encoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub size: Size<u32>,
    pub data: Vec<u8>,
}

impl EncodedImage {
    /// The image as a `data:` URL, ready to be handed to remote services.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", MEDIA_TYPE, STANDARD.encode(&self.data))
    }

    /// Write the encoded image to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        std::fs::write(path.as_ref(), &self.data).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("error saving {}: {}", path.as_ref().display(), e),
            )
        })
    }
}

/// Encode a pixel buffer as an 8-bit RGBA PNG.
pub fn encode(pixels: &PixelBuffer) -> Result<EncodedImage, Error> {
    let size = pixels.size();
    let mut data = Vec::new();
    let mut encoder = png::Encoder::new(&mut data, size.w, size.h);

    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| Error::Encoding(e.to_string()))?;
    writer
        .write_image_data(pixels.bytes())
        .map_err(|e| Error::Encoding(e.to_string()))?;
    writer.finish().map_err(|e| Error::Encoding(e.to_string()))?;

    Ok(EncodedImage { size, data })
}

/// Decode a PNG into an RGBA pixel buffer. Grayscale, indexed and 16-bit images
/// are converted.
pub fn read<R: io::Read>(reader: R) -> Result<PixelBuffer, Error> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| Error::Decoding(e.to_string()))?;
    let mut buffer: Vec<u8> = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buffer)
        .map_err(|e| Error::Decoding(e.to_string()))?;
    let bytes = &buffer[..info.buffer_size()];
    let size = Size::new(info.width, info.height);

    if info.bit_depth != png::BitDepth::Eight {
        return Err(Error::Decoding(format!(
            "unsupported bit depth {:?}",
            info.bit_depth
        )));
    }

    let rgba: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => bytes.to_vec(),
        png::ColorType::Rgb => bytes
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 0xff])
            .collect(),
        png::ColorType::GrayscaleAlpha => bytes
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        png::ColorType::Grayscale => bytes.iter().flat_map(|v| [*v, *v, *v, 0xff]).collect(),
        png::ColorType::Indexed => {
            return Err(Error::Decoding(String::from("unexpanded indexed image")));
        }
    };

    PixelBuffer::from_bytes(rgba, size)
        .ok_or_else(|| Error::Decoding(String::from("image data doesn't match its size")))
}

/// Decode the PNG at the given path.
pub fn open<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, Error> {
    let f = File::open(&path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("error opening {}: {}", path.as_ref().display(), e),
        )
    })?;

    self::read(io::BufReader::new(f))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gfx::prelude::Rgba8;

    #[test]
    fn test_encode_decode() {
        let mut pixels = PixelBuffer::new([3, 2]);
        pixels.set(0, 0, Rgba8::RED);
        pixels.set(2, 1, Rgba8::new(1, 2, 3, 4));

        let image = encode(&pixels).unwrap();
        assert_eq!(image.size, Size::new(3, 2));
        assert_eq!(&image.data[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = read(image.data.as_slice()).unwrap();
        assert_eq!(decoded, pixels);
    }

    #[test]
    fn test_decode_rgb() {
        let mut data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut data, 2, 1);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[255, 0, 0, 0, 0, 255]).unwrap();
        }
        let decoded = read(data.as_slice()).unwrap();

        assert_eq!(decoded.get(0, 0), Some(Rgba8::RED));
        assert_eq!(decoded.get(1, 0), Some(Rgba8::BLUE));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            read(&b"not a png"[..]),
            Err(Error::Decoding(_))
        ));
    }

    #[test]
    fn test_data_url() {
        let image = EncodedImage {
            size: Size::new(1, 1),
            data: vec![0xde, 0xad, 0xbe, 0xef],
        };
        assert_eq!(image.to_data_url(), "data:image/png;base64,3q2+7w==");
    }
}
