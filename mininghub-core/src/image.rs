use std::path::{Path, PathBuf};

use crate::error::{PlanError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceRGB,
    DeviceGray,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceGray => "DeviceGray",
        }
    }
}

/// Pixel payload of a decoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePixels {
    /// 8-bit samples, row-major, with an optional separate alpha plane.
    Raw {
        color_space: ColorSpace,
        samples: Vec<u8>,
        alpha: Option<Vec<u8>>,
    },
    /// JPEG bytes embedded as-is.
    Jpeg {
        color_space: ColorSpace,
        data: Vec<u8>,
    },
}

/// A raster image ready for embedding, independent of any drawing backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub pixels: ImagePixels,
}

impl RasterImage {
    /// Decode PNG or JPEG bytes. `origin` only labels errors.
    pub fn decode(data: Vec<u8>, origin: &Path) -> Result<Self> {
        let fail = |reason: String| PlanError::ImageLoad {
            path: origin.to_path_buf(),
            reason,
        };
        if data.len() < 4 {
            return Err(fail("image data too short to detect format".to_string()));
        }
        if data[0] == 0xFF && data[1] == 0xD8 {
            decode_jpeg(data).map_err(fail)
        } else if data.starts_with(b"\x89PNG") {
            decode_png(&data).map_err(fail)
        } else {
            Err(fail("unsupported image format (expected PNG or JPEG)".to_string()))
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self.pixels, ImagePixels::Raw { alpha: Some(_), .. })
    }
}

/// Decode bytes that did not come from a file.
pub fn decode_bytes(data: Vec<u8>) -> Result<RasterImage> {
    RasterImage::decode(data, &PathBuf::from("<memory>"))
}

fn decode_jpeg(data: Vec<u8>) -> std::result::Result<RasterImage, String> {
    let (width, height, components) = jpeg_dimensions(&data)?;
    let color_space = match components {
        1 => ColorSpace::DeviceGray,
        3 => ColorSpace::DeviceRGB,
        n => return Err(format!("unsupported JPEG component count: {}", n)),
    };
    Ok(RasterImage {
        width,
        height,
        pixels: ImagePixels::Jpeg { color_space, data },
    })
}

/// Find the first SOF0..SOF3 marker and read height, width and components.
fn jpeg_dimensions(data: &[u8]) -> std::result::Result<(u32, u32, u8), String> {
    let mut i = 0;
    while i + 1 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        match marker {
            0xC0..=0xC3 => {
                if i + 9 >= data.len() {
                    return Err("JPEG SOF marker truncated".to_string());
                }
                let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
                let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
                return Ok((width, height, data[i + 9]));
            }
            0xFF | 0x00 => i += 1,
            0xD8 | 0xD9 | 0xD0..=0xD7 => i += 2,
            _ => {
                if i + 3 >= data.len() {
                    break;
                }
                let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
                i += 2 + seg_len;
            }
        }
    }
    Err("no SOF marker found in JPEG data".to_string())
}

fn decode_png(data: &[u8]) -> std::result::Result<RasterImage, String> {
    let mut decoder = png::Decoder::new(data);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| format!("PNG decode error: {}", e))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| format!("PNG frame error: {}", e))?;
    buf.truncate(info.buffer_size());

    let (color_space, samples, alpha) = match info.color_type {
        png::ColorType::Rgb => (ColorSpace::DeviceRGB, buf, None),
        png::ColorType::Grayscale => (ColorSpace::DeviceGray, buf, None),
        png::ColorType::Rgba => {
            let (rgb, alpha) = split_alpha(&buf, 4);
            (ColorSpace::DeviceRGB, rgb, Some(alpha))
        }
        png::ColorType::GrayscaleAlpha => {
            let (gray, alpha) = split_alpha(&buf, 2);
            (ColorSpace::DeviceGray, gray, Some(alpha))
        }
        other => return Err(format!("unsupported PNG color type: {:?}", other)),
    };

    Ok(RasterImage {
        width: info.width,
        height: info.height,
        pixels: ImagePixels::Raw {
            color_space,
            samples,
            alpha,
        },
    })
}

/// Split interleaved samples whose last channel is alpha.
fn split_alpha(buf: &[u8], channels: usize) -> (Vec<u8>, Vec<u8>) {
    let pixels = buf.len() / channels;
    let mut color = Vec::with_capacity(pixels * (channels - 1));
    let mut alpha = Vec::with_capacity(pixels);
    for chunk in buf.chunks_exact(channels) {
        color.extend_from_slice(&chunk[..channels - 1]);
        alpha.push(chunk[channels - 1]);
    }
    (color, alpha)
}
