//! AVIF decoding: `avif-parse` for the container, `rav1d` for the AV1
//! payload, BT.601 YUV conversion into the crate-wide RGBA8 convention.
//!
//! The `image` crate's `avif` feature only enables the encoder (rav1e);
//! decoding would require the `avif-native` C dependency. The cascade's
//! tertiary decoder instead drives rav1d (the pure-Rust dav1d port)
//! directly through its dav1d-compatible entry points.
//!
//! Only the primary item is decoded; an alpha auxiliary item, if present,
//! is ignored and the output alpha is opaque.

use image::RgbaImage;
use rav1d::include::dav1d::data::Dav1dData;
use rav1d::include::dav1d::dav1d::Dav1dSettings;
use rav1d::include::dav1d::headers::{
    DAV1D_PIXEL_LAYOUT_I400, DAV1D_PIXEL_LAYOUT_I420, DAV1D_PIXEL_LAYOUT_I422,
    DAV1D_PIXEL_LAYOUT_I444,
};
use rav1d::include::dav1d::picture::Dav1dPicture;
use std::path::Path;
use std::ptr::NonNull;

/// Decode the primary item of an AVIF file into RGBA8.
///
/// The error is a human-readable reason; it feeds the cascade's
/// per-decoder diagnostics.
pub fn decode_rgba(path: &Path) -> Result<RgbaImage, String> {
    let file_data = std::fs::read(path).map_err(|e| e.to_string())?;
    let avif = avif_parse::read_avif(&mut std::io::Cursor::new(&file_data))
        .map_err(|e| format!("AVIF container parse failed: {e:?}"))?;
    let av1_bytes: &[u8] = &avif.primary_item;

    let mut settings = std::mem::MaybeUninit::<Dav1dSettings>::uninit();
    unsafe {
        rav1d::src::lib::dav1d_default_settings(NonNull::new(settings.as_mut_ptr()).unwrap())
    };
    let mut settings = unsafe { settings.assume_init() };
    settings.n_threads = 1;
    settings.max_frame_delay = 1;

    let mut ctx = None;
    let rc =
        unsafe { rav1d::src::lib::dav1d_open(NonNull::new(&mut ctx), NonNull::new(&mut settings)) };
    if rc.0 != 0 {
        return Err(format!("AV1 decoder init failed ({})", rc.0));
    }

    // Copy the AV1 payload into a decoder-owned buffer
    let mut data = Dav1dData::default();
    let buf_ptr =
        unsafe { rav1d::src::lib::dav1d_data_create(NonNull::new(&mut data), av1_bytes.len()) };
    if buf_ptr.is_null() {
        unsafe { rav1d::src::lib::dav1d_close(NonNull::new(&mut ctx)) };
        return Err("AV1 decoder buffer allocation failed".into());
    }
    unsafe { std::ptr::copy_nonoverlapping(av1_bytes.as_ptr(), buf_ptr, av1_bytes.len()) };

    let rc = unsafe { rav1d::src::lib::dav1d_send_data(ctx, NonNull::new(&mut data)) };
    if rc.0 != 0 {
        unsafe {
            rav1d::src::lib::dav1d_data_unref(NonNull::new(&mut data));
            rav1d::src::lib::dav1d_close(NonNull::new(&mut ctx));
        }
        return Err(format!("AV1 decode rejected the bitstream ({})", rc.0));
    }

    let mut pic: Dav1dPicture = unsafe { std::mem::zeroed() };
    let rc = unsafe { rav1d::src::lib::dav1d_get_picture(ctx, NonNull::new(&mut pic)) };
    if rc.0 != 0 {
        unsafe { rav1d::src::lib::dav1d_close(NonNull::new(&mut ctx)) };
        return Err(format!("AV1 decode produced no picture ({})", rc.0));
    }

    let width = pic.p.w as u32;
    let height = pic.p.h as u32;
    let bpc = pic.p.bpc as u32;
    let layout = pic.p.layout;
    let y_ptr = pic.data[0].unwrap().as_ptr() as *const u8;

    let planes = if layout == DAV1D_PIXEL_LAYOUT_I400 {
        Some(YuvView {
            y_ptr,
            u_ptr: y_ptr,
            v_ptr: y_ptr,
            y_stride: pic.stride[0],
            uv_stride: 0,
            width,
            height,
            bpc,
            subsample_x: false,
            subsample_y: false,
            monochrome: true,
        })
    } else {
        let subsampling = match layout {
            DAV1D_PIXEL_LAYOUT_I420 => Some((true, true)),
            DAV1D_PIXEL_LAYOUT_I422 => Some((true, false)),
            DAV1D_PIXEL_LAYOUT_I444 => Some((false, false)),
            _ => None,
        };
        subsampling.map(|(subsample_x, subsample_y)| YuvView {
            y_ptr,
            u_ptr: pic.data[1].unwrap().as_ptr() as *const u8,
            v_ptr: pic.data[2].unwrap().as_ptr() as *const u8,
            y_stride: pic.stride[0],
            uv_stride: pic.stride[1],
            width,
            height,
            bpc,
            subsample_x,
            subsample_y,
            monochrome: false,
        })
    };

    let rgba = planes.map(|view| view.to_rgba());

    unsafe {
        rav1d::src::lib::dav1d_picture_unref(NonNull::new(&mut pic));
        rav1d::src::lib::dav1d_close(NonNull::new(&mut ctx));
    }

    let rgba = rgba.ok_or_else(|| format!("unsupported AVIF pixel layout: {layout}"))?;
    RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| "decoded AVIF plane sizes are inconsistent".into())
}

/// Borrowed view over the decoded YUV planes.
struct YuvView {
    y_ptr: *const u8,
    u_ptr: *const u8,
    v_ptr: *const u8,
    y_stride: isize,
    uv_stride: isize,
    width: u32,
    height: u32,
    bpc: u32,
    subsample_x: bool,
    subsample_y: bool,
    monochrome: bool,
}

impl YuvView {
    /// Interleave the planes into RGBA8 using BT.601 coefficients, scaling
    /// 10/12-bit samples down to 8 bits. Alpha is opaque.
    fn to_rgba(&self) -> Vec<u8> {
        let max_sample = ((1u32 << self.bpc) - 1) as f32;
        let chroma_center = (1u32 << (self.bpc - 1)) as f32;
        let scale = 255.0 / max_sample;

        let mut rgba = Vec::with_capacity((self.width * self.height * 4) as usize);

        for row in 0..self.height {
            for col in 0..self.width {
                let luma = sample(self.y_ptr, self.y_stride, col, row, self.bpc);

                let (r, g, b) = if self.monochrome {
                    let v = (luma * scale).clamp(0.0, 255.0);
                    (v, v, v)
                } else {
                    let chroma_col = if self.subsample_x { col / 2 } else { col };
                    let chroma_row = if self.subsample_y { row / 2 } else { row };
                    let cb =
                        sample(self.u_ptr, self.uv_stride, chroma_col, chroma_row, self.bpc)
                            - chroma_center;
                    let cr =
                        sample(self.v_ptr, self.uv_stride, chroma_col, chroma_row, self.bpc)
                            - chroma_center;

                    (
                        ((luma + 1.402 * cr) * scale).clamp(0.0, 255.0),
                        ((luma - 0.344136 * cb - 0.714136 * cr) * scale).clamp(0.0, 255.0),
                        ((luma + 1.772 * cb) * scale).clamp(0.0, 255.0),
                    )
                };

                rgba.extend_from_slice(&[r as u8, g as u8, b as u8, 255]);
            }
        }

        rgba
    }
}

/// Read one sample from a plane; 10-bit and 12-bit planes store u16.
#[inline]
fn sample(ptr: *const u8, stride: isize, x: u32, y: u32, bpc: u32) -> f32 {
    if bpc <= 8 {
        (unsafe { *ptr.offset(y as isize * stride + x as isize) }) as f32
    } else {
        let byte_offset = y as isize * stride + x as isize * 2;
        (unsafe { *(ptr.offset(byte_offset) as *const u16) }) as f32
    }
}
