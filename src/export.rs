//! Reading and writing of PNG files
//!
//! Used to store rendered canvases and compare them against references.
use crate::color::Rgba8;
use crate::error::Result;

use std::path::Path;

/// Read a PNG file as RGBA pixels, returns pixels, width and height
pub fn read_png<P: AsRef<Path>>(filename: P) -> Result<(Vec<Rgba8>, usize, usize)> {
    let img = image::open(filename)?.to_rgba();
    let (w, h) = img.dimensions();
    let buf = img.into_raw();
    let pixels = buf.chunks(4)
        .map(|c| Rgba8::new(c[0], c[1], c[2], c[3]))
        .collect();
    Ok((pixels, w as usize, h as usize))
}

/// Write RGBA pixels to a PNG file
pub fn write_png<P: AsRef<Path>>(pixels: &[Rgba8], width: usize, height: usize, filename: P) -> Result<()> {
    let buf : Vec<u8> = pixels.iter()
        .flat_map(|c| vec![c.r, c.g, c.b, c.a])
        .collect();
    image::save_buffer(filename, &buf, width as u32, height as u32, image::RGBA(8))?;
    Ok(())
}

/// Compare two PNG files pixel by pixel
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool> {
    let (d1,w1,h1) = read_png(f1)?;
    let (d2,w2,h2) = read_png(f2)?;
    if w1 != w2 || h1 != h2 {
        log::debug!("IMG DIFF: size {}x{} != {}x{}", w1, h1, w2, h2);
        return Ok(false);
    }
    let mut flag = true;
    for (i,(v1,v2)) in d1.iter().zip(d2.iter()).enumerate() {
        if v1 != v2 {
            log::debug!("IMG DIFF: [{},{}]: {:?} {:?}", i % w1, i / w1, v1, v2);
            flag = false;
        }
    }
    Ok(flag)
}
