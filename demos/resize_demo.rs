//! Fixed sequence of portfolio resizes, mirroring the library's intended
//! call-site shape: no flags, no arguments, one boolean per file.

use img_rescale::resize_image;
use std::path::Path;

fn main() {
    let portfolio = Path::new("dist/assets/img/portfolio");
    let files = [
        "High-Pressure-3-Phase-High-Quality-Horizontal.jpg",
        "7.jpg",
        "High-Pressure-Stainless-Steel-Submersible-Clean-3.jpg",
        "Industrial-High-Pressure-Factory-Direct-Dirty-Water.jpg",
        "OEM-Industrial-Stainless-Steel-Single-Screw-Pump.jpg",
        "Wholesale-High-Quality-OEM-Supported-High-Pressure.jpg",
    ];

    let mut succeeded = 0;
    for name in files {
        if resize_image(&portfolio.join(name), None, Some(600), Some(450), None) {
            succeeded += 1;
        }
    }

    println!("🎯 Resized {} of {} images", succeeded, files.len());
}
