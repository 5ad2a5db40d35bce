/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::{Path, PathBuf};

use log::{info, warn};
use lumen_core::colorspace::ColorSpace;
use lumen_image::codecs::ImageFormat;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_imageprocs::flare::FlareTemplate;

/// Read an image and bring it into a layout effects accept
///
/// Grayscale images are expanded to RGB, keeping alpha if present
pub fn read_image(path: &Path) -> Result<Image, ImageErrors> {
    let mut image = Image::open(path)?;
    let colorspace = image.colorspace();

    info!(
        "Read {:?}, {:?} {:?}",
        path,
        image.dimensions(),
        colorspace
    );

    if colorspace.is_grayscale() {
        let target = if colorspace.has_alpha() {
            ColorSpace::RGBA
        } else {
            ColorSpace::RGB
        };
        info!("Converting {:?} image to {:?}", colorspace, target);
        image.convert_colorspace(target)?;
    }
    Ok(image)
}

/// Load the flare template if one was given
///
/// A template that cannot be loaded is not an error, lens flares then
/// use a synthesized template
pub fn read_flare_template(path: Option<&PathBuf>) -> Option<FlareTemplate> {
    let path = path?;

    match FlareTemplate::open(path) {
        Ok(template) => Some(template),
        Err(e) => {
            warn!(
                "Could not use {:?} as flare template ({:?}), synthesizing one",
                path, e
            );
            None
        }
    }
}

/// Write an image, the format is taken from the file extension
pub fn write_image(image: &Image, path: &Path) -> Result<(), ImageErrors> {
    let format = ImageFormat::from_path(path);

    if !format.has_encoder() {
        return Err(ImageErrors::GenericString(format!(
            "No encoder for {:?}, use a .png, .jpg or .jpeg extension",
            path
        )));
    }
    image.save_to(path, format)?;
    info!("Wrote {:?} as {:?}", path, format);

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use lumen_core::colorspace::ColorSpace;
    use lumen_image::image::Image;

    use crate::file_io::{read_flare_template, read_image, write_image};

    #[test]
    fn missing_template_falls_back() {
        assert!(read_flare_template(None).is_none());

        let missing = PathBuf::from("/this/path/does/not/exist/flare.png");
        assert!(read_flare_template(Some(&missing)).is_none());
    }

    #[test]
    fn unknown_extensions_are_rejected() {
        let image = Image::fill(10, ColorSpace::RGB, 4, 4);
        assert!(write_image(&image, Path::new("out.tiff")).is_err());
    }

    #[test]
    fn png_round_trip_through_files() {
        let path = std::env::temp_dir().join("lumen-bin-file-io-test.png");
        let image = Image::fill(77, ColorSpace::RGBA, 6, 5);

        write_image(&image, &path).unwrap();
        let read = read_image(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(read, image);
    }
}
