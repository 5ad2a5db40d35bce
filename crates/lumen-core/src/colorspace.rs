/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image Colorspace information and manipulation utilities.

/// All possible image colorspaces
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorSpace {
    /// Red, Green , Blue
    RGB,
    /// Red, Green, Blue, Alpha
    RGBA,
    /// Blue, Green, Red
    BGR,
    /// Blue, Green, Red, Alpha
    BGRA,
    /// Grayscale colorspace
    Luma,
    /// Grayscale with alpha colorspace
    LumaA
}

/// A single color component of a pixel
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColorComponent {
    Red,
    Green,
    Blue
}

impl ColorSpace {
    /// Number of color channels present for a certain colorspace
    ///
    /// E.g. RGB returns 3 since it contains R,G and B colors to make up a pixel
    pub const fn num_components(&self) -> usize {
        match self {
            Self::RGB | Self::BGR => 3,
            Self::RGBA | Self::BGRA => 4,
            Self::Luma => 1,
            Self::LumaA => 2
        }
    }

    /// Number of components excluding the alpha channel
    pub const fn num_color_components(&self) -> usize {
        if self.has_alpha() {
            self.num_components() - 1
        } else {
            self.num_components()
        }
    }

    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::RGBA | Self::LumaA | Self::BGRA)
    }

    pub const fn is_grayscale(&self) -> bool {
        matches!(self, Self::LumaA | Self::Luma)
    }

    /// Returns the position of the alpha pixel in a pixel
    ///
    /// If an image doesn't have an alpha channel returns `None`
    pub const fn alpha_position(&self) -> Option<usize> {
        match self {
            ColorSpace::RGBA | ColorSpace::BGRA => Some(3),
            ColorSpace::LumaA => Some(1),
            _ => None
        }
    }

    /// Returns the index of a color component in a pixel
    ///
    /// For BGR layouts red lives at index 2, for RGB layouts at index 0.
    /// Grayscale colorspaces have no separate color components, so `None`
    /// is returned
    pub const fn component_position(&self, component: ColorComponent) -> Option<usize> {
        match (self, component) {
            (Self::RGB | Self::RGBA, ColorComponent::Red)
            | (Self::BGR | Self::BGRA, ColorComponent::Blue) => Some(0),
            (Self::RGB | Self::RGBA | Self::BGR | Self::BGRA, ColorComponent::Green) => Some(1),
            (Self::RGB | Self::RGBA, ColorComponent::Blue)
            | (Self::BGR | Self::BGRA, ColorComponent::Red) => Some(2),
            _ => None
        }
    }

    /// The colorspace with the alpha channel removed
    pub const fn without_alpha(&self) -> ColorSpace {
        match self {
            Self::RGBA => Self::RGB,
            Self::BGRA => Self::BGR,
            Self::LumaA => Self::Luma,
            c => *c
        }
    }
}

/// Colorspaces that lighting effects operate on
pub static EFFECT_COLORSPACES: [ColorSpace; 4] = [
    ColorSpace::RGB,
    ColorSpace::RGBA,
    ColorSpace::BGR,
    ColorSpace::BGRA
];

/// Encapsulates all colorspaces supported by
/// the library
pub static ALL_COLORSPACES: [ColorSpace; 6] = [
    ColorSpace::RGB,
    ColorSpace::RGBA,
    ColorSpace::BGR,
    ColorSpace::BGRA,
    ColorSpace::Luma,
    ColorSpace::LumaA
];
