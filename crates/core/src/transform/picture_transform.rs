use std::str::FromStr;

use ndarray::Array2;
use thiserror::Error;

use crate::shared::constants::MAX_PIXEL_INTENSITY;
use crate::shared::picture::Picture;
use crate::shared::pixel::Pixel;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TransformError {
    #[error("rotate is undefined for angle {0} (must be 90, 180 or 270)")]
    InvalidAngle(String),
    #[error("flip is undefined for plane '{0}' (must be H or V)")]
    InvalidPlane(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    pub fn from_degrees(angle: i32) -> Result<Self, TransformError> {
        match angle {
            90 => Ok(Rotation::Quarter),
            180 => Ok(Rotation::Half),
            270 => Ok(Rotation::ThreeQuarter),
            other => Err(TransformError::InvalidAngle(other.to_string())),
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Quarter => 90,
            Rotation::Half => 180,
            Rotation::ThreeQuarter => 270,
        }
    }
}

impl FromStr for Rotation {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let angle = s
            .trim()
            .parse::<i32>()
            .map_err(|_| TransformError::InvalidAngle(s.to_string()))?;
        Self::from_degrees(angle)
    }
}

/// Plane to mirror across.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipAxis {
    /// Mirror left-right.
    Horizontal,
    /// Mirror top-bottom.
    Vertical,
}

impl FromStr for FlipAxis {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "H" => Ok(FlipAxis::Horizontal),
            "V" => Ok(FlipAxis::Vertical),
            other => Err(TransformError::InvalidPlane(other.to_string())),
        }
    }
}

/// Sequential whole-picture transformations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transform {
    Invert,
    Grayscale,
    Rotate(Rotation),
    Flip(FlipAxis),
}

impl Transform {
    pub fn apply(self, picture: &mut Picture) {
        match self {
            Transform::Invert => invert(picture),
            Transform::Grayscale => grayscale(picture),
            Transform::Rotate(rotation) => rotate(picture, rotation),
            Transform::Flip(axis) => flip(picture, axis),
        }
    }
}

pub fn invert(picture: &mut Picture) {
    for p in picture.as_ndarray_mut().iter_mut() {
        *p = Pixel::new(
            MAX_PIXEL_INTENSITY - p.red,
            MAX_PIXEL_INTENSITY - p.green,
            MAX_PIXEL_INTENSITY - p.blue,
        );
    }
}

pub fn grayscale(picture: &mut Picture) {
    for p in picture.as_ndarray_mut().iter_mut() {
        let avg = (u16::from(p.red) + u16::from(p.green) + u16::from(p.blue)) / 3;
        *p = Pixel::gray(avg as u8);
    }
}

/// Rotates clockwise, swapping width and height for quarter turns.
pub fn rotate(picture: &mut Picture, rotation: Rotation) {
    let source = picture.snapshot();
    let (w, h) = (source.width(), source.height());
    let (new_w, new_h) = match rotation {
        Rotation::Half => (w, h),
        Rotation::Quarter | Rotation::ThreeQuarter => (h, w),
    };

    let pixels = Array2::from_shape_fn((new_h, new_w), |(j, i)| match rotation {
        Rotation::Quarter => source.get_pixel(j, new_w - 1 - i),
        Rotation::Half => source.get_pixel(new_w - 1 - i, new_h - 1 - j),
        Rotation::ThreeQuarter => source.get_pixel(new_h - 1 - j, i),
    });
    *picture = Picture::from_array(pixels);
}

pub fn flip(picture: &mut Picture, axis: FlipAxis) {
    let source = picture.snapshot();
    let (w, h) = (source.width(), source.height());
    for y in 0..h {
        for x in 0..w {
            let p = match axis {
                FlipAxis::Vertical => source.get_pixel(x, h - 1 - y),
                FlipAxis::Horizontal => source.get_pixel(w - 1 - x, y),
            };
            picture.set_pixel(x, y, p);
        }
    }
}
