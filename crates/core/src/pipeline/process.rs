use std::str::FromStr;

use thiserror::Error;

use crate::blurring::domain::blur_strategy::{BlurStrategy, StrategyKind};
use crate::blurring::domain::strategy_config::StrategyConfig;
use crate::blurring::infrastructure::strategy_factory::create_strategy;
use crate::shared::picture::Picture;
use crate::transform::picture_transform::{FlipAxis, Rotation, Transform, TransformError};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProcessError {
    #[error("invalid process requested: {0} is not defined")]
    UnknownProcess(String),
    #[error("{process} requires an argument ({expected})")]
    MissingArgument {
        process: &'static str,
        expected: &'static str,
    },
    #[error(transparent)]
    Transform(#[from] TransformError),
}

/// A picture transformation selected by name on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Process {
    Blur(StrategyKind),
    Transform(Transform),
}

impl Process {
    pub const TRANSFORM_NAMES: [&'static str; 4] = [
        "invert_picture",
        "grayscale_picture",
        "rotate_picture",
        "flip_picture",
    ];

    /// Resolves a process name plus its optional argument.
    ///
    /// Only `rotate_picture` (angle) and `flip_picture` (`H` or `V`) take an
    /// argument; it is ignored elsewhere.
    pub fn parse(name: &str, argument: Option<&str>) -> Result<Self, ProcessError> {
        if let Ok(kind) = StrategyKind::from_str(name) {
            return Ok(Process::Blur(kind));
        }

        let transform = match name {
            "invert_picture" => Transform::Invert,
            "grayscale_picture" => Transform::Grayscale,
            "rotate_picture" => {
                let angle = argument.ok_or(ProcessError::MissingArgument {
                    process: "rotate_picture",
                    expected: "90, 180 or 270",
                })?;
                Transform::Rotate(angle.parse::<Rotation>()?)
            }
            "flip_picture" => {
                let plane = argument.ok_or(ProcessError::MissingArgument {
                    process: "flip_picture",
                    expected: "H or V",
                })?;
                Transform::Flip(plane.parse::<FlipAxis>()?)
            }
            other => return Err(ProcessError::UnknownProcess(other.to_string())),
        };
        Ok(Process::Transform(transform))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Process::Blur(kind) => kind.name(),
            Process::Transform(Transform::Invert) => "invert_picture",
            Process::Transform(Transform::Grayscale) => "grayscale_picture",
            Process::Transform(Transform::Rotate(_)) => "rotate_picture",
            Process::Transform(Transform::Flip(_)) => "flip_picture",
        }
    }

    /// Every name [`Process::parse`] accepts.
    pub fn names() -> Vec<&'static str> {
        StrategyKind::ALL
            .iter()
            .map(|kind| kind.name())
            .chain(Self::TRANSFORM_NAMES)
            .collect()
    }

    /// Builds the runnable operation, sizing blur pools from `config`.
    pub fn into_operation(self, config: &StrategyConfig) -> Box<dyn PictureOperation> {
        match self {
            Process::Blur(kind) => Box::new(BlurOperation(create_strategy(kind, config))),
            Process::Transform(transform) => Box::new(TransformOperation(transform)),
        }
    }
}

/// A named, in-place picture operation the benchmark harness can time.
pub trait PictureOperation: Send {
    fn name(&self) -> &'static str;

    fn apply(&self, picture: &mut Picture) -> Result<(), Box<dyn std::error::Error>>;
}

struct BlurOperation(Box<dyn BlurStrategy>);

impl PictureOperation for BlurOperation {
    fn name(&self) -> &'static str {
        self.0.kind().name()
    }

    fn apply(&self, picture: &mut Picture) -> Result<(), Box<dyn std::error::Error>> {
        self.0.blur(picture)?;
        Ok(())
    }
}

struct TransformOperation(Transform);

impl PictureOperation for TransformOperation {
    fn name(&self) -> &'static str {
        Process::Transform(self.0).name()
    }

    fn apply(&self, picture: &mut Picture) -> Result<(), Box<dyn std::error::Error>> {
        self.0.apply(picture);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pixel::Pixel;
    use rstest::rstest;

    #[rstest]
    #[case("blur_picture", None, Process::Blur(StrategyKind::Sequential))]
    #[case("parallel_col_blur", None, Process::Blur(StrategyKind::Column))]
    #[case("invert_picture", None, Process::Transform(Transform::Invert))]
    #[case("grayscale_picture", Some("ignored"), Process::Transform(Transform::Grayscale))]
    #[case("rotate_picture", Some("270"), Process::Transform(Transform::Rotate(Rotation::ThreeQuarter)))]
    #[case("flip_picture", Some("V"), Process::Transform(Transform::Flip(FlipAxis::Vertical)))]
    fn test_parse(#[case] name: &str, #[case] argument: Option<&str>, #[case] expected: Process) {
        let process = Process::parse(name, argument).unwrap();
        assert_eq!(process, expected);
        assert_eq!(process.name(), name);
    }

    #[test]
    fn test_unknown_process() {
        assert_eq!(
            Process::parse("sharpen_picture", None),
            Err(ProcessError::UnknownProcess("sharpen_picture".into()))
        );
    }

    #[rstest]
    #[case("rotate_picture")]
    #[case("flip_picture")]
    fn test_missing_argument(#[case] name: &str) {
        assert!(matches!(
            Process::parse(name, None),
            Err(ProcessError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_invalid_angle_is_configuration_error() {
        assert_eq!(
            Process::parse("rotate_picture", Some("45")),
            Err(ProcessError::Transform(TransformError::InvalidAngle(
                "45".into()
            )))
        );
    }

    #[test]
    fn test_invalid_plane_is_configuration_error() {
        assert_eq!(
            Process::parse("flip_picture", Some("D")),
            Err(ProcessError::Transform(TransformError::InvalidPlane(
                "D".into()
            )))
        );
    }

    #[test]
    fn test_every_listed_name_parses() {
        for name in Process::names() {
            let arg = match name {
                "rotate_picture" => Some("90"),
                "flip_picture" => Some("H"),
                _ => None,
            };
            assert_eq!(Process::parse(name, arg).unwrap().name(), name);
        }
        assert_eq!(Process::names().len(), 9);
    }

    #[test]
    fn test_operations_apply() {
        let config = StrategyConfig::uniform(2);

        let mut pic = Picture::new(5, 5).unwrap();
        pic.set_pixel(2, 2, Pixel::gray(255));
        let blur = Process::Blur(StrategyKind::Sector).into_operation(&config);
        assert_eq!(blur.name(), "parallel_sector_blur");
        blur.apply(&mut pic).unwrap();
        assert_eq!(pic.get_pixel(1, 1), Pixel::gray(28));

        let invert = Process::Transform(Transform::Invert).into_operation(&config);
        assert_eq!(invert.name(), "invert_picture");
        invert.apply(&mut pic).unwrap();
        assert_eq!(pic.get_pixel(1, 1), Pixel::gray(227));
        assert_eq!(pic.get_pixel(0, 0), Pixel::gray(255));
    }
}
