use crate::{RunnerError, RunnerResult};
use serde::{Deserialize, Serialize};
use shared::{ViewBuilder, ViewConstants};
use spirv_std::glam::{Mat4, Vec3};
use std::{fs, path::Path};

/// One primitive transform of a view. Rotation angles are in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStep {
    Translate([f32; 3]),
    Scale([f32; 3]),
    RotateX(f32),
    RotateY(f32),
    RotateZ(f32),
    /// A full matrix, column-major.
    Matrix([f32; 16]),
}

/// A view described as a list of steps, applied first to last.
///
/// ```json
/// { "steps": [ { "translate": [5.0, 0.0, 0.0] }, { "rotate_z": 1.5708 } ] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub steps: Vec<ViewStep>,
}

impl ViewConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> RunnerResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RunnerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| RunnerError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn constants(&self) -> ViewConstants {
        let mut builder = ViewBuilder::new();
        for step in &self.steps {
            match *step {
                ViewStep::Translate(offset) => builder.translate(Vec3::from(offset)),
                ViewStep::Scale(factors) => builder.scale(Vec3::from(factors)),
                ViewStep::RotateX(angle) => builder.rotate_x(angle),
                ViewStep::RotateY(angle) => builder.rotate_y(angle),
                ViewStep::RotateZ(angle) => builder.rotate_z(angle),
                ViewStep::Matrix(cols) => builder.push(Mat4::from_cols_array(&cols)),
            };
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::transform_position;
    use spirv_std::glam::Vec4;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_from_path() {
        let mut tmp = NamedTempFile::new().unwrap();
        let config_json = r#"{ "steps": [ { "translate": [5.0, 0.0, 0.0] }, { "rotate_z": 0.5 } ] }"#;
        write!(tmp, "{}", config_json).unwrap();
        let config = ViewConfig::from_path(tmp.path()).unwrap();
        assert_eq!(
            config.steps,
            vec![ViewStep::Translate([5.0, 0.0, 0.0]), ViewStep::RotateZ(0.5)]
        );
    }

    #[test]
    fn missing_steps_mean_identity() {
        let config: ViewConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.constants(), ViewConstants::IDENTITY);
        assert_eq!(ViewConfig::default().constants(), ViewConstants::IDENTITY);
    }

    #[test]
    fn steps_are_applied_in_order() {
        let config = ViewConfig {
            steps: vec![
                ViewStep::Scale([2.0, 2.0, 2.0]),
                ViewStep::Translate([5.0, 0.0, 0.0]),
            ],
        };
        let out = transform_position(config.constants().view(), Vec3::X);
        assert_eq!(out, Vec4::new(7.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn matrix_step_is_column_major() {
        let translation = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let config = ViewConfig {
            steps: vec![ViewStep::Matrix(translation.to_cols_array())],
        };
        assert_eq!(config.constants().view(), translation);
    }

    #[test]
    fn unknown_step_is_a_json_error() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, r#"{{ "steps": [ {{ "shear": 1.0 }} ] }}"#).unwrap();
        let err = ViewConfig::from_path(tmp.path()).unwrap_err();
        assert!(matches!(err, RunnerError::Json { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ViewConfig::from_path(dir.path().join("view.json")).unwrap_err();
        assert!(matches!(err, RunnerError::Io { .. }));
    }
}
