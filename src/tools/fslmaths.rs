//! Image arithmetic with fslmaths
//!
//! Operations are recorded in call order and rendered after the input
//! image, which is how fslmaths applies them.

use crate::command::Command;
use crate::io::error::Result;
use crate::nifti::{resolve_input, with_nifti_extension};
use crate::tools::Tool;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Voxel data types accepted by `-dt` and `-odt`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 8-bit unsigned
    Char,
    /// 16-bit signed
    Short,
    /// 32-bit signed
    Int,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// Same type as the input image
    Input,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Float => "float",
            Self::Double => "double",
            Self::Input => "input",
        };
        f.write_str(name)
    }
}

/// Right-hand side of a binary operation
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Scalar applied to every voxel
    Number(f64),
    /// Image combined voxel-wise
    Image(PathBuf),
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<PathBuf> for Operand {
    fn from(path: PathBuf) -> Self {
        Self::Image(path)
    }
}

impl From<&Path> for Operand {
    fn from(path: &Path) -> Self {
        Self::Image(path.to_path_buf())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Operation {
    ThresholdPercent(f64),
    Threshold(f64),
    Mask(PathBuf),
    Erode,
    Add(Operand),
    Sub(Operand),
    Mul(Operand),
    Div(Operand),
    MeanFilter,
    MedianFilter,
}

/// A chain of fslmaths operations from one input to one output
#[derive(Debug, Clone, PartialEq)]
pub struct FslMaths {
    image: PathBuf,
    out: PathBuf,
    internal_type: Option<DataType>,
    output_type: Option<DataType>,
    operations: Vec<Operation>,
}

impl FslMaths {
    /// Start a chain reading `image` and writing `out`
    pub fn new(image: impl Into<PathBuf>, out: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            out: out.into(),
            internal_type: None,
            output_type: None,
            operations: Vec::new(),
        }
    }

    /// Data type used for internal calculations (`-dt`)
    #[must_use]
    pub const fn internal_type(mut self, data_type: DataType) -> Self {
        self.internal_type = Some(data_type);
        self
    }

    /// Data type of the written image (`-odt`)
    #[must_use]
    pub const fn output_type(mut self, data_type: DataType) -> Self {
        self.output_type = Some(data_type);
        self
    }

    /// Zero voxels below a percentage of the robust range (`-thrP`)
    #[must_use]
    pub fn thr_percent(mut self, percent: f64) -> Self {
        self.operations.push(Operation::ThresholdPercent(percent));
        self
    }

    /// Zero voxels below a value (`-thr`)
    #[must_use]
    pub fn thr(mut self, value: f64) -> Self {
        self.operations.push(Operation::Threshold(value));
        self
    }

    /// Zero voxels outside a mask image (`-mas`)
    #[must_use]
    pub fn mask(mut self, mask: impl Into<PathBuf>) -> Self {
        self.operations.push(Operation::Mask(mask.into()));
        self
    }

    /// Erode `repeat` times (`-ero`)
    #[must_use]
    pub fn ero(mut self, repeat: usize) -> Self {
        self.operations
            .extend(std::iter::repeat_n(Operation::Erode, repeat));
        self
    }

    /// Add a number or image (`-add`)
    #[must_use]
    pub fn add(mut self, operand: impl Into<Operand>) -> Self {
        self.operations.push(Operation::Add(operand.into()));
        self
    }

    /// Subtract a number or image (`-sub`)
    #[must_use]
    pub fn sub(mut self, operand: impl Into<Operand>) -> Self {
        self.operations.push(Operation::Sub(operand.into()));
        self
    }

    /// Multiply by a number or image (`-mul`)
    #[must_use]
    pub fn mul(mut self, operand: impl Into<Operand>) -> Self {
        self.operations.push(Operation::Mul(operand.into()));
        self
    }

    /// Divide by a number or image (`-div`)
    #[must_use]
    pub fn div(mut self, operand: impl Into<Operand>) -> Self {
        self.operations.push(Operation::Div(operand.into()));
        self
    }

    /// 3x3x3 mean filter (`-fmean`)
    #[must_use]
    pub fn fmean(mut self) -> Self {
        self.operations.push(Operation::MeanFilter);
        self
    }

    /// 3x3x3 median filter (`-fmedian`)
    #[must_use]
    pub fn fmedian(mut self) -> Self {
        self.operations.push(Operation::MedianFilter);
        self
    }
}

fn operand_args(flag: &str, operand: &Operand) -> Result<[OsString; 2]> {
    let value = match operand {
        Operand::Number(number) => OsString::from(number.to_string()),
        Operand::Image(path) => resolve_input(path)?.into_os_string(),
    };
    Ok([OsString::from(flag), value])
}

impl Tool for FslMaths {
    type Output = PathBuf;

    fn command(&self) -> Result<Command> {
        let image = resolve_input(&self.image)?;

        let mut cmd = Command::new("fslmaths");
        if let Some(data_type) = self.internal_type {
            cmd = cmd.arg("-dt").arg(data_type.to_string());
        }
        cmd = cmd.arg(image);

        for operation in &self.operations {
            cmd = match operation {
                Operation::ThresholdPercent(percent) => {
                    cmd.arg("-thrP").arg(percent.to_string())
                }
                Operation::Threshold(value) => cmd.arg("-thr").arg(value.to_string()),
                Operation::Mask(mask) => cmd.arg("-mas").arg(resolve_input(mask)?),
                Operation::Erode => cmd.arg("-ero"),
                Operation::Add(operand) => cmd.args(operand_args("-add", operand)?),
                Operation::Sub(operand) => cmd.args(operand_args("-sub", operand)?),
                Operation::Mul(operand) => cmd.args(operand_args("-mul", operand)?),
                Operation::Div(operand) => cmd.args(operand_args("-div", operand)?),
                Operation::MeanFilter => cmd.arg("-fmean"),
                Operation::MedianFilter => cmd.arg("-fmedian"),
            };
        }

        let out = self.outputs();
        cmd = cmd.arg(&out);
        if let Some(data_type) = self.output_type {
            cmd = cmd.arg("-odt").arg(data_type.to_string());
        }

        Ok(cmd.nifti_output(out))
    }

    fn outputs(&self) -> PathBuf {
        with_nifti_extension(&self.out)
    }
}
