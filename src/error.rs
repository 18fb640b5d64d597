use thiserror::Error;

/// Errors raised by layout generation.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A dimension or setting is outside the range the algorithm accepts.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Human readable description of the accepted range.
        reason: String,
    },

    /// An ASCII grid could not be parsed.
    #[error("failed to parse grid at line {line}: {reason}")]
    Parse {
        /// One-based line number within the input.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A layout configuration document could not be read.
    #[error("invalid layout configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl LayoutError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Checks that `value` is a probability in `[0, 1]`.
pub(crate) fn check_unit_interval(name: &'static str, value: f64) -> Result<(), LayoutError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(LayoutError::invalid(
            name,
            format!("expected a value in [0, 1], got {value}"),
        ))
    }
}

/// Checks that both grid dimensions reach `minimum`.
pub(crate) fn check_dimensions(
    width: usize,
    height: usize,
    minimum: usize,
) -> Result<(), LayoutError> {
    if width < minimum {
        return Err(LayoutError::invalid(
            "width",
            format!("must be at least {minimum}, got {width}"),
        ));
    }
    if height < minimum {
        return Err(LayoutError::invalid(
            "height",
            format!("must be at least {minimum}, got {height}"),
        ));
    }
    Ok(())
}
