//! Convenience macros for error handling and propagation

/// Equivalent to `anyhow::bail!` but for `TrendError`
///
/// # Examples
///
/// ```rust
/// use covidtrend_common::bail;
/// use covidtrend_common::Result;
///
/// fn check_width(width: u32) -> Result<()> {
///     if width == 0 {
///         bail!("width cannot be zero");
///     }
///     Ok(())
/// }
/// assert!(check_width(0).is_err());
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::TrendError::new($msg))
    };
    ($err:expr $(,)?) => {
        return Err($crate::TrendError::new($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::TrendError::new(format!($fmt, $($arg)*)))
    };
}

/// Equivalent to `anyhow::ensure!` but for `TrendError`
///
/// # Examples
///
/// ```rust
/// use covidtrend_common::ensure;
/// use covidtrend_common::Result;
///
/// fn validate_columns(count: usize) -> Result<()> {
///     ensure!(count >= 4, "expected at least 4 columns, got {}", count);
///     Ok(())
/// }
/// assert!(validate_columns(3).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return Err($crate::TrendError::new($msg));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($crate::TrendError::new($err));
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::TrendError::new(format!($fmt, $($arg)*)));
        }
    };
}
