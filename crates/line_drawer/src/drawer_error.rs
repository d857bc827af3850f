pub type MyResult<T, E = MyReport> = core::result::Result<T, E>;

/// Error type returned across the crate.
///
/// Wraps an [`eyre::Report`] so that both eyre errors and Win32 errors can be
/// propagated with `?` from the same function.
pub struct MyReport {
    inner: eyre::Report,
}

impl From<eyre::Report> for MyReport {
    fn from(report: eyre::Report) -> Self {
        Self { inner: report }
    }
}

impl From<MyReport> for eyre::Report {
    fn from(report: MyReport) -> Self {
        report.inner
    }
}

impl std::fmt::Display for MyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.inner, f)
    }
}

impl std::fmt::Debug for MyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.inner, f)
    }
}

/// Text carried by a caught panic, for logging.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "<non-string panic payload>"
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for MyReport {
    fn from(error: windows::core::Error) -> Self {
        Self {
            inner: eyre::Report::new(WrappedWindowsError::from(error)),
        }
    }
}

/// `windows::core::Error` does not satisfy eyre's bounds on every version, so
/// it goes through this newtype.
#[cfg(windows)]
pub struct WrappedWindowsError {
    inner: windows::core::Error,
}

#[cfg(windows)]
impl From<windows::core::Error> for WrappedWindowsError {
    fn from(error: windows::core::Error) -> Self {
        Self { inner: error }
    }
}

#[cfg(windows)]
impl std::error::Error for WrappedWindowsError {}

#[cfg(windows)]
impl std::fmt::Display for WrappedWindowsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

#[cfg(windows)]
impl std::fmt::Debug for WrappedWindowsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::WrapErr;

    fn parse(value: &str) -> MyResult<u32> {
        let parsed = value
            .parse::<u32>()
            .wrap_err_with(|| format!("not a number: {value:?}"))?;
        Ok(parsed)
    }

    #[test]
    fn eyre_errors_convert_with_question_mark() {
        assert_eq!(parse("42").ok(), Some(42));
        let err = parse("forty-two").unwrap_err();
        assert!(err.to_string().contains("forty-two"));
    }

    #[test]
    fn panic_message_reads_str_and_string_payloads() {
        let payload = std::panic::catch_unwind(|| -> u32 { panic!("click handler failed") }).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "click handler failed");

        let count = 3;
        let payload = std::panic::catch_unwind(|| -> u32 { panic!("{count} buttons") }).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "3 buttons");

        let payload = std::panic::catch_unwind(|| -> u32 { std::panic::panic_any(7_u32) }).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "<non-string panic payload>");
    }

    #[test]
    fn report_round_trips_into_eyre() {
        let report: MyReport = eyre::eyre!("device lost").into();
        let back: eyre::Report = report.into();
        assert_eq!(back.to_string(), "device lost");
    }
}
