//! Error and stack-trace enrichment for error-level messages
//!
//! An error handed to [`Logger::error`](crate::Logger::error) is folded into
//! the message text. Errors that carry their own call stack (see
//! [`ErrorTrace::stack_trace`]) have it printed between banner lines;
//! anything else gets the stack of the logging call site appended instead.

use super::error::LoggerError;
use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

/// Opening line of a stack trace reported by the error itself
pub const STACK_BANNER: &str = "Stack Trace -----------------------------------------------------------------------------------------\n";

/// Closing line of a stack trace reported by the error itself
pub const STACK_TRAILER: &str = "-----------------------------------------------------------------------------------------------------";

/// An error value that can be attached to an error-level log call.
///
/// The only requirement is `Display`. Types that record where they were
/// created override [`stack_trace`](ErrorTrace::stack_trace); for the rest
/// an empty impl is enough:
///
/// ```
/// use std::fmt;
/// use uatu_logger::ErrorTrace;
///
/// #[derive(Debug)]
/// struct DiskFull;
///
/// impl fmt::Display for DiskFull {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str("disk full")
///     }
/// }
///
/// impl ErrorTrace for DiskFull {}
///
/// assert!(DiskFull.stack_trace().is_none());
/// ```
pub trait ErrorTrace: fmt::Display {
    /// Frames recorded by the error, innermost first
    fn stack_trace(&self) -> Option<Vec<String>> {
        None
    }
}

impl ErrorTrace for std::io::Error {}
impl ErrorTrace for serde_json::Error {}
impl ErrorTrace for LoggerError {}
impl ErrorTrace for String {}
impl ErrorTrace for &str {}
impl ErrorTrace for Box<dyn StdError + Send + Sync> {}

/// Error that captures the call stack at the point it is created.
#[derive(Debug)]
pub struct TracedError {
    message: String,
    source: Option<Box<dyn StdError + Send + Sync>>,
    backtrace: Backtrace,
}

impl TracedError {
    #[inline(never)]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
            backtrace: Backtrace::force_capture(),
        }
    }

    /// Annotate an existing error, recording the current stack
    #[inline(never)]
    pub fn wrap<E>(source: E, message: impl Into<String>) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
            backtrace: Backtrace::force_capture(),
        }
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }
}

impl fmt::Display for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {}", self.message, source),
            None => f.write_str(&self.message),
        }
    }
}

impl StdError for TracedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

impl ErrorTrace for TracedError {
    fn stack_trace(&self) -> Option<Vec<String>> {
        Some(backtrace_frames(&self.backtrace))
    }
}

/// Fold an optional error into a message.
///
/// Without an error the message is returned as is.
#[inline(never)]
pub fn enrich(err: Option<&dyn ErrorTrace>, msg: &str) -> String {
    let Some(err) = err else {
        return msg.to_string();
    };

    let mut out = if msg.is_empty() {
        format!("Error: {}\n", err)
    } else {
        format!("{}\nError: {}\n", msg, err)
    };

    match err.stack_trace() {
        Some(frames) => {
            out.push_str(STACK_BANNER);
            for frame in frames {
                out.push_str(&frame);
                out.push('\n');
            }
            out.push_str(STACK_TRAILER);
        }
        None => out.push_str(&enrich_call_site()),
    }

    out
}

// Drops `capture_stack`, this function and `enrich`.
#[inline(never)]
fn enrich_call_site() -> String {
    capture_stack(3)
}

/// Render the current call stack, one frame per entry, each newline-terminated.
///
/// `skip` drops that many innermost frames, counting this function as the
/// first. Frames belonging to the capture machinery are never included.
#[inline(never)]
pub fn capture_stack(skip: usize) -> String {
    let backtrace = Backtrace::force_capture();
    let mut out = String::new();
    for frame in backtrace_frames(&backtrace).into_iter().skip(skip) {
        out.push_str(&frame);
        out.push('\n');
    }
    out
}

/// Split a captured backtrace into per-frame text blocks.
fn backtrace_frames(backtrace: &Backtrace) -> Vec<String> {
    split_frames(&backtrace.to_string())
        .into_iter()
        .skip_while(|frame| frame.contains("backtrace"))
        .collect()
}

fn split_frames(rendered: &str) -> Vec<String> {
    let mut frames: Vec<String> = Vec::new();
    for line in rendered.lines() {
        if let Some(symbol) = frame_symbol(line) {
            frames.push(symbol.to_string());
        } else if let Some(last) = frames.last_mut() {
            last.push_str("\n\t");
            last.push_str(line.trim_start());
        }
    }
    frames
}

/// `"  12: some::symbol"` yields `Some("some::symbol")`
fn frame_symbol(line: &str) -> Option<&str> {
    let (index, symbol) = line.trim_start().split_once(": ")?;
    if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) {
        Some(symbol)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrich_without_error() {
        assert_eq!(enrich(None, "plain"), "plain");
        assert_eq!(enrich(None, ""), "");
    }

    #[test]
    fn test_enrich_empty_message() {
        let err = std::io::Error::other("boom");
        let out = enrich(Some(&err), "");

        assert!(out.starts_with("Error: boom\n"), "got {:?}", out);
        assert!(!out.contains(STACK_BANNER));
    }

    #[inline(never)]
    fn log_from_named_caller() -> String {
        let err = String::from("boom");
        enrich(Some(&err), "")
    }

    #[test]
    fn test_enrich_call_site_starts_at_caller() {
        let out = log_from_named_caller();
        let stack = out.strip_prefix("Error: boom\n").expect("error line");

        assert!(!stack.is_empty());
        let first = stack.lines().next().unwrap_or_default();
        assert!(first.contains("log_from_named_caller"), "got {:?}", stack);
        assert!(!stack.contains("capture_stack"));
    }

    #[test]
    fn test_enrich_with_message() {
        let err = String::from("boom");
        let out = enrich(Some(&err), "saving user");

        assert!(out.starts_with("saving user\nError: boom\n"), "got {:?}", out);
    }

    #[test]
    fn test_enrich_traced_error_uses_banner() {
        let err = TracedError::new("connection reset");
        let out = enrich(Some(&err), "sync failed");

        assert!(out.starts_with("sync failed\nError: connection reset\n"));
        assert!(out.contains(STACK_BANNER));
        assert!(out.ends_with(STACK_TRAILER));
    }

    #[test]
    fn test_traced_error_wrap_display() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = TracedError::wrap(io, "loading config");

        assert_eq!(err.to_string(), "loading config: no such file");
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn test_capture_stack_is_newline_terminated() {
        let stack = capture_stack(0);
        if !stack.is_empty() {
            assert!(stack.ends_with('\n'));
        }
    }

    #[test]
    fn test_split_frames() {
        let rendered = "   0: app::inner\n             at ./src/inner.rs:10:5\n   1: app::outer\n   2: main\n             at ./src/main.rs:3:1\n";
        let frames = split_frames(rendered);

        assert_eq!(
            frames,
            vec![
                "app::inner\n\tat ./src/inner.rs:10:5".to_string(),
                "app::outer".to_string(),
                "main\n\tat ./src/main.rs:3:1".to_string(),
            ]
        );
    }

    #[test]
    fn test_frame_symbol() {
        assert_eq!(frame_symbol("  7: foo::bar"), Some("foo::bar"));
        assert_eq!(frame_symbol("      at ./src/lib.rs:1:1"), None);
        assert_eq!(frame_symbol("note: run with RUST_BACKTRACE"), None);
    }
}
