//! Verbose copy listing

use crate::executor::ExecutionEvent;
use crate::types::CopyPair;
use console::style;
use std::io::{self, Write};
use std::sync::Mutex;

/// First line of the listing, written before the first pair starts
pub const BANNER: &str = "Copied files and folders:";

/// Writes the verbose listing for execution events
///
/// The sink is locked per line, so the reporter can be shared by reference
/// with the executor's callback.
pub struct VerboseReporter {
    sink: Mutex<Box<dyn Write + Send>>,
    colored: bool,
}

impl VerboseReporter {
    /// Reporter writing to stdout, coloured when stdout supports it
    pub fn stdout() -> Self {
        Self::new(io::stdout()).with_colors(console::colors_enabled())
    }

    /// Reporter writing plain text to any sink
    pub fn new(sink: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(sink)),
            colored: false,
        }
    }

    /// Force colouring on or off
    pub fn with_colors(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Handle one execution event
    ///
    /// Writes the banner when the first pair starts and a
    /// `<source> -> <destination>` line (green when coloured) when a pair
    /// completes.
    pub fn on_event(&self, event: &ExecutionEvent) {
        match event {
            ExecutionEvent::PairStart { index: 1, .. } => self.write_line(BANNER),
            ExecutionEvent::PairSuccess { pair, .. } => self.write_line(&format_pair_line(pair, self.colored)),
            _ => {}
        }
    }

    fn write_line(&self, line: &str) {
        if let Ok(mut sink) = self.sink.lock() {
            if let Err(e) = writeln!(sink, "{}", line).and_then(|_| sink.flush()) {
                tracing::warn!(error = %e, "failed to write copy listing");
            }
        }
    }
}

/// `src/logo.svg -> dist/logo.svg`, green when `colored`
pub fn format_pair_line(pair: &CopyPair, colored: bool) -> String {
    style(pair.to_string())
        .green()
        .force_styling(colored)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{ExecutionStats, PairOutcome};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("lock buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn raw(&self) -> String {
            let bytes = self.0.lock().expect("lock buffer").clone();
            String::from_utf8(bytes).expect("utf-8 output")
        }

        fn lines(&self) -> Vec<String> {
            console::strip_ansi_codes(&self.raw())
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    fn pair() -> CopyPair {
        CopyPair::new("src/assets/asset-1.js", "dist/asset-1.js")
    }

    #[test]
    fn test_format_pair_line_text() {
        assert_eq!(
            format_pair_line(&pair(), false),
            "src/assets/asset-1.js -> dist/asset-1.js"
        );

        let colored = format_pair_line(&pair(), true);
        assert_ne!(colored, "src/assets/asset-1.js -> dist/asset-1.js");
        assert_eq!(
            console::strip_ansi_codes(&colored),
            "src/assets/asset-1.js -> dist/asset-1.js"
        );
    }

    #[test]
    fn test_writer_sink_gets_plain_text() {
        let buffer = SharedBuffer::default();
        let reporter = VerboseReporter::new(buffer.clone());

        reporter.on_event(&ExecutionEvent::PairSuccess {
            index: 1,
            total: 1,
            pair: pair(),
            outcome: PairOutcome::default(),
        });

        let raw = buffer.raw();
        assert!(!raw.contains('\x1b'), "unexpected escape codes in {raw:?}");
        assert_eq!(raw, "src/assets/asset-1.js -> dist/asset-1.js\n");
    }

    #[test]
    fn test_forced_colors_reach_writer_sink() {
        let buffer = SharedBuffer::default();
        let reporter = VerboseReporter::new(buffer.clone()).with_colors(true);

        reporter.on_event(&ExecutionEvent::PairSuccess {
            index: 1,
            total: 1,
            pair: pair(),
            outcome: PairOutcome::default(),
        });

        assert!(buffer.raw().contains('\x1b'));
        assert_eq!(
            buffer.lines(),
            vec!["src/assets/asset-1.js -> dist/asset-1.js".to_string()]
        );
    }

    #[test]
    fn test_banner_written_only_for_first_pair() {
        let buffer = SharedBuffer::default();
        let reporter = VerboseReporter::new(buffer.clone());

        for index in 1..=2 {
            reporter.on_event(&ExecutionEvent::PairStart {
                index,
                total: 2,
                pair: pair(),
            });
            reporter.on_event(&ExecutionEvent::PairSuccess {
                index,
                total: 2,
                pair: pair(),
                outcome: PairOutcome::default(),
            });
        }
        reporter.on_event(&ExecutionEvent::Complete {
            stats: ExecutionStats::default(),
        });

        assert_eq!(
            buffer.lines(),
            vec![
                BANNER.to_string(),
                "src/assets/asset-1.js -> dist/asset-1.js".to_string(),
                "src/assets/asset-1.js -> dist/asset-1.js".to_string(),
            ]
        );
    }

    #[test]
    fn test_failed_pair_writes_no_line() {
        let buffer = SharedBuffer::default();
        let reporter = VerboseReporter::new(buffer.clone());

        reporter.on_event(&ExecutionEvent::PairStart {
            index: 1,
            total: 1,
            pair: pair(),
        });
        reporter.on_event(&ExecutionEvent::PairError {
            index: 1,
            total: 1,
            pair: pair(),
            message: "boom".to_string(),
        });

        assert_eq!(buffer.lines(), vec![BANNER.to_string()]);
    }
}
