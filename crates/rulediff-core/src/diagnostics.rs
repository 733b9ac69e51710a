//! Side-channel diagnostics raised while building alert collections.
//!
//! Diagnostics never abort an operation and never appear in the diff
//! output. Callers decide where they go by passing a [`DiagnosticSink`].

use crate::schema::EVENT_WARNING;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A non-fatal finding about a rule document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An alert name was declared again with an expression that differs from
    /// every rule already collected under that name. The extra rule is kept.
    DuplicateAlert {
        alert: String,
        group: String,
        /// File the document was loaded from, if known
        source: Option<String>,
        /// Line of the extra rule's `expr` key, if known
        line: Option<usize>,
        /// Rules collected under the name, the extra one included
        occurrences: usize,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::DuplicateAlert {
                alert,
                group,
                source,
                line,
                occurrences,
            } => {
                write!(
                    f,
                    "multiple entries found for alert {:?} ({} so far, group {:?}",
                    alert, occurrences, group
                )?;
                if let Some(source) = source {
                    write!(f, ", {}", source)?;
                    if let Some(line) = line {
                        write!(f, ":{}", line)?;
                    }
                }
                write!(f, ")")
            }
        }
    }
}

/// Receiver for diagnostics.
pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn report(&self, diagnostic: Diagnostic) {
        (**self).report(diagnostic)
    }
}

/// Forwards diagnostics to `tracing` as `warn` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::DuplicateAlert {
                alert,
                group,
                source,
                line,
                occurrences,
            } => {
                tracing::warn!(
                    component = module_path!(),
                    op = "collect_alerts",
                    event = EVENT_WARNING,
                    alert = alert.as_str(),
                    group = group.as_str(),
                    source = source.as_deref().unwrap_or("-"),
                    line = line.map(|l| l as u64),
                    occurrences = *occurrences as u64,
                    "{}",
                    diagnostic
                );
            }
        }
    }
}

/// Discards every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: Diagnostic) {}
}

/// Keeps diagnostics in memory, in report order.
#[derive(Debug, Default)]
pub struct MemorySink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A panic while holding the lock leaves the list intact, so a
    /// poisoned lock is still read and written.
    fn entries(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of everything reported so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries().clone()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, diagnostic: Diagnostic) {
        self.entries().push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duplicate(source: Option<&str>, line: Option<usize>) -> Diagnostic {
        Diagnostic::DuplicateAlert {
            alert: "DiskFull".to_string(),
            group: "node".to_string(),
            source: source.map(str::to_string),
            line,
            occurrences: 2,
        }
    }

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());
        sink.report(duplicate(None, None));
        sink.report(duplicate(Some("a.yaml"), Some(7)));
        let seen = sink.diagnostics();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1], duplicate(Some("a.yaml"), Some(7)));
    }

    #[test]
    fn test_memory_sink_records_after_poisoned_lock() {
        let sink = MemorySink::new();
        sink.report(duplicate(None, None));

        let panicked = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = sink.diagnostics.lock().unwrap();
            panic!("reporter failed while holding the lock");
        }));
        assert!(panicked.is_err());
        assert!(sink.diagnostics.is_poisoned());

        sink.report(duplicate(Some("b.yaml"), Some(3)));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.diagnostics()[1], duplicate(Some("b.yaml"), Some(3)));
    }

    #[test]
    fn test_display_mentions_location_when_known() {
        assert_eq!(
            duplicate(Some("a.yaml"), Some(7)).to_string(),
            r#"multiple entries found for alert "DiskFull" (2 so far, group "node", a.yaml:7)"#
        );
        assert_eq!(
            duplicate(None, Some(7)).to_string(),
            r#"multiple entries found for alert "DiskFull" (2 so far, group "node")"#
        );
    }

    #[test]
    fn test_reference_forwards_to_sink() {
        fn report_through<S: DiagnosticSink>(sink: S) {
            sink.report(duplicate(None, None));
        }
        let sink = MemorySink::new();
        report_through(&sink);
        assert_eq!(sink.len(), 1);
    }
}
