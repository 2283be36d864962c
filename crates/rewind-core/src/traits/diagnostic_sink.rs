//! Reporting interface for emitted findings.

use crate::types::Finding;

/// Consumer of findings, implemented by the host's presentation layer.
/// The engine only ever calls `report`, once per finding, strictly after
/// all scanning has finished.
pub trait DiagnosticSink {
    fn report(&mut self, finding: Finding);
}

/// Sink that buffers findings in memory. Backs `run_pass` and is handy in
/// tests.
#[derive(Debug, Default)]
pub struct CollectSink {
    findings: Vec<Finding>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

impl DiagnosticSink for CollectSink {
    fn report(&mut self, finding: Finding) {
        self.findings.push(finding);
    }
}
