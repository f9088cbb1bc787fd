use crate::e_parser::classify_all;
use crate::{Block, ErrorAggregator, FileErrorGroup, ReportFormatter};

/// A single pass over one build's output.
///
/// Each line is classified, formatted and aggregated before the next one is
/// accepted. Call [`finish`](Self::finish) once the stream is exhausted.
#[derive(Debug, Default)]
pub struct BuildAnalyzer {
    formatter: ReportFormatter,
    aggregator: ErrorAggregator,
    lines_seen: usize,
}

/// What is left after the stream ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Trailing compiler error listing; empty when there were no compiler errors.
    pub summary: Vec<Block>,
    pub groups: Vec<FileErrorGroup>,
    pub lines_seen: usize,
}

impl Analysis {
    pub fn has_compiler_errors(&self) -> bool {
        !self.groups.is_empty()
    }
}

impl BuildAnalyzer {
    pub fn new(formatter: ReportFormatter) -> Self {
        BuildAnalyzer {
            formatter,
            aggregator: ErrorAggregator::new(),
            lines_seen: 0,
        }
    }

    /// Classifies `line` and returns the blocks to show right away.
    pub fn feed(&mut self, line: &str) -> Vec<Block> {
        self.lines_seen += 1;
        let mut blocks = Vec::new();
        for diagnostic in classify_all(line) {
            log::trace!("line {}: {:?}", self.lines_seen, diagnostic);
            self.aggregator.observe(&diagnostic);
            if let Some(block) = self.formatter.format(&diagnostic) {
                blocks.push(block);
            }
        }
        blocks
    }

    pub fn aggregator(&self) -> &ErrorAggregator {
        &self.aggregator
    }

    pub fn finish(self) -> Analysis {
        let summary = self.formatter.summary(self.aggregator.groups());
        log::debug!(
            "analysis done: {} lines, {} files with {} compiler errors",
            self.lines_seen,
            self.aggregator.len(),
            self.aggregator.error_count()
        );
        Analysis {
            summary,
            groups: self.aggregator.into_groups(),
            lines_seen: self.lines_seen,
        }
    }
}

/// Runs a whole input through a fresh analyzer; returns live blocks followed by the finished analysis.
pub fn analyze<I, S>(formatter: ReportFormatter, lines: I) -> (Vec<Block>, Analysis)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut analyzer = BuildAnalyzer::new(formatter);
    let mut live = Vec::new();
    for line in lines {
        live.extend(analyzer.feed(line.as_ref()));
    }
    (live, analyzer.finish())
}
