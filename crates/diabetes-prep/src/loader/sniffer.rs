//! Delimiter detection.
//!
//! Detection is an ordered chain of [`DelimiterDetector`]s. The first one
//! that returns a delimiter wins; if none do, the loader uses a comma.

use tracing::debug;

use crate::utils::delimiter_name;

/// Delimiters the loader knows how to detect, in tie-break order.
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Delimiter used when every detector gives up.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Share of sampled lines that must agree on a delimiter count.
const MIN_CONSISTENCY: f64 = 0.9;

/// A strategy for guessing the field delimiter from a text sample.
pub trait DelimiterDetector {
    fn name(&self) -> &'static str;

    /// Return the detected delimiter, or `None` to defer to the next detector.
    fn detect(&self, sample: &str) -> Option<u8>;
}

/// Picks the candidate whose per-line count is the same on (nearly) every
/// line of the sample, ignoring characters inside double quotes.
#[derive(Debug, Clone)]
pub struct ConsistencySniffer {
    candidates: Vec<u8>,
}

impl Default for ConsistencySniffer {
    fn default() -> Self {
        Self {
            candidates: CANDIDATE_DELIMITERS.to_vec(),
        }
    }
}

/// Score of one candidate over the sample.
#[derive(Debug, Clone, Copy)]
struct CandidateScore {
    delimiter: u8,
    consistency: f64,
    header_count: usize,
}

impl ConsistencySniffer {
    fn score(&self, delimiter: u8, records: &[&str]) -> Option<CandidateScore> {
        let counts: Vec<usize> = records
            .iter()
            .map(|record| count_outside_quotes(record, delimiter))
            .collect();

        let header_count = counts[0];
        if header_count == 0 {
            return None;
        }

        // Most frequent non-zero count and how many lines share it.
        let mut tally: Vec<(usize, usize)> = Vec::new();
        for &count in counts.iter().filter(|&&c| c > 0) {
            match tally.iter_mut().find(|(value, _)| *value == count) {
                Some((_, seen)) => *seen += 1,
                None => tally.push((count, 1)),
            }
        }
        let (_, mode_frequency) = tally.into_iter().max_by_key(|&(_, seen)| seen)?;

        let consistency = mode_frequency as f64 / counts.len() as f64;
        if consistency < MIN_CONSISTENCY {
            return None;
        }

        Some(CandidateScore {
            delimiter,
            consistency,
            header_count,
        })
    }
}

impl DelimiterDetector for ConsistencySniffer {
    fn name(&self) -> &'static str {
        "consistency"
    }

    fn detect(&self, sample: &str) -> Option<u8> {
        let records = split_records(sample);
        if records.is_empty() {
            return None;
        }

        let mut best: Option<CandidateScore> = None;
        for &delimiter in &self.candidates {
            let Some(score) = self.score(delimiter, &records) else {
                continue;
            };
            // Strictly better only, so earlier candidates win ties.
            let better = match best {
                None => true,
                Some(current) => {
                    score.consistency > current.consistency
                        || (score.consistency == current.consistency
                            && score.header_count > current.header_count)
                }
            };
            if better {
                best = Some(score);
            }
        }

        best.map(|score| score.delimiter)
    }
}

/// Split a sample into records on newlines outside double quotes.
///
/// Blank lines are skipped. A trailing record without a line terminator is
/// dropped when other records exist, since the sample may have cut it short.
fn split_records(sample: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (idx, byte) in sample.bytes().enumerate() {
        match byte {
            b'"' => in_quotes = !in_quotes,
            b'\n' if !in_quotes => {
                let record = sample[start..idx].trim_end_matches('\r');
                if !record.trim().is_empty() {
                    records.push(record);
                }
                start = idx + 1;
            }
            _ => {}
        }
    }

    let tail = sample[start..].trim_end_matches('\r');
    if !tail.trim().is_empty() && records.is_empty() {
        records.push(tail);
    }

    records
}

fn count_outside_quotes(record: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for byte in record.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
        } else if byte == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}

/// Run `detectors` in order and fall back to [`DEFAULT_DELIMITER`].
pub fn detect_with(detectors: &[&dyn DelimiterDetector], sample: &str) -> u8 {
    for detector in detectors {
        match detector.detect(sample) {
            Some(delimiter) => {
                debug!(
                    "Delimiter detected by {} sniffer: {}",
                    detector.name(),
                    delimiter_name(delimiter)
                );
                return delimiter;
            }
            None => debug!("{} sniffer found no delimiter", detector.name()),
        }
    }
    debug!("Falling back to default delimiter: comma");
    DEFAULT_DELIMITER
}

/// Detect the delimiter with the default detector chain.
pub fn detect_delimiter(sample: &str) -> u8 {
    let sniffer = ConsistencySniffer::default();
    detect_with(&[&sniffer], sample)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_comma() {
        let sample = "Pregnancies,Glucose,BMI\n6,148,33.6\n1,85,26.6\n";
        assert_eq!(detect_delimiter(sample), b',');
    }

    #[test]
    fn test_detects_semicolon_with_decimal_commas() {
        let sample = "Glucose;BMI;Age\n148;33,6;50\n85;26,6;31\n183;23,3;32\n";
        assert_eq!(detect_delimiter(sample), b';');
    }

    #[test]
    fn test_detects_tab_and_pipe() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3\n4\t5\t6\n"), b'\t');
        assert_eq!(detect_delimiter("a|b\n1|2\n3|4\n"), b'|');
    }

    #[test]
    fn test_ignores_delimiters_inside_quotes() {
        let sample = "name;note\n\"Smith, J\";\"a, b, c\"\n\"Doe, A\";x\n";
        assert_eq!(detect_delimiter(sample), b';');
    }

    #[test]
    fn test_truncated_last_line_is_ignored() {
        // The final line was cut by the sample limit and has fewer fields.
        let sample = "a;b;c\n1;2;3\n4;5;6\n7;8";
        assert_eq!(detect_delimiter(sample), b';');
    }

    #[test]
    fn test_single_column_falls_back_to_comma() {
        assert_eq!(detect_delimiter("Glucose\n148\n85\n"), b',');
    }

    #[test]
    fn test_empty_sample_falls_back_to_comma() {
        assert_eq!(detect_delimiter(""), DEFAULT_DELIMITER);
        assert_eq!(detect_delimiter("\n\n"), DEFAULT_DELIMITER);
    }

    #[test]
    fn test_inconsistent_counts_fall_back() {
        let sample = "a;b\n1;2;3;4\n5\n6;7;8\n";
        assert_eq!(detect_delimiter(sample), b',');
    }

    #[test]
    fn test_detector_chain_order() {
        struct Always(u8);
        impl DelimiterDetector for Always {
            fn name(&self) -> &'static str {
                "always"
            }
            fn detect(&self, _sample: &str) -> Option<u8> {
                Some(self.0)
            }
        }

        let sniffer = ConsistencySniffer::default();
        let pipe = Always(b'|');
        // Sniffer gives up on a single column, so the next detector decides.
        assert_eq!(detect_with(&[&sniffer, &pipe], "x\n1\n"), b'|');
        // Sniffer succeeds first, so the later detector is never consulted.
        assert_eq!(detect_with(&[&sniffer, &pipe], "x;y\n1;2\n"), b';');
    }

    #[test]
    fn test_split_records_handles_quoted_newlines() {
        let records = split_records("a,b\r\n\"multi\nline\",2\r\n");
        assert_eq!(records, vec!["a,b", "\"multi\nline\",2"]);
    }
}
