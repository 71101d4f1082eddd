//! Delimiter detection.

/// Candidate delimiters, in tie-break order.
pub const CSV_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

const SNIFF_LINES: usize = 10;

/// Picks the delimiter of a CSV sample.
///
/// A candidate that occurs the same number of times on every sampled line
/// beats one that does not; among equals the higher per-line count wins.
/// Falls back to `,` when no candidate appears in the header line.
pub fn sniff_delimiter(sample: &str) -> u8 {
    let lines: Vec<&str> = sample
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();
    if lines.is_empty() {
        return b',';
    }

    let mut best: Option<(u8, usize, bool)> = None;
    for delimiter in CSV_DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_unquoted(line, delimiter))
            .collect();
        let header_count = counts[0];
        if header_count == 0 {
            continue;
        }
        let consistent = counts.iter().all(|count| *count == header_count);
        let better = match best {
            None => true,
            Some((_, best_count, best_consistent)) => match (consistent, best_consistent) {
                (true, false) => true,
                (false, true) => false,
                _ => header_count > best_count,
            },
        };
        if better {
            best = Some((delimiter, header_count, consistent));
        }
    }

    best.map_or(b',', |(delimiter, _, _)| delimiter)
}

fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for byte in line.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
        } else if byte == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}
