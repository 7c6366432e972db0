use serde::Serialize;
use std::collections::HashMap;

/// Frequency table rows kept after truncation
pub const TOP_FREQUENCIES: usize = 10;

/// Repeating-pattern matches kept after truncation
pub const MAX_PATTERNS: usize = 10;

/// One row of the character frequency table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyEntry {
    pub character: char,
    pub count: u64,
    pub percent: f64,
}

/// Set-bit count for one of the eight bit positions (0 = LSB, 7 = MSB)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BitBucket {
    pub bit: usize,
    pub set_count: u64,
    pub percent: f64,
}

/// A substring observed at two or more positions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternMatch {
    pub pattern: String,
    pub count: usize,
    pub positions: Vec<usize>,
}

/// Immutable statistics snapshot for one text, recomputed per call
#[derive(Debug, Clone, Serialize)]
pub struct EntropyReport {
    pub entropy_bits: f64,
    pub frequency_table: Vec<FrequencyEntry>,
    pub bit_distribution: Vec<BitBucket>,
}

impl EntropyReport {
    /// Entropy rounded to two decimals for display; comparisons should use
    /// the full-precision `entropy_bits`
    pub fn entropy_display(&self) -> f64 {
        (self.entropy_bits * 100.0).round() / 100.0
    }
}

/// Full statistics snapshot: entropy, top frequencies, bit distribution
pub fn analyze_text(text: &str) -> EntropyReport {
    EntropyReport {
        entropy_bits: shannon_entropy(text),
        frequency_table: frequency_table(text, TOP_FREQUENCIES),
        bit_distribution: bit_distribution(text),
    }
}

/// Per-character counts in first-seen order
fn char_counts(text: &str) -> Vec<(char, u64)> {
    let mut order: Vec<(char, u64)> = Vec::new();
    let mut index: HashMap<char, usize> = HashMap::new();
    for ch in text.chars() {
        match index.get(&ch) {
            Some(&slot) => order[slot].1 += 1,
            None => {
                index.insert(ch, order.len());
                order.push((ch, 1));
            }
        }
    }
    order
}

/// Shannon entropy in bits per character; 0.0 for empty text.
/// Bounded above by log2 of the distinct character count.
pub fn shannon_entropy(text: &str) -> f64 {
    let counts = char_counts(text);
    if counts.is_empty() {
        return 0.0;
    }

    let len = text.chars().count() as f64;
    let mut entropy = 0.0;
    for &(_, count) in &counts {
        let p = count as f64 / len;
        entropy -= p * p.log2();
    }
    entropy
}

/// Character frequency table: descending count, ties kept in first-seen
/// order (stable sort), truncated to `top_n` rows
pub fn frequency_table(text: &str, top_n: usize) -> Vec<FrequencyEntry> {
    let len = text.chars().count() as f64;
    let mut entries: Vec<FrequencyEntry> = char_counts(text)
        .into_iter()
        .map(|(character, count)| FrequencyEntry {
            character,
            count,
            percent: 100.0 * count as f64 / len,
        })
        .collect();

    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(top_n);
    entries
}

/// Count characters with each of the eight bit positions set, over the
/// text's UTF-8 bytes; percentage is relative to the byte length
pub fn bit_distribution(text: &str) -> Vec<BitBucket> {
    let bytes = text.as_bytes();
    (0..8)
        .map(|bit| {
            let set_count = bytes.iter().filter(|b| (*b >> bit) & 1 == 1).count() as u64;
            let percent = if bytes.is_empty() {
                0.0
            } else {
                100.0 * set_count as f64 / bytes.len() as f64
            };
            BitBucket {
                bit,
                set_count,
                percent,
            }
        })
        .collect()
}

/// Find substrings of length [min_len, min(10, chars/2)] occurring at least
/// twice. Returned sorted by descending count (ties in first-seen order),
/// truncated to MAX_PATTERNS. Quadratic scan: inputs are short interactive
/// texts, not files.
pub fn repeating_patterns(text: &str, min_len: usize) -> Vec<PatternMatch> {
    let chars: Vec<char> = text.chars().collect();
    let max_len = (chars.len() / 2).min(10);

    let mut order: Vec<PatternMatch> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for len in min_len..=max_len {
        for start in 0..=chars.len() - len {
            let pattern: String = chars[start..start + len].iter().collect();
            match index.get(&pattern) {
                Some(&slot) => {
                    order[slot].count += 1;
                    order[slot].positions.push(start);
                }
                None => {
                    index.insert(pattern.clone(), order.len());
                    order.push(PatternMatch {
                        pattern,
                        count: 1,
                        positions: vec![start],
                    });
                }
            }
        }
    }

    let mut matches: Vec<PatternMatch> = order.into_iter().filter(|m| m.count >= 2).collect();
    matches.sort_by(|a, b| b.count.cmp(&a.count));
    matches.truncate(MAX_PATTERNS);
    matches
}
