use crate::analysis::stats;
use crate::error::Result;
use crate::registry::normalize_id;
use serde::{Deserialize, Serialize};

/// Composite weighting: 30% key, 25% algorithm, 25% implementation, 20%
/// quantum. The weights are fixed design values and must sum to 1.
const KEY_WEIGHT: f64 = 0.30;
const ALGORITHM_WEIGHT: f64 = 0.25;
const IMPLEMENTATION_WEIGHT: f64 = 0.25;
const QUANTUM_WEIGHT: f64 = 0.20;

/// Placeholder implementation score: no implementation audit is modeled
const IMPLEMENTATION_STRENGTH: u8 = 75;

/// Score assigned to algorithm ids the strength tables do not know
const DEFAULT_ALGORITHM_STRENGTH: u8 = 50;
const DEFAULT_QUANTUM_RESISTANCE: u8 = 15;

/// Keys shorter than this many characters trigger the brute-force weakness
const MIN_KEY_CHARS: usize = 16;

/// Prediction category emitted by the rule engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionCategory {
    Weakness,
    Strength,
    Optimization,
    Threat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// One deterministic rule firing from the prediction list
#[derive(Debug, Clone, Serialize)]
pub struct RiskPrediction {
    pub category: PredictionCategory,
    pub confidence: f64,
    pub description: String,
    pub impact: Impact,
    pub risk: RiskLevel,
}

/// Composite heuristic security report, built fresh per analysis run
#[derive(Debug, Clone, Serialize)]
pub struct SecurityAssessment {
    pub overall: u8,
    pub key_strength: u8,
    pub algorithm_strength: u8,
    pub implementation_strength: u8,
    pub quantum_resistance: u8,
    pub predictions: Vec<RiskPrediction>,
    pub vulnerabilities: Vec<String>,
    pub recommendations: Vec<String>,
}

impl SecurityAssessment {
    /// Serialize for the UI boundary
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the composite assessment for one text/key/algorithm triple.
/// Degenerate inputs (empty text or key, unknown algorithm id) score low or
/// fall back to table defaults rather than failing.
pub fn assess(text: &str, key: &str, algorithm_id: &str) -> SecurityAssessment {
    let entropy = stats::shannon_entropy(text);
    let pattern_count = stats::repeating_patterns(text, 2).len();

    let key_score = key_strength(key);
    let algorithm_score = algorithm_strength(algorithm_id);
    let quantum_score = quantum_resistance(algorithm_id);

    let overall = (f64::from(key_score) * KEY_WEIGHT
        + f64::from(algorithm_score) * ALGORITHM_WEIGHT
        + f64::from(IMPLEMENTATION_STRENGTH) * IMPLEMENTATION_WEIGHT
        + f64::from(quantum_score) * QUANTUM_WEIGHT)
        .round() as u8;

    SecurityAssessment {
        overall,
        key_strength: key_score,
        algorithm_strength: algorithm_score,
        implementation_strength: IMPLEMENTATION_STRENGTH,
        quantum_resistance: quantum_score,
        predictions: predict(entropy, key, algorithm_id, pattern_count),
        vulnerabilities: find_vulnerabilities(entropy, key, algorithm_id),
        recommendations: recommendations(),
    }
}

/// Real-world cryptanalytic standing by algorithm id. These are fixed
/// design values, not derived quantities: RC4 sits at 25 for its practical
/// keystream biases, modern stream ciphers score high, unknowns get 50.
pub fn algorithm_strength(id: &str) -> u8 {
    match normalize_id(id).as_str() {
        "rc4" => 25,
        "chacha20" => 95,
        "aes" => 90,
        "salsa20" => 85,
        _ => DEFAULT_ALGORITHM_STRENGTH,
    }
}

/// None of the supported ciphers resist quantum key search; the table only
/// grades relative margin
pub fn quantum_resistance(id: &str) -> u8 {
    match normalize_id(id).as_str() {
        "rc4" => 10,
        "chacha20" => 25,
        "aes" => 20,
        "salsa20" => 20,
        _ => DEFAULT_QUANTUM_RESISTANCE,
    }
}

/// Heuristic key quality in [0, 100]: saturating length bonus, a flat bonus
/// per character class present, an entropy proxy, minus weak-pattern
/// penalties. Empty keys score 0.
pub fn key_strength(key: &str) -> u8 {
    if key.is_empty() {
        return 0;
    }

    let chars = key.chars().count() as f64;
    let mut score = (chars * 2.0).min(30.0);

    if key.chars().any(|c| c.is_ascii_lowercase()) {
        score += 15.0;
    }
    if key.chars().any(|c| c.is_ascii_uppercase()) {
        score += 15.0;
    }
    if key.chars().any(|c| c.is_ascii_digit()) {
        score += 15.0;
    }
    if key.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 15.0;
    }

    score += (stats::shannon_entropy(key) * 2.0).min(10.0);
    score -= f64::from(weak_pattern_penalty(key));

    score.clamp(0.0, 100.0).round() as u8
}

/// Penalty points for structure an attacker would try first: repeated runs,
/// ascending sequences, keyboard-adjacent fragments
fn weak_pattern_penalty(key: &str) -> u32 {
    const KEYBOARD_RUNS: &[&str] = &["123", "abc", "qwe", "asd", "zxc"];

    let chars: Vec<char> = key.chars().collect();
    let mut penalty = 0u32;

    // each maximal run of three or more identical characters
    let mut run = 1usize;
    for pair in chars.windows(2) {
        if pair[0] == pair[1] {
            run += 1;
            if run == 3 {
                penalty += 3;
            }
        } else {
            run = 1;
        }
    }

    // ascending code-point triples ("abc", "345")
    for triple in chars.windows(3) {
        let (a, b, c) = (triple[0] as u32, triple[1] as u32, triple[2] as u32);
        if b == a + 1 && c == b + 1 {
            penalty += 2;
        }
    }

    let lower = key.to_lowercase();
    for fragment in KEYBOARD_RUNS {
        if lower.contains(fragment) {
            penalty += 5;
        }
    }

    penalty
}

/// Evaluate the prediction rule list in fixed order over (entropy, key
/// length, algorithm id, pattern count). If neither a weakness nor a
/// strength rule fired, a synthetic strength entry is emitted so callers
/// always receive at least one prediction.
pub fn predict(
    entropy: f64,
    key: &str,
    algorithm_id: &str,
    pattern_count: usize,
) -> Vec<RiskPrediction> {
    let mut predictions = Vec::new();

    if key.chars().count() < MIN_KEY_CHARS {
        predictions.push(RiskPrediction {
            category: PredictionCategory::Weakness,
            confidence: 0.85,
            description: "Short key length detected. Vulnerable to brute force attacks.".into(),
            impact: Impact::High,
            risk: RiskLevel::High,
        });
    }

    if entropy < 1.5 {
        predictions.push(RiskPrediction {
            category: PredictionCategory::Weakness,
            confidence: 0.80,
            description: "Very low entropy. Output is dominated by a few symbols.".into(),
            impact: Impact::High,
            risk: RiskLevel::High,
        });
    } else if entropy < 3.5 {
        predictions.push(RiskPrediction {
            category: PredictionCategory::Weakness,
            confidence: 0.72,
            description: "Low entropy detected. Text may have predictable patterns.".into(),
            impact: Impact::Medium,
            risk: RiskLevel::Medium,
        });
    }

    if pattern_count > 3 {
        predictions.push(RiskPrediction {
            category: PredictionCategory::Weakness,
            confidence: 0.68,
            description: "Repeating substrings suggest structure surviving encryption.".into(),
            impact: Impact::Medium,
            risk: RiskLevel::Medium,
        });
    }

    if entropy > 7.0 {
        predictions.push(RiskPrediction {
            category: PredictionCategory::Strength,
            confidence: 0.91,
            description: "High entropy indicates good randomness properties.".into(),
            impact: Impact::Low,
            risk: RiskLevel::Low,
        });
    }

    if normalize_id(algorithm_id) != "chacha20" {
        predictions.push(RiskPrediction {
            category: PredictionCategory::Optimization,
            confidence: 0.76,
            description: "Consider using ChaCha20 for better performance and security.".into(),
            impact: Impact::Low,
            risk: RiskLevel::Low,
        });
    }

    predictions.push(RiskPrediction {
        category: PredictionCategory::Threat,
        confidence: 0.45,
        description: "Current algorithm may be vulnerable to future quantum attacks.".into(),
        impact: Impact::High,
        risk: RiskLevel::Medium,
    });

    let has_verdict = predictions.iter().any(|p| {
        matches!(
            p.category,
            PredictionCategory::Weakness | PredictionCategory::Strength
        )
    });
    if !has_verdict {
        predictions.push(RiskPrediction {
            category: PredictionCategory::Strength,
            confidence: 0.60,
            description: "No weakness rules fired for this input.".into(),
            impact: Impact::Low,
            risk: RiskLevel::Low,
        });
    }

    predictions
}

fn find_vulnerabilities(entropy: f64, key: &str, algorithm_id: &str) -> Vec<String> {
    let mut findings = Vec::new();

    if key.chars().count() < MIN_KEY_CHARS {
        findings.push("Key length is below the recommended minimum".to_string());
    }
    if normalize_id(algorithm_id) == "rc4" {
        findings.push("RC4 keystream biases are exploitable in practice".to_string());
    }
    if entropy > 0.0 && entropy < 3.5 {
        findings.push("Output entropy is low enough to leak structure".to_string());
    }

    findings
}

fn recommendations() -> Vec<String> {
    vec![
        "Consider using longer keys for enhanced security".to_string(),
        "Regular key rotation is recommended".to_string(),
        "Monitor for unusual patterns in encrypted data".to_string(),
    ]
}
