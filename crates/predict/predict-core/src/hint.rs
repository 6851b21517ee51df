//! Keyword-table hint interpreter
//!
//! Hints are scanned case-insensitively against a priority-ordered table of
//! keyword rules. Within each effect group the first matching rule wins, so
//! "cubic, roughly linear" resolves to degree 3. Numeric statements
//! (`degree 2`, `period 12`, `omega 0.5`) are read from the token stream and
//! override the keyword-derived values.
//!
//! Interpretation never fails. Text with no recognized keyword, or with
//! contradictory numeric statements, yields [`HintSpec::default`].

use predict_spi::{HintInterpreter, HintSpec, Sinusoids};
use std::f64::consts::TAU;
use tracing::debug;

/// What a matched keyword contributes to the spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintEffect {
    /// Polynomial degree
    Degree(usize),
    /// Turn sinusoidal terms on
    Periodic,
    /// Number of harmonics of the base frequency
    Harmonics(usize),
    /// Drop the constant column
    SuppressBias,
}

/// A table entry: matches when every pattern occurs in the lowercased hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    pub patterns: &'static [&'static str],
    pub effect: HintEffect,
}

impl KeywordRule {
    pub const fn new(patterns: &'static [&'static str], effect: HintEffect) -> Self {
        Self { patterns, effect }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().all(|p| text.contains(p))
    }
}

/// Built-in vocabulary, highest priority first within each effect group
pub const DEFAULT_RULES: &[KeywordRule] = &[
    // degree
    KeywordRule::new(&["cubic"], HintEffect::Degree(3)),
    KeywordRule::new(&["nonlinear"], HintEffect::Degree(2)),
    KeywordRule::new(&["quadratic"], HintEffect::Degree(2)),
    KeywordRule::new(&["polynomial"], HintEffect::Degree(2)),
    KeywordRule::new(&["linear"], HintEffect::Degree(1)),
    KeywordRule::new(&["flat", "then"], HintEffect::Degree(2)),
    // periodicity
    KeywordRule::new(&["periodic"], HintEffect::Periodic),
    KeywordRule::new(&["seasonal"], HintEffect::Periodic),
    KeywordRule::new(&["sinusoid"], HintEffect::Periodic),
    KeywordRule::new(&["oscillat"], HintEffect::Periodic),
    KeywordRule::new(&["wave"], HintEffect::Periodic),
    // harmonics
    KeywordRule::new(&["three peak"], HintEffect::Harmonics(3)),
    KeywordRule::new(&["3 peak"], HintEffect::Harmonics(3)),
    KeywordRule::new(&["high freq"], HintEffect::Harmonics(3)),
    KeywordRule::new(&["two peak"], HintEffect::Harmonics(2)),
    KeywordRule::new(&["2 peak"], HintEffect::Harmonics(2)),
    // bias
    KeywordRule::new(&["no intercept"], HintEffect::SuppressBias),
    KeywordRule::new(&["through the origin"], HintEffect::SuppressBias),
];

/// Words skipped between a numeric keyword and its value ("period of 12")
const FILLER: &[&str] = &["of", "is", "about", "approximately", "roughly"];

/// Token boundaries besides whitespace; signs and exponents stay inside numbers
const SEPARATORS: &[char] = &[',', ';', ':', '=', '(', ')', '"'];

/// Table-driven [`HintInterpreter`]
#[derive(Debug, Clone)]
pub struct KeywordInterpreter {
    rules: Vec<KeywordRule>,
}

impl KeywordInterpreter {
    /// Interpreter over [`DEFAULT_RULES`]
    pub fn new() -> Self {
        Self::with_rules(DEFAULT_RULES.to_vec())
    }

    /// Interpreter over a custom table (order is priority)
    pub fn with_rules(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }
}

impl Default for KeywordInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl HintInterpreter for KeywordInterpreter {
    fn interpret(&self, text: Option<&str>) -> HintSpec {
        let text = text.unwrap_or("").to_lowercase();
        if text.trim().is_empty() {
            return HintSpec::default();
        }

        let mut degree = None;
        let mut harmonics = None;
        let mut periodic = false;
        let mut bias_term = true;
        for rule in self.rules.iter().filter(|r| r.matches(&text)) {
            match rule.effect {
                HintEffect::Degree(d) => {
                    degree.get_or_insert(d);
                }
                HintEffect::Harmonics(h) => {
                    harmonics.get_or_insert(h);
                }
                HintEffect::Periodic => periodic = true,
                HintEffect::SuppressBias => bias_term = false,
            }
        }

        let stated = match NumericStatements::scan(&text) {
            Some(stated) => stated,
            None => {
                debug!(hint = %text, "conflicting numeric statements, using default spec");
                return HintSpec::default();
            }
        };

        let harmonics = harmonics.unwrap_or(1);
        let sinusoids = match stated.base_frequency {
            Some(base) => Sinusoids::Explicit {
                frequencies: (1..=harmonics)
                    .map(|h| h as f64 * base)
                    .filter(|w| w.is_finite())
                    .collect(),
            },
            None if periodic => Sinusoids::DefaultFrequency { harmonics },
            None => Sinusoids::Off,
        };

        let spec = HintSpec {
            polynomial_degree: stated.degree.or(degree).unwrap_or(1),
            sinusoids,
            bias_term,
        };
        if !spec.bias_term && spec.polynomial_degree == 0 && !spec.include_sin_cos() {
            debug!(hint = %text, "hint selects no basis columns, using default spec");
            return HintSpec::default();
        }
        debug!(hint = %text, ?spec, "interpreted hint");
        spec
    }
}

/// Numbers explicitly stated in a hint
#[derive(Debug, Default, PartialEq)]
struct NumericStatements {
    degree: Option<usize>,
    base_frequency: Option<f64>,
}

impl NumericStatements {
    /// Scan tokens for `degree N`, `order N`, `period P`, `omega W` and
    /// `frequency W`. Returns `None` when two statements of the same kind
    /// disagree.
    fn scan(text: &str) -> Option<Self> {
        let tokens: Vec<&str> = text
            .split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
            .map(|t| t.trim_end_matches(['.', '!', '?']))
            .filter(|t| !t.is_empty())
            .collect();

        let mut stated = Self::default();
        for (i, token) in tokens.iter().enumerate() {
            let value = || {
                tokens[i + 1..]
                    .iter()
                    .find(|t| !FILLER.contains(*t))
                    .and_then(|t| t.parse::<f64>().ok())
                    .filter(|v| v.is_finite())
            };
            match *token {
                "degree" | "order" => {
                    let d = value().filter(|v| *v >= 0.0 && v.fract() == 0.0);
                    if let Some(d) = d {
                        merge(&mut stated.degree, d as usize)?;
                    }
                }
                "period" => {
                    if let Some(p) = value().filter(|v| *v > 0.0) {
                        merge_frequency(&mut stated.base_frequency, TAU / p)?;
                    }
                }
                "omega" | "frequency" => {
                    if let Some(w) = value().filter(|v| *v > 0.0) {
                        merge_frequency(&mut stated.base_frequency, w)?;
                    }
                }
                _ => {}
            }
        }
        Some(stated)
    }
}

fn merge(slot: &mut Option<usize>, value: usize) -> Option<()> {
    match *slot {
        Some(existing) if existing != value => None,
        _ => {
            *slot = Some(value);
            Some(())
        }
    }
}

fn merge_frequency(slot: &mut Option<f64>, value: f64) -> Option<()> {
    match *slot {
        Some(existing) if (existing - value).abs() > 1e-12 * existing.abs().max(1.0) => None,
        _ => {
            *slot = Some(value);
            Some(())
        }
    }
}
