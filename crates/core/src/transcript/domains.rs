use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_KEY_TERMS: usize = 10;
// Keeps the normalization defined when no domain matches.
const DOMAIN_EPSILON: f64 = 1e-4;

const WEB_DEVELOPMENT: &[&str] = &[
    "html", "css", "javascript", "react", "angular", "vue", "dom", "api", "frontend", "backend",
    "responsive", "server", "client", "database", "framework", "component", "routing", "state",
    "props", "hooks", "redux",
];

const DATA_SCIENCE: &[&str] = &[
    "python",
    "pandas",
    "numpy",
    "matplotlib",
    "tensorflow",
    "keras",
    "sklearn",
    "regression",
    "classification",
    "clustering",
    "neural network",
    "machine learning",
    "deep learning",
    "data",
    "model",
    "training",
    "dataset",
    "feature",
    "accuracy",
];

const CLOUD_COMPUTING: &[&str] = &[
    "aws",
    "azure",
    "gcp",
    "cloud",
    "serverless",
    "container",
    "docker",
    "kubernetes",
    "lambda",
    "ec2",
    "s3",
    "microservice",
    "scaling",
    "deployment",
    "infrastructure",
];

const CYBERSECURITY: &[&str] = &[
    "encryption",
    "authentication",
    "authorization",
    "vulnerability",
    "exploit",
    "firewall",
    "malware",
    "virus",
    "phishing",
    "hacking",
    "security",
    "threat",
    "protection",
    "defense",
    "attack",
    "penetration",
    "testing",
];

const STOPWORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "between", "both", "but", "by", "can", "could",
    "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from", "further",
    "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how", "i", "if",
    "in", "into", "is", "it", "its", "itself", "just", "me", "more", "most", "my", "no", "nor",
    "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "them", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
];

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TechDomain {
    WebDevelopment,
    DataScience,
    CloudComputing,
    Cybersecurity,
}

impl TechDomain {
    /// Fixed detection order; ties resolve to the earliest entry.
    pub const ALL: [TechDomain; 4] = [
        TechDomain::WebDevelopment,
        TechDomain::DataScience,
        TechDomain::CloudComputing,
        TechDomain::Cybersecurity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TechDomain::WebDevelopment => "web_development",
            TechDomain::DataScience => "data_science",
            TechDomain::CloudComputing => "cloud_computing",
            TechDomain::Cybersecurity => "cybersecurity",
        }
    }

    /// Human readable name for remarks.
    pub fn display_name(self) -> &'static str {
        match self {
            TechDomain::WebDevelopment => "web development",
            TechDomain::DataScience => "data science",
            TechDomain::CloudComputing => "cloud computing",
            TechDomain::Cybersecurity => "cybersecurity",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            TechDomain::WebDevelopment => WEB_DEVELOPMENT,
            TechDomain::DataScience => DATA_SCIENCE,
            TechDomain::CloudComputing => CLOUD_COMPUTING,
            TechDomain::Cybersecurity => CYBERSECURITY,
        }
    }
}

/// Share of each domain's keywords found as substrings of `clean_text`,
/// normalized across domains.
pub fn detect_domains(clean_text: &str) -> BTreeMap<TechDomain, f64> {
    let raw: Vec<(TechDomain, f64)> = TechDomain::ALL
        .iter()
        .map(|domain| {
            let keywords = domain.keywords();
            let hits = keywords.iter().filter(|k| clean_text.contains(**k)).count();
            (*domain, hits as f64 / (keywords.len() + 1) as f64)
        })
        .collect();

    let total = raw.iter().map(|(_, s)| s).sum::<f64>() + DOMAIN_EPSILON;
    raw.into_iter().map(|(d, s)| (d, s / total)).collect()
}

pub fn detected_domain(scores: &BTreeMap<TechDomain, f64>) -> TechDomain {
    let mut best = TechDomain::ALL[0];
    let mut best_score = f64::NEG_INFINITY;
    for domain in TechDomain::ALL {
        let score = scores.get(&domain).copied().unwrap_or(0.0);
        if score > best_score {
            best = domain;
            best_score = score;
        }
    }
    best
}

/// Every keyword of `domain` found as a substring of `clean_text`, in
/// keyword order.
pub fn domain_keyword_hits(clean_text: &str, domain: TechDomain) -> Vec<&'static str> {
    domain
        .keywords()
        .iter()
        .copied()
        .filter(|k| clean_text.contains(k))
        .collect()
}

/// Domain keywords present in the text (keyword order), then multi-word
/// phrases that contain one. At most [`MAX_KEY_TERMS`].
pub fn extract_key_terms(clean_text: &str, domain: TechDomain) -> Vec<String> {
    let keywords = domain.keywords();
    let mut terms: Vec<String> = domain_keyword_hits(clean_text, domain)
        .into_iter()
        .map(str::to_owned)
        .collect();

    for phrase in content_phrases(clean_text) {
        if terms.len() >= MAX_KEY_TERMS {
            break;
        }
        if !terms.contains(&phrase) && keywords.iter().any(|k| phrase.contains(k)) {
            terms.push(phrase);
        }
    }

    terms.truncate(MAX_KEY_TERMS);
    terms
}

// Maximal runs of two or more non-stopword tokens. Stands in for noun
// phrase chunking.
fn content_phrases(clean_text: &str) -> Vec<String> {
    let mut phrases = Vec::new();
    let mut run: Vec<&str> = Vec::new();
    for token in clean_text.split_whitespace().chain(std::iter::once("")) {
        if token.is_empty() || STOPWORDS.contains(&token) {
            if run.len() > 1 {
                phrases.push(run.join(" "));
            }
            run.clear();
        } else {
            run.push(token);
        }
    }
    phrases
}
