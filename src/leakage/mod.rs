//! Source-leakage heuristics.
//!
//! A data-driven table of compiled patterns that flag generated text for
//! citation-like, URL-like, or direct-quote-like markers — proxies for
//! insufficiently transformed source material. Heuristic by nature: false
//! negatives are expected, and false positives only cost a regeneration,
//! never a hard user-facing rejection.


use regex::Regex;
use std::sync::LazyLock;

macro_rules! leakage_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new($regex_str)
                .expect(concat!("invalid leakage pattern: ", stringify!($name)))
        });
    };
}

// ── URLs and domains ───────────────────────────────────────────────────────
leakage_pattern!(RE_URL, r"https?://\S+");
leakage_pattern!(RE_WWW_DOMAIN, r"(?i)\bwww\.[a-z0-9-]+\.[a-z]{2,}");

// ── Document-sharing and academic sites ───────────────────────────────────
leakage_pattern!(
    RE_DOCUMENT_SITE,
    r"(?i)\b(wikipedia|scribd|slideshare|academia\.edu|researchgate|jstor)\b"
);

// ── Chapter and page references (English + Spanish) ────────────────────────
leakage_pattern!(
    RE_CHAPTER,
    r"(?i)\b(chapter|cap[ií]tulo)\s+\d+"
);
leakage_pattern!(
    RE_PAGE,
    r"(?i)\b(page|p[áa]gina|p[áa]g\.|p\.)\s*\d+"
);

// ── Citation connectors ────────────────────────────────────────────────────
leakage_pattern!(
    RE_CITATION_CONNECTOR,
    r"(?i)(\b(according to|seg[úu]n)\b|\b(fuente|source)\s*:)"
);

// ── Parenthetical publication years, e.g. (2020) ───────────────────────────
leakage_pattern!(RE_YEAR_PAREN, r"\((19|20)\d{2}\)");

// ── Academic apparatus ─────────────────────────────────────────────────────
leakage_pattern!(RE_ET_AL, r"(?i)\bet\s+al\.?");
leakage_pattern!(RE_IBID, r"(?i)\b(ibid\.?|op\.\s*cit\.?)");

// ── Document vocabulary (English + Spanish) ────────────────────────────────
leakage_pattern!(
    RE_DOCUMENT_WORD,
    r"(?i)\b(documento|document|anexo|appendix)\b"
);

// ── Figure/table references ────────────────────────────────────────────────
leakage_pattern!(
    RE_FIGURE_TABLE,
    r"(?i)\b(figure|figura|table|tabla)\s+\d+"
);

// ── Long directly quoted spans (straight or curly quotes) ─────────────────
leakage_pattern!(RE_LONG_QUOTE, "[\"\u{201c}][^\"\u{201c}\u{201d}]{50,}[\"\u{201d}]");

// ── Explicit verbatim-quotation phrases ────────────────────────────────────
leakage_pattern!(
    RE_VERBATIM,
    r"(?i)\b(quoted verbatim|cita textual|textualmente)\b"
);

/// A named leakage pattern.
pub struct LeakagePattern {
    pub name: &'static str,
    regex: &'static LazyLock<Regex>,
}

impl LeakagePattern {
    fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// All leakage patterns in detection order (most specific first).
pub fn all_patterns() -> Vec<LeakagePattern> {
    vec![
        LeakagePattern { name: "url", regex: &RE_URL },
        LeakagePattern { name: "www_domain", regex: &RE_WWW_DOMAIN },
        LeakagePattern { name: "document_site", regex: &RE_DOCUMENT_SITE },
        LeakagePattern { name: "chapter_reference", regex: &RE_CHAPTER },
        LeakagePattern { name: "page_reference", regex: &RE_PAGE },
        LeakagePattern { name: "citation_connector", regex: &RE_CITATION_CONNECTOR },
        LeakagePattern { name: "parenthetical_year", regex: &RE_YEAR_PAREN },
        LeakagePattern { name: "et_al", regex: &RE_ET_AL },
        LeakagePattern { name: "ibid_op_cit", regex: &RE_IBID },
        LeakagePattern { name: "document_word", regex: &RE_DOCUMENT_WORD },
        LeakagePattern { name: "figure_table", regex: &RE_FIGURE_TABLE },
        LeakagePattern { name: "long_quote", regex: &RE_LONG_QUOTE },
        LeakagePattern { name: "verbatim_phrase", regex: &RE_VERBATIM },
    ]
}

/// Returns `true` if any leakage pattern matches `text`.
///
/// Short-circuits on the first hit.
pub fn detect_source_leakage(text: &str) -> bool {
    all_patterns().iter().any(|p| p.matches(text))
}

/// Names of every pattern that matches `text`, in detection order.
///
/// Used for tracing and tests; the scoring path only needs the boolean.
pub fn leakage_matches(text: &str) -> Vec<&'static str> {
    all_patterns()
        .iter()
        .filter(|p| p.matches(text))
        .map(|p| p.name)
        .collect()
}
