//! Human-readable citation block appended to streamed answers.

use std::fmt::Write;

use hukum_common::Source;

const DELIMITER: &str = "---";
const HEADER: &str = "**Sumber Referensi:**";

/// Append the citation block for `sources` to `answer`.
///
/// Returns `answer` unchanged when there are no sources. Each source gets one
/// line, in input order: index, display name, page and score as a percentage.
pub fn format_citations(answer: &str, sources: &[Source]) -> String {
    if sources.is_empty() {
        return answer.to_string();
    }

    let mut out = String::with_capacity(answer.len() + 64 * sources.len());
    out.push_str(answer);
    out.push_str("\n\n");
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(HEADER);

    for (i, source) in sources.iter().enumerate() {
        let page = source
            .page
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "\n{}. {} (hal. {}) - skor {:.1}%",
            i + 1,
            display_name(&source.origin),
            page,
            source.score * 100.0
        );
    }

    out
}

/// Last path segment of a path-like origin, the origin itself otherwise.
pub fn display_name(origin: &str) -> &str {
    if !origin.contains(['/', '\\']) {
        return origin;
    }
    origin
        .rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_no_sources_is_identity() {
        assert_eq!(format_citations("Jawaban.", &[]), "Jawaban.");
        assert_eq!(format_citations("", &[]), "");
    }

    #[test]
    fn test_single_source() {
        let sources = vec![Source::new("data/raw/uu_13_2003.pdf", 12, 0.8734)];
        assert_eq!(
            format_citations("Hi", &sources),
            "Hi\n\n---\n**Sumber Referensi:**\n1. uu_13_2003.pdf (hal. 12) - skor 87.3%"
        );
    }

    #[test]
    fn test_sources_keep_input_order() {
        let sources = vec![
            Source::new("b.pdf", 2, 0.5),
            Source::new("a.pdf", 1, 0.91),
            Source::new("c.pdf", 3, 0.0123),
        ];
        let out = format_citations("X", &sources);
        let lines: Vec<&str> = out.lines().skip_while(|l| *l != HEADER).skip(1).collect();
        assert_eq!(
            lines,
            vec![
                "1. b.pdf (hal. 2) - skor 50.0%",
                "2. a.pdf (hal. 1) - skor 91.0%",
                "3. c.pdf (hal. 3) - skor 1.2%",
            ]
        );
    }

    #[test]
    fn test_missing_page() {
        let mut source = Source::new("memo.txt", 1, 0.25);
        source.page = None;
        assert!(format_citations("X", &[source]).ends_with("1. memo.txt (hal. -) - skor 25.0%"));
    }

    #[test]
    fn test_float_page_from_backend() {
        let source: Source = serde_json::from_value(serde_json::json!({
            "source": "data/raw/uu_13_2003.pdf",
            "page": 12.0,
            "doc_type": "undang-undang",
            "score": 0.8734,
            "retrieval_source": "hybrid"
        }))
        .unwrap();
        assert!(format_citations("Hi", &[source])
            .ends_with("1. uu_13_2003.pdf (hal. 12) - skor 87.3%"));
    }

    #[test]
    fn test_is_deterministic() {
        let sources = vec![Source::new("x/y.pdf", 4, 0.42)];
        assert_eq!(format_citations("A", &sources), format_citations("A", &sources));
    }

    #[test]
    fn test_sources_are_not_mutated() {
        let sources = vec![Source::new("x/y.pdf", 4, 0.42)];
        let before = sources.clone();
        let _ = format_citations("A", &sources);
        assert_eq!(sources, before);
    }

    #[rstest]
    #[case("uu.pdf", "uu.pdf")]
    #[case("data/raw/uu.pdf", "uu.pdf")]
    #[case("C:\\docs\\putusan.pdf", "putusan.pdf")]
    #[case("data/folder/", "folder")]
    #[case("Unknown", "Unknown")]
    fn test_display_name(#[case] origin: &str, #[case] expected: &str) {
        assert_eq!(display_name(origin), expected);
    }
}
