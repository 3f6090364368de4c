//! Whitespace and decoration cleanup shared by every extraction stage.

/// Bullet, dash and colon characters stripped from both ends of a fragment.
fn is_decoration(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '–' | '—' | '•' | '*' | ':')
}

/// Collapse whitespace runs to single spaces and strip leading/trailing
/// bullet markers, dashes, colons and whitespace.
///
/// Idempotent: `clean(&clean(s)) == clean(s)`.
pub fn clean(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.trim_matches(is_decoration).to_string()
}

/// Lower-case and collapse whitespace, for comparing tasks across patterns.
pub fn normalize_for_compare(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_strips_bullets_and_colons() {
        assert_eq!(clean("- : revisar contrato"), "revisar contrato");
        assert_eq!(clean("• send the deck *"), "send the deck");
        assert_eq!(clean("  — update the roadmap:  "), "update the roadmap");
    }

    #[test]
    fn test_clean_collapses_internal_whitespace() {
        assert_eq!(clean("send\tthe \n\n report"), "send the report");
    }

    #[test]
    fn test_clean_keeps_inner_dashes() {
        assert_eq!(clean("- follow-up with legal -"), "follow-up with legal");
    }

    #[test]
    fn test_clean_empty_and_decoration_only() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   "), "");
        assert_eq!(clean(" - * : • "), "");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let samples = [
            "",
            "  - Filipe:  revisar   contrato ",
            "* - : x",
            "a -  ",
            "::: ---",
            "• tarefa • com • bullets •",
            "\t\n mixed\u{a0}spaces \t",
        ];
        for s in samples {
            let once = clean(s);
            assert_eq!(clean(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_normalize_for_compare() {
        assert_eq!(
            normalize_for_compare("  Send   the REPORT "),
            "send the report"
        );
    }
}
