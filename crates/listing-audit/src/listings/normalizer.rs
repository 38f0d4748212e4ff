/// Strips invisible characters and collapses runs of whitespace. Case is kept:
/// the legality tests compare property, room and location text verbatim.
pub(crate) fn normalize_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_invisible_characters_and_collapses_whitespace() {
        let source = "\u{feff}Entire  home/apt \u{200b}";
        assert_eq!(normalize_text(source), "Entire home/apt");
    }

    #[test]
    fn keeps_original_case() {
        assert_eq!(normalize_text("  Brooklyn,  NY "), "Brooklyn, NY");
        assert_eq!(normalize_text("us"), "us");
    }
}
