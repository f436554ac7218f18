/// Canonical form used when matching spell and god names typed by players
/// or scripts: lowercase, no apostrophes, `_` and `-` read as spaces,
/// whitespace runs collapsed.
pub fn normalise_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| *c != '\'')
        .map(|c| match c {
            '_' | '-' => ' ',
            other => other.to_ascii_lowercase(),
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalises_separators() {
        assert_eq!(normalise_name("Lee's_Rapid-Deconstruction"), "lees rapid deconstruction");
        assert_eq!(normalise_name("  THE   shining one\t"), "the shining one");
        assert_eq!(normalise_name(""), "");
    }
}
