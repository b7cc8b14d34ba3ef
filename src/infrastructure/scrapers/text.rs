/// Strips leading and trailing whitespace and control characters. Inner spacing is kept.
pub fn clean(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || c.is_control())
        .to_string()
}

/// Pulls the value of `param` out of a link such as `../country.shtml?countryid=CHN&x=1`.
///
/// The value is the segment between the first `param=` and the next `param=`, cut at
/// the first `&`. Links without the parameter yield an empty string.
pub fn derive_id(link: &str, param: &str) -> String {
    let marker = format!("{}=", param);
    let mut segments = link.split(marker.as_str());
    segments.next();
    match segments.next() {
        Some(segment) => segment.split('&').next().unwrap_or_default().to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_trims_edges_only() {
        assert_eq!(clean("  \n\t Men's 100m \r\n"), "Men's 100m");
        assert_eq!(clean("Stade  de France"), "Stade  de France");
        assert_eq!(clean("\u{0}\u{7}18\u{1b}"), "18");
        assert_eq!(clean(""), "");
        assert_eq!(clean(" \n\t "), "");
    }

    #[test]
    fn clean_is_idempotent() {
        for raw in ["", " a ", "\n\tb c\n", "\u{a0}d\u{a0}", "e"] {
            let once = clean(raw);
            assert_eq!(clean(&once), once);
            assert_eq!(once.trim(), once);
        }
    }

    #[test]
    fn derives_parameter_value() {
        assert_eq!(derive_id("x?countryid=CHN&y=1", "countryid"), "CHN");
        assert_eq!(derive_id("/team.shtml?countryid=JPN", "countryid"), "JPN");
        assert_eq!(derive_id("no-param-here", "countryid"), "");
        assert_eq!(derive_id("", "countryid"), "");
        assert_eq!(derive_id("x?countryid=&y=1", "countryid"), "");
    }

    #[test]
    fn derive_stops_at_next_occurrence() {
        assert_eq!(derive_id("?countryid=FRA&countryid=GER", "countryid"), "FRA");
        assert_eq!(derive_id("?countryid=FRAcountryid=GER", "countryid"), "FRA");
        assert_eq!(derive_id("countryid=countryid=GER", "countryid"), "");
    }
}
