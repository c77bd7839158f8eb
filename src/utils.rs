/// Get a substring between 2 strings
pub fn str_between_str<'a>(full_str: &'a str, str1: &str, str2: &str) -> Option<&'a str> {
    let start = full_str.find(str1)? + str1.len();

    let end = start + full_str[start..].find(str2)?;

    Some(&full_str[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_slice_between_both_markers() {
        let href = "/?lang=PL&rozklad=20200606&linia=194";

        assert_eq!(str_between_str(href, "rozklad=", "&linia="), Some("20200606"));
    }

    #[test]
    fn missing_marker_yields_none() {
        assert_eq!(str_between_str("abc", "a", "x"), None);
        assert_eq!(str_between_str("abc", "x", "c"), None);
    }
}
