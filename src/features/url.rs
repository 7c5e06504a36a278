use std::borrow::Cow;

/// Schemes whose last path segment may carry `;params`.
const SCHEMES_WITH_PARAMS: [&str; 16] = [
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp", "rtsp", "rtsps", "rtspu",
    "sip", "sips", "mms", "sftp", "tel",
];

/// The components of a URL used by the lexical features.
///
/// Decomposition is total: a component that is absent from the input is the empty string, so
/// garbage input simply yields an empty host and the whole string as path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlParts<'a> {
    pub scheme: &'a str,
    /// The authority (`netloc`), verbatim: userinfo and port included, case preserved.
    pub host: &'a str,
    pub path: &'a str,
    pub params: &'a str,
    pub query: &'a str,
    pub fragment: &'a str,
}

impl<'a> UrlParts<'a> {
    /// Splits an already sanitized URL into its components.
    ///
    /// # Args
    /// * `url` - The output of [`sanitize`].
    ///
    /// # Returns
    /// The URL's components, each possibly empty.
    pub fn split(url: &'a str) -> Self {
        let (scheme, rest) = split_scheme(url);

        let (host, rest) = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after.find(&['/', '?', '#'][..]).unwrap_or(after.len());
                after.split_at(end)
            }
            None => ("", rest),
        };

        let (rest, fragment) = rest.split_once('#').unwrap_or((rest, ""));
        let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));

        let carries_params = SCHEMES_WITH_PARAMS
            .iter()
            .any(|s| s.eq_ignore_ascii_case(scheme));

        let (path, params) = if carries_params {
            split_params(rest)
        } else {
            (rest, "")
        };

        Self {
            scheme,
            host,
            path,
            params,
            query,
            fragment,
        }
    }
}

/// Drops leading C0 control and space characters and removes every tab and line break.
pub fn sanitize(url: &str) -> Cow<'_, str> {
    let url = url.trim_start_matches(|c: char| c <= ' ');

    if url.contains(&['\t', '\r', '\n'][..]) {
        Cow::Owned(url.chars().filter(|c| !matches!(c, '\t' | '\r' | '\n')).collect())
    } else {
        Cow::Borrowed(url)
    }
}

fn split_scheme(url: &str) -> (&str, &str) {
    let Some(i) = url.find(':') else {
        return ("", url);
    };

    let candidate = &url[..i];
    let starts_with_letter = candidate
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic());
    let valid = candidate
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    if starts_with_letter && valid {
        (candidate, &url[i + 1..])
    } else {
        ("", url)
    }
}

// Only the last path segment can carry parameters.
fn split_params(path: &str) -> (&str, &str) {
    let from = path.rfind('/').unwrap_or(0);

    match path[from..].find(';') {
        Some(i) => (&path[..from + i], &path[from + i + 1..]),
        None => (path, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(url: &str) -> UrlParts<'_> {
        UrlParts::split(url)
    }

    #[test]
    fn splits_a_regular_url() {
        let p = parts("https://www.google.com/search?q=sentinel");
        assert_eq!(p.scheme, "https");
        assert_eq!(p.host, "www.google.com");
        assert_eq!(p.path, "/search");
        assert_eq!(p.query, "q=sentinel");
        assert_eq!(p.fragment, "");
    }

    #[test]
    fn no_authority_without_double_slash() {
        let p = parts("www.example.com/login");
        assert_eq!(p.scheme, "");
        assert_eq!(p.host, "");
        assert_eq!(p.path, "www.example.com/login");
    }

    #[test]
    fn scheme_relative_url_has_a_host() {
        let p = parts("//host/p");
        assert_eq!(p.host, "host");
        assert_eq!(p.path, "/p");
    }

    #[test]
    fn scheme_must_start_with_a_letter() {
        let p = parts("1http://x/y");
        assert_eq!(p.scheme, "");
        assert_eq!(p.host, "");
        assert_eq!(p.path, "1http://x/y");
    }

    #[test]
    fn params_are_cut_from_the_last_segment_only() {
        let p = parts("HTTP://Host.COM/a;b/c;d?x#y");
        assert_eq!(p.host, "Host.COM");
        assert_eq!(p.path, "/a;b/c");
        assert_eq!(p.params, "d");
        assert_eq!(p.query, "x");
        assert_eq!(p.fragment, "y");
    }

    #[test]
    fn secure_rtsp_carries_params() {
        let p = parts("rtsps://h/a;b");
        assert_eq!(p.host, "h");
        assert_eq!(p.path, "/a");
        assert_eq!(p.params, "b");
    }

    #[test]
    fn params_kept_in_path_for_other_schemes() {
        let p = parts("mailto:a;b@c.com");
        assert_eq!(p.path, "a;b@c.com");
        assert_eq!(p.params, "");
    }

    #[test]
    fn fragment_is_split_before_query() {
        let p = parts("ftp://u@h/p#f?q");
        assert_eq!(p.host, "u@h");
        assert_eq!(p.query, "");
        assert_eq!(p.fragment, "f?q");
    }

    #[test]
    fn authority_keeps_brackets_and_port() {
        let p = parts("http://[::1]:80/p");
        assert_eq!(p.host, "[::1]:80");
        assert_eq!(p.path, "/p");
    }

    #[test]
    fn unbalanced_brackets_do_not_fail() {
        let p = parts("http://[abc/p");
        assert_eq!(p.host, "[abc");
    }

    #[test]
    fn empty_input_is_all_empty() {
        assert_eq!(parts(""), UrlParts::default());
    }

    #[test]
    fn sanitize_strips_leading_controls_and_removes_breaks() {
        assert_eq!(sanitize("  http://x.com/\tpath\n"), "http://x.com/path");
        assert!(matches!(sanitize("http://x.com/"), Cow::Borrowed(_)));
        assert_eq!(sanitize("http://x.com/ "), "http://x.com/ ");
    }
}
