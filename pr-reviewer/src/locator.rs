//! Pull-request reference parsing.
//!
//! The trigger endpoint receives the PR as a (possibly percent-encoded)
//! browser URL. Validation happens here, before any network call.

use crate::errors::{Error, ReviewResult};

/// A unique reference to a pull request: `(owner, repo, number)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrLocator {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl PrLocator {
    /// Parses `https://<host>/<owner>/<repo>/pull/<number>`.
    ///
    /// The input is percent-decoded first. Wrong segment count, a literal
    /// other than `pull`, or a non-integer number fail with
    /// [`Error::Validation`].
    pub fn parse(raw: &str) -> ReviewResult<Self> {
        let decoded = urlencoding::decode(raw)
            .map_err(|_| Error::Validation("PR URL is not valid UTF-8".into()))?;
        let decoded = decoded.trim();

        let rest = decoded
            .strip_prefix("https://")
            .or_else(|| decoded.strip_prefix("http://"))
            .ok_or_else(|| invalid(decoded))?;

        let rest = rest.trim_end_matches('/');
        let segments: Vec<&str> = rest.split('/').collect();
        // host / owner / repo / "pull" / number
        if segments.len() != 5 || segments[3] != "pull" {
            return Err(invalid(decoded));
        }
        let (owner, repo) = (segments[1], segments[2]);
        if owner.is_empty() || repo.is_empty() {
            return Err(invalid(decoded));
        }
        let number: u64 = segments[4]
            .parse()
            .map_err(|_| Error::Validation(format!("invalid PR number in URL: {decoded}")))?;

        Ok(PrLocator {
            owner: owner.to_string(),
            repo: repo.to_string(),
            number,
        })
    }
}

fn invalid(url: &str) -> Error {
    Error::Validation(format!("invalid PR reference: {url}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_url() {
        let pr = PrLocator::parse("https://github.com/octo/hello/pull/42").unwrap();
        assert_eq!(pr.owner, "octo");
        assert_eq!(pr.repo, "hello");
        assert_eq!(pr.number, 42);
    }

    #[test]
    fn parses_percent_encoded_url() {
        let pr =
            PrLocator::parse("https%3A%2F%2Fgithub.com%2Focto%2Fhello%2Fpull%2F7").unwrap();
        assert_eq!(pr.number, 7);
    }

    #[test]
    fn tolerates_trailing_slash() {
        assert!(PrLocator::parse("https://github.com/octo/hello/pull/42/").is_ok());
    }

    #[test]
    fn rejects_wrong_literal_segment() {
        assert!(PrLocator::parse("https://github.com/octo/hello/issues/42").is_err());
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert!(PrLocator::parse("https://github.com/octo/pull/42").is_err());
        assert!(PrLocator::parse("https://github.com/a/b/c/pull/42").is_err());
    }

    #[test]
    fn rejects_non_integer_number() {
        let err = PrLocator::parse("https://github.com/octo/hello/pull/latest").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn rejects_non_http_scheme() {
        assert!(PrLocator::parse("ftp://github.com/octo/hello/pull/42").is_err());
    }
}
