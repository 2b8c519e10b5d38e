//! Two candidate name resolution.
//!
//! Archive file names on disk and entry names inside older archives are frequently stored in the
//! code page of the machine that created them rather than UTF-8. Callers always hand us UTF-8, so
//! every lookup first tries the bytes as given and, only when that misses, the same string
//! re-encoded into the configured legacy encoding.

use std::borrow::Cow;

use encoding_rs::Encoding;
use tracing::trace;

/// Re-encodes a UTF-8 string into `legacy`.
///
/// Characters that `legacy` cannot represent are replaced by the encoder, which simply produces a
/// candidate that will not match anything.
pub fn to_legacy<'a>(value: &'a str, legacy: &'static Encoding) -> Cow<'a, [u8]> {
    let (bytes, _, unmappable) = legacy.encode(value);
    if unmappable {
        trace!("{value:?} has characters that {} can't encode", legacy.name());
    }
    bytes
}

/// Resolves `value` by trying its raw bytes, then its legacy encoding.
///
/// Returns the first candidate that `locate` accepts, or the error of the second attempt.
/// Exactly two attempts are made.
pub fn resolve<T, E>(
    value: &str,
    legacy: &'static Encoding,
    mut locate: impl FnMut(&[u8]) -> Result<T, E>,
) -> Result<T, E> {
    match locate(value.as_bytes()) {
        Ok(found) => Ok(found),
        Err(_) => locate(&to_legacy(value, legacy)),
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{resolve, to_legacy};

    #[test]
    fn ascii_is_unchanged() {
        assert_eq!(
            to_legacy("data/image.png", encoding_rs::GBK).as_ref(),
            b"data/image.png"
        );
    }

    #[test]
    fn encodes_into_single_byte_code_page() {
        assert_eq!(
            to_legacy("café", encoding_rs::WINDOWS_1252).as_ref(),
            b"caf\xe9"
        );
    }

    #[test]
    fn encodes_into_gbk() {
        assert_eq!(to_legacy("图", encoding_rs::GBK).as_ref(), b"\xcd\xbc");
    }

    #[test]
    fn raw_candidate_wins() {
        let mut attempts = Vec::new();
        let found: Result<usize, ()> = resolve("café", encoding_rs::WINDOWS_1252, |candidate| {
            attempts.push(candidate.to_vec());
            Ok(attempts.len())
        });

        assert_eq!(found, Ok(1));
        assert_eq!(attempts, vec!["café".as_bytes().to_vec()]);
    }

    #[test]
    fn falls_back_once_and_keeps_last_error() {
        let mut attempts = Vec::new();
        let found: Result<(), usize> = resolve("café", encoding_rs::WINDOWS_1252, |candidate| {
            attempts.push(candidate.to_vec());
            Err(attempts.len())
        });

        assert_eq!(found, Err(2));
        assert_eq!(
            attempts,
            vec!["café".as_bytes().to_vec(), b"caf\xe9".to_vec()]
        );
    }
}
