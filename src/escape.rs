use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Bytes that get percent-encoded in `Path=` values: everything outside the
/// RFC 2396 unreserved set, except `/`, which is a legal separator in the
/// stored path and stays verbatim.
const PATH_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'/');

/// Escapes a path for storage in a `.trashinfo` file.
///
/// The input is treated as opaque bytes; anything outside the unreserved set
/// becomes `%HH` with uppercase hex, non-ASCII byte by byte.
pub(crate) fn escape_path(path: &[u8]) -> String {
    percent_encoding::percent_encode(path, PATH_VALUE).to_string()
}
