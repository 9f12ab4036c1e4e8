//! Handle encoding for profile-page paths.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except the URI-component unreserved marks `-_.!~*'()`.
const HANDLE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a handle for use as a single path segment.
#[must_use]
pub fn encode_handle(handle: &str) -> String {
    utf8_percent_encode(handle, HANDLE_ENCODE_SET).to_string()
}
