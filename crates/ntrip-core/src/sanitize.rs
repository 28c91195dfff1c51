//! Host string normalization.
//!
//! Users paste caster addresses in every shape: full URLs, hosts copied
//! from a web page with a trailing path, strings with stray spaces or
//! pictographs. [`sanitize_host`] reduces all of these to the bare host
//! that goes into the request URL.

use regex::Regex;
use std::sync::LazyLock;

/// Leading URI scheme, e.g. `http://`, `ws://`, `svn+ssh://`.
static SCHEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9+\-.]*://").expect("scheme pattern is valid")
});

/// Pictographic symbols plus the joiners and selectors used to compose them.
static SYMBOLS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[\p{So}\p{Co}\p{Extended_Pictographic}\p{Emoji_Modifier}\x{200D}\x{FE00}-\x{FE0F}\x{E0020}-\x{E007F}]",
    )
    .expect("symbol pattern is valid")
});

/// Normalizes a user-supplied host into a bare hostname.
///
/// Steps, in order:
/// - strip one leading `scheme://`
/// - drop pictographic symbols, ZWJ, and variation selectors
/// - cut at the first `/`
/// - remove every whitespace character (not just at the ends)
///
/// Total and idempotent. The result is not validated as a hostname; an
/// empty string is a possible output.
pub fn sanitize_host(host: &str) -> String {
    let without_scheme = SCHEME.replace(host, "");
    let mut out = SYMBOLS.replace_all(&without_scheme, "").into_owned();
    if let Some(slash) = out.find('/') {
        out.truncate(slash);
    }
    // U+FEFF (BOM) is not White_Space but shows up in pasted hosts.
    out.retain(|c| !c.is_whitespace() && c != '\u{FEFF}');
    out
}
