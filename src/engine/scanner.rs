//! Single-pass template scanner
//!
//! The scanner transforms an input stream into an output stream in one
//! forward pass, with memory bounded to a single symbol name. It knows
//! nothing about what symbols mean; resolution is entirely the
//! registry's business.

use std::io::{self, BufRead, Read, Write};
use std::path::Path;

use super::registry::SymbolRegistry;

const DELIMITER: u8 = b'#';

/// Expand `#SYMBOL#` tokens from `input` into `output`.
///
/// Outside a token, bytes pass through verbatim. A `#` opens a token;
/// the bytes up to the closing `#` form the symbol name, which is looked
/// up in `registry` with `path` as the handler context. A resolved token
/// is replaced by the handler's text, emitted verbatim and never
/// re-scanned. An unknown symbol, or a handler that declines, is
/// reconstructed literally as `#name#`.
///
/// If the input ends mid-token, the opening `#` and the partial name are
/// dropped. That matches the behavior this tool replaces and is pinned
/// by tests; whether it was ever intentional is an open question.
///
/// Scanning is byte-wise: the delimiter is ASCII, so it can never occur
/// inside a multi-byte UTF-8 sequence. Only stream I/O failures are
/// returned; every symbol-resolution outcome becomes output text.
pub fn expand<R: BufRead, W: Write + ?Sized>(
    input: R,
    output: &mut W,
    registry: &SymbolRegistry,
    path: &Path,
) -> io::Result<()> {
    let mut bytes = input.bytes();

    while let Some(byte) = bytes.next() {
        let byte = byte?;
        if byte != DELIMITER {
            output.write_all(&[byte])?;
            continue;
        }

        // Opening delimiter seen: accumulate the symbol name.
        let mut name = Vec::new();
        let mut terminated = false;
        for byte in &mut bytes {
            let byte = byte?;
            if byte == DELIMITER {
                terminated = true;
                break;
            }
            name.push(byte);
        }

        if !terminated {
            // Truncated token at end of input.
            break;
        }

        match resolve(&name, registry, path) {
            Some(text) => output.write_all(text.as_bytes())?,
            None => {
                output.write_all(&[DELIMITER])?;
                output.write_all(&name)?;
                output.write_all(&[DELIMITER])?;
            }
        }
    }

    output.flush()
}

/// A name that is not valid UTF-8 can never match a registry key.
fn resolve(name: &[u8], registry: &SymbolRegistry, path: &Path) -> Option<String> {
    let name = std::str::from_utf8(name).ok()?;
    registry.resolve(name, path)
}

/// Expand an in-memory template, collecting the output into a `String`.
pub fn expand_to_string(template: &str, registry: &SymbolRegistry, path: &Path) -> String {
    let mut output = Vec::new();
    expand(template.as_bytes(), &mut output, registry, path)
        .expect("in-memory expansion should not fail");
    String::from_utf8(output).expect("expansion of UTF-8 input should be UTF-8")
}
