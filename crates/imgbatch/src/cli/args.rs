//! Go-style flag normalization.
//!
//! The tool accepts `-src dir` and `-src=dir` alongside `--src dir`. clap
//! only understands the double-dash form for multi-character names, so
//! known long flags written with one dash are rewritten before parsing.

use std::ffi::OsString;

/// Long flags that may be written with a single dash.
const LONG_FLAGS: &[&str] = &["src", "dst", "filter", "task", "config", "verbose", "json-logs"];

/// Rewrite `-name` / `-name=value` to `--name` / `--name=value` for known flags.
///
/// The first element (program name) and anything after `--` pass through.
pub fn normalize<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        out.push(rewrite(arg));
    }
    out
}

fn rewrite(arg: OsString) -> OsString {
    let Some(text) = arg.to_str() else {
        return arg;
    };
    let Some(rest) = text.strip_prefix('-') else {
        return arg;
    };
    if rest.starts_with('-') {
        return arg;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    if LONG_FLAGS.contains(&name) {
        OsString::from(format!("-{text}"))
    } else {
        arg
    }
}
