//! 正規化された YAML の出力
//!
//! 変更検出はバイト比較で行うため、出力は決定的でなければならない。
//! また launcher 側は YAML 1.1 のパーサーで読むので、`2222:22` のような
//! 60進数や数値に見える文字列は必ずクォートする。

use crate::document::{Mapping, Value};
use std::fmt::Write;

const INDENT: usize = 2;

/// libyaml が暗黙のキーとして受け付ける最大の長さ
const MAX_IMPLICIT_KEY: usize = 1024;

/// YAML 1.1 と 1.2 のどちらかで文字列以外に解釈されうる単語
const RESERVED_WORDS: &[&str] = &[
    "true", "false", "yes", "no", "on", "off", "y", "n", "null",
];

/// ルートマッピングを YAML 文字列に変換
pub fn to_yaml_string(root: &Mapping) -> String {
    let mut out = String::new();
    if root.is_empty() {
        out.push_str("{}\n");
    } else {
        write_mapping(&mut out, root, 0, false);
    }
    out
}

fn write_mapping(out: &mut String, map: &Mapping, indent: usize, mut inline_first: bool) {
    for (key, value) in map {
        if inline_first {
            inline_first = false;
        } else {
            push_indent(out, indent);
        }
        let mut rendered = String::new();
        write_string(&mut rendered, key);
        if rendered.chars().count() > MAX_IMPLICIT_KEY {
            // 長いキーは明示的なキー（`? key` / `: value`）で書く
            out.push_str("? ");
            out.push_str(&rendered);
            out.push('\n');
            push_indent(out, indent);
        } else {
            out.push_str(&rendered);
        }
        out.push(':');
        match value {
            Value::Mapping(m) if !m.is_empty() => {
                out.push('\n');
                write_mapping(out, m, indent + INDENT, false);
            }
            // シーケンスはキーと同じ深さに置く
            Value::Sequence(s) if !s.is_empty() => {
                out.push('\n');
                write_sequence(out, s, indent, false);
            }
            scalar => {
                out.push(' ');
                write_scalar(out, scalar);
                out.push('\n');
            }
        }
    }
}

fn write_sequence(out: &mut String, items: &[Value], indent: usize, mut inline_first: bool) {
    for item in items {
        if inline_first {
            inline_first = false;
        } else {
            push_indent(out, indent);
        }
        out.push_str("- ");
        match item {
            Value::Mapping(m) if !m.is_empty() => write_mapping(out, m, indent + INDENT, true),
            Value::Sequence(s) if !s.is_empty() => write_sequence(out, s, indent + INDENT, true),
            scalar => {
                write_scalar(out, scalar);
                out.push('\n');
            }
        }
    }
}

fn push_indent(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat_n(' ', indent));
}

fn write_scalar(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Integer(i) => {
            let _ = write!(out, "{i}");
        }
        Value::Float(f) => write_float(out, *f),
        Value::String(s) => write_string(out, s),
        Value::Sequence(_) => out.push_str("[]"),
        Value::Mapping(_) => out.push_str("{}"),
    }
}

fn write_float(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str(".nan");
    } else if f.is_infinite() {
        out.push_str(if f > 0.0 { ".inf" } else { "-.inf" });
    } else {
        // Debug 表記は常に小数点か指数を含むので整数と区別できる
        let _ = write!(out, "{f:?}");
    }
}

fn write_string(out: &mut String, s: &str) {
    if is_plain_safe(s) {
        out.push_str(s);
    } else {
        write_quoted(out, s);
    }
}

/// クォートなしで出力しても文字列としか解釈されないか
///
/// 先頭は ASCII 英字か `/` に限る。数字始まりは数値・時刻・60進数の
/// 可能性があるので常にクォートする。
pub(crate) fn is_plain_safe(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '/') {
        return false;
    }
    let plain_chars = s.chars().all(|c| {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | '@' | '+' | ',')
    });
    plain_chars && !RESERVED_WORDS.iter().any(|w| s.eq_ignore_ascii_case(w))
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if !is_printable(c) => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// libyaml がそのまま読める文字か
///
/// NEL と U+2028/U+2029 は改行として畳まれてしまうのでエスケープ側に回す。
fn is_printable(c: char) -> bool {
    matches!(
        c,
        '\u{20}'..='\u{7e}'
            | '\u{a0}'..='\u{2027}'
            | '\u{202a}'..='\u{d7ff}'
            | '\u{e000}'..='\u{fefe}'
            | '\u{ff00}'..='\u{fffd}'
            | '\u{10000}'..='\u{10ffff}'
    )
}
