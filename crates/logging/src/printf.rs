//! crates/logging/src/printf.rs
//! printf-style template rendering.
//!
//! Templates use `%` verbs with optional flags (`-+# 0`), width and
//! precision. Supported verbs: `%v %s %q %d %b %o %x %X %c %f %t` and the
//! literal `%%`. Mismatches never fail; they render inline markers:
//!
//! | problem | rendering |
//! |---|---|
//! | missing argument | `%!d(MISSING)` |
//! | wrong type for verb | `%!d(string=abc)` |
//! | unknown verb | `%!z(int=3)` |
//! | trailing `%` | `%!(NOVERB)` |
//! | unused arguments | `%!(EXTRA int=1, string=x)` |
//! | width above 1e6 | `%!(BADWIDTH)`, then the value unpadded |
//! | precision above 1e6 | `%!(BADPREC)`, then the value at default precision |

use std::fmt::{self, Write as _};

/// Largest accepted width or precision.
const MAX_WIDTH: usize = 1_000_000;

/// A positional template argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Text, including rendered error values.
    Str(String),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Single character.
    Char(char),
    /// Absent value.
    Nil,
}

impl Value {
    /// Captures the `Display` rendering of any value.
    pub fn display(value: impl fmt::Display) -> Self {
        Self::Str(value.to_string())
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float(_) => "float64",
            Self::Bool(_) => "bool",
            Self::Char(_) => "int32",
            Self::Nil => "<nil>",
        }
    }
}

impl fmt::Display for Value {
    /// Renders as the `%v` verb would.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Uint(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Char(c) => write!(f, "{}", u32::from(*c)),
            Self::Nil => f.write_str("<nil>"),
        }
    }
}

macro_rules! value_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

value_from!(Int as i64: i8, i16, i32, i64);
value_from!(Uint as u64: u8, u16, u32, u64);
value_from!(Float as f64: f32, f64);
value_from!(Str as String: &str, String, &String);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::Uint(value as u64)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}

#[derive(Default)]
struct Directive {
    minus: bool,
    plus: bool,
    sharp: bool,
    space: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

impl Directive {
    fn pad(&self, out: &mut String, body: &str) {
        let len = body.chars().count();
        let fill = self.width.map_or(0, |w| w.saturating_sub(len));
        if fill == 0 {
            out.push_str(body);
        } else if self.minus {
            out.push_str(body);
            out.extend(std::iter::repeat_n(' ', fill));
        } else if self.zero {
            // Zero padding goes after any sign.
            let (sign, digits) = match body.as_bytes().first() {
                Some(b'-' | b'+' | b' ') => body.split_at(1),
                _ => ("", body),
            };
            out.push_str(sign);
            out.extend(std::iter::repeat_n('0', fill));
            out.push_str(digits);
        } else {
            out.extend(std::iter::repeat_n(' ', fill));
            out.push_str(body);
        }
    }

    fn sign(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        }
    }
}

fn integer(directive: &Directive, negative: bool, magnitude: u64, verb: char) -> String {
    let digits = match verb {
        'b' => format!("{magnitude:b}"),
        'o' => format!("{magnitude:o}"),
        'x' => format!("{magnitude:x}"),
        'X' => format!("{magnitude:X}"),
        _ => magnitude.to_string(),
    };
    let prefix = match (directive.sharp, verb) {
        (true, 'b') => "0b",
        (true, 'o') => "0",
        (true, 'x') => "0x",
        (true, 'X') => "0X",
        _ => "",
    };
    let digits = match directive.precision {
        Some(p) if digits.len() < p => format!("{}{digits}", "0".repeat(p - digits.len())),
        _ => digits,
    };
    format!("{}{prefix}{digits}", directive.sign(negative))
}

fn quote(text: &str) -> String {
    format!("{text:?}")
}

fn hex_bytes(bytes: &[u8], upper: bool) -> String {
    bytes.iter().fold(String::new(), |mut out, b| {
        let _ = if upper {
            write!(out, "{b:02X}")
        } else {
            write!(out, "{b:02x}")
        };
        out
    })
}

fn bad_verb(out: &mut String, verb: char, value: &Value) {
    match value {
        Value::Nil => {
            let _ = write!(out, "%!{verb}(<nil>)");
        }
        other => {
            let _ = write!(out, "%!{verb}({}={other})", other.type_name());
        }
    }
}

fn render_one(out: &mut String, directive: &Directive, verb: char, value: &Value) {
    let body = match (verb, value) {
        ('v', Value::Float(x)) | ('f', Value::Float(x)) => {
            let precision = directive.precision.unwrap_or(if verb == 'f' { 6 } else { 0 });
            let text = if verb == 'v' && directive.precision.is_none() {
                format!("{x}")
            } else {
                format!("{x:.precision$}")
            };
            if x.is_sign_negative() || !(directive.plus || directive.space) {
                text
            } else {
                format!("{}{text}", directive.sign(false))
            }
        }
        ('v', Value::Int(n)) | ('d', Value::Int(n)) => integer(directive, *n < 0, n.unsigned_abs(), 'd'),
        ('v', Value::Uint(n)) | ('d', Value::Uint(n)) => integer(directive, false, *n, 'd'),
        ('b' | 'o' | 'x' | 'X', Value::Int(n)) => integer(directive, *n < 0, n.unsigned_abs(), verb),
        ('b' | 'o' | 'x' | 'X', Value::Uint(n)) => integer(directive, false, *n, verb),
        ('v' | 'd' | 'b' | 'o' | 'x' | 'X', Value::Char(c)) => {
            integer(directive, false, u64::from(u32::from(*c)), if verb == 'v' { 'd' } else { verb })
        }
        ('v' | 's', Value::Str(s)) => match directive.precision {
            Some(p) => s.chars().take(p).collect(),
            None => s.clone(),
        },
        ('q', Value::Str(s)) => quote(s),
        ('x' | 'X', Value::Str(s)) => hex_bytes(s.as_bytes(), verb == 'X'),
        ('c', Value::Char(c)) => c.to_string(),
        ('c', Value::Int(n)) => u32::try_from(*n)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
            .to_string(),
        ('q', Value::Char(c)) => format!("{c:?}"),
        ('v' | 't', Value::Bool(b)) => b.to_string(),
        ('v', Value::Nil) => "<nil>".to_owned(),
        _ => {
            bad_verb(out, verb, value);
            return;
        }
    };
    directive.pad(out, &body);
}

/// Renders `template`, substituting `values` positionally.
///
/// # Examples
///
/// ```
/// use logging::printf::{sprintf, Value};
///
/// assert_eq!(sprintf("%s-%d", &["x".into(), 3.into()]), "x-3");
/// assert_eq!(sprintf("%05.1f|%-4s|", &[2.5.into(), "ab".into()]), "002.5|ab  |");
/// assert_eq!(sprintf("%d %d", &[Value::Int(1)]), "1 %!d(MISSING)");
/// assert_eq!(sprintf("done", &[Value::Int(7)]), "done%!(EXTRA int=7)");
/// ```
#[must_use]
pub fn sprintf(template: &str, values: &[Value]) -> String {
    let mut out = String::with_capacity(template.len() + values.len() * 8);
    let mut next = 0;
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }

        let mut directive = Directive::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => directive.minus = true,
                '+' => directive.plus = true,
                '#' => directive.sharp = true,
                ' ' => directive.space = true,
                '0' => directive.zero = true,
                _ => break,
            }
            chars.next();
        }
        directive.width = take_number(&mut chars);
        if directive.width.is_some_and(|width| width > MAX_WIDTH) {
            out.push_str("%!(BADWIDTH)");
            directive.width = None;
        }
        if chars.peek() == Some(&'.') {
            chars.next();
            let precision = take_number(&mut chars).unwrap_or(0);
            if precision > MAX_WIDTH {
                out.push_str("%!(BADPREC)");
            } else {
                directive.precision = Some(precision);
            }
        }

        let Some(verb) = chars.next() else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }
        match values.get(next) {
            Some(value) => {
                next += 1;
                render_one(&mut out, &directive, verb, value);
            }
            None => {
                let _ = write!(out, "%!{verb}(MISSING)");
            }
        }
    }

    if let Some(extra) = values.get(next..).filter(|rest| !rest.is_empty()) {
        out.push_str("%!(EXTRA ");
        for (index, value) in extra.iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}={value}", value.type_name());
        }
        out.push(')');
    }

    out
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<usize> {
    let mut number: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        number = Some(number.unwrap_or(0).saturating_mul(10).saturating_add(digit as usize));
        chars.next();
    }
    number
}
