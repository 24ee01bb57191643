//! Expansion of parameterized terminfo strings.
//!
//! Implements the `%` stack language used by capabilities such as
//! `cursor_address` (`\x1b[%i%p1%d;%p2%dH`) and `set_a_foreground`.
//! Padding markers (`$<n>`) are passed through untouched.

use crate::error::{Result, TparmError};
use std::fmt;

/// A value on the expansion stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// Integer parameter.
    Number(i32),
    /// String parameter.
    Str(String),
}

impl Default for Param {
    fn default() -> Self {
        Param::Number(0)
    }
}

impl From<i32> for Param {
    fn from(n: i32) -> Self {
        Param::Number(n)
    }
}

impl From<u16> for Param {
    fn from(n: u16) -> Self {
        Param::Number(i32::from(n))
    }
}

impl From<u8> for Param {
    fn from(n: u8) -> Self {
        Param::Number(i32::from(n))
    }
}

impl From<&str> for Param {
    fn from(s: &str) -> Self {
        Param::Str(s.to_string())
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Number(n) => write!(f, "{}", n),
            Param::Str(s) => f.write_str(s),
        }
    }
}

impl Param {
    fn number(&self) -> Result<i32> {
        match self {
            Param::Number(n) => Ok(*n),
            Param::Str(_) => Err(TparmError::TypeMismatch),
        }
    }
}

/// printf-style conversion flags between `%` and the conversion character.
#[derive(Debug, Default)]
struct FormatSpec {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    alternate: bool,
    width: usize,
    precision: Option<usize>,
}

struct Machine {
    params: [Param; 9],
    stack: Vec<Param>,
    dynamic_vars: [Param; 26],
    static_vars: [Param; 26],
}

impl Machine {
    fn pop(&mut self) -> Result<Param> {
        self.stack.pop().ok_or(TparmError::StackUnderflow)
    }

    fn pop_number(&mut self) -> Result<i32> {
        self.pop()?.number()
    }

    fn push_number(&mut self, n: i32) {
        self.stack.push(Param::Number(n));
    }

    fn push_bool(&mut self, b: bool) {
        self.push_number(i32::from(b));
    }

    fn var_slot(&mut self, name: u8) -> Result<&mut Param> {
        match name {
            b'a'..=b'z' => Ok(&mut self.dynamic_vars[usize::from(name - b'a')]),
            b'A'..=b'Z' => Ok(&mut self.static_vars[usize::from(name - b'A')]),
            other => Err(TparmError::InvalidFormat(char::from(other))),
        }
    }
}

/// Expands a capability template with up to nine parameters.
///
/// # Examples
///
/// ```
/// use cortex_termio_terminfo::tparm::{tparm, Param};
///
/// let cup = tparm("\x1b[%i%p1%d;%p2%dH", &[Param::from(4), Param::from(9)]).unwrap();
/// assert_eq!(cup, "\x1b[5;10H");
/// ```
pub fn tparm(template: &str, params: &[Param]) -> Result<String> {
    let mut machine = Machine {
        params: Default::default(),
        stack: Vec::new(),
        dynamic_vars: Default::default(),
        static_vars: Default::default(),
    };
    for (slot, param) in machine.params.iter_mut().zip(params) {
        slot.clone_from(param);
    }

    let bytes = template.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len() + 8);
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        i += 1;
        if c != b'%' {
            out.push(c);
            continue;
        }

        let op = *bytes.get(i).ok_or(TparmError::InvalidFormat('%'))?;
        i += 1;

        match op {
            b'%' => out.push(b'%'),
            b'c' => {
                let n = machine.pop_number()?;
                out.push(n as u8);
            }
            b'd' | b'o' | b'x' | b'X' | b's' => {
                let value = machine.pop()?;
                out.extend_from_slice(format_param(&value, op, &FormatSpec::default())?.as_bytes());
            }
            b':' | b'#' | b' ' | b'.' | b'0'..=b'9' => {
                let (spec, conv, next) = parse_format_spec(bytes, i - 1)?;
                i = next;
                let value = machine.pop()?;
                out.extend_from_slice(format_param(&value, conv, &spec)?.as_bytes());
            }
            b'p' => {
                let digit = *bytes.get(i).ok_or(TparmError::InvalidFormat('p'))?;
                i += 1;
                if !(b'1'..=b'9').contains(&digit) {
                    return Err(TparmError::InvalidParameter(digit.wrapping_sub(b'0')));
                }
                let param = machine.params[usize::from(digit - b'1')].clone();
                machine.stack.push(param);
            }
            b'P' => {
                let name = *bytes.get(i).ok_or(TparmError::InvalidFormat('P'))?;
                i += 1;
                let value = machine.pop()?;
                *machine.var_slot(name)? = value;
            }
            b'g' => {
                let name = *bytes.get(i).ok_or(TparmError::InvalidFormat('g'))?;
                i += 1;
                let value = machine.var_slot(name)?.clone();
                machine.stack.push(value);
            }
            b'\'' => {
                let ch = *bytes.get(i).ok_or(TparmError::InvalidFormat('\''))?;
                if bytes.get(i + 1) != Some(&b'\'') {
                    return Err(TparmError::InvalidFormat('\''));
                }
                i += 2;
                machine.push_number(i32::from(ch));
            }
            b'{' => {
                let close = bytes[i..]
                    .iter()
                    .position(|&b| b == b'}')
                    .ok_or(TparmError::InvalidFormat('{'))?;
                let literal = std::str::from_utf8(&bytes[i..i + close])
                    .ok()
                    .and_then(|s| s.parse::<i32>().ok())
                    .ok_or(TparmError::InvalidFormat('{'))?;
                i += close + 1;
                machine.push_number(literal);
            }
            b'l' => {
                let value = machine.pop()?;
                let len = value.to_string().chars().count();
                machine.push_number(i32::try_from(len).unwrap_or(i32::MAX));
            }
            b'+' | b'-' | b'*' | b'/' | b'm' | b'&' | b'|' | b'^' | b'=' | b'>' | b'<' | b'A'
            | b'O' => {
                let rhs = machine.pop_number()?;
                let lhs = machine.pop_number()?;
                match op {
                    b'+' => machine.push_number(lhs.wrapping_add(rhs)),
                    b'-' => machine.push_number(lhs.wrapping_sub(rhs)),
                    b'*' => machine.push_number(lhs.wrapping_mul(rhs)),
                    b'/' => machine.push_number(
                        lhs.checked_div(rhs).ok_or(TparmError::DivideByZero)?,
                    ),
                    b'm' => machine.push_number(
                        lhs.checked_rem(rhs).ok_or(TparmError::DivideByZero)?,
                    ),
                    b'&' => machine.push_number(lhs & rhs),
                    b'|' => machine.push_number(lhs | rhs),
                    b'^' => machine.push_number(lhs ^ rhs),
                    b'=' => machine.push_bool(lhs == rhs),
                    b'>' => machine.push_bool(lhs > rhs),
                    b'<' => machine.push_bool(lhs < rhs),
                    b'A' => machine.push_bool(lhs != 0 && rhs != 0),
                    _ => machine.push_bool(lhs != 0 || rhs != 0),
                }
            }
            b'!' => {
                let n = machine.pop_number()?;
                machine.push_bool(n == 0);
            }
            b'~' => {
                let n = machine.pop_number()?;
                machine.push_number(!n);
            }
            b'i' => {
                for slot in machine.params.iter_mut().take(2) {
                    if let Param::Number(n) = slot {
                        *n = n.saturating_add(1);
                    }
                }
            }
            b'?' | b';' => {}
            b't' => {
                if machine.pop_number()? == 0 {
                    i = skip_branch(bytes, i, true)?;
                }
            }
            b'e' => {
                i = skip_branch(bytes, i, false)?;
            }
            other => return Err(TparmError::InvalidFormat(char::from(other))),
        }
    }

    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Skips to the `%e` (if `stop_at_else`) or `%;` closing the current
/// conditional and returns the index just past it.
fn skip_branch(bytes: &[u8], mut i: usize, stop_at_else: bool) -> Result<usize> {
    let mut depth = 0usize;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let Some(&op) = bytes.get(i + 1) else {
            break;
        };
        i += 2;
        match op {
            b'?' => depth += 1,
            b';' if depth == 0 => return Ok(i),
            b';' => depth -= 1,
            b'e' if depth == 0 && stop_at_else => return Ok(i),
            // %'c' may quote a '%'
            b'\'' => i += 2,
            _ => {}
        }
    }
    Err(TparmError::UnterminatedConditional)
}

/// Widest field a format may request.
const MAX_FIELD: usize = 1024;

/// Reads a decimal width or precision, rejecting values above [`MAX_FIELD`].
fn parse_field(bytes: &[u8], i: &mut usize) -> Result<usize> {
    let mut value = 0usize;
    while let Some(&digit) = bytes.get(*i).filter(|b| b.is_ascii_digit()) {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(usize::from(digit - b'0')))
            .filter(|&v| v <= MAX_FIELD)
            .ok_or(TparmError::InvalidFormat(char::from(digit)))?;
        *i += 1;
    }
    Ok(value)
}

fn parse_format_spec(bytes: &[u8], start: usize) -> Result<(FormatSpec, u8, usize)> {
    let mut spec = FormatSpec::default();
    let mut i = start;

    // a leading ':' lets '-' and '+' be read as flags rather than operators
    if bytes.get(i) == Some(&b':') {
        i += 1;
    }
    while let Some(&flag) = bytes.get(i) {
        match flag {
            b'-' => spec.left = true,
            b'+' => spec.plus = true,
            b' ' => spec.space = true,
            b'#' => spec.alternate = true,
            b'0' => spec.zero = true,
            _ => break,
        }
        i += 1;
    }
    spec.width = parse_field(bytes, &mut i)?;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        spec.precision = Some(parse_field(bytes, &mut i)?);
    }

    let conv = *bytes.get(i).ok_or(TparmError::InvalidFormat('%'))?;
    if !matches!(conv, b'd' | b'o' | b'x' | b'X' | b's') {
        return Err(TparmError::InvalidFormat(char::from(conv)));
    }
    Ok((spec, conv, i + 1))
}

fn format_param(value: &Param, conv: u8, spec: &FormatSpec) -> Result<String> {
    if conv == b's' {
        let mut text = value.to_string();
        if let Some(max) = spec.precision {
            text = text.chars().take(max).collect();
        }
        return Ok(pad(String::new(), text, spec.width, spec.left, false));
    }

    let n = value.number()?;
    let mut digits = match conv {
        b'o' => format!("{:o}", n),
        b'x' => format!("{:x}", n),
        b'X' => format!("{:X}", n),
        _ => n.unsigned_abs().to_string(),
    };
    if let Some(precision) = spec.precision {
        if digits.len() < precision {
            digits.insert_str(0, &"0".repeat(precision - digits.len()));
        }
    }

    let prefix = match conv {
        b'd' if n < 0 => "-",
        b'd' if spec.plus => "+",
        b'd' if spec.space => " ",
        b'o' if spec.alternate && !digits.starts_with('0') => "0",
        b'x' if spec.alternate && n != 0 => "0x",
        b'X' if spec.alternate && n != 0 => "0X",
        _ => "",
    };

    let zero_fill = spec.zero && !spec.left && spec.precision.is_none();
    Ok(pad(prefix.to_string(), digits, spec.width, spec.left, zero_fill))
}

fn pad(prefix: String, body: String, width: usize, left: bool, zero_fill: bool) -> String {
    let len = prefix.chars().count() + body.chars().count();
    if len >= width {
        return prefix + &body;
    }
    let fill = width - len;
    if left {
        prefix + &body + &" ".repeat(fill)
    } else if zero_fill {
        prefix + &"0".repeat(fill) + &body
    } else {
        " ".repeat(fill) + &prefix + &body
    }
}
