//! CPF - the 11-digit Brazilian personal identifier used as voter id.
//!
//! The last two digits are check digits computed with a weighted mod-11 sum:
//!
//! - first: weights 10..=2 over the 9 base digits
//! - second: weights 11..=2 over the 9 base digits plus the first check digit
//!
//! In both cases the digit is `11 - (sum % 11)`, replaced by 0 when above 9.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Number of digits in a CPF.
pub const CPF_LENGTH: usize = 11;

const BASE_LENGTH: usize = 9;
const FIELD: &str = "codCpf";

/// `000.000.000-00`
const MASK: &[u8; 14] = b"###.###.###-##";

/// A structurally valid CPF (digits only, check digits verified).
///
/// `Debug` masks all but the last two digits so the value can appear in
/// log output; `Display` yields the full number.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl Cpf {
    /// Parses a CPF, accepting either bare digits or the `000.000.000-00` mask.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field(FIELD));
        }

        let digits = unmask(trimmed).ok_or_else(|| {
            ValidationError::invalid_format(
                FIELD,
                format!("must be {} digits or 000.000.000-00", CPF_LENGTH),
            )
        })?;

        let values: Vec<u8> = digits.bytes().map(|b| b - b'0').collect();
        let first = check_digit(&values[..BASE_LENGTH]);
        let second = check_digit(&values[..BASE_LENGTH + 1]);
        if values[BASE_LENGTH] != first || values[BASE_LENGTH + 1] != second {
            return Err(ValidationError::invalid_format(FIELD, "check digits do not match"));
        }

        Ok(Self(digits))
    }

    /// Builds the CPF whose first nine digits are `base`.
    ///
    /// Digits above 9 are reduced modulo 10.
    pub fn from_base_digits(base: [u8; BASE_LENGTH]) -> Self {
        let mut values: Vec<u8> = base.iter().map(|d| d % 10).collect();
        let first = check_digit(&values);
        values.push(first);
        let second = check_digit(&values);
        values.push(second);

        Self(values.iter().map(|d| char::from(b'0' + d)).collect())
    }

    /// Synthesizes a random, structurally valid CPF.
    ///
    /// Demo affordance for the voting client: the identity service is not
    /// guaranteed to consider the result eligible.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Same as [`Cpf::generate`] with a caller-supplied random source.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut base = [0u8; BASE_LENGTH];
        for digit in base.iter_mut() {
            *digit = rng.gen_range(0..10);
        }
        Self::from_base_digits(base)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// All digits but the last two replaced by `*`.
    pub fn masked(&self) -> String {
        let visible = &self.0[CPF_LENGTH - 2..];
        format!("{}{}", "*".repeat(CPF_LENGTH - 2), visible)
    }
}

/// The digits of `raw` if it is exactly 11 digits or exactly the mask.
fn unmask(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    if bytes.len() == CPF_LENGTH {
        return bytes.iter().all(u8::is_ascii_digit).then(|| raw.to_string());
    }
    if bytes.len() != MASK.len() {
        return None;
    }
    let mut digits = String::with_capacity(CPF_LENGTH);
    for (&b, &slot) in bytes.iter().zip(MASK.iter()) {
        match slot {
            b'#' if b.is_ascii_digit() => digits.push(char::from(b)),
            b'#' => return None,
            separator if b == separator => {}
            _ => return None,
        }
    }
    Some(digits)
}

/// Weighted mod-11 check digit over `digits`; the first digit gets weight
/// `digits.len() + 1` and the last gets weight 2.
fn check_digit(digits: &[u8]) -> u8 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=top).rev())
        .map(|(d, w)| u32::from(*d) * w)
        .sum();
    let raw = 11 - sum % 11;
    if raw > 9 {
        0
    } else {
        raw as u8
    }
}

impl fmt::Debug for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cpf").field(&self.masked()).finish()
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Cpf {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cpf {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cpf> for String {
    fn from(cpf: Cpf) -> Self {
        cpf.0
    }
}
