use std::fmt;

/// Relative weight a user assigned to a group.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Chance {
    /// No explicit value; the group shares whatever is left of 100.
    #[default]
    Auto,
    Explicit(u32),
}

impl Chance {
    /// Lenient parse of free-form chance text.
    ///
    /// Leading whitespace is skipped and the leading run of digits is taken, so
    /// `"50%"` is 50. Text without leading digits is `Auto`. A negative number is
    /// an explicit 0. Large values saturate.
    pub fn parse(text: &str) -> Chance {
        let s = text.trim_start();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let run: &str = {
            let end = digits
                .char_indices()
                .find(|(_, c)| !c.is_ascii_digit())
                .map(|(i, _)| i)
                .unwrap_or(digits.len());
            &digits[..end]
        };
        if run.is_empty() {
            return Chance::Auto;
        }
        if negative {
            return Chance::Explicit(0);
        }
        let value = run.bytes().fold(0u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        });
        Chance::Explicit(value)
    }

    #[inline]
    pub fn explicit(self) -> Option<u32> {
        match self {
            Chance::Auto => None,
            Chance::Explicit(v) => Some(v),
        }
    }

    #[inline]
    pub fn is_auto(self) -> bool {
        matches!(self, Chance::Auto)
    }
}

impl From<&str> for Chance {
    fn from(text: &str) -> Self {
        Chance::parse(text)
    }
}

impl fmt::Display for Chance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chance::Auto => f.write_str("auto"),
            Chance::Explicit(v) => write!(f, "{}%", v),
        }
    }
}
