// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Which character a score uses as decimal separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecimalSeparator {
    /// Accept both `.` and `,`.
    #[default]
    Auto,
    /// Only `.` (`7.5`).
    Dot,
    /// Only `,` (`7,5`).
    Comma,
}

impl DecimalSeparator {
    const fn accepts(self, c: char) -> bool {
        match self {
            Self::Auto => c == '.' || c == ',',
            Self::Dot => c == '.',
            Self::Comma => c == ',',
        }
    }
}

/// Parses a decimal token such as `7,50` or `-1.5`.
///
/// Only an optional sign, ASCII digits and at most one separator are
/// accepted, so tokens like `inf`, `1e3` or `7.5.1` are rejected.
#[must_use]
pub fn parse_decimal(token: &str, separator: DecimalSeparator) -> Option<f64> {
    let token: &str = token.trim();
    let unsigned: &str = token
        .strip_prefix('-')
        .or_else(|| token.strip_prefix('+'))
        .unwrap_or(token);

    let mut digits: usize = 0;
    let mut separators: usize = 0;
    let mut normalized: String = String::with_capacity(token.len());
    if token.starts_with('-') {
        normalized.push('-');
    }

    for c in unsigned.chars() {
        if c.is_ascii_digit() {
            digits += 1;
            normalized.push(c);
        } else if separator.accepts(c) {
            separators += 1;
            normalized.push('.');
        } else {
            return None;
        }
    }

    if digits == 0 || separators > 1 {
        return None;
    }

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
