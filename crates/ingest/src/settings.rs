// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use refgrid_domain::{CodeNormalization, DateOrder, DecimalSeparator};
use serde::{Deserialize, Serialize};

/// Value conventions shared by every parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseSettings {
    /// How referee codes are canonicalized.
    pub normalization: CodeNormalization,
    /// Field order for ambiguous numeric dates.
    pub date_order: DateOrder,
    /// Decimal separator accepted in scores.
    pub decimal_separator: DecimalSeparator,
}
