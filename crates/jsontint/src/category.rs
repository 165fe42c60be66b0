use core::fmt;

/// The highlight category attached to a token.
///
/// Categories are opaque labels: the host maps them to presentation styles.
/// Their string form (see [`HighlightCategory::as_str`]) is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum HighlightCategory {
    /// `{` and `}`.
    ObjectDelimiter,
    /// `[` and `]`.
    ArrayDelimiter,
    /// `:` between a property name and its value.
    ColonDelimiter,
    /// `,` between members or elements.
    CommaDelimiter,
    /// `true` and `false`.
    BooleanValue,
    /// `null`.
    NullValue,
    /// A string in value position.
    ValueString,
    /// A string in property-name position.
    PropertyName,
    /// A numeric literal.
    NumberValue,
    /// A `//` comment. Only produced when comments are enabled.
    CommentLine,
    /// A `/* */` comment. Only produced when comments are enabled.
    CommentBlock,
}

impl HighlightCategory {
    /// Every category, in declaration order.
    pub const ALL: [HighlightCategory; 11] = [
        HighlightCategory::ObjectDelimiter,
        HighlightCategory::ArrayDelimiter,
        HighlightCategory::ColonDelimiter,
        HighlightCategory::CommaDelimiter,
        HighlightCategory::BooleanValue,
        HighlightCategory::NullValue,
        HighlightCategory::ValueString,
        HighlightCategory::PropertyName,
        HighlightCategory::NumberValue,
        HighlightCategory::CommentLine,
        HighlightCategory::CommentBlock,
    ];

    /// Returns the category's string identifier, e.g. `"property-name"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HighlightCategory::ObjectDelimiter => "object-delimiter",
            HighlightCategory::ArrayDelimiter => "array-delimiter",
            HighlightCategory::ColonDelimiter => "colon-delimiter",
            HighlightCategory::CommaDelimiter => "comma-delimiter",
            HighlightCategory::BooleanValue => "boolean-value",
            HighlightCategory::NullValue => "null-value",
            HighlightCategory::ValueString => "value-string",
            HighlightCategory::PropertyName => "property-name",
            HighlightCategory::NumberValue => "number-value",
            HighlightCategory::CommentLine => "comment-line",
            HighlightCategory::CommentBlock => "comment-block",
        }
    }
}

impl fmt::Display for HighlightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
