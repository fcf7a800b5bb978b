//! Fluent builder for search query text.
//!
//! Each step consumes the builder and returns the next stage, so a partially
//! built query is never shared between two chains.

/// First stage: optional source selectors, then a keyword filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuilder {
    text: String,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source selector such as `_sourceCategory=prod/web`.
    pub fn from_source(mut self, source: &str) -> Self {
        self.text.push_str(source);
        self.text.push(' ');
        self
    }

    /// Append the keyword filter, quoted when it contains a space.
    pub fn filter(mut self, filter: &str) -> PipeBuilder {
        if filter.contains(' ') {
            self.text.push('"');
            self.text.push_str(filter);
            self.text.push('"');
        } else {
            self.text.push_str(filter);
        }
        PipeBuilder { text: self.text }
    }

    pub fn build(self) -> String {
        self.text
    }
}

/// Second stage: pipe operators after the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeBuilder {
    text: String,
}

impl PipeBuilder {
    /// Append a raw pipe fragment: `|fragment`.
    pub fn and(mut self, fragment: &str) -> Self {
        self.text.push('|');
        self.text.push_str(fragment);
        self
    }

    /// Append `|parse "pattern" as a,b`.
    pub fn parse(mut self, pattern: &str, fields: &[&str]) -> Self {
        self.text.push_str("|parse \"");
        self.text.push_str(pattern);
        self.text.push_str("\" as ");
        self.text.push_str(&fields.join(","));
        self
    }

    /// Start a `where` clause on `field`.
    pub fn where_field(self, field: &str) -> WhereBuilder {
        WhereBuilder {
            parent: self,
            field: field.to_string(),
        }
    }

    pub fn build(self) -> String {
        self.text
    }
}

/// `where` clause awaiting its match operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereBuilder {
    parent: PipeBuilder,
    field: String,
}

impl WhereBuilder {
    /// Append `| where field matches "value"`.
    pub fn matches(mut self, value: &str) -> PipeBuilder {
        let clause = format!("| where {} matches \"{}\"", self.field, value);
        self.parent.text.push_str(&clause);
        self.parent
    }

    /// Append `| where !(field matches "value")`.
    pub fn not_matches(mut self, value: &str) -> PipeBuilder {
        let clause = format!("| where !({} matches \"{}\")", self.field, value);
        self.parent.text.push_str(&clause);
        self.parent
    }
}
